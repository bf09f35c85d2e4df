//! Command-line interface for the Stages parser.
//!
//! Converts one Stages bike log to JSON Lines, one sample per line.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use stages_parser::{parse_file, JsonLinesWriter, ParseOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert Stages bike logs to JSON Lines",
    long_about = "Parses the CSV log written by a Stages indoor bike and prints one JSON object per sample.\n\n\
                  Stage marker rows and rows with a failed communication status are skipped."
)]
struct Args {
    /// Stages CSV log
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Stage, or inclusive stage range as LO,HI
    #[arg(short, long, value_delimiter = ',', value_name = "STAGES")]
    stages: Vec<i32>,

    /// Rebase time and distance to the first row of the lowest selected stage
    #[arg(short, long)]
    normalize: bool,

    /// JSON file with parse options ({"stages": [2, 5], "normalize": true}).
    /// Command-line flags take precedence
    #[arg(long, value_name = "OPTIONS")]
    options: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn load_options(args: &Args) -> Result<ParseOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing options in {}", path.display()))?
        }
        None => ParseOptions::new(),
    };

    if !args.stages.is_empty() {
        options = options.stages(args.stages.clone());
    }
    if args.normalize {
        options = options.normalize(true);
    }

    Ok(options)
}

fn convert(input: &Path, output: Option<&Path>, options: ParseOptions) -> Result<()> {
    let start_time = Instant::now();
    let samples = parse_file(input, options);

    let stats = match output {
        Some(path) => JsonLinesWriter::create(path)?.write_all(samples)?,
        None => JsonLinesWriter::new(io::stdout().lock()).write_all(samples)?,
    };

    info!("{} in {:.2?}", stats.summary(), start_time.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let options = load_options(&args)?;
    info!("Parsing {} with {:?}", args.input.display(), options);

    convert(&args.input, args.output.as_deref(), options)
        .with_context(|| format!("converting {}", args.input.display()))
}
