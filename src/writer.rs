//! Writing parsed samples as JSON Lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Sample;

/// Writes samples as one JSON object per line.
///
/// NaN distances and speeds are written as `null`, since JSON has no NaN.
///
/// # Examples
///
/// ```no_run
/// use stages_parser::{parse_file, JsonLinesWriter, ParseOptions};
///
/// let stats = JsonLinesWriter::create("workout.jsonl")?
///     .write_all(parse_file("workout.csv", ParseOptions::new()))?;
/// println!("{}", stats.summary());
/// # Ok::<(), stages_parser::Error>(())
/// ```
pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write(&mut self, sample: &Sample) -> Result<()> {
        serde_json::to_writer(&mut self.out, sample)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Drain `samples` into the output, stopping at the first error.
    pub fn write_all<I>(mut self, samples: I) -> Result<WriteStats>
    where
        I: IntoIterator<Item = Result<Sample>>,
    {
        let mut stats = WriteStats::default();

        for sample in samples {
            let sample = sample?;
            self.write(&sample)?;
            stats.record(&sample);
        }

        self.out.flush()?;
        Ok(stats)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Total number of samples written
    pub num_samples: usize,
    /// Lowest and highest stage written
    pub stages: Option<(i32, i32)>,
}

impl WriteStats {
    fn record(&mut self, sample: &Sample) {
        let stage = sample.stage();
        self.num_samples += 1;
        self.stages = Some(match self.stages {
            Some((lo, hi)) => (lo.min(stage), hi.max(stage)),
            None => (stage, stage),
        });
    }

    /// Get a human-readable summary of the write operation.
    pub fn summary(&self) -> String {
        match self.stages {
            Some((lo, hi)) if lo == hi => {
                format!("Wrote {} samples from stage {}", self.num_samples, lo)
            }
            Some((lo, hi)) => {
                format!("Wrote {} samples from stages {}-{}", self.num_samples, lo, hi)
            }
            None => "Wrote 0 samples".to_string(),
        }
    }
}
