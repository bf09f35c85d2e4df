//! Simple example of converting a Stages log to JSON Lines.

use stages_parser::{parse_file, JsonLinesWriter, ParseOptions};

fn main() -> Result<(), stages_parser::Error> {
    // Keep the intervals, timed from the start of stage 2
    let options = ParseOptions::new().stages([2, 5]).normalize(true);

    let stats = JsonLinesWriter::create("workout.jsonl")?
        .write_all(parse_file("workout.csv", options))?;

    println!("{}", stats.summary());

    Ok(())
}
