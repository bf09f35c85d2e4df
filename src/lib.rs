//! # Stages Parser
//!
//! A Rust library for parsing the CSV workout logs written by Stages indoor bikes into
//! a stream of typed samples.
//!
//! ## Features
//!
//! - **Lazy parsing**: samples are decoded one row at a time as you iterate
//! - **Stage tracking**: `Stage_NN` marker rows advance the stage counter
//! - **Stage filtering**: select a single stage or an inclusive range
//! - **Normalization**: rebase time and distance to the start of the first selected stage
//! - **JSON Lines output**: write samples for downstream tools
//!
//! ## Quick Start
//!
//! ```no_run
//! use stages_parser::{parse_file, ParseOptions};
//!
//! for sample in parse_file("workout.csv", ParseOptions::new()) {
//!     let sample = sample?;
//!     println!("{:>6}s  {:>3} rpm  stage {}", sample.current_time, sample.rpm.unwrap_or(0), sample.stage());
//! }
//! # Ok::<(), stages_parser::Error>(())
//! ```
//!
//! ## Log Format
//!
//! Each row holds, in order: elapsed time (`mm:ss` or `hh:mm:ss`), kilometers, km/h,
//! watts, heart rate, rpm, and a communication status. Rows whose time column is not a
//! time are skipped; a `Stage_NN` there starts the next stage. Rows with status `x`
//! are skipped.
//!
//! ## Error Handling
//!
//! [`parse_file`] is lazy, so bad options and unreadable files show up as the first item:
//!
//! ```no_run
//! use stages_parser::{parse_file, Error, ParseOptions};
//!
//! match parse_file("workout.csv", ParseOptions::new().stages([2, 5])).next() {
//!     Some(Ok(sample)) => println!("first sample at {}s", sample.current_time),
//!     Some(Err(Error::FileRead { path, .. })) => eprintln!("cannot read {}", path.display()),
//!     Some(Err(err)) => eprintln!("Error: {}", err),
//!     None => println!("no samples"),
//! }
//! ```

// Public API modules
pub mod error;
pub mod options;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use models::{Misc, Sample};
pub use options::{ParseOptions, StageRange, Stages};
#[cfg(feature = "tokio-runtime")]
pub use reader::parse_file_async;
pub use reader::{parse_file, Samples, StagesReader};
pub use writer::{JsonLinesWriter, WriteStats};

// Pipeline stages (public but not part of the high-level API)
pub mod decoder;
pub mod filter;
pub mod models;
pub mod normalizer;
pub mod rows;
