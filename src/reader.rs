//! High-level API for reading Stages logs.

use csv::StringRecord;
use log::{debug, info};
use std::mem;
use std::path::{Path, PathBuf};

use crate::decoder::FieldDecoder;
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::models::Sample;
use crate::normalizer::Normalizer;
use crate::options::ParseOptions;
use crate::rows::{self, RowSource};

/// Parse the Stages log at `path`.
///
/// Nothing happens until the returned iterator is first advanced: options are validated
/// and the file is read on the first call to `next()`, and any failure is yielded as
/// that first item.
///
/// # Examples
///
/// ```no_run
/// use stages_parser::{parse_file, ParseOptions};
///
/// for sample in parse_file("workout.csv", ParseOptions::new().stages([2, 5])) {
///     let sample = sample?;
///     println!("{}s stage {}: {} W", sample.current_time, sample.stage(), sample.watts.unwrap_or(0));
/// }
/// # Ok::<(), stages_parser::Error>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Samples {
    Samples {
        options,
        state: State::Pending(Input::File(path.as_ref().to_path_buf())),
    }
}

/// Async variant of [`parse_file`]. The whole-file read is the only await point;
/// the returned iterator is the same lazy pipeline.
///
/// Unlike the sync version, option and read errors are returned directly.
#[cfg(feature = "tokio-runtime")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Samples> {
    let path = path.as_ref();
    options.stage_range()?;

    let data = tokio::fs::read(path)
        .await
        .map_err(|source| crate::Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Samples::from_bytes(data, options))
}

enum Input {
    File(PathBuf),
    Bytes(Vec<u8>),
}

enum State {
    Pending(Input),
    Running(Pipeline),
    Done,
}

/// Lazy, single-pass sequence of samples from one Stages log.
///
/// Yields `Err` at most once; the sequence ends after it.
pub struct Samples {
    options: ParseOptions,
    state: State,
}

impl Samples {
    /// Parse an in-memory log.
    pub fn from_bytes(data: Vec<u8>, options: ParseOptions) -> Self {
        Self {
            options,
            state: State::Pending(Input::Bytes(data)),
        }
    }

    /// Current stage of the decoder, or `None` before the first pull.
    pub fn current_stage(&self) -> Option<i32> {
        match &self.state {
            State::Running(pipeline) => Some(pipeline.decoder.current_stage()),
            State::Pending(_) | State::Done => None,
        }
    }
}

impl Iterator for Samples {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Pending(_) => {
                    let State::Pending(input) = mem::replace(&mut self.state, State::Done) else {
                        unreachable!()
                    };
                    match Pipeline::start(input, &self.options) {
                        Ok(pipeline) => self.state = State::Running(pipeline),
                        Err(e) => return Some(Err(e)),
                    }
                }
                State::Running(pipeline) => {
                    let item = pipeline.next_sample();
                    match &item {
                        Some(Ok(_)) => {}
                        Some(Err(_)) => self.state = State::Done,
                        None => {
                            pipeline.log_summary();
                            self.state = State::Done;
                        }
                    }
                    return item;
                }
                State::Done => return None,
            }
        }
    }
}

struct Pipeline {
    rows: RowSource,
    decoder: FieldDecoder,
    filter: RecordFilter,
    normalizer: Normalizer,
    rows_read: usize,
    samples_emitted: usize,
}

impl Pipeline {
    fn start(input: Input, options: &ParseOptions) -> Result<Self> {
        let range = options.stage_range()?;
        debug!("Selecting stages {:?}, normalize={}", range, options.normalize);

        let rows = match input {
            Input::File(path) => RowSource::from_bytes(rows::read_file(path)?),
            Input::Bytes(data) => RowSource::from_bytes(data),
        };

        Ok(Self {
            rows,
            decoder: FieldDecoder::new(),
            filter: RecordFilter::new(range),
            normalizer: Normalizer::new(options.normalize, range.lo),
            rows_read: 0,
            samples_emitted: 0,
        })
    }

    fn next_sample(&mut self) -> Option<Result<Sample>> {
        for record in self.rows.by_ref() {
            let record: StringRecord = match record {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            self.rows_read += 1;

            let decoded = self.decoder.decode(&record);
            if let Some(sample) = self.filter.keep(decoded.row) {
                self.samples_emitted += 1;
                return Some(self.normalizer.apply(sample));
            }
        }
        None
    }

    fn log_summary(&self) {
        info!(
            "Emitted {} samples from {} rows ({} stages seen)",
            self.samples_emitted,
            self.rows_read,
            self.decoder.current_stage()
        );
    }
}

/// A Stages log held in memory, for parsing more than once.
///
/// # Examples
///
/// ```no_run
/// use stages_parser::{ParseOptions, StagesReader};
///
/// let reader = StagesReader::from_file("workout.csv")?;
/// let warmup = reader.read_all(ParseOptions::new().stages(1))?;
/// let intervals = reader.read_all(ParseOptions::new().stages([2, 5]).normalize(true))?;
/// # Ok::<(), stages_parser::Error>(())
/// ```
pub struct StagesReader {
    data: Vec<u8>,
}

impl StagesReader {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`](crate::Error::FileRead) if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            data: rows::read_file(path)?,
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Start a fresh lazy parse over the held bytes.
    pub fn samples(&self, options: ParseOptions) -> Samples {
        Samples::from_bytes(self.data.clone(), options)
    }

    /// Collect every sample, stopping at the first error.
    pub fn read_all(&self, options: ParseOptions) -> Result<Vec<Sample>> {
        self.samples(options).collect()
    }
}
