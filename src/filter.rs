//! Row filtering: drops rows that carry no usable sample or fall outside the stage range.

use log::trace;

use crate::models::{DecodedRow, Sample};
use crate::options::StageRange;

/// Why a decoded row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Status column was `x` or missing.
    UnusableStatus,
    /// No valid time value (stage markers, headers, malformed times).
    InvalidTime,
    /// Stage outside the requested range.
    OutOfRange(i32),
}

/// Keeps rows with a usable status, a valid time, and a stage inside `range`.
#[derive(Debug, Clone, Copy)]
pub struct RecordFilter {
    range: StageRange,
}

impl RecordFilter {
    pub fn new(range: StageRange) -> Self {
        Self { range }
    }

    /// Turn a decoded row into a sample, or say why it was dropped.
    pub fn apply(&self, row: DecodedRow) -> Result<Sample, Rejection> {
        let misc = row.com.ok_or(Rejection::UnusableStatus)?;

        if row.current_time.is_nan() {
            return Err(Rejection::InvalidTime);
        }

        if !self.range.contains(misc.current_stage) {
            return Err(Rejection::OutOfRange(misc.current_stage));
        }

        Ok(Sample {
            current_time: row.current_time,
            km: row.km,
            km_per_hour: row.km_per_hour,
            watts: row.watts,
            heart_rate: row.heart_rate,
            rpm: row.rpm,
            misc,
        })
    }

    /// Like [`apply`](Self::apply), discarding the reason.
    pub fn keep(&self, row: DecodedRow) -> Option<Sample> {
        self.apply(row)
            .map_err(|reason| trace!("Dropping row: {:?}", reason))
            .ok()
    }
}
