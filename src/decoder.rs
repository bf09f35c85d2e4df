//! Field decoding for Stages log rows.
//!
//! The time column doubles as a carrier for stage markers (`Stage_02`, `Stage_03`, ...).
//! Every real time value has at least one colon, so a colon-less time field is never a
//! sample; when it names a stage, the decoder's [`StageTracker`] advances.

use csv::StringRecord;
use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

use crate::models::{Column, DecodedRow, Misc};

static STAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Stage_[0-9][0-9]").expect("stage marker pattern is valid"));

/// Leading integer of a field; anything after the digits is ignored (`120W` is 120).
static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+-]?[0-9]+").expect("integer pattern is valid"));

/// Leading decimal of a field, with optional exponent (`0.5km` is 0.5).
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float pattern is valid")
});

/// Literal the device writes in the status column when communication failed.
const COM_UNUSABLE: &str = "x";

/// Stage counter for one parse. The bike always starts recording in stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTracker {
    current: i32,
}

impl StageTracker {
    pub fn new() -> Self {
        Self { current: 1 }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    fn advance(&mut self) {
        self.current += 1;
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of decoding one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub row: DecodedRow,
    /// Whether this row was a stage marker that advanced the tracker.
    pub stage_advanced: bool,
}

/// What the time column of a row turned out to hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeField {
    /// Elapsed seconds. NaN if any piece was not an integer.
    Seconds(f64),
    /// A `Stage_NN` marker.
    StageMarker,
    /// Anything else without a usable time: headers, blank cells, odd piece counts.
    Invalid,
}

impl TimeField {
    pub fn parse(raw: &str) -> Self {
        let pieces: Vec<f64> = raw.split(':').map(parse_time_piece).collect();

        match pieces.as_slice() {
            [_] if STAGE_MARKER.is_match(raw) => TimeField::StageMarker,
            [_] => TimeField::Invalid,
            [mins, secs] => TimeField::Seconds(secs + mins * 60.0),
            [hours, mins, secs] => TimeField::Seconds(secs + mins * 60.0 + hours * 3600.0),
            _ => {
                debug!("Ignoring time value with {} pieces: {:?}", pieces.len(), raw);
                TimeField::Invalid
            }
        }
    }

    pub fn seconds(self) -> f64 {
        match self {
            TimeField::Seconds(secs) => secs,
            TimeField::StageMarker | TimeField::Invalid => f64::NAN,
        }
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let found = INT_PREFIX.find(s)?;
    found.as_str().trim_start().parse().ok()
}

fn parse_time_piece(piece: &str) -> f64 {
    leading_int(piece).map(|v| v as f64).unwrap_or(f64::NAN)
}

fn parse_float(raw: Option<&str>) -> f64 {
    raw.and_then(|s| FLOAT_PREFIX.find(s))
        .and_then(|found| found.as_str().trim_start().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(leading_int)
}

/// Decodes raw rows in order, tracking the current stage as markers go by.
#[derive(Debug, Default)]
pub struct FieldDecoder {
    tracker: StageTracker,
}

impl FieldDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_stage(&self) -> i32 {
        self.tracker.current()
    }

    /// Decode one row. Fields are handled in column order, so a marker's own status
    /// column already sees the advanced stage.
    pub fn decode(&mut self, record: &StringRecord) -> Decoded {
        let field = |column: Column| record.get(column.index());

        let time = TimeField::parse(field(Column::CurrentTime).unwrap_or(""));
        let stage_advanced = time == TimeField::StageMarker;
        if stage_advanced {
            self.tracker.advance();
            debug!("Entering stage {}", self.tracker.current());
        }

        let com = match field(Column::Com) {
            Some(COM_UNUSABLE) | None => None,
            Some(_) => Some(Misc {
                current_stage: self.tracker.current(),
            }),
        };

        let row = DecodedRow {
            current_time: time.seconds(),
            km: parse_float(field(Column::Km)),
            km_per_hour: parse_float(field(Column::KmPerHour)),
            watts: parse_int(field(Column::Watts)),
            heart_rate: parse_int(field(Column::HeartRate)),
            rpm: parse_int(field(Column::Rpm)),
            com,
        };
        trace!("Decoded {:?}", row);

        Decoded {
            row,
            stage_advanced,
        }
    }
}
