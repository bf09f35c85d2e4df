use serde::{Deserialize, Deserializer, Serialize};

/// Column roles of a Stages log row, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CurrentTime,
    Km,
    KmPerHour,
    Watts,
    HeartRate,
    Rpm,
    Com,
}

impl Column {
    /// Position of this column within a raw row.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-row data that isn't telemetry. Currently just the stage the row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Misc {
    pub current_stage: i32,
}

/// A row after field coercion, before filtering.
///
/// `com` is `None` when the device flagged the row's communication status as unusable
/// (or the status column was missing).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    pub current_time: f64,
    pub km: f64,
    pub km_per_hour: f64,
    pub watts: Option<i64>,
    pub heart_rate: Option<i64>,
    pub rpm: Option<i64>,
    pub com: Option<Misc>,
}

/// One workout sample as emitted to callers.
///
/// Integer columns are `None` when the device wrote something that isn't a number.
/// NaN float columns serialize as `null` and read back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(deserialize_with = "nan_from_null")]
    pub current_time: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub km: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub km_per_hour: f64,
    pub watts: Option<i64>,
    pub heart_rate: Option<i64>,
    pub rpm: Option<i64>,
    pub misc: Misc,
}

impl Sample {
    pub fn stage(&self) -> i32 {
        self.misc.current_stage
    }
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
