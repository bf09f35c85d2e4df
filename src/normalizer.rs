//! Rebasing of elapsed time and distance.

use log::debug;

use crate::error::{Error, Result};
use crate::models::Sample;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Base {
    current_time: f64,
    km: f64,
}

/// Shifts `current_time` and `km` so the first sample of stage `lo` reads zero.
///
/// The base is captured once, from the first sample whose stage equals `lo`. A sample
/// arriving before that point cannot be rebased and yields
/// [`Error::MissingNormalizationBase`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    enabled: bool,
    lo: i32,
    base: Option<Base>,
}

impl Normalizer {
    pub fn new(enabled: bool, lo: i32) -> Self {
        Self {
            enabled,
            lo,
            base: None,
        }
    }

    pub fn apply(&mut self, mut sample: Sample) -> Result<Sample> {
        if !self.enabled {
            return Ok(sample);
        }

        if self.base.is_none() && sample.stage() == self.lo {
            debug!(
                "Normalizing to t={}s, km={} (stage {})",
                sample.current_time, sample.km, self.lo
            );
            self.base = Some(Base {
                current_time: sample.current_time,
                km: sample.km,
            });
        }

        let base = self.base.ok_or(Error::MissingNormalizationBase {
            stage: sample.stage(),
            lo: self.lo,
        })?;

        sample.current_time -= base.current_time;
        sample.km -= base.km;
        Ok(sample)
    }
}
