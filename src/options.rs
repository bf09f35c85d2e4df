//! Parse options and stage range validation.

use serde::Deserialize;

use crate::error::{Error, Result};

/// The stage selection a caller asked for, before validation.
///
/// Deserializes from either a bare integer or a list, so `{"stages": 2}` and
/// `{"stages": [2, 5]}` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Stages {
    Single(i32),
    List(Vec<i32>),
}

impl From<i32> for Stages {
    fn from(stage: i32) -> Self {
        Stages::Single(stage)
    }
}

impl From<Vec<i32>> for Stages {
    fn from(stages: Vec<i32>) -> Self {
        Stages::List(stages)
    }
}

impl<const N: usize> From<[i32; N]> for Stages {
    fn from(stages: [i32; N]) -> Self {
        Stages::List(stages.to_vec())
    }
}

impl Stages {
    /// Resolve into an inclusive range.
    ///
    /// Lists must hold one or two entries. The bounds themselves are not checked: an
    /// inverted or non-positive range just matches nothing.
    pub fn to_range(&self) -> Result<StageRange> {
        match self {
            Stages::Single(stage) => Ok(StageRange::single(*stage)),
            Stages::List(list) => match list.as_slice() {
                [stage] => Ok(StageRange::single(*stage)),
                [lo, hi] => Ok(StageRange {
                    lo: *lo,
                    hi: Some(*hi),
                }),
                _ => Err(Error::invalid_argument(format!(
                    "Expected an array of 1 or 2 numbers, got an array of length {}",
                    list.len()
                ))),
            },
        }
    }
}

/// Inclusive stage interval. `hi == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRange {
    pub lo: i32,
    pub hi: Option<i32>,
}

impl StageRange {
    pub fn single(stage: i32) -> Self {
        Self {
            lo: stage,
            hi: Some(stage),
        }
    }

    pub fn contains(&self, stage: i32) -> bool {
        stage >= self.lo && self.hi.map_or(true, |hi| stage <= hi)
    }
}

impl Default for StageRange {
    /// Every stage from 1 upward.
    fn default() -> Self {
        Self { lo: 1, hi: None }
    }
}

/// Options for a single parse.
///
/// # Examples
///
/// ```no_run
/// use stages_parser::ParseOptions;
///
/// let options = ParseOptions::new().stages([2, 5]).normalize(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Stages to keep. `None` keeps every stage.
    pub stages: Option<Stages>,
    /// Rebase time and distance to the first row of the lowest selected stage.
    pub normalize: bool,
}

impl ParseOptions {
    /// Create options with the defaults: all stages, no normalization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to a stage or inclusive stage range.
    pub fn stages(mut self, stages: impl Into<Stages>) -> Self {
        self.stages = Some(stages.into());
        self
    }

    /// Enable or disable normalization.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Validate the stage selection.
    pub fn stage_range(&self) -> Result<StageRange> {
        match &self.stages {
            Some(stages) => stages.to_range(),
            None => Ok(StageRange::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_unbounded() {
        let range = ParseOptions::new().stage_range().unwrap();
        assert_eq!(range, StageRange { lo: 1, hi: None });
        assert!(range.contains(1));
        assert!(range.contains(10_000));
        assert!(!range.contains(0));
    }

    #[test]
    fn test_single_stage_forms() {
        let expected = StageRange::single(2);
        assert_eq!(ParseOptions::new().stages(2).stage_range().unwrap(), expected);
        assert_eq!(ParseOptions::new().stages([2]).stage_range().unwrap(), expected);
    }

    #[test]
    fn test_two_element_range() {
        let range = ParseOptions::new().stages([2, 5]).stage_range().unwrap();
        assert_eq!(range, StageRange { lo: 2, hi: Some(5) });
        assert!(range.contains(2));
        assert!(range.contains(5));
        assert!(!range.contains(6));
    }

    #[test]
    fn test_wrong_list_lengths_are_rejected() {
        for stages in [vec![], vec![2, 3, 4]] {
            let err = ParseOptions::new().stages(stages).stage_range().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = ParseOptions::new().stages([5, 2]).stage_range().unwrap();
        assert!((0..10).all(|stage| !range.contains(stage)));
    }

    #[test]
    fn test_deserialize_options() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"stages": [2, 5], "normalize": true}"#).unwrap();
        assert_eq!(options, ParseOptions::new().stages([2, 5]).normalize(true));

        let options: ParseOptions = serde_json::from_str(r#"{"stages": 3}"#).unwrap();
        assert_eq!(options.stages, Some(Stages::Single(3)));
        assert!(!options.normalize);

        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
    }
}
