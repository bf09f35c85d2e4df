mod common;

use common::fixture_path;
use stages_parser::{parse_file, Error, Misc, ParseOptions, Sample};

fn collect(options: ParseOptions) -> Vec<Sample> {
    parse_file(fixture_path(), options)
        .collect::<Result<_, _>>()
        .unwrap()
}

fn stages(samples: &[Sample]) -> Vec<i32> {
    let mut seen: Vec<i32> = Vec::new();
    for sample in samples {
        if seen.last() != Some(&sample.stage()) {
            seen.push(sample.stage());
        }
    }
    seen
}

// ============================================================================
// FIXTURE TESTS
// ============================================================================

#[test]
fn test_invalid_path_fails_on_first_pull() {
    let mut samples = parse_file("some-fake-file.csv", ParseOptions::new());
    assert!(matches!(samples.next(), Some(Err(Error::FileRead { .. }))));
}

#[test]
fn test_first_sample_skips_leading_invalid_lines() {
    let first = parse_file(fixture_path(), ParseOptions::new())
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(
        first,
        Sample {
            current_time: 13.0,
            km: 0.0,
            km_per_hour: 0.0,
            watts: Some(0),
            heart_rate: Some(0),
            rpm: Some(59),
            misc: Misc { current_stage: 1 },
        }
    );
}

#[test]
fn test_last_sample_reaches_final_stage() {
    // 42:08,21.39,11.24,15,0,39,
    let last = collect(ParseOptions::new()).pop().unwrap();

    assert_eq!(
        last,
        Sample {
            current_time: 2528.0,
            km: 21.39,
            km_per_hour: 11.24,
            watts: Some(15),
            heart_rate: Some(0),
            rpm: Some(39),
            misc: Misc { current_stage: 5 },
        }
    );
}

#[test]
fn test_stages_increase_without_gaps() {
    let samples = collect(ParseOptions::new());
    assert_eq!(stages(&samples), [1, 2, 3, 4, 5]);
    assert!(samples.iter().all(|s| s.stage() >= 1));
}

#[test]
fn test_failed_status_rows_never_emitted() {
    // 13:30 is written with status `x` in the fixture
    let samples = collect(ParseOptions::new());
    assert!(samples.iter().all(|s| s.current_time != 810.0));
    assert!(samples.iter().all(|s| !s.current_time.is_nan()));
}

#[test]
fn test_reparse_is_identical() {
    let options = ParseOptions::new().stages([2, 4]).normalize(true);
    assert_eq!(collect(options.clone()), collect(options));
}

// ============================================================================
// OPTIONS TESTS
// ============================================================================

#[test]
fn test_single_stage_as_number_or_list() {
    for options in [ParseOptions::new().stages(2), ParseOptions::new().stages([2])] {
        let samples = collect(options);
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| s.stage() == 2));
    }
}

#[test]
fn test_stage_range_is_inclusive() {
    let samples = collect(ParseOptions::new().stages([2, 5]));
    assert_eq!(stages(&samples), [2, 3, 4, 5]);
}

#[test]
fn test_bad_stage_list_lengths() {
    for stages in [vec![], vec![2, 3, 4]] {
        let mut samples = parse_file(fixture_path(), ParseOptions::new().stages(stages));
        assert!(matches!(samples.next(), Some(Err(Error::InvalidArgument(_)))));
        assert!(samples.next().is_none());
    }
}

#[test]
fn test_stage_range_beyond_log_is_empty() {
    assert!(collect(ParseOptions::new().stages([6, 9])).is_empty());
    assert!(collect(ParseOptions::new().stages([4, 2])).is_empty());
}

#[test]
fn test_normalize_to_first_line_of_stage() {
    let first = parse_file(fixture_path(), ParseOptions::new().stages(3).normalize(true))
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(
        first,
        Sample {
            current_time: 0.0,
            km: 0.0,
            km_per_hour: 25.41,
            watts: Some(84),
            heart_rate: Some(0),
            rpm: Some(74),
            misc: Misc { current_stage: 3 },
        }
    );
}

#[test]
fn test_normalize_offsets_by_constant() {
    let raw = collect(ParseOptions::new().stages([3, 4]));
    let normalized = collect(ParseOptions::new().stages([3, 4]).normalize(true));

    assert_eq!(raw.len(), normalized.len());
    let (t0, km0) = (raw[0].current_time, raw[0].km);
    for (raw, norm) in raw.iter().zip(&normalized) {
        assert_eq!(norm.current_time, raw.current_time - t0);
        assert_eq!(norm.km, raw.km - km0);
        assert_eq!(norm.watts, raw.watts);
        assert_eq!(norm.rpm, raw.rpm);
        assert_eq!(norm.misc, raw.misc);
    }
}
