#![allow(dead_code)]
//! Test utilities for building Stages logs

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path to the checked-in workout fixture
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/workout.csv")
}

/// Builder for creating Stages log test files
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    /// Create an empty log
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a log starting with the export banner and column header the bike writes
    pub fn with_header() -> Self {
        Self::new()
            .raw_line("Stages Indoor Cycling,Workout Export")
            .raw_line("Time,Km,Km/h,Watts,HR,RPM,COM")
    }

    /// Add a `Stage_NN` marker row
    pub fn stage_marker(self, stage: u32) -> Self {
        self.raw_line(&format!("Stage_{:02}", stage))
    }

    /// Add a sample row with a healthy status column
    pub fn sample(self, time: &str, km: f64, kmh: f64, watts: i64, hr: i64, rpm: i64) -> Self {
        self.raw_line(&format!("{},{},{},{},{},{},", time, km, kmh, watts, hr, rpm))
    }

    /// Add a sample row whose status column is `x`
    pub fn failed_sample(self, time: &str, km: f64, kmh: f64, watts: i64, hr: i64, rpm: i64) -> Self {
        self.raw_line(&format!("{},{},{},{},{},{},x", time, km, kmh, watts, hr, rpm))
    }

    /// Add an arbitrary line
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Build the log contents
    pub fn build(self) -> Vec<u8> {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text.into_bytes()
    }

    /// Write the log to `path`
    pub fn write_to(self, path: &Path) {
        File::create(path)
            .unwrap()
            .write_all(&self.build())
            .unwrap();
    }
}
