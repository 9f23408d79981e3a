//! Batch results log and improvement statistics.
//!
//! # Results log
//!
//! Space-delimited text, one run per row:
//!
//! ```text
//! dispatching_time tabu_time
//! 1:35:00 1:20:00
//! ```
//!
//! After [`summarize`] the log is rewritten with a third column holding the
//! improvement in whole minutes, under the header
//! `dispatch_time tabu_time diff_mins`.
//!
//! # Statistics
//!
//! ```text
//! Number of examples: 100
//! Number of improvements: 37
//! Improvement Percentage: 0.37
//! Improvement Average: 12.5
//! ```
//!
//! An improvement is any run whose diff is non-zero; the average is taken
//! over improved runs only and is 0 when none improved.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::timing::{format_span, parse_span, MINUTE_MS};

const RAW_HEADER: [&str; 2] = ["dispatching_time", "tabu_time"];
const SUMMARY_HEADER: [&str; 3] = ["dispatch_time", "tabu_time", "diff_mins"];

/// Max flow time of one run before and after tabu search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    /// List-scheduler max flow time (ms).
    pub dispatch_ms: i64,
    /// Tabu search max flow time (ms).
    pub tabu_ms: i64,
}

impl RunRecord {
    /// Creates a record.
    pub fn new(dispatch_ms: i64, tabu_ms: i64) -> Self {
        Self { dispatch_ms, tabu_ms }
    }

    /// Improvement in whole minutes (truncated).
    pub fn diff_mins(&self) -> i64 {
        (self.dispatch_ms - self.tabu_ms) / MINUTE_MS
    }
}

/// Append-only results log.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    /// Truncates `path` and writes the header.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut writer = writer(File::create(&path)?);
        writer.write_record(RAW_HEADER)?;
        writer.flush()?;
        Ok(Self { path })
    }

    /// Opens an existing log, or creates it when missing.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            Ok(Self { path })
        } else {
            Self::create(path)
        }
    }

    /// Log location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one run.
    pub fn append(&self, record: RunRecord) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = writer(file);
        writer.write_record([format_span(record.dispatch_ms), format_span(record.tabu_ms)])?;
        writer.flush()?;
        Ok(())
    }

    /// Reads every run. Accepts both the raw and the summarized layout.
    pub fn read(&self) -> Result<Vec<RunRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            let row_no = i + 1;
            let span = |idx: usize, name: &str| {
                let text = row.get(idx).ok_or_else(|| Error::InvalidResults {
                    row: row_no,
                    reason: format!("missing {name}"),
                })?;
                parse_span(text).ok_or_else(|| Error::InvalidResults {
                    row: row_no,
                    reason: format!("{name} '{text}' is not H:MM:SS"),
                })
            };
            records.push(RunRecord::new(span(0, "dispatch time")?, span(1, "tabu time")?));
        }
        Ok(records)
    }

    /// Rewrites the log with the improvement column.
    pub fn rewrite_with_diffs(&self, records: &[RunRecord]) -> Result<()> {
        let mut writer = writer(File::create(&self.path)?);
        writer.write_record(SUMMARY_HEADER)?;
        for record in records {
            writer.write_record([
                format_span(record.dispatch_ms),
                format_span(record.tabu_ms),
                record.diff_mins().to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(file)
}

/// Aggregate improvement statistics over a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStatistics {
    /// Number of runs.
    pub examples: usize,
    /// Runs whose diff is non-zero.
    pub improvements: usize,
    /// `improvements / examples` (0 when there are no runs).
    pub improvement_rate: f64,
    /// Mean diff over improved runs, in minutes (0 when none improved).
    pub improvement_average_mins: f64,
}

impl RunStatistics {
    /// Computes statistics from run records.
    pub fn from_records(records: &[RunRecord]) -> Self {
        let improved: Vec<i64> = records
            .iter()
            .map(RunRecord::diff_mins)
            .filter(|&d| d != 0)
            .collect();

        let examples = records.len();
        let improvements = improved.len();
        let improvement_rate = if examples == 0 {
            0.0
        } else {
            improvements as f64 / examples as f64
        };
        let improvement_average_mins = if improvements == 0 {
            0.0
        } else {
            improved.iter().sum::<i64>() as f64 / improvements as f64
        };

        Self {
            examples,
            improvements,
            improvement_rate,
            improvement_average_mins,
        }
    }

    /// Writes the statistics file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of examples: {}", self.examples)?;
        writeln!(f, "Number of improvements: {}", self.improvements)?;
        writeln!(f, "Improvement Percentage: {}", self.improvement_rate)?;
        writeln!(f, "Improvement Average: {}", self.improvement_average_mins)
    }
}

/// Rewrites `log_path` with improvement diffs and writes statistics to `dest`.
pub fn summarize(log_path: impl Into<PathBuf>, dest: impl AsRef<Path>) -> Result<RunStatistics> {
    let log = ResultsLog { path: log_path.into() };
    let records = log.read()?;
    log.rewrite_with_diffs(&records)?;

    let stats = RunStatistics::from_records(&records);
    stats.write_to(dest.as_ref())?;
    info!(
        examples = stats.examples,
        improvements = stats.improvements,
        rate = stats.improvement_rate,
        average_mins = stats.improvement_average_mins,
        "results summarized"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mins(m: i64) -> i64 {
        m * MINUTE_MS
    }

    #[test]
    fn test_diff_mins_truncates() {
        let r = RunRecord::new(mins(95) + 59_000, mins(80));
        assert_eq!(r.diff_mins(), 15);
        assert_eq!(RunRecord::new(mins(10), mins(10)).diff_mins(), 0);
    }

    #[test]
    fn test_statistics() {
        let records = [
            RunRecord::new(mins(90), mins(80)),
            RunRecord::new(mins(60), mins(60)),
            RunRecord::new(mins(70), mins(50)),
            RunRecord::new(mins(40), mins(40)),
        ];
        let stats = RunStatistics::from_records(&records);
        assert_eq!(stats.examples, 4);
        assert_eq!(stats.improvements, 2);
        assert!((stats.improvement_rate - 0.5).abs() < 1e-12);
        assert!((stats.improvement_average_mins - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_without_improvements() {
        let stats = RunStatistics::from_records(&[RunRecord::new(mins(5), mins(5))]);
        assert_eq!(stats.improvements, 0);
        assert_eq!(stats.improvement_average_mins, 0.0);

        let empty = RunStatistics::from_records(&[]);
        assert_eq!(empty.examples, 0);
        assert_eq!(empty.improvement_rate, 0.0);
    }

    #[test]
    fn test_statistics_text() {
        let stats = RunStatistics::from_records(&[
            RunRecord::new(mins(30), mins(20)),
            RunRecord::new(mins(30), mins(30)),
        ]);
        assert_eq!(
            stats.to_string(),
            "Number of examples: 2\n\
             Number of improvements: 1\n\
             Improvement Percentage: 0.5\n\
             Improvement Average: 10\n"
        );
    }

    #[test]
    fn test_log_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results_list.csv");
        let log = ResultsLog::create(&path).unwrap();
        log.append(RunRecord::new(mins(95), mins(80))).unwrap();
        log.append(RunRecord::new(mins(30), mins(30))).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "dispatching_time tabu_time\n1:35:00 1:20:00\n0:30:00 0:30:00\n");

        let records = log.read().unwrap();
        assert_eq!(records, [RunRecord::new(mins(95), mins(80)), RunRecord::new(mins(30), mins(30))]);
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        ResultsLog::create(&path)
            .unwrap()
            .append(RunRecord::new(mins(1), mins(1)))
            .unwrap();
        let log = ResultsLog::create(&path).unwrap();
        assert!(log.read().unwrap().is_empty());
    }

    #[test]
    fn test_open_or_create_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        ResultsLog::open_or_create(&path)
            .unwrap()
            .append(RunRecord::new(mins(2), mins(1)))
            .unwrap();
        let log = ResultsLog::open_or_create(&path).unwrap();
        assert_eq!(log.read().unwrap().len(), 1);
    }

    #[test]
    fn test_summarize_rewrites_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("results_list.csv");
        let stats_path = dir.path().join("results_stats.txt");
        fs::write(
            &log_path,
            "dispatching_time tabu_time\n1:35:00 1:20:00\n0:45:00 0:45:00\n",
        )
        .unwrap();

        let stats = summarize(&log_path, &stats_path).unwrap();
        assert_eq!(stats.examples, 2);
        assert_eq!(stats.improvements, 1);

        let log = fs::read_to_string(&log_path).unwrap();
        assert_eq!(
            log,
            "dispatch_time tabu_time diff_mins\n1:35:00 1:20:00 15\n0:45:00 0:45:00 0\n"
        );
        let text = fs::read_to_string(&stats_path).unwrap();
        assert!(text.starts_with("Number of examples: 2\n"));

        // A summarized log can be summarized again.
        let again = summarize(&log_path, &stats_path).unwrap();
        assert_eq!(again, stats);
    }

    #[test]
    fn test_malformed_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "dispatching_time tabu_time\n1:00:00 soon\n").unwrap();
        let err = ResultsLog::open_or_create(&path).unwrap().read().unwrap_err();
        assert!(matches!(err, Error::InvalidResults { row: 1, .. }));
    }
}
