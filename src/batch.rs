//! Parallel batch extraction over many files.
//!
//! The worker pool is rayon's; per-file failures are captured in the
//! outcome list and never abort the batch. Progress display belongs to the
//! caller (the CLI wires indicatif around [`process_file`]).

use crate::model::Document;
use crate::{parse_path_with_method, ExtractMethod};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of extracting one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Extraction method used, when extraction succeeded.
    pub method: Option<ExtractMethod>,
    /// Parsed document, when extraction succeeded.
    pub document: Option<Document>,
    /// Error description, when extraction failed.
    pub error: Option<String>,
}

impl FileOutcome {
    /// Whether this file produced a document.
    pub fn success(&self) -> bool {
        self.document.is_some()
    }
}

/// Aggregate result of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    /// Success ratio in `0.0..=1.0`.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.total as f64
    }

    /// Paths that failed, with their error descriptions.
    pub fn failures(&self) -> Vec<(&Path, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| {
                o.error
                    .as_deref()
                    .map(|e| (o.path.as_path(), e))
            })
            .collect()
    }

    fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.success()).count();
        Self {
            total,
            succeeded,
            failed: total - succeeded,
            outcomes,
        }
    }
}

/// Extract a single file, capturing any error in the outcome.
pub fn process_file(path: &Path) -> FileOutcome {
    match parse_path_with_method(path) {
        Ok((document, method)) => FileOutcome {
            path: path.to_path_buf(),
            method: Some(method),
            document: Some(document),
            error: None,
        },
        Err(e) => FileOutcome {
            path: path.to_path_buf(),
            method: None,
            document: None,
            error: Some(e.to_string()),
        },
    }
}

/// Extract a list of files on the rayon worker pool.
pub fn process_files(paths: &[PathBuf]) -> BatchSummary {
    let outcomes: Vec<FileOutcome> = paths.par_iter().map(|p| process_file(p)).collect();
    BatchSummary::from_outcomes(outcomes)
}

/// Collect `.hwp`/`.hwpx` files under a directory.
pub fn collect_files(dir: impl AsRef<Path>, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir.as_ref());
    if !recursive {
        walker = walker.max_depth(1);
    }
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some(ext) if ext.eq_ignore_ascii_case("hwp") || ext.eq_ignore_ascii_case("hwpx")
            )
        })
        .collect();
    files.sort();
    files
}

/// Extract every HWP-family file under a directory.
pub fn process_directory(dir: impl AsRef<Path>, recursive: bool) -> BatchSummary {
    process_files(&collect_files(dir, recursive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            FileOutcome {
                path: PathBuf::from("a.hwp"),
                method: Some(ExtractMethod::Hwp5),
                document: Some(Document::new()),
                error: None,
            },
            FileOutcome {
                path: PathBuf::from("b.hwp"),
                method: None,
                document: None,
                error: Some("Unknown file format".to_string()),
            },
        ];
        let summary = BatchSummary::from_outcomes(outcomes);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert!((summary.success_rate() - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.failures().len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let summary = process_files(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate(), 0.0);
    }

    #[test]
    fn test_process_file_captures_errors() {
        let outcome = process_file(Path::new("does-not-exist.hwp"));
        assert!(!outcome.success());
        assert!(outcome.error.is_some());
    }
}
