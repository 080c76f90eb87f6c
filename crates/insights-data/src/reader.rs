//! Issue file discovery and loading.
//!
//! Reads exported GitHub issues from a `.json` array file, a `.jsonl` file
//! with one issue per line, or a directory tree containing either, and
//! converts them into [`Issue`] structs for the aggregators.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use insights_core::error::{InsightsError, Result};
use insights_core::models::Issue;
use serde_json::Value;
use tracing::{debug, info, warn};

// ── IssueSource ───────────────────────────────────────────────────────────────

/// Anything that can produce the issue collection for one analysis run.
pub trait IssueSource {
    /// Return every issue. Fails with [`InsightsError::DataUnavailable`] when
    /// the underlying data is missing or malformed.
    fn get_issues(&self) -> Result<Vec<Issue>>;
}

impl IssueSource for Vec<Issue> {
    fn get_issues(&self) -> Result<Vec<Issue>> {
        Ok(self.clone())
    }
}

// ── JsonIssueLoader ───────────────────────────────────────────────────────────

/// Loads issues from JSON / JSONL files on disk.
#[derive(Debug, Clone)]
pub struct JsonIssueLoader {
    path: PathBuf,
}

impl JsonIssueLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IssueSource for JsonIssueLoader {
    fn get_issues(&self) -> Result<Vec<Issue>> {
        if !self.path.exists() {
            return Err(InsightsError::data_unavailable(
                &self.path,
                "path does not exist",
            ));
        }

        let files = if self.path.is_dir() {
            let files = find_issue_files(&self.path);
            if files.is_empty() {
                return Err(InsightsError::data_unavailable(
                    &self.path,
                    "no .json or .jsonl files found",
                ));
            }
            files
        } else {
            vec![self.path.clone()]
        };

        let mut issues = Vec::new();
        for file in &files {
            issues.extend(load_issue_file(file)?);
        }

        info!("Loaded {} issues from {} file(s)", issues.len(), files.len());
        Ok(issues)
    }
}

// ── Public helpers ────────────────────────────────────────────────────────────

/// Find all `.json` and `.jsonl` files recursively under `dir`, sorted by path.
pub fn find_issue_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_issue_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load one file. `.jsonl` files are read line by line; anything else must
/// hold a top-level JSON array of issues.
pub fn load_issue_file(path: &Path) -> Result<Vec<Issue>> {
    let values = if has_extension(path, "jsonl") {
        read_jsonl_values(path)?
    } else {
        read_json_array(path)?
    };

    let total = values.len();
    let issues: Vec<Issue> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| decode_issue(path, idx, value))
        .collect();

    debug!(
        "File {}: {} records, {} decoded, {} skipped",
        path.display(),
        total,
        issues.len(),
        total - issues.len()
    );

    Ok(issues)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn is_issue_file(path: &Path) -> bool {
    has_extension(path, "json") || has_extension(path, "jsonl")
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().map(|e| e == ext).unwrap_or(false)
}

fn read_json_array(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path).map_err(|source| InsightsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_str(&content)
        .map_err(|e| InsightsError::data_unavailable(path, format!("invalid JSON: {}", e)))?;

    match document {
        Value::Array(items) => Ok(items),
        _ => Err(InsightsError::data_unavailable(
            path,
            "expected a top-level array of issues",
        )),
    }
}

fn read_jsonl_values(path: &Path) -> Result<Vec<Value>> {
    let file = std::fs::File::open(path).map_err(|source| InsightsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = std::io::BufReader::new(file);
    let mut values = Vec::new();

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|source| InsightsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str(trimmed) {
            Ok(value) => values.push(value),
            Err(e) => warn!(
                "Skipping unparseable line {} in {}: {}",
                line_no + 1,
                path.display(),
                e
            ),
        }
    }

    Ok(values)
}

/// Decode one issue record; a record of the wrong shape is logged and skipped.
fn decode_issue(path: &Path, idx: usize, value: Value) -> Option<Issue> {
    match serde_json::from_value::<Issue>(value) {
        Ok(issue) => Some(issue),
        Err(e) => {
            warn!(
                "Skipping malformed issue #{} in {}: {}",
                idx,
                path.display(),
                e
            );
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
