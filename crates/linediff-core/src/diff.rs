//! Diff computation engine

use crate::line::LineRecord;
use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, DiffOp};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Line alignment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Greedy nearest-match alignment
    #[default]
    Greedy,
    /// Minimal edit script (Myers) over normalized lines
    #[serde(alias = "myers")]
    Lcs,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Lcs => "lcs",
        }
    }

    /// The other algorithm
    pub fn toggled(self) -> Self {
        match self {
            Algorithm::Greedy => Algorithm::Lcs,
            Algorithm::Lcs => Algorithm::Greedy,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Algorithm::Greedy),
            "lcs" | "myers" => Ok(Algorithm::Lcs),
            other => Err(format!("unknown algorithm '{}'", other)),
        }
    }
}

/// Comparison toggles. They only affect equality tests, never displayed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
}

/// Aggregate counts for a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffStats {
    /// Number of alignment steps taken (not a line count)
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Result of a diff operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Removed and unchanged lines of the original side, in order
    pub left_lines: Vec<LineRecord>,
    /// Added and unchanged lines of the modified side, in order
    pub right_lines: Vec<LineRecord>,
    pub stats: DiffStats,
}

impl DiffResult {
    /// Check if any line was added or removed
    pub fn has_changes(&self) -> bool {
        !self.stats.is_identical()
    }
}

/// A diff between two named inputs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    pub left_path: Option<String>,
    pub right_path: Option<String>,
    #[serde(flatten)]
    pub result: DiffResult,
}

/// Split text into lines on `\n`. Empty text has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Whitespace for comparison purposes. A byte order mark counts as blank,
/// NEL (U+0085) does not.
fn is_blank(c: char) -> bool {
    match c {
        '\u{feff}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

/// Normalize a line for equality comparison under `options`
pub fn normalize_line(line: &str, options: DiffOptions) -> Cow<'_, str> {
    let mut normalized = Cow::Borrowed(line);
    if options.ignore_whitespace {
        normalized = Cow::Owned(
            line.split(is_blank)
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    if options.ignore_case {
        normalized = Cow::Owned(normalized.to_lowercase());
    }
    normalized
}

/// Accumulates records and counts while cursors advance
#[derive(Default)]
struct Emitter {
    left_lines: Vec<LineRecord>,
    right_lines: Vec<LineRecord>,
    stats: DiffStats,
}

impl Emitter {
    fn step(&mut self) {
        self.stats.total += 1;
    }

    fn removed(&mut self, left: &[&str], i: usize) {
        self.left_lines.push(LineRecord::removed(left[i], i + 1));
        self.stats.removed += 1;
    }

    fn added(&mut self, right: &[&str], j: usize) {
        self.right_lines.push(LineRecord::added(right[j], j + 1));
        self.stats.added += 1;
    }

    fn unchanged(&mut self, left: &[&str], i: usize, right: &[&str], j: usize) {
        self.left_lines.push(LineRecord::unchanged(left[i], i + 1));
        self.right_lines.push(LineRecord::unchanged(right[j], j + 1));
        self.stats.unchanged += 1;
    }

    fn finish(self) -> DiffResult {
        DiffResult {
            left_lines: self.left_lines,
            right_lines: self.right_lines,
            stats: self.stats,
        }
    }
}

/// The main diff engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    options: DiffOptions,
    algorithm: Algorithm,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_ignore_case(mut self, enabled: bool) -> Self {
        self.options.ignore_case = enabled;
        self
    }

    pub fn with_ignore_whitespace(mut self, enabled: bool) -> Self {
        self.options.ignore_whitespace = enabled;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn options(&self) -> DiffOptions {
        self.options
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Compute diff between two strings
    pub fn diff_strings(&self, left: &str, right: &str) -> DiffResult {
        let left_lines = split_lines(left);
        let right_lines = split_lines(right);
        let left_norm: Vec<Cow<'_, str>> = left_lines
            .iter()
            .map(|line| normalize_line(line, self.options))
            .collect();
        let right_norm: Vec<Cow<'_, str>> = right_lines
            .iter()
            .map(|line| normalize_line(line, self.options))
            .collect();

        let result = match self.algorithm {
            Algorithm::Greedy => greedy_align(&left_lines, &right_lines, &left_norm, &right_norm),
            Algorithm::Lcs => lcs_align(&left_lines, &right_lines, &left_norm, &right_norm),
        };

        debug!(
            algorithm = %self.algorithm,
            left = left_lines.len(),
            right = right_lines.len(),
            total = result.stats.total,
            added = result.stats.added,
            removed = result.stats.removed,
            unchanged = result.stats.unchanged,
            "computed line diff"
        );

        result
    }

    /// Compute diff between two files
    pub fn diff_files(&self, left_path: &Path, right_path: &Path) -> Result<FileDiff, DiffError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| DiffError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        };
        let left = read(left_path)?;
        let right = read(right_path)?;

        Ok(FileDiff {
            left_path: Some(left_path.to_string_lossy().to_string()),
            right_path: Some(right_path.to_string_lossy().to_string()),
            result: self.diff_strings(&left, &right),
        })
    }
}

/// Diff two texts with the greedy algorithm
pub fn compute_diff(left: &str, right: &str, options: DiffOptions) -> DiffResult {
    DiffEngine::new().with_options(options).diff_strings(left, right)
}

/// Greedy sequential alignment.
///
/// On a mismatch, looks for the nearest recurrence of each cursor line in the
/// other side. The side whose counterpart is farther away is taken to hold the
/// extra line. Ties emit an addition.
fn greedy_align(
    left: &[&str],
    right: &[&str],
    left_norm: &[Cow<'_, str>],
    right_norm: &[Cow<'_, str>],
) -> DiffResult {
    let mut out = Emitter::default();
    let (mut i, mut j) = (0usize, 0usize);

    while i < left.len() || j < right.len() {
        out.step();

        // One leftover line per step once a side is exhausted
        if i >= left.len() {
            out.added(right, j);
            j += 1;
        } else if j >= right.len() {
            out.removed(left, i);
            i += 1;
        } else if left_norm[i] == right_norm[j] {
            out.unchanged(left, i, right, j);
            i += 1;
            j += 1;
        } else {
            // Offsets relative to the cursors
            let found_in_right = right_norm[j..].iter().position(|l| *l == left_norm[i]);
            let found_in_left = left_norm[i..].iter().position(|l| *l == right_norm[j]);

            match (found_in_left, found_in_right) {
                (None, None) => {
                    out.removed(left, i);
                    out.added(right, j);
                    i += 1;
                    j += 1;
                }
                (_, None) => {
                    out.removed(left, i);
                    i += 1;
                }
                (Some(in_left), Some(in_right)) if in_left < in_right => {
                    out.removed(left, i);
                    i += 1;
                }
                _ => {
                    out.added(right, j);
                    j += 1;
                }
            }
        }
    }

    out.finish()
}

/// Myers alignment. Each emitted line (or unchanged pair) is one step.
fn lcs_align(
    left: &[&str],
    right: &[&str],
    left_norm: &[Cow<'_, str>],
    right_norm: &[Cow<'_, str>],
) -> DiffResult {
    let mut out = Emitter::default();
    let ops = capture_diff_slices(similar::Algorithm::Myers, left_norm, right_norm);

    for op in ops {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                for k in 0..len {
                    out.step();
                    out.unchanged(left, old_index + k, right, new_index + k);
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                for i in old_index..old_index + old_len {
                    out.step();
                    out.removed(left, i);
                }
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                for j in new_index..new_index + new_len {
                    out.step();
                    out.added(right, j);
                }
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                for i in old_index..old_index + old_len {
                    out.step();
                    out.removed(left, i);
                }
                for j in new_index..new_index + new_len {
                    out.step();
                    out.added(right, j);
                }
            }
        }
    }

    out.finish()
}
