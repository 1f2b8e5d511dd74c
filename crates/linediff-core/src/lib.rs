//! Linediff Core - line-oriented text comparison
//!
//! This library splits two texts into lines, aligns them and classifies
//! every line as added, removed or unchanged. The default alignment is a
//! greedy nearest-match heuristic; a minimal (Myers) alignment is available
//! as an alternative.

pub mod diff;
pub mod line;
pub mod rows;
pub mod store;

pub use diff::{
    compute_diff, normalize_line, split_lines, Algorithm, DiffEngine, DiffError, DiffOptions,
    DiffResult, DiffStats, FileDiff,
};
pub use line::{LineKind, LineRecord};
pub use rows::DiffRow;
pub use store::{DiffSettings, KeyValueStore, MemoryStore, Preferences, StoreError};
