//! Display layouts derived from a diff result

use crate::diff::DiffResult;
use crate::line::{LineKind, LineRecord};
use serde::Serialize;
use tracing::warn;

/// One display row of a side-by-side view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffRow<'a> {
    pub left: Option<&'a LineRecord>,
    pub right: Option<&'a LineRecord>,
}

impl DiffRow<'_> {
    pub fn is_change(&self) -> bool {
        self.left.is_some_and(LineRecord::is_change)
            || self.right.is_some_and(LineRecord::is_change)
    }
}

/// Changed runs on each side followed by the unchanged pair that ends them
struct Block<'a> {
    removed: &'a [LineRecord],
    added: &'a [LineRecord],
    anchor: Option<(&'a LineRecord, &'a LineRecord)>,
}

impl DiffResult {
    fn blocks(&self) -> Vec<Block<'_>> {
        let left = &self.left_lines;
        let right = &self.right_lines;
        let (mut li, mut ri) = (0usize, 0usize);
        let mut blocks = Vec::new();

        while li < left.len() || ri < right.len() {
            let l_start = li;
            while li < left.len() && left[li].kind != LineKind::Unchanged {
                li += 1;
            }
            let r_start = ri;
            while ri < right.len() && right[ri].kind != LineKind::Unchanged {
                ri += 1;
            }

            let removed = &left[l_start..li];
            let added = &right[r_start..ri];
            let anchor = match (left.get(li), right.get(ri)) {
                (Some(l), Some(r)) => {
                    li += 1;
                    ri += 1;
                    Some((l, r))
                }
                _ => None,
            };

            if anchor.is_none() && removed.is_empty() && added.is_empty() {
                warn!(li, ri, "unchanged line without a counterpart, truncating rows");
                break;
            }

            blocks.push(Block {
                removed,
                added,
                anchor,
            });
        }

        blocks
    }

    /// Pair lines for side-by-side display.
    ///
    /// Unchanged lines share a row. Between them, removed and added lines are
    /// paired in order and the longer run is padded with empty cells.
    pub fn rows(&self) -> Vec<DiffRow<'_>> {
        let mut rows = Vec::new();
        for block in self.blocks() {
            let height = block.removed.len().max(block.added.len());
            for k in 0..height {
                rows.push(DiffRow {
                    left: block.removed.get(k),
                    right: block.added.get(k),
                });
            }
            if let Some((l, r)) = block.anchor {
                rows.push(DiffRow {
                    left: Some(l),
                    right: Some(r),
                });
            }
        }
        rows
    }

    /// Interleave both sides into one listing: removals, then additions,
    /// then the unchanged line (left copy).
    pub fn unified(&self) -> Vec<&LineRecord> {
        let mut lines = Vec::new();
        for block in self.blocks() {
            lines.extend(block.removed);
            lines.extend(block.added);
            if let Some((l, _)) = block.anchor {
                lines.push(l);
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use crate::diff::{compute_diff, DiffOptions};
    use crate::line::LineKind;
    use pretty_assertions::assert_eq;

    fn contents<'a>(row: &super::DiffRow<'a>) -> (Option<&'a str>, Option<&'a str>) {
        (
            row.left.map(|l| l.content.as_str()),
            row.right.map(|r| r.content.as_str()),
        )
    }

    #[test]
    fn test_rows_for_middle_insertion() {
        let result = compute_diff("a\nb\nc", "a\nX\nb\nc", DiffOptions::default());
        let rows: Vec<_> = result.rows().iter().map(contents).collect();
        assert_eq!(
            rows,
            vec![
                (Some("a"), Some("a")),
                (None, Some("X")),
                (Some("b"), Some("b")),
                (Some("c"), Some("c")),
            ]
        );
    }

    #[test]
    fn test_rows_pad_longer_run() {
        let result = compute_diff("a\nb\nc\nz", "x\nz", DiffOptions::default());
        let rows = result.rows();
        let pairs: Vec<_> = rows.iter().map(contents).collect();
        assert_eq!(
            pairs,
            vec![
                (Some("a"), Some("x")),
                (Some("b"), None),
                (Some("c"), None),
                (Some("z"), Some("z")),
            ]
        );
        assert_eq!(rows.iter().filter(|r| r.is_change()).count(), 3);
    }

    #[test]
    fn test_rows_cover_every_record() {
        let result = compute_diff("q\nw\ne\nr", "w\nq\nr\nt\ny", DiffOptions::default());
        let rows = result.rows();
        assert_eq!(
            rows.iter().filter(|r| r.left.is_some()).count(),
            result.left_lines.len()
        );
        assert_eq!(
            rows.iter().filter(|r| r.right.is_some()).count(),
            result.right_lines.len()
        );
    }

    #[test]
    fn test_unified_orders_removals_first() {
        let result = compute_diff("a\nb\nc\nz", "x\nz", DiffOptions::default());
        let listing: Vec<_> = result
            .unified()
            .iter()
            .map(|l| (l.kind.marker(), l.content.as_str()))
            .collect();
        assert_eq!(
            listing,
            vec![('-', "a"), ('-', "b"), ('-', "c"), ('+', "x"), (' ', "z")]
        );
    }

    #[test]
    fn test_empty_result_has_no_rows() {
        let result = compute_diff("", "", DiffOptions::default());
        assert!(result.rows().is_empty());
        assert!(result.unified().is_empty());
    }

    #[test]
    fn test_unified_keeps_unchanged_once() {
        let result = compute_diff("a\nb", "a\nb", DiffOptions::default());
        let unified = result.unified();
        assert_eq!(unified.len(), 2);
        assert!(unified.iter().all(|l| l.kind == LineKind::Unchanged));
    }
}
