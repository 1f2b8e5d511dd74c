//! Non-interactive output

use crate::config::OutputFormat;
use crossterm::style::{StyledContent, Stylize};
use linediff_core::{Algorithm, DiffOptions, DiffRow, DiffStats, FileDiff, LineKind, LineRecord};
use serde::Serialize;
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " │ ";
const MIN_COLUMN: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    pub format: OutputFormat,
    pub color: bool,
    pub width: usize,
    pub line_numbers: bool,
    pub tab_width: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    options: DiffOptions,
    algorithm: Algorithm,
    #[serde(flatten)]
    diff: &'a FileDiff,
}

/// Print `diff` in the requested format
pub fn print<W: Write>(
    out: &mut W,
    diff: &FileDiff,
    options: DiffOptions,
    algorithm: Algorithm,
    opts: &PrintOptions,
) -> io::Result<()> {
    match opts.format {
        OutputFormat::SideBySide => {
            write_side_by_side(out, &diff.result.rows(), opts)?;
            writeln!(out)?;
            write_stats(out, &diff.result.stats)
        }
        OutputFormat::Unified => {
            write_unified(out, &diff.result.unified(), opts)?;
            writeln!(out)?;
            write_stats(out, &diff.result.stats)
        }
        OutputFormat::Stats => write_stats(out, &diff.result.stats),
        OutputFormat::Json => {
            let report = JsonReport {
                options,
                algorithm,
                diff,
            };
            serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::other)?;
            writeln!(out)
        }
    }
}

pub fn write_stats<W: Write>(out: &mut W, stats: &DiffStats) -> io::Result<()> {
    writeln!(
        out,
        "total: {}, added: {}, removed: {}, unchanged: {}",
        stats.total, stats.added, stats.removed, stats.unchanged
    )
}

pub fn write_unified<W: Write>(
    out: &mut W,
    lines: &[&LineRecord],
    opts: &PrintOptions,
) -> io::Result<()> {
    for record in lines {
        let text = format!(
            "{}{} {}",
            gutter(Some(record), opts.line_numbers),
            record.kind.marker(),
            expand_tabs(&record.content, opts.tab_width)
        );
        writeln!(out, "{}", paint(text, record.kind, opts.color))?;
    }
    Ok(())
}

pub fn write_side_by_side<W: Write>(
    out: &mut W,
    rows: &[DiffRow<'_>],
    opts: &PrintOptions,
) -> io::Result<()> {
    let gutter_width = gutter(None, opts.line_numbers).width() + 2;
    let half = opts.width.saturating_sub(SEPARATOR.width()) / 2;
    let column = half.saturating_sub(gutter_width).max(MIN_COLUMN);

    for row in rows {
        let left = cell(row.left, column, opts);
        let right = cell(row.right, column, opts);
        writeln!(out, "{}{}{}", left, SEPARATOR, right.trim_end())?;
    }
    Ok(())
}

fn cell(record: Option<&LineRecord>, column: usize, opts: &PrintOptions) -> String {
    let Some(record) = record else {
        let blank = " ".repeat(gutter(None, opts.line_numbers).width() + 2 + column);
        return blank;
    };

    let content = fit(&expand_tabs(&record.content, opts.tab_width), column);
    let text = format!(
        "{}{} {}",
        gutter(Some(record), opts.line_numbers),
        record.kind.marker(),
        content
    );
    paint(text, record.kind, opts.color)
}

fn gutter(record: Option<&LineRecord>, line_numbers: bool) -> String {
    if !line_numbers {
        return String::new();
    }
    match record {
        Some(r) => format!("{:>4} ", r.line_number),
        None => " ".repeat(5),
    }
}

fn paint(text: String, kind: LineKind, color: bool) -> String {
    if !color {
        return text;
    }
    let styled: StyledContent<String> = match kind {
        LineKind::Added => text.green(),
        LineKind::Removed => text.red(),
        LineKind::Unchanged => return text,
    };
    styled.to_string()
}

pub fn expand_tabs(text: &str, tab_width: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    for grapheme in text.graphemes(true) {
        if grapheme == "\t" {
            let pad = tab_width - (col % tab_width);
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push_str(grapheme);
            col += grapheme.width();
        }
    }
    out
}

/// Truncate or pad `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    let overflow = text.width() > width;
    let budget = if overflow { width.saturating_sub(1) } else { width };

    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    if overflow && width > 0 {
        out.push('…');
        used += 1;
    }
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linediff_core::compute_diff;
    use pretty_assertions::assert_eq;

    fn plain(format: OutputFormat) -> PrintOptions {
        PrintOptions {
            format,
            color: false,
            width: 40,
            line_numbers: true,
            tab_width: 4,
        }
    }

    fn file_diff(left: &str, right: &str) -> FileDiff {
        FileDiff {
            left_path: Some("old.txt".into()),
            right_path: Some("new.txt".into()),
            result: compute_diff(left, right, DiffOptions::default()),
        }
    }

    fn render(diff: &FileDiff, opts: &PrintOptions) -> String {
        let mut buf = Vec::new();
        print(&mut buf, diff, DiffOptions::default(), Algorithm::Greedy, opts).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_side_by_side_layout() {
        let diff = file_diff("a\nb\nc", "a\nX\nb\nc");
        let text = render(&diff, &plain(OutputFormat::SideBySide));
        let lines: Vec<&str> = text.lines().collect();

        // 40 cols: (40 - 3) / 2 = 18, minus 7 gutter = 11 content
        assert_eq!(lines[0], "   1   a           │    1   a");
        assert_eq!(lines[1], "                   │    2 + X");
        assert_eq!(lines[2], "   2   b           │    3   b");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "total: 4, added: 1, removed: 0, unchanged: 3");
    }

    #[test]
    fn test_side_by_side_truncates_long_lines() {
        let diff = file_diff("a very long line that does not fit", "short");
        let text = render(&diff, &plain(OutputFormat::SideBySide));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("   1 - a very lon…"));
        assert!(first.ends_with("   1 + short"));
    }

    #[test]
    fn test_unified_output() {
        let diff = file_diff("cat\nsame", "dog\nsame");
        let mut opts = plain(OutputFormat::Unified);
        opts.line_numbers = false;
        let text = render(&diff, &opts);
        assert_eq!(
            text,
            "- cat\n+ dog\n  same\n\ntotal: 2, added: 1, removed: 1, unchanged: 1\n"
        );
    }

    #[test]
    fn test_stats_only() {
        let diff = file_diff("", "");
        let text = render(&diff, &plain(OutputFormat::Stats));
        assert_eq!(text, "total: 0, added: 0, removed: 0, unchanged: 0\n");
    }

    #[test]
    fn test_json_report() {
        let diff = file_diff("Hello", "hello");
        let text = render(&diff, &plain(OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["leftPath"], "old.txt");
        assert_eq!(value["algorithm"], "greedy");
        assert_eq!(value["options"]["ignoreCase"], false);
        assert_eq!(value["leftLines"][0]["kind"], "removed");
        assert_eq!(value["rightLines"][0]["content"], "hello");
        assert_eq!(value["stats"]["total"], 1);
    }

    #[test]
    fn test_color_leaves_unchanged_lines_plain() {
        let diff = file_diff("cat\nsame", "dog\nsame");
        let mut opts = plain(OutputFormat::Unified);
        opts.color = true;
        let text = render(&diff, &opts);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("   1 - cat"));
        assert_eq!(lines[2], "   2   same");
    }

    #[test]
    fn test_fit_and_tabs() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("日本語", 4), "日… ");
        assert_eq!(expand_tabs("a\tb", 4), "a   b");
        assert_eq!(expand_tabs("\t", 2), "  ");
        assert_eq!(expand_tabs("a\tb", 0), "a b");
    }
}
