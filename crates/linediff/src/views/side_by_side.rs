//! Side-by-side diff pane

use super::{kind_style, render_empty_state};
use crate::app::App;
use crate::render::{expand_tabs, fit};
use linediff_core::LineRecord;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render_side_by_side(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title(" Diff ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.set_page_height(inner.height as usize);

    let rows = app.diff.rows();
    if rows.is_empty() {
        render_empty_state(frame, inner, &app.theme);
        return;
    }

    let [left_area, divider_area, right_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let height = inner.height as usize;
    let mut left_lines = Vec::with_capacity(height);
    let mut right_lines = Vec::with_capacity(height);
    for row in rows.iter().skip(app.scroll).take(height) {
        left_lines.push(side_line(row.left, left_area.width, app));
        right_lines.push(side_line(row.right, right_area.width, app));
    }
    let gutter_style = Style::default().fg(app.theme.gutter_fg);
    let divider: Vec<Line> = (0..left_lines.len())
        .map(|_| Line::styled("│", gutter_style))
        .collect();

    frame.render_widget(Paragraph::new(left_lines), left_area);
    frame.render_widget(Paragraph::new(divider), divider_area);
    frame.render_widget(Paragraph::new(right_lines), right_area);

    if rows.len() > height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(rows.len().saturating_sub(height))
            .position(app.scroll);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// One cell: gutter, marker and content padded to the cell width so the
/// background covers it
fn side_line(record: Option<&LineRecord>, width: u16, app: &App) -> Line<'static> {
    let Some(record) = record else {
        return Line::default();
    };

    let gutter = if app.line_numbers {
        format!("{:>4} ", record.line_number)
    } else {
        String::new()
    };
    let text_width = (width as usize).saturating_sub(gutter.width() + 2);
    let content = fit(&expand_tabs(&record.content, app.tab_width), text_width);

    Line::from(vec![
        Span::styled(gutter, Style::default().fg(app.theme.gutter_fg)),
        Span::styled(
            format!("{} {}", record.kind.marker(), content),
            kind_style(record.kind, &app.theme),
        ),
    ])
}
