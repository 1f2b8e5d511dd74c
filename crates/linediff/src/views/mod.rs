//! View rendering modules

mod side_by_side;
mod status_bar;

use crate::app::App;
use crate::config::Theme;
use linediff_core::LineKind;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub use side_by_side::render_side_by_side;
pub use status_bar::render_status_bar;

/// Draw the whole screen: editors on top, diff below, status at the bottom
pub fn render(frame: &mut Frame, app: &mut App) {
    let [editors, diff, status] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(editors);

    frame.render_widget(&app.left, left);
    frame.render_widget(&app.right, right);
    render_side_by_side(frame, diff, app);
    render_status_bar(frame, status, app);
}

/// Style for a line of the given kind
pub(crate) fn kind_style(kind: LineKind, theme: &Theme) -> Style {
    match kind {
        LineKind::Added => Style::default().fg(theme.added_fg).bg(theme.added_bg),
        LineKind::Removed => Style::default().fg(theme.removed_fg).bg(theme.removed_bg),
        LineKind::Unchanged => Style::default().fg(theme.context_fg),
    }
}

pub(crate) fn render_empty_state(frame: &mut Frame, area: Rect, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let hint = Paragraph::new("Type or paste text into both editors")
        .style(
            Style::default()
                .fg(theme.gutter_fg)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center);
    frame.render_widget(hint, middle);
}
