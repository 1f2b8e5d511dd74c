use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Paragraph::new(status_line(app)), area);
}

fn status_line(app: &App) -> Line<'static> {
    let stats = app.diff.stats;
    let theme = &app.theme;
    let muted = Style::default().fg(theme.gutter_fg);
    let toggle = |on: bool| {
        if on {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            muted
        }
    };
    let options = app.settings.options;

    Line::from(vec![
        Span::raw(format!(" total {} ", stats.total)),
        Span::styled(format!("+{} ", stats.added), Style::default().fg(theme.added_fg)),
        Span::styled(
            format!("-{} ", stats.removed),
            Style::default().fg(theme.removed_fg),
        ),
        Span::styled(format!("={}", stats.unchanged), muted),
        Span::styled(" │ ", muted),
        Span::styled(
            format!("F2 case:{}", on_off(options.ignore_case)),
            toggle(options.ignore_case),
        ),
        Span::raw("  "),
        Span::styled(
            format!("F3 space:{}", on_off(options.ignore_whitespace)),
            toggle(options.ignore_whitespace),
        ),
        Span::raw("  "),
        Span::raw(format!("F4 {}", app.settings.algorithm)),
        Span::styled(" │ Tab switch  ^S swap  ^L clear  Esc quit", muted),
    ])
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ignore"
    } else {
        "exact"
    }
}
