//! Interactive comparison state

use crate::config::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use linediff_core::{DiffResult, DiffSettings};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tracing::trace;
use tui_textarea::TextArea;

/// Which editor receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Left,
    Right,
}

pub struct App {
    pub left: TextArea<'static>,
    pub right: TextArea<'static>,
    pub focus: Focus,
    pub settings: DiffSettings,
    pub diff: DiffResult,
    pub theme: Theme,
    pub line_numbers: bool,
    pub tab_width: usize,
    /// First visible row of the diff pane
    pub scroll: usize,
    /// Height of the diff pane at the last draw
    pub page_height: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(left: &str, right: &str, settings: DiffSettings, theme: Theme) -> Self {
        let mut app = Self {
            left: editor(left),
            right: editor(right),
            focus: Focus::Left,
            settings,
            diff: DiffResult::default(),
            theme,
            line_numbers: true,
            tab_width: 4,
            scroll: 0,
            page_height: 10,
            should_quit: false,
        };
        app.refresh_editors();
        app.recompute();
        app
    }

    pub fn left_text(&self) -> String {
        self.left.lines().join("\n")
    }

    pub fn right_text(&self) -> String {
        self.right.lines().join("\n")
    }

    /// Rerun the diff against the current editor contents
    pub fn recompute(&mut self) {
        self.diff = self
            .settings
            .engine()
            .diff_strings(&self.left_text(), &self.right_text());
        self.clamp_scroll();
        trace!(stats = ?self.diff.stats, "recomputed diff");
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::F(2) => self.toggle_ignore_case(),
            KeyCode::F(3) => self.toggle_ignore_whitespace(),
            KeyCode::F(4) => self.toggle_algorithm(),
            KeyCode::Char('s') if ctrl => self.swap(),
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::PageDown => self.scroll_by(self.page_height as isize),
            KeyCode::PageUp => self.scroll_by(-(self.page_height as isize)),
            _ => {
                let target = match self.focus {
                    Focus::Left => &mut self.left,
                    Focus::Right => &mut self.right,
                };
                if target.input(key) {
                    self.recompute();
                }
            }
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Left => Focus::Right,
            Focus::Right => Focus::Left,
        };
        self.refresh_editors();
    }

    pub fn toggle_ignore_case(&mut self) {
        self.settings.options.ignore_case = !self.settings.options.ignore_case;
        self.recompute();
    }

    pub fn toggle_ignore_whitespace(&mut self) {
        self.settings.options.ignore_whitespace = !self.settings.options.ignore_whitespace;
        self.recompute();
    }

    pub fn toggle_algorithm(&mut self) {
        self.settings.algorithm = self.settings.algorithm.toggled();
        self.recompute();
    }

    /// Exchange the two texts
    pub fn swap(&mut self) {
        let left = self.left_text();
        let right = self.right_text();
        self.left = editor(&right);
        self.right = editor(&left);
        self.refresh_editors();
        self.recompute();
    }

    /// Empty both editors
    pub fn clear(&mut self) {
        self.left = editor("");
        self.right = editor("");
        self.scroll = 0;
        self.refresh_editors();
        self.recompute();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    pub fn set_page_height(&mut self, height: usize) {
        self.page_height = height.max(1);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let rows = self.diff.rows().len();
        let max = rows.saturating_sub(self.page_height);
        self.scroll = self.scroll.min(max);
    }

    fn refresh_editors(&mut self) {
        let focused = Style::default().fg(self.theme.border_focused);
        let (left_style, right_style) = match self.focus {
            Focus::Left => (focused, Style::default()),
            Focus::Right => (Style::default(), focused),
        };
        decorate(&mut self.left, " Original ", left_style, self.focus == Focus::Left);
        decorate(
            &mut self.right,
            " Modified ",
            right_style,
            self.focus == Focus::Right,
        );
    }
}

fn editor(text: &str) -> TextArea<'static> {
    TextArea::new(text.split('\n').map(str::to_string).collect())
}

fn decorate(editor: &mut TextArea<'static>, title: &'static str, border: Style, active: bool) {
    editor.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    let cursor = if active {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    editor.set_cursor_style(cursor);
    editor.set_cursor_line_style(Style::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use linediff_core::{Algorithm, DiffStats};
    use pretty_assertions::assert_eq;

    fn make_app(left: &str, right: &str) -> App {
        let theme = ThemeConfig::default().resolve().unwrap();
        App::new(left, right, DiffSettings::default(), theme)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_initial_diff() {
        let app = make_app("a\nb\nc", "a\nX\nb\nc");
        assert_eq!(
            app.diff.stats,
            DiffStats {
                total: 4,
                added: 1,
                removed: 0,
                unchanged: 3
            }
        );
        assert_eq!(app.left_text(), "a\nb\nc");
    }

    #[test]
    fn test_empty_editors_round_trip() {
        let app = make_app("", "");
        assert_eq!(app.left_text(), "");
        assert_eq!(app.diff.stats, DiffStats::default());
    }

    #[test]
    fn test_typing_recomputes() {
        let mut app = make_app("cat", "");
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Right);
        for c in "cat".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(app.right_text(), "cat");
        assert!(!app.diff.has_changes());
    }

    #[test]
    fn test_toggles_recompute() {
        let mut app = make_app("Hello", "hello");
        assert!(app.diff.has_changes());

        app.handle_key(press(KeyCode::F(2)));
        assert!(app.settings.options.ignore_case);
        assert!(!app.diff.has_changes());

        app.handle_key(press(KeyCode::F(3)));
        assert!(app.settings.options.ignore_whitespace);

        app.handle_key(press(KeyCode::F(4)));
        assert_eq!(app.settings.algorithm, Algorithm::Lcs);
    }

    #[test]
    fn test_swap_and_clear() {
        let mut app = make_app("a", "a\nb");
        assert_eq!(app.diff.stats.added, 1);

        app.handle_key(ctrl('s'));
        assert_eq!(app.left_text(), "a\nb");
        assert_eq!(app.right_text(), "a");
        assert_eq!(app.diff.stats.removed, 1);
        assert_eq!(app.diff.stats.added, 0);

        app.handle_key(ctrl('l'));
        assert_eq!(app.left_text(), "");
        assert_eq!(app.diff.stats, DiffStats::default());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let text: Vec<String> = (0..30).map(|n| n.to_string()).collect();
        let mut app = make_app(&text.join("\n"), "");
        app.set_page_height(10);

        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.scroll, 10);
        app.scroll_by(100);
        assert_eq!(app.scroll, 20);
        app.handle_key(press(KeyCode::PageUp));
        assert_eq!(app.scroll, 10);
        app.scroll_by(-100);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app("", "");
        app.handle_key(ctrl('q'));
        assert!(app.should_quit);

        let mut app = make_app("", "");
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
