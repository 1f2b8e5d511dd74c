//! Terminal lifecycle and event loop

use crate::app::App;
use crate::views;
use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tracing::debug;

/// Run the interactive view until the user quits, returning the final state
pub fn run(mut app: App) -> Result<App> {
    let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result?;
    debug!(settings = ?app.settings, "interactive session ended");
    Ok(app)
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| views::render(frame, app))?;
        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}
