mod app_state;
mod card_widget;
mod key_handler;
mod status_bar;
mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use crate::app::App;
use app_state::TuiState;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw-mode alternate screen, restored on drop
struct CardTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl CardTerminal {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for CardTerminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

pub fn run(app: App) -> Result<()> {
    let mut state = TuiState::new(app);
    if state.current_card().is_none() {
        state.flash_message = Some("The configured sheets have no cards".to_string());
    }

    let mut card_terminal = CardTerminal::enter()?;
    study(&mut card_terminal.terminal, &mut state)
}

fn study<B: Backend>(terminal: &mut Terminal<B>, state: &mut TuiState) -> Result<()> {
    while !state.quit {
        terminal.draw(|f| ui::draw(f, state))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_handler::handle_key(state, key);
            }
            Event::Mouse(mouse) => key_handler::handle_mouse(state, mouse),
            _ => {}
        }
    }

    Ok(())
}
