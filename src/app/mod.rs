//! Application module
//!
//! Contains the viewer event loop and key handling.
//!
//! # Module Structure
//! - `state` - Viewer state (ViewState)
//! - Main module - App struct and event loop

mod state;

pub use state::ViewState;

use crate::config_file::StyleConfig;
use crate::error::Result;
use crate::presentation::FilterInteraction;
use crate::types::FunnelStep;
use crate::ui;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::Duration;
use tracing::debug;

/// Main application struct
pub struct App {
    state: ViewState,
}

impl App {
    /// Create a viewer for one set of computed steps
    pub fn new(steps: Vec<FunnelStep>, style: StyleConfig) -> Self {
        Self {
            state: ViewState::new(steps, style),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Run the event loop until the user quits.
    ///
    /// Returns the last filter interaction the user triggered, if any.
    pub fn run(
        mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<Option<FilterInteraction>> {
        debug!("Starting viewer loop");

        loop {
            terminal.draw(|f| ui::draw(f, &self.state))?;

            if crossterm::event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event) {
                        break; // Exit requested
                    }
                }
            }
        }

        debug!("Viewer closed");
        Ok(self.state.last_interaction)
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return true;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_previous(),
            KeyCode::Char('d') => self.state.toggle_details(),
            KeyCode::Enter => {
                if let Some(interaction) = self.state.emit_filter() {
                    debug!(?interaction, "Filter interaction emitted");
                }
            }
            _ => {}
        }
        false
    }
}
