//! Terminal user interface for askpg.
//!
//! Provides the main application loop using ratatui and crossterm. Each
//! submitted question runs the whole pipeline to completion before the
//! next event is processed; a slow backend or a slow query blocks the
//! interaction until it finishes.

pub mod app;
mod ui;
mod widgets;

pub use app::App;

use askpg::assistant::QueryAssistant;
use askpg::error::{AskError, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;
use tracing::info;

use app::KeyOutcome;

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self { terminal })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| AskError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| AskError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| AskError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| AskError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| AskError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| AskError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main event loop.
    pub async fn run(&mut self, assistant: &QueryAssistant, connection_label: &str) -> Result<()> {
        // Restore the terminal on panic so the shell is not left in raw mode
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let mut app = App::new();

        while app.running {
            self.terminal
                .draw(|frame| ui::render(frame, &app, connection_label))
                .map_err(|e| AskError::internal(format!("Failed to draw: {e}")))?;

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AskError::internal(format!("Failed to poll events: {e}")))?
            {
                continue;
            }

            let raw_event = event::read()
                .map_err(|e| AskError::internal(format!("Failed to read event: {e}")))?;

            let CEvent::Key(key) = raw_event else {
                // Resizes redraw on the next loop iteration anyway
                continue;
            };

            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let KeyOutcome::Submit(question) = app.handle_key(key) {
                info!("Question submitted: {:?}", question);
                app.processing = true;

                // Redraw once so the working state is visible while the
                // pipeline blocks
                self.terminal
                    .draw(|frame| ui::render(frame, &app, connection_label))
                    .map_err(|e| AskError::internal(format!("Failed to draw: {e}")))?;

                match assistant.ask(&question).await {
                    Ok(outcome) => app.set_outcome(outcome),
                    Err(e) => app.set_notice(e.to_string()),
                }
                app.processing = false;
            }
        }

        // Restore panic hook
        let _ = panic::take_hook();

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application with the given assistant.
pub async fn run(assistant: QueryAssistant, connection_label: &str) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.run(&assistant, connection_label).await
}
