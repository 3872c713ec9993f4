//! Application state for the TUI.
//!
//! Holds the question being typed, the outcome of the last pipeline run,
//! and the result scroll position. One question is in flight at a time;
//! the state machine is just "typing" and "working".

use askpg::assistant::AskOutcome;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key event produced.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing for the caller to do.
    None,
    /// The user submitted a question to run through the pipeline.
    Submit(String),
}

/// TUI application state.
pub struct App {
    /// Question text being edited.
    pub input: String,
    /// Cursor position in characters.
    pub cursor: usize,
    /// Outcome of the last pipeline run, if any.
    pub outcome: Option<AskOutcome>,
    /// Inline notice outside a pipeline outcome (e.g. an LLM failure).
    pub notice: Option<String>,
    /// True while a question is running through the pipeline.
    pub processing: bool,
    /// False once the user asked to quit.
    pub running: bool,
    /// Vertical scroll offset into the rendered result table.
    pub scroll: u16,
}

impl App {
    /// Creates the initial application state.
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            outcome: None,
            notice: None,
            processing: false,
            running: true,
            scroll: 0,
        }
    }

    /// Handles a key event, returning what the caller should do next.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        // Global shortcuts first
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.running = false;
                    return KeyOutcome::None;
                }
                KeyCode::Char('l') => {
                    self.clear_output();
                    return KeyOutcome::None;
                }
                _ => return KeyOutcome::None,
            }
        }

        if self.processing {
            // The pipeline is blocking; ignore everything until it returns
            return KeyOutcome::None;
        }

        match key.code {
            KeyCode::Enter => {
                // Empty questions are submitted as-is; the backend gets to
                // make of them what it will
                let question = std::mem::take(&mut self.input);
                self.cursor = 0;
                KeyOutcome::Submit(question)
            }
            KeyCode::Char(c) => {
                self.insert_char(c);
                KeyOutcome::None
            }
            KeyCode::Backspace => {
                self.delete_back();
                KeyOutcome::None
            }
            KeyCode::Delete => {
                self.delete_forward();
                KeyOutcome::None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyOutcome::None
            }
            KeyCode::Right => {
                if self.cursor < self.input.chars().count() {
                    self.cursor += 1;
                }
                KeyOutcome::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                KeyOutcome::None
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
                KeyOutcome::None
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                KeyOutcome::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                KeyOutcome::None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                KeyOutcome::None
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                KeyOutcome::None
            }
            _ => KeyOutcome::None,
        }
    }

    /// Stores the outcome of a pipeline run.
    pub fn set_outcome(&mut self, outcome: AskOutcome) {
        self.outcome = Some(outcome);
        self.notice = None;
        self.scroll = 0;
    }

    /// Stores an inline notice (e.g. a backend failure with no outcome).
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.outcome = None;
        self.scroll = 0;
    }

    /// Clears the output panes.
    pub fn clear_output(&mut self) {
        self.outcome = None;
        self.notice = None;
        self.scroll = 0;
    }

    /// Byte index of the cursor within the input string.
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.input.remove(idx);
        }
    }

    fn delete_forward(&mut self) {
        if self.cursor < self.input.chars().count() {
            let idx = self.byte_index();
            self.input.remove(idx);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
