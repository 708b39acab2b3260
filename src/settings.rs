use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::threshold::TimeLimit;

/// Parse the settings text into a time limit.
///
/// Anything that is not a plain 32-bit integer (empty, whitespace, letters,
/// overflow) falls back to `Unlimited`. Zero and negative numbers are kept.
pub fn parse_time_limit(text: &str) -> TimeLimit {
    text.parse::<i32>()
        .map(TimeLimit::Seconds)
        .unwrap_or(TimeLimit::Unlimited)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Confirmed(TimeLimit),
    Cancelled,
}

/// Modal text entry for the time limit
#[derive(Debug, Clone, Default)]
pub struct SettingsDialog {
    input: String,
}

impl SettingsDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Feed a key to the dialog. Returns an outcome once the dialog closes.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Enter => Some(DialogOutcome::Confirmed(parse_time_limit(&self.input))),
            KeyCode::Esc => Some(DialogOutcome::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(DialogOutcome::Cancelled)
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }
}
