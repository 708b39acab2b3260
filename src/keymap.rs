use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User-triggered actions the stopwatch reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Action {
    Start,
    Reset,
    Settings,
    Quit,
}

/// Dispatch table from keys to actions
pub const BINDINGS: &[(KeyCode, Action)] = &[
    (KeyCode::Char(' '), Action::Start),
    (KeyCode::Char('s'), Action::Start),
    (KeyCode::Char('r'), Action::Reset),
    (KeyCode::Char('t'), Action::Settings),
    (KeyCode::Char('q'), Action::Quit),
    (KeyCode::Esc, Action::Quit),
];

pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // ctrl+c to quit, every other chord is ignored
        return (key.code == KeyCode::Char('c')).then_some(Action::Quit);
    }
    BINDINGS
        .iter()
        .find(|(code, _)| *code == key.code)
        .map(|(_, action)| *action)
}

/// Short key legend for the footer, e.g. "space/s"
pub fn keys_for(action: Action) -> String {
    BINDINGS
        .iter()
        .filter(|(_, a)| *a == action)
        .map(|(code, _)| match code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "esc".to_string(),
            other => format!("{:?}", other).to_lowercase(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
