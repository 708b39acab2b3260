// Library surface for the binary and for headless integration tests.
pub mod alert;
pub mod app_dirs;
pub mod config;
pub mod format;
pub mod indicator;
pub mod keymap;
pub mod logging;
pub mod runtime;
pub mod settings;
pub mod stopwatch;
pub mod threshold;
pub mod ticker;
pub mod ui;
