//! File-backed logging.
//!
//! The terminal belongs to the TUI while it runs, so log records go to a
//! file instead of stderr. `RUST_LOG` overrides the default `info` filter.

use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::app_dirs::AppDirs;

/// Initialize logging into the default state directory.
///
/// Returns false when no log file could be opened; logging stays disabled
/// in that case rather than writing over the screen.
pub fn init() -> bool {
    match AppDirs::log_path() {
        Some(path) => init_with_path(&path),
        None => false,
    }
}

pub fn init_with_path(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // The global logger can only be installed once per test binary, so a
    // single test covers the successful path.
    #[test]
    fn init_with_path_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("stopwatch.log");

        assert!(init_with_path(&path));
        assert!(path.is_file());
    }

    #[test]
    fn init_with_path_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        assert!(!init_with_path(&blocker.join("stopwatch.log")));
    }
}
