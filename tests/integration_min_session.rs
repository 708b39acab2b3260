// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn start_reset_and_quit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("config.json");

    // Resolve path to compiled binary (debug build during tests)
    let bin = assert_cmd::cargo::cargo_bin("stopwatch");
    let cmd = format!(
        "{} --no-notifications --tick-ms 50 --config {}",
        bin.display(),
        config.display()
    );

    // Spawn the TUI inside a pseudo terminal
    let mut p = spawn(cmd)?;

    // Give the app a moment to initialize the terminal/alternate screen
    std::thread::sleep(Duration::from_millis(200));

    // Start, let a few ticks pass, then reset
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(300));
    p.send("r")?;

    // Open the time limit dialog, enter a value, confirm
    p.send("t")?;
    p.send("5\r")?;
    std::thread::sleep(Duration::from_millis(100));

    p.send("q")?;

    // Wait for the program to terminate cleanly
    p.expect(Eof)?;
    Ok(())
}

#[test]
fn write_default_config_creates_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("nested").join("config.json");

    assert_cmd::Command::cargo_bin("stopwatch")?
        .arg("--write-default-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let written: serde_json::Value = serde_json::from_slice(&std::fs::read(&config)?)?;
    assert_eq!(written["tick_interval_ms"], 1000);
    assert_eq!(written["notifications"], true);
    Ok(())
}
