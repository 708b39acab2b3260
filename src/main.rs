use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor,
    event::KeyEventKind,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use stopwatch::{
    alert::{DesktopNotifier, Notifier, NullNotifier},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, Runner, StopwatchEvent, StopwatchEventSource},
    stopwatch::{Flow, Stopwatch},
    ticker::{FixedTicker, Ticker},
};

/// minimal terminal stopwatch with a time limit and overtime alerts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal terminal stopwatch. Set an optional time limit and get a desktop notification once the run goes over it."
)]
pub struct Cli {
    /// milliseconds between ticks (overrides the config file)
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,

    /// disable desktop notifications
    #[clap(long)]
    no_notifications: bool,

    /// path to the config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the default config file and exit
    #[clap(long)]
    write_default_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Layer CLI overrides on top of the loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if self.no_notifications {
            config.notifications = false;
        }
        config
    }
}

fn notifier_for(config: &Config) -> Box<dyn Notifier> {
    if config.notifications {
        Box::new(DesktopNotifier::new())
    } else {
        Box::new(NullNotifier)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let store = cli.config_store();

    if cli.write_default_config {
        store.save(&Config::default())?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init();
    let config = cli.apply(store.load());
    info!("starting with {:?}", config);

    let mut app = Stopwatch::new(
        notifier_for(&config),
        FixedTicker::new(Duration::from_millis(config.tick_interval_ms)),
        &config.strings,
    );

    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let res = start_tui(&mut terminal, &mut app, &runner);
    app.on_teardown();
    drop(guard);

    res
}

/// Puts the terminal back in cooked mode on the main screen when dropped,
/// whether `main` returns normally, bails out with `?`, or unwinds.
struct TerminalGuard {
    restore: Option<Box<dyn FnOnce()>>,
}

impl TerminalGuard {
    fn new(restore: impl FnOnce() + 'static) -> Self {
        Self {
            restore: Some(Box::new(restore)),
        }
    }

    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self::new(restore_terminal);
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::warn!("could not leave raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        log::warn!("could not leave alternate screen: {}", e);
    }
}

fn start_tui<B: Backend, N: Notifier, T: Ticker, E: StopwatchEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut Stopwatch<N, T>,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step(app.clock_mut()) {
            Some(StopwatchEvent::Tick) => app.on_tick(),
            Some(StopwatchEvent::Resize) => {}
            Some(StopwatchEvent::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
            None => continue,
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
