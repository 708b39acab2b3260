use std::time::Instant;

use crossterm::event::KeyEvent;
use log::{info, trace};

use crate::{
    alert::{AlertDispatcher, Notifier},
    config::Strings,
    format::format_elapsed,
    indicator::{Indicator, PulsePhase},
    keymap::{action_for, Action},
    settings::{DialogOutcome, SettingsDialog},
    threshold::{ThresholdMonitor, TimeLimit},
    ticker::{ClockTicker, Ticker},
};

/// Mutable state of the current run
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub elapsed_secs: u64,
    pub time_limit: TimeLimit,
    pub threshold: ThresholdMonitor,
    pub indicator: Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Controller owning the session, the clock, and the alert dispatcher
pub struct Stopwatch<N: Notifier, T: Ticker> {
    pub session: SessionState,
    clock: ClockTicker<T>,
    alerts: AlertDispatcher<N>,
    settings: Option<SettingsDialog>,
    settings_title: String,
    display: String,
}

impl<N: Notifier, T: Ticker> Stopwatch<N, T> {
    pub fn new(notifier: N, ticker: T, strings: &Strings) -> Self {
        let mut alerts = AlertDispatcher::new(notifier, strings);
        alerts.register();

        let session = SessionState::default();
        Self {
            display: format_elapsed(session.elapsed_secs),
            session,
            clock: ClockTicker::new(ticker),
            alerts,
            settings: None,
            settings_title: strings.settings_title.clone(),
        }
    }

    pub fn on_start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.clock.start(now) {
            info!(
                "stopwatch started (limit: {}, interval: {:?})",
                self.session.time_limit,
                self.clock.interval()
            );
        }
    }

    pub fn on_reset(&mut self) {
        self.clock.stop();
        self.session.elapsed_secs = 0;
        self.session.threshold.reset();
        self.session.indicator.reset();
        self.display = format_elapsed(0);
        self.alerts.cancel();
        info!("stopwatch reset");
    }

    /// Stop the clock before the controller goes away. A shown alert stays.
    pub fn on_teardown(&mut self) {
        if self.clock.stop() {
            info!("stopwatch torn down while running");
        }
    }

    pub fn on_tick(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        self.session.elapsed_secs += 1;
        self.session.indicator.advance();
        if self
            .session
            .threshold
            .evaluate(self.session.elapsed_secs, self.session.time_limit)
        {
            info!(
                "overtime at {}s (limit: {})",
                self.session.elapsed_secs, self.session.time_limit
            );
            self.alerts.show();
        }
        self.display = format_elapsed(self.session.elapsed_secs);
        trace!("tick {}", self.display);
    }

    /// Fire the pending tick if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.clock.poll(now) {
            self.on_tick();
            return true;
        }
        false
    }

    /// Open the time limit dialog. Refused while running.
    pub fn open_settings(&mut self) -> bool {
        if !self.settings_enabled() {
            return false;
        }
        self.settings = Some(SettingsDialog::new());
        true
    }

    pub fn dispatch(&mut self, action: Action) -> Flow {
        match action {
            Action::Start => self.on_start(),
            Action::Reset => self.on_reset(),
            Action::Settings => {
                self.open_settings();
            }
            Action::Quit => {
                self.on_teardown();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Route a key to the open dialog, or through the dispatch table
    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if let Some(dialog) = self.settings.as_mut() {
            match dialog.on_key(key) {
                Some(DialogOutcome::Confirmed(limit)) => {
                    self.settings = None;
                    self.set_time_limit(limit);
                }
                Some(DialogOutcome::Cancelled) => self.settings = None,
                None => {}
            }
            return Flow::Continue;
        }
        match action_for(key) {
            Some(action) => self.dispatch(action),
            None => Flow::Continue,
        }
    }

    pub fn set_time_limit(&mut self, limit: TimeLimit) {
        info!("time limit set to {}", limit);
        self.session.time_limit = limit;
    }

    pub fn clock_mut(&mut self) -> &mut ClockTicker<T> {
        &mut self.clock
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.session.elapsed_secs
    }

    pub fn is_overtime(&self) -> bool {
        self.session.threshold.is_overtime()
    }

    pub fn time_limit(&self) -> TimeLimit {
        self.session.time_limit
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn indicator_phase(&self) -> PulsePhase {
        self.session.indicator.phase()
    }

    pub fn indicator_visible(&self) -> bool {
        self.is_running()
    }

    pub fn settings_enabled(&self) -> bool {
        !self.is_running()
    }

    pub fn settings_dialog(&self) -> Option<&SettingsDialog> {
        self.settings.as_ref()
    }

    pub fn settings_title(&self) -> &str {
        &self.settings_title
    }
}
