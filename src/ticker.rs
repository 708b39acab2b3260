use std::time::{Duration, Instant};

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Self-rescheduling clock.
///
/// At most one tick is pending at a time. The next tick is scheduled only
/// when the current one is taken by `poll`, and `stop` drops the pending
/// tick so it never fires.
#[derive(Debug)]
pub struct ClockTicker<T: Ticker> {
    ticker: T,
    next_due: Option<Instant>,
}

impl<T: Ticker> ClockTicker<T> {
    pub fn new(ticker: T) -> Self {
        Self {
            ticker,
            next_due: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Schedule the first tick one interval from `now`. No-op when running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.next_due = Some(now + self.ticker.interval());
        true
    }

    /// Remove the pending tick. No-op when stopped.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Take the pending tick if it is due and schedule the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.ticker.interval());
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending tick, zero if overdue, None when stopped
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
