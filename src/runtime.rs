use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::ticker::{ClockTicker, Ticker};

/// How long the runner waits for input while the clock is stopped
pub const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum StopwatchEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait StopwatchEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<StopwatchEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<StopwatchEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(StopwatchEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(StopwatchEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("terminal event reader stopped: {}", e);
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StopwatchEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<StopwatchEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<StopwatchEvent>) -> Self {
        Self { rx }
    }
}

impl StopwatchEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StopwatchEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: StopwatchEventSource> {
    event_source: E,
    idle_wait: Duration,
}

impl<E: StopwatchEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self::with_idle_wait(event_source, IDLE_WAIT)
    }

    pub fn with_idle_wait(event_source: E, idle_wait: Duration) -> Self {
        Self {
            event_source,
            idle_wait,
        }
    }

    /// Waits for input until the clock's next tick is due.
    ///
    /// Returns the input event, `Tick` once the clock's pending tick has
    /// been taken, or None if nothing happened within the wait.
    pub fn step<T: Ticker>(&self, clock: &mut ClockTicker<T>) -> Option<StopwatchEvent> {
        let now = Instant::now();
        if clock.poll(now) {
            return Some(StopwatchEvent::Tick);
        }
        let wait = clock.time_until_due(now).unwrap_or(self.idle_wait);

        match self.event_source.recv_timeout(wait) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => {
                clock.poll(Instant::now()).then_some(StopwatchEvent::Tick)
            }
            Err(RecvTimeoutError::Disconnected) => {
                // No more input will arrive; keep ticking at the clock's pace
                thread::sleep(wait);
                clock.poll(Instant::now()).then_some(StopwatchEvent::Tick)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::FixedTicker;
    use std::sync::mpsc;

    fn clock(ms: u64) -> ClockTicker<FixedTicker> {
        ClockTicker::new(FixedTicker::new(Duration::from_millis(ms)))
    }

    #[test]
    fn step_returns_tick_when_due() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx));
        let mut clock = clock(1);
        clock.start(Instant::now());

        // With no events available, the due tick should be yielded
        let mut ticked = false;
        for _ in 0..10 {
            if let Some(StopwatchEvent::Tick) = runner.step(&mut clock) {
                ticked = true;
                break;
            }
        }
        assert!(ticked, "expected Tick once the interval elapsed");
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(StopwatchEvent::Resize).unwrap();
        let runner = Runner::new(TestEventSource::new(rx));
        let mut clock = clock(10_000);
        clock.start(Instant::now());

        match runner.step(&mut clock) {
            Some(StopwatchEvent::Resize) => {}
            other => panic!("expected Resize event, got {:?}", other),
        }
    }

    #[test]
    fn step_never_ticks_when_stopped() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::with_idle_wait(TestEventSource::new(rx), Duration::from_millis(1));
        let mut clock = clock(1);

        for _ in 0..5 {
            assert!(runner.step(&mut clock).is_none());
        }
    }

    #[test]
    fn step_ticks_after_source_disconnects() {
        let (tx, rx) = mpsc::channel::<StopwatchEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));
        let mut clock = clock(2);
        clock.start(Instant::now());

        assert!(matches!(runner.step(&mut clock), Some(StopwatchEvent::Tick)));
    }
}
