use std::fmt;

/// Upper bound on a run before it counts as overtime.
///
/// `Seconds` keeps whatever the user typed, including zero and negative
/// values, which put the run into overtime on its first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeLimit {
    #[default]
    Unlimited,
    Seconds(i32),
}

impl TimeLimit {
    pub fn is_exceeded_by(&self, elapsed_secs: u64) -> bool {
        match *self {
            TimeLimit::Unlimited => false,
            TimeLimit::Seconds(limit) => elapsed_secs as i128 > limit as i128,
        }
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLimit::Unlimited => write!(f, "unlimited"),
            TimeLimit::Seconds(s) => write!(f, "{}s", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdState {
    #[default]
    Normal,
    Overtime,
}

/// Two-state monitor: Normal until the limit is first exceeded, then
/// Overtime until reset.
#[derive(Debug, Clone, Default)]
pub struct ThresholdMonitor {
    state: ThresholdState,
}

impl ThresholdMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only on the evaluation that crosses into Overtime
    pub fn evaluate(&mut self, elapsed_secs: u64, limit: TimeLimit) -> bool {
        if self.state == ThresholdState::Normal && limit.is_exceeded_by(elapsed_secs) {
            self.state = ThresholdState::Overtime;
            return true;
        }
        false
    }

    pub fn state(&self) -> ThresholdState {
        self.state
    }

    pub fn is_overtime(&self) -> bool {
        self.state == ThresholdState::Overtime
    }

    pub fn reset(&mut self) {
        self.state = ThresholdState::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_exceeded() {
        assert!(!TimeLimit::Unlimited.is_exceeded_by(0));
        assert!(!TimeLimit::Unlimited.is_exceeded_by(u64::MAX));
    }

    #[test]
    fn test_strict_inequality() {
        let limit = TimeLimit::Seconds(5);
        assert!(!limit.is_exceeded_by(4));
        assert!(!limit.is_exceeded_by(5));
        assert!(limit.is_exceeded_by(6));
    }

    #[test]
    fn test_negative_limit_exceeded_immediately() {
        assert!(TimeLimit::Seconds(-3).is_exceeded_by(0));
        assert!(TimeLimit::Seconds(-1).is_exceeded_by(0));
        assert!(!TimeLimit::Seconds(0).is_exceeded_by(0));
        assert!(TimeLimit::Seconds(0).is_exceeded_by(1));
    }

    #[test]
    fn test_transition_fires_once() {
        let mut monitor = ThresholdMonitor::new();
        let limit = TimeLimit::Seconds(2);

        let crossings: Vec<bool> = (1..=6).map(|s| monitor.evaluate(s, limit)).collect();
        assert_eq!(crossings, vec![false, false, true, false, false, false]);
        assert!(monitor.is_overtime());
    }

    #[test]
    fn test_reset_returns_to_normal() {
        let mut monitor = ThresholdMonitor::new();
        assert!(monitor.evaluate(10, TimeLimit::Seconds(1)));
        monitor.reset();
        assert_eq!(monitor.state(), ThresholdState::Normal);
        assert!(monitor.evaluate(10, TimeLimit::Seconds(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeLimit::Unlimited.to_string(), "unlimited");
        assert_eq!(TimeLimit::Seconds(90).to_string(), "90s");
        assert_eq!(TimeLimit::Seconds(-3).to_string(), "-3s");
    }
}
