use ratatui::style::Color;

/// One phase of the three-phase progress pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PulsePhase {
    Red,
    Green,
    Blue,
}

impl PulsePhase {
    pub fn color(self) -> Color {
        match self {
            PulsePhase::Red => Color::Red,
            PulsePhase::Green => Color::Green,
            PulsePhase::Blue => Color::Blue,
        }
    }
}

pub const PALETTE: [PulsePhase; 3] = [PulsePhase::Red, PulsePhase::Green, PulsePhase::Blue];

/// Advance a palette index by one, wrapping at the palette size
pub fn cycle(index: usize) -> usize {
    (index + 1) % PALETTE.len()
}

/// Round-robin tint for the running indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicator {
    index: usize,
}

impl Indicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.index = cycle(self.index);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> PulsePhase {
        PALETTE[self.index]
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(0), 1);
        assert_eq!(cycle(1), 2);
        assert_eq!(cycle(2), 0);
    }

    #[test]
    fn test_cycle_returns_to_start_after_palette_len() {
        for start in 0..PALETTE.len() {
            let mut i = start;
            for _ in 0..PALETTE.len() {
                i = cycle(i);
            }
            assert_eq!(i, start);
        }
    }

    #[test]
    fn test_indicator_phases_in_order() {
        let mut indicator = Indicator::new();
        assert_eq!(indicator.phase(), PulsePhase::Red);
        indicator.advance();
        assert_eq!(indicator.phase(), PulsePhase::Green);
        indicator.advance();
        assert_eq!(indicator.phase(), PulsePhase::Blue);
        indicator.advance();
        assert_eq!(indicator.phase(), PulsePhase::Red);
    }

    #[test]
    fn test_indicator_reset() {
        let mut indicator = Indicator::new();
        indicator.advance();
        indicator.advance();
        indicator.reset();
        assert_eq!(indicator.index(), 0);
    }

    #[test]
    fn test_phase_colors() {
        assert_eq!(PulsePhase::Red.color(), Color::Red);
        assert_eq!(PulsePhase::Green.color(), Color::Green);
        assert_eq!(PulsePhase::Blue.color(), Color::Blue);
        assert_eq!(PulsePhase::Blue.to_string(), "Blue");
    }
}
