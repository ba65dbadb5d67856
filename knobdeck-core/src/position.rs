//! Pulse accumulation and normalized position tracking.
//!
//! One tracker per encoder turns raw quadrature pulses into an
//! absolute position in [0, 1]. Scaling comes from the encoder
//! geometry in [`EncoderDef`]; partial steps are carried in a residual
//! so slow turns with `ticks_per_event > 1` do not lose motion.

use crate::config::EncoderDef;

/// Absolute position state for one encoder.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    /// Current position in steps, 0..=span.
    steps: i32,
    /// Total steps across the travel arc.
    span: i32,
    ticks_per_event: i32,
    /// Pulses accumulated toward the next step.
    residual: i32,
    invert: bool,
}

impl PositionTracker {
    /// Tracker for `def`, starting at `initial` (clamped to [0, 1]).
    ///
    /// `def` must have passed validation; a zero-travel geometry would
    /// divide by zero here.
    #[must_use]
    pub fn new(def: &EncoderDef, initial: f32) -> Self {
        let mut tracker = Self {
            steps: 0,
            span: def.travel_steps(),
            ticks_per_event: def.ticks_per_event as i32,
            residual: 0,
            invert: def.invert,
        };
        tracker.set(initial);
        tracker
    }

    /// Apply raw pulses from the quadrature decoder.
    ///
    /// Positive `pulses` is clockwise before inversion. Returns the
    /// new normalized position, or `None` if the value did not move
    /// (end stop reached, or the residual has not filled a whole step).
    pub fn turn(&mut self, pulses: i32) -> Option<f32> {
        let pulses = if self.invert { -pulses } else { pulses };
        self.residual += pulses;

        let delta = self.residual / self.ticks_per_event;
        self.residual %= self.ticks_per_event;
        if delta == 0 {
            return None;
        }

        let steps = (self.steps + delta).clamp(0, self.span);
        if steps == self.steps {
            return None;
        }
        self.steps = steps;
        Some(self.value())
    }

    /// Jump to a normalized position, discarding any residual pulses.
    pub fn set(&mut self, value: f32) {
        self.steps = (value.clamp(0.0, 1.0) * self.span as f32 + 0.5) as i32;
        self.residual = 0;
    }

    /// Current normalized position.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.steps as f32 / self.span as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlId;

    // 24 pulses/rev over 270 degrees -> 18 steps of travel
    const DEF: EncoderDef = EncoderDef {
        id: ControlId(10),
        pin_a: 22,
        pin_b: 23,
        pulses_per_rev: 24,
        range_degrees: 270,
        ticks_per_event: 1,
        invert: false,
    };

    #[test]
    fn starts_at_initial_position() {
        let tracker = PositionTracker::new(&DEF, 0.5);
        assert_eq!(tracker.value(), 0.5);
    }

    #[test]
    fn turning_moves_one_step_per_pulse() {
        let mut tracker = PositionTracker::new(&DEF, 0.0);
        assert_eq!(tracker.turn(1), Some(1.0 / 18.0));
        assert_eq!(tracker.turn(1), Some(2.0 / 18.0));
        assert_eq!(tracker.turn(-1), Some(1.0 / 18.0));
    }

    #[test]
    fn clamps_at_end_stops() {
        let mut tracker = PositionTracker::new(&DEF, 1.0);
        assert_eq!(tracker.turn(5), None);
        assert_eq!(tracker.value(), 1.0);
        assert_eq!(tracker.turn(-1), Some(17.0 / 18.0));

        let mut tracker = PositionTracker::new(&DEF, 0.0);
        assert_eq!(tracker.turn(-5), None);
        assert_eq!(tracker.value(), 0.0);
    }

    #[test]
    fn inversion_flips_direction() {
        let inverted = EncoderDef { invert: true, ..DEF };
        let mut tracker = PositionTracker::new(&inverted, 0.5);
        assert_eq!(tracker.turn(1), Some(8.0 / 18.0));
    }

    #[test]
    fn residual_carries_partial_ticks() {
        let coarse = EncoderDef {
            ticks_per_event: 2,
            ..DEF
        };
        // 24 pulses over 270 degrees at 2 per event -> 9 steps
        let mut tracker = PositionTracker::new(&coarse, 0.0);
        assert_eq!(tracker.turn(1), None);
        assert_eq!(tracker.turn(1), Some(1.0 / 9.0));
        assert_eq!(tracker.turn(1), None);
        assert_eq!(tracker.turn(1), Some(2.0 / 9.0));
    }

    #[test]
    fn set_discards_residual() {
        let coarse = EncoderDef {
            ticks_per_event: 2,
            ..DEF
        };
        let mut tracker = PositionTracker::new(&coarse, 0.0);
        assert_eq!(tracker.turn(1), None);
        tracker.set(0.5);
        assert_eq!(tracker.value(), 0.5);
        // The pre-set pulse no longer counts toward the next step.
        assert_eq!(tracker.turn(1), None);
    }

    #[test]
    fn set_rounds_to_nearest_step() {
        let mut tracker = PositionTracker::new(&DEF, 0.0);
        tracker.set(0.5);
        // 0.5 * 18 = 9 steps exactly
        assert_eq!(tracker.value(), 0.5);
        tracker.set(2.0);
        assert_eq!(tracker.value(), 1.0);
        tracker.set(-1.0);
        assert_eq!(tracker.value(), 0.0);
    }
}
