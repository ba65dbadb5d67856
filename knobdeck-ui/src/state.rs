//! Snapshot of what the control surface screen shows.
//!
//! The input side writes into a [`SurfaceState`] as events arrive; the
//! display task keeps its own copy of the last frame it drew and uses
//! [`SurfaceChanges`] to redraw only what moved. Both sides stay
//! allocation-free: the arrays are sized by the firmware's control
//! counts at compile time.

/// Everything the display needs to render one frame.
///
/// `NE` and `NB` are the encoder and button counts from the layout
/// table, in table order.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfaceState<const NE: usize, const NB: usize> {
    /// Normalized encoder positions, 0.0 to 1.0.
    pub encoders: [f32; NE],
    /// Pressed state per button.
    pub buttons: [bool; NB],
    default_position: f32,
}

impl<const NE: usize, const NB: usize> SurfaceState<NE, NB> {
    /// Fresh surface with every encoder at `default_position` and
    /// every button released.
    #[must_use]
    pub const fn new(default_position: f32) -> Self {
        Self {
            encoders: [default_position; NE],
            buttons: [false; NB],
            default_position,
        }
    }

    /// Update one encoder widget. Ignores out-of-range indices; the
    /// value is clamped to [0, 1].
    pub fn set_encoder(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.encoders.get_mut(index) {
            *slot = value.clamp(0.0, 1.0);
        }
    }

    /// Update one button widget. Ignores out-of-range indices.
    pub fn set_button(&mut self, index: usize, pressed: bool) {
        if let Some(slot) = self.buttons.get_mut(index) {
            *slot = pressed;
        }
    }

    /// Snap every encoder widget back to the default position.
    pub fn reset_encoders(&mut self) {
        self.encoders = [self.default_position; NE];
    }

    /// The position encoders return to on reset.
    #[inline]
    #[must_use]
    pub fn default_position(&self) -> f32 {
        self.default_position
    }
}

/// Which widgets differ between two [`SurfaceState`] snapshots.
///
/// Drives partial redraws so a 2 kHz input stream does not force
/// full-screen repaints at the display rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfaceChanges<const NE: usize, const NB: usize> {
    pub encoders: [bool; NE],
    pub buttons: [bool; NB],
}

impl<const NE: usize, const NB: usize> SurfaceChanges<NE, NB> {
    /// Diff two snapshots widget by widget.
    #[must_use]
    pub fn detect(old: &SurfaceState<NE, NB>, new: &SurfaceState<NE, NB>) -> Self {
        let mut encoders = [false; NE];
        for (i, changed) in encoders.iter_mut().enumerate() {
            *changed = old.encoders[i] != new.encoders[i];
        }

        let mut buttons = [false; NB];
        for (i, changed) in buttons.iter_mut().enumerate() {
            *changed = old.buttons[i] != new.buttons[i];
        }

        Self { encoders, buttons }
    }

    /// Returns `true` if any widget changed.
    #[must_use]
    pub fn any_changed(&self) -> bool {
        self.encoders.iter().any(|&c| c) || self.buttons.iter().any(|&c| c)
    }
}
