//! Display seam.
//!
//! The binder talks to the screen exclusively through [`ControlView`],
//! so core logic is testable without a display and the firmware can
//! swap render backends without touching the binding code.

/// Mirror of the control surface on the display.
///
/// Implementations must be non-blocking; updating a shared state
/// snapshot that a render task picks up later is the intended shape.
pub trait ControlView {
    /// Show the encoder at `index` (layout table order) at `value`.
    fn set_encoder(&mut self, index: usize, value: f32);

    /// Show the button at `index` (layout table order) pressed or not.
    fn set_button(&mut self, index: usize, pressed: bool);

    /// Snap every encoder widget back to the default position.
    ///
    /// Called after the hardware positions have been synchronized, so
    /// the display never shows a value the encoders do not hold.
    fn reset_encoder_positions(&mut self);
}
