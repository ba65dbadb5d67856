//! Encoder hardware seam.

use crate::config::ControlId;

/// Write access to the position trackers behind the physical encoders.
///
/// The binder uses this during reset to move the hardware notion of
/// position before the view is told anything changed.
pub trait EncoderDriver {
    /// Synchronize the encoder with `id` to a normalized position.
    ///
    /// Unknown ids are ignored; the binder only passes ids from the
    /// validated layout table.
    fn set_position(&mut self, id: ControlId, value: f32);
}
