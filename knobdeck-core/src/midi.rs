//! Outbound MIDI seam.

use midi_types::{Channel, Control, Value7};

/// Sink for control change messages.
///
/// Implementations must not block: the binder calls this from the input
/// path, so a full transport should drop the message (and log) rather
/// than stall the caller.
pub trait MidiOut {
    /// Queue one control change message.
    fn send_cc(&mut self, channel: Channel, controller: Control, value: Value7);
}
