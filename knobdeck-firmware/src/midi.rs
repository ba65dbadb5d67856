//! USB MIDI output: the message queue, wire rendering, and the sender.
//!
//! The input path pushes [`MidiMessage`]s into a bounded queue and
//! never waits; the sender task drains the queue into the USB MIDI
//! streaming endpoint whenever a host is connected.

use defmt::{info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::midi::MidiClass;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use knobdeck_core::MidiOut;
use midi_convert::render_slice::MidiRenderSlice;
use midi_types::{Channel as MidiChannel, Control, MidiMessage, Value7};

/// Outbound queue depth. A full sweep of every control plus margin;
/// the USB drain outruns sustained input rates, so only bursts queue.
pub const MIDI_QUEUE_DEPTH: usize = 32;

/// Queue between the input task and the USB sender.
pub type MidiQueue = Channel<CriticalSectionRawMutex, MidiMessage, MIDI_QUEUE_DEPTH>;

/// Virtual cable number for every outgoing event packet.
const CABLE: u8 = 0;

/// Non-blocking MIDI sink backed by the shared queue.
///
/// Called from the input path, so a full queue drops the message and
/// counts it instead of stalling the caller.
pub struct QueueMidiOut {
    queue: &'static MidiQueue,
    dropped: u32,
}

impl QueueMidiOut {
    #[must_use]
    pub fn new(queue: &'static MidiQueue) -> Self {
        Self { queue, dropped: 0 }
    }
}

impl MidiOut for QueueMidiOut {
    fn send_cc(&mut self, channel: MidiChannel, controller: Control, value: Value7) {
        let message = MidiMessage::ControlChange(channel, controller, value);
        if self.queue.try_send(message).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("MIDI queue full, dropped message ({} total)", self.dropped);
        }
    }
}

/// Pack one message into a USB MIDI event packet.
///
/// Event packets are four bytes: cable number and code index in the
/// header, then the message padded to three bytes. For the channel
/// voice messages sent here the code index equals the status high
/// nibble.
fn event_packet(message: &MidiMessage) -> [u8; 4] {
    let mut packet = [0u8; 4];
    message.render_slice(&mut packet[1..]);
    packet[0] = (CABLE << 4) | (packet[1] >> 4);
    packet
}

/// Drains the queue into the USB MIDI endpoint.
pub struct MidiSender {
    class: MidiClass<'static, Driver<'static, USB>>,
    queue: &'static MidiQueue,
}

impl MidiSender {
    #[must_use]
    pub fn new(class: MidiClass<'static, Driver<'static, USB>>, queue: &'static MidiQueue) -> Self {
        Self { class, queue }
    }

    /// Forward messages forever, surviving host disconnects.
    ///
    /// While no host is connected the input side keeps running; its
    /// messages accumulate up to the queue bound and the rest are
    /// dropped at the producer.
    pub async fn run(&mut self) -> ! {
        loop {
            self.class.wait_connection().await;
            info!("USB MIDI host connected");
            while self.forward_one().await.is_ok() {}
            info!("USB MIDI host disconnected");
        }
    }

    async fn forward_one(&mut self) -> Result<(), EndpointError> {
        let message = self.queue.receive().await;
        self.class.write_packet(&event_packet(&message)).await
    }
}

/// Configure the USB MIDI class in the USB builder.
///
/// One virtual cable in each direction, 64 byte bulk endpoints.
pub fn configure_usb_midi<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
) -> MidiClass<'d, Driver<'d, USB>> {
    MidiClass::new(builder, 1, 1, 64)
}
