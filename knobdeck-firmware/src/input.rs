//! GPIO polling: quadrature decoding, button debouncing, and the
//! bridge from pin state to [`ControlEvent`]s.
//!
//! Everything here runs in the input task at [`INPUT_POLL_HZ`]. One
//! [`InputPoller::poll`] pass scans every control and hands resulting
//! events straight to the binder, so a turn becomes a MIDI message in
//! the same pass that observed the edge.
//!
//! [`INPUT_POLL_HZ`]: crate::config::INPUT_POLL_HZ

use core::cell::RefCell;

use embassy_rp::gpio::Input;
use knobdeck_core::{
    ButtonDef, ControlEvent, ControlId, ControlLayout, EncoderDriver, InputBinder, PositionTracker,
};
use rotary_encoder_hal::{Direction, Rotary};

use crate::config::{BUTTON_COUNT, DEBOUNCE_POLLS, ENCODER_COUNT};
use crate::midi::QueueMidiOut;
use crate::view::SurfaceView;

/// The binder wired to this board's MIDI queue, surface, and trackers.
pub type DeckBinder = InputBinder<QueueMidiOut, SurfaceView, TrackerDriver>;

/// Counting debouncer, one per button.
///
/// A new level must hold for [`DEBOUNCE_POLLS`] consecutive polls
/// before it replaces the stable state.
struct Debouncer {
    stable: bool,
    count: u8,
}

impl Debouncer {
    fn new(initial: bool) -> Self {
        Self {
            stable: initial,
            count: 0,
        }
    }

    /// Feed one raw sample; `Some` when the stable state flips.
    fn update(&mut self, raw: bool) -> Option<bool> {
        if raw == self.stable {
            self.count = 0;
            return None;
        }
        self.count += 1;
        if self.count < DEBOUNCE_POLLS {
            return None;
        }
        self.stable = raw;
        self.count = 0;
        Some(raw)
    }
}

/// A button pin with its polarity and debounce state.
pub struct DebouncedButton {
    input: Input<'static>,
    id: ControlId,
    active_low: bool,
    debounce: Debouncer,
}

impl DebouncedButton {
    /// Wrap a configured pin. The current level seeds the debouncer so
    /// a button held across boot does not fire a spurious edge.
    #[must_use]
    pub fn new(input: Input<'static>, def: &ButtonDef) -> Self {
        let pressed = if def.active_low {
            input.is_low()
        } else {
            input.is_high()
        };
        Self {
            input,
            id: def.id,
            active_low: def.active_low,
            debounce: Debouncer::new(pressed),
        }
    }

    fn poll(&mut self) -> Option<ControlEvent> {
        let raw = if self.active_low {
            self.input.is_low()
        } else {
            self.input.is_high()
        };
        self.debounce.update(raw).map(|pressed| {
            if pressed {
                ControlEvent::Pressed { id: self.id }
            } else {
                ControlEvent::Released { id: self.id }
            }
        })
    }
}

/// Position trackers for every encoder, shared between the poller and
/// the binder's reset path.
///
/// Each operation takes its own short borrow, so a reset triggered
/// from inside [`InputPoller::poll`] never overlaps a live borrow from
/// the turn that queued the triggering event.
pub struct TrackerBank {
    layout: &'static ControlLayout,
    trackers: RefCell<[PositionTracker; ENCODER_COUNT]>,
}

impl TrackerBank {
    /// Trackers for every encoder in `layout`, all at `initial`.
    ///
    /// `layout` must have passed validation and carry exactly
    /// [`ENCODER_COUNT`] encoders.
    #[must_use]
    pub fn new(layout: &'static ControlLayout, initial: f32) -> Self {
        let trackers = core::array::from_fn(|i| PositionTracker::new(&layout.encoders[i], initial));
        Self {
            layout,
            trackers: RefCell::new(trackers),
        }
    }

    /// Apply decoder pulses to the encoder at `index`; `Some` when
    /// its position changed.
    pub fn turn(&self, index: usize, pulses: i32) -> Option<f32> {
        self.trackers.borrow_mut()[index].turn(pulses)
    }

    fn set(&self, index: usize, value: f32) {
        self.trackers.borrow_mut()[index].set(value);
    }

    /// Control id of the encoder at `index`.
    #[must_use]
    pub fn id(&self, index: usize) -> ControlId {
        self.layout.encoders[index].id
    }
}

/// The binder's handle onto the tracker bank.
pub struct TrackerDriver {
    bank: &'static TrackerBank,
}

impl TrackerDriver {
    #[must_use]
    pub fn new(bank: &'static TrackerBank) -> Self {
        Self { bank }
    }
}

impl EncoderDriver for TrackerDriver {
    fn set_position(&mut self, id: ControlId, value: f32) {
        if let Some(index) = self.bank.layout.encoder_index(id) {
            self.bank.set(index, value);
        }
    }
}

/// Scans every rotary and button pin and feeds the binder.
pub struct InputPoller {
    bank: &'static TrackerBank,
    rotaries: [Rotary<Input<'static>, Input<'static>>; ENCODER_COUNT],
    buttons: [DebouncedButton; BUTTON_COUNT],
}

impl InputPoller {
    /// `rotaries` and `buttons` must be ordered as in the layout; the
    /// poller pairs them with trackers and definitions by index.
    #[must_use]
    pub fn new(
        bank: &'static TrackerBank,
        rotaries: [Rotary<Input<'static>, Input<'static>>; ENCODER_COUNT],
        buttons: [DebouncedButton; BUTTON_COUNT],
    ) -> Self {
        Self {
            bank,
            rotaries,
            buttons,
        }
    }

    /// One pass over every control.
    pub fn poll(&mut self, binder: &mut DeckBinder) {
        for (index, rotary) in self.rotaries.iter_mut().enumerate() {
            let pulses = match rotary.update().unwrap_or(Direction::None) {
                Direction::Clockwise => 1,
                Direction::CounterClockwise => -1,
                Direction::None => continue,
            };
            if let Some(value) = self.bank.turn(index, pulses) {
                binder.handle(ControlEvent::Turned {
                    id: self.bank.id(index),
                    value,
                });
            }
        }
        for button in &mut self.buttons {
            if let Some(event) = button.poll() {
                binder.handle(event);
            }
        }
    }
}
