//! Deck configuration: control tables, MIDI assignment, and timing.
//!
//! Everything here is static data. The layout and MIDI assignment are
//! validated by [`InputBinder::new`] at startup and the firmware
//! refuses to run on any rejection, so a bad edit to these tables
//! fails at boot instead of producing a half-bound deck.
//!
//! [`InputBinder::new`]: knobdeck_core::InputBinder::new

use knobdeck_core::{ButtonDef, ControlId, ControlLayout, EncoderDef, MidiConfig};

/// Number of encoders on the deck.
pub const ENCODER_COUNT: usize = 2;

/// Number of buttons on the deck.
pub const BUTTON_COUNT: usize = 1;

/// Position every encoder starts at and returns to on reset.
pub const DEFAULT_POSITION: f32 = 0.5;

/// The encoder table. Table order fixes both the controller numbers
/// (base + index) and the top-to-bottom order on the display.
///
/// The EC11 encoders have 24 detents per revolution and the quadrature
/// decoder yields four pulses per detent, so 96 pulses/rev with 4
/// pulses per step makes one detent move the value one step.
pub static ENCODERS: [EncoderDef; ENCODER_COUNT] = [
    EncoderDef {
        id: ControlId(10),
        pin_a: 20,
        pin_b: 21,
        pulses_per_rev: 96,
        range_degrees: 270,
        ticks_per_event: 4,
        invert: true,
    },
    EncoderDef {
        id: ControlId(11),
        pin_a: 18,
        pin_b: 19,
        pulses_per_rev: 96,
        range_degrees: 270,
        ticks_per_event: 4,
        invert: true,
    },
];

/// The button table. Wired to ground, so active low with the internal
/// pull-up enabled.
pub static BUTTONS: [ButtonDef; BUTTON_COUNT] = [ButtonDef {
    id: ControlId(100),
    pin: 16,
    active_low: true,
}];

/// The complete binding table handed to the binder.
pub static LAYOUT: ControlLayout = ControlLayout {
    encoders: &ENCODERS,
    buttons: &BUTTONS,
    default_position: DEFAULT_POSITION,
    reset_button: Some(ControlId(100)),
};

/// MIDI assignment: everything on channel 1 (wire channel 0), encoders
/// from CC 16, buttons from CC 20.
pub const MIDI_CONFIG: MidiConfig = MidiConfig {
    channel: 0,
    encoder_cc_base: 16,
    button_cc_base: 20,
};

/// Input poll rate. 2 kHz keeps worst-case quadrature edge spacing
/// well above the poll period.
pub const INPUT_POLL_HZ: u64 = 2000;

/// Button debounce window in milliseconds.
pub const DEBOUNCE_MS: u64 = 5;

/// Debounce window expressed in poll ticks.
pub const DEBOUNCE_POLLS: u8 = (DEBOUNCE_MS * INPUT_POLL_HZ / 1000) as u8;

/// Display refresh rate.
pub const DISPLAY_HZ: u64 = 50;

/// SPI clock for the TFT panel.
pub const DISPLAY_SPI_HZ: u32 = 40_000_000;

/// Title line on the surface.
pub const SURFACE_TITLE: &str = "Knobdeck";

/// Footer hint on the surface.
pub const SURFACE_FOOTER: &str = "Button: reset all";
