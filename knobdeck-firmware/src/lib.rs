//! USB MIDI control surface firmware for RP2040.
//!
//! This crate is the embedded half of the knobdeck control surface: a
//! pair of rotary encoders and a reset button that show up on the host
//! as a class-compliant USB MIDI device, with a TFT panel mirroring
//! every control.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Polls the encoder and button GPIOs at 2 kHz
//! 2. Maps each control change to a MIDI Control Change message
//! 3. Sends the messages over a USB MIDI streaming endpoint
//! 4. Redraws changed widgets on the TFT at up to 50 Hz
//!
//! # Hardware Configuration
//!
//! | Function       | GPIO | Description                      |
//! |----------------|------|----------------------------------|
//! | Encoder 1 A/B  | 20/21 | Left encoder quadrature         |
//! | Encoder 2 A/B  | 18/19 | Right encoder quadrature        |
//! | Reset button   | 16   | Active low, internal pull-up     |
//! | SPI1 SCK       | 10   | Display clock                    |
//! | SPI1 MOSI      | 11   | Display data                     |
//! | SPI1 MISO      | 12   | Unused by the panel, claimed by SPI1 |
//! | Display CS     | 13   | Chip select                      |
//! | Display DC     | 14   | Data/command select              |
//! | Display RST    | 15   | Panel reset                      |
//! | LED            | 25   | On-board LED (error indicator)   |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with four concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Input Task**: Polls GPIOs, decodes quadrature, runs the binder
//! - **MIDI Task**: Drains the message queue into the USB endpoint
//! - **Display Task**: Snapshots the surface state and redraws changes
//!
//! The input task pushes into a bounded
//! [`Channel`](embassy_sync::channel::Channel) and never waits on USB;
//! the display task reads a shared snapshot of the surface state, so a
//! slow SPI transfer never stalls input handling.
//!
//! # Modules
//!
//! - [`config`]: Control layout, MIDI assignment, and timing constants
//! - [`display`]: TFT bring-up ([`Tft`], [`init_tft`])
//! - [`input`]: GPIO polling and debouncing ([`InputPoller`], [`TrackerBank`])
//! - [`midi`]: USB MIDI queue and sender ([`QueueMidiOut`], [`MidiSender`])
//! - [`view`]: Shared surface state behind the binder's view trait ([`SurfaceView`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items from [`knobdeck_core`] for
//! convenience, so the binary only needs to depend on this crate.

#![no_std]

// Ensure mutually exclusive panic handler features
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they define conflicting panic handlers");

// Re-export core types for convenience
pub use knobdeck_core::{
    normalized_to_cc, ButtonDef, CcMap, ConfigError, ControlEvent, ControlId, ControlLayout,
    ControlView, EncoderDef, EncoderDriver, InputBinder, MidiConfig, MidiOut, PositionTracker,
    CC_MAX, CC_OFF, CC_ON, MAX_CONTROLS,
};

pub mod config;
pub mod display;
pub mod input;
pub mod midi;
pub mod view;

pub use display::{init_tft, Tft};
pub use input::{DebouncedButton, DeckBinder, InputPoller, TrackerBank, TrackerDriver};
pub use midi::{configure_usb_midi, MidiQueue, MidiSender, QueueMidiOut, MIDI_QUEUE_DEPTH};
pub use view::{snapshot, DeckSurface, SharedSurface, SurfaceView};
