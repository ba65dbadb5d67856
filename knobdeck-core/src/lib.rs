//! Platform-agnostic control surface logic for a MIDI knob deck.
//!
//! This crate holds everything that does not touch hardware: the
//! configuration tables, their startup validation, the controller
//! number assignment, position tracking, and the binder that fans
//! control events out to MIDI and the display. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Control descriptors and validation ([`ControlLayout`], [`ConfigError`])
//! - [`mapping`]: Controller assignment and value scaling ([`CcMap`], [`normalized_to_cc`])
//! - [`event`]: Decoded input events ([`ControlEvent`])
//! - [`position`]: Pulse to position accumulation ([`PositionTracker`])
//! - [`binder`]: Event dispatch ([`InputBinder`])
//! - [`midi`], [`view`], [`input`]: The traits the firmware implements
//!   ([`MidiOut`], [`ControlView`], [`EncoderDriver`])
//!
//! # Event flow
//!
//! The firmware polls the hardware, turns raw edges into
//! [`ControlEvent`]s, and hands each one to [`InputBinder::handle`].
//! The binder sends the matching control change message and mirrors
//! the change on the view. Binding is established once at startup;
//! [`InputBinder::new`] refuses to construct on any configuration
//! error, so a running binder always has every control wired.
//!
//! # Example
//!
//! ```rust
//! use knobdeck_core::normalized_to_cc;
//!
//! // Normalized positions scale to 7-bit values, rounding half up
//! assert_eq!(normalized_to_cc(0.0), 0);
//! assert_eq!(normalized_to_cc(0.5), 64);
//! assert_eq!(normalized_to_cc(1.0), 127);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod binder;
pub mod config;
pub mod event;
pub mod input;
pub mod mapping;
pub mod midi;
pub mod position;
pub mod view;

// Re-export main types at crate root
pub use binder::InputBinder;
pub use config::{
    ButtonDef, ConfigError, ControlId, ControlLayout, EncoderDef, MidiConfig, MAX_CONTROLS,
};
pub use event::ControlEvent;
pub use input::EncoderDriver;
pub use mapping::{normalized_to_cc, CcMap, CC_MAX, CC_OFF, CC_ON};
pub use midi::MidiOut;
pub use position::PositionTracker;
pub use view::ControlView;
