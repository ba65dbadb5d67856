//! Control surface rendering for the knob deck display.
//!
//! Pure drawing logic on top of `embedded-graphics`: a fixed-size
//! [`SurfaceState`] snapshot, a [`SurfaceChanges`] diff to keep
//! repaints cheap, and render functions generic over any `DrawTarget`
//! with `Rgb565` color. No driver code lives here; the firmware owns
//! the panel and hands a draw target in.
//!
//! # Overview
//!
//! - [`state`]: Snapshot and diff types ([`SurfaceState`], [`SurfaceChanges`])
//! - [`layout`]: Surface geometry ([`SurfaceLayout`])
//! - [`theme`]: Colors and text styles
//! - [`widgets`]: Slider and button pad drawing
//! - [`render`]: Full frame and partial repaint ([`render_surface`], [`render_changes`], [`SurfaceRenderer`])
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod layout;
pub mod render;
pub mod state;
pub mod theme;
pub mod widgets;

// Re-export main types at crate root
pub use layout::SurfaceLayout;
pub use render::{render_changes, render_surface, SurfaceRenderer};
pub use state::{SurfaceChanges, SurfaceState};
