//! The shared surface and the binder's view onto it.
//!
//! The input task writes single fields through [`SurfaceView`]; the
//! display task copies whole snapshots out with [`snapshot`]. Both
//! sides hold the lock only for those moments, so the 2 kHz input
//! path never waits on a frame being drawn.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use knobdeck_core::ControlView;
use knobdeck_ui::SurfaceState;

use crate::config::{BUTTON_COUNT, ENCODER_COUNT};

/// Surface snapshot sized for this deck.
pub type DeckSurface = SurfaceState<ENCODER_COUNT, BUTTON_COUNT>;

/// Surface shared between the input task and the display task.
pub type SharedSurface = Mutex<CriticalSectionRawMutex, RefCell<DeckSurface>>;

/// Non-blocking [`ControlView`] implementation over the shared surface.
pub struct SurfaceView {
    surface: &'static SharedSurface,
}

impl SurfaceView {
    #[must_use]
    pub fn new(surface: &'static SharedSurface) -> Self {
        Self { surface }
    }
}

impl ControlView for SurfaceView {
    fn set_encoder(&mut self, index: usize, value: f32) {
        self.surface.lock(|s| s.borrow_mut().set_encoder(index, value));
    }

    fn set_button(&mut self, index: usize, pressed: bool) {
        self.surface.lock(|s| s.borrow_mut().set_button(index, pressed));
    }

    fn reset_encoder_positions(&mut self) {
        self.surface.lock(|s| s.borrow_mut().reset_encoders());
    }
}

/// Copy the current surface out from under the lock.
#[must_use]
pub fn snapshot(surface: &SharedSurface) -> DeckSurface {
    surface.lock(|s| *s.borrow())
}
