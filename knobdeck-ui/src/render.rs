//! Frame rendering.
//!
//! [`render_surface`] paints the whole screen; [`render_changes`]
//! repaints only the widgets a [`SurfaceChanges`] diff marks.
//! [`SurfaceRenderer`] sequences the two for the display task: full
//! frames until one has succeeded, dirty-widget repaints afterwards.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use crate::layout::SurfaceLayout;
use crate::state::{SurfaceChanges, SurfaceState};
use crate::theme;
use crate::widgets;

/// Draw a complete frame: background, title, every widget, footer.
pub fn render_surface<D, const NE: usize, const NB: usize>(
    display: &mut D,
    state: &SurfaceState<NE, NB>,
    layout: &SurfaceLayout,
    title: &str,
    footer: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(theme::BACKGROUND)?;

    Text::with_alignment(
        title,
        layout.title_origin(),
        theme::title_style(),
        Alignment::Center,
    )
    .draw(display)?;

    for (i, value) in state.encoders.iter().enumerate() {
        let mut label: String<16> = String::new();
        // core::fmt::Write, no alloc
        let _ = write!(label, "Encoder {}", i + 1);
        widgets::draw_slider(
            display,
            label.as_str(),
            layout.slider_label_origin(i),
            layout.slider_bar(i),
            layout.slider_radius,
            *value,
        )?;
    }

    for (i, pressed) in state.buttons.iter().enumerate() {
        widgets::draw_button_pad(display, layout.button_pad(i, NE), layout.button_radius, *pressed)?;
    }

    Text::with_alignment(
        footer,
        layout.footer_origin(),
        theme::footer_style(),
        Alignment::Center,
    )
    .draw(display)?;

    Ok(())
}

/// Repaint only the widgets `changes` marks; labels, title, and footer
/// stay as drawn.
pub fn render_changes<D, const NE: usize, const NB: usize>(
    display: &mut D,
    state: &SurfaceState<NE, NB>,
    changes: &SurfaceChanges<NE, NB>,
    layout: &SurfaceLayout,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    for (i, changed) in changes.encoders.iter().enumerate() {
        if *changed {
            widgets::draw_slider_bar(
                display,
                layout.slider_bar(i),
                layout.slider_radius,
                state.encoders[i],
            )?;
        }
    }

    for (i, changed) in changes.buttons.iter().enumerate() {
        if *changed {
            widgets::draw_button_pad(
                display,
                layout.button_pad(i, NE),
                layout.button_radius,
                state.buttons[i],
            )?;
        }
    }

    Ok(())
}

/// Keeps a panel in step with successive [`SurfaceState`] snapshots.
///
/// The static chrome (title, labels, footer) only exists on screen once
/// a full frame has been drawn, so every call retries the full frame
/// until one succeeds. After that, calls repaint just the widgets that
/// changed since the last successful draw.
#[derive(Debug)]
pub struct SurfaceRenderer<const NE: usize, const NB: usize> {
    layout: SurfaceLayout,
    last: SurfaceState<NE, NB>,
    chrome_drawn: bool,
}

impl<const NE: usize, const NB: usize> SurfaceRenderer<NE, NB> {
    /// Renderer that has not painted anything yet.
    #[must_use]
    pub fn new(layout: SurfaceLayout, initial: SurfaceState<NE, NB>) -> Self {
        Self {
            layout,
            last: initial,
            chrome_drawn: false,
        }
    }

    /// Bring the panel up to date with `current`.
    ///
    /// A failed draw leaves the pending state in place; the next call
    /// retries the same work.
    pub fn render<D>(
        &mut self,
        display: &mut D,
        current: &SurfaceState<NE, NB>,
        title: &str,
        footer: &str,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.chrome_drawn {
            render_surface(display, current, &self.layout, title, footer)?;
            self.chrome_drawn = true;
            self.last = *current;
            return Ok(());
        }

        let changes = SurfaceChanges::detect(&self.last, current);
        if !changes.any_changed() {
            return Ok(());
        }
        render_changes(display, current, &changes, &self.layout)?;
        self.last = *current;
        Ok(())
    }
}
