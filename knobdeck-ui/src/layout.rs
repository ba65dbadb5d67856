//! Surface geometry.
//!
//! All layout numbers live in [`SurfaceLayout`]; the widget and render
//! code reads them from here instead of module-level constants, so the
//! firmware can retune the surface for a different panel without
//! touching library source. [`SurfaceLayout::default()`] fits a
//! 320x240 landscape panel.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Geometry of the control surface.
///
/// Sliders stack top to bottom, one row per encoder; button pads sit
/// in a row below the last slider; title and footer are centered at
/// the top and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceLayout {
    /// Panel width in pixels. Default: 320.
    pub width: u32,
    /// Panel height in pixels. Default: 240.
    pub height: u32,
    /// Left and right inset for widgets. Default: 16.
    pub margin: i32,
    /// Baseline of the centered title. Default: 18.
    pub title_y: i32,
    /// Label baseline of the first slider row. Default: 44.
    pub slider_top: i32,
    /// Vertical distance between slider rows. Default: 56.
    pub slider_pitch: i32,
    /// Gap from a row's label baseline to its bar. Default: 8.
    pub slider_label_gap: i32,
    /// Bar height. Default: 32.
    pub slider_height: u32,
    /// Bar corner radius. Default: 4.
    pub slider_radius: u32,
    /// Button pad size. Default: 60x40.
    pub button_width: u32,
    pub button_height: u32,
    /// Button pad corner radius. Default: 6.
    pub button_radius: u32,
    /// Horizontal gap between button pads. Default: 12.
    pub button_gap: i32,
    /// Baseline of the centered footer hint. Default: 232.
    pub footer_y: i32,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            margin: 16,
            title_y: 18,
            slider_top: 44,
            slider_pitch: 56,
            slider_label_gap: 8,
            slider_height: 32,
            slider_radius: 4,
            button_width: 60,
            button_height: 40,
            button_radius: 6,
            button_gap: 12,
            footer_y: 232,
        }
    }
}

impl SurfaceLayout {
    /// Anchor point of the centered title.
    #[must_use]
    pub fn title_origin(&self) -> Point {
        Point::new(self.width as i32 / 2, self.title_y)
    }

    /// Anchor point of the centered footer hint.
    #[must_use]
    pub fn footer_origin(&self) -> Point {
        Point::new(self.width as i32 / 2, self.footer_y)
    }

    /// Label baseline of the slider row at `index`.
    #[must_use]
    pub fn slider_label_origin(&self, index: usize) -> Point {
        Point::new(self.margin, self.slider_top + self.slider_pitch * index as i32)
    }

    /// Bar rectangle of the slider row at `index`.
    #[must_use]
    pub fn slider_bar(&self, index: usize) -> Rectangle {
        let label = self.slider_label_origin(index);
        Rectangle::new(
            Point::new(self.margin, label.y + self.slider_label_gap),
            Size::new(self.bar_width(), self.slider_height),
        )
    }

    /// Usable bar width inside the margins.
    #[must_use]
    pub fn bar_width(&self) -> u32 {
        self.width.saturating_sub(2 * self.margin as u32)
    }

    /// Pad rectangle of the button at `index`, in the row below
    /// `encoder_count` slider rows.
    #[must_use]
    pub fn button_pad(&self, index: usize, encoder_count: usize) -> Rectangle {
        let x = self.margin
            + index as i32 * (self.button_width as i32 + self.button_gap);
        let y = self.slider_top + self.slider_pitch * encoder_count as i32;
        Rectangle::new(
            Point::new(x, y),
            Size::new(self.button_width, self.button_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry() {
        let l = SurfaceLayout::default();
        assert_eq!(l.width, 320);
        assert_eq!(l.height, 240);
        assert_eq!(l.bar_width(), 288);
        assert_eq!(l.title_origin(), Point::new(160, 18));
        assert_eq!(l.footer_origin(), Point::new(160, 232));
    }

    #[test]
    fn slider_rows_stack_by_pitch() {
        let l = SurfaceLayout::default();
        assert_eq!(l.slider_label_origin(0), Point::new(16, 44));
        assert_eq!(l.slider_label_origin(1), Point::new(16, 100));
        assert_eq!(l.slider_bar(0).top_left, Point::new(16, 52));
        assert_eq!(l.slider_bar(1).top_left, Point::new(16, 108));
        assert_eq!(l.slider_bar(0).size, Size::new(288, 32));
    }

    #[test]
    fn rows_do_not_overlap() {
        let l = SurfaceLayout::default();
        let bar_bottom = l.slider_bar(0).top_left.y + l.slider_height as i32;
        assert!(bar_bottom <= l.slider_label_origin(1).y);
    }

    #[test]
    fn buttons_sit_below_sliders() {
        let l = SurfaceLayout::default();
        let pad = l.button_pad(0, 2);
        assert_eq!(pad.top_left, Point::new(16, 156));
        assert_eq!(pad.size, Size::new(60, 40));

        let second = l.button_pad(1, 2);
        assert_eq!(second.top_left.x, 16 + 60 + 12);

        // The pad row and footer both fit on the panel.
        assert!(pad.top_left.y + l.button_height as i32 <= l.footer_y);
        assert!(l.footer_y < l.height as i32);
    }
}
