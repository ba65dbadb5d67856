//! Widget drawing primitives.
//!
//! Each function draws one widget into any `DrawTarget` and is
//! idempotent: redrawing a widget fully covers its previous pixels, so
//! partial updates never need an explicit erase.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;

use crate::theme;

/// Width of the filled portion of a bar, rounding half up.
///
/// NaN maps to 0; out-of-range values clamp to the bar ends.
#[must_use]
pub fn fill_width(bar_width: u32, value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * bar_width as f32 + 0.5) as u32
}

/// Slider row: label text above a track with a proportional fill.
pub fn draw_slider<D>(
    display: &mut D,
    label: &str,
    label_origin: Point,
    bar: Rectangle,
    radius: u32,
    value: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::new(label, label_origin, theme::label_style()).draw(display)?;
    draw_slider_bar(display, bar, radius, value)
}

/// Track and fill only, label untouched. Used for partial redraw while
/// an encoder is moving.
pub fn draw_slider_bar<D>(
    display: &mut D,
    bar: Rectangle,
    radius: u32,
    value: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let corners = Size::new(radius, radius);

    RoundedRectangle::with_equal_corners(bar, corners)
        .into_styled(PrimitiveStyle::with_fill(theme::SLIDER_TRACK))
        .draw(display)?;

    let width = fill_width(bar.size.width, value);
    if width > 0 {
        let fill = Rectangle::new(bar.top_left, Size::new(width, bar.size.height));
        RoundedRectangle::with_equal_corners(fill, corners)
            .into_styled(PrimitiveStyle::with_fill(theme::SLIDER_FILL))
            .draw(display)?;
    }

    Ok(())
}

/// Button pad, lit with the active color while pressed.
pub fn draw_button_pad<D>(
    display: &mut D,
    pad: Rectangle,
    radius: u32,
    pressed: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let color = if pressed {
        theme::BUTTON_ACTIVE
    } else {
        theme::BUTTON_IDLE
    };
    RoundedRectangle::with_equal_corners(pad, Size::new(radius, radius))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_width_covers_the_range() {
        assert_eq!(fill_width(288, 0.0), 0);
        assert_eq!(fill_width(288, 0.5), 144);
        assert_eq!(fill_width(288, 1.0), 288);
    }

    #[test]
    fn fill_width_clamps_bad_input() {
        assert_eq!(fill_width(288, -1.0), 0);
        assert_eq!(fill_width(288, 2.0), 288);
        assert_eq!(fill_width(288, f32::NAN), 0);
    }

    #[test]
    fn fill_width_rounds_to_nearest_pixel() {
        assert_eq!(fill_width(288, 0.25), 72);
        assert_eq!(fill_width(100, 0.006), 1);
        assert_eq!(fill_width(100, 0.004), 0);
    }
}
