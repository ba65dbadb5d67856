//! Surface colors and text styles.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;

/// Convert an RGB888 triplet to `Rgb565` at compile time.
const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Screen background.
pub const BACKGROUND: Rgb565 = rgb(0x00, 0x00, 0x00);

/// Title text at the top of the surface.
pub const TITLE: Rgb565 = rgb(0xFF, 0xFF, 0xFF);

/// Slider track behind the fill.
pub const SLIDER_TRACK: Rgb565 = rgb(0x33, 0x33, 0x55);

/// Filled portion of a slider.
pub const SLIDER_FILL: Rgb565 = rgb(0x66, 0x66, 0xFF);

/// Widget labels.
pub const LABEL: Rgb565 = rgb(0xAA, 0xAA, 0xAA);

/// Button pad while released.
pub const BUTTON_IDLE: Rgb565 = rgb(0x33, 0x33, 0x55);

/// Button pad while pressed.
pub const BUTTON_ACTIVE: Rgb565 = rgb(0x66, 0x66, 0xFF);

/// Footer hint text at the bottom of the surface.
pub const FOOTER: Rgb565 = rgb(0x55, 0x55, 0x55);

/// Character style for the title line.
#[must_use]
pub fn title_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_6X10, TITLE)
}

/// Character style for widget labels.
#[must_use]
pub fn label_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_6X10, LABEL)
}

/// Character style for the footer hint.
#[must_use]
pub fn footer_style() -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_6X10, FOOTER)
}
