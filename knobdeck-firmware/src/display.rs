//! TFT panel bring-up over SPI.
//!
//! The panel is an ILI9341 on SPI1, driven through a blocking
//! exclusive-bus device. Rendering itself lives in `knobdeck-ui`; this
//! module only produces an initialized [`Tft`] draw target.

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::{Builder, Display};

/// The concrete display type the render task draws into.
pub type Tft = Display<
    SPIInterface<ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>, Output<'static>>,
    ILI9341Rgb565,
    Output<'static>,
>;

/// Initialize the panel, landscape with the pin header on the left.
///
/// Panics if the controller does not answer the init sequence.
pub fn init_tft(
    spi: Spi<'static, SPI1, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
) -> Tft {
    let device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let di = SPIInterface::new(device, dc);
    match Builder::new(ILI9341Rgb565, di)
        .reset_pin(rst)
        .display_size(240, 320)
        .orientation(Orientation::new().rotate(Rotation::Deg270))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut Delay)
    {
        Ok(display) => display,
        Err(_) => defmt::panic!("TFT init failed"),
    }
}
