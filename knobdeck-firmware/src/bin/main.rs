#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embassy_usb::{Builder, Config as UsbConfig};
use knobdeck_firmware::config::{
    BUTTONS, DEFAULT_POSITION, DISPLAY_HZ, DISPLAY_SPI_HZ, INPUT_POLL_HZ, LAYOUT, MIDI_CONFIG,
    SURFACE_FOOTER, SURFACE_TITLE,
};
use knobdeck_firmware::{
    configure_usb_midi, init_tft, snapshot, DebouncedButton, DeckBinder, InputBinder, InputPoller,
    MidiQueue, MidiSender, QueueMidiOut, SharedSurface, SurfaceView, Tft, TrackerBank,
    TrackerDriver,
};
use knobdeck_ui::{SurfaceLayout, SurfaceRenderer, SurfaceState};
use rotary_encoder_hal::Rotary;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Surface state shared between the input task and the display task.
static SURFACE: SharedSurface = Mutex::new(RefCell::new(SurfaceState::new(DEFAULT_POSITION)));

/// Queue from the input task to the USB MIDI sender.
static MIDI_QUEUE: MidiQueue = MidiQueue::new();

/// Encoder position trackers, shared between polling and the binder's
/// reset path.
static TRACKER_BANK: StaticCell<TrackerBank> = StaticCell::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Knobdeck starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let bank: &'static TrackerBank = TRACKER_BANK.init(TrackerBank::new(&LAYOUT, DEFAULT_POSITION));

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Knobdeck");
    usb_config.product = Some("Knobdeck MIDI Surface");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;
    // Composite device with IADs, required for the audio/MIDI function
    // pair to enumerate on Windows
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure MIDI class
    let midi_class = configure_usb_midi(&mut builder);

    // Build the USB device
    let usb_device = builder.build();

    let sender = MidiSender::new(midi_class, &MIDI_QUEUE);

    // --- Input Binder ---
    // Validates the control tables; refuse to start on a bad config.
    let binder = match InputBinder::new(
        &LAYOUT,
        &MIDI_CONFIG,
        QueueMidiOut::new(&MIDI_QUEUE),
        SurfaceView::new(&SURFACE),
        TrackerDriver::new(bank),
    ) {
        Ok(binder) => binder,
        Err(e) => defmt::panic!("invalid control configuration: {}", e),
    };

    // --- Input Pins ---
    // Wiring must match the pin numbers in config::ENCODERS/BUTTONS.
    let rotaries = [
        Rotary::new(
            Input::new(p.PIN_20, Pull::Up),
            Input::new(p.PIN_21, Pull::Up),
        ),
        Rotary::new(
            Input::new(p.PIN_18, Pull::Up),
            Input::new(p.PIN_19, Pull::Up),
        ),
    ];
    let buttons = [DebouncedButton::new(
        Input::new(p.PIN_16, Pull::Up),
        &BUTTONS[0],
    )];
    let poller = InputPoller::new(bank, rotaries, buttons);

    // --- Display Setup ---
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = DISPLAY_SPI_HZ;
    let spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, spi_config);
    let cs = Output::new(p.PIN_13, Level::High);
    let dc = Output::new(p.PIN_14, Level::Low);
    let rst = Output::new(p.PIN_15, Level::Low);
    let tft = init_tft(spi, cs, dc, rst);

    // Optional: LED for error indication (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the spawn Result)
    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(midi_task(sender)).unwrap();
    spawner.spawn(input_task(poller, binder)).unwrap();
    spawner.spawn(display_task(tft, &SURFACE, led)).unwrap();

    info!("Knobdeck initialized, controls live");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// MIDI task - drains the message queue into the USB MIDI endpoint.
#[embassy_executor::task]
async fn midi_task(mut sender: MidiSender) {
    sender.run().await;
}

/// Input task - polls every control and runs the binder.
#[embassy_executor::task]
async fn input_task(mut poller: InputPoller, mut binder: DeckBinder) {
    let mut ticker = Ticker::every(Duration::from_hz(INPUT_POLL_HZ));
    loop {
        poller.poll(&mut binder);
        ticker.next().await;
    }
}

/// Display task - full frame first, then redraws changed widgets.
#[embassy_executor::task]
async fn display_task(mut tft: Tft, surface: &'static SharedSurface, mut led: Output<'static>) {
    let mut renderer = SurfaceRenderer::new(SurfaceLayout::default(), snapshot(surface));
    let mut ticker = Ticker::every(Duration::from_hz(DISPLAY_HZ));
    loop {
        let current = snapshot(surface);
        if renderer
            .render(&mut tft, &current, SURFACE_TITLE, SURFACE_FOOTER)
            .is_err()
        {
            error!("display render failed");
            led.toggle();
        }
        ticker.next().await;
    }
}
