//! Wires control events to MIDI output and the display.
//!
//! The binder is the only component that knows all three seams. It owns
//! no hardware and performs no I/O of its own; everything it does is a
//! synchronous fan-out to the collaborators handed to it at startup, so
//! it is safe to call from the input polling path.

use midi_types::{Channel, Control, Value7};

use crate::config::{ConfigError, ControlId, ControlLayout, MidiConfig};
use crate::event::ControlEvent;
use crate::input::EncoderDriver;
use crate::mapping::{normalized_to_cc, CcMap, CC_OFF, CC_ON};
use crate::midi::MidiOut;
use crate::view::ControlView;

/// Dispatches [`ControlEvent`]s to the MIDI sink, the view, and the
/// encoder driver.
///
/// Construction is binding: [`InputBinder::new`] validates the layout
/// and resolves the controller map, and either returns a binder with
/// every control wired or refuses to produce one at all.
pub struct InputBinder<M, V, E> {
    layout: &'static ControlLayout,
    map: CcMap,
    midi: M,
    view: V,
    encoders: E,
}

impl<M, V, E> InputBinder<M, V, E>
where
    M: MidiOut,
    V: ControlView,
    E: EncoderDriver,
{
    /// Validate the configuration and bind the collaborators.
    ///
    /// Any [`ConfigError`] here is fatal; callers are expected to halt
    /// startup rather than continue with unbound controls.
    pub fn new(
        layout: &'static ControlLayout,
        midi_config: &MidiConfig,
        midi: M,
        view: V,
        encoders: E,
    ) -> Result<Self, ConfigError> {
        layout.validate()?;
        let map = CcMap::new(layout, midi_config)?;
        Ok(Self {
            layout,
            map,
            midi,
            view,
            encoders,
        })
    }

    /// Dispatch one event. Never blocks.
    ///
    /// Events naming a control absent from the layout are dropped with
    /// a warning; they indicate a wiring bug in the input glue.
    pub fn handle(&mut self, event: ControlEvent) {
        let resolved = match event {
            ControlEvent::Turned { id, value } => self.on_turned(id, value),
            ControlEvent::Pressed { id } => self.on_pressed(id),
            ControlEvent::Released { id } => self.on_released(id),
        };
        if resolved.is_none() {
            warn_unknown(event.id());
        }
    }

    fn on_turned(&mut self, id: ControlId, value: f32) -> Option<()> {
        let index = self.layout.encoder_index(id)?;
        // The map is built from the same table as the layout, so an
        // index that resolved above cannot miss here.
        if let Some(controller) = self.map.encoder_cc(index) {
            self.send_cc(controller, normalized_to_cc(value));
        }
        self.view.set_encoder(index, value);
        Some(())
    }

    fn on_pressed(&mut self, id: ControlId) -> Option<()> {
        let index = self.layout.button_index(id)?;
        if let Some(controller) = self.map.button_cc(index) {
            self.send_cc(controller, CC_ON);
        }
        self.view.set_button(index, true);
        if self.layout.reset_button == Some(id) {
            self.reset_all_encoders();
        }
        Some(())
    }

    fn on_released(&mut self, id: ControlId) -> Option<()> {
        let index = self.layout.button_index(id)?;
        if let Some(controller) = self.map.button_cc(index) {
            self.send_cc(controller, CC_OFF);
        }
        self.view.set_button(index, false);
        Some(())
    }

    /// Synchronize every encoder to the default position, hardware
    /// first, then the view.
    ///
    /// The order is a contract: the display must not show the default
    /// until the trackers already hold it, or a poll between the two
    /// would ghost the old position back onto the screen.
    fn reset_all_encoders(&mut self) {
        for def in self.layout.encoders {
            self.encoders.set_position(def.id, self.layout.default_position);
        }
        self.view.reset_encoder_positions();
    }

    fn send_cc(&mut self, controller: u8, value: u8) {
        self.midi.send_cc(
            Channel::new(self.map.channel()),
            Control::new(controller),
            Value7::new(value),
        );
    }

    /// The resolved controller map.
    #[must_use]
    pub fn cc_map(&self) -> &CcMap {
        &self.map
    }
}

#[cfg(feature = "defmt")]
fn warn_unknown(id: ControlId) {
    defmt::warn!("event for unknown control {}, dropped", id);
}

#[cfg(not(feature = "defmt"))]
fn warn_unknown(_id: ControlId) {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    use super::*;
    use crate::config::{ButtonDef, EncoderDef};

    /// Everything the binder did, in call order.
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Cc { controller: u8, value: u8 },
        SetEncoder { index: usize, value: f32 },
        SetButton { index: usize, pressed: bool },
        ResetView,
        SetPosition { id: ControlId, value: f32 },
    }

    type Log = Arc<Mutex<Vec<Call>>>;

    struct MockMidi(Log);

    impl MidiOut for MockMidi {
        fn send_cc(&mut self, channel: Channel, controller: Control, value: Value7) {
            assert_eq!(channel, Channel::new(0));
            self.0.lock().unwrap().push(Call::Cc {
                controller: u8::from(controller),
                value: u8::from(value),
            });
        }
    }

    struct MockView(Log);

    impl ControlView for MockView {
        fn set_encoder(&mut self, index: usize, value: f32) {
            self.0.lock().unwrap().push(Call::SetEncoder { index, value });
        }

        fn set_button(&mut self, index: usize, pressed: bool) {
            self.0.lock().unwrap().push(Call::SetButton { index, pressed });
        }

        fn reset_encoder_positions(&mut self) {
            self.0.lock().unwrap().push(Call::ResetView);
        }
    }

    struct MockEncoders(Log);

    impl EncoderDriver for MockEncoders {
        fn set_position(&mut self, id: ControlId, value: f32) {
            self.0.lock().unwrap().push(Call::SetPosition { id, value });
        }
    }

    const fn encoder(id: u8) -> EncoderDef {
        EncoderDef {
            id: ControlId(id),
            pin_a: 0,
            pin_b: 1,
            pulses_per_rev: 24,
            range_degrees: 270,
            ticks_per_event: 1,
            invert: false,
        }
    }

    static ENCODERS: [EncoderDef; 2] = [encoder(10), encoder(11)];
    static BUTTONS: [ButtonDef; 1] = [ButtonDef {
        id: ControlId(100),
        pin: 2,
        active_low: true,
    }];

    static LAYOUT: ControlLayout = ControlLayout {
        encoders: &ENCODERS,
        buttons: &BUTTONS,
        default_position: 0.5,
        reset_button: Some(ControlId(100)),
    };

    static NO_RESET_LAYOUT: ControlLayout = ControlLayout {
        encoders: &ENCODERS,
        buttons: &BUTTONS,
        default_position: 0.5,
        reset_button: None,
    };

    const MIDI: MidiConfig = MidiConfig {
        channel: 0,
        encoder_cc_base: 60,
        button_cc_base: 10,
    };

    fn binder(
        layout: &'static ControlLayout,
    ) -> (InputBinder<MockMidi, MockView, MockEncoders>, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let binder = InputBinder::new(
            layout,
            &MIDI,
            MockMidi(log.clone()),
            MockView(log.clone()),
            MockEncoders(log.clone()),
        )
        .unwrap();
        (binder, log)
    }

    fn calls(log: &Log) -> Vec<Call> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn turn_sends_scaled_cc_then_updates_view() {
        let (mut binder, log) = binder(&LAYOUT);

        binder.handle(ControlEvent::Turned {
            id: ControlId(10),
            value: 0.5,
        });
        binder.handle(ControlEvent::Turned {
            id: ControlId(11),
            value: 1.0,
        });

        assert_eq!(
            calls(&log),
            [
                Call::Cc {
                    controller: 60,
                    value: 64,
                },
                Call::SetEncoder {
                    index: 0,
                    value: 0.5,
                },
                Call::Cc {
                    controller: 61,
                    value: 127,
                },
                Call::SetEncoder {
                    index: 1,
                    value: 1.0,
                },
            ]
        );
    }

    #[test]
    fn press_sends_full_value_and_runs_reset() {
        let (mut binder, log) = binder(&LAYOUT);

        binder.handle(ControlEvent::Pressed { id: ControlId(100) });

        assert_eq!(
            calls(&log),
            [
                Call::Cc {
                    controller: 10,
                    value: 127,
                },
                Call::SetButton {
                    index: 0,
                    pressed: true,
                },
                Call::SetPosition {
                    id: ControlId(10),
                    value: 0.5,
                },
                Call::SetPosition {
                    id: ControlId(11),
                    value: 0.5,
                },
                Call::ResetView,
            ]
        );
    }

    #[test]
    fn release_sends_zero_and_no_reset() {
        let (mut binder, log) = binder(&LAYOUT);

        binder.handle(ControlEvent::Released { id: ControlId(100) });

        assert_eq!(
            calls(&log),
            [
                Call::Cc {
                    controller: 10,
                    value: 0,
                },
                Call::SetButton {
                    index: 0,
                    pressed: false,
                },
            ]
        );
    }

    #[test]
    fn reset_syncs_hardware_before_view_every_time() {
        let (mut binder, log) = binder(&LAYOUT);

        binder.handle(ControlEvent::Pressed { id: ControlId(100) });
        binder.handle(ControlEvent::Released { id: ControlId(100) });
        binder.handle(ControlEvent::Pressed { id: ControlId(100) });

        let calls = calls(&log);
        let reset_positions: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (*c == Call::ResetView).then_some(i))
            .collect();
        assert_eq!(reset_positions.len(), 2);
        for at in reset_positions {
            // Both hardware syncs land immediately before the view reset.
            assert_eq!(
                calls[at - 2..at],
                [
                    Call::SetPosition {
                        id: ControlId(10),
                        value: 0.5,
                    },
                    Call::SetPosition {
                        id: ControlId(11),
                        value: 0.5,
                    },
                ]
            );
        }
    }

    #[test]
    fn reset_sends_no_encoder_cc() {
        let (mut binder, log) = binder(&LAYOUT);

        binder.handle(ControlEvent::Pressed { id: ControlId(100) });

        let encoder_cc: Vec<Call> = calls(&log)
            .into_iter()
            .filter(|c| matches!(c, Call::Cc { controller: 60..=61, .. }))
            .collect();
        assert!(encoder_cc.is_empty());
    }

    #[test]
    fn non_reset_button_does_not_reset() {
        let (mut binder, log) = binder(&NO_RESET_LAYOUT);

        binder.handle(ControlEvent::Pressed { id: ControlId(100) });

        assert!(!calls(&log).contains(&Call::ResetView));
    }

    #[test]
    fn unknown_id_is_dropped() {
        let (mut binder, log) = binder(&LAYOUT);

        binder.handle(ControlEvent::Turned {
            id: ControlId(99),
            value: 0.5,
        });
        binder.handle(ControlEvent::Pressed { id: ControlId(99) });
        binder.handle(ControlEvent::Released { id: ControlId(99) });

        assert!(calls(&log).is_empty());
    }

    #[test]
    fn construction_rejects_bad_midi_config() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let bad = MidiConfig { channel: 16, ..MIDI };
        let result = InputBinder::new(
            &LAYOUT,
            &bad,
            MockMidi(log.clone()),
            MockView(log.clone()),
            MockEncoders(log.clone()),
        );
        assert_eq!(
            result.err(),
            Some(ConfigError::ChannelOutOfRange { channel: 16 })
        );
    }

    #[test]
    fn construction_rejects_bad_layout() {
        static BAD_RESET: ControlLayout = ControlLayout {
            encoders: &ENCODERS,
            buttons: &BUTTONS,
            default_position: 0.5,
            reset_button: Some(ControlId(7)),
        };
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let result = InputBinder::new(
            &BAD_RESET,
            &MIDI,
            MockMidi(log.clone()),
            MockView(log.clone()),
            MockEncoders(log.clone()),
        );
        assert_eq!(
            result.err(),
            Some(ConfigError::UnknownResetButton { id: ControlId(7) })
        );
    }

    #[test]
    fn cc_map_is_exposed_for_diagnostics() {
        let (binder, _log) = binder(&LAYOUT);
        assert_eq!(binder.cc_map().encoder_cc(0), Some(60));
        assert_eq!(binder.cc_map().button_cc(0), Some(10));
    }
}
