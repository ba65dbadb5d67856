//! Controller number assignment and value scaling.
//!
//! The map is materialized once at startup from [`MidiConfig`] and the
//! control counts, so every range and overlap problem surfaces before
//! the first event is handled. After that, lookups are infallible array
//! reads.

use heapless::Vec;

use crate::config::{ConfigError, ControlLayout, MidiConfig, MAX_CONTROLS};

/// Highest valid controller number and channel voice data value.
pub const CC_MAX: u8 = 127;

/// Data byte sent on button press.
pub const CC_ON: u8 = 127;

/// Data byte sent on button release.
pub const CC_OFF: u8 = 0;

/// Per-control controller numbers, resolved and checked.
#[derive(Debug, Clone)]
pub struct CcMap {
    channel: u8,
    encoder_cc: Vec<u8, MAX_CONTROLS>,
    button_cc: Vec<u8, MAX_CONTROLS>,
}

impl CcMap {
    /// Assign `base + index` controllers to every control in the layout.
    ///
    /// Fails if the channel is out of range, a table is larger than
    /// [`MAX_CONTROLS`], either range runs past controller 127, or the
    /// two ranges collide.
    pub fn new(layout: &ControlLayout, midi: &MidiConfig) -> Result<Self, ConfigError> {
        if midi.channel > 15 {
            return Err(ConfigError::ChannelOutOfRange {
                channel: midi.channel,
            });
        }

        let encoder_cc = Self::assign(midi.encoder_cc_base, layout.encoders.len())?;
        let button_cc = Self::assign(midi.button_cc_base, layout.buttons.len())?;

        for cc in &encoder_cc {
            if button_cc.contains(cc) {
                return Err(ConfigError::CcRangeOverlap { controller: *cc });
            }
        }

        Ok(Self {
            channel: midi.channel,
            encoder_cc,
            button_cc,
        })
    }

    fn assign(base: u8, count: usize) -> Result<Vec<u8, MAX_CONTROLS>, ConfigError> {
        if count > MAX_CONTROLS {
            return Err(ConfigError::TableTooLarge { count });
        }
        let mut ccs = Vec::new();
        for i in 0..count {
            let controller = base as u16 + i as u16;
            if controller > CC_MAX as u16 {
                return Err(ConfigError::CcOutOfRange { controller });
            }
            // Capacity was checked above, push cannot fail.
            let _ = ccs.push(controller as u8);
        }
        Ok(ccs)
    }

    /// MIDI channel all messages go out on.
    #[inline]
    #[must_use]
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Controller number of the encoder at `index` in the layout table.
    #[inline]
    #[must_use]
    pub fn encoder_cc(&self, index: usize) -> Option<u8> {
        self.encoder_cc.get(index).copied()
    }

    /// Controller number of the button at `index` in the layout table.
    #[inline]
    #[must_use]
    pub fn button_cc(&self, index: usize) -> Option<u8> {
        self.button_cc.get(index).copied()
    }
}

/// Scale a normalized position to a 7-bit data value, rounding half up.
///
/// Out-of-range input is clamped first; NaN maps to 0.
#[inline]
#[must_use]
pub fn normalized_to_cc(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 127.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ButtonDef, ControlId, EncoderDef};

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

    const fn button(id: u8) -> ButtonDef {
        ButtonDef {
            id: ControlId(id),
            pin: 2,
            active_low: true,
        }
    }

    static ENCODERS: [EncoderDef; 2] = [encoder(10), encoder(11)];
    static BUTTONS: [ButtonDef; 1] = [button(100)];

    static LAYOUT: ControlLayout = ControlLayout {
        encoders: &ENCODERS,
        buttons: &BUTTONS,
        default_position: 0.5,
        reset_button: Some(ControlId(100)),
    };

    const MIDI: MidiConfig = MidiConfig {
        channel: 0,
        encoder_cc_base: 16,
        button_cc_base: 20,
    };

    #[test]
    fn controllers_follow_table_order() {
        let map = CcMap::new(&LAYOUT, &MIDI).unwrap();
        assert_eq!(map.channel(), 0);
        assert_eq!(map.encoder_cc(0), Some(16));
        assert_eq!(map.encoder_cc(1), Some(17));
        assert_eq!(map.encoder_cc(2), None);
        assert_eq!(map.button_cc(0), Some(20));
        assert_eq!(map.button_cc(1), None);
    }

    #[test]
    fn channel_out_of_range_rejected() {
        let midi = MidiConfig { channel: 16, ..MIDI };
        assert_eq!(
            CcMap::new(&LAYOUT, &midi).unwrap_err(),
            ConfigError::ChannelOutOfRange { channel: 16 }
        );
    }

    #[test]
    fn oversized_table_rejected() {
        static BIG: [EncoderDef; MAX_CONTROLS + 1] = [encoder(0); MAX_CONTROLS + 1];
        let layout = ControlLayout {
            encoders: &BIG,
            ..LAYOUT
        };
        assert_eq!(
            CcMap::new(&layout, &MIDI).unwrap_err(),
            ConfigError::TableTooLarge {
                count: MAX_CONTROLS + 1
            }
        );
    }

    #[test]
    fn cc_range_past_127_rejected() {
        let midi = MidiConfig {
            encoder_cc_base: 127,
            ..MIDI
        };
        assert_eq!(
            CcMap::new(&LAYOUT, &midi).unwrap_err(),
            ConfigError::CcOutOfRange { controller: 128 }
        );
    }

    #[test]
    fn overlapping_ranges_rejected() {
        let midi = MidiConfig {
            encoder_cc_base: 19,
            button_cc_base: 20,
            ..MIDI
        };
        assert_eq!(
            CcMap::new(&LAYOUT, &midi).unwrap_err(),
            ConfigError::CcRangeOverlap { controller: 20 }
        );
    }

    #[test]
    fn adjacent_ranges_are_fine() {
        let midi = MidiConfig {
            encoder_cc_base: 18,
            button_cc_base: 20,
            ..MIDI
        };
        assert!(CcMap::new(&LAYOUT, &midi).is_ok());
    }

    #[test]
    fn scaling_rounds_half_up() {
        assert_eq!(normalized_to_cc(0.0), 0);
        assert_eq!(normalized_to_cc(0.5), 64);
        assert_eq!(normalized_to_cc(1.0), 127);
    }

    #[test]
    fn scaling_clamps_out_of_range() {
        assert_eq!(normalized_to_cc(-1.0), 0);
        assert_eq!(normalized_to_cc(2.0), 127);
        assert_eq!(normalized_to_cc(f32::NAN), 0);
    }

    #[test]
    fn scaling_is_monotonic() {
        let mut last = 0;
        for i in 0..=1000 {
            let cc = normalized_to_cc(i as f32 / 1000.0);
            assert!(cc >= last);
            last = cc;
        }
        assert_eq!(last, 127);
    }
}
