//! Control descriptors, the binding table, and startup validation.

/// Maximum number of controls of one variant the CC map can hold.
pub const MAX_CONTROLS: usize = 16;

/// Stable identifier for one physical control.
///
/// Unique within its variant (encoder ids and button ids are separate
/// namespaces) and used as the key between the input glue and the binder.
/// Immutable after configuration load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlId(pub u8);

/// Static description of one quadrature encoder.
///
/// The pin and scaling fields are consumed by the input glue and the
/// position tracker; the binder never interprets them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderDef {
    /// Stable identifier, unique among encoders.
    pub id: ControlId,
    /// GPIO number of quadrature phase A.
    pub pin_a: u8,
    /// GPIO number of quadrature phase B.
    pub pin_b: u8,
    /// Decoder pulses per full mechanical revolution.
    pub pulses_per_rev: u16,
    /// Usable travel arc in degrees.
    pub range_degrees: u16,
    /// Decoder pulses required to move the value by one step.
    pub ticks_per_event: u8,
    /// Reverse the rotation direction.
    pub invert: bool,
}

impl EncoderDef {
    /// Number of value steps across the travel arc.
    ///
    /// Zero means the geometry is unusable; validation rejects it.
    #[must_use]
    pub const fn travel_steps(&self) -> i32 {
        if self.ticks_per_event == 0 {
            return 0;
        }
        let pulses = self.pulses_per_rev as i32 * self.range_degrees as i32 / 360;
        pulses / self.ticks_per_event as i32
    }
}

/// Static description of one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDef {
    /// Stable identifier, unique among buttons.
    pub id: ControlId,
    /// GPIO number.
    pub pin: u8,
    /// Pressed reads low (wired to ground, internal pull-up).
    pub active_low: bool,
}

/// The binding table: ordered control descriptors plus the reset policy.
///
/// Order is significant: the Nth encoder (0-based) is assigned controller
/// `encoder_cc_base + N`, likewise for buttons. The table is read-only
/// after construction; all of its checks run once at startup.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLayout {
    pub encoders: &'static [EncoderDef],
    pub buttons: &'static [ButtonDef],
    /// Normalized value encoders are synchronized to on reset.
    pub default_position: f32,
    /// Button that triggers the reset sequence, if any.
    pub reset_button: Option<ControlId>,
}

impl ControlLayout {
    /// Check everything that does not involve the MIDI assignment:
    /// id uniqueness per variant, the reset button's existence, the
    /// default position range, and usable encoder geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.default_position >= 0.0 && self.default_position <= 1.0) {
            return Err(ConfigError::DefaultOutOfRange);
        }

        for (i, encoder) in self.encoders.iter().enumerate() {
            if encoder.travel_steps() < 1 {
                return Err(ConfigError::ZeroTravel { id: encoder.id });
            }
            if self.encoders[..i].iter().any(|e| e.id == encoder.id) {
                return Err(ConfigError::DuplicateId { id: encoder.id });
            }
        }

        for (i, button) in self.buttons.iter().enumerate() {
            if self.buttons[..i].iter().any(|b| b.id == button.id) {
                return Err(ConfigError::DuplicateId { id: button.id });
            }
        }

        if let Some(id) = self.reset_button {
            if self.button_index(id).is_none() {
                return Err(ConfigError::UnknownResetButton { id });
            }
        }

        Ok(())
    }

    /// Table index of the encoder with `id`.
    #[must_use]
    pub fn encoder_index(&self, id: ControlId) -> Option<usize> {
        self.encoders.iter().position(|e| e.id == id)
    }

    /// Table index of the button with `id`.
    #[must_use]
    pub fn button_index(&self, id: ControlId) -> Option<usize> {
        self.buttons.iter().position(|b| b.id == id)
    }
}

/// MIDI assignment: channel plus the first controller of each range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiConfig {
    /// MIDI channel, 0-15.
    pub channel: u8,
    /// Controller number of encoder 0; encoder N gets `base + N`.
    pub encoder_cc_base: u8,
    /// Controller number of button 0; button N gets `base + N`.
    pub button_cc_base: u8,
}

/// Errors detected during startup validation.
///
/// Every variant is fatal: the firmware refuses to enter its main loop
/// on any of them. Nothing here is recoverable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// MIDI channel outside 0-15.
    ChannelOutOfRange { channel: u8 },
    /// More controls of one variant than the CC map can hold.
    TableTooLarge { count: usize },
    /// A CC range runs past controller 127.
    CcOutOfRange { controller: u16 },
    /// The encoder and button CC ranges collide.
    CcRangeOverlap { controller: u8 },
    /// Two controls of the same variant share an id.
    DuplicateId { id: ControlId },
    /// The configured reset button is not in the table.
    UnknownResetButton { id: ControlId },
    /// Default position outside [0, 1].
    DefaultOutOfRange,
    /// Encoder geometry yields no usable travel.
    ZeroTravel { id: ControlId },
}
