//! Events produced by the input glue and consumed by the binder.

use crate::config::ControlId;

/// One debounced, decoded control action.
///
/// Turn events carry the absolute normalized position after the turn,
/// not a relative delta; the input glue owns the position accumulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    /// Encoder moved to a new position, 0.0 to 1.0.
    Turned { id: ControlId, value: f32 },
    /// Button went down.
    Pressed { id: ControlId },
    /// Button came back up.
    Released { id: ControlId },
}

impl ControlEvent {
    /// Identifier of the control that produced the event.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ControlId {
        match self {
            Self::Turned { id, .. } | Self::Pressed { id } | Self::Released { id } => *id,
        }
    }
}
