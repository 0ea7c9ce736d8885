//! Protocol framing profiles
//!
//! Two incompatible framing variants of the board protocol exist in the
//! field. Rather than hard-coding marker bytes per hardware revision, the
//! codec takes an immutable [`ProtocolProfile`] at construction, so
//! adapters for boards with different profiles can coexist in one process.

/// Framing parameters for one protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolProfile {
    /// First byte of an outbound command frame
    pub command_start: u8,

    /// Trailing byte of an outbound command frame, only emitted when
    /// `trailing_end` is set
    pub command_end: u8,

    /// First byte of an inbound message frame
    pub message_start: u8,

    /// Last byte of an inbound message frame
    pub message_end: u8,

    /// Whether encoded commands carry the trailing end marker
    ///
    /// Current firmware rejects frames that contain it (hardware errata),
    /// so the standard profile leaves it off. This is an explicit choice,
    /// not an omission; the legacy profile still emits it.
    pub trailing_end: bool,
}

impl ProtocolProfile {
    /// The canonical profile for current boards
    pub const fn standard() -> Self {
        Self {
            command_start: 0xD2,
            command_end: 0xD3,
            message_start: 0xE2,
            message_end: 0xE3,
            trailing_end: false,
        }
    }

    /// Historical command framing used by early firmware revisions
    pub const fn legacy() -> Self {
        Self {
            command_start: 0xF3,
            command_end: 0xD3,
            message_start: 0xE2,
            message_end: 0xE3,
            trailing_end: true,
        }
    }
}

impl Default for ProtocolProfile {
    fn default() -> Self {
        Self::standard()
    }
}
