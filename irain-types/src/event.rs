//! Card-swipe event model
//!
//! The board pushes one 10-byte frame per card read. The layout is fixed:
//!
//! ```text
//! ┌───────────┬─────────────────────────┬───────────┐
//! │ Card id   │ Controller timestamp    │ Door code │
//! │ bytes 0-2 │ bytes 3-8 (opaque)      │ byte 9    │
//! │ Wiegand26 │ not interpreted         │ high nib  │
//! └───────────┴─────────────────────────┴───────────┘
//! ```

use serde::Serialize;

use crate::wiegand::Wg26Id;

/// Exact payload length of a card-swipe event frame
pub const EVENT_FRAME_LEN: usize = 10;

/// Door-open state reported with every swipe event
pub const STATE_OPEN: &str = "OPEN";

/// Swipe direction
///
/// The 10-byte event frame carries no direction field; every decoded event
/// is `In`. `Out` is kept for forward compatibility with firmware that may
/// report exit readers, but no known decode path produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    In = 1,
    Out = 2,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded card-swipe occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEvent {
    /// Card id read by the Wiegand head
    pub card: Wg26Id,

    /// Address of the board the event arrived from (caller-supplied, the
    /// frame itself does not carry it)
    pub board: u8,

    /// Door the reader belongs to; 0 when the door code is unrecognized
    pub door_id: u8,

    /// Always `In` for this hardware generation
    pub direct: Direction,

    /// Door-open state
    pub state: &'static str,
}

impl CardEvent {
    /// Decode an event frame payload
    ///
    /// Returns `None` for any payload that is not exactly
    /// [`EVENT_FRAME_LEN`] bytes: such frames are other board traffic, not
    /// card events, and callers are expected to skip them silently.
    ///
    /// An unknown door code decodes to door 0 rather than failing; the
    /// event is otherwise well-formed and callers may still drop it.
    pub fn decode(board: u8, payload: &[u8]) -> Option<Self> {
        if payload.len() != EVENT_FRAME_LEN {
            return None;
        }

        let door_id = match payload[9] & 0xF0 {
            0x10 => 1,
            0x20 => 2,
            0x30 => 3,
            0x40 => 4,
            _ => 0,
        };

        Some(Self {
            card: Wg26Id::from_wg26([payload[0], payload[1], payload[2]]),
            board,
            door_id,
            direct: Direction::In,
            state: STATE_OPEN,
        })
    }

    /// Routing key for publication: one logical reader per board/door pair
    pub fn routing_key(&self) -> String {
        format!("READER-{}-{}", self.board, self.door_id)
    }

    /// Build the external event document
    pub fn to_document(&self) -> EventDocument {
        EventDocument {
            sn: self.board,
            index: 0,
            kind: 0,
            type_name: "CARD",
            state: self.state,
            card: self.card.card_sn(),
            door_id: self.door_id,
            direct: self.direct.name(),
        }
    }
}

/// External representation of a swipe event, serialized for publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDocument {
    pub sn: u8,
    pub index: u32,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(rename = "typeName")]
    pub type_name: &'static str,
    pub state: &'static str,
    pub card: String,
    #[serde(rename = "doorId")]
    pub door_id: u8,
    pub direct: &'static str,
}

impl EventDocument {
    /// Serialize to the JSON wire form
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
