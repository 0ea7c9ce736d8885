//! Command payload builders
//!
//! Each builder is a pure function: identical arguments always produce a
//! byte-identical [`Command`]. Argument validation (card serial shape)
//! happens in `irain-types` before any byte is built here.

use bytes::{BufMut, Bytes, BytesMut};
use irain_types::Wg26Id;

use crate::command::{Command, CommandId};

/// Sentinel payload understood by the firmware as "erase all cards"
const CLEAR_SENTINEL: [u8; 3] = [0x78, 0x79, 0x7A];

/// Card-add record defaults. Per-card scheduling is not exposed, so every
/// sub-field past the serial is fixed.
const NO_EXPIRY: &[u8; 4] = b"FFFF";
const OPEN_PASSWORD_FLAGS: &[u8; 2] = b"10";
const GROUP_CODE: &[u8; 2] = b"01";
const WEEKDAY_MASK: &[u8; 2] = b"7F";
const DOOR_MASK: &[u8; 2] = b"01";

/// Open one door relay remotely
pub fn remote_open(addr: u8, door_id: u8) -> Command {
    Command::new(addr, CommandId::RemoteOpen, vec![door_id])
}

/// Store a card on the board
///
/// The 22-byte record layout expected by the firmware:
///
/// ```text
/// ┌──────────┬────────┬───────┬───────────┬───────┬─────────┬───────┐
/// │ card sn  │ expiry │ flags │ person id │ group │ weekday │ doors │
/// │ 6 bytes  │ 4 B    │ 2 B   │ 4 B       │ 2 B   │ 2 B     │ 2 B   │
/// └──────────┴────────┴───────┴───────────┴───────┴─────────┴───────┘
/// ```
pub fn card_add(addr: u8, card: &Wg26Id) -> Command {
    let mut payload = BytesMut::with_capacity(22);
    payload.put_slice(&card.to_card_bytes());
    payload.put_slice(NO_EXPIRY);
    payload.put_slice(OPEN_PASSWORD_FLAGS);
    payload.put_u32(0); // person id, unused
    payload.put_slice(GROUP_CODE);
    payload.put_slice(WEEKDAY_MASK);
    payload.put_slice(DOOR_MASK);

    Command::new(addr, CommandId::CardAdd, payload.freeze())
}

/// Remove one card from the board
pub fn card_delete(addr: u8, card: &Wg26Id) -> Command {
    Command::new(addr, CommandId::CardDelete, card.to_card_bytes().to_vec())
}

/// Erase every card stored on the board
pub fn card_clear(addr: u8) -> Command {
    Command::new(addr, CommandId::CardClear, CLEAR_SENTINEL.to_vec())
}

/// Request the next pending event (polling protocol variant only)
pub fn event_scan(addr: u8) -> Command {
    Command::new(addr, CommandId::EventScan, Bytes::new())
}
