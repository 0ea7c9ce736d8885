//! Outbound command frame structure and encoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    error::{Error, Result},
    profile::ProtocolProfile,
    MAX_PAYLOAD_SIZE,
};

/// Protocol command ids
///
/// Every operation the board firmware understands on the command channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandId {
    /// Remotely open a door relay
    RemoteOpen = 0x5A,

    /// Ask the board to emit its next pending event (polling variant)
    EventScan = 0x5B,

    /// Store a card on the board
    CardAdd = 0x52,

    /// Remove one card from the board
    CardDelete = 0x57,

    /// Erase every stored card
    CardClear = 0x50,
}

impl CommandId {
    pub fn name(self) -> &'static str {
        match self {
            Self::RemoteOpen => "REMOTE_OPEN",
            Self::EventScan => "EVENT_SCAN",
            Self::CardAdd => "CARD_ADD",
            Self::CardDelete => "CARD_DELETE",
            Self::CardClear => "CARD_CLEAR",
        }
    }
}

impl From<CommandId> for u8 {
    fn from(id: CommandId) -> u8 {
        id as u8
    }
}

impl TryFrom<u8> for CommandId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x5A => Ok(Self::RemoteOpen),
            0x5B => Ok(Self::EventScan),
            0x52 => Ok(Self::CardAdd),
            0x57 => Ok(Self::CardDelete),
            0x50 => Ok(Self::CardClear),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

/// An outbound command frame
///
/// # Frame Structure
///
/// ```text
/// ┌───────┬───────┬───────┬───────┬───────────┬──────────┐
/// │ Start │ Addr  │ Len   │ CmdId │  Payload  │ Checksum │
/// │ 1 B   │ 1 B   │ 1 B   │ 1 B   │  N bytes  │   1 B    │
/// └───────┴───────┴───────┴───────┴───────────┴──────────┘
/// ```
///
/// `Len` is exactly `payload.len()`, no padding. The checksum is the XOR
/// fold of addr, len, cmd id and payload. Whether a trailing end marker
/// follows depends on the [`ProtocolProfile`].
///
/// Commands are built per invocation, encoded once and never reused.
///
/// # Examples
///
/// ```
/// use irain_core::{Command, CommandId, ProtocolProfile};
///
/// let cmd = Command::new(0x01, CommandId::RemoteOpen, vec![0x03]);
/// let bytes = cmd.encode(&ProtocolProfile::standard()).unwrap();
/// assert_eq!(&bytes[..], &[0xD2, 0x01, 0x01, 0x5A, 0x03, 0x59]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Command {
    /// Board address on the shared line
    pub addr: u8,

    /// Operation to perform
    pub id: CommandId,

    /// Operation-specific payload
    pub payload: Bytes,
}

impl Command {
    /// Create a command frame
    pub fn new(addr: u8, id: CommandId, payload: impl Into<Bytes>) -> Self {
        Self {
            addr,
            id,
            payload: payload.into(),
        }
    }

    /// Calculate the XOR checksum for this frame
    pub fn checksum(&self) -> u8 {
        checksum::xor_fold(
            self.addr,
            self.payload.len() as u8,
            self.id.into(),
            &self.payload,
        )
    }

    /// Encode the frame to wire bytes
    ///
    /// # Errors
    ///
    /// Returns an error when the payload does not fit the single-byte
    /// length field.
    pub fn encode(&self, profile: &ProtocolProfile) -> Result<BytesMut> {
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: self.payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        let mut buf = BytesMut::with_capacity(6 + self.payload.len());
        buf.put_u8(profile.command_start);
        buf.put_u8(self.addr);
        buf.put_u8(self.payload.len() as u8);
        buf.put_u8(self.id.into());
        buf.put_slice(&self.payload);
        buf.put_u8(self.checksum());
        if profile.trailing_end {
            buf.put_u8(profile.command_end);
        }

        Ok(buf)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("addr", &self.addr)
            .field("id", &self.id)
            .field("payload", &hex::encode(&self.payload))
            .field("checksum", &format!("0x{:02X}", self.checksum()))
            .finish()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Command[{}](addr={}, len={})",
            self.id,
            self.addr,
            self.payload.len()
        )
    }
}
