//! Inbound message frame decoding

use bytes::Bytes;
use std::fmt;
use tracing::trace;

use crate::{
    error::{Error, Result},
    profile::ProtocolProfile,
    SUCCESS_SENTINEL,
};

/// An inbound decoded frame
///
/// The payload is every byte between the start and end markers, end marker
/// excluded, and is never empty. Each call to [`Message::decode`] yields a
/// freshly constructed value; nothing is reused between reads, so a failed
/// decode cannot leak stale state into the next one.
#[derive(Clone, PartialEq, Eq)]
pub struct Message {
    /// Frame payload, markers excluded
    pub payload: Bytes,
}

impl Message {
    /// Decode one message frame out of a raw read buffer
    ///
    /// Skips leading garbage until the start marker, then collects through
    /// the end marker. The buffer may contain trailing bytes after the end
    /// marker; they are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMessage`] when no start marker is present,
    /// the end marker never arrives, or the frame would have an empty
    /// payload. Callers treat this as skippable line noise, not as a
    /// transport failure.
    pub fn decode(profile: &ProtocolProfile, buf: &[u8]) -> Result<Self> {
        let start = buf
            .iter()
            .position(|&b| b == profile.message_start)
            .ok_or(Error::UnknownMessage)?;

        // Collected region: everything after the start marker, through the
        // end marker inclusive
        let body = &buf[start + 1..];
        let end = body
            .iter()
            .position(|&b| b == profile.message_end)
            .ok_or(Error::UnknownMessage)?;

        // At least payload + end marker; a bare [start, end] pair is noise
        if end == 0 {
            return Err(Error::UnknownMessage);
        }

        trace!(
            skipped = start,
            payload_len = end,
            "Decoded message frame"
        );

        Ok(Self {
            payload: Bytes::copy_from_slice(&body[..end]),
        })
    }

    /// Cheap boundary pre-check for fixed-size buffer reads
    ///
    /// True when the buffer starts with the data-start marker, ends with
    /// the data-end marker and is longer than one marker pair. Used before
    /// attempting a full decode on raw monitor reads.
    pub fn check_proto_valid(profile: &ProtocolProfile, buf: &[u8]) -> bool {
        buf.len() > 2
            && buf[0] == profile.message_start
            && buf[buf.len() - 1] == profile.message_end
    }

    /// Whether this frame is a success reply
    pub fn is_success(&self) -> bool {
        self.payload.first() == Some(&SUCCESS_SENTINEL)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("payload", &hex::encode(&self.payload))
            .field("success", &self.is_success())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROFILE: ProtocolProfile = ProtocolProfile::standard();

    #[test]
    fn test_decode_event_frame() {
        let buf = [
            0xE2, 0x56, 0x43, 0x3B, 0xFF, 0xFF, 0x01, 0x65, 0x62, 0x01, 0x12, 0xE3,
        ];
        let msg = Message::decode(&PROFILE, &buf).unwrap();

        assert_eq!(
            msg.payload.as_ref(),
            &[0x56, 0x43, 0x3B, 0xFF, 0xFF, 0x01, 0x65, 0x62, 0x01, 0x12]
        );
        assert_eq!(msg.payload.len(), 10);
        assert!(!msg.is_success());
    }

    #[test]
    fn test_decode_success_reply() {
        let msg = Message::decode(&PROFILE, &[0xE2, b'Y', 0xE3]).unwrap();

        assert_eq!(msg.payload.as_ref(), b"Y");
        assert!(msg.is_success());
    }

    #[test]
    fn test_decode_failure_reply() {
        let msg = Message::decode(&PROFILE, &[0xE2, b'N', 0xE3]).unwrap();
        assert!(!msg.is_success());
    }

    #[test]
    fn test_decode_rejects_empty_payload() {
        // [start, end] alone is not a valid message
        let result = Message::decode(&PROFILE, &[0xE2, 0xE3]);
        assert!(matches!(result, Err(Error::UnknownMessage)));
    }

    #[test]
    fn test_decode_skips_leading_garbage() {
        let buf = [0x00, 0x7F, 0xE2, b'Y', 0xE3];
        let msg = Message::decode(&PROFILE, &buf).unwrap();
        assert!(msg.is_success());
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let buf = [0xE2, b'Y', 0xE3, 0xAA, 0xBB];
        let msg = Message::decode(&PROFILE, &buf).unwrap();
        assert_eq!(msg.payload.as_ref(), b"Y");
    }

    #[test]
    fn test_decode_missing_start_marker() {
        let result = Message::decode(&PROFILE, &[b'Y', 0xE3]);
        assert!(matches!(result, Err(Error::UnknownMessage)));
    }

    #[test]
    fn test_decode_missing_end_marker() {
        let result = Message::decode(&PROFILE, &[0xE2, b'Y', b'Y']);
        assert!(matches!(result, Err(Error::UnknownMessage)));
    }

    #[test]
    fn test_decode_round_trip_payload_lengths() {
        for n in 1..32usize {
            let mut buf = vec![0xE2];
            let payload: Vec<u8> = (0..n).map(|i| (i as u8).wrapping_add(1)).collect();
            buf.extend_from_slice(&payload);
            buf.push(0xE3);

            let msg = Message::decode(&PROFILE, &buf).unwrap();
            assert_eq!(msg.payload.as_ref(), payload.as_slice());
        }
    }

    #[test]
    fn test_check_proto_valid() {
        assert!(Message::check_proto_valid(&PROFILE, &[0xE2, b'Y', 0xE3]));
        assert!(!Message::check_proto_valid(&PROFILE, &[0xE2, 0xE3]));
        assert!(!Message::check_proto_valid(&PROFILE, &[0xE2, b'Y']));
        assert!(!Message::check_proto_valid(&PROFILE, &[0x00, b'Y', 0xE3]));
        assert!(!Message::check_proto_valid(&PROFILE, &[]));
    }
}
