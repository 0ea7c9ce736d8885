//! Error types for irain-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bytes do not form a recognizable message frame
    ///
    /// This is recoverable noise: readers skip the bytes and keep waiting.
    /// It must never be escalated to a connection-level failure on its own.
    #[error("Unknown message bytes: not an irain frame")]
    UnknownMessage,

    /// Unknown command id
    #[error("Unknown command id: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Command payload exceeds the single-byte length field
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },
}

impl Error {
    /// Frames that fail with a skippable error are normal line noise,
    /// not transport failures
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::UnknownMessage)
    }
}
