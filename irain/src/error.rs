//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] irain_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] irain_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] irain_types::Error),

    /// Rejected before any frame was built; never sent on the wire
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport write failed; fatal for the current command, no retries
    #[error("Write failed: {0}")]
    Write(irain_transport::Error),

    #[error("Event serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Event publish error: {0}")]
    Publish(String),
}
