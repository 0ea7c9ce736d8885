//! Transport layer for the irain adapter
//!
//! Stream-oriented client connections to the board (TCP today, serial
//! bridges present themselves as TCP). The exchange loops in `irain` only
//! consume these primitives; reconnection is owned here.

pub mod error;
pub mod tcp;

pub use error::{Error, Result};
pub use tcp::TcpTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for board connections
///
/// One transport instance is exclusively owned by one adapter; callers
/// must not invoke `reconnect` concurrently from several loops.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to the board
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from the board
    async fn disconnect(&mut self) -> Result<()>;

    /// Drop the current connection and establish a fresh one
    async fn reconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive raw bytes, bounded by a read timeout
    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
