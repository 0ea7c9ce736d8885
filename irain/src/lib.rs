//! # irain
//!
//! Rust adapter for iRain access-control boards: door-switch relays and
//! card readers behind a point-to-point binary protocol over TCP.
//!
//! Two mutually exclusive modes exist per physical line:
//!
//! - **Command mode**: the board accepts one command and replies once.
//!   [`Controller`] serializes writes and classifies the reply within a
//!   bounded retry budget.
//! - **Monitor mode**: the board pushes a frame per card swipe.
//!   [`monitor::run`] decodes them and hands events to an
//!   [`monitor::EventSink`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use irain::Controller;
//!
//! #[tokio::main]
//! async fn main() -> irain::Result<()> {
//!     let mut board = Controller::new("192.168.1.10", 8000, 1);
//!     board.connect().await?;
//!
//!     let status = board.open_door(3).await?;
//!     println!("{}", status.reply_text());
//!
//!     board.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod atcmd;
pub mod controller;
pub mod error;
pub mod monitor;

// Re-exports
pub use controller::{Controller, ReplyStatus, RetryPolicy};
pub use error::{Error, Result};
pub use monitor::EventSink;

// Re-export protocol types
pub use irain_core::{catalog, Command, CommandId, Message, ProtocolProfile};
pub use irain_types::{CardEvent, Direction, EventDocument, Wg26Id};

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::BytesMut;
    use irain_transport::{Result, Transport};

    mockall::mock! {
        pub TestTransport {}

        #[async_trait]
        impl Transport for TestTransport {
            async fn connect(&mut self) -> Result<()>;
            async fn disconnect(&mut self) -> Result<()>;
            async fn reconnect(&mut self) -> Result<()>;
            fn is_connected(&self) -> bool;
            async fn send(&mut self, data: &[u8]) -> Result<()>;
            async fn receive(&mut self, timeout: Duration) -> Result<BytesMut>;
            fn remote_addr(&self) -> String;
        }
    }
}
