//! Card-swipe monitoring example
//!
//! Prints every decoded swipe event until Ctrl-C.

use async_trait::async_trait;
use tokio::sync::watch;

use irain::monitor::{self, EventSink, SinkError};
use irain::{Controller, EventDocument};

struct StdoutSink;

#[async_trait]
impl EventSink for StdoutSink {
    async fn publish(
        &self,
        routing_key: &str,
        document: &EventDocument,
    ) -> Result<(), SinkError> {
        let body = document.to_bytes()?;
        println!("{} {}", routing_key, String::from_utf8_lossy(&body));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> irain::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let ip = std::env::var("BOARD_IP").unwrap_or_else(|_| "192.168.1.10".to_string());

    let mut board = Controller::new(ip, 8000, 1);
    board.connect().await?;

    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = tx.send(true);
    });

    monitor::run(board, &StdoutSink, rx).await
}
