//! Asynchronous card-swipe monitor loop
//!
//! In monitoring deployments the board pushes a frame per card read and
//! the adapter never writes; this loop and the synchronous command mode
//! are mutually exclusive per physical line, which [`run`] enforces by
//! consuming the [`Controller`].

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use irain_core::Message;
use irain_types::{CardEvent, EventDocument, EVENT_FRAME_LEN};

use crate::controller::Controller;
use crate::error::{Error, Result};

/// Error type sink implementations report publish failures with
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Collaborator that announces decoded card events to the rest of the
/// system
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publish one event document under its routing key
    async fn publish(
        &self,
        routing_key: &str,
        document: &EventDocument,
    ) -> std::result::Result<(), SinkError>;
}

/// Run the monitor loop until the shutdown signal fires
///
/// Each iteration performs one bounded read. Frames that are not card
/// events are normal traffic and are discarded at trace level. Temporary
/// read conditions (timeouts) just loop; hard transport errors trigger a
/// reconnect and the loop keeps going. Only the shutdown signal ends it.
pub async fn run(
    mut controller: Controller,
    sink: &dyn EventSink,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    debug!(
        "Monitoring board {} at {}",
        controller.board_addr,
        controller.transport.remote_addr()
    );

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                debug!("Shutdown signal received, monitor loop ending");
                return Ok(());
            }

            received = controller.transport.receive(controller.read_timeout) => {
                match received {
                    Ok(buf) => {
                        if let Err(e) = process(&controller, sink, &buf).await {
                            warn!("Event publish failed: {}", e);
                        }
                    }
                    Err(e) if e.is_temporary() => {
                        trace!("Idle read: {}", e);
                    }
                    Err(e) => {
                        warn!("Monitor read failed: {}", e);
                        if let Err(e) = controller.transport.reconnect().await {
                            warn!("Reconnect failed: {}", e);
                        }
                    }
                }
            }
        }

        // A transport that resolves without suspending must not starve
        // the shutdown branch.
        tokio::task::yield_now().await;
    }
}

async fn process(controller: &Controller, sink: &dyn EventSink, buf: &[u8]) -> Result<()> {
    if !Message::check_proto_valid(&controller.profile, buf) {
        trace!("Discarding non-protocol bytes: {}", hex::encode(buf));
        return Ok(());
    }

    let msg = match Message::decode(&controller.profile, buf) {
        Ok(msg) => msg,
        Err(e) => {
            trace!("Discarding undecodable frame: {}", e);
            return Ok(());
        }
    };

    // Anything but the fixed event length is other board traffic
    if msg.payload.len() != EVENT_FRAME_LEN {
        trace!("Ignoring {}-byte non-event frame", msg.payload.len());
        return Ok(());
    }

    let Some(event) = CardEvent::decode(controller.board_addr, &msg.payload) else {
        return Ok(());
    };

    debug!(
        "Card event: door {}, card {}, direction {}",
        event.door_id,
        event.card.card_sn(),
        event.direct
    );

    sink.publish(&event.routing_key(), &event.to_document())
        .await
        .map_err(|e| Error::Publish(e.to_string()))
}
