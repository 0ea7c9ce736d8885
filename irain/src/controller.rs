//! High-level board interface
//!
//! One [`Controller`] owns one transport connection exclusively. The board
//! does not pipeline: it accepts one command and replies once, so command
//! execution serializes through `&mut self` and concurrent callers must
//! queue rather than interleave writes.

use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, trace, warn};

use irain_core::{catalog, Command, Message, ProtocolProfile};
use irain_transport::{TcpTransport, Transport};
use irain_types::Wg26Id;

use crate::error::{Error, Result};

/// Outcome classification of a synchronous command exchange
///
/// All three are normal outcomes, not errors. `NoValidReply` in particular
/// is expected behavior under packet loss or a busy board and should not be
/// logged at error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    /// The board acknowledged with the success sentinel
    Success,

    /// A well-formed reply arrived that was not a success acknowledgment
    Failure,

    /// No classifiable reply arrived within the retry budget
    NoValidReply,
}

impl ReplyStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Machine-readable status string handed back to command callers
    pub fn reply_text(self) -> &'static str {
        match self {
            Self::Success => "EX=OK",
            Self::Failure => "EX=ERR:FAILED",
            Self::NoValidReply => "EX=ERR:NO_VALID_REPLY",
        }
    }
}

/// Bounded retry budget for reading a command reply
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum read attempts per command
    pub attempts: u32,

    /// Sleep between attempts after a transport-level read error
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_millis(100),
        }
    }
}

/// iRain access-control board
///
/// # Examples
///
/// ```no_run
/// use irain::Controller;
///
/// #[tokio::main]
/// async fn main() -> irain::Result<()> {
///     let mut board = Controller::new("192.168.1.10", 8000, 1);
///
///     board.connect().await?;
///     let status = board.open_door(3).await?;
///     println!("{}", status.reply_text());
///
///     board.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Controller {
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) profile: ProtocolProfile,
    pub(crate) board_addr: u8,
    pub(crate) retry: RetryPolicy,
    pub(crate) read_timeout: Duration,
}

impl Controller {
    /// Create a controller over a TCP transport
    pub fn new(ip: impl Into<String>, port: u16, board_addr: u8) -> Self {
        Self::with_transport(Box::new(TcpTransport::new(ip, port)), board_addr)
    }

    /// Create a controller over an existing transport
    pub fn with_transport(transport: Box<dyn Transport>, board_addr: u8) -> Self {
        Self {
            transport,
            profile: ProtocolProfile::standard(),
            board_addr,
            retry: RetryPolicy::default(),
            read_timeout: Duration::from_secs(1),
        }
    }

    /// Select a protocol framing variant
    pub fn with_profile(mut self, profile: ProtocolProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the reply retry budget
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the per-read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Address of the board on the shared line
    pub fn board_addr(&self) -> u8 {
        self.board_addr
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Connect the underlying transport
    pub async fn connect(&mut self) -> Result<()> {
        self.transport.connect().await?;
        Ok(())
    }

    /// Disconnect the underlying transport
    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await?;
        Ok(())
    }

    /// Remotely open a door relay
    pub async fn open_door(&mut self, door_id: u8) -> Result<ReplyStatus> {
        self.execute(&catalog::remote_open(self.board_addr, door_id))
            .await
    }

    /// Store a card, given its printed 10-digit serial
    pub async fn add_card(&mut self, card_sn: &str) -> Result<ReplyStatus> {
        let card = parse_card(card_sn)?;
        self.execute(&catalog::card_add(self.board_addr, &card))
            .await
    }

    /// Remove one card, given its printed 10-digit serial
    pub async fn delete_card(&mut self, card_sn: &str) -> Result<ReplyStatus> {
        let card = parse_card(card_sn)?;
        self.execute(&catalog::card_delete(self.board_addr, &card))
            .await
    }

    /// Erase every card stored on the board
    pub async fn clear_cards(&mut self) -> Result<ReplyStatus> {
        self.execute(&catalog::card_clear(self.board_addr)).await
    }

    /// Ask the board to emit its next pending event (polling variant)
    pub async fn scan_event(&mut self) -> Result<ReplyStatus> {
        self.execute(&catalog::event_scan(self.board_addr)).await
    }

    /// Execute one command exchange: write, then read the reply within the
    /// bounded retry budget
    ///
    /// A write failure is fatal for this call and surfaces immediately as
    /// [`Error::Write`]; retries cover reply reads only. Frames that decode
    /// to noise are skipped without consuming the inter-attempt sleep.
    /// Replies arrive in write order (the wire format has no request ids),
    /// so the first well-formed frame is the reply.
    pub async fn execute(&mut self, cmd: &Command) -> Result<ReplyStatus> {
        let frame = cmd.encode(&self.profile)?;

        debug!("Executing {}", cmd);
        trace!("Command bytes: {}", hex::encode(&frame));

        if let Err(e) = self.transport.send(&frame).await {
            warn!("Command write failed: {}", e);
            return Err(Error::Write(e));
        }

        self.read_reply().await
    }

    async fn read_reply(&mut self) -> Result<ReplyStatus> {
        // TCP gives no framing guarantee, so a reply may arrive split
        // across reads. Bytes accumulate here until an end marker shows up.
        let mut pending = BytesMut::new();

        for attempt in 0..self.retry.attempts {
            match self.transport.receive(self.read_timeout).await {
                Ok(buf) => {
                    pending.extend_from_slice(&buf);

                    if !pending.contains(&self.profile.message_end) {
                        trace!("Partial reply so far: {}", hex::encode(&pending));
                        continue;
                    }

                    match Message::decode(&self.profile, &pending) {
                        Ok(msg) => {
                            trace!("Reply: {:?}", msg);
                            return Ok(if msg.is_success() {
                                ReplyStatus::Success
                            } else {
                                ReplyStatus::Failure
                            });
                        }
                        Err(e) if e.is_skippable() => {
                            // Not yet a real reply, keep waiting in-budget
                            trace!("Skipping non-reply bytes: {}", hex::encode(&pending));
                            pending.clear();
                            continue;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Err(e) => {
                    debug!("Reply read attempt {} failed: {}", attempt, e);
                    tokio::time::sleep(self.retry.delay).await;
                }
            }
        }

        Ok(ReplyStatus::NoValidReply)
    }

    /// Apply a textual command line and execute it, rendering the result
    /// as a machine-readable status string
    pub async fn serve_text(&mut self, line: &str) -> String {
        let cmd = match crate::atcmd::apply(self.board_addr, line) {
            Ok(cmd) => cmd,
            Err(e) => {
                debug!("Rejected command line {:?}: {}", line, e);
                return format!("EX=ERR:BAD_CMD:{}", bad_cmd_detail(&e));
            }
        };

        match self.execute(&cmd).await {
            Ok(status) => status.reply_text().to_string(),
            Err(Error::Write(e)) => format!("EX=ERR:WRITE:{}", e),
            Err(e) => format!("EX=ERR:{}", e),
        }
    }
}

fn parse_card(card_sn: &str) -> Result<Wg26Id> {
    Wg26Id::parse_card_sn(card_sn)
        .map_err(|_| Error::InvalidArgument(format!("INVALID_CARD_SN[10digits]:{}", card_sn)))
}

fn bad_cmd_detail(e: &Error) -> String {
    match e {
        Error::InvalidArgument(detail) => detail.clone(),
        other => other.to_string(),
    }
}
