//! Type definitions for irain
//!
//! Card identifiers in the Wiegand-26 scheme and the card-swipe event
//! model published by the monitor loop.

pub mod error;
pub mod event;
pub mod wiegand;

pub use error::{Error, Result};
pub use event::{CardEvent, Direction, EventDocument, EVENT_FRAME_LEN};
pub use wiegand::Wg26Id;
