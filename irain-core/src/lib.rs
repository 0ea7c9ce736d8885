//! # irain-core
//!
//! Core protocol implementation for iRain access-control boards.
//!
//! This crate provides the low-level protocol primitives:
//! - Command frame structure and encoding
//! - Response message decoding
//! - XOR checksum calculation
//! - Command id definitions and payload builders
//! - Protocol profile (framing variant) selection
//!
//! Everything here is pure and non-blocking; I/O lives in
//! `irain-transport` and the exchange loops in `irain`.

pub mod catalog;
pub mod checksum;
pub mod command;
pub mod error;
pub mod message;
pub mod profile;

pub use command::{Command, CommandId};
pub use error::{Error, Result};
pub use message::Message;
pub use profile::ProtocolProfile;

/// Maximum command payload size (length field is a single byte)
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// First payload byte of a reply frame that reports success
pub const SUCCESS_SENTINEL: u8 = b'Y';
