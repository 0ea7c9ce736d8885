//! Wiegand-26 card identifiers
//!
//! iRain boards report card ids as the 3 data bytes of a Wiegand-26 read:
//! one facility byte followed by a big-endian 16-bit card number. Card
//! serials entered by operators are the 10-digit zero-padded decimal form
//! of the combined 24-bit value, as printed on the cards themselves.

use std::fmt;

use crate::error::{Error, Result};

/// Number of digits in a printed card serial
pub const CARD_SN_DIGITS: usize = 10;

/// Highest value representable in a Wiegand-26 read (24 data bits)
const MAX_CARD_VALUE: u32 = 0x00FF_FFFF;

/// A card identifier in the Wiegand-26 scheme
///
/// # Examples
///
/// ```
/// use irain_types::Wg26Id;
///
/// let id = Wg26Id::from_wg26([0x56, 0x43, 0x3B]);
/// assert_eq!(id.facility(), 0x56);
/// assert_eq!(id.card_sn(), "0005653307");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wg26Id {
    facility: u8,
    number: u16,
}

impl Wg26Id {
    /// Build from the 3 Wiegand-26 data bytes as they appear on the wire
    pub fn from_wg26(bytes: [u8; 3]) -> Self {
        Self {
            facility: bytes[0],
            number: u16::from_be_bytes([bytes[1], bytes[2]]),
        }
    }

    /// Parse a printed card serial (exactly 10 decimal digits)
    ///
    /// # Errors
    ///
    /// Returns a validation error when the input is not 10 ASCII digits or
    /// encodes a value outside the 24-bit Wiegand-26 range.
    pub fn parse_card_sn(sn: &str) -> Result<Self> {
        if !is_card_sn(sn) {
            return Err(Error::Validation(format!(
                "card serial must be {} decimal digits: {:?}",
                CARD_SN_DIGITS, sn
            )));
        }

        // 10 digits can exceed u32, parse wide then range-check
        let value: u64 = sn
            .parse()
            .map_err(|e| Error::Parse(format!("card serial {:?}: {}", sn, e)))?;
        if value > MAX_CARD_VALUE as u64 {
            return Err(Error::Validation(format!(
                "card serial out of Wiegand-26 range: {}",
                value
            )));
        }

        let value = value as u32;
        Ok(Self {
            facility: (value >> 16) as u8,
            number: (value & 0xFFFF) as u16,
        })
    }

    /// Facility (site) code, the first Wiegand-26 data byte
    pub fn facility(&self) -> u8 {
        self.facility
    }

    /// 16-bit card number within the facility
    pub fn number(&self) -> u16 {
        self.number
    }

    /// Combined 24-bit card value
    pub fn value(&self) -> u32 {
        (self.facility as u32) << 16 | self.number as u32
    }

    /// Printed card serial: 10-digit zero-padded decimal
    pub fn card_sn(&self) -> String {
        format!("{:010}", self.value())
    }

    /// Split serial form: 3-digit facility + 5-digit number
    pub fn wg26_sn(&self) -> String {
        format!("{:03}{:05}", self.facility, self.number)
    }

    /// The 6-byte card field used by card-add and card-delete payloads:
    /// little-endian 32-bit value padded with two zero bytes
    pub fn to_card_bytes(&self) -> [u8; 6] {
        let v = self.value().to_le_bytes();
        [v[0], v[1], v[2], v[3], 0, 0]
    }
}

impl fmt::Display for Wg26Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.card_sn())
    }
}

/// Check whether a string is a well-formed printed card serial
pub fn is_card_sn(sn: &str) -> bool {
    sn.len() == CARD_SN_DIGITS && sn.bytes().all(|b| b.is_ascii_digit())
}
