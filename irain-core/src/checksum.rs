//! XOR checksum for command frames
//!
//! The board validates commands with a single-byte XOR fold over the
//! address, payload length, command id and every payload byte, in that
//! order. The framing markers are excluded.

/// Calculate the command frame checksum
///
/// # Examples
///
/// ```
/// use irain_core::checksum;
///
/// let sum = checksum::xor_fold(0x01, 0x01, 0x5A, &[0x03]);
/// assert_eq!(sum, 0x01 ^ 0x01 ^ 0x5A ^ 0x03);
/// ```
pub fn xor_fold(addr: u8, len: u8, cmd_id: u8, payload: &[u8]) -> u8 {
    let mut sum = addr;
    sum ^= len;
    sum ^= cmd_id;
    for b in payload {
        sum ^= b;
    }
    sum
}

/// Verify a received checksum
pub fn verify(addr: u8, len: u8, cmd_id: u8, payload: &[u8], expected: u8) -> bool {
    xor_fold(addr, len, cmd_id, payload) == expected
}
