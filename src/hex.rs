//! Hex helpers for logging CBOR payloads and writing byte fixtures.

use alloc::string::String;
use alloc::vec::Vec;

pub use ::hex::FromHexError;

/// Render bytes as lowercase hex with no separators.
///
/// ```
/// assert_eq!(dyn_cbor::hex::to_hex(&[0xa1, 0x61, 0x61, 0x01]), "a1616101");
/// ```
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Parse a hex string (either case, no separators) back into bytes.
///
/// # Errors
///
/// Returns [`FromHexError`] for odd-length input or non-hex characters.
pub fn from_hex(s: &str) -> Result<Vec<u8>, FromHexError> {
    ::hex::decode(s)
}
