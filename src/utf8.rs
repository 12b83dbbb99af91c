use crate::{CborError, ErrorCode};

/// Validate a text-string payload whose item header starts at `off`.
///
/// Invalid sequences are rejected; nothing is repaired or reinterpreted as bytes.
#[inline]
pub fn text_at(bytes: &[u8], off: usize) -> Result<&str, CborError> {
    #[cfg(feature = "simdutf8")]
    let checked = simdutf8::basic::from_utf8(bytes).ok();

    #[cfg(not(feature = "simdutf8"))]
    let checked = core::str::from_utf8(bytes).ok();

    checked.ok_or_else(|| CborError::decode(ErrorCode::InvalidUtf8, off))
}
