use core::fmt;

use thiserror::Error;

/// The high-level class of an error.
///
/// - **Decode** errors come from parsing CBOR bytes.
/// - **Encode** errors come from the bridge, when a native value has no CBOR representation
///   (the codec itself never fails to encode a [`crate::Value`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Decode/framing failure.
    Decode,
    /// Bridge conversion failure.
    Encode,
}

/// A structured error code identifying why a value was rejected.
///
/// Codes are string-free so errors stay `Copy` and `no_std` friendly. [`ErrorCode::ALL`] lists
/// every code and [`ErrorCode::name`] returns a stable identifier for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input ended before the current item was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A length or count claims more data than remains in the input.
    #[error("length exceeds remaining input")]
    LengthExceedsBuffer,
    /// A text string is not valid UTF-8.
    #[error("text must be valid UTF-8")]
    InvalidUtf8,
    /// Container nesting exceeded the configured depth.
    #[error("nesting depth limit exceeded")]
    NestingTooDeep,
    /// A break stop-code appeared outside an indefinite-length item.
    #[error("unexpected break stop-code")]
    UnexpectedBreak,
    /// A tag (major type 6) was found while tags are rejected.
    #[error("unsupported CBOR tag")]
    UnsupportedTag,
    /// Bytes remain after the single top-level item.
    #[error("trailing bytes after single CBOR item")]
    TrailingData,
    /// Reserved or malformed leading byte.
    #[error("invalid major type or reserved additional info")]
    InvalidMajorType,
    /// An indefinite-length string contains a chunk of the wrong type or an indefinite chunk.
    #[error("invalid chunk in indefinite-length string")]
    InvalidChunk,
    /// A simple value other than false/true/null.
    #[error("unsupported CBOR simple value")]
    UnsupportedSimpleValue,
    /// Input is larger than `DecodeLimits::max_input_bytes`.
    #[error("input exceeds maximum size")]
    InputTooLarge,
    /// A length or item-count limit from `DecodeLimits` was exceeded.
    #[error("decode limit exceeded")]
    LimitExceeded,
    /// Memory allocation failed while building the decoded value.
    #[error("allocation failed")]
    AllocationFailed,

    /// A native value has no CBOR representation or a value has the wrong shape.
    #[error("unsupported type")]
    UnsupportedType,
    /// An integer does not fit the target type.
    #[error("integer overflow")]
    IntegerOverflow,
    /// A custom error raised by a `serde` implementation.
    #[error("custom conversion error")]
    Custom,
}

impl ErrorCode {
    /// Every error code, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::UnexpectedEof,
        Self::LengthExceedsBuffer,
        Self::InvalidUtf8,
        Self::NestingTooDeep,
        Self::UnexpectedBreak,
        Self::UnsupportedTag,
        Self::TrailingData,
        Self::InvalidMajorType,
        Self::InvalidChunk,
        Self::UnsupportedSimpleValue,
        Self::InputTooLarge,
        Self::LimitExceeded,
        Self::AllocationFailed,
        Self::UnsupportedType,
        Self::IntegerOverflow,
        Self::Custom,
    ];

    /// Stable identifier for this code, suitable for logs and foreign error domains.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnexpectedEof => "UnexpectedEof",
            Self::LengthExceedsBuffer => "LengthExceedsBuffer",
            Self::InvalidUtf8 => "InvalidUtf8",
            Self::NestingTooDeep => "NestingTooDeep",
            Self::UnexpectedBreak => "UnexpectedBreak",
            Self::UnsupportedTag => "UnsupportedTag",
            Self::TrailingData => "TrailingData",
            Self::InvalidMajorType => "InvalidMajorType",
            Self::InvalidChunk => "InvalidChunk",
            Self::UnsupportedSimpleValue => "UnsupportedSimpleValue",
            Self::InputTooLarge => "InputTooLarge",
            Self::LimitExceeded => "LimitExceeded",
            Self::AllocationFailed => "AllocationFailed",
            Self::UnsupportedType => "UnsupportedType",
            Self::IntegerOverflow => "IntegerOverflow",
            Self::Custom => "Custom",
        }
    }

    /// The error class this code belongs to.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::UnsupportedType | Self::IntegerOverflow | Self::Custom => ErrorKind::Encode,
            _ => ErrorKind::Decode,
        }
    }
}

/// A codec error with a classification, a stable code, and a byte offset.
///
/// Offsets are meaningful for `Decode` errors. For `Encode` errors, `offset` is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CborError {
    /// The error kind.
    pub kind: ErrorKind,
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the input where the error was detected (0 for encode errors).
    pub offset: usize,
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Decode => write!(f, "cbor decode failed at {}: {}", self.offset, self.code),
            ErrorKind::Encode => write!(f, "cbor conversion failed: {}", self.code),
        }
    }
}

impl core::error::Error for CborError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.code)
    }
}

impl CborError {
    /// Construct a decode error at `offset`.
    #[inline]
    #[must_use]
    pub const fn decode(code: ErrorCode, offset: usize) -> Self {
        Self {
            kind: ErrorKind::Decode,
            code,
            offset,
        }
    }

    /// Construct a bridge (encode-side) error.
    #[inline]
    #[must_use]
    pub const fn encode(code: ErrorCode) -> Self {
        Self {
            kind: ErrorKind::Encode,
            code,
            offset: 0,
        }
    }

    /// Returns true iff this error was raised while decoding bytes.
    #[inline]
    #[must_use]
    pub const fn is_decode(self) -> bool {
        matches!(self.kind, ErrorKind::Decode)
    }
}
