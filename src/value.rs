use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{CborError, ErrorCode};

/// An owned CBOR data item.
///
/// `Value` covers the RFC 8949 core data model: integers, floats, byte and text strings,
/// arrays, maps, booleans and null. Tags only appear when the decoder is configured with
/// [`crate::TagPolicy::Passthrough`].
///
/// Maps keep their pairs in wire (or insertion) order and may contain duplicate keys; keys can
/// be any `Value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// CBOR null.
    #[default]
    Null,
    /// CBOR boolean.
    Bool(bool),
    /// Unsigned integer (major type 0).
    Unsigned(u64),
    /// Negative integer (major type 1) holding the raw argument `n`; the value is `-1 - n`.
    Negative(u64),
    /// Floating point number, widened from whatever width was on the wire.
    Float(f64),
    /// Byte string.
    Bytes(Vec<u8>),
    /// UTF-8 text string.
    Text(String),
    /// Array of items.
    Array(Vec<Value>),
    /// Map as ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// Tagged item (tag number, content).
    Tag(u64, Box<Value>),
}

/// Smallest integer CBOR can represent: `-2^64`.
pub const MIN_CBOR_INTEGER: i128 = -1 - u64::MAX as i128;
/// Largest integer CBOR can represent: `2^64 - 1`.
pub const MAX_CBOR_INTEGER: i128 = u64::MAX as i128;

impl Value {
    /// Construct an integer value from any `i128` in `[-2^64, 2^64 - 1]`.
    ///
    /// # Errors
    ///
    /// Returns `IntegerOverflow` if `v` is outside the CBOR integer range.
    pub fn integer(v: i128) -> Result<Self, CborError> {
        if v >= 0 {
            u64::try_from(v)
                .map(Self::Unsigned)
                .map_err(|_| CborError::encode(ErrorCode::IntegerOverflow))
        } else {
            u64::try_from(-1 - v)
                .map(Self::Negative)
                .map_err(|_| CborError::encode(ErrorCode::IntegerOverflow))
        }
    }

    /// Construct a byte string.
    #[must_use]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Construct a map from ordered pairs.
    #[must_use]
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<Self>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` iff this is `Null`.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Return the boolean if this is a `Bool`.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Return the integer as `i128` if this is an integer.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Unsigned(v) => Some(i128::from(*v)),
            Self::Negative(n) => Some(-1 - i128::from(*n)),
            _ => None,
        }
    }

    /// Return the integer as `i64` if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_i128().and_then(|v| i64::try_from(v).ok())
    }

    /// Return the integer as `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// Return the float if this is a `Float`.
    #[inline]
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow the text if this is a `Text`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the bytes if this is a `Bytes`.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow the items if this is an `Array`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the pairs if this is a `Map`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Self, Self)]> {
        match self {
            Self::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Look up the first value stored under a text key.
    ///
    /// Returns `None` for non-maps and missing keys. With duplicate keys the first pair wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Unsigned(_) | Self::Negative(_) => "integer",
            Self::Float(_) => "float",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Tag(..) => "tag",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Unsigned(u64::from(v))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64);

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    let v = i64::from(v);
                    if v >= 0 {
                        Self::Unsigned(v.unsigned_abs())
                    } else {
                        // -1 - v is non-negative for all negative i64.
                        Self::Negative((-1 - v).unsigned_abs())
                    }
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
