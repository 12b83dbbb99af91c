//! Conversions between Rust-native types and [`Value`].

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Deref;

use crate::{decode, encode, CborError, ErrorCode, Value};

/// A type with a CBOR representation.
///
/// Implemented for primitives, strings, options, sequences, maps, [`ByteBuf`] and [`Value`]
/// itself. User types usually derive it with `#[derive(CborRepresentable)]`:
///
/// - named structs become text-keyed maps in field order,
/// - tuple structs become arrays (newtypes are transparent),
/// - unit structs become `null`,
/// - enum unit variants become their name as text, and data variants a one-pair map
///   `{name: payload}`.
///
/// Field and variant names can be changed with `#[cbor(rename = "...")]`, and fields left out
/// with `#[cbor(skip)]`.
pub trait CborRepresentable {
    /// Build the CBOR value for `self`.
    fn to_cbor_value(&self) -> Value;
}

/// A type that can be rebuilt from a decoded [`Value`].
pub trait FromCborValue: Sized {
    /// Convert `value` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` if the value has the wrong shape, or `IntegerOverflow` if an
    /// integer does not fit the target type.
    fn from_cbor_value(value: Value) -> Result<Self, CborError>;
}

/// An owned byte string.
///
/// `Vec<u8>` maps to an array of integers like every other `Vec<T>`; wrap it in `ByteBuf` to get
/// a CBOR byte string (major type 2) instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteBuf(pub Vec<u8>);

impl ByteBuf {
    /// Create an empty byte buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Consume the wrapper and return the bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl Deref for ByteBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[inline]
pub(crate) const fn unsupported() -> CborError {
    CborError::encode(ErrorCode::UnsupportedType)
}

#[inline]
const fn overflow() -> CborError {
    CborError::encode(ErrorCode::IntegerOverflow)
}

/// Encode any representable value.
#[must_use]
pub fn to_vec<T: CborRepresentable + ?Sized>(value: &T) -> Vec<u8> {
    encode(&value.to_cbor_value())
}

/// Decode one CBOR item and convert it into `T`.
///
/// # Errors
///
/// Returns a decode error for malformed bytes, or a conversion error if the item does not fit
/// `T`.
pub fn from_slice<T: FromCborValue>(bytes: &[u8]) -> Result<T, CborError> {
    T::from_cbor_value(decode(bytes)?)
}

impl CborRepresentable for Value {
    fn to_cbor_value(&self) -> Value {
        self.clone()
    }
}

impl FromCborValue for Value {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        Ok(value)
    }
}

impl CborRepresentable for () {
    fn to_cbor_value(&self) -> Value {
        Value::Null
    }
}

impl FromCborValue for () {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        match value {
            Value::Null => Ok(()),
            _ => Err(unsupported()),
        }
    }
}

impl CborRepresentable for bool {
    fn to_cbor_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromCborValue for bool {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        value.as_bool().ok_or_else(unsupported)
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl CborRepresentable for $ty {
                fn to_cbor_value(&self) -> Value {
                    Value::from(*self)
                }
            }

            impl FromCborValue for $ty {
                fn from_cbor_value(value: Value) -> Result<Self, CborError> {
                    let v = value.as_i128().ok_or_else(unsupported)?;
                    Self::try_from(v).map_err(|_| overflow())
                }
            }
        )*
    };
}

impl_integer!(u8, u16, u32, u64, i8, i16, i32, i64);

impl CborRepresentable for usize {
    fn to_cbor_value(&self) -> Value {
        // usize is at most 64 bits on every supported target.
        Value::Unsigned(*self as u64)
    }
}

impl FromCborValue for usize {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        let v = value.as_i128().ok_or_else(unsupported)?;
        Self::try_from(v).map_err(|_| overflow())
    }
}

impl CborRepresentable for isize {
    fn to_cbor_value(&self) -> Value {
        // isize is at most 64 bits on every supported target.
        Value::from(*self as i64)
    }
}

impl FromCborValue for isize {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        let v = value.as_i128().ok_or_else(unsupported)?;
        Self::try_from(v).map_err(|_| overflow())
    }
}

impl FromCborValue for i128 {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        value.as_i128().ok_or_else(unsupported)
    }
}

impl FromCborValue for u128 {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        let v = value.as_i128().ok_or_else(unsupported)?;
        Self::try_from(v).map_err(|_| overflow())
    }
}

impl CborRepresentable for f64 {
    fn to_cbor_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromCborValue for f64 {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        value.as_f64().ok_or_else(unsupported)
    }
}

impl CborRepresentable for f32 {
    fn to_cbor_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FromCborValue for f32 {
    /// Only floats that survive narrowing to `f32` exactly (or NaN) are accepted.
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        let v = value.as_f64().ok_or_else(unsupported)?;
        #[allow(clippy::cast_possible_truncation)]
        let narrow = v as Self;
        if v.is_nan() || f64::from(narrow).to_bits() == v.to_bits() {
            Ok(narrow)
        } else {
            Err(unsupported())
        }
    }
}

impl CborRepresentable for str {
    fn to_cbor_value(&self) -> Value {
        Value::Text(self.into())
    }
}

impl CborRepresentable for String {
    fn to_cbor_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FromCborValue for String {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(unsupported()),
        }
    }
}

impl CborRepresentable for ByteBuf {
    fn to_cbor_value(&self) -> Value {
        Value::Bytes(self.0.clone())
    }
}

impl FromCborValue for ByteBuf {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        match value {
            Value::Bytes(b) => Ok(Self(b)),
            _ => Err(unsupported()),
        }
    }
}

impl<T: CborRepresentable + ?Sized> CborRepresentable for &T {
    fn to_cbor_value(&self) -> Value {
        (**self).to_cbor_value()
    }
}

impl<T: CborRepresentable + ?Sized> CborRepresentable for Box<T> {
    fn to_cbor_value(&self) -> Value {
        (**self).to_cbor_value()
    }
}

impl<T: FromCborValue> FromCborValue for Box<T> {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        T::from_cbor_value(value).map(Box::new)
    }
}

impl<T: CborRepresentable> CborRepresentable for Option<T> {
    fn to_cbor_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, CborRepresentable::to_cbor_value)
    }
}

impl<T: FromCborValue> FromCborValue for Option<T> {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_cbor_value(other).map(Some),
        }
    }
}

impl<T: CborRepresentable> CborRepresentable for [T] {
    fn to_cbor_value(&self) -> Value {
        Value::Array(self.iter().map(CborRepresentable::to_cbor_value).collect())
    }
}

impl<T: CborRepresentable, const N: usize> CborRepresentable for [T; N] {
    fn to_cbor_value(&self) -> Value {
        self.as_slice().to_cbor_value()
    }
}

impl<T: CborRepresentable> CborRepresentable for Vec<T> {
    fn to_cbor_value(&self) -> Value {
        self.as_slice().to_cbor_value()
    }
}

impl<T: FromCborValue> FromCborValue for Vec<T> {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_cbor_value).collect(),
            _ => Err(unsupported()),
        }
    }
}

fn map_to_value<'a, K, V, I>(entries: I) -> Value
where
    K: CborRepresentable + 'a,
    V: CborRepresentable + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    Value::Map(
        entries
            .map(|(k, v)| (k.to_cbor_value(), v.to_cbor_value()))
            .collect(),
    )
}

fn value_to_pairs<K, V>(value: Value) -> Result<Vec<(K, V)>, CborError>
where
    K: FromCborValue,
    V: FromCborValue,
{
    let Value::Map(pairs) = value else {
        return Err(unsupported());
    };
    pairs
        .into_iter()
        .map(|(k, v)| Ok((K::from_cbor_value(k)?, V::from_cbor_value(v)?)))
        .collect()
}

impl<K: CborRepresentable, V: CborRepresentable> CborRepresentable for BTreeMap<K, V> {
    fn to_cbor_value(&self) -> Value {
        map_to_value(self.iter())
    }
}

/// Later duplicates overwrite earlier ones.
impl<K: FromCborValue + Ord, V: FromCborValue> FromCborValue for BTreeMap<K, V> {
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        Ok(value_to_pairs(value)?.into_iter().collect())
    }
}

#[cfg(feature = "std")]
impl<K, V, S> CborRepresentable for std::collections::HashMap<K, V, S>
where
    K: CborRepresentable,
    V: CborRepresentable,
{
    /// Pairs follow the map's iteration order.
    fn to_cbor_value(&self) -> Value {
        map_to_value(self.iter())
    }
}

#[cfg(feature = "std")]
impl<K, V, S> FromCborValue for std::collections::HashMap<K, V, S>
where
    K: FromCborValue + Eq + core::hash::Hash,
    V: FromCborValue,
    S: core::hash::BuildHasher + Default,
{
    fn from_cbor_value(value: Value) -> Result<Self, CborError> {
        Ok(value_to_pairs(value)?.into_iter().collect())
    }
}

/// Support functions called by the derive macros. Not part of the public API.
#[doc(hidden)]
pub mod derive_support {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{unsupported, FromCborValue};
    use crate::{CborError, Value};

    /// Unwrap a map, failing with `UnsupportedType` otherwise.
    pub fn into_pairs(value: Value) -> Result<Vec<(Value, Value)>, CborError> {
        match value {
            Value::Map(pairs) => Ok(pairs),
            _ => Err(unsupported()),
        }
    }

    /// Unwrap an array of exactly `len` items.
    pub fn into_items(value: Value, len: usize) -> Result<Vec<Value>, CborError> {
        match value {
            Value::Array(items) if items.len() == len => Ok(items),
            _ => Err(unsupported()),
        }
    }

    /// Convert the next array item.
    pub fn next_item<T, I>(items: &mut I) -> Result<T, CborError>
    where
        T: FromCborValue,
        I: Iterator<Item = Value>,
    {
        T::from_cbor_value(items.next().ok_or_else(unsupported)?)
    }

    fn take(pairs: &mut Vec<(Value, Value)>, key: &str) -> Option<Value> {
        let idx = pairs.iter().position(|(k, _)| k.as_str() == Some(key))?;
        Some(pairs.remove(idx).1)
    }

    /// Convert the value stored under `key`; a missing key converts from `null`.
    pub fn field<T: FromCborValue>(
        pairs: &mut Vec<(Value, Value)>,
        key: &str,
    ) -> Result<T, CborError> {
        T::from_cbor_value(take(pairs, key).unwrap_or(Value::Null))
    }

    /// Convert the value stored under `key`, or fall back to `T::default()` when absent.
    pub fn field_or_default<T: FromCborValue + Default>(
        pairs: &mut Vec<(Value, Value)>,
        key: &str,
    ) -> Result<T, CborError> {
        take(pairs, key).map_or_else(|| Ok(T::default()), T::from_cbor_value)
    }

    /// Require `null`.
    pub fn expect_null(value: &Value) -> Result<(), CborError> {
        if value.is_null() {
            Ok(())
        } else {
            Err(unsupported())
        }
    }

    /// Split an enum encoding into its variant name and optional payload.
    ///
    /// Unit variants are bare text; data variants are a single-pair map keyed by the name.
    pub fn enum_parts(value: Value) -> Result<(String, Option<Value>), CborError> {
        match value {
            Value::Text(name) => Ok((name, None)),
            Value::Map(pairs) if pairs.len() == 1 => match pairs.into_iter().next() {
                Some((Value::Text(name), payload)) => Ok((name, Some(payload))),
                _ => Err(unsupported()),
            },
            _ => Err(unsupported()),
        }
    }

    /// Error for an unknown variant or shape mismatch.
    #[must_use]
    pub const fn mismatch() -> CborError {
        unsupported()
    }
}
