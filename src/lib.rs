//! # dyn-cbor
//!
//! Bidirectional conversion between a dynamic value tree and CBOR (RFC 8949) bytes.
//!
//! ## Overview
//!
//! - [`Value`] models every CBOR data item this crate handles: integers (full 64-bit unsigned
//!   and negative range), floats, byte and text strings, arrays, maps with arbitrary keys,
//!   booleans, null, and (opt-in) tags.
//! - [`encode`] is deterministic and infallible: shortest integer and length heads, and the
//!   narrowest float width that round-trips exactly.
//! - [`decode`] accepts any well-formed CBOR, including indefinite-length strings, arrays and
//!   maps, and rejects malformed or hostile input with a [`CborError`] carrying a stable
//!   [`ErrorCode`] and the byte offset. Every length claim is checked against the remaining
//!   input before allocation, and nesting is capped (256 by default).
//! - The bridge maps Rust types to and from [`Value`]: [`CborRepresentable`] and
//!   [`FromCborValue`] (derivable), and serde support behind the `serde` feature.
//!
//! ```
//! use dyn_cbor::{decode, encode, Value};
//!
//! let value = Value::map([("a", 1), ("b", 2)]);
//! let bytes = encode(&value);
//! assert_eq!(bytes, [0xa2, 0x61, 0x61, 0x01, 0x61, 0x62, 0x02]);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! assert_eq!(value.to_string(), r#"{"a": 1, "b": 2}"#);
//! ```
//!
//! ## Decoding policy
//!
//! - A buffer passed to [`decode`] must hold exactly one item; use [`decode_prefix`] or
//!   [`Decoder`] for CBOR sequences.
//! - Tags are rejected unless [`TagPolicy::Passthrough`] is configured.
//! - Simple values other than `false`, `true` and `null` (including `undefined`) are rejected.
//! - Duplicate map keys are kept in wire order.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: `HashMap` conversions and std-friendly error integration.
//! - `tracing` *(default)*: emits `trace` events for encode/decode and `debug` events with the
//!   error code and offset for rejected input.
//! - `serde`: `Serialize`/`Deserialize` for [`Value`], serde-based conversions, and serde
//!   derives for the option types.
//! - `simdutf8`: SIMD-accelerated UTF-8 validation where supported.
//!
//! ## `no_std`
//!
//! Without `std` the crate is `no_std` and requires `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod alloc_util;
mod bridge;
mod decode;
mod diag;
mod encode;
mod error;
mod float;
pub mod hex;
mod limits;
#[cfg(feature = "serde")]
mod serde_impl;
mod utf8;
mod value;
mod wire;

pub use crate::bridge::{from_slice, to_vec, ByteBuf, CborRepresentable, FromCborValue};
pub use crate::decode::{decode, decode_prefix, decode_with, Decoder};
pub use crate::encode::{encode, encode_into, Encoder};
pub use crate::error::{CborError, ErrorCode, ErrorKind};
pub use crate::limits::{
    DecodeLimits, DecodeOptions, TagPolicy, DEFAULT_MAX_CONTAINER_LEN, DEFAULT_MAX_DEPTH,
};
pub use crate::value::{Value, MAX_CBOR_INTEGER, MIN_CBOR_INTEGER};

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use crate::serde_impl::{from_value, from_value_ref, serde_from_slice, serde_to_vec, to_value};

pub use dyn_cbor_derive::{CborRepresentable, FromCborValue};

#[doc(hidden)]
pub mod __private {
    pub use crate::bridge::derive_support::*;
    pub use alloc::string::String;
    pub use alloc::vec;
}
