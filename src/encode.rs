use alloc::vec::Vec;

use crate::float::{self, FloatWidth};
use crate::value::Value;
use crate::wire::{
    initial_byte, AI_U16, AI_U32, AI_U64, AI_U8, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP,
    MAJOR_NEGATIVE, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UNSIGNED, SIMPLE_FALSE,
    SIMPLE_NULL, SIMPLE_TRUE,
};

/// Streaming encoder that appends CBOR items to a `Vec<u8>`.
///
/// Every method writes exactly one item header (plus payload for scalars). Container headers
/// are followed by the caller writing the announced number of children. Integers and lengths
/// always use their shortest form, and floats use the narrowest exact width.
///
/// Encoding cannot fail; the only resource consumed is the output buffer.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create a new encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create an encoder with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Create an encoder that appends to existing bytes.
    #[must_use]
    pub const fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    /// Return the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no bytes have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the bytes emitted so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume and return the encoded bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Encode CBOR null.
    pub fn null(&mut self) -> &mut Self {
        self.buf.push(initial_byte(MAJOR_SIMPLE, SIMPLE_NULL));
        self
    }

    /// Encode a CBOR boolean.
    pub fn bool(&mut self, v: bool) -> &mut Self {
        let simple = if v { SIMPLE_TRUE } else { SIMPLE_FALSE };
        self.buf.push(initial_byte(MAJOR_SIMPLE, simple));
        self
    }

    /// Encode an unsigned integer (major type 0).
    pub fn unsigned(&mut self, v: u64) -> &mut Self {
        self.head(MAJOR_UNSIGNED, v);
        self
    }

    /// Encode the negative integer `-1 - n` (major type 1).
    pub fn negative(&mut self, n: u64) -> &mut Self {
        self.head(MAJOR_NEGATIVE, n);
        self
    }

    /// Encode a signed integer, choosing major type 0 or 1.
    pub fn int(&mut self, v: i64) -> &mut Self {
        if v >= 0 {
            self.unsigned(v.unsigned_abs())
        } else {
            self.negative((-1 - v).unsigned_abs())
        }
    }

    /// Encode a float using the narrowest width that represents it exactly.
    pub fn float(&mut self, v: f64) -> &mut Self {
        match float::shortest(v) {
            FloatWidth::Half(bits) => {
                self.buf.push(initial_byte(MAJOR_SIMPLE, AI_U16));
                self.buf.extend_from_slice(&bits.to_be_bytes());
            }
            FloatWidth::Single(bits) => {
                self.buf.push(initial_byte(MAJOR_SIMPLE, AI_U32));
                self.buf.extend_from_slice(&bits.to_be_bytes());
            }
            FloatWidth::Double(bits) => {
                self.buf.push(initial_byte(MAJOR_SIMPLE, AI_U64));
                self.buf.extend_from_slice(&bits.to_be_bytes());
            }
        }
        self
    }

    /// Encode a definite-length byte string.
    pub fn bytes(&mut self, b: &[u8]) -> &mut Self {
        self.head_len(MAJOR_BYTES, b.len());
        self.buf.extend_from_slice(b);
        self
    }

    /// Encode a definite-length text string.
    pub fn text(&mut self, s: &str) -> &mut Self {
        // `str` guarantees valid UTF-8.
        self.head_len(MAJOR_TEXT, s.len());
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Encode a definite-length array header; `len` items must follow.
    pub fn array_header(&mut self, len: usize) -> &mut Self {
        self.head_len(MAJOR_ARRAY, len);
        self
    }

    /// Encode a definite-length map header; `len` key/value pairs must follow.
    pub fn map_header(&mut self, len: usize) -> &mut Self {
        self.head_len(MAJOR_MAP, len);
        self
    }

    /// Encode a tag header; exactly one item must follow.
    pub fn tag(&mut self, tag: u64) -> &mut Self {
        self.head(MAJOR_TAG, tag);
        self
    }

    /// Encode a complete value tree.
    ///
    /// Traversal is depth-first pre-order with an explicit stack, so deeply nested trees do not
    /// consume call stack.
    pub fn value(&mut self, root: &Value) -> &mut Self {
        let mut pending: Vec<&Value> = Vec::new();
        pending.push(root);

        while let Some(v) = pending.pop() {
            match v {
                Value::Null => {
                    self.null();
                }
                Value::Bool(b) => {
                    self.bool(*b);
                }
                Value::Unsigned(u) => {
                    self.unsigned(*u);
                }
                Value::Negative(n) => {
                    self.negative(*n);
                }
                Value::Float(f) => {
                    self.float(*f);
                }
                Value::Bytes(b) => {
                    self.bytes(b);
                }
                Value::Text(s) => {
                    self.text(s);
                }
                Value::Array(items) => {
                    self.array_header(items.len());
                    pending.extend(items.iter().rev());
                }
                Value::Map(pairs) => {
                    self.map_header(pairs.len());
                    for (k, v) in pairs.iter().rev() {
                        pending.push(v);
                        pending.push(k);
                    }
                }
                Value::Tag(tag, inner) => {
                    self.tag(*tag);
                    pending.push(inner);
                }
            }
        }
        self
    }

    fn head_len(&mut self, major: u8, len: usize) {
        // usize is at most 64 bits on every supported target.
        self.head(major, len as u64);
    }

    fn head(&mut self, major: u8, value: u64) {
        debug_assert!(major <= 7);
        if let Ok(v8) = u8::try_from(value) {
            if v8 < AI_U8 {
                self.buf.push(initial_byte(major, v8));
                return;
            }
            self.buf.push(initial_byte(major, AI_U8));
            self.buf.push(v8);
            return;
        }
        if let Ok(v16) = u16::try_from(value) {
            self.buf.push(initial_byte(major, AI_U16));
            self.buf.extend_from_slice(&v16.to_be_bytes());
            return;
        }
        if let Ok(v32) = u32::try_from(value) {
            self.buf.push(initial_byte(major, AI_U32));
            self.buf.extend_from_slice(&v32.to_be_bytes());
            return;
        }
        self.buf.push(initial_byte(major, AI_U64));
        self.buf.extend_from_slice(&value.to_be_bytes());
    }
}

/// Encode a value tree into a new buffer.
#[must_use]
pub fn encode(value: &Value) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.value(value);
    let out = enc.into_vec();
    #[cfg(feature = "tracing")]
    tracing::trace!(len = out.len(), kind = value.type_name(), "encoded cbor item");
    out
}

/// Append the encoding of a value tree to `out`.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) {
    let mut enc = Encoder::from_vec(core::mem::take(out));
    enc.value(value);
    *out = enc.into_vec();
}
