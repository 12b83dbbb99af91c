use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::alloc_util::{
    try_push_str, try_reserve, try_string_from_str, try_vec_from_slice, try_vec_with_capacity,
};
use crate::float::{widen_half, widen_single};
use crate::utf8::text_at;
use crate::value::Value;
use crate::wire::{
    Cursor, Header, AI_INDEFINITE, AI_U16, AI_U32, AI_U64, AI_U8, BREAK, MAJOR_ARRAY,
    MAJOR_BYTES, MAJOR_MAP, MAJOR_NEGATIVE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UNSIGNED, SIMPLE_FALSE,
    SIMPLE_NULL, SIMPLE_TRUE, SIMPLE_UNDEFINED,
};
use crate::{CborError, DecodeOptions, ErrorCode, TagPolicy};

/// Recursive-descent decoder over a borrowed byte buffer.
///
/// A `Decoder` reads one item per [`Decoder::next_value`] call, which makes it usable for CBOR
/// sequences (RFC 8742). It also implements [`Iterator`], yielding items until the input is
/// exhausted or the first error.
///
/// Every length claim is checked against the remaining input before anything is allocated, and
/// nesting is bounded by [`crate::DecodeLimits::max_depth`]. Claimed element counts are summed
/// across the whole item and may not exceed the input length (or
/// [`crate::DecodeLimits::max_total_items`], if smaller), which keeps nested claims from
/// multiplying preallocation.
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    options: DecodeOptions,
    depth: usize,
    items_seen: usize,
    item_budget: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// Construct a decoder over `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `InputTooLarge` if `bytes` exceeds the configured input limit.
    pub fn new(bytes: &'a [u8], options: DecodeOptions) -> Result<Self, CborError> {
        if bytes.len() > options.limits.max_input_bytes {
            return Err(CborError::decode(ErrorCode::InputTooLarge, 0));
        }
        Ok(Self {
            cursor: Cursor::new(bytes),
            options,
            depth: 0,
            items_seen: 0,
            // Every item occupies at least one input byte.
            item_budget: options.limits.max_total_items.min(bytes.len()),
            failed: false,
        })
    }

    /// Return the current byte offset in the input.
    #[must_use]
    #[inline]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns `true` once every input byte has been consumed.
    #[must_use]
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Decode the next complete item.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the item is malformed, truncated, or violates limits. After an
    /// error the decoder position is unspecified.
    pub fn next_value(&mut self) -> Result<Value, CborError> {
        self.depth = 0;
        self.items_seen = 0;
        let res = self.parse_item();
        if let Err(err) = &res {
            self.failed = true;
            log_rejection(err);
        }
        res
    }

    fn parse_item(&mut self) -> Result<Value, CborError> {
        let header = self.cursor.read_header()?;
        match header.major {
            MAJOR_UNSIGNED => self.read_definite_argument(header).map(Value::Unsigned),
            MAJOR_NEGATIVE => self.read_definite_argument(header).map(Value::Negative),
            MAJOR_BYTES => self.parse_bytes(header).map(Value::Bytes),
            MAJOR_TEXT => self.parse_text(header).map(Value::Text),
            MAJOR_ARRAY => self.parse_array(header),
            MAJOR_MAP => self.parse_map(header),
            MAJOR_TAG => self.parse_tag(header),
            _ => self.parse_simple(header),
        }
    }

    fn read_definite_argument(&mut self, header: Header) -> Result<u64, CborError> {
        if header.is_indefinite() {
            return Err(CborError::decode(ErrorCode::InvalidMajorType, header.off));
        }
        self.cursor.read_argument(header)
    }

    fn parse_bytes(&mut self, header: Header) -> Result<Vec<u8>, CborError> {
        let max = self.options.limits.max_bytes_len;
        if !header.is_indefinite() {
            let raw = self.definite_payload(header, max)?;
            return try_vec_from_slice(raw, header.off);
        }

        let mut out = Vec::new();
        while let Some((raw, _)) = self.next_chunk(header, out.len(), max)? {
            try_reserve(&mut out, raw.len(), header.off)?;
            out.extend_from_slice(raw);
        }
        Ok(out)
    }

    fn parse_text(&mut self, header: Header) -> Result<String, CborError> {
        let max = self.options.limits.max_text_len;
        if !header.is_indefinite() {
            let raw = self.definite_payload(header, max)?;
            return try_string_from_str(text_at(raw, header.off)?, header.off);
        }

        // Each chunk must be valid UTF-8 on its own.
        let mut out = String::new();
        while let Some((raw, chunk_off)) = self.next_chunk(header, out.len(), max)? {
            try_push_str(&mut out, text_at(raw, chunk_off)?, chunk_off)?;
        }
        Ok(out)
    }

    fn definite_payload(&mut self, header: Header, max: usize) -> Result<&'a [u8], CborError> {
        let len = self.cursor.read_argument(header)?;
        let len = self.cursor.check_claim(len, 1, header.off)?;
        enforce_limit(len, max, header.off)?;
        self.cursor.read_exact(len)
    }

    /// Read the next chunk of an indefinite-length string, or `None` at its break.
    fn next_chunk(
        &mut self,
        outer: Header,
        joined: usize,
        max: usize,
    ) -> Result<Option<(&'a [u8], usize)>, CborError> {
        if self.take_break()? {
            return Ok(None);
        }
        let chunk = self.cursor.read_header()?;
        if chunk.major != outer.major || chunk.is_indefinite() {
            return Err(CborError::decode(ErrorCode::InvalidChunk, chunk.off));
        }
        let len = self.cursor.read_argument(chunk)?;
        let len = self.cursor.check_claim(len, 1, chunk.off)?;
        enforce_limit(joined.saturating_add(len), max, chunk.off)?;
        let raw = self.cursor.read_exact(len)?;
        Ok(Some((raw, chunk.off)))
    }

    fn parse_array(&mut self, header: Header) -> Result<Value, CborError> {
        let limits = self.options.limits;
        let definite = if header.is_indefinite() {
            None
        } else {
            let len = self.cursor.read_argument(header)?;
            // Every element takes at least one byte.
            let len = self.cursor.check_claim(len, 1, header.off)?;
            enforce_limit(len, limits.max_array_len, header.off)?;
            self.bump_items(len, header.off)?;
            Some(len)
        };

        self.enter(header.off)?;
        let mut items = try_vec_with_capacity(definite.unwrap_or(0), header.off)?;
        if let Some(len) = definite {
            for _ in 0..len {
                items.push(self.parse_item()?);
            }
        } else {
            while !self.take_break()? {
                let off = self.cursor.position();
                enforce_limit(items.len() + 1, limits.max_array_len, off)?;
                self.bump_items(1, off)?;
                try_reserve(&mut items, 1, off)?;
                items.push(self.parse_item()?);
            }
        }
        self.exit();
        Ok(Value::Array(items))
    }

    fn parse_map(&mut self, header: Header) -> Result<Value, CborError> {
        let limits = self.options.limits;
        let definite = if header.is_indefinite() {
            None
        } else {
            let len = self.cursor.read_argument(header)?;
            // Every pair takes at least two bytes.
            let len = self.cursor.check_claim(len, 2, header.off)?;
            enforce_limit(len, limits.max_map_len, header.off)?;
            self.bump_items(len.saturating_mul(2), header.off)?;
            Some(len)
        };

        self.enter(header.off)?;
        let mut pairs = try_vec_with_capacity(definite.unwrap_or(0), header.off)?;
        if let Some(len) = definite {
            for _ in 0..len {
                let key = self.parse_item()?;
                let value = self.parse_item()?;
                pairs.push((key, value));
            }
        } else {
            while !self.take_break()? {
                let off = self.cursor.position();
                enforce_limit(pairs.len() + 1, limits.max_map_len, off)?;
                self.bump_items(2, off)?;
                try_reserve(&mut pairs, 1, off)?;
                // A break in value position falls through to `parse_simple` and is rejected.
                let key = self.parse_item()?;
                let value = self.parse_item()?;
                pairs.push((key, value));
            }
        }
        self.exit();
        Ok(Value::Map(pairs))
    }

    fn parse_tag(&mut self, header: Header) -> Result<Value, CborError> {
        let tag = self.read_definite_argument(header)?;
        match self.options.tags {
            TagPolicy::Reject => Err(CborError::decode(ErrorCode::UnsupportedTag, header.off)),
            TagPolicy::Passthrough => {
                self.enter(header.off)?;
                let inner = self.parse_item()?;
                self.exit();
                Ok(Value::Tag(tag, Box::new(inner)))
            }
        }
    }

    fn parse_simple(&mut self, header: Header) -> Result<Value, CborError> {
        match header.ai {
            SIMPLE_FALSE => Ok(Value::Bool(false)),
            SIMPLE_TRUE => Ok(Value::Bool(true)),
            SIMPLE_NULL => Ok(Value::Null),
            AI_U16 => Ok(Value::Float(widen_half(self.cursor.read_be_u16()?))),
            AI_U32 => Ok(Value::Float(widen_single(self.cursor.read_be_u32()?))),
            AI_U64 => Ok(Value::Float(f64::from_bits(self.cursor.read_be_u64()?))),
            AI_U8 => {
                // Two-byte encodings of values below 32 are not well-formed.
                let code = if self.cursor.read_u8()? < 32 {
                    ErrorCode::InvalidMajorType
                } else {
                    ErrorCode::UnsupportedSimpleValue
                };
                Err(CborError::decode(code, header.off))
            }
            AI_INDEFINITE => Err(CborError::decode(ErrorCode::UnexpectedBreak, header.off)),
            // 0..=19 are unassigned, and `undefined` has no `Value` counterpart.
            0..=19 | SIMPLE_UNDEFINED => Err(CborError::decode(
                ErrorCode::UnsupportedSimpleValue,
                header.off,
            )),
            // 28..=30 are reserved.
            _ => Err(CborError::decode(ErrorCode::InvalidMajorType, header.off)),
        }
    }

    fn take_break(&mut self) -> Result<bool, CborError> {
        if self.cursor.peek_u8()? == BREAK {
            self.cursor.read_u8()?;
            return Ok(true);
        }
        Ok(false)
    }

    #[inline]
    fn enter(&mut self, off: usize) -> Result<(), CborError> {
        let next_depth = self.depth + 1;
        if next_depth > self.options.limits.max_depth {
            return Err(CborError::decode(ErrorCode::NestingTooDeep, off));
        }
        self.depth = next_depth;
        Ok(())
    }

    #[inline]
    fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    fn bump_items(&mut self, add: usize, off: usize) -> Result<(), CborError> {
        self.items_seen = self.items_seen.saturating_add(add);
        if self.items_seen > self.item_budget {
            return Err(CborError::decode(ErrorCode::LimitExceeded, off));
        }
        Ok(())
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Value, CborError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_at_end() {
            return None;
        }
        Some(self.next_value())
    }
}

#[inline]
const fn enforce_limit(len: usize, max: usize, off: usize) -> Result<(), CborError> {
    if len > max {
        return Err(CborError::decode(ErrorCode::LimitExceeded, off));
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn log_rejection(err: &CborError) {
    tracing::debug!(code = err.code.name(), offset = err.offset, "rejected cbor input");
}

#[cfg(not(feature = "tracing"))]
const fn log_rejection(_err: &CborError) {}

/// Decode exactly one CBOR item using default options.
///
/// Tags are rejected, nesting is capped at 256, and bytes after the item are an error.
///
/// # Errors
///
/// Returns a decode error describing the first structural violation.
pub fn decode(bytes: &[u8]) -> Result<Value, CborError> {
    decode_with(bytes, &DecodeOptions::new())
}

/// Decode exactly one CBOR item with explicit options.
///
/// # Errors
///
/// Returns `TrailingData` if bytes remain after the item, or any other decode error.
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Value, CborError> {
    let (value, end) = decode_prefix(bytes, options)?;
    if end != bytes.len() {
        let err = CborError::decode(ErrorCode::TrailingData, end);
        log_rejection(&err);
        return Err(err);
    }
    Ok(value)
}

/// Decode one CBOR item from the front of `bytes` and return it with the number of bytes used.
///
/// Trailing bytes are left for the caller.
///
/// # Errors
///
/// Returns a decode error if the leading item is malformed.
pub fn decode_prefix(bytes: &[u8], options: &DecodeOptions) -> Result<(Value, usize), CborError> {
    let mut decoder = Decoder::new(bytes, *options).inspect_err(log_rejection)?;
    let value = decoder.next_value()?;
    #[cfg(feature = "tracing")]
    tracing::trace!(len = decoder.position(), kind = value.type_name(), "decoded cbor item");
    Ok((value, decoder.position()))
}
