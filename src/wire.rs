//! CBOR framing tables and the bounds-checked input cursor.

use crate::{CborError, ErrorCode};

/// Major type 0: unsigned integer.
pub const MAJOR_UNSIGNED: u8 = 0;
/// Major type 1: negative integer `-1 - n`.
pub const MAJOR_NEGATIVE: u8 = 1;
/// Major type 2: byte string.
pub const MAJOR_BYTES: u8 = 2;
/// Major type 3: UTF-8 text string.
pub const MAJOR_TEXT: u8 = 3;
/// Major type 4: array.
pub const MAJOR_ARRAY: u8 = 4;
/// Major type 5: map.
pub const MAJOR_MAP: u8 = 5;
/// Major type 6: tag.
pub const MAJOR_TAG: u8 = 6;
/// Major type 7: floats and simple values.
pub const MAJOR_SIMPLE: u8 = 7;

/// Additional info: 1-byte argument follows.
pub const AI_U8: u8 = 24;
/// Additional info: 2-byte argument follows (half float under major 7).
pub const AI_U16: u8 = 25;
/// Additional info: 4-byte argument follows (single float under major 7).
pub const AI_U32: u8 = 26;
/// Additional info: 8-byte argument follows (double float under major 7).
pub const AI_U64: u8 = 27;
/// Additional info: indefinite length (break under major 7).
pub const AI_INDEFINITE: u8 = 31;

/// Simple value `false`.
pub const SIMPLE_FALSE: u8 = 20;
/// Simple value `true`.
pub const SIMPLE_TRUE: u8 = 21;
/// Simple value `null`.
pub const SIMPLE_NULL: u8 = 22;
/// Simple value `undefined`.
pub const SIMPLE_UNDEFINED: u8 = 23;

/// The break stop-code terminating indefinite-length items.
pub const BREAK: u8 = initial_byte(MAJOR_SIMPLE, AI_INDEFINITE);

/// Compose a leading byte from a major type and additional info.
#[inline]
#[must_use]
pub const fn initial_byte(major: u8, ai: u8) -> u8 {
    (major << 5) | (ai & 0x1f)
}

/// A decoded leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub major: u8,
    pub ai: u8,
    /// Offset of the leading byte.
    pub off: usize,
}

impl Header {
    #[inline]
    pub const fn is_indefinite(self) -> bool {
        self.ai == AI_INDEFINITE
    }
}

#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn peek_u8(&self) -> Result<u8, CborError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| CborError::decode(ErrorCode::UnexpectedEof, self.pos))
    }

    pub fn read_u8(&mut self) -> Result<u8, CborError> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], CborError> {
        let off = self.pos;
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| CborError::decode(ErrorCode::LengthExceedsBuffer, off))?;
        if end > self.data.len() {
            return Err(CborError::decode(ErrorCode::UnexpectedEof, off));
        }
        let s = &self.data[self.pos..end];
        self.pos = end;
        Ok(s)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CborError> {
        let s = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(s);
        Ok(out)
    }

    pub fn read_be_u16(&mut self) -> Result<u16, CborError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_be_u32(&mut self) -> Result<u32, CborError> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_be_u64(&mut self) -> Result<u64, CborError> {
        self.read_array().map(u64::from_be_bytes)
    }

    pub fn read_header(&mut self) -> Result<Header, CborError> {
        let off = self.pos;
        let ib = self.read_u8()?;
        Ok(Header {
            major: ib >> 5,
            ai: ib & 0x1f,
            off,
        })
    }

    /// Read the argument selected by `header.ai`.
    ///
    /// Additional info 28..=31 is rejected here; callers handle indefinite lengths first.
    pub fn read_argument(&mut self, header: Header) -> Result<u64, CborError> {
        match header.ai {
            0..=23 => Ok(u64::from(header.ai)),
            AI_U8 => Ok(u64::from(self.read_u8()?)),
            AI_U16 => Ok(u64::from(self.read_be_u16()?)),
            AI_U32 => Ok(u64::from(self.read_be_u32()?)),
            AI_U64 => self.read_be_u64(),
            _ => Err(CborError::decode(ErrorCode::InvalidMajorType, header.off)),
        }
    }

    /// Check a length claim of `len` units of `unit` bytes each against the remaining input.
    pub fn check_claim(&self, len: u64, unit: usize, off: usize) -> Result<usize, CborError> {
        let fits = usize::try_from(len)
            .ok()
            .and_then(|n| n.checked_mul(unit).map(|bytes| (n, bytes)));
        match fits {
            Some((n, bytes)) if bytes <= self.remaining() => Ok(n),
            _ => Err(CborError::decode(ErrorCode::LengthExceedsBuffer, off)),
        }
    }
}
