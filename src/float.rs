use half::f16;

/// Half-precision quiet NaN, the single NaN encoding the encoder emits.
pub const HALF_NAN_BITS: u16 = 0x7e00;

/// The narrowest IEEE-754 width that holds a value exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    /// binary16 bit pattern (major 7, ai 25).
    Half(u16),
    /// binary32 bit pattern (major 7, ai 26).
    Single(u32),
    /// binary64 bit pattern (major 7, ai 27).
    Double(u64),
}

/// Pick the shortest encoding that round-trips `v` exactly.
///
/// The sign of zero is preserved. All NaNs collapse to [`HALF_NAN_BITS`].
#[must_use]
pub fn shortest(v: f64) -> FloatWidth {
    if v.is_nan() {
        return FloatWidth::Half(HALF_NAN_BITS);
    }

    let half = f16::from_f64(v);
    if half.to_f64().to_bits() == v.to_bits() {
        return FloatWidth::Half(half.to_bits());
    }

    #[allow(clippy::cast_possible_truncation)]
    let single = v as f32;
    if f64::from(single).to_bits() == v.to_bits() {
        return FloatWidth::Single(single.to_bits());
    }

    FloatWidth::Double(v.to_bits())
}

#[inline]
#[must_use]
pub fn widen_half(bits: u16) -> f64 {
    f16::from_bits(bits).to_f64()
}

#[inline]
#[must_use]
pub fn widen_single(bits: u32) -> f64 {
    f64::from(f32::from_bits(bits))
}
