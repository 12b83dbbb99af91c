use alloc::string::String;
use alloc::vec::Vec;

use crate::{CborError, ErrorCode};

#[inline]
pub const fn alloc_failed(offset: usize) -> CborError {
    CborError::decode(ErrorCode::AllocationFailed, offset)
}

#[inline]
pub fn try_reserve<T>(v: &mut Vec<T>, additional: usize, offset: usize) -> Result<(), CborError> {
    v.try_reserve(additional).map_err(|_| alloc_failed(offset))
}

#[inline]
pub fn try_vec_with_capacity<T>(cap: usize, offset: usize) -> Result<Vec<T>, CborError> {
    let mut v = Vec::new();
    v.try_reserve_exact(cap).map_err(|_| alloc_failed(offset))?;
    Ok(v)
}

#[inline]
pub fn try_vec_from_slice(bytes: &[u8], offset: usize) -> Result<Vec<u8>, CborError> {
    let mut v = try_vec_with_capacity(bytes.len(), offset)?;
    v.extend_from_slice(bytes);
    Ok(v)
}

#[inline]
pub fn try_string_from_str(s: &str, offset: usize) -> Result<String, CborError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())
        .map_err(|_| alloc_failed(offset))?;
    out.push_str(s);
    Ok(out)
}

#[inline]
pub fn try_push_str(out: &mut String, s: &str, offset: usize) -> Result<(), CborError> {
    out.try_reserve(s.len()).map_err(|_| alloc_failed(offset))?;
    out.push_str(s);
    Ok(())
}
