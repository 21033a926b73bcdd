// Working-buffer allocation for the transform passes.
// Sizes are overflow-checked before anything is requested from the allocator,
// and allocation failure comes back as an Error instead of an abort.
use crate::error::{Error, Result};

/// `a * b`, or SizeOverflow naming what was being sized.
pub fn checked_mul(a: usize, b: usize, what: &'static str) -> Result<usize> {
    a.checked_mul(b).ok_or(Error::SizeOverflow(what))
}

/// Empty Vec with room for exactly `len` elements.
pub fn with_capacity<T>(len: usize, what: &'static str) -> Result<Vec<T>> {
    // element count × element size must fit before we ask for it
    checked_mul(len, size_of::<T>().max(1), what)?;
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|source| Error::Allocation { what, source })?;
    Ok(v)
}

/// Vec of `len` copies of `value`.
pub fn filled<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut v = with_capacity(len, what)?;
    v.resize(len, value);
    Ok(v)
}
