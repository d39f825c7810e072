//! Fallible buffer growth.

use crate::util::{PixHomError, PixHomResult};

/// Pushes `item`, surfacing allocation failure instead of aborting.
#[inline]
pub(crate) fn try_push<T>(buf: &mut Vec<T>, item: T, what: &'static str) -> PixHomResult<()> {
    buf.try_reserve(1)
        .map_err(|_| PixHomError::AllocationFailure { what })?;
    buf.push(item);
    Ok(())
}

/// Allocates a vector of `len` copies of `value`.
pub(crate) fn try_filled<T: Clone>(
    len: usize,
    value: T,
    what: &'static str,
) -> PixHomResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| PixHomError::AllocationFailure { what })?;
    buf.resize(len, value);
    Ok(buf)
}
