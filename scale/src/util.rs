//! Helpers shared by codec implementations.

use crate::{compact, Error, RangeCfg};
use bytes::{Buf, BufMut};
use std::ops::{Bound, RangeBounds};

/// Checks that at least `len` bytes remain in the buffer.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::TruncatedInput);
    }
    Ok(())
}

/// Writes the compact length prefix of a sequence or dictionary.
#[inline]
pub(crate) fn write_len(len: usize, buf: &mut impl BufMut) {
    compact::write(&(len as u64), buf);
}

/// Returns the size of the compact length prefix for `len` items.
#[inline]
pub(crate) fn len_size(len: usize) -> usize {
    compact::size(&(len as u64))
}

/// Reads a compact length prefix and checks it against `range`.
#[inline]
pub(crate) fn read_len(buf: &mut impl Buf, range: &RangeCfg) -> Result<usize, Error> {
    let len = compact::read::<u64>(buf)?;
    let len = usize::try_from(len).map_err(|_| Error::InvalidCompact)?;
    if !range.contains(len) {
        return Err(Error::InvalidLength(len));
    }
    Ok(len)
}

/// Reads the length prefix of a collection of `T`.
///
/// A zero-sized item may occupy no input, so when `range` has no upper bound the count of
/// zero-sized items is limited to the bytes remaining. Supply a bounded [RangeCfg] to decode
/// longer collections of such items.
#[inline]
pub(crate) fn read_items_len<T>(buf: &mut impl Buf, range: &RangeCfg) -> Result<usize, Error> {
    let len = read_len(buf, range)?;
    if std::mem::size_of::<T>() == 0
        && matches!(range.end_bound(), Bound::Unbounded)
        && len > buf.remaining()
    {
        return Err(Error::InvalidLength(len));
    }
    Ok(len)
}
