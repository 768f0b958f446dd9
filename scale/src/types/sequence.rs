//! Codec implementations for ordered sequences.
//!
//! A sequence is encoded as the [compact](crate::compact) number of items followed by each
//! item's encoding, in order:
//!
//! ```text
//! Compact(len) || item_0 || item_1 || ... || item_{len-1}
//! ```
//!
//! Strings and [Bytes] are sequences of `u8` (a string is written as its UTF-8 bytes).
//!
//! When decoding, the length is checked against the [RangeCfg] before any item is read and
//! memory is reserved for no more items than there are bytes remaining. Without an upper
//! bound, a sequence of zero-sized items may not claim more items than there are bytes
//! remaining.

use crate::{
    util::{at_least, len_size, read_items_len, read_len, write_len},
    EncodeSize, Error, RangeCfg, Read, Write,
};
use bytes::{Buf, BufMut, Bytes};
use std::collections::VecDeque;

// Slice implementation
impl<T: Write> Write for [T] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for [T] {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

// Vec implementation
impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.as_slice().write(buf);
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_slice().encode_size()
    }
}

impl<T: Read> Read for Vec<T> {
    type Cfg = (RangeCfg, T::Cfg);

    #[inline]
    fn read_cfg(buf: &mut impl Buf, (range, cfg): &Self::Cfg) -> Result<Self, Error> {
        let len = read_items_len::<T>(buf, range)?;
        let mut vec = Vec::with_capacity(len.min(buf.remaining()));
        for _ in 0..len {
            vec.push(T::read_cfg(buf, cfg)?);
        }
        Ok(vec)
    }
}

// VecDeque implementation
impl<T: Write> Write for VecDeque<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for VecDeque<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read> Read for VecDeque<T> {
    type Cfg = (RangeCfg, T::Cfg);

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        Vec::<T>::read_cfg(buf, cfg).map(VecDeque::from)
    }
}

// String implementation
impl Write for str {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        buf.put_slice(self.as_bytes());
    }
}

impl EncodeSize for str {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.len()
    }
}

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        self.as_str().write(buf);
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_str().encode_size()
    }
}

impl Read for String {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let len = read_len(buf, range)?;
        at_least(buf, len)?;
        let mut bytes = vec![0u8; len];
        buf.copy_to_slice(&mut bytes);
        String::from_utf8(bytes).map_err(|_| Error::Invalid("String", "invalid UTF-8"))
    }
}

// Bytes implementation
impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_len(self.len(), buf);
        buf.put_slice(self);
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        len_size(self.len()) + self.len()
    }
}

impl Read for Bytes {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let len = read_len(buf, range)?;
        at_least(buf, len)?;
        Ok(buf.copy_to_bytes(len))
    }
}
