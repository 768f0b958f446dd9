//! Codec implementations for Rust primitive types.
//!
//! Fixed-width integers are written little-endian at their full width and implement
//! [FixedSize]. To encode an integer by magnitude instead, wrap it in
//! [Compact](crate::Compact).
//!
//! Arrays (`[T; N]`) are the concatenation of their elements with no length prefix, since
//! the length is part of the type.
//!
//! `usize` and `isize` are omitted to prevent the wire format from depending on the target
//! architecture. Floating-point numbers have no encoding in this format.

use crate::{util::at_least, EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            type Cfg = ();

            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                Ok(buf.$read_method())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_numeric!(u8, get_u8, put_u8);
impl_numeric!(u16, get_u16_le, put_u16_le);
impl_numeric!(u32, get_u32_le, put_u32_le);
impl_numeric!(u64, get_u64_le, put_u64_le);
impl_numeric!(u128, get_u128_le, put_u128_le);
impl_numeric!(i8, get_i8, put_i8);
impl_numeric!(i16, get_i16_le, put_i16_le);
impl_numeric!(i32, get_i32_le, put_i32_le);
impl_numeric!(i64, get_i64_le, put_i64_le);
impl_numeric!(i128, get_i128_le, put_i128_le);

// Bool implementation
impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(u8::from(*self));
    }
}

impl Read for bool {
    type Cfg = ();

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        match u8::read(buf)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

impl FixedSize for bool {
    const SIZE: usize = 1;
}

// Unit implementation
impl Write for () {
    #[inline]
    fn write(&self, _: &mut impl BufMut) {}
}

impl Read for () {
    type Cfg = ();

    #[inline]
    fn read_cfg(_: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(())
    }
}

impl FixedSize for () {
    const SIZE: usize = 0;
}

// Constant-size array implementation
impl<T: Write, const N: usize> Write for [T; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize, const N: usize> EncodeSize for [T; N] {
    #[inline]
    fn encode_size(&self) -> usize {
        self.iter().map(EncodeSize::encode_size).sum()
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    type Cfg = T::Cfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::read_cfg(buf, cfg)?);
        }
        items
            .try_into()
            .map_err(|_| Error::Invalid("array", "length mismatch"))
    }
}

// Option implementation
impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Some(inner) => {
                buf.put_u8(1);
                inner.write(buf);
            }
            None => buf.put_u8(0),
        }
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        1 + self.as_ref().map_or(0, EncodeSize::encode_size)
    }
}

impl<T: Read> Read for Option<T> {
    type Cfg = T::Cfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(buf)? {
            0 => Ok(None),
            1 => Ok(Some(T::read_cfg(buf, cfg)?)),
            tag => Err(Error::InvalidEnum(tag)),
        }
    }
}

// Result implementation
impl<T: Write, E: Write> Write for Result<T, E> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Ok(value) => {
                buf.put_u8(0);
                value.write(buf);
            }
            Err(err) => {
                buf.put_u8(1);
                err.write(buf);
            }
        }
    }
}

impl<T: EncodeSize, E: EncodeSize> EncodeSize for Result<T, E> {
    #[inline]
    fn encode_size(&self) -> usize {
        1 + match self {
            Ok(value) => value.encode_size(),
            Err(err) => err.encode_size(),
        }
    }
}

impl<T: Read, E: Read> Read for Result<T, E> {
    type Cfg = (T::Cfg, E::Cfg);

    #[inline]
    fn read_cfg(buf: &mut impl Buf, (ok_cfg, err_cfg): &Self::Cfg) -> Result<Self, Error> {
        match u8::read(buf)? {
            0 => Ok(Ok(T::read_cfg(buf, ok_cfg)?)),
            1 => Ok(Err(E::read_cfg(buf, err_cfg)?)),
            tag => Err(Error::InvalidEnum(tag)),
        }
    }
}
