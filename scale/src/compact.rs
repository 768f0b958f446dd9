//! Compact (variable-length) integer encoding and decoding.
//!
//! The two least significant bits of the first byte select the mode:
//!
//! | Mode   | Values                  | Encoding                                                      |
//! |--------|-------------------------|---------------------------------------------------------------|
//! | `0b00` | `0..=63`                | 1 byte, value in the upper 6 bits                             |
//! | `0b01` | `64..=16_383`           | 2 bytes (little-endian), value in the upper 14 bits           |
//! | `0b10` | `16_384..=2^30 - 1`     | 4 bytes (little-endian), value in the upper 30 bits           |
//! | `0b11` | `2^30..=2^536 - 1`      | 1 byte holding `(n - 4) << 2`, then `n` little-endian bytes   |
//!
//! Encoding always selects the smallest mode (and, in the last mode, the smallest `n`).
//! Decoding accepts any mode that can represent the value: a non-minimal encoding is
//! parsed rather than rejected.
//!
//! Compact integers are used as the length prefix of every sequence and dictionary.

use crate::{util::at_least, EncodeSize, Error, Read, Write};
use bytes::{Buf, BufMut};
use num_bigint::{BigInt, BigUint, Sign};
use tracing::trace;

const MODE_MASK: u8 = 0b11;
const MODE_SINGLE: u8 = 0b00;
const MODE_TWO: u8 = 0b01;
const MODE_FOUR: u8 = 0b10;

/// Largest value encoded in a single byte.
pub const MAX_SINGLE: u32 = (1 << 6) - 1;

/// Largest value encoded in two bytes.
pub const MAX_TWO: u32 = (1 << 14) - 1;

/// Largest value encoded in four bytes.
pub const MAX_FOUR: u32 = (1 << 30) - 1;

/// Fewest payload bytes following the length byte in big-integer mode.
const MIN_BIG_BYTES: usize = 4;

/// Most payload bytes following the length byte in big-integer mode.
pub const MAX_BIG_BYTES: usize = (u8::MAX >> 2) as usize + MIN_BIG_BYTES;

/// A trait for unsigned integers that can be compact encoded.
pub trait UInt: Sized {
    /// Returns the value if it is small enough for one of the fixed-width modes
    /// (at most [MAX_FOUR]).
    fn as_small(&self) -> Option<u32>;

    /// Returns the little-endian bytes of the value without trailing zero bytes.
    fn to_le_trimmed(&self) -> Vec<u8>;

    /// Returns the number of bytes [UInt::to_le_trimmed] would return.
    fn le_len(&self) -> usize {
        self.to_le_trimmed().len()
    }

    /// Converts a value decoded from a fixed-width mode, or `None` if it does not fit.
    fn from_small(value: u32) -> Option<Self>;

    /// Converts little-endian bytes, or `None` if the value does not fit.
    fn from_le(bytes: &[u8]) -> Option<Self>;
}

/// Strips trailing (most significant) zero bytes from a little-endian magnitude.
fn trim(bytes: &[u8]) -> &[u8] {
    let len = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    &bytes[..len]
}

// Implements the `UInt` trait for all unsigned primitive integers.
macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            #[inline]
            fn as_small(&self) -> Option<u32> {
                u32::try_from(*self).ok().filter(|v| *v <= MAX_FOUR)
            }

            fn to_le_trimmed(&self) -> Vec<u8> {
                self.to_le_bytes()[..self.le_len()].to_vec()
            }

            #[inline]
            fn le_len(&self) -> usize {
                std::mem::size_of::<$type>() - self.leading_zeros() as usize / 8
            }

            #[inline]
            fn from_small(value: u32) -> Option<Self> {
                <$type>::try_from(value).ok()
            }

            fn from_le(bytes: &[u8]) -> Option<Self> {
                let bytes = trim(bytes);
                let mut raw = [0u8; std::mem::size_of::<$type>()];
                if bytes.len() > raw.len() {
                    return None;
                }
                raw[..bytes.len()].copy_from_slice(bytes);
                Some(<$type>::from_le_bytes(raw))
            }
        }
    };
}
impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);
impl_uint!(u128);

impl UInt for BigUint {
    fn as_small(&self) -> Option<u32> {
        u32::try_from(self).ok().filter(|v| *v <= MAX_FOUR)
    }

    fn to_le_trimmed(&self) -> Vec<u8> {
        // `to_bytes_le` returns `[0]` for zero.
        let mut bytes = self.to_bytes_le();
        let len = trim(&bytes).len();
        bytes.truncate(len);
        bytes
    }

    fn le_len(&self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    fn from_small(value: u32) -> Option<Self> {
        Some(BigUint::from(value))
    }

    fn from_le(bytes: &[u8]) -> Option<Self> {
        Some(BigUint::from_bytes_le(bytes))
    }
}

/// Returns [Error::InvalidArgument] if `value` is too wide to be compact encoded.
pub fn check<T: UInt>(value: &T) -> Result<(), Error> {
    if value.le_len() > MAX_BIG_BYTES {
        return Err(Error::InvalidArgument("compact value exceeds 536 bits"));
    }
    Ok(())
}

/// Encodes an unsigned integer in its smallest compact form.
///
/// Panics if the value is wider than [MAX_BIG_BYTES] bytes (see [check]).
pub fn write<T: UInt>(value: &T, buf: &mut impl BufMut) {
    if let Some(small) = value.as_small() {
        if small <= MAX_SINGLE {
            buf.put_u8(((small as u8) << 2) | MODE_SINGLE);
        } else if small <= MAX_TWO {
            buf.put_u16_le(((small as u16) << 2) | u16::from(MODE_TWO));
        } else {
            buf.put_u32_le((small << 2) | u32::from(MODE_FOUR));
        }
        return;
    }

    // Anything above `MAX_FOUR` needs at least `MIN_BIG_BYTES` bytes.
    let bytes = value.to_le_trimmed();
    assert!(
        bytes.len() <= MAX_BIG_BYTES,
        "compact value exceeds {MAX_BIG_BYTES} bytes"
    );
    buf.put_u8((((bytes.len() - MIN_BIG_BYTES) as u8) << 2) | MODE_MASK);
    buf.put_slice(&bytes);
}

/// Calculates the number of bytes needed to compact encode an unsigned integer.
pub fn size<T: UInt>(value: &T) -> usize {
    match value.as_small() {
        Some(small) if small <= MAX_SINGLE => 1,
        Some(small) if small <= MAX_TWO => 2,
        Some(_) => 4,
        None => 1 + value.le_len(),
    }
}

/// Decodes a compact integer into `T`.
///
/// Returns [Error::TruncatedInput] if the buffer ends before the encoding does and
/// [Error::InvalidCompact] if the value does not fit in `T`.
pub fn read<T: UInt>(buf: &mut impl Buf) -> Result<T, Error> {
    at_least(buf, 1)?;
    let first = buf.get_u8();
    match first & MODE_MASK {
        MODE_SINGLE => T::from_small(u32::from(first >> 2)).ok_or(Error::InvalidCompact),
        MODE_TWO => {
            at_least(buf, 1)?;
            let value = u32::from(u16::from_le_bytes([first, buf.get_u8()]) >> 2);
            if value <= MAX_SINGLE {
                trace!(value, "non-canonical compact (two-byte mode)");
            }
            T::from_small(value).ok_or(Error::InvalidCompact)
        }
        MODE_FOUR => {
            at_least(buf, 3)?;
            let mut rest = [0u8; 3];
            buf.copy_to_slice(&mut rest);
            let value = u32::from_le_bytes([first, rest[0], rest[1], rest[2]]) >> 2;
            if value <= MAX_TWO {
                trace!(value, "non-canonical compact (four-byte mode)");
            }
            T::from_small(value).ok_or(Error::InvalidCompact)
        }
        _ => {
            let len = usize::from(first >> 2) + MIN_BIG_BYTES;
            at_least(buf, len)?;
            let mut bytes = vec![0u8; len];
            buf.copy_to_slice(&mut bytes);
            let significant = trim(&bytes).len();
            if significant < len
                || (len == MIN_BIG_BYTES
                    && u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) <= MAX_FOUR)
            {
                trace!(len, significant, "non-canonical compact (big-integer mode)");
            }
            T::from_le(&bytes).ok_or(Error::InvalidCompact)
        }
    }
}

/// An ergonomic wrapper to encode and decode an unsigned integer in compact form rather than
/// at its fixed width.
///
/// Defaults to an arbitrary-precision [BigUint].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Compact<T: UInt = BigUint>(pub T);

impl<T: UInt> Compact<T> {
    /// Wraps `value`, returning [Error::InvalidArgument] if it is too wide to encode.
    pub fn new(value: T) -> Result<Self, Error> {
        check(&value)?;
        Ok(Self(value))
    }

    /// Returns the wrapped integer.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: UInt> Write for Compact<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write(&self.0, buf);
    }
}

impl<T: UInt> EncodeSize for Compact<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        size(&self.0)
    }
}

impl<T: UInt> Read for Compact<T> {
    type Cfg = ();

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        read(buf).map(Self)
    }
}

macro_rules! impl_conversions {
    ($utype:ty, $stype:ty) => {
        impl From<$utype> for Compact<$utype> {
            fn from(value: $utype) -> Self {
                Self(value)
            }
        }

        impl From<$utype> for Compact<BigUint> {
            fn from(value: $utype) -> Self {
                Self(BigUint::from(value))
            }
        }

        impl TryFrom<$stype> for Compact<$utype> {
            type Error = Error;

            fn try_from(value: $stype) -> Result<Self, Error> {
                <$utype>::try_from(value)
                    .map(Self)
                    .map_err(|_| Error::InvalidArgument("negative compact value"))
            }
        }
    };
}
impl_conversions!(u8, i8);
impl_conversions!(u16, i16);
impl_conversions!(u32, i32);
impl_conversions!(u64, i64);
impl_conversions!(u128, i128);

impl TryFrom<BigUint> for Compact<BigUint> {
    type Error = Error;

    fn try_from(value: BigUint) -> Result<Self, Error> {
        Self::new(value)
    }
}

impl TryFrom<BigInt> for Compact<BigUint> {
    type Error = Error;

    fn try_from(value: BigInt) -> Result<Self, Error> {
        match value.into_parts() {
            (Sign::Minus, _) => Err(Error::InvalidArgument("negative compact value")),
            (_, magnitude) => Self::new(magnitude),
        }
    }
}
