//! Length calculations for BER-TLV data objects

use crate::{Decodable, Decoder, Error, ErrorKind, Result};
use core::{convert::TryFrom, fmt, ops::Add};

/// BER-TLV-encoded length, also used for byte positions within a message.
///
/// By definition, in the range `0..=u32::MAX`
///
/// The length field consists of one to five consecutive bytes.
/// - If the first byte is in `00..=7F`, it is the length itself (short form).
/// - If the first byte is `81`, `82`, `83` or `84`, the length is the
///   following one, two, three or four bytes, big-endian (long form).
///
/// Every other initial byte, including the indefinite form `80`, is rejected.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Length(u32);

impl Length {
    /// Return a length of `0`.
    pub const fn zero() -> Self {
        Length(0)
    }

    /// Get the maximum length supported by this crate
    pub const fn max() -> usize {
        u32::MAX as usize
    }

    /// Convert length to `usize`
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Add for Length {
    type Output = Result<Self>;

    fn add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Length)
            .ok_or_else(|| ErrorKind::Overflow.into())
    }
}

impl Add<u8> for Length {
    type Output = Result<Self>;

    fn add(self, other: u8) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<usize> for Length {
    type Output = Result<Self>;

    fn add(self, other: usize) -> Result<Self> {
        self + Length::try_from(other)?
    }
}

impl Add<Length> for Result<Length> {
    type Output = Self;

    fn add(self, other: Length) -> Self {
        self? + other
    }
}

impl From<u8> for Length {
    fn from(len: u8) -> Length {
        Length(len as u32)
    }
}

impl From<u16> for Length {
    fn from(len: u16) -> Length {
        Length(len as u32)
    }
}

impl From<u32> for Length {
    fn from(len: u32) -> Length {
        Length(len)
    }
}

impl From<Length> for u32 {
    fn from(len: Length) -> u32 {
        len.0
    }
}

impl From<Length> for usize {
    fn from(len: Length) -> usize {
        len.to_usize()
    }
}

impl TryFrom<usize> for Length {
    type Error = Error;

    fn try_from(len: usize) -> Result<Length> {
        u32::try_from(len)
            .map(Length)
            .map_err(|_| ErrorKind::Overflow.into())
    }
}

impl Decodable<'_> for Length {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Length> {
        match decoder.byte()? {
            len @ 0x00..=0x7F => Ok(len.into()),
            marker @ 0x81..=0x84 => {
                let count = (marker & 0x7F) as usize;
                let be_len = decoder.bytes(count)?;
                let mut buf = [0u8; 4];
                buf[4 - count..].copy_from_slice(be_len);
                Ok(Length(u32::from_be_bytes(buf)))
            }
            byte => decoder.error(ErrorKind::UnsupportedLength { byte }),
        }
    }
}

impl PartialEq<usize> for Length {
    fn eq(&self, other: &usize) -> bool {
        u32::try_from(*other).map(|other| self.0 == other).unwrap_or(false)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
