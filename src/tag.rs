use core::fmt;
use crate::{Decodable, Decoder, ErrorKind, Result};

const CLASS_OFFSET: usize = 6;
const CONSTRUCTED_OFFSET: usize = 5;

/// Indicator bit for constructed form encoding (i.e. vs primitive form)
const CONSTRUCTED_FLAG: u8 = 1u8 << CONSTRUCTED_OFFSET;

/// Low five bits of the first tag byte, all set when the tag continues.
const MULTI_BYTE_MASK: u8 = 0x1F;

/// Set on every subsequent tag byte except the last one
const NOT_LAST_TAG_OCTET_FLAG: u8 = 1u8 << 7;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
/// Class of BER tag.
pub enum Class {
    /// Tags defined by ASN.1 itself
    Universal = 0b00,
    /// Tags defined by an application standard, e.g. `6F`, `5F2D`
    Application = 0b01,
    /// Context-specific tags, e.g. `84`, `A5`
    Context = 0b10,
    /// Proprietary tags, e.g. `DF01`
    Private = 0b11,
}

impl From<u8> for Class {
    /// Class from the two high bits of a first tag byte.
    fn from(first_byte: u8) -> Self {
        use Class::*;
        match first_byte >> CLASS_OFFSET {
            0b00 => Universal,
            0b01 => Application,
            0b10 => Context,
            _ => Private,
        }
    }
}

/// BER-TLV tag, kept as the big-endian integer of its encoded bytes.
///
/// `5F 2D` is the tag `0x5F2D`, `9F 02` is `0x9F02`, `6F` is `0x6F`. Class and
/// the constructed flag are read off the first encoded byte.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag(u32);

impl Tag {
    /// Maximum number of bytes a tag may occupy, first byte included.
    pub const MAX_ENCODED_LEN: usize = 4;

    /// Tag from the big-endian integer of its encoded bytes, e.g. `0x5F2D`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The tag as an integer.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Number of bytes in the encoded tag.
    pub const fn encoded_len(self) -> usize {
        match self.0 {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFF_FFFF => 3,
            _ => 4,
        }
    }

    /// The first encoded byte, which carries class and form.
    pub const fn first_byte(self) -> u8 {
        (self.0 >> (8 * (self.encoded_len() - 1))) as u8
    }

    /// Does this tag denote a constructed data object?
    pub const fn is_constructed(self) -> bool {
        self.first_byte() & CONSTRUCTED_FLAG != 0
    }

    /// Class from the two high bits of the first encoded byte.
    pub fn class(self) -> Class {
        Class::from(self.first_byte())
    }
}

impl From<u32> for Tag {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Tag> for u32 {
    fn from(tag: Tag) -> u32 {
        tag.0
    }
}

impl PartialEq<u32> for Tag {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(0x{:02X}, class = {:?}, constructed = {})", self.0, self.class(), self.is_constructed())
    }
}

impl Decodable<'_> for Tag {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let first_byte = decoder.byte()?;
        let mut value = first_byte as u32;

        if first_byte & MULTI_BYTE_MASK != MULTI_BYTE_MASK {
            return Ok(Self(value));
        }

        let mut encoded_len = 1;
        loop {
            if encoded_len == Self::MAX_ENCODED_LEN {
                return decoder.error(ErrorKind::TagTooLong { max: Self::MAX_ENCODED_LEN });
            }
            let next_byte = decoder.byte()?;
            value = (value << 8) | next_byte as u32;
            encoded_len += 1;

            if next_byte & NOT_LAST_TAG_OCTET_FLAG == 0 {
                return Ok(Self(value));
            }
        }
    }
}
