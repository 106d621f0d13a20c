//! BER-TLV headers.

use crate::{Decodable, Decoder, Length, Result, Tag};

/// BER-TLV headers: tag + length component of TLV-encoded values
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Header {
    /// Tag representing the type of the encoded value
    pub tag: Tag,

    /// Length of the encoded value
    pub length: Length,
}

impl<'a> Decodable<'a> for Header {
    fn decode(decoder: &mut Decoder<'a>) -> Result<Header> {
        // tag first, then length: the order is fixed by the encoding
        let tag = Tag::decode(decoder)?;
        let length = Length::decode(decoder)?;

        Ok(Self { tag, length })
    }
}
