use core::convert::TryInto;
use crate::{Decodable, ErrorKind, Length, Result};

/// BER-TLV decoder.
///
/// A cursor over a borrowed byte slice; every read advances the position and
/// never copies the remainder.
#[derive(Debug)]
pub struct Decoder<'a> {
    /// Input, or `None` once a read has failed. A failed decoder refuses
    /// every further read with [`ErrorKind::Failed`].
    bytes: Option<&'a [u8]>,

    /// Offset of the next unread byte.
    position: Length,

    /// How many constructed values enclose the input, 0 for a whole message.
    depth: usize,
}

impl<'a> Decoder<'a> {
    /// Decoder over a whole message.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::nested(bytes, 0)
    }

    /// Decoder over the value of a constructed data object at `depth`.
    pub(crate) fn nested(bytes: &'a [u8], depth: usize) -> Self {
        Self {
            bytes: Some(bytes),
            position: Length::zero(),
            depth,
        }
    }

    /// Decode one `T` at the cursor. Errors poison the decoder and carry
    /// the offset where `T` started unless they name a closer one.
    pub fn decode<T: Decodable<'a>>(&mut self) -> Result<T> {
        if self.is_failed() {
            return self.error(ErrorKind::Failed);
        }

        let start = self.position;
        T::decode(self).map_err(|e| {
            self.bytes.take();
            e.or_at(start)
        })
    }

    /// Poison the decoder and fail with `kind` at the current offset.
    pub fn error<T>(&mut self, kind: ErrorKind) -> Result<T> {
        self.bytes.take();
        Err(kind.at(self.position))
    }

    /// Has a read failed?
    pub fn is_failed(&self) -> bool {
        self.bytes.is_none()
    }

    /// Current position of the cursor.
    pub fn position(&self) -> Length {
        self.position
    }

    /// Nesting depth of the bytes under this decoder.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Hand back `value` if every byte was consumed, fail with
    /// [`ErrorKind::TrailingData`] otherwise.
    pub fn finish<T>(self, value: T) -> Result<T> {
        if self.is_failed() {
            Err(ErrorKind::Failed.at(self.position))
        } else if !self.is_finished() {
            Err(ErrorKind::TrailingData {
                decoded: self.position,
                remaining: self.remaining_len()?,
            }
            .at(self.position))
        } else {
            Ok(value)
        }
    }

    /// All input consumed, and no read failed.
    pub fn is_finished(&self) -> bool {
        self.remaining().map(|rem| rem.is_empty()).unwrap_or(false)
    }

    /// Next byte.
    pub(crate) fn byte(&mut self) -> Result<u8> {
        match self.bytes(1u8)? {
            [byte] => Ok(*byte),
            _ => self.error(ErrorKind::Truncated),
        }
    }

    /// Next `len` bytes, or [`ErrorKind::Truncated`] at the current offset
    /// if fewer are left.
    pub(crate) fn bytes(&mut self, len: impl TryInto<Length>) -> Result<&'a [u8]> {
        if self.is_failed() {
            return self.error(ErrorKind::Failed);
        }

        let len = len
            .try_into()
            .or_else(|_| self.error(ErrorKind::Overflow))?;

        let result = match self.remaining()?.get(..len.to_usize()) {
            Some(result) => result,
            None => return self.error(ErrorKind::Truncated),
        };

        self.position = (self.position + len)?;
        Ok(result)
    }

    /// Unread input.
    fn remaining(&self) -> Result<&'a [u8]> {
        self.bytes
            .and_then(|b| b.get(self.position.to_usize()..))
            .ok_or_else(|| ErrorKind::Truncated.at(self.position))
    }

    fn remaining_len(&self) -> Result<Length> {
        self.remaining()?.len().try_into()
    }
}

impl<'a> From<&'a [u8]> for Decoder<'a> {
    fn from(bytes: &'a [u8]) -> Decoder<'a> {
        Decoder::new(bytes)
    }
}
