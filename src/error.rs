//! Error types.

use crate::{Length, Tag};
use core::fmt;

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Kind of error
    kind: ErrorKind,

    /// Position inside of message where error occurred
    position: Option<Length>,
}

impl Error {
    /// Create a new [`Error`]
    pub fn new(kind: ErrorKind, position: Length) -> Error {
        Error {
            kind,
            position: Some(position),
        }
    }

    /// Get the [`ErrorKind`] which occurred.
    pub fn kind(self) -> ErrorKind {
        self.kind
    }

    /// Get the [`Category`] of the [`ErrorKind`] which occurred.
    pub fn category(self) -> Category {
        self.kind.category()
    }

    /// Get the position inside of the message where the error occurred.
    pub fn position(self) -> Option<Length> {
        self.position
    }

    /// For errors occurring inside of a nested message, extend the position
    /// count by the location where the nested message occurs.
    pub fn nested(self, nested_position: Length) -> Self {
        let position = (nested_position + self.position.unwrap_or_default()).ok();

        Self {
            kind: self.kind,
            position,
        }
    }

    /// Attach `position` unless the error already carries one.
    pub(crate) fn or_at(self, position: Length) -> Self {
        match self.position {
            Some(_) => self,
            None => self.kind.at(position),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(pos) = self.position {
            write!(f, " at BER-TLV byte {}", pos)?;
        }

        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            position: None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ErrorKind {}

/// Broad classes of failure, one per way a decode can go wrong.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Category {
    /// The caller's input was rejected before any decoding began.
    Input,

    /// The stream ended inside a tag, a length or a value.
    Truncated,

    /// The stream decoded, but into a shape a tree may not have.
    Structure,

    /// The stream uses an encoding this decoder does not accept.
    Unsupported,

    /// Internal bookkeeping failure.
    Internal,
}

/// Error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input is empty (or only whitespace, for hex input)
    Empty,

    /// Input does not have an even number of hex digits or bytes
    OddLength {
        /// Length of the rejected input, in characters or bytes
        len: usize,
    },

    /// Hex input contains a character that is not a hex digit
    InvalidHexCharacter {
        /// Offending character
        c: char,

        /// Index of the character in the input
        index: usize,
    },

    /// Unexpected end-of-message/nested field when decoding
    Truncated,

    /// A constructed data object with no nested data objects
    EmptyConstructed {
        /// Tag of the constructed data object
        tag: Tag,
    },

    /// Undecoded trailing data at end of message
    TrailingData {
        /// Length of the decoded data
        decoded: Length,

        /// Total length of the remaining data left in the buffer
        remaining: Length,
    },

    /// Length field with an initial byte outside `00..=7F` and `81..=84`
    UnsupportedLength {
        /// Initial byte of the length field
        byte: u8,
    },

    /// Tag field longer than [`Tag::MAX_ENCODED_LEN`] bytes
    TagTooLong {
        /// Maximum number of tag bytes accepted
        max: usize,
    },

    /// Constructed data objects nested deeper than [`crate::Node::MAX_DEPTH`]
    TooDeep {
        /// Maximum nesting depth accepted
        max: usize,
    },

    /// Integer overflow occurred (library bug!)
    Overflow,

    /// Operation failed due to previous error
    Failed,
}

impl ErrorKind {
    /// Annotate an [`ErrorKind`] with context about where it occurred,
    /// returning an error.
    pub fn at(self, position: Length) -> Error {
        Error::new(self, position)
    }

    /// Get the [`Category`] this kind of error belongs to.
    pub fn category(self) -> Category {
        match self {
            ErrorKind::Empty | ErrorKind::OddLength { .. } | ErrorKind::InvalidHexCharacter { .. } => {
                Category::Input
            }
            ErrorKind::Truncated => Category::Truncated,
            ErrorKind::EmptyConstructed { .. } | ErrorKind::TrailingData { .. } => Category::Structure,
            ErrorKind::UnsupportedLength { .. }
            | ErrorKind::TagTooLong { .. }
            | ErrorKind::TooDeep { .. } => Category::Unsupported,
            ErrorKind::Overflow | ErrorKind::Failed => Category::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Empty => write!(f, "input is empty"),
            ErrorKind::OddLength { len } => {
                write!(f, "input must have an even length, got {}", len)
            }
            ErrorKind::InvalidHexCharacter { c, index } => {
                write!(f, "invalid hex character {:?} at index {}", c, index)
            }
            ErrorKind::Truncated => write!(f, "BER-TLV message is truncated"),
            ErrorKind::EmptyConstructed { tag } => {
                write!(f, "constructed BER-TLV data object {} has no children", tag)
            }
            ErrorKind::TrailingData { decoded, remaining } => {
                write!(
                    f,
                    "trailing data at end of BER-TLV message: decoded {} bytes, {} bytes remaining",
                    decoded, remaining
                )
            }
            ErrorKind::UnsupportedLength { byte } => {
                write!(f, "unsupported BER-TLV length form: 0x{:02X}", byte)
            }
            ErrorKind::TagTooLong { max } => {
                write!(f, "BER-TLV tag longer than {} bytes", max)
            }
            ErrorKind::TooDeep { max } => {
                write!(f, "BER-TLV data objects nested deeper than {} levels", max)
            }
            ErrorKind::Overflow => write!(f, "integer overflow"),
            ErrorKind::Failed => write!(f, "operation failed"),
        }
    }
}
