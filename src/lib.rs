//! # bertlv
//!
//! Decoding of BER-TLV data objects, as used in smart-card responses (ISO 7816-4) and
//! EMV payment payloads, into an owned tree.
//!
//! ### BER-TLV data objects
//! Each data object consists of a tag field, a length field and a value field.
//! - The tag field consists of one or more bytes. Bit 6 of the first byte is set for
//!   constructed data objects. If the low five bits of the first byte are all set, the tag
//!   continues on the subsequent bytes, each one but the last having its high bit set.
//!   Tags are capped at [`Tag::MAX_ENCODED_LEN`] bytes.
//! - The length field consists of one to five bytes.
//!   - A first byte in `00..=7F` is the length N itself.
//!   - A first byte `81`, `82`, `83` or `84` announces that N is encoded big-endian in the
//!     subsequent one, two, three or four bytes.
//!   - Any other first byte (in particular the indefinite form `80`) is rejected.
//! - The value field consists of N bytes. For constructed data objects these bytes are
//!   themselves a sequence of data objects, which is decoded recursively.
//!
//! ## Usage
//! ```
//! let tree = bertlv::parse_hex("6F1A840E315041592E5359532E4444463031A5088801025F2D02656E").unwrap();
//!
//! let fci = &tree.nodes()[0];
//! assert_eq!(fci.tag().value(), 0x6F);
//! assert_eq!(fci.len(), 26);
//! assert_eq!(fci.children().len(), 2);
//!
//! let language = tree.find_tag(0x5F2D);
//! assert_eq!(language.len(), 1);
//! assert_eq!(language[0].data(), b"en");
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

delog::generate_macros!();

mod decoder;
mod error;
mod header;
mod length;
mod node;
mod render;
mod tag;
mod traits;
mod tree;

pub use decoder::Decoder;
pub use error::{Category, Error, ErrorKind, Result};
pub(crate) use header::Header;
pub use length::Length;
pub use node::{Node, Walk};
pub use tag::{Class, Tag};
pub use traits::Decodable;
pub use tree::Tree;

/// Decode a BER-TLV message from raw bytes, see [`Tree::parse`].
pub fn parse(bytes: &[u8]) -> Result<Tree> {
    Tree::parse(bytes)
}

/// Decode a BER-TLV message from a hex string, see [`Tree::parse_hex`].
pub fn parse_hex(input: &str) -> Result<Tree> {
    Tree::parse_hex(input)
}
