//! Decoded BER-TLV messages.

use alloc::{string::String, vec::Vec};
use core::{convert::TryFrom, str::FromStr};
use crate::{node, render, ErrorKind, Node, Result, Walk};

/// The data objects of a BER-TLV message, in input order.
///
/// Created by [`Tree::parse`] or [`Tree::parse_hex`], which either decode the
/// whole input or fail; there are no partial trees.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Decode a message from raw bytes.
    ///
    /// The input must be non-empty and have an even number of bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ErrorKind::Empty.into());
        }
        // not a BER-TLV rule, but the byte form accepts exactly what the hex form does
        if bytes.len() % 2 != 0 {
            return Err(ErrorKind::OddLength { len: bytes.len() }.into());
        }

        let nodes = node::decode_all(bytes, 0)?;
        debug!("decoded {} top-level data objects from {} bytes", nodes.len(), bytes.len());
        Ok(Self { nodes })
    }

    /// Decode a message from a hex string, digits in either case.
    ///
    /// The string must not be blank and must have an even number of
    /// characters; separators are not accepted. Lengths and indices in
    /// errors count characters, not UTF-8 bytes.
    pub fn parse_hex(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(ErrorKind::Empty.into());
        }
        let len = input.chars().count();
        if len % 2 != 0 {
            return Err(ErrorKind::OddLength { len }.into());
        }
        if let Some((index, c)) = input.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(ErrorKind::InvalidHexCharacter { c, index }.into());
        }

        // only ASCII hex digits left, so byte and character positions agree
        let bytes = hex::decode(input).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                ErrorKind::InvalidHexCharacter { c, index }
            }
            _ => ErrorKind::OddLength { len },
        })?;

        Self::parse(&bytes)
    }

    /// Top-level data objects.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of top-level data objects.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is there no data object at all? Never true for a decoded message.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, pre-order walk over every data object at every depth.
    pub fn iter(&self) -> Walk<'_> {
        Walk::new(&self.nodes)
    }

    /// All data objects with the given tag, at any depth, in pre-order.
    ///
    /// A constructed data object matches on its own tag regardless of its
    /// children; an empty result means the tag does not occur.
    pub fn find_tag(&self, tag: u32) -> Vec<&Node> {
        self.iter().filter(|node| node.tag() == tag).collect()
    }

    /// First data object with the given tag, in pre-order.
    pub fn find_first(&self, tag: u32) -> Option<&Node> {
        self.iter().find(|node| node.tag() == tag)
    }

    /// Indented text dump, one line per data object.
    ///
    /// ```
    /// let tree = bertlv::parse_hex("A5088801025F2D02656E").unwrap();
    /// assert_eq!(
    ///     tree.render().unwrap(),
    ///     "Tag: A5\n--Tag: 88, Data: 02\n--Tag: 5F2D, Data: 656E\n",
    /// );
    /// ```
    pub fn render(&self) -> Result<String> {
        render::render(&self.nodes)
    }

    /// Take the top-level data objects out of the tree.
    ///
    /// ```
    /// let tree = bertlv::parse_hex("5A0147A5038801029F360100").unwrap();
    /// assert!(!tree.is_empty());
    ///
    /// let nodes = tree.into_nodes();
    /// assert!(!nodes[0].is_constructed());
    /// assert!(nodes[1].is_constructed());
    /// assert_eq!(nodes[1].tag().class(), bertlv::Class::Context);
    /// assert_eq!(nodes[2].tag(), bertlv::Tag::new(0x9F36));
    /// ```
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

impl From<Vec<Node>> for Tree {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl FromStr for Tree {
    type Err = crate::Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse_hex(input)
    }
}

impl TryFrom<&[u8]> for Tree {
    type Error = crate::Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::parse(bytes)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Node;
    type IntoIter = core::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
