//! BER-TLV data objects.

use alloc::vec::Vec;
use crate::{Decodable, Decoder, ErrorKind, Header, Result, Tag};

/// One decoded BER-TLV data object.
///
/// A primitive data object carries raw bytes. A constructed one carries the
/// data objects nested in its value, and keeps the raw value bytes as well.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Node {
    /// Data object whose value is opaque bytes.
    Primitive {
        tag: Tag,
        /// Value bytes, possibly empty.
        data: Vec<u8>,
    },
    /// Data object whose value is a sequence of data objects.
    Constructed {
        tag: Tag,
        /// Encoded form of `children`, exactly as it appeared in the input.
        data: Vec<u8>,
        /// Never empty for a decoded node.
        children: Vec<Node>,
    },
}

impl Node {
    /// Deepest nesting of constructed data objects a message may contain.
    pub const MAX_DEPTH: usize = 64;

    /// Tag of the data object.
    pub fn tag(&self) -> Tag {
        match self {
            Node::Primitive { tag, .. } | Node::Constructed { tag, .. } => *tag,
        }
    }

    /// Raw value bytes.
    pub fn data(&self) -> &[u8] {
        match self {
            Node::Primitive { data, .. } | Node::Constructed { data, .. } => data,
        }
    }

    /// Length of the value, as declared by the length field.
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Is the value empty?
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Was the data object decoded in constructed form?
    pub fn is_constructed(&self) -> bool {
        matches!(self, Node::Constructed { .. })
    }

    /// Nested data objects; empty for primitive data objects.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Primitive { .. } => &[],
            Node::Constructed { children, .. } => children,
        }
    }

    /// Depth-first, pre-order walk over this data object and everything
    /// nested in it.
    pub fn iter(&self) -> Walk<'_> {
        Walk::new(core::slice::from_ref(self))
    }

    /// All data objects in this subtree with the given tag, in pre-order.
    pub fn find_tag(&self, tag: u32) -> Vec<&Node> {
        self.iter().filter(|node| node.tag() == tag).collect()
    }
}

impl<'a> Decodable<'a> for Node {
    fn decode(decoder: &mut Decoder<'a>) -> Result<Node> {
        let Header { tag, length } = Header::decode(decoder)?;
        let value_position = decoder.position();
        let data = decoder.bytes(length)?;

        if !tag.is_constructed() {
            trace!("primitive {} ({} bytes) at {}", tag, length, value_position);
            return Ok(Node::Primitive { tag, data: data.to_vec() });
        }

        let depth = decoder.depth() + 1;
        if depth > Node::MAX_DEPTH {
            return Err(ErrorKind::TooDeep { max: Node::MAX_DEPTH }.at(value_position));
        }

        // nested data objects are decoded from their own buffer, positions
        // in errors are rebased onto ours
        let children = decode_all(data, depth).map_err(|e| e.nested(value_position))?;
        if children.is_empty() {
            return Err(ErrorKind::EmptyConstructed { tag }.at(value_position));
        }

        trace!("constructed {} ({} bytes, {} children) at {}", tag, length, children.len(), value_position);
        Ok(Node::Constructed { tag, data: data.to_vec(), children })
    }
}

/// Decode data objects back to back until `bytes` is exhausted. `depth`
/// counts the constructed data objects enclosing `bytes`.
pub(crate) fn decode_all(bytes: &[u8], depth: usize) -> Result<Vec<Node>> {
    let mut decoder = Decoder::nested(bytes, depth);
    let mut nodes = Vec::new();

    while !decoder.is_finished() {
        nodes.push(decoder.decode()?);
    }

    decoder.finish(nodes)
}

/// Pre-order iterator over data objects, see [`Node::iter`].
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(nodes: &'a [Node]) -> Self {
        Self { stack: nodes.iter().rev().collect() }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
