//! Text dump of decoded data objects.

use alloc::string::{String, ToString};
use crate::{ErrorKind, Node, Result};

/// Prefix added once per nesting level.
const INDENT: &str = "--";

pub(crate) fn render(nodes: &[Node]) -> Result<String> {
    let mut out = String::new();
    for node in nodes {
        render_node(&mut out, node, 0)?;
    }
    Ok(out)
}

fn render_node(out: &mut String, node: &Node, depth: usize) -> Result<()> {
    for _ in 0..depth {
        out.push_str(INDENT);
    }

    match node {
        Node::Primitive { tag, data } => {
            out.push_str("Tag: ");
            out.push_str(&tag.to_string());
            out.push_str(", Data: ");
            out.push_str(&hex::encode_upper(data));
            out.push('\n');
        }
        Node::Constructed { tag, children, .. } => {
            // only reachable for trees assembled by hand
            if children.is_empty() {
                return Err(ErrorKind::EmptyConstructed { tag: *tag }.into());
            }
            out.push_str("Tag: ");
            out.push_str(&tag.to_string());
            out.push('\n');
            for child in children {
                render_node(out, child, depth + 1)?;
            }
        }
    }

    Ok(())
}
