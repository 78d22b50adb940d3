//! Plain-text projection

use crate::parser::ast::StyledNode;

/// Strip all styling and concatenate leaf text in document order
pub fn to_plain_text(node: &StyledNode) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    out
}

fn collect(node: &StyledNode, out: &mut String) {
    match node {
        StyledNode::Text(text) | StyledNode::Verbatim(text) => out.push_str(text),
        StyledNode::Container { children, .. } => {
            for child in children {
                collect(child, out);
            }
        }
    }
}
