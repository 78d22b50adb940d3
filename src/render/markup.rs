//! Markup re-serialization

use crate::parser::ast::{StyledNode, Tag};
use crate::parser::lexer::Syntax;

/// Re-emit the tree as a tagged string
///
/// Output is equivalent to, not necessarily byte-identical to, the input
/// template: adjacent leaves merge into one run and escapes are
/// re-introduced wherever literal text contains a delimiter character.
/// Re-tokenizing the output under the same syntax reproduces the tree.
pub fn to_markup(node: &StyledNode, syntax: &Syntax) -> String {
    let mut out = String::new();
    emit(node, syntax, &mut out);
    out
}

fn emit(node: &StyledNode, syntax: &Syntax, out: &mut String) {
    match node {
        StyledNode::Text(text) => escape_into(text, syntax, out),
        StyledNode::Verbatim(text) => out.push_str(text),
        StyledNode::Container { tag, children } => {
            if let Some(tag) = tag {
                open_tag(tag, syntax, out);
            }
            for child in children {
                emit(child, syntax, out);
            }
            if let Some(tag) = tag {
                close_tag(tag, syntax, out);
            }
        }
    }
}

fn open_tag(tag: &Tag, syntax: &Syntax, out: &mut String) {
    out.push(syntax.tag_open);
    out.push_str(&tag.name);
    for arg in &tag.args {
        out.push(syntax.arg_separator);
        out.push_str(arg);
    }
    out.push(syntax.tag_close);
}

fn close_tag(tag: &Tag, syntax: &Syntax, out: &mut String) {
    out.push(syntax.tag_open);
    out.push(syntax.close_marker);
    out.push_str(&tag.name);
    out.push(syntax.tag_close);
}

fn escape_into(text: &str, syntax: &Syntax, out: &mut String) {
    for c in text.chars() {
        if c == syntax.tag_open || c == syntax.placeholder || c == syntax.escape {
            out.push(syntax.escape);
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(node: &StyledNode) -> String {
        to_markup(node, &Syntax::default())
    }

    #[test]
    fn test_tags_reemitted() {
        let tree = StyledNode::root(vec![
            StyledNode::text("a "),
            StyledNode::container(Tag::new("b"), vec![StyledNode::text("bold")]),
        ]);
        assert_eq!(markup(&tree), "a <b>bold</b>");
    }

    #[test]
    fn test_tag_args_reemitted() {
        let tree = StyledNode::root(vec![StyledNode::container(
            Tag::with_args("color", vec!["red".to_string(), "dark".to_string()]),
            vec![StyledNode::text("x")],
        )]);
        assert_eq!(markup(&tree), "<color:red:dark>x</color>");
    }

    #[test]
    fn test_literal_delimiters_escaped() {
        let tree = StyledNode::root(vec![StyledNode::text(r"50% of a<b and \")]);
        assert_eq!(markup(&tree), r"50\% of a\<b and \\");
    }

    #[test]
    fn test_verbatim_not_escaped() {
        let tree = StyledNode::root(vec![StyledNode::Verbatim("%name%".to_string())]);
        assert_eq!(markup(&tree), "%name%");
    }

    #[test]
    fn test_adjacent_leaves_merge() {
        let tree = StyledNode::root(vec![StyledNode::text("a"), StyledNode::text("b")]);
        assert_eq!(markup(&tree), "ab");
    }

    #[test]
    fn test_custom_syntax_delimiters() {
        let syntax = Syntax {
            tag_open: '[',
            tag_close: ']',
            ..Syntax::default()
        };
        let tree = StyledNode::root(vec![StyledNode::container(
            Tag::new("b"),
            vec![StyledNode::text("x")],
        )]);
        assert_eq!(to_markup(&tree, &syntax), "[b]x[/b]");
    }
}
