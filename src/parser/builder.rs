//! Tree builder
//!
//! Consumes the token stream and assembles the styled-text tree, resolving
//! placeholders as they are encountered. Nesting is strict: every close must
//! match the innermost open tag, and nothing is auto-closed. Either a
//! complete tree is produced or an error is returned, never a partial tree.

use crate::error::{ParseError, Span};
use crate::parser::ast::{StyledNode, Tag};
use crate::parser::lexer::{tokenize, Syntax, Token};
use crate::resolve::{MissingPlaceholder, MissingPolicy, Resolution, Resolver};
use crate::RenderError;

/// One open container on the build stack
struct Frame {
    tag: Option<Tag>,
    open_span: Span,
    children: Vec<StyledNode>,
}

/// Build a styled-text tree from a template
pub fn build(
    template: &str,
    syntax: &Syntax,
    resolver: &Resolver,
) -> Result<StyledNode, RenderError> {
    let mut stack = vec![Frame {
        tag: None,
        open_span: 0..0,
        children: Vec::new(),
    }];

    for item in tokenize(template, syntax) {
        let spanned = item?;
        let span = spanned.span;
        match spanned.node {
            Token::Literal(text) => {
                if !text.is_empty() {
                    top(&mut stack).children.push(StyledNode::Text(text));
                }
            }
            Token::TagOpen { name, args } => {
                stack.push(Frame {
                    tag: Some(Tag::with_args(name, args)),
                    open_span: span,
                    children: Vec::new(),
                });
            }
            Token::TagClose { name } => {
                if stack.len() == 1 {
                    return Err(ParseError::UnbalancedTag {
                        expected: None,
                        found: name,
                        span,
                    }
                    .into());
                }
                let frame = stack.pop().expect("stack holds more than the root");
                let tag = frame.tag.expect("non-root frame always has a tag");
                if tag.name != name {
                    return Err(ParseError::UnbalancedTag {
                        expected: Some(tag.name),
                        found: name,
                        span,
                    }
                    .into());
                }
                top(&mut stack).children.push(StyledNode::Container {
                    tag: Some(tag),
                    children: frame.children,
                });
            }
            Token::Placeholder { name } => match resolver.resolve(&name) {
                Resolution::Text(text) => {
                    top(&mut stack).children.push(StyledNode::Text(text.to_string()));
                }
                Resolution::Fragment(fragment) => {
                    top(&mut stack).children.push(fragment.clone());
                }
                Resolution::Missing => match resolver.on_missing() {
                    MissingPolicy::Error => {
                        return Err(MissingPlaceholder { name, span }.into());
                    }
                    MissingPolicy::KeepLiteral => {
                        let raw = template[span.clone()].to_string();
                        top(&mut stack).children.push(StyledNode::Verbatim(raw));
                    }
                    MissingPolicy::EmitEmpty => {}
                },
            },
        }
    }

    if stack.len() > 1 {
        let frame = stack.pop().expect("stack holds more than the root");
        let tag = frame.tag.expect("non-root frame always has a tag");
        return Err(ParseError::UnterminatedTag {
            name: tag.name,
            span: frame.open_span,
        }
        .into());
    }

    let root = stack.pop().expect("root frame remains");
    Ok(StyledNode::root(root.children))
}

fn top<'a>(stack: &'a mut Vec<Frame>) -> &'a mut Frame {
    stack.last_mut().expect("stack holds the root frame")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Bindings;

    fn build_with(
        template: &str,
        bindings: &Bindings,
        on_missing: MissingPolicy,
    ) -> Result<StyledNode, RenderError> {
        let syntax = Syntax::default();
        let resolver = Resolver::new(bindings, on_missing);
        build(template, &syntax, &resolver)
    }

    #[test]
    fn test_literal_only() {
        let tree = build_with("just text", &Bindings::new(), MissingPolicy::Error)
            .expect("should build");
        assert_eq!(tree, StyledNode::root(vec![StyledNode::text("just text")]));
    }

    #[test]
    fn test_nested_tags() {
        let tree = build_with("<a><b>x</b></a>", &Bindings::new(), MissingPolicy::Error)
            .expect("should build");
        assert_eq!(
            tree,
            StyledNode::root(vec![StyledNode::container(
                Tag::new("a"),
                vec![StyledNode::container(
                    Tag::new("b"),
                    vec![StyledNode::text("x")]
                )]
            )])
        );
    }

    #[test]
    fn test_placeholder_resolves_to_text() {
        let bindings = Bindings::new().text("name", "World");
        let tree = build_with("Hi %name%", &bindings, MissingPolicy::Error).expect("should build");
        assert_eq!(
            tree,
            StyledNode::root(vec![StyledNode::text("Hi "), StyledNode::text("World")])
        );
    }

    #[test]
    fn test_placeholder_fragment_spliced_as_subtree() {
        let fragment = StyledNode::container(Tag::new("b"), vec![StyledNode::text("World")]);
        let bindings = Bindings::new().fragment("who", fragment.clone());
        let tree = build_with("Hi %who%", &bindings, MissingPolicy::Error).expect("should build");
        assert_eq!(
            tree,
            StyledNode::root(vec![StyledNode::text("Hi "), fragment])
        );
    }

    #[test]
    fn test_placeholder_inherits_surrounding_style() {
        let bindings = Bindings::new().text("name", "World");
        let tree = build_with("<b>%name%</b>", &bindings, MissingPolicy::Error)
            .expect("should build");

        let mut styles = Vec::new();
        tree.visit_text(&mut |style, text| {
            styles.push((
                style.iter().map(|t| t.name.clone()).collect::<Vec<_>>(),
                text.to_string(),
            ));
        });
        assert_eq!(styles, vec![(vec!["b".to_string()], "World".to_string())]);
    }

    #[test]
    fn test_unterminated_tag() {
        let err = build_with("<b>bold", &Bindings::new(), MissingPolicy::Error)
            .expect_err("should fail");
        match err {
            RenderError::Parse(ParseError::UnterminatedTag { name, span }) => {
                assert_eq!(name, "b");
                assert_eq!(span, 0..3);
            }
            other => panic!("expected UnterminatedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_names_innermost_tag() {
        let err = build_with("<a><b>x", &Bindings::new(), MissingPolicy::Error)
            .expect_err("should fail");
        match err {
            RenderError::Parse(ParseError::UnterminatedTag { name, .. }) => {
                assert_eq!(name, "b");
            }
            other => panic!("expected UnterminatedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_close() {
        let err = build_with("<b>x</i>", &Bindings::new(), MissingPolicy::Error)
            .expect_err("should fail");
        match err {
            RenderError::Parse(ParseError::UnbalancedTag {
                expected, found, ..
            }) => {
                assert_eq!(expected.as_deref(), Some("b"));
                assert_eq!(found, "i");
            }
            other => panic!("expected UnbalancedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_close_without_open() {
        let err =
            build_with("x</b>", &Bindings::new(), MissingPolicy::Error).expect_err("should fail");
        match err {
            RenderError::Parse(ParseError::UnbalancedTag { expected, found, .. }) => {
                assert_eq!(expected, None);
                assert_eq!(found, "b");
            }
            other => panic!("expected UnbalancedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_placeholder_error_policy() {
        let err = build_with("Hi %name%", &Bindings::new(), MissingPolicy::Error)
            .expect_err("should fail");
        match err {
            RenderError::Missing(missing) => {
                assert_eq!(missing.name, "name");
                assert_eq!(missing.span, 3..9);
            }
            other => panic!("expected Missing, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_placeholder_keep_literal() {
        let tree = build_with("Hi %name%", &Bindings::new(), MissingPolicy::KeepLiteral)
            .expect("should build");
        assert_eq!(
            tree,
            StyledNode::root(vec![
                StyledNode::text("Hi "),
                StyledNode::Verbatim("%name%".to_string()),
            ])
        );
    }

    #[test]
    fn test_missing_placeholder_emit_empty() {
        let tree = build_with("a%name%b", &Bindings::new(), MissingPolicy::EmitEmpty)
            .expect("should build");
        assert_eq!(
            tree,
            StyledNode::root(vec![StyledNode::text("a"), StyledNode::text("b")])
        );
    }

    #[test]
    fn test_no_partial_output_on_late_error() {
        // error near the end of input still fails the whole build
        let bindings = Bindings::new().text("name", "World");
        let result = build_with("<b>%name%</b></b>", &bindings, MissingPolicy::Error);
        assert!(result.is_err());
    }
}
