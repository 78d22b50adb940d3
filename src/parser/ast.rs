//! Styled-text tree types

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Value with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A styling tag: a name plus its arguments
///
/// Tags are opaque to the engine; no per-tag semantics are applied. `<b>`
/// carries no args, `<color:red>` carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub args: Vec<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Node in the styled-text tree
///
/// The root is always a `Container` with no tag. Every other container was
/// opened by a tag, and a node's effective style is the chain of tags on the
/// path from the root down to it.
#[derive(Debug, Clone, PartialEq)]
pub enum StyledNode {
    /// Literal text; markup serialization escapes delimiter characters
    Text(String),
    /// Text emitted into markup without escaping (kept-literal placeholders)
    Verbatim(String),
    /// Container opened by a tag (`None` only for the root)
    Container {
        tag: Option<Tag>,
        children: Vec<StyledNode>,
    },
}

impl StyledNode {
    pub fn text(content: impl Into<String>) -> Self {
        StyledNode::Text(content.into())
    }

    pub fn container(tag: Tag, children: Vec<StyledNode>) -> Self {
        StyledNode::Container {
            tag: Some(tag),
            children,
        }
    }

    /// Root container holding the given children
    pub fn root(children: Vec<StyledNode>) -> Self {
        StyledNode::Container {
            tag: None,
            children,
        }
    }

    /// Children of a container; empty slice for leaves
    pub fn children(&self) -> &[StyledNode] {
        match self {
            StyledNode::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Visit every text leaf in document order with its effective style,
    /// the stack of tags active at that leaf
    pub fn visit_text<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&[&'a Tag], &'a str),
    {
        fn walk<'a, F>(node: &'a StyledNode, stack: &mut Vec<&'a Tag>, visit: &mut F)
        where
            F: FnMut(&[&'a Tag], &'a str),
        {
            match node {
                StyledNode::Text(text) | StyledNode::Verbatim(text) => visit(stack, text),
                StyledNode::Container { tag, children } => {
                    if let Some(tag) = tag {
                        stack.push(tag);
                    }
                    for child in children {
                        walk(child, stack, visit);
                    }
                    if tag.is_some() {
                        stack.pop();
                    }
                }
            }
        }
        walk(self, &mut Vec::new(), visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_of_leaf_is_empty() {
        assert!(StyledNode::text("x").children().is_empty());
        assert!(StyledNode::Verbatim("x".to_string()).children().is_empty());
    }

    #[test]
    fn test_visit_text_tracks_effective_style() {
        let tree = StyledNode::root(vec![
            StyledNode::text("plain "),
            StyledNode::container(
                Tag::new("b"),
                vec![
                    StyledNode::text("bold "),
                    StyledNode::container(Tag::with_args("color", vec!["red".to_string()]), vec![
                        StyledNode::text("bold-red"),
                    ]),
                ],
            ),
        ]);

        let mut seen = Vec::new();
        tree.visit_text(&mut |style, text| {
            let names: Vec<&str> = style.iter().map(|t| t.name.as_str()).collect();
            seen.push((names, text.to_string()));
        });

        assert_eq!(
            seen,
            vec![
                (vec![], "plain ".to_string()),
                (vec!["b"], "bold ".to_string()),
                (vec!["b", "color"], "bold-red".to_string()),
            ]
        );
    }

    #[test]
    fn test_visit_text_restores_stack_between_siblings() {
        let tree = StyledNode::root(vec![
            StyledNode::container(Tag::new("b"), vec![StyledNode::text("a")]),
            StyledNode::text("b"),
        ]);

        let mut depths = Vec::new();
        tree.visit_text(&mut |style, _| depths.push(style.len()));
        assert_eq!(depths, vec![1, 0]);
    }
}
