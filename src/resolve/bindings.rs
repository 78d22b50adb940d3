//! Binding tables mapping placeholder names to replacement values

use std::collections::HashMap;

use crate::parser::ast::StyledNode;

/// A single replacement value
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Plain text, spliced as a literal leaf. Never re-tokenized: tag-like
    /// characters in the value can never become markup.
    Text(String),
    /// Pre-built styled fragment, spliced as a subtree
    Fragment(StyledNode),
}

/// Placeholder name → replacement table
///
/// Lookup is exact-match and case-sensitive. An optional table-wide default
/// stands in for any name with no entry, before the missing-placeholder
/// policy applies. Supplied per invocation; the engine never retains it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: HashMap<String, Binding>,
    default: Option<Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain-text binding
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .insert(name.into(), Binding::Text(value.into()));
        self
    }

    /// Add a styled-fragment binding
    pub fn fragment(mut self, name: impl Into<String>, fragment: StyledNode) -> Self {
        self.entries
            .insert(name.into(), Binding::Fragment(fragment));
        self
    }

    /// Set the default used for names with no entry
    pub fn default_text(mut self, value: impl Into<String>) -> Self {
        self.default = Some(Binding::Text(value.into()));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        self.entries.insert(name.into(), binding);
    }

    pub fn set_default(&mut self, binding: Binding) {
        self.default = Some(binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }

    /// Table-wide default for missing names, if one was set
    pub fn default_binding(&self) -> Option<&Binding> {
        self.default.as_ref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
