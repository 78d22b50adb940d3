//! Name lookup and the missing-placeholder policy

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::error::Span;
use crate::parser::ast::StyledNode;

use super::bindings::{Binding, Bindings};

/// What to do when a placeholder has no binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Fail the whole build
    #[default]
    Error,
    /// Re-emit the original placeholder token verbatim
    KeepLiteral,
    /// Substitute nothing
    EmitEmpty,
}

/// String form not recognized as a policy name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown missing-placeholder policy '{0}', expected error, keep-literal, or empty")]
pub struct InvalidPolicy(pub String);

impl FromStr for MissingPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(MissingPolicy::Error),
            "keep-literal" | "keep_literal" => Ok(MissingPolicy::KeepLiteral),
            "empty" | "emit-empty" | "emit_empty" => Ok(MissingPolicy::EmitEmpty),
            other => Err(InvalidPolicy(other.to_string())),
        }
    }
}

/// No binding exists for a placeholder and the policy is [`MissingPolicy::Error`]
#[derive(Debug, Error)]
#[error("no binding for placeholder '{name}' at {span:?}")]
pub struct MissingPlaceholder {
    pub name: String,
    pub span: Span,
}

/// Outcome of a single lookup
#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    Text(&'a str),
    Fragment(&'a StyledNode),
    Missing,
}

/// Resolves placeholder names against a binding table
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    bindings: &'a Bindings,
    on_missing: MissingPolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(bindings: &'a Bindings, on_missing: MissingPolicy) -> Self {
        Self {
            bindings,
            on_missing,
        }
    }

    pub fn on_missing(&self) -> MissingPolicy {
        self.on_missing
    }

    /// Exact-match lookup, falling back to the table-wide default
    pub fn resolve(&self, name: &str) -> Resolution<'a> {
        match self.bindings.get(name).or_else(|| self.bindings.default_binding()) {
            Some(Binding::Text(text)) => Resolution::Text(text),
            Some(Binding::Fragment(fragment)) => Resolution::Fragment(fragment),
            None => Resolution::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_text_and_fragment() {
        let fragment = StyledNode::text("frag");
        let bindings = Bindings::new()
            .text("a", "value")
            .fragment("b", fragment.clone());
        let resolver = Resolver::new(&bindings, MissingPolicy::Error);

        assert_eq!(resolver.resolve("a"), Resolution::Text("value"));
        assert_eq!(resolver.resolve("b"), Resolution::Fragment(&fragment));
        assert_eq!(resolver.resolve("c"), Resolution::Missing);
    }

    #[test]
    fn test_default_value_used_for_missing_names() {
        let bindings = Bindings::new().text("a", "value").default_text("fallback");
        let resolver = Resolver::new(&bindings, MissingPolicy::Error);

        assert_eq!(resolver.resolve("a"), Resolution::Text("value"));
        assert_eq!(resolver.resolve("other"), Resolution::Text("fallback"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("error".parse(), Ok(MissingPolicy::Error));
        assert_eq!("keep-literal".parse(), Ok(MissingPolicy::KeepLiteral));
        assert_eq!("keep_literal".parse(), Ok(MissingPolicy::KeepLiteral));
        assert_eq!("empty".parse(), Ok(MissingPolicy::EmitEmpty));
        assert!("fuzzy".parse::<MissingPolicy>().is_err());
    }

    #[test]
    fn test_policy_from_toml() {
        #[derive(Deserialize)]
        struct Probe {
            policy: MissingPolicy,
        }
        let probe: Probe = toml::from_str(r#"policy = "keep_literal""#).expect("should parse");
        assert_eq!(probe.policy, MissingPolicy::KeepLiteral);
    }
}
