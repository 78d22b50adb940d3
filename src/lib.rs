//! tagweave - tag-aware placeholder templating
//!
//! This library parses template strings that mix literal text, styling tags,
//! and named placeholders, substitutes caller-supplied bindings, and
//! serializes the result as plain text or re-emitted markup. A translation
//! registry with locale fallback is layered on top.
//!
//! # Example
//!
//! ```rust
//! use tagweave::{render_markup, render_plain, Bindings};
//!
//! let bindings = Bindings::new().text("name", "World");
//! let plain = render_plain("Hello <b>%name%</b>!", &bindings).unwrap();
//! assert_eq!(plain, "Hello World!");
//!
//! let markup = render_markup("Hello <b>%name%</b>!", &bindings).unwrap();
//! assert_eq!(markup, "Hello <b>World</b>!");
//! ```

pub mod error;
pub mod parser;
pub mod registry;
pub mod render;
pub mod resolve;

pub use error::ParseError;
pub use parser::{build, tokenize, Spanned, StyledNode, Syntax, Tag, Token};
pub use registry::{Format, Locale, RegistryError, TranslationRegistry};
pub use render::{to_markup, to_plain_text};
pub use resolve::{Binding, Bindings, MissingPlaceholder, MissingPolicy, Resolver};

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors from the template pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Lexical or structural template error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Unresolved placeholder under [`MissingPolicy::Error`]
    #[error("{0}")]
    Missing(#[from] MissingPlaceholder),
}

/// Errors loading a [`RenderConfig`] from TOML
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the template pipeline
///
/// Loadable from TOML; absent keys keep their defaults:
///
/// ```toml
/// on_missing = "keep_literal"
///
/// [syntax]
/// placeholder = "$"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Delimiter grammar
    pub syntax: Syntax,
    /// Missing-placeholder policy
    pub on_missing: MissingPolicy,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_on_missing(mut self, on_missing: MissingPolicy) -> Self {
        self.on_missing = on_missing;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Build the styled-text tree for a template with default configuration
pub fn build_tree(template: &str, bindings: &Bindings) -> Result<StyledNode, RenderError> {
    build_tree_with(template, bindings, &RenderConfig::default())
}

/// Build the styled-text tree for a template
pub fn build_tree_with(
    template: &str,
    bindings: &Bindings,
    config: &RenderConfig,
) -> Result<StyledNode, RenderError> {
    let resolver = Resolver::new(bindings, config.on_missing);
    build(template, &config.syntax, &resolver)
}

/// Render a template to plain text with default configuration
pub fn render_plain(template: &str, bindings: &Bindings) -> Result<String, RenderError> {
    render_plain_with(template, bindings, &RenderConfig::default())
}

/// Render a template to plain text
pub fn render_plain_with(
    template: &str,
    bindings: &Bindings,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let tree = build_tree_with(template, bindings, config)?;
    Ok(to_plain_text(&tree))
}

/// Render a template back to markup with default configuration
pub fn render_markup(template: &str, bindings: &Bindings) -> Result<String, RenderError> {
    render_markup_with(template, bindings, &RenderConfig::default())
}

/// Render a template back to markup
pub fn render_markup_with(
    template: &str,
    bindings: &Bindings,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let tree = build_tree_with(template, bindings, config)?;
    Ok(to_markup(&tree, &config.syntax))
}
