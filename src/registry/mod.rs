//! Translation registry with locale fallback
//!
//! Stores key → locale → [`Format`] and renders translation keys through the
//! templating engine. Lookup falls back from the exact locale to its
//! language, then to the default locale and its language. Rendered
//! translations may reference other keys with a `lang` tag
//! (`<lang:key:arg...></lang>`), resolved recursively with cycle detection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parser::ast::StyledNode;
use crate::render::{to_markup, to_plain_text};
use crate::resolve::Bindings;
use crate::{build_tree_with, RenderConfig, RenderError};

mod format;
mod locale;
mod properties;

pub use format::Format;
pub use locale::{InvalidLocale, Locale};

/// Tag name that references another translation key
const REFERENCE_TAG: &str = "lang";

/// Errors from registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Key has no format for any locale in the fallback chain
    #[error("unknown translation key '{key}' for locale {locale}")]
    UnknownKey { key: String, locale: Locale },

    /// The (key, locale) pair is already registered
    #[error("translation already exists: {key} for {locale}")]
    Duplicate { key: String, locale: Locale },

    /// Bulk registration failed for several keys
    #[error("{first} (and {additional} more)")]
    BulkRegistration {
        first: Box<RegistryError>,
        additional: usize,
    },

    /// Translation file or directory could not be read
    #[error("error reading translation file {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    /// Directory contained no translation files
    #[error("no translation files found in {path}")]
    NoTranslations { path: PathBuf },

    /// Nested translation references form a cycle
    #[error("circular translation reference: {}", chain.join(" -> "))]
    CircularReference { chain: Vec<String> },

    /// A `lang` reference without a key argument
    #[error("lang reference in translation '{key}' is missing a key argument")]
    EmptyReference { key: String },

    /// Engine failure while rendering a translation
    #[error("render error in translation '{key}': {source}")]
    Render {
        key: String,
        #[source]
        source: RenderError,
    },
}

/// Outcome of loading a translation directory
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of (locale, entry) registrations performed
    pub loaded: usize,
    /// Files skipped because their stem is not a locale
    pub skipped: Vec<PathBuf>,
}

/// All formats registered for one key
#[derive(Debug, Clone, Default)]
struct Translation {
    formats: HashMap<Locale, Format>,
}

impl Translation {
    fn register(&mut self, key: &str, locale: Locale, format: Format) -> Result<(), RegistryError> {
        if self.formats.contains_key(&locale) {
            return Err(RegistryError::Duplicate {
                key: key.to_string(),
                locale,
            });
        }
        self.formats.insert(locale, format);
        Ok(())
    }

    /// Fallback chain: exact → language → default → default language
    fn translate(&self, locale: &Locale, default: &Locale) -> Option<&Format> {
        self.formats
            .get(locale)
            .or_else(|| self.formats.get(&locale.language_only()))
            .or_else(|| self.formats.get(default))
            .or_else(|| self.formats.get(&default.language_only()))
    }
}

/// Key → locale → format store that renders through the templating engine
#[derive(Debug, Clone)]
pub struct TranslationRegistry {
    translations: HashMap<String, Translation>,
    default_locale: Locale,
    config: RenderConfig,
}

impl TranslationRegistry {
    /// Create an empty registry with the default pipeline configuration
    pub fn new(default_locale: Locale) -> Self {
        Self::with_config(default_locale, RenderConfig::default())
    }

    /// Create an empty registry with a custom pipeline configuration
    pub fn with_config(default_locale: Locale, config: RenderConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_locale,
            config,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn set_default_locale(&mut self, locale: Locale) {
        self.default_locale = locale;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// True if any locale has a format for the key
    pub fn contains(&self, key: &str) -> bool {
        self.translations.contains_key(key)
    }

    /// True if the fallback chain yields a format for the key
    pub fn contains_locale(&self, key: &str, locale: &Locale) -> bool {
        self.translate(key, locale).is_some()
    }

    /// Look up the format for a key via the fallback chain
    pub fn translate(&self, key: &str, locale: &Locale) -> Option<&Format> {
        self.translations
            .get(key)?
            .translate(locale, &self.default_locale)
    }

    /// Registered keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(|s| s.as_str())
    }

    /// Register one format; fails if the (key, locale) pair exists
    pub fn register(
        &mut self,
        key: impl Into<String>,
        locale: Locale,
        format: Format,
    ) -> Result<(), RegistryError> {
        let key = key.into();
        self.translations
            .entry(key.clone())
            .or_default()
            .register(&key, locale, format)
    }

    /// Register many formats for one locale
    ///
    /// Every entry is attempted. A single failure is returned as-is;
    /// several are aggregated into [`RegistryError::BulkRegistration`]
    /// carrying the first failure and the count of the rest.
    pub fn register_all<I>(&mut self, locale: Locale, entries: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (String, Format)>,
    {
        let mut first_error: Option<RegistryError> = None;
        let mut error_count = 0usize;

        for (key, format) in entries {
            if let Err(err) = self.register(key, locale.clone(), format) {
                if first_error.is_none() {
                    first_error = Some(err);
                }
                error_count += 1;
            }
        }

        match (first_error, error_count) {
            (None, _) => Ok(()),
            (Some(first), 1) => Err(first),
            (Some(first), count) => Err(RegistryError::BulkRegistration {
                first: Box::new(first),
                additional: count - 1,
            }),
        }
    }

    /// Register the entries of a properties bundle for one locale
    pub fn register_properties(
        &mut self,
        locale: Locale,
        content: &str,
    ) -> Result<usize, RegistryError> {
        let entries = properties::parse(content);
        let count = entries.len();
        self.register_all(
            locale,
            entries
                .into_iter()
                .map(|(key, value)| (key, Format::new(value))),
        )?;
        Ok(count)
    }

    /// Load every `<locale>.properties` file in a directory
    ///
    /// Files whose stem does not parse as a locale are skipped and reported
    /// in the summary. A directory with no properties files at all is an
    /// error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<LoadSummary, RegistryError> {
        let read_err = |message: String| RegistryError::FileRead {
            path: dir.to_path_buf(),
            message,
        };

        let mut summary = LoadSummary::default();
        let mut found = false;

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| read_err(e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "properties"))
            .collect();
        paths.sort();

        for path in paths {
            found = true;
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let locale: Locale = match stem.parse() {
                Ok(locale) => locale,
                Err(_) => {
                    summary.skipped.push(path);
                    continue;
                }
            };

            let content =
                std::fs::read_to_string(&path).map_err(|e| RegistryError::FileRead {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            summary.loaded += self.register_properties(locale, &content)?;
        }

        if !found {
            return Err(RegistryError::NoTranslations {
                path: dir.to_path_buf(),
            });
        }
        Ok(summary)
    }

    /// Remove every locale's format for a key
    pub fn unregister(&mut self, key: &str) {
        self.translations.remove(key);
    }

    /// Remove one locale's format for a key
    pub fn unregister_locale(&mut self, key: &str, locale: &Locale) {
        if let Some(translation) = self.translations.get_mut(key) {
            translation.formats.remove(locale);
            if translation.formats.is_empty() {
                self.translations.remove(key);
            }
        }
    }

    /// Render a translation key to a styled-text tree
    ///
    /// `args` fill the format's positional sites and are treated as markup
    /// fragments: they are substituted at the string level before the engine
    /// runs, exactly as the pattern text itself.
    pub fn render(
        &self,
        key: &str,
        locale: &Locale,
        args: &[&str],
    ) -> Result<StyledNode, RegistryError> {
        self.render_with(key, locale, args, &Bindings::new())
    }

    /// Render a translation key with placeholder bindings for the engine
    pub fn render_with(
        &self,
        key: &str,
        locale: &Locale,
        args: &[&str],
        bindings: &Bindings,
    ) -> Result<StyledNode, RegistryError> {
        let mut visiting = Vec::new();
        self.render_inner(key, locale, args, bindings, &mut visiting)
    }

    /// Render a translation key and serialize it as markup
    pub fn render_markup(
        &self,
        key: &str,
        locale: &Locale,
        args: &[&str],
    ) -> Result<String, RegistryError> {
        let tree = self.render(key, locale, args)?;
        Ok(to_markup(&tree, &self.config.syntax))
    }

    /// Render a translation key and serialize it as plain text
    pub fn render_plain(
        &self,
        key: &str,
        locale: &Locale,
        args: &[&str],
    ) -> Result<String, RegistryError> {
        let tree = self.render(key, locale, args)?;
        Ok(to_plain_text(&tree))
    }

    fn render_inner(
        &self,
        key: &str,
        locale: &Locale,
        args: &[&str],
        bindings: &Bindings,
        visiting: &mut Vec<String>,
    ) -> Result<StyledNode, RegistryError> {
        if visiting.iter().any(|k| k == key) {
            let mut chain = visiting.clone();
            chain.push(key.to_string());
            return Err(RegistryError::CircularReference { chain });
        }

        let format = self
            .translate(key, locale)
            .ok_or_else(|| RegistryError::UnknownKey {
                key: key.to_string(),
                locale: locale.clone(),
            })?;
        let pattern = format.format(args);

        let tree =
            build_tree_with(&pattern, bindings, &self.config).map_err(|source| {
                RegistryError::Render {
                    key: key.to_string(),
                    source,
                }
            })?;

        visiting.push(key.to_string());
        let tree = self.expand_references(key, tree, locale, bindings, visiting)?;
        visiting.pop();
        Ok(tree)
    }

    /// Replace `lang` containers with the rendition of the referenced key
    fn expand_references(
        &self,
        key: &str,
        node: StyledNode,
        locale: &Locale,
        bindings: &Bindings,
        visiting: &mut Vec<String>,
    ) -> Result<StyledNode, RegistryError> {
        match node {
            // the reference's own children are replaced by the rendition
            StyledNode::Container {
                tag: Some(tag),
                children: _,
            } if tag.name == REFERENCE_TAG => {
                let mut parts = tag.args.iter();
                let ref_key = parts.next().ok_or_else(|| RegistryError::EmptyReference {
                    key: key.to_string(),
                })?;
                let ref_args: Vec<&str> = parts.map(String::as_str).collect();
                self.render_inner(ref_key, locale, &ref_args, bindings, visiting)
            }
            StyledNode::Container { tag, children } => {
                let children = children
                    .into_iter()
                    .map(|child| self.expand_references(key, child, locale, bindings, visiting))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(StyledNode::Container { tag, children })
            }
            leaf => Ok(leaf),
        }
    }
}
