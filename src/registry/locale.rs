//! Locale identifiers for translation lookup

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A language tag with an optional region, e.g. `en` or `en_US`
///
/// Language is normalized to lowercase and region to uppercase, so `en-us`,
/// `EN_US`, and `en_US` are the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

/// String form not recognized as a locale
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid locale '{input}'")]
pub struct InvalidLocale {
    pub input: String,
}

impl Locale {
    /// Language-only locale
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            region: None,
        }
    }

    pub fn with_region(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            region: Some(region.into().to_ascii_uppercase()),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    /// The same locale with the region stripped
    pub fn language_only(&self) -> Locale {
        Locale {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl FromStr for Locale {
    type Err = InvalidLocale;

    /// Accepts `en`, `en_US`, and `en-US` forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidLocale {
            input: s.to_string(),
        };

        let mut parts = s.split(['_', '-']);
        let language = parts.next().filter(|p| is_alpha(p)).ok_or_else(invalid)?;
        let region = match parts.next() {
            Some(region) if is_alnum(region) => Some(region),
            Some(_) => return Err(invalid()),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(match region {
            Some(region) => Locale::with_region(language, region),
            None => Locale::new(language),
        })
    }
}

fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_alnum(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}
