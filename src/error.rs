//! Error types for template parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Lexical and structural template errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Tag or placeholder that cannot be tokenized
    #[error("malformed tag at {span:?}: {message}")]
    MalformedTag { span: Span, message: String },

    /// Closing tag that does not match the innermost open tag
    #[error("{}", unbalanced_message(.expected, .found))]
    UnbalancedTag {
        expected: Option<String>,
        found: String,
        span: Span,
    },

    /// Tag still open at end of input
    #[error("unterminated tag '{name}': opened at {span:?} and never closed")]
    UnterminatedTag { name: String, span: Span },
}

impl ParseError {
    /// Source span the error points at
    pub fn span(&self) -> &Span {
        match self {
            ParseError::MalformedTag { span, .. }
            | ParseError::UnbalancedTag { span, .. }
            | ParseError::UnterminatedTag { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();

        let label = match self {
            ParseError::MalformedTag { message, .. } => message.clone(),
            ParseError::UnbalancedTag {
                expected, found, ..
            } => unbalanced_message(expected, found),
            ParseError::UnterminatedTag { name, .. } => {
                format!("tag '{}' is opened here and never closed", name)
            }
        };

        Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

/// Human-readable message for the two unbalanced-close cases
fn unbalanced_message(expected: &Option<String>, found: &str) -> String {
    match expected {
        Some(expected) => format!(
            "unbalanced tag: expected closing tag for '{}', found closing tag for '{}'",
            expected, found
        ),
        None => format!(
            "unbalanced tag: closing tag for '{}' has no matching open tag",
            found
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbalanced_message_with_expected() {
        let err = ParseError::UnbalancedTag {
            expected: Some("b".to_string()),
            found: "i".to_string(),
            span: 3..7,
        };
        let msg = err.to_string();
        assert!(msg.contains("'b'"));
        assert!(msg.contains("'i'"));
    }

    #[test]
    fn test_unbalanced_message_without_open() {
        let err = ParseError::UnbalancedTag {
            expected: None,
            found: "b".to_string(),
            span: 0..4,
        };
        assert!(err.to_string().contains("no matching open tag"));
    }

    #[test]
    fn test_format_includes_source_context() {
        let source = "Hello <b>world";
        let err = ParseError::UnterminatedTag {
            name: "b".to_string(),
            span: 6..9,
        };
        let report = err.format(source, "template");
        assert!(report.contains("unterminated tag 'b'"));
        assert!(report.contains("template"));
    }
}
