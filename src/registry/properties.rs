//! Minimal `.properties` reader for translation files
//!
//! Supports the subset translation bundles actually use: `key=value` and
//! `key: value` entries, `#`/`!` comments, blank lines, `\n` `\t` `\r` `\\`
//! escapes, and trailing-backslash line continuation. `\uXXXX` escapes are
//! not supported; bundles are read as UTF-8 directly.

/// Parse properties text into key/value pairs in file order
pub(crate) fn parse(content: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        if let Some((key, value)) = split_entry(&logical) {
            entries.push((unescape(key.trim_end()), unescape(value.trim_start())));
        }
    }

    entries
}

/// A line ending in an odd number of backslashes continues on the next line
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split at the first unescaped `=` or `:`; a line without a separator is a
/// key with an empty value
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return Some((&line[..i], &line[i + c.len_utf8()..])),
            _ => {}
        }
    }
    Some((line, ""))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            // unknown escapes drop the backslash, properties-style
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_pairs() {
        let entries = parse("greeting=Hello\nfarewell=Bye\n");
        assert_eq!(
            entries,
            vec![
                ("greeting".to_string(), "Hello".to_string()),
                ("farewell".to_string(), "Bye".to_string()),
            ]
        );
    }

    #[test]
    fn test_colon_separator() {
        assert_eq!(parse("key: value"), vec![("key".to_string(), "value".to_string())]);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let entries = parse("# comment\n\n! also comment\nkey=v\n");
        assert_eq!(entries, vec![("key".to_string(), "v".to_string())]);
    }

    #[test]
    fn test_value_keeps_separators_after_first() {
        assert_eq!(
            parse("url=http://example.com"),
            vec![("url".to_string(), "http://example.com".to_string())]
        );
    }

    #[test]
    fn test_escaped_separator_in_key() {
        assert_eq!(
            parse(r"a\=b=c"),
            vec![("a=b".to_string(), "c".to_string())]
        );
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(
            parse(r"key=line1\nline2\t!"),
            vec![("key".to_string(), "line1\nline2\t!".to_string())]
        );
    }

    #[test]
    fn test_line_continuation() {
        let entries = parse("key=first \\\n    second");
        assert_eq!(entries, vec![("key".to_string(), "first second".to_string())]);
    }

    #[test]
    fn test_double_backslash_is_not_continuation() {
        let entries = parse(r"key=ends with backslash\\");
        assert_eq!(
            entries,
            vec![("key".to_string(), r"ends with backslash\".to_string())]
        );
    }

    #[test]
    fn test_key_without_separator() {
        assert_eq!(parse("lonely"), vec![("lonely".to_string(), String::new())]);
    }
}
