//! Positional message formats
//!
//! A [`Format`] compiles its pattern once, recording every brace-delimited
//! argument site. `{0}` refers to the argument at index 0; empty braces `{}`
//! take the next auto-incremented index; braces around anything other than
//! digits are plain text. Formatting with fewer arguments than sites leaves
//! the unmatched sites in place.

/// One argument site inside a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArgSite {
    /// Byte range of the site in the pattern, braces included
    start: usize,
    end: usize,
    /// Argument index the site refers to
    target: usize,
}

/// A compiled positional format pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pattern: String,
    sites: Vec<ArgSite>,
    max_argument: Option<usize>,
}

impl Format {
    /// Compile a pattern, recording its argument sites
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let mut sites = Vec::new();
        let mut next_auto = 0usize;
        let mut start: Option<usize> = None;
        let mut digits = String::new();

        for (i, c) in pattern.char_indices() {
            match c {
                '{' => {
                    start = Some(i);
                    digits.clear();
                }
                '}' => {
                    if let Some(site_start) = start.take() {
                        let target = if digits.is_empty() {
                            let t = next_auto;
                            next_auto += 1;
                            t
                        } else {
                            match digits.parse::<usize>() {
                                Ok(t) => t,
                                // out-of-range index, treat the site as text
                                Err(_) => continue,
                            }
                        };
                        sites.push(ArgSite {
                            start: site_start,
                            end: i + 1,
                            target,
                        });
                    }
                }
                c if c.is_ascii_digit() => {
                    if start.is_some() {
                        digits.push(c);
                    }
                }
                _ => {
                    start = None;
                }
            }
        }

        let max_argument = sites.iter().map(|s| s.target).max();
        Self {
            pattern,
            sites,
            max_argument,
        }
    }

    /// The pattern text the format was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Highest argument index referenced by any site, if any
    pub fn max_argument(&self) -> Option<usize> {
        self.max_argument
    }

    /// Number of arguments needed to fill every site
    pub fn argument_count(&self) -> usize {
        self.max_argument.map_or(0, |max| max + 1)
    }

    /// Substitute arguments by index; unmatched sites are left in place
    pub fn format(&self, args: &[&str]) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        let mut cursor = 0usize;
        for site in &self.sites {
            if site.target >= args.len() {
                continue;
            }
            out.push_str(&self.pattern[cursor..site.start]);
            out.push_str(args[site.target]);
            cursor = site.end;
        }
        out.push_str(&self.pattern[cursor..]);
        out
    }
}
