//! Shell-style file name patterns

use std::path::MAIN_SEPARATOR;

use regex::Regex;

use crate::error::{Result, StdlibError};

/// A compiled file name pattern.
///
/// `*` matches any run of non-separator characters, `?` exactly one,
/// `[...]` a character class (`[^...]` or `[!...]` negated, `a-z` ranges) and
/// `\` escapes the next character. The whole name must match.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern. Malformed patterns fail with `InvalidArgument`.
    pub fn new(pattern: &str) -> Result<Self> {
        let translated = translate(pattern).ok_or_else(|| bad_pattern(pattern))?;
        let regex = Regex::new(&translated).map_err(|_| bad_pattern(pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `name` matches in full.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

fn bad_pattern(pattern: &str) -> StdlibError {
    StdlibError::InvalidArgument(format!("Invalid pattern: {}", pattern))
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}

fn translate(pattern: &str) -> Option<String> {
    let mut separator = String::new();
    push_class_char(&mut separator, MAIN_SEPARATOR);

    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(&format!("[^{}]*", separator)),
            '?' => out.push_str(&format!("[^{}]", separator)),
            '\\' => {
                let escaped = chars.next()?;
                out.push_str(&regex::escape(&escaped.to_string()));
            }
            '[' => {
                out.push('[');
                if matches!(chars.peek(), Some('^') | Some('!')) {
                    chars.next();
                    out.push('^');
                }
                let mut empty = true;
                loop {
                    let mut lo = chars.next()?;
                    if lo == ']' && !empty {
                        break;
                    }
                    if lo == '\\' {
                        lo = chars.next()?;
                    }
                    push_class_char(&mut out, lo);
                    if chars.peek() == Some(&'-') {
                        chars.next();
                        let mut hi = chars.next()?;
                        if hi == '\\' {
                            hi = chars.next()?;
                        } else if hi == ']' {
                            return None;
                        }
                        if lo > hi {
                            return None;
                        }
                        out.push('-');
                        push_class_char(&mut out, hi);
                    }
                    empty = false;
                }
                out.push(']');
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, name: &str) -> bool {
        Pattern::new(pattern).unwrap().matches(name)
    }

    #[test]
    fn test_wildcards() {
        assert!(matches("*.txt", "notes.txt"));
        assert!(!matches("*.txt", "notes.txt.bak"));
        assert!(matches("file?.log", "file1.log"));
        assert!(!matches("file?.log", "file10.log"));
        assert!(matches("*", ""));
    }

    #[test]
    fn test_star_stops_at_separator() {
        let name = format!("dir{}file", MAIN_SEPARATOR);
        assert!(!matches("*", &name));
    }

    #[test]
    fn test_classes() {
        assert!(matches("[abc].rs", "b.rs"));
        assert!(!matches("[abc].rs", "d.rs"));
        assert!(matches("[a-c]x", "cx"));
        assert!(matches("[^a-c]x", "dx"));
        assert!(matches("[!a-c]x", "dx"));
        assert!(!matches("[!a-c]x", "ax"));
    }

    #[test]
    fn test_literals_are_escaped() {
        assert!(matches("a.b", "a.b"));
        assert!(!matches("a.b", "axb"));
        assert!(matches("\\*", "*"));
        assert!(!matches("\\*", "x"));
        assert!(matches("(x)+", "(x)+"));
    }

    #[test]
    fn test_malformed_patterns() {
        for bad in ["[abc", "[]", "[z-a]", "trailing\\", "[a-]"] {
            let err = Pattern::new(bad).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid pattern: {}", bad));
        }
    }
}
