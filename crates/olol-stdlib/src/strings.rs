//! String utilities
//!
//! Lengths and offsets are in bytes. Offsets that land inside a multi-byte
//! character move forward to the next character boundary.

use crate::error::{Result, StdlibError};

/// Smallest char boundary of `s` that is `>= index`, clamped to `s.len()`.
pub(crate) fn ceil_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Byte length.
pub fn len(s: &str) -> usize {
    s.len()
}

/// Up to `length` bytes starting at `start`. Out-of-range starts give `""`.
pub fn substr(s: &str, start: i64, length: i64) -> String {
    if start < 0 || start as usize >= s.len() || length <= 0 {
        return String::new();
    }
    let begin = ceil_char_boundary(s, start as usize);
    let end = ceil_char_boundary(s, (start as usize).saturating_add(length as usize));
    s[begin..end.max(begin)].to_string()
}

/// `s` repeated `count` times.
pub fn repeat(s: &str, count: i64) -> Result<String> {
    if count < 0 {
        return Err(StdlibError::InvalidArgument(
            "REPEAT: count must be non-negative".to_string(),
        ));
    }
    if s.is_empty() || count == 0 {
        return Ok(String::new());
    }
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    let too_large = || {
        StdlibError::InvalidArgument(format!(
            "REPEAT: result too large ({} x {} bytes)",
            count,
            s.len()
        ))
    };
    let total = s.len().checked_mul(count).ok_or_else(too_large)?;
    let mut out = String::new();
    out.try_reserve_exact(total).map_err(|_| too_large())?;
    for _ in 0..count {
        out.push_str(s);
    }
    Ok(out)
}

/// Uppercase the first letter of every word.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_' || c == '\'');
    }
    out
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Split on `separator`; an empty separator splits into characters.
pub fn split(s: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return s.chars().map(String::from).collect();
    }
    s.split(separator).map(str::to_string).collect()
}

/// Replace the first occurrence.
pub fn replace_first(s: &str, from: &str, to: &str) -> String {
    s.replacen(from, to, 1)
}

/// Byte offset of the first occurrence, or -1.
pub fn index_of(s: &str, needle: &str) -> i64 {
    s.find(needle).map(|i| i as i64).unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_char_boundary() {
        let s = "aé!";
        assert_eq!(ceil_char_boundary(s, 0), 0);
        assert_eq!(ceil_char_boundary(s, 1), 1);
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(ceil_char_boundary(s, 10), 4);
    }

    #[test]
    fn test_substr_bounds() {
        assert_eq!(substr("hello", 1, 3), "ell");
        assert_eq!(substr("hello", 3, 10), "lo");
        assert_eq!(substr("hello", 5, 1), "");
        assert_eq!(substr("hello", -1, 2), "");
        assert_eq!(substr("hello", 0, 0), "");
    }

    #[test]
    fn test_substr_respects_characters() {
        // 'é' occupies bytes 1..3
        assert_eq!(substr("héllo", 0, 2), "hé");
        assert_eq!(substr("héllo", 2, 2), "l");
    }

    #[test]
    fn test_repeat() {
        assert_eq!(repeat("ab", 3).unwrap(), "ababab");
        assert_eq!(repeat("ab", 0).unwrap(), "");
        assert!(repeat("ab", -1).is_err());
        assert_eq!(repeat("", i64::MAX).unwrap(), "");
    }

    #[test]
    fn test_repeat_overflow_is_an_error() {
        let err = repeat("ab", i64::MAX).unwrap_err();
        assert!(matches!(err, StdlibError::InvalidArgument(_)));
        assert!(err.to_string().starts_with("REPEAT: result too large"));
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(title("hello big world"), "Hello Big World");
        assert_eq!(title("it's-a test"), "It's-A Test");
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_split() {
        assert_eq!(split("a,b,,c", ","), vec!["a", "b", "", "c"]);
        assert_eq!(split("añb", ""), vec!["a", "ñ", "b"]);
        assert_eq!(split("", ","), vec![""]);
    }

    #[test]
    fn test_replace_and_index() {
        assert_eq!(replace_first("a-a-a", "a", "b"), "b-a-a");
        assert_eq!(index_of("hello", "ll"), 2);
        assert_eq!(index_of("hello", "z"), -1);
        assert_eq!(index_of("hello", ""), 0);
    }
}
