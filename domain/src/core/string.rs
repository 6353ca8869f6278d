//! String utilities for the domain layer.

use std::borrow::Cow;

/// Shorten `s` to at most `max_chars` characters, marking the cut with `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some(_) => {
            let keep = max_chars.saturating_sub(3);
            let end = s.char_indices().nth(keep).map(|(i, _)| i).unwrap_or(s.len());
            Cow::Owned(format!("{}...", &s[..end]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("日本語のテスト", 7), "日本語のテスト");
        assert_eq!(truncate("日本語のテスト文字列", 7), "日本語の...");
    }

    #[test]
    fn test_truncate_tiny_limit() {
        assert_eq!(truncate("abcdef", 2), "...");
    }
}
