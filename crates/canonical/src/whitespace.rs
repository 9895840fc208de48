//! Whitespace normalization utilities.
//!
//! Comparison keys never carry runs of whitespace: any internal sequence of
//! Unicode whitespace collapses to a single ASCII space and the edges are
//! trimmed.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello \t\n world  "), "hello world");
//! assert_eq!(collapse_whitespace("   "), "");
//! ```

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces.
///
/// Returns an empty string if the input is empty or whitespace-only.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a\u{00A0}\u{00A0}b\r\nc"), "a b c");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(collapse_whitespace("hello world"), "hello world");
    }
}
