//! Alias token types.

use std::ops::Range;

/// Syntactic position an alias token was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bare pseudo-attribute, e.g. `<div *btn>`.
    StandaloneAttribute,
    /// One entry of a quoted `class` value, e.g. `class="p-2 *btn"`.
    ClassAttributeValue,
}

/// A prefixed identifier found in the source text.
///
/// A token is identified by its byte span in the original text. The span
/// covers the prefix and the identifier, and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasToken {
    /// The prefix that marked this token.
    pub prefix: String,
    /// The identifier with the prefix stripped.
    pub identifier: String,
    /// Byte offset of the prefix in the original text.
    pub start: usize,
    /// Byte offset one past the last identifier byte.
    pub end: usize,
    /// Where the token was found.
    pub kind: TokenKind,
}

impl AliasToken {
    pub(crate) fn new(prefix: &str, identifier: &str, start: usize, kind: TokenKind) -> Self {
        Self {
            prefix: prefix.to_string(),
            identifier: identifier.to_string(),
            start,
            end: start + prefix.len() + identifier.len(),
            kind,
        }
    }

    /// Byte range of the token in the original text.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: tokens carry at least a prefix and one identifier byte.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The token as it appears in the source, prefix included.
    pub fn text(&self) -> String {
        format!("{}{}", self.prefix, self.identifier)
    }
}

/// Returns true if `s` is a non-empty run of identifier characters.
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(crate::config::is_identifier_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_span() {
        let token = AliasToken::new("*", "btn", 5, TokenKind::StandaloneAttribute);
        assert_eq!(token.span(), 5..9);
        assert_eq!(token.len(), 4);
        assert!(!token.is_empty());
        assert_eq!(token.text(), "*btn");
    }

    #[test]
    fn test_token_span_multibyte_prefix() {
        let token = AliasToken::new("§", "card", 0, TokenKind::ClassAttributeValue);
        assert_eq!(token.span(), 0..6);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("btn-red"));
        assert!(is_identifier("hover:btn_x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("btn*red"));
        assert!(!is_identifier("btn red"));
    }
}
