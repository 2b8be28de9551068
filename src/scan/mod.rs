//! Alias token discovery.
//!
//! This module finds alias tokens in markup text:
//!
//! - [`AliasToken`]: A prefixed identifier with its byte span
//! - [`TokenKind`]: Whether the token was a bare attribute or a `class` entry
//! - [`AliasScanner`]: Lazy left-to-right iterator over the tokens of a text
//!
//! A lenient markup lexer splits the text into tag attributes and plain
//! text. Bare attribute names go to the standalone recognizer, and quoted
//! `class` values go to the class recognizer. Plain text outside any tag,
//! comment or declaration is searched for tag-less `class="..."` fragments.
//! Both recognizers feed a single stream tagged with [`TokenKind`], so
//! nothing downstream needs to know which one fired.

mod class_attr;
mod markup;
mod standalone;
mod token;

use std::collections::VecDeque;

pub use token::{AliasToken, TokenKind};

use crate::config::AliasConfig;
use crate::error::ConfigError;
use markup::{MarkupLexer, Region};

/// Iterator over the alias tokens of a text, in source order.
///
/// The scanner is lazy: the text is lexed only as far as needed to produce
/// the next token.
///
/// # Example
///
/// ```rust
/// use classalias::{AliasConfig, AliasScanner, TokenKind};
///
/// let config = AliasConfig::default();
/// let src = r#"<div *btn class="p-2 *card">"#;
/// let tokens: Vec<_> = AliasScanner::new(src, &config).unwrap().collect();
///
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].identifier, "btn");
/// assert_eq!(tokens[0].kind, TokenKind::StandaloneAttribute);
/// assert_eq!(tokens[1].identifier, "card");
/// assert_eq!(tokens[1].kind, TokenKind::ClassAttributeValue);
/// ```
pub struct AliasScanner<'a> {
    lexer: MarkupLexer<'a>,
    prefix: &'a str,
    pending: VecDeque<AliasToken>,
}

impl<'a> AliasScanner<'a> {
    /// Creates a scanner over `src`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the prefix is invalid.
    pub fn new(src: &'a str, config: &'a AliasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lexer: MarkupLexer::new(src),
            prefix: &config.prefix,
            pending: VecDeque::new(),
        })
    }
}

impl Iterator for AliasScanner<'_> {
    type Item = AliasToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            match self.lexer.next()? {
                Region::Attribute(attr) => {
                    let range = attr.range.clone();
                    let bare = standalone::recognize(attr.name, range, attr.has_value, self.prefix);
                    if bare.is_some() {
                        return bare;
                    }
                    class_attr::recognize_attribute(&attr, self.prefix, &mut self.pending);
                }
                Region::Text { text, start } => {
                    class_attr::recognize_text(text, start, self.prefix, &mut self.pending);
                }
            }
        }
    }
}

/// Collects every alias token of `src`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the prefix is invalid.
pub fn scan_aliases(src: &str, config: &AliasConfig) -> Result<Vec<AliasToken>, ConfigError> {
    Ok(AliasScanner::new(src, config)?.collect())
}
