//! Recognizer for aliases inside `class` attribute values.
//!
//! Inside tags, the value of an attribute named exactly `class` is taken
//! from the markup lexer, so quoted values of other attributes and comments
//! are never scanned. Plain text outside any tag may still hold a bare
//! `class="..."` fragment (a template snippet without its element); those
//! are found with a regex over that text only.
//!
//! Each whitespace-separated entry of a value is checked on its own:
//! `class="p-2 *btn *card"` yields two aliases. An entry made of several
//! aliases glued together (`*btn*card`) yields one token per alias, with
//! abutting spans; the expansion engine refuses to guess how those should be
//! merged.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;

use super::markup::Attribute;
use super::token::{is_identifier, AliasToken, TokenKind};

/// Attribute whose value is scanned for embedded aliases.
const CLASS_ATTRIBUTE: &str = "class";

/// A quoted `class` attribute in plain text. The leading boundary keeps
/// `data-class` and `:class` out.
static CLASS_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("class attribute pattern is valid")
});

/// Iterates over the whitespace-separated entries of `value` with their
/// byte offsets.
fn entries(value: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = value;
    let mut offset = 0;
    std::iter::from_fn(move || {
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            return None;
        }
        let len = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let entry = (offset, &trimmed[..len]);
        rest = &trimmed[len..];
        offset += len;
        Some(entry)
    })
}

/// Appends the alias tokens of one `class` value starting at byte `start`.
fn recognize_value(value: &str, start: usize, prefix: &str, out: &mut VecDeque<AliasToken>) {
    for (offset, entry) in entries(value) {
        let Some(body) = entry.strip_prefix(prefix) else {
            continue;
        };

        let identifiers: Vec<&str> = body.split(prefix).collect();
        if !identifiers.iter().all(|id| is_identifier(id)) {
            continue;
        }

        let mut pos = start + offset;
        for identifier in identifiers {
            let token = AliasToken::new(prefix, identifier, pos, TokenKind::ClassAttributeValue);
            pos = token.end;
            out.push_back(token);
        }
    }
}

/// Appends the aliases of a tag attribute, if it is a quoted `class`.
pub(crate) fn recognize_attribute(
    attr: &Attribute<'_>,
    prefix: &str,
    out: &mut VecDeque<AliasToken>,
) {
    if attr.name != CLASS_ATTRIBUTE {
        return;
    }
    if let Some(value) = attr.value.as_ref().filter(|v| v.quoted) {
        recognize_value(value.text, value.range.start, prefix, out);
    }
}

/// Appends the aliases of `class="..."` fragments in plain text starting at
/// byte `start`.
pub(crate) fn recognize_text(
    text: &str,
    start: usize,
    prefix: &str,
    out: &mut VecDeque<AliasToken>,
) {
    for caps in CLASS_VALUE.captures_iter(text) {
        if let Some(value) = caps.get(1).or_else(|| caps.get(2)) {
            recognize_value(value.as_str(), start + value.start(), prefix, out);
        }
    }
}
