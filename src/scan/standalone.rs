//! Recognizer for aliases used as bare attributes.
//!
//! `<div *btn>` carries the alias `btn` in the position of an attribute name.
//! An attribute that has a value (`*btn="x"`) is an ordinary attribute, not
//! an alias.

use std::ops::Range;

use super::token::{is_identifier, AliasToken, TokenKind};

/// Returns the alias token for an attribute name, if it is one.
pub(crate) fn recognize(
    name: &str,
    range: Range<usize>,
    has_value: bool,
    prefix: &str,
) -> Option<AliasToken> {
    if has_value {
        return None;
    }

    let identifier = name.strip_prefix(prefix)?;
    if !is_identifier(identifier) {
        return None;
    }

    Some(AliasToken::new(
        prefix,
        identifier,
        range.start,
        TokenKind::StandaloneAttribute,
    ))
}
