//! Error types for alias expansion.

use std::ops::Range;

use thiserror::Error;

/// Error returned when an [`AliasConfig`](crate::AliasConfig) is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The prefix is the empty string.
    #[error("alias prefix must not be empty")]
    EmptyPrefix,
    /// The prefix contains a character that may appear in an identifier.
    #[error("alias prefix '{prefix}' contains identifier character '{ch}'")]
    IdentifierCharacter { prefix: String, ch: char },
    /// The prefix contains a character that terminates an attribute name.
    #[error("alias prefix '{prefix}' contains markup delimiter {ch:?}")]
    DelimiterCharacter { prefix: String, ch: char },
}

/// Two replacement ranges cover overlapping or abutting parts of the
/// original text.
///
/// Raised by the editor for overlapping ranges, and by the expansion engine
/// for aliases glued together inside one `class` entry (`*btn*card`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "replacement {}..{} overlaps existing replacement {}..{}",
    conflicting.start,
    conflicting.end,
    existing.start,
    existing.end
)]
pub struct ConflictError {
    /// Range already registered on the editor.
    pub existing: Range<usize>,
    /// Range that was rejected.
    pub conflicting: Range<usize>,
}

/// Error returned by a transform call.
///
/// A transform either yields a complete document or one of these errors;
/// partially rewritten output is never returned.
#[derive(Debug, Error)]
pub enum AliasError {
    /// The configuration was rejected before scanning.
    #[error("invalid alias configuration")]
    Config(#[from] ConfigError),
    /// Replacement ranges overlapped.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// The shortcut resolver failed for an identifier.
    #[error("failed to resolve alias '{identifier}'")]
    Resolver {
        identifier: String,
        #[source]
        source: anyhow::Error,
    },
}
