//! # Classalias - shortcut aliases for utility-class markup
//!
//! Classalias rewrites markup so that prefixed alias tokens become the utility
//! class names their shortcuts stand for:
//!
//! ```text
//! <div *btn>                 ->  <div text-white font-bold>
//! <div class="p-2 *btn-red"> ->  <div class="p-2 bg-red-500 text-white font-bold">
//! ```
//!
//! Aliases are found in two places:
//!
//! - **Standalone**: a bare attribute made of the prefix and an identifier
//! - **Embedded**: an entry of a quoted `class` attribute value
//!
//! Everything else in the text is copied byte for byte. Tokens with no
//! matching shortcut, or with a different prefix, are left alone.
//!
//! ## Quick Start
//!
//! ```rust
//! use classalias::{transform_alias, AliasConfig, Shortcuts};
//!
//! let shortcuts = Shortcuts::new()
//!     .add("btn", "text-white font-bold")
//!     .add_pattern(r"^btn-(.+)$", "bg-${1}-500 btn")
//!     .unwrap();
//!
//! let out = futures::executor::block_on(transform_alias(
//!     r#"<div *btn><a class="*btn-red"></a></div>"#,
//!     &shortcuts,
//!     &AliasConfig::default(),
//! ))
//! .unwrap();
//!
//! assert_eq!(
//!     out,
//!     r#"<div text-white font-bold><a class="bg-red-500 text-white font-bold"></a></div>"#
//! );
//! ```
//!
//! ## Resolvers
//!
//! Shortcut matching is delegated to a [`ShortcutResolver`]. The resolver is
//! asynchronous, so it can wrap a generator that expands shortcuts lazily or
//! remotely. [`Shortcuts`] is an in-memory resolver with static, pattern and
//! dynamic rules, variant groups and nested shortcuts.
//!
//! ## Pipeline
//!
//! | Stage | Type |
//! |-------|------|
//! | Scan | [`AliasScanner`] yields [`AliasToken`]s |
//! | Resolve | [`expand_shortcut`] returns a [`Resolution`] |
//! | Expand | [`expand_token`] returns an [`ExpansionResult`] |
//! | Edit | [`RangeEditor`] applies [`ReplacementRange`]s |
//!
//! A transform either returns the complete document or an [`AliasError`];
//! it never returns a partially expanded document.

pub mod config;
pub mod editor;
pub mod error;
pub mod expand;
pub mod resolve;
pub mod scan;

pub use config::{is_identifier_char, AliasConfig, DEFAULT_PREFIX};
pub use editor::{RangeEditor, ReplacementRange};
pub use error::{AliasError, ConfigError, ConflictError};
pub use expand::{
    expand_token, flatten_groups, transform_alias, transform_alias_into,
    transform_alias_with_report, AliasTransformer, ExpansionResult, TransformReport,
};
pub use resolve::{
    expand_shortcut, expand_variant_groups, Resolution, ShortcutError, ShortcutResolver,
    Shortcuts, MAX_EXPANSION_DEPTH,
};
pub use scan::{scan_aliases, AliasScanner, AliasToken, TokenKind};
