//! Alias expansion engine.
//!
//! This module ties scanning, resolution and editing together:
//!
//! 1. the [`AliasScanner`] finds the alias tokens of a text
//! 2. every token is resolved through a [`ShortcutResolver`], all at once
//! 3. matched tokens become [`ReplacementRange`]s on a [`RangeEditor`]
//!
//! Resolutions run concurrently and may finish in any order; replacements
//! are keyed by their offsets in the original text, so the result does not
//! depend on completion order. A transform is all-or-nothing: if any
//! resolution fails, or the future is dropped, no text is produced and the
//! editor is left untouched.

use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::{debug, trace};

use crate::config::AliasConfig;
use crate::editor::{RangeEditor, ReplacementRange};
use crate::error::{AliasError, ConflictError};
use crate::resolve::{expand_shortcut, Resolution, ShortcutResolver};
use crate::scan::{AliasScanner, AliasToken};

/// Outcome of resolving one alias token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionResult {
    /// The token that was resolved.
    pub token: AliasToken,
    /// Whether any shortcut rule matched.
    pub matched: bool,
    /// Flattened utility class names, first occurrence wins.
    pub class_names: Vec<String>,
}

impl ExpansionResult {
    /// Text that replaces the token, or `None` if the token stays as-is.
    pub fn replacement_text(&self) -> Option<String> {
        self.matched.then(|| self.class_names.join(" "))
    }

    /// The replacement for the token's span, if it matched.
    pub fn replacement(&self) -> Option<ReplacementRange> {
        self.replacement_text()
            .map(|text| ReplacementRange::new(self.token.span(), text))
    }
}

/// Flattens expansion groups into one list without duplicates.
///
/// Order follows the first occurrence of each name across all groups.
///
/// ```rust
/// use classalias::flatten_groups;
///
/// let groups = vec![
///     vec!["a".to_string(), "b".to_string()],
///     vec!["a".to_string(), "c".to_string()],
/// ];
/// assert_eq!(flatten_groups(&groups), vec!["a", "b", "c"]);
/// ```
pub fn flatten_groups(groups: &[Vec<String>]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for name in groups.iter().flatten() {
        if seen.insert(name.as_str()) {
            out.push(name.clone());
        }
    }
    out
}

/// Resolves one token.
///
/// # Errors
///
/// Returns [`AliasError::Resolver`] if the resolver fails.
pub async fn expand_token<R>(
    token: AliasToken,
    resolver: &R,
) -> Result<ExpansionResult, AliasError>
where
    R: ShortcutResolver + ?Sized,
{
    let resolution = expand_shortcut(&token.identifier, resolver).await?;

    let result = match resolution {
        Resolution::Found(groups) => ExpansionResult {
            class_names: flatten_groups(&groups),
            matched: true,
            token,
        },
        Resolution::NotFound => {
            trace!(alias = %token.text(), offset = token.start, "no shortcut matched");
            ExpansionResult {
                token,
                matched: false,
                class_names: Vec::new(),
            }
        }
    };

    Ok(result)
}

/// Rejects aliases glued together without whitespace (`*btn*card`).
///
/// Their spans abut, so expanding both would fuse two class lists into one
/// entry. There is no sensible merge, so the pair is reported as a conflict.
fn check_glued(tokens: &[AliasToken]) -> Result<(), ConflictError> {
    for pair in tokens.windows(2) {
        if pair[0].end == pair[1].start {
            return Err(ConflictError {
                existing: pair[0].span(),
                conflicting: pair[1].span(),
            });
        }
    }
    Ok(())
}

/// Scans `source` and resolves every alias token.
async fn resolve_all<R>(
    source: &str,
    resolver: &R,
    config: &AliasConfig,
) -> Result<Vec<ExpansionResult>, AliasError>
where
    R: ShortcutResolver + ?Sized,
{
    let tokens: Vec<AliasToken> = AliasScanner::new(source, config)?.collect();
    check_glued(&tokens)?;

    debug!(
        tokens = tokens.len(),
        prefix = %config.prefix,
        "resolving alias tokens"
    );

    try_join_all(tokens.into_iter().map(|token| expand_token(token, resolver))).await
}

/// Expands the aliases of the editor's text into replacements on `editor`.
///
/// Returns the number of replacements registered. Other replacements
/// already on the editor are kept; if one of them overlaps an alias, the
/// call fails and the editor is unchanged.
///
/// # Errors
///
/// - [`AliasError::Config`] if the prefix is invalid
/// - [`AliasError::Resolver`] if any resolution fails
/// - [`AliasError::Conflict`] if replacements would overlap
pub async fn transform_alias_into<R>(
    editor: &mut RangeEditor<'_>,
    resolver: &R,
    config: &AliasConfig,
) -> Result<usize, AliasError>
where
    R: ShortcutResolver + ?Sized,
{
    let results = resolve_all(editor.original(), resolver, config).await?;
    let replacements: Vec<ReplacementRange> =
        results.iter().filter_map(ExpansionResult::replacement).collect();
    let count = replacements.len();

    editor.overwrite_all(replacements)?;

    debug!(
        tokens = results.len(),
        replaced = count,
        "expanded alias tokens"
    );
    Ok(count)
}

/// Result of [`transform_alias_with_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    /// The rewritten text.
    pub text: String,
    /// One entry per alias token found, in source order.
    pub expansions: Vec<ExpansionResult>,
}

impl TransformReport {
    /// Returns true if at least one alias was replaced.
    pub fn has_changed(&self) -> bool {
        self.expansions.iter().any(|e| e.matched)
    }

    /// Tokens that matched no shortcut.
    pub fn unmatched(&self) -> impl Iterator<Item = &AliasToken> {
        self.expansions
            .iter()
            .filter(|e| !e.matched)
            .map(|e| &e.token)
    }
}

/// Rewrites `source`, also returning the outcome of every alias token.
///
/// # Errors
///
/// See [`transform_alias`].
pub async fn transform_alias_with_report<R>(
    source: &str,
    resolver: &R,
    config: &AliasConfig,
) -> Result<TransformReport, AliasError>
where
    R: ShortcutResolver + ?Sized,
{
    let expansions = resolve_all(source, resolver, config).await?;

    let mut editor = RangeEditor::new(source);
    editor.overwrite_all(expansions.iter().filter_map(ExpansionResult::replacement))?;

    Ok(TransformReport {
        text: editor.apply(),
        expansions,
    })
}

/// Rewrites every alias token of `source` into its utility class names.
///
/// Tokens with no matching shortcut, and tokens using another prefix, are
/// left exactly as they are.
///
/// # Errors
///
/// - [`AliasError::Config`] if the prefix is invalid
/// - [`AliasError::Resolver`] if any resolution fails
/// - [`AliasError::Conflict`] if aliases are glued together
///
/// # Example
///
/// ```rust
/// use classalias::{transform_alias, AliasConfig, Shortcuts};
///
/// let shortcuts = Shortcuts::new().add("btn", "text-white font-bold");
/// let config = AliasConfig::default();
///
/// let out = futures::executor::block_on(transform_alias(
///     r#"<div *btn class="p-2 *btn"><i *icon></i></div>"#,
///     &shortcuts,
///     &config,
/// ))
/// .unwrap();
///
/// assert_eq!(
///     out,
///     r#"<div text-white font-bold class="p-2 text-white font-bold"><i *icon></i></div>"#
/// );
/// ```
pub async fn transform_alias<R>(
    source: &str,
    resolver: &R,
    config: &AliasConfig,
) -> Result<String, AliasError>
where
    R: ShortcutResolver + ?Sized,
{
    let mut editor = RangeEditor::new(source);
    transform_alias_into(&mut editor, resolver, config).await?;
    Ok(editor.apply())
}

/// A resolver paired with a validated configuration.
///
/// # Example
///
/// ```rust
/// use classalias::{AliasConfig, AliasTransformer, Shortcuts};
///
/// let transformer = AliasTransformer::new(
///     Shortcuts::new().add("card", "p-4 rounded shadow"),
///     AliasConfig::new("&"),
/// )
/// .unwrap();
///
/// let out = futures::executor::block_on(transformer.transform("<section &card>")).unwrap();
/// assert_eq!(out, "<section p-4 rounded shadow>");
/// ```
#[derive(Debug, Clone)]
pub struct AliasTransformer<R> {
    resolver: R,
    config: AliasConfig,
}

impl<R: ShortcutResolver> AliasTransformer<R> {
    /// Creates a transformer.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Config`] if the configuration is invalid.
    pub fn new(resolver: R, config: AliasConfig) -> Result<Self, AliasError> {
        config.validate()?;
        Ok(Self { resolver, config })
    }

    /// Creates a transformer with the default prefix.
    pub fn with_default_prefix(resolver: R) -> Self {
        Self {
            resolver,
            config: AliasConfig::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AliasConfig {
        &self.config
    }

    /// Returns the resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Rewrites `source`. See [`transform_alias`].
    pub async fn transform(&self, source: &str) -> Result<String, AliasError> {
        transform_alias(source, &self.resolver, &self.config).await
    }

    /// Registers replacements on `editor`. See [`transform_alias_into`].
    pub async fn transform_into(&self, editor: &mut RangeEditor<'_>) -> Result<usize, AliasError> {
        transform_alias_into(editor, &self.resolver, &self.config).await
    }

    /// Rewrites `source` and reports every token. See
    /// [`transform_alias_with_report`].
    pub async fn transform_with_report(
        &self,
        source: &str,
    ) -> Result<TransformReport, AliasError> {
        transform_alias_with_report(source, &self.resolver, &self.config).await
    }

    /// Resolves one identifier without touching text. See
    /// [`expand_shortcut`].
    pub async fn expand(&self, identifier: &str) -> Result<Resolution, AliasError> {
        expand_shortcut(identifier, &self.resolver).await
    }
}
