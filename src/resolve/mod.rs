//! Shortcut resolution.
//!
//! The engine never matches shortcut rules itself. It asks a
//! [`ShortcutResolver`] for the utility class names behind an identifier and
//! normalizes the answer into a [`Resolution`]. Whether the resolver is
//! synchronous, recursive or backed by a remote generator is invisible here.
//!
//! [`Shortcuts`] is a self-contained resolver with static, pattern and
//! dynamic rules.

pub mod shortcuts;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AliasError;

pub use shortcuts::{expand_variant_groups, ShortcutError, Shortcuts, MAX_EXPANSION_DEPTH};

/// A source of shortcut expansions.
///
/// Implementations return one group per matching shortcut rule, each group
/// holding utility class names in order. An identifier that matches nothing
/// yields an empty list; that is not an error.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use classalias::ShortcutResolver;
///
/// struct Fixed;
///
/// #[async_trait]
/// impl ShortcutResolver for Fixed {
///     async fn match_shortcut(&self, identifier: &str) -> anyhow::Result<Vec<Vec<String>>> {
///         Ok(match identifier {
///             "btn" => vec![vec!["px-4".into(), "py-2".into()]],
///             _ => vec![],
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait ShortcutResolver: Send + Sync {
    /// Returns the expansion groups for `identifier` (prefix already stripped).
    async fn match_shortcut(&self, identifier: &str) -> anyhow::Result<Vec<Vec<String>>>;
}

#[async_trait]
impl<T: ShortcutResolver + ?Sized> ShortcutResolver for Arc<T> {
    async fn match_shortcut(&self, identifier: &str) -> anyhow::Result<Vec<Vec<String>>> {
        (**self).match_shortcut(identifier).await
    }
}

#[async_trait]
impl<T: ShortcutResolver + ?Sized> ShortcutResolver for Box<T> {
    async fn match_shortcut(&self, identifier: &str) -> anyhow::Result<Vec<Vec<String>>> {
        (**self).match_shortcut(identifier).await
    }
}

/// Normalized outcome of resolving one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// At least one rule matched. Groups are non-empty.
    Found(Vec<Vec<String>>),
    /// No rule matched the identifier.
    NotFound,
}

impl Resolution {
    /// Builds a resolution from raw resolver output.
    ///
    /// Entries are split on whitespace, empty entries and groups are
    /// dropped, and an answer with nothing left becomes [`Resolution::NotFound`].
    pub fn from_groups(groups: Vec<Vec<String>>) -> Self {
        let groups: Vec<Vec<String>> = groups
            .into_iter()
            .map(|group| {
                group
                    .iter()
                    .flat_map(|entry| entry.split_whitespace())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();

        if groups.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::Found(groups)
        }
    }

    /// Returns true if a rule matched.
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Returns the groups, if any rule matched.
    pub fn groups(&self) -> Option<&[Vec<String>]> {
        match self {
            Resolution::Found(groups) => Some(groups),
            Resolution::NotFound => None,
        }
    }

    /// Consumes the resolution, returning its groups (empty when not found).
    pub fn into_groups(self) -> Vec<Vec<String>> {
        match self {
            Resolution::Found(groups) => groups,
            Resolution::NotFound => Vec::new(),
        }
    }
}

/// Resolves one identifier without touching any text.
///
/// The grouped result is returned as-is (not flattened), which is useful to
/// inspect how an alias decomposes.
///
/// # Errors
///
/// Returns [`AliasError::Resolver`] if the resolver fails.
///
/// # Example
///
/// ```rust
/// use classalias::{expand_shortcut, Resolution, Shortcuts};
///
/// let shortcuts = Shortcuts::new()
///     .add("btn", "text-(white xl) font-bold")
///     .add_pattern(r"^btn-(.+)$", "bg-${1}-500 btn")
///     .unwrap();
///
/// let groups = futures::executor::block_on(expand_shortcut("btn-red", &shortcuts)).unwrap();
/// assert_eq!(
///     groups,
///     Resolution::Found(vec![vec![
///         "bg-red-500".to_string(),
///         "text-white".to_string(),
///         "text-xl".to_string(),
///         "font-bold".to_string(),
///     ]])
/// );
/// ```
pub async fn expand_shortcut<R>(identifier: &str, resolver: &R) -> Result<Resolution, AliasError>
where
    R: ShortcutResolver + ?Sized,
{
    let groups = resolver
        .match_shortcut(identifier)
        .await
        .map_err(|source| AliasError::Resolver {
            identifier: identifier.to_string(),
            source,
        })?;

    Ok(Resolution::from_groups(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Failing;

    #[async_trait]
    impl ShortcutResolver for Failing {
        async fn match_shortcut(&self, _identifier: &str) -> anyhow::Result<Vec<Vec<String>>> {
            anyhow::bail!("generator crashed")
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_groups_normalizes_entries() {
        let resolution = Resolution::from_groups(vec![
            strings(&["a b", " c "]),
            strings(&[]),
            strings(&["", "  "]),
            strings(&["d"]),
        ]);
        assert_eq!(
            resolution,
            Resolution::Found(vec![strings(&["a", "b", "c"]), strings(&["d"])])
        );
    }

    #[test]
    fn test_from_groups_empty_is_not_found() {
        assert_eq!(Resolution::from_groups(vec![]), Resolution::NotFound);
        assert_eq!(
            Resolution::from_groups(vec![strings(&[" "])]),
            Resolution::NotFound
        );
    }

    #[test]
    fn test_resolution_accessors() {
        let found = Resolution::Found(vec![strings(&["a"])]);
        assert!(found.is_found());
        assert_eq!(found.groups().map(|g| g.len()), Some(1));
        assert_eq!(found.into_groups(), vec![strings(&["a"])]);

        assert!(!Resolution::NotFound.is_found());
        assert!(Resolution::NotFound.groups().is_none());
        assert!(Resolution::NotFound.into_groups().is_empty());
    }

    #[test]
    fn test_expand_shortcut_not_found() {
        let shortcuts = Shortcuts::new().add("btn", "p-2");
        let resolution = block_on(expand_shortcut("card", &shortcuts)).unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[test]
    fn test_expand_shortcut_failure_names_identifier() {
        let err = block_on(expand_shortcut("btn", &Failing)).unwrap_err();
        match err {
            AliasError::Resolver { identifier, source } => {
                assert_eq!(identifier, "btn");
                assert!(source.to_string().contains("generator crashed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_resolver_through_smart_pointers() {
        let shortcuts = Arc::new(Shortcuts::new().add("btn", "p-2"));
        let boxed: Box<dyn ShortcutResolver> = Box::new(Shortcuts::new().add("btn", "p-3"));

        let via_arc = block_on(expand_shortcut("btn", &shortcuts)).unwrap();
        let via_box = block_on(expand_shortcut("btn", &boxed)).unwrap();

        assert_eq!(via_arc, Resolution::Found(vec![strings(&["p-2"])]));
        assert_eq!(via_box, Resolution::Found(vec![strings(&["p-3"])]));
    }
}
