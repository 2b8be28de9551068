//! In-memory shortcut table.
//!
//! [`Shortcuts`] maps identifiers to utility class names with three kinds of
//! rules:
//!
//! | Rule | Added with | Matches |
//! |------|------------|---------|
//! | Static | [`Shortcuts::add`] | the exact name |
//! | Pattern | [`Shortcuts::add_pattern`] | a regex; the body is a `$1`/`${1}` template |
//! | Dynamic | [`Shortcuts::add_dynamic`] | a regex; the body is computed from the captures |
//!
//! # Expansion
//!
//! A body is a whitespace-separated list of utilities. Variant groups are
//! expanded first (`text-(white xl)` becomes `text-white text-xl`). Every
//! utility that is itself a shortcut is then expanded in place, recursively.
//! Each matching rule contributes one group, in registration order.
//!
//! Recursion stops with an error on a cycle (`a -> b -> a`) or once the
//! nesting reaches [`MAX_EXPANSION_DEPTH`].

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use super::ShortcutResolver;

/// Maximum nesting of shortcuts inside shortcuts.
pub const MAX_EXPANSION_DEPTH: usize = 32;

/// Innermost variant group: `prefix` + `:` or `-` + `(items)`.
static VARIANT_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\s()]+?)([:-])\(([^()]*)\)").expect("variant group pattern is valid")
});

/// Error returned by the shortcut table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutError {
    /// A pattern rule did not compile.
    #[error("invalid shortcut pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    /// A shortcut expands, directly or not, into itself.
    #[error("cycle detected in shortcuts: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },
    /// Shortcuts are nested deeper than [`MAX_EXPANSION_DEPTH`].
    #[error("shortcut '{identifier}' nests deeper than {limit} levels")]
    DepthExceeded { identifier: String, limit: usize },
}

type DynamicBody = Arc<dyn Fn(&Captures<'_>) -> String + Send + Sync>;

#[derive(Clone)]
enum Rule {
    Static { name: String, body: String },
    Pattern { regex: Regex, template: String },
    Dynamic { regex: Regex, body: DynamicBody },
}

impl Rule {
    /// Returns the rule body for `identifier`, if the rule matches.
    fn body_for(&self, identifier: &str) -> Option<String> {
        match self {
            Rule::Static { name, body } => (name == identifier).then(|| body.clone()),
            Rule::Pattern { regex, template } => {
                let caps = regex.captures(identifier)?;
                let mut body = String::new();
                caps.expand(template, &mut body);
                Some(body)
            }
            Rule::Dynamic { regex, body } => {
                let caps = regex.captures(identifier)?;
                Some(body(&caps))
            }
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Static { name, body } => write!(f, "{} => {}", name, body),
            Rule::Pattern { regex, template } => write!(f, "/{}/ => {}", regex, template),
            Rule::Dynamic { regex, .. } => write!(f, "/{}/ => <fn>", regex),
        }
    }
}

/// A table of shortcut rules.
///
/// # Example
///
/// ```rust
/// use classalias::Shortcuts;
///
/// let shortcuts = Shortcuts::new()
///     .add("btn", "text-(white xl) font-bold py-2 px-4 rounded")
///     .add_pattern(r"^btn-(.+)$", "bg-${1}-500 hover:bg-${1}-700 btn")
///     .unwrap();
///
/// let groups = shortcuts.expand("btn-red").unwrap();
/// assert_eq!(
///     groups[0],
///     vec![
///         "bg-red-500", "hover:bg-red-700", "text-white", "text-xl",
///         "font-bold", "py-2", "px-4", "rounded",
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Shortcuts {
    rules: Vec<Rule>,
}

impl Shortcuts {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a static shortcut, returning the table for chaining.
    pub fn add(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.rules.push(Rule::Static {
            name: name.into(),
            body: body.into(),
        });
        self
    }

    /// Adds a pattern shortcut whose body is a capture template.
    ///
    /// The template may reference captures as `$1`, `${1}` or `${name}`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcutError::InvalidPattern`] if `pattern` is not a valid
    /// regex.
    pub fn add_pattern(
        mut self,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<Self, ShortcutError> {
        self.rules.push(Rule::Pattern {
            regex: compile(pattern)?,
            template: template.into(),
        });
        Ok(self)
    }

    /// Adds a pattern shortcut whose body is computed from the captures.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcutError::InvalidPattern`] if `pattern` is not a valid
    /// regex.
    pub fn add_dynamic<F>(mut self, pattern: &str, body: F) -> Result<Self, ShortcutError>
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        self.rules.push(Rule::Dynamic {
            regex: compile(pattern)?,
            body: Arc::new(body),
        });
        Ok(self)
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if at least one rule matches `identifier`.
    pub fn matches(&self, identifier: &str) -> bool {
        self.rules.iter().any(|r| r.body_for(identifier).is_some())
    }

    /// Expands `identifier` into one group per matching rule.
    ///
    /// An identifier that matches no rule yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcutError::CycleDetected`] or
    /// [`ShortcutError::DepthExceeded`] when nested shortcuts recurse without
    /// end.
    pub fn expand(&self, identifier: &str) -> Result<Vec<Vec<String>>, ShortcutError> {
        let mut stack = vec![identifier.to_string()];
        let mut groups = Vec::new();

        for body in self.bodies(identifier) {
            let group = self.expand_body(&body, &mut stack)?;
            if !group.is_empty() {
                groups.push(group);
            }
        }

        Ok(groups)
    }

    fn bodies(&self, identifier: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|r| r.body_for(identifier))
            .collect()
    }

    fn expand_body(
        &self,
        body: &str,
        stack: &mut Vec<String>,
    ) -> Result<Vec<String>, ShortcutError> {
        let body = expand_variant_groups(body);
        let mut out = Vec::new();

        for utility in body.split_whitespace() {
            let nested = self.bodies(utility);
            if nested.is_empty() {
                out.push(utility.to_string());
                continue;
            }

            if stack.iter().any(|s| s == utility) {
                let mut path = stack.clone();
                path.push(utility.to_string());
                return Err(ShortcutError::CycleDetected { path });
            }
            if stack.len() > MAX_EXPANSION_DEPTH {
                return Err(ShortcutError::DepthExceeded {
                    identifier: stack[0].clone(),
                    limit: MAX_EXPANSION_DEPTH,
                });
            }

            stack.push(utility.to_string());
            for nested_body in nested {
                out.extend(self.expand_body(&nested_body, stack)?);
            }
            stack.pop();
        }

        Ok(out)
    }
}

#[async_trait]
impl ShortcutResolver for Shortcuts {
    async fn match_shortcut(&self, identifier: &str) -> anyhow::Result<Vec<Vec<String>>> {
        Ok(self.expand(identifier)?)
    }
}

fn compile(pattern: &str) -> Result<Regex, ShortcutError> {
    Regex::new(pattern).map_err(|e| ShortcutError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Expands variant groups in a utility list.
///
/// `prefix-(a b)` becomes `prefix-a prefix-b` and `variant:(a b)` becomes
/// `variant:a variant:b`. Nested groups are expanded from the inside out.
///
/// ```rust
/// use classalias::expand_variant_groups;
///
/// assert_eq!(expand_variant_groups("text-(white xl) p-2"), "text-white text-xl p-2");
/// assert_eq!(
///     expand_variant_groups("hover:(bg-(red blue) p-1)"),
///     "hover:bg-red hover:bg-blue hover:p-1"
/// );
/// ```
pub fn expand_variant_groups(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let replaced = match VARIANT_GROUP.replace_all(&current, |caps: &Captures<'_>| {
            let prefix = &caps[1];
            let separator = &caps[2];
            caps[3]
                .split_whitespace()
                .map(|item| format!("{}{}{}", prefix, separator, item))
                .collect::<Vec<_>>()
                .join(" ")
        }) {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        };

        match replaced {
            Some(next) => current = next,
            None => return current,
        }
    }
}
