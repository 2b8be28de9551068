//! Alias prefix configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix used when no configuration is supplied.
pub const DEFAULT_PREFIX: &str = "*";

/// Returns true for characters that may appear in an alias identifier.
///
/// Identifiers are runs of ASCII letters, digits, `-`, `_` and `:`.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')
}

/// Characters that end an attribute name when scanning markup.
pub(crate) fn is_markup_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '/')
}

/// Configuration for alias expansion.
///
/// The prefix is the only tunable: it decides which tokens the scanner
/// recognizes, not how they are expanded. Configurations are passed
/// explicitly to every transform call.
///
/// # Example
///
/// ```rust
/// use classalias::AliasConfig;
///
/// let config = AliasConfig::default();
/// assert_eq!(config.prefix, "*");
///
/// let custom = AliasConfig::new("&");
/// assert!(custom.validate().is_ok());
///
/// assert!(AliasConfig::new("a").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Literal string marking an alias token.
    pub prefix: String,
}

impl AliasConfig {
    /// Creates a configuration with the given prefix.
    ///
    /// The prefix is not validated here; see [`AliasConfig::validate`].
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Checks that the prefix can be told apart from identifiers and markup.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPrefix`] for an empty prefix
    /// - [`ConfigError::IdentifierCharacter`] if any character could be part
    ///   of an identifier
    /// - [`ConfigError::DelimiterCharacter`] if any character would split an
    ///   attribute name (whitespace, quotes, `=`, `<`, `>`, `/`)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        for ch in self.prefix.chars() {
            if is_identifier_char(ch) {
                return Err(ConfigError::IdentifierCharacter {
                    prefix: self.prefix.clone(),
                    ch,
                });
            }
            if is_markup_delimiter(ch) {
                return Err(ConfigError::DelimiterCharacter {
                    prefix: self.prefix.clone(),
                    ch,
                });
            }
        }

        Ok(())
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        assert_eq!(AliasConfig::default().prefix, "*");
        assert!(AliasConfig::default().validate().is_ok());
    }

    #[test]
    fn test_symbol_prefixes_are_valid() {
        for prefix in ["&", "@", "~", "$$", "!"] {
            assert!(AliasConfig::new(prefix).validate().is_ok(), "{}", prefix);
        }
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert_eq!(
            AliasConfig::new("").validate(),
            Err(ConfigError::EmptyPrefix)
        );
    }

    #[test]
    fn test_identifier_prefix_rejected() {
        for prefix in ["a", "1", "-", "_", ":", "*x"] {
            let result = AliasConfig::new(prefix).validate();
            assert!(
                matches!(result, Err(ConfigError::IdentifierCharacter { .. })),
                "{:?} for {}",
                result,
                prefix
            );
        }
    }

    #[test]
    fn test_delimiter_prefix_rejected() {
        for prefix in [" ", "\"", "'", "=", "<", ">", "/"] {
            let result = AliasConfig::new(prefix).validate();
            assert!(
                matches!(result, Err(ConfigError::DelimiterCharacter { .. })),
                "{:?} for {:?}",
                result,
                prefix
            );
        }
    }

    #[test]
    fn test_identifier_chars() {
        assert!(is_identifier_char('a'));
        assert!(is_identifier_char('Z'));
        assert!(is_identifier_char('7'));
        assert!(is_identifier_char(':'));
        assert!(!is_identifier_char('*'));
        assert!(!is_identifier_char(' '));
        assert!(!is_identifier_char('é'));
    }
}
