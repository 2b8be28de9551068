//! Configuration loading and validation.

use classalias::{transform_alias, AliasConfig, AliasError, ConfigError, Shortcuts, DEFAULT_PREFIX};
use futures::executor::block_on;

#[test]
fn test_deserialize_prefix() {
    let config: AliasConfig = serde_json::from_str(r#"{ "prefix": "&" }"#).unwrap();
    assert_eq!(config, AliasConfig::new("&"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_prefix_uses_default() {
    let config: AliasConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.prefix, DEFAULT_PREFIX);
}

#[test]
fn test_serialize_round_trip_shape() {
    let json = serde_json::to_value(AliasConfig::new("@@")).unwrap();
    assert_eq!(json, serde_json::json!({ "prefix": "@@" }));
}

#[test]
fn test_deserialized_config_is_not_trusted() {
    let config: AliasConfig = serde_json::from_str(r#"{ "prefix": "btn" }"#).unwrap();
    let result = block_on(transform_alias("<div btn>", &Shortcuts::new(), &config));
    assert!(matches!(
        result,
        Err(AliasError::Config(ConfigError::IdentifierCharacter { ch: 'b', .. }))
    ));
}

#[test]
fn test_delimiter_prefixes_rejected() {
    for prefix in ["=", "<", ">", "/", "\"", "'", " ", "*\t"] {
        assert!(
            matches!(
                AliasConfig::new(prefix).validate(),
                Err(ConfigError::DelimiterCharacter { .. })
            ),
            "prefix {:?} should be rejected",
            prefix
        );
    }
}

#[test]
fn test_empty_prefix_rejected() {
    let config: AliasConfig = serde_json::from_str(r#"{ "prefix": "" }"#).unwrap();
    assert_eq!(config.validate(), Err(ConfigError::EmptyPrefix));
}

#[test]
fn test_multichar_prefix_transforms() {
    let shortcuts = Shortcuts::new().add("card", "p-4 shadow");
    let config: AliasConfig = serde_json::from_str(r#"{ "prefix": "@@" }"#).unwrap();
    let out = block_on(transform_alias(
        r#"<a @@card class="x @@card">"#,
        &shortcuts,
        &config,
    ))
    .unwrap();
    assert_eq!(out, r#"<a p-4 shadow class="x p-4 shadow">"#);
}
