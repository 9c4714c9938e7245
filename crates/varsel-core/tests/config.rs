use std::io::Write;

use varsel_core::attributes::ImmutableAttributes;
use varsel_core::config::ResolveConfig;

const SAMPLE: &str = r#"
[attributes]
"org.gradle.usage" = "java-runtime"
"org.gradle.category" = "library"

[schema."org.gradle.usage"]
compatible = [["java-runtime", "java-api"]]
prefer = ["java-runtime"]
"#;

#[test]
fn parse_attributes_and_schema() {
    let config = ResolveConfig::parse_toml(SAMPLE).unwrap();
    assert_eq!(config.attributes.get("org.gradle.usage"), Some("java-runtime"));
    assert!(config
        .schema
        .is_compatible("org.gradle.usage", "java-runtime", "java-api"));
    assert!(!config
        .schema
        .is_compatible("org.gradle.usage", "java-api", "java-runtime"));
    assert_eq!(
        config.schema.preference_rank("org.gradle.usage", "java-runtime"),
        Some(0)
    );
}

#[test]
fn empty_config_is_default() {
    let config = ResolveConfig::parse_toml("").unwrap();
    assert_eq!(config, ResolveConfig::default());
    assert!(config.attributes.is_empty());
}

#[test]
fn invalid_config_is_an_error() {
    let err = ResolveConfig::parse_toml("[attributes\n").unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"), "got: {err}");
}

#[test]
fn consumer_attributes_override_defaults() {
    let config = ResolveConfig::parse_toml(SAMPLE).unwrap();
    let attrs = config.consumer_attributes(&ImmutableAttributes::of([(
        "org.gradle.usage",
        "java-api",
    )]));
    assert_eq!(attrs.get("org.gradle.usage"), Some("java-api"));
    assert_eq!(attrs.get("org.gradle.category"), Some("library"));
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("varsel.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let config = ResolveConfig::from_path(&path).unwrap();
    assert_eq!(config.attributes.len(), 2);
}

#[test]
fn load_or_default_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(ResolveConfig::load_or_default(&missing), ResolveConfig::default());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "attributes = 3").unwrap();
    assert_eq!(ResolveConfig::load_or_default(&broken), ResolveConfig::default());
}
