//! Loading configuration from files on disk.

use std::io::Write;

use pactum_config::{ConfigError, ConfigLoader, InclusionMode};
use tempfile::Builder;

#[test]
fn test_toml_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
        mode = "greedy"
        title = "Inventory"
        version = "2.0"

        [[tags]]
        name = "stock"
        description = "Stock levels"
        "#
    )
    .unwrap();

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.mode, InclusionMode::Greedy);
    assert_eq!(config.title, "Inventory");
    assert_eq!(config.version, "2.0");
    assert_eq!(config.tag_description("stock"), Some("Stock levels"));
    assert_eq!(config.path, "apidoc");
}

#[test]
fn test_json_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"path": "docs", "filename": "spec.json"}}"#).unwrap();

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.spec_url(), "/docs/spec.json");
}

#[test]
fn test_unsupported_extension() {
    let file = Builder::new().suffix(".yaml").tempfile().unwrap();
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_malformed_toml() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "mode = ").unwrap();
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::TomlError(_))));
}

#[test]
fn test_optional_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.mode, InclusionMode::Normal);
}
