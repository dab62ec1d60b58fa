//! Integration tests for Settings loading from an explicit config file.
//!
//! These tests pass `--config`-style paths so the user's global config
//! never takes part.

use std::fs;

use tempfile::TempDir;

use hiertable::application::ApplicationError;
use hiertable::config::Settings;
use hiertable::domain::GroupPolicy;

#[test]
fn given_config_file_when_loading_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiertable.toml");
    fs::write(
        &path,
        r#"
title_keys = ["Title", "Name"]
placeholder_title = "?"
strict_groups = true
indent = 4
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.title_keys, vec!["Title".to_string(), "Name".to_string()]);
    assert_eq!(settings.placeholder_title, "?");
    assert_eq!(settings.indent, 4);
    assert_eq!(settings.group_policy(), GroupPolicy::Strict);
    // unspecified fields keep their defaults
    assert_eq!(settings.empty_value, "—");
}

#[test]
fn given_empty_config_file_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiertable.toml");
    fs::write(&path, "").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.display_options().title_keys, vec!["Name", "ID"]);
    assert_eq!(settings.placeholder_title, "(no name)");
}

#[test]
fn given_missing_config_file_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("nope.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiertable.toml");
    fs::write(&path, "indent = \"wide\"").unwrap();

    let result = Settings::load(Some(&path));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("hiertable.toml")),
        other => panic!("expected config error, got {:?}", other),
    }
}
