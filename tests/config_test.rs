//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test explicit config files merged onto defaults.

use std::fs;

use tempfile::TempDir;

use treeflat::config::Settings;
use treeflat::domain::ReprojectStrategy;

#[test]
fn given_explicit_config_when_load_then_overrides_only_given_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeflat.toml");
    fs::write(
        &path,
        r#"
default_expanded = true
reproject = "splice"

[render]
collapsed_glyph = "+"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert!(settings.default_expanded);
    assert_eq!(settings.reproject, ReprojectStrategy::Splice);
    assert_eq!(settings.render.collapsed_glyph, "+");
    assert_eq!(settings.render.expanded_glyph, "▾", "unspecified glyph keeps default");
    assert_eq!(settings.render.indent_width, 2);
}

#[test]
fn given_default_forest_with_env_var_when_load_then_expands_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeflat.toml");
    fs::write(&path, "default_forest = \"$HOME/outline.toml\"\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    let forest = settings.default_forest.expect("default_forest set");
    assert!(forest.to_string_lossy().starts_with(&home));
    assert!(forest.to_string_lossy().ends_with("outline.toml"));
}

#[test]
fn given_unknown_strategy_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeflat.toml");
    fs::write(&path, "reproject = \"sometimes\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("config error"));
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(result.is_err());
}

#[test]
fn given_template_when_parsed_then_is_valid_toml_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeflat.toml");
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(&path)).expect("template loads");

    assert_eq!(settings, Settings::default());
}
