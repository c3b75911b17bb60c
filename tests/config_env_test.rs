//! Environment variable overrides live in their own test binary so the
//! process-wide variables cannot leak into other config tests.

use std::env;
use std::fs;

use tempfile::TempDir;

use treeflat::config::Settings;
use treeflat::domain::ReprojectStrategy;

#[test]
fn given_env_vars_when_load_then_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treeflat.toml");
    fs::write(&path, "reproject = \"full\"\n[render]\nindent_width = 8\n").unwrap();

    env::set_var("TREEFLAT_REPROJECT", "splice");
    env::set_var("TREEFLAT_RENDER__INDENT_WIDTH", "3");
    env::set_var("TREEFLAT_DEFAULT_EXPANDED", "true");

    let settings = Settings::load(Some(&path)).expect("load settings");

    env::remove_var("TREEFLAT_REPROJECT");
    env::remove_var("TREEFLAT_RENDER__INDENT_WIDTH");
    env::remove_var("TREEFLAT_DEFAULT_EXPANDED");

    assert_eq!(settings.reproject, ReprojectStrategy::Splice);
    assert_eq!(settings.render.indent_width, 3);
    assert!(settings.default_expanded);
}
