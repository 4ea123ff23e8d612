//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global → Local: REPLACE per value, arrays included
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests pass an explicit global config path, so the user's real
//! config never leaks in.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use careertree::application::ApplicationError;
use careertree::config::{local_config_path, Settings};
use careertree::domain::{LayoutConfig, DEFAULT_MAX_DEPTH};

fn write_global(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("careertree.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_missing_files_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("absent.toml");

    let settings = Settings::load_from(Some(&global), Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn given_global_and_local_when_load_then_local_wins_per_value() {
    let global_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let global = write_global(
        &global_dir,
        r#"
max_depth = 5

[layout]
stream_spacing = 400.0
level_spacing = [200.0, 150.0, 100.0]
"#,
    );
    fs::write(
        local_config_path(project.path()),
        r#"
[layout]
level_spacing = [90.0]
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&global), Some(project.path())).expect("load settings");

    assert_eq!(settings.max_depth, 5);
    assert_eq!(settings.layout.stream_spacing, 400.0);
    // Arrays replace, they do not union
    assert_eq!(settings.layout.level_spacing, vec![90.0]);
    assert_eq!(settings.layout.level_height, LayoutConfig::default().level_height);
}

#[test]
fn given_relative_taxonomy_in_local_config_when_load_then_resolved_against_project() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "taxonomy = \"data/careers.json\"\n",
    )
    .unwrap();

    let settings = Settings::load_from(None, Some(project.path())).expect("load settings");

    assert_eq!(
        settings.taxonomy,
        Some(project.path().join("data/careers.json"))
    );
}

#[test]
fn given_absolute_taxonomy_in_global_config_when_load_then_kept() {
    let global_dir = TempDir::new().unwrap();
    let global = write_global(&global_dir, "taxonomy = \"/srv/careers.toml\"\n");

    let settings = Settings::load_from(Some(&global), None).expect("load settings");

    assert_eq!(settings.taxonomy, Some(PathBuf::from("/srv/careers.toml")));
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let global_dir = TempDir::new().unwrap();
    let global = write_global(&global_dir, "max_depth = \"deep\"\n");

    let result = Settings::load_from(Some(&global), None);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_zero_max_depth_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "max_depth = 0\n").unwrap();

    let result = Settings::load_from(None, Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_non_positive_spacing_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "[layout]\nlevel_height = -10.0\n",
    )
    .unwrap();

    let result = Settings::load_from(None, Some(project.path()));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("level_height")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_template_when_written_as_local_config_then_loads_as_defaults() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), Settings::template()).unwrap();

    let settings = Settings::load_from(None, Some(project.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_loaded_settings_when_shown_then_toml_reloads_identically() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "max_depth = 4\n[layout]\norigin_x = 25.0\n",
    )
    .unwrap();
    let settings = Settings::load_from(None, Some(project.path())).unwrap();

    let shown = settings.to_toml().unwrap();
    let other = TempDir::new().unwrap();
    fs::write(local_config_path(other.path()), shown).unwrap();
    let reloaded = Settings::load_from(None, Some(other.path())).unwrap();

    assert_eq!(reloaded, settings);
}
