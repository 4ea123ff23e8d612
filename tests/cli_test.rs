//! Command handlers driven through parsed arguments

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use careertree::cli::{execute_command, Cli, CliError};
use careertree::config::{local_config_path, Settings};
use careertree::exitcode;
use careertree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn run(project: &TempDir, args: &[&str]) -> Result<(), CliError> {
    let dir = project.path().to_string_lossy().to_string();
    let mut argv = vec!["careertree", "-C", dir.as_str()];
    argv.extend_from_slice(args);
    execute_command(&Cli::parse_from(argv))
}

#[test]
fn given_leaf_with_details_when_showing_details_then_ok() {
    let project = TempDir::new().unwrap();
    assert!(run(&project, &["details", "science.medical.mbbs"]).is_ok());
}

#[test]
fn given_leaf_without_details_when_showing_details_then_invalid_args() {
    let project = TempDir::new().unwrap();

    let result = run(&project, &["details", "commerce.management.entrepreneurship"]);

    match result {
        Err(e @ CliError::InvalidArgs(_)) => assert_eq!(e.exit_code(), exitcode::USAGE),
        other => panic!("expected invalid args, got {:?}", other),
    }
}

#[test]
fn given_unknown_node_when_showing_details_then_noinput() {
    let project = TempDir::new().unwrap();

    let err = run(&project, &["details", "science.astrology"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_click_sequence_when_running_then_ok() {
    let project = TempDir::new().unwrap();
    let result = run(
        &project,
        &["click", "science", "science.medical", "science.medical.mbbs"],
    );
    assert!(result.is_ok());
}

#[test]
fn given_unknown_click_target_when_running_then_noinput() {
    let project = TempDir::new().unwrap();

    let err = run(&project, &["click", "science", "nowhere"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_empty_project_when_config_init_then_template_written_once() {
    let project = TempDir::new().unwrap();
    let path = local_config_path(project.path());

    run(&project, &["config", "init"]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), Settings::template());

    let err = run(&project, &["config", "init"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_invalid_local_config_when_config_init_then_refuses_to_overwrite() {
    let project = TempDir::new().unwrap();
    let path = local_config_path(project.path());
    fs::write(&path, "max_depth = 0\n").unwrap();

    let err = run(&project, &["config", "init"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
    assert_eq!(fs::read_to_string(&path).unwrap(), "max_depth = 0\n");
}
