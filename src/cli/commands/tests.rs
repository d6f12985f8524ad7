//! CLI command tests

use super::*;
use crate::config::{default_template, parse_args};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a valid training config into `dir`
fn create_test_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("train.yaml");
    let yaml = default_template("test_run", &[dir.path().join("images")]).unwrap();
    std::fs::write(&path, yaml).unwrap();
    path
}

fn create_sample_config(dir: &TempDir, ckpt: &std::path::Path) -> PathBuf {
    let path = dir.path().join("sample.yaml");
    std::fs::write(
        &path,
        format!("ckpt_path: {}\nn_samples: 4\n", ckpt.display()),
    )
    .unwrap();
    path
}

fn run(args: &[&str]) -> Result<(), String> {
    let mut argv = vec!["pggan", "--quiet"];
    argv.extend_from_slice(args);
    run_command(parse_args(argv).unwrap())
}

#[test]
fn test_validate_valid_config() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    assert!(run(&["validate", config.to_str().unwrap(), "--detailed"]).is_ok());
}

#[test]
fn test_validate_missing_config() {
    let err = run(&["validate", "/nonexistent/train.yaml"]).unwrap_err();
    assert!(err.starts_with("Config error"));
}

#[test]
fn test_validate_invalid_override() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let err = run(&["validate", config.to_str().unwrap(), "--batch-per-gpu", "0"]).unwrap_err();
    assert!(err.starts_with("Override error"));
}

#[test]
fn test_info_all_formats() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    for format in ["text", "json", "yaml"] {
        assert!(run(&["info", config.to_str().unwrap(), "--format", format]).is_ok());
    }
}

#[test]
fn test_init_writes_loadable_template() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("new.yaml");
    run(&[
        "init",
        "--model-id",
        "fresh",
        "--dataset-root",
        "/data/celeba",
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let spec = crate::config::load_config(&output).unwrap();
    assert_eq!(spec.model_id, "fresh");
    assert_eq!(spec.dataset_root_list, vec![PathBuf::from("/data/celeba")]);
}

#[test]
fn test_init_round_trips_awkward_names() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("awkward.yaml");
    run(&[
        "init",
        "--model-id",
        "run: v2 #tuned",
        "--dataset-root",
        "/data/a: b",
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();

    assert!(run(&["validate", output.to_str().unwrap()]).is_ok());
    let spec = crate::config::load_config(&output).unwrap();
    assert_eq!(spec.model_id, "run: v2 #tuned");
    assert_eq!(spec.dataset_root_list, vec![PathBuf::from("/data/a: b")]);
}

#[test]
fn test_init_refuses_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("existing.yaml");
    std::fs::write(&output, "keep me").unwrap();

    let err = run(&["init", "--output", output.to_str().unwrap()]).unwrap_err();
    assert!(err.contains("--force"));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");

    run(&["init", "--output", output.to_str().unwrap(), "--force"]).unwrap();
    assert_ne!(std::fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn test_schedule_table_and_position() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let config = config.to_str().unwrap();
    assert!(run(&["schedule", config]).is_ok());
    assert!(run(&["schedule", config, "--format", "json"]).is_ok());
    assert!(run(&["schedule", config, "--at", "50000"]).is_ok());
    assert!(run(&["schedule", config, "--at", "50000", "--format", "yaml"]).is_ok());
}

#[test]
fn test_schedule_position_past_end() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let err = run(&[
        "schedule",
        config.to_str().unwrap(),
        "--max-step",
        "1000",
        "--at",
        "1000",
    ])
    .unwrap_err();
    assert!(err.contains("past the end"));
}

#[test]
fn test_arch_default_and_explicit_stage() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let config = config.to_str().unwrap();
    assert!(run(&["arch", config]).is_ok());
    assert!(run(&["arch", config, "--stage", "0", "--format", "json"]).is_ok());
}

#[test]
fn test_arch_stage_out_of_range() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let err = run(&["arch", config.to_str().unwrap(), "--stage", "7"]).unwrap_err();
    assert!(err.contains("stage 7"));
}

#[test]
fn test_resume_fresh_start() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    assert!(run(&["resume", config.to_str().unwrap(), "--check"]).is_ok());
}

#[test]
fn test_resume_check_missing_checkpoint() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let err = run(&[
        "resume",
        config.to_str().unwrap(),
        "--ckpt-id",
        "old_run",
        "--ckpt-step",
        "48000",
        "--check",
    ])
    .unwrap_err();
    assert!(err.starts_with("Checkpoint error"));
}

#[test]
fn test_resume_check_present_checkpoint() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let save_root = dir.path().join("runs");
    let ckpt_dir = save_root.join("old_run").join("ckpt");
    std::fs::create_dir_all(&ckpt_dir).unwrap();
    std::fs::write(ckpt_dir.join("G_48000.pt"), b"g").unwrap();
    std::fs::write(ckpt_dir.join("D_48000.pt"), b"d").unwrap();

    let mut spec = crate::config::load_config(&config).unwrap();
    spec.save_root = save_root;
    crate::config::save_config(&spec, &config).unwrap();

    assert!(run(&[
        "resume",
        config.to_str().unwrap(),
        "--ckpt-id",
        "old_run",
        "--ckpt-step",
        "48000",
        "--check",
    ])
    .is_ok());
}

#[test]
fn test_sample_config() {
    let dir = TempDir::new().unwrap();
    let ckpt = dir.path().join("G_latest.pt");
    let config = create_sample_config(&dir, &ckpt);
    let config = config.to_str().unwrap();

    assert!(run(&["sample", config]).is_ok());
    let err = run(&["sample", config, "--check"]).unwrap_err();
    assert!(err.contains("not found"));

    std::fs::write(&ckpt, b"g").unwrap();
    assert!(run(&["sample", config, "--check"]).is_ok());
}
