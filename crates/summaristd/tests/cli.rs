//! Integration tests for the summarist CLI commands.
//!
//! Every test points `--config` and `--path` into a temporary directory and stays offline.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::{tempdir, TempDir};

// Helper function to create a clean command instance
fn summarist() -> Command {
  let mut cmd = Command::cargo_bin("summarist").unwrap();
  cmd.env_remove("SUMMARIST_API_KEY").env_remove("OPENAI_API_KEY").env_remove("RUST_LOG");
  cmd
}

// Helper to get temporary config and database paths
fn temp_paths() -> (TempDir, PathBuf, PathBuf) {
  let dir = tempdir().unwrap();
  let config_path = dir.path().join("config.toml");
  let db_path = dir.path().join("test.db");
  (dir, config_path, db_path)
}

#[test]
fn test_help() {
  summarist()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("refresh"))
    .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_categories() {
  summarist()
    .arg("categories")
    .assert()
    .success()
    .stdout(predicate::str::contains("cs.CV"))
    .stdout(predicate::str::contains("Robotics"));
}

#[test]
#[serial]
fn test_init_and_clean() {
  let (dir, config_path, db_path) = temp_paths();

  summarist()
    .arg("init")
    .arg("--config")
    .arg(&config_path)
    .arg("--path")
    .arg(&db_path)
    .arg("--user")
    .arg("tester")
    .arg("--accept-defaults")
    .assert()
    .success()
    .stdout(predicate::str::contains("Initialized summarist"));

  assert!(db_path.exists());
  let config = std::fs::read_to_string(&config_path).unwrap();
  assert!(config.contains("tester"));

  summarist()
    .arg("clean")
    .arg("--path")
    .arg(&db_path)
    .arg("--accept-defaults")
    .assert()
    .success()
    .stdout(predicate::str::contains("Database files cleaned"));

  assert!(!db_path.exists());
  dir.close().unwrap();
}

#[test]
#[serial]
fn test_clean_missing_database() {
  let (dir, _, db_path) = temp_paths();
  summarist()
    .arg("clean")
    .arg("--path")
    .arg(&db_path)
    .arg("--accept-defaults")
    .assert()
    .success()
    .stdout(predicate::str::contains("No database found"));
  dir.close().unwrap();
}

#[test]
#[serial]
fn test_empty_store_listings() {
  let (dir, config_path, db_path) = temp_paths();

  for command in ["list", "bookmarks", "history"] {
    summarist()
      .arg(command)
      .arg("--config")
      .arg(&config_path)
      .arg("--path")
      .arg(&db_path)
      .assert()
      .success()
      .stdout(predicate::str::contains("No").or(predicate::str::contains("Nothing")));
  }
  dir.close().unwrap();
}

#[test]
#[serial]
fn test_unknown_paper_fails() {
  let (dir, config_path, db_path) = temp_paths();

  for command in ["bookmark", "read", "summary"] {
    summarist()
      .arg(command)
      .arg("2401.00001")
      .arg("--config")
      .arg(&config_path)
      .arg("--path")
      .arg(&db_path)
      .assert()
      .failure()
      .stderr(predicate::str::contains("Paper not found"));
  }
  dir.close().unwrap();
}
