//! Test utilities shared across test modules
//!
//! This module provides common helper functions for testing, avoiding duplication
//! across multiple test suites.

use std::fs;
use tempfile::TempDir;

use crate::paths::SwitchEnv;
use crate::platform::{Identity, Platform};
use crate::settings::Settings;

/// Create a SwitchEnv rooted in a temporary directory
///
/// The working directory is the temp dir itself and the configs root is
/// `custom_configs` beneath it (not created). The identity is root so the
/// privilege guard passes unless a test overrides it.
pub fn setup_test_env(temp_dir: &TempDir) -> SwitchEnv {
    SwitchEnv::new(
        temp_dir.path(),
        &Settings::default(),
        Platform::Linux,
        Identity::root(),
    )
}

/// Create a configuration set containing the given files
pub fn make_set(env: &SwitchEnv, name: &str, files: &[&str]) {
    let dir = env.paths.set_dir(name);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), format!("{{\"set\": \"{}\"}}", name)).unwrap();
    }
}

/// Create a set with every required file
pub fn make_complete_set(env: &SwitchEnv, name: &str) {
    let files: Vec<&str> = env.paths.required_files.iter().map(String::as_str).collect();
    make_set(env, name, &files);
}
