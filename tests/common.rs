//! Shared test helpers.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temp directory for use as SBG_HOME.
pub fn temp_guard_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("sbguard_test_")
        .tempdir()
        .expect("temp dir")
}

/// Write a hosts file with `content` into `dir` and return its path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    fs::write(&path, content).unwrap();
    path
}

pub fn backup_path(dir: &Path) -> PathBuf {
    dir.join("state").join("hosts.backup")
}

/// Number of lines equal to `needle`.
pub fn count_lines(content: &str, needle: &str) -> usize {
    content.lines().filter(|l| l.trim() == needle).count()
}

/// Run a closure with SBG_HOME set to the given path.
pub fn with_test_env<F, R>(home: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let prev = std::env::var_os("SBG_HOME");
    std::env::set_var("SBG_HOME", home);
    let r = f();
    match prev {
        Some(v) => std::env::set_var("SBG_HOME", v),
        None => std::env::remove_var("SBG_HOME"),
    }
    r
}
