//! Platform abstraction for hosts file location and DNS cache flushing.
//!
//! The strategy is picked once at startup from [`PLATFORMS`], keyed by
//! `std::env::consts::OS`.

pub mod unix;
pub mod windows;

use anyhow::Result;
use std::path::PathBuf;

/// What a flush attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Cache flushed by running a system command.
    Flushed,
    /// No safe automatic flush; the hint tells the operator what to run.
    Manual(&'static str),
    /// Nothing to flush (file-backed override).
    Skipped,
}

/// Per-OS behavior the core delegates to.
pub trait DnsPlatform: Send + Sync {
    fn name(&self) -> &'static str;
    /// Location of the system hosts file.
    fn hosts_path(&self) -> PathBuf;
    /// Best-effort DNS cache invalidation.
    fn flush_dns(&self) -> Result<FlushOutcome>;
}

type Factory = fn() -> Box<dyn DnsPlatform>;

/// OS identifier -> platform strategy.
pub const PLATFORMS: &[(&str, Factory)] = &[
    ("windows", windows_platform),
    ("macos", macos_platform),
    ("linux", linux_platform),
];

fn windows_platform() -> Box<dyn DnsPlatform> {
    Box::new(windows::WindowsPlatform)
}

fn macos_platform() -> Box<dyn DnsPlatform> {
    Box::new(unix::UnixPlatform::macos())
}

fn linux_platform() -> Box<dyn DnsPlatform> {
    Box::new(unix::UnixPlatform::linux())
}

/// Strategy for an OS identifier; unknown systems get the generic Unix one.
pub fn platform_for(os: &str) -> Box<dyn DnsPlatform> {
    PLATFORMS
        .iter()
        .find(|(id, _)| *id == os)
        .map(|(_, make)| make())
        .unwrap_or_else(|| Box::new(unix::UnixPlatform::generic()))
}

/// Platform for the running system.
/// If SBG_HOSTS_FILE is set (e.g. in tests), uses FilePlatform with that path.
pub fn default_platform() -> Box<dyn DnsPlatform> {
    if let Ok(path) = std::env::var("SBG_HOSTS_FILE") {
        return Box::new(FilePlatform::new(path));
    }
    platform_for(std::env::consts::OS)
}

/// Platform that targets an arbitrary file and never flushes.
#[derive(Debug, Clone)]
pub struct FilePlatform {
    path: PathBuf,
}

impl FilePlatform {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DnsPlatform for FilePlatform {
    fn name(&self) -> &'static str {
        "file"
    }

    fn hosts_path(&self) -> PathBuf {
        self.path.clone()
    }

    fn flush_dns(&self) -> Result<FlushOutcome> {
        Ok(FlushOutcome::Skipped)
    }
}
