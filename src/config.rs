//! Data directory layout and the persisted domain list.
//!
//! Supports SBG_HOME env var override for testing.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::DomainSet;
use crate::error::{Error, Result};
use crate::hosts;

pub const CONFIG_FILE: &str = "sbg_config.json";
pub const BACKUP_FILE: &str = "hosts.backup";
const LOCK_FILE: &str = ".sbg_config.lock";

/// Paths for the sbguard data store.
#[derive(Debug, Clone)]
pub struct GuardPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub backup_file: PathBuf,
}

impl GuardPaths {
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join(CONFIG_FILE),
            backup_file: base.join(BACKUP_FILE),
            config_dir: base,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Default paths (respects SBG_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("SBG_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) =
            directories::ProjectDirs::from("org", "safebrowsingguard", "sbguard")
        {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".sbguard")
        };
        Self::from_base(base)
    }
}

/// Load the domain list. A missing file yields the default domains; a file
/// that exists but does not parse is an error.
pub fn load_domains(paths: &GuardPaths) -> Result<DomainSet> {
    let path = &paths.config_file;
    if !path.is_file() {
        return Ok(DomainSet::with_defaults());
    }
    let mut file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    fs2::FileExt::lock_shared(&file).map_err(|e| Error::io(path, e))?;
    let mut s = String::new();
    file.read_to_string(&mut s).map_err(|e| Error::io(path, e))?;
    let list: Vec<String> = serde_json::from_str(&s).map_err(|source| Error::CorruptConfig {
        path: path.clone(),
        source,
    })?;
    Ok(list.into_iter().collect())
}

/// Save the domain list as a sorted JSON array.
///
/// Writers serialize on an exclusive lock over a sibling lock file; the list
/// itself is replaced atomically so a crash never leaves it half-written.
pub fn save_domains(paths: &GuardPaths, domains: &DomainSet) -> Result<()> {
    fs::create_dir_all(&paths.config_dir).map_err(|e| Error::io(&paths.config_dir, e))?;
    let path = &paths.config_file;
    let lock_path = paths.config_dir.join(LOCK_FILE);
    let lock = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    fs2::FileExt::lock_exclusive(&lock).map_err(|e| Error::io(&lock_path, e))?;
    let mut s =
        serde_json::to_string_pretty(&domains.to_vec()).map_err(|e| Error::io(path, e.into()))?;
    s.push('\n');
    hosts::write_atomic(path, s.as_bytes())
}
