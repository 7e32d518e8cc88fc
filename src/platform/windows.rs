//! Windows platform implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use super::{DnsPlatform, FlushOutcome};

pub struct WindowsPlatform;

/// `%SystemRoot%\System32\drivers\etc\hosts`, defaulting to `C:\Windows`.
pub fn hosts_path_from(system_root: Option<String>) -> PathBuf {
    let root = system_root.unwrap_or_else(|| r"C:\Windows".to_string());
    PathBuf::from(root)
        .join("System32")
        .join("drivers")
        .join("etc")
        .join("hosts")
}

impl DnsPlatform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn hosts_path(&self) -> PathBuf {
        hosts_path_from(std::env::var("SystemRoot").ok())
    }

    fn flush_dns(&self) -> Result<FlushOutcome> {
        let output = Command::new("ipconfig")
            .arg("/flushdns")
            .output()
            .context("run ipconfig /flushdns")?;
        if !output.status.success() {
            anyhow::bail!(
                "ipconfig /flushdns failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(FlushOutcome::Flushed)
    }
}
