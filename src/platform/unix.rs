//! Unix (macOS, Linux, BSD) platform implementations.

use anyhow::Result;
use std::path::PathBuf;

use super::{DnsPlatform, FlushOutcome};

pub const HOSTS_PATH: &str = "/etc/hosts";

/// Unix systems: `/etc/hosts`, manual cache flush.
#[derive(Debug, Clone, Copy)]
pub struct UnixPlatform {
    name: &'static str,
    flush_hint: &'static str,
}

impl UnixPlatform {
    pub fn macos() -> Self {
        Self {
            name: "macos",
            flush_hint: "sudo killall -HUP mDNSResponder",
        }
    }

    pub fn linux() -> Self {
        Self {
            name: "linux",
            flush_hint: "sudo resolvectl flush-caches (systemd-resolved) or restart nscd/dnsmasq",
        }
    }

    pub fn generic() -> Self {
        Self {
            name: "unix",
            flush_hint: "restart the local DNS cache daemon, if any",
        }
    }
}

impl DnsPlatform for UnixPlatform {
    fn name(&self) -> &'static str {
        self.name
    }

    fn hosts_path(&self) -> PathBuf {
        PathBuf::from(HOSTS_PATH)
    }

    // Flushing needs root and differs per resolver; leave it to the operator.
    fn flush_dns(&self) -> Result<FlushOutcome> {
        Ok(FlushOutcome::Manual(self.flush_hint))
    }
}

/// Whether the process runs with root privileges.
#[cfg(unix)]
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    true
}
