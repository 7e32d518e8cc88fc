//! Hosts file patching, backup and restore.
//!
//! The hosts file is shared with the OS and with any other editor, and no
//! lock exists for it. An external write that lands between the read and the
//! final rename in [`apply`] is lost: last writer wins.

use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::block::{self, BEGIN_MARKER, END_MARKER};
use crate::domain::DomainSet;
use crate::error::{Error, Result};

/// Unmanaged lines left after removing the managed block.
///
/// Lines are raw bytes: the file may hold comments in any encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped<'a> {
    /// Original lines, each with its line terminator if it had one.
    pub lines: Vec<&'a [u8]>,
    /// A begin sentinel was never closed; everything after it was dropped.
    pub unterminated: bool,
}

/// Result of [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub backup_created: bool,
    pub recovered_unterminated_block: bool,
}

/// Result of [`restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    NoBackup,
}

/// Drop every line between (and including) the begin and end sentinels.
pub fn strip_managed_block(content: &[u8]) -> Stripped<'_> {
    let mut lines = Vec::new();
    let mut skipping = false;
    for line in content.split_inclusive(|&b| b == b'\n') {
        let trimmed = line.trim_ascii();
        if trimmed == BEGIN_MARKER.as_bytes() {
            skipping = true;
            continue;
        }
        if trimmed == END_MARKER.as_bytes() {
            skipping = false;
            continue;
        }
        if !skipping {
            lines.push(line);
        }
    }
    Stripped {
        lines,
        unterminated: skipping,
    }
}

/// New file content: unmanaged lines followed by a freshly rendered block.
pub fn patch_content<'a>(content: &'a [u8], domains: &DomainSet) -> (Vec<u8>, Stripped<'a>) {
    let stripped = strip_managed_block(content);
    let rendered = block::render(domains).to_string();

    let mut out = Vec::with_capacity(content.len() + rendered.len() + 1);
    for line in &stripped.lines {
        out.extend_from_slice(line);
    }
    if !out.is_empty() && !out.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(rendered.as_bytes());
    (out, stripped)
}

/// Copy the hosts file to `backup_path` unless a backup already exists.
///
/// Returns whether a backup was created. An existing backup is never touched.
pub fn ensure_backup(hosts_path: &Path, backup_path: &Path) -> Result<bool> {
    if backup_path.exists() {
        debug!(backup = %backup_path.display(), "backup already present");
        return Ok(false);
    }
    let mut src = File::open(hosts_path).map_err(|e| Error::io(hosts_path, e))?;
    let perms = src
        .metadata()
        .map_err(|e| Error::io(hosts_path, e))?
        .permissions();

    if let Some(parent) = backup_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let mut dst = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(backup_path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Error::io(backup_path, e)),
    };

    let copied = io::copy(&mut src, &mut dst)
        .and_then(|_| dst.sync_all())
        .and_then(|_| fs::set_permissions(backup_path, perms));
    if let Err(e) = copied {
        // A half-written backup would be kept forever.
        drop(dst);
        let _ = fs::remove_file(backup_path);
        return Err(Error::io(backup_path, e));
    }
    debug!(backup = %backup_path.display(), "backup created");
    Ok(true)
}

/// Replace the managed block in `hosts_path` with one rendered from `domains`.
pub fn apply(hosts_path: &Path, backup_path: &Path, domains: &DomainSet) -> Result<ApplyOutcome> {
    let backup_created = ensure_backup(hosts_path, backup_path)?;

    let content = fs::read(hosts_path).map_err(|e| Error::io(hosts_path, e))?;
    let (patched, stripped) = patch_content(&content, domains);
    if stripped.unterminated {
        warn!(
            hosts = %hosts_path.display(),
            "unterminated managed block; dropped everything after the begin marker"
        );
    }
    write_atomic(hosts_path, &patched)?;
    debug!(hosts = %hosts_path.display(), domains = domains.len(), "managed block written");

    Ok(ApplyOutcome {
        backup_created,
        recovered_unterminated_block: stripped.unterminated,
    })
}

/// Overwrite `hosts_path` with the backup. Edits made since the backup are discarded.
pub fn restore(hosts_path: &Path, backup_path: &Path) -> Result<RestoreOutcome> {
    if !backup_path.exists() {
        return Ok(RestoreOutcome::NoBackup);
    }
    let data = fs::read(backup_path).map_err(|e| Error::io(backup_path, e))?;
    let backup_perms = fs::metadata(backup_path)
        .map_err(|e| Error::io(backup_path, e))?
        .permissions();
    replace_contents(hosts_path, &data, Some(backup_perms))?;
    debug!(hosts = %hosts_path.display(), "restored from backup");
    Ok(RestoreOutcome::Restored)
}

/// Write via a sibling temp file and rename, keeping the target's permissions.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    replace_contents(path, data, None)
}

fn replace_contents(path: &Path, data: &[u8], fallback_perms: Option<Permissions>) -> Result<()> {
    // Write through symlinks (e.g. NixOS /etc/hosts) instead of replacing the link.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = target.as_path();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let perms = fs::metadata(path)
        .map(|m| m.permissions())
        .ok()
        .or(fallback_perms);

    let mut tmp = match tempfile::Builder::new()
        .prefix(".sbguard-")
        .tempfile_in(dir)
    {
        Ok(t) => t,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot create temp file; writing in place");
            return write_in_place(path, data);
        }
    };
    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms).map_err(|e| Error::io(tmp.path(), e))?;
    }

    if let Err(e) = tmp.persist(path) {
        // Bind-mounted hosts files (containers) refuse rename.
        warn!(path = %path.display(), error = %e.error, "rename failed; writing in place");
        return write_in_place(path, data);
    }
    Ok(())
}

fn write_in_place(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|e| Error::io(path, e))
}
