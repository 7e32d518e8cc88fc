//! I/O failures name the failing path and leave the hosts file intact.

mod common;

use sbguard::domain::DomainSet;
use sbguard::error::Error;
use sbguard::hosts;
use std::fs;

#[test]
fn missing_hosts_file_is_io_error_with_path() {
    let dir = common::temp_guard_home();
    let hosts_path = dir.path().join("no-such-hosts");
    let backup = common::backup_path(dir.path());

    let err = hosts::apply(&hosts_path, &backup, &DomainSet::new()).unwrap_err();

    match &err {
        Error::Io { path, .. } => assert_eq!(path, &hosts_path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("no-such-hosts"));
    assert!(!backup.exists());
}

#[test]
fn unwritable_backup_location_aborts_before_patch() {
    let dir = common::temp_guard_home();
    let original = "127.0.0.1\tlocalhost\n";
    let hosts_path = common::write_hosts(dir.path(), original);
    // A regular file where the backup's parent directory should be.
    let blocker = dir.path().join("state");
    fs::write(&blocker, "").unwrap();
    let backup = blocker.join("hosts.backup");

    let err = hosts::apply(&hosts_path, &backup, &DomainSet::new()).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(fs::read_to_string(&hosts_path).unwrap(), original);
}
