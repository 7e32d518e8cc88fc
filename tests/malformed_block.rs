//! A begin marker without an end marker is repaired, not fatal.

mod common;

use sbguard::block::{BEGIN_MARKER, END_MARKER};
use sbguard::domain::DomainSet;
use sbguard::hosts;
use std::fs;

#[test]
fn strip_unterminated_block_reports_it() {
    let content = format!("keep\n{BEGIN_MARKER}\n1.2.3.4\tx.com\n");
    let stripped = hosts::strip_managed_block(content.as_bytes());
    assert_eq!(stripped.lines, vec![&b"keep\n"[..]]);
    assert!(stripped.unterminated);
}

#[test]
fn apply_over_unterminated_block_yields_one_block() {
    let dir = common::temp_guard_home();
    let hosts_path = common::write_hosts(
        dir.path(),
        &format!("127.0.0.1\tlocalhost\n{BEGIN_MARKER}\n127.0.0.1\ttruncated.com"),
    );
    let set: DomainSet = ["bad.com"].into_iter().collect();

    let outcome = hosts::apply(&hosts_path, &common::backup_path(dir.path()), &set).unwrap();
    assert!(outcome.recovered_unterminated_block);

    let content = fs::read_to_string(&hosts_path).unwrap();
    assert_eq!(common::count_lines(&content, BEGIN_MARKER), 1);
    assert_eq!(common::count_lines(&content, END_MARKER), 1);
    assert!(!content.contains("truncated.com"));
    assert!(content.starts_with("127.0.0.1\tlocalhost\n"));
    assert!(content.contains("127.0.0.1\tbad.com\n"));

    let again = hosts::apply(&hosts_path, &common::backup_path(dir.path()), &set).unwrap();
    assert!(!again.recovered_unterminated_block);
}

#[test]
fn stray_end_marker_is_dropped() {
    let content = format!("a\n{END_MARKER}\nb\n");
    let stripped = hosts::strip_managed_block(content.as_bytes());
    assert_eq!(stripped.lines, vec![&b"a\n"[..], &b"b\n"[..]]);
    assert!(!stripped.unterminated);
}
