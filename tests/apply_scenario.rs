//! Exact output for a simple hosts file and one blocked domain.

mod common;

use sbguard::domain::DomainSet;
use sbguard::hosts;
use std::fs;

const EXPECTED: &str = "1.2.3.4 other.example\n\
# >>> SafeBrowsingGuard begin\n\
# SafeSearch mappings -> 216.239.38.120\n\
216.239.38.120\tgoogle.com\n\
216.239.38.120\twww.google.com\n\
216.239.38.120\twww.google.co.uk\n\
216.239.38.120\twww.google.ca\n\
216.239.38.120\tyoutube.com\n\
216.239.38.120\twww.youtube.com\n\
# Custom blocked domains -> 127.0.0.1\n\
127.0.0.1\tbad.com\n\
# <<< SafeBrowsingGuard end\n";

#[test]
fn single_domain_exact_output() {
    let dir = common::temp_guard_home();
    let hosts_path = common::write_hosts(dir.path(), "1.2.3.4 other.example\n");
    let set: DomainSet = ["bad.com"].into_iter().collect();

    let outcome = hosts::apply(&hosts_path, &common::backup_path(dir.path()), &set).unwrap();

    assert!(outcome.backup_created);
    assert!(!outcome.recovered_unterminated_block);
    assert_eq!(fs::read_to_string(&hosts_path).unwrap(), EXPECTED);
}

#[test]
fn missing_trailing_newline_is_added_before_block() {
    let dir = common::temp_guard_home();
    let hosts_path = common::write_hosts(dir.path(), "1.2.3.4 other.example");
    let set: DomainSet = ["bad.com"].into_iter().collect();

    hosts::apply(&hosts_path, &common::backup_path(dir.path()), &set).unwrap();

    assert_eq!(fs::read_to_string(&hosts_path).unwrap(), EXPECTED);
}

#[test]
fn empty_hosts_file_gets_only_block() {
    let dir = common::temp_guard_home();
    let hosts_path = common::write_hosts(dir.path(), "");

    hosts::apply(&hosts_path, &common::backup_path(dir.path()), &DomainSet::new()).unwrap();

    let content = fs::read_to_string(&hosts_path).unwrap();
    assert!(content.starts_with("# >>> SafeBrowsingGuard begin\n"));
    assert!(content.ends_with("# <<< SafeBrowsingGuard end\n"));
}
