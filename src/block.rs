//! Managed block rendering.
//!
//! The block is regenerated in full on every apply; nothing inside the
//! sentinels is ever edited in place.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use crate::domain::DomainSet;

pub const BEGIN_MARKER: &str = "# >>> SafeBrowsingGuard begin";
pub const END_MARKER: &str = "# <<< SafeBrowsingGuard end";

/// Google's SafeSearch VIP (forcesafesearch.google.com).
pub const OVERRIDE_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::new(216, 239, 38, 120));

pub const BLOCK_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Hosts forced onto SafeSearch, in priority order. Not sorted.
pub const SAFESEARCH_DOMAINS: &[&str] = &[
    "google.com",
    "www.google.com",
    "www.google.co.uk",
    "www.google.ca",
    "youtube.com",
    "www.youtube.com",
];

/// One hosts line: address and host name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping<'a> {
    pub address: IpAddr,
    pub host: &'a str,
}

impl fmt::Display for Mapping<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.address, self.host)
    }
}

/// Fixed SafeSearch mappings, always present in the block.
pub fn safesearch_mappings() -> impl Iterator<Item = Mapping<'static>> {
    SAFESEARCH_DOMAINS.iter().map(|&host| Mapping {
        address: OVERRIDE_ADDRESS,
        host,
    })
}

/// Blocklist mappings for a domain set, sorted.
pub fn blocked_mappings(domains: &DomainSet) -> impl Iterator<Item = Mapping<'_>> {
    domains.iter().map(|host| Mapping {
        address: BLOCK_ADDRESS,
        host,
    })
}

/// Rendered block lines, sentinels included, without line terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedBlock {
    lines: Vec<String>,
}

impl ManagedBlock {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Block text with every line newline-terminated.
impl fmt::Display for ManagedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Render the managed block for `domains`.
pub fn render(domains: &DomainSet) -> ManagedBlock {
    let mut lines = Vec::with_capacity(SAFESEARCH_DOMAINS.len() + domains.len() + 4);
    lines.push(BEGIN_MARKER.to_string());
    lines.push(format!("# SafeSearch mappings -> {OVERRIDE_ADDRESS}"));
    lines.extend(safesearch_mappings().map(|m| m.to_string()));
    if !domains.is_empty() {
        lines.push(format!("# Custom blocked domains -> {BLOCK_ADDRESS}"));
        lines.extend(blocked_mappings(domains).map(|m| m.to_string()));
    }
    lines.push(END_MARKER.to_string());
    ManagedBlock { lines }
}
