//! Safe Browsing Guard - keeps a managed block of SafeSearch and blocklist
//! entries in the system hosts file.

pub mod block;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod hosts;
pub mod platform;
