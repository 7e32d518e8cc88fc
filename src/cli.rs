//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use tracing_subscriber::EnvFilter;

use crate::block;
use crate::config::{self, GuardPaths};
use crate::domain::{self, DomainSet};
use crate::hosts::{self, RestoreOutcome};
use crate::platform::{self, DnsPlatform, FlushOutcome};

#[derive(Parser)]
#[command(name = "sbguard")]
#[command(about = "Enforce SafeSearch and block domains through the hosts file")]
pub struct Cli {
    /// Log each step to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add domains to the block list
    Add {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Remove domains from the block list
    Remove {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// List configured domains
    List,
    /// Print the managed block that apply would write
    Preview,
    /// Write the managed block into the hosts file (backs it up first)
    Apply,
    /// Restore the hosts file from the backup taken before the first apply
    Restore,
    /// Interactive menu (default when no command is given)
    Menu,
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = GuardPaths::default_paths();
    let platform = platform::default_platform();
    tracing::debug!(
        platform = platform.name(),
        config = %paths.config_dir.display(),
        "starting"
    );

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Add { domains } => cmd_add(&paths, &domains),
        Commands::Remove { domains } => cmd_remove(&paths, &domains),
        Commands::List => cmd_list(&paths),
        Commands::Preview => cmd_preview(&paths),
        Commands::Apply => cmd_apply(&paths, platform.as_ref()),
        Commands::Restore => cmd_restore(&paths, platform.as_ref()),
        Commands::Menu => cmd_menu(&paths, platform.as_ref()),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn add_domains(set: &mut DomainSet, raw: &[String]) {
    for d in raw {
        match domain::normalize(d) {
            None => println!("No domain entered."),
            Some(d) => {
                if set.insert(&d) {
                    println!("Added {d}.");
                } else {
                    println!("{d} is already blocked.");
                }
            }
        }
    }
}

fn remove_domains(set: &mut DomainSet, raw: &[String]) {
    for d in raw {
        if set.remove(d) {
            println!("Removed {}.", d.trim().to_lowercase());
        } else {
            println!("Domain not found: {}", d.trim());
        }
    }
}

fn print_domains(set: &DomainSet) {
    if set.is_empty() {
        println!("No domains configured.");
        return;
    }
    println!("Configured domains:");
    for d in set.iter() {
        println!(" - {d}");
    }
}

fn cmd_add(paths: &GuardPaths, raw: &[String]) -> Result<()> {
    let mut set = config::load_domains(paths)?;
    add_domains(&mut set, raw);
    config::save_domains(paths, &set)?;
    Ok(())
}

fn cmd_remove(paths: &GuardPaths, raw: &[String]) -> Result<()> {
    let mut set = config::load_domains(paths)?;
    remove_domains(&mut set, raw);
    config::save_domains(paths, &set)?;
    Ok(())
}

fn cmd_list(paths: &GuardPaths) -> Result<()> {
    print_domains(&config::load_domains(paths)?);
    Ok(())
}

fn cmd_preview(paths: &GuardPaths) -> Result<()> {
    let set = config::load_domains(paths)?;
    print!("{}", block::render(&set));
    Ok(())
}

fn cmd_apply(paths: &GuardPaths, platform: &dyn DnsPlatform) -> Result<()> {
    let set = config::load_domains(paths)?;
    apply_domains(paths, platform, &set)
}

fn apply_domains(paths: &GuardPaths, platform: &dyn DnsPlatform, set: &DomainSet) -> Result<()> {
    warn_if_unprivileged(platform);
    let hosts_path = platform.hosts_path();
    let outcome = hosts::apply(&hosts_path, &paths.backup_file, set).context("apply changes")?;
    if outcome.backup_created {
        println!("Saved original hosts file to {}", paths.backup_file.display());
    }
    if outcome.recovered_unterminated_block {
        eprintln!(
            "Warning: found an unterminated managed block in {}; it was replaced.",
            hosts_path.display()
        );
    }
    flush(platform);
    println!(
        "Changes applied. Managed block written between markers. Backup at: {}",
        paths.backup_file.display()
    );
    Ok(())
}

fn cmd_restore(paths: &GuardPaths, platform: &dyn DnsPlatform) -> Result<()> {
    warn_if_unprivileged(platform);
    let hosts_path = platform.hosts_path();
    match hosts::restore(&hosts_path, &paths.backup_file).context("restore backup")? {
        RestoreOutcome::NoBackup => println!("No backup found."),
        RestoreOutcome::Restored => {
            flush(platform);
            println!("Backup restored to {}.", hosts_path.display());
        }
    }
    Ok(())
}

/// Flush failures never fail the command.
fn flush(platform: &dyn DnsPlatform) {
    match platform.flush_dns() {
        Ok(FlushOutcome::Flushed) => println!("DNS cache flushed ({}).", platform.name()),
        Ok(FlushOutcome::Manual(hint)) => {
            println!("Reminder: flush DNS manually if needed: {hint}")
        }
        Ok(FlushOutcome::Skipped) => tracing::debug!("dns flush skipped"),
        Err(e) => eprintln!("Warning: unable to flush DNS automatically: {e:#}"),
    }
}

fn warn_if_unprivileged(platform: &dyn DnsPlatform) {
    if platform.name() != "file" && !platform::unix::is_root() {
        tracing::warn!(
            "not running as root; writing {} will likely fail",
            platform.hosts_path().display()
        );
    }
}

const MENU_ITEMS: &[&str] = &[
    "Add a domain",
    "Remove a domain",
    "List configured domains",
    "Apply changes (update hosts)",
    "Restore hosts backup",
    "Quit",
];

fn prompt_domain(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Interactive loop. The domain set lives here and is saved after each edit.
fn cmd_menu(paths: &GuardPaths, platform: &dyn DnsPlatform) -> Result<()> {
    let mut set = config::load_domains(paths)?;
    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Safe Browsing Guard")
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;
        match choice {
            0 => {
                let d = prompt_domain("Domain to block (e.g. badsite.com)")?;
                add_domains(&mut set, &[d]);
                config::save_domains(paths, &set)?;
            }
            1 => {
                let d = prompt_domain("Domain to remove")?;
                remove_domains(&mut set, &[d]);
                config::save_domains(paths, &set)?;
            }
            2 => print_domains(&set),
            3 => {
                if let Err(e) = apply_domains(paths, platform, &set) {
                    eprintln!("Error: {e:#}");
                }
            }
            4 => {
                if let Err(e) = cmd_restore(paths, platform) {
                    eprintln!("Error: {e:#}");
                }
            }
            _ => {
                println!("Goodbye.");
                return Ok(());
            }
        }
    }
}
