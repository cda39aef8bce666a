//! learnsync: upload locally captured code learnings to a remote project.
//!
//! A project directory is connected once with `learnsync init`, which stores
//! an API key in `.learnsync/config.json`. Learning records are written as
//! individual JSON files under `.learnsync/learnings/` by other tools;
//! `learnsync sync` uploads them and removes each one the service accepts.
//!
//! # Commands
//!
//! - `init`: log in, confirm project ownership, issue and store an API key
//! - `sync`: validate the stored key, then upload pending learnings one by one
//! - `link`: record the repository URL and install a `pre-push` hook running `sync`
//! - `unlink`: remove that hook
//!
//! Every command reports failures on the console and exits 0; failed learnings
//! simply stay pending for the next run.
//!
//! # Crate Structure
//!
//! - [`core`]: configuration, pending storage, remote client, validation, output
//! - [`plugins`]: the command workflows (`init`, `sync`, `link`/`unlink`)

pub mod cli;
pub mod core;
pub mod plugins;

use clap::Parser;
use crate::cli::Cli;
use crate::core::error::LearnsyncError;
use crate::core::prompt::{Prompter, TerminalPrompter};
use crate::core::settings::{DEFAULT_LOG_LEVEL, Settings};
use crate::core::store::Store;
use crate::core::{logging, tui};
use crate::plugins::{hook, init, sync};

pub use crate::cli::Command;

pub fn run() -> Result<(), LearnsyncError> {
    let cli = Cli::parse();
    let store = Store::new(std::env::current_dir()?);
    run_command(cli.command, &store, &TerminalPrompter);
    Ok(())
}

/// Run one command against `store`, rendering any failure instead of returning it.
pub fn run_command(command: Command, store: &Store, prompter: &dyn Prompter) {
    let settings = Settings::load(store);
    let level = settings
        .as_ref()
        .map(|s| s.log_level.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    if let Err(e) = logging::init_logging(level) {
        eprintln!("learnsync: logging disabled: {}", e);
    }

    let result = settings.and_then(|settings| dispatch(command, store, &settings, prompter));
    if let Err(err) = result {
        tracing::debug!(command = command.name(), error = ?err, "command failed");
        tui::render_error(command.name(), &err);
    }
}

fn dispatch(
    command: Command,
    store: &Store,
    settings: &Settings,
    prompter: &dyn Prompter,
) -> Result<(), LearnsyncError> {
    match command {
        Command::Init => init::run_init_cli(store, settings, prompter),
        Command::Sync => sync::run_sync_cli(store, settings),
        Command::Link => hook::run_link_cli(store, prompter),
        Command::Unlink => hook::run_unlink_cli(store),
    }
}
