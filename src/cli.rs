//! CLI struct definitions for the learnsync command-line interface.
//!
//! The `Command` enum is the command table; dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "learnsync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Upload locally captured code learnings to your learnsync project."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Connect this directory to a project and store an API key
    #[clap(name = "init")]
    Init,

    /// Upload pending learnings and remove the ones the service accepted
    #[clap(name = "sync")]
    Sync,

    /// Record the repository URL and install a pre-push hook that runs sync
    #[clap(name = "link")]
    Link,

    /// Remove the pre-push hook
    #[clap(name = "unlink")]
    Unlink,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Sync => "sync",
            Command::Link => "link",
            Command::Unlink => "unlink",
        }
    }
}
