//! Shared building blocks: local state, the remote client, and terminal output.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pending;
pub mod prompt;
pub mod remote;
pub mod settings;
pub mod store;
pub mod tui;
pub mod validate;
