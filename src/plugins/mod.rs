//! Command workflows, one module per CLI surface.

pub mod hook;
pub mod init;
pub mod sync;
