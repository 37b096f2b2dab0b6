//! Command modules for the hlot CLI.
//!
//! Each subcommand lives in its own file and exposes an args struct plus a
//! `run_*` entry point.

pub mod common;

pub mod locate;
pub mod tokens;

// Re-export command types and functions
pub use locate::{run_locate, LocateArgs};
pub use tokens::{run_tokens, TokensArgs};
