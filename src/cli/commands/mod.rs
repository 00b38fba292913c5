//! CLI command handlers for `snlists`.
//!
//! Each subcommand lives in its own submodule and returns `true` on success.

pub mod comment;
pub mod config;
pub mod path;
