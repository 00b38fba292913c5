//! Library behind the `snlists` command-line tool
//!
//! Curates the per-supernova `.list` files read by the CoCo spectral pipeline.

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `sn-lists` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
