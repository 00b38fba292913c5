//! CLI argument definitions for `snlists`

use clap::{builder::BoolishValueParser, builder::NonEmptyStringValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sn_lists::config::ConfigOverrides;
use sn_lists::core::ListVariant;
use sn_lists::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key to display (e.g., `level`, `list_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Comment out spectra in a supernova's list file.
    ///
    /// Every line containing SPECTRUM_ID gets a leading `#`. Running it twice
    /// comments the same lines twice.
    Comment {
        /// Supernova name, used verbatim in the file name (e.g. `SN2011dh`)
        #[arg(value_name = "SN_NAME", value_parser = NonEmptyStringValueParser::new())]
        sn_name: String,

        /// Substring identifying the spectrum line(s) to comment out
        #[arg(value_name = "SPECTRUM_ID", value_parser = NonEmptyStringValueParser::new())]
        spectrum_id: String,

        /// Edit `<SN_NAME>.list` instead of the curated `<SN_NAME>-B.list`
        #[arg(long)]
        plain: bool,

        /// Show the lines that would change without writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the list file path for a supernova.
    Path {
        /// Supernova name
        #[arg(value_name = "SN_NAME", value_parser = NonEmptyStringValueParser::new())]
        sn_name: String,

        /// Resolve `<SN_NAME>.list` instead of `<SN_NAME>-B.list`
        #[arg(long)]
        plain: bool,
    },
}

impl Command {
    /// List-file variant selected by the `--plain` flag, if the command has one
    #[must_use]
    pub const fn variant(&self) -> Option<ListVariant> {
        match self {
            Self::Comment { plain, .. } | Self::Path { plain, .. } => {
                Some(ListVariant::from_plain_flag(*plain))
            }
            Self::Config { .. } => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "snlists",
    about = "Supernova list-file curation tool",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the directory holding list files
    #[arg(long = "list-dir", value_name = "DIR")]
    pub list_dir: Option<PathBuf>,

    /// Override atomic rewriting of list files (true/false)
    #[arg(long = "atomic-write", value_parser = BoolishValueParser::new())]
    pub atomic_write: Option<bool>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` fields leave the loaded configuration untouched.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: None,
            verbose: self.config_verbose,
            list_dir: self
                .list_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            atomic_write: self.atomic_write,
        }
    }
}
