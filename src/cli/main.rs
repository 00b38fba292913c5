//! Command-line interface entry point for `snlists`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use sn_lists::config::Config;
use sn_lists::info;
use sn_lists::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = config.resolved_log_file();

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let variant = args.command.variant();
    let ok = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Comment {
            sn_name,
            spectrum_id,
            dry_run,
            ..
        } => commands::comment::run(
            &config.editor_config(),
            &sn_name,
            &spectrum_id,
            variant.unwrap_or_default(),
            dry_run,
        ),
        Command::Path { sn_name, .. } => {
            commands::path::run(&config.editor_config(), &sn_name, variant.unwrap_or_default())
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
