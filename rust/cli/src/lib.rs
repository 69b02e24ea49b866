//! # Spider CLI Library
//!
//! Terminal front end for the Spider Solitaire engine: interactive play,
//! layout inspection, batch simulation with automatic players, and
//! configuration display.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to the subcommand handler. Output
//! streams are injected so the whole CLI can be driven from tests.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["spider", "sim", "--games", "10", "--seed", "42"];
//! let code = spider_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a game interactively
//! - `deal`: Print the opening layout for a seed
//! - `sim`: Autoplay games and record them as JSONL
//! - `cfg`: Display current configuration settings
//! - `rng`: Print a seeded RNG sample

use clap::Parser;
use std::io::{BufRead, Write};

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, SpiderCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_rng_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "deal", "sim", "cfg", "rng"];

/// Main entry point for the CLI application.
///
/// Interactive input for `play` is read from the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["spider", "rng", "--seed", "42"];
/// let code = spider_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SpiderCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play { seed, difficulty } => {
            handle_play_command(seed, difficulty, out, err, input)
        }
        Commands::Deal {
            seed,
            difficulty,
            json,
        } => handle_deal_command(seed, difficulty, json, out, err),
        Commands::Sim {
            games,
            seed,
            difficulty,
            ai,
            max_moves,
            records,
        } => handle_sim_command(games, seed, difficulty, ai, max_moves, records, out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        // handlers that validate input report it themselves
        Err(CliError::InvalidInput(_)) | Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }

    write_or_exit!(err, "{}", e);
    write_or_exit!(err, "");
    write_or_exit!(err, "Spider Solitaire CLI");
    write_or_exit!(err, "Usage: spider <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in COMMANDS {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: spider --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn run_args(args: &[&str], input: &str) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes());
        let code = run_with_input(args, &mut stdin, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, err) = run_args(&["spider", "--help"], "");
        assert_eq!(code, 0);
        assert!(out.contains("Usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, out, err) = run_args(&["spider", "solve"], "");
        assert_eq!(code, 2);
        assert!(out.is_empty());
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}", c)));
        }
    }

    #[test]
    #[serial]
    fn test_play_dispatch_reads_injected_input() {
        let (code, out, _) = run_args(&["spider", "play", "--seed", "3"], "d\nq\n");
        assert_eq!(code, 0);
        assert!(out.contains("Dealt 10 card(s)"));
    }

    #[test]
    #[serial]
    fn test_validation_failure_is_printed_once() {
        let (code, _, err) = run_args(&["spider", "sim", "--games", "0"], "");
        assert_eq!(code, 2);
        assert_eq!(err.matches("games must be >= 1").count(), 1);
    }
}
