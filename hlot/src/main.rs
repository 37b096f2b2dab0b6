//! Hlot CLI - A command-line tool for inspecting HLO text.
//!
//! This is the main entry point for the hlot CLI application.
//! It uses clap for argument parsing and dispatches to the token dump
//! and location lookup commands built on `hloc-lex`.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_locate, run_tokens, LocateArgs, TokensArgs};
use config::Config;
use error::{HlotError, Result};

/// Hlot - A CLI tool for inspecting HLO text
///
/// Hlot dumps the token stream of an HLO module and maps byte offsets to
/// lines and columns.
#[derive(Parser, Debug)]
#[command(name = "hlot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for inspecting HLO text", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "HLOT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "HLOT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the hlot CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of an HLO file
    ///
    /// Writes one record per token, including the final `eof`. Lexing
    /// errors are reported with the offending line and a caret.
    Tokens(TokensCommand),

    /// Map a byte offset to its line and column
    Locate(LocateCommand),
}

/// Arguments for the tokens subcommand.
#[derive(Parser, Debug)]
struct TokensCommand {
    /// Input file, `-` reads standard input
    input: PathBuf,

    /// Output format (text, json)
    #[arg(short = 'F', long)]
    format: Option<String>,

    /// Print line:column for every token
    #[arg(short, long)]
    locations: bool,

    /// Print error tokens and exit successfully instead of failing
    #[arg(long)]
    allow_errors: bool,
}

/// Arguments for the locate subcommand.
#[derive(Parser, Debug)]
struct LocateCommand {
    /// Input file, `-` reads standard input
    input: PathBuf,

    /// Byte offset into the input
    #[arg(short, long)]
    offset: usize,
}

/// Main entry point for the hlot CLI.
///
/// Lexing failures have already been reported with a diagnostic by the
/// time they reach here, so only the exit code is set for them.
fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(HlotError::Lex { .. }) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration, initializes logging and runs the selected command.
fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let verbose = cli.verbose || config.verbose;

    init_logging(verbose, cli.no_color)?;

    execute_command(cli.command, verbose, config)
}

/// Initialize the logging system.
///
/// Logs go to stderr so that token dumps on stdout stay machine-readable.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| HlotError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Tokens(args) => execute_tokens(args, verbose, config),
        Commands::Locate(args) => execute_locate(args, verbose),
    }
}

/// Execute the tokens command.
fn execute_tokens(args: TokensCommand, verbose: bool, config: Config) -> Result<()> {
    let tokens_args = TokensArgs {
        verbose,
        input: args.input,
        format: args.format,
        locations: args.locations,
        allow_errors: args.allow_errors,
    };
    run_tokens(tokens_args, config.tokens)
}

/// Execute the locate command.
fn execute_locate(args: LocateCommand, verbose: bool) -> Result<()> {
    let locate_args = LocateArgs {
        verbose,
        input: args.input,
        offset: args.offset,
    };
    run_locate(locate_args)
}
