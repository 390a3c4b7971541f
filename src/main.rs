//! @dose
//! purpose: This is the CLI entry point for apiview-ts. It parses command-line arguments using
//!     clap, sets up logging, determines the project root directory, and dispatches to the
//!     render or type command.
//!
//! when-editing:
//!     - !All command handlers are imported from the apiview_ts crate
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - One and only one subcommand is always executed per invocation
//!     - The process exits with 0 on success, 1 on any error
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules
//!
//! gotchas:
//!     - The --root and --verbose flags can be placed before or after the subcommand

use anyhow::Context;
use apiview_ts::cli::{Cli, Commands};
use apiview_ts::commands::{run_render, run_type};
use apiview_ts::logging::init_logging;
use clap::Parser;
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Render(args) => run_render(&args, &root),
        Commands::Type(args) => run_type(&args),
    }
}
