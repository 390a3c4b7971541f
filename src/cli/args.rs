//! @dose
//! purpose: This module defines the command-line interface for apiview-ts using the clap derive
//!     macros. It specifies both commands (render, type) and their arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - Options that also exist in apiview.toml stay Option so "not given" is visible
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line arguments
//!     - PathBuf is used for all file/directory path arguments to ensure proper path handling
//!
//! do-not:
//!     - Never add positional arguments that could conflict with subcommands
//!
//! gotchas:
//!     - The --root flag is global but optional; defaults to current directory in main.rs
//!     - --reference values are NAME=ID; the id itself may contain '='

use crate::exclusion::ExclusionConfig;
use crate::formatter::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apiview-ts")]
#[command(author, version, about = "Render TypeScript API surfaces as review token trees")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the declarations of TypeScript sources
    Render(RenderArgs),

    /// Render a single type expression as `NAME: TYPE`
    Type(TypeArgs),
}

#[derive(Args, Default)]
pub struct RenderArgs {
    /// Specific files or directories to process (defaults to the root)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format (defaults to apiview.toml, then json)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Package name used as the canonical id prefix
    #[arg(long)]
    pub package: Option<String>,

    /// Exclude files/directories matching glob pattern (can be repeated)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Don't respect .gitignore files
    #[arg(long)]
    pub no_gitignore: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Create an ExclusionConfig from these options, merging with config file patterns
    pub fn exclusion_config(&self, patterns: &[String]) -> ExclusionConfig {
        ExclusionConfig {
            patterns: patterns.to_vec(),
            respect_gitignore: !self.no_gitignore,
        }
    }
}

#[derive(Args, Default)]
pub struct TypeArgs {
    /// Type expression text, e.g. "string | { a: number }"
    #[arg(value_name = "TYPE")]
    pub text: String,

    /// Property name the type is attached to
    #[arg(long, default_value = "value")]
    pub name: String,

    /// Navigable type name as NAME=ID (can be repeated)
    #[arg(long = "reference", value_name = "NAME=ID", value_parser = parse_reference)]
    pub references: Vec<(String, String)>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Split NAME=ID at the first '='
pub fn parse_reference(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, id)) if !name.trim().is_empty() && !id.trim().is_empty() => {
            Ok((name.trim().to_string(), id.trim().to_string()))
        }
        _ => Err(format!("expected NAME=ID, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_command() {
        let cli = Cli::try_parse_from([
            "apiview-ts",
            "--root",
            "/repo",
            "render",
            "src",
            "--format",
            "text",
            "--exclude",
            "*.test.ts",
            "--exclude",
            "docs/**",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/repo")));
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
        assert_eq!(args.format, Some(OutputFormat::Text));
        assert_eq!(args.exclude, vec!["*.test.ts", "docs/**"]);
        assert!(args.exclusion_config(&args.exclude).respect_gitignore);
    }

    #[test]
    fn test_parse_type_command() {
        let cli = Cli::try_parse_from([
            "apiview-ts",
            "type",
            "Foo | Bar",
            "--reference",
            "Foo=pkg!Foo",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Type(args) = cli.command else {
            panic!("expected type");
        };
        assert_eq!(args.name, "value");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(
            args.references,
            vec![("Foo".to_string(), "pkg!Foo".to_string())]
        );
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(
            parse_reference("Key=pkg!Key=1"),
            Ok(("Key".to_string(), "pkg!Key=1".to_string()))
        );
        assert!(parse_reference("Key").is_err());
        assert!(parse_reference("=id").is_err());
    }
}
