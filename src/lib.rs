//! @dose
//! purpose: This is the library crate root for apiview-ts, exposing the token builder, the
//!     TypeScript front end and the CLI commands for use as both a tool and a library.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - Keep the re-export list organized by module
//!
//! invariants:
//!     - builder and generators never do I/O; parser, exclusion and commands do
//!
//! gotchas:
//!     - The lib.rs is separate from main.rs - library consumers get lib, CLI gets main

pub mod builder;
pub mod cli;
pub mod commands;
pub mod config;
pub mod exclusion;
pub mod formatter;
pub mod generators;
pub mod logging;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use builder::{build_reference_map, render, ReferenceMap, RenderContext};
pub use cli::{Cli, Commands, RenderArgs, TypeArgs};
pub use config::Config;
pub use formatter::{format_output, OutputFormat};
pub use generators::{render_declaration, DeclarationError, DeclarationGenerator};
pub use parser::{parse_declarations, parse_type, ParseError};
pub use types::{
    Declaration, DeclarationBody, DeclarationKind, Line, Member, Rendered, RenderedDeclaration,
    RenderedFile, Token, TokenKind, TypeExpr,
};
