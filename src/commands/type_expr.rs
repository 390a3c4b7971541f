//! @dose
//! purpose: This module implements the type command: render one type expression as the
//!     property `NAME: TYPE` using references given on the command line.
//!
//! when-editing:
//!     - !Output uses the same RenderedDeclaration shape as the render command
//!
//! gotchas:
//!     - Unparseable text is not an error; it renders through the lexical fallback

use crate::builder::ReferenceMap;
use crate::cli::TypeArgs;
use crate::formatter::{format_declaration, format_json, OutputFormat};
use crate::generators::render_declaration;
use crate::parser::parse_type;
use crate::types::{Declaration, DeclarationBody, PropertySignature, RenderedDeclaration};
use anyhow::{Context, Result};

pub fn run_type(args: &TypeArgs) -> Result<()> {
    let rendered = render_type(args)?;
    let output = match args.format {
        OutputFormat::Json => format_json(&rendered).context("Failed to format output")?,
        OutputFormat::Text => format_declaration(&rendered).join("\n"),
    };
    println!("{}", output);
    Ok(())
}

pub fn render_type(args: &TypeArgs) -> Result<RenderedDeclaration> {
    let type_expr = parse_type(&args.text).context("Failed to parse type")?;
    let references: ReferenceMap = args.references.iter().cloned().collect();
    let declaration = Declaration::new(
        args.name.clone(),
        DeclarationBody::Property(PropertySignature::new(args.name.clone(), type_expr)),
    );
    Ok(render_declaration(&declaration, Some(&references), false)?)
}
