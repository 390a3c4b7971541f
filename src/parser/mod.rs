//! @dose
//! purpose: tree-sitter TypeScript front end. Turns declaration files into Declaration items
//!     plus the file's ReferenceMap, and single type texts into TypeExpr trees.
//!
//! when-editing:
//!     - !Grammar node kinds are matched by name; check tree-sitter-typescript's node-types.json
//!       when bumping the grammar version
//!     - !Only whole-file failures are errors; unknown nodes degrade to Primitive text
//!     - Extensions are stored without the leading dot (e.g., "ts" not ".ts")
//!
//! invariants:
//!     - Declarations come out in document order
//!     - Parsing never panics on malformed input; tree-sitter error recovery is accepted
//!
//! do-not:
//!     - Never share a tree_sitter::Parser across threads; create one per call
//!
//! gotchas:
//!     - .tsx needs the TSX grammar; `<T>x` casts are ambiguous otherwise
//!     - .d.ts files have extension "ts"
//!
//! flows:
//!     - parse_source_file: pick dialect from extension -> parse_declarations_with
//!     - parse_type: wrap text in a type alias -> convert the alias value

mod type_expr;
mod typescript;

use std::path::Path;
use thiserror::Error;
use tree_sitter::Parser;

pub use typescript::{
    parse_declarations, parse_declarations_with, parse_type, ParsedDeclaration, ParsedFile,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse source: {0}")]
    ParseError(String),
    #[error("Unsupported file extension: {0}")]
    UnsupportedLanguage(String),
}

/// Grammar variant used for a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    pub const EXTENSIONS: &'static [&'static str] = &["ts", "mts", "cts", "tsx"];

    pub fn from_path(path: &Path) -> Option<Dialect> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    pub(crate) fn create_parser(self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };
        parser
            .set_language(&language)
            .map_err(|e| ParseError::ParseError(e.to_string()))?;
        Ok(parser)
    }
}

/// Check if a file extension is handled by the front end
pub fn is_supported(path: &Path) -> bool {
    Dialect::from_path(path).is_some()
}

/// Parse one source file, choosing the grammar from its extension
pub fn parse_source_file(
    path: &Path,
    source: &str,
    package: Option<&str>,
) -> Result<ParsedFile, ParseError> {
    let dialect = Dialect::from_path(path)
        .ok_or_else(|| ParseError::UnsupportedLanguage(path.display().to_string()))?;
    parse_declarations_with(source, package, dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(
            Dialect::from_path(Path::new("index.d.ts")),
            Some(Dialect::TypeScript)
        );
        assert_eq!(
            Dialect::from_path(Path::new("esm.mts")),
            Some(Dialect::TypeScript)
        );
        assert_eq!(Dialect::from_path(Path::new("view.tsx")), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_path(Path::new("main.js")), None);
        assert_eq!(Dialect::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_unsupported_extension_is_error() {
        let err = parse_source_file(Path::new("lib.py"), "x = 1", None).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedLanguage(_)));
    }
}
