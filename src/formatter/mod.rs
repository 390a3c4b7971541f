//! @dose
//! purpose: Output formats for rendered declarations: the JSON token tree consumed by review
//!     tooling, and a plain-text listing for people.
//!
//! when-editing:
//!     - !JSON output is the wire shape; field names and numeric kinds must not drift
//!     - Text output is lossy (no navigation, no deprecation) and only for reading
//!
//! invariants:
//!     - Both formats list files and declarations in the order given
//!
//! flows:
//!     - format_output: pick JSON or text for a list of RenderedFile

mod text;

use crate::types::RenderedFile;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use text::{format_declaration, format_line, format_text};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Pretty JSON of any rendered value
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn format_output(
    files: &[RenderedFile],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => format_json(files),
        OutputFormat::Text => Ok(format_text(files)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::token::{create_token, TokenOptions};
    use crate::types::{DeclarationKind, RenderedDeclaration, TokenKind};

    fn file() -> RenderedFile {
        RenderedFile {
            path: "index.d.ts".to_string(),
            declarations: vec![RenderedDeclaration {
                display_name: "VERSION".to_string(),
                kind: DeclarationKind::Property,
                navigate_to_id: Some("pkg!VERSION".to_string()),
                tokens: vec![
                    create_token(TokenKind::MemberName, "VERSION", TokenOptions::default()),
                    create_token(
                        TokenKind::Punctuation,
                        ":",
                        TokenOptions::default().suffix_space(),
                    ),
                    create_token(TokenKind::Keyword, "string", TokenOptions::default()),
                    create_token(TokenKind::Punctuation, ";", TokenOptions::default()),
                ],
                children: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_json_wire_shape() {
        let json = format_output(&[file()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let declaration = &value[0]["Declarations"][0];
        assert_eq!(declaration["Kind"], "Property");
        assert_eq!(declaration["NavigateToId"], "pkg!VERSION");
        assert_eq!(declaration["Tokens"][0]["Kind"], 4);
        assert_eq!(declaration["Tokens"][1]["HasSuffixSpace"], true);
        assert!(declaration["Tokens"][0].get("IsDeprecated").is_none());
        assert!(declaration.get("Children").is_none());
    }

    #[test]
    fn test_text_output() {
        let text = format_output(&[file()], OutputFormat::Text).unwrap();
        assert_eq!(text, "// index.d.ts\nVERSION: string;\n");
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            format: OutputFormat,
        }
        let holder: Holder = toml::from_str("format = \"text\"").unwrap();
        assert_eq!(holder.format, OutputFormat::Text);
    }
}
