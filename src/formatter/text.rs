//! @dose
//! purpose: Plain-text rendering of token lines. Spacing flags become single spaces, nested
//!     lines print after their parent.
//!
//! invariants:
//!     - A prefix space is never added at the start of a line or after an existing space
//!     - Printed lines carry no trailing whitespace
//!
//! gotchas:
//!     - Indentation and the closing-brace pad are token values, not flags; they print verbatim

use crate::types::{Line, RenderedDeclaration, RenderedFile, Token};

/// Join one row of tokens
pub fn format_line(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.has_prefix_space && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push_str(&token.value);
        if token.has_suffix_space {
            out.push(' ');
        }
    }
    out.trim_end().to_string()
}

fn push_lines(lines: &[Line], out: &mut Vec<String>) {
    for line in lines {
        out.push(format_line(&line.tokens));
        push_lines(&line.children, out);
    }
}

/// All printed rows of one declaration
pub fn format_declaration(declaration: &RenderedDeclaration) -> Vec<String> {
    let mut out = vec![format_line(&declaration.tokens)];
    push_lines(&declaration.children, &mut out);
    out
}

pub fn format_text(files: &[RenderedFile]) -> String {
    let mut sections = Vec::new();
    for file in files {
        let mut lines = vec![format!("// {}", file.path)];
        for declaration in &file.declarations {
            lines.extend(format_declaration(declaration));
        }
        sections.push(lines.join("\n") + "\n");
    }
    sections.join("\n")
}
