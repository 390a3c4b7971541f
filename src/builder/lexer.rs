//! @dose
//! purpose: Fallback lexical classifier for type text that has no structural form. Splits raw
//!     text into keyword, punctuation, identifier and string-literal tokens and attaches
//!     navigation ids to identifiers found in the reference map.
//!
//! when-editing:
//!     - !Spacing is derived from token classes only, never from source whitespace
//!     - Identifiers absent from the reference map stay plain Text
//!
//! invariants:
//!     - Same text and map always produce the same tokens
//!     - Text the lexer cannot classify becomes one raw Text token; it never fails
//!
//! gotchas:
//!     - Dotted names ("ns.Foo") are one identifier so qualified lookups work
//!     - A "?" between two operands is the conditional operator; "a?: T" is optional

use crate::builder::token::{RenderContext, TokenOptions};
use crate::types::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static LEXEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        (?P<ws>\s+)
        | (?P<string>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`)
        | (?P<number>\d[\d_]*(?:\.\d+)?n?)
        | (?P<ident>[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)
        | (?P<punct>=>|\.\.\.|\?\.|[{}()\[\]<>,;:?|&=.*+\-!~@\#])
        "#,
    )
    .unwrap()
});

const KEYWORDS: &[&str] = &[
    "abstract",
    "any",
    "as",
    "asserts",
    "bigint",
    "boolean",
    "const",
    "extends",
    "false",
    "import",
    "in",
    "infer",
    "is",
    "keyof",
    "never",
    "new",
    "null",
    "number",
    "object",
    "out",
    "readonly",
    "string",
    "symbol",
    "this",
    "true",
    "typeof",
    "undefined",
    "unique",
    "unknown",
    "void",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Word,
    Str,
    Punct,
}

struct Lexeme<'t> {
    class: Class,
    text: &'t str,
}

/// Split raw text into lexemes, or None when some character is not recognized
fn scan(text: &str) -> Option<Vec<Lexeme<'_>>> {
    let mut lexemes = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let caps = LEXEME.captures_at(text, pos)?;
        let whole = caps.get(0)?;
        if whole.start() != pos || whole.end() == pos {
            return None;
        }
        pos = whole.end();
        let class = if caps.name("ws").is_some() {
            continue;
        } else if caps.name("string").is_some() {
            Class::Str
        } else if caps.name("punct").is_some() {
            Class::Punct
        } else {
            Class::Word
        };
        lexemes.push(Lexeme {
            class,
            text: whole.as_str(),
        });
    }
    Some(lexemes)
}

/// Tokenize raw type text
pub fn tokenize(text: &str, ctx: &RenderContext<'_>) -> Vec<Token> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let Some(lexemes) = scan(trimmed) else {
        tracing::debug!(text = trimmed, "unrecognized type text; emitting raw token");
        return vec![ctx.text(trimmed)];
    };

    let mut tokens = Vec::with_capacity(lexemes.len());
    let mut pending_conditionals = 0usize;
    for (i, lexeme) in lexemes.iter().enumerate() {
        let next = lexemes.get(i + 1);
        let prev = i.checked_sub(1).and_then(|p| lexemes.get(p));
        let next_is_operand = next.is_some_and(|n| n.class != Class::Punct || n.text == "(");
        let mut options = TokenOptions::default();

        let kind = match lexeme.class {
            Class::Str => TokenKind::StringLiteral,
            Class::Word if is_keyword(lexeme.text) => TokenKind::Keyword,
            Class::Word => match ctx.lookup(lexeme.text) {
                Some(id) => {
                    options = options.navigate_to(Some(id));
                    TokenKind::TypeName
                }
                None => TokenKind::Text,
            },
            Class::Punct => {
                options = match lexeme.text {
                    "|" | "&" | "=>" | "=" => options.spaced(),
                    "," | ";" => options.suffix_space(),
                    "{" => options.suffix_space(),
                    "}" => options.prefix_space(),
                    "?" if prev.is_some_and(|p| p.class != Class::Punct) && next_is_operand => {
                        pending_conditionals += 1;
                        options.spaced()
                    }
                    ":" if pending_conditionals > 0 => {
                        pending_conditionals -= 1;
                        options.spaced()
                    }
                    ":" => options.suffix_space(),
                    _ => options,
                };
                TokenKind::Punctuation
            }
        };

        if lexeme.class != Class::Punct && next.is_some_and(|n| n.class != Class::Punct) {
            options = options.suffix_space();
        }
        tokens.push(ctx.token(kind, lexeme.text, options));
    }
    tokens
}
