//! @dose
//! purpose: Display token and line shapes produced by the builder. These are the wire format
//!     consumed by the review renderer and the structural diff engine, so field names and
//!     optionality are part of the public contract.
//!
//! when-editing:
//!     - !Serialized field names are PascalCase and must not change
//!     - !Optional fields are omitted from JSON when absent, false or empty
//!     - TokenKind serializes as its numeric code, not its name
//!
//! invariants:
//!     - An expanded Rendered (non-empty children) ends with a context-end tail line whose
//!       last token is the ";" terminator
//!     - Tokens appended to an expanded Rendered land in the tail line before the terminator
//!     - Trees are values: nothing here is shared between declarations
//!
//! do-not:
//!     - Never reorder TokenKind codes; stored review revisions depend on them
//!     - Never push directly onto Rendered.tokens once it is expanded; use push()
//!
//! gotchas:
//!     - A continued tail line keeps IsContextEndLine because it still closes its own block
//!     - Indentation lives in leading Text tokens, so children are not re-indented by viewers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a display token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TokenKind {
    Text,
    Punctuation,
    Keyword,
    TypeName,
    MemberName,
    StringLiteral,
}

impl From<TokenKind> for u8 {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Text => 0,
            TokenKind::Punctuation => 1,
            TokenKind::Keyword => 2,
            TokenKind::TypeName => 3,
            TokenKind::MemberName => 4,
            TokenKind::StringLiteral => 5,
        }
    }
}

impl TryFrom<u8> for TokenKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TokenKind::Text),
            1 => Ok(TokenKind::Punctuation),
            2 => Ok(TokenKind::Keyword),
            3 => Ok(TokenKind::TypeName),
            4 => Ok(TokenKind::MemberName),
            5 => Ok(TokenKind::StringLiteral),
            other => Err(format!("unknown token kind code {}", other)),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Text => "Text",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Keyword => "Keyword",
            TokenKind::TypeName => "TypeName",
            TokenKind::MemberName => "MemberName",
            TokenKind::StringLiteral => "StringLiteral",
        };
        f.write_str(name)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Atomic display unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    #[serde(default)]
    pub has_prefix_space: bool,
    #[serde(default)]
    pub has_suffix_space: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub render_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deprecated: bool,
}

impl Token {
    /// True for the ";" punctuation that terminates a rendered row
    pub fn is_terminator(&self) -> bool {
        self.kind == TokenKind::Punctuation && self.value == ";"
    }
}

/// One renderable row, optionally owning nested rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Line>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_context_end_line: bool,
}

impl Line {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            children: Vec::new(),
            is_context_end_line: false,
        }
    }

    /// Build a line that closes a nested block
    pub fn context_end(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            children: Vec::new(),
            is_context_end_line: true,
        }
    }

    fn ends_with_terminator(&self) -> bool {
        self.tokens.last().is_some_and(Token::is_terminator)
    }
}

/// Result of rendering a type, member or declaration: tokens for the current row plus
/// optional nested rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rendered {
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Line>,
}

impl Rendered {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            children: Vec::new(),
        }
    }

    /// True once an object literal forced multi-line output
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Append a token to the current row: the parent row while inline, otherwise the tail
    /// line just before its terminator.
    pub fn push(&mut self, token: Token) {
        match self.children.last_mut() {
            None => self.tokens.push(token),
            Some(tail) => {
                if tail.ends_with_terminator() {
                    let at = tail.tokens.len() - 1;
                    tail.tokens.insert(at, token);
                } else {
                    tail.tokens.push(token);
                }
            }
        }
    }

    pub fn extend<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        for token in tokens {
            self.push(token);
        }
    }

    /// Concatenate another result onto this one.
    ///
    /// When both sides are expanded, the tail line loses its terminator and continues with
    /// the other result's tokens; the other result's rows follow as siblings and supply the
    /// new terminator.
    pub fn append(&mut self, other: Rendered) {
        let Rendered { tokens, children } = other;
        if children.is_empty() {
            self.extend(tokens);
            return;
        }
        if !self.is_expanded() {
            self.tokens.extend(tokens);
            self.children = children;
            return;
        }
        self.open_tail();
        if let Some(tail) = self.children.last_mut() {
            tail.tokens.extend(tokens);
        }
        self.children.extend(children);
    }

    /// Drop the terminator from the tail line so the row can be continued
    pub(crate) fn open_tail(&mut self) {
        if let Some(tail) = self.children.last_mut() {
            if tail.ends_with_terminator() {
                tail.tokens.pop();
            }
        }
    }

    /// Finish the current row with `terminator`. Inline results get it on the parent row;
    /// expanded results get it on the tail line, which is marked as the context end.
    pub fn terminate(&mut self, terminator: Token) {
        match self.children.last_mut() {
            None => {
                if !self.tokens.last().is_some_and(Token::is_terminator) {
                    self.tokens.push(terminator);
                }
            }
            Some(tail) => {
                if !tail.ends_with_terminator() {
                    tail.tokens.push(terminator);
                }
                tail.is_context_end_line = true;
            }
        }
    }

    /// Iterate all token values in reading order
    pub fn values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.tokens.iter().map(|t| t.value.as_str()).collect();
        collect_values(&self.children, &mut values);
        values
    }
}

fn collect_values<'a>(lines: &'a [Line], out: &mut Vec<&'a str>) {
    for line in lines {
        out.extend(line.tokens.iter().map(|t| t.value.as_str()));
        collect_values(&line.children, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punct(value: &str) -> Token {
        Token {
            kind: TokenKind::Punctuation,
            value: value.to_string(),
            has_prefix_space: false,
            has_suffix_space: false,
            navigate_to_id: None,
            navigation_display_name: None,
            render_classes: Vec::new(),
            is_deprecated: false,
        }
    }

    fn block(member: &str) -> Rendered {
        Rendered {
            tokens: vec![punct("{")],
            children: vec![
                Line::new(vec![punct(member)]),
                Line::context_end(vec![punct("}"), punct(";")]),
            ],
        }
    }

    #[test]
    fn test_push_inline_goes_to_parent_row() {
        let mut rendered = Rendered::new();
        rendered.push(punct("a"));
        rendered.push(punct("b"));
        assert_eq!(rendered.values(), vec!["a", "b"]);
        assert!(!rendered.is_expanded());
    }

    #[test]
    fn test_push_expanded_lands_before_terminator() {
        let mut rendered = block("x");
        rendered.push(punct("["));
        rendered.push(punct("]"));
        let tail = rendered.children.last().unwrap();
        let values: Vec<_> = tail.tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["}", "[", "]", ";"]);
        assert!(tail.is_context_end_line);
    }

    #[test]
    fn test_append_two_expanded_continues_tail() {
        let mut rendered = block("x");
        rendered.push(punct(","));
        rendered.append(block("y"));
        assert_eq!(rendered.children.len(), 4);
        let joined: Vec<_> = rendered.children[1]
            .tokens
            .iter()
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(joined, vec!["}", ",", "{"]);
        assert!(rendered.children[3].tokens.last().unwrap().is_terminator());
    }

    #[test]
    fn test_terminate_inline_and_expanded() {
        let mut inline = Rendered::from_tokens(vec![punct("a")]);
        inline.terminate(punct(";"));
        inline.terminate(punct(";"));
        assert_eq!(inline.values(), vec!["a", ";"]);

        let mut expanded = block("x");
        expanded.terminate(punct(";"));
        assert_eq!(expanded.values(), vec!["{", "x", "}", ";"]);
    }

    #[test]
    fn test_token_kind_serializes_as_code() {
        let json = serde_json::to_string(&punct(";")).unwrap();
        assert!(json.contains("\"Kind\":1"));
        assert!(json.contains("\"Value\":\";\""));
        assert!(!json.contains("NavigateToId"));
        assert!(!json.contains("IsDeprecated"));

        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, punct(";"));
        assert!(serde_json::from_str::<Token>(r#"{"Kind":9,"Value":"x"}"#).is_err());
    }

    #[test]
    fn test_line_omits_empty_optional_fields() {
        let json = serde_json::to_string(&Line::new(vec![punct("a")])).unwrap();
        assert!(!json.contains("Children"));
        assert!(!json.contains("IsContextEndLine"));

        let json = serde_json::to_string(&Line::context_end(vec![punct("}")])).unwrap();
        assert!(json.contains("\"IsContextEndLine\":true"));
    }
}
