//! @dose
//! purpose: Token factory. Every token the builder emits is created here so spacing defaults,
//!     deprecation propagation and navigation lookup behave the same everywhere.
//!
//! when-editing:
//!     - !Spacing flags default to false; callers opt in per token
//!     - !Indentation is INDENT_WIDTH spaces per nesting level and nothing else
//!     - CLOSING_BRACE_PAD is a fixed literal, not derived from the depth
//!
//! invariants:
//!     - create_token never fails and accepts any string value
//!     - Every token made through a RenderContext carries the context's deprecated flag
//!
//! do-not:
//!     - Never fold CLOSING_BRACE_PAD into the indentation width; review history diffs on it
//!
//! gotchas:
//!     - indent(0) is an empty string, so depth-0 rows get no indentation token

use crate::builder::reference::ReferenceMap;
use crate::types::{Token, TokenKind};

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 4;

/// Literal pad placed before the closing brace of a nested block
pub const CLOSING_BRACE_PAD: &str = " ";

/// Optional token attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenOptions {
    pub has_prefix_space: bool,
    pub has_suffix_space: bool,
    pub navigate_to_id: Option<String>,
    pub navigation_display_name: Option<String>,
    pub render_classes: Vec<String>,
    pub deprecated: bool,
}

impl TokenOptions {
    pub fn prefix_space(mut self) -> Self {
        self.has_prefix_space = true;
        self
    }

    pub fn suffix_space(mut self) -> Self {
        self.has_suffix_space = true;
        self
    }

    pub fn spaced(self) -> Self {
        self.prefix_space().suffix_space()
    }

    pub fn navigate_to(mut self, id: Option<String>) -> Self {
        self.navigate_to_id = id;
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.navigation_display_name = Some(name.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

/// Create a display token
pub fn create_token(kind: TokenKind, value: impl Into<String>, options: TokenOptions) -> Token {
    Token {
        kind,
        value: value.into(),
        has_prefix_space: options.has_prefix_space,
        has_suffix_space: options.has_suffix_space,
        navigate_to_id: options.navigate_to_id,
        navigation_display_name: options.navigation_display_name,
        render_classes: options.render_classes,
        is_deprecated: options.deprecated,
    }
}

/// Indentation text for a nesting level
pub fn indent(level: usize) -> String {
    " ".repeat(level * INDENT_WIDTH)
}

/// Per-declaration rendering inputs: the read-only reference map and the deprecated flag
/// inherited from the owning declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    pub references: Option<&'a ReferenceMap>,
    pub deprecated: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(references: Option<&'a ReferenceMap>, deprecated: bool) -> Self {
        Self {
            references,
            deprecated,
        }
    }

    pub fn token(&self, kind: TokenKind, value: impl Into<String>, options: TokenOptions) -> Token {
        create_token(kind, value, options.deprecated(self.deprecated))
    }

    /// Canonical id for a resolved type name
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.references
            .and_then(|map| map.lookup(name))
            .map(str::to_string)
    }

    pub fn punct(&self, value: &str) -> Token {
        self.token(TokenKind::Punctuation, value, TokenOptions::default())
    }

    pub fn punct_spaced(&self, value: &str) -> Token {
        self.token(
            TokenKind::Punctuation,
            value,
            TokenOptions::default().spaced(),
        )
    }

    pub fn punct_suffix(&self, value: &str) -> Token {
        self.token(
            TokenKind::Punctuation,
            value,
            TokenOptions::default().suffix_space(),
        )
    }

    pub fn keyword(&self, value: &str) -> Token {
        self.token(
            TokenKind::Keyword,
            value,
            TokenOptions::default().suffix_space(),
        )
    }

    pub fn keyword_spaced(&self, value: &str) -> Token {
        self.token(TokenKind::Keyword, value, TokenOptions::default().spaced())
    }

    pub fn text(&self, value: impl Into<String>) -> Token {
        self.token(TokenKind::Text, value, TokenOptions::default())
    }

    pub fn member_name(&self, value: &str) -> Token {
        self.token(TokenKind::MemberName, value, TokenOptions::default())
    }

    /// Type name token, navigable when the name is in the reference map
    pub fn type_name(&self, value: &str) -> Token {
        let id = self.lookup(value);
        self.token(
            TokenKind::TypeName,
            value,
            TokenOptions::default().navigate_to(id),
        )
    }

    /// Leading indentation for a child row, or None at depth 0
    pub fn indent(&self, level: usize) -> Option<Token> {
        if level == 0 {
            None
        } else {
            Some(self.text(indent(level)))
        }
    }
}
