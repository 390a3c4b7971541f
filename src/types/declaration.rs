//! @dose
//! purpose: Declaration items handed to the generators, one per API member the discovery step
//!     found, plus the serialized per-declaration output.
//!
//! when-editing:
//!     - !DeclarationKind must list every DeclarationBody variant
//!     - display_name is the qualified name used in error messages and output
//!
//! invariants:
//!     - canonical_reference, when present, is the id other tokens navigate to
//!
//! gotchas:
//!     - Namespace bodies carry no members; their contents are separate declarations

use crate::types::expr::{
    CallSignature, IndexSignature, MethodSignature, PropertySignature, TypeExpr, TypeParameter,
};
use crate::types::token::{Line, Token};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One top-level declaration to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Qualified display name, e.g. "Shapes.Circle.radius"
    pub display_name: String,
    /// Canonical reference id of this declaration
    pub canonical_reference: Option<String>,
    pub body: DeclarationBody,
}

impl Declaration {
    pub fn new(display_name: impl Into<String>, body: DeclarationBody) -> Self {
        Self {
            display_name: display_name.into(),
            canonical_reference: None,
            body,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        self.body.kind()
    }
}

/// `type Name<T> = ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasDeclaration {
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub value: TypeExpr,
}

/// Kind-specific payload of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationBody {
    CallSignature(CallSignature),
    ConstructSignature(CallSignature),
    IndexSignature(IndexSignature),
    Namespace { name: String },
    Property(PropertySignature),
    Method(MethodSignature),
    Function(MethodSignature),
    TypeAlias(TypeAliasDeclaration),
}

impl DeclarationBody {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            DeclarationBody::CallSignature(_) => DeclarationKind::CallSignature,
            DeclarationBody::ConstructSignature(_) => DeclarationKind::ConstructSignature,
            DeclarationBody::IndexSignature(_) => DeclarationKind::IndexSignature,
            DeclarationBody::Namespace { .. } => DeclarationKind::Namespace,
            DeclarationBody::Property(_) => DeclarationKind::Property,
            DeclarationBody::Method(_) => DeclarationKind::Method,
            DeclarationBody::Function(_) => DeclarationKind::Function,
            DeclarationBody::TypeAlias(_) => DeclarationKind::TypeAlias,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    CallSignature,
    ConstructSignature,
    IndexSignature,
    Namespace,
    Property,
    Method,
    Function,
    TypeAlias,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclarationKind::CallSignature => "CallSignature",
            DeclarationKind::ConstructSignature => "ConstructSignature",
            DeclarationKind::IndexSignature => "IndexSignature",
            DeclarationKind::Namespace => "Namespace",
            DeclarationKind::Property => "Property",
            DeclarationKind::Method => "Method",
            DeclarationKind::Function => "Function",
            DeclarationKind::TypeAlias => "TypeAlias",
        };
        f.write_str(name)
    }
}

/// Rendered output for one declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderedDeclaration {
    pub display_name: String,
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_id: Option<String>,
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Line>,
}

/// Rendered output for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderedFile {
    pub path: String,
    pub declarations: Vec<RenderedDeclaration>,
}
