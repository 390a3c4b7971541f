//! @dose
//! purpose: Core data types: display tokens and lines (the output contract), type expressions
//!     and members (the input), and declaration items tying the two together.
//!
//! flows:
//!     - Front end or discovery step builds Declaration / TypeExpr values
//!     - builder and generators turn them into Rendered token trees
//!     - formatter serializes RenderedDeclaration lists

mod declaration;
mod expr;
mod token;

pub use declaration::{
    Declaration, DeclarationBody, DeclarationKind, RenderedDeclaration, RenderedFile,
    TypeAliasDeclaration,
};
pub use expr::{
    Accessor, CallSignature, FunctionType, IndexSignature, Member, MethodSignature, Parameter,
    PropertySignature, TypeExpr, TypeParameter,
};
pub use token::{Line, Rendered, Token, TokenKind};
