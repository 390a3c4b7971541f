//! @dose
//! purpose: The type-expression token/line builder. Turns TypeExpr trees and members into
//!     Rendered token trees with deterministic inline/expand decisions and navigation ids.
//!
//! when-editing:
//!     - !All rendering is pure: no I/O, no shared mutable state, safe to run in parallel
//!     - !Tokens are only created through token::create_token / RenderContext
//!
//! invariants:
//!     - Rendering the same input with the same ReferenceMap gives identical trees
//!     - Every "{" has its "}" on the same or a later row of the same result
//!
//! flows:
//!     - dispatch::render walks the expression
//!     - composite::merge_composite lays out unions/intersections with literal parts
//!     - member::render_member renders object members
//!     - lexer::tokenize handles Primitive text, consulting reference::ReferenceMap

pub mod composite;
pub mod dispatch;
pub mod lexer;
pub mod member;
pub mod reference;
pub mod token;

pub use composite::merge_composite;
pub use dispatch::render;
pub use member::render_member;
pub use reference::{build_reference_map, ReferenceMap};
pub use token::{create_token, RenderContext, TokenOptions, CLOSING_BRACE_PAD, INDENT_WIDTH};
