//! @dose
//! purpose: Declaration generators. Each generator checks that a declaration is of its kind
//!     and renders it into a top-level Rendered row; a static registry picks the generator.
//!
//! when-editing:
//!     - !When adding a generator, register it in GENERATORS
//!     - !is_valid is a kind check only; generate() rejects other kinds with
//!       UnsupportedDeclarationKind
//!
//! invariants:
//!     - Every DeclarationKind has exactly one registered generator
//!     - Generators hold no state; the registry is shared freely across threads
//!
//! do-not:
//!     - Never catch or retry UnsupportedDeclarationKind; it signals a caller bug
//!
//! gotchas:
//!     - Generators render at depth 0; nested rows come from literal types only
//!     - NoGenerator is unreachable while every kind is registered; it only guards a new
//!       DeclarationKind added without a generator
//!
//! flows:
//!     - generate_declaration: find first generator whose is_valid accepts -> generate
//!     - render_declaration: same, wrapped into a serializable RenderedDeclaration

mod member;
mod namespace;
mod signature;

use crate::builder::{ReferenceMap, RenderContext};
use crate::types::{Declaration, DeclarationKind, Rendered, RenderedDeclaration};
use thiserror::Error;

pub use member::{IndexSignatureGenerator, PropertyGenerator};
pub use namespace::{NamespaceGenerator, TypeAliasGenerator};
pub use signature::{
    CallSignatureGenerator, ConstructSignatureGenerator, FunctionGenerator, MethodGenerator,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("Unsupported declaration kind for '{display_name}': expected {expected}, got {actual}")]
    UnsupportedDeclarationKind {
        display_name: String,
        expected: DeclarationKind,
        actual: DeclarationKind,
    },
    #[error("No generator registered for '{display_name}' ({kind})")]
    NoGenerator {
        display_name: String,
        kind: DeclarationKind,
    },
}

impl DeclarationError {
    pub(crate) fn unsupported(item: &Declaration, expected: DeclarationKind) -> Self {
        DeclarationError::UnsupportedDeclarationKind {
            display_name: item.display_name.clone(),
            expected,
            actual: item.kind(),
        }
    }
}

/// Kind-specific renderer for one top-level declaration
pub trait DeclarationGenerator: Send + Sync {
    /// The declaration kind this generator renders
    fn kind(&self) -> DeclarationKind;

    /// Kind check only
    fn is_valid(&self, item: &Declaration) -> bool {
        item.kind() == self.kind()
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError>;
}

static GENERATORS: &[&dyn DeclarationGenerator] = &[
    &CallSignatureGenerator,
    &ConstructSignatureGenerator,
    &IndexSignatureGenerator,
    &NamespaceGenerator,
    &PropertyGenerator,
    &MethodGenerator,
    &FunctionGenerator,
    &TypeAliasGenerator,
];

/// All registered generators, in selection order
#[cfg(test)]
fn generators() -> &'static [&'static dyn DeclarationGenerator] {
    GENERATORS
}

/// First generator that accepts the declaration
pub fn find_generator(item: &Declaration) -> Option<&'static dyn DeclarationGenerator> {
    GENERATORS.iter().copied().find(|g| g.is_valid(item))
}

/// Render a declaration with the generator registered for its kind
pub fn generate_declaration(
    item: &Declaration,
    ctx: RenderContext<'_>,
) -> Result<Rendered, DeclarationError> {
    let generator = find_generator(item).ok_or_else(|| DeclarationError::NoGenerator {
        display_name: item.display_name.clone(),
        kind: item.kind(),
    })?;
    generator.generate(item, ctx)
}

/// Render a declaration into its serializable output form
pub fn render_declaration(
    item: &Declaration,
    references: Option<&ReferenceMap>,
    deprecated: bool,
) -> Result<RenderedDeclaration, DeclarationError> {
    let rendered = generate_declaration(item, RenderContext::new(references, deprecated))?;
    Ok(RenderedDeclaration {
        display_name: item.display_name.clone(),
        kind: item.kind(),
        navigate_to_id: item.canonical_reference.clone(),
        tokens: rendered.tokens,
        children: rendered.children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclarationBody, PropertySignature, TypeExpr};
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_one_generator() {
        let kinds: HashSet<_> = generators().iter().map(|g| g.kind()).collect();
        assert_eq!(kinds.len(), generators().len());
        assert_eq!(kinds.len(), 8);
    }

    #[test]
    fn test_no_generator_message_names_the_item() {
        let err = DeclarationError::NoGenerator {
            display_name: "Widget.render".to_string(),
            kind: DeclarationKind::Method,
        };
        assert_eq!(
            err.to_string(),
            "No generator registered for 'Widget.render' (Method)"
        );
    }

    #[test]
    fn test_generate_declaration_dispatches_by_kind() {
        let item = Declaration::new(
            "Config.name",
            DeclarationBody::Property(PropertySignature::new(
                "name",
                TypeExpr::primitive("string"),
            )),
        );
        let generator = find_generator(&item).unwrap();
        assert_eq!(generator.kind(), DeclarationKind::Property);

        let out = generate_declaration(&item, RenderContext::default()).unwrap();
        assert_eq!(out.values(), vec!["name", ":", "string", ";"]);
    }

    #[test]
    fn test_wrong_generator_is_contract_violation() {
        let item = Declaration::new(
            "Config.name",
            DeclarationBody::Property(PropertySignature::new(
                "name",
                TypeExpr::primitive("string"),
            )),
        );
        assert!(!NamespaceGenerator.is_valid(&item));
        let err = NamespaceGenerator
            .generate(&item, RenderContext::default())
            .unwrap_err();
        assert_eq!(
            err,
            DeclarationError::UnsupportedDeclarationKind {
                display_name: "Config.name".to_string(),
                expected: DeclarationKind::Namespace,
                actual: DeclarationKind::Property,
            }
        );
        let message = err.to_string();
        assert!(message.contains("Config.name"));
        assert!(message.contains("Namespace"));
        assert!(message.contains("Property"));
    }

    #[test]
    fn test_render_declaration_carries_metadata() {
        let mut item = Declaration::new(
            "Config.name",
            DeclarationBody::Property(PropertySignature::new(
                "name",
                TypeExpr::primitive("string"),
            )),
        );
        item.canonical_reference = Some("pkg!Config#name".to_string());
        let rendered = render_declaration(&item, None, true).unwrap();
        assert_eq!(rendered.kind, DeclarationKind::Property);
        assert_eq!(rendered.navigate_to_id.as_deref(), Some("pkg!Config#name"));
        assert!(rendered.tokens.iter().all(|t| t.is_deprecated));
    }
}
