//! @dose
//! purpose: Generators for property and index-signature declarations. Both delegate to the
//!     builder's member renderer.
//!
//! invariants:
//!     - The property name is the first token (after modifiers); no indentation at top level

use crate::builder::member::{render_index_signature, render_property};
use crate::builder::RenderContext;
use crate::generators::{DeclarationError, DeclarationGenerator};
use crate::types::{Declaration, DeclarationBody, DeclarationKind, Rendered};

/// `[static] [readonly] name[?]: type;` and get/set accessors
pub struct PropertyGenerator;

impl DeclarationGenerator for PropertyGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Property
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::Property(property) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = render_property(property, 0, &ctx);
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}

/// `[readonly] [name: type]: returnType;`
pub struct IndexSignatureGenerator;

impl DeclarationGenerator for IndexSignatureGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::IndexSignature
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::IndexSignature(index) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = render_index_signature(index, 0, &ctx);
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}
