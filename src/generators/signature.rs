//! @dose
//! purpose: Generators for callable declarations: call signatures, construct signatures,
//!     methods and top-level functions.
//!
//! when-editing:
//!     - Construct signatures always carry "new", whatever the payload's flag says
//!
//! invariants:
//!     - Output ends with ";" (on the parent row or the last nested closing row)

use crate::builder::member::{render_method, render_signature};
use crate::builder::RenderContext;
use crate::generators::{DeclarationError, DeclarationGenerator};
use crate::types::{Declaration, DeclarationBody, DeclarationKind, Rendered};

/// `<T>(params): R;`
pub struct CallSignatureGenerator;

impl DeclarationGenerator for CallSignatureGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::CallSignature
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::CallSignature(signature) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = render_signature(false, signature, 0, &ctx);
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}

/// `new <T>(params): R;`
pub struct ConstructSignatureGenerator;

impl DeclarationGenerator for ConstructSignatureGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::ConstructSignature
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::ConstructSignature(signature) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = render_signature(true, signature, 0, &ctx);
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}

/// `[static] name[?]<T>(params): R;`
pub struct MethodGenerator;

impl DeclarationGenerator for MethodGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Method
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::Method(method) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = render_method(method, 0, &ctx);
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}

/// `function name<T>(params): R;`
pub struct FunctionGenerator;

impl DeclarationGenerator for FunctionGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Function
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::Function(function) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = Rendered::from_tokens(vec![ctx.keyword("function")]);
        out.append(render_method(function, 0, &ctx));
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}
