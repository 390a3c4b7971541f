//! @dose
//! purpose: Generators for namespace headers and type aliases, the two declarations whose own
//!     name is a navigable TypeName token.
//!
//! when-editing:
//!     - !The name token navigates to the declaration's canonical reference
//!
//! gotchas:
//!     - Namespace headers have no "{" and no terminator; members are separate declarations

use crate::builder::dispatch::{append_type_parameters, render};
use crate::builder::{RenderContext, TokenOptions};
use crate::generators::{DeclarationError, DeclarationGenerator};
use crate::types::{Declaration, DeclarationBody, DeclarationKind, Rendered, Token, TokenKind};

fn declared_name(item: &Declaration, name: &str, ctx: &RenderContext<'_>) -> Token {
    ctx.token(
        TokenKind::TypeName,
        name,
        TokenOptions::default()
            .navigate_to(item.canonical_reference.clone())
            .display_name(name),
    )
}

/// `declare namespace Name`
pub struct NamespaceGenerator;

impl DeclarationGenerator for NamespaceGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Namespace
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::Namespace { name } = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        Ok(Rendered::from_tokens(vec![
            ctx.keyword("declare"),
            ctx.keyword("namespace"),
            declared_name(item, name, &ctx),
        ]))
    }
}

/// `type Name<T> = value;`
pub struct TypeAliasGenerator;

impl DeclarationGenerator for TypeAliasGenerator {
    fn kind(&self) -> DeclarationKind {
        DeclarationKind::TypeAlias
    }

    fn generate(
        &self,
        item: &Declaration,
        ctx: RenderContext<'_>,
    ) -> Result<Rendered, DeclarationError> {
        let DeclarationBody::TypeAlias(alias) = &item.body else {
            return Err(DeclarationError::unsupported(item, self.kind()));
        };
        let mut out = Rendered::from_tokens(vec![
            ctx.keyword("type"),
            declared_name(item, &alias.name, &ctx),
        ]);
        append_type_parameters(&mut out, &alias.type_parameters, 0, &ctx);
        out.push(ctx.punct_spaced("="));
        out.append(render(&alias.value, 0, &ctx));
        out.terminate(ctx.punct(";"));
        Ok(out)
    }
}
