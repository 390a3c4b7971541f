//! @dose
//! purpose: Renders one structural member (property, accessor, index signature, method or
//!     call/construct signature) with its modifiers, delegating type positions to dispatch.
//!
//! when-editing:
//!     - !Modifier order is static, then readonly, then the accessor keyword
//!     - !render_member terminates the row; the render_* helpers do not, so declaration
//!       generators can reuse them
//!
//! invariants:
//!     - A member whose type expanded gets its ";" from the nested closing row, never twice
//!     - Member names are MemberName tokens; parameter names are Text tokens
//!
//! gotchas:
//!     - Setters render their parameter inside the parens and have no return type
//!     - A property without a type annotation renders as just its name

use crate::builder::dispatch::{append_parameters, append_type_parameters, render};
use crate::builder::token::RenderContext;
use crate::types::{
    Accessor, CallSignature, IndexSignature, Member, MethodSignature, Parameter, PropertySignature,
    Rendered, TypeExpr, TypeParameter,
};

/// Render a member as one terminated row (plus nested rows when its type expands)
pub fn render_member(member: &Member, depth: usize, ctx: &RenderContext<'_>) -> Rendered {
    let mut out = match member {
        Member::Property(property) => render_property(property, depth, ctx),
        Member::Index(index) => render_index_signature(index, depth, ctx),
        Member::Method(method) => render_method(method, depth, ctx),
        Member::CallSignature(signature) => {
            render_signature(signature.is_construct, signature, depth, ctx)
        }
    };
    out.terminate(ctx.punct(";"));
    out
}

pub fn render_property(
    property: &PropertySignature,
    depth: usize,
    ctx: &RenderContext<'_>,
) -> Rendered {
    let mut out = Rendered::new();
    if property.is_static {
        out.push(ctx.keyword("static"));
    }
    if property.is_readonly {
        out.push(ctx.keyword("readonly"));
    }

    match &property.accessor {
        Some(Accessor::Get) => {
            out.push(ctx.keyword("get"));
            out.push(ctx.member_name(&property.name));
            out.push(ctx.punct("("));
            out.push(ctx.punct(")"));
            append_annotation(&mut out, property.type_annotation.as_ref(), depth, ctx);
        }
        Some(Accessor::Set { parameter }) => {
            out.push(ctx.keyword("set"));
            out.push(ctx.member_name(&property.name));
            out.push(ctx.punct("("));
            out.push(ctx.text(parameter.as_str()));
            append_annotation(&mut out, property.type_annotation.as_ref(), depth, ctx);
            out.push(ctx.punct(")"));
        }
        None => {
            out.push(ctx.member_name(&property.name));
            if property.is_optional {
                out.push(ctx.punct("?"));
            }
            append_annotation(&mut out, property.type_annotation.as_ref(), depth, ctx);
        }
    }
    out
}

pub fn render_index_signature(
    index: &IndexSignature,
    depth: usize,
    ctx: &RenderContext<'_>,
) -> Rendered {
    let mut out = Rendered::new();
    if index.is_static {
        out.push(ctx.keyword("static"));
    }
    if index.is_readonly {
        out.push(ctx.keyword("readonly"));
    }
    out.push(ctx.punct("["));
    for (position, parameter) in index.parameters.iter().enumerate() {
        if position > 0 {
            out.push(ctx.punct_suffix(","));
        }
        out.push(ctx.text(parameter.name.as_str()));
        append_annotation(&mut out, parameter.type_annotation.as_ref(), depth, ctx);
    }
    out.push(ctx.punct("]"));
    append_annotation(&mut out, Some(&index.return_type), depth, ctx);
    out
}

pub fn render_method(method: &MethodSignature, depth: usize, ctx: &RenderContext<'_>) -> Rendered {
    let mut out = Rendered::new();
    if method.is_static {
        out.push(ctx.keyword("static"));
    }
    out.push(ctx.member_name(&method.name));
    if method.is_optional {
        out.push(ctx.punct("?"));
    }
    append_callable(
        &mut out,
        &method.type_parameters,
        &method.parameters,
        method.return_type.as_ref(),
        depth,
        ctx,
    );
    out
}

/// `<T>(params): R`, prefixed with `new` for construct signatures
pub fn render_signature(
    construct: bool,
    signature: &CallSignature,
    depth: usize,
    ctx: &RenderContext<'_>,
) -> Rendered {
    let mut out = Rendered::new();
    if construct {
        out.push(ctx.keyword("new"));
    }
    append_callable(
        &mut out,
        &signature.type_parameters,
        &signature.parameters,
        signature.return_type.as_ref(),
        depth,
        ctx,
    );
    out
}

fn append_callable(
    out: &mut Rendered,
    type_parameters: &[TypeParameter],
    parameters: &[Parameter],
    return_type: Option<&TypeExpr>,
    depth: usize,
    ctx: &RenderContext<'_>,
) {
    append_type_parameters(out, type_parameters, depth, ctx);
    append_parameters(out, parameters, depth, ctx);
    append_annotation(out, return_type, depth, ctx);
}

fn append_annotation(
    out: &mut Rendered,
    annotation: Option<&TypeExpr>,
    depth: usize,
    ctx: &RenderContext<'_>,
) {
    if let Some(annotation) = annotation {
        out.push(ctx.punct_suffix(":"));
        out.append(render(annotation, depth, ctx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenKind;

    fn literal(name: &str, ty: &str) -> TypeExpr {
        TypeExpr::object(vec![Member::Property(PropertySignature::new(
            name,
            TypeExpr::primitive(ty),
        ))])
    }

    #[test]
    fn test_property_modifiers() {
        let ctx = RenderContext::default();
        let property = PropertySignature {
            is_optional: true,
            is_readonly: true,
            is_static: true,
            ..PropertySignature::new("count", TypeExpr::primitive("number"))
        };
        let out = render_member(&Member::Property(property), 0, &ctx);
        assert_eq!(
            out.values(),
            vec!["static", "readonly", "count", "?", ":", "number", ";"]
        );
        assert_eq!(out.tokens[2].kind, TokenKind::MemberName);
    }

    #[test]
    fn test_getter_and_setter() {
        let ctx = RenderContext::default();
        let getter = PropertySignature {
            accessor: Accessor::detect("get "),
            ..PropertySignature::new("size", TypeExpr::primitive("number"))
        };
        assert_eq!(
            render_member(&Member::Property(getter), 0, &ctx).values(),
            vec!["get", "size", "(", ")", ":", "number", ";"]
        );

        let setter = PropertySignature {
            accessor: Accessor::detect("set "),
            ..PropertySignature::new("size", TypeExpr::primitive("number"))
        };
        assert_eq!(
            render_member(&Member::Property(setter), 0, &ctx).values(),
            vec!["set", "size", "(", "value", ":", "number", ")", ";"]
        );
    }

    #[test]
    fn test_readonly_index_signature() {
        let ctx = RenderContext::default();
        let index = IndexSignature {
            is_readonly: true,
            is_static: false,
            parameters: vec![Parameter::new("key", TypeExpr::primitive("string"))],
            return_type: TypeExpr::primitive("any"),
        };
        let out = render_member(&Member::Index(index), 0, &ctx);
        assert_eq!(
            out.values(),
            vec!["readonly", "[", "key", ":", "string", "]", ":", "any", ";"]
        );
    }

    #[test]
    fn test_generic_method() {
        let ctx = RenderContext::default();
        let method = MethodSignature {
            name: "find".to_string(),
            is_optional: true,
            is_static: false,
            type_parameters: vec![TypeParameter::new("T")],
            parameters: vec![
                Parameter::new("id", TypeExpr::primitive("string")),
                Parameter::new("options", TypeExpr::reference("Options")).optional(),
            ],
            return_type: Some(TypeExpr::generic(
                "Promise",
                vec![TypeExpr::reference("T")],
            )),
        };
        let out = render_member(&Member::Method(method), 0, &ctx);
        assert_eq!(
            out.values(),
            vec![
                "find", "?", "<", "T", ">", "(", "id", ":", "string", ",", "options", "?", ":",
                "Options", ")", ":", "Promise", "<", "T", ">", ";"
            ]
        );
    }

    #[test]
    fn test_construct_signature_member() {
        let ctx = RenderContext::default();
        let signature = CallSignature {
            is_construct: true,
            parameters: vec![Parameter::new("seed", TypeExpr::primitive("number"))],
            return_type: Some(TypeExpr::reference("Random")),
            ..CallSignature::default()
        };
        let out = render_member(&Member::CallSignature(signature), 0, &ctx);
        assert_eq!(
            out.values(),
            vec!["new", "(", "seed", ":", "number", ")", ":", "Random", ";"]
        );
    }

    #[test]
    fn test_literal_property_terminated_once() {
        let ctx = RenderContext::default();
        let property = PropertySignature::new("p", literal("name", "string"));
        let out = render_member(&Member::Property(property), 0, &ctx);

        let parent: Vec<_> = out.tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(parent, vec!["p", ":", "{"]);
        assert_eq!(out.values().iter().filter(|v| **v == ";").count(), 2);
        assert!(out.children.last().unwrap().is_context_end_line);
    }
}
