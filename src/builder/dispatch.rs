//! @dose
//! purpose: Type-expression dispatcher. Recursively renders a TypeExpr into tokens for the
//!     current row plus nested rows, choosing inline or expanded layout from the shape alone.
//!
//! when-editing:
//!     - !The match in render() is exhaustive; a new TypeExpr variant must be handled here
//!     - !Only object literals create child rows; everything else inlines or splices into them
//!     - Unions and intersections with a direct object-literal part go through composite.rs
//!
//! invariants:
//!     - Output depends only on the expression, depth and context; never on source whitespace
//!     - Member rows sit at depth + 1; the closing row of a literal sits at depth
//!     - Every expanded result ends with a context-end row terminated by ";"
//!
//! do-not:
//!     - Never push onto Rendered.tokens directly after an append; use push() so tokens
//!       following an expanded block land in its closing row
//!
//! gotchas:
//!     - Array element unions/functions/conditionals are parenthesized to keep "[]" binding
//!       to the whole element
//!
//! flows:
//!     - ObjectLiteral: "{" on the current row, members as indented rows, " };" closing row
//!     - Composite: inline with " | " when no part contains a literal, merge_composite when
//!       a part is a literal, else append parts so nested literals splice their rows
//!     - Primitive: lexer::tokenize with reference navigation

use crate::builder::composite::merge_composite;
use crate::builder::lexer;
use crate::builder::member::render_member;
use crate::builder::token::{RenderContext, TokenOptions, CLOSING_BRACE_PAD};
use crate::types::{
    FunctionType, Line, Member, Parameter, Rendered, Token, TokenKind, TypeExpr, TypeParameter,
};

/// Render a type expression at the given nesting depth
pub fn render(expr: &TypeExpr, depth: usize, ctx: &RenderContext<'_>) -> Rendered {
    match expr {
        TypeExpr::ObjectLiteral { members } => render_object_literal(members, depth, ctx),
        TypeExpr::Union(parts) => render_composite(parts, "|", depth, ctx),
        TypeExpr::Intersection(parts) => render_composite(parts, "&", depth, ctx),
        TypeExpr::Parenthesized(inner) => {
            let mut out = Rendered::from_tokens(vec![ctx.punct("(")]);
            out.append(render(inner, depth, ctx));
            out.push(ctx.punct(")"));
            out
        }
        TypeExpr::Array(element) => render_array(element, depth, ctx),
        TypeExpr::Reference {
            name,
            type_arguments,
        } => {
            let mut out = Rendered::from_tokens(vec![ctx.type_name(name)]);
            append_type_arguments(&mut out, type_arguments, depth, ctx);
            out
        }
        TypeExpr::Function(function) => render_function(function, depth, ctx),
        TypeExpr::Conditional {
            check,
            extends,
            true_type,
            false_type,
        } => {
            let mut out = render(check, depth, ctx);
            out.push(ctx.keyword_spaced("extends"));
            out.append(render(extends, depth, ctx));
            out.push(ctx.punct_spaced("?"));
            out.append(render(true_type, depth, ctx));
            out.push(ctx.punct_spaced(":"));
            out.append(render(false_type, depth, ctx));
            out
        }
        TypeExpr::Infer { name, constraint } => {
            let mut out = Rendered::from_tokens(vec![
                ctx.keyword("infer"),
                ctx.token(TokenKind::TypeName, name.as_str(), TokenOptions::default()),
            ]);
            if let Some(constraint) = constraint {
                out.push(ctx.keyword_spaced("extends"));
                out.append(render(constraint, depth, ctx));
            }
            out
        }
        TypeExpr::ImportQualified {
            module_path,
            qualifier,
            type_arguments,
        } => {
            let mut out = Rendered::from_tokens(vec![
                ctx.token(TokenKind::Keyword, "import", TokenOptions::default()),
                ctx.punct("("),
                ctx.token(
                    TokenKind::StringLiteral,
                    format!("\"{}\"", module_path),
                    TokenOptions::default(),
                ),
                ctx.punct(")"),
            ]);
            if let Some(qualifier) = qualifier {
                out.push(ctx.punct("."));
                out.push(ctx.type_name(qualifier));
            }
            append_type_arguments(&mut out, type_arguments, depth, ctx);
            out
        }
        TypeExpr::Primitive(text) => Rendered::from_tokens(lexer::tokenize(text, ctx)),
    }
}

fn render_object_literal(members: &[Member], depth: usize, ctx: &RenderContext<'_>) -> Rendered {
    let mut out = Rendered::from_tokens(vec![ctx.punct("{")]);
    out.children = member_lines(members, depth + 1, ctx);
    out.children.push(closing_line(depth, ctx));
    out
}

fn render_composite(
    parts: &[TypeExpr],
    separator: &str,
    depth: usize,
    ctx: &RenderContext<'_>,
) -> Rendered {
    if !parts.iter().any(TypeExpr::contains_object_literal) {
        // Every part renders to one row
        let mut out = Rendered::new();
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                out.tokens.push(ctx.punct_spaced(separator));
            }
            out.tokens.extend(render(part, depth, ctx).tokens);
        }
        return out;
    }
    if let Some(merged) = merge_composite(parts, separator, depth, ctx) {
        return merged;
    }
    // A literal nested in a part (e.g. Promise<{..}>) expands through append
    let mut out = Rendered::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            out.push(ctx.punct_spaced(separator));
        }
        out.append(render(part, depth, ctx));
    }
    out
}

fn render_array(element: &TypeExpr, depth: usize, ctx: &RenderContext<'_>) -> Rendered {
    let needs_parens = matches!(
        element,
        TypeExpr::Union(_)
            | TypeExpr::Intersection(_)
            | TypeExpr::Function(_)
            | TypeExpr::Conditional { .. }
    );
    let mut out = if needs_parens {
        let mut out = Rendered::from_tokens(vec![ctx.punct("(")]);
        out.append(render(element, depth, ctx));
        out.push(ctx.punct(")"));
        out
    } else {
        render(element, depth, ctx)
    };
    out.push(ctx.punct("["));
    out.push(ctx.punct("]"));
    out
}

fn render_function(function: &FunctionType, depth: usize, ctx: &RenderContext<'_>) -> Rendered {
    let mut out = Rendered::new();
    if function.is_constructor {
        out.push(ctx.keyword("new"));
    }
    append_type_parameters(&mut out, &function.type_parameters, depth, ctx);
    append_parameters(&mut out, &function.parameters, depth, ctx);
    out.push(ctx.punct_spaced("=>"));
    match &function.return_type {
        Some(return_type) => out.append(render(return_type, depth, ctx)),
        None => out.push(ctx.keyword("void")),
    }
    out
}

/// Member rows for an object literal body at `level`
pub(crate) fn member_lines(members: &[Member], level: usize, ctx: &RenderContext<'_>) -> Vec<Line> {
    members
        .iter()
        .map(|member| {
            let rendered = render_member(member, level, ctx);
            let mut tokens: Vec<Token> = ctx.indent(level).into_iter().collect();
            tokens.extend(rendered.tokens);
            Line {
                tokens,
                children: rendered.children,
                is_context_end_line: false,
            }
        })
        .collect()
}

/// Leading tokens of a row that closes a literal block: indentation, fixed pad, "}"
pub(crate) fn closing_prefix(depth: usize, ctx: &RenderContext<'_>) -> Vec<Token> {
    let mut tokens: Vec<Token> = ctx.indent(depth).into_iter().collect();
    tokens.push(ctx.text(CLOSING_BRACE_PAD));
    tokens.push(ctx.punct("}"));
    tokens
}

/// The " };" row that ends a literal block
pub(crate) fn closing_line(depth: usize, ctx: &RenderContext<'_>) -> Line {
    let mut tokens = closing_prefix(depth, ctx);
    tokens.push(ctx.punct(";"));
    Line::context_end(tokens)
}

/// `<A, B>`; literal arguments keep their rows on the outer result
pub(crate) fn append_type_arguments(
    out: &mut Rendered,
    arguments: &[TypeExpr],
    depth: usize,
    ctx: &RenderContext<'_>,
) {
    if arguments.is_empty() {
        return;
    }
    out.push(ctx.punct("<"));
    for (index, argument) in arguments.iter().enumerate() {
        if index > 0 {
            out.push(ctx.punct_suffix(","));
        }
        out.append(render(argument, depth, ctx));
    }
    out.push(ctx.punct(">"));
}

/// `<T extends C = D, U>`
pub(crate) fn append_type_parameters(
    out: &mut Rendered,
    parameters: &[TypeParameter],
    depth: usize,
    ctx: &RenderContext<'_>,
) {
    if parameters.is_empty() {
        return;
    }
    out.push(ctx.punct("<"));
    for (index, parameter) in parameters.iter().enumerate() {
        if index > 0 {
            out.push(ctx.punct_suffix(","));
        }
        out.push(ctx.token(
            TokenKind::TypeName,
            parameter.name.as_str(),
            TokenOptions::default(),
        ));
        if let Some(constraint) = &parameter.constraint {
            out.push(ctx.keyword_spaced("extends"));
            out.append(render(constraint, depth, ctx));
        }
        if let Some(default) = &parameter.default {
            out.push(ctx.punct_spaced("="));
            out.append(render(default, depth, ctx));
        }
    }
    out.push(ctx.punct(">"));
}

/// `(a: A, b?: B, ...rest: C[])`
pub(crate) fn append_parameters(
    out: &mut Rendered,
    parameters: &[Parameter],
    depth: usize,
    ctx: &RenderContext<'_>,
) {
    out.push(ctx.punct("("));
    for (index, parameter) in parameters.iter().enumerate() {
        if index > 0 {
            out.push(ctx.punct_suffix(","));
        }
        if parameter.is_rest {
            out.push(ctx.punct("..."));
        }
        out.push(ctx.text(parameter.name.as_str()));
        if parameter.is_optional {
            out.push(ctx.punct("?"));
        }
        if let Some(type_annotation) = &parameter.type_annotation {
            out.push(ctx.punct_suffix(":"));
            out.append(render(type_annotation, depth, ctx));
        }
    }
    out.push(ctx.punct(")"));
}
