//! @dose
//! purpose: Layout for unions and intersections that contain at least one object literal part.
//!     Splices separators between literal and non-literal parts so the block nesting stays
//!     balanced and each (parts, separator) pair has exactly one layout.
//!
//! when-editing:
//!     - !Parts are visited strictly in declaration order
//!     - !A literal's "}" is emitted exactly once: on a "} | {" row, a "} | X" row or the
//!       final " };" row
//!     - Returns None when no part is a literal so the caller renders inline
//!
//! invariants:
//!     - The first literal opens on the parent row ("... | {")
//!     - Consecutive literals are joined by a synthetic "} sep {" row at the current depth
//!     - Every row that emits a literal's "}" is a context-end row, including "} sep {"
//!     - The last row is always a context-end row terminated by ";"
//!
//! gotchas:
//!     - A non-literal part after a literal starts a "} sep X" row; later non-literal parts
//!       continue that same row
//!     - Non-literal parts can still expand (e.g. Promise<{..}>); append() splices them

use crate::builder::dispatch::{closing_line, closing_prefix, member_lines, render};
use crate::builder::token::RenderContext;
use crate::types::{Line, Rendered, TypeExpr};

/// Merge composite parts into a multi-line layout, or None when no part is an object literal
pub fn merge_composite(
    parts: &[TypeExpr],
    separator: &str,
    depth: usize,
    ctx: &RenderContext<'_>,
) -> Option<Rendered> {
    if !parts.iter().any(TypeExpr::is_object_literal) {
        return None;
    }

    let mut out = Rendered::new();
    // A literal block is open until its "}" has been emitted
    let mut open = false;

    for (index, part) in parts.iter().enumerate() {
        let separator_token = (index > 0).then(|| ctx.punct_spaced(separator));
        match part {
            TypeExpr::ObjectLiteral { members } => {
                if !out.is_expanded() {
                    out.tokens.extend(separator_token);
                    out.tokens.push(ctx.punct("{"));
                } else if open {
                    let mut tokens = closing_prefix(depth, ctx);
                    tokens.extend(separator_token);
                    tokens.push(ctx.punct("{"));
                    out.children.push(Line::context_end(tokens));
                } else {
                    out.open_tail();
                    out.extend(separator_token);
                    out.push(ctx.punct("{"));
                }
                out.children.extend(member_lines(members, depth + 1, ctx));
                open = true;
            }
            other => {
                let rendered = render(other, depth, ctx);
                if open {
                    let mut tokens = closing_prefix(depth, ctx);
                    tokens.extend(separator_token);
                    out.children.push(Line::context_end(tokens));
                    open = false;
                } else {
                    out.open_tail();
                    out.extend(separator_token);
                }
                out.append(rendered);
            }
        }
    }

    if open {
        out.children.push(closing_line(depth, ctx));
    } else {
        out.terminate(ctx.punct(";"));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Member, PropertySignature};

    fn literal(name: &str, ty: &str) -> TypeExpr {
        TypeExpr::object(vec![Member::Property(PropertySignature::new(
            name,
            TypeExpr::primitive(ty),
        ))])
    }

    fn values(line: &Line) -> Vec<&str> {
        line.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    fn parent(out: &Rendered) -> Vec<&str> {
        out.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn test_no_literal_returns_none() {
        let ctx = RenderContext::default();
        let parts = vec![TypeExpr::primitive("string"), TypeExpr::reference("Foo")];
        assert!(merge_composite(&parts, "|", 0, &ctx).is_none());

        let wrapped = vec![TypeExpr::generic("Promise", vec![literal("a", "string")])];
        assert!(merge_composite(&wrapped, "|", 0, &ctx).is_none());
    }

    #[test]
    fn test_union_of_two_literals() {
        let ctx = RenderContext::default();
        let parts = vec![literal("a", "string"), literal("b", "number")];
        let out = merge_composite(&parts, "|", 0, &ctx).unwrap();

        assert_eq!(parent(&out), vec!["{"]);
        assert_eq!(out.children.len(), 4);
        assert_eq!(values(&out.children[0]), vec!["    ", "a", ":", "string", ";"]);
        assert_eq!(values(&out.children[1]), vec![" ", "}", "|", "{"]);
        assert!(out.children[1].is_context_end_line);
        assert_eq!(values(&out.children[2]), vec!["    ", "b", ":", "number", ";"]);
        assert!(!out.children[2].is_context_end_line);
        assert_eq!(values(&out.children[3]), vec![" ", "}", ";"]);
        assert!(out.children[3].is_context_end_line);
    }

    #[test]
    fn test_non_literal_before_literal_stays_on_parent_row() {
        let ctx = RenderContext::default();
        let parts = vec![TypeExpr::primitive("string"), literal("a", "number")];
        let out = merge_composite(&parts, "|", 0, &ctx).unwrap();

        assert_eq!(parent(&out), vec!["string", "|", "{"]);
        assert_eq!(values(out.children.last().unwrap()), vec![" ", "}", ";"]);
    }

    #[test]
    fn test_non_literals_after_literal_share_one_row() {
        let ctx = RenderContext::default();
        let parts = vec![
            literal("a", "string"),
            TypeExpr::reference("Foo"),
            TypeExpr::primitive("null"),
        ];
        let out = merge_composite(&parts, "&", 2, &ctx).unwrap();

        assert_eq!(parent(&out), vec!["{"]);
        assert_eq!(out.children.len(), 2);
        let tail = &out.children[1];
        assert_eq!(
            values(tail),
            vec!["        ", " ", "}", "&", "Foo", "&", "null", ";"]
        );
        assert!(tail.is_context_end_line);
    }

    #[test]
    fn test_literal_after_non_literal_row_reopens() {
        let ctx = RenderContext::default();
        let parts = vec![
            literal("a", "string"),
            TypeExpr::reference("Foo"),
            literal("b", "number"),
        ];
        let out = merge_composite(&parts, "|", 0, &ctx).unwrap();

        assert_eq!(values(&out.children[1]), vec![" ", "}", "|", "Foo", "|", "{"]);
        assert_eq!(values(&out.children[2]), vec!["    ", "b", ":", "number", ";"]);
        assert_eq!(values(&out.children[3]), vec![" ", "}", ";"]);
    }

    #[test]
    fn test_expanded_non_literal_part() {
        let ctx = RenderContext::default();
        let parts = vec![
            literal("a", "string"),
            TypeExpr::generic("Promise", vec![literal("b", "number")]),
            TypeExpr::primitive("undefined"),
        ];
        let out = merge_composite(&parts, "|", 0, &ctx).unwrap();

        assert_eq!(
            values(&out.children[1]),
            vec![" ", "}", "|", "Promise", "<", "{"]
        );
        assert_eq!(values(&out.children[2]), vec!["    ", "b", ":", "number", ";"]);
        let tail = out.children.last().unwrap();
        assert_eq!(values(tail), vec![" ", "}", ">", "|", "undefined", ";"]);
        assert!(tail.is_context_end_line);
    }

    #[test]
    fn test_layout_is_canonical() {
        let ctx = RenderContext::default();
        let parts = vec![literal("a", "string"), literal("b", "number")];
        assert_eq!(
            merge_composite(&parts, "|", 1, &ctx),
            merge_composite(&parts, "|", 1, &ctx)
        );
    }
}
