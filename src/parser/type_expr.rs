//! @dose
//! purpose: Converts tree-sitter type nodes, object members, parameters and type parameters
//!     into the builder's TypeExpr model.
//!
//! when-editing:
//!     - !Anything without a structural TypeExpr variant becomes Primitive(raw text)
//!     - !An object type with a member we cannot convert (mapped types) degrades as a whole
//!
//! invariants:
//!     - Conversion is total: every node yields some TypeExpr
//!
//! gotchas:
//!     - union_type/intersection_type are left-nested binary nodes; flatten them, but keep
//!       parenthesized groups intact
//!     - Getters and setters parse as method signatures; the `get`/`set` keyword is found in
//!       the raw text before the member name

use crate::types::{
    Accessor, CallSignature, FunctionType, IndexSignature, Member, MethodSignature, Parameter,
    PropertySignature, TypeExpr, TypeParameter,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

static IMPORT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^import\s*\(\s*["']([^"']+)["']\s*\)(?:\s*\.\s*([A-Za-z_$][\w$.]*))?\s*(<.*>)?$"#)
        .unwrap()
});

pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn has_child_kind(node: Node<'_>, kind: &str) -> bool {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .any(|child| child.kind() == kind)
}

/// `import("m")`, `import("m").Q` and `import("m").Q<T>` split into their parts. Type
/// arguments are returned as raw text including the angle brackets.
pub(crate) fn split_import_type(text: &str) -> Option<(String, Option<String>, Option<String>)> {
    let caps = IMPORT_TYPE.captures(text.trim())?;
    Some((
        caps[1].to_string(),
        caps.get(2).map(|m| m.as_str().to_string()),
        caps.get(3).map(|m| m.as_str().to_string()),
    ))
}

/// `import("m").Q<T>` as an ImportQualified expression
pub(crate) fn convert_import(text: &str) -> Option<TypeExpr> {
    let (module_path, qualifier, arguments) = split_import_type(text)?;
    let type_arguments = match arguments {
        Some(arguments) => match super::typescript::parse_type(&format!("Import{arguments}")) {
            Ok(TypeExpr::Reference { type_arguments, .. }) => type_arguments,
            _ => return None,
        },
        None => Vec::new(),
    };
    Some(TypeExpr::ImportQualified {
        module_path,
        qualifier,
        type_arguments,
    })
}

/// Node to model conversion over one source text
pub(crate) struct TypeConverter<'s> {
    source: &'s str,
}

impl<'s> TypeConverter<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self { source }
    }

    pub(crate) fn node_text(&self, node: Node) -> &'s str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn raw(&self, node: Node) -> TypeExpr {
        let text = self.node_text(node).trim();
        tracing::debug!(kind = node.kind(), text, "no structural form; keeping raw text");
        TypeExpr::primitive(text)
    }

    pub(crate) fn convert_type(&self, node: Node) -> TypeExpr {
        match node.kind() {
            "object_type" | "interface_body" => match self.convert_members(node) {
                Some(members) => TypeExpr::ObjectLiteral { members },
                None => self.raw(node),
            },
            "union_type" => self.composite(node, "union_type", TypeExpr::Union),
            "intersection_type" => self.composite(node, "intersection_type", TypeExpr::Intersection),
            "type_identifier" | "nested_type_identifier" => {
                TypeExpr::reference(self.node_text(node))
            }
            "generic_type" => self.convert_generic(node),
            "array_type" => match node.named_child(0) {
                Some(element) => TypeExpr::array(self.convert_type(element)),
                None => self.raw(node),
            },
            "parenthesized_type" => match node.named_child(0) {
                Some(inner) => TypeExpr::Parenthesized(Box::new(self.convert_type(inner))),
                None => self.raw(node),
            },
            "function_type" => TypeExpr::Function(FunctionType {
                is_constructor: false,
                type_parameters: self.type_parameters(node.child_by_field_name("type_parameters")),
                parameters: self.parameters(node.child_by_field_name("parameters")),
                return_type: node
                    .child_by_field_name("return_type")
                    .map(|r| Box::new(self.convert_type(r))),
            }),
            "constructor_type" => TypeExpr::Function(FunctionType {
                is_constructor: true,
                type_parameters: self.type_parameters(node.child_by_field_name("type_parameters")),
                parameters: self.parameters(node.child_by_field_name("parameters")),
                return_type: node
                    .child_by_field_name("type")
                    .map(|r| Box::new(self.convert_type(r))),
            }),
            "conditional_type" => self.convert_conditional(node),
            "infer_type" => {
                let parts = named_children(node);
                match parts.first() {
                    Some(name) => TypeExpr::Infer {
                        name: self.node_text(*name).to_string(),
                        constraint: parts.get(1).map(|c| Box::new(self.convert_type(*c))),
                    },
                    None => self.raw(node),
                }
            }
            "predefined_type" | "literal_type" | "this_type" => {
                TypeExpr::primitive(self.node_text(node))
            }
            _ => match convert_import(self.node_text(node)) {
                Some(import) => import,
                None => self.raw(node),
            },
        }
    }

    fn composite(&self, node: Node, kind: &str, build: fn(Vec<TypeExpr>) -> TypeExpr) -> TypeExpr {
        let mut parts = Vec::new();
        self.flatten(node, kind, &mut parts);
        if parts.len() == 1 {
            return parts.remove(0);
        }
        build(parts)
    }

    fn flatten(&self, node: Node, kind: &str, parts: &mut Vec<TypeExpr>) {
        for child in named_children(node) {
            if child.kind() == kind {
                self.flatten(child, kind, parts);
            } else if child.kind() != "comment" {
                parts.push(self.convert_type(child));
            }
        }
    }

    fn convert_generic(&self, node: Node) -> TypeExpr {
        let Some(name) = node.child_by_field_name("name") else {
            return self.raw(node);
        };
        TypeExpr::generic(
            self.node_text(name),
            self.type_arguments(node.child_by_field_name("type_arguments")),
        )
    }

    fn type_arguments(&self, node: Option<Node>) -> Vec<TypeExpr> {
        node.map(|args| {
            named_children(args)
                .into_iter()
                .filter(|a| a.kind() != "comment")
                .map(|a| self.convert_type(a))
                .collect()
        })
        .unwrap_or_default()
    }

    fn convert_conditional(&self, node: Node) -> TypeExpr {
        let field = |name: &str| node.child_by_field_name(name).map(|n| self.convert_type(n));
        match (
            field("left"),
            field("right"),
            field("consequence"),
            field("alternative"),
        ) {
            (Some(check), Some(extends), Some(true_type), Some(false_type)) => {
                TypeExpr::Conditional {
                    check: Box::new(check),
                    extends: Box::new(extends),
                    true_type: Box::new(true_type),
                    false_type: Box::new(false_type),
                }
            }
            _ => self.raw(node),
        }
    }

    /// Members of an object type, interface body or class body. None when any member has no
    /// structural form.
    pub(crate) fn convert_members(&self, body: Node) -> Option<Vec<Member>> {
        let mut members = Vec::new();
        for child in named_children(body) {
            if child.kind() == "comment" {
                continue;
            }
            members.push(self.convert_member(child)?);
        }
        Some(members)
    }

    /// Source text between the start of a member and its name
    pub(crate) fn modifier_prefix(&self, member: Node, name: Node) -> &'s str {
        &self.source[member.start_byte()..name.start_byte()]
    }

    pub(crate) fn convert_member(&self, node: Node) -> Option<Member> {
        match node.kind() {
            "property_signature" | "public_field_definition" => {
                let name = node.child_by_field_name("name")?;
                let prefix = self.modifier_prefix(node, name);
                Some(Member::Property(PropertySignature {
                    name: self.node_text(name).to_string(),
                    is_optional: has_child_kind(node, "?"),
                    is_readonly: has_word(prefix, "readonly"),
                    is_static: has_word(prefix, "static"),
                    accessor: None,
                    type_annotation: node
                        .child_by_field_name("type")
                        .map(|t| self.annotation(t)),
                }))
            }
            "method_signature" | "method_definition" | "abstract_method_signature" => {
                self.convert_method(node)
            }
            "call_signature" => Some(Member::CallSignature(CallSignature {
                is_construct: false,
                type_parameters: self.type_parameters(node.child_by_field_name("type_parameters")),
                parameters: self.parameters(node.child_by_field_name("parameters")),
                return_type: node
                    .child_by_field_name("return_type")
                    .map(|t| self.annotation(t)),
            })),
            "construct_signature" => Some(Member::CallSignature(CallSignature {
                is_construct: true,
                type_parameters: self.type_parameters(node.child_by_field_name("type_parameters")),
                parameters: self.parameters(node.child_by_field_name("parameters")),
                return_type: node.child_by_field_name("type").map(|t| self.annotation(t)),
            })),
            "index_signature" => {
                let name = node.child_by_field_name("name")?;
                let index_type = node.child_by_field_name("index_type")?;
                let return_type = node.child_by_field_name("type")?;
                let prefix = &self.source[node.start_byte()..name.start_byte()];
                Some(Member::Index(IndexSignature {
                    is_readonly: has_child_kind(node, "readonly"),
                    is_static: has_word(prefix, "static"),
                    parameters: vec![Parameter::new(
                        self.node_text(name),
                        self.convert_type(index_type),
                    )],
                    return_type: self.annotation(return_type),
                }))
            }
            kind => {
                tracing::debug!(kind, "unsupported member");
                None
            }
        }
    }

    fn convert_method(&self, node: Node) -> Option<Member> {
        let name = node.child_by_field_name("name")?;
        let prefix = self.modifier_prefix(node, name);
        let is_static = has_word(prefix, "static");
        let parameters = self.parameters(node.child_by_field_name("parameters"));
        let return_type = node
            .child_by_field_name("return_type")
            .map(|t| self.annotation(t));

        if self.node_text(name) == "constructor" {
            return Some(Member::CallSignature(CallSignature {
                is_construct: true,
                type_parameters: Vec::new(),
                parameters,
                return_type: None,
            }));
        }

        match Accessor::detect(prefix) {
            Some(Accessor::Get) => Some(Member::Property(PropertySignature {
                name: self.node_text(name).to_string(),
                is_optional: false,
                is_readonly: false,
                is_static,
                accessor: Some(Accessor::Get),
                type_annotation: return_type,
            })),
            Some(Accessor::Set { parameter }) => {
                let first = parameters.into_iter().next();
                Some(Member::Property(PropertySignature {
                    name: self.node_text(name).to_string(),
                    is_optional: false,
                    is_readonly: false,
                    is_static,
                    accessor: Some(Accessor::Set {
                        parameter: first
                            .as_ref()
                            .map(|p| p.name.clone())
                            .unwrap_or(parameter),
                    }),
                    type_annotation: first.and_then(|p| p.type_annotation),
                }))
            }
            None => Some(Member::Method(MethodSignature {
                name: self.node_text(name).to_string(),
                is_optional: has_child_kind(node, "?"),
                is_static,
                type_parameters: self.type_parameters(node.child_by_field_name("type_parameters")),
                parameters,
                return_type,
            })),
        }
    }

    /// `: T` annotation nodes; predicate and asserts annotations keep their text
    pub(crate) fn annotation(&self, node: Node) -> TypeExpr {
        if node.kind() == "type_annotation" {
            if let Some(inner) = node.named_child(0) {
                return self.convert_type(inner);
            }
        }
        if node.kind().ends_with("_annotation") {
            let text = self.node_text(node).trim_start();
            let text = text.strip_prefix(':').unwrap_or(text).trim();
            return TypeExpr::primitive(text);
        }
        self.convert_type(node)
    }

    pub(crate) fn parameters(&self, node: Option<Node>) -> Vec<Parameter> {
        let Some(node) = node else {
            return Vec::new();
        };
        named_children(node)
            .into_iter()
            .filter(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"))
            .map(|p| self.parameter(p))
            .collect()
    }

    fn parameter(&self, node: Node) -> Parameter {
        let pattern = node.child_by_field_name("pattern");
        let is_rest = pattern.is_some_and(|p| p.kind() == "rest_pattern");
        let name = match pattern {
            Some(p) if is_rest => self
                .node_text(p)
                .trim_start_matches("...")
                .trim()
                .to_string(),
            Some(p) => self.node_text(p).to_string(),
            None => self.node_text(node).to_string(),
        };
        Parameter {
            name,
            is_optional: node.kind() == "optional_parameter",
            is_rest,
            type_annotation: node.child_by_field_name("type").map(|t| self.annotation(t)),
        }
    }

    pub(crate) fn type_parameters(&self, node: Option<Node>) -> Vec<TypeParameter> {
        let Some(node) = node else {
            return Vec::new();
        };
        named_children(node)
            .into_iter()
            .filter(|p| p.kind() == "type_parameter")
            .filter_map(|p| {
                let name = p.child_by_field_name("name")?;
                Some(TypeParameter {
                    name: self.node_text(name).to_string(),
                    constraint: p
                        .child_by_field_name("constraint")
                        .and_then(|c| c.named_child(0))
                        .map(|c| self.convert_type(c)),
                    default: p
                        .child_by_field_name("value")
                        .and_then(|d| d.named_child(0))
                        .map(|d| self.convert_type(d)),
                })
            })
            .collect()
    }
}

pub(crate) fn has_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|w| w == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_import_type() {
        assert_eq!(
            split_import_type(r#"import("./models").User"#),
            Some(("./models".to_string(), Some("User".to_string()), None))
        );
        assert_eq!(
            split_import_type("import('pkg').ns.Box<string>"),
            Some((
                "pkg".to_string(),
                Some("ns.Box".to_string()),
                Some("<string>".to_string())
            ))
        );
        assert_eq!(
            split_import_type(r#"import("side-effect")"#),
            Some(("side-effect".to_string(), None, None))
        );
        assert_eq!(split_import_type("Importer<string>"), None);
    }

    #[test]
    fn test_has_word() {
        assert!(has_word("public static readonly ", "static"));
        assert!(!has_word("staticky ", "static"));
    }
}
