//! @dose
//! purpose: Structural description of TypeScript type expressions and object members as handed
//!     to the builder by the declaration discovery step (or by the tree-sitter front end).
//!
//! when-editing:
//!     - !TypeExpr is a closed set; adding a variant must be handled in builder::dispatch
//!     - Primitive is the fallback for anything without a structural variant
//!
//! invariants:
//!     - Expressions are plain owned values; no parent pointers or shared nodes
//!
//! gotchas:
//!     - Accessor kind is detected from the raw source prefix, not from a parsed flag

use once_cell::sync::Lazy;
use regex::Regex;

/// A type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    ObjectLiteral {
        members: Vec<Member>,
    },
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    Reference {
        name: String,
        type_arguments: Vec<TypeExpr>,
    },
    Array(Box<TypeExpr>),
    Function(FunctionType),
    Conditional {
        check: Box<TypeExpr>,
        extends: Box<TypeExpr>,
        true_type: Box<TypeExpr>,
        false_type: Box<TypeExpr>,
    },
    Infer {
        name: String,
        constraint: Option<Box<TypeExpr>>,
    },
    Parenthesized(Box<TypeExpr>),
    ImportQualified {
        module_path: String,
        qualifier: Option<String>,
        type_arguments: Vec<TypeExpr>,
    },
    Primitive(String),
}

impl TypeExpr {
    pub fn primitive(text: impl Into<String>) -> Self {
        TypeExpr::Primitive(text.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeExpr::Reference {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_arguments: Vec<TypeExpr>) -> Self {
        TypeExpr::Reference {
            name: name.into(),
            type_arguments,
        }
    }

    pub fn object(members: Vec<Member>) -> Self {
        TypeExpr::ObjectLiteral { members }
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(element))
    }

    pub fn is_object_literal(&self) -> bool {
        matches!(self, TypeExpr::ObjectLiteral { .. })
    }

    /// Whether rendering this expression produces nested lines: true when an object literal
    /// appears anywhere in the tree, directly or through a generic argument.
    /// The dispatcher uses it to take the single-row path for unions and intersections.
    pub fn contains_object_literal(&self) -> bool {
        match self {
            TypeExpr::ObjectLiteral { .. } => true,
            TypeExpr::Union(parts) | TypeExpr::Intersection(parts) => {
                parts.iter().any(TypeExpr::contains_object_literal)
            }
            TypeExpr::Reference { type_arguments, .. }
            | TypeExpr::ImportQualified { type_arguments, .. } => {
                type_arguments.iter().any(TypeExpr::contains_object_literal)
            }
            TypeExpr::Array(element) | TypeExpr::Parenthesized(element) => {
                element.contains_object_literal()
            }
            TypeExpr::Function(function) => function.contains_object_literal(),
            TypeExpr::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => [check, extends, true_type, false_type]
                .iter()
                .any(|t| t.contains_object_literal()),
            TypeExpr::Infer { constraint, .. } => constraint
                .as_deref()
                .is_some_and(TypeExpr::contains_object_literal),
            TypeExpr::Primitive(_) => false,
        }
    }
}

/// `<T>(a: A) => R` or `new (a: A) => R`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionType {
    pub is_constructor: bool,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Box<TypeExpr>>,
}

impl FunctionType {
    fn contains_object_literal(&self) -> bool {
        self.type_parameters
            .iter()
            .any(TypeParameter::contains_object_literal)
            || self
                .parameters
                .iter()
                .filter_map(|p| p.type_annotation.as_ref())
                .any(TypeExpr::contains_object_literal)
            || self
                .return_type
                .as_deref()
                .is_some_and(TypeExpr::contains_object_literal)
    }
}

/// A generic type parameter with optional `extends` constraint and `=` default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeExpr>,
    pub default: Option<TypeExpr>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
            default: None,
        }
    }

    fn contains_object_literal(&self) -> bool {
        self.constraint
            .iter()
            .chain(self.default.iter())
            .any(TypeExpr::contains_object_literal)
    }
}

/// A function or index parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub is_optional: bool,
    pub is_rest: bool,
    pub type_annotation: Option<TypeExpr>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_annotation: TypeExpr) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
            is_rest: false,
            type_annotation: Some(type_annotation),
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn rest(mut self) -> Self {
        self.is_rest = true;
        self
    }
}

/// Accessor form of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Get,
    /// Setter; carries the name of its single parameter
    Set { parameter: String },
}

static ACCESSOR_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(get|set)\s*$").unwrap());

impl Accessor {
    /// Detect an accessor from the raw source text that precedes a member name,
    /// e.g. `"static get "`. Setters default their parameter name to `value`.
    pub fn detect(raw_prefix: &str) -> Option<Accessor> {
        let caps = ACCESSOR_PREFIX.captures(raw_prefix)?;
        match &caps[1] {
            "get" => Some(Accessor::Get),
            _ => Some(Accessor::Set {
                parameter: "value".to_string(),
            }),
        }
    }
}

/// `[readonly] [static] name[?]: type`, or a get/set accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    pub name: String,
    pub is_optional: bool,
    pub is_readonly: bool,
    pub is_static: bool,
    pub accessor: Option<Accessor>,
    pub type_annotation: Option<TypeExpr>,
}

impl PropertySignature {
    pub fn new(name: impl Into<String>, type_annotation: TypeExpr) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
            is_readonly: false,
            is_static: false,
            accessor: None,
            type_annotation: Some(type_annotation),
        }
    }
}

/// `[readonly] [key: K]: V`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSignature {
    pub is_readonly: bool,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeExpr,
}

/// `[static] name[?]<T>(params): R`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub is_optional: bool,
    pub is_static: bool,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
}

/// `<T>(params): R` or `new <T>(params): R`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallSignature {
    pub is_construct: bool,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
}

/// One structural member of an object literal type, interface or class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Property(PropertySignature),
    Index(IndexSignature),
    Method(MethodSignature),
    CallSignature(CallSignature),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_detect() {
        assert_eq!(Accessor::detect("get "), Some(Accessor::Get));
        assert_eq!(Accessor::detect("static get "), Some(Accessor::Get));
        assert_eq!(
            Accessor::detect("  set"),
            Some(Accessor::Set {
                parameter: "value".to_string()
            })
        );
        assert_eq!(Accessor::detect("readonly "), None);
        assert_eq!(Accessor::detect("gadget "), None);
        assert_eq!(Accessor::detect(""), None);
    }

    #[test]
    fn test_contains_object_literal_through_generic_argument() {
        let literal = TypeExpr::object(vec![Member::Property(PropertySignature::new(
            "a",
            TypeExpr::primitive("string"),
        ))]);
        assert!(TypeExpr::generic("Promise", vec![literal.clone()]).contains_object_literal());
        assert!(TypeExpr::array(literal).contains_object_literal());
        assert!(!TypeExpr::Union(vec![
            TypeExpr::primitive("string"),
            TypeExpr::reference("Foo"),
        ])
        .contains_object_literal());
    }
}
