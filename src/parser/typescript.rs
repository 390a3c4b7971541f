//! @dose
//! purpose: This module walks TypeScript declaration sources and produces one Declaration per
//!     API member (namespace headers, interface and class members, functions, type aliases,
//!     variables), with qualified display names, canonical ids and deprecation flags.
//!
//! when-editing:
//!     - !Canonical ids are "package!Qualified.Name", or just the qualified name without a package
//!     - !Every declared type name is registered for navigation under its qualified and simple
//!       name; the first declaration of a simple name wins
//!     - Deprecation comes from the nearest preceding /** */ comment and is inherited by members
//!
//! invariants:
//!     - Declarations are emitted in document order
//!     - A file that tree-sitter can parse at all never fails; unknown statements are skipped
//!
//! do-not:
//!     - Never use regex for statement-level parsing; always use tree-sitter
//!     - Never emit private or #private class members
//!
//! gotchas:
//!     - `namespace X {}` may surface as expression_statement > internal_module
//!     - Interface bodies are aliased object types ("interface_body"); older grammars say
//!       "object_type"
//!     - Comments are named nodes and show up between members
//!
//! flows:
//!     - Parse: create parser for dialect, parse source into a tree
//!     - Walk: statements -> containers (namespace/interface/class) -> members
//!     - References: collect resolved TypeName tokens, then build_reference_map

use crate::builder::{build_reference_map, create_token, ReferenceMap, TokenOptions};
use crate::parser::type_expr::{convert_import, has_word, named_children, TypeConverter};
use crate::parser::{Dialect, ParseError};
use crate::types::{
    Declaration, DeclarationBody, Member, MethodSignature, PropertySignature, Token, TokenKind,
    TypeAliasDeclaration, TypeExpr,
};
use tree_sitter::Node;

const TYPE_WRAPPER: &str = "type __ApiViewType = ";

/// One declaration plus its deprecation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeclaration {
    pub declaration: Declaration,
    pub deprecated: bool,
}

/// Everything the renderer needs for one source file
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub declarations: Vec<ParsedDeclaration>,
    pub references: ReferenceMap,
}

/// Convert a single type expression text
pub fn parse_type(text: &str) -> Result<TypeExpr, ParseError> {
    let text = text.trim();
    if let Some(import) = convert_import(text) {
        return Ok(import);
    }

    let source = format!("{TYPE_WRAPPER}{text};");
    let mut parser = Dialect::TypeScript.create_parser()?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| ParseError::ParseError("Failed to parse type".to_string()))?;

    let converter = TypeConverter::new(&source);
    let value = tree
        .root_node()
        .named_child(0)
        .filter(|alias| alias.kind() == "type_alias_declaration" && !alias.has_error())
        .and_then(|alias| alias.child_by_field_name("value"));

    match value {
        Some(value) => Ok(converter.convert_type(value)),
        None => {
            tracing::debug!(text, "type text did not parse; keeping raw text");
            Ok(TypeExpr::primitive(text))
        }
    }
}

/// Parse a TypeScript declaration source
pub fn parse_declarations(source: &str, package: Option<&str>) -> Result<ParsedFile, ParseError> {
    parse_declarations_with(source, package, Dialect::TypeScript)
}

pub fn parse_declarations_with(
    source: &str,
    package: Option<&str>,
    dialect: Dialect,
) -> Result<ParsedFile, ParseError> {
    let mut parser = dialect.create_parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::ParseError("Failed to parse source".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!("source has syntax errors; rendering what was recovered");
    }

    let mut walker = DeclarationWalker::new(source, package);
    walker.visit_statements(root, None, false);

    Ok(ParsedFile {
        references: build_reference_map(&walker.type_names),
        declarations: walker.declarations,
    })
}

struct DeclarationWalker<'s> {
    converter: TypeConverter<'s>,
    package: Option<&'s str>,
    declarations: Vec<ParsedDeclaration>,
    type_names: Vec<Token>,
}

impl<'s> DeclarationWalker<'s> {
    fn new(source: &'s str, package: Option<&'s str>) -> Self {
        Self {
            converter: TypeConverter::new(source),
            package,
            declarations: Vec::new(),
            type_names: Vec::new(),
        }
    }

    fn node_text(&self, node: Node) -> &'s str {
        self.converter.node_text(node)
    }

    fn canonical_id(&self, qualified: &str) -> String {
        match self.package {
            Some(package) if !package.is_empty() => format!("{package}!{qualified}"),
            _ => qualified.to_string(),
        }
    }

    fn qualify(scope: Option<&str>, name: &str) -> String {
        match scope {
            Some(scope) => format!("{scope}.{name}"),
            None => name.to_string(),
        }
    }

    /// A /** */ comment with @deprecated directly above the node
    fn is_deprecated(&self, node: Node) -> bool {
        let mut previous = node.prev_named_sibling();
        while let Some(comment) = previous {
            if comment.kind() != "comment" {
                return false;
            }
            let text = self.node_text(comment);
            if text.starts_with("/**") {
                return text.contains("@deprecated");
            }
            previous = comment.prev_named_sibling();
        }
        false
    }

    fn emit(&mut self, display_name: String, body: DeclarationBody, deprecated: bool) {
        let mut declaration = Declaration::new(display_name, body);
        declaration.canonical_reference = Some(self.canonical_id(&declaration.display_name));
        self.declarations.push(ParsedDeclaration {
            declaration,
            deprecated,
        });
    }

    fn register_type_name(&mut self, qualified: &str, simple: &str) {
        let id = self.canonical_id(qualified);
        for name in [qualified, simple] {
            self.type_names.push(create_token(
                TokenKind::TypeName,
                name,
                TokenOptions::default().navigate_to(Some(id.clone())),
            ));
        }
    }

    fn visit_statements(&mut self, block: Node, scope: Option<&str>, deprecated: bool) {
        for statement in named_children(block) {
            let deprecated = deprecated || self.is_deprecated(statement);
            self.visit_statement(statement, scope, deprecated);
        }
    }

    fn visit_statement(&mut self, node: Node, scope: Option<&str>, deprecated: bool) {
        match node.kind() {
            "export_statement" => match node.child_by_field_name("declaration") {
                Some(declaration) => self.visit_statement(declaration, scope, deprecated),
                None => tracing::debug!("skipping re-export"),
            },
            "ambient_declaration" | "expression_statement" => {
                for child in named_children(node) {
                    self.visit_statement(child, scope, deprecated);
                }
            }
            "statement_block" => self.visit_statements(node, scope, deprecated),
            "internal_module" | "module" => self.visit_namespace(node, scope, deprecated),
            "interface_declaration" => {
                let Some(name) = node.child_by_field_name("name") else {
                    return;
                };
                let name = self.node_text(name);
                let qualified = Self::qualify(scope, name);
                self.register_type_name(&qualified, name);
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit_members(body, &qualified, deprecated, false);
                }
            }
            "class_declaration" | "abstract_class_declaration" => {
                let Some(name) = node.child_by_field_name("name") else {
                    return;
                };
                let name = self.node_text(name);
                let qualified = Self::qualify(scope, name);
                self.register_type_name(&qualified, name);
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit_members(body, &qualified, deprecated, true);
                }
            }
            "enum_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let name = self.node_text(name);
                    let qualified = Self::qualify(scope, name);
                    self.register_type_name(&qualified, name);
                }
            }
            "type_alias_declaration" => self.visit_type_alias(node, scope, deprecated),
            "function_signature" | "function_declaration" => {
                self.visit_function(node, scope, deprecated)
            }
            "lexical_declaration" | "variable_declaration" => {
                for declarator in named_children(node) {
                    if declarator.kind() == "variable_declarator" {
                        self.visit_variable(declarator, scope, deprecated);
                    }
                }
            }
            "comment" => {}
            kind => tracing::debug!(kind, "skipping statement"),
        }
    }

    fn visit_namespace(&mut self, node: Node, scope: Option<&str>, deprecated: bool) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = self
            .node_text(name)
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        let qualified = Self::qualify(scope, &name);
        let simple = name.rsplit('.').next().unwrap_or(&name).to_string();
        self.register_type_name(&qualified, &simple);
        self.emit(
            qualified.clone(),
            DeclarationBody::Namespace { name },
            deprecated,
        );
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_statements(body, Some(&qualified), deprecated);
        }
    }

    fn visit_type_alias(&mut self, node: Node, scope: Option<&str>, deprecated: bool) {
        let (Some(name), Some(value)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) else {
            return;
        };
        let name = self.node_text(name);
        let qualified = Self::qualify(scope, name);
        self.register_type_name(&qualified, name);
        let alias = TypeAliasDeclaration {
            name: name.to_string(),
            type_parameters: self
                .converter
                .type_parameters(node.child_by_field_name("type_parameters")),
            value: self.converter.convert_type(value),
        };
        self.emit(qualified, DeclarationBody::TypeAlias(alias), deprecated);
    }

    fn visit_function(&mut self, node: Node, scope: Option<&str>, deprecated: bool) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.node_text(name);
        let function = MethodSignature {
            name: name.to_string(),
            is_optional: false,
            is_static: false,
            type_parameters: self
                .converter
                .type_parameters(node.child_by_field_name("type_parameters")),
            parameters: self
                .converter
                .parameters(node.child_by_field_name("parameters")),
            return_type: node
                .child_by_field_name("return_type")
                .map(|t| self.converter.annotation(t)),
        };
        self.emit(
            Self::qualify(scope, name),
            DeclarationBody::Function(function),
            deprecated,
        );
    }

    fn visit_variable(&mut self, node: Node, scope: Option<&str>, deprecated: bool) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.node_text(name);
        let property = PropertySignature {
            name: name.to_string(),
            is_optional: false,
            is_readonly: false,
            is_static: false,
            accessor: None,
            type_annotation: node
                .child_by_field_name("type")
                .map(|t| self.converter.annotation(t)),
        };
        self.emit(
            Self::qualify(scope, name),
            DeclarationBody::Property(property),
            deprecated,
        );
    }

    fn visit_members(&mut self, body: Node, container: &str, deprecated: bool, is_class: bool) {
        for node in named_children(body) {
            if node.kind() == "comment" {
                continue;
            }
            if is_class && self.is_private(node) {
                continue;
            }
            let deprecated = deprecated || self.is_deprecated(node);
            match self.converter.convert_member(node) {
                Some(member) => {
                    let (display_name, body) = member_declaration(container, member);
                    self.emit(display_name, body, deprecated);
                }
                None => tracing::debug!(
                    container,
                    kind = node.kind(),
                    "skipping member without a declaration form"
                ),
            }
        }
    }

    fn is_private(&self, node: Node) -> bool {
        let Some(name) = node.child_by_field_name("name") else {
            return false;
        };
        name.kind() == "private_property_identifier"
            || has_word(self.converter.modifier_prefix(node, name), "private")
    }
}

fn member_declaration(container: &str, member: Member) -> (String, DeclarationBody) {
    match member {
        Member::Property(property) => (
            format!("{container}.{}", property.name),
            DeclarationBody::Property(property),
        ),
        Member::Method(method) => (
            format!("{container}.{}", method.name),
            DeclarationBody::Method(method),
        ),
        Member::Index(index) => {
            let key = index
                .parameters
                .first()
                .map(|p| p.name.as_str())
                .unwrap_or_default();
            (
                format!("{container}[{key}]"),
                DeclarationBody::IndexSignature(index),
            )
        }
        Member::CallSignature(signature) => {
            if signature.is_construct {
                (
                    format!("{container}.new"),
                    DeclarationBody::ConstructSignature(signature),
                )
            } else {
                (
                    format!("{container}()"),
                    DeclarationBody::CallSignature(signature),
                )
            }
        }
    }
}
