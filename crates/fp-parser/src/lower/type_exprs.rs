//! Type expressions.

use fp_core::ast::{FieldDecl, TypeExpr, TypeExprKind};

use super::{Lowerer, named_children};
use crate::parser::GoNode;

/// Node kinds that denote a type rather than a value.
pub(super) const TYPE_KINDS: &[&str] = &[
    "type_identifier",
    "qualified_type",
    "pointer_type",
    "slice_type",
    "array_type",
    "implicit_length_array_type",
    "map_type",
    "channel_type",
    "function_type",
    "struct_type",
    "interface_type",
    "generic_type",
    "parenthesized_type",
    "negated_type",
];

pub(super) fn is_type_kind(kind: &str) -> bool {
    TYPE_KINDS.contains(&kind)
}

impl Lowerer<'_> {
    pub(super) fn lower_type(&mut self, node: &GoNode<'_>) -> TypeExpr {
        let id = self.next_id();
        let span = self.span(node);
        let kind = match node.kind().as_ref() {
            "type_identifier" | "identifier" => TypeExprKind::Name(node.text().to_string()),
            "qualified_type" => match (node.field("package"), node.field("name")) {
                (Some(package), Some(name)) => TypeExprKind::Qualified {
                    package: package.text().to_string(),
                    name: name.text().to_string(),
                },
                _ => TypeExprKind::Unknown,
            },
            "pointer_type" => match named_children(node).next() {
                Some(inner) => TypeExprKind::Pointer(Box::new(self.lower_type(&inner))),
                None => TypeExprKind::Unknown,
            },
            "slice_type" => match node.field("element") {
                Some(elem) => TypeExprKind::Slice(Box::new(self.lower_type(&elem))),
                None => TypeExprKind::Unknown,
            },
            "array_type" | "implicit_length_array_type" => match node.field("element") {
                Some(elem) => TypeExprKind::Array(Box::new(self.lower_type(&elem))),
                None => TypeExprKind::Unknown,
            },
            "map_type" => match (node.field("key"), node.field("value")) {
                (Some(key), Some(value)) => TypeExprKind::Map {
                    key: Box::new(self.lower_type(&key)),
                    value: Box::new(self.lower_type(&value)),
                },
                _ => TypeExprKind::Unknown,
            },
            "channel_type" => match node
                .field("value")
                .or_else(|| named_children(node).last())
            {
                Some(elem) => TypeExprKind::Chan(Box::new(self.lower_type(&elem))),
                None => TypeExprKind::Unknown,
            },
            "function_type" => TypeExprKind::Func(self.lower_signature(node)),
            "struct_type" => TypeExprKind::Struct(self.lower_struct_fields(node)),
            "interface_type" => TypeExprKind::Interface(self.lower_interface_methods(node)),
            "generic_type" => match node.field("type") {
                Some(base) => TypeExprKind::Generic(Box::new(self.lower_type(&base))),
                None => TypeExprKind::Unknown,
            },
            "parenthesized_type" => match named_children(node).next() {
                Some(inner) => return self.lower_type(&inner),
                None => TypeExprKind::Unknown,
            },
            _ => TypeExprKind::Unknown,
        };
        TypeExpr { id, span, kind }
    }

    fn lower_struct_fields(&mut self, node: &GoNode<'_>) -> Vec<FieldDecl> {
        let mut fields = Vec::new();
        let Some(list) = named_children(node).find(|c| c.kind().as_ref() == "field_declaration_list")
        else {
            return fields;
        };
        for decl in named_children(&list) {
            if decl.kind().as_ref() != "field_declaration" {
                continue;
            }
            let Some(ty_node) = decl.field("type") else {
                continue;
            };
            let names: Vec<_> = named_children(&decl)
                .filter(|c| c.kind().as_ref() == "field_identifier")
                .map(|c| self.ident(&c))
                .collect();
            let embedded = names.is_empty();
            let mut ty = self.lower_type(&ty_node);
            if embedded && decl.children().any(|c| c.kind().as_ref() == "*") {
                // `*Logger` embeds through a pointer; the `*` is a bare token.
                ty = TypeExpr {
                    id: self.next_id(),
                    span: self.span(&decl),
                    kind: TypeExprKind::Pointer(Box::new(ty)),
                };
            }
            fields.push(FieldDecl {
                names,
                ty,
                embedded,
            });
        }
        fields
    }

    fn lower_interface_methods(&mut self, node: &GoNode<'_>) -> Vec<fp_core::ast::Ident> {
        let mut methods = Vec::new();
        for child in named_children(node) {
            let kind = child.kind();
            if kind.as_ref() != "method_elem" && kind.as_ref() != "method_spec" {
                continue;
            }
            if let Some(name) = child
                .field("name")
                .or_else(|| named_children(&child).find(|c| c.kind().as_ref() == "field_identifier"))
            {
                methods.push(self.ident(&name));
            }
        }
        methods
    }
}
