//! Expressions and composite literal elements.

use fp_core::ast::{Element, Expr, ExprKind, FuncLit, LitKind, TypeExpr};

use super::type_exprs::is_type_kind;
use super::{Lowerer, named_children};
use crate::parser::GoNode;

const EXPR_KINDS: &[&str] = &[
    "identifier",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
    "raw_string_literal",
    "interpreted_string_literal",
    "true",
    "false",
    "nil",
    "iota",
    "parenthesized_expression",
    "call_expression",
    "selector_expression",
    "index_expression",
    "slice_expression",
    "type_assertion_expression",
    "type_conversion_expression",
    "type_instantiation_expression",
    "composite_literal",
    "func_literal",
    "unary_expression",
    "binary_expression",
];

pub(super) fn is_expr_kind(kind: &str) -> bool {
    EXPR_KINDS.contains(&kind)
}

impl Lowerer<'_> {
    pub(super) fn lower_expr(&mut self, node: &GoNode<'_>) -> Expr {
        let id = self.next_id();
        let span = self.span(node);
        let kind = self.lower_expr_kind(node);
        Expr { id, span, kind }
    }

    /// Expressions of an `expression_list`, or of a single expression.
    pub(super) fn lower_expr_list(&mut self, node: &GoNode<'_>) -> Vec<Expr> {
        if node.kind().as_ref() != "expression_list" {
            return vec![self.lower_expr(node)];
        }
        named_children(node).map(|c| self.lower_expr(&c)).collect()
    }

    fn lower_expr_kind(&mut self, node: &GoNode<'_>) -> ExprKind {
        match node.kind().as_ref() {
            "identifier" | "true" | "false" | "nil" | "iota" | "field_identifier" => {
                ExprKind::Ident(node.text().to_string())
            }
            "int_literal" => ExprKind::Lit(LitKind::Int),
            "float_literal" => ExprKind::Lit(LitKind::Float),
            "imaginary_literal" => ExprKind::Lit(LitKind::Imaginary),
            "rune_literal" => ExprKind::Lit(LitKind::Rune),
            "raw_string_literal" | "interpreted_string_literal" => ExprKind::Lit(LitKind::String),
            "parenthesized_expression" => match named_children(node).next() {
                Some(inner) => ExprKind::Paren(Box::new(self.lower_expr(&inner))),
                None => ExprKind::Opaque(Vec::new()),
            },
            "selector_expression" => match (node.field("operand"), node.field("field")) {
                (Some(operand), Some(member)) => ExprKind::Selector {
                    operand: Box::new(self.lower_expr(&operand)),
                    member: self.ident(&member),
                },
                _ => self.opaque(node),
            },
            "call_expression" => {
                let Some(func) = node.field("function") else {
                    return self.opaque(node);
                };
                let func = self.lower_expr(&func);
                let args = node
                    .field("arguments")
                    .map(|list| named_children(&list).map(|a| self.lower_expr(&a)).collect())
                    .unwrap_or_default();
                ExprKind::Call {
                    func: Box::new(func),
                    args,
                }
            }
            "type_conversion_expression" => match (node.field("type"), node.field("operand")) {
                (Some(ty), Some(operand)) => {
                    let callee = self.type_as_expr(&ty);
                    ExprKind::Call {
                        func: Box::new(callee),
                        args: vec![self.lower_expr(&operand)],
                    }
                }
                _ => self.opaque(node),
            },
            "composite_literal" => {
                let ty = node.field("type").map(|t| self.lower_type(&t));
                let elements = node
                    .field("body")
                    .map(|body| self.lower_elements(&body))
                    .unwrap_or_default();
                ExprKind::Composite { ty, elements }
            }
            "literal_value" => ExprKind::Composite {
                ty: None,
                elements: self.lower_elements(node),
            },
            "literal_element" | "element" => match named_children(node).next() {
                Some(inner) => self.lower_expr_kind(&inner),
                None => ExprKind::Opaque(Vec::new()),
            },
            "func_literal" => {
                let lit = FuncLit {
                    id: self.next_id(),
                    span: self.span(node),
                    signature: self.lower_signature(node),
                    body: match node.field("body") {
                        Some(body) => self.lower_block(&body),
                        None => self.empty_block(node),
                    },
                };
                ExprKind::FuncLit(Box::new(lit))
            }
            "unary_expression" => match (node.field("operator"), node.field("operand")) {
                (Some(op), Some(operand)) => ExprKind::Unary {
                    op: op.text().to_string(),
                    operand: Box::new(self.lower_expr(&operand)),
                },
                _ => self.opaque(node),
            },
            "binary_expression" => {
                match (node.field("left"), node.field("operator"), node.field("right")) {
                    (Some(lhs), Some(op), Some(rhs)) => ExprKind::Binary {
                        op: op.text().to_string(),
                        lhs: Box::new(self.lower_expr(&lhs)),
                        rhs: Box::new(self.lower_expr(&rhs)),
                    },
                    _ => self.opaque(node),
                }
            }
            "index_expression" => match node.field("operand") {
                Some(operand) => {
                    let operand = Box::new(self.lower_expr(&operand));
                    let index = node
                        .field("index")
                        .map(|i| vec![self.lower_expr(&i)])
                        .unwrap_or_default();
                    ExprKind::Index { operand, index }
                }
                None => self.opaque(node),
            },
            "slice_expression" => match node.field("operand") {
                Some(operand) => {
                    let operand = Box::new(self.lower_expr(&operand));
                    let bounds = ["start", "end", "capacity"]
                        .iter()
                        .filter_map(|name| node.field(name))
                        .map(|b| self.lower_expr(&b))
                        .collect();
                    ExprKind::Slice { operand, bounds }
                }
                None => self.opaque(node),
            },
            "type_assertion_expression" => match node.field("operand") {
                Some(operand) => ExprKind::TypeAssert {
                    operand: Box::new(self.lower_expr(&operand)),
                    ty: node.field("type").map(|t| self.lower_type(&t)),
                },
                None => self.opaque(node),
            },
            kind if is_type_kind(kind) => ExprKind::Type(self.lower_type(node)),
            _ => self.opaque(node),
        }
    }

    fn type_as_expr(&mut self, node: &GoNode<'_>) -> Expr {
        let id = self.next_id();
        let span = self.span(node);
        let ty: TypeExpr = self.lower_type(node);
        Expr {
            id,
            span,
            kind: ExprKind::Type(ty),
        }
    }

    /// Keep every nested expression of an unmodelled node.
    fn opaque(&mut self, node: &GoNode<'_>) -> ExprKind {
        let mut children = Vec::new();
        self.collect_nested_exprs(node, &mut children);
        ExprKind::Opaque(children)
    }

    fn collect_nested_exprs(&mut self, node: &GoNode<'_>, out: &mut Vec<Expr>) {
        for child in named_children(node) {
            let kind = child.kind();
            if is_expr_kind(kind.as_ref()) {
                out.push(self.lower_expr(&child));
            } else if !is_type_kind(kind.as_ref()) {
                self.collect_nested_exprs(&child, out);
            }
        }
    }

    fn lower_elements(&mut self, body: &GoNode<'_>) -> Vec<Element> {
        let mut elements = Vec::new();
        for child in named_children(body) {
            match child.kind().as_ref() {
                "keyed_element" => {
                    let parts: Vec<_> = named_children(&child).collect();
                    let (Some(key), Some(value)) = (parts.first(), parts.last()) else {
                        continue;
                    };
                    if parts.len() < 2 {
                        continue;
                    }
                    let key = self.lower_expr(key);
                    let value = self.lower_expr(value);
                    elements.push(Element {
                        key: Some(key),
                        value,
                    });
                }
                _ => {
                    let value = self.lower_expr(&child);
                    elements.push(Element { key: None, value });
                }
            }
        }
        elements
    }
}
