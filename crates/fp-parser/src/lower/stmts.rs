//! Statements and blocks.
//!
//! Compound statements (`if`, `switch`, `select`, plain `for`) become a
//! [`Stmt::Block`] whose statements are the header parts followed by the
//! body, which keeps header variables scoped to the statement. Type
//! switches keep their clauses so the alias can be typed per clause.

use fp_core::ast::{
    Block, Expr, ExprKind, RangeStmt, Stmt, TypeCase, TypeExpr, TypeExprKind, TypeSwitchStmt,
};

use super::exprs::is_expr_kind;
use super::type_exprs::is_type_kind;
use super::{Lowerer, named_children};
use crate::parser::GoNode;

const CASE_KINDS: &[&str] = &[
    "expression_case",
    "default_case",
    "type_case",
    "communication_case",
];

impl Lowerer<'_> {
    pub(super) fn lower_block(&mut self, node: &GoNode<'_>) -> Block {
        let mut stmts = Vec::new();
        self.lower_into(node, &mut stmts);
        Block {
            span: self.span(node),
            stmts,
        }
    }

    pub(super) fn empty_block(&self, node: &GoNode<'_>) -> Block {
        Block {
            span: self.span(node),
            stmts: Vec::new(),
        }
    }

    /// Lower every named child of `node` into `out`.
    fn lower_into(&mut self, node: &GoNode<'_>, out: &mut Vec<Stmt>) {
        for child in named_children(node) {
            let kind = child.kind();
            let kind = kind.as_ref();
            if CASE_KINDS.contains(&kind) {
                out.push(Stmt::Block(self.lower_block(&child)));
            } else if kind == "statement_list" || kind == "for_clause" {
                self.lower_into(&child, out);
            } else if kind == "expression_list" {
                out.extend(self.lower_expr_list(&child).into_iter().map(Stmt::Expr));
            } else if is_expr_kind(kind) {
                out.push(Stmt::Expr(self.lower_expr(&child)));
            } else if is_type_kind(kind) || kind == "label_name" || kind == "field_identifier" {
                continue;
            } else if let Some(stmt) = self.lower_stmt(&child) {
                out.push(stmt);
            }
        }
    }

    fn lower_stmt(&mut self, node: &GoNode<'_>) -> Option<Stmt> {
        match node.kind().as_ref() {
            "expression_statement" => {
                let inner = named_children(node).next()?;
                Some(Stmt::Expr(self.lower_expr(&inner)))
            }
            "assignment_statement" => {
                let lhs = node
                    .field("left")
                    .map(|l| self.lower_expr_list(&l))
                    .unwrap_or_default();
                let rhs = node
                    .field("right")
                    .map(|r| self.lower_expr_list(&r))
                    .unwrap_or_default();
                Some(Stmt::Assign { lhs, rhs })
            }
            "short_var_declaration" => {
                let names = node
                    .field("left")
                    .map(|l| {
                        named_children(&l)
                            .filter(|c| c.kind().as_ref() == "identifier")
                            .map(|c| self.ident(&c))
                            .collect()
                    })
                    .unwrap_or_default();
                let values = node
                    .field("right")
                    .map(|r| self.lower_expr_list(&r))
                    .unwrap_or_default();
                Some(Stmt::Define { names, values })
            }
            "var_declaration" | "const_declaration" | "type_declaration" => {
                Some(Stmt::Decl(self.lower_gen_decl(node)))
            }
            "return_statement" => {
                let values = named_children(node)
                    .next()
                    .map(|list| self.lower_expr_list(&list))
                    .unwrap_or_default();
                Some(Stmt::Return(values))
            }
            "block" => Some(Stmt::Block(self.lower_block(node))),
            "for_statement" => {
                let range = named_children(node).find(|c| c.kind().as_ref() == "range_clause");
                match range {
                    Some(clause) => Some(self.lower_range(node, &clause)),
                    None => Some(Stmt::Block(self.lower_block(node))),
                }
            }
            "type_switch_statement" => Some(self.lower_type_switch(node)),
            "receive_statement" => Some(self.lower_receive(node)),
            "break_statement" | "continue_statement" | "goto_statement"
            | "fallthrough_statement" | "empty_statement" | "comment" => None,
            // if/switch/select/go/defer/send/inc/dec/labeled and anything
            // newer: keep every nested statement and expression.
            _ => Some(Stmt::Block(self.lower_block(node))),
        }
    }

    fn lower_range(&mut self, node: &GoNode<'_>, clause: &GoNode<'_>) -> Stmt {
        let define = clause.children().any(|c| c.kind().as_ref() == ":=");
        let mut targets = clause
            .field("left")
            .map(|l| self.lower_expr_list(&l))
            .unwrap_or_default()
            .into_iter();
        let key = targets.next();
        let value = targets.next();
        let expr = match clause.field("right") {
            Some(right) => self.lower_expr(&right),
            None => Expr {
                id: self.next_id(),
                span: self.span(clause),
                kind: ExprKind::Opaque(Vec::new()),
            },
        };
        let body = match node.field("body") {
            Some(body) => self.lower_block(&body),
            None => self.empty_block(node),
        };
        Stmt::Range(Box::new(RangeStmt {
            key,
            value,
            define,
            expr,
            body,
        }))
    }

    fn lower_type_switch(&mut self, node: &GoNode<'_>) -> Stmt {
        let init = node
            .field("initializer")
            .and_then(|init| self.lower_stmt(&init))
            .map(Box::new);
        let alias = node.field("alias").and_then(|list| {
            named_children(&list)
                .find(|c| c.kind().as_ref() == "identifier")
                .map(|c| self.ident(&c))
        });
        let operand = match node.field("value") {
            Some(value) => self.lower_expr(&value),
            None => Expr {
                id: self.next_id(),
                span: self.span(node),
                kind: ExprKind::Opaque(Vec::new()),
            },
        };
        let cases = named_children(node)
            .filter(|c| matches!(c.kind().as_ref(), "type_case" | "default_case"))
            .map(|case| self.lower_type_case(&case))
            .collect();
        Stmt::TypeSwitch(Box::new(TypeSwitchStmt {
            init,
            alias,
            operand,
            cases,
        }))
    }

    fn lower_type_case(&mut self, case: &GoNode<'_>) -> TypeCase {
        let mut types = Vec::new();
        for child in named_children(case) {
            let kind = child.kind();
            if kind.as_ref() == "nil" {
                types.push(TypeExpr {
                    id: self.next_id(),
                    span: self.span(&child),
                    kind: TypeExprKind::Name("nil".into()),
                });
            } else if is_type_kind(kind.as_ref()) {
                types.push(self.lower_type(&child));
            }
        }
        TypeCase {
            types,
            body: self.lower_block(case),
        }
    }

    /// `v, ok := <-ch` in a select clause binds its targets for the
    /// rest of the clause.
    fn lower_receive(&mut self, node: &GoNode<'_>) -> Stmt {
        let value = node.field("right").map(|r| self.lower_expr(&r));
        let Some(left) = node.field("left") else {
            return match value {
                Some(value) => Stmt::Expr(value),
                None => Stmt::Block(self.empty_block(node)),
            };
        };
        let values: Vec<Expr> = value.into_iter().collect();
        if node.children().any(|c| c.kind().as_ref() == ":=") {
            let names = named_children(&left)
                .filter(|c| c.kind().as_ref() == "identifier")
                .map(|c| self.ident(&c))
                .collect();
            Stmt::Define { names, values }
        } else {
            Stmt::Assign {
                lhs: self.lower_expr_list(&left),
                rhs: values,
            }
        }
    }
}
