//! Depth-first traversal with paired enter/leave hooks.

use super::{
    Block, Decl, Element, Expr, ExprKind, File, FuncDecl, FuncLit, GenDecl, Spec, Stmt,
};

/// A node handed to a [`Visitor`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    FuncDecl(&'a FuncDecl),
    FuncLit(&'a FuncLit),
    GenDecl(&'a GenDecl),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

/// Hooks called before and after a node's children are walked.
///
/// Returning an error aborts the walk immediately.
pub trait Visitor<'a> {
    type Error;

    fn enter(&mut self, node: Node<'a>) -> Result<(), Self::Error>;

    fn leave(&mut self, _node: Node<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk every declaration of `file` in source order.
///
/// # Errors
/// Propagates the first error returned by a hook.
pub fn walk_file<'a, V: Visitor<'a>>(file: &'a File, visitor: &mut V) -> Result<(), V::Error> {
    for decl in &file.decls {
        match decl {
            Decl::Func(func) => walk_func_decl(func, visitor)?,
            Decl::Gen(gen_decl) => walk_gen_decl(gen_decl, visitor)?,
        }
    }
    Ok(())
}

fn walk_func_decl<'a, V: Visitor<'a>>(func: &'a FuncDecl, v: &mut V) -> Result<(), V::Error> {
    v.enter(Node::FuncDecl(func))?;
    if let Some(body) = &func.body {
        walk_block(body, v)?;
    }
    v.leave(Node::FuncDecl(func))
}

fn walk_gen_decl<'a, V: Visitor<'a>>(decl: &'a GenDecl, v: &mut V) -> Result<(), V::Error> {
    v.enter(Node::GenDecl(decl))?;
    for spec in &decl.specs {
        if let Spec::Value(value) = spec {
            walk_exprs(&value.values, v)?;
        }
    }
    v.leave(Node::GenDecl(decl))
}

fn walk_block<'a, V: Visitor<'a>>(block: &'a Block, v: &mut V) -> Result<(), V::Error> {
    block.stmts.iter().try_for_each(|stmt| walk_stmt(stmt, v))
}

fn walk_stmt<'a, V: Visitor<'a>>(stmt: &'a Stmt, v: &mut V) -> Result<(), V::Error> {
    v.enter(Node::Stmt(stmt))?;
    match stmt {
        Stmt::Expr(expr) => walk_expr(expr, v)?,
        Stmt::Define { values, .. } => walk_exprs(values, v)?,
        Stmt::Assign { lhs, rhs } => {
            walk_exprs(lhs, v)?;
            walk_exprs(rhs, v)?;
        }
        Stmt::Decl(decl) => walk_gen_decl(decl, v)?,
        Stmt::Return(values) => walk_exprs(values, v)?,
        Stmt::Block(block) => walk_block(block, v)?,
        Stmt::Range(range) => {
            if let Some(key) = &range.key {
                walk_expr(key, v)?;
            }
            if let Some(value) = &range.value {
                walk_expr(value, v)?;
            }
            walk_expr(&range.expr, v)?;
            walk_block(&range.body, v)?;
        }
        Stmt::TypeSwitch(switch) => {
            if let Some(init) = &switch.init {
                walk_stmt(init, v)?;
            }
            walk_expr(&switch.operand, v)?;
            for case in &switch.cases {
                walk_block(&case.body, v)?;
            }
        }
    }
    v.leave(Node::Stmt(stmt))
}

fn walk_exprs<'a, V: Visitor<'a>>(exprs: &'a [Expr], v: &mut V) -> Result<(), V::Error> {
    exprs.iter().try_for_each(|expr| walk_expr(expr, v))
}

fn walk_expr<'a, V: Visitor<'a>>(expr: &'a Expr, v: &mut V) -> Result<(), V::Error> {
    v.enter(Node::Expr(expr))?;
    match &expr.kind {
        ExprKind::Ident(_) | ExprKind::Lit(_) | ExprKind::Type(_) => {}
        ExprKind::Selector { operand, .. } | ExprKind::Paren(operand) => walk_expr(operand, v)?,
        ExprKind::TypeAssert { operand, .. } | ExprKind::Unary { operand, .. } => {
            walk_expr(operand, v)?;
        }
        ExprKind::Composite { elements, .. } => walk_elements(elements, v)?,
        ExprKind::Call { func, args } => {
            walk_expr(func, v)?;
            walk_exprs(args, v)?;
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            walk_expr(lhs, v)?;
            walk_expr(rhs, v)?;
        }
        ExprKind::Index {
            operand,
            index: rest,
        }
        | ExprKind::Slice {
            operand,
            bounds: rest,
        } => {
            walk_expr(operand, v)?;
            walk_exprs(rest, v)?;
        }
        ExprKind::FuncLit(lit) => {
            v.enter(Node::FuncLit(lit))?;
            walk_block(&lit.body, v)?;
            v.leave(Node::FuncLit(lit))?;
        }
        ExprKind::Opaque(children) => walk_exprs(children, v)?,
    }
    v.leave(Node::Expr(expr))
}

fn walk_elements<'a, V: Visitor<'a>>(elements: &'a [Element], v: &mut V) -> Result<(), V::Error> {
    for element in elements {
        if let Some(key) = &element.key {
            walk_expr(key, v)?;
        }
        walk_expr(&element.value, v)?;
    }
    Ok(())
}
