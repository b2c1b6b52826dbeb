//! Lowered Go syntax tree.
//!
//! The tree keeps the declarations, statements and expressions the checker
//! and the type resolver reason about. Syntax neither of them models is
//! kept as [`ExprKind::Opaque`] so nested expressions are still visited.
//!
//! Every identifier, expression, type expression and function node carries
//! a [`NodeId`] that is unique within one compilation unit and keys the
//! oracle's type table.

pub mod visit;

pub use visit::{Node, Visitor, walk_file};

use crate::span::{FileId, Span};

/// Identity of a syntax node within a compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Hands out fresh [`NodeId`]s for one compilation unit.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub const fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

impl Ident {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

#[derive(Debug, Clone)]
pub struct File {
    pub id: FileId,
    pub package: String,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

/// A top-level function or method declaration.
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub id: NodeId,
    pub span: Span,
    pub name: Ident,
    pub receiver: Option<Param>,
    pub signature: FuncSig,
    pub body: Option<Block>,
}

impl FuncDecl {
    #[must_use]
    pub const fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct FuncLit {
    pub id: NodeId,
    pub span: Span,
    pub signature: FuncSig,
    pub body: Block,
}

#[derive(Debug, Clone, Default)]
pub struct FuncSig {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

/// One parameter group: `a, b int`, `...string`, or an unnamed result type.
#[derive(Debug, Clone)]
pub struct Param {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKind {
    Var,
    Const,
    Type,
}

#[derive(Debug, Clone)]
pub struct GenDecl {
    pub kind: GenKind,
    pub span: Span,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone)]
pub enum Spec {
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `var`/`const` names with an optional type and initializers.
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: Ident,
    pub ty: TypeExpr,
    /// `type A = B`
    pub alias: bool,
}

#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub id: NodeId,
    pub span: Span,
    pub kind: TypeExprKind,
}

#[derive(Debug, Clone)]
pub enum TypeExprKind {
    Name(String),
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(Box<TypeExpr>),
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan(Box<TypeExpr>),
    Func(FuncSig),
    Struct(Vec<FieldDecl>),
    Interface(Vec<Ident>),
    /// `List[T]`; arguments are not tracked.
    Generic(Box<TypeExpr>),
    Unknown,
}

/// A struct field declaration. Embedded fields carry no names.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub embedded: bool,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub span: Span,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(Expr),
    /// `a, b := x, y`
    Define { names: Vec<Ident>, values: Vec<Expr> },
    /// `lhs = rhs`, `lhs += rhs`
    Assign { lhs: Vec<Expr>, rhs: Vec<Expr> },
    Decl(GenDecl),
    Return(Vec<Expr>),
    /// Any compound statement. Headers (init statements, conditions,
    /// switch tags) are lowered into the block ahead of the body.
    Block(Block),
    Range(Box<RangeStmt>),
    TypeSwitch(Box<TypeSwitchStmt>),
}

/// `for key, value := range expr { ... }`
#[derive(Debug, Clone)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    pub define: bool,
    pub expr: Expr,
    pub body: Block,
}

/// `switch alias := operand.(type) { case T: ... }`
#[derive(Debug, Clone)]
pub struct TypeSwitchStmt {
    /// Init statement ahead of the guard, if any.
    pub init: Option<Box<Stmt>>,
    pub alias: Option<Ident>,
    pub operand: Expr,
    pub cases: Vec<TypeCase>,
}

/// One clause of a type switch. `types` is empty for `default`; a
/// `nil` entry is kept as the type name `nil`.
#[derive(Debug, Clone)]
pub struct TypeCase {
    pub types: Vec<TypeExpr>,
    pub body: Block,
}

impl TypeCase {
    /// The single type this clause names, which is also the type of the
    /// switch alias inside it. `None` for `default`, `nil` and lists.
    #[must_use]
    pub fn single_type(&self) -> Option<&TypeExpr> {
        match self.types.as_slice() {
            [ty] if !matches!(&ty.kind, TypeExprKind::Name(name) if name == "nil") => Some(ty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imaginary,
    Rune,
    String,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Ident(String),
    Lit(LitKind),
    /// `operand.member`
    Selector { operand: Box<Expr>, member: Ident },
    /// `T{...}`; `ty` is absent for elided inner literals.
    Composite {
        ty: Option<TypeExpr>,
        elements: Vec<Element>,
    },
    Call { func: Box<Expr>, args: Vec<Expr> },
    Unary { op: String, operand: Box<Expr> },
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Index { operand: Box<Expr>, index: Vec<Expr> },
    Slice { operand: Box<Expr>, bounds: Vec<Expr> },
    Paren(Box<Expr>),
    /// `x.(T)`; `ty` is absent for `x.(type)`.
    TypeAssert {
        operand: Box<Expr>,
        ty: Option<TypeExpr>,
    },
    FuncLit(Box<FuncLit>),
    /// A type in expression position, e.g. the callee of `[]byte(s)`.
    Type(TypeExpr),
    /// Syntax without a dedicated node; children are still walked.
    Opaque(Vec<Expr>),
}

/// One entry of a composite literal.
#[derive(Debug, Clone)]
pub struct Element {
    /// Key of a keyed entry: a field name for struct literals, an
    /// arbitrary expression for map, slice and array literals.
    pub key: Option<Expr>,
    pub value: Expr,
}

impl Element {
    /// The key as a bare identifier, as used for struct field names.
    #[must_use]
    pub fn key_name(&self) -> Option<&str> {
        match &self.key.as_ref()?.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}
