//! Expression typing.

use fp_core::ast::{Element, Expr, ExprKind, FuncLit, LitKind};
use fp_core::types::{Field, Signature, Type};

use super::{MAX_CHAIN, Resolver};

/// Drop the invalid placeholder.
pub(super) fn known(ty: Type) -> Option<Type> {
    (!ty.is_invalid()).then_some(ty)
}

const BUILTIN_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

impl Resolver<'_> {
    /// Type `expr` and everything nested in it, recording each result.
    ///
    /// `expected` is the type an elided composite literal takes from its
    /// enclosing literal.
    pub(crate) fn expr_type(&mut self, expr: &Expr, expected: Option<&Type>) -> Option<Type> {
        let ty = self.compute_expr_type(expr, expected).and_then(known);
        if let Some(ty) = &ty {
            self.record(expr.id, ty);
        }
        ty
    }

    fn compute_expr_type(&mut self, expr: &Expr, expected: Option<&Type>) -> Option<Type> {
        match &expr.kind {
            ExprKind::Ident(name) => self.value_of_name(name),
            ExprKind::Lit(kind) => Some(Type::basic(match kind {
                LitKind::Int => "int",
                LitKind::Float => "float64",
                LitKind::Imaginary => "complex128",
                LitKind::Rune => "rune",
                LitKind::String => "string",
            })),
            ExprKind::Selector { operand, member } => {
                let operand_ty = match self.expr_as_type(operand) {
                    // Method expression `T.method`.
                    Some(ty) => {
                        self.record(operand.id, &ty);
                        Some(ty)
                    }
                    None => self.expr_type(operand, None),
                };
                let member_ty = self.select_member(&operand_ty?, &member.name, 0);
                if let Some(ty) = &member_ty {
                    self.record(member.id, ty);
                }
                member_ty
            }
            ExprKind::Composite { ty, elements } => {
                let lit_ty = match ty {
                    Some(ty) => self.resolve_type_expr(ty),
                    // `[]*T{{...}}` elides `&T`.
                    None => expected.map(|t| t.deref().clone()),
                };
                self.type_elements(lit_ty.as_ref(), elements);
                lit_ty
            }
            ExprKind::Call { func, args } => self.call_type(func, args),
            ExprKind::Unary { op, operand } => {
                let operand_ty = self.expr_type(operand, None);
                match op.as_str() {
                    "&" => operand_ty.map(Type::pointer_to),
                    "*" => match operand_ty? {
                        Type::Pointer(inner) => Some(*inner),
                        _ => None,
                    },
                    "<-" => match self.underlying(&operand_ty?) {
                        Type::Chan(elem) => Some(*elem),
                        _ => None,
                    },
                    "!" => Some(Type::basic("bool")),
                    _ => operand_ty,
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.expr_type(lhs, None);
                let rhs_ty = self.expr_type(rhs, None);
                match op.as_str() {
                    "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||" => Some(Type::basic("bool")),
                    "<<" | ">>" => lhs_ty,
                    _ => lhs_ty.or(rhs_ty),
                }
            }
            ExprKind::Index { operand, index } => {
                // `List[int]` instantiates a generic type.
                if let Some(ty) = self.expr_as_type(operand) {
                    for idx in index {
                        self.expr_type(idx, None);
                    }
                    self.record(operand.id, &ty);
                    return None;
                }
                let operand_ty = self.expr_type(operand, None);
                for idx in index {
                    self.expr_type(idx, None);
                }
                self.element_type(&operand_ty?)
            }
            ExprKind::Slice { operand, bounds } => {
                let operand_ty = self.expr_type(operand, None);
                for bound in bounds {
                    self.expr_type(bound, None);
                }
                let operand_ty = operand_ty?;
                match self.underlying(operand_ty.deref()) {
                    Type::Array(elem) => Some(Type::Slice(elem)),
                    _ => Some(operand_ty),
                }
            }
            ExprKind::Paren(inner) => self.expr_type(inner, expected),
            ExprKind::TypeAssert { operand, ty } => {
                self.expr_type(operand, None);
                ty.as_ref().and_then(|ty| self.resolve_type_expr(ty))
            }
            ExprKind::FuncLit(lit) => Some(self.func_lit_type(lit)),
            ExprKind::Type(ty) => {
                self.resolve_type_expr(ty);
                None
            }
            ExprKind::Opaque(children) => {
                for child in children {
                    self.expr_type(child, None);
                }
                None
            }
        }
    }

    /// A name in value position: locals, package variables, functions,
    /// then predeclared constants.
    fn value_of_name(&mut self, name: &str) -> Option<Type> {
        if name == "_" {
            return None;
        }
        if let Some(binding) = self.scopes.lookup(name) {
            return binding.as_value();
        }
        if let Some(ty) = self.globals.get(name) {
            return Some(ty.clone());
        }
        if let Some(sig) = self.funcs.get(name) {
            return Some(Type::Func(Box::new(sig.clone())));
        }
        match name {
            "true" | "false" => Some(Type::basic("bool")),
            "iota" => Some(Type::basic("int")),
            _ => None,
        }
    }

    /// `expr` read as a type, for conversions and method expressions.
    fn expr_as_type(&mut self, expr: &Expr) -> Option<Type> {
        match &expr.kind {
            ExprKind::Ident(name) => self.lookup_type_name(name),
            ExprKind::Type(ty) => self.resolve_type_expr(ty),
            ExprKind::Paren(inner) => self.expr_as_type(inner),
            ExprKind::Unary { op, operand } if op == "*" => {
                self.expr_as_type(operand).map(Type::pointer_to)
            }
            _ => None,
        }
    }

    fn call_type(&mut self, func: &Expr, args: &[Expr]) -> Option<Type> {
        if let Some(target) = self.expr_as_type(func) {
            self.record(func.id, &target);
            for arg in args {
                self.expr_type(arg, None);
            }
            return Some(target);
        }
        if let ExprKind::Ident(name) = &func.kind
            && self.is_builtin(name)
        {
            return self.builtin_call_type(name, args);
        }
        let func_ty = self.expr_type(func, None);
        for arg in args {
            self.expr_type(arg, None);
        }
        let Type::Func(sig) = self.underlying(&func_ty?) else {
            return None;
        };
        results_type(&sig)
    }

    fn is_builtin(&self, name: &str) -> bool {
        BUILTIN_FUNCS.contains(&name)
            && self.scopes.lookup(name).is_none()
            && !self.globals.contains_key(name)
            && !self.funcs.contains_key(name)
    }

    fn builtin_call_type(&mut self, name: &str, args: &[Expr]) -> Option<Type> {
        let (first, rest) = args.split_first()?;
        let result = match name {
            "new" | "make" => {
                let ty = self.expr_as_type(first);
                if let Some(ty) = &ty {
                    self.record(first.id, ty);
                }
                if name == "new" {
                    ty.map(Type::pointer_to)
                } else {
                    ty
                }
            }
            "append" | "min" | "max" => self.expr_type(first, None),
            "len" | "cap" | "copy" => {
                self.expr_type(first, None);
                Some(Type::basic("int"))
            }
            _ => {
                self.expr_type(first, None);
                None
            }
        };
        for arg in rest {
            self.expr_type(arg, None);
        }
        result
    }

    fn func_lit_type(&mut self, lit: &FuncLit) -> Type {
        let sig = self.resolve_signature(&lit.signature);
        self.scopes.push();
        self.declare_params(&lit.signature);
        self.resolve_block(&lit.body);
        self.scopes.pop();
        let ty = Type::Func(Box::new(sig));
        self.record(lit.id, &ty);
        ty
    }

    fn type_elements(&mut self, lit_ty: Option<&Type>, elements: &[Element]) {
        let underlying = lit_ty.map(|t| self.underlying(t));
        match underlying {
            Some(Type::Struct(fields)) => {
                for (idx, element) in elements.iter().enumerate() {
                    // Keys of a struct literal are field names, not values.
                    let field = match element.key_name() {
                        Some(name) => fields.iter().find(|f| f.name == name),
                        None if element.key.is_none() => fields.get(idx),
                        None => None,
                    };
                    if let (Some(key), Some(field)) = (&element.key, field) {
                        self.record(key.id, &field.ty);
                    }
                    let expected = field.map(|f| f.ty.clone());
                    self.expr_type(&element.value, expected.as_ref());
                }
            }
            Some(Type::Slice(elem) | Type::Array(elem)) => {
                for element in elements {
                    if let Some(key) = &element.key {
                        self.expr_type(key, None);
                    }
                    self.expr_type(&element.value, Some(elem.as_ref()));
                }
            }
            Some(Type::Map { key, value }) => {
                for element in elements {
                    if let Some(k) = &element.key {
                        self.expr_type(k, Some(key.as_ref()));
                    }
                    self.expr_type(&element.value, Some(value.as_ref()));
                }
            }
            _ => {
                for element in elements {
                    if let Some(key) = &element.key {
                        self.expr_type(key, None);
                    }
                    self.expr_type(&element.value, None);
                }
            }
        }
    }

    /// Field or method `name` of `ty`, including members promoted
    /// through embedded fields.
    fn select_member(&self, ty: &Type, name: &str, depth: usize) -> Option<Type> {
        if depth > MAX_CHAIN {
            return None;
        }
        let base = ty.deref();
        if let Type::Named(id) = base
            && let Some(sig) = self.info.named_type(*id).and_then(|n| n.method(name))
        {
            return Some(Type::Func(Box::new(sig.clone())));
        }
        let fields: Vec<Field> = match self.underlying(base) {
            Type::Struct(fields) => fields,
            _ => return None,
        };
        if let Some(field) = fields.iter().find(|f| f.name == name) {
            return known(field.ty.clone());
        }
        fields
            .iter()
            .filter(|f| f.embedded)
            .find_map(|f| self.select_member(&f.ty, name, depth + 1))
    }

    fn element_type(&self, ty: &Type) -> Option<Type> {
        match self.underlying(ty) {
            Type::Slice(elem) | Type::Array(elem) => known(*elem),
            Type::Map { value, .. } => known(*value),
            Type::Pointer(inner) => match self.underlying(&inner) {
                Type::Array(elem) => known(*elem),
                _ => None,
            },
            Type::Basic(name) if name == "string" => Some(Type::basic("byte")),
            _ => None,
        }
    }
}

fn results_type(sig: &Signature) -> Option<Type> {
    match sig.results.as_slice() {
        [] => None,
        [single] => known(single.clone()),
        many => Some(Type::Tuple(many.to_vec())),
    }
}
