//! Statements, local declarations and bindings.

use fp_core::ast::{
    Block, Expr, ExprKind, GenDecl, GenKind, Ident, NodeId, RangeStmt, Spec, Stmt, TypeSwitchStmt,
};
use fp_core::types::Type;

use super::Resolver;
use super::exprs::known;
use super::scope::Binding;

impl Resolver<'_> {
    pub(super) fn resolve_block(&mut self, block: &Block) {
        self.scopes.push();
        for stmt in &block.stmts {
            self.resolve_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                self.expr_type(expr, None);
            }
            Stmt::Define { names, values } => {
                let types = self.type_values(values, names.len(), None);
                for (idx, name) in names.iter().enumerate() {
                    self.declare_value(name, types.get(idx).cloned().flatten());
                }
            }
            Stmt::Assign { lhs, rhs } => {
                for expr in rhs.iter().chain(lhs.iter()) {
                    self.expr_type(expr, None);
                }
            }
            Stmt::Decl(decl) => self.resolve_value_decl(decl),
            Stmt::Return(values) => {
                for expr in values {
                    self.expr_type(expr, None);
                }
            }
            Stmt::Block(block) => self.resolve_block(block),
            Stmt::Range(range) => self.resolve_range(range),
            Stmt::TypeSwitch(switch) => self.resolve_type_switch(switch),
        }
    }

    /// `var`, `const` and local `type` declarations. Outside any scope
    /// the names become package globals.
    pub(super) fn resolve_value_decl(&mut self, decl: &GenDecl) {
        if decl.kind == GenKind::Type {
            self.declare_local_types(decl);
            return;
        }
        // A const spec without type or values repeats the previous one.
        let mut carried: Option<Type> = None;
        for spec in &decl.specs {
            let Spec::Value(spec) = spec else {
                continue;
            };
            let explicit = spec.ty.as_ref().map(|ty| self.resolve_type_expr(ty));
            let expected = explicit.clone().flatten();
            let value_types = self.type_values(&spec.values, spec.names.len(), expected.as_ref());
            let repeats = decl.kind == GenKind::Const && spec.values.is_empty() && explicit.is_none();
            for (idx, name) in spec.names.iter().enumerate() {
                let ty = match &explicit {
                    Some(ty) => ty.clone(),
                    None if repeats => carried.clone(),
                    None => value_types.get(idx).cloned().flatten(),
                };
                self.declare_value(name, ty);
            }
            if !repeats {
                carried = match explicit {
                    Some(ty) => ty,
                    None => value_types.first().cloned().flatten(),
                };
            }
        }
    }

    fn declare_local_types(&mut self, decl: &GenDecl) {
        for spec in &decl.specs {
            let Spec::Type(spec) = spec else {
                continue;
            };
            if spec.alias {
                let target = self.resolve_type_expr(&spec.ty);
                if let Some(Type::Named(id)) = target {
                    self.scopes.bind(&spec.name.name, Binding::TypeName(id));
                    self.record(spec.name.id, &Type::Named(id));
                }
                continue;
            }
            let id = self.new_named(&spec.name.name, spec.name.span.start_pos());
            self.scopes.bind(&spec.name.name, Binding::TypeName(id));
            self.record(spec.name.id, &Type::Named(id));
            let shape = self.shape_of(&spec.ty);
            if let Some(named) = self.info.named.get_mut(id.0 as usize) {
                named.shape = shape;
            }
        }
    }

    /// Types produced by the right-hand side of a definition with
    /// `names` targets. A single multi-value expression is spread; the
    /// comma-ok forms yield `bool` for the second target.
    fn type_values(&mut self, values: &[Expr], names: usize, expected: Option<&Type>) -> Vec<Option<Type>> {
        if let [single] = values
            && names > 1
        {
            return match self.expr_type(single, expected) {
                Some(Type::Tuple(types)) => types.into_iter().map(known).collect(),
                other => vec![other, Some(Type::basic("bool"))],
            };
        }
        values
            .iter()
            .map(|value| self.expr_type(value, expected))
            .collect()
    }

    pub(super) fn declare_value(&mut self, name: &Ident, ty: Option<Type>) {
        self.declare_name(name.id, &name.name, ty);
    }

    fn declare_name(&mut self, id: NodeId, name: &str, ty: Option<Type>) {
        if name == "_" {
            return;
        }
        if let Some(ty) = &ty {
            self.record(id, ty);
        }
        if self.scopes.is_empty() {
            if let Some(ty) = ty {
                self.globals.insert(name.to_string(), ty);
            }
        } else {
            self.scopes.bind(name, Binding::Value(ty));
        }
    }

    fn resolve_range(&mut self, range: &RangeStmt) {
        let collection = self.expr_type(&range.expr, None);
        let (key_ty, value_ty) = collection
            .map(|ty| self.range_types(&ty))
            .unwrap_or_default();
        self.scopes.push();
        for (target, ty) in [(&range.key, key_ty), (&range.value, value_ty)] {
            let Some(target) = target else {
                continue;
            };
            match &target.kind {
                ExprKind::Ident(name) if range.define => self.declare_name(target.id, name, ty),
                _ => {
                    self.expr_type(target, None);
                }
            }
        }
        for stmt in &range.body.stmts {
            self.resolve_stmt(stmt);
        }
        self.scopes.pop();
    }

    /// The alias takes the clause's type when the clause names exactly
    /// one type, and the operand's type otherwise.
    fn resolve_type_switch(&mut self, switch: &TypeSwitchStmt) {
        self.scopes.push();
        if let Some(init) = &switch.init {
            self.resolve_stmt(init);
        }
        let operand = self.expr_type(&switch.operand, None);
        for case in &switch.cases {
            let listed: Vec<Option<Type>> = case
                .types
                .iter()
                .map(|ty| self.resolve_type_expr(ty))
                .collect();
            let alias_ty = match (case.single_type(), listed.as_slice()) {
                (Some(_), [ty]) => ty.clone(),
                _ => operand.clone(),
            };
            self.scopes.push();
            if let Some(alias) = &switch.alias {
                self.declare_value(alias, alias_ty);
            }
            for stmt in &case.body.stmts {
                self.resolve_stmt(stmt);
            }
            self.scopes.pop();
        }
        self.scopes.pop();
    }

    fn range_types(&self, ty: &Type) -> (Option<Type>, Option<Type>) {
        let int = || Some(Type::basic("int"));
        match self.underlying(ty) {
            Type::Slice(elem) | Type::Array(elem) => (int(), known(*elem)),
            Type::Pointer(inner) => match self.underlying(&inner) {
                Type::Array(elem) => (int(), known(*elem)),
                _ => (None, None),
            },
            Type::Map { key, value } => (known(*key), known(*value)),
            Type::Chan(elem) => (known(*elem), None),
            Type::Basic(name) if name == "string" => (int(), Some(Type::basic("rune"))),
            Type::Basic(name) if name.starts_with("int") || name.starts_with("uint") => {
                (Some(Type::Basic(name)), None)
            }
            _ => (None, None),
        }
    }
}
