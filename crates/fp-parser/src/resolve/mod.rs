//! Type resolution for one compilation unit.
//!
//! Passes, in order:
//! 1. declare every top-level named type so forward references resolve;
//! 2. resolve struct, interface and other shapes, then collapse
//!    `type X Y` chains onto the underlying shape;
//! 3. resolve function and method signatures, attaching methods to their
//!    receiver types;
//! 4. type package-level variables and constants;
//! 5. type every function body with lexical scopes.
//!
//! Anything that cannot be typed is left out of the table.

mod exprs;
mod scope;
mod stmts;

use std::collections::HashMap;

use fp_core::ast::{Decl, File, GenKind, NodeId, Spec, TypeExpr, TypeExprKind, TypeSpec};
use fp_core::types::{Field, NamedType, Signature, Type, TypeId, TypeShape};

use scope::Scopes;

/// Resolved types of a compilation unit.
#[derive(Debug, Default)]
pub struct TypeInfo {
    types: HashMap<NodeId, Type>,
    named: Vec<NamedType>,
}

impl TypeInfo {
    #[must_use]
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }

    #[must_use]
    pub fn named_type(&self, id: TypeId) -> Option<&NamedType> {
        self.named.get(id.0 as usize)
    }

    /// First named type declared with `name`.
    #[must_use]
    pub fn lookup_named(&self, name: &str) -> Option<TypeId> {
        self.named
            .iter()
            .position(|n| n.name == name)
            .and_then(|idx| u32::try_from(idx).ok())
            .map(TypeId)
    }
}

/// Resolve every file of one package.
#[must_use]
pub fn resolve_package(files: &[File]) -> TypeInfo {
    let mut resolver = Resolver::new();
    resolver.declare_types(files);
    resolver.resolve_shapes(files);
    resolver.resolve_signatures(files);
    resolver.resolve_globals(files);
    resolver.resolve_bodies(files);
    tracing::debug!(
        named = resolver.info.named.len(),
        typed_nodes = resolver.info.types.len(),
        "resolved package types"
    );
    resolver.info
}

const MAX_CHAIN: usize = 32;

pub(crate) struct Resolver<'a> {
    info: TypeInfo,
    type_names: HashMap<String, TypeId>,
    aliases: HashMap<String, &'a TypeExpr>,
    funcs: HashMap<String, Signature>,
    globals: HashMap<String, Type>,
    scopes: Scopes,
    alias_depth: usize,
}

impl<'a> Resolver<'a> {
    fn new() -> Self {
        Self {
            info: TypeInfo::default(),
            type_names: HashMap::new(),
            aliases: HashMap::new(),
            funcs: HashMap::new(),
            globals: HashMap::new(),
            scopes: Scopes::default(),
            alias_depth: 0,
        }
    }

    fn record(&mut self, node: NodeId, ty: &Type) {
        if !ty.is_invalid() {
            self.info.types.insert(node, ty.clone());
        }
    }

    fn type_specs(files: &'a [File]) -> impl Iterator<Item = &'a TypeSpec> {
        files
            .iter()
            .flat_map(|f| f.decls.iter())
            .filter_map(|d| match d {
                Decl::Gen(g) if g.kind == GenKind::Type => Some(g.specs.iter()),
                _ => None,
            })
            .flatten()
            .filter_map(|s| match s {
                Spec::Type(t) => Some(t),
                Spec::Value(_) => None,
            })
    }

    fn declare_types(&mut self, files: &'a [File]) {
        for spec in Self::type_specs(files) {
            if spec.alias {
                self.aliases.insert(spec.name.name.clone(), &spec.ty);
                continue;
            }
            let id = self.new_named(&spec.name.name, spec.name.span.start_pos());
            self.type_names.insert(spec.name.name.clone(), id);
            self.record(spec.name.id, &Type::Named(id));
        }
    }

    fn new_named(&mut self, name: &str, pos: fp_core::span::Pos) -> TypeId {
        let id = TypeId(u32::try_from(self.info.named.len()).unwrap_or(u32::MAX));
        self.info
            .named
            .push(NamedType::new(name, pos, TypeShape::Other(Type::Invalid)));
        id
    }

    fn resolve_shapes(&mut self, files: &'a [File]) {
        for spec in Self::type_specs(files) {
            if spec.alias {
                let target = self.resolve_type_expr(&spec.ty).unwrap_or(Type::Invalid);
                self.record(spec.name.id, &target);
                continue;
            }
            let Some(id) = self.type_names.get(&spec.name.name).copied() else {
                continue;
            };
            let shape = self.shape_of(&spec.ty);
            if let Some(named) = self.info.named.get_mut(id.0 as usize) {
                named.shape = shape;
            }
        }
        self.collapse_shape_chains();
    }

    /// Underlying shape of a type expression used as a type definition.
    fn shape_of(&mut self, ty: &TypeExpr) -> TypeShape {
        match &ty.kind {
            TypeExprKind::Struct(_) | TypeExprKind::Interface(_) => {
                match self.resolve_type_expr(ty) {
                    Some(Type::Struct(fields)) => TypeShape::Struct(fields),
                    Some(Type::Interface(methods)) => TypeShape::Interface(methods),
                    other => TypeShape::Other(other.unwrap_or(Type::Invalid)),
                }
            }
            _ => TypeShape::Other(self.resolve_type_expr(ty).unwrap_or(Type::Invalid)),
        }
    }

    /// `type X Y` shares the underlying shape of `Y`.
    fn collapse_shape_chains(&mut self) {
        for _ in 0..MAX_CHAIN {
            let mut changed = false;
            for idx in 0..self.info.named.len() {
                let TypeShape::Other(Type::Named(target)) = &self.info.named[idx].shape else {
                    continue;
                };
                let target = target.0 as usize;
                if target == idx {
                    continue;
                }
                let Some(target_shape) = self.info.named.get(target).map(|n| n.shape.clone())
                else {
                    continue;
                };
                if matches!(target_shape, TypeShape::Other(Type::Named(_))) {
                    continue;
                }
                self.info.named[idx].shape = target_shape;
                changed = true;
            }
            if !changed {
                break;
            }
        }
    }

    fn resolve_signatures(&mut self, files: &'a [File]) {
        for func in files.iter().flat_map(|f| f.decls.iter()).filter_map(|d| match d {
            Decl::Func(func) => Some(func),
            Decl::Gen(_) => None,
        }) {
            let signature = self.resolve_signature(&func.signature);
            self.record(func.name.id, &Type::Func(Box::new(signature.clone())));
            match &func.receiver {
                Some(receiver) => {
                    let recv_ty = self.resolve_type_expr(&receiver.ty);
                    let Some(id) = recv_ty.as_ref().and_then(Type::named_id) else {
                        continue;
                    };
                    if let Some(named) = self.info.named.get_mut(id.0 as usize) {
                        named.methods.push((func.name.name.clone(), signature));
                    }
                }
                None => {
                    if !func.name.is_blank() && func.name.name != "init" {
                        self.funcs.insert(func.name.name.clone(), signature);
                    }
                }
            }
        }
    }

    pub(crate) fn resolve_signature(&mut self, sig: &fp_core::ast::FuncSig) -> Signature {
        let mut params = Vec::new();
        let mut variadic = false;
        for param in &sig.params {
            let mut ty = self.resolve_type_expr(&param.ty).unwrap_or(Type::Invalid);
            if param.variadic {
                variadic = true;
                ty = Type::Slice(Box::new(ty));
            }
            params.extend(std::iter::repeat_n(ty, param.names.len().max(1)));
        }
        let mut results = Vec::new();
        for result in &sig.results {
            let ty = self.resolve_type_expr(&result.ty).unwrap_or(Type::Invalid);
            results.extend(std::iter::repeat_n(ty, result.names.len().max(1)));
        }
        Signature {
            params,
            results,
            variadic,
        }
    }

    fn resolve_globals(&mut self, files: &'a [File]) {
        // Two rounds so initializers may refer to variables declared later.
        for _ in 0..2 {
            for file in files {
                for decl in &file.decls {
                    if let Decl::Gen(gen_decl) = decl
                        && gen_decl.kind != GenKind::Type
                    {
                        self.resolve_value_decl(gen_decl);
                    }
                }
            }
        }
    }

    fn resolve_bodies(&mut self, files: &'a [File]) {
        for func in files.iter().flat_map(|f| f.decls.iter()).filter_map(|d| match d {
            Decl::Func(func) => Some(func),
            Decl::Gen(_) => None,
        }) {
            let Some(body) = &func.body else {
                continue;
            };
            self.scopes.push();
            if let Some(receiver) = &func.receiver {
                let recv_ty = self.resolve_type_expr(&receiver.ty);
                for name in &receiver.names {
                    self.declare_value(name, recv_ty.clone());
                }
            }
            self.declare_params(&func.signature);
            self.resolve_block(body);
            self.scopes.pop();
        }
    }

    fn declare_params(&mut self, sig: &fp_core::ast::FuncSig) {
        for param in sig.params.iter().chain(sig.results.iter()) {
            let mut ty = self.resolve_type_expr(&param.ty);
            if param.variadic {
                ty = ty.map(|t| Type::Slice(Box::new(t)));
            }
            for name in &param.names {
                self.declare_value(name, ty.clone());
            }
        }
    }

    /// Resolve a type expression, recording it. `None` when unknown.
    pub(crate) fn resolve_type_expr(&mut self, ty: &TypeExpr) -> Option<Type> {
        let resolved = match &ty.kind {
            TypeExprKind::Name(name) => self.lookup_type_name(name),
            TypeExprKind::Qualified { package, name } => Some(Type::Basic(format!("{package}.{name}"))),
            TypeExprKind::Pointer(inner) => self.resolve_type_expr(inner).map(Type::pointer_to),
            TypeExprKind::Slice(inner) => {
                self.resolve_type_expr(inner).map(|t| Type::Slice(Box::new(t)))
            }
            TypeExprKind::Array(inner) => {
                self.resolve_type_expr(inner).map(|t| Type::Array(Box::new(t)))
            }
            TypeExprKind::Chan(inner) => {
                self.resolve_type_expr(inner).map(|t| Type::Chan(Box::new(t)))
            }
            TypeExprKind::Map { key, value } => {
                let key = self.resolve_type_expr(key);
                let value = self.resolve_type_expr(value);
                Some(Type::Map {
                    key: Box::new(key.unwrap_or(Type::Invalid)),
                    value: Box::new(value.unwrap_or(Type::Invalid)),
                })
            }
            TypeExprKind::Func(sig) => Some(Type::Func(Box::new(self.resolve_signature(sig)))),
            TypeExprKind::Struct(decls) => {
                let mut fields = Vec::new();
                for decl in decls {
                    let field_ty = self.resolve_type_expr(&decl.ty).unwrap_or(Type::Invalid);
                    if decl.embedded {
                        if let Some(name) = embedded_name(&decl.ty) {
                            fields.push(Field {
                                name,
                                ty: field_ty,
                                embedded: true,
                            });
                        }
                        continue;
                    }
                    for name in &decl.names {
                        self.record(name.id, &field_ty);
                        fields.push(Field {
                            name: name.name.clone(),
                            ty: field_ty.clone(),
                            embedded: false,
                        });
                    }
                }
                Some(Type::Struct(fields))
            }
            TypeExprKind::Interface(methods) => Some(Type::Interface(
                methods.iter().map(|m| m.name.clone()).collect(),
            )),
            TypeExprKind::Generic(base) => self.resolve_type_expr(base),
            TypeExprKind::Unknown => None,
        };
        if let Some(resolved) = &resolved {
            self.record(ty.id, resolved);
        }
        resolved
    }

    /// A type name in the current scope: local types, package types,
    /// aliases, then predeclared types.
    pub(crate) fn lookup_type_name(&mut self, name: &str) -> Option<Type> {
        if let Some(binding) = self.scopes.lookup(name) {
            return binding.as_type();
        }
        if let Some(id) = self.type_names.get(name) {
            return Some(Type::Named(*id));
        }
        if self.globals.contains_key(name) || self.funcs.contains_key(name) {
            return None;
        }
        if let Some(target) = self.aliases.get(name).copied() {
            if self.alias_depth >= MAX_CHAIN {
                return None;
            }
            self.alias_depth += 1;
            let resolved = self.resolve_type_expr(target);
            self.alias_depth -= 1;
            return resolved;
        }
        is_predeclared_type(name).then(|| Type::basic(name))
    }

    /// Underlying structure of `ty`, following named types.
    pub(crate) fn underlying(&self, ty: &Type) -> Type {
        let mut current = ty.clone();
        for _ in 0..MAX_CHAIN {
            let Type::Named(id) = current else {
                return current;
            };
            let Some(named) = self.info.named.get(id.0 as usize) else {
                return Type::Invalid;
            };
            current = match &named.shape {
                TypeShape::Struct(fields) => Type::Struct(fields.clone()),
                TypeShape::Interface(methods) => Type::Interface(methods.clone()),
                TypeShape::Other(other) => other.clone(),
            };
        }
        Type::Invalid
    }
}

/// Field name of an embedded field: the type name without pointer or
/// package qualifier.
fn embedded_name(ty: &TypeExpr) -> Option<String> {
    match &ty.kind {
        TypeExprKind::Name(name) | TypeExprKind::Qualified { name, .. } => Some(name.clone()),
        TypeExprKind::Pointer(inner) | TypeExprKind::Generic(inner) => embedded_name(inner),
        _ => None,
    }
}

fn is_predeclared_type(name: &str) -> bool {
    matches!(
        name,
        "bool"
            | "byte"
            | "rune"
            | "int"
            | "int8"
            | "int16"
            | "int32"
            | "int64"
            | "uint"
            | "uint8"
            | "uint16"
            | "uint32"
            | "uint64"
            | "uintptr"
            | "float32"
            | "float64"
            | "complex64"
            | "complex128"
            | "string"
            | "error"
            | "any"
            | "comparable"
    )
}
