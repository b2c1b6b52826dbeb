//! Declarations: functions, methods, `var`/`const`/`type` groups and
//! parameter lists.

use fp_core::ast::{
    Decl, FuncDecl, FuncSig, GenDecl, GenKind, Param, Spec, TypeExpr, TypeExprKind, TypeSpec,
    ValueSpec,
};

use super::{Lowerer, named_children};
use crate::parser::GoNode;

impl Lowerer<'_> {
    pub(super) fn lower_func_decl(&mut self, node: &GoNode<'_>) -> Decl {
        let id = self.next_id();
        let span = self.span(node);
        let name = match node.field("name") {
            Some(name) => self.ident(&name),
            None => self.missing_ident(node),
        };
        let signature = self.lower_signature(node);
        let body = node.field("body").map(|b| self.lower_block(&b));
        Decl::Func(FuncDecl {
            id,
            span,
            name,
            receiver: None,
            signature,
            body,
        })
    }

    pub(super) fn lower_method_decl(&mut self, node: &GoNode<'_>) -> Decl {
        let id = self.next_id();
        let span = self.span(node);
        let receiver = node
            .field("receiver")
            .and_then(|list| self.lower_param_list(&list).into_iter().next());
        let name = match node.field("name") {
            Some(name) => self.ident(&name),
            None => self.missing_ident(node),
        };
        let signature = self.lower_signature(node);
        let body = node.field("body").map(|b| self.lower_block(&b));
        Decl::Func(FuncDecl {
            id,
            span,
            name,
            receiver,
            signature,
            body,
        })
    }

    /// Parameters and results of a function, method, literal or
    /// function type node.
    pub(super) fn lower_signature(&mut self, node: &GoNode<'_>) -> FuncSig {
        let params = node
            .field("parameters")
            .map(|list| self.lower_param_list(&list))
            .unwrap_or_default();
        let results = match node.field("result") {
            Some(result) if result.kind().as_ref() == "parameter_list" => {
                self.lower_param_list(&result)
            }
            Some(result) => vec![Param {
                names: Vec::new(),
                ty: self.lower_type(&result),
                variadic: false,
            }],
            None => Vec::new(),
        };
        FuncSig { params, results }
    }

    pub(super) fn lower_param_list(&mut self, list: &GoNode<'_>) -> Vec<Param> {
        let mut params = Vec::new();
        for decl in named_children(list) {
            let variadic = match decl.kind().as_ref() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };
            let names = named_children(&decl)
                .filter(|c| c.kind().as_ref() == "identifier")
                .map(|c| self.ident(&c))
                .collect();
            let ty = match decl.field("type") {
                Some(ty) => self.lower_type(&ty),
                None => self.unknown_type(&decl),
            };
            params.push(Param {
                names,
                ty,
                variadic,
            });
        }
        params
    }

    pub(super) fn lower_gen_decl(&mut self, node: &GoNode<'_>) -> GenDecl {
        let kind = match node.kind().as_ref() {
            "const_declaration" => GenKind::Const,
            "type_declaration" => GenKind::Type,
            _ => GenKind::Var,
        };
        let mut specs = Vec::new();
        self.collect_specs(node, &mut specs);
        GenDecl {
            kind,
            span: self.span(node),
            specs,
        }
    }

    fn collect_specs(&mut self, node: &GoNode<'_>, specs: &mut Vec<Spec>) {
        for child in named_children(node) {
            match child.kind().as_ref() {
                "var_spec" | "const_spec" => specs.push(Spec::Value(self.lower_value_spec(&child))),
                "type_spec" => specs.push(Spec::Type(self.lower_type_spec(&child, false))),
                "type_alias" => specs.push(Spec::Type(self.lower_type_spec(&child, true))),
                "var_spec_list" | "const_spec_list" => self.collect_specs(&child, specs),
                _ => {}
            }
        }
    }

    fn lower_value_spec(&mut self, node: &GoNode<'_>) -> ValueSpec {
        // Initializers sit inside an `expression_list`, so direct
        // identifier children are always the declared names.
        let names = named_children(node)
            .filter(|c| c.kind().as_ref() == "identifier")
            .map(|c| self.ident(&c))
            .collect();
        let ty = node.field("type").map(|t| self.lower_type(&t));
        let values = node
            .field("value")
            .map(|list| self.lower_expr_list(&list))
            .unwrap_or_default();
        ValueSpec { names, ty, values }
    }

    fn lower_type_spec(&mut self, node: &GoNode<'_>, alias: bool) -> TypeSpec {
        let name = match node.field("name") {
            Some(name) => self.ident(&name),
            None => self.missing_ident(node),
        };
        let ty = match node.field("type") {
            Some(ty) => self.lower_type(&ty),
            None => self.unknown_type(node),
        };
        TypeSpec { name, ty, alias }
    }

    fn missing_ident(&mut self, node: &GoNode<'_>) -> fp_core::ast::Ident {
        let span = self.span(node);
        fp_core::ast::Ident {
            id: self.next_id(),
            name: "_".to_string(),
            span,
        }
    }

    pub(super) fn unknown_type(&mut self, node: &GoNode<'_>) -> TypeExpr {
        TypeExpr {
            id: self.next_id(),
            span: self.span(node),
            kind: TypeExprKind::Unknown,
        }
    }
}
