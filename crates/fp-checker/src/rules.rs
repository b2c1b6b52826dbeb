//! Access rules for selectors and composite literals.
//!
//! A site touching an unexported member of an unexported, non-interface
//! type is allowed only from the type's declaring file or from a method
//! whose receiver is that type.

use fp_core::ast::{Element, Expr, Ident};
use fp_core::diagnostic::Diagnostic;
use fp_core::naming::is_exported;
use fp_core::oracle::{TypeOracle, declared_object};
use fp_core::span::Pos;
use fp_core::types::{NamedType, TypeId};

use crate::collector::Collector;

pub struct AccessRules<'o, O: ?Sized> {
    oracle: &'o O,
}

impl<'o, O: TypeOracle + ?Sized> AccessRules<'o, O> {
    pub const fn new(oracle: &'o O) -> Self {
        Self { oracle }
    }

    /// Whether code at `site` may touch the internals of `ty`.
    ///
    /// `receiver` is the receiver type of the innermost enclosing method.
    pub fn can_access(
        &self,
        ty: TypeId,
        named: &NamedType,
        site: Pos,
        receiver: Option<TypeId>,
    ) -> bool {
        self.oracle.same_file(named.pos, site) || receiver == Some(ty)
    }

    /// Unexported named type behind `expr`'s static type.
    fn unexported_subject(&self, expr: &Expr) -> Option<(TypeId, &'o NamedType)> {
        let oracle = self.oracle;
        let ty = oracle.type_of(expr.id)?;
        let (id, named) = declared_object(oracle, ty)?;
        (!named.is_exported()).then_some((id, named))
    }

    /// `operand.member`
    pub fn check_selector(
        &self,
        site: &Expr,
        operand: &Expr,
        member: &Ident,
        receiver: Option<TypeId>,
        out: &mut Collector,
    ) {
        if is_exported(&member.name) {
            return;
        }
        let Some((id, named)) = self.unexported_subject(operand) else {
            return;
        };
        if named.shape.is_interface() {
            return;
        }
        if self.can_access(id, named, site.span.start_pos(), receiver) {
            return;
        }
        out.report(Diagnostic::new(
            member.span,
            format!("accessing {named}.{} outside of the suggested context", member.name),
            named.name.clone(),
        ));
    }

    /// `T{...}`: one diagnostic per unexported field set by key or by
    /// position.
    pub fn check_composite(
        &self,
        site: &Expr,
        elements: &[Element],
        receiver: Option<TypeId>,
        out: &mut Collector,
    ) {
        let Some((id, named)) = self.unexported_subject(site) else {
            return;
        };
        if self.can_access(id, named, site.span.start_pos(), receiver) {
            return;
        }
        let fields = named.shape.fields();
        for (idx, element) in elements.iter().enumerate() {
            match &element.key {
                Some(key) => {
                    let Some(name) = element.key_name() else {
                        continue;
                    };
                    if is_exported(name) || named.field(name).is_none() {
                        continue;
                    }
                    out.report(Diagnostic::new(
                        key.span,
                        format!("accessing {named}.{name} outside of the suggested context"),
                        named.name.clone(),
                    ));
                }
                None => {
                    // Extra positional entries are a compile error; ignore them.
                    let Some(field) = fields.get(idx) else {
                        continue;
                    };
                    if field.is_exported() {
                        continue;
                    }
                    out.report(Diagnostic::new(
                        element.value.span,
                        format!(
                            "accessing {named}.{} outside of the suggested context (composite lit member {idx})",
                            field.name
                        ),
                        named.name.clone(),
                    ));
                }
            }
        }
    }
}
