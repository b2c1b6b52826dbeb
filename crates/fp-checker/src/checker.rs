//! One check run over a compilation unit.

use fp_core::ast::visit::{Node, Visitor, walk_file};
use fp_core::ast::{ExprKind, File, FuncDecl};
use fp_core::diagnostic::Diagnostic;
use fp_core::oracle::{TypeOracle, declared_object};
use fp_core::types::TypeId;

use crate::collector::Collector;
use crate::error::CheckError;
use crate::leak::scan_exports;
use crate::rules::AccessRules;
use crate::tracker::{Frame, FunctionTracker};

/// Owns the per-run state: function stack and collected diagnostics.
/// Independent runs share nothing but the read-only oracle.
pub struct PackageChecker<'o, O: ?Sized> {
    oracle: &'o O,
    rules: AccessRules<'o, O>,
    tracker: FunctionTracker,
    collector: Collector,
}

impl<'o, O: TypeOracle + ?Sized> PackageChecker<'o, O> {
    pub fn new(oracle: &'o O) -> Self {
        Self {
            oracle,
            rules: AccessRules::new(oracle),
            tracker: FunctionTracker::new(),
            collector: Collector::new(),
        }
    }

    /// Walk every file, scan the exported surface and return the
    /// diagnostics that survive exemption.
    ///
    /// # Errors
    /// Returns `CheckError::InternalConsistency` if the function stack is
    /// unbalanced.
    pub fn run(mut self, files: &[File]) -> Result<Vec<Diagnostic>, CheckError> {
        for file in files {
            walk_file(file, &mut self)?;
            self.tracker.ensure_empty()?;
        }
        let found = self.collector.len();
        let exemptions = scan_exports(self.oracle, files);
        let diagnostics = self.collector.finish(&exemptions);
        tracing::debug!(
            files = files.len(),
            found,
            reported = diagnostics.len(),
            exempt = exemptions.len(),
            "package checked"
        );
        Ok(diagnostics)
    }

    fn receiver_type(&self, func: &FuncDecl) -> Option<TypeId> {
        let receiver = func.receiver.as_ref()?;
        let ty = self.oracle.type_of(receiver.ty.id)?;
        declared_object(self.oracle, ty).map(|(id, _)| id)
    }
}

impl<'a, O: TypeOracle + ?Sized> Visitor<'a> for PackageChecker<'_, O> {
    type Error = CheckError;

    fn enter(&mut self, node: Node<'a>) -> Result<(), Self::Error> {
        match node {
            Node::FuncDecl(func) => {
                let frame = if func.is_method() {
                    Frame::method(func.id, self.receiver_type(func))
                } else {
                    Frame::function(func.id)
                };
                self.tracker.enter(frame);
            }
            Node::FuncLit(lit) => self.tracker.enter(Frame::function(lit.id)),
            Node::Expr(expr) => {
                let receiver = self.tracker.current_receiver_type();
                match &expr.kind {
                    ExprKind::Selector { operand, member } => {
                        self.rules
                            .check_selector(expr, operand, member, receiver, &mut self.collector);
                    }
                    ExprKind::Composite { elements, .. } => {
                        self.rules
                            .check_composite(expr, elements, receiver, &mut self.collector);
                    }
                    _ => {}
                }
            }
            Node::GenDecl(_) | Node::Stmt(_) => {}
        }
        Ok(())
    }

    fn leave(&mut self, node: Node<'a>) -> Result<(), Self::Error> {
        match node {
            Node::FuncDecl(func) => self.tracker.exit(func.id),
            Node::FuncLit(lit) => self.tracker.exit(lit.id),
            _ => Ok(()),
        }
    }
}
