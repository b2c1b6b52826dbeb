//! Lowering of tree-sitter-go nodes into the `fp-core` syntax tree.
//!
//! Node kinds follow tree-sitter-go. Both the older grammar shapes
//! (`element`, `method_spec`, inline statements) and the newer ones
//! (`literal_element`, `method_elem`, `statement_list`, `var_spec_list`)
//! are accepted.

mod decls;
mod exprs;
mod stmts;
mod type_exprs;

use fp_core::ast::{File, Ident, NodeId, NodeIdGen};
use fp_core::span::{FileId, Span};

use crate::parser::GoNode;

/// Converts one parsed file. Ids come from a generator shared by every
/// file of the compilation unit.
pub(crate) struct Lowerer<'g> {
    file: FileId,
    ids: &'g mut NodeIdGen,
}

impl<'g> Lowerer<'g> {
    pub(crate) const fn new(file: FileId, ids: &'g mut NodeIdGen) -> Self {
        Self { file, ids }
    }

    /// Lower a `source_file` node. Returns `None` when the file has no
    /// package clause.
    pub(crate) fn lower_file(&mut self, root: &GoNode<'_>) -> Option<File> {
        let mut package = None;
        let mut decls = Vec::new();
        for child in named_children(root) {
            match child.kind().as_ref() {
                "package_clause" => {
                    package = named_children(&child)
                        .find(|c| c.kind().as_ref() == "package_identifier")
                        .map(|c| c.text().to_string());
                }
                "function_declaration" => decls.push(self.lower_func_decl(&child)),
                "method_declaration" => decls.push(self.lower_method_decl(&child)),
                "var_declaration" | "const_declaration" | "type_declaration" => {
                    decls.push(fp_core::ast::Decl::Gen(self.lower_gen_decl(&child)));
                }
                _ => {}
            }
        }
        Some(File {
            id: self.file,
            package: package?,
            decls,
        })
    }

    fn next_id(&mut self) -> NodeId {
        self.ids.next_id()
    }

    fn span(&self, node: &GoNode<'_>) -> Span {
        let range = node.range();
        Span::new(self.file, to_u32(range.start), to_u32(range.end))
    }

    fn ident(&mut self, node: &GoNode<'_>) -> Ident {
        Ident {
            id: self.next_id(),
            name: node.text().to_string(),
            span: self.span(node),
        }
    }
}

fn to_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

/// Named children, skipping comments.
pub(crate) fn named_children<'r>(node: &GoNode<'r>) -> impl Iterator<Item = GoNode<'r>> {
    node.children()
        .filter(|c| c.is_named() && c.kind().as_ref() != "comment")
}

#[cfg(test)]
mod tests;
