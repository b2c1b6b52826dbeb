//! Export-leak scanning.
//!
//! An unexported type that external packages can obtain through the
//! exported API is exempt from checking. Leak paths, top-level only:
//! - exported `var`/`const` of that type;
//! - exported fields of an exported struct type;
//! - results of exported functions and methods.
//!
//! Pointers are looked through. Exemption is by type name and covers the
//! whole package.

use std::collections::BTreeSet;

use fp_core::ast::{Decl, File, FuncDecl, GenDecl, GenKind, Spec, TypeSpec, ValueSpec};
use fp_core::naming::is_exported;
use fp_core::oracle::{TypeOracle, declared_object};
use fp_core::types::{Field, Type};

/// Names of unexported types that must never be reported.
///
/// Only grows while scanning; read-only once diagnostics are filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionSet {
    names: BTreeSet<String>,
}

impl ExemptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `name` was not already exempt.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Collect the exemptions of one package.
pub fn scan_exports<O: TypeOracle + ?Sized>(oracle: &O, files: &[File]) -> ExemptionSet {
    let mut scanner = LeakScanner {
        oracle,
        exemptions: ExemptionSet::new(),
    };
    for file in files {
        for decl in &file.decls {
            match decl {
                Decl::Func(func) => scanner.func_decl(func),
                Decl::Gen(gen_decl) => scanner.gen_decl(gen_decl),
            }
        }
    }
    tracing::debug!(exempt = scanner.exemptions.len(), "scanned exported surface");
    scanner.exemptions
}

struct LeakScanner<'o, O: ?Sized> {
    oracle: &'o O,
    exemptions: ExemptionSet,
}

impl<O: TypeOracle + ?Sized> LeakScanner<'_, O> {
    fn gen_decl(&mut self, decl: &GenDecl) {
        for spec in &decl.specs {
            match spec {
                Spec::Value(value) if decl.kind != GenKind::Type => self.value_spec(value),
                Spec::Type(ty) => self.type_spec(ty),
                Spec::Value(_) => {}
            }
        }
    }

    fn value_spec(&mut self, spec: &ValueSpec) {
        let oracle = self.oracle;
        for name in spec.names.iter().filter(|n| is_exported(&n.name)) {
            if let Some(ty) = oracle.type_of(name.id) {
                self.exempt(ty, &name.name);
            }
        }
    }

    fn type_spec(&mut self, spec: &TypeSpec) {
        if !is_exported(&spec.name.name) {
            return;
        }
        let oracle = self.oracle;
        let Some(ty) = oracle.type_of(spec.name.id) else {
            return;
        };
        let fields: &[Field] = match ty {
            Type::Named(id) => oracle
                .named_type(*id)
                .map(|n| n.shape.fields())
                .unwrap_or_default(),
            Type::Struct(fields) => fields,
            _ => &[],
        };
        for field in fields.iter().filter(|f| f.is_exported()) {
            self.exempt(&field.ty, &spec.name.name);
        }
    }

    fn func_decl(&mut self, func: &FuncDecl) {
        if !is_exported(&func.name.name) {
            return;
        }
        let oracle = self.oracle;
        let Some(Type::Func(sig)) = oracle.type_of(func.name.id) else {
            return;
        };
        for result in &sig.results {
            self.exempt(result, &func.name.name);
        }
    }

    fn exempt(&mut self, ty: &Type, via: &str) {
        let Some((_, named)) = declared_object(self.oracle, ty) else {
            return;
        };
        if named.is_exported() {
            return;
        }
        if self.exemptions.insert(named.name.clone()) {
            tracing::trace!(ty = %named.name, via, "type leaks through exported API");
        }
    }
}

#[cfg(test)]
mod tests {
    use fp_parser::Package;
    use pretty_assertions::assert_eq;

    use super::*;

    fn exempt_names(sources: &[(&str, &str)]) -> Vec<String> {
        let pkg = Package::from_sources(
            sources
                .iter()
                .map(|(path, src)| ((*path).to_string(), (*src).to_string())),
        )
        .expect("package builds");
        scan_exports(&pkg, pkg.files())
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn exported_function_results_leak() {
        let names = exempt_names(&[(
            "a.go",
            "package p\n\ntype conn struct{ fd int }\ntype pool struct{ n int }\n\nfunc Dial() *conn { return nil }\nfunc NewPool() (pool, error) { return pool{}, nil }\n",
        )]);
        assert_eq!(names, vec!["conn".to_string(), "pool".to_string()]);
    }

    #[test]
    fn exported_methods_leak_their_results() {
        let names = exempt_names(&[(
            "a.go",
            "package p\n\ntype node struct{ next *node }\n\nfunc (n *node) Next() *node { return n.next }\nfunc (n *node) prev() *node { return nil }\n",
        )]);
        assert_eq!(names, vec!["node".to_string()]);
    }

    #[test]
    fn exported_vars_and_consts_leak() {
        let names = exempt_names(&[(
            "a.go",
            "package p\n\ntype level int\ntype registry struct{ m map[string]int }\n\nconst Debug level = 1\n\nvar Default = &registry{}\nvar hidden = registry{}\n",
        )]);
        assert_eq!(names, vec!["level".to_string(), "registry".to_string()]);
    }

    #[test]
    fn only_exported_fields_of_exported_structs_leak() {
        let names = exempt_names(&[(
            "a.go",
            "package p\n\ntype opts struct{ n int }\ntype state struct{ n int }\ntype inner struct{ n int }\n\ntype Config struct {\n\tOpts *opts\n\tstate state\n}\n\ntype config struct {\n\tInner inner\n}\n",
        )]);
        assert_eq!(names, vec!["opts".to_string()]);
    }

    #[test]
    fn exported_types_are_never_exempted() {
        let names = exempt_names(&[(
            "a.go",
            "package p\n\ntype Client struct{ n int }\n\nfunc New() *Client { return nil }\n\nvar Shared Client\n",
        )]);
        assert!(names.is_empty());
    }

    #[test]
    fn function_bodies_are_not_part_of_the_surface() {
        let names = exempt_names(&[(
            "a.go",
            "package p\n\ntype secret struct{ n int }\n\nfunc Run() {\n\tvar Local = secret{}\n\t_ = Local\n}\n",
        )]);
        assert!(names.is_empty());
    }

    #[test]
    fn leaks_are_collected_across_files() {
        let names = exempt_names(&[
            ("a.go", "package p\n\ntype token struct{ raw string }\n"),
            ("b.go", "package p\n\nfunc Parse() token { return token{} }\n"),
        ]);
        assert_eq!(names, vec!["token".to_string()]);
    }

    #[test]
    fn insert_reports_new_names() {
        let mut set = ExemptionSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert!(set.contains("a"));
        assert_eq!(set.len(), 1);
    }
}
