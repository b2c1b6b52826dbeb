//! ast-grep wrapper and Go file classification.

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// A node of a parsed Go tree.
pub type GoNode<'r> = ast_grep_core::Node<'r, StrDoc<SupportLang>>;

/// Whether `file_path` names a Go source file.
#[must_use]
pub fn is_go_source(file_path: &str) -> bool {
    file_path
        .rsplit(['/', '\\'])
        .next()
        .is_some_and(|name| name.ends_with(".go") && name.len() > ".go".len())
}

/// Whether a file name follows the Go test file convention.
#[must_use]
pub fn is_test_file(file_name: &str) -> bool {
    file_name.ends_with("_test.go")
}

/// Parse Go source code into an ast-grep tree.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    use ast_grep_language::LanguageExt;
    SupportLang::Go.ast_grep(source)
}

/// Package name from the `package` clause, if the file has one.
#[must_use]
pub fn package_name(source: &str) -> Option<String> {
    let tree = parse_source(source);
    let root = tree.root();
    let clause = root
        .children()
        .find(|c| c.kind().as_ref() == "package_clause")?;
    clause
        .children()
        .find(|c| c.kind().as_ref() == "package_identifier")
        .map(|ident| ident.text().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_go_sources() {
        assert!(is_go_source("main.go"));
        assert!(is_go_source("pkg/store/cache.go"));
        assert!(is_go_source("pkg\\store\\cache.go"));
        assert!(!is_go_source("main.rs"));
        assert!(!is_go_source("go.mod"));
        assert!(!is_go_source(".go"));
    }

    #[test]
    fn detect_test_files() {
        assert!(is_test_file("cache_test.go"));
        assert!(!is_test_file("cache.go"));
        assert!(!is_test_file("testing.go"));
    }

    #[test]
    fn package_name_skips_leading_comments() {
        let source = "// Package store keeps things.\n/* more */\npackage store\n";
        assert_eq!(package_name(source).as_deref(), Some("store"));
    }

    #[test]
    fn package_name_missing() {
        assert_eq!(package_name("func main() {}\n"), None);
    }

    #[test]
    fn parse_source_produces_valid_tree() {
        let tree = parse_source("package main\n\nfunc main() {}\n");
        assert_eq!(tree.root().kind().as_ref(), "source_file");
    }
}
