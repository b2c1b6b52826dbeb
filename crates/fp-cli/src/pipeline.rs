//! Discovery, per-package checking and position mapping.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use fp_checker::check_package;
use fp_core::diagnostic::Diagnostic;
use fp_core::span::FileSet;
use fp_parser::{LoadOptions, PackageSources, Target, discover};
use rayon::prelude::*;
use serde::Serialize;

/// A diagnostic mapped to a path, line and column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Finding {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub message: String,
    /// Type whose member was accessed.
    #[serde(rename = "type")]
    pub subject: String,
}

impl Finding {
    fn from_diagnostic(file_set: &FileSet, diag: Diagnostic) -> anyhow::Result<Self> {
        let start = file_set
            .position(diag.span.start_pos())
            .context("diagnostic start is outside the package's files")?;
        let end = file_set
            .position(diag.span.end_pos())
            .context("diagnostic end is outside the package's files")?;
        Ok(Self {
            file: start.path.display().to_string(),
            line: start.line,
            column: start.column,
            end_line: end.line,
            end_column: end.column,
            message: diag.message,
            subject: diag.subject,
        })
    }
}

/// Discover every package of every target. A package reached from two
/// targets is kept once, at its first position.
pub fn discover_all(targets: &[Target], options: &LoadOptions) -> anyhow::Result<Vec<PackageSources>> {
    let mut seen: HashSet<(PathBuf, String)> = HashSet::new();
    let mut packages = Vec::new();
    for target in targets {
        let found = discover(target, options)
            .with_context(|| format!("failed to load packages from '{}'", target.root.display()))?;
        for package in found {
            if seen.insert((package.dir.clone(), package.name.clone())) {
                packages.push(package);
            }
        }
    }
    tracing::debug!(packages = packages.len(), "discovered packages");
    Ok(packages)
}

/// Check one package with its own checker instance.
pub fn check_sources(sources: PackageSources) -> anyhow::Result<Vec<Finding>> {
    let dir = sources.dir.clone();
    let name = sources.name.clone();
    let package = sources
        .load()
        .with_context(|| format!("failed to parse package {name} in '{}'", dir.display()))?;
    let diagnostics = check_package(&package, package.files())
        .with_context(|| format!("failed to check package {name} in '{}'", dir.display()))?;
    tracing::debug!(package = %name, findings = diagnostics.len(), "checked package");
    diagnostics
        .into_iter()
        .map(|diag| Finding::from_diagnostic(package.file_set(), diag))
        .collect()
}

/// Check every package concurrently. Findings come back in discovery
/// order, then in each package's own order.
pub fn check_targets(targets: &[Target], options: &LoadOptions) -> anyhow::Result<Vec<Finding>> {
    let packages = discover_all(targets, options)?;
    let per_package = packages
        .into_par_iter()
        .map(check_sources)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(per_package.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, contents).expect("write file");
    }

    fn project() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        let root = tmp.path();
        write(root, "store/item.go", "package store\n\ntype item struct{ price int }\n");
        write(
            root,
            "store/sale.go",
            "package store\n\nfunc discount(i *item) {\n\ti.price = 0\n}\n",
        );
        write(root, "clean/clean.go", "package clean\n\ntype t struct{ n int }\n\nfunc f(v t) int { return v.n }\n");
        tmp
    }

    fn recursive(root: &Path) -> Target {
        Target {
            root: root.to_path_buf(),
            recursive: true,
        }
    }

    #[test]
    fn findings_carry_positions_and_type() {
        let tmp = project();
        let findings =
            check_targets(&[recursive(tmp.path())], &LoadOptions::default()).expect("check runs");
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert!(finding.file.ends_with("sale.go"), "{}", finding.file);
        assert_eq!((finding.line, finding.column), (4, 4));
        assert_eq!((finding.end_line, finding.end_column), (4, 9));
        assert_eq!(finding.message, "accessing item.price outside of the suggested context");
        assert_eq!(finding.subject, "item");
    }

    #[test]
    fn overlapping_targets_check_a_package_once() {
        let tmp = project();
        let targets = [
            recursive(tmp.path()),
            Target {
                root: tmp.path().join("store"),
                recursive: false,
            },
        ];
        let packages = discover_all(&targets, &LoadOptions::default()).expect("discover");
        assert_eq!(packages.len(), 2);
    }

    #[test]
    fn parse_errors_name_the_package_dir() {
        let tmp = TempDir::new().expect("tempdir");
        write(tmp.path(), "a.go", "package one\n");
        write(tmp.path(), "b.go", "func missing() {}\n");
        let err = check_targets(&[recursive(tmp.path())], &LoadOptions::default())
            .expect_err("missing package clause");
        assert!(format!("{err:#}").contains("missing package clause"), "{err:#}");
    }

    #[test]
    fn finding_serializes_subject_as_type() {
        let finding = Finding {
            file: "a.go".to_string(),
            line: 1,
            column: 2,
            end_line: 1,
            end_column: 5,
            message: "m".to_string(),
            subject: "item".to_string(),
        };
        let json = serde_json::to_value(&finding).expect("serializes");
        assert_eq!(json["type"], "item");
        assert!(json.get("subject").is_none());
    }
}
