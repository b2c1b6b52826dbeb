//! Package discovery on disk.
//!
//! Walks a root with the `ignore` crate and groups Go files into packages
//! by directory and package clause. Directories named `vendor` or
//! `testdata`, or starting with `.` or `_`, are skipped below the root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

use crate::error::ParserError;
use crate::package::Package;
use crate::parser::{is_go_source, is_test_file, package_name};

/// Filters applied while discovering packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Also load `_test.go` files.
    pub include_tests: bool,
    /// Descend into `vendor/` directories.
    pub include_vendor: bool,
    /// Glob patterns (relative to the walk root) for files to leave out.
    pub exclude: Vec<String>,
}

/// The sources of one package, read but not yet parsed into a [`Package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSources {
    pub dir: PathBuf,
    pub name: String,
    pub files: Vec<(PathBuf, String)>,
}

impl PackageSources {
    /// Parse and resolve these sources.
    ///
    /// # Errors
    /// See [`Package::from_sources`].
    pub fn load(self) -> Result<Package, ParserError> {
        Package::from_sources(self.files)
    }
}

/// A root to check, as written on the command line.
///
/// A trailing `/...` asks for every package below the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub root: PathBuf,
    pub recursive: bool,
}

impl Target {
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if arg == "..." {
            return Self {
                root: PathBuf::from("."),
                recursive: true,
            };
        }
        match arg.strip_suffix("/...") {
            Some(rest) => Self {
                root: PathBuf::from(if rest.is_empty() { "." } else { rest }),
                recursive: true,
            },
            None => Self {
                root: PathBuf::from(arg),
                recursive: false,
            },
        }
    }
}

fn skipped_dir(name: &str, include_vendor: bool) -> bool {
    name == "testdata"
        || (name == "vendor" && !include_vendor)
        || name.starts_with('.')
        || name.starts_with('_')
}

/// Discover the packages under `target`.
///
/// Packages are returned ordered by directory, then package name. Files
/// inside a package are ordered by path.
///
/// # Errors
/// Returns `ParserError::InvalidPattern` for a bad exclude glob,
/// `ParserError::Walk` or `ParserError::Io` when the tree can't be read and
/// `ParserError::MissingPackageClause` for a Go file without a package.
pub fn discover(target: &Target, options: &LoadOptions) -> Result<Vec<PackageSources>, ParserError> {
    let root = target.root.as_path();
    let mut builder = WalkBuilder::new(root);
    builder.hidden(false);
    if !target.recursive {
        builder.max_depth(Some(1));
    }

    if !options.exclude.is_empty() {
        let mut overrides = OverrideBuilder::new(root);
        for glob in &options.exclude {
            overrides
                .add(&format!("!{glob}"))
                .map_err(|e| ParserError::InvalidPattern {
                    pattern: glob.clone(),
                    message: e.to_string(),
                })?;
        }
        let overrides = overrides.build().map_err(|e| ParserError::InvalidPattern {
            pattern: options.exclude.join(","),
            message: e.to_string(),
        })?;
        builder.overrides(overrides);
    }

    let include_vendor = options.include_vendor;
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return true;
        }
        !skipped_dir(&entry.file_name().to_string_lossy(), include_vendor)
    });

    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in builder.build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        if !is_go_source(&file_name) || (!options.include_tests && is_test_file(&file_name)) {
            continue;
        }
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        by_dir.entry(dir).or_default().push(path.to_path_buf());
    }

    let mut packages = Vec::new();
    for (dir, mut paths) in by_dir {
        paths.sort();
        let mut by_name: BTreeMap<String, Vec<(PathBuf, String)>> = BTreeMap::new();
        for path in paths {
            let source = std::fs::read_to_string(&path).map_err(|source| ParserError::Io {
                path: path.clone(),
                source,
            })?;
            let name = package_name(&source)
                .ok_or_else(|| ParserError::MissingPackageClause { path: path.clone() })?;
            by_name.entry(name).or_default().push((path, source));
        }
        for (name, files) in by_name {
            tracing::debug!(dir = %dir.display(), package = %name, files = files.len(), "discovered package");
            packages.push(PackageSources {
                dir: dir.clone(),
                name,
                files,
            });
        }
    }
    Ok(packages)
}
