//! A parsed and resolved Go package: the type oracle for one check run.

use std::path::PathBuf;

use fp_core::ast::{File, NodeId, NodeIdGen};
use fp_core::oracle::TypeOracle;
use fp_core::span::{FileSet, Pos};
use fp_core::types::{NamedType, Type, TypeId};

use crate::error::ParserError;
use crate::lower::Lowerer;
use crate::parser::parse_source;
use crate::resolve::{TypeInfo, resolve_package};

/// Files, positions and resolved types of one compilation unit.
#[derive(Debug)]
pub struct Package {
    name: String,
    files: Vec<File>,
    file_set: FileSet,
    info: TypeInfo,
}

impl Package {
    /// Parse, lower and resolve in-memory sources that form one package.
    ///
    /// # Errors
    /// Returns `ParserError::MissingPackageClause` when a file has no
    /// `package` clause and `ParserError::MixedPackages` when files
    /// disagree on the package name.
    pub fn from_sources<P, I>(sources: I) -> Result<Self, ParserError>
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (P, String)>,
    {
        let mut ids = NodeIdGen::new();
        let mut file_set = FileSet::new();
        let mut files = Vec::new();
        let mut name: Option<String> = None;

        for (path, source) in sources {
            let path = path.into();
            let file_id = file_set.add_file(path.clone(), &source);
            let tree = parse_source(&source);
            let file = Lowerer::new(file_id, &mut ids)
                .lower_file(&tree.root())
                .ok_or_else(|| ParserError::MissingPackageClause { path: path.clone() })?;
            match &name {
                Some(existing) if *existing != file.package => {
                    return Err(ParserError::MixedPackages {
                        dir: path.parent().map(PathBuf::from).unwrap_or_default(),
                        first: existing.clone(),
                        second: file.package,
                    });
                }
                Some(_) => {}
                None => name = Some(file.package.clone()),
            }
            tracing::trace!(path = %path.display(), decls = file.decls.len(), "lowered file");
            files.push(file);
        }

        let info = resolve_package(&files);
        Ok(Self {
            name: name.unwrap_or_default(),
            files,
            file_set,
            info,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn files(&self) -> &[File] {
        &self.files
    }

    #[must_use]
    pub const fn file_set(&self) -> &FileSet {
        &self.file_set
    }

    #[must_use]
    pub const fn info(&self) -> &TypeInfo {
        &self.info
    }
}

impl TypeOracle for Package {
    fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.info.type_of(node)
    }

    fn named_type(&self, id: TypeId) -> Option<&NamedType> {
        self.info.named_type(id)
    }

    fn same_file(&self, a: Pos, b: Pos) -> bool {
        self.file_set.same_file(a, b)
    }
}
