//! # fp-parser
//!
//! Go front-end for the fileprivate checker.
//!
//! Parses Go sources with ast-grep, lowers the tree-sitter CST into the
//! `fp_core::ast` model, resolves the types the checker asks about and
//! discovers packages on disk. [`Package`] implements
//! [`fp_core::oracle::TypeOracle`].

pub mod error;
pub mod loader;
mod lower;
pub mod package;
pub mod parser;
pub mod resolve;

pub use error::ParserError;
pub use loader::{LoadOptions, PackageSources, Target, discover};
pub use package::Package;
pub use parser::{is_go_source, is_test_file, package_name, parse_source};
pub use resolve::{TypeInfo, resolve_package};
