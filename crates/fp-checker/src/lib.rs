//! # fp-checker
//!
//! Enforces file-scoped privacy for Go packages: an unexported field or
//! method of an unexported type may only be used from the file declaring
//! the type, or from a method whose receiver is that type.
//!
//! The checker consumes lowered syntax trees from `fp_core::ast` and a
//! [`TypeOracle`]; it never parses or loads packages itself.
//!
//! - [`tracker`]: stack of enclosing function bodies
//! - [`leak`]: exemptions for types reachable from the exported API
//! - [`rules`]: selector and composite literal checks
//! - [`collector`]: diagnostic accumulation and filtering

pub mod checker;
pub mod collector;
pub mod error;
pub mod leak;
pub mod rules;
pub mod tracker;

use fp_core::ast::File;
use fp_core::diagnostic::Diagnostic;
use fp_core::oracle::TypeOracle;

pub use checker::PackageChecker;
pub use error::CheckError;
pub use leak::{ExemptionSet, scan_exports};

pub const ANALYZER_NAME: &str = "fileprivate";

pub const DOC: &str = "fileprivate enforces stricter code structure rules on your code.
It makes it illegal to access unexported fields or methods of an unexported type,
unless they are used in the file that declares the type or in one of its methods.";

/// Check one compilation unit.
///
/// Diagnostics come back in discovery order: files in the order given,
/// sites in source order within a file.
///
/// # Errors
/// Returns `CheckError::InternalConsistency` when the traversal breaks
/// the function-stack invariant.
pub fn check_package<O: TypeOracle + ?Sized>(
    oracle: &O,
    files: &[File],
) -> Result<Vec<Diagnostic>, CheckError> {
    tracing::debug!(analyzer = ANALYZER_NAME, files = files.len(), "checking package");
    PackageChecker::new(oracle).run(files)
}
