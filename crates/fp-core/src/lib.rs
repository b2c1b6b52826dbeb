//! # fp-core
//!
//! Shared vocabulary for the fileprivate checker.
//!
//! This crate provides the types every other crate agrees on:
//! - Source positions and the per-unit file set
//! - The lowered Go syntax tree and its visitor
//! - The resolved type model (named types, fields, signatures)
//! - The read-only `TypeOracle` the checker queries
//! - Diagnostics and the exported-identifier rule

pub mod ast;
pub mod diagnostic;
pub mod naming;
pub mod oracle;
pub mod span;
pub mod types;

pub use diagnostic::Diagnostic;
pub use naming::is_exported;
pub use oracle::{TypeOracle, declared_object};
pub use span::{FileId, FileSet, Pos, Position, Span};
pub use types::{Field, NamedType, Signature, Type, TypeId, TypeShape};
