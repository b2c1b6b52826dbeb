//! Read-only type and position queries the checker depends on.

use crate::ast::NodeId;
use crate::span::Pos;
use crate::types::{NamedType, Type, TypeId};

/// Static type information for one compilation unit.
///
/// Implementations must be immutable for the duration of a check, so a
/// shared oracle can serve several concurrent checker runs.
pub trait TypeOracle {
    /// Static type of an expression, identifier or type expression.
    /// `None` when the type could not be determined.
    fn type_of(&self, node: NodeId) -> Option<&Type>;

    /// Declaring object of a named type.
    fn named_type(&self, id: TypeId) -> Option<&NamedType>;

    /// Whether two positions originate from the same source file.
    fn same_file(&self, a: Pos, b: Pos) -> bool;
}

/// Resolve `ty` to the named type that declares it, looking through
/// pointers. Other composite types have no declaring object.
pub fn declared_object<'o, O: TypeOracle + ?Sized>(
    oracle: &'o O,
    ty: &Type,
) -> Option<(TypeId, &'o NamedType)> {
    let id = ty.named_id()?;
    oracle.named_type(id).map(|named| (id, named))
}
