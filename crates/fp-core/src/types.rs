//! Resolved type model of one compilation unit.
//!
//! Named types live in a dense universe indexed by [`TypeId`]. A
//! [`NamedType`] is the declaring object of a type: its name, where it is
//! declared, and its underlying shape.

use std::fmt;

use serde::Serialize;

use crate::naming::is_exported;
use crate::span::Pos;

/// Index of a named type in the unit's universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// A static type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(TypeId),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    Chan(Box<Type>),
    Func(Box<Signature>),
    /// Results of a multi-value call.
    Tuple(Vec<Type>),
    /// Predeclared or foreign type, kept by name (`int`, `string`, `io.Reader`).
    Basic(String),
    /// Anonymous struct type.
    Struct(Vec<Field>),
    /// Anonymous interface type.
    Interface(Vec<String>),
    /// A type that could not be resolved.
    Invalid,
}

impl Type {
    #[must_use]
    pub fn basic(name: &str) -> Self {
        Self::Basic(name.to_string())
    }

    #[must_use]
    pub fn pointer_to(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Strip every pointer indirection.
    #[must_use]
    pub fn deref(&self) -> &Self {
        let mut current = self;
        while let Self::Pointer(inner) = current {
            current = inner;
        }
        current
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// The named type reached through any number of pointers, if any.
    #[must_use]
    pub fn named_id(&self) -> Option<TypeId> {
        match self.deref() {
            Self::Named(id) => Some(*id),
            _ => None,
        }
    }
}

/// Parameter and result types of a function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Type>,
    pub results: Vec<Type>,
    pub variadic: bool,
}

/// One field of a struct shape, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub embedded: bool,
}

impl Field {
    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// Underlying structure of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Struct(Vec<Field>),
    Interface(Vec<String>),
    Other(Type),
}

impl TypeShape {
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Struct(fields) => fields,
            _ => &[],
        }
    }
}

/// Declaring object of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: String,
    /// Position of the type's name in its declaration.
    pub pos: Pos,
    pub shape: TypeShape,
    pub methods: Vec<(String, Signature)>,
}

impl NamedType {
    #[must_use]
    pub fn new(name: impl Into<String>, pos: Pos, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            pos,
            shape,
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.shape.fields().iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Signature> {
        self.methods
            .iter()
            .find_map(|(n, sig)| (n == name).then_some(sig))
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
