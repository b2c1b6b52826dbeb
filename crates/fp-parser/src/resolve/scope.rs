//! Lexical scopes for function bodies.

use std::collections::HashMap;

use fp_core::types::{Type, TypeId};

/// What a local name refers to.
#[derive(Debug, Clone)]
pub(crate) enum Binding {
    /// A variable or constant; `None` when its type is unknown. An
    /// untyped binding still shadows outer names.
    Value(Option<Type>),
    /// A type declared inside a function body.
    TypeName(TypeId),
}

impl Binding {
    pub(crate) fn as_value(&self) -> Option<Type> {
        match self {
            Self::Value(ty) => ty.clone(),
            Self::TypeName(_) => None,
        }
    }

    pub(crate) fn as_type(&self) -> Option<Type> {
        match self {
            Self::Value(_) => None,
            Self::TypeName(id) => Some(Type::Named(*id)),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Scopes {
    frames: Vec<HashMap<String, Binding>>,
}

impl Scopes {
    pub(crate) fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Bind in the innermost frame. Returns `false` outside any frame.
    pub(crate) fn bind(&mut self, name: &str, binding: Binding) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.insert(name.to_string(), binding);
                true
            }
            None => false,
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_frames_shadow_outer_ones() {
        let mut scopes = Scopes::default();
        scopes.push();
        scopes.bind("x", Binding::Value(Some(Type::basic("int"))));
        scopes.push();
        scopes.bind("x", Binding::TypeName(TypeId(2)));

        assert_eq!(
            scopes.lookup("x").and_then(Binding::as_type),
            Some(Type::Named(TypeId(2)))
        );
        scopes.pop();
        assert_eq!(
            scopes.lookup("x").and_then(Binding::as_value),
            Some(Type::basic("int"))
        );
    }

    #[test]
    fn binding_outside_frames_is_rejected() {
        let mut scopes = Scopes::default();
        assert!(scopes.is_empty());
        assert!(!scopes.bind("x", Binding::Value(None)));
        assert!(scopes.lookup("x").is_none());
    }
}
