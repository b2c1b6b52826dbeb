//! Stack of the function and method bodies enclosing the walk position.

use fp_core::ast::NodeId;
use fp_core::types::TypeId;

use crate::error::CheckError;

/// One function body on the stack. Function literals carry no receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub func: NodeId,
    pub receiver: Option<TypeId>,
}

impl Frame {
    #[must_use]
    pub const fn function(func: NodeId) -> Self {
        Self {
            func,
            receiver: None,
        }
    }

    #[must_use]
    pub const fn method(func: NodeId, receiver: Option<TypeId>) -> Self {
        Self { func, receiver }
    }
}

#[derive(Debug, Default)]
pub struct FunctionTracker {
    stack: Vec<Frame>,
}

impl FunctionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, frame: Frame) {
        self.stack.push(frame);
    }

    /// Pop the innermost frame, which must belong to `func`.
    ///
    /// # Errors
    /// Returns `CheckError::InternalConsistency` when the stack is empty or
    /// its top is a different function.
    pub fn exit(&mut self, func: NodeId) -> Result<(), CheckError> {
        match self.stack.pop() {
            Some(frame) if frame.func == func => Ok(()),
            Some(frame) => Err(CheckError::InternalConsistency(format!(
                "leaving function {} but the innermost function is {}",
                func.0, frame.func.0
            ))),
            None => Err(CheckError::InternalConsistency(format!(
                "leaving function {} with an empty function stack",
                func.0
            ))),
        }
    }

    /// Receiver type of the innermost enclosing method, looking through
    /// function literals.
    #[must_use]
    pub fn current_receiver_type(&self) -> Option<TypeId> {
        self.stack.iter().rev().find_map(|frame| frame.receiver)
    }

    /// The stack must be empty between files.
    ///
    /// # Errors
    /// Returns `CheckError::InternalConsistency` if frames are left over.
    pub fn ensure_empty(&self) -> Result<(), CheckError> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(CheckError::InternalConsistency(format!(
                "{} function frame(s) left open after walking a file",
                self.stack.len()
            )))
        }
    }
}
