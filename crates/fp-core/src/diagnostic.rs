//! Checker findings.

use serde::Serialize;

use crate::span::Span;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
    /// Name of the type whose member was accessed. Used to apply
    /// export-leak exemptions before the list is returned.
    pub subject: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(span: Span, message: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            subject: subject.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::FileId;

    #[test]
    fn serializes_span_and_subject() {
        let diag = Diagnostic::new(Span::new(FileId(1), 4, 8), "msg", "widget");
        let json = serde_json::to_value(&diag).expect("serializes");
        assert_eq!(json["span"]["file"], 1);
        assert_eq!(json["span"]["start"], 4);
        assert_eq!(json["subject"], "widget");
    }
}
