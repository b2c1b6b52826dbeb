//! Diagnostic accumulation and exemption filtering.

use fp_core::diagnostic::Diagnostic;

use crate::leak::ExemptionSet;

/// Diagnostics in discovery order.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Drop every diagnostic whose subject type is exempt. Order is kept;
    /// nothing is sorted or deduplicated.
    #[must_use]
    pub fn finish(self, exemptions: &ExemptionSet) -> Vec<Diagnostic> {
        let mut kept = self.diagnostics;
        kept.retain(|diag| {
            let exempt = exemptions.contains(&diag.subject);
            if exempt {
                tracing::trace!(subject = %diag.subject, message = %diag.message, "suppressed by export leak");
            }
            !exempt
        });
        kept
    }
}
