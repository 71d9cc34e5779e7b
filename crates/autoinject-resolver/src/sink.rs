//! Diagnostic sink collaborator.

use autoinject_common::{Diagnostic, DiagnosticKind};
use autoinject_decl::TypeDeclaration;

/// Receives diagnostics. Reporting never fails and never interrupts
/// resolution.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Build and report a diagnostic about `decl`.
pub(crate) fn report_for(
    sink: &mut dyn DiagnosticSink,
    kind: DiagnosticKind,
    decl: &TypeDeclaration,
    extra_args: &[&str],
) {
    let diagnostic = Diagnostic::new(kind, decl.full_name(), &decl.location, extra_args);
    tracing::debug!(
        code = diagnostic.code,
        type_name = %diagnostic.type_name,
        "diagnostic: {}",
        diagnostic.message_text
    );
    sink.report(diagnostic);
}
