//! Builder pattern trait for Diagnostic construction

use crate::diagnostics::position::Span;
use crate::diagnostics::types::ErrorType;

/// Fluent `with_*` setters for diagnostics.
///
/// # Example
/// ```
/// use yammm::diagnostics::{DiagnosticBuilder, UNEXPECTED_TOKEN, diag_enhanced};
/// use yammm::diagnostics::position::Span;
///
/// let diag = diag_enhanced(&UNEXPECTED_TOKEN)
///     .with_span(Span::default())
///     .with_message("Expected `{`, found end of file.")
///     .with_hint_text("Close the type body with `}`.");
/// assert_eq!(diag.code(), Some("E201"));
/// ```
pub trait DiagnosticBuilder: Sized {
    /// Set the error code (e.g., "E201")
    fn with_code(self, code: impl Into<String>) -> Self;

    fn with_error_type(self, error_type: ErrorType) -> Self;

    fn with_message(self, message: impl Into<String>) -> Self;

    fn with_span(self, span: Span) -> Self;

    /// Add a text-only hint. A leading "Hint:" is stripped.
    fn with_hint_text(self, text: impl Into<String>) -> Self;

    /// Add a hint pointing at another source location.
    fn with_hint_at(self, text: impl Into<String>, span: Span) -> Self;

    fn with_note(self, text: impl Into<String>) -> Self;

    fn with_help(self, text: impl Into<String>) -> Self;
}
