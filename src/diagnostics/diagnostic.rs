use serde::Serialize;

use super::builders::DiagnosticBuilder;
use super::format::format_message;
use super::rendering;
use super::types::{ErrorCode, ErrorType, Hint, Severity};
use crate::diagnostics::position::{Position, SourceId, Span};

/// A lexical or syntax problem found while reading a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub(crate) severity: Severity,
    pub(crate) title: String,
    pub(crate) code: Option<String>,
    pub(crate) error_type: Option<ErrorType>,
    pub(crate) message: Option<String>,
    pub(crate) span: Option<Span>,
    pub(crate) hints: Vec<Hint>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            code: None,
            error_type: None,
            message: None,
            span: None,
            hints: Vec::new(),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, title)
    }

    pub fn note(title: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, title)
    }

    /// Build an error from a registered [`ErrorCode`], filling the message
    /// and hint templates with `values`.
    pub fn make_error(spec: &'static ErrorCode, values: &[&str], span: Span) -> Self {
        let mut diag = Diagnostic::error(spec.title)
            .with_code(spec.code)
            .with_error_type(spec.error_type)
            .with_span(span)
            .with_message(format_message(spec.message, values));
        if let Some(hint) = spec.hint {
            diag = diag.with_hint_text(format_message(hint, values));
        }
        diag
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Starting position of the span (derived field)
    pub fn position(&self) -> Option<Position> {
        self.span.map(|s| s.start)
    }

    pub fn source(&self) -> SourceId {
        self.span.map(|s| s.source).unwrap_or_default()
    }

    /// Render to text. `source` is the full text of the file the span points
    /// into; without it the snippet is omitted.
    pub fn render(&self, source: Option<&str>, file: &str, use_color: bool) -> String {
        let mut out = String::new();
        let code = self.code.as_deref().unwrap_or("E000");

        rendering::render_header(
            &mut out,
            self.severity,
            self.error_type,
            &self.title,
            code,
            use_color,
        );
        rendering::render_message(&mut out, self.message.as_deref());
        rendering::render_location(&mut out, file, self.span, self.message.as_deref());
        if let Some(span) = self.span.filter(|s| !s.is_zero()) {
            rendering::render_source_snippet(&mut out, source, span, use_color);
        }
        rendering::render_hints(&mut out, source, &self.hints, use_color);

        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

impl DiagnosticBuilder for Diagnostic {
    fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    fn with_hint_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let cleaned = text
            .strip_prefix("Hint:")
            .unwrap_or(text.as_str())
            .trim_start();
        self.hints.push(Hint::text(cleaned));
        self
    }

    fn with_hint_at(mut self, text: impl Into<String>, span: Span) -> Self {
        self.hints.push(Hint::at(text, span));
        self
    }

    fn with_note(mut self, text: impl Into<String>) -> Self {
        self.hints.push(Hint::note(text));
        self
    }

    fn with_help(mut self, text: impl Into<String>) -> Self {
        self.hints.push(Hint::help(text));
        self
    }
}
