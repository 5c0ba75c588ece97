//! Diagnostics module.
//!
//! Structured diagnostics with severity, error codes, source spans and hints,
//! plus rendering helpers that print a source snippet with a caret underline.

pub mod aggregator;
pub mod builders;
pub mod diagnostic;
pub mod format;
pub mod parse_errors;
pub mod position;
pub mod registry;
pub mod rendering;
pub mod types;

pub use aggregator::{
    DEFAULT_MAX_ERRORS, DiagnosticCounts, DiagnosticsAggregator, DiagnosticsReport,
    render_diagnostics,
};
pub use builders::DiagnosticBuilder;
pub use diagnostic::Diagnostic;
pub use format::format_message;
pub use registry::{ERROR_CODES, diag_enhanced, lookup_error_code};
pub use types::{ErrorCode, ErrorType, Hint, HintKind, Severity};

pub use parse_errors::*;
