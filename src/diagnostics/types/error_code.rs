//! Error code types for the diagnostics system

use serde::Serialize;

/// Which front-end phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorType {
    Lexical,
    Syntax,
}

impl ErrorType {
    /// Returns the prefix string used in error headers
    pub fn prefix(&self) -> &'static str {
        match self {
            ErrorType::Lexical => "Lexical error",
            ErrorType::Syntax => "Syntax error",
        }
    }
}

/// Error code with message template and optional hint. `{}` placeholders are
/// filled positionally by [`format_message`](crate::diagnostics::format_message).
#[derive(Debug, Clone, Copy)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
    pub error_type: ErrorType,
    pub message: &'static str,
    pub hint: Option<&'static str>,
}
