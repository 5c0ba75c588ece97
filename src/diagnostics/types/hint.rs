//! Hints attached to diagnostics

use serde::Serialize;

use crate::diagnostics::position::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HintKind {
    /// General suggestion (default)
    Hint,
    /// Additional context
    Note,
    /// Explicit instructions on how to fix
    Help,
}

impl HintKind {
    pub fn label(self) -> &'static str {
        match self {
            HintKind::Hint => "Hint",
            HintKind::Note => "Note",
            HintKind::Help => "Help",
        }
    }
}

/// A hint with an optional source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Hint {
    pub kind: HintKind,
    pub text: String,
    pub span: Option<Span>,
}

impl Hint {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: HintKind::Hint,
            text: text.into(),
            span: None,
        }
    }

    pub fn at(text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: HintKind::Hint,
            text: text.into(),
            span: Some(span),
        }
    }

    pub fn note(text: impl Into<String>) -> Self {
        Self {
            kind: HintKind::Note,
            text: text.into(),
            span: None,
        }
    }

    pub fn help(text: impl Into<String>) -> Self {
        Self {
            kind: HintKind::Help,
            text: text.into(),
            span: None,
        }
    }
}
