//! Text rendering for diagnostics.

pub mod colors;
pub mod source;

use std::collections::HashMap;

use crate::diagnostics::position::Span;
use crate::diagnostics::types::{ErrorType, Hint, HintKind, Severity};

use colors::{Palette, Style};
pub use source::render_source_snippet;

/// Header line: `--> syntax error[E201]: UNEXPECTED TOKEN`
pub fn render_header(
    out: &mut String,
    severity: Severity,
    error_type: Option<ErrorType>,
    title: &str,
    code: &str,
    use_color: bool,
) {
    let label = header_label(severity, error_type).to_ascii_lowercase();
    Palette::new(use_color).paint(
        out,
        Style::Header,
        &format!("--> {}[{}]: {}", label, code, title),
    );
    out.push('\n');
}

pub fn render_message(out: &mut String, message: Option<&str>) {
    if let Some(message) = message
        && !message.is_empty()
    {
        out.push('\n');
        out.push_str(message);
        out.push('\n');
        return;
    }
    out.push('\n');
}

/// Location line: `  --> file.yammm:10:5` (column shown 1-based).
pub fn render_location(out: &mut String, file: &str, span: Option<Span>, message: Option<&str>) {
    let Some(span) = span.filter(|s| !s.is_zero()) else {
        return;
    };
    if message.is_some_and(|m| !m.is_empty()) {
        out.push('\n');
    }
    out.push_str(&format!(
        "  --> {}:{}:{}\n",
        file,
        span.start.line,
        span.start.column + 1
    ));
}

/// Hints grouped by kind; located hints also get a snippet.
pub fn render_hints(out: &mut String, source: Option<&str>, hints: &[Hint], use_color: bool) {
    if hints.is_empty() {
        return;
    }
    let palette = Palette::new(use_color);

    let (text_hints, span_hints): (Vec<_>, Vec<_>) = hints
        .iter()
        .partition(|h| h.span.is_none_or(|s| s.is_zero()));

    let mut by_kind: HashMap<HintKind, Vec<&Hint>> = HashMap::new();
    for hint in text_hints {
        by_kind.entry(hint.kind).or_default().push(hint);
    }

    for kind in [HintKind::Hint, HintKind::Note, HintKind::Help] {
        if let Some(hints) = by_kind.get(&kind) {
            out.push('\n');
            palette.paint(out, Style::Hint(kind), &format!("{}:", kind.label()));
            out.push('\n');
            for hint in hints {
                out.push_str(&format!("  {}\n", hint.text));
            }
        }
    }

    for hint in span_hints {
        let Some(span) = hint.span else {
            continue;
        };
        out.push('\n');
        palette.paint(out, Style::Hint(hint.kind), &format!("{}:", hint.kind.label()));
        out.push_str(&format!(
            " {} ({}:{})\n",
            hint.text,
            span.start.line,
            span.start.column + 1
        ));
        render_source_snippet(out, source, span, use_color);
    }
}

fn header_label(severity: Severity, error_type: Option<ErrorType>) -> &'static str {
    match severity {
        Severity::Error => error_type
            .map(|error_type| error_type.prefix())
            .unwrap_or("Error"),
        Severity::Warning => "Warning",
        Severity::Note => "Note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uses_phase_prefix() {
        let mut out = String::new();
        render_header(
            &mut out,
            Severity::Error,
            Some(ErrorType::Lexical),
            "UNTERMINATED STRING",
            "E101",
            false,
        );
        assert_eq!(out, "--> lexical error[E101]: UNTERMINATED STRING\n");
    }

    #[test]
    fn zero_span_has_no_location() {
        let mut out = String::new();
        render_location(&mut out, "a.yammm", Some(Span::default()), None);
        assert!(out.is_empty());
    }

    #[test]
    fn text_hints_are_grouped() {
        let mut out = String::new();
        let hints = vec![Hint::text("one"), Hint::help("fix it"), Hint::text("two")];
        render_hints(&mut out, None, &hints, false);
        assert_eq!(out, "\nHint:\n  one\n  two\n\nHelp:\n  fix it\n");
    }
}
