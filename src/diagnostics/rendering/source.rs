//! Source snippet rendering with caret highlighting.
//!
//! Columns are code points, matching [`Position::column`](crate::diagnostics::position::Position).

use super::colors::{Palette, Style};
use crate::diagnostics::position::Span;

/// Code-point index where a `//` or `/*` comment starts outside string
/// literals. Both quote styles are tracked, with backslash escapes.
fn find_comment_start(line: &str) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        match (quote, chars[i]) {
            (Some(_), '\\') => i += 2,
            (Some(q), c) if c == q => {
                quote = None;
                i += 1;
            }
            (Some(_), _) => i += 1,
            (None, c @ ('"' | '\'')) => {
                quote = Some(c);
                i += 1;
            }
            (None, '/') if matches!(chars.get(i + 1), Some('/') | Some('*')) => return Some(i),
            (None, _) => i += 1,
        }
    }

    None
}

/// Trim a trailing comment from a displayed line unless the highlighted
/// columns reach into it.
///
/// Returns `(displayed_line, adjusted_col_start, adjusted_col_end)`.
pub fn render_diagnostic_line(
    source_line: &str,
    span_col_start: usize,
    span_col_end: usize,
) -> (String, usize, usize) {
    if let Some(comment_start) = find_comment_start(source_line) {
        if span_col_end > comment_start {
            return (source_line.to_string(), span_col_start, span_col_end);
        }

        let trimmed: String = source_line.chars().take(comment_start).collect();
        let trimmed = trimmed.trim_end().to_string();
        let trimmed_len = trimmed.chars().count();

        (
            trimmed,
            span_col_start.min(trimmed_len),
            span_col_end.min(trimmed_len),
        )
    } else {
        (source_line.to_string(), span_col_start, span_col_end)
    }
}

/// Get a specific line from source code (1-indexed)
pub fn get_source_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source.lines().nth(line - 1)
}

/// Render the lines covered by `span` with a caret underline.
pub fn render_source_snippet(out: &mut String, source: Option<&str>, span: Span, use_color: bool) {
    let Some(source) = source else {
        return;
    };

    let start_line = span.start.line;
    // An exclusive end at column 0 means the span stopped at a line break.
    let end_line = if span.end.line > start_line && span.end.column == 0 {
        span.end.line - 1
    } else {
        span.end.line.max(start_line)
    };
    let line_width = end_line.to_string().len();

    out.push_str(&format!("{:>width$} |\n", "", width = line_width));

    for line_no in start_line..=end_line {
        let Some(line_text) = get_source_line(source, line_no) else {
            continue;
        };

        let max_col = if line_no == end_line && span.end.line == line_no {
            span.end.column
        } else {
            usize::MAX
        };
        let (display_line, _, _) = render_diagnostic_line(line_text, 0, max_col);
        let line_len = display_line.chars().count();

        out.push_str(&format!(
            "{:>width$} | {}\n",
            line_no,
            display_line,
            width = line_width
        ));

        let caret_start = if line_no == start_line {
            span.start.column.min(line_len)
        } else {
            0
        };
        let caret_end = if line_no == span.end.line {
            span.end.column.min(line_len)
        } else {
            line_len
        };
        let caret_len = caret_end.saturating_sub(caret_start).max(1);

        out.push_str(&format!(
            "{:>width$} | {}",
            "",
            " ".repeat(caret_start),
            width = line_width
        ));
        Palette::new(use_color).paint(out, Style::Caret, &"^".repeat(caret_len));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::position::{Position, SourceId};

    fn span(start: (usize, usize), end: (usize, usize)) -> Span {
        Span::new(
            SourceId(1),
            Position::new(start.0, start.1, 0),
            Position::new(end.0, end.1, 0),
        )
    }

    #[test]
    fn no_comment() {
        assert_eq!(find_comment_start("name String required"), None);
    }

    #[test]
    fn line_comment_after_code() {
        assert_eq!(find_comment_start("name String // the name"), Some(12));
    }

    #[test]
    fn slash_inside_either_quote_is_not_comment() {
        assert_eq!(find_comment_start(r#"schema "a//b""#), None);
        assert_eq!(find_comment_start("schema 'a/*b'"), None);
    }

    #[test]
    fn comment_column_counts_code_points() {
        assert_eq!(find_comment_start("! \"日本\" x // c"), Some(9));
    }

    #[test]
    fn trailing_comment_trimmed_when_outside_span() {
        let (display, start, end) = render_diagnostic_line("age Integer  // years", 4, 11);
        assert_eq!(display, "age Integer");
        assert_eq!((start, end), (4, 11));
    }

    #[test]
    fn span_into_comment_preserves_line() {
        let line = "x /* open";
        let (display, _, _) = render_diagnostic_line(line, 2, 9);
        assert_eq!(display, line);
    }

    #[test]
    fn caret_under_single_line_span() {
        let mut out = String::new();
        render_source_snippet(&mut out, Some("schema \"S\"\ntype 日 {\n"), span((2, 5), (2, 6)), false);
        assert_eq!(out, "  |\n2 | type 日 {\n  |      ^\n");
    }

    #[test]
    fn zero_width_span_gets_one_caret() {
        let mut out = String::new();
        render_source_snippet(&mut out, Some("type A {"), span((1, 8), (1, 8)), false);
        assert_eq!(out, "  |\n1 | type A {\n  |         ^\n");
    }

    #[test]
    fn span_ending_at_line_break_stays_on_its_line() {
        let mut out = String::new();
        render_source_snippet(&mut out, Some("ab\ncd"), span((1, 0), (2, 0)), false);
        assert_eq!(out, "  |\n1 | ab\n  | ^^\n");
    }
}
