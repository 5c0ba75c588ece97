//! Comment handling (line comments and doc comments)

use crate::syntax::token_type::TokenType;

use super::{LexErrorKind, Lexer};

impl Lexer {
    /// Read a `//` comment up to, but not including, the line terminator. The
    /// newline belongs to the whitespace token that follows.
    pub(super) fn read_line_comment(&mut self) {
        debug_assert!(
            self.current_char == Some('/') && self.peek_char() == Some('/'),
            "read_line_comment expects current_char == '/' and peek_char == '/'"
        );
        while let Some(ch) = self.current_char {
            if ch == '\n' || (ch == '\r' && self.peek_char() == Some('\n')) {
                break;
            }
            self.read_char();
        }
    }

    /// Read a `/* ... */` doc comment. Comments do not nest.
    /// Returns `Error` (after recording the diagnostic) if EOF is reached first.
    pub(super) fn read_block_comment(&mut self, start: usize) -> TokenType {
        self.read_char(); // '/'
        self.read_char(); // '*'

        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek_char() == Some('/') {
                self.read_char(); // '*'
                self.read_char(); // '/'
                return TokenType::DocComment;
            }
            self.read_char();
        }

        self.error(LexErrorKind::UnterminatedComment, start);
        TokenType::Error
    }
}

/// Documentation text of a raw `/* ... */` comment: delimiters removed,
/// leading `*` gutters stripped from each line, surrounding blank lines
/// dropped.
pub fn doc_comment_text(raw: &str) -> String {
    let body = raw.strip_prefix("/*").unwrap_or(raw);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let body = body.trim_start_matches('*');

    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::{LexErrorKind, tokenize};

    #[test]
    fn line_comment_leaves_newline_to_whitespace() {
        let (tokens, errors) = tokenize("// note\nx");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].token_type, TokenType::LineComment);
        assert_eq!(tokens[0].text, "// note");
        assert_eq!(tokens[1].token_type, TokenType::Whitespace);
        assert_eq!(tokens[1].text, "\n");
        assert_eq!(tokens[2].text, "x");
    }

    #[test]
    fn line_comment_leaves_crlf_to_whitespace() {
        let (tokens, _) = tokenize("// note\r\nx");
        assert_eq!(tokens[0].text, "// note");
        assert_eq!(tokens[1].text, "\r\n");
    }

    #[test]
    fn block_comment_is_a_hidden_doc_token() {
        let (tokens, errors) = tokenize("/* Widget docs */ type");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].token_type, TokenType::DocComment);
        assert!(tokens[0].is_hidden());
        assert_eq!(tokens[2].token_type, TokenType::Type);
    }

    #[test]
    fn unterminated_block_comment_reports_error() {
        let (tokens, errors) = tokenize("x /* never closed");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::UnterminatedComment);
        assert_eq!((errors[0].start.0, errors[0].end.0), (2, 17));
        assert_eq!(tokens[2].token_type, TokenType::Error);
        assert_eq!(tokens[3].token_type, TokenType::Eof);
    }

    #[test]
    fn doc_text_strips_gutters() {
        assert_eq!(doc_comment_text("/* one line */"), "one line");
        assert_eq!(
            doc_comment_text("/**\n * First line.\n *   indented\n */"),
            "First line.\n  indented"
        );
        assert_eq!(doc_comment_text("/**/"), "");
    }
}
