//! String and regex literal scanning

use crate::syntax::token_type::TokenType;

use super::{LexError, LexErrorKind, Lexer, escape::unescape};
use crate::syntax::source::CodePointOffset;

impl Lexer {
    /// Read a single-line string opened by `quote` (`"` or `'`). Escapes are
    /// validated once the closing quote is found.
    pub(super) fn read_string(&mut self, start: usize, quote: char) -> TokenType {
        self.read_char(); // opening quote

        loop {
            match self.current_char {
                None | Some('\n') | Some('\r') => {
                    self.error(LexErrorKind::UnterminatedString, start);
                    return TokenType::Error;
                }
                Some('\\') => {
                    self.read_char();
                    if self.current_char.is_some_and(|c| c != '\n' && c != '\r') {
                        self.read_char();
                    }
                }
                Some(c) if c == quote => {
                    self.read_char();
                    break;
                }
                Some(_) => self.read_char(),
            }
        }

        let body_start = start + 1;
        let body = self.slice(body_start, self.position - 1);
        for bad in unescape(&body).errors {
            let at = body_start + bad.offset;
            self.errors.push(LexError {
                kind: LexErrorKind::InvalidEscape(bad.sequence),
                start: CodePointOffset(at),
                end: CodePointOffset(at + bad.len),
            });
        }

        TokenType::StringLiteral
    }

    /// Read a `/.../` regex. A backslash escapes the following character,
    /// including `/`.
    pub(super) fn read_regex(&mut self, start: usize) -> TokenType {
        self.read_char(); // opening '/'

        loop {
            match self.current_char {
                None | Some('\n') | Some('\r') => {
                    self.error(LexErrorKind::UnterminatedRegex, start);
                    return TokenType::Error;
                }
                Some('\\') => {
                    self.read_char();
                    if self.current_char.is_some_and(|c| c != '\n' && c != '\r') {
                        self.read_char();
                    }
                }
                Some('/') => {
                    self.read_char();
                    return TokenType::RegexLiteral;
                }
                Some(_) => self.read_char(),
            }
        }
    }
}

/// Cooked value of a raw string token: quotes removed, escapes decoded.
pub fn string_value(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    unescape(chars.as_str()).value
}

/// Pattern source of a raw regex token: slashes removed, `\/` unescaped.
/// Other escapes are left for the regex engine.
pub fn regex_value(raw: &str) -> String {
    let inner = raw
        .strip_prefix('/')
        .and_then(|s| s.strip_suffix('/'))
        .unwrap_or(raw);
    inner.replace("\\/", "/")
}
