//! The yammm lexer - turns source text into a token stream.
//!
//! Offsets are code-point indices into the input. Whitespace and comments are
//! emitted on the hidden channel so the stream reproduces the source exactly.

mod comments;
mod escape;
mod helpers;
mod identifiers;
mod numbers;
mod strings;

pub use comments::doc_comment_text;
pub use escape::{EscapeError, Unescaped, unescape};
pub use strings::{regex_value, string_value};

use thiserror::Error;

use crate::syntax::source::CodePointOffset;
use crate::syntax::token::Token;
use crate::syntax::token_type::TokenType;

use helpers::{is_word_start, is_whitespace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated regular expression")]
    UnterminatedRegex,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid escape sequence `{0}`")]
    InvalidEscape(String),
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
}

/// A malformed lexeme. The lexer keeps going after reporting one; the
/// offending text is emitted as an [`TokenType::Error`] token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub start: CodePointOffset,
    pub end: CodePointOffset,
}

/// Tokenize a whole source text. The returned stream always ends with `Eof`.
pub fn tokenize(text: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(text);
    let tokens = lexer.tokenize();
    (tokens, lexer.errors)
}

#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    current_char: Option<char>,
    /// Last default-channel token, for deciding whether `/` opens a regex.
    last_significant: Option<TokenType>,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            current_char: None,
            last_significant: None,
            errors: Vec::new(),
        };
        lexer.read_char();
        lexer
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.position;

        let token_type = match self.current_char {
            None => return Token::eof(CodePointOffset(start)),

            Some(ch) if is_whitespace(ch) => {
                self.read_whitespace();
                TokenType::Whitespace
            }

            // Comments and regexes all open with '/'.
            Some('/') if self.peek_char() == Some('/') => {
                self.read_line_comment();
                TokenType::LineComment
            }
            Some('/') if self.peek_char() == Some('*') => self.read_block_comment(start),
            Some('/') if self.regex_allowed() => self.read_regex(start),

            // Three-character operators
            Some('-') if self.peek_char() == Some('-') && self.peek_n(2) == Some('>') => {
                self.advance_by(3);
                TokenType::Association
            }
            Some('*') if self.peek_char() == Some('-') && self.peek_n(2) == Some('>') => {
                self.advance_by(3);
                TokenType::Composition
            }

            // Two-character operators
            Some('-') if self.peek_char() == Some('>') => self.two(TokenType::Arrow),
            Some('=') if self.peek_char() == Some('=') => self.two(TokenType::Eq),
            Some('=') if self.peek_char() == Some('~') => self.two(TokenType::Match),
            Some('!') if self.peek_char() == Some('=') => self.two(TokenType::NotEq),
            Some('!') if self.peek_char() == Some('~') => self.two(TokenType::NotMatch),
            Some('<') if self.peek_char() == Some('=') => self.two(TokenType::Lte),
            Some('>') if self.peek_char() == Some('=') => self.two(TokenType::Gte),
            Some('&') if self.peek_char() == Some('&') => self.two(TokenType::And),
            Some('|') if self.peek_char() == Some('|') => self.two(TokenType::Or),

            // Single-character operators and delimiters
            Some('+') => self.one(TokenType::Plus),
            Some('-') => self.one(TokenType::Minus),
            Some('*') => self.one(TokenType::Asterisk),
            Some('/') => self.one(TokenType::Slash),
            Some('%') => self.one(TokenType::Percent),
            Some('<') => self.one(TokenType::Lt),
            Some('>') => self.one(TokenType::Gt),
            Some('!') => self.one(TokenType::Bang),
            Some('^') => self.one(TokenType::Caret),
            Some('=') => self.one(TokenType::Assign),
            Some('?') => self.one(TokenType::Question),
            Some('|') => self.one(TokenType::Pipe),
            Some('.') => self.one(TokenType::Dot),
            Some(',') => self.one(TokenType::Comma),
            Some(':') => self.one(TokenType::Colon),
            Some('(') => self.one(TokenType::LParen),
            Some(')') => self.one(TokenType::RParen),
            Some('[') => self.one(TokenType::LBracket),
            Some(']') => self.one(TokenType::RBracket),
            Some('{') => self.one(TokenType::LBrace),
            Some('}') => self.one(TokenType::RBrace),
            Some('_') => self.one(TokenType::Underscore),

            // Literals
            Some(quote @ ('"' | '\'')) => self.read_string(start, quote),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('$') if self.peek_char().is_some_and(helpers::is_word_continue) => {
                self.read_variable()
            }

            // Names and keywords
            Some(ch) if is_word_start(ch) => self.read_word(),

            Some(ch) => {
                self.read_char();
                self.error(LexErrorKind::UnexpectedCharacter(ch), start);
                TokenType::Error
            }
        };

        let token = Token::new(
            token_type,
            self.slice(start, self.position),
            CodePointOffset(start),
            CodePointOffset(self.position),
        );
        if !token.is_hidden() {
            self.last_significant = Some(token_type);
        }
        token
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.token_type == TokenType::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn read_char(&mut self) {
        self.current_char = self.input.get(self.read_position).copied();
        self.position = self.read_position.min(self.input.len());
        self.read_position = self.position + 1;
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.read_char();
        }
    }

    fn one(&mut self, token_type: TokenType) -> TokenType {
        self.read_char();
        token_type
    }

    fn two(&mut self, token_type: TokenType) -> TokenType {
        self.advance_by(2);
        token_type
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    /// Look ahead n chars without advancing.
    /// n=1 is equivalent to peek_char() (next char), n=2 is the char after that.
    fn peek_n(&self, n: usize) -> Option<char> {
        debug_assert!(n > 0, "peek_n expects n >= 1");
        self.input.get(self.read_position + (n - 1)).copied()
    }

    fn regex_allowed(&self) -> bool {
        self.last_significant
            .is_none_or(|previous| !previous.ends_operand())
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    fn error(&mut self, kind: LexErrorKind, start: usize) {
        self.errors.push(LexError {
            kind,
            start: CodePointOffset(start),
            end: CodePointOffset(self.position),
        });
    }

    fn read_whitespace(&mut self) {
        while self.current_char.is_some_and(is_whitespace) {
            self.read_char();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenType> {
        tokenize(input)
            .0
            .into_iter()
            .filter(|t| !t.is_hidden())
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(
            kinds("--> *-> -> - * == = =~ != !~ ! <= < >= > && || |"),
            vec![
                TokenType::Association,
                TokenType::Composition,
                TokenType::Arrow,
                TokenType::Minus,
                TokenType::Asterisk,
                TokenType::Eq,
                TokenType::Assign,
                TokenType::Match,
                TokenType::NotEq,
                TokenType::NotMatch,
                TokenType::Bang,
                TokenType::Lte,
                TokenType::Lt,
                TokenType::Gte,
                TokenType::Gt,
                TokenType::And,
                TokenType::Or,
                TokenType::Pipe,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn offsets_are_code_points() {
        let (tokens, errors) = tokenize("\"日本\" x");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].token_type, TokenType::StringLiteral);
        assert_eq!((tokens[0].start.0, tokens[0].end.0), (0, 4));
        assert_eq!(tokens[2].text, "x");
        assert_eq!((tokens[2].start.0, tokens[2].end.0), (5, 6));
    }

    #[test]
    fn eof_sits_at_end_of_input() {
        let (tokens, _) = tokenize("a😀");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.token_type, TokenType::Eof);
        assert_eq!(eof.start.0, 2);
    }

    #[test]
    fn unexpected_character_is_recoverable() {
        let (tokens, errors) = tokenize("a # b");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::UnexpectedCharacter('#'));
        assert_eq!((errors[0].start.0, errors[0].end.0), (2, 3));
        let words: Vec<_> = tokens
            .iter()
            .filter(|t| t.token_type == TokenType::LcWord)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn lone_ampersand_and_dollar_are_errors() {
        let (_, errors) = tokenize("& $");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, LexErrorKind::UnexpectedCharacter('&'));
        assert_eq!(errors[1].kind, LexErrorKind::UnexpectedCharacter('$'));
    }
}
