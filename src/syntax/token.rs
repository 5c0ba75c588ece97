use std::fmt;

use serde::Serialize;

use crate::syntax::source::CodePointOffset;

use super::token_type::TokenType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    Default,
    Hidden,
}

/// One lexeme. `text` is the raw source slice, so the texts of all tokens
/// concatenate back to the input. Offsets are code points, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
    pub start: CodePointOffset,
    pub end: CodePointOffset,
    pub channel: Channel,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        text: impl Into<String>,
        start: CodePointOffset,
        end: CodePointOffset,
    ) -> Self {
        let channel = if token_type.is_trivia() {
            Channel::Hidden
        } else {
            Channel::Default
        };
        Self {
            token_type,
            text: text.into(),
            start,
            end,
            channel,
        }
    }

    pub fn eof(at: CodePointOffset) -> Self {
        Self::new(TokenType::Eof, "", at, at)
    }

    pub fn is_hidden(&self) -> bool {
        self.channel == Channel::Hidden
    }

    pub fn len_chars(&self) -> usize {
        self.end.0 - self.start.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({:?}, {:?}, {}..{})",
            self.token_type, self.text, self.start.0, self.end.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia_goes_to_hidden_channel() {
        let ws = Token::new(TokenType::Whitespace, " ", CodePointOffset(0), CodePointOffset(1));
        let doc = Token::new(
            TokenType::DocComment,
            "/* x */",
            CodePointOffset(0),
            CodePointOffset(7),
        );
        let word = Token::new(TokenType::LcWord, "name", CodePointOffset(0), CodePointOffset(4));
        assert!(ws.is_hidden());
        assert!(doc.is_hidden());
        assert!(!word.is_hidden());
        assert_eq!(word.len_chars(), 4);
    }

    #[test]
    fn display_shows_kind_text_and_range() {
        let tok = Token::new(TokenType::UcWord, "Widget", CodePointOffset(5), CodePointOffset(11));
        assert_eq!(tok.to_string(), "Token(UcWord, \"Widget\", 5..11)");
    }
}
