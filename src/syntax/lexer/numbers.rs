//! Number literal scanning
//!
//! - Integers: 42
//! - Floats: 3.14, 2.5e10, 1.5E-3, 7e2
//!
//! Signs are separate tokens; the parser folds them into bounds and literals.

use crate::syntax::token_type::TokenType;

use super::Lexer;

impl Lexer {
    pub(super) fn read_number(&mut self) -> TokenType {
        let mut token_type = TokenType::IntegerLiteral;
        self.consume_digits();

        if self.current_char == Some('.') && self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            token_type = TokenType::FloatLiteral;
            self.read_char(); // '.'
            self.consume_digits();
        }

        if matches!(self.current_char, Some('e' | 'E')) && self.exponent_follows() {
            token_type = TokenType::FloatLiteral;
            self.read_char(); // 'e'
            if matches!(self.current_char, Some('+' | '-')) {
                self.read_char();
            }
            self.consume_digits();
        }

        token_type
    }

    fn consume_digits(&mut self) {
        while self.current_char.is_some_and(|c| c.is_ascii_digit()) {
            self.read_char();
        }
    }

    /// An exponent needs digits; `1e` alone is an integer followed by a word.
    fn exponent_follows(&self) -> bool {
        match self.peek_char() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self.peek_n(2).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::lexer::tokenize;
    use crate::syntax::token_type::TokenType;

    fn first(input: &str) -> (TokenType, String) {
        let (tokens, _) = tokenize(input);
        (tokens[0].token_type, tokens[0].text.clone())
    }

    #[test]
    fn integers_and_floats() {
        assert_eq!(first("42"), (TokenType::IntegerLiteral, "42".into()));
        assert_eq!(first("3.14"), (TokenType::FloatLiteral, "3.14".into()));
        assert_eq!(first("2.5e10"), (TokenType::FloatLiteral, "2.5e10".into()));
        assert_eq!(first("1.5E-3"), (TokenType::FloatLiteral, "1.5E-3".into()));
        assert_eq!(first("7e2"), (TokenType::FloatLiteral, "7e2".into()));
    }

    #[test]
    fn dangling_dot_and_exponent_are_not_consumed() {
        assert_eq!(first("1.x"), (TokenType::IntegerLiteral, "1".into()));
        assert_eq!(first("1e"), (TokenType::IntegerLiteral, "1".into()));
        assert_eq!(first("1e+"), (TokenType::IntegerLiteral, "1".into()));
    }
}
