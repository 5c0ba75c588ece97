//! Word and variable scanning

use crate::syntax::token_type::{TokenType, lookup_ident};

use super::{Lexer, helpers::is_word_continue};

impl Lexer {
    /// Read `[A-Za-z][A-Za-z0-9_]*` and classify it.
    pub(super) fn read_word(&mut self) -> TokenType {
        let start = self.position;
        self.read_char();
        while self.current_char.is_some_and(is_word_continue) {
            self.read_char();
        }
        let word = self.slice(start, self.position);
        lookup_ident(&word)
    }

    /// Read `$` followed by at least one word character.
    pub(super) fn read_variable(&mut self) -> TokenType {
        self.read_char(); // '$'
        while self.current_char.is_some_and(is_word_continue) {
            self.read_char();
        }
        TokenType::Variable
    }
}
