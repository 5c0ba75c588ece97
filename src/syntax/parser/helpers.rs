use tracing::trace;

use crate::diagnostics::position::Span;
use crate::diagnostics::{DiagnosticBuilder, unclosed_delimiter, unexpected_token};
use crate::syntax::name::Name;
use crate::syntax::precedence::{Precedence, token_precedence};
use crate::syntax::token::Token;
use crate::syntax::token_type::{PROPERTY_NAME_KEYWORDS, TokenType};

use super::Parser;

/// Where panic-mode recovery may resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SyncMode {
    /// The next import or top-level declaration.
    Declaration,
    /// The next member of a type body, or the body's closing brace.
    Member,
}

impl<'a> Parser<'a> {
    // Token navigation
    pub(super) fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(super) fn peek_token(&self) -> &Token {
        self.nth_token(1)
    }

    /// Token `n` places after the current one; clamps to `Eof`.
    pub(super) fn nth_token(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub(super) fn next_token(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Leave the cursor on the last token of an unterminated construct, so the
    /// caller's advance lands on the token that cut it short.
    pub(super) fn step_back(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub(super) fn current_type(&self) -> TokenType {
        self.current_token().token_type
    }

    pub(super) fn peek_type(&self) -> TokenType {
        self.peek_token().token_type
    }

    pub(super) fn is_current_token(&self, token_type: TokenType) -> bool {
        self.current_type() == token_type
    }

    pub(super) fn is_peek_token(&self, token_type: TokenType) -> bool {
        self.peek_type() == token_type
    }

    pub(super) fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.is_peek_token(token_type) {
            self.next_token();
            true
        } else {
            self.peek_error(&token_type.to_string());
            false
        }
    }

    /// Advance onto a peeked name of one of `kinds`.
    pub(super) fn expect_name(&mut self, kinds: &[TokenType], expected: &str) -> Option<Name> {
        if kinds.contains(&self.peek_type()) {
            self.next_token();
            Some(self.current_name())
        } else {
            self.peek_error(expected);
            None
        }
    }

    /// Consume the closer of a bracketed construct opened at token `open`.
    pub(super) fn expect_closing(&mut self, closer: TokenType, open: usize, what: &str) -> bool {
        if self.is_peek_token(closer) {
            self.next_token();
            return true;
        }
        match self.peek_type() {
            TokenType::Error => {}
            TokenType::Eof => {
                let diag = unclosed_delimiter(
                    self.peek_span(),
                    &closer.to_string(),
                    what,
                    self.token_span(open),
                );
                self.errors.push(diag);
            }
            _ => {
                let diag = unexpected_token(
                    self.peek_span(),
                    &closer.to_string(),
                    &describe(self.peek_token()),
                )
                .with_hint_at(format!("{} opened here", what), self.token_span(open));
                self.errors.push(diag);
            }
        }
        false
    }

    // Span utilities
    pub(super) fn token_span(&self, index: usize) -> Span {
        self.spans.token_span(&self.tokens[index])
    }

    pub(super) fn current_span(&self) -> Span {
        self.spans.token_span(self.current_token())
    }

    pub(super) fn peek_span(&self) -> Span {
        self.spans.token_span(self.peek_token())
    }

    /// Span from token `start` through the current token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        self.spans
            .token_range(&self.tokens[start], self.current_token())
    }

    pub(super) fn current_name(&self) -> Name {
        Name::new(self.current_token().text.clone(), self.current_span())
    }

    pub(super) fn doc_at(&self, index: usize) -> Option<String> {
        self.docs.get(index).cloned().flatten()
    }

    // Precedence helpers
    pub(super) fn peek_precedence(&self) -> Precedence {
        token_precedence(self.peek_type())
    }

    // Errors
    pub(super) fn peek_error(&mut self, expected: &str) {
        if self.is_peek_token(TokenType::Error) {
            return;
        }
        let diag = unexpected_token(self.peek_span(), expected, &describe(self.peek_token()));
        self.errors.push(diag);
    }

    pub(super) fn current_error(&mut self, expected: &str) {
        if self.is_current_token(TokenType::Error) {
            return;
        }
        let diag = unexpected_token(
            self.current_span(),
            expected,
            &describe(self.current_token()),
        );
        self.errors.push(diag);
    }

    // Recovery boundaries
    pub(super) fn at_declaration_start(&self) -> bool {
        match self.current_type() {
            TokenType::Abstract | TokenType::Part => self.is_peek_token(TokenType::Type),
            TokenType::Type => {
                self.is_peek_token(TokenType::UcWord)
                    && matches!(
                        self.nth_token(2).token_type,
                        TokenType::LBrace | TokenType::Assign | TokenType::Extends
                    )
            }
            _ => false,
        }
    }

    pub(super) fn at_member_start(&self) -> bool {
        match self.current_type() {
            TokenType::Association | TokenType::Composition | TokenType::RBrace => true,
            TokenType::Bang => self.is_peek_token(TokenType::StringLiteral),
            token_type if is_property_name(token_type) => self.line_starts[self.position],
            _ => false,
        }
    }

    /// Skip tokens until recovery point `mode` is reached. `from` is the first
    /// token of the failed production; at least one token is always skipped
    /// past it, and braces opened after it must close before a member
    /// boundary counts.
    pub(super) fn synchronize(&mut self, mode: SyncMode, from: usize) {
        if self.position <= from {
            self.next_token();
        }
        let skipped_from = self.position;
        let mut depth = self.tokens[from..self.position]
            .iter()
            .fold(0usize, |depth, token| match token.token_type {
                TokenType::LBrace => depth + 1,
                TokenType::RBrace => depth.saturating_sub(1),
                _ => depth,
            });

        while !self.is_current_token(TokenType::Eof) {
            if self.at_declaration_start() {
                break;
            }
            let stop = match mode {
                SyncMode::Declaration => matches!(
                    self.current_type(),
                    TokenType::Import | TokenType::Datatype
                ),
                SyncMode::Member => depth == 0 && self.at_member_start(),
            };
            if stop {
                break;
            }
            match self.current_type() {
                TokenType::LBrace => depth += 1,
                TokenType::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.next_token();
        }

        trace!(
            ?mode,
            skipped = self.position - skipped_from,
            resume = %self.current_type(),
            "parser recovered"
        );
    }
}

/// Property names: lowercase words plus a closed set of keywords.
pub(super) fn is_property_name(token_type: TokenType) -> bool {
    token_type == TokenType::LcWord || PROPERTY_NAME_KEYWORDS.contains(&token_type)
}

/// How a token is named in "found ..." messages.
pub(super) fn describe(token: &Token) -> String {
    match token.token_type {
        TokenType::Eof => token.token_type.to_string(),
        TokenType::UcWord
        | TokenType::LcWord
        | TokenType::Variable
        | TokenType::IntegerLiteral
        | TokenType::FloatLiteral
        | TokenType::StringLiteral
        | TokenType::RegexLiteral
        | TokenType::Error => format!("`{}`", token.text),
        _ => token.token_type.to_string(),
    }
}
