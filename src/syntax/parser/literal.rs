use crate::diagnostics::expected_expression;
use crate::syntax::expression::{Expr, Literal};
use crate::syntax::lexer::{regex_value, string_value};
use crate::syntax::token_type::TokenType;

use super::Parser;
use super::helpers::describe;

impl<'a> Parser<'a> {
    pub(super) fn parse_integer(&mut self) -> Option<Expr> {
        let value = self.integer_value("")?;
        Some(self.literal(Literal::Integer(value)))
    }

    pub(super) fn parse_float(&mut self) -> Option<Expr> {
        let value = self.float_value("")?;
        Some(self.literal(Literal::Float(value)))
    }

    pub(super) fn parse_string(&mut self) -> Expr {
        let value = string_value(&self.current_token().text);
        self.literal(Literal::String(value))
    }

    pub(super) fn parse_regex(&mut self) -> Expr {
        let value = regex_value(&self.current_token().text);
        self.literal(Literal::Regex(value))
    }

    pub(super) fn parse_boolean(&mut self) -> Expr {
        let value = self.is_current_token(TokenType::True);
        self.literal(Literal::Boolean(value))
    }

    /// `nil` and `_` both denote the absent value.
    pub(super) fn parse_nil(&mut self) -> Expr {
        self.literal(Literal::Nil)
    }

    /// `$name`; the stored name drops the sigil.
    pub(super) fn parse_variable(&mut self) -> Expr {
        let text = &self.current_token().text;
        Expr::Variable {
            name: text.trim_start_matches('$').to_string(),
            span: self.current_span(),
        }
    }

    fn literal(&self, value: Literal) -> Expr {
        Expr::Literal {
            value,
            span: self.current_span(),
        }
    }

    pub(super) fn no_prefix_parse_error(&mut self) {
        if self.is_current_token(TokenType::Error) {
            return;
        }
        let diag = expected_expression(self.current_span(), &describe(self.current_token()));
        self.errors.push(diag);
    }
}
