//! Built-in datatypes and their bracketed parameters.

use std::fmt::Display;

use crate::diagnostics::{
    Diagnostic, ENUM_TOO_FEW_VALUES, INVALID_VECTOR_DIMENSION, invalid_bounds, invalid_float,
    invalid_integer,
};
use crate::syntax::datatype::{Bound, Builtin, BuiltinKind, BuiltinType};
use crate::syntax::lexer::{regex_value, string_value};
use crate::syntax::token_type::TokenType;

use super::Parser;

impl<'a> Parser<'a> {
    /// A built-in type starting at its keyword. Parameters in brackets are
    /// read when present; `Enum`, `Pattern` and `Vector` require them.
    pub(super) fn parse_builtin_type(&mut self) -> Option<BuiltinType> {
        let start = self.position;
        let Some(kind) = BuiltinKind::from_token(self.current_type()) else {
            self.current_error("a built-in type");
            return None;
        };

        let builtin = match kind {
            BuiltinKind::Integer => {
                let (min, max) = self.parse_optional_bounds(Self::parse_integer_bound)?;
                Builtin::Integer { min, max }
            }
            BuiltinKind::Float => {
                let (min, max) = self.parse_optional_bounds(Self::parse_float_bound)?;
                Builtin::Float { min, max }
            }
            BuiltinKind::String => {
                let (min, max) = self.parse_optional_bounds(Self::parse_length_bound)?;
                Builtin::String { min, max }
            }
            BuiltinKind::Boolean => Builtin::Boolean,
            BuiltinKind::Date => Builtin::Date,
            BuiltinKind::Uuid => Builtin::Uuid,
            BuiltinKind::Enum => self.parse_enum()?,
            BuiltinKind::Pattern => self.parse_pattern()?,
            BuiltinKind::Timestamp => self.parse_timestamp()?,
            BuiltinKind::Vector => self.parse_vector()?,
            BuiltinKind::List => self.parse_list()?,
        };

        Some(BuiltinType {
            builtin,
            span: self.span_from(start),
        })
    }

    /// `[min, max]` if the next token opens a bracket, otherwise unbounded.
    /// Reversed bounds are reported but kept.
    fn parse_optional_bounds<T>(
        &mut self,
        mut bound: impl FnMut(&mut Self) -> Option<Bound<T>>,
    ) -> Option<(Bound<T>, Bound<T>)>
    where
        T: PartialOrd + Display,
    {
        if !self.is_peek_token(TokenType::LBracket) {
            return Some((Bound::Unbounded, Bound::Unbounded));
        }
        self.next_token();
        let open = self.position;

        self.next_token();
        let min = bound(self)?;
        if !self.expect_peek(TokenType::Comma) {
            return None;
        }
        self.next_token();
        let max = bound(self)?;
        if !self.expect_closing(TokenType::RBracket, open, "the bounds") {
            return None;
        }

        if let (Some(lo), Some(hi)) = (min.value(), max.value())
            && lo > hi
        {
            let diag = invalid_bounds(self.span_from(open), &lo.to_string(), &hi.to_string());
            self.errors.push(diag);
        }
        Some((min, max))
    }

    fn parse_integer_bound(&mut self) -> Option<Bound<i64>> {
        match self.current_type() {
            TokenType::Underscore => Some(Bound::Unbounded),
            TokenType::IntegerLiteral => self.integer_value("").map(Bound::Value),
            TokenType::Minus | TokenType::Plus => {
                let sign = if self.is_current_token(TokenType::Minus) { "-" } else { "" };
                if !self.expect_peek(TokenType::IntegerLiteral) {
                    return None;
                }
                self.integer_value(sign).map(Bound::Value)
            }
            _ => {
                self.current_error("an integer or `_`");
                None
            }
        }
    }

    fn parse_float_bound(&mut self) -> Option<Bound<f64>> {
        let sign = match self.current_type() {
            TokenType::Underscore => return Some(Bound::Unbounded),
            TokenType::IntegerLiteral | TokenType::FloatLiteral => "",
            TokenType::Minus | TokenType::Plus => {
                let sign = if self.is_current_token(TokenType::Minus) { "-" } else { "" };
                if !matches!(
                    self.peek_type(),
                    TokenType::IntegerLiteral | TokenType::FloatLiteral
                ) {
                    self.peek_error("a number");
                    return None;
                }
                self.next_token();
                sign
            }
            _ => {
                self.current_error("a number or `_`");
                return None;
            }
        };
        self.float_value(sign).map(Bound::Value)
    }

    fn parse_length_bound(&mut self) -> Option<Bound<u64>> {
        match self.current_type() {
            TokenType::Underscore => Some(Bound::Unbounded),
            TokenType::IntegerLiteral => self.unsigned_value().map(Bound::Value),
            _ => {
                self.current_error("a non-negative integer or `_`");
                None
            }
        }
    }

    /// `Enum["A", "B", ...]`: at least two strings, trailing comma allowed.
    fn parse_enum(&mut self) -> Option<Builtin> {
        let keyword = self.position;
        if !self.expect_peek(TokenType::LBracket) {
            return None;
        }
        let open = self.position;
        let mut values = Vec::new();

        loop {
            if self.is_peek_token(TokenType::RBracket) {
                self.next_token();
                break;
            }
            if !self.expect_peek(TokenType::StringLiteral) {
                return None;
            }
            values.push(string_value(&self.current_token().text));
            if self.is_peek_token(TokenType::Comma) {
                self.next_token();
                continue;
            }
            if !self.expect_closing(TokenType::RBracket, open, "the enum values") {
                return None;
            }
            break;
        }

        if values.len() < 2 {
            let count = values.len().to_string();
            self.errors.push(Diagnostic::make_error(
                &ENUM_TOO_FEW_VALUES,
                &[count.as_str()],
                self.span_from(keyword),
            ));
        }
        Some(Builtin::Enum { values })
    }

    /// `Pattern[regex]` or `Pattern[regex, flags]`; the regex may be a string
    /// or a `/.../` literal.
    fn parse_pattern(&mut self) -> Option<Builtin> {
        if !self.expect_peek(TokenType::LBracket) {
            return None;
        }
        let open = self.position;

        let regex = match self.peek_type() {
            TokenType::StringLiteral => {
                self.next_token();
                string_value(&self.current_token().text)
            }
            TokenType::RegexLiteral => {
                self.next_token();
                regex_value(&self.current_token().text)
            }
            _ => {
                self.peek_error("a pattern string");
                return None;
            }
        };

        let mut flags = None;
        if self.is_peek_token(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::StringLiteral) {
                return None;
            }
            flags = Some(string_value(&self.current_token().text));
        }

        if !self.expect_closing(TokenType::RBracket, open, "the pattern") {
            return None;
        }
        Some(Builtin::Pattern { regex, flags })
    }

    fn parse_timestamp(&mut self) -> Option<Builtin> {
        if !self.is_peek_token(TokenType::LBracket) {
            return Some(Builtin::Timestamp { format: None });
        }
        self.next_token();
        let open = self.position;
        if !self.expect_peek(TokenType::StringLiteral) {
            return None;
        }
        let format = string_value(&self.current_token().text);
        if !self.expect_closing(TokenType::RBracket, open, "the timestamp format") {
            return None;
        }
        Some(Builtin::Timestamp {
            format: Some(format),
        })
    }

    fn parse_vector(&mut self) -> Option<Builtin> {
        if !self.expect_peek(TokenType::LBracket) {
            return None;
        }
        let open = self.position;
        if !self.expect_peek(TokenType::IntegerLiteral) {
            return None;
        }

        let literal = self.current_token().text.clone();
        let dimensions = match literal.parse::<u64>() {
            Ok(dimensions) if dimensions > 0 => dimensions,
            _ => {
                self.errors.push(Diagnostic::make_error(
                    &INVALID_VECTOR_DIMENSION,
                    &[literal.as_str()],
                    self.current_span(),
                ));
                return None;
            }
        };

        if !self.expect_closing(TokenType::RBracket, open, "the vector dimension") {
            return None;
        }
        Some(Builtin::Vector { dimensions })
    }

    /// `List<Elem>` with optional length bounds.
    fn parse_list(&mut self) -> Option<Builtin> {
        if !self.expect_peek(TokenType::Lt) {
            return None;
        }
        let open = self.position;
        self.next_token();
        let element = self.parse_datatype_ref()?;
        if !self.expect_closing(TokenType::Gt, open, "the list element type") {
            return None;
        }
        let (min, max) = self.parse_optional_bounds(Self::parse_length_bound)?;
        Some(Builtin::List {
            element: Box::new(element),
            min,
            max,
        })
    }

    /// Current integer literal with an optional leading sign.
    pub(super) fn integer_value(&mut self, sign: &str) -> Option<i64> {
        let literal = format!("{}{}", sign, self.current_token().text);
        match literal.parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                let diag = invalid_integer(self.current_span(), &literal);
                self.errors.push(diag);
                None
            }
        }
    }

    pub(super) fn float_value(&mut self, sign: &str) -> Option<f64> {
        let literal = format!("{}{}", sign, self.current_token().text);
        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                let diag = invalid_float(self.current_span(), &literal);
                self.errors.push(diag);
                None
            }
        }
    }

    fn unsigned_value(&mut self) -> Option<u64> {
        let literal = self.current_token().text.clone();
        match literal.parse::<u64>() {
            Ok(value) => Some(value),
            Err(_) => {
                let diag = invalid_integer(self.current_span(), &literal);
                self.errors.push(diag);
                None
            }
        }
    }
}
