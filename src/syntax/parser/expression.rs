use crate::syntax::datatype::BuiltinKind;
use crate::syntax::expression::{BinaryOp, Expr, Literal, UnaryOp};
use crate::syntax::name::Name;
use crate::syntax::precedence::{Precedence, rhs_precedence_for_infix, token_precedence};
use crate::syntax::token_type::TokenType;

use super::Parser;
use super::helpers::is_property_name;

const FUNCTION_NAME: &[TokenType] = &[TokenType::LcWord, TokenType::UcWord];

impl<'a> Parser<'a> {
    // Core expression parsing
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let token_type = self.current_type();
        match token_type {
            TokenType::IntegerLiteral => self.parse_integer(),
            TokenType::FloatLiteral => self.parse_float(),
            TokenType::StringLiteral => Some(self.parse_string()),
            TokenType::RegexLiteral => Some(self.parse_regex()),
            TokenType::True | TokenType::False => Some(self.parse_boolean()),
            TokenType::Nil | TokenType::Underscore => Some(self.parse_nil()),
            TokenType::Variable => Some(self.parse_variable()),
            TokenType::LcWord => Some(Expr::Name {
                name: self.current_token().text.clone(),
                span: self.current_span(),
            }),
            TokenType::UcWord => Some(Expr::RelationName {
                name: self.current_token().text.clone(),
                span: self.current_span(),
            }),
            TokenType::Bang | TokenType::Minus => self.parse_unary(),
            TokenType::LParen => self.parse_grouped_expression(),
            TokenType::LBracket => self.parse_list_literal(),
            _ => match BuiltinKind::from_token(token_type) {
                Some(keyword) => Some(Expr::DatatypeKeyword {
                    keyword,
                    span: self.current_span(),
                }),
                None => {
                    self.no_prefix_parse_error();
                    None
                }
            },
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.current_type() {
            TokenType::Question => self.parse_ternary(left),
            TokenType::Dot => self.parse_member_access(left),
            TokenType::LBracket => self.parse_index(left),
            TokenType::Arrow => self.parse_pipeline(left),
            token_type => match BinaryOp::from_token(token_type) {
                Some(op) => self.parse_binary(left, op),
                None => Some(left),
            },
        }
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.position;
        let op = UnaryOp::from_token(self.current_type())?;
        if op == UnaryOp::Negate && self.is_peek_token(TokenType::IntegerLiteral) {
            return self.parse_negative_integer(start);
        }
        self.next_token();
        let operand = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Unary {
            op,
            operand: Box::new(operand),
            span: self.span_from(start),
        })
    }

    /// `-` directly before an integer literal is part of the literal, so
    /// `i64::MIN` is representable. Postfix operators still apply afterwards.
    fn parse_negative_integer(&mut self, start: usize) -> Option<Expr> {
        self.next_token();
        let value = self.integer_value("-")?;
        let mut expr = Expr::Literal {
            value: Literal::Integer(value),
            span: self.span_from(start),
        };
        while Precedence::Prefix < self.peek_precedence() {
            self.next_token();
            expr = self.parse_infix(expr)?;
        }
        Some(expr)
    }

    fn parse_binary(&mut self, left: Expr, op: BinaryOp) -> Option<Expr> {
        let token_type = self.current_type();
        let precedence =
            rhs_precedence_for_infix(token_type).unwrap_or_else(|| token_precedence(token_type));
        self.next_token();
        let right = self.parse_expression(precedence)?;
        let span = left.span().merge(right.span());
        Some(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        let open = self.position;
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_closing(TokenType::RParen, open, "the parenthesized expression") {
            return None;
        }
        Some(expr.with_span(self.span_from(open)))
    }

    fn parse_list_literal(&mut self) -> Option<Expr> {
        let open = self.position;
        let elements = self.parse_expression_list(TokenType::RBracket, open, "the list")?;
        Some(Expr::List {
            elements,
            span: self.span_from(open),
        })
    }

    /// `cond ? { then } : { else }`
    fn parse_ternary(&mut self, condition: Expr) -> Option<Expr> {
        let then_branch = self.parse_braced_branch()?;
        if !self.expect_peek(TokenType::Colon) {
            return None;
        }
        let else_branch = self.parse_braced_branch()?;
        let span = condition.span().merge(self.current_span());
        Some(Expr::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            span,
        })
    }

    /// `{ expr }` following the current token.
    fn parse_braced_branch(&mut self) -> Option<Expr> {
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let open = self.position;
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_closing(TokenType::RBrace, open, "the branch") {
            return None;
        }
        Some(expr)
    }

    /// Member names follow property naming, so `$v.type` reaches a property
    /// named `type`.
    fn parse_member_access(&mut self, object: Expr) -> Option<Expr> {
        let peek = self.peek_type();
        if peek != TokenType::UcWord && !is_property_name(peek) {
            self.peek_error("a member name");
            return None;
        }
        self.next_token();
        let member = self.current_name();
        let span = object.span().merge(member.span);
        Some(Expr::Member {
            object: Box::new(object),
            member,
            span,
        })
    }

    fn parse_index(&mut self, object: Expr) -> Option<Expr> {
        let open = self.position;
        let indices = self.parse_expression_list(TokenType::RBracket, open, "the index")?;
        if indices.is_empty() {
            self.no_prefix_parse_error();
            return None;
        }
        let span = object.span().merge(self.current_span());
        Some(Expr::Index {
            object: Box::new(object),
            indices,
            span,
        })
    }

    /// `subject -> name (args)? |params|? {body}?`
    fn parse_pipeline(&mut self, subject: Expr) -> Option<Expr> {
        let function = self.expect_name(FUNCTION_NAME, "a function name")?;

        let args = if self.is_peek_token(TokenType::LParen) {
            self.next_token();
            let open = self.position;
            Some(self.parse_expression_list(TokenType::RParen, open, "the arguments")?)
        } else {
            None
        };

        let params = if self.is_peek_token(TokenType::Pipe) {
            self.next_token();
            Some(self.parse_pipeline_params()?)
        } else {
            None
        };

        let body = if self.is_peek_token(TokenType::LBrace) {
            Some(Box::new(self.parse_braced_branch()?))
        } else {
            None
        };

        let span = subject.span().merge(self.current_span());
        Some(Expr::Pipeline {
            subject: Box::new(subject),
            function,
            args,
            params,
            body,
            span,
        })
    }

    /// `|$a, $b|` with the current token on the opening pipe.
    fn parse_pipeline_params(&mut self) -> Option<Vec<Name>> {
        let mut params = Vec::new();
        loop {
            if !self.expect_peek(TokenType::Variable) {
                return None;
            }
            let token = self.current_token();
            let name = token.text.trim_start_matches('$').to_string();
            params.push(Name::new(name, self.current_span()));
            if !self.is_peek_token(TokenType::Comma) {
                break;
            }
            self.next_token();
        }
        if !self.expect_peek(TokenType::Pipe) {
            return None;
        }
        Some(params)
    }

    /// Comma-separated expressions up to `end`, with the current token on the
    /// opener. Empty lists and a trailing comma are accepted.
    fn parse_expression_list(&mut self, end: TokenType, open: usize, what: &str) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.is_peek_token(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.is_peek_token(TokenType::Comma) {
            self.next_token();
            if self.is_peek_token(end) {
                break;
            }
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_closing(end, open, what) {
            return None;
        }
        Some(list)
    }
}
