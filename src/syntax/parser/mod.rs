//! Recursive-descent parser for schema files, with a precedence-climbing
//! parser for invariant expressions.
//!
//! The parser works on the default-channel tokens of a fully lexed source.
//! Productions start with `current_token` on their first token and leave it
//! on their last one; callers advance past it.

use crate::diagnostics::Diagnostic;
use crate::diagnostics::position::Span;
use crate::syntax::lexer::doc_comment_text;
use crate::syntax::schema::SchemaUnit;
use crate::syntax::source::CodePointOffset;
use crate::syntax::span_builder::SpanBuilder;
use crate::syntax::token::Token;
use crate::syntax::token_type::TokenType;

mod datatype;
mod expression;
mod helpers;
mod literal;
mod schema;
mod type_body;

pub struct Parser<'a> {
    pub(super) spans: SpanBuilder<'a>,
    pub(super) tokens: Vec<Token>,
    /// Doc comment directly in front of each token, if any.
    pub(super) docs: Vec<Option<String>>,
    /// Whether each token is the first significant token on its line.
    pub(super) line_starts: Vec<bool>,
    pub(super) position: usize,
    pub errors: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Build a parser over a full token stream (hidden tokens included), as
    /// produced by [`tokenize`](crate::syntax::lexer::tokenize).
    pub fn new(spans: SpanBuilder<'a>, stream: Vec<Token>) -> Self {
        let mut tokens = Vec::with_capacity(stream.len());
        let mut docs = Vec::with_capacity(stream.len());
        let mut line_starts = Vec::with_capacity(stream.len());

        let mut pending_doc: Option<String> = None;
        let mut at_line_start = true;
        let mut end = 0;

        for token in stream {
            end = token.end.0;
            match token.token_type {
                TokenType::DocComment => {
                    pending_doc = Some(doc_comment_text(&token.text));
                    at_line_start |= token.text.contains('\n');
                }
                TokenType::LineComment => pending_doc = None,
                TokenType::Whitespace => at_line_start |= token.text.contains('\n'),
                _ => {
                    docs.push(pending_doc.take());
                    line_starts.push(at_line_start);
                    at_line_start = false;
                    tokens.push(token);
                }
            }
        }

        if tokens.last().is_none_or(|t| t.token_type != TokenType::Eof) {
            tokens.push(Token::eof(CodePointOffset(end)));
            docs.push(None);
            line_starts.push(at_line_start);
        }

        Parser {
            spans,
            tokens,
            docs,
            line_starts,
            position: 0,
            errors: Vec::new(),
        }
    }

    pub fn parse_schema(&mut self) -> SchemaUnit {
        let mut unit = SchemaUnit::default();
        self.parse_header(&mut unit);
        self.parse_body(&mut unit);
        unit.span = self.unit_span();
        unit
    }

    pub fn take_errors(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.errors)
    }

    /// Number of default-channel tokens, `Eof` included.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// First through last significant token; a point at the end of an empty
    /// source.
    fn unit_span(&self) -> Span {
        match self.tokens.len() {
            0 | 1 => self.spans.point(self.tokens[self.tokens.len() - 1].start),
            len => self
                .spans
                .token_range(&self.tokens[0], &self.tokens[len - 2]),
        }
    }
}
