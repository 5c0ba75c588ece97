//! Members of a type body: properties, associations, compositions and
//! invariants.

use crate::diagnostics::{
    Diagnostic, DiagnosticBuilder, EXPECTED_DATATYPE, EXPECTED_MEMBER, INVALID_MULTIPLICITY,
    INVALID_RELATION_BODY, unclosed_delimiter, unexpected_token,
};
use crate::syntax::lexer::string_value;
use crate::syntax::name::Name;
use crate::syntax::precedence::Precedence;
use crate::syntax::schema::{
    Association, Composition, DataTypeRef, Invariant, Member, Multiplicity, Property,
    PropertyModifier, RelationBody, ReverseEdge,
};
use crate::syntax::token_type::TokenType;

use super::Parser;
use super::helpers::{SyncMode, describe, is_property_name};

const RELATION_NAME: &[TokenType] = &[TokenType::UcWord, TokenType::LcWord];

impl<'a> Parser<'a> {
    /// Members up to the closing `}`, with the current token on `{`. An
    /// unclosed body ends at the next declaration or end of file.
    pub(super) fn parse_type_body(&mut self, type_name: &Name) -> Vec<Member> {
        let open = self.position;
        let mut members = Vec::new();
        self.next_token();

        loop {
            if self.is_current_token(TokenType::RBrace) {
                break;
            }
            if self.is_current_token(TokenType::Eof) || self.at_declaration_start() {
                let what = format!("the body of `{}`", type_name);
                self.errors.push(unclosed_delimiter(
                    self.current_span(),
                    "`}`",
                    &what,
                    self.token_span(open),
                ));
                self.step_back();
                break;
            }

            let from = self.position;
            match self.parse_member() {
                Some(member) => {
                    members.push(member);
                    self.next_token();
                }
                None => self.synchronize(SyncMode::Member, from),
            }
        }

        members
    }

    fn parse_member(&mut self) -> Option<Member> {
        match self.current_type() {
            TokenType::Association => self.parse_association().map(Member::Association),
            TokenType::Composition => self.parse_composition().map(Member::Composition),
            TokenType::Bang => self.parse_invariant().map(Member::Invariant),
            token_type if is_property_name(token_type) => {
                self.parse_property().map(Member::Property)
            }
            TokenType::Error => None,
            _ => {
                let found = describe(self.current_token());
                self.errors.push(Diagnostic::make_error(
                    &EXPECTED_MEMBER,
                    &[found.as_str()],
                    self.current_span(),
                ));
                None
            }
        }
    }

    pub(super) fn parse_property(&mut self) -> Option<Property> {
        let start = self.position;
        let doc = self.doc_at(start);
        let name = self.current_name();

        self.next_token();
        let datatype = self.parse_datatype_ref()?;

        let modifier = match self.peek_type() {
            TokenType::Primary => PropertyModifier::Primary,
            TokenType::Required => PropertyModifier::Required,
            _ => PropertyModifier::None,
        };
        if modifier != PropertyModifier::None {
            self.next_token();
        }

        Some(Property {
            doc,
            name,
            datatype,
            modifier,
            span: self.span_from(start),
        })
    }

    /// A built-in type or a (possibly qualified) datatype name at the
    /// current token.
    pub(super) fn parse_datatype_ref(&mut self) -> Option<DataTypeRef> {
        let token_type = self.current_type();
        if token_type.is_builtin_type() {
            return self.parse_builtin_type().map(DataTypeRef::Builtin);
        }
        if token_type == TokenType::UcWord
            || (token_type == TokenType::LcWord && self.is_peek_token(TokenType::Dot))
        {
            return self.parse_type_ref().map(DataTypeRef::Alias);
        }
        if token_type != TokenType::Error {
            let found = describe(self.current_token());
            self.errors.push(Diagnostic::make_error(
                &EXPECTED_DATATYPE,
                &[found.as_str()],
                self.current_span(),
            ));
        }
        None
    }

    fn parse_association(&mut self) -> Option<Association> {
        let start = self.position;
        let doc = self.doc_at(start);
        let name = self.expect_name(RELATION_NAME, "a relation name")?;
        let multiplicity = self.parse_optional_multiplicity()?;

        self.next_token();
        let target = self.parse_type_ref()?;
        let reverse = self.parse_reverse_edge()?;

        let body = if self.is_peek_token(TokenType::LBrace) {
            self.next_token();
            Some(self.parse_relation_body())
        } else {
            None
        };

        Some(Association {
            doc,
            name,
            multiplicity,
            target,
            reverse,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_composition(&mut self) -> Option<Composition> {
        let start = self.position;
        let doc = self.doc_at(start);
        let name = self.expect_name(RELATION_NAME, "a relation name")?;
        let multiplicity = self.parse_optional_multiplicity()?;

        self.next_token();
        let target = self.parse_type_ref()?;
        let reverse = self.parse_reverse_edge()?;

        if self.is_peek_token(TokenType::LBrace) {
            self.errors.push(
                unexpected_token(self.peek_span(), "end of composition", "`{`")
                    .with_help("Only associations (`-->`) can carry edge properties."),
            );
            return None;
        }

        Some(Composition {
            doc,
            name,
            multiplicity,
            target,
            reverse,
            span: self.span_from(start),
        })
    }

    /// `(...)` after the relation name; absent means optional-one.
    fn parse_optional_multiplicity(&mut self) -> Option<Multiplicity> {
        if !self.is_peek_token(TokenType::LParen) {
            return Some(Multiplicity::default());
        }
        self.next_token();
        self.parse_multiplicity()
    }

    /// Decode `(_)`, `(_:one)`, `(_:many)`, `(one)`, `(one:one)`,
    /// `(one:many)` or `(many)`, with the current token on `(`.
    fn parse_multiplicity(&mut self) -> Option<Multiplicity> {
        self.next_token();
        let (required, many) = match self.current_type() {
            TokenType::Underscore => (false, self.parse_cardinality()?),
            TokenType::One => (true, self.parse_cardinality()?),
            TokenType::Many => (false, true),
            _ => {
                self.multiplicity_error(false);
                return None;
            }
        };

        if !self.is_peek_token(TokenType::RParen) {
            self.multiplicity_error(true);
            return None;
        }
        self.next_token();

        Some(match (required, many) {
            (false, false) => Multiplicity::OptionalOne,
            (true, false) => Multiplicity::RequiredOne,
            (false, true) => Multiplicity::OptionalMany,
            (true, true) => Multiplicity::RequiredMany,
        })
    }

    /// Optional `:one` / `:many` suffix; `true` means many.
    fn parse_cardinality(&mut self) -> Option<bool> {
        if !self.is_peek_token(TokenType::Colon) {
            return Some(false);
        }
        self.next_token();
        match self.peek_type() {
            TokenType::One => {
                self.next_token();
                Some(false)
            }
            TokenType::Many => {
                self.next_token();
                Some(true)
            }
            _ => {
                self.multiplicity_error(true);
                None
            }
        }
    }

    fn multiplicity_error(&mut self, at_peek: bool) {
        let token = if at_peek {
            self.peek_token()
        } else {
            self.current_token()
        };
        if token.token_type == TokenType::Error {
            return;
        }
        let found = describe(token);
        let span = self.spans.token_span(token);
        self.errors
            .push(Diagnostic::make_error(&INVALID_MULTIPLICITY, &[found.as_str()], span));
    }

    /// `/ name (mult)?` after the target type.
    fn parse_reverse_edge(&mut self) -> Option<Option<ReverseEdge>> {
        if !self.is_peek_token(TokenType::Slash) {
            return Some(None);
        }
        self.next_token();
        let start = self.position;
        let name = self.expect_name(RELATION_NAME, "a reverse relation name")?;
        let multiplicity = self.parse_optional_multiplicity()?;
        Some(Some(ReverseEdge {
            name,
            multiplicity,
            span: self.span_from(start),
        }))
    }

    /// Edge properties of an association, with the current token on `{`.
    fn parse_relation_body(&mut self) -> RelationBody {
        let open = self.position;
        let mut properties = Vec::new();
        self.next_token();

        loop {
            let token_type = self.current_type();
            if token_type == TokenType::RBrace {
                break;
            }
            if token_type == TokenType::Eof || self.at_declaration_start() {
                self.errors.push(unclosed_delimiter(
                    self.current_span(),
                    "`}`",
                    "the relation body",
                    self.token_span(open),
                ));
                self.step_back();
                break;
            }

            let from = self.position;
            if is_property_name(token_type) {
                match self.parse_property() {
                    Some(property) => {
                        properties.push(property);
                        self.next_token();
                    }
                    None => self.synchronize(SyncMode::Member, from),
                }
                continue;
            }

            if token_type != TokenType::Error {
                let found = describe(self.current_token());
                self.errors.push(Diagnostic::make_error(
                    &INVALID_RELATION_BODY,
                    &[found.as_str()],
                    self.current_span(),
                ));
            }
            self.synchronize(SyncMode::Member, from);
        }

        RelationBody {
            properties,
            span: self.span_from(open),
        }
    }

    fn parse_invariant(&mut self) -> Option<Invariant> {
        let start = self.position;
        if !self.expect_peek(TokenType::StringLiteral) {
            return None;
        }
        let message = string_value(&self.current_token().text);

        self.next_token();
        let constraint = self.parse_expression(Precedence::Lowest)?;

        Some(Invariant {
            message,
            constraint,
            span: self.span_from(start),
        })
    }
}
