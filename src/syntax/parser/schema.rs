//! Header, imports and top-level declarations.

use std::collections::HashMap;

use crate::diagnostics::position::Span;
use crate::diagnostics::{
    DiagnosticBuilder, Diagnostic, EXPECTED_DATATYPE, EXPECTED_DECLARATION,
    IMPORT_AFTER_DECLARATION, INVALID_ALIAS, INVALID_QUALIFIER, MISSING_SCHEMA_HEADER,
    MODIFIER_ON_DATATYPE, RESERVED_KEYWORD, derived_alias_keyword, duplicate_alias,
};
use crate::syntax::alias::{is_reserved_keyword, validate_alias};
use crate::syntax::lexer::string_value;
use crate::syntax::name::Name;
use crate::syntax::schema::{
    DatatypeDecl, Declaration, ImportDecl, SchemaUnit, TypeDecl, TypeModifier, TypeRef,
};
use crate::syntax::token_type::TokenType;

use super::Parser;
use super::helpers::{SyncMode, describe};

impl<'a> Parser<'a> {
    pub(super) fn parse_header(&mut self, unit: &mut SchemaUnit) {
        if !self.is_current_token(TokenType::Schema) {
            if !self.is_current_token(TokenType::Error) {
                let found = describe(self.current_token());
                self.errors.push(Diagnostic::make_error(
                    &MISSING_SCHEMA_HEADER,
                    &[found.as_str()],
                    self.current_span(),
                ));
            }
            return;
        }

        let start = self.position;
        unit.doc = self.doc_at(start);
        if self.expect_peek(TokenType::StringLiteral) {
            unit.name = string_value(&self.current_token().text);
        }
        unit.header_span = self.span_from(start);
        self.next_token();
    }

    /// Imports and declarations up to end of file.
    pub(super) fn parse_body(&mut self, unit: &mut SchemaUnit) {
        let mut aliases: HashMap<String, Span> = HashMap::new();

        while !self.is_current_token(TokenType::Eof) {
            let from = self.position;
            match self.current_type() {
                TokenType::Import => match self.parse_import() {
                    Some(import) => {
                        self.check_import(&import, &mut aliases, !unit.declarations.is_empty());
                        unit.imports.push(import);
                        self.next_token();
                    }
                    None => self.synchronize(SyncMode::Declaration, from),
                },
                TokenType::Type | TokenType::Abstract | TokenType::Part => {
                    match self.parse_declaration() {
                        Some(declaration) => {
                            unit.declarations.push(declaration);
                            self.next_token();
                        }
                        None => self.synchronize(SyncMode::Declaration, from),
                    }
                }
                TokenType::Datatype => {
                    self.errors.push(
                        Diagnostic::make_error(&RESERVED_KEYWORD, &["datatype"], self.current_span())
                            .with_help("Declare datatypes as `type Name = Builtin`."),
                    );
                    self.synchronize(SyncMode::Declaration, from);
                }
                TokenType::Error => self.synchronize(SyncMode::Declaration, from),
                _ => {
                    let found = describe(self.current_token());
                    self.errors.push(Diagnostic::make_error(
                        &EXPECTED_DECLARATION,
                        &[found.as_str()],
                        self.current_span(),
                    ));
                    self.synchronize(SyncMode::Declaration, from);
                }
            }
        }
    }

    fn parse_import(&mut self) -> Option<ImportDecl> {
        let start = self.position;
        if !self.expect_peek(TokenType::StringLiteral) {
            return None;
        }
        let path = string_value(&self.current_token().text);

        let mut alias = None;
        if self.is_peek_token(TokenType::As) {
            self.next_token();
            self.next_token();
            let token_type = self.current_type();
            if token_type.is_word() {
                alias = Some(self.current_name());
            } else if token_type.is_keyword() {
                let text = self.current_token().text.clone();
                if let Err(err) = validate_alias(&text) {
                    let quoted = format!("`{}`", text);
                    self.errors.push(
                        Diagnostic::make_error(&INVALID_ALIAS, &[quoted.as_str()], self.current_span())
                            .with_note(err.to_string()),
                    );
                }
            } else {
                self.current_error("an alias");
                return None;
            }
        }

        Some(ImportDecl {
            path,
            alias,
            span: self.span_from(start),
        })
    }

    fn check_import(
        &mut self,
        import: &ImportDecl,
        aliases: &mut HashMap<String, Span>,
        after_declaration: bool,
    ) {
        if after_declaration {
            self.errors.push(Diagnostic::make_error(
                &IMPORT_AFTER_DECLARATION,
                &[import.path.as_str()],
                import.span,
            ));
        }

        let alias = import.effective_alias();
        let alias_span = import.alias.as_ref().map_or(import.span, |name| name.span);
        if import.alias.is_none() && is_reserved_keyword(&alias) {
            self.errors
                .push(derived_alias_keyword(import.span, &import.path, &alias));
            return;
        }
        if let Some(first) = aliases.get(&alias) {
            self.errors.push(duplicate_alias(alias_span, &alias, *first));
        } else {
            aliases.insert(alias, alias_span);
        }
    }

    fn parse_declaration(&mut self) -> Option<Declaration> {
        let start = self.position;
        let doc = self.doc_at(start);

        let modifier = match self.current_type() {
            TokenType::Abstract => TypeModifier::Abstract,
            TokenType::Part => TypeModifier::Part,
            _ => TypeModifier::None,
        };
        if modifier != TypeModifier::None && !self.expect_peek(TokenType::Type) {
            return None;
        }

        let name = self.parse_declaration_name()?;

        match self.peek_type() {
            TokenType::Assign => {
                if modifier != TypeModifier::None {
                    let keyword = self.tokens[start].text.clone();
                    self.errors.push(Diagnostic::make_error(
                        &MODIFIER_ON_DATATYPE,
                        &[keyword.as_str()],
                        self.token_span(start),
                    ));
                }
                self.next_token();
                if !self.peek_type().is_builtin_type() {
                    if !self.is_peek_token(TokenType::Error) {
                        let found = describe(self.peek_token());
                        self.errors.push(Diagnostic::make_error(
                            &EXPECTED_DATATYPE,
                            &[found.as_str()],
                            self.peek_span(),
                        ));
                    }
                    return None;
                }
                self.next_token();
                let datatype = self.parse_builtin_type()?;
                Some(Declaration::Datatype(DatatypeDecl {
                    doc,
                    name,
                    datatype,
                    span: self.span_from(start),
                }))
            }
            TokenType::Extends | TokenType::LBrace => {
                let extends = if self.is_peek_token(TokenType::Extends) {
                    self.next_token();
                    self.parse_extends()?
                } else {
                    Vec::new()
                };
                if !self.expect_peek(TokenType::LBrace) {
                    return None;
                }
                let members = self.parse_type_body(&name);
                Some(Declaration::Type(TypeDecl {
                    doc,
                    name,
                    modifier,
                    extends,
                    members,
                    span: self.span_from(start),
                }))
            }
            _ => {
                self.peek_error("`{`, `=` or `extends`");
                None
            }
        }
    }

    /// The name after `type`. Built-in type names and keywords are rejected
    /// with a dedicated error.
    fn parse_declaration_name(&mut self) -> Option<Name> {
        let peek = self.peek_type();
        if peek.is_keyword() {
            let text = self.peek_token().text.clone();
            self.errors.push(Diagnostic::make_error(
                &RESERVED_KEYWORD,
                &[text.as_str()],
                self.peek_span(),
            ));
            return None;
        }
        self.expect_name(&[TokenType::UcWord], "a type name")
    }

    /// `extends A, b.B,` with the current token on `extends`.
    fn parse_extends(&mut self) -> Option<Vec<TypeRef>> {
        let mut parents = Vec::new();
        self.next_token();
        parents.push(self.parse_type_ref()?);

        while self.is_peek_token(TokenType::Comma) {
            self.next_token();
            if self.is_peek_token(TokenType::LBrace) {
                break;
            }
            self.next_token();
            parents.push(self.parse_type_ref()?);
        }
        Some(parents)
    }

    /// `(Alias '.')? UcWord` starting at the current token.
    pub(super) fn parse_type_ref(&mut self) -> Option<TypeRef> {
        let start = self.position;
        let token_type = self.current_type();

        let qualifier = if self.is_peek_token(TokenType::Dot)
            && (token_type.is_word() || token_type.is_keyword())
        {
            let qualifier = self.current_name();
            if validate_alias(qualifier.as_str()).is_err() {
                self.errors.push(Diagnostic::make_error(
                    &INVALID_QUALIFIER,
                    &[qualifier.as_str()],
                    qualifier.span,
                ));
            }
            self.next_token();
            Some(qualifier)
        } else {
            None
        };

        let name = if qualifier.is_some() {
            self.expect_name(&[TokenType::UcWord], "a type name")?
        } else if token_type == TokenType::UcWord {
            self.current_name()
        } else {
            self.current_error("a type name");
            return None;
        };

        Some(TypeRef {
            qualifier,
            name,
            span: self.span_from(start),
        })
    }
}
