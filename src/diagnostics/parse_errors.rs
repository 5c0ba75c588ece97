//! Error codes for the lexer (E1xx) and parser (E2xx), plus constructors for
//! the diagnostics built from them.

use super::builders::DiagnosticBuilder;
use super::diagnostic::Diagnostic;
use super::position::Span;
use super::registry::diag_enhanced;
use super::types::{ErrorCode, ErrorType};
use crate::syntax::lexer::LexErrorKind;

// ===== Lexical errors =====

pub const UNTERMINATED_STRING: ErrorCode = ErrorCode {
    code: "E101",
    title: "UNTERMINATED STRING",
    error_type: ErrorType::Lexical,
    message: "This string literal is never closed.",
    hint: Some("Strings end on the line they start on, with the quote that opened them."),
};

pub const UNTERMINATED_REGEX: ErrorCode = ErrorCode {
    code: "E102",
    title: "UNTERMINATED REGEX",
    error_type: ErrorType::Lexical,
    message: "This regular expression is never closed.",
    hint: Some("Close the pattern with `/`; write a literal slash as `\\/`."),
};

pub const UNTERMINATED_COMMENT: ErrorCode = ErrorCode {
    code: "E103",
    title: "UNTERMINATED COMMENT",
    error_type: ErrorType::Lexical,
    message: "This block comment is never closed.",
    hint: Some("Close it with `*/`. Block comments do not nest."),
};

pub const INVALID_ESCAPE: ErrorCode = ErrorCode {
    code: "E104",
    title: "INVALID ESCAPE",
    error_type: ErrorType::Lexical,
    message: "Invalid escape sequence `{}`.",
    hint: Some(
        "Valid escapes: \\b \\t \\n \\f \\r \\0 \\\" \\' \\\\ \\uXXXX \\xXX",
    ),
};

pub const UNEXPECTED_CHARACTER: ErrorCode = ErrorCode {
    code: "E105",
    title: "UNEXPECTED CHARACTER",
    error_type: ErrorType::Lexical,
    message: "Unexpected character `{}`.",
    hint: None,
};

// ===== Syntax errors =====

pub const UNEXPECTED_TOKEN: ErrorCode = ErrorCode {
    code: "E201",
    title: "UNEXPECTED TOKEN",
    error_type: ErrorType::Syntax,
    message: "Expected {}, found {}.",
    hint: None,
};

pub const MISSING_SCHEMA_HEADER: ErrorCode = ErrorCode {
    code: "E202",
    title: "MISSING SCHEMA HEADER",
    error_type: ErrorType::Syntax,
    message: "A schema file must start with a header, found {}.",
    hint: Some("Start the file with `schema \"Name\"`."),
};

pub const EXPECTED_EXPRESSION: ErrorCode = ErrorCode {
    code: "E203",
    title: "EXPECTED EXPRESSION",
    error_type: ErrorType::Syntax,
    message: "Expected an expression, found {}.",
    hint: None,
};

pub const INVALID_ALIAS: ErrorCode = ErrorCode {
    code: "E204",
    title: "INVALID ALIAS",
    error_type: ErrorType::Syntax,
    message: "{} cannot be used as an import alias.",
    hint: Some("Aliases are plain names matching [A-Za-z][A-Za-z0-9_]* that are not keywords."),
};

pub const DERIVED_ALIAS_KEYWORD: ErrorCode = ErrorCode {
    code: "E205",
    title: "ALIAS IS A KEYWORD",
    error_type: ErrorType::Syntax,
    message: "The alias derived from \"{}\" is the keyword `{}`.",
    hint: Some("Give the import an explicit alias: import \"{}\" as <name>"),
};

pub const DUPLICATE_ALIAS: ErrorCode = ErrorCode {
    code: "E206",
    title: "DUPLICATE ALIAS",
    error_type: ErrorType::Syntax,
    message: "Import alias `{}` is already used by another import.",
    hint: Some("Use `as` to give one of the imports a different alias."),
};

pub const IMPORT_AFTER_DECLARATION: ErrorCode = ErrorCode {
    code: "E207",
    title: "IMPORT AFTER DECLARATION",
    error_type: ErrorType::Syntax,
    message: "Import of \"{}\" appears after a declaration.",
    hint: Some("Move all imports directly below the schema header."),
};

pub const INVALID_QUALIFIER: ErrorCode = ErrorCode {
    code: "E208",
    title: "INVALID QUALIFIER",
    error_type: ErrorType::Syntax,
    message: "`{}` is not a valid type qualifier.",
    hint: Some("Qualifiers are import aliases, e.g. `parts.Wheel`."),
};

pub const INVALID_MULTIPLICITY: ErrorCode = ErrorCode {
    code: "E209",
    title: "INVALID MULTIPLICITY",
    error_type: ErrorType::Syntax,
    message: "Expected a multiplicity, found {}.",
    hint: Some("Valid forms: (_), (_:one), (_:many), (one), (one:one), (one:many), (many)"),
};

pub const ENUM_TOO_FEW_VALUES: ErrorCode = ErrorCode {
    code: "E210",
    title: "ENUM NEEDS TWO VALUES",
    error_type: ErrorType::Syntax,
    message: "An Enum needs at least two values, found {}.",
    hint: Some("Use Boolean or a constant String for a single choice."),
};

pub const INVALID_INTEGER: ErrorCode = ErrorCode {
    code: "E211",
    title: "INVALID INTEGER",
    error_type: ErrorType::Syntax,
    message: "Could not parse `{}` as an integer.",
    hint: Some("Integers must fit in 64 bits."),
};

pub const INVALID_FLOAT: ErrorCode = ErrorCode {
    code: "E212",
    title: "INVALID FLOAT",
    error_type: ErrorType::Syntax,
    message: "Could not parse `{}` as a float.",
    hint: None,
};

pub const UNCLOSED_DELIMITER: ErrorCode = ErrorCode {
    code: "E213",
    title: "UNCLOSED DELIMITER",
    error_type: ErrorType::Syntax,
    message: "Missing {} to close {}.",
    hint: None,
};

pub const MODIFIER_ON_DATATYPE: ErrorCode = ErrorCode {
    code: "E214",
    title: "MODIFIER ON DATATYPE",
    error_type: ErrorType::Syntax,
    message: "`{}` cannot be applied to a datatype declaration.",
    hint: Some("Only `type Name { ... }` declarations can be abstract or part."),
};

pub const INVALID_BOUNDS: ErrorCode = ErrorCode {
    code: "E215",
    title: "INVALID BOUNDS",
    error_type: ErrorType::Syntax,
    message: "Lower bound {} is greater than upper bound {}.",
    hint: Some("Swap the bounds or use `_` for an open end."),
};

pub const INVALID_VECTOR_DIMENSION: ErrorCode = ErrorCode {
    code: "E216",
    title: "INVALID VECTOR DIMENSION",
    error_type: ErrorType::Syntax,
    message: "Vector dimension must be a positive integer, found {}.",
    hint: Some("Write the dimension count, e.g. `Vector[768]`."),
};

pub const EXPECTED_DATATYPE: ErrorCode = ErrorCode {
    code: "E217",
    title: "EXPECTED DATATYPE",
    error_type: ErrorType::Syntax,
    message: "Expected a datatype, found {}.",
    hint: Some("Use a built-in type such as String or Integer, or a declared datatype name."),
};

pub const EXPECTED_MEMBER: ErrorCode = ErrorCode {
    code: "E218",
    title: "EXPECTED MEMBER",
    error_type: ErrorType::Syntax,
    message: "Expected a type member, found {}.",
    hint: Some(
        "A type body holds properties, `-->` associations, `*->` compositions and `!` invariants.",
    ),
};

pub const EXPECTED_DECLARATION: ErrorCode = ErrorCode {
    code: "E219",
    title: "EXPECTED DECLARATION",
    error_type: ErrorType::Syntax,
    message: "Expected a type or datatype declaration, found {}.",
    hint: None,
};

pub const INVALID_RELATION_BODY: ErrorCode = ErrorCode {
    code: "E220",
    title: "INVALID RELATION BODY",
    error_type: ErrorType::Syntax,
    message: "Only properties may appear in a relation body, found {}.",
    hint: None,
};

pub const RESERVED_KEYWORD: ErrorCode = ErrorCode {
    code: "E221",
    title: "RESERVED KEYWORD",
    error_type: ErrorType::Syntax,
    message: "`{}` is reserved and cannot be used here.",
    hint: None,
};

// ===== Constructors =====

/// Convert a lexer error once its code-point range has a span.
pub fn lex_error(kind: &LexErrorKind, span: Span) -> Diagnostic {
    match kind {
        LexErrorKind::UnterminatedString => Diagnostic::make_error(&UNTERMINATED_STRING, &[], span),
        LexErrorKind::UnterminatedRegex => Diagnostic::make_error(&UNTERMINATED_REGEX, &[], span),
        LexErrorKind::UnterminatedComment => {
            Diagnostic::make_error(&UNTERMINATED_COMMENT, &[], span)
        }
        LexErrorKind::InvalidEscape(sequence) => {
            Diagnostic::make_error(&INVALID_ESCAPE, &[sequence.as_str()], span)
        }
        LexErrorKind::UnexpectedCharacter(ch) => {
            let ch = ch.escape_debug().to_string();
            Diagnostic::make_error(&UNEXPECTED_CHARACTER, &[ch.as_str()], span)
        }
    }
}

/// "Expected X, found Y" anchored at the offending token.
pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::make_error(&UNEXPECTED_TOKEN, &[expected, found], span)
}

pub fn expected_expression(span: Span, found: &str) -> Diagnostic {
    Diagnostic::make_error(&EXPECTED_EXPRESSION, &[found], span)
}

pub fn invalid_integer(span: Span, literal: &str) -> Diagnostic {
    Diagnostic::make_error(&INVALID_INTEGER, &[literal], span)
}

pub fn invalid_float(span: Span, literal: &str) -> Diagnostic {
    Diagnostic::make_error(&INVALID_FLOAT, &[literal], span)
}

pub fn unclosed_delimiter(span: Span, closer: &str, what: &str, opened_at: Span) -> Diagnostic {
    Diagnostic::make_error(&UNCLOSED_DELIMITER, &[closer, what], span)
        .with_hint_at(format!("{} opened here", what), opened_at)
}

pub fn derived_alias_keyword(span: Span, path: &str, alias: &str) -> Diagnostic {
    Diagnostic::make_error(&DERIVED_ALIAS_KEYWORD, &[path, alias, path], span)
}

pub fn duplicate_alias(span: Span, alias: &str, first: Span) -> Diagnostic {
    diag_enhanced(&DUPLICATE_ALIAS)
        .with_span(span)
        .with_message(format!(
            "Import alias `{}` is already used by another import.",
            alias
        ))
        .with_hint_at("first used here", first)
        .with_hint_text("Use `as` to give one of the imports a different alias.")
}

pub fn invalid_bounds(span: Span, min: &str, max: &str) -> Diagnostic {
    Diagnostic::make_error(&INVALID_BOUNDS, &[min, max], span)
}
