use super::builders::DiagnosticBuilder;
use super::diagnostic::Diagnostic;
use super::parse_errors::*;
use super::types::ErrorCode;

/// Central registry of all error codes
pub const ERROR_CODES: &[ErrorCode] = &[
    // Lexical errors (E1xx)
    UNTERMINATED_STRING,
    UNTERMINATED_REGEX,
    UNTERMINATED_COMMENT,
    INVALID_ESCAPE,
    UNEXPECTED_CHARACTER,
    // Syntax errors (E2xx)
    UNEXPECTED_TOKEN,
    MISSING_SCHEMA_HEADER,
    EXPECTED_EXPRESSION,
    INVALID_ALIAS,
    DERIVED_ALIAS_KEYWORD,
    DUPLICATE_ALIAS,
    IMPORT_AFTER_DECLARATION,
    INVALID_QUALIFIER,
    INVALID_MULTIPLICITY,
    ENUM_TOO_FEW_VALUES,
    INVALID_INTEGER,
    INVALID_FLOAT,
    UNCLOSED_DELIMITER,
    MODIFIER_ON_DATATYPE,
    INVALID_BOUNDS,
    INVALID_VECTOR_DIMENSION,
    EXPECTED_DATATYPE,
    EXPECTED_MEMBER,
    EXPECTED_DECLARATION,
    INVALID_RELATION_BODY,
    RESERVED_KEYWORD,
];

/// Look up error code by code string (e.g., "E205")
pub fn lookup_error_code(code: &str) -> Option<&'static ErrorCode> {
    ERROR_CODES.iter().find(|item| item.code == code)
}

/// Create a diagnostic from an error code (without message formatting)
pub fn diag_enhanced(code: &'static ErrorCode) -> Diagnostic {
    Diagnostic::error(code.title)
        .with_code(code.code)
        .with_error_type(code.error_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ERROR_CODES {
            assert!(seen.insert(code.code), "duplicate code {}", code.code);
        }
    }

    #[test]
    fn code_ranges_match_phase() {
        for code in ERROR_CODES {
            let expected = if code.code.starts_with("E1") {
                ErrorType::Lexical
            } else {
                ErrorType::Syntax
            };
            assert_eq!(code.error_type, expected, "{}", code.code);
        }
    }

    #[test]
    fn lookup_finds_registered_codes() {
        assert_eq!(lookup_error_code("E206").map(|c| c.title), Some("DUPLICATE ALIAS"));
        assert!(lookup_error_code("E999").is_none());
    }
}
