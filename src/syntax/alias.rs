//! Import alias validation and default-alias derivation.
//!
//! An alias must lex as a single word token, so the shape check mirrors the
//! lexer's word rule and the reserved-word check reads the lexer's keyword
//! table directly.

use thiserror::Error;

use crate::syntax::token_type::lookup_keyword;

/// File suffix stripped when deriving an alias from an import path.
pub const SCHEMA_FILE_SUFFIX: &str = ".yammm";

/// Alias used when derivation leaves nothing, and the prefix added when the
/// derived alias would not start with a letter.
const FALLBACK_PREFIX: &str = "n";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("`{0}` is not a valid alias; aliases match [A-Za-z][A-Za-z0-9_]*")]
    InvalidShape(String),
    #[error("`{0}` is a reserved keyword and cannot be used as an alias")]
    ReservedKeyword(String),
}

/// `[A-Za-z][A-Za-z0-9_]*`
pub fn is_valid_shape(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn is_reserved_keyword(s: &str) -> bool {
    lookup_keyword(s).is_some()
}

pub fn validate_alias(s: &str) -> Result<(), AliasError> {
    if !is_valid_shape(s) {
        return Err(AliasError::InvalidShape(s.to_string()));
    }
    if is_reserved_keyword(s) {
        return Err(AliasError::ReservedKeyword(s.to_string()));
    }
    Ok(())
}

/// Derive the alias an import gets when it has no `as` clause.
///
/// Total and pure: every input yields a valid-shape string. The result may
/// still be a reserved keyword (`import "type.yammm"`); callers check that.
pub fn derive_default_alias(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let stem = segment.strip_suffix(SCHEMA_FILE_SUFFIX).unwrap_or(segment);

    let mut alias: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if alias.is_empty() {
        return FALLBACK_PREFIX.to_string();
    }
    if !alias.starts_with(|c: char| c.is_ascii_alphabetic()) {
        alias.insert_str(0, FALLBACK_PREFIX);
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::token_type::KEYWORDS;

    #[test]
    fn shape_matches_word_rule() {
        assert!(is_valid_shape("parts"));
        assert!(is_valid_shape("P2_x"));
        assert!(!is_valid_shape(""));
        assert!(!is_valid_shape("_x"));
        assert!(!is_valid_shape("2x"));
        assert!(!is_valid_shape("my-parts"));
        assert!(!is_valid_shape("café"));
    }

    #[test]
    fn every_keyword_is_reserved() {
        for (text, _) in KEYWORDS {
            assert!(is_reserved_keyword(text), "{text}");
            assert_eq!(
                validate_alias(text),
                Err(AliasError::ReservedKeyword(text.to_string()))
            );
        }
        assert!(!is_reserved_keyword("Type"));
        assert!(!is_reserved_keyword("uuid"));
    }

    #[test]
    fn derivation_examples() {
        assert_eq!(derive_default_alias("./schemas/parts.yammm"), "parts");
        assert_eq!(derive_default_alias("my-parts.yammm"), "my_parts");
        assert_eq!(derive_default_alias("2parts.yammm"), "n2parts");
        assert_eq!(derive_default_alias(".yammm"), "n");
    }

    #[test]
    fn derivation_edge_cases() {
        assert_eq!(derive_default_alias("lib/common/"), "common");
        assert_eq!(derive_default_alias("Vehicles.yammm"), "Vehicles");
        assert_eq!(derive_default_alias(""), "n");
        assert_eq!(derive_default_alias("/"), "n");
        assert_eq!(derive_default_alias("_private.yammm"), "n_private");
        assert_eq!(derive_default_alias("v1.2.yammm"), "v1_2");
        assert_eq!(derive_default_alias("type.yammm"), "type");
    }
}
