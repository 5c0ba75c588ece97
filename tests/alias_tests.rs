//! Alias validation must agree with the lexer: anything `validate_alias`
//! accepts lexes as exactly one word token.

use proptest::prelude::*;
use yammm::syntax::alias::{
    AliasError, derive_default_alias, is_reserved_keyword, is_valid_shape, validate_alias,
};
use yammm::syntax::lexer::tokenize;
use yammm::syntax::token_type::{KEYWORDS, TokenType};

fn single_word(text: &str) -> Option<TokenType> {
    let (tokens, errors) = tokenize(text);
    if !errors.is_empty() || tokens.len() != 2 {
        return None;
    }
    Some(tokens[0].token_type)
}

#[test]
fn derived_aliases() {
    let cases = [
        ("./schemas/parts.yammm", "parts"),
        ("my-parts.yammm", "my_parts"),
        ("2parts.yammm", "n2parts"),
        (".yammm", "n"),
        ("lib/common", "common"),
        ("lib/v1.2/base.yammm", "base"),
        ("dir/", "dir"),
        ("", "n"),
        ("_hidden.yammm", "n_hidden"),
    ];
    for (path, alias) in cases {
        assert_eq!(derive_default_alias(path), alias, "path {:?}", path);
    }
}

#[test]
fn derived_alias_may_be_a_keyword() {
    let alias = derive_default_alias("lib/type.yammm");
    assert_eq!(alias, "type");
    assert!(is_valid_shape(&alias));
    assert_eq!(
        validate_alias(&alias),
        Err(AliasError::ReservedKeyword("type".to_string()))
    );
}

#[test]
fn every_lexer_keyword_is_reserved() {
    for (word, token_type) in KEYWORDS {
        assert!(is_reserved_keyword(word), "{} should be reserved", word);
        assert_eq!(single_word(word), Some(*token_type));
    }
    assert!(!is_reserved_keyword("Type"));
    assert!(!is_reserved_keyword("integer"));
}

#[test]
fn invalid_shapes() {
    for alias in ["", "_a", "1a", "a-b", "a.b", "ä", "a b"] {
        assert_eq!(
            validate_alias(alias),
            Err(AliasError::InvalidShape(alias.to_string())),
            "{:?}",
            alias
        );
    }
}

proptest! {
    #[test]
    fn valid_aliases_lex_as_one_word(alias in "[A-Za-z][A-Za-z0-9_]{0,16}") {
        prop_assume!(!is_reserved_keyword(&alias));
        prop_assert!(validate_alias(&alias).is_ok());
        let expected = if alias.starts_with(|c: char| c.is_ascii_uppercase()) {
            TokenType::UcWord
        } else {
            TokenType::LcWord
        };
        prop_assert_eq!(single_word(&alias), Some(expected));
    }

    #[test]
    fn derived_alias_always_has_valid_shape(path in "[ -~]{0,40}") {
        let alias = derive_default_alias(&path);
        prop_assert!(is_valid_shape(&alias), "{:?} -> {:?}", path, alias);
        prop_assert!(single_word(&alias).is_some());
    }

    #[test]
    fn derivation_is_deterministic(path in "[a-z0-9./_-]{0,30}") {
        prop_assert_eq!(derive_default_alias(&path), derive_default_alias(&path));
    }

    #[test]
    fn shape_check_matches_lexer(text in "[A-Za-z0-9_]{1,12}") {
        let one_word = matches!(
            single_word(&text),
            Some(tt) if tt == TokenType::UcWord || tt == TokenType::LcWord || tt.is_keyword()
        );
        prop_assert_eq!(is_valid_shape(&text), one_word);
    }
}
