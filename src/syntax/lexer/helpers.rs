//! Helper utilities for lexing

/// First character of a word: ASCII letter only. `_` and digits may continue
/// a word but never start one.
pub(super) fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub(super) fn is_word_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub(super) fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}
