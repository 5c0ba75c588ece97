//! Converts lexer code-point offsets into byte-addressed, line/column-resolved
//! spans.
//!
//! The lexer only ever speaks code points; everything downstream speaks bytes.
//! This is the single place where the two meet. An offset that does not
//! resolve means the lexer, the parser and the registry disagree about the
//! source, so the conversion panics instead of producing a wrong span.

use thiserror::Error;

use crate::diagnostics::position::{Position, SourceId, Span};
use crate::syntax::source::{ByteOffset, CodePointOffset, SourceRegistry};
use crate::syntax::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanInvariantViolation {
    #[error("span invariant violation: {offset} does not resolve in source {source_id}")]
    UnresolvedOffset {
        source_id: SourceId,
        offset: CodePointOffset,
    },
    #[error("span invariant violation: {offset} has no position in source {source_id}")]
    UnresolvedPosition { source_id: SourceId, offset: ByteOffset },
    #[error("span invariant violation: end {end} precedes start {start} in source {source_id}")]
    Inverted {
        source_id: SourceId,
        start: CodePointOffset,
        end: CodePointOffset,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct SpanBuilder<'a> {
    registry: &'a SourceRegistry,
    source: SourceId,
}

impl<'a> SpanBuilder<'a> {
    pub fn new(registry: &'a SourceRegistry, source: SourceId) -> Self {
        Self { registry, source }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn registry(&self) -> &'a SourceRegistry {
        self.registry
    }

    pub fn try_from_offsets(
        &self,
        start: CodePointOffset,
        end: CodePointOffset,
    ) -> Result<Span, SpanInvariantViolation> {
        if end < start {
            return Err(SpanInvariantViolation::Inverted {
                source_id: self.source,
                start,
                end,
            });
        }
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        Ok(Span::new(self.source, start, end))
    }

    /// Span for the half-open code-point range `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics with a [`SpanInvariantViolation`] when either offset does not
    /// resolve in the source or the range is inverted.
    pub fn from_offsets(&self, start: CodePointOffset, end: CodePointOffset) -> Span {
        match self.try_from_offsets(start, end) {
            Ok(span) => span,
            Err(violation) => panic!("{violation}"),
        }
    }

    /// Span for an inclusive code-point range `[start, stop]`, as reported by
    /// token streams that name the last character rather than one past it.
    pub fn from_inclusive(&self, start: CodePointOffset, stop: CodePointOffset) -> Span {
        self.from_offsets(start, CodePointOffset(stop.0 + 1))
    }

    pub fn token_span(&self, token: &Token) -> Span {
        self.from_offsets(token.start, token.end)
    }

    /// Span running from the first character of `first` to the last
    /// character of `last`.
    pub fn token_range(&self, first: &Token, last: &Token) -> Span {
        let end = last.end.max(first.end);
        self.from_offsets(first.start, end)
    }

    /// Zero-width span at `offset`, used for "expected X here" diagnostics.
    pub fn point(&self, offset: CodePointOffset) -> Span {
        self.from_offsets(offset, offset)
    }

    fn resolve(&self, offset: CodePointOffset) -> Result<Position, SpanInvariantViolation> {
        let byte = self
            .registry
            .rune_to_byte_offset(self.source, offset)
            .ok_or(SpanInvariantViolation::UnresolvedOffset {
                source_id: self.source,
                offset,
            })?;
        self.registry
            .position_at(self.source, byte)
            .ok_or(SpanInvariantViolation::UnresolvedPosition {
                source_id: self.source,
                offset: byte,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_source<R>(text: &str, f: impl FnOnce(SpanBuilder<'_>) -> R) -> R {
        let mut registry = SourceRegistry::new();
        let id = registry.register("span.yammm", text).unwrap();
        f(SpanBuilder::new(&registry, id))
    }

    #[test]
    fn middle_code_point_of_three_byte_char() {
        with_source("a日b", |builder| {
            let span = builder.from_offsets(CodePointOffset(1), CodePointOffset(2));
            assert_eq!(span.start.byte, 1);
            assert_eq!(span.end.byte, 4);
            assert_eq!(span.start.column, 1);
            assert_eq!(span.end.column, 2);
        });
    }

    #[test]
    fn two_and_four_byte_chars_shift_end_by_their_width() {
        with_source("aéb", |builder| {
            let span = builder.from_offsets(CodePointOffset(1), CodePointOffset(2));
            assert_eq!((span.start.byte, span.end.byte), (1, 3));
        });
        with_source("a😀b", |builder| {
            let span = builder.from_offsets(CodePointOffset(1), CodePointOffset(2));
            assert_eq!((span.start.byte, span.end.byte), (1, 5));
        });
    }

    #[test]
    fn inclusive_ranges_are_made_exclusive() {
        with_source("a日b", |builder| {
            let inclusive = builder.from_inclusive(CodePointOffset(1), CodePointOffset(1));
            let exclusive = builder.from_offsets(CodePointOffset(1), CodePointOffset(2));
            assert_eq!(inclusive, exclusive);
        });
    }

    #[test]
    fn end_of_input_resolves() {
        with_source("ab\n", |builder| {
            let span = builder.point(CodePointOffset(3));
            assert_eq!(span.start, Position::new(2, 0, 3));
        });
    }

    #[test]
    fn inverted_range_is_reported() {
        with_source("abc", |builder| {
            let err = builder
                .try_from_offsets(CodePointOffset(2), CodePointOffset(1))
                .unwrap_err();
            assert!(matches!(err, SpanInvariantViolation::Inverted { .. }));
        });
    }

    #[test]
    #[should_panic(expected = "span invariant violation")]
    fn unresolvable_offset_aborts() {
        with_source("abc", |builder| {
            builder.from_offsets(CodePointOffset(0), CodePointOffset(10));
        });
    }

    #[test]
    #[should_panic(expected = "span invariant violation")]
    fn unknown_source_aborts() {
        let registry = SourceRegistry::new();
        SpanBuilder::new(&registry, SourceId::NONE).point(CodePointOffset(0));
    }
}
