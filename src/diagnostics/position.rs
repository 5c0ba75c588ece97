//! Source positions and spans.
//!
//! A [`Position`] is always derived from a registered source; nothing in the
//! crate authors one by hand except tests. Lines are 1-based, columns are
//! 0-based and count code points, bytes are UTF-8 offsets.

use std::fmt;

use serde::Serialize;

/// Opaque handle identifying one registered source text.
///
/// `SourceId(0)` is reserved for "no source" and only appears in the zero span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct SourceId(pub(crate) u32);

impl SourceId {
    pub const NONE: SourceId = SourceId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, byte: usize) -> Self {
        Self { line, column, byte }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.byte.cmp(&other.byte)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open source range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub source: SourceId,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(source: SourceId, start: Position, end: Position) -> Self {
        debug_assert!(
            end.byte >= start.byte,
            "span end {} precedes start {}",
            end.byte,
            start.byte
        );
        Self { source, start, end }
    }

    /// The zero span marks an absent location.
    pub fn is_zero(&self) -> bool {
        *self == Span::default()
    }

    pub fn byte_len(&self) -> usize {
        self.end.byte - self.start.byte
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }
        debug_assert_eq!(self.source, other.source, "merging spans across sources");
        Span {
            source: self.source,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
