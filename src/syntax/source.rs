//! Source registry: owns the text of every file handed to the front-end and
//! the per-source offset indexes used for span conversion.
//!
//! Invariants:
//! - Indexes are built once in [`SourceRegistry::register`] and never mutated.
//! - Code-point offsets and byte offsets are distinct types; the only
//!   conversion between them is [`SourceRegistry::rune_to_byte_offset`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::diagnostics::position::{Position, SourceId};

/// Index of a Unicode scalar value within a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct CodePointOffset(pub usize);

/// Index of a byte within the UTF-8 encoding of a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct ByteOffset(pub usize);

impl fmt::Display for CodePointOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cp{}", self.0)
    }
}

impl fmt::Display for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("unknown source {0}")]
    UnknownSource(SourceId),
    #[error("source table is full")]
    TooManySources,
}

#[derive(Debug)]
struct SourceFile {
    name: String,
    text: Arc<str>,
    /// Byte offset of every code point, plus one trailing entry for the end of
    /// input. Empty when the text is pure ASCII (offsets coincide).
    code_point_bytes: Vec<usize>,
    code_point_count: usize,
    /// Byte offset where each line starts. Always contains 0.
    line_starts: Vec<usize>,
    digest: [u8; 32],
}

impl SourceFile {
    fn new(name: String, text: Arc<str>) -> Self {
        let code_point_bytes = if text.is_ascii() {
            Vec::new()
        } else {
            let mut offsets: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
            offsets.push(text.len());
            offsets
        };
        let code_point_count = if text.is_ascii() {
            text.len()
        } else {
            code_point_bytes.len() - 1
        };

        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(idx, _)| idx + 1),
        );

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(text.as_bytes()));

        Self {
            name,
            text,
            code_point_bytes,
            code_point_count,
            line_starts,
            digest,
        }
    }

    fn byte_of(&self, offset: CodePointOffset) -> Option<ByteOffset> {
        if offset.0 > self.code_point_count {
            return None;
        }
        if self.code_point_bytes.is_empty() {
            return Some(ByteOffset(offset.0));
        }
        self.code_point_bytes.get(offset.0).copied().map(ByteOffset)
    }

    fn position_of(&self, byte: ByteOffset) -> Option<Position> {
        let offset = byte.0;
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self.text[line_start..offset].chars().count();
        Some(Position::new(line_idx + 1, column, offset))
    }
}

/// Registry of source texts keyed by [`SourceId`].
///
/// Registration needs `&mut self`; every query takes `&self`, so a populated
/// registry can be shared across threads for parallel parsing.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    files: Vec<SourceFile>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source text and build its offset indexes.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        text: impl Into<Arc<str>>,
    ) -> Result<SourceId, SourceError> {
        let index = u32::try_from(self.files.len() + 1).map_err(|_| SourceError::TooManySources)?;
        let name = name.into();
        let file = SourceFile::new(name, text.into());
        tracing::debug!(
            source = index,
            name = %file.name,
            bytes = file.text.len(),
            lines = file.line_starts.len(),
            "registered source"
        );
        self.files.push(file);
        Ok(SourceId(index))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        (1..=self.files.len()).map(|idx| SourceId(idx as u32))
    }

    fn lookup(&self, id: SourceId) -> Option<&SourceFile> {
        if id.is_none() {
            return None;
        }
        self.files.get(id.0 as usize - 1)
    }

    fn file(&self, id: SourceId) -> Result<&SourceFile, SourceError> {
        self.lookup(id).ok_or_else(|| {
            tracing::warn!(source = id.0, registered = self.files.len(), "unknown source id");
            SourceError::UnknownSource(id)
        })
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.lookup(id).is_some()
    }

    pub fn name(&self, id: SourceId) -> Result<&str, SourceError> {
        self.file(id).map(|f| f.name.as_str())
    }

    pub fn text(&self, id: SourceId) -> Result<&str, SourceError> {
        self.file(id).map(|f| &*f.text)
    }

    /// SHA-256 of the registered text, for callers caching parsed imports.
    pub fn digest(&self, id: SourceId) -> Result<[u8; 32], SourceError> {
        self.file(id).map(|f| f.digest)
    }

    /// Hex form of [`SourceRegistry::digest`].
    pub fn digest_hex(&self, id: SourceId) -> Result<String, SourceError> {
        use std::fmt::Write;

        let digest = self.digest(id)?;
        let mut out = String::with_capacity(64);
        for byte in digest {
            let _ = write!(out, "{byte:02x}");
        }
        Ok(out)
    }

    /// Number of code points in the source, i.e. the offset of end of input.
    pub fn code_point_len(&self, id: SourceId) -> Result<usize, SourceError> {
        self.file(id).map(|f| f.code_point_count)
    }

    /// Convert a code-point offset to a byte offset. The end-of-input offset
    /// (equal to the code-point length) resolves to the byte length.
    pub fn rune_to_byte_offset(&self, id: SourceId, offset: CodePointOffset) -> Option<ByteOffset> {
        self.file(id).ok()?.byte_of(offset)
    }

    /// Resolve a byte offset to a line/column position. Offsets that are out of
    /// range or fall inside a multi-byte character do not resolve.
    pub fn position_at(&self, id: SourceId, byte: ByteOffset) -> Option<Position> {
        self.file(id).ok()?.position_of(byte)
    }

    /// Text of the 1-based line `line`, without its terminator.
    pub fn line_text(&self, id: SourceId, line: usize) -> Option<&str> {
        let file = self.file(id).ok()?;
        let start = *file.line_starts.get(line.checked_sub(1)?)?;
        let end = file
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(file.text.len());
        file.text
            .get(start..end)
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(text: &str) -> (SourceRegistry, SourceId) {
        let mut registry = SourceRegistry::new();
        let id = registry.register("test.yammm", text).unwrap();
        (registry, id)
    }

    #[test]
    fn ascii_offsets_are_identity() {
        let (registry, id) = registry("abc");
        for cp in 0..=3 {
            assert_eq!(
                registry.rune_to_byte_offset(id, CodePointOffset(cp)),
                Some(ByteOffset(cp))
            );
        }
        assert_eq!(registry.rune_to_byte_offset(id, CodePointOffset(4)), None);
    }

    #[test]
    fn multibyte_offsets_follow_utf8_lengths() {
        let (registry, id) = registry("a日b");
        let bytes: Vec<_> = (0..=3)
            .map(|cp| registry.rune_to_byte_offset(id, CodePointOffset(cp)))
            .collect();
        assert_eq!(
            bytes,
            vec![
                Some(ByteOffset(0)),
                Some(ByteOffset(1)),
                Some(ByteOffset(4)),
                Some(ByteOffset(5))
            ]
        );
        assert_eq!(registry.code_point_len(id), Ok(3));
    }

    #[test]
    fn position_counts_code_points_per_line() {
        let (registry, id) = registry("ab\né x\n");
        assert_eq!(
            registry.position_at(id, ByteOffset(0)),
            Some(Position::new(1, 0, 0))
        );
        assert_eq!(
            registry.position_at(id, ByteOffset(3)),
            Some(Position::new(2, 0, 3))
        );
        // 'x' sits after a 2-byte 'é' and a space.
        assert_eq!(
            registry.position_at(id, ByteOffset(6)),
            Some(Position::new(2, 2, 6))
        );
        assert_eq!(
            registry.position_at(id, ByteOffset(8)),
            Some(Position::new(3, 0, 8))
        );
    }

    #[test]
    fn position_rejects_non_boundaries() {
        let (registry, id) = registry("é");
        assert_eq!(registry.position_at(id, ByteOffset(1)), None);
        assert_eq!(registry.position_at(id, ByteOffset(3)), None);
    }

    #[test]
    fn unknown_source_is_an_error() {
        let (registry, _) = registry("x");
        assert_eq!(
            registry.text(SourceId(9)),
            Err(SourceError::UnknownSource(SourceId(9)))
        );
        assert_eq!(
            registry.rune_to_byte_offset(SourceId::NONE, CodePointOffset(0)),
            None
        );
    }

    #[test]
    fn line_text_strips_terminators() {
        let (registry, id) = registry("first\r\nsecond\nthird");
        assert_eq!(registry.line_text(id, 1), Some("first"));
        assert_eq!(registry.line_text(id, 2), Some("second"));
        assert_eq!(registry.line_text(id, 3), Some("third"));
        assert_eq!(registry.line_text(id, 0), None);
        assert_eq!(registry.line_text(id, 4), None);
    }

    #[test]
    fn digest_is_content_addressed() {
        let mut registry = SourceRegistry::new();
        let a = registry.register("a.yammm", "schema \"A\"").unwrap();
        let b = registry.register("b.yammm", "schema \"A\"").unwrap();
        let c = registry.register("c.yammm", "schema \"C\"").unwrap();
        assert_eq!(registry.digest(a), registry.digest(b));
        assert_ne!(registry.digest(a), registry.digest(c));
        assert_eq!(registry.digest_hex(a).unwrap().len(), 64);
    }
}
