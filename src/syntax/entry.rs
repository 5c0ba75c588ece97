//! Entry points: lex and parse registered sources into schema units.

use rayon::prelude::*;
use serde::Serialize;

use crate::diagnostics::position::SourceId;
use crate::diagnostics::{Diagnostic, lex_error};
use crate::syntax::lexer::tokenize;
use crate::syntax::parser::Parser;
use crate::syntax::schema::SchemaUnit;
use crate::syntax::source::{SourceError, SourceRegistry};
use crate::syntax::span_builder::SpanBuilder;

/// A best-effort schema unit and every diagnostic produced while reading it.
/// Lexical diagnostics come first, followed by syntax diagnostics in source
/// order of discovery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub source: SourceId,
    pub unit: SchemaUnit,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Lex and parse one registered source.
pub fn parse_source(registry: &SourceRegistry, source: SourceId) -> Result<ParseOutput, SourceError> {
    let text = registry.text(source)?;
    let spans = SpanBuilder::new(registry, source);

    let (tokens, lex_errors) = tokenize(text);
    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .iter()
        .map(|err| lex_error(&err.kind, spans.from_offsets(err.start, err.end)))
        .collect();

    let mut parser = Parser::new(spans, tokens);
    let unit = parser.parse_schema();
    let token_count = parser.token_count();
    diagnostics.extend(parser.take_errors());

    tracing::debug!(
        source = %registry.name(source)?,
        tokens = token_count,
        diagnostics = diagnostics.len(),
        "parsed schema unit"
    );

    Ok(ParseOutput {
        source,
        unit,
        diagnostics,
    })
}

/// Register `text` under `name` in a fresh registry and parse it. The
/// registry is returned so diagnostics can be rendered against it.
pub fn parse_str(
    name: impl Into<String>,
    text: &str,
) -> Result<(SourceRegistry, ParseOutput), SourceError> {
    let mut registry = SourceRegistry::new();
    let source = registry.register(name, text)?;
    let output = parse_source(&registry, source)?;
    Ok((registry, output))
}

/// Parse several registered sources in parallel. Results are returned in the
/// order of `sources`.
pub fn parse_sources(
    registry: &SourceRegistry,
    sources: &[SourceId],
) -> Vec<Result<ParseOutput, SourceError>> {
    sources
        .par_iter()
        .map(|&source| parse_source(registry, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_errors_precede_syntax_errors() {
        let (_, output) = parse_str("t.yammm", "schema \"S\"\ntype A {\n  a ~ String\n  b 1\n}\n").unwrap();
        let codes: Vec<_> = output.diagnostics.iter().filter_map(|d| d.code()).collect();
        assert_eq!(codes.first(), Some(&"E105"));
        assert!(codes.len() >= 2, "{:?}", codes);
        assert!(output.has_errors());
        assert_eq!(output.error_count(), codes.len());
    }

    #[test]
    fn unknown_source_is_an_error() {
        let registry = SourceRegistry::new();
        let err = parse_source(&registry, SourceId::default()).unwrap_err();
        assert_eq!(err, SourceError::UnknownSource(SourceId::default()));
    }

    #[test]
    fn parallel_results_keep_input_order() {
        let mut registry = SourceRegistry::new();
        let ids: Vec<_> = (0..16)
            .map(|i| {
                let text = format!("schema \"S{}\"\ntype T{} {{ id UUID primary }}\n", i, i);
                registry.register(format!("s{}.yammm", i), text).unwrap()
            })
            .collect();

        let outputs = parse_sources(&registry, &ids);
        assert_eq!(outputs.len(), 16);
        for (i, output) in outputs.into_iter().enumerate() {
            let output = output.unwrap();
            assert_eq!(output.source, ids[i]);
            assert_eq!(output.unit.name, format!("S{}", i));
            assert!(output.diagnostics.is_empty());
        }
    }
}
