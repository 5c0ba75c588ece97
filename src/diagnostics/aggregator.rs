use std::collections::HashSet;

use super::diagnostic::Diagnostic;
use super::position::SourceId;
use super::rendering::colors::colors_disabled;
use super::types::Severity;
use crate::syntax::source::SourceRegistry;

/// Default max error limit to avoid overwhelming output.
pub const DEFAULT_MAX_ERRORS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticCounts {
    pub errors: usize,
    pub warnings: usize,
    pub notes: usize,
}

impl DiagnosticCounts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.notes
    }

    pub fn summary_line(&self) -> Option<String> {
        format_summary(self)
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticsReport {
    pub counts: DiagnosticCounts,
    pub rendered: String,
}

/// Deduplicates, orders (by file, then position) and renders diagnostics
/// from any number of sources in one registry.
pub struct DiagnosticsAggregator<'a> {
    diagnostics: &'a [Diagnostic],
    registry: &'a SourceRegistry,
    max_errors: Option<usize>,
    use_color: bool,
}

impl<'a> DiagnosticsAggregator<'a> {
    pub fn new(diagnostics: &'a [Diagnostic], registry: &'a SourceRegistry) -> Self {
        Self {
            diagnostics,
            registry,
            max_errors: None,
            use_color: !colors_disabled(),
        }
    }

    pub fn with_max_errors(mut self, max_errors: Option<usize>) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn report(&self) -> DiagnosticsReport {
        if self.diagnostics.is_empty() {
            return DiagnosticsReport {
                counts: DiagnosticCounts::default(),
                rendered: String::new(),
            };
        }

        let mut seen = HashSet::new();
        let mut unique: Vec<(usize, &Diagnostic)> = self
            .diagnostics
            .iter()
            .enumerate()
            .filter(|(_, diag)| seen.insert(*diag))
            .collect();

        let counts = count_severity(unique.iter().map(|(_, d)| *d));

        unique.sort_by(|(ai, a), (bi, b)| {
            a.source()
                .cmp(&b.source())
                .then_with(|| position_key(a).cmp(&position_key(b)))
                .then_with(|| a.severity().rank().cmp(&b.severity().rank()))
                .then_with(|| ai.cmp(bi))
        });

        let mut rendered = String::new();
        if let Some(summary) = format_summary(&counts) {
            rendered.push_str(&summary);
            rendered.push_str("\n\n");
        }

        let max_errors = self.max_errors.unwrap_or(usize::MAX);
        let mut errors_shown = 0usize;
        let mut blocks: Vec<String> = Vec::new();

        for (_, diag) in &unique {
            if diag.is_error() {
                if errors_shown >= max_errors {
                    continue;
                }
                errors_shown += 1;
            }
            let source = diag.source();
            blocks.push(diag.render(
                self.source_text(source),
                &self.file_name(source),
                self.use_color,
            ));
        }
        rendered.push_str(&blocks.join("\n"));

        let errors_truncated = counts.errors.saturating_sub(errors_shown);
        if errors_truncated > 0 {
            if !rendered.ends_with('\n') {
                rendered.push('\n');
            }
            rendered.push_str(&format!(
                "... and {} more errors not shown (use --max-errors to increase).\n",
                errors_truncated
            ));
        }

        DiagnosticsReport { counts, rendered }
    }

    pub fn render(&self) -> String {
        self.report().rendered
    }

    fn source_text(&self, id: SourceId) -> Option<&'a str> {
        if !self.registry.contains(id) {
            return None;
        }
        self.registry.text(id).ok()
    }

    fn file_name(&self, id: SourceId) -> String {
        if !self.registry.contains(id) {
            return "<unknown>".to_string();
        }
        self.registry
            .name(id)
            .map(str::to_string)
            .unwrap_or_else(|_| "<unknown>".to_string())
    }
}

/// Render with the default error cap and environment-driven colors.
pub fn render_diagnostics(diagnostics: &[Diagnostic], registry: &SourceRegistry) -> String {
    DiagnosticsAggregator::new(diagnostics, registry)
        .with_max_errors(Some(DEFAULT_MAX_ERRORS))
        .render()
}

fn position_key(diag: &Diagnostic) -> (usize, usize) {
    diag.position()
        .filter(|pos| pos.line > 0)
        .map(|pos| (pos.line, pos.column))
        .unwrap_or((usize::MAX, usize::MAX))
}

fn count_severity<'d>(diags: impl Iterator<Item = &'d Diagnostic>) -> DiagnosticCounts {
    let mut counts = DiagnosticCounts::default();
    for diag in diags {
        match diag.severity() {
            Severity::Error => counts.errors += 1,
            Severity::Warning => counts.warnings += 1,
            Severity::Note => counts.notes += 1,
        }
    }
    counts
}

fn format_summary(counts: &DiagnosticCounts) -> Option<String> {
    if counts.total() <= 1 {
        return None;
    }

    let mut parts = Vec::new();
    if counts.errors > 0 {
        parts.push(format!("{} error{}", counts.errors, plural(counts.errors)));
    }
    if counts.warnings > 0 {
        parts.push(format!("{} warning{}", counts.warnings, plural(counts.warnings)));
    }
    if counts.notes > 0 {
        parts.push(format!("{} note{}", counts.notes, plural(counts.notes)));
    }

    Some(format!("Found {}.", parts.join(" and ")))
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
