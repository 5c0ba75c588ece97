use yammm::diagnostics::{Diagnostic, DiagnosticsAggregator, render_diagnostics};
use yammm::syntax::parse_str;
use yammm::syntax::source::SourceRegistry;

fn diagnostics(input: &str) -> (SourceRegistry, Vec<Diagnostic>) {
    let (registry, output) = parse_str("t.yammm", input).unwrap();
    (registry, output.diagnostics)
}

fn render_plain(input: &str) -> String {
    let (registry, diags) = diagnostics(input);
    DiagnosticsAggregator::new(&diags, &registry)
        .with_color(false)
        .render()
}

#[test]
fn expected_datatype_snapshot() {
    let rendered = render_plain("schema \"S\"\ntype A {\n  age 42\n}\n");
    insta::assert_snapshot!(rendered, @r"
--> syntax error[E217]: EXPECTED DATATYPE

Expected a datatype, found `42`.

  --> t.yammm:3:7
  |
3 |   age 42
  |       ^^

Hint:
  Use a built-in type such as String or Integer, or a declared datatype name.
");
}

#[test]
fn unterminated_string_snapshot() {
    let rendered = render_plain("schema \"S");
    insta::assert_snapshot!(rendered, @r#"
--> lexical error[E101]: UNTERMINATED STRING

This string literal is never closed.

  --> t.yammm:1:8
  |
1 | schema "S
  |        ^^

Hint:
  Strings end on the line they start on, with the quote that opened them.
"#);
}

#[test]
fn located_hint_points_at_the_opener() {
    let (registry, diags) = diagnostics("schema \"S\"\ntype A {\n  n Enum[\"x\" \"y\"]\n}\n");
    assert_eq!(diags.len(), 1);
    let rendered = diags[0].render(registry.text(diags[0].source()).ok(), "t.yammm", false);
    assert!(rendered.contains("--> t.yammm:3:14"), "{}", rendered);
    assert!(rendered.contains("Hint: the enum values opened here (3:9)"), "{}", rendered);
}

#[test]
fn summary_counts_and_truncation() {
    let input = "schema \"S\"\ntype A {\n  a 1\n  b 2\n  c 3\n}\n";
    let (registry, diags) = diagnostics(input);
    assert_eq!(diags.len(), 3);

    let report = DiagnosticsAggregator::new(&diags, &registry)
        .with_color(false)
        .with_max_errors(Some(1))
        .report();
    assert_eq!(report.counts.errors, 3);
    assert!(report.rendered.starts_with("Found 3 errors.\n\n"));
    assert_eq!(report.rendered.matches("[E217]").count(), 1);
    assert!(
        report
            .rendered
            .contains("... and 2 more errors not shown (use --max-errors to increase).")
    );
}

#[test]
fn diagnostics_are_sorted_by_position() {
    let input = "schema \"S\"\ntype A {\n  a 1\n  b String @\n}\n";
    let (registry, diags) = diagnostics(input);
    let codes: Vec<&str> = diags.iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, ["E105", "E217"]);

    let rendered = DiagnosticsAggregator::new(&diags, &registry)
        .with_color(false)
        .render();
    let e217 = rendered.find("[E217]").unwrap();
    let e105 = rendered.find("[E105]").unwrap();
    assert!(e217 < e105, "{}", rendered);
}

#[test]
fn default_rendering_keeps_every_error_under_the_cap() {
    let (registry, diags) = diagnostics("schema \"S\"\ntype A {\n  a 1\n  b 2\n}\n");
    let rendered = render_diagnostics(&diags, &registry);
    assert_eq!(rendered.matches("[E217]").count(), 2);
    assert!(rendered.contains("  --> t.yammm:3:5\n"), "{}", rendered);
    assert!(rendered.contains("  --> t.yammm:4:5\n"), "{}", rendered);
    assert!(!rendered.contains("more errors not shown"));
}
