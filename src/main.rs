use std::{env, fs, path::Path, process};

use tracing_subscriber::EnvFilter;
use yammm::{
    diagnostics::{DEFAULT_MAX_ERRORS, Diagnostic, DiagnosticsAggregator},
    syntax::{
        ParseOutput,
        lexer::tokenize,
        parse_sources,
        position::SourceId,
        source::SourceRegistry,
        span_builder::SpanBuilder,
        visit::{collect_type_refs, count_expr_nodes},
    },
};

fn main() {
    init_tracing();

    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return;
    }

    let json = args.iter().any(|arg| arg == "--json");
    let tokens = args.iter().any(|arg| arg == "--tokens");
    if json {
        args.retain(|arg| arg != "--json");
    }
    if tokens {
        args.retain(|arg| arg != "--tokens");
    }
    let max_errors = match extract_max_errors(&mut args) {
        Some(value) => value,
        None => process::exit(2),
    };

    if let Some(flag) = args.iter().find(|arg| arg.starts_with("--")) {
        eprintln!("Error: unknown flag {}", flag);
        process::exit(2);
    }
    if args.is_empty() {
        eprintln!("Usage: yammm [--json] [--tokens] [--max-errors <n>] <file.yammm>...");
        process::exit(2);
    }

    let mut registry = SourceRegistry::new();
    let mut ids = Vec::with_capacity(args.len());
    for path in &args {
        if !is_yammm_file(path) {
            tracing::warn!(path = %path, "file does not have a .yammm extension");
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(2);
            }
        };
        match registry.register(path.as_str(), text) {
            Ok(id) => ids.push(id),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        }
    }

    if tokens {
        for &id in &ids {
            show_tokens(&registry, id);
        }
    }

    let mut outputs: Vec<ParseOutput> = Vec::with_capacity(ids.len());
    for result in parse_sources(&registry, &ids) {
        match result {
            Ok(output) => outputs.push(output),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        }
    }

    let diagnostics: Vec<Diagnostic> = outputs
        .iter()
        .flat_map(|output| output.diagnostics.iter().cloned())
        .collect();
    let report = DiagnosticsAggregator::new(&diagnostics, &registry)
        .with_max_errors(Some(max_errors))
        .report();
    if !report.rendered.is_empty() {
        eprintln!("{}", report.rendered);
    }

    if json {
        match serde_json::to_string_pretty(&outputs) {
            Ok(dump) => println!("{}", dump),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(2);
            }
        }
    } else if !tokens {
        for output in &outputs {
            print_summary(&registry, output);
        }
    }

    if report.counts.errors > 0 {
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("YAMMM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!(
        "\
yammm schema checker

Usage:
  yammm [flags] <file.yammm>...

Flags:
  --json             Print the parsed schema units as JSON
  --tokens           Print the token stream of each file
  --max-errors <n>   Limit displayed errors (default: 50)
  -h, --help         Show this help message

Environment:
  NO_COLOR           Disable colored diagnostics
  YAMMM_LOG          Log filter, e.g. `yammm=debug`
"
    );
}

fn extract_max_errors(args: &mut Vec<String>) -> Option<usize> {
    let mut max_errors = DEFAULT_MAX_ERRORS;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--max-errors" {
            if i + 1 >= args.len() {
                eprintln!("Usage: yammm <file.yammm> --max-errors <n>");
                return None;
            }
            let value = args.remove(i + 1);
            args.remove(i);
            match value.parse::<usize>() {
                Ok(parsed) => {
                    max_errors = parsed;
                }
                Err(_) => {
                    eprintln!("Error: --max-errors expects a non-negative integer.");
                    return None;
                }
            }
            continue;
        }
        i += 1;
    }
    Some(max_errors)
}

fn is_yammm_file(path: &str) -> bool {
    Path::new(path).extension().and_then(|ext| ext.to_str()) == Some("yammm")
}

fn show_tokens(registry: &SourceRegistry, id: SourceId) {
    let Ok(text) = registry.text(id) else {
        return;
    };
    let name = registry.name(id).unwrap_or("<unknown>");
    let spans = SpanBuilder::new(registry, id);
    let (tokens, _) = tokenize(text);

    println!("Tokens from {}:", name);
    println!("{}", "─".repeat(50));
    for tok in tokens.iter().filter(|tok| !tok.is_hidden()) {
        let span = spans.token_span(tok);
        println!(
            "{:>3}:{:<3} {:16} {:?}",
            span.start.line,
            span.start.column,
            format!("{:?}", tok.token_type),
            tok.text
        );
    }
}

fn print_summary(registry: &SourceRegistry, output: &ParseOutput) {
    let name = registry.name(output.source).unwrap_or("<unknown>");
    let digest = registry.digest_hex(output.source).unwrap_or_default();
    let unit = &output.unit;
    println!(
        "{}: schema {:?}, {} imports, {} types, {} datatypes, {} type references, {} expression nodes (sha256 {})",
        name,
        unit.name,
        unit.imports.len(),
        unit.types().count(),
        unit.datatypes().count(),
        collect_type_refs(unit).len(),
        count_expr_nodes(unit),
        digest
    );
}
