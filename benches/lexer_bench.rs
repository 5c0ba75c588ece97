use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use yammm::syntax::lexer::Lexer;
use yammm::syntax::token_type::TokenType;

struct Corpus {
    name: &'static str,
    source: String,
}

fn build_member_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    let _ = writeln!(src, "schema \"Bench\"");

    for i in 0..1_500usize {
        let _ = writeln!(src, "type Entity{i} {{");
        let _ = writeln!(src, "    id_{i} UUID primary");
        let _ = writeln!(src, "    label_{i} String[1, 64] required");
        let _ = writeln!(src, "    score_{i} Float[0.0, 100.0]");
        let _ = writeln!(src, "    --> owner_{i} (one) Entity{} / owned_{i} (many)", i + 1);
        let _ = writeln!(src, "}}");
    }

    src
}

fn build_comment_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    let _ = writeln!(src, "schema \"Bench\"");

    for i in 0..3_000usize {
        let _ = writeln!(src, "// line comment {i}");
        let _ = writeln!(src, "/* doc comment for Alias{i} */");
        let _ = writeln!(src, "type Alias{i} = Integer[{i}, _] // trailing comment");
    }

    src
}

fn build_expression_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    let _ = writeln!(src, "schema \"Bench\"\ntype Checked {{");

    for i in 0..2_500usize {
        let _ = writeln!(
            src,
            "    ! \"rule {i}\" (count_{i} + {i}) * 2 >= limit && items -> filter |$x| {{ $x.weight > {i}.5 }} -> count < 10",
        );
        let _ = writeln!(
            src,
            "    ! \"pattern {i}\" code_{i} =~ /^[A-Z]{{3}}-{i}$/ || code_{i} == nil",
        );
    }

    let _ = writeln!(src, "}}");
    src
}

fn build_string_heavy_corpus() -> String {
    let mut src = String::with_capacity(256_000);
    let _ = writeln!(src, "schema \"Bench\"");

    for i in 0..2_500usize {
        let _ = writeln!(
            src,
            "type State{i} = Enum[\"pending \\\"{i}\\\"\", \"done\\t{i}\", \"failed\\\\{i}\"]",
        );
    }

    src
}

fn build_corpora() -> Vec<Corpus> {
    vec![
        Corpus {
            name: "member_heavy",
            source: build_member_heavy_corpus(),
        },
        Corpus {
            name: "comment_heavy",
            source: build_comment_heavy_corpus(),
        },
        Corpus {
            name: "expression_heavy",
            source: build_expression_heavy_corpus(),
        },
        Corpus {
            name: "string_escape_heavy",
            source: build_string_heavy_corpus(),
        },
    ]
}

fn lex_with_tokenize(input: &str) -> usize {
    let mut lexer = Lexer::new(input);
    let tokens = lexer.tokenize();
    tokens.len()
}

fn lex_with_next_token_loop(input: &str) -> usize {
    let mut lexer = Lexer::new(input);
    let mut token_count = 0usize;

    loop {
        let token = lexer.next_token();
        token_count += 1;
        if token.token_type == TokenType::Eof {
            break;
        }
    }

    token_count
}

fn bench_lexer_tokenize(c: &mut Criterion) {
    let corpora = build_corpora();
    let mut group = c.benchmark_group("lexer/tokenize");

    for corpus in &corpora {
        let input = corpus.source.as_str();
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name),
            input,
            |b, input| {
                b.iter(|| black_box(lex_with_tokenize(black_box(input))));
            },
        );
    }

    group.finish();
}

fn bench_lexer_next_token_loop(c: &mut Criterion) {
    let corpora = build_corpora();
    let mut group = c.benchmark_group("lexer/next_token_loop");

    for corpus in &corpora {
        let input = corpus.source.as_str();
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(corpus.name),
            input,
            |b, input| {
                b.iter(|| black_box(lex_with_next_token_loop(black_box(input))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_lexer_tokenize, bench_lexer_next_token_loop);
criterion_main!(benches);
