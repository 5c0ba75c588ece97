use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use yammm::syntax::source::SourceRegistry;
use yammm::syntax::{parse_source, parse_sources};

fn build_schema(types: usize) -> String {
    let mut src = String::with_capacity(types * 320);
    let _ = writeln!(src, "schema \"Bench\"\n\nimport \"./shared.yammm\" as shared\n");
    let _ = writeln!(src, "type Code = String[3, 12]");
    let _ = writeln!(src, "type Level = Enum[\"low\", \"mid\", \"high\"]\n");

    for i in 0..types {
        let _ = writeln!(src, "/* Entity number {i}. */");
        let _ = writeln!(src, "type Entity{i} extends shared.Base {{");
        let _ = writeln!(src, "    id UUID primary");
        let _ = writeln!(src, "    code Code required");
        let _ = writeln!(src, "    tags List<String[1, 20]>[0, 8]");
        let _ = writeln!(src, "    level Level");
        let _ = writeln!(
            src,
            "    --> next (one) Entity{} / previous (many) {{\n        since Date\n    }}",
            i + 1
        );
        let _ = writeln!(src, "    *-> parts (_:many) Part");
        let _ = writeln!(
            src,
            "    ! \"parts are weighed\" parts -> all |$p| {{ $p.weight > 0.0 }} && level != nil"
        );
        let _ = writeln!(src, "}}\n");
    }

    let _ = writeln!(src, "part type Part {{\n    weight Float required\n}}");
    src
}

fn bench_parse_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/parse_source");

    for types in [100usize, 1_000] {
        let text = build_schema(types);
        let mut registry = SourceRegistry::new();
        let Ok(id) = registry.register("bench.yammm", text.as_str()) else {
            panic!("failed to register bench source");
        };

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(types), &id, |b, &id| {
            b.iter(|| {
                let output = parse_source(&registry, black_box(id));
                black_box(output.map(|o| o.unit.declarations.len()).unwrap_or(0));
            });
        });
    }

    group.finish();
}

fn bench_parse_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/parse_sources");
    let text = build_schema(200);

    for files in [1usize, 8, 32] {
        let mut registry = SourceRegistry::new();
        let ids: Vec<_> = (0..files)
            .filter_map(|i| {
                registry
                    .register(format!("bench_{i}.yammm"), text.as_str())
                    .ok()
            })
            .collect();

        group.throughput(Throughput::Bytes((text.len() * files) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(files), &ids, |b, ids| {
            b.iter(|| {
                let outputs = parse_sources(&registry, black_box(ids));
                black_box(outputs.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_source, bench_parse_sources);
criterion_main!(benches);
