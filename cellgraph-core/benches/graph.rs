use cellgraph_core::DependencyGraph;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Every cell in a column depends on the cell above it and on a shared
/// header cell.
fn column_graph(rows: u32) -> DependencyGraph<u32> {
    let mut graph = DependencyGraph::with_capacity(rows as usize);
    for row in 1..rows {
        graph.add_dependency(row - 1, row).unwrap();
        graph.add_dependency(0, row).unwrap();
    }
    graph
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_dependency");
    for rows in [100u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| column_graph(black_box(rows)));
        });
    }
    group.finish();
}

fn bench_replace(c: &mut Criterion) {
    let graph = column_graph(1_000);
    c.bench_function("replace_dependees", |b| {
        b.iter_batched(
            || graph.clone(),
            |mut graph| {
                for row in 1..1_000u32 {
                    graph.replace_dependees(row, [row / 2, 0]).unwrap();
                }
                graph
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_query(c: &mut Criterion) {
    let graph = column_graph(10_000);
    c.bench_function("dependents_of_header", |b| {
        b.iter(|| graph.dependents(black_box(&0u32)).len());
    });
    c.bench_function("dependee_count", |b| {
        b.iter(|| {
            (0..10_000u32)
                .map(|row| graph.dependee_count(black_box(&row)))
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_add, bench_replace, bench_query);
criterion_main!(benches);
