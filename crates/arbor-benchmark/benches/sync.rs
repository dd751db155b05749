use std::hint::black_box;

use arbor_sync::{CodecRegistry, receive, send};
use arbor_tree::{Language, NodeId, Space, Tree, TreeBuilder};
use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

/// `x0 = 0` through `x{n-1} = n-1`. Literal `i` gets id `3 * i + 2`.
fn assignments(language: Language, n: usize) -> Tree {
    let mut b = TreeBuilder::new();
    let statements = (0..n)
        .map(|i| {
            let name = b.identifier(format!("x{i}"));
            let value = b.int(i as i64);
            b.assignment(name, value)
        })
        .collect();
    b.compilation_unit(language, "bench", statements)
}

fn edit_middle(tree: &Tree, n: usize) -> Tree {
    let id = NodeId::from_raw(3 * (n as u64 / 2) + 2);
    let literal = TreeBuilder::int_with_id(id, -1).with_prefix(Space::format(" "));
    tree.replace(id, &literal)
}

fn benchmark_sync(c: &mut Criterion) {
    let registry = CodecRegistry::standard().expect("standard registry");
    let mut group = c.benchmark_group("Sync Benchmark");

    for (language, n) in [(Language::Java, 16), (Language::Java, 512), (Language::Python, 512)] {
        let before = assignments(language, n);
        let after = edit_middle(&before, n);
        let name = format!("{language}/{n}");
        group.throughput(Throughput::Elements(before.count() as u64));

        group.bench_with_input(BenchmarkId::new("full_round", &name), &after, |b, after| {
            b.iter(|| {
                let items = send(after, None, &registry).unwrap();
                black_box(receive(None, items, &registry).unwrap());
            });
        });

        let baseline = receive(None, send(&before, None, &registry).unwrap(), &registry).unwrap();
        group.bench_with_input(BenchmarkId::new("incremental_round", &name), &after, |b, after| {
            b.iter(|| {
                let items = send(after, Some(&before), &registry).unwrap();
                black_box(receive(Some(&baseline), items, &registry).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sync);
criterion_main!(benches);
