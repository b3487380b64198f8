//! Benchmarks for the concurrent dependency walk against a real directory.

use bufme::phases::walk;
use bufme::repos::RepoSet;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use tempfile::TempDir;

/// Lays out a layered graph: every file in a layer imports every file in the
/// next one, spread over `repos` repositories.
fn create_graph(layers: usize, width: usize, repos: usize) -> TempDir {
    let temp = TempDir::new().unwrap();
    let name = |layer: usize, i: usize| format!("repo{}/l{}/f{}.proto", i % repos, layer, i);

    for layer in 0..layers {
        for i in 0..width {
            let mut source = String::from("syntax = \"proto3\";\n");
            if layer + 1 < layers {
                for j in 0..width {
                    source.push_str(&format!("import \"{}\";\n", name(layer + 1, j)));
                }
            }
            let path = temp.path().join(name(layer, i));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, source).unwrap();
        }
    }

    let mut entry = String::from("syntax = \"proto3\";\n");
    for i in 0..width {
        entry.push_str(&format!("import \"{}\";\n", name(0, i)));
    }
    fs::create_dir_all(temp.path().join("repo0/entry")).unwrap();
    fs::write(temp.path().join("repo0/entry/entry.proto"), entry).unwrap();
    temp
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    group.sample_size(20);

    for (layers, width) in [(2, 10), (4, 10), (4, 25)] {
        let temp = create_graph(layers, width, 5);
        let repos = RepoSet::discover(temp.path()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("layered", format!("{}x{}", layers, width)),
            &repos,
            |b, repos| {
                b.iter(|| walk::execute(temp.path(), repos, "repo0/entry/entry.proto").unwrap())
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
