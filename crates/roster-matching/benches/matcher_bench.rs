use criterion::{criterion_group, criterion_main, Criterion};

use roster_core::config::{MatchMode, MatchingConfig};
use roster_core::table::{Table, Value};
use roster_matching::MatchEngine;

const FIRST: &[&str] = &["patrick", "thomas", "arthur", "maria", "keisha", "darnell", "lucas", "anne"];
const LAST: &[&str] = &["peterman", "ferguson", "schopenhaur", "landry", "boudreaux", "nguyen", "smith"];

/// Build a roster of `n` officers across three agencies with deterministic misspellings.
fn roster(prefix: &str, n: usize, typo_every: usize) -> Table {
    let agencies = ["kenner pd", "new orleans pd", "brusly pd"];
    let rows = (0..n)
        .map(|i| {
            let mut first = FIRST[i % FIRST.len()].to_string();
            if typo_every > 0 && i % typo_every == 0 {
                first.pop();
            }
            vec![
                Value::Text(format!("{prefix}{i}")),
                Value::Text(first),
                Value::text(LAST[(i / FIRST.len()) % LAST.len()]),
                Value::text(agencies[i % agencies.len()]),
            ]
        })
        .collect();
    Table::from_rows(["uid", "first_name", "last_name", "agency"], rows).unwrap()
}

fn bench_pairwise_2k(c: &mut Criterion) {
    let a = roster("a", 2_000, 7);
    let b = roster("b", 2_000, 0);
    let engine = MatchEngine::new(MatchingConfig::default()).unwrap();

    c.bench_function("pairwise_match_2k_x_2k", |bench| {
        bench.iter(|| engine.run(&a, &b, "uid").unwrap());
    });
}

fn bench_cluster_sequential_vs_parallel(c: &mut Criterion) {
    let a = roster("a", 1_000, 5);
    let b = roster("b", 1_000, 3);
    for parallel in [false, true] {
        let config = MatchingConfig {
            mode: MatchMode::Cluster,
            lower_bound: 0.85,
            parallel,
            ..MatchingConfig::default()
        };
        let engine = MatchEngine::new(config).unwrap();
        let name = if parallel { "cluster_match_1k_parallel" } else { "cluster_match_1k_sequential" };
        c.bench_function(name, |bench| {
            bench.iter(|| engine.run(&a, &b, "uid").unwrap());
        });
    }
}

criterion_group!(benches, bench_pairwise_2k, bench_cluster_sequential_vs_parallel);
criterion_main!(benches);
