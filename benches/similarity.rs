use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sensegraph_rs::similarity::{aligned_similarity, cosine_similarity};
use sensegraph_rs::tfidf::TfIdf;

fn similarity_benchmarks(c: &mut Criterion) {
    let a: Vec<f64> = (0..1536).map(|i| (i % 7) as f64 * 0.25).collect();
    let b: Vec<f64> = (0..1536).map(|i| (i % 5) as f64 * 0.5).collect();
    c.bench_function("cosine_similarity_1536", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)))
    });

    let user: BTreeMap<String, f64> = (0..500)
        .map(|i| (format!("Category:{i}"), (i % 9) as f64))
        .collect();
    let candidate: BTreeMap<String, f64> = (250..750)
        .map(|i| (format!("Category:{i}"), (i % 6) as f64))
        .collect();
    c.bench_function("aligned_similarity_500x500", |bench| {
        bench.iter(|| aligned_similarity(black_box(&user), black_box(&candidate)))
    });

    let corpus: Vec<String> = (0..100)
        .map(|i| {
            (0..200)
                .map(|j| format!("term{}", (i * j) % 997))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let query = corpus[0].clone();
    c.bench_function("tfidf_term_weights_200_terms", |bench| {
        bench.iter_batched(
            || TfIdf::new(&corpus),
            |mut model| model.term_weights(black_box(&query)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, similarity_benchmarks);
criterion_main!(benches);
