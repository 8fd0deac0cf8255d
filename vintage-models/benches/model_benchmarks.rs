use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use vintage_core::MemoryCorpus;
use vintage_models::NaiveBayes;

fn make_corpus(docs_per_label: usize, words_per_doc: usize, distinct: usize) -> MemoryCorpus {
    let mut corpus = MemoryCorpus::new();
    for (offset, label) in [(0usize, "2016"), (1usize, "2020")] {
        for d in 0..docs_per_label {
            let words: Vec<String> = (0..words_per_doc)
                .map(|w| format!("w{}", (d * 7 + w * 13 + offset * 3) % distinct))
                .collect();
            let lines: Vec<&str> = words.iter().map(String::as_str).collect();
            corpus.add_document(label, &lines);
        }
    }
    corpus
}

fn make_query(words: usize, distinct: usize) -> Vec<String> {
    (0..words).map(|w| format!("w{}", (w * 11) % distinct)).collect()
}

fn bench_naive_bayes_fit(c: &mut Criterion) {
    let corpus = make_corpus(200, 64, 500);

    let mut group = c.benchmark_group("naive_bayes");
    group.bench_function("fit_400docs_64words", |b| {
        b.iter_batched(
            NaiveBayes::default,
            |mut model| {
                model.fit(black_box(&corpus)).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_naive_bayes_predict(c: &mut Criterion) {
    let corpus = make_corpus(200, 64, 500);
    let query = make_query(128, 700);

    let mut model = NaiveBayes::default();
    model.fit(&corpus).unwrap();

    c.bench_function("naive_bayes_predict_128words", |b| {
        b.iter(|| {
            let result = model.predict(black_box(&query)).unwrap();
            black_box(result);
        })
    });
}

criterion_group!(benches, bench_naive_bayes_fit, bench_naive_bayes_predict);
criterion_main!(benches);
