use criterion::{criterion_group, criterion_main, Criterion};
use event_vectorizer::{EventVectorizer, PipelineConfig, SimilarityMatrix};

const WORDS: &[&str] = &[
    "protest", "election", "minister", "flood", "river", "strike", "union", "court", "ruling",
    "market", "shares", "rally", "storm", "coast", "evacuation", "parliament", "vote", "budget",
    "police", "crowd", "capital", "border", "talks", "ceasefire", "harvest", "drought", "prices",
    "factory", "workers", "wages", "hospital", "outbreak", "vaccine", "school", "teachers",
];

// deterministic synthetic corpus
fn synthetic_corpus(docs: usize, words_per_doc: usize) -> Vec<String> {
    let mut state = 0x9E37_79B9_u32;
    (0..docs)
        .map(|_| {
            (0..words_per_doc)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    WORDS[state as usize % WORDS.len()]
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn pipeline_benchmark(c: &mut Criterion) {
    let texts = synthetic_corpus(2_000, 40);
    let config = PipelineConfig {
        frequency_floor: 0,
        min_doc_freq: 1,
        max_doc_freq_fraction: 1.0,
        ..PipelineConfig::default()
    };
    let vectorizer = EventVectorizer::with_config(config).expect("valid config");

    c.bench_function("vectorize", |b| {
        b.iter(|| vectorizer.vectorize(&texts));
    });

    let vectors = vectorizer.vectorize(&texts).tf_idf;
    c.bench_function("similarity_matrix", |b| {
        b.iter(|| SimilarityMatrix::compute(&vectors));
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
