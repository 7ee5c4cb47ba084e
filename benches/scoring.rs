use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use docalign::document::RawDocument;
use docalign::scorer;
use docalign::tfidf::{TermStats, TfidfTransform};

// bench protocol:
//
// documents of 100 to 5000 distinct terms, drawn from a 50k term vocabulary.
// - TF-IDF transform of a single document
// - alignment score of two documents

fn random_document(rng: &mut StdRng, id: usize, nb_terms: usize) -> RawDocument {
    RawDocument::from_counts(
        id,
        (0..nb_terms).map(|_| (rng.gen_range(0..50_000u64), rng.gen_range(1..5usize))),
        "",
    )
}

fn transform(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let corpus: Vec<_> = (0..200).map(|i| random_document(&mut rng, i, 1000)).collect();
    let stats = TermStats::from_documents(&corpus);
    let t = TfidfTransform::default();

    let mut group = c.benchmark_group("transform");
    for nb_terms in [100, 1000, 5000] {
        let doc = random_document(&mut rng, 0, nb_terms);
        group.bench_with_input(BenchmarkId::new("tfidf", nb_terms), &doc, |b, doc| {
            b.iter(|| t.transform(black_box(doc.clone()), &stats))
        });
    }
    group.finish();
}

fn score(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let corpus: Vec<_> = (0..200).map(|i| random_document(&mut rng, i, 1000)).collect();
    let stats = TermStats::from_documents(&corpus);
    let t = TfidfTransform::default();

    let mut group = c.benchmark_group("score");
    for nb_terms in [100, 1000, 5000] {
        let a = t.transform(random_document(&mut rng, 0, nb_terms), &stats);
        let b = t.transform(random_document(&mut rng, 1, nb_terms), &stats);
        group.bench_with_input(
            BenchmarkId::new("dot", nb_terms),
            &(a, b),
            |bencher, (a, b)| bencher.iter(|| scorer::score(black_box(a), black_box(b))),
        );
    }
    group.finish();
}

criterion_group!(benches, transform, score);
criterion_main!(benches);
