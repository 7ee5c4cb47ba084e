use std::path::Path;
use std::sync::Arc;

use docalign::config::AlignConfigBuilder;
use docalign::error::{Error, IngestionError};
use docalign::io::{MemorySink, TsvSink};
use docalign::ngram::NgramExtractor;
use docalign::pipelines::{CorpusPaths, DocAlign, Pipeline};

fn write_corpus(dir: &Path, name: &str, docs: &[&str], urls: &[&str]) -> CorpusPaths {
    let d = dir.join(format!("{}.tokens", name));
    let u = dir.join(format!("{}.urls", name));
    std::fs::write(&d, docs.join("\n") + "\n").unwrap();
    std::fs::write(&u, urls.join("\n") + "\n").unwrap();
    CorpusPaths::new(d, u)
}

#[test_log::test]
fn aligns_files() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_corpus(
        dir.path(),
        "en",
        &[
            "the european parliament adopted the resolution",
            "football match ended in a draw",
            "weather forecast for tomorrow sunny",
        ],
        &["http://en/parliament", "http://en/football", "http://en/weather"],
    );
    let streamed = write_corpus(
        dir.path(),
        "fr",
        &[
            "football match ended in a draw yesterday",
            "the european parliament adopted a resolution",
        ],
        &["http://fr/football", "http://fr/parliament"],
    );

    let config = AlignConfigBuilder::default()
        .threshold(0.5)
        .workers(2)
        .build()
        .unwrap();
    let sink = Arc::new(MemorySink::default());
    let pipeline = DocAlign::new(
        reference,
        streamed,
        config,
        NgramExtractor::default(),
        sink.clone(),
    );
    let summary = pipeline.run().unwrap();

    assert_eq!(summary.documents, 2);
    assert_eq!(summary.references, 3);

    let mut pairs: Vec<(String, String)> = sink
        .pairs()
        .into_iter()
        .map(|p| (p.left, p.right))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("http://en/football".to_string(), "http://fr/football".to_string()),
            (
                "http://en/parliament".to_string(),
                "http://fr/parliament".to_string()
            ),
        ]
    );
}

#[test]
fn tsv_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_corpus(dir.path(), "en", &["a b c", "d e f"], &["en1", "en2"]);
    let streamed = write_corpus(dir.path(), "fr", &["a b c"], &["fr1"]);
    let out = dir.path().join("out.tsv");

    let sink = Arc::new(TsvSink::new(std::fs::File::create(&out).unwrap()));
    let config = AlignConfigBuilder::default().build().unwrap();
    let pipeline = DocAlign::new(reference, streamed, config, NgramExtractor::default(), sink);
    let summary = pipeline.run().unwrap();
    assert_eq!(summary.hits, 1);

    let content = std::fs::read_to_string(&out).unwrap();
    let fields: Vec<&str> = content.trim_end().split('\t').collect();
    assert_eq!(fields.len(), 3);
    assert!((fields[0].parse::<f32>().unwrap() - 1.0).abs() < 1e-5);
    assert_eq!(fields[1], "en1");
    assert_eq!(fields[2], "fr1");
}

#[test]
fn reference_desync_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_corpus(dir.path(), "en", &["a", "b", "c"], &["en1", "en2"]);
    let streamed = write_corpus(dir.path(), "fr", &["a"], &["fr1"]);

    let sink = Arc::new(MemorySink::default());
    let config = AlignConfigBuilder::default().build().unwrap();
    let pipeline = DocAlign::new(reference, streamed, config, NgramExtractor::default(), sink);
    assert!(matches!(
        pipeline.run(),
        Err(Error::Ingestion(IngestionError::MissingUrl { index: 2 }))
    ));
}

#[test]
fn streamed_desync_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_corpus(dir.path(), "en", &["a b", "c d"], &["en1", "en2"]);
    let streamed = write_corpus(dir.path(), "fr", &["a b"], &["fr1", "fr2"]);

    let sink = Arc::new(MemorySink::default());
    let config = AlignConfigBuilder::default().threshold(0.0).build().unwrap();
    let pipeline = DocAlign::new(
        reference,
        streamed,
        config,
        NgramExtractor::default(),
        sink.clone(),
    );
    assert!(matches!(
        pipeline.run(),
        Err(Error::Ingestion(IngestionError::MissingDocument { index: 1 }))
    ));
    // the first streamed document was still scored
    assert_eq!(sink.pairs().len(), 2);
}

#[test]
fn empty_streamed_line_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_corpus(dir.path(), "en", &["a b", ""], &["en1", "en2"]);
    let streamed = write_corpus(dir.path(), "fr", &["a b", "", "c"], &["fr1", "fr2", "fr3"]);

    let sink = Arc::new(MemorySink::default());
    let config = AlignConfigBuilder::default().build().unwrap();
    let pipeline = DocAlign::new(reference, streamed, config, NgramExtractor::default(), sink);
    assert!(matches!(
        pipeline.run(),
        Err(Error::Ingestion(IngestionError::EmptyVocabulary { index: 1 }))
    ));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = CorpusPaths::new(dir.path().join("nope"), dir.path().join("nope.urls"));
    let streamed = CorpusPaths::new(dir.path().join("nope2"), dir.path().join("nope2.urls"));
    let sink = Arc::new(MemorySink::default());
    let config = AlignConfigBuilder::default().build().unwrap();
    let pipeline = DocAlign::new(reference, streamed, config, NgramExtractor::default(), sink);
    assert!(matches!(pipeline.run(), Err(Error::Io(_))));
}
