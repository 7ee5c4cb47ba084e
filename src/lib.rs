//! # docalign
//!
//! Scores pairs of documents from two corpora for cross-lingual content similarity,
//! in order to mine parallel or comparable document pairs.
//!
//! Documents are bags of hashed word n-grams, weighted with TF-IDF
//! (document frequencies come from the reference corpus only),
//! and compared with a sparse dot product.
//!
//! ```
//! use std::sync::Arc;
//!
//! use docalign::config::AlignConfigBuilder;
//! use docalign::document::RawDocument;
//! use docalign::error::Error;
//! use docalign::io::MemorySink;
//! use docalign::pipelines::AlignmentPipeline;
//!
//! let reference = vec![
//!     RawDocument::from_counts(0, vec![(1, 1), (2, 1)], "http://en/a"),
//!     RawDocument::from_counts(1, vec![(1, 1), (3, 1)], "http://en/b"),
//! ];
//! let config = AlignConfigBuilder::default().threshold(0.9).build().unwrap();
//! let sink = Arc::new(MemorySink::default());
//! let pipeline = AlignmentPipeline::from_reference(config, reference, sink.clone());
//!
//! let streamed: Vec<Result<RawDocument, Error>> =
//!     vec![Ok(RawDocument::from_counts(0, vec![(1, 1), (2, 1)], "http://fr/a"))];
//! let summary = pipeline.run(streamed).unwrap();
//! assert_eq!(summary.hits, 1);
//! assert_eq!(sink.pairs()[0].left, "http://en/a");
//! ```
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod ngram;
pub mod pipelines;
pub mod queue;
pub mod scorer;
pub mod tfidf;
