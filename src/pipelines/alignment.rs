//! Concurrent alignment of a streamed corpus against an in-memory reference corpus.
//!
//! # Processing
//! 1. `N` workers are spawned, each one popping documents from a [BoundedQueue]
//!    and scoring them against every reference document.
//! 1. The calling thread reads the streamed corpus, transforms each document and pushes it in the queue.
//!    Pushing blocks while the queue is full, so reading never gets far ahead of scoring.
//! 1. Once the stream is exhausted, or on the first malformed document,
//!    `N` poison documents are pushed (one per worker) and every worker is joined.
//!
//! Pairs scoring at least the threshold are reported to the [ResultSink].
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::config::AlignConfig;
use crate::document::{RawDocument, ReferenceTable, ScoredDocument};
use crate::error::{Error, IngestionError};
use crate::io::ResultSink;
use crate::queue::BoundedQueue;
use crate::scorer;
use crate::tfidf::TermStats;

/// Counters of an [AlignmentPipeline].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Streamed documents scored against the whole reference corpus.
    pub documents: usize,
    /// Pairs reported to the sink.
    pub hits: usize,
    /// Size of the reference corpus.
    pub references: usize,
    /// Workers that were joined after the last run.
    pub workers: usize,
}

impl RunSummary {
    /// Number of computed scores.
    pub fn comparisons(&self) -> usize {
        self.documents.saturating_mul(self.references)
    }
}

#[derive(Debug, Default)]
struct Tally {
    scored: AtomicUsize,
    hits: AtomicUsize,
    joined: AtomicUsize,
}

impl Tally {
    fn reset(&self) {
        self.scored.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.joined.store(0, Ordering::Relaxed);
    }
}

/// First error raised by a worker.
///
/// Once set, workers stop scoring and only drain the queue,
/// and the driver stops reading.
#[derive(Debug, Default)]
struct Failure {
    raised: AtomicBool,
    error: Mutex<Option<Error>>,
}

impl Failure {
    fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    fn raise(&self, e: Error) {
        if let Ok(mut error) = self.error.lock() {
            if error.is_none() {
                *error = Some(e);
            }
        }
        self.raised.store(true, Ordering::Release);
    }

    fn take(&self) -> Option<Error> {
        self.error.lock().ok().and_then(|mut error| error.take())
    }
}

struct Worker<S> {
    id: usize,
    threshold: f32,
    queue: Arc<BoundedQueue<ScoredDocument>>,
    reference: Arc<ReferenceTable>,
    sink: Arc<S>,
    tally: Arc<Tally>,
    failure: Arc<Failure>,
}

impl<S: ResultSink> Worker<S> {
    fn run(self) {
        debug!("worker {}: started", self.id);
        loop {
            let document = self.queue.pop();

            // empty doc is poison
            if document.is_poison() {
                break;
            }

            // keep draining until our poison arrives
            if self.failure.is_raised() {
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| self.align(&document))) {
                Ok(Ok(())) => (),
                Ok(Err(e)) => {
                    error!("worker {}: {}", self.id, e);
                    self.failure.raise(e);
                }
                Err(_) => {
                    error!("worker {}: panicked on document {}", self.id, document.id());
                    self.failure.raise(Error::WorkerPanic(format!(
                        "worker {} on document {}",
                        self.id,
                        document.id()
                    )));
                }
            }
        }
        debug!("worker {}: stopped", self.id);
    }

    /// Score a streamed document against every reference document.
    fn align(&self, document: &ScoredDocument) -> Result<(), Error> {
        for reference in self.reference.iter() {
            let score = scorer::score(reference, document);
            if score >= self.threshold {
                self.sink.report(score, reference.url(), document.url())?;
                self.tally.hits.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.tally.scored.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Holds the reference corpus (as TF-IDF vectors), its document frequencies and the result sink.
///
/// Reference data is shared read-only between workers.
/// Counters are reset at the start of each run.
pub struct AlignmentPipeline<S> {
    config: AlignConfig,
    stats: Arc<TermStats>,
    reference: Arc<ReferenceTable>,
    sink: Arc<S>,
    tally: Arc<Tally>,
}

impl<S> AlignmentPipeline<S>
where
    S: ResultSink + 'static,
{
    /// Use precomputed document frequencies and reference vectors.
    ///
    /// `reference` must have been built from `stats`, using the transform of `config`.
    pub fn new(
        config: AlignConfig,
        stats: Arc<TermStats>,
        reference: Arc<ReferenceTable>,
        sink: Arc<S>,
    ) -> Self {
        Self {
            config,
            stats,
            reference,
            sink,
            tally: Arc::new(Tally::default()),
        }
    }

    /// Aggregate document frequencies over the reference corpus,
    /// then compute the TF-IDF vector of each reference document.
    ///
    /// Reference documents with an empty vector are kept: they just never match.
    pub fn from_reference(config: AlignConfig, documents: Vec<RawDocument>, sink: Arc<S>) -> Self {
        let stats = TermStats::from_documents(&documents);
        info!(
            "Aggregated DF: {} terms over {} documents",
            stats.nb_terms(),
            stats.document_count()
        );

        let transform = *config.transform();
        let reference: ReferenceTable = documents
            .into_par_iter()
            .map(|document| transform.transform(document, &stats))
            .collect();

        let empty = reference.iter().filter(|d| d.is_empty()).count();
        if empty > 0 {
            warn!("{} reference documents have an empty vector", empty);
        }
        info!("Calculated reference TF-IDF scores");

        Self::new(config, Arc::new(stats), Arc::new(reference), sink)
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    pub fn stats(&self) -> &TermStats {
        &self.stats
    }

    pub fn reference(&self) -> &[ScoredDocument] {
        &self.reference
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Counters of the last run.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            documents: self.tally.scored.load(Ordering::Relaxed),
            hits: self.tally.hits.load(Ordering::Relaxed),
            references: self.reference.len(),
            workers: self.tally.joined.load(Ordering::Relaxed),
        }
    }

    /// Align every document of `stream` against the reference corpus.
    ///
    /// Fails on the first malformed streamed document (read error, empty vocabulary or empty vector)
    /// or on the first sink error. In every case workers are stopped and joined before returning.
    pub fn run<I>(&self, stream: I) -> Result<RunSummary, Error>
    where
        I: IntoIterator<Item = Result<RawDocument, Error>>,
    {
        let queue = Arc::new(BoundedQueue::new(self.config.queue_capacity())?);
        let failure = Arc::new(Failure::default());
        self.tally.reset();

        let mut workers = Vec::with_capacity(self.config.workers());
        for id in 0..self.config.workers() {
            let worker = Worker {
                id,
                threshold: self.config.threshold(),
                queue: queue.clone(),
                reference: self.reference.clone(),
                sink: self.sink.clone(),
                tally: self.tally.clone(),
                failure: failure.clone(),
            };
            let spawned = thread::Builder::new()
                .name(format!("align-worker-{}", id))
                .spawn(move || worker.run());
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    error!("could not spawn worker {}: {}", id, e);
                    // workers that did start must still be stopped
                    if let Err(stop_err) = self.stop(&queue, workers) {
                        warn!("while stopping started workers: {}", stop_err);
                    }
                    return Err(e.into());
                }
            }
        }
        info!("Started {} workers", workers.len());

        let fed = self.feed(&queue, stream, &failure);
        let stopped = self.stop(&queue, workers);

        debug_assert!(queue.is_empty());
        let fed = fed.map_err(|e| {
            error!("{}", e);
            e
        })?;
        if let Some(e) = failure.take() {
            return Err(e);
        }
        stopped?;

        let summary = self.summary();
        info!(
            "Aligned {} documents against {} references: {} hits",
            fed, summary.references, summary.hits
        );
        Ok(summary)
    }

    /// Read, transform and enqueue streamed documents.
    ///
    /// Returns the number of enqueued documents.
    fn feed<I>(
        &self,
        queue: &BoundedQueue<ScoredDocument>,
        stream: I,
        failure: &Failure,
    ) -> Result<usize, Error>
    where
        I: IntoIterator<Item = Result<RawDocument, Error>>,
    {
        let transform = self.config.transform();
        let mut pushed = 0;
        for (index, document) in stream.into_iter().enumerate() {
            if failure.is_raised() {
                warn!("a worker failed, stopping after {} documents", pushed);
                break;
            }

            let document = document?;
            if document.is_empty() {
                return Err(IngestionError::EmptyVocabulary { index }.into());
            }

            let document = transform.transform(document, &self.stats);

            // an empty vector would be taken for poison
            if document.is_poison() {
                return Err(IngestionError::EmptyWeights { index }.into());
            }

            queue.push(document);
            pushed += 1;
        }
        Ok(pushed)
    }

    /// Send poison to all workers, then wait for them to finish.
    fn stop(
        &self,
        queue: &BoundedQueue<ScoredDocument>,
        workers: Vec<JoinHandle<()>>,
    ) -> Result<(), Error> {
        for _ in 0..workers.len() {
            queue.push(ScoredDocument::poison());
        }

        let mut panicked = Vec::new();
        for worker in workers {
            let name = worker.thread().name().unwrap_or("worker").to_string();
            match worker.join() {
                Ok(()) => {
                    self.tally.joined.fetch_add(1, Ordering::Relaxed);
                }
                Err(_) => {
                    error!("{} panicked", name);
                    panicked.push(name);
                }
            }
        }

        if panicked.is_empty() {
            Ok(())
        } else {
            Err(Error::WorkerPanic(panicked.join(", ")))
        }
    }
}
