//! File based document alignment pipeline.
//!
//! Reads a reference corpus in memory, then streams a second corpus through it.
//! Each corpus is a pair of line-aligned files (text and urls), see [crate::io::reader].
//!
//! Note that the streamed corpus is not included in the document frequencies.
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};

use crate::config::AlignConfig;
use crate::document::RawDocument;
use crate::error::Error;
use crate::io::reader::LineSource;
use crate::io::{CorpusReader, ResultSink};
use crate::ngram::NgramExtractor;
use crate::pipelines::alignment::{AlignmentPipeline, RunSummary};
use crate::pipelines::pipeline::Pipeline;

/// Text and url files of a corpus.
#[derive(Debug, Clone)]
pub struct CorpusPaths {
    pub documents: PathBuf,
    pub urls: PathBuf,
}

impl CorpusPaths {
    pub fn new(documents: PathBuf, urls: PathBuf) -> Self {
        Self { documents, urls }
    }

    fn open(
        &self,
        extractor: &NgramExtractor,
    ) -> Result<CorpusReader<LineSource, LineSource>, Error> {
        CorpusReader::from_paths(&self.documents, &self.urls, extractor.clone())
    }
}

pub struct DocAlign<S> {
    reference: CorpusPaths,
    streamed: CorpusPaths,
    config: AlignConfig,
    extractor: NgramExtractor,
    sink: Arc<S>,
}

impl<S> DocAlign<S>
where
    S: ResultSink + 'static,
{
    pub fn new(
        reference: CorpusPaths,
        streamed: CorpusPaths,
        config: AlignConfig,
        extractor: NgramExtractor,
        sink: Arc<S>,
    ) -> Self {
        debug!("reference corpus: {:?}", reference);
        debug!("streamed corpus: {:?}", streamed);
        Self {
            reference,
            streamed,
            config,
            extractor,
            sink,
        }
    }

    /// Read the whole reference corpus.
    ///
    /// Any read or desync error aborts before scoring starts.
    fn read_reference(&self) -> Result<Vec<RawDocument>, Error> {
        let documents = self
            .reference
            .open(&self.extractor)?
            .collect::<Result<Vec<_>, _>>()?;
        info!("Read {} documents", documents.len());
        Ok(documents)
    }
}

impl<S> Pipeline<RunSummary> for DocAlign<S>
where
    S: ResultSink + 'static,
{
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<RunSummary, Error> {
        let documents = self.read_reference()?;
        let pipeline = AlignmentPipeline::from_reference(self.config, documents, self.sink.clone());

        let stream = self.streamed.open(&self.extractor)?;
        let summary = pipeline.run(stream);

        // already reported pairs are written out even if the run failed
        let flushed = self.sink.flush();
        let summary = summary?;
        flushed?;

        Ok(summary)
    }
}
