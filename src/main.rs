//! # docalign
//!
//! Finds parallel/comparable documents between two corpora.
//!
//! The first corpus (reference) is read in memory and used to compute document frequencies.
//! The second one (streamed) is then read document by document, and each of its documents
//! is scored against every reference document by a pool of workers.
//!
//! ## Getting started
//!
//! ```sh
//! docalign 0.1.0
//! Find parallel documents between two corpora using TF-IDF weighted n-grams.
//!
//! USAGE:
//!     docalign [FLAGS] [OPTIONS] <reference-tokens> <reference-urls> <streamed-tokens> <streamed-urls>
//! ```
//!
//! Aligned pairs are written as `score \t reference-url \t streamed-url` lines.
//! Logging is controlled through `RUST_LOG`.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use structopt::StructOpt;

use docalign::config::{AlignConfig, AlignConfigBuilder};
use docalign::error::Error;
use docalign::io::{CountingSink, JsonLinesSink, ResultSink, TsvSink};
use docalign::ngram::{NgramConfig, NgramExtractor};
use docalign::pipelines::{CorpusPaths, DocAlign, Pipeline, RunSummary};

#[macro_use]
extern crate log;

mod cli;

fn run_with<S: ResultSink + 'static>(
    opt: &cli::DocAlign,
    config: AlignConfig,
    extractor: NgramExtractor,
    sink: Arc<S>,
) -> Result<RunSummary, Error> {
    let pipeline = DocAlign::new(
        CorpusPaths::new(opt.reference_tokens.clone(), opt.reference_urls.clone()),
        CorpusPaths::new(opt.streamed_tokens.clone(), opt.streamed_urls.clone()),
        config,
        extractor,
        sink,
    );
    pipeline.run()
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::DocAlign::from_args();
    debug!("cli args\n{:#?}", opt);

    // configuration errors are reported before reading anything
    let mut builder = AlignConfigBuilder::default();
    builder
        .threshold(opt.threshold)
        .workers(opt.workers)
        .tf(opt.tf)
        .idf(opt.idf)
        .min_df(opt.min_df)
        .max_df(opt.max_df)
        .normalize(!opt.no_normalize);
    if let Some(capacity) = opt.queue_capacity {
        builder.queue_capacity(capacity);
    }
    let config = builder.build()?;
    let extractor = NgramExtractor::new(NgramConfig {
        size: opt.ngram_size,
        lowercase: !opt.no_lowercase,
    })?;
    info!(
        "docalign {}: threshold {}, {} workers",
        <DocAlign<CountingSink> as Pipeline<RunSummary>>::version(),
        config.threshold(),
        config.workers()
    );

    let summary = if opt.count_only {
        run_with(&opt, config, extractor, Arc::new(CountingSink::default()))?
    } else {
        let out: Box<dyn Write + Send> = match &opt.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(std::io::stdout())),
        };
        match opt.format {
            cli::OutputFormat::Tsv => run_with(&opt, config, extractor, Arc::new(TsvSink::new(out)))?,
            cli::OutputFormat::Jsonl => {
                run_with(&opt, config, extractor, Arc::new(JsonLinesSink::new(out)))?
            }
        }
    };

    info!(
        "{} documents, {} comparisons, {} hits",
        summary.documents,
        summary.comparisons(),
        summary.hits
    );

    // pairs go to stdout unless an output file was given
    if opt.count_only || opt.output.is_some() {
        println!("{}", summary.hits);
    }
    Ok(())
}
