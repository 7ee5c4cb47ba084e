//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use docalign::tfidf::{IdfWeighting, TfWeighting};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tsv" => Ok(Self::Tsv),
            "jsonl" => Ok(Self::Jsonl),
            other => Err(format!("unknown format {:?} (expected tsv or jsonl)", other)),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "docalign",
    about = "Find parallel documents between two corpora using TF-IDF weighted n-grams."
)]
/// Alignment command and parameters.
///
/// ```sh
/// USAGE:
///     docalign [FLAGS] [OPTIONS] <reference-tokens> <reference-urls> <streamed-tokens> <streamed-urls>
/// ```
///
/// Each `*-tokens` file holds one document per line, each `*-urls` file the matching urls.
/// Files ending in `.gz` are decompressed on the fly.
pub struct DocAlign {
    #[structopt(
        parse(from_os_str),
        help = "reference corpus documents (one per line), kept in memory"
    )]
    pub reference_tokens: PathBuf,
    #[structopt(parse(from_os_str), help = "reference corpus urls (one per line)")]
    pub reference_urls: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "streamed corpus documents (one per line)"
    )]
    pub streamed_tokens: PathBuf,
    #[structopt(parse(from_os_str), help = "streamed corpus urls (one per line)")]
    pub streamed_urls: PathBuf,

    #[structopt(long = "threshold", default_value = "0.7", help = "set score threshold")]
    pub threshold: f32,
    #[structopt(
        short = "j",
        long = "workers",
        default_value = "4",
        help = "number of scoring threads"
    )]
    pub workers: usize,
    #[structopt(
        long = "queue-capacity",
        help = "number of documents waiting to be scored. Default is 4 times the number of workers."
    )]
    pub queue_capacity: Option<usize>,

    #[structopt(long = "ngram-size", default_value = "1", help = "n-gram length, in words")]
    pub ngram_size: usize,
    #[structopt(long = "no-lowercase", help = "keep case of words")]
    pub no_lowercase: bool,
    #[structopt(
        long = "tf",
        default_value = "log",
        help = "term frequency weighting (log, raw, binary/constant, sqrt, augmented, max, relative)"
    )]
    pub tf: TfWeighting,
    #[structopt(
        long = "idf",
        default_value = "smooth",
        help = "inverse document frequency weighting (smooth, plain, log1p, unit, maxratio, prob)"
    )]
    pub idf: IdfWeighting,
    #[structopt(
        long = "min-df",
        default_value = "0",
        help = "ignore terms found in fewer reference documents"
    )]
    pub min_df: usize,
    #[structopt(
        long = "max-df",
        default_value = "1000",
        help = "ignore terms found in more reference documents"
    )]
    pub max_df: usize,
    #[structopt(long = "no-normalize", help = "do not L2-normalize document vectors")]
    pub no_normalize: bool,

    #[structopt(
        long = "format",
        default_value = "tsv",
        help = "aligned pairs output format (tsv, jsonl)"
    )]
    pub format: OutputFormat,
    #[structopt(
        short = "o",
        long = "output",
        parse(from_os_str),
        help = "write aligned pairs to this file rather than stdout"
    )]
    pub output: Option<PathBuf>,
    #[structopt(long = "count-only", help = "only print the number of aligned pairs")]
    pub count_only: bool,
}
