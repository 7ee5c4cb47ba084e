//! Pipelines.
//!
//! - [AlignmentPipeline] aligns a stream of documents against an in-memory reference corpus.
//! - [DocAlign] runs it over corpora stored in files.
//!
//! Both rely on the light [Pipeline] trait for file based runs.
pub mod alignment;
pub mod docalign;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use alignment::{AlignmentPipeline, RunSummary};
pub use docalign::{CorpusPaths, DocAlign};
pub use pipeline::Pipeline;
