/*!
# IO utilities

Corpus reading ([reader]) and aligned pairs output ([sink]).
!*/
pub mod reader;
pub mod sink;

pub use reader::CorpusReader;
pub use sink::{AlignedPair, CountingSink, JsonLinesSink, MemorySink, ResultSink, TsvSink};
