//! Pipeline trait.
use crate::error::Error;

/// A runnable processing pipeline, producing a `T` (e.g. a run summary).
///
/// `version` identifies the implementation in logs.
pub trait Pipeline<T> {
    fn version() -> &'static str;
    fn run(&self) -> Result<T, Error>;
}
