/*! Result sinks.

Workers report every pair scoring above the threshold to a [ResultSink].
Sinks are shared by all workers, so they serialize writes internally.

- [TsvSink]: `score \t left \t right` lines, through [csv].
- [JsonLinesSink]: one JSON object per line.
- [CountingSink]: only counts pairs.
- [MemorySink]: keeps pairs in memory.
!*/
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::Error;

/// A pair of documents that scored above the threshold.
///
/// `left` is the reference document url, `right` the streamed one.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub score: f32,
    pub left: String,
    pub right: String,
}

impl AlignedPair {
    pub fn new(score: f32, left: &str, right: &str) -> Self {
        Self {
            score,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Destination of aligned pairs. Called concurrently by workers.
pub trait ResultSink: Send + Sync {
    fn report(&self, score: f32, left: &str, right: &str) -> Result<(), Error>;

    /// Flush buffered pairs, if any. Called once the run is over.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    m.lock()
        .map_err(|_| Error::Custom("sink lock poisoned".to_string()))
}

/// Tab separated output, without header.
pub struct TsvSink<W: Write> {
    writer: Mutex<csv::Writer<W>>,
}

impl<W: Write> TsvSink<W> {
    pub fn new(w: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(w);
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Get back the inner writer, flushing pending records.
    pub fn into_inner(self) -> Result<W, Error> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| Error::Custom("sink lock poisoned".to_string()))?;
        writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write + Send> ResultSink for TsvSink<W> {
    fn report(&self, score: f32, left: &str, right: &str) -> Result<(), Error> {
        let mut writer = lock(&self.writer)?;
        writer.serialize((score, left, right))?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        lock(&self.writer)?.flush()?;
        Ok(())
    }
}

/// One `{"score", "left", "right"}` JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(w: W) -> Self {
        Self {
            writer: Mutex::new(w),
        }
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|_| Error::Custom("sink lock poisoned".to_string()))
    }
}

#[derive(Serialize)]
struct PairRef<'a> {
    score: f32,
    left: &'a str,
    right: &'a str,
}

impl<W: Write + Send> ResultSink for JsonLinesSink<W> {
    fn report(&self, score: f32, left: &str, right: &str) -> Result<(), Error> {
        let mut writer = lock(&self.writer)?;
        serde_json::to_writer(&mut *writer, &PairRef { score, left, right })?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        lock(&self.writer)?.flush()?;
        Ok(())
    }
}

/// Discards pairs, keeping their count.
#[derive(Debug, Default)]
pub struct CountingSink {
    count: AtomicUsize,
}

impl CountingSink {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl ResultSink for CountingSink {
    fn report(&self, _score: f32, _left: &str, _right: &str) -> Result<(), Error> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Keeps every reported pair.
#[derive(Debug, Default)]
pub struct MemorySink {
    pairs: Mutex<Vec<AlignedPair>>,
}

impl MemorySink {
    /// Reported pairs, in report order.
    pub fn pairs(&self) -> Vec<AlignedPair> {
        self.pairs
            .lock()
            .map(|pairs| pairs.clone())
            .unwrap_or_default()
    }
}

impl ResultSink for MemorySink {
    fn report(&self, score: f32, left: &str, right: &str) -> Result<(), Error> {
        lock(&self.pairs)?.push(AlignedPair::new(score, left, right));
        Ok(())
    }
}
