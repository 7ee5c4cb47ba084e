//! Error enum
use std::fmt;

/// Errors that are fatal to an alignment run.
///
/// Every kind is surfaced to the caller: documents are never skipped.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Ingestion(IngestionError),
    Config(String),
    WorkerPanic(String),
    Custom(String),
}

/// Malformed or desynchronized corpus input.
///
/// `index` is the zero-based position of the offending document in its corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionError {
    /// The url stream ended before the document stream.
    MissingUrl { index: usize },
    /// The url stream has more lines than the document stream.
    MissingDocument { index: usize },
    /// The document produced no terms at all.
    EmptyVocabulary { index: usize },
    /// Every term of the document weighted to zero.
    EmptyWeights { index: usize },
    Malformed { index: usize, reason: String },
}

impl IngestionError {
    pub fn index(&self) -> usize {
        match self {
            Self::MissingUrl { index }
            | Self::MissingDocument { index }
            | Self::EmptyVocabulary { index }
            | Self::EmptyWeights { index }
            | Self::Malformed { index, .. } => *index,
        }
    }
}

impl fmt::Display for IngestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl { index } => {
                write!(f, "error while reading the url for document {}", index)
            }
            Self::MissingDocument { index } => {
                write!(f, "url {} has no matching document", index)
            }
            Self::EmptyVocabulary { index } => {
                write!(f, "document {} resulted in an empty vocab", index)
            }
            Self::EmptyWeights { index } => {
                write!(f, "document {} resulted in an empty word vec", index)
            }
            Self::Malformed { index, reason } => {
                write!(f, "document {} is malformed: {}", index, reason)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Ingestion(e) => write!(f, "ingestion error: {}", e),
            Error::Config(s) => write!(f, "configuration error: {}", s),
            Error::WorkerPanic(s) => write!(f, "worker panicked: {}", s),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<IngestionError> for Error {
    fn from(v: IngestionError) -> Self {
        Self::Ingestion(v)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
