/*! Corpus reader.

A corpus is made of two line-aligned files:

- a text file, holding one document per line,
- an url file, holding the url of the matching document on the same line.

Files ending in `.gz` are transparently decompressed.

[CorpusReader] yields a [RawDocument] per line pair, extracting hashed n-grams from the text with a [NgramExtractor].
Both streams must have the same length: running out of urls (or of documents) is an ingestion error.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    path::Path,
};

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::document::RawDocument;
use crate::error::{Error, IngestionError};
use crate::ngram::NgramExtractor;

/// Boxed line source, possibly decompressing.
pub type LineSource = Box<dyn BufRead + Send>;

/// Open a file for line reading, decompressing it if it ends in `.gz`.
pub fn open(path: &Path) -> Result<LineSource, Error> {
    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);
    if is_gz {
        debug!("opening {:?} as gzip", path);
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub struct CorpusReader<D, U> {
    documents: Lines<D>,
    urls: Lines<U>,
    extractor: NgramExtractor,
    index: usize,
    done: bool,
}

impl CorpusReader<LineSource, LineSource> {
    /// Open a corpus from its text and url files.
    pub fn from_paths(
        documents: &Path,
        urls: &Path,
        extractor: NgramExtractor,
    ) -> Result<Self, Error> {
        Ok(Self::new(open(documents)?, open(urls)?, extractor))
    }
}

impl<D: BufRead, U: BufRead> CorpusReader<D, U> {
    pub fn new(documents: D, urls: U, extractor: NgramExtractor) -> Self {
        Self {
            documents: documents.lines(),
            urls: urls.lines(),
            extractor,
            index: 0,
            done: false,
        }
    }

    /// Number of documents yielded so far.
    pub fn position(&self) -> usize {
        self.index
    }

    fn line_error(&self, e: std::io::Error) -> Error {
        match e.kind() {
            ErrorKind::InvalidData => IngestionError::Malformed {
                index: self.index,
                reason: e.to_string(),
            }
            .into(),
            _ => Error::Io(e),
        }
    }

    fn read_next(&mut self) -> Option<Result<RawDocument, Error>> {
        match (self.documents.next(), self.urls.next()) {
            (Some(Ok(text)), Some(Ok(url))) => {
                let terms = self.extractor.extract(&text);
                let document = RawDocument::new(self.index, terms, url.trim().to_string());
                self.index += 1;
                Some(Ok(document))
            }

            // propagate read errors
            (Some(Err(e)), _) | (_, Some(Err(e))) => Some(Err(self.line_error(e))),

            // out of sync streams
            (Some(_), None) => Some(Err(IngestionError::MissingUrl { index: self.index }.into())),
            (None, Some(_)) => Some(Err(
                IngestionError::MissingDocument { index: self.index }.into()
            )),

            (None, None) => None,
        }
    }
}

impl<D: BufRead, U: BufRead> Iterator for CorpusReader<D, U> {
    type Item = Result<RawDocument, Error>;

    /// Stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.read_next();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use flate2::{write::GzEncoder, Compression};

    use crate::error::{Error, IngestionError};
    use crate::ngram::{hash_str, NgramExtractor};

    use super::CorpusReader;

    fn reader(docs: &str, urls: &str) -> CorpusReader<Cursor<Vec<u8>>, Cursor<Vec<u8>>> {
        CorpusReader::new(
            Cursor::new(docs.as_bytes().to_vec()),
            Cursor::new(urls.as_bytes().to_vec()),
            NgramExtractor::default(),
        )
    }

    #[test]
    fn reads_pairs() {
        let r = reader("hello world\nhello there\n", "http://a\nhttp://b \n");
        let docs: Vec<_> = r.collect::<Result<_, _>>().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 0);
        assert_eq!(docs[1].id, 1);
        assert_eq!(docs[1].url, "http://b");
        assert_eq!(docs[0].terms.get(&hash_str("hello")), Some(&1));
        assert_eq!(docs[1].terms.get(&hash_str("there")), Some(&1));
    }

    #[test]
    fn empty_line_is_empty_document() {
        let r = reader("hello\n\nworld\n", "a\nb\nc\n");
        let docs: Vec<_> = r.collect::<Result<_, _>>().unwrap();
        assert_eq!(docs.len(), 3);
        assert!(docs[1].is_empty());
    }

    #[test]
    fn missing_url() {
        let mut r = reader("a\nb\nc\n", "u1\nu2\n");
        assert!(r.next().unwrap().is_ok());
        assert!(r.next().unwrap().is_ok());
        match r.next() {
            Some(Err(Error::Ingestion(IngestionError::MissingUrl { index }))) => {
                assert_eq!(index, 2)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(r.next().is_none());
    }

    #[test]
    fn missing_document() {
        let mut r = reader("a\n", "u1\nu2\n");
        assert!(r.next().unwrap().is_ok());
        assert!(matches!(
            r.next(),
            Some(Err(Error::Ingestion(IngestionError::MissingDocument {
                index: 1
            })))
        ));
        assert!(r.next().is_none());
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn invalid_utf8() {
        let mut r = CorpusReader::new(
            Cursor::new(vec![0xff, 0xfe, b'\n']),
            Cursor::new(b"u\n".to_vec()),
            NgramExtractor::default(),
        );
        assert!(matches!(
            r.next(),
            Some(Err(Error::Ingestion(IngestionError::Malformed {
                index: 0,
                ..
            })))
        ));
    }

    #[test]
    fn gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs.txt.gz");
        let urls = dir.path().join("urls.txt");

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"first document\nsecond document\n").unwrap();
        std::fs::write(&docs, enc.finish().unwrap()).unwrap();
        std::fs::write(&urls, "http://1\nhttp://2\n").unwrap();

        let r = CorpusReader::from_paths(&docs, &urls, NgramExtractor::default()).unwrap();
        let docs: Vec<_> = r.collect::<Result<_, _>>().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].terms.get(&hash_str("document")), Some(&1));
        assert_eq!(docs[1].url, "http://2");
    }
}
