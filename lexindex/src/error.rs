use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    /// No documents were added; average document length is undefined.
    #[error("empty corpus: no documents to index")]
    EmptyCorpus,

    /// A scored term has no document frequency. Builder invariant violation.
    #[error("internal consistency fault: term {0:?} has no document frequency")]
    UnknownTerm(String),

    #[error("invalid BM25 parameters: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
