//! Static BM25-weighted inverted index over a corpus of plain-text documents.
//!
//! Indexing runs in two phases. Documents are tokenized one at a time while
//! corpus statistics accumulate; once every document is in, the statistics
//! are finalized and each (term, document) pair is scored.
//!
//! ```
//! use lexindex::{Bm25Params, IndexBuilder, StopwordFilter};
//!
//! let mut builder = IndexBuilder::new(StopwordFilter::default(), Bm25Params::default());
//! builder.add_document("a.txt", "the cat sat on the mat");
//! builder.add_document("b.txt", "the cat chased the cat");
//! let index = builder.build().unwrap();
//! assert_eq!(index.postings("cat").map(|p| p.len()), Some(2));
//! ```

pub mod document;
pub mod error;
pub mod index;
pub mod scoring;
pub mod stats;
pub mod tokenizer;

pub use document::{Document, DocumentBuilder};
pub use error::{IndexError, Result};
pub use index::{DocMeta, IndexBuilder, InvertedIndex, Posting};
pub use scoring::Bm25Params;
pub use stats::{CorpusSnapshot, CorpusStatistics};
pub use tokenizer::StopwordFilter;

pub type DocId = u32;
