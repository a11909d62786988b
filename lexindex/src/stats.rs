//! Corpus-wide counters.
//!
//! [`CorpusStatistics`] accumulates while documents are being tokenized and
//! exposes no derived values. [`CorpusStatistics::finalize`] turns it into a
//! [`CorpusSnapshot`], which is the only thing the scorer reads.

use crate::document::Document;
use crate::error::{IndexError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CorpusStatistics {
    document_count: u32,
    total_token_count: u64,
    document_frequency: BTreeMap<String, u32>,
}

impl CorpusStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished document. Each distinct term of the document bumps
    /// its document frequency exactly once, however often it occurs.
    pub fn record(&mut self, doc: &Document) {
        self.document_count += 1;
        self.total_token_count += u64::from(doc.length());
        for term in doc.term_frequencies().keys() {
            *self.document_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }

    pub fn document_count(&self) -> u32 {
        self.document_count
    }

    pub fn finalize(self) -> Result<CorpusSnapshot> {
        if self.document_count == 0 {
            return Err(IndexError::EmptyCorpus);
        }
        let average_document_length = self.total_token_count as f64 / f64::from(self.document_count);
        tracing::info!(
            documents = self.document_count,
            tokens = self.total_token_count,
            terms = self.document_frequency.len(),
            avgdl = average_document_length,
            "corpus statistics finalized"
        );
        Ok(CorpusSnapshot {
            document_count: self.document_count,
            total_token_count: self.total_token_count,
            average_document_length,
            document_frequency: self.document_frequency,
        })
    }
}

/// Finalized statistics of a complete corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSnapshot {
    document_count: u32,
    total_token_count: u64,
    average_document_length: f64,
    document_frequency: BTreeMap<String, u32>,
}

impl CorpusSnapshot {
    pub fn document_count(&self) -> u32 {
        self.document_count
    }

    pub fn total_token_count(&self) -> u64 {
        self.total_token_count
    }

    /// Always > 0 unless every document was empty after filtering.
    pub fn average_document_length(&self) -> f64 {
        self.average_document_length
    }

    pub fn document_frequency(&self, term: &str) -> Option<u32> {
        self.document_frequency.get(term).copied()
    }

    pub fn document_frequencies(&self) -> &BTreeMap<String, u32> {
        &self.document_frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBuilder;
    use crate::tokenizer::StopwordFilter;

    fn doc(id: u32, text: &str) -> Document {
        let stopwords = StopwordFilter::default();
        let mut b = DocumentBuilder::new(id, &stopwords);
        b.extend(text.split_whitespace());
        b.finish()
    }

    #[test]
    fn empty_corpus_is_rejected() {
        assert_eq!(CorpusStatistics::new().finalize(), Err(IndexError::EmptyCorpus));
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let mut stats = CorpusStatistics::new();
        stats.record(&doc(0, "rust rust rust rust"));
        stats.record(&doc(1, "rust go"));
        stats.record(&doc(2, "go go go"));
        let snap = stats.finalize().unwrap();
        assert_eq!(snap.document_frequency("rust"), Some(2));
        assert_eq!(snap.document_frequency("go"), Some(2));
        assert_eq!(snap.document_frequency("java"), None);
        for (_, &df) in snap.document_frequencies() {
            assert!(df <= snap.document_count());
        }
    }

    #[test]
    fn average_length_uses_filtered_tokens() {
        let mut stats = CorpusStatistics::new();
        stats.record(&doc(0, "the cat sat on the mat"));
        stats.record(&doc(1, "the dog"));
        let snap = stats.finalize().unwrap();
        assert_eq!(snap.document_count(), 2);
        assert_eq!(snap.total_token_count(), 4);
        assert!((snap.average_document_length() - 2.0).abs() < 1e-12);
    }
}
