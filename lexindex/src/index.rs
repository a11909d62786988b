use crate::document::{Document, DocumentBuilder};
use crate::error::{IndexError, Result};
use crate::scoring::Bm25Params;
use crate::stats::{CorpusSnapshot, CorpusStatistics};
use crate::tokenizer::{normalize, tokens, StopwordFilter};
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Human-readable name supplied by the corpus source, e.g. a file path
    pub name: String,
    pub length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub score: f32, // BM25 weight, may be negative
}

/// Term → postings, sorted ascending by doc id. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<Posting>>,
    docs: Vec<DocMeta>,
    stats: CorpusSnapshot,
}

impl InvertedIndex {
    /// Postings of an already normalized term.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Normalize a raw token and return its postings.
    pub fn lookup(&self, raw: &str) -> Option<&[Posting]> {
        self.postings(&normalize(raw))
    }

    pub fn document(&self, doc_id: DocId) -> Option<&DocMeta> {
        self.docs.get(doc_id as usize)
    }

    pub fn documents(&self) -> &[DocMeta] {
        &self.docs
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &[Posting])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn num_docs(&self) -> u32 {
        self.stats.document_count()
    }

    pub fn stats(&self) -> &CorpusSnapshot {
        &self.stats
    }
}

/// Drives both indexing phases.
///
/// Documents are added one at a time; [`IndexBuilder::build`] consumes the
/// builder, so nothing can be added once scoring has started.
pub struct IndexBuilder {
    stopwords: StopwordFilter,
    params: Bm25Params,
    documents: Vec<Document>,
    names: Vec<String>,
    stats: CorpusStatistics,
}

impl IndexBuilder {
    pub fn new(stopwords: StopwordFilter, params: Bm25Params) -> Self {
        Self {
            stopwords,
            params,
            documents: Vec::new(),
            names: Vec::new(),
            stats: CorpusStatistics::new(),
        }
    }

    /// Index the whitespace-delimited tokens of `text`.
    pub fn add_document(&mut self, name: impl Into<String>, text: &str) -> DocId {
        self.add_tokens(name, tokens(text))
    }

    pub fn add_tokens<I, S>(&mut self, name: impl Into<String>, raw_tokens: I) -> DocId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doc_id = self.documents.len() as DocId;
        let mut builder = DocumentBuilder::new(doc_id, &self.stopwords);
        builder.extend(raw_tokens);
        let doc = builder.finish();

        let name = name.into();
        tracing::debug!(doc_id, name = %name, length = doc.length(), terms = doc.term_frequencies().len(), "document tokenized");
        self.stats.record(&doc);
        self.documents.push(doc);
        self.names.push(name);
        doc_id
    }

    pub fn num_docs(&self) -> u32 {
        self.stats.document_count()
    }

    /// Finalize corpus statistics and score every (term, document) pair.
    pub fn build(self) -> Result<InvertedIndex> {
        let stats = self.stats.finalize()?;
        let avgdl = stats.average_document_length();
        let num_docs = stats.document_count();

        let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        let mut docs = Vec::with_capacity(self.documents.len());
        for (doc, name) in self.documents.into_iter().zip(self.names) {
            for (term, &tf) in doc.term_frequencies() {
                let df = stats
                    .document_frequency(term)
                    .ok_or_else(|| IndexError::UnknownTerm(term.clone()))?;
                let score = self.params.score(tf, doc.length(), avgdl, df, num_docs);
                postings.entry(term.clone()).or_default().push(Posting { doc_id: doc.id(), score });
            }
            docs.push(DocMeta { name, length: doc.length() });
        }
        // Documents are visited in id order already; sort anyway so the
        // ordering does not depend on that.
        for plist in postings.values_mut() {
            plist.sort_by_key(|p| p.doc_id);
        }

        tracing::info!(num_docs, num_terms = postings.len(), "inverted index built");
        Ok(InvertedIndex { postings, docs, stats })
    }
}
