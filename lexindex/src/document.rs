use crate::tokenizer::StopwordFilter;
use crate::DocId;
use std::collections::HashMap;

/// Term statistics of one finished document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocId,
    length: u32,
    term_frequencies: HashMap<String, u32>,
}

impl Document {
    pub fn id(&self) -> DocId {
        self.id
    }

    /// Number of indexed tokens (after normalization and stopword removal).
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn term_frequencies(&self) -> &HashMap<String, u32> {
        &self.term_frequencies
    }

    pub fn term_frequency(&self, term: &str) -> u32 {
        self.term_frequencies.get(term).copied().unwrap_or(0)
    }
}

/// Consumes the token stream of a single document.
pub struct DocumentBuilder<'a> {
    stopwords: &'a StopwordFilter,
    doc: Document,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(id: DocId, stopwords: &'a StopwordFilter) -> Self {
        Self {
            stopwords,
            doc: Document { id, length: 0, term_frequencies: HashMap::new() },
        }
    }

    /// Feed one raw token. Returns false if the token was dropped.
    pub fn push(&mut self, raw: &str) -> bool {
        let Some(term) = self.stopwords.index_term(raw) else {
            return false;
        };
        *self.doc.term_frequencies.entry(term).or_insert(0) += 1;
        self.doc.length += 1;
        true
    }

    pub fn extend<I, S>(&mut self, raw_tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in raw_tokens {
            self.push(raw.as_ref());
        }
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> Document {
        let stopwords = StopwordFilter::default();
        let mut b = DocumentBuilder::new(7, &stopwords);
        b.extend(text.split_whitespace());
        b.finish()
    }

    #[test]
    fn counts_surviving_tokens_only() {
        let doc = build("The cat sat on the mat");
        assert_eq!(doc.id(), 7);
        assert_eq!(doc.length(), 3);
        assert_eq!(doc.term_frequency("cat"), 1);
        assert_eq!(doc.term_frequency("the"), 0);
        assert_eq!(doc.term_frequencies().len(), 3);
    }

    #[test]
    fn repeated_terms_accumulate() {
        let doc = build("the cat chased the cat");
        assert_eq!(doc.length(), 3);
        assert_eq!(doc.term_frequency("cat"), 2);
        assert_eq!(doc.term_frequency("chased"), 1);
    }

    #[test]
    fn punctuation_only_tokens_are_dropped() {
        let stopwords = StopwordFilter::default();
        let mut b = DocumentBuilder::new(0, &stopwords);
        assert!(!b.push("--"));
        assert!(!b.push("***"));
        assert!(b.push("Rust!"));
        let doc = b.finish();
        assert_eq!(doc.length(), 1);
        assert!(!doc.term_frequencies().contains_key(""));
    }

    #[test]
    fn length_matches_sum_of_frequencies() {
        let doc = build("a b b c c c, d! the THE The x-ray X-RAY xray");
        let sum: u32 = doc.term_frequencies().values().sum();
        assert_eq!(doc.length(), sum);
        assert_eq!(doc.term_frequency("xray"), 3);
    }
}
