use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^A-Za-z0-9]+").expect("valid regex");
}

/// English function words excluded from indexing unless a caller supplies its own list.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at",
    "be", "but", "by",
    "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or",
    "such", "that", "the", "their", "then",
    "there", "these", "they", "this", "to",
    "was", "will", "with",
];

/// Strip everything that is not an ASCII letter or digit, then lowercase.
///
/// Non-ASCII letters are removed rather than folded, so `café` becomes `caf`.
/// An empty result means the token is dropped.
pub fn normalize(raw: &str) -> String {
    NON_ALNUM.replace_all(raw, "").to_ascii_lowercase()
}

/// Split raw text into whitespace-delimited tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl StopwordFilter {
    /// Build a filter from an arbitrary word list. Entries are normalized the
    /// same way document tokens are, and entries that normalize to nothing are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// A filter that excludes nothing.
    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    /// Normalize a raw token and return it if it is indexable.
    pub fn index_term(&self, raw: &str) -> Option<String> {
        let term = normalize(raw);
        if term.is_empty() || self.is_stopword(&term) {
            None
        } else {
            Some(term)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}
