//! BM25 term weighting.
//!
//! score(t, D) = tf / (tf + k1 · (1 - b + b · |D| / avgdl)) · ln((N - df + 0.5) / (df + 0.5))
//!
//! The IDF is not shifted by +1, so terms present in more than half of the
//! corpus get a negative weight.
use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_K1: f64 = 1.2;
pub const DEFAULT_B: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term frequency saturation
    pub k1: f64,
    /// Length normalization strength
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: DEFAULT_K1, b: DEFAULT_B }
    }
}

impl Bm25Params {
    pub fn new(k1: f64, b: f64) -> Result<Self> {
        if !k1.is_finite() || k1 < 0.0 {
            return Err(IndexError::InvalidParams(format!("k1 must be finite and >= 0, got {k1}")));
        }
        if !b.is_finite() || !(0.0..=1.0).contains(&b) {
            return Err(IndexError::InvalidParams(format!("b must be within [0, 1], got {b}")));
        }
        Ok(Self { k1, b })
    }

    /// Saturated term frequency in [0, 1).
    pub fn tf_component(&self, tf: u32, doc_len: u32, avg_doc_len: f64) -> f64 {
        let tf = f64::from(tf);
        let dl = f64::from(doc_len);
        tf / (tf + self.k1 * (1.0 - self.b + self.b * dl / avg_doc_len))
    }

    /// Score one term of one document. Callers only score terms present in
    /// the document (`tf >= 1`) against a non-empty corpus.
    pub fn score(&self, tf: u32, doc_len: u32, avg_doc_len: f64, doc_freq: u32, num_docs: u32) -> f32 {
        (self.tf_component(tf, doc_len, avg_doc_len) * idf(doc_freq, num_docs)) as f32
    }
}

/// ln((N - df + 0.5) / (df + 0.5)); negative once df > N / 2.
pub fn idf(doc_freq: u32, num_docs: u32) -> f64 {
    let n = f64::from(num_docs);
    let df = f64::from(doc_freq);
    ((n - df + 0.5) / (df + 0.5)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn idf_of_ubiquitous_term_is_negative() {
        assert!(approx(idf(10, 10), -3.045));
        assert!(idf(1, 1) < 0.0);
    }

    #[test]
    fn idf_of_half_corpus_term_is_zero() {
        assert!(idf(5, 10).abs() < 1e-12);
        assert!(idf(1, 10) > idf(4, 10));
    }

    #[test]
    fn tf_component_saturates_below_one() {
        let p = Bm25Params::default();
        let mut prev = 0.0;
        for tf in [1, 2, 5, 50, 5000] {
            let c = p.tf_component(tf, 10, 10.0);
            assert!(c > prev && c < 1.0);
            prev = c;
        }
    }

    #[test]
    fn longer_documents_are_penalized() {
        let p = Bm25Params::default();
        assert!(p.tf_component(2, 5, 10.0) > p.tf_component(2, 40, 10.0));
        let flat = Bm25Params::new(1.2, 0.0).unwrap();
        assert_eq!(flat.tf_component(2, 5, 10.0), flat.tf_component(2, 40, 10.0));
    }

    #[test]
    fn known_score() {
        // tf=2, |D|=2, avgdl=2.5, df=2, N=2
        let p = Bm25Params::default();
        assert!(approx(p.tf_component(2, 2, 2.5), 2.0 / 3.02));
        assert!(approx(f64::from(p.score(2, 2, 2.5, 2, 2)), -1.0659));
    }

    #[test]
    fn rejects_out_of_range_params() {
        assert!(Bm25Params::new(1.2, 1.5).is_err());
        assert!(Bm25Params::new(-0.1, 0.5).is_err());
        assert!(Bm25Params::new(f64::NAN, 0.5).is_err());
        assert_eq!(Bm25Params::new(1.2, 0.75).unwrap(), Bm25Params::default());
    }
}
