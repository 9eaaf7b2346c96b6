//! TF-IDF vectorizer over word n-grams.

use std::collections::{BTreeMap, HashMap};

use super::supervised::TrainError;

/// Sparse row: `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Word n-gram TF-IDF vectorizer.
///
/// Tokens are lower-cased runs of at least two word characters. The
/// vocabulary keeps the `max_features` terms with the highest total count
/// across the fitted documents (ties go to the alphabetically earlier term)
/// and indexes them alphabetically.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    ngram_range: (usize, usize),
    max_features: usize,
    /// term → feature index
    vocabulary: BTreeMap<String, usize>,
    /// Smoothed inverse document frequency per feature.
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn new(ngram_range: (usize, usize), max_features: usize) -> Self {
        Self {
            ngram_range,
            max_features,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    /// Learn vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<(), TrainError> {
        let mut term_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            for (term, count) in self.term_counts(doc.as_ref()) {
                *term_frequency.entry(term.clone()).or_insert(0) += count;
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if term_frequency.is_empty() {
            return Err(TrainError::EmptyVocabulary);
        }

        // BTreeMap iteration is alphabetical; the stable sort keeps that
        // order among equally frequent terms.
        let mut ranked: Vec<(String, usize)> = term_frequency.into_iter().collect();
        if ranked.len() > self.max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(self.max_features);
        }
        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        let n_documents = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                // IDF = ln((N + 1) / (df + 1)) + 1
                ((n_documents + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept.into_iter().enumerate().map(|(i, term)| (term, i)).collect();

        log::debug!(
            "TF-IDF fitted on {} documents, {} features",
            documents.len(),
            self.vocabulary.len()
        );
        Ok(())
    }

    /// L2-normalized TF-IDF vector of one document. Unknown terms are dropped.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut weights: SparseVector = self
            .term_counts(document)
            .into_iter()
            .filter_map(|(term, count)| {
                self.feature_index(&term)
                    .map(|idx| (idx, count as f64 * self.idf[idx]))
            })
            .collect();
        weights.sort_by_key(|&(idx, _)| idx);

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }
        weights
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of `term` in the learned vocabulary.
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn term_counts(&self, document: &str) -> HashMap<String, usize> {
        let tokens = tokenize(document);
        let (min_n, max_n) = self.ngram_range;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for n in min_n.max(1)..=max_n {
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Lower-cased runs of two or more word characters (letters, digits, `_`).
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| tok.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}
