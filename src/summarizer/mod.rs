//! Latent semantic analysis summarization.
//!
//! Sentences are columns of a term-by-sentence matrix. After a singular value
//! decomposition each sentence is scored by the length of its vector in the
//! latent space, weighted by the squared singular values. The best sentences
//! are returned in the order they appear in the document.

mod document;
mod svd;
mod tokenizer;

pub use document::{Document, Sentence};
pub use tokenizer::{split_sentences, split_words};

use crate::error::SummarizationError;
use itertools::Itertools;
use ndarray::Array2;
use rust_stemmers::{Algorithm, Stemmer};
use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    fmt,
};
use stop_words::{get, LANGUAGE};
use tracing::debug;

pub const DEFAULT_SENTENCES_COUNT: usize = 3;

const MIN_DIMENSIONS: usize = 3;
const REDUCTION_RATIO: f64 = 1.0;
const SMOOTH: f64 = 0.4;
// scores within 1e-9 of each other are ties
const SCORE_PRECISION: f64 = 1e9;

pub struct LsaSummarizer {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
    sentences_count: usize,
}

impl fmt::Debug for LsaSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LsaSummarizer")
            .field("stop_words", &self.stop_words.len())
            .field("sentences_count", &self.sentences_count)
            .finish_non_exhaustive()
    }
}

impl LsaSummarizer {
    /// English stemmer and stop words, three sentences.
    pub fn english() -> Self {
        Self::with_stop_words(get(LANGUAGE::English).iter().map(|s| s.to_string()))
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            sentences_count: DEFAULT_SENTENCES_COUNT,
        }
    }

    pub fn with_sentences_count(mut self, sentences_count: usize) -> Self {
        self.sentences_count = sentences_count;
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    fn stem(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }

    /// Picks up to `sentences_count` sentences, returned in document order as
    /// their original text.
    pub fn summarize<'d>(
        &self,
        document: &'d Document,
    ) -> Result<Vec<&'d str>, SummarizationError> {
        let sentences: Vec<&Sentence> = document.sentences().collect();
        if sentences.is_empty() {
            return Ok(vec![]);
        }

        let dictionary = self.dictionary(document);
        let ranks = if dictionary.is_empty() {
            debug!("No scoring terms in document, keeping leading sentences");
            vec![0.0; sentences.len()]
        } else {
            let matrix = term_frequency(self.matrix(&sentences, &dictionary));
            let svd = svd::svd(&matrix);
            if svd.v.nrows() != sentences.len() {
                return Err(SummarizationError::Shape {
                    columns: svd.v.nrows(),
                    sentences: sentences.len(),
                });
            }
            ranks(&svd)
        };

        if let Some(sentence) = ranks.iter().position(|rank| !rank.is_finite()) {
            return Err(SummarizationError::NonFiniteScore { sentence });
        }

        Ok(sentences
            .into_iter()
            .zip(ranks)
            .enumerate()
            .sorted_by_key(|(order, (_, rank))| {
                (Reverse((rank * SCORE_PRECISION).round() as i64), *order)
            })
            .take(self.sentences_count)
            .sorted_by_key(|(order, _)| *order)
            .map(|(_, (sentence, _))| sentence.text())
            .collect())
    }

    /// Stems of all non stop words, numbered by first occurrence.
    fn dictionary(&self, document: &Document) -> HashMap<String, usize> {
        let mut dictionary = HashMap::new();
        for word in document.words() {
            if self.is_stop_word(word) {
                continue;
            }
            let word = word.to_lowercase();
            let next = dictionary.len();
            dictionary
                .entry(self.stemmer.stem(&word).into_owned())
                .or_insert(next);
        }
        dictionary
    }

    fn matrix(&self, sentences: &[&Sentence], dictionary: &HashMap<String, usize>) -> Array2<f64> {
        let mut matrix = Array2::zeros((dictionary.len(), sentences.len()));
        for (col, sentence) in sentences.iter().enumerate() {
            for word in sentence.words() {
                if let Some(&row) = dictionary.get(&self.stem(word)) {
                    matrix[[row, col]] += 1.0;
                }
            }
        }
        matrix
    }
}

/// Scales each column by its most frequent term, smoothed so that absent
/// terms keep a small weight.
fn term_frequency(mut matrix: Array2<f64>) -> Array2<f64> {
    for mut column in matrix.columns_mut() {
        let max = column.fold(0.0_f64, |max, &x| max.max(x));
        if max != 0.0 {
            column.mapv_inplace(|x| SMOOTH + (1.0 - SMOOTH) * x / max);
        }
    }
    matrix
}

fn ranks(svd: &svd::Svd) -> Vec<f64> {
    let sigma = &svd.singular_values;
    let dimensions = MIN_DIMENSIONS.max((sigma.len() as f64 * REDUCTION_RATIO) as usize);
    let powered: Vec<f64> = sigma
        .iter()
        .enumerate()
        .map(|(i, s)| if i < dimensions { s * s } else { 0.0 })
        .collect();

    svd.v
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .zip(&powered)
                .map(|(v, s)| s * v * v)
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}
