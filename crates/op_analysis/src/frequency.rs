//! Word frequency analysis.
//!
//! Text is lowercased, stripped of everything but Latin letters (plus the
//! Spanish accented vowels and `ñ`) and whitespace, then split on whitespace.
//! Tokens of two characters or fewer and stop words are dropped.
//!
//! Rankings order by count descending and then by word ascending, so equal
//! counts always come out in the same order.

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;
use tracing::debug;
use crate::stopwords::is_stop_word;

const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

impl fmt::Display for WordFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WordFrequencyStats {
    pub unique_words: usize,
    pub total_occurrences: usize,
    pub max_frequency: usize,
    /// `total_occurrences / unique_words`, or 0 when there are no words
    pub average_frequency: f64,
}

impl WordFrequencyStats {
    pub fn from_frequencies(frequencies: &[WordFrequency]) -> Self {
        let unique_words = frequencies.len();
        let total_occurrences: usize = frequencies.iter().map(|f| f.count).sum();
        let max_frequency = frequencies.iter().map(|f| f.count).max().unwrap_or(0);
        let average_frequency = if unique_words == 0 {
            0.0
        } else {
            total_occurrences as f64 / unique_words as f64
        };

        Self {
            unique_words,
            total_occurrences,
            max_frequency,
            average_frequency,
        }
    }
}

impl fmt::Display for WordFrequencyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unique words: {}, total occurrences: {}, max frequency: {}, average frequency: {:.2}",
            self.unique_words, self.total_occurrences, self.max_frequency, self.average_frequency
        )
    }
}

fn is_kept_char(c: char) -> bool {
    c.is_ascii_lowercase() || matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ñ') || c.is_whitespace()
}

/// Tokens that take part in the analysis, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text.to_lowercase().chars().filter(|&c| is_kept_char(c)).collect();
    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_WORD_LEN && !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

fn count<I>(words: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

fn rank(counts: HashMap<String, usize>) -> Vec<WordFrequency> {
    let mut ranked: Vec<WordFrequency> = counts
        .into_iter()
        .map(|(word, count)| WordFrequency { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked
}

/// Every remaining word with its count, most frequent first.
pub fn analyze_frequency(text: &str) -> Vec<WordFrequency> {
    if text.trim().is_empty() {
        debug!("Received empty text for analysis");
        return Vec::new();
    }

    let ranked = rank(count(tokenize(text)));
    debug!(
        length = text.len(),
        unique = ranked.len(),
        "Text analysis complete"
    );
    ranked
}

/// The `top_n` most frequent words.
pub fn top_words(text: &str, top_n: usize) -> Vec<WordFrequency> {
    let mut ranked = analyze_frequency(text);
    ranked.truncate(top_n);
    ranked
}

pub fn statistics(text: &str) -> WordFrequencyStats {
    WordFrequencyStats::from_frequencies(&analyze_frequency(text))
}

/// Words occurring more than `threshold` times.
///
/// Unlike [`analyze_frequency`] this keeps letters of any script and applies
/// neither the stop-word list nor the length filter.
pub fn repeated_words(text: &str, threshold: usize) -> Vec<WordFrequency> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    let counts = count(cleaned.split_whitespace().map(str::to_string));

    rank(counts)
        .into_iter()
        .filter(|f| f.count > threshold)
        .collect()
}
