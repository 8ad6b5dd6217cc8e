pub mod frequency;
pub mod stopwords;

pub use frequency::{
    analyze_frequency, repeated_words, statistics, tokenize, top_words, WordFrequency,
    WordFrequencyStats,
};
pub use stopwords::is_stop_word;
