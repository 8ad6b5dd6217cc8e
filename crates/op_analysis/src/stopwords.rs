use std::collections::HashSet;
use lazy_static::lazy_static;

const ENGLISH: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "am", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "shall", "as", "if",
    "because", "while", "when", "where", "what", "which", "who", "whom", "whose", "why", "how",
    "all", "each", "every", "both", "few", "more", "most", "other", "some", "such", "that",
    "this", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her",
    "us", "them", "my", "your", "his", "its", "our", "their", "no", "not", "nor", "so", "up",
    "out", "it's", "that's", "what's",
];

const SPANISH: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "al", "a", "ante",
    "bajo", "cabe", "con", "contra", "desde", "durante", "entre", "hacia", "hasta", "para",
    "por", "según", "sin", "sobre", "tras", "y", "o", "u", "pero", "mas", "sino", "que",
    "quien", "ella", "ello", "ellas", "ellos", "me", "te", "se", "nos", "os", "les", "mí", "ti",
    "sí", "nosotros", "vosotros", "ustedes", "mi", "tu", "su", "nuestro", "vuestro", "mío",
    "tuyo", "suyo", "nuestros", "vuestros", "míos", "tuyos", "suyos", "este", "ese", "aquel",
    "esto", "eso", "aquello", "estos", "esos", "aquellos", "está", "estás", "estamos",
    "estáis", "están", "estoy", "sea", "seas", "seamos", "seáis", "sean", "soy", "eres",
    "somos", "sois", "es", "son",
];

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> =
        ENGLISH.iter().chain(SPANISH.iter()).copied().collect();
}

/// English and Spanish function words ignored by the frequency analysis.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}
