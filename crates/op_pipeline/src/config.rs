use op_core::LanguageCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of candidate articles to examine
    pub count: usize,
    /// Length of the top-words ranking
    pub top_n: usize,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub max_concurrent_translations: usize,
    /// Words must occur more than this many times to be reported as repeated
    pub repeat_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            count: 5,
            top_n: 10,
            from: LanguageCode::spanish(),
            to: LanguageCode::english(),
            max_concurrent_translations: 5,
            repeat_threshold: 2,
        }
    }
}
