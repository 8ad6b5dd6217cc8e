pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{Pipeline, PipelineReport};

pub mod prelude {
    pub use super::{Pipeline, PipelineConfig, PipelineReport};
    pub use op_core::{ArticleRecord, Error, LanguageCode, Result};
    pub use op_extract::{ContentExtractor, ExtractionProfile, HtmlDocument};
    pub use op_translate::{TranslationCache, TranslatorConfig};
    pub use tokio_util::sync::CancellationToken;
}
