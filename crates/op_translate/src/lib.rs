pub mod cache;
pub mod config;
pub mod providers;

pub use cache::{CacheStats, TranslationCache};
pub use config::{ProviderKind, TranslatorConfig};
pub use providers::create_translator;

pub mod prelude {
    pub use super::{create_translator, TranslationCache, TranslatorConfig};
    pub use op_core::{LanguageCode, ProviderError, Result, Translator};
}
