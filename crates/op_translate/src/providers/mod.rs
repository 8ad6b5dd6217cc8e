use std::sync::Arc;
use op_core::{Result, Translator};
use tracing::{info, warn};
use crate::config::{ProviderKind, TranslatorConfig};

pub mod echo;
pub mod rapidapi;

pub use echo::EchoTranslator;
pub use rapidapi::RapidApiTranslator;

/// Builds the translator selected by `config`.
///
/// A missing RapidAPI key is not an error here: the translator is still
/// built and each call soft-fails so the pipeline keeps working untranslated.
pub fn create_translator(config: &TranslatorConfig) -> Result<Arc<dyn Translator>> {
    let translator: Arc<dyn Translator> = match config.provider {
        ProviderKind::RapidApi => {
            if config.usable_api_key().is_none() {
                warn!("RapidAPI key is not configured, titles will stay untranslated");
            }
            Arc::new(RapidApiTranslator::new(config)?)
        }
        ProviderKind::Echo => Arc::new(EchoTranslator),
    };
    info!("Translator initialized (using {})", translator.name());
    Ok(translator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_translator_by_kind() {
        let echo = create_translator(&TranslatorConfig {
            provider: ProviderKind::Echo,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(echo.name(), "echo");

        let rapid = create_translator(&TranslatorConfig::default()).unwrap();
        assert_eq!(rapid.name(), "rapidapi");
    }
}
