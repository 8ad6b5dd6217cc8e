use async_trait::async_trait;
use op_core::{LanguageCode, ProviderError, Translator};

/// Returns every text unchanged. Used offline and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    fn name(&self) -> &str {
        "echo"
    }

    async fn translate(
        &self,
        text: &str,
        _from: &LanguageCode,
        _to: &LanguageCode,
    ) -> Result<String, ProviderError> {
        Ok(text.to_string())
    }
}
