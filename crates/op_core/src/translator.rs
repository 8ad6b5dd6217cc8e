use async_trait::async_trait;
use crate::{LanguageCode, ProviderError};

#[async_trait]
pub trait Translator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Translate `text` from one language to another
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> std::result::Result<String, ProviderError>;
}
