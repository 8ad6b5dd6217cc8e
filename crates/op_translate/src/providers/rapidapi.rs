use std::fmt;
use async_trait::async_trait;
use op_core::{Error, LanguageCode, ProviderError, Result, Translator};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use crate::config::TranslatorConfig;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    from: &'a str,
    to: &'a str,
    text: &'a str,
}

/// Rapid Translate Multi Traduction over HTTP.
pub struct RapidApiTranslator {
    client: Client,
    api_key: Option<String>,
    api_host: String,
    endpoint: String,
}

impl RapidApiTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::InvalidConfiguration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: config.usable_api_key().map(str::to_string),
            api_host: config.api_host.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

impl fmt::Debug for RapidApiTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RapidApiTranslator")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_host", &self.api_host)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl Translator for RapidApiTranslator {
    fn name(&self) -> &str {
        "rapidapi"
    }

    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> std::result::Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::InvalidConfiguration("RapidAPI key is not configured".to_string())
        })?;

        let request = TranslateRequest {
            from: from.as_str(),
            to: to.as_str(),
            text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", self.api_host.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "RapidAPI returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(%body, "RapidAPI response");
        parse_response_body(&body)
    }
}

/// Interprets a successful response body.
///
/// The service answers with a JSON string literal, a JSON array of strings,
/// or plain text. A JSON object carrying `message` or `error` is a failure.
pub fn parse_response_body(body: &str) -> std::result::Result<String, ProviderError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ProviderError::Decode("empty response body".to_string()));
    }

    let translated = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => text,
        Ok(Value::Array(items)) => {
            let parts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            parts
                .ok_or_else(|| ProviderError::Decode(format!("unexpected array: {}", body)))?
                .join(" ")
        }
        Ok(Value::Object(map)) => {
            let reason = map
                .get("message")
                .or_else(|| map.get("error"))
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));
            return Err(match reason {
                Some(reason) => ProviderError::Api(reason),
                None => ProviderError::Decode(format!("unexpected object: {}", body)),
            });
        }
        Ok(_) | Err(_) => body.to_string(),
    };

    if translated.trim().is_empty() {
        return Err(ProviderError::Decode("empty translation".to_string()));
    }
    Ok(translated)
}
