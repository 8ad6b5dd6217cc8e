use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_HOST: &str = "rapid-translate-multi-traduction.p.rapidapi.com";
pub const DEFAULT_ENDPOINT: &str = "https://rapid-translate-multi-traduction.p.rapidapi.com/t";
/// Value shipped in sample `.env` files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your_rapidapi_key_here";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    RapidApi,
    Echo,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rapidapi" => Ok(ProviderKind::RapidApi),
            "echo" | "none" => Ok(ProviderKind::Echo),
            other => Err(format!("Unknown translation provider: {}", other)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::RapidApi => f.write_str("rapidapi"),
            ProviderKind::Echo => f.write_str("echo"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub api_host: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TranslatorConfig {
    /// Reads `RAPIDAPI_KEY`, `RAPIDAPI_HOST`, `TRANSLATION_PROVIDER` and
    /// `TRANSLATION_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get("RAPIDAPI_KEY");
        if let Some(host) = get("RAPIDAPI_HOST") {
            config.api_host = host;
        }
        if let Some(provider) = get("TRANSLATION_PROVIDER") {
            match provider.parse() {
                Ok(kind) => config.provider = kind,
                Err(e) => tracing::warn!("{}, keeping {}", e, config.provider),
            }
        }
        if let Some(secs) = get("TRANSLATION_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => tracing::warn!("Invalid integer value for TRANSLATION_TIMEOUT_SECS: {}", secs),
            }
        }
        config
    }

    /// Request timeout, clamped to 1..=60 seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }

    /// The configured key, unless it is missing, blank or the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

impl fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_host", &self.api_host)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
