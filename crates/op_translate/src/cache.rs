//! Deduplicating translation cache.
//!
//! Entries are keyed by `(from, to, text)` and live until [`TranslationCache::clear`].
//! Only successful translations are stored: a provider failure returns the
//! original text and the next lookup for the same key asks the provider again.
//!
//! Concurrent misses for one key are coalesced. The first caller becomes the
//! leader and talks to the provider; later callers wait on a watch channel
//! for the leader's outcome. If the leader is dropped before finishing, its
//! guard clears the in-flight slot and a waiter takes over.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use futures::future::join_all;
use op_core::{LanguageCode, ProviderError, Result, Translator};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use crate::config::{TranslatorConfig, DEFAULT_TIMEOUT_SECS};
use crate::providers::create_translator;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    from: LanguageCode,
    to: LanguageCode,
    text: String,
}

#[derive(Debug, Clone)]
enum FlightOutcome {
    Translated(String),
    Failed,
}

type FlightReceiver = watch::Receiver<Option<FlightOutcome>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from stored entries
    pub hits: u64,
    /// Lookups that had to go to the provider themselves
    pub misses: u64,
    pub provider_calls: u64,
    /// Provider calls that failed or timed out
    pub failures: u64,
    /// Lookups that waited on another caller's in-flight request
    pub coalesced: u64,
    pub entries: usize,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, String>,
    in_flight: HashMap<CacheKey, FlightReceiver>,
    stats: CacheStats,
}

enum Role {
    Leader(watch::Sender<Option<FlightOutcome>>),
    Follower(FlightReceiver),
}

pub struct TranslationCache {
    translator: Arc<dyn Translator>,
    timeout: Duration,
    state: Mutex<CacheState>,
}

impl TranslationCache {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        Ok(Self::new(create_translator(config)?).with_timeout(config.timeout()))
    }

    /// Upper bound for a single provider call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Translates `text`, falling back to `text` itself when the provider fails.
    pub async fn translate(&self, text: &str, from: &LanguageCode, to: &LanguageCode) -> String {
        if text.is_empty() {
            return String::new();
        }

        let key = CacheKey {
            from: from.clone(),
            to: to.clone(),
            text: text.to_string(),
        };

        loop {
            let role = {
                let mut state = self.lock();
                if let Some(cached) = state.entries.get(&key).cloned() {
                    state.stats.hits += 1;
                    debug!("Translation found in cache: {}", text);
                    return cached;
                }
                match state.in_flight.get(&key).cloned() {
                    Some(receiver) => {
                        state.stats.coalesced += 1;
                        Role::Follower(receiver)
                    }
                    None => {
                        state.stats.misses += 1;
                        let (sender, receiver) = watch::channel(None);
                        state.in_flight.insert(key.clone(), receiver);
                        Role::Leader(sender)
                    }
                }
            };

            match role {
                Role::Leader(sender) => return self.lead(key, sender).await,
                Role::Follower(mut receiver) => {
                    let outcome = match receiver.wait_for(Option::is_some).await {
                        Ok(outcome) => (*outcome).clone(),
                        Err(_) => None,
                    };
                    match outcome {
                        Some(FlightOutcome::Translated(translated)) => return translated,
                        Some(FlightOutcome::Failed) => return key.text,
                        // Leader went away without an answer, try again
                        None => debug!("In-flight translation abandoned, retrying: {}", text),
                    }
                }
            }
        }
    }

    async fn lead(&self, key: CacheKey, sender: watch::Sender<Option<FlightOutcome>>) -> String {
        let mut guard = FlightGuard {
            state: &self.state,
            key: Some(key.clone()),
        };

        let result = self.call_provider(&key).await;

        let mut state = self.lock();
        state.in_flight.remove(&key);
        guard.disarm();

        match result {
            Ok(translated) => {
                state.entries.insert(key, translated.clone());
                sender.send_replace(Some(FlightOutcome::Translated(translated.clone())));
                translated
            }
            Err(_) => {
                state.stats.failures += 1;
                sender.send_replace(Some(FlightOutcome::Failed));
                key.text
            }
        }
    }

    async fn call_provider(&self, key: &CacheKey) -> std::result::Result<String, ProviderError> {
        self.lock().stats.provider_calls += 1;

        let call = self.translator.translate(&key.text, &key.from, &key.to);
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        match &result {
            Ok(translated) => info!("Translated: '{}' -> '{}'", key.text, translated),
            Err(e) => warn!(
                translator = self.translator.name(),
                error = %e,
                "Translation failed, returning original text: {}",
                key.text
            ),
        }
        result
    }

    /// Translates every value independently. The result has the same keys.
    pub async fn translate_multiple<K>(
        &self,
        texts: &HashMap<K, String>,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> HashMap<K, String>
    where
        K: Eq + Hash + Clone,
    {
        let lookups = texts.iter().map(|(key, text)| async move {
            (key.clone(), self.translate(text, from, to).await)
        });
        join_all(lookups).await.into_iter().collect()
    }

    /// Drops every stored translation. Requests already in flight still
    /// store their result when they finish.
    pub fn clear(&self) {
        self.lock().entries.clear();
        info!("Translation cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            ..state.stats
        }
    }
}

/// Frees the in-flight slot if the leading request is dropped midway.
struct FlightGuard<'a> {
    state: &'a Mutex<CacheState>,
    key: Option<CacheKey>,
}

impl FlightGuard<'_> {
    fn disarm(&mut self) {
        self.key = None;
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.in_flight.remove(&key);
        }
    }
}
