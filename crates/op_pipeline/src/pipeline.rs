use std::future::Future;
use std::sync::Arc;
use futures::stream::{self, StreamExt};
use op_analysis::{analyze_frequency, repeated_words, WordFrequency, WordFrequencyStats};
use op_core::{ArticleRecord, Document, Element, Error, Result};
use op_extract::ContentExtractor;
use op_translate::{CacheStats, TranslationCache};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use crate::config::PipelineConfig;

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub records: Vec<ArticleRecord>,
    pub stats: WordFrequencyStats,
    pub top_words: Vec<WordFrequency>,
    pub repeated_words: Vec<WordFrequency>,
    /// Cache counters after this run
    pub cache_stats: CacheStats,
    /// True when the run was cut short; `records` holds what was finished
    pub cancelled: bool,
}

impl PipelineReport {
    pub fn into_parts(self) -> (Vec<ArticleRecord>, WordFrequencyStats) {
        (self.records, self.stats)
    }
}

/// Extract, translate titles, analyze.
///
/// The only state kept between runs is the translation cache, which callers
/// may share across pipelines or create per run.
pub struct Pipeline {
    extractor: ContentExtractor,
    cache: Arc<TranslationCache>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(extractor: ContentExtractor, cache: Arc<TranslationCache>, config: PipelineConfig) -> Self {
        Self {
            extractor,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extracts records from a document, retrying once with the profile's
    /// broader container query when the primary one matches nothing.
    pub fn extract(
        &self,
        document: &dyn Document,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<ArticleRecord>> {
        let profile = self.extractor.profile();
        match self.extractor.extract_from_document(document, count, cancel) {
            Err(Error::ExtractionEmpty { query }) if profile.has_fallback_container() => {
                warn!(
                    %query,
                    fallback = %profile.fallback_container,
                    "Article items not found with default locator, retrying with broader query"
                );
                let elements = self.extractor.candidates(document, &profile.fallback_container)?;
                Ok(self.extractor.extract_top_until(&elements, count, cancel))
            }
            other => other,
        }
    }

    /// Runs the whole pipeline over already enumerated candidates.
    ///
    /// Extraction happens before the future is returned, so the future does
    /// not borrow the elements.
    pub fn run<'a>(
        &'a self,
        elements: &[Box<dyn Element + '_>],
        count: usize,
        cancel: &'a CancellationToken,
    ) -> impl Future<Output = PipelineReport> + Send + 'a {
        let records = self.extractor.extract_top_until(elements, count, cancel);
        self.process(records, cancel)
    }

    /// Runs the whole pipeline over a document, with container fallback.
    pub fn run_document<'a>(
        &'a self,
        document: &dyn Document,
        count: usize,
        cancel: &'a CancellationToken,
    ) -> impl Future<Output = Result<PipelineReport>> + Send + 'a {
        let extracted = self.extract(document, count, cancel);
        async move { Ok(self.process(extracted?, cancel).await) }
    }

    /// Translates titles and analyzes word frequencies of the results.
    pub async fn process(&self, mut records: Vec<ArticleRecord>, cancel: &CancellationToken) -> PipelineReport {
        let completed = self.translate_titles(&mut records, cancel).await;
        let cancelled = completed < records.len() || cancel.is_cancelled();

        let text = records
            .iter()
            .map(ArticleRecord::display_title)
            .collect::<Vec<_>>()
            .join(" ");

        let mut top_words = analyze_frequency(&text);
        let stats = WordFrequencyStats::from_frequencies(&top_words);
        top_words.truncate(self.config.top_n);
        let repeated_words = repeated_words(&text, self.config.repeat_threshold);

        info!(records = records.len(), %stats, cancelled, "Pipeline finished");

        PipelineReport {
            records,
            stats,
            top_words,
            repeated_words,
            cache_stats: self.cache.stats(),
            cancelled,
        }
    }

    /// Fills in translated titles, in record order with bounded concurrency.
    /// Returns how many records got a translation before cancellation.
    pub async fn translate_titles(&self, records: &mut [ArticleRecord], cancel: &CancellationToken) -> usize {
        let titles: Vec<String> = records.iter().map(|r| r.title().to_string()).collect();
        let from = &self.config.from;
        let to = &self.config.to;

        let translations: Vec<Option<String>> = stream::iter(titles)
            .map(|title| async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    translated = self.cache.translate(&title, from, to) => Some(translated),
                }
            })
            .buffered(self.config.max_concurrent_translations.max(1))
            .collect()
            .await;

        let mut completed = 0;
        for (record, translated) in records.iter_mut().zip(translations) {
            if let Some(translated) = translated {
                info!("Translated header: {}", translated);
                record.set_translated_title(translated);
                completed += 1;
            }
        }
        if completed < records.len() {
            warn!(completed, total = records.len(), "Translation cancelled");
        }
        completed
    }
}
