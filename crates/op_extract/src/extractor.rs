use op_core::{ArticleRecord, Document, Element, Error, Query, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::profile::ExtractionProfile;

/// Turns candidate elements into article records using a profile's locator
/// chains. Read-only: it only queries the elements it is given.
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    profile: ExtractionProfile,
}

impl ContentExtractor {
    pub fn new(profile: ExtractionProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ExtractionProfile {
        &self.profile
    }

    /// Enumerates candidates for `query`, signalling `ExtractionEmpty` when
    /// nothing matches.
    pub fn candidates<'d>(
        &self,
        document: &'d dyn Document,
        query: &Query,
    ) -> Result<Vec<Box<dyn Element + 'd>>> {
        let elements = document.find(query)?;
        if elements.is_empty() {
            return Err(Error::ExtractionEmpty {
                query: query.to_string(),
            });
        }
        debug!(%query, count = elements.len(), "Found candidate elements");
        Ok(elements)
    }

    /// Extracts up to `count` records from the profile's container query.
    pub fn extract_from_document(
        &self,
        document: &dyn Document,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<ArticleRecord>> {
        let elements = self.candidates(document, &self.profile.container)?;
        Ok(self.extract_top_until(&elements, count, cancel))
    }

    /// Examines the first `min(count, elements.len())` candidates in order and
    /// keeps those with a non-empty title.
    pub fn extract_top(&self, elements: &[Box<dyn Element + '_>], count: usize) -> Vec<ArticleRecord> {
        self.extract_top_until(elements, count, &CancellationToken::new())
    }

    /// Like [`extract_top`](Self::extract_top), but stops early once `cancel`
    /// fires and returns the records accepted so far.
    pub fn extract_top_until(
        &self,
        elements: &[Box<dyn Element + '_>],
        count: usize,
        cancel: &CancellationToken,
    ) -> Vec<ArticleRecord> {
        info!(count, available = elements.len(), profile = self.profile.name, "Extracting top articles");
        let mut records = Vec::new();

        for (i, element) in elements.iter().take(count).enumerate() {
            if cancel.is_cancelled() {
                warn!(examined = i, accepted = records.len(), "Extraction cancelled");
                break;
            }

            match self.extract_record(&**element) {
                Some(record) => {
                    info!("Article {} scraped: {}", i + 1, record.title());
                    records.push(record);
                }
                None => debug!(index = i, "Skipping candidate without a title"),
            }
        }

        records
    }

    /// Reads every field of one candidate. `None` when the title is missing.
    pub fn extract_record(&self, element: &dyn Element) -> Option<ArticleRecord> {
        let title = self.profile.title.resolve(element)?;
        let content = self.profile.content.resolve(element).unwrap_or_default();
        let image_url = self.profile.image.resolve(element).unwrap_or_default();
        let article_url = self.profile.link.resolve(element).unwrap_or_default();

        Some(ArticleRecord::new(title, content, image_url, article_url))
    }
}
