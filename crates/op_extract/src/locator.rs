//! Fallback locator chains.
//!
//! A field is read by trying an ordered list of strategies against the
//! candidate element. Each strategy is a plain function from an element to an
//! optional value; the first non-empty value wins. A strategy that cannot find
//! its child element simply yields `None`, so a missing field never aborts the
//! record it belongs to.

use std::fmt;
use std::sync::Arc;
use op_core::{Element, Query};
use tracing::debug;

/// Attribute used by lazy-loading images for the deferred source.
pub const LAZY_SOURCE_ATTR: &str = "data-src";
/// Responsive image candidate list.
pub const SOURCE_SET_ATTR: &str = "srcset";
pub const SOURCE_ATTR: &str = "src";

pub type Strategy = Arc<dyn Fn(&dyn Element) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Image,
    Link,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Image => "image",
            Field::Link => "link",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct LocatorChain {
    field: Field,
    strategies: Vec<(String, Strategy)>,
}

impl LocatorChain {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Appends an arbitrary strategy.
    pub fn strategy<F>(mut self, label: impl Into<String>, strategy: F) -> Self
    where
        F: Fn(&dyn Element) -> Option<String> + Send + Sync + 'static,
    {
        let strategy: Strategy = Arc::new(strategy);
        self.strategies.push((label.into(), strategy));
        self
    }

    /// Trimmed text of the first child matching `query`.
    pub fn text(self, query: impl Into<Query>) -> Self {
        let query = query.into();
        let label = format!("text({})", query);
        self.strategy(label, move |element| {
            child(element, &query).map(|c| c.text().trim().to_string())
        })
    }

    /// Attribute `name` of the first child matching `query`.
    pub fn attribute(self, query: impl Into<Query>, name: &'static str) -> Self {
        let query = query.into();
        let label = format!("attr({}, {})", query, name);
        self.strategy(label, move |element| {
            child(element, &query).and_then(|c| c.attribute(name)).map(|v| v.trim().to_string())
        })
    }

    /// Resolved image URL of the first child matching `query`.
    pub fn image(self, query: impl Into<Query>) -> Self {
        let query = query.into();
        let label = format!("image({})", query);
        self.strategy(label, move |element| {
            child(element, &query).and_then(|c| resolve_image_url(&*c))
        })
    }

    /// Runs the strategies in order and returns the first non-empty value.
    pub fn resolve(&self, element: &dyn Element) -> Option<String> {
        for (label, strategy) in &self.strategies {
            match strategy(element) {
                Some(value) if !value.is_empty() => return Some(value),
                _ => debug!(field = %self.field, strategy = %label, "Locator strategy found nothing"),
            }
        }
        debug!(field = %self.field, "Field extraction failed, leaving it empty");
        None
    }
}

impl fmt::Debug for LocatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatorChain")
            .field("field", &self.field)
            .field(
                "strategies",
                &self.strategies.iter().map(|(label, _)| label.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn child<'e>(element: &'e dyn Element, query: &Query) -> Option<Box<dyn Element + 'e>> {
    match element.find_child(query) {
        Ok(child) => Some(child),
        Err(e) => {
            debug!(%query, error = %e, "Child lookup failed");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// First URL of a `srcset` value, without its size descriptor.
pub fn first_source_set_candidate(source_set: &str) -> Option<String> {
    source_set
        .split(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
        .map(str::to_string)
}

/// Picks the image URL of an `<img>`-like element.
///
/// Precedence is the lazy-load attribute, then the first `srcset` candidate,
/// then `src`. Protocol-relative URLs get an `https:` scheme; query strings
/// are left alone.
pub fn resolve_image_url(image: &dyn Element) -> Option<String> {
    let url = non_empty(image.attribute(LAZY_SOURCE_ATTR))
        .or_else(|| {
            image
                .attribute(SOURCE_SET_ATTR)
                .and_then(|set| first_source_set_candidate(&set))
        })
        .or_else(|| non_empty(image.attribute(SOURCE_ATTR)))?;

    if url.starts_with("//") {
        Some(format!("https:{}", url))
    } else {
        Some(url)
    }
}
