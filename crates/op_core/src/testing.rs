//! In-memory `Document`/`Element` implementations for tests.
//!
//! Queries are matched by their exact text, so a test states which query
//! yields which element instead of relying on a real selector engine.

use std::collections::HashMap;
use crate::{Document, Element, Error, Query, Result};

#[derive(Debug, Clone, Default)]
pub struct MockElement {
    text: String,
    attributes: HashMap<String, String>,
    children: Vec<(String, MockElement)>,
}

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Registers `child` as the answer to `query`.
    pub fn with_child(mut self, query: impl Into<String>, child: MockElement) -> Self {
        self.children.push((query.into(), child));
        self
    }

    pub fn boxed(self) -> Box<dyn Element> {
        Box::new(self)
    }
}

impl Element for MockElement {
    fn find_child(&self, query: &Query) -> Result<Box<dyn Element + '_>> {
        self.children
            .iter()
            .find(|(q, _)| q == query.as_str())
            .map(|(_, child)| Box::new(child.clone()) as Box<dyn Element>)
            .ok_or_else(|| Error::ElementNotFound(query.to_string()))
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockDocument {
    results: HashMap<String, Vec<MockElement>>,
}

impl MockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(mut self, query: impl Into<String>, elements: Vec<MockElement>) -> Self {
        self.results.insert(query.into(), elements);
        self
    }
}

impl Document for MockDocument {
    fn find(&self, query: &Query) -> Result<Vec<Box<dyn Element + '_>>> {
        Ok(self
            .results
            .get(query.as_str())
            .map(|elements| {
                elements
                    .iter()
                    .map(|e| Box::new(e.clone()) as Box<dyn Element>)
                    .collect()
            })
            .unwrap_or_default())
    }
}
