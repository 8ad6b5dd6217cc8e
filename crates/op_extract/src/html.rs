use std::path::Path;
use op_core::{Document, Element, Error, Query, Result};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page. Queries are CSS selectors.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::parse(&source))
    }
}

pub struct HtmlElement<'a>(ElementRef<'a>);

impl<'a> HtmlElement<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self(element)
    }
}

fn selector(query: &Query) -> Result<Selector> {
    Selector::parse(query.as_str()).map_err(|e| Error::InvalidQuery {
        query: query.to_string(),
        reason: e.to_string(),
    })
}

impl Document for HtmlDocument {
    fn find(&self, query: &Query) -> Result<Vec<Box<dyn Element + '_>>> {
        let selector = selector(query)?;
        Ok(self
            .html
            .select(&selector)
            .map(|el| Box::new(HtmlElement(el)) as Box<dyn Element + '_>)
            .collect())
    }
}

impl<'a> Element for HtmlElement<'a> {
    fn find_child(&self, query: &Query) -> Result<Box<dyn Element + '_>> {
        let selector = selector(query)?;
        self.0
            .select(&selector)
            .next()
            .map(|el| Box::new(HtmlElement(el)) as Box<dyn Element + '_>)
            .ok_or_else(|| Error::ElementNotFound(query.to_string()))
    }

    fn text(&self) -> String {
        self.0.text().collect::<String>()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }
}
