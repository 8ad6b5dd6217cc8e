use serde::{Deserialize, Serialize};
use std::fmt;

/// One scraped item.
///
/// Everything except the translated title is fixed at construction. The
/// translated title starts out absent and can be set exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    title: String,
    content: String,
    image_url: String,
    article_url: String,
    translated_title: Option<String>,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        image_url: impl Into<String>,
        article_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: image_url.into(),
            article_url: article_url.into(),
            translated_title: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Empty or absolute, never protocol-relative.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn article_url(&self) -> &str {
        &self.article_url
    }

    pub fn translated_title(&self) -> Option<&str> {
        self.translated_title.as_deref()
    }

    /// Stores the translated title. Returns `false` and leaves the record
    /// untouched if a translation was already stored.
    pub fn set_translated_title(&mut self, translated: impl Into<String>) -> bool {
        if self.translated_title.is_some() {
            return false;
        }
        self.translated_title = Some(translated.into());
        true
    }

    /// The translated title if present, otherwise the original one.
    pub fn display_title(&self) -> &str {
        self.translated_title().unwrap_or(&self.title)
    }
}

/// ISO 639-1 style language code, e.g. `es` or `en`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn spanish() -> Self {
        Self::new("es")
    }

    pub fn english() -> Self {
        Self::new("en")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
            return Err(format!("Invalid language code: {}", s));
        }
        Ok(Self::new(code))
    }
}

/// A pre-built element query. Its syntax belongs to the document
/// implementation that evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_title_set_once() {
        let mut record = ArticleRecord::new("Hola", "", "", "");
        assert_eq!(record.translated_title(), None);
        assert_eq!(record.display_title(), "Hola");

        assert!(record.set_translated_title("Hello"));
        assert!(!record.set_translated_title("Hi"));
        assert_eq!(record.translated_title(), Some("Hello"));
        assert_eq!(record.display_title(), "Hello");
    }

    #[test]
    fn test_record_fields_are_read_only() {
        let record: ArticleRecord = serde_json::from_str(
            r#"{"title":"Título","content":"Texto","image_url":"https://img","article_url":"https://a","translated_title":null}"#,
        )
        .unwrap();
        assert_eq!(record.title(), "Título");
        assert_eq!(record.content(), "Texto");
        assert_eq!(record.image_url(), "https://img");
        assert_eq!(record.article_url(), "https://a");
        assert_eq!(record, ArticleRecord::new("Título", "Texto", "https://img", "https://a"));
    }

    #[test]
    fn test_language_code_parsing() {
        assert_eq!("ES".parse::<LanguageCode>().unwrap(), LanguageCode::spanish());
        assert_eq!(" en ".parse::<LanguageCode>().unwrap().as_str(), "en");
        assert!("".parse::<LanguageCode>().is_err());
        assert!("e5".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_record_serializes_translated_title() {
        let mut record = ArticleRecord::new("Título", "Texto", "https://img", "https://a");
        record.set_translated_title("Title");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["translated_title"], "Title");
        assert_eq!(json["image_url"], "https://img");
    }
}
