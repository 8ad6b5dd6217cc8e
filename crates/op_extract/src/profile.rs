use op_core::Query;
use crate::locator::{Field, LocatorChain};

/// Where to find candidate articles on a page and how to read their fields.
#[derive(Debug, Clone)]
pub struct ExtractionProfile {
    pub name: &'static str,
    /// Site-specific query enumerating the candidate elements
    pub container: Query,
    /// Broader query to retry with when `container` matches nothing
    pub fallback_container: Query,
    pub title: LocatorChain,
    pub content: LocatorChain,
    pub image: LocatorChain,
    pub link: LocatorChain,
}

impl ExtractionProfile {
    /// Newspaper opinion section layout, with generic fallbacks per field.
    pub fn opinion() -> Self {
        Self {
            name: "opinion",
            container: Query::new("article[class*='c c-o']"),
            fallback_container: Query::new("article"),
            title: LocatorChain::new(Field::Title)
                .text("h2.c_t, h2[class*='c_t']")
                .text("h2"),
            content: LocatorChain::new(Field::Content)
                .text("p.c_d, p[class*='c_d']")
                .text("p"),
            image: LocatorChain::new(Field::Image)
                .image("img.c_m_e, img[class*='c_m_e']")
                .image("img"),
            link: LocatorChain::new(Field::Link)
                .attribute("h2 a", "href")
                .attribute("a", "href"),
        }
    }

    /// Plain `<article>` markup.
    pub fn generic() -> Self {
        Self {
            name: "generic",
            container: Query::new("article"),
            fallback_container: Query::new("article"),
            title: LocatorChain::new(Field::Title).text("h1").text("h2").text("h3"),
            content: LocatorChain::new(Field::Content).text("p"),
            image: LocatorChain::new(Field::Image).image("img"),
            link: LocatorChain::new(Field::Link).attribute("a", "href"),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "opinion" => Some(Self::opinion()),
            "generic" => Some(Self::generic()),
            _ => None,
        }
    }

    /// False when there is no broader query to retry with.
    pub fn has_fallback_container(&self) -> bool {
        self.fallback_container != self.container
    }
}

impl Default for ExtractionProfile {
    fn default() -> Self {
        Self::opinion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_by_name() {
        assert_eq!(ExtractionProfile::by_name("Opinion").unwrap().name, "opinion");
        assert_eq!(ExtractionProfile::by_name("generic").unwrap().name, "generic");
        assert!(ExtractionProfile::by_name("sports").is_none());
    }

    #[test]
    fn test_fallback_container() {
        assert!(ExtractionProfile::opinion().has_fallback_container());
        assert!(!ExtractionProfile::generic().has_fallback_container());
    }

    #[test]
    fn test_every_field_has_primary_and_fallback() {
        let profile = ExtractionProfile::opinion();
        for chain in [&profile.title, &profile.content, &profile.image, &profile.link] {
            assert_eq!(chain.len(), 2, "{} chain", chain.field());
        }
    }
}
