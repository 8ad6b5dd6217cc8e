pub mod extractor;
pub mod html;
pub mod locator;
pub mod profile;

pub use extractor::ContentExtractor;
pub use html::HtmlDocument;
pub use locator::{resolve_image_url, Field, LocatorChain};
pub use profile::ExtractionProfile;

pub mod prelude {
    pub use super::{ContentExtractor, ExtractionProfile, HtmlDocument};
    pub use op_core::{ArticleRecord, Document, Element, Error, Query, Result};
}
