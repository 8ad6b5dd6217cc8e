pub mod document;
pub mod error;
pub mod translator;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use document::{Document, Element};
pub use error::{Error, ProviderError};
pub use translator::Translator;
pub use types::{ArticleRecord, LanguageCode, Query};

pub type Result<T> = std::result::Result<T, Error>;
