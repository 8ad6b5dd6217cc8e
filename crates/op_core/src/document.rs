use crate::{Query, Result};

/// A handle to one element of a loaded document.
pub trait Element {
    /// First descendant matching `query`; fails when there is none.
    fn find_child(&self, query: &Query) -> Result<Box<dyn Element + '_>>;

    /// Concatenated text content.
    fn text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
}

/// Read-only access to a loaded document.
pub trait Document {
    /// All elements matching `query`, in document order.
    fn find(&self, query: &Query) -> Result<Vec<Box<dyn Element + '_>>>;
}
