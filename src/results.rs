use serde::{Deserialize, Serialize};

/// Metadata scraped from the target page
///
/// Every field is plain text and defaults to empty when the page could not be
/// fetched or the corresponding tag is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Contents of the `<title>` element, trimmed
    pub title: String,

    /// `og:description`, or the standard `description` meta tag
    pub description: String,

    /// `og:image` URL
    pub image: String,
}

impl PageMeta {
    /// Create a new page metadata record
    pub fn new(title: String, description: String, image: String) -> Self {
        Self {
            title,
            description,
            image,
        }
    }

    /// Returns true when nothing could be extracted
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.is_empty()
    }
}
