//! Core content types.
//!
//! Ordering is significant everywhere: topics and guides are rendered and
//! written in the order they appear here, and that order is preserved
//! through (de)serialization.

use serde::{Deserialize, Serialize};

/// A file written verbatim to the output root, without templating.
///
/// Used for robots.txt, redirect stubs and similar static artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelFile {
    /// Output filename, e.g. `robots.txt`.
    pub name: String,
    /// Raw file contents, written as-is.
    pub body: String,
}

/// An ordered sequence of topics published under a single URL prefix.
///
/// `name` serves double duty: it is the filename stem of the overview page
/// (`<name>.html`) and the subdirectory holding the path's guide pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Filesystem-safe slug.
    pub name: String,
    /// Human-readable title, also the overview page's `<title>`.
    pub title: String,
    /// Summary used for the overview page's meta description.
    pub description: String,
    /// Topics in display order.
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A titled group of guides within a learning path.
///
/// Topics have no pages of their own; they exist to structure the path
/// overview and to give guide templates their section context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    /// Guides in display order.
    #[serde(default)]
    pub guides: Vec<Guide>,
}

/// A single markdown document published as one page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Slug; becomes a subdirectory of the learning path directory.
    pub name: String,
    /// Page title.
    pub title: String,
    /// Markdown source for the guide body.
    pub body: String,
    pub attributes: GuideAttributes,
}

/// Guide front matter.
///
/// `description` and `author` are required by the pipeline; everything else
/// is passed through to the guide template unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideAttributes {
    /// Summary used for the guide page's meta description.
    pub description: String,
    /// Author identifier, resolved through the contributor configuration.
    pub author: String,
    /// Remaining attributes, available to templates as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Opaque data for the root navigation fragment.
///
/// The generator never inspects this; it is handed to the `root-cards`
/// template as the render context.
pub type RootCards = serde_json::Value;

/// One pass-through record in the site-wide guide index.
pub type GuideIndexEntry = serde_json::Value;

/// Wire shape of the guide index document: `{"guides": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideIndex {
    pub guides: Vec<GuideIndexEntry>,
}
