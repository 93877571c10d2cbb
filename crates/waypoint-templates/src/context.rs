//! Render-context types for the page templates.

use serde::Serialize;

use waypoint_content::{Guide, LearningPath, Topic};
use waypoint_contributors::Contributor;

/// Context for the `devsite` template, the chrome wrapped around every
/// templated page.
#[derive(Debug, Serialize)]
pub struct PageChrome<'a> {
    /// Page `<title>`.
    pub title: &'a str,
    pub meta: PageMeta<'a>,
    /// Pre-rendered inner HTML; templates insert it with `{{ body|safe }}`.
    pub body: &'a str,
}

/// Head metadata for the `devsite` template.
#[derive(Debug, Serialize)]
pub struct PageMeta<'a> {
    pub description: &'a str,
}

/// Context for the `guide` template.
///
/// The guide's own fields are flattened to the top level, so templates see
/// `{{ title }}`, `{{ attributes.description }}` and any extra attributes
/// directly, alongside the rendered body and the surrounding structure.
#[derive(Debug, Serialize)]
pub struct GuideContext<'a> {
    /// Guide body, already rendered from markdown to HTML.
    pub main: &'a str,
    /// The full learning path the guide belongs to.
    pub learning_path: &'a LearningPath,
    /// The topic grouping this guide.
    pub topic: &'a Topic,
    /// Resolved author profile.
    pub author: &'a Contributor,
    #[serde(flatten)]
    pub guide: &'a Guide,
}
