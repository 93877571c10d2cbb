//! Site manifest: the JSON document callers hand to the generator.

use serde::{Deserialize, Serialize};

use crate::model::{LearningPath, RootCards, TopLevelFile};

/// Fully structured site content, as supplied by the caller.
///
/// Every section is optional; an empty manifest is valid and produces an
/// output tree containing only the guide index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteManifest {
    /// Files copied verbatim to the output root.
    pub top_level_files: Vec<TopLevelFile>,
    /// Learning paths in display order.
    pub paths: Vec<LearningPath>,
    /// Context for the root navigation fragment, if the site has one.
    pub root_cards: Option<RootCards>,
}

impl SiteManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Total number of guides across all paths and topics.
    #[must_use]
    pub fn guide_count(&self) -> usize {
        self.paths
            .iter()
            .flat_map(|path| &path.topics)
            .map(|topic| topic.guides.len())
            .sum()
    }
}
