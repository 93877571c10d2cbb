//! Mock resolver for testing.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::resolver::{Contributor, ContributorError, ContributorResolver};

/// Fixed in-memory contributor set for testing.
///
/// Built once with the builder methods; identifiers not registered resolve
/// to [`ContributorError::Unknown`], same as the TOML resolver.
#[derive(Debug, Default)]
pub struct MockContributors {
    profiles: HashMap<String, Contributor>,
}

impl MockContributors {
    /// Create an empty resolver; every lookup fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a full profile under `id`.
    #[must_use]
    pub fn with_contributor(mut self, id: impl Into<String>, contributor: Contributor) -> Self {
        self.profiles.insert(id.into(), contributor);
        self
    }

    /// Register a minimal profile (name only) under `id`.
    #[must_use]
    pub fn with_name(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let contributor = Contributor {
            name: name.into(),
            ..Contributor::default()
        };
        self.with_contributor(id, contributor)
    }
}

#[async_trait]
impl ContributorResolver for MockContributors {
    async fn resolve(&self, author: &str) -> Result<Contributor, ContributorError> {
        self.profiles
            .get(author)
            .cloned()
            .ok_or_else(|| ContributorError::Unknown(author.to_owned()))
    }
}
