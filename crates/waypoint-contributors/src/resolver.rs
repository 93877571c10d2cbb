//! Resolver trait, contributor profile and the TOML-backed implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A resolved author profile, handed to the guide template as `author`.
///
/// Only `name` is required; the optional links render conditionally in
/// templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Errors from contributor loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum ContributorError {
    /// The author identifier has no profile in the configuration.
    #[error("Unknown contributor: {0}")]
    Unknown(String),

    #[error("Failed to read contributors file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in contributors file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Maps author identifiers to contributor profiles.
///
/// Resolution is async because implementations may consult external
/// systems; the TOML resolver answers from memory. A failed resolution
/// aborts the enclosing guide write.
#[async_trait]
pub trait ContributorResolver: Send + Sync {
    /// Resolve an author identifier to a profile.
    async fn resolve(&self, author: &str) -> Result<Contributor, ContributorError>;
}

/// Contributor profiles loaded from a TOML file, one table per identifier.
#[derive(Clone, Debug, Default)]
pub struct TomlContributors {
    profiles: HashMap<String, Contributor>,
}

impl TomlContributors {
    /// Load profiles from the file at `path`.
    ///
    /// Loading happens once at startup; a missing or malformed file fails
    /// the whole run rather than individual guides.
    pub fn load(path: &Path) -> Result<Self, ContributorError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContributorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profiles = toml::from_str(&text).map_err(|source| ContributorError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { profiles })
    }

    /// Parse profiles from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            profiles: toml::from_str(text)?,
        })
    }

    /// Number of known contributors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ContributorResolver for TomlContributors {
    async fn resolve(&self, author: &str) -> Result<Contributor, ContributorError> {
        self.profiles
            .get(author)
            .cloned()
            .ok_or_else(|| ContributorError::Unknown(author.to_owned()))
    }
}
