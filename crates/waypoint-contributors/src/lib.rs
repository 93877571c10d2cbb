//! Contributor resolution for waypoint guide authors.
//!
//! Guides name their author by identifier; the writer resolves that
//! identifier to a [`Contributor`] profile through the
//! [`ContributorResolver`] trait before rendering the guide template.
//! Resolution happens per guide, inside the write, so a broken identifier
//! fails exactly the guide that references it.
//!
//! [`TomlContributors`] is the production resolver, backed by a TOML file
//! with one table per contributor:
//!
//! ```toml
//! [mira]
//! name = "Mira Voss"
//! github = "miravoss"
//! ```

#[cfg(feature = "mock")]
mod mock;
mod resolver;

#[cfg(feature = "mock")]
pub use mock::MockContributors;
pub use resolver::{Contributor, ContributorError, ContributorResolver, TomlContributors};
