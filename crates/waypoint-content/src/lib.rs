//! Content model for the waypoint site generator.
//!
//! A site is a collection of [`LearningPath`]s, each an ordered list of
//! [`Topic`]s grouping ordered [`Guide`]s, plus verbatim [`TopLevelFile`]s
//! and opaque navigation data ([`RootCards`], [`GuideIndexEntry`]).
//!
//! These types carry no behavior beyond (de)serialization. Construction is
//! the caller's business: content arrives fully structured, typically as a
//! JSON [`SiteManifest`], and flows through the writer pipeline unchanged.

mod manifest;
mod model;

pub use manifest::SiteManifest;
pub use model::{
    Guide, GuideAttributes, GuideIndex, GuideIndexEntry, LearningPath, RootCards, Topic,
    TopLevelFile,
};
