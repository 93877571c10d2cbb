//! Page templates for the waypoint site generator.
//!
//! A [`TemplateStore`] holds the four site templates (`path`, `devsite`,
//! `root-cards`, `guide`), loaded from a template directory and compiled
//! once at startup. A missing or malformed template fails loading; nothing
//! is compiled lazily, so render-time errors are limited to bad data.
//!
//! Variable interpolation is HTML-escaped by default. Pre-rendered HTML
//! (the guide body, the devsite `body` slot) must be inserted with the
//! `safe` filter by the template author.

mod context;
mod store;

pub use context::{GuideContext, PageChrome, PageMeta};
pub use store::{TemplateError, TemplateStore};
