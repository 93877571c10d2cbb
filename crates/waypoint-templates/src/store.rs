//! Template loading, compilation and rendering.

use std::path::Path;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use waypoint_content::{LearningPath, RootCards};
use waypoint_storage::{Storage, StorageError};

use crate::context::{GuideContext, PageChrome};

/// The templates the store loads, each `<name>.html` in the template
/// directory.
const TEMPLATE_NAMES: [&str; 4] = ["path", "devsite", "root-cards", "guide"];

/// Errors from template loading and rendering.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A template source file could not be read.
    #[error("Failed to read template '{name}': {source}")]
    Read {
        name: &'static str,
        #[source]
        source: StorageError,
    },

    /// A template failed to compile.
    #[error("Failed to compile template '{name}': {source}")]
    Compile {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },

    /// A template failed to render.
    #[error("Failed to render template '{name}': {source}")]
    Render {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// The four site templates, compiled once and shared across all renders.
///
/// Rendering borrows `&self`, so a store wrapped in `Arc` can serve
/// concurrent page writes without locking.
#[derive(Debug)]
pub struct TemplateStore {
    env: Environment<'static>,
}

impl TemplateStore {
    /// Load and compile the site templates from `template_dir`.
    ///
    /// All four templates must be present and valid; a missing file or a
    /// syntax error fails the whole load. HTML auto-escaping is enabled
    /// for every template.
    pub fn load(template_dir: &Path, storage: &dyn Storage) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        for name in TEMPLATE_NAMES {
            let path = template_dir.join(format!("{name}.html"));
            let source = storage
                .read_to_string(&path)
                .map_err(|source| TemplateError::Read { name, source })?;
            env.add_template_owned(name.to_owned(), source)
                .map_err(|source| TemplateError::Compile { name, source })?;
        }

        Ok(Self { env })
    }

    /// Render the `path` template: the inner HTML of a path overview page.
    ///
    /// The learning path itself is the render context, so templates address
    /// `{{ title }}`, `{{ description }}` and `{{ topics }}` directly.
    pub fn render_path(&self, path: &LearningPath) -> Result<String, TemplateError> {
        self.render("path", path)
    }

    /// Render the `devsite` template: full page chrome around a body.
    pub fn render_devsite(&self, page: &PageChrome<'_>) -> Result<String, TemplateError> {
        self.render("devsite", page)
    }

    /// Render the `root-cards` template from opaque card data.
    pub fn render_root_cards(&self, cards: &RootCards) -> Result<String, TemplateError> {
        self.render("root-cards", cards)
    }

    /// Render the `guide` template: the inner HTML of a guide page.
    pub fn render_guide(&self, context: &GuideContext<'_>) -> Result<String, TemplateError> {
        self.render("guide", context)
    }

    fn render<S: Serialize>(&self, name: &'static str, context: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|source| TemplateError::Render { name, source })?;
        template
            .render(context)
            .map_err(|source| TemplateError::Render { name, source })
    }
}
