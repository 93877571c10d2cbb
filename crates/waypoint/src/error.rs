//! CLI error types.

use waypoint_config::ConfigError;
use waypoint_contributors::ContributorError;
use waypoint_storage::StorageError;
use waypoint_templates::TemplateError;
use waypoint_writer::WriteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Contributor(#[from] ContributorError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Write(#[from] WriteError),
}
