//! Configuration management for waypoint.
//!
//! Parses `waypoint.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Relative paths in
//! the file resolve against the config file's directory, so a project can
//! be built from anywhere.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "waypoint.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config; paths are taken as typed, relative to the caller's working
/// directory.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site manifest path.
    pub content: Option<PathBuf>,
    /// Override the template directory.
    pub templates_dir: Option<PathBuf>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the contributors file path.
    pub contributors: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    content: Option<String>,
    templates_dir: Option<String>,
    output_dir: Option<String>,
    contributors: Option<String>,
}

/// Resolved build configuration with usable paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Site manifest (JSON) describing the content to publish.
    pub content: PathBuf,
    /// Directory holding the four page templates.
    pub templates_dir: PathBuf,
    /// Output root for the generated site.
    pub output_dir: PathBuf,
    /// Contributor profiles file (TOML).
    pub contributors: PathBuf,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `waypoint.toml` in the current directory and parents,
    /// falling back to defaults relative to the working directory.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content) = &settings.content {
            self.build_resolved.content.clone_from(content);
        }
        if let Some(templates_dir) = &settings.templates_dir {
            self.build_resolved.templates_dir.clone_from(templates_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(contributors) = &settings.contributors {
            self.build_resolved.contributors.clone_from(contributors);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                content: base.join("site.json"),
                templates_dir: base.join("templates"),
                output_dir: base.join("build"),
                contributors: base.join("contributors.toml"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.build_resolved = BuildConfig {
            content: resolve(self.build.content.as_deref(), "site.json"),
            templates_dir: resolve(self.build.templates_dir.as_deref(), "templates"),
            output_dir: resolve(self.build.output_dir.as_deref(), "build"),
            contributors: resolve(self.build.contributors.as_deref(), "contributors.toml"),
        };
    }
}
