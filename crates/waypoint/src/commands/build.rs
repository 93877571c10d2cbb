//! `waypoint build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde_json::json;

use waypoint_config::{CliSettings, Config};
use waypoint_content::{GuideIndexEntry, LearningPath, SiteManifest};
use waypoint_contributors::{ContributorResolver, TomlContributors};
use waypoint_storage::{FsStorage, Storage};
use waypoint_templates::TemplateStore;
use waypoint_writer::PageWriter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Site manifest (JSON) describing the content to publish (overrides config).
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory holding the page templates (overrides config).
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Contributor profiles file (overrides config).
    #[arg(long)]
    contributors: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover waypoint.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content: self.content.clone(),
            templates_dir: self.templates_dir.clone(),
            output_dir: self.output_dir.clone(),
            contributors: self.contributors.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let build = config.build_resolved;

        output.info(&format!("Content: {}", build.content.display()));
        output.info(&format!("Output: {}", build.output_dir.display()));

        let manifest_text = std::fs::read_to_string(&build.content)?;
        let manifest = SiteManifest::from_json(&manifest_text)?;

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new());
        let templates = Arc::new(TemplateStore::load(&build.templates_dir, storage.as_ref())?);
        let contributors = TomlContributors::load(&build.contributors)?;
        output.info(&format!("Contributors: {}", contributors.len()));
        let contributors: Arc<dyn ContributorResolver> = Arc::new(contributors);

        storage.create_dir_all(&build.output_dir).await?;

        let writer = PageWriter::new(storage, templates, contributors);

        for file in &manifest.top_level_files {
            writer.write_top_level_file(&build.output_dir, file).await?;
        }
        for path in &manifest.paths {
            writer.write_learning_path(&build.output_dir, path).await?;
        }
        match &manifest.root_cards {
            Some(cards) => writer.write_root_cards(&build.output_dir, cards).await?,
            None => output.info("No root cards in manifest, skipping _root-cards.html"),
        }

        let entries = guide_index_entries(&manifest.paths);
        writer.write_guide_index(&build.output_dir, &entries).await?;

        output.success(&format!(
            "Site built successfully to {} ({} paths, {} guides)",
            build.output_dir.display(),
            manifest.paths.len(),
            manifest.guide_count(),
        ));
        Ok(())
    }
}

/// Aggregate the site-wide guide index across all learning paths.
///
/// Entries keep manifest order (paths, then topics, then guides) and carry
/// the guide's metadata plus its location: learning path slug, topic title
/// and the canonical page URL. Extra guide attributes pass through.
fn guide_index_entries(paths: &[LearningPath]) -> Vec<GuideIndexEntry> {
    let mut entries = Vec::new();
    for path in paths {
        for topic in &path.topics {
            for guide in &topic.guides {
                let mut entry = serde_json::Map::new();
                entry.insert("name".to_owned(), json!(guide.name));
                entry.insert("title".to_owned(), json!(guide.title));
                entry.insert(
                    "description".to_owned(),
                    json!(guide.attributes.description),
                );
                entry.insert("author".to_owned(), json!(guide.attributes.author));
                for (key, value) in &guide.attributes.extra {
                    entry.insert(key.clone(), value.clone());
                }
                entry.insert("path".to_owned(), json!(path.name));
                entry.insert("topic".to_owned(), json!(topic.title));
                entry.insert(
                    "url".to_owned(),
                    json!(format!("/{}/{}/", path.name, guide.name)),
                );
                entries.push(GuideIndexEntry::Object(entry));
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use waypoint_content::{Guide, GuideAttributes, Topic};

    use super::*;

    fn guide(name: &str) -> Guide {
        let mut extra = serde_json::Map::new();
        extra.insert("difficulty".to_owned(), json!("beginner"));
        Guide {
            name: name.to_owned(),
            title: format!("Guide {name}"),
            body: String::new(),
            attributes: GuideAttributes {
                description: format!("About {name}"),
                author: "mira".to_owned(),
                extra,
            },
        }
    }

    #[test]
    fn test_index_entries_keep_manifest_order() {
        let paths = vec![
            LearningPath {
                name: "android".to_owned(),
                title: "Android".to_owned(),
                description: String::new(),
                topics: vec![
                    Topic {
                        title: "Basics".to_owned(),
                        guides: vec![guide("setup"), guide("first-app")],
                    },
                    Topic {
                        title: "Advanced".to_owned(),
                        guides: vec![guide("profiling")],
                    },
                ],
            },
            LearningPath {
                name: "web".to_owned(),
                title: "Web".to_owned(),
                description: String::new(),
                topics: vec![Topic {
                    title: "Basics".to_owned(),
                    guides: vec![guide("css")],
                }],
            },
        ];

        let entries = guide_index_entries(&paths);

        let names: Vec<&str> = entries
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["setup", "first-app", "profiling", "css"]);
    }

    #[test]
    fn test_index_entry_shape() {
        let paths = vec![LearningPath {
            name: "web".to_owned(),
            title: "Web".to_owned(),
            description: String::new(),
            topics: vec![Topic {
                title: "Basics".to_owned(),
                guides: vec![guide("css")],
            }],
        }];

        let entries = guide_index_entries(&paths);

        assert_eq!(
            entries[0],
            json!({
                "name": "css",
                "title": "Guide css",
                "description": "About css",
                "author": "mira",
                "difficulty": "beginner",
                "path": "web",
                "topic": "Basics",
                "url": "/web/css/",
            })
        );
    }

    #[test]
    fn test_empty_paths_yield_empty_index() {
        assert!(guide_index_entries(&[]).is_empty());
    }
}
