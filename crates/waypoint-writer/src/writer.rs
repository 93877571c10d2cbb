//! The page writer and its operations.

use std::path::Path;
use std::sync::Arc;

use waypoint_content::{Guide, GuideIndex, GuideIndexEntry, LearningPath, RootCards, Topic, TopLevelFile};
use waypoint_contributors::{ContributorError, ContributorResolver};
use waypoint_markdown::MarkdownRenderer;
use waypoint_storage::{Storage, StorageError};
use waypoint_templates::{GuideContext, PageChrome, PageMeta, TemplateError, TemplateStore};

/// Output filename for the root navigation fragment.
pub const ROOT_CARDS_FILE: &str = "_root-cards.html";

/// Output filename for the guide index.
///
/// The contents are JSON; the `.html` extension is a contract with existing
/// consumers, which fetch the document by this exact name.
pub const GUIDE_INDEX_FILE: &str = "_guides-json.html";

/// Errors from page writing.
///
/// Wraps the failures of each collaborator; the writer adds no retry or
/// recovery on top.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Contributor(#[from] ContributorError),

    #[error("Failed to serialize guide index: {0}")]
    Index(#[from] serde_json::Error),
}

/// Renders content items and writes the resulting pages.
///
/// The writer holds its collaborators behind `Arc` and keeps no mutable
/// state, so one instance can serve concurrent writes of independent
/// content items. Within a single operation, effects are sequential: each
/// write completes before the next starts, and the first failure aborts
/// the operation, leaving earlier output in place.
///
/// Output paths are composed from content slugs as given. Distinct inputs
/// that map to the same target path overwrite each other in input order;
/// slug uniqueness is the content pipeline's contract, not enforced here.
pub struct PageWriter {
    storage: Arc<dyn Storage>,
    templates: Arc<TemplateStore>,
    contributors: Arc<dyn ContributorResolver>,
    markdown: MarkdownRenderer,
}

impl PageWriter {
    /// Create a writer from its collaborators.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        templates: Arc<TemplateStore>,
        contributors: Arc<dyn ContributorResolver>,
    ) -> Self {
        Self {
            storage,
            templates,
            contributors,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Write a static file verbatim to `directory/<file.name>`.
    ///
    /// No templating, no markdown; bytes in, bytes out.
    pub async fn write_top_level_file(
        &self,
        directory: &Path,
        file: &TopLevelFile,
    ) -> Result<(), WriteError> {
        let target = directory.join(&file.name);
        self.storage.write_file(&target, file.body.as_bytes()).await?;
        tracing::debug!(path = %target.display(), "Wrote top-level file");
        Ok(())
    }

    /// Write a learning path: its overview page, then every guide.
    ///
    /// Produces `directory/<path.name>.html` (the overview, wrapped in page
    /// chrome) and the directory `directory/<path.name>/` holding one
    /// subdirectory per guide. Guides are written sequentially in content
    /// order, across topic boundaries; the first failure stops the
    /// remainder of the path.
    pub async fn write_learning_path(
        &self,
        directory: &Path,
        path: &LearningPath,
    ) -> Result<(), WriteError> {
        let overview = self.templates.render_path(path)?;
        let page = self.templates.render_devsite(&PageChrome {
            title: &path.title,
            meta: PageMeta {
                description: &path.description,
            },
            body: &overview,
        })?;
        let overview_target = directory.join(format!("{}.html", path.name));
        self.storage
            .write_file(&overview_target, page.as_bytes())
            .await?;
        tracing::debug!(path = %overview_target.display(), "Wrote path overview");

        let content_dir = directory.join(&path.name);
        self.storage.create_dir_all(&content_dir).await?;

        for topic in &path.topics {
            for guide in &topic.guides {
                self.write_single_guide(&content_dir, path, topic, guide).await?;
            }
        }

        Ok(())
    }

    /// Render and write one guide page to `directory/<guide.name>/index.html`.
    ///
    /// The guide body is rendered from markdown, the author identifier is
    /// resolved, and the result is wrapped first in the guide template and
    /// then in the page chrome. The guide directory is created only after
    /// rendering and resolution succeed, so a bad guide leaves no trace.
    async fn write_single_guide(
        &self,
        directory: &Path,
        learning_path: &LearningPath,
        topic: &Topic,
        guide: &Guide,
    ) -> Result<(), WriteError> {
        let guide_dir = directory.join(&guide.name);

        let main = self.markdown.render(&guide.body);
        let author = self.contributors.resolve(&guide.attributes.author).await?;
        let body = self.templates.render_guide(&GuideContext {
            main: &main,
            learning_path,
            topic,
            author: &author,
            guide,
        })?;

        self.storage.create_dir_all(&guide_dir).await?;

        let page = self.templates.render_devsite(&PageChrome {
            title: &guide.title,
            meta: PageMeta {
                description: &guide.attributes.description,
            },
            body: &body,
        })?;
        let target = guide_dir.join("index.html");
        self.storage.write_file(&target, page.as_bytes()).await?;
        tracing::debug!(path = %target.display(), "Wrote guide page");

        Ok(())
    }

    /// Write the root navigation fragment to `directory/_root-cards.html`.
    ///
    /// The fragment is rendered from opaque card data and written bare, with
    /// no page chrome; the site shell includes it into the landing page.
    pub async fn write_root_cards(
        &self,
        directory: &Path,
        cards: &RootCards,
    ) -> Result<(), WriteError> {
        let fragment = self.templates.render_root_cards(cards)?;
        let target = directory.join(ROOT_CARDS_FILE);
        self.storage.write_file(&target, fragment.as_bytes()).await?;
        tracing::debug!(path = %target.display(), "Wrote root cards");
        Ok(())
    }

    /// Write the site-wide guide index to `directory/_guides-json.html`.
    ///
    /// Serializes `{"guides": [...]}` with the entries exactly as given, in
    /// the given order. Aggregating entries across learning paths is the
    /// caller's job.
    pub async fn write_guide_index(
        &self,
        directory: &Path,
        guides: &[GuideIndexEntry],
    ) -> Result<(), WriteError> {
        let document = serde_json::to_string(&GuideIndex {
            guides: guides.to_vec(),
        })?;
        let target = directory.join(GUIDE_INDEX_FILE);
        self.storage.write_file(&target, document.as_bytes()).await?;
        tracing::debug!(path = %target.display(), count = guides.len(), "Wrote guide index");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    use waypoint_content::GuideAttributes;
    use waypoint_contributors::MockContributors;
    use waypoint_storage::{MemStorage, StorageErrorKind};

    use super::*;

    assert_impl_all!(PageWriter: Send, Sync);

    const PATH_TEMPLATE: &str = "<section><h2>{{ title }}</h2><p>{{ description }}</p>{% for topic in topics %}<h3>{{ topic.title }}</h3><ul>{% for guide in topic.guides %}<li><a href=\"/{{ name }}/{{ guide.name }}/\">{{ guide.title }}</a></li>{% endfor %}</ul>{% endfor %}</section>";
    const DEVSITE_TEMPLATE: &str = "<!DOCTYPE html><html><head><title>{{ title }}</title><meta name=\"description\" content=\"{{ meta.description }}\"></head><body>{{ body|safe }}</body></html>";
    const ROOT_CARDS_TEMPLATE: &str = "<div class=\"cards\">{% for card in cards %}<a href=\"{{ card.url }}\">{{ card.title }}</a>{% endfor %}</div>";
    const GUIDE_TEMPLATE: &str = "<article><p class=\"byline\">{{ author.name }}</p><nav>{{ learning_path.title }} :: {{ topic.title }}</nav>{{ main|safe }}</article>";

    fn seeded_storage() -> MemStorage {
        MemStorage::new()
            .with_dir("out")
            .with_file("templates/path.html", PATH_TEMPLATE)
            .with_file("templates/devsite.html", DEVSITE_TEMPLATE)
            .with_file("templates/root-cards.html", ROOT_CARDS_TEMPLATE)
            .with_file("templates/guide.html", GUIDE_TEMPLATE)
    }

    fn build_writer(storage: MemStorage) -> (PageWriter, Arc<MemStorage>) {
        let templates = TemplateStore::load(Path::new("templates"), &storage).unwrap();
        let storage = Arc::new(storage);
        let contributors = MockContributors::new()
            .with_name("mira", "Mira Voss")
            .with_name("jun", "Jun Park");
        let writer = PageWriter::new(
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::new(templates),
            Arc::new(contributors),
        );
        (writer, storage)
    }

    fn guide(name: &str, author: &str, body: &str) -> Guide {
        Guide {
            name: name.to_owned(),
            title: format!("Guide {name}"),
            body: body.to_owned(),
            attributes: GuideAttributes {
                description: format!("About {name}"),
                author: author.to_owned(),
                extra: serde_json::Map::new(),
            },
        }
    }

    fn learning_path(name: &str, topics: Vec<(&str, Vec<Guide>)>) -> LearningPath {
        LearningPath {
            name: name.to_owned(),
            title: format!("Path {name}"),
            description: format!("All about {name}"),
            topics: topics
                .into_iter()
                .map(|(title, guides)| Topic {
                    title: title.to_owned(),
                    guides,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_top_level_file_written_verbatim() {
        let (writer, storage) = build_writer(seeded_storage());
        let file = TopLevelFile {
            name: "robots.txt".to_owned(),
            body: "User-agent: *\nDisallow:\n".to_owned(),
        };

        writer
            .write_top_level_file(Path::new("out"), &file)
            .await
            .unwrap();

        assert_eq!(
            storage.contents_utf8("out/robots.txt").unwrap(),
            "User-agent: *\nDisallow:\n"
        );
        assert_eq!(storage.write_log(), vec![PathBuf::from("out/robots.txt")]);
    }

    #[tokio::test]
    async fn test_top_level_file_fails_without_directory() {
        let (writer, storage) = build_writer(seeded_storage());
        let file = TopLevelFile {
            name: "robots.txt".to_owned(),
            body: String::new(),
        };

        let error = writer
            .write_top_level_file(Path::new("missing"), &file)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            WriteError::Storage(ref e) if e.kind == StorageErrorKind::NotFound
        ));
        assert!(!storage.file_exists("missing/robots.txt"));
    }

    #[tokio::test]
    async fn test_empty_path_writes_overview_only() {
        let (writer, storage) = build_writer(seeded_storage());
        let path = learning_path("intro", vec![]);

        writer
            .write_learning_path(Path::new("out"), &path)
            .await
            .unwrap();

        assert_eq!(storage.write_log(), vec![PathBuf::from("out/intro.html")]);
        assert!(storage.dir_exists("out/intro"));

        let page = storage.contents_utf8("out/intro.html").unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Path intro</title>"));
        assert!(page.contains("<h2>Path intro</h2>"));
    }

    #[tokio::test]
    async fn test_guide_page_contents() {
        let (writer, storage) = build_writer(seeded_storage());
        let path = learning_path(
            "android",
            vec![("Basics", vec![guide("setup", "mira", "# First\n\nWelcome.")])],
        );

        writer
            .write_learning_path(Path::new("out"), &path)
            .await
            .unwrap();

        let page = storage
            .contents_utf8("out/android/setup/index.html")
            .unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Guide setup</title>"));
        assert!(page.contains("name=\"description\" content=\"About setup\""));
        assert!(page.contains("<p class=\"byline\">Mira Voss</p>"));
        assert!(page.contains("<nav>Path android :: Basics</nav>"));
        assert!(page.contains("<h1>First</h1>"));
        assert!(page.contains("<p>Welcome.</p>"));
    }

    #[tokio::test]
    async fn test_guides_written_in_content_order() {
        let (writer, storage) = build_writer(seeded_storage());
        let path = learning_path(
            "web",
            vec![
                (
                    "Basics",
                    vec![
                        guide("html", "mira", "a"),
                        guide("css", "jun", "b"),
                        guide("js", "mira", "c"),
                    ],
                ),
                ("Advanced", vec![guide("wasm", "jun", "d")]),
            ],
        );

        writer
            .write_learning_path(Path::new("out"), &path)
            .await
            .unwrap();

        assert_eq!(
            storage.write_log(),
            vec![
                PathBuf::from("out/web.html"),
                PathBuf::from("out/web/html/index.html"),
                PathBuf::from("out/web/css/index.html"),
                PathBuf::from("out/web/js/index.html"),
                PathBuf::from("out/web/wasm/index.html"),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_author_aborts_before_directory_creation() {
        let (writer, storage) = build_writer(seeded_storage());
        let path = learning_path(
            "android",
            vec![("Basics", vec![guide("setup", "ghost", "# x")])],
        );

        let error = writer
            .write_learning_path(Path::new("out"), &path)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            WriteError::Contributor(ContributorError::Unknown(ref id)) if *id == "ghost"
        ));
        // The overview was already written; the failing guide left nothing.
        assert_eq!(storage.write_log(), vec![PathBuf::from("out/android.html")]);
        assert!(!storage.dir_exists("out/android/setup"));
        assert!(!storage.file_exists("out/android/setup/index.html"));
    }

    #[tokio::test]
    async fn test_storage_conflict_leaves_no_partial_page() {
        let storage = seeded_storage().with_file("out/android/setup", "occupied");
        let (writer, storage) = build_writer(storage);
        let path = learning_path(
            "android",
            vec![("Basics", vec![guide("setup", "mira", "# x")])],
        );

        let error = writer
            .write_learning_path(Path::new("out"), &path)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            WriteError::Storage(ref e) if e.kind == StorageErrorKind::AlreadyExists
        ));
        assert!(!storage.file_exists("out/android/setup/index.html"));
        assert_eq!(storage.contents_utf8("out/android/setup").unwrap(), "occupied");
    }

    #[tokio::test]
    async fn test_colliding_guide_names_overwrite_silently() {
        let (writer, storage) = build_writer(seeded_storage());
        let path = learning_path(
            "android",
            vec![(
                "Basics",
                vec![guide("setup", "mira", "first body"), guide("setup", "jun", "second body")],
            )],
        );

        writer
            .write_learning_path(Path::new("out"), &path)
            .await
            .unwrap();

        let page = storage
            .contents_utf8("out/android/setup/index.html")
            .unwrap();
        assert!(page.contains("second body"));
        assert!(!page.contains("first body"));

        let target = PathBuf::from("out/android/setup/index.html");
        let writes = storage
            .write_log()
            .into_iter()
            .filter(|p| *p == target)
            .count();
        assert_eq!(writes, 2);
    }

    #[tokio::test]
    async fn test_single_guide_written_directly() {
        let (writer, storage) = build_writer(seeded_storage());
        let path = learning_path("web", vec![("Basics", vec![guide("css", "jun", "body")])]);

        writer
            .write_single_guide(Path::new("out"), &path, &path.topics[0], &path.topics[0].guides[0])
            .await
            .unwrap();

        assert!(storage.file_exists("out/css/index.html"));
    }

    #[tokio::test]
    async fn test_root_cards_fragment_has_no_chrome() {
        let (writer, storage) = build_writer(seeded_storage());
        let cards = json!({
            "cards": [
                {"title": "Android", "url": "/android.html"},
                {"title": "Web", "url": "/web.html"},
            ]
        });

        writer
            .write_root_cards(Path::new("out"), &cards)
            .await
            .unwrap();

        let fragment = storage.contents_utf8("out/_root-cards.html").unwrap();
        assert_eq!(
            fragment,
            "<div class=\"cards\"><a href=\"/android.html\">Android</a><a href=\"/web.html\">Web</a></div>"
        );
        assert!(!fragment.contains("<!DOCTYPE"));
        assert!(!fragment.contains("<title>"));
    }

    #[tokio::test]
    async fn test_guide_index_round_trips_as_json() {
        let (writer, storage) = build_writer(seeded_storage());
        let entries = vec![
            json!({"name": "setup", "path": "android"}),
            json!({"name": "css", "path": "web"}),
        ];

        writer
            .write_guide_index(Path::new("out"), &entries)
            .await
            .unwrap();

        let document = storage.contents_utf8("out/_guides-json.html").unwrap();
        let parsed: GuideIndex = serde_json::from_str(&document).unwrap();
        assert_eq!(parsed.guides, entries);
    }

    #[tokio::test]
    async fn test_empty_guide_index_still_written() {
        let (writer, storage) = build_writer(seeded_storage());

        writer.write_guide_index(Path::new("out"), &[]).await.unwrap();

        assert_eq!(
            storage.contents_utf8("out/_guides-json.html").unwrap(),
            r#"{"guides":[]}"#
        );
    }

    #[tokio::test]
    async fn test_independent_writes_can_interleave() {
        let (writer, storage) = build_writer(seeded_storage());
        let file = TopLevelFile {
            name: "robots.txt".to_owned(),
            body: "User-agent: *\n".to_owned(),
        };
        let cards = json!({"cards": []});

        let (a, b) = tokio::join!(
            writer.write_top_level_file(Path::new("out"), &file),
            writer.write_root_cards(Path::new("out"), &cards),
        );

        a.unwrap();
        b.unwrap();
        assert!(storage.file_exists("out/robots.txt"));
        assert!(storage.file_exists("out/_root-cards.html"));
    }

    #[tokio::test]
    async fn test_end_to_end_on_real_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("templates");
        std::fs::create_dir_all(&template_dir).unwrap();
        std::fs::write(template_dir.join("path.html"), PATH_TEMPLATE).unwrap();
        std::fs::write(template_dir.join("devsite.html"), DEVSITE_TEMPLATE).unwrap();
        std::fs::write(template_dir.join("root-cards.html"), ROOT_CARDS_TEMPLATE).unwrap();
        std::fs::write(template_dir.join("guide.html"), GUIDE_TEMPLATE).unwrap();
        let out = dir.path().join("build");
        std::fs::create_dir_all(&out).unwrap();

        let storage: Arc<dyn Storage> = Arc::new(waypoint_storage::FsStorage::new());
        let templates =
            Arc::new(TemplateStore::load(&template_dir, storage.as_ref()).unwrap());
        let contributors = Arc::new(
            waypoint_contributors::TomlContributors::from_toml("[mira]\nname = \"Mira Voss\"")
                .unwrap(),
        );
        let writer = PageWriter::new(storage, templates, contributors);

        let path = learning_path(
            "android",
            vec![("Basics", vec![guide("setup", "mira", "# Install\n\nSteps.")])],
        );
        writer.write_learning_path(&out, &path).await.unwrap();
        writer
            .write_guide_index(&out, &[json!({"name": "setup"})])
            .await
            .unwrap();

        let overview = std::fs::read_to_string(out.join("android.html")).unwrap();
        assert!(overview.contains("<h2>Path android</h2>"));

        let page = std::fs::read_to_string(out.join("android/setup/index.html")).unwrap();
        assert!(page.contains("<h1>Install</h1>"));
        assert!(page.contains("Mira Voss"));

        let index = std::fs::read_to_string(out.join(GUIDE_INDEX_FILE)).unwrap();
        assert_eq!(index, r#"{"guides":[{"name":"setup"}]}"#);
    }
}
