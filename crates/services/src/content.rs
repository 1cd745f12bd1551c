//! Raw lesson text sources.
//!
//! Lesson markdown ships inside the binary. A directory on disk can replace
//! it for authoring (`METODO_CONTENT_DIR`); files are named `<slug>.md`.

use std::env;
use std::path::PathBuf;

use async_trait::async_trait;
use course_core::model::LessonSlug;

use crate::error::ContentError;

#[async_trait]
pub trait LessonContentSource: Send + Sync {
    /// Raw markdown for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Missing` when no text exists for the slug and
    /// `ContentError::Io` when reading it fails.
    async fn load(&self, slug: &LessonSlug) -> Result<String, ContentError>;
}

const EMBEDDED: [(&str, &str); 7] = [
    ("01-introducao", include_str!("../content/01-introducao.md")),
    ("02-fome-saciedade", include_str!("../content/02-fome-saciedade.md")),
    ("03-rotina-minima", include_str!("../content/03-rotina-minima.md")),
    ("04-sono-luz", include_str!("../content/04-sono-luz.md")),
    ("05-performance", include_str!("../content/05-performance.md")),
    ("rotina-7-dias", include_str!("../content/rotina-7-dias.md")),
    (
        "lista-compras-secreta",
        include_str!("../content/lista-compras-secreta.md"),
    ),
];

/// Lesson text compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedContent;

#[async_trait]
impl LessonContentSource for EmbeddedContent {
    async fn load(&self, slug: &LessonSlug) -> Result<String, ContentError> {
        EMBEDDED
            .iter()
            .find(|(key, _)| *key == slug.as_str())
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| ContentError::Missing(slug.clone()))
    }
}

/// Lesson text read from `<root>/<slug>.md` on every load.
#[derive(Debug, Clone)]
pub struct DirectoryContent {
    root: PathBuf,
}

impl DirectoryContent {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `METODO_CONTENT_DIR`, if set and non-blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        env::var("METODO_CONTENT_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(Self::new)
    }
}

#[async_trait]
impl LessonContentSource for DirectoryContent {
    async fn load(&self, slug: &LessonSlug) -> Result<String, ContentError> {
        // Slugs are [a-z0-9-]+, so the join cannot escape `root`.
        let path = self.root.join(format!("{slug}.md"));
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ContentError::Missing(slug.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
