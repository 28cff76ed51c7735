//! Content discovery.
//!
//! Turns a flat directory of markdown documents into [`PageDescriptor`]s:
//!
//! ```text
//! content/
//! ├── config.toml        # Site configuration (optional)
//! ├── services/          # Required: one document per service page
//! │   ├── homepage.md
//! │   └── design.md
//! └── pages/             # Optional: standalone pages
//!     └── about.md
//! ```
//!
//! Only files whose name ends in `.md` (case-sensitive) are read; anything
//! else is ignored. Documents are processed in file-name order so repeated
//! runs see the same sequence.
//!
//! ## Failure Boundary
//!
//! Failing to list the directory is a [`CollectError`] for the caller to
//! classify. A single document that cannot be read, rendered, or that names
//! an unusable slug becomes a [`DocumentError`] in [`Collected::failures`]
//! and the rest of the directory is still collected.

use crate::config::{SiteConfig, is_safe_slug};
use crate::frontmatter;
use crate::markdown::{MarkdownRenderer, RenderError};
use crate::types::{Collection, PageDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MARKDOWN_SUFFIX: &str = ".md";

#[derive(Error, Debug)]
#[error("cannot list {}: {source}", path.display())]
pub struct CollectError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl CollectError {
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

/// A document that was skipped.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    #[error("invalid slug {slug:?} in {}", path.display())]
    InvalidSlug { path: PathBuf, slug: String },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::Read { path, .. }
            | DocumentError::Render { path, .. }
            | DocumentError::InvalidSlug { path, .. } => path,
        }
    }
}

/// Result of collecting one directory.
#[derive(Debug, Default)]
pub struct Collected {
    pub pages: Vec<PageDescriptor>,
    pub failures: Vec<DocumentError>,
}

/// Collect every markdown document in `dir` as `collection` pages.
pub fn collect(
    dir: &Path,
    collection: Collection,
    config: &SiteConfig,
    renderer: &impl MarkdownRenderer,
) -> Result<Collected, CollectError> {
    let documents = list_documents(dir).map_err(|source| CollectError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut collected = Collected::default();
    for path in documents {
        let result = fs::read_to_string(&path)
            .map_err(|source| DocumentError::Read {
                path: path.clone(),
                source,
            })
            .and_then(|raw| build_descriptor(&path, &raw, collection, config, renderer));

        match result {
            Ok(page) => {
                log::debug!("collected {} as {} page {:?}", path.display(), collection, page.slug);
                collected.pages.push(page);
            }
            Err(err) => collected.failures.push(err),
        }
    }
    Ok(collected)
}

/// Markdown files directly inside `dir`, sorted by file name.
pub fn list_documents(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_markdown = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(MARKDOWN_SUFFIX));
        if is_markdown && path.is_file() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Parse and render one document's text.
///
/// Missing keys fall back to the collection's default title, the file stem,
/// and the configured default image position.
pub fn build_descriptor(
    path: &Path,
    raw: &str,
    collection: Collection,
    config: &SiteConfig,
    renderer: &impl MarkdownRenderer,
) -> Result<PageDescriptor, DocumentError> {
    let (front_matter, body) = frontmatter::parse(raw).into_parts();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(MARKDOWN_SUFFIX)
        .unwrap_or(&file_name)
        .to_string();

    let slug = front_matter.slug().map(str::to_string).unwrap_or(stem);
    if !is_safe_slug(&slug) {
        return Err(DocumentError::InvalidSlug {
            path: path.to_path_buf(),
            slug,
        });
    }

    let default_title = match collection {
        Collection::Service => &config.default_service_title,
        Collection::Page => &config.default_page_title,
    };
    let title = front_matter.title().unwrap_or(default_title).to_string();
    let image_position = front_matter
        .image_position()
        .unwrap_or(&config.default_image_position)
        .to_string();

    let body_html = renderer
        .render(body)
        .map_err(|source| DocumentError::Render {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(PageDescriptor {
        title,
        active_nav: collection.active_nav(&slug).to_string(),
        slug,
        image_position,
        body_html,
        collection,
        source: file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::PulldownRenderer;
    use crate::test_helpers::{FailingRenderer, write_doc};
    use tempfile::TempDir;

    fn descriptor(name: &str, raw: &str, collection: Collection) -> PageDescriptor {
        build_descriptor(
            Path::new(name),
            raw,
            collection,
            &SiteConfig::default(),
            &PulldownRenderer,
        )
        .unwrap()
    }

    #[test]
    fn descriptor_from_front_matter() {
        let page = descriptor(
            "homepage.md",
            "---\ntitle: ホームページ制作\nslug: homepage\nimagePosition: top center\n---\n# 見出し",
            Collection::Service,
        );
        assert_eq!(page.title, "ホームページ制作");
        assert_eq!(page.slug, "homepage");
        assert_eq!(page.image_position, "top center");
        assert_eq!(page.body_html, "<h1>見出し</h1>\n");
        assert_eq!(page.active_nav, "work");
        assert_eq!(page.source, "homepage.md");
    }

    #[test]
    fn service_defaults_without_metadata() {
        let page = descriptor("design.md", "Plain body", Collection::Service);
        assert_eq!(page.title, "Service");
        assert_eq!(page.slug, "design");
        assert_eq!(page.image_position, "center center");
        assert_eq!(page.body_html, "<p>Plain body</p>\n");
    }

    #[test]
    fn page_defaults_and_active_nav() {
        let page = descriptor("about.md", "---\nimagePosition: bottom\n---\nHi", Collection::Page);
        assert_eq!(page.title, "Page");
        assert_eq!(page.slug, "about");
        assert_eq!(page.active_nav, "about");
        assert_eq!(page.image_position, "bottom");
    }

    #[test]
    fn slug_from_front_matter_drives_active_nav() {
        let page = descriptor("x.md", "---\nslug: contact\n---\n", Collection::Page);
        assert_eq!(page.slug, "contact");
        assert_eq!(page.active_nav, "contact");
    }

    #[test]
    fn metadata_is_not_rendered_into_body() {
        let page = descriptor("a.md", "---\ntitle: Hidden\n---\nVisible", Collection::Service);
        assert!(!page.body_html.contains("Hidden"));
        assert!(page.body_html.contains("Visible"));
    }

    #[test]
    fn unsafe_slug_is_rejected() {
        let result = build_descriptor(
            Path::new("evil.md"),
            "---\nslug: ../../etc\n---\n",
            Collection::Service,
            &SiteConfig::default(),
            &PulldownRenderer,
        );
        assert!(matches!(result, Err(DocumentError::InvalidSlug { .. })));
    }

    #[test]
    fn index_slug_is_rejected_in_both_collections() {
        for (raw, collection) in [
            ("---\nslug: index\n---\n", Collection::Service),
            ("no metadata", Collection::Page),
        ] {
            let result = build_descriptor(
                Path::new("index.md"),
                raw,
                collection,
                &SiteConfig::default(),
                &PulldownRenderer,
            );
            assert!(
                matches!(result, Err(DocumentError::InvalidSlug { ref slug, .. }) if slug == "index"),
                "{collection} accepted slug index"
            );
        }
    }

    #[test]
    fn render_failure_carries_path() {
        let err = build_descriptor(
            Path::new("services/broken.md"),
            "body",
            Collection::Service,
            &SiteConfig::default(),
            &FailingRenderer::on("body"),
        )
        .unwrap_err();
        assert_eq!(err.path(), Path::new("services/broken.md"));
        assert!(err.to_string().contains("services/broken.md"));
    }

    // =========================================================================
    // Directory tests
    // =========================================================================

    #[test]
    fn lists_only_markdown_files_sorted() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "b.md", "b");
        write_doc(tmp.path(), "a.md", "a");
        write_doc(tmp.path(), "notes.txt", "x");
        write_doc(tmp.path(), "UPPER.MD", "x");
        fs::create_dir(tmp.path().join("dir.md")).unwrap();

        let names: Vec<String> = list_documents(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn collect_reads_every_document() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "homepage.md", "---\ntitle: Home\n---\n# H");
        write_doc(tmp.path(), "design.md", "# D");

        let collected = collect(
            tmp.path(),
            Collection::Service,
            &SiteConfig::default(),
            &PulldownRenderer,
        )
        .unwrap();
        assert!(collected.failures.is_empty());
        let slugs: Vec<&str> = collected.pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["design", "homepage"]);
    }

    #[test]
    fn collect_isolates_failing_documents() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "good.md", "fine");
        write_doc(tmp.path(), "bad.md", "boom");

        let collected = collect(
            tmp.path(),
            Collection::Service,
            &SiteConfig::default(),
            &FailingRenderer::on("boom"),
        )
        .unwrap();
        assert_eq!(collected.pages.len(), 1);
        assert_eq!(collected.pages[0].slug, "good");
        assert_eq!(collected.failures.len(), 1);
        assert!(collected.failures[0].path().ends_with("bad.md"));
    }

    #[test]
    fn collect_missing_directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = collect(
            &tmp.path().join("missing"),
            Collection::Page,
            &SiteConfig::default(),
            &PulldownRenderer,
        )
        .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing"));
    }
}
