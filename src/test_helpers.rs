//! Shared test utilities.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let (_tmp, paths) = setup_site();
//! write_doc(&paths.services_dir(), "extra.md", "# Extra");
//! let before = read_tree(&paths.output_dir);
//! ```

use crate::assemble::BuildPaths;
use crate::markdown::{MarkdownRenderer, PulldownRenderer, RenderError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `contents` to `dir/name`, creating `dir` as needed.
pub fn write_doc(dir: &Path, name: &str, contents: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A small site in a temp directory:
///
/// ```text
/// tmp/
/// ├── content/
/// │   ├── services/{homepage,design}.md
/// │   └── pages/about.md
/// ├── public/images/services/homepage.jpg
/// └── dist/                (not created)
/// ```
pub fn setup_site() -> (TempDir, BuildPaths) {
    let tmp = TempDir::new().unwrap();
    let paths = BuildPaths {
        content_dir: tmp.path().join("content"),
        output_dir: tmp.path().join("dist"),
        public_dir: tmp.path().join("public"),
    };

    write_doc(
        &paths.services_dir(),
        "homepage.md",
        "---\ntitle: ホームページ制作\nslug: homepage\n---\n# 見出し\n",
    );
    write_doc(&paths.services_dir(), "design.md", "## デザイン\n\n本文\n");
    write_doc(
        &paths.pages_dir(),
        "about.md",
        "---\ntitle: About\nimagePosition: top center\n---\n私たちについて\n",
    );
    write_doc(
        &paths.images_dir().join("services"),
        "homepage.jpg",
        "not really a jpeg",
    );

    (tmp, paths)
}

/// Every file under `root` with its bytes, keyed by relative path.
pub fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

// =========================================================================
// Renderers
// =========================================================================

/// Renders like [`PulldownRenderer`] but fails on any text containing `needle`.
pub struct FailingRenderer {
    needle: &'static str,
}

impl FailingRenderer {
    pub fn on(needle: &'static str) -> Self {
        Self { needle }
    }
}

impl MarkdownRenderer for FailingRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        if markdown.contains(self.needle) {
            return Err(RenderError(format!("refusing to render {:?}", self.needle)));
        }
        PulldownRenderer.render(markdown)
    }
}
