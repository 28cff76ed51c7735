//! Character counts for content documents.
//!
//! Copywriters size service pages by how many characters the body holds,
//! Japanese-style (whitespace excluded). Counts are Unicode scalar values.

use crate::collect::list_documents;
use crate::frontmatter;
use std::fs;
use std::path::Path;

/// Character counts for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub file_name: String,
    /// The whole file.
    pub total: usize,
    /// Body only, front matter removed.
    pub body: usize,
    /// Body with every whitespace character removed.
    pub body_no_space: usize,
}

/// Count characters in one document's text.
pub fn analyze(file_name: &str, raw: &str) -> DocumentStats {
    let body = frontmatter::parse(raw).body();
    // The closing fence's line break is not body text
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    DocumentStats {
        file_name: file_name.to_string(),
        total: raw.chars().count(),
        body: body.chars().count(),
        body_no_space: body.chars().filter(|c| !c.is_whitespace()).count(),
    }
}

/// Stats for every markdown document in `dir`, in file-name order.
pub fn collect_stats(dir: &Path) -> std::io::Result<Vec<DocumentStats>> {
    let mut stats = Vec::new();
    for path in list_documents(dir)? {
        let raw = fs::read_to_string(&path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        stats.push(analyze(&file_name, &raw));
    }
    Ok(stats)
}
