//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! ==> Preparing dist
//! ✓ images: 7 files copied
//! ✓ styles/main.css
//! ✓ work/homepage.html  ホームページ制作
//! ! skipped services/broken.md: cannot render services/broken.md: ...
//! ✓ about.html  About
//! ✓ work/index.html
//! ✓ index.html → /work/
//!
//! Built 7 service pages, 1 page
//! ```
//!
//! ## Stats
//!
//! ```text
//! File Name,No Space,Body(w/Space),Total(Raw)
//! homepage.md,812,1004,1061
//! ```

use crate::assemble::{BuildEvent, BuildReport};
use crate::stats::DocumentStats;
use crate::types::{Collection, PageDescriptor};
use std::path::Path;

fn rel(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::OutputPrepared { path } => vec![format!("==> Preparing {}", path.display())],
        BuildEvent::AssetsCopied { files } => {
            vec![format!("✓ images: {} copied", plural(*files, "file", "files"))]
        }
        BuildEvent::AssetsSkipped { path, reason } => vec![
            format!("! images not copied from {}", path.display()),
            format!("    {reason}"),
        ],
        BuildEvent::StylesheetWritten { path } => vec![format!("✓ {}", rel(path))],
        BuildEvent::PageWritten { title, path, .. } => {
            vec![format!("✓ {}  {}", rel(path), title)]
        }
        BuildEvent::DocumentSkipped { path, reason } => {
            vec![format!("! skipped {}: {}", path.display(), reason)]
        }
        BuildEvent::PagesSkipped { path, reason } => vec![
            format!("! no standalone pages from {}", path.display()),
            format!("    {reason}"),
        ],
        BuildEvent::LandingWritten { path } => vec![format!("✓ {}", rel(path))],
        BuildEvent::RedirectWritten { path } => vec![format!("✓ {} → /work/", rel(path))],
    }
}

/// Summary lines after a build.
pub fn format_build_summary(report: &BuildReport, output: &Path) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Built {}, {}",
            plural(report.service_pages, "service page", "service pages"),
            plural(report.standalone_pages, "page", "pages"),
        ),
        format!("Output: {}", output.display()),
    ];
    if !report.is_clean() {
        lines.push(format!(
            "{} skipped:",
            plural(report.failures.len(), "document", "documents")
        ));
        for failure in &report.failures {
            lines.push(format!("    {}", failure.path().display()));
        }
    }
    lines
}

pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

pub fn print_build_summary(report: &BuildReport, output: &Path) {
    for line in format_build_summary(report, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// List collected pages grouped by collection.
pub fn format_check_output(pages: &[PageDescriptor]) -> Vec<String> {
    let mut lines = Vec::new();
    for (heading, collection) in [("Services", Collection::Service), ("Pages", Collection::Page)] {
        let group: Vec<&PageDescriptor> =
            pages.iter().filter(|p| p.collection == collection).collect();
        if group.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        for (i, page) in group.iter().enumerate() {
            lines.push(format!("{:0>3} {} → {}", i + 1, page.title, rel(&page.output_path())));
            lines.push(format!("    Source: {}", page.source));
            if page.image_position != "center center" {
                lines.push(format!("    Image position: {}", page.image_position));
            }
        }
    }
    lines
}

pub fn print_check_output(pages: &[PageDescriptor]) {
    for line in format_check_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Stats output
// ============================================================================

pub fn format_stats_csv(stats: &[DocumentStats]) -> Vec<String> {
    let mut lines = vec!["File Name,No Space,Body(w/Space),Total(Raw)".to_string()];
    for s in stats {
        lines.push(format!(
            "{},{},{},{}",
            s.file_name, s.body_no_space, s.body, s.total
        ));
    }
    lines.push("No Space: Body chars without whitespace".to_string());
    lines.push("Body(w/Space): Body chars with whitespace".to_string());
    lines.push("Total(Raw): Total file chars".to_string());
    lines
}

pub fn print_stats_csv(stats: &[DocumentStats]) {
    for line in format_stats_csv(stats) {
        println!("{}", line);
    }
}
