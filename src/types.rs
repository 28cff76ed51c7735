//! Types shared between collection, composition and output.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Navigation id highlighted on every service page. Also selects the
/// `images/services/` hero image directory.
pub const WORK_NAV: &str = "work";

/// Which content collection a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Service detail pages, written to `work/{slug}.html` with the sidebar.
    Service,
    /// Standalone pages, written to `{slug}.html` without the sidebar.
    Page,
}

impl Collection {
    /// Navigation id for a page of this collection.
    pub fn active_nav<'a>(self, slug: &'a str) -> &'a str {
        match self {
            Collection::Service => WORK_NAV,
            Collection::Page => slug,
        }
    }

    pub fn shows_sidebar(self) -> bool {
        matches!(self, Collection::Service)
    }

    /// Output path relative to the output root.
    pub fn output_path(self, slug: &str) -> PathBuf {
        let file = format!("{slug}.html");
        match self {
            Collection::Service => PathBuf::from(WORK_NAV).join(file),
            Collection::Page => PathBuf::from(file),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Service => f.write_str("service"),
            Collection::Page => f.write_str("page"),
        }
    }
}

/// A document ready to be composed into a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    pub title: String,
    /// Output filename stem and hero image name.
    pub slug: String,
    /// CSS `object-position` for the hero image, passed through verbatim.
    pub image_position: String,
    pub body_html: String,
    pub collection: Collection,
    pub active_nav: String,
    /// File name of the source document, for diagnostics.
    pub source: String,
}

impl PageDescriptor {
    pub fn output_path(&self) -> PathBuf {
        self.collection.output_path(&self.slug)
    }
}

/// Final HTML plus where it goes, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub path: PathBuf,
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_pages_go_under_work() {
        assert_eq!(
            Collection::Service.output_path("homepage"),
            PathBuf::from("work/homepage.html")
        );
        assert_eq!(Collection::Service.active_nav("homepage"), "work");
        assert!(Collection::Service.shows_sidebar());
    }

    #[test]
    fn standalone_pages_go_to_root() {
        assert_eq!(
            Collection::Page.output_path("about"),
            PathBuf::from("about.html")
        );
        assert_eq!(Collection::Page.active_nav("about"), "about");
        assert!(!Collection::Page.shows_sidebar());
    }

    #[test]
    fn collection_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Collection::Service).unwrap(),
            r#""service""#
        );
    }
}
