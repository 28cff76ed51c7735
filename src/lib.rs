//! # Hokage Site
//!
//! A one-shot static site builder for the NPO Hokage website. Markdown
//! documents with a small front-matter block become complete HTML pages that
//! share one layout; the result is a plain directory of files ready to
//! upload anywhere.
//!
//! # Architecture: One-Way Pipeline
//!
//! Data flows in one direction and nothing reads back what an earlier step
//! wrote:
//!
//! ```text
//! documents  →  PageDescriptor  →  HTML string  →  file in dist/
//!  (collect)     (frontmatter +      (compose)       (assemble)
//!                 markdown)
//! ```
//!
//! Every run wipes the output directory and rebuilds it from scratch, which
//! is what makes repeated builds byte-identical.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits a document into `key: value` metadata and markdown body |
//! | [`markdown`] | `MarkdownRenderer` seam and the `pulldown-cmark` implementation |
//! | [`compose`] | Renders the shared page layout, landing page and redirect using Maud |
//! | [`collect`] | Lists a content directory and produces `PageDescriptor`s |
//! | [`assemble`] | Owns the output tree and runs the build steps in order |
//! | [`config`] | `config.toml` loading and validation, navigation and service tables, palette CSS |
//! | [`types`] | Shared types (`PageDescriptor`, `Collection`, `RenderedPage`) |
//! | [`stats`] | Body character counts for copy editing |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Lenient Front Matter
//!
//! A missing or unterminated metadata block is not an error. The parser
//! returns [`frontmatter::ParsedDocument::NoMetadata`] and the whole text is
//! treated as body, so a typo in metadata can never stop a build.
//!
//! ## Maud With One Trust Boundary
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), so every title,
//! label and config string is escaped and tags are always balanced. The
//! rendered markdown body is inserted unescaped because content authors are
//! trusted. The builder is not hardened against hostile documents.
//!
//! ## One Service Table
//!
//! The landing-page cards and the sidebar service list both come from
//! [`config::SiteConfig::services`], so they cannot drift apart. A build
//! warns when the table and the services directory disagree.
//!
//! ## Per-Document Failure Isolation
//!
//! A document that fails to read or render is skipped and reported; the
//! rest of the site still builds. The CLI exits non-zero afterwards so CI
//! notices.

pub mod assemble;
pub mod collect;
pub mod compose;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod output;
pub mod stats;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
