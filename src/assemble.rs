//! Site assembly: the one-shot build.
//!
//! Owns the output directory for the duration of a build and runs each step
//! to completion before the next:
//!
//! 1. Wipe the output tree and recreate `work/`, `styles/`, `images/`
//! 2. Copy `<public>/images/**` into `images/` (failure is a warning)
//! 3. Write `styles/main.css`
//! 4. Collect and write service pages to `work/{slug}.html`
//! 5. Collect and write standalone pages to `{slug}.html` (missing directory
//!    is a warning)
//! 6. Write the `work/index.html` landing page
//! 7. Write the root `index.html` redirect
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Redirect to /work/
//! ├── about.html                 # Standalone pages
//! ├── styles/
//! │   └── main.css
//! ├── images/                    # Copied verbatim from public/images
//! │   └── services/
//! │       └── homepage.jpg
//! └── work/
//!     ├── index.html             # Landing page with service cards
//!     └── homepage.html          # Service pages
//! ```
//!
//! Because step 1 removes everything, rerunning with unchanged inputs
//! reproduces the same tree byte for byte.
//!
//! ## Failure Policy
//!
//! Fatal ([`BuildError`]): the output tree cannot be prepared or written, the
//! services directory cannot be listed, or the output directory contains an
//! input. Everything else is recoverable and reported as a [`BuildEvent`]
//! (mirrored at `info` level in the log). Documents that fail individually
//! are skipped and collected in [`BuildReport::failures`]; the rest of the
//! batch still builds. Conditions with no event of their own, such as a
//! duplicate slug or service table drift, are `log::warn!`.

use crate::collect::{self, CollectError, DocumentError};
use crate::compose::Composer;
use crate::config::{self, SiteConfig};
use crate::markdown::{MarkdownRenderer, PulldownRenderer};
use crate::types::{Collection, PageDescriptor, RenderedPage, WORK_NAV};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const CSS_STATIC: &str = include_str!("../static/main.css");

pub const SERVICES_DIR: &str = "services";
pub const PAGES_DIR: &str = "pages";
pub const STYLES_DIR: &str = "styles";
pub const IMAGES_DIR: &str = "images";
pub const STYLESHEET_FILE: &str = "main.css";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("cannot prepare output directory {}: {source}", path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("refusing to wipe {} because it contains {}", output.display(), input.display())]
    UnsafeOutput { output: PathBuf, input: PathBuf },
    #[error("services directory is required: {0}")]
    Services(#[source] CollectError),
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a build reads from and writes to.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Holds `services/`, `pages/` and the optional `config.toml`.
    pub content_dir: PathBuf,
    /// Wiped and rebuilt on every run.
    pub output_dir: PathBuf,
    /// Holds `images/`, copied into the output.
    pub public_dir: PathBuf,
}

impl BuildPaths {
    pub fn services_dir(&self) -> PathBuf {
        self.content_dir.join(SERVICES_DIR)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.content_dir.join(PAGES_DIR)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join(IMAGES_DIR)
    }
}

/// Progress of a running build. Paths are relative to the output root
/// unless they name an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    OutputPrepared { path: PathBuf },
    AssetsCopied { files: usize },
    AssetsSkipped { path: PathBuf, reason: String },
    StylesheetWritten { path: PathBuf },
    PageWritten {
        collection: Collection,
        title: String,
        path: PathBuf,
    },
    DocumentSkipped { path: PathBuf, reason: String },
    PagesSkipped { path: PathBuf, reason: String },
    LandingWritten { path: PathBuf },
    RedirectWritten { path: PathBuf },
}

/// What a finished build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub service_pages: usize,
    pub standalone_pages: usize,
    pub assets_copied: usize,
    /// Documents skipped because they could not be read or rendered.
    pub failures: Vec<DocumentError>,
}

impl BuildReport {
    /// True when no document was skipped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build with the stock markdown renderer.
pub fn build(
    config: &SiteConfig,
    paths: &BuildPaths,
    on_event: impl FnMut(BuildEvent),
) -> Result<BuildReport, BuildError> {
    SiteAssembler::new(config, PulldownRenderer).build(paths, on_event)
}

/// Drives collection, composition and output for one site.
pub struct SiteAssembler<'a, R> {
    config: &'a SiteConfig,
    renderer: R,
}

impl<'a, R: MarkdownRenderer> SiteAssembler<'a, R> {
    pub fn new(config: &'a SiteConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn build(
        &self,
        paths: &BuildPaths,
        mut on_event: impl FnMut(BuildEvent),
    ) -> Result<BuildReport, BuildError> {
        let output = paths.output_dir.as_path();
        let composer = Composer::new(self.config);
        let mut report = BuildReport::default();

        check_output_is_safe(paths)?;
        prepare_output(output)?;
        on_event(BuildEvent::OutputPrepared {
            path: output.to_path_buf(),
        });

        let images_src = paths.images_dir();
        match copy_assets(&images_src, &output.join(IMAGES_DIR)) {
            Ok(files) => {
                report.assets_copied = files;
                on_event(BuildEvent::AssetsCopied { files });
            }
            Err(err) => {
                log::info!(
                    "skipping image assets from {} (not generated yet?): {err}",
                    images_src.display()
                );
                on_event(BuildEvent::AssetsSkipped {
                    path: images_src,
                    reason: err.to_string(),
                });
            }
        }

        let stylesheet = PathBuf::from(STYLES_DIR).join(STYLESHEET_FILE);
        write_file(output, &stylesheet, &self.stylesheet())?;
        on_event(BuildEvent::StylesheetWritten { path: stylesheet });

        // Services are required; a listing failure stops the build.
        let services = collect::collect(
            &paths.services_dir(),
            Collection::Service,
            self.config,
            &self.renderer,
        )
        .map_err(BuildError::Services)?;
        self.warn_on_table_drift(&services.pages);
        report.service_pages = self.write_collection(
            &composer,
            output,
            services,
            &mut report.failures,
            &mut on_event,
        )?;

        let pages_dir = paths.pages_dir();
        match collect::collect(&pages_dir, Collection::Page, self.config, &self.renderer) {
            Ok(pages) => {
                report.standalone_pages = self.write_collection(
                    &composer,
                    output,
                    pages,
                    &mut report.failures,
                    &mut on_event,
                )?;
            }
            Err(err) => {
                log::info!("continuing without standalone pages: {err}");
                on_event(BuildEvent::PagesSkipped {
                    path: pages_dir,
                    reason: err.source.to_string(),
                });
            }
        }

        let landing = composer.compose_landing();
        write_page(output, &landing)?;
        on_event(BuildEvent::LandingWritten { path: landing.path });

        let redirect = composer.compose_redirect();
        write_page(output, &redirect)?;
        on_event(BuildEvent::RedirectWritten {
            path: redirect.path,
        });

        Ok(report)
    }

    /// Stylesheet text: palette custom properties followed by the static rules.
    pub fn stylesheet(&self) -> String {
        format!(
            "{}\n\n{}",
            config::generate_color_css(&self.config.colors),
            CSS_STATIC
        )
    }

    fn write_collection(
        &self,
        composer: &Composer<'_>,
        output: &Path,
        collected: collect::Collected,
        failures: &mut Vec<DocumentError>,
        on_event: &mut impl FnMut(BuildEvent),
    ) -> Result<usize, BuildError> {
        for failure in collected.failures {
            log::info!("skipping document: {failure}");
            on_event(BuildEvent::DocumentSkipped {
                path: failure.path().to_path_buf(),
                reason: failure.to_string(),
            });
            failures.push(failure);
        }

        let mut written = HashSet::new();
        for page in &collected.pages {
            let rendered = composer.compose_page(page);
            if !written.insert(rendered.path.clone()) {
                log::warn!(
                    "{} overwrites an earlier document with slug {:?}",
                    page.source,
                    page.slug
                );
            }
            write_page(output, &rendered)?;
            on_event(BuildEvent::PageWritten {
                collection: page.collection,
                title: page.title.clone(),
                path: rendered.path,
            });
        }
        Ok(collected.pages.len())
    }

    /// The service table and the services directory are kept in sync by hand.
    fn warn_on_table_drift(&self, pages: &[PageDescriptor]) {
        let documented: HashSet<&str> = pages.iter().map(|p| p.slug.as_str()).collect();
        let listed: HashSet<&str> = self
            .config
            .services
            .iter()
            .map(|s| s.slug.as_str())
            .collect();
        for slug in listed.difference(&documented) {
            log::warn!("service {slug:?} is listed but has no document in {SERVICES_DIR}/");
        }
        for slug in documented.difference(&listed) {
            log::warn!("{WORK_NAV}/{slug}.html is built but missing from the services table");
        }
    }
}

/// Refuse an output directory that contains an input, since step 1 deletes it.
/// Paths are resolved first so `content/..` and `./website` compare equal to
/// their plain spellings.
fn check_output_is_safe(paths: &BuildPaths) -> Result<(), BuildError> {
    let output = resolve_path(&paths.output_dir);
    for input in [&paths.content_dir, &paths.public_dir] {
        if resolve_path(input).starts_with(&output) {
            return Err(BuildError::UnsafeOutput {
                output: paths.output_dir.clone(),
                input: input.clone(),
            });
        }
    }
    Ok(())
}

/// Canonical form of `path`. The output directory may not exist yet, so the
/// nearest existing ancestor is canonicalized and the missing tail appended.
fn resolve_path(path: &Path) -> PathBuf {
    let mut base = path;
    let mut tail: Vec<&OsStr> = Vec::new();
    loop {
        let existing = if base.as_os_str().is_empty() {
            Path::new(".")
        } else {
            base
        };
        if let Ok(resolved) = fs::canonicalize(existing) {
            return tail.iter().rev().fold(resolved, |acc, name| acc.join(name));
        }
        match (base.parent(), base.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                base = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Remove the output tree (absence is fine) and recreate its fixed layout.
pub fn prepare_output(output: &Path) -> Result<(), BuildError> {
    let setup_err = |source: io::Error| BuildError::Setup {
        path: output.to_path_buf(),
        source,
    };
    match fs::remove_dir_all(output) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(setup_err(err)),
    }
    for dir in [WORK_NAV, STYLES_DIR, IMAGES_DIR] {
        fs::create_dir_all(output.join(dir)).map_err(setup_err)?;
    }
    Ok(())
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
pub fn copy_assets(src: &Path, dst: &Path) -> io::Result<usize> {
    if !fs::metadata(src)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", src.display()),
        ));
    }
    let mut files = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }
    Ok(files)
}

/// The single write operation for generated files.
pub fn write_page(output: &Path, page: &RenderedPage) -> Result<(), BuildError> {
    write_file(output, &page.path, &page.html)
}

fn write_file(output: &Path, rel: &Path, contents: &str) -> Result<(), BuildError> {
    let path = output.join(rel);
    let write_err = |source: io::Error| BuildError::Write {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&path, contents).map_err(write_err)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
