//! HTML page composition.
//!
//! Every page shares one layout: head, header with four navigation links,
//! hero region, content region, optional sidebar, footer.
//!
//! ## Generated Pages
//!
//! - **Service pages** (`work/{slug}.html`): hero image from
//!   `images/services/{slug}.jpg`, sidebar with contact box and service list
//! - **Standalone pages** (`{slug}.html`): hero image from `images/{slug}.jpg`,
//!   no sidebar
//! - **Work landing** (`work/index.html`): compact hero, intro copy, one card
//!   per configured service
//! - **Root redirect** (`index.html`): immediate refresh to `/work/`
//!
//! ## Escaping
//!
//! Uses [maud](https://maud.lambda.xyz/), so titles, labels and config copy
//! are escaped. The rendered markdown body is the one exception: it is
//! inserted with [`PreEscaped`] because content authors are trusted. Do not
//! feed attacker-controlled documents through this module.
//!
//! `image_position` is written into the hero's inline `style` unvalidated so
//! any CSS `object-position` value works.

use crate::config::SiteConfig;
use crate::types::{PageDescriptor, RenderedPage, WORK_NAV};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::PathBuf;

const STYLESHEET_HREF: &str = "/styles/main.css";
const FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Noto+Sans+JP:wght@400;500;700&family=Shippori+Mincho:wght@400;600&display=swap";
const WORK_INDEX_HREF: &str = "/work/";

/// Everything that varies between two composed pages.
#[derive(Debug, Clone, Copy)]
pub struct PageLayout<'a> {
    pub title: &'a str,
    /// Trusted HTML, inserted unescaped.
    pub body_html: &'a str,
    pub slug: &'a str,
    /// Navigation entry to highlight, matched exactly against entry ids.
    pub active_nav: &'a str,
    pub show_sidebar: bool,
    pub image_position: &'a str,
}

impl<'a> PageLayout<'a> {
    pub fn for_descriptor(page: &'a PageDescriptor) -> Self {
        Self {
            title: &page.title,
            body_html: &page.body_html,
            slug: &page.slug,
            active_nav: &page.active_nav,
            show_sidebar: page.collection.shows_sidebar(),
            image_position: &page.image_position,
        }
    }
}

/// Hero image path: service pages (`active_nav == "work"`) look in
/// `images/services/`, everything else in `images/`.
pub fn hero_image_src(slug: &str, active_nav: &str) -> String {
    if active_nav == WORK_NAV {
        format!("/images/services/{slug}.jpg")
    } else {
        format!("/images/{slug}.jpg")
    }
}

enum Hero<'a> {
    Image { src: String, position: &'a str },
    /// Short banner without an image.
    Compact,
}

/// Composes pages against one site configuration.
pub struct Composer<'a> {
    config: &'a SiteConfig,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Compose a full HTML document. Pure and deterministic.
    pub fn compose(&self, layout: &PageLayout<'_>) -> String {
        let hero = Hero::Image {
            src: hero_image_src(layout.slug, layout.active_nav),
            position: layout.image_position,
        };
        self.document(
            layout.title,
            layout.active_nav,
            hero,
            layout.show_sidebar,
            PreEscaped(layout.body_html.to_string()),
        )
        .into_string()
    }

    pub fn compose_page(&self, page: &PageDescriptor) -> RenderedPage {
        RenderedPage {
            path: page.output_path(),
            html: self.compose(&PageLayout::for_descriptor(page)),
        }
    }

    /// The `work/index.html` landing page, built from the service table.
    pub fn compose_landing(&self) -> RenderedPage {
        let landing = &self.config.landing;
        let content = html! {
            div.work-intro {
                h2 {
                    @for (i, line) in landing.heading.iter().enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
                @for paragraph in &landing.paragraphs {
                    p { (paragraph) }
                }
            }
            div.service-grid {
                @for service in &self.config.services {
                    a.service-card href=(service.href()) {
                        img src=(service.image_src()) alt=(service.title);
                        h3 { (service.title) }
                        p { (service.summary) }
                    }
                }
            }
        };
        let html = self
            .document(&landing.title, WORK_NAV, Hero::Compact, false, content)
            .into_string();
        RenderedPage {
            path: PathBuf::from(WORK_NAV).join("index.html"),
            html,
        }
    }

    /// Root `index.html` that immediately sends visitors to the work landing.
    pub fn compose_redirect(&self) -> RenderedPage {
        let refresh = format!("0;url={WORK_INDEX_HREF}");
        let markup = html! {
            (DOCTYPE)
            html lang="ja" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.config.site_name) }
                    meta http-equiv="refresh" content=(refresh);
                    link rel="canonical" href=(WORK_INDEX_HREF);
                }
                body {
                    p {
                        "Redirecting to "
                        a href=(WORK_INDEX_HREF) { "Work page" }
                        "..."
                    }
                }
            }
        };
        RenderedPage {
            path: PathBuf::from("index.html"),
            html: markup.into_string(),
        }
    }

    // ========================================================================
    // HTML Components
    // ========================================================================

    fn document(
        &self,
        title: &str,
        active_nav: &str,
        hero: Hero<'_>,
        show_sidebar: bool,
        content: Markup,
    ) -> Markup {
        html! {
            (DOCTYPE)
            html lang="ja" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) " | " (self.config.site_name) }
                    link rel="stylesheet" href=(STYLESHEET_HREF);
                    link rel="preconnect" href="https://fonts.googleapis.com";
                    link rel="preconnect" href="https://fonts.gstatic.com" crossorigin;
                    link href=(FONTS_HREF) rel="stylesheet";
                }
                body {
                    (self.site_header(active_nav))
                    main {
                        article.service-detail {
                            (self.hero(title, hero))
                            div.container.content-wrapper.no-sidebar[!show_sidebar] {
                                div.content-body {
                                    (content)
                                }
                                @if show_sidebar {
                                    (self.sidebar())
                                }
                            }
                        }
                    }
                    footer.site-footer {
                        div.container {
                            p { (self.config.footer) }
                        }
                    }
                }
            }
        }
    }

    fn site_header(&self, active_nav: &str) -> Markup {
        html! {
            header.site-header {
                div.container {
                    a.logo href="/" { (self.config.site_name) }
                    nav {
                        ul {
                            @for entry in &self.config.nav {
                                li {
                                    a href=(entry.href) class=[(entry.id == active_nav).then_some("active")] {
                                        (entry.label)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn hero(&self, title: &str, hero: Hero<'_>) -> Markup {
        match hero {
            Hero::Image { src, position } => {
                let style = format!("object-position: {position}");
                // Missing images fall back to a solid background client-side
                let onerror = format!(
                    "this.style.display='none';this.parentElement.style.backgroundColor='{}'",
                    self.config.colors.primary
                );
                html! {
                    div.hero-image {
                        img.hero-bg src=(src) alt=(title) style=(style) onerror=(onerror);
                        div.container {
                            h1 { (title) }
                        }
                    }
                }
            }
            Hero::Compact => html! {
                div.hero-image.hero-compact {
                    div.container {
                        h1 { (title) }
                    }
                }
            },
        }
    }

    fn sidebar(&self) -> Markup {
        let sidebar = &self.config.sidebar;
        html! {
            aside.sidebar {
                div.contact-box {
                    h3 { (sidebar.contact_heading) }
                    p { (sidebar.contact_text) }
                    a.btn.btn-primary href=(sidebar.contact_href) { (sidebar.contact_label) }
                }
                div.service-list {
                    h3 { (sidebar.services_heading) }
                    ul {
                        @for service in &self.config.services {
                            li { a href=(service.href()) { (service.title) } }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
