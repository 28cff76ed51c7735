//! Site configuration module.
//!
//! Handles loading and validating the optional `config.toml` in the content
//! root. Every field has a default matching the published site, so a missing
//! file or a sparse one is fine:
//!
//! ```toml
//! site_name = "NPOほかげ"
//!
//! [colors]
//! primary = "#8B5E3C"
//! ```
//!
//! The navigation and service tables are the site's only source for the
//! header links, the landing-page cards and the sidebar service list. Keeping
//! them in one table keeps those three in sync.
//!
//! Unknown keys are rejected to catch typos early. Tables given as arrays
//! (`[[nav]]`, `[[services]]`) replace the defaults wholesale.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Shown as the logo and appended to every page title.
    pub site_name: String,
    /// Footer line.
    pub footer: String,
    /// Title for service documents without a `title` key.
    pub default_service_title: String,
    /// Title for standalone documents without a `title` key.
    pub default_page_title: String,
    /// Hero `object-position` for documents without an `imagePosition` key.
    pub default_image_position: String,
    /// Header navigation, in display order.
    pub nav: Vec<NavEntry>,
    /// Known services, in display order.
    pub services: Vec<ServiceEntry>,
    pub sidebar: SidebarConfig,
    pub landing: LandingConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "NPOほかげ".to_string(),
            footer: "© 2024 NPO Hokage. All Rights Reserved.".to_string(),
            default_service_title: "Service".to_string(),
            default_page_title: "Page".to_string(),
            default_image_position: "center center".to_string(),
            nav: default_nav(),
            services: default_services(),
            sidebar: SidebarConfig::default(),
            landing: LandingConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate table contents.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.services.is_empty() {
            return Err(ConfigError::Validation("services must not be empty".into()));
        }
        let mut slugs = HashSet::new();
        for service in &self.services {
            if !is_safe_slug(&service.slug) {
                return Err(ConfigError::Validation(format!(
                    "services: invalid slug {:?}",
                    service.slug
                )));
            }
            if !slugs.insert(service.slug.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "services: duplicate slug {:?}",
                    service.slug
                )));
            }
        }
        let mut ids = HashSet::new();
        for entry in &self.nav {
            if !ids.insert(entry.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "nav: duplicate id {:?}",
                    entry.id
                )));
            }
        }
        self.colors.validate()
    }
}

/// Slug whose output file is generated by the builder itself: `work/index.html`
/// is the landing page and `index.html` the root redirect.
pub const RESERVED_SLUG: &str = "index";

/// A slug is used verbatim as a filename, so it must be a single plain
/// path component that does not collide with a generated page.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && slug != RESERVED_SLUG
        && !slug.contains(['/', '\\'])
}

/// One header navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    /// Matched against a page's active-navigation id.
    pub id: String,
    pub label: String,
    pub href: String,
}

impl NavEntry {
    fn new(id: &str, label: &str, href: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

fn default_nav() -> Vec<NavEntry> {
    vec![
        NavEntry::new("home", "Home", "/"),
        NavEntry::new("about", "About", "/about.html"),
        NavEntry::new("work", "Work", "/work"),
        NavEntry::new("contact", "Contact", "/contact"),
    ]
}

/// One service offered, shown as a landing card and a sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    pub slug: String,
    pub title: String,
    /// One-line description on the landing card.
    pub summary: String,
}

impl ServiceEntry {
    fn new(slug: &str, title: &str, summary: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("/work/{}.html", self.slug)
    }

    pub fn image_src(&self) -> String {
        format!("/images/services/{}.jpg", self.slug)
    }
}

fn default_services() -> Vec<ServiceEntry> {
    vec![
        ServiceEntry::new(
            "homepage",
            "ホームページ制作",
            "新規作成からリニューアル、日々の更新までサポートします。",
        ),
        ServiceEntry::new(
            "design",
            "デザイン制作",
            "チラシ、名刺、パンフレットなど、想いをカタチにします。",
        ),
        ServiceEntry::new(
            "logo",
            "ロゴ・キャラクター",
            "ブランドの顔となるロゴや親しみやすいキャラクターを制作。",
        ),
        ServiceEntry::new(
            "webad",
            "Web広告運用",
            "効果的なWeb広告で、ターゲットに情報を届けます。",
        ),
        ServiceEntry::new(
            "system",
            "システム開発",
            "業務効率化のためのシステムやツールを開発します。",
        ),
        ServiceEntry::new(
            "support",
            "ITサポート",
            "パソコンやソフトの操作など、ITに関するお困りごとを解決。",
        ),
        ServiceEntry::new(
            "consulting",
            "業務改善コンサル",
            "業務フローの見直しやデジタル化で、効率アップを支援。",
        ),
    ]
}

/// Sidebar copy on service pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    pub contact_heading: String,
    pub contact_text: String,
    pub contact_label: String,
    pub contact_href: String,
    pub services_heading: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            contact_heading: "お問い合わせ".to_string(),
            contact_text: "このサービスに関するご相談・お見積もりはこちらから".to_string(),
            contact_label: "お問い合わせフォーム".to_string(),
            contact_href: "/contact".to_string(),
            services_heading: "その他の事業".to_string(),
        }
    }
}

/// Copy for the `work/index.html` landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    pub title: String,
    /// Heading lines, joined with line breaks.
    pub heading: Vec<String>,
    pub paragraphs: Vec<String>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            title: "Work".to_string(),
            heading: vec![
                "「誰かがやってくれたらいいのに...」に、".to_string(),
                "私たちがお応えします。".to_string(),
            ],
            paragraphs: vec![
                "みなさんの業務や活動における「手が足りない」「手間がかかる」「得意じゃない」をサポートします。".to_string(),
                "NPOほかげは、平取町への移住者が持つ多様なスキルや経験を活かし、地域の皆さまの「困った」を解決する「しごとBANK」事業から始まりました。".to_string(),
                "現在ではウェブ制作やシステム開発を主軸に、専門的な知識と技術で皆さまの事業を力強く後押しします。".to_string(),
            ],
        }
    }
}

/// Palette written as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Links, buttons, headings, and the hero fallback background.
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    pub white: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#8B5E3C".to_string(),
            secondary: "#556B2F".to_string(),
            accent: "#D2691E".to_string(),
            text: "#333333".to_string(),
            background: "#FDFBF7".to_string(),
            white: "#FFFFFF".to_string(),
        }
    }
}

impl ColorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("text", &self.text),
            ("background", &self.background),
            ("white", &self.white),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Load config from `config.toml` in the given directory.
///
/// Returns defaults when the file does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// Parse and validate a config document.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Generate the `:root` custom properties from the palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
  --color-primary: {primary};
  --color-secondary: {secondary};
  --color-accent: {accent};
  --color-text: {text};
  --color-bg: {background};
  --color-white: {white};
}}"#,
        primary = colors.primary,
        secondary = colors.secondary,
        accent = colors.accent,
        text = colors.text,
        background = colors.background,
        white = colors.white,
    )
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# Place this file at <content>/config.toml. All settings are optional;
# values shown below are the defaults. Unknown keys cause an error.

# Logo text, also appended to every page title.
site_name = "NPOほかげ"

# Footer line.
footer = "© 2024 NPO Hokage. All Rights Reserved."

# Titles used when a document has no `title:` front-matter key.
default_service_title = "Service"
default_page_title = "Page"

# Hero image object-position when a document has no `imagePosition:` key.
default_image_position = "center center"

# ---------------------------------------------------------------------------
# Service page sidebar
# ---------------------------------------------------------------------------
[sidebar]
contact_heading = "お問い合わせ"
contact_text = "このサービスに関するご相談・お見積もりはこちらから"
contact_label = "お問い合わせフォーム"
contact_href = "/contact"
services_heading = "その他の事業"

# ---------------------------------------------------------------------------
# work/index.html landing page
# ---------------------------------------------------------------------------
[landing]
title = "Work"
# Heading lines are joined with line breaks.
heading = ["「誰かがやってくれたらいいのに...」に、", "私たちがお応えします。"]
paragraphs = [
    "みなさんの業務や活動における「手が足りない」「手間がかかる」「得意じゃない」をサポートします。",
    "NPOほかげは、平取町への移住者が持つ多様なスキルや経験を活かし、地域の皆さまの「困った」を解決する「しごとBANK」事業から始まりました。",
    "現在ではウェブ制作やシステム開発を主軸に、専門的な知識と技術で皆さまの事業を力強く後押しします。",
]

# ---------------------------------------------------------------------------
# Palette (CSS custom properties in styles/main.css)
# ---------------------------------------------------------------------------
[colors]
primary = "#8B5E3C"      # Links, buttons, hero fallback
secondary = "#556B2F"
accent = "#D2691E"
text = "#333333"
background = "#FDFBF7"
white = "#FFFFFF"

# ---------------------------------------------------------------------------
# Header navigation. `id` is matched against the page being rendered:
# service pages use "work", standalone pages use their slug.
# ---------------------------------------------------------------------------
[[nav]]
id = "home"
label = "Home"
href = "/"

[[nav]]
id = "about"
label = "About"
href = "/about.html"

[[nav]]
id = "work"
label = "Work"
href = "/work"

[[nav]]
id = "contact"
label = "Contact"
href = "/contact"

# ---------------------------------------------------------------------------
# Services. Feeds both the landing-page cards and the sidebar list.
# Each slug should match a document in <content>/services/.
# ---------------------------------------------------------------------------
[[services]]
slug = "homepage"
title = "ホームページ制作"
summary = "新規作成からリニューアル、日々の更新までサポートします。"

[[services]]
slug = "design"
title = "デザイン制作"
summary = "チラシ、名刺、パンフレットなど、想いをカタチにします。"

[[services]]
slug = "logo"
title = "ロゴ・キャラクター"
summary = "ブランドの顔となるロゴや親しみやすいキャラクターを制作。"

[[services]]
slug = "webad"
title = "Web広告運用"
summary = "効果的なWeb広告で、ターゲットに情報を届けます。"

[[services]]
slug = "system"
title = "システム開発"
summary = "業務効率化のためのシステムやツールを開発します。"

[[services]]
slug = "support"
title = "ITサポート"
summary = "パソコンやソフトの操作など、ITに関するお困りごとを解決。"

[[services]]
slug = "consulting"
title = "業務改善コンサル"
summary = "業務フローの見直しやデジタル化で、効率アップを支援。"
"##
}
