//! End-to-end builds against temporary content trees.

use hokage_site::assemble::{self, BuildEvent, BuildPaths, BuildReport};
use hokage_site::config::{self, SiteConfig};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn site() -> (TempDir, BuildPaths) {
    let tmp = TempDir::new().unwrap();
    let paths = BuildPaths {
        content_dir: tmp.path().join("website/content"),
        output_dir: tmp.path().join("website/dist"),
        public_dir: tmp.path().join("website/public"),
    };
    write(
        &paths.services_dir().join("homepage.md"),
        "---\ntitle: ホームページ制作\nslug: homepage\n---\n# 見出し\n",
    );
    write(
        &paths.pages_dir().join("about.md"),
        "---\ntitle: About\nimagePosition: top center\n---\n私たちについて\n",
    );
    write(
        &paths.images_dir().join("services/homepage.jpg"),
        "jpeg bytes",
    );
    (tmp, paths)
}

fn build(paths: &BuildPaths) -> (BuildReport, Vec<BuildEvent>) {
    let config = config::load_config(&paths.content_dir).unwrap();
    let mut events = Vec::new();
    let report = assemble::build(&config, paths, |e| events.push(e)).unwrap();
    (report, events)
}

fn read(paths: &BuildPaths, rel: &str) -> String {
    fs::read_to_string(paths.output_dir.join(rel)).unwrap()
}

fn tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
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

#[test]
fn service_page_has_title_and_rendered_body() {
    let (_tmp, paths) = site();
    build(&paths);

    let html = read(&paths, "work/homepage.html");
    assert!(html.contains("<h1>ホームページ制作</h1>"));
    assert!(html.contains("<h1>見出し</h1>"));
    assert!(html.contains(r#"src="/images/services/homepage.jpg""#));
    assert!(html.contains(r#"<aside class="sidebar">"#));
    assert!(html.contains(r#"<a href="/work" class="active">"#));
}

#[test]
fn document_without_metadata_gets_defaults() {
    let (_tmp, paths) = site();
    write(&paths.services_dir().join("design.md"), "## デザイン\n");
    build(&paths);

    let html = read(&paths, "work/design.html");
    assert!(html.contains("<h1>Service</h1>"));
    assert!(html.contains("<h2>デザイン</h2>"));
    assert!(html.contains("object-position: center center"));
}

#[test]
fn standalone_page_uses_own_image_and_no_sidebar() {
    let (_tmp, paths) = site();
    build(&paths);

    let html = read(&paths, "about.html");
    assert!(html.contains("<h1>About</h1>"));
    assert!(html.contains(r#"src="/images/about.jpg""#));
    assert!(html.contains("object-position: top center"));
    assert!(html.contains(r#"<a href="/about.html" class="active">"#));
    assert!(!html.contains("<aside"));
}

#[test]
fn missing_pages_directory_still_builds() {
    let (_tmp, paths) = site();
    fs::remove_dir_all(paths.pages_dir()).unwrap();
    let (report, events) = build(&paths);

    assert_eq!(report.standalone_pages, 0);
    assert!(report.is_clean());
    assert!(
        events
            .iter()
            .any(|e| matches!(e, BuildEvent::PagesSkipped { .. }))
    );
    assert!(paths.output_dir.join("work/homepage.html").is_file());
    assert!(paths.output_dir.join("work/index.html").is_file());
    assert!(paths.output_dir.join("index.html").is_file());
}

#[test]
fn missing_public_images_still_builds() {
    let (_tmp, paths) = site();
    fs::remove_dir_all(&paths.public_dir).unwrap();
    let (report, _) = build(&paths);

    assert_eq!(report.assets_copied, 0);
    let images = paths.output_dir.join("images");
    assert!(images.is_dir());
    assert_eq!(fs::read_dir(&images).unwrap().count(), 0);
    for rel in [
        "index.html",
        "about.html",
        "styles/main.css",
        "work/index.html",
        "work/homepage.html",
    ] {
        assert!(paths.output_dir.join(rel).is_file(), "{rel} missing");
    }
}

#[test]
fn landing_lists_every_configured_service() {
    let (_tmp, paths) = site();
    build(&paths);

    let html = read(&paths, "work/index.html");
    let config = SiteConfig::default();
    assert_eq!(
        html.matches(r#"class="service-card""#).count(),
        config.services.len()
    );
    for service in &config.services {
        assert!(html.contains(&format!(r#"href="/work/{}.html""#, service.slug)));
    }
}

#[test]
fn root_redirects_to_work() {
    let (_tmp, paths) = site();
    build(&paths);
    let html = read(&paths, "index.html");
    assert!(html.contains(r#"content="0;url=/work/""#));
}

#[test]
fn config_file_overrides_site_name() {
    let (_tmp, paths) = site();
    write(
        &paths.content_dir.join("config.toml"),
        "site_name = \"Test Site\"\n",
    );
    build(&paths);
    let html = read(&paths, "work/homepage.html");
    assert!(html.contains("<title>ホームページ制作 | Test Site</title>"));
}

#[test]
fn repeated_builds_are_identical() {
    let (_tmp, paths) = site();
    build(&paths);
    let first = tree(&paths.output_dir);
    build(&paths);
    let second = tree(&paths.output_dir);
    assert_eq!(first, second);
}
