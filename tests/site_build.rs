//! End-to-end build of the fixture content directory.

use folio::config::load_config;
use folio::filter::{Category, filter};
use folio::generate::generate;
use folio::preference::{LanguageContext, PreferenceStore};
use folio::source::{ContentSource, FsSource};
use folio::types::Language;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

fn build() -> TempDir {
    let out = TempDir::new().unwrap();
    let config = load_config(&fixtures()).unwrap();
    let source = FsSource::new(fixtures());
    generate(&source, &config, Language::En, out.path()).unwrap();
    out
}

#[test]
fn writes_both_language_trees() {
    let out = TempDir::new().unwrap();
    let config = load_config(&fixtures()).unwrap();
    let report = generate(&FsSource::new(fixtures()), &config, Language::Vi, out.path()).unwrap();

    for code in ["vi", "en"] {
        for rel in [
            "index.html",
            "projects/index.html",
            "projects/ai/index.html",
            "projects/iot/index.html",
            "blog/index.html",
            "blog/tags/rust/index.html",
            "blog/hello-rust/index.html",
            "blog/markdown-notes/index.html",
        ] {
            assert!(
                out.path().join(code).join(rel).is_file(),
                "missing {code}/{rel}"
            );
        }
    }
    assert!(out.path().join("index.html").is_file());
    assert!(out.path().join("404.html").is_file());

    // 11 pages per language plus the chooser and the 404 page
    assert_eq!(report.pages.len(), 24);
    assert_eq!(report.languages.len(), 2);
    assert_eq!(report.languages[0].posts, 2);
    assert_eq!(report.languages[0].missing_strings, 0);
    assert_eq!(report.languages[1].missing_strings, 3);
}

#[test]
fn drafts_never_reach_the_output() {
    let out = build();
    assert!(!out.path().join("en/blog/draft-plans").exists());
    assert!(!out.path().join("en/blog/tags/secret").exists());
    assert!(!read(out.path(), "en/blog/index.html").contains("Plans"));
}

#[test]
fn pages_are_localized() {
    let out = build();
    let vi = read(out.path(), "vi/blog/hello-rust/index.html");
    let en = read(out.path(), "en/blog/hello-rust/index.html");

    assert!(vi.contains("<html lang=\"vi\">"));
    assert!(vi.contains("Làm quen với Rust"));
    assert!(vi.contains("15 tháng 3, 2024"));
    assert!(en.contains("Hello Rust"));
    assert!(en.contains("March 15, 2024"));
    assert!(!en.contains("Làm quen với Rust"));
}

#[test]
fn post_body_is_rendered_safely() {
    let out = build();
    let html = read(out.path(), "en/blog/hello-rust/index.html");

    assert!(html.contains("<h2>Setup</h2>"));
    assert!(html.contains(
        "<strong><a href=\"https://rustup.rs\" target=\"_blank\" rel=\"noopener noreferrer\">rustup</a></strong>"
    ));
    assert!(html.contains("class=\"language-rust\""));
    assert!(html.contains("&lt;hi&gt;"));
    assert!(html.contains(
        "https://cdn.sanity.io/images/abc123/production/abc123-800x600.jpg"
    ));
    assert!(html.contains("<li>cargo new</li>"));
    assert!(!html.contains("youtu.be"));
}

#[test]
fn markdown_post_uses_default_code_language() {
    let out = build();
    let html = read(out.path(), "en/blog/markdown-notes/index.html");
    assert!(html.contains("<em>faster</em>"));
    assert!(html.contains("class=\"language-javascript\""));
    assert!(html.contains("href=\"/en/blog/\""));
}

#[test]
fn tag_page_only_lists_tagged_posts() {
    let out = build();
    let html = read(out.path(), "en/blog/tags/writing/index.html");
    assert!(html.contains("Markdown Notes"));
    assert!(!html.contains("Hello Rust"));
}

#[test]
fn missing_translation_shows_key() {
    let out = build();
    let html = read(out.path(), "en/blog/index.html");
    assert!(html.contains("sections.blog"));
}

#[test]
fn listings_carry_search_box() {
    let out = build();
    let blog = read(out.path(), "en/blog/index.html");
    assert!(blog.contains("placeholder=\"Search posts by title, description or tag...\""));
    assert!(blog.contains("data-search=\"hello rust\n"));

    let projects = read(out.path(), "vi/projects/index.html");
    assert!(projects.contains("placeholder=\"Tìm kiếm dự án theo tên, mô tả hoặc công nghệ...\""));

    let tagged = read(out.path(), "en/blog/tags/writing/index.html");
    assert!(tagged.contains("<a class=\"clear-filters\" href=\"/en/blog/\" data-search-clear>"));
}

#[test]
fn root_forwards_to_preferred_language() {
    let out = build();
    let html = read(out.path(), "index.html");
    assert!(html.contains("url=/en/"));
    assert!(html.contains("Tiếng Việt"));
    assert!(html.contains("English"));
}

#[test]
fn saved_preference_selects_language() {
    let state = TempDir::new().unwrap();
    let config = load_config(&fixtures()).unwrap();

    let mut ctx = LanguageContext::load(PreferenceStore::new(state.path()), config.site.default_language);
    assert_eq!(ctx.language(), Language::Vi);
    ctx.set_language(Language::En).unwrap();

    let reloaded = LanguageContext::load(PreferenceStore::new(state.path()), config.site.default_language);
    assert_eq!(reloaded.language(), Language::En);
}

#[test]
fn filtering_fixture_projects() {
    let projects = FsSource::new(fixtures()).projects().unwrap();

    let web = filter(&projects, &Category::from("Web"), "", Language::En);
    let slugs: Vec<&str> = web.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["ai-assistant", "shop-front"]);

    let rust = filter(&projects, &Category::All, "  RUST ", Language::En);
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].slug, "ai-assistant");

    let vi = filter(&projects, &Category::All, "cảm biến", Language::Vi);
    assert_eq!(vi.len(), 1);
    assert_eq!(vi[0].slug, "sensor-hub");
}
