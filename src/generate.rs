//! HTML site generation.
//!
//! Reads everything through the fetch boundary of a
//! [`ContentSource`](crate::source::ContentSource), then writes one static
//! page per language, listing and post.
//!
//! ## Generated Pages
//!
//! ```text
//! dist/
//! ├── index.html                       # Language chooser → preferred language
//! ├── 404.html                         # Not-found page
//! ├── vi/
//! │   ├── index.html                   # Profile, experience, featured projects, latest posts
//! │   ├── projects/
//! │   │   ├── index.html               # All projects + category chips
//! │   │   └── <category>/index.html    # Projects filtered by category
//! │   └── blog/
//! │       ├── index.html               # All published posts + tag chips
//! │       ├── tags/<tag>/index.html    # Posts filtered by tag
//! │       └── <slug>/index.html        # Full post
//! └── en/
//!     └── ...                          # Same tree in English
//! ```
//!
//! Filtered listings go through [`filter`](crate::filter::filter), so a tag
//! page shows exactly what the filter engine returns, drafts never included.
//! A tag with no matching posts still gets a page carrying the localized
//! "no posts" message.
//!
//! ## Missing data
//!
//! A source error is logged at the fetch boundary and the affected part of the
//! site degrades: no profile section, or a "not found" notice in place of a
//! listing. An empty listing is not an error and renders the "no posts" text.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the color
//! custom properties generated from `config.toml`.
//!
//! ## Search
//!
//! Listing pages carry a search box. Each card holds its
//! [`search_text`](crate::filter::search_text) in `data-search`, and the
//! embedded `static/search.js` hides cards that do not contain the term, the
//! same way the search stage of the filter engine does.

use crate::config::{self, SiteConfig};
use crate::document::DocumentTree;
use crate::filter::{Category, collect_tags, filter, search_text};
use crate::localize::resolve;
use crate::render::{RenderContext, asset_url, is_external, is_safe_href, render_document};
use crate::slug::slugify;
use crate::source::{ContentSource, Fetched, fetch, fetch_all};
use crate::translation::{Translations, Translator};
use crate::types::{BlogPost, CoverImage, Language, Profile, Project};
use chrono::{DateTime, Datelike, FixedOffset};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SEARCH_JS: &str = include_str!("../static/search.js");

/// Words per minute used when a post does not set its reading time.
const WORDS_PER_MINUTE: u32 = 200;

/// Projects shown on the home page.
const FEATURED_PROJECTS: usize = 4;

/// Posts shown on the home page.
const LATEST_POSTS: usize = 3;

/// Tags shown on a post card before collapsing into `+N`.
const CARD_TAGS: usize = 3;

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Every translation key the generated pages read.
pub const UI_KEYS: &[&str] = &[
    "nav.about",
    "nav.projects",
    "nav.blog",
    "sections.experience",
    "sections.projects",
    "sections.projectsSubtitle",
    "sections.blog",
    "sections.blogSubtitle",
    "sections.contact",
    "common.allPosts",
    "common.allProjects",
    "common.noPosts",
    "common.noProjects",
    "common.readTime",
    "common.readMore",
    "common.backToBlog",
    "common.viewAll",
    "common.sourceCode",
    "common.liveDemo",
    "common.notFound",
    "common.backHome",
    "common.chooseLanguage",
    "common.searchPosts",
    "common.searchProjects",
    "common.clearFilters",
];

/// UI keys that fall back to their literal key in `language`.
pub fn missing_ui_strings(translations: &Translations, language: Language) -> Vec<&'static str> {
    UI_KEYS
        .iter()
        .copied()
        .filter(|key| translations.translate(key, language) == *key)
        .collect()
}

/// What one language's tree contains.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSummary {
    pub language: Language,
    pub posts: usize,
    pub projects: usize,
    pub tags: usize,
    pub missing_strings: usize,
}

/// Result of a site build, for CLI output.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Paths of every written page, relative to `output_dir`.
    pub pages: Vec<String>,
    pub languages: Vec<LanguageSummary>,
}

/// Everything the page renderers read, loaded once per build.
struct SiteData {
    translations: Translations,
    profile: Option<Profile>,
    projects: Vec<Project>,
    posts: Fetched<Vec<BlogPost>>,
}

impl SiteData {
    fn load(source: &impl ContentSource) -> Self {
        let translations = fetch("translations", source.translations().map(Some))
            .found()
            .unwrap_or_default();
        let profile = fetch("profile", source.profile()).found();
        let projects = fetch_all("projects", source.projects())
            .found()
            .unwrap_or_default();
        let posts = fetch_all("posts", source.all_posts());
        Self {
            translations,
            profile,
            projects,
            posts,
        }
    }

    fn posts(&self) -> &[BlogPost] {
        match &self.posts {
            Fetched::Found(posts) => posts,
            Fetched::NotFound => &[],
        }
    }
}

/// Per-page rendering context: one language, one set of UI strings.
struct Page<'a> {
    config: &'a SiteConfig,
    css: &'a str,
    language: Language,
    t: Translator<'a>,
}

impl<'a> Page<'a> {
    /// Site-absolute link inside this language's tree.
    fn href(&self, path: &str) -> String {
        href(self.config, self.language, path)
    }

    fn render_ctx(&self) -> RenderContext<'a> {
        RenderContext {
            render: &self.config.render,
            cms: &self.config.cms,
        }
    }
}

fn href(config: &SiteConfig, language: Language, path: &str) -> String {
    format!("{}{}/{}", config.site.base_url, language.code(), path)
}

/// Collects written pages.
struct Writer<'a> {
    root: &'a Path,
    pages: Vec<String>,
}

impl Writer<'_> {
    fn page(&mut self, rel: &str, markup: Markup) -> Result<(), GenerateError> {
        let path = self.root.join(rel);
        let io_err = |source| GenerateError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&path, markup.into_string()).map_err(io_err)?;
        tracing::debug!(page = rel, "wrote page");
        self.pages.push(rel.to_string());
        Ok(())
    }
}

/// Build the whole site into `output_dir`.
///
/// `preferred` is the language the root chooser and the 404 page point at.
pub fn generate(
    source: &impl ContentSource,
    config: &SiteConfig,
    preferred: Language,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let data = SiteData::load(source);

    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let mut writer = Writer {
        root: output_dir,
        pages: Vec::new(),
    };
    let mut languages = Vec::new();

    for language in Language::ALL {
        let page = Page {
            config,
            css: &css,
            language,
            t: data.translations.for_language(language),
        };
        let summary = generate_language(&page, &data, &mut writer)?;
        tracing::info!(
            language = %language,
            posts = summary.posts,
            projects = summary.projects,
            tags = summary.tags,
            "generated language tree"
        );
        languages.push(summary);
    }

    let preferred_page = Page {
        config,
        css: &css,
        language: preferred,
        t: data.translations.for_language(preferred),
    };
    writer.page("index.html", render_language_chooser(&preferred_page))?;
    writer.page("404.html", render_not_found(&preferred_page))?;

    tracing::info!(
        pages = writer.pages.len(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages: writer.pages,
        languages,
    })
}

fn generate_language(
    page: &Page<'_>,
    data: &SiteData,
    writer: &mut Writer<'_>,
) -> Result<LanguageSummary, GenerateError> {
    let code = page.language.code();
    let posts = data.posts();

    writer.page(
        &format!("{code}/index.html"),
        render_home(page, data.profile.as_ref(), &data.projects, posts),
    )?;

    // Projects, all and per category
    let categories = collect_tags(&data.projects);
    writer.page(
        &format!("{code}/projects/index.html"),
        render_projects_page(page, &data.projects, &categories, &Category::All),
    )?;
    for (category, slug) in unique_slugs(&categories) {
        writer.page(
            &format!("{code}/projects/{slug}/index.html"),
            render_projects_page(page, &data.projects, &categories, &Category::Tag(category)),
        )?;
    }

    // Blog, all and per tag
    let tags = collect_tags(posts);
    writer.page(
        &format!("{code}/blog/index.html"),
        render_blog_index(page, &data.posts, &tags, &Category::All),
    )?;
    for (tag, slug) in unique_slugs(&tags) {
        writer.page(
            &format!("{code}/blog/tags/{slug}/index.html"),
            render_blog_index(page, &data.posts, &tags, &Category::Tag(tag)),
        )?;
    }
    for post in posts {
        writer.page(
            &format!("{code}/blog/{}/index.html", post.slug),
            render_post_page(page, post),
        )?;
    }

    Ok(LanguageSummary {
        language: page.language,
        posts: posts.len(),
        projects: data.projects.len(),
        tags: tags.len(),
        missing_strings: missing_ui_strings(&data.translations, page.language).len(),
    })
}

/// Pair each tag with its URL slug, dropping tags whose slug is empty or
/// already taken by an earlier tag.
fn unique_slugs(tags: &[String]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let slug = slugify(tag);
        if slug.is_empty() || !seen.insert(slug.clone()) {
            tracing::warn!(tag = %tag, slug = %slug, "tag has no unique URL slug, skipping its page");
            continue;
        }
        out.push((tag.clone(), slug));
    }
    out
}

fn tag_href(page: &Page<'_>, tag: &str) -> String {
    page.href(&format!("blog/tags/{}/", slugify(tag)))
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Long-form date in the page language.
///
/// - `vi`: `15 tháng 3, 2024`
/// - `en`: `March 15, 2024`
pub fn format_date(date: &DateTime<FixedOffset>, language: Language) -> String {
    match language {
        Language::Vi => format!("{} tháng {}, {}", date.day(), date.month(), date.year()),
        Language::En => format!(
            "{} {}, {}",
            EN_MONTHS[date.month0() as usize],
            date.day(),
            date.year()
        ),
    }
}

/// Reading time in minutes, at least one.
pub fn estimate_read_time(body: &DocumentTree) -> u32 {
    let words = body.plain_text().split_whitespace().count() as u32;
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

fn read_time(post: &BlogPost, language: Language) -> u32 {
    post.read_time
        .unwrap_or_else(|| estimate_read_time(post.content.get(language)))
}

/// Cover image URL: explicit URL first, then the CMS asset reference.
fn cover_src(cover: &CoverImage, config: &SiteConfig) -> Option<String> {
    cover.src().map(String::from).or_else(|| {
        let reference = cover.asset.as_ref()?.reference.as_deref()?;
        asset_url(reference, &config.cms.project_id, &config.cms.dataset)
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(page: &Page<'_>, title: &str, content: Markup) -> Markup {
    let site_title = &page.config.site.title;
    let full_title = if title.is_empty() || title == site_title {
        site_title.clone()
    } else {
        format!("{title} · {site_title}")
    };
    html! {
        (DOCTYPE)
        html lang=(page.language.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                style { (page.css) }
            }
            body {
                (content)
                footer.site-footer {
                    "© " (site_title)
                }
            }
        }
    }
}

/// Site header with section links and the language switch.
///
/// `current` is the path of this page inside the language tree; the switch
/// links to the same path in the other language.
fn site_header(page: &Page<'_>, current: &str) -> Markup {
    let other = page.language.other();
    let switch_href = href(page.config, other, current);
    let sections = [
        ("", "nav.about"),
        ("projects/", "nav.projects"),
        ("blog/", "nav.blog"),
    ];
    html! {
        header.site-header {
            a.site-title href=(page.href("")) { (page.config.site.title) }
            nav.site-nav {
                ul {
                    @for (path, key) in sections {
                        @let is_current = section_of(current) == path;
                        li class=[is_current.then_some("current")] {
                            a href=(page.href(path)) { (page.t.t(key)) }
                        }
                    }
                }
                a.lang-switch href=(switch_href) hreflang=(other.code()) lang=(other.code()) {
                    (other.code().to_uppercase())
                }
            }
        }
    }
}

/// Top-level section of a language-relative path (`blog/x/` → `blog/`).
fn section_of(path: &str) -> &str {
    match path.find('/') {
        Some(i) => &path[..=i],
        None => "",
    }
}

fn chip_list(items: &[(String, String, bool)]) -> Markup {
    html! {
        nav.chips {
            @for (label, target, active) in items {
                a.chip.active[*active] href=(target) { (label) }
            }
        }
    }
}

fn tag_list<'t>(page: &Page<'_>, tags: impl IntoIterator<Item = &'t String>) -> Markup {
    html! {
        ul.tags {
            @for tag in tags {
                li { a.tag href=(tag_href(page, tag)) { (tag) } }
            }
        }
    }
}

fn post_meta(page: &Page<'_>, post: &BlogPost) -> Markup {
    html! {
        div.post-meta {
            @if let Some(date) = &post.published_at {
                time datetime=(date.to_rfc3339()) { (format_date(date, page.language)) }
            }
            span.read-time { (read_time(post, page.language)) " " (page.t.t("common.readTime")) }
        }
    }
}

fn post_card(page: &Page<'_>, post: &BlogPost) -> Markup {
    let title = post.title.resolve(page.language);
    let excerpt = resolve(post.excerpt.as_ref(), page.language);
    let post_href = page.href(&format!("blog/{}/", post.slug));
    let cover = post.cover_image.as_ref().and_then(|c| {
        let src = cover_src(c, page.config)?;
        Some((src, c.alt.as_deref().unwrap_or(title)))
    });
    let hidden_tags = post.tags.len().saturating_sub(CARD_TAGS);
    html! {
        article.post-card data-search=(search_text(post, page.language)) {
            a.card-link href=(post_href) {
                @if let Some((src, alt)) = &cover {
                    img.cover src=(src) alt=(alt) loading="lazy";
                }
                (post_meta(page, post))
                h3 { (title) }
                @if !excerpt.is_empty() {
                    p.excerpt { (excerpt) }
                }
                span.read-more { (page.t.t("common.readMore")) " →" }
            }
            @if !post.tags.is_empty() {
                div.card-tags {
                    (tag_list(page, post.tags.iter().take(CARD_TAGS)))
                    @if hidden_tags > 0 {
                        span.more-tags { "+" (hidden_tags) }
                    }
                }
            }
        }
    }
}

fn project_card(page: &Page<'_>, project: &Project) -> Markup {
    let lang = page.language;
    let title = project.title.resolve(lang);
    let role = resolve(project.role.as_ref(), lang);
    let description = resolve(project.description.as_ref(), lang);
    let year = resolve(project.year.as_ref(), lang);
    html! {
        article.project-card id=(project.slug) data-search=(search_text(project, lang)) {
            @if let Some(image) = &project.image {
                img.project-image src=(image) alt=(title) loading="lazy";
            }
            header {
                h3 { (title) }
                @if !role.is_empty() {
                    p.role { (role) }
                }
            }
            @if !project.tags.is_empty() {
                ul.categories {
                    @for tag in &project.tags {
                        li.category { (tag) }
                    }
                }
            }
            @if !description.is_empty() {
                p.description { (description) }
            }
            @if !project.highlights.is_empty() {
                ul.highlights {
                    @for highlight in &project.highlights {
                        li { (highlight.resolve(lang)) }
                    }
                }
            }
            @if !project.tech.is_empty() {
                ul.tech {
                    @for tech in &project.tech {
                        li { (tech) }
                    }
                }
            }
            @if !year.is_empty() || project.team.is_some() {
                div.project-meta {
                    @if !year.is_empty() {
                        span.year { (year) }
                    }
                    @if let Some(team) = project.team {
                        span.team { (team) }
                    }
                }
            }
            div.project-links {
                @if let Some(github) = &project.github {
                    (external_link(github, page.t.t("common.sourceCode")))
                }
                @if let Some(link) = &project.link {
                    (external_link(link, page.t.t("common.liveDemo")))
                }
            }
        }
    }
}

fn external_link(target: &str, label: &str) -> Markup {
    html! {
        @if !is_safe_href(target) {
            (label)
        } @else if is_external(target) {
            a href=(target) target="_blank" rel="noopener noreferrer" { (label) }
        } @else {
            a href=(target) { (label) }
        }
    }
}

/// Search box for a listing page. The clear link points at the unfiltered
/// listing and starts visible on a category or tag page.
fn search_controls(page: &Page<'_>, placeholder_key: &str, clear_href: &str, filtered: bool) -> Markup {
    let placeholder = page.t.t(placeholder_key);
    html! {
        div.search-bar {
            input type="search" data-search-input placeholder=(placeholder) aria-label=(placeholder);
            a.clear-filters href=(clear_href) data-search-clear hidden[!filtered] {
                (page.t.t("common.clearFilters"))
            }
        }
    }
}

fn section_heading(page: &Page<'_>, title_key: &str, subtitle_key: &str) -> Markup {
    let subtitle = page.t.t(subtitle_key);
    html! {
        header.section-header {
            h1 { (page.t.t(title_key)) }
            // An untranslated subtitle is left out rather than showing its key.
            @if subtitle != subtitle_key {
                p.subtitle { (subtitle) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(
    page: &Page<'_>,
    profile: Option<&Profile>,
    projects: &[Project],
    posts: &[BlogPost],
) -> Markup {
    let lang = page.language;
    let title = profile.map(|p| p.name.resolve(lang)).unwrap_or_default();
    let content = html! {
        (site_header(page, ""))
        main.home-page {
            @if let Some(profile) = profile {
                (render_profile(page, profile))
            }
            @if !projects.is_empty() {
                section.featured-projects {
                    h2 { (page.t.t("sections.projects")) }
                    div.project-grid {
                        @for project in projects.iter().take(FEATURED_PROJECTS) {
                            (project_card(page, project))
                        }
                    }
                    a.view-all href=(page.href("projects/")) { (page.t.t("common.viewAll")) " →" }
                }
            }
            @if !posts.is_empty() {
                section.latest-posts {
                    h2 { (page.t.t("sections.blog")) }
                    div.post-grid {
                        @for post in posts.iter().take(LATEST_POSTS) {
                            (post_card(page, post))
                        }
                    }
                    a.view-all href=(page.href("blog/")) { (page.t.t("common.viewAll")) " →" }
                }
            }
        }
    };
    base_document(page, title, content)
}

fn render_profile(page: &Page<'_>, profile: &Profile) -> Markup {
    let lang = page.language;
    let name = profile.name.resolve(lang);
    let role = resolve(profile.role.as_ref(), lang);
    let summary = resolve(profile.summary.as_ref(), lang);
    let contacts = &profile.contacts;
    html! {
        section.profile {
            @if let Some(avatar) = &profile.avatar {
                @let alt = resolve(avatar.alt.as_ref(), lang);
                img.avatar src=(avatar.src) alt=(if alt.is_empty() { name } else { alt });
            }
            h1 { (name) }
            @if !role.is_empty() {
                p.role { (role) }
            }
            @if !summary.is_empty() {
                p.summary { (summary) }
            }
            @if contacts.email.is_some() || contacts.github.is_some() || contacts.linkedin.is_some() {
                ul.contacts aria-label=(page.t.t("sections.contact")) {
                    @if let Some(email) = &contacts.email {
                        li { a href={ "mailto:" (email) } { (email) } }
                    }
                    @if let Some(github) = &contacts.github {
                        li { (external_link(github, "GitHub")) }
                    }
                    @if let Some(linkedin) = &contacts.linkedin {
                        li { (external_link(linkedin, "LinkedIn")) }
                    }
                }
            }
        }
        @if !profile.experience.is_empty() {
            section.experience {
                h2 { (page.t.t("sections.experience")) }
                ol.timeline {
                    @for entry in &profile.experience {
                        @let period = resolve(entry.period.as_ref(), lang);
                        @let description = resolve(entry.description.as_ref(), lang);
                        li {
                            h3 { (entry.position.resolve(lang)) }
                            p.company { (entry.company.resolve(lang)) }
                            @if !period.is_empty() {
                                span.period { (period) }
                            }
                            @if !description.is_empty() {
                                p { (description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_projects_page(
    page: &Page<'_>,
    projects: &[Project],
    categories: &[String],
    active: &Category,
) -> Markup {
    let shown = filter(projects, active, "", page.language);
    let mut chips = vec![(
        page.t.t("common.allProjects").to_string(),
        page.href("projects/"),
        *active == Category::All,
    )];
    for category in categories {
        chips.push((
            category.clone(),
            page.href(&format!("projects/{}/", slugify(category))),
            active.as_str() == category,
        ));
    }
    let current = match active {
        Category::All => "projects/".to_string(),
        Category::Tag(tag) => format!("projects/{}/", slugify(tag)),
    };

    let content = html! {
        (site_header(page, &current))
        main.projects-page {
            (section_heading(page, "sections.projects", "sections.projectsSubtitle"))
            (search_controls(page, "common.searchProjects", &page.href("projects/"), *active != Category::All))
            @if !categories.is_empty() {
                (chip_list(&chips))
            }
            @if shown.is_empty() {
                p.empty { (page.t.t("common.noProjects")) }
            } @else {
                div.project-grid {
                    @for project in &shown {
                        (project_card(page, project))
                    }
                }
                p.empty data-search-empty hidden { (page.t.t("common.noProjects")) }
            }
            script { (PreEscaped(SEARCH_JS)) }
        }
    };
    base_document(page, page.t.t("sections.projects"), content)
}

fn render_blog_index(
    page: &Page<'_>,
    posts: &Fetched<Vec<BlogPost>>,
    tags: &[String],
    active: &Category,
) -> Markup {
    let mut chips = vec![(
        page.t.t("common.allPosts").to_string(),
        page.href("blog/"),
        *active == Category::All,
    )];
    for tag in tags {
        chips.push((tag.clone(), tag_href(page, tag), active.as_str() == tag));
    }
    let current = match active {
        Category::All => "blog/".to_string(),
        Category::Tag(tag) => format!("blog/tags/{}/", slugify(tag)),
    };

    let content = html! {
        (site_header(page, &current))
        main.blog-page {
            (section_heading(page, "sections.blog", "sections.blogSubtitle"))
            @match posts {
                Fetched::NotFound => {
                    p.empty { (page.t.t("common.notFound")) }
                }
                Fetched::Found(posts) => {
                    (search_controls(page, "common.searchPosts", &page.href("blog/"), *active != Category::All))
                    @if !tags.is_empty() {
                        (chip_list(&chips))
                    }
                    @let shown = filter(posts, active, "", page.language);
                    @if shown.is_empty() {
                        p.empty { (page.t.t("common.noPosts")) }
                    } @else {
                        div.post-grid {
                            @for post in shown {
                                (post_card(page, post))
                            }
                        }
                        p.empty data-search-empty hidden { (page.t.t("common.noPosts")) }
                    }
                    script { (PreEscaped(SEARCH_JS)) }
                }
            }
        }
    };
    base_document(page, page.t.t("sections.blog"), content)
}

fn render_post_page(page: &Page<'_>, post: &BlogPost) -> Markup {
    let lang = page.language;
    let title = post.title.resolve(lang);
    let excerpt = resolve(post.excerpt.as_ref(), lang);
    let cover = post.cover_image.as_ref().and_then(|c| {
        let src = cover_src(c, page.config)?;
        Some((src, c.alt.as_deref().unwrap_or(title)))
    });
    let back = html! {
        a.back-link href=(page.href("blog/")) { "← " (page.t.t("common.backToBlog")) }
    };

    let content = html! {
        (site_header(page, &format!("blog/{}/", post.slug)))
        main.post-page {
            article.post {
                (back)
                @if let Some((src, alt)) = &cover {
                    img.post-cover src=(src) alt=(alt);
                }
                h1 { (title) }
                (post_meta(page, post))
                @if !excerpt.is_empty() {
                    p.lead { (excerpt) }
                }
                @if !post.tags.is_empty() {
                    (tag_list(page, &post.tags))
                }
                (render_document(post.content.get(lang), page.render_ctx()))
                footer.post-footer {
                    (back)
                }
            }
        }
    };
    base_document(page, title, content)
}

/// Root page: links to both language trees and forwards to the preferred one.
fn render_language_chooser(page: &Page<'_>) -> Markup {
    let target = page.href("");
    let site_title = &page.config.site.title;
    html! {
        (DOCTYPE)
        html lang=(page.language.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                title { (site_title) }
                style { (page.css) }
            }
            body {
                main.language-chooser {
                    h1 { (site_title) }
                    p { (page.t.t("common.chooseLanguage")) }
                    ul {
                        @for language in Language::ALL {
                            li {
                                a href=(href(page.config, language, "")) hreflang=(language.code()) lang=(language.code()) {
                                    (language.native_name())
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_not_found(page: &Page<'_>) -> Markup {
    let content = html! {
        (site_header(page, ""))
        main.not-found-page {
            h1 { "404" }
            p { (page.t.t("common.notFound")) }
            a href=(page.href("")) { (page.t.t("common.backHome")) }
        }
    };
    base_document(page, "404", content)
}

// ============================================================================
// Tests
// ============================================================================
