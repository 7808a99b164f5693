//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is a content inventory, not a file listing. Every entity leads with
//! its positional index and resolved title; slugs, tags and other context sit
//! on indented lines below it.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 Hello Rust (2024-03-15)
//!     Slug: hello-rust
//!     Tags: Rust, Web
//!
//! Projects
//! 001 AI Assistant
//!     Slug: ai-assistant
//!     Categories: AI, Web
//!
//! Translations
//!     vi: 42 strings
//!     en: 40 strings, 2 UI keys missing: sections.blogSubtitle, common.viewAll
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! ```text
//! vi → vi/index.html
//!     3 posts, 2 projects, 4 tags
//! en → en/index.html
//!     3 posts, 2 projects, 4 tags, 2 UI strings missing
//!
//! Generated 31 pages in dist
//! ```
//!
//! ## List
//!
//! ```text
//! 001 Hello Rust
//!     Tags: Rust, Web
//!     A first look at ownership and...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::filter::ContentItem;
use crate::generate::{GenerateReport, format_date, missing_ui_strings};
use crate::translation::Translations;
use crate::types::{BlogPost, Language, Project};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Index + title, with an optional parenthesized detail.
///
/// ```text
/// 001 Hello Rust (2024-03-15)
/// 002 (untitled)
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    let title = if title.is_empty() { "(untitled)" } else { title };
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((byte, _)) => format!("{}...", &text[..byte]),
    }
}

fn context_line(depth: usize, label: &str, values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| format!("{}{}: {}", indent(depth), label, values.join(", ")))
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of a content directory.
///
/// Titles use whichever language is populated; the inventory is a diagnostic
/// view, not a page.
pub fn format_check_output(
    posts: &[BlogPost],
    projects: &[Project],
    translations: &Translations,
    problems: &[String],
    has_config: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    if posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in posts.iter().enumerate() {
        let date = post
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string());
        lines.push(entity_header(i + 1, post.title.any(), date.as_deref()));
        lines.push(format!("{}Slug: {}", indent(1), post.slug));
        lines.extend(context_line(1, "Tags", &post.tags));
    }

    lines.push(String::new());
    lines.push("Projects".to_string());
    if projects.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, project) in projects.iter().enumerate() {
        lines.push(entity_header(i + 1, project.title.any(), None));
        lines.push(format!("{}Slug: {}", indent(1), project.slug));
        lines.extend(context_line(1, "Categories", &project.tags));
    }

    lines.push(String::new());
    lines.push("Translations".to_string());
    for language in Language::ALL {
        let missing = missing_ui_strings(translations, language);
        let mut line = format!(
            "{}{}: {} strings",
            indent(1),
            language,
            translations.leaf_count(language)
        );
        if !missing.is_empty() {
            line.push_str(&format!(
                ", {} UI keys missing: {}",
                missing.len(),
                missing.join(", ")
            ));
        }
        lines.push(line);
    }

    if !problems.is_empty() {
        lines.push(String::new());
        lines.push("Problems".to_string());
        for problem in problems {
            lines.push(format!("{}{}", indent(1), problem));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if has_config {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }

    lines
}

pub fn print_check_output(
    posts: &[BlogPost],
    projects: &[Project],
    translations: &Translations,
    problems: &[String],
    has_config: bool,
) {
    for line in format_check_output(posts, projects, translations, problems, has_config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    for summary in &report.languages {
        let code = summary.language.code();
        lines.push(format!("{} → {}/index.html", code, code));
        let mut detail = format!(
            "{}{} posts, {} projects, {} tags",
            indent(1),
            summary.posts,
            summary.projects,
            summary.tags
        );
        if summary.missing_strings > 0 {
            detail.push_str(&format!(", {} UI strings missing", summary.missing_strings));
        }
        lines.push(detail);
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages in {}",
        report.pages.len(),
        report.output_dir.display()
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// List / show
// ============================================================================

/// Filtered listing in one language.
pub fn format_listing<T: ContentItem>(items: &[T], language: Language) -> Vec<String> {
    if items.is_empty() {
        return vec!["No matching items".to_string()];
    }
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        lines.push(entity_header(i + 1, item.title(language), None));
        lines.extend(context_line(1, "Tags", item.tags()));
        let summary = item.summary(language).trim();
        if !summary.is_empty() {
            lines.push(format!("{}{}", indent(1), truncate_desc(summary, 60)));
        }
    }
    lines
}

pub fn print_listing<T: ContentItem>(items: &[T], language: Language) {
    for line in format_listing(items, language) {
        println!("{}", line);
    }
}

/// One post resolved for `language`, body as plain text.
pub fn format_post(post: &BlogPost, language: Language) -> Vec<String> {
    let mut lines = vec![ContentItem::title(post, language).to_string()];
    if let Some(date) = &post.published_at {
        lines.push(format!("{}{}", indent(1), format_date(date, language)));
    }
    lines.extend(context_line(1, "Tags", &post.tags));
    let body = post.content.get(language).plain_text();
    if !body.is_empty() {
        lines.push(String::new());
        lines.push(body);
    }
    lines
}

pub fn print_post(post: &BlogPost, language: Language) {
    for line in format_post(post, language) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
