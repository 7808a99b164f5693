//! Tag and free-text filtering over content listings.
//!
//! Listings are small and fully loaded, so filtering is a plain recomputation
//! over the whole slice every time the tag, search term or language changes.
//! Both stages keep input order; the result is never re-sorted.
//!
//! ```text
//! items ──▶ drop drafts ──▶ category stage ──▶ search stage ──▶ Vec<&item>
//!                           "all" = no-op      "" = no-op
//! ```

use crate::localize::resolve;
use crate::types::{BlogPost, Language, Project};

/// Name of the neutral category.
pub const ALL: &str = "all";

/// Something that can appear in a filtered listing.
pub trait ContentItem {
    /// Resolved title.
    fn title(&self, language: Language) -> &str;
    /// Resolved description or excerpt.
    fn summary(&self, language: Language) -> &str;
    /// Normalized classification.
    fn tags(&self) -> &[String];
    /// Extra strings matched by search only (e.g. technologies).
    fn keywords(&self) -> &[String] {
        &[]
    }
    fn is_draft(&self) -> bool {
        false
    }
}

impl<T: ContentItem + ?Sized> ContentItem for &T {
    fn title(&self, language: Language) -> &str {
        (**self).title(language)
    }
    fn summary(&self, language: Language) -> &str {
        (**self).summary(language)
    }
    fn tags(&self) -> &[String] {
        (**self).tags()
    }
    fn keywords(&self) -> &[String] {
        (**self).keywords()
    }
    fn is_draft(&self) -> bool {
        (**self).is_draft()
    }
}

impl ContentItem for BlogPost {
    fn title(&self, language: Language) -> &str {
        self.title.resolve(language)
    }
    fn summary(&self, language: Language) -> &str {
        resolve(self.excerpt.as_ref(), language)
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn is_draft(&self) -> bool {
        self.is_draft
    }
}

impl ContentItem for Project {
    fn title(&self, language: Language) -> &str {
        self.title.resolve(language)
    }
    fn summary(&self, language: Language) -> &str {
        resolve(self.description.as_ref(), language)
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn keywords(&self) -> &[String] {
        &self.tech
    }
}

/// Active category/tag selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Tag(String),
}

impl Category {
    /// Whether an item with `tags` passes the category stage.
    pub fn matches(&self, tags: &[String]) -> bool {
        match self {
            Category::All => true,
            Category::Tag(tag) => tags.iter().any(|t| t == tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => ALL,
            Category::Tag(tag) => tag,
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        if value == ALL {
            Category::All
        } else {
            Category::Tag(value.to_string())
        }
    }
}

/// Case-insensitive free-text match over title, summary, tags and keywords.
///
/// `term` must already be lower-cased.
fn matches_search<T: ContentItem>(item: &T, term: &str, language: Language) -> bool {
    item.title(language).to_lowercase().contains(term)
        || item.summary(language).to_lowercase().contains(term)
        || item
            .tags()
            .iter()
            .chain(item.keywords())
            .any(|t| t.to_lowercase().contains(term))
}

/// Lower-cased text a search term is matched against, one field per line.
///
/// Generated listing pages carry this on each card so the page script can run
/// the same search stage in the browser.
pub fn search_text<T: ContentItem>(item: &T, language: Language) -> String {
    let mut fields = vec![item.title(language), item.summary(language)];
    fields.extend(item.tags().iter().chain(item.keywords()).map(String::as_str));
    fields
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filter a listing by category and search term.
///
/// A search term that is empty after trimming disables the search stage.
pub fn filter<'a, T: ContentItem>(
    items: &'a [T],
    category: &Category,
    search: &str,
    language: Language,
) -> Vec<&'a T> {
    let term = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| !item.is_draft())
        .filter(|item| category.matches(item.tags()))
        .filter(|item| term.is_empty() || matches_search(*item, &term, language))
        .collect()
}

/// Every tag used by non-draft items, deduplicated, in first-seen order.
pub fn collect_tags<T: ContentItem>(items: &[T]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for item in items.iter().filter(|i| !i.is_draft()) {
        for tag in item.tags() {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localize::{LocalizedString, LocalizedValue};

    fn project(vi: &str, en: &str, tags: &[&str], tech: &[&str]) -> Project {
        Project {
            slug: en.to_lowercase().replace(' ', "-"),
            title: LocalizedString::new(vi, en).into(),
            description: Some(LocalizedString::new("Mô tả", "A description").into()),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            tech: tech.iter().map(|s| s.to_string()).collect(),
            role: None,
            team: None,
            year: None,
            highlights: vec![],
            image: None,
            github: None,
            link: None,
        }
    }

    fn scenario() -> Vec<Project> {
        vec![
            project("Dự án A", "Project A", &["AI", "Web"], &[]),
            project("Dự án B", "Project B", &["Web"], &[]),
        ]
    }

    fn slugs<T: std::ops::Deref<Target = Project>>(items: &[T]) -> Vec<&str> {
        items.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn tag_selects_tagged_items() {
        let items = scenario();
        let result = filter(&items, &Category::from("AI"), "", Language::En);
        assert_eq!(slugs(&result), vec!["project-a"]);
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let items = scenario();
        let result = filter(&items, &Category::All, "project b", Language::En);
        assert_eq!(slugs(&result), vec!["project-b"]);
    }

    #[test]
    fn search_uses_active_language() {
        let items = scenario();
        assert_eq!(filter(&items, &Category::All, "dự án b", Language::Vi).len(), 1);
        assert!(filter(&items, &Category::All, "dự án b", Language::En).is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let items = vec![
            project("Mèo", "Cat tracker", &[], &[]),
            project("Chó", "Dog walker", &[], &[]),
        ];
        let upper = filter(&items, &Category::All, "CAT", Language::En);
        let lower = filter(&items, &Category::All, "cat", Language::En);
        assert_eq!(slugs(&upper), slugs(&lower));
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn search_matches_description_tags_and_tech() {
        let items = vec![
            project("A", "Alpha", &["Embedded"], &[]),
            project("B", "Beta", &[], &["Rust", "Tokio"]),
        ];
        assert_eq!(filter(&items, &Category::All, "embed", Language::En).len(), 1);
        assert_eq!(filter(&items, &Category::All, "tokio", Language::En).len(), 1);
        assert_eq!(filter(&items, &Category::All, "description", Language::En).len(), 2);
    }

    #[test]
    fn neutral_filter_is_idempotent() {
        let items = scenario();
        let once = filter(&items, &Category::All, "", Language::Vi);
        let twice = filter(&once, &Category::All, "", Language::Vi);
        assert_eq!(once.len(), items.len());
        assert_eq!(
            twice.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>(),
            slugs(&once)
        );
    }

    #[test]
    fn every_result_carries_the_tag() {
        let items = vec![
            project("A", "A", &["AI"], &[]),
            project("B", "B", &["Web", "AI"], &[]),
            project("C", "C", &["Web"], &[]),
            project("D", "D", &[], &["AI"]),
        ];
        for tag in ["AI", "Web", "Missing"] {
            for item in filter(&items, &Category::from(tag), "", Language::En) {
                assert!(item.tags.iter().any(|t| t == tag));
            }
        }
    }

    #[test]
    fn tag_match_is_exact() {
        let items = vec![project("A", "A", &["AI"], &[])];
        assert!(filter(&items, &Category::from("ai"), "", Language::En).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let items = vec![
            project("C", "C", &["x"], &[]),
            project("A", "A", &["x"], &[]),
            project("B", "B", &["x"], &[]),
        ];
        let result = filter(&items, &Category::from("x"), "", Language::En);
        assert_eq!(slugs(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_result_is_valid() {
        let items = scenario();
        assert!(filter(&items, &Category::All, "zzz", Language::En).is_empty());
        let none: Vec<Project> = vec![];
        assert!(filter(&none, &Category::All, "", Language::En).is_empty());
    }

    #[test]
    fn search_text_agrees_with_search_stage() {
        let item = project("Trạm cảm biến", "Sensor Hub", &["IoT"], &["Rust"]);
        let text = search_text(&item, Language::Vi);
        assert_eq!(text, "trạm cảm biến\nmô tả\niot\nrust");

        let items = vec![item];
        for term in ["cảm", "iot", "rust", "mô tả", "missing"] {
            let filtered = !filter(&items, &Category::All, term, Language::Vi).is_empty();
            assert_eq!(text.contains(term), filtered, "term {term:?}");
        }
    }

    #[test]
    fn blank_search_is_neutral() {
        let items = scenario();
        assert_eq!(filter(&items, &Category::All, "   ", Language::En).len(), 2);
    }

    fn post(slug: &str, tags: &[&str], draft: bool) -> BlogPost {
        BlogPost {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: LocalizedValue::from(slug),
            excerpt: None,
            cover_image: None,
            content: Default::default(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            published_at: None,
            read_time: None,
            is_draft: draft,
        }
    }

    #[test]
    fn drafts_never_pass() {
        let posts = vec![post("a", &["Rust"], false), post("b", &["Rust"], true)];
        for category in [Category::All, Category::from("Rust")] {
            for search in ["", "b", "rust"] {
                let result = filter(&posts, &category, search, Language::En);
                assert!(result.iter().all(|p| !p.is_draft));
            }
        }
    }

    #[test]
    fn collects_unique_tags_in_order() {
        let posts = vec![
            post("a", &["Rust", "Web"], false),
            post("b", &["Web", "AI"], false),
            post("c", &["Secret"], true),
        ];
        assert_eq!(collect_tags(&posts), vec!["Rust", "Web", "AI"]);
    }

    #[test]
    fn category_round_trips_through_str() {
        assert_eq!(Category::from("all"), Category::All);
        assert_eq!(Category::from("AI").as_str(), "AI");
        assert_eq!(Category::All.as_str(), "all");
    }
}
