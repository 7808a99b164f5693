//! Content source: the only place content is read.
//!
//! Everything above this module works on owned, read-only snapshots
//! ([`BlogPost`], [`Project`], [`Profile`], [`Translations`]). How they are
//! obtained is hidden behind [`ContentSource`]; [`FsSource`] reads them from a
//! content directory:
//!
//! ```text
//! content/
//! ├── config.toml          # Site config (optional, see `config`)
//! ├── translations.json    # { "vi": {...}, "en": {...} } (optional)
//! ├── profile.json         # Profile (optional)
//! ├── projects.json        # Array of projects (optional)
//! └── posts/               # One JSON document per post, walked recursively
//!     ├── hello-world.json
//!     └── 2024/
//!         └── rust-notes.json
//! ```
//!
//! ## Absence vs failure
//!
//! Source methods return `Result`. Pages must never show a raw error, so the
//! generator goes through [`fetch`] / [`fetch_all`], which log the error and
//! turn it into [`Fetched::NotFound`]. A successful empty listing stays
//! `Found(vec![])`, which pages render as "no posts" rather than as a 404.
//!
//! ## Drafts
//!
//! Posts with `isDraft: true` are dropped here and never reach filtering or
//! rendering. `post_by_slug` treats a draft as not found.

use crate::filter::collect_tags;
use crate::slug::slugify;
use crate::translation::Translations;
use crate::types::{BlogPost, Language, Profile, Project};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Cannot walk posts directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Supplies content documents by query.
pub trait ContentSource {
    /// Published posts, newest first. Posts without a date sort last.
    fn all_posts(&self) -> Result<Vec<BlogPost>, SourceError>;

    /// A published post by slug. Drafts and unknown slugs are `None`.
    fn post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, SourceError> {
        Ok(self.all_posts()?.into_iter().find(|p| p.slug == slug))
    }

    /// Every tag used by a published post, deduplicated.
    fn all_tags(&self) -> Result<Vec<String>, SourceError> {
        Ok(collect_tags(&self.all_posts()?))
    }

    fn projects(&self) -> Result<Vec<Project>, SourceError>;

    fn profile(&self) -> Result<Option<Profile>, SourceError>;

    fn translations(&self) -> Result<Translations, SourceError>;
}

/// Result of a query after the fetch boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Found(T),
    NotFound,
}

impl<T> Fetched<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Fetched::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Fetched<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Fetched::NotFound, Fetched::Found)
    }
}

/// Convert a single-document query into [`Fetched`], logging failures.
pub fn fetch<T>(what: &str, result: Result<Option<T>, SourceError>) -> Fetched<T> {
    match result {
        Ok(value) => value.into(),
        Err(e) => {
            tracing::warn!(query = what, error = %e, "content fetch failed");
            Fetched::NotFound
        }
    }
}

/// Convert a listing query into [`Fetched`], logging failures.
///
/// An empty listing is `Found(vec![])`.
pub fn fetch_all<T>(what: &str, result: Result<Vec<T>, SourceError>) -> Fetched<Vec<T>> {
    match result {
        Ok(items) => Fetched::Found(items),
        Err(e) => {
            tracing::warn!(query = what, error = %e, "content fetch failed");
            Fetched::NotFound
        }
    }
}

// ============================================================================
// Stale request superseding
// ============================================================================

/// Issued per request; only the newest ticket for a key is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    id: u64,
}

/// Discards results of requests that were superseded by a newer request for
/// the same key (e.g. the user switched posts before the first one loaded).
///
/// Only callers that keep several fetches for one key in flight need this.
/// The bundled CLI fetches one thing at a time and goes through [`fetch`]
/// directly.
#[derive(Debug, Default)]
pub struct RequestGate {
    latest: HashMap<String, u64>,
    next: u64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `key`, superseding any request still in flight.
    pub fn issue(&mut self, key: &str) -> Ticket {
        self.next += 1;
        self.latest.insert(key.to_string(), self.next);
        Ticket {
            key: key.to_string(),
            id: self.next,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.id)
    }

    /// Hand back `value` if `ticket` is still the newest for its key.
    /// A stale completion is dropped and `None` returned.
    pub fn accept<T>(&mut self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(&ticket) {
            self.latest.remove(&ticket.key);
            Some(value)
        } else {
            tracing::debug!(key = %ticket.key, id = ticket.id, "discarding stale result");
            None
        }
    }
}

// ============================================================================
// Content directory
// ============================================================================

/// Reads content documents from a directory tree.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

/// Published posts as found on disk, with the files that were skipped.
struct PostScan {
    posts: Vec<BlogPost>,
    problems: Vec<String>,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every post file. Unparseable files are logged and skipped.
    fn scan_posts(&self) -> Result<PostScan, SourceError> {
        let dir = self.root.join("posts");
        let mut scan = PostScan {
            posts: Vec::new(),
            problems: Vec::new(),
        };
        if !dir.is_dir() {
            return Ok(scan);
        }

        let mut seen: HashSet<String> = HashSet::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_json(path) {
                continue;
            }
            let rel = path.strip_prefix(&self.root).unwrap_or(path).display().to_string();

            let post: BlogPost = match read_json(path) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!(file = %rel, error = %e, "skipping malformed post");
                    scan.problems.push(e.to_string());
                    continue;
                }
            };
            if post.slug.trim().is_empty() {
                tracing::warn!(file = %rel, "skipping post without slug");
                scan.problems.push(format!("{rel}: post has no slug"));
                continue;
            }
            if !is_path_segment(&post.slug) {
                tracing::warn!(file = %rel, slug = %post.slug, "skipping post with unusable slug");
                scan.problems.push(format!("{rel}: slug '{}' is not a single path segment", post.slug));
                continue;
            }
            // Drafts are dropped before they can claim a slug.
            if post.is_draft {
                tracing::debug!(file = %rel, slug = %post.slug, "skipping draft");
                continue;
            }
            if !seen.insert(post.slug.clone()) {
                tracing::warn!(file = %rel, slug = %post.slug, "duplicate post slug, keeping first");
                scan.problems.push(format!("{rel}: duplicate slug '{}'", post.slug));
                continue;
            }
            scan.posts.push(post);
        }
        tracing::debug!(count = scan.posts.len(), "loaded post documents");
        Ok(scan)
    }

    /// Content problems worth reporting without failing the build.
    pub fn validate(&self) -> Result<Vec<String>, SourceError> {
        let mut problems = self.scan_posts()?.problems;
        for project in self.projects()? {
            if project.slug.is_empty() {
                problems.push(format!(
                    "projects.json: project '{}' has no usable slug",
                    project.title.any()
                ));
            }
        }
        Ok(problems)
    }
}

impl ContentSource for FsSource {
    fn all_posts(&self) -> Result<Vec<BlogPost>, SourceError> {
        let mut posts = self.scan_posts()?.posts;
        // Descending; `None` compares lowest so undated posts end up last.
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    fn projects(&self) -> Result<Vec<Project>, SourceError> {
        let path = self.root.join("projects.json");
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut projects: Vec<Project> = read_json(&path)?;
        for project in &mut projects {
            if project.slug.trim().is_empty() {
                let title = match project.title.resolve(Language::En) {
                    "" => project.title.any(),
                    en => en,
                };
                project.slug = slugify(title);
            }
        }
        Ok(projects)
    }

    fn profile(&self) -> Result<Option<Profile>, SourceError> {
        let path = self.root.join("profile.json");
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn translations(&self) -> Result<Translations, SourceError> {
        let path = self.root.join("translations.json");
        if !path.exists() {
            tracing::warn!("no translations.json, UI strings will show their keys");
            return Ok(Translations::default());
        }
        read_json(&path)
    }
}

/// Slugs become directory names in the output tree.
fn is_path_segment(slug: &str) -> bool {
    !slug.contains(['/', '\\']) && slug != "." && slug != ".."
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}
