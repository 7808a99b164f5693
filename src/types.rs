//! Shared content types.
//!
//! These are the read-only snapshots handed out by a
//! [`ContentSource`](crate::source::ContentSource): projects, blog posts and the
//! profile. Every user-visible string is a [`LocalizedValue`] so a single
//! document can carry both the Vietnamese and the English text.
//!
//! ## Classification
//!
//! Projects and posts are classified by tags. The canonical representation is
//! an array of tag strings. Older project files use a single `category` string,
//! sometimes joining several categories with `" & "`; those are split into a
//! tag list while deserializing so the rest of the pipeline only ever sees
//! `Vec<String>`:
//!
//! ```text
//! "tags": ["AI", "Web"]        → ["AI", "Web"]
//! "category": "AI & Web"       → ["AI", "Web"]
//! "category": "Web"            → ["Web"]
//! ```

use crate::document::DocumentTree;
use crate::localize::LocalizedValue;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator used by composite category strings (`"AI & Web"`).
pub const COMPOSITE_SEPARATOR: &str = " & ";

/// One of the two supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Vi,
    En,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown language code: '{0}' (expected 'vi' or 'en')")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Every supported language, in site order.
    pub const ALL: [Language; 2] = [Language::Vi, Language::En];

    /// ISO 639-1 code, also used as the URL prefix (`/vi/`, `/en/`).
    pub fn code(self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    /// Name of the language written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Vi => "Tiếng Việt",
            Language::En => "English",
        }
    }

    /// The other language. Used for the language switch link.
    pub fn other(self) -> Language {
        match self {
            Language::Vi => Language::En,
            Language::En => Language::Vi,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vi" => Ok(Language::Vi),
            "en" => Ok(Language::En),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Split a composite category string into its parts.
///
/// Empty parts are dropped, so `"AI & "` yields `["AI"]`.
pub fn split_composite(category: &str) -> Vec<String> {
    category
        .split(COMPOSITE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Accepts a tag array, a (possibly composite) category string, or null.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTags {
        List(Vec<String>),
        Single(String),
    }

    Ok(match Option::<RawTags>::deserialize(deserializer)? {
        Some(RawTags::List(tags)) => tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Some(RawTags::Single(category)) => split_composite(&category),
        None => Vec::new(),
    })
}

/// Accepts either a plain slug string or the CMS form `{ "current": "..." }`.
fn deserialize_slug<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSlug {
        Plain(String),
        Object { current: String },
    }

    Ok(match Option::<RawSlug>::deserialize(deserializer)? {
        Some(RawSlug::Plain(s)) | Some(RawSlug::Object { current: s }) => s,
        None => String::new(),
    })
}

/// A portfolio project.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// URL slug. Derived from the English title when absent.
    #[serde(default, deserialize_with = "deserialize_slug")]
    pub slug: String,
    pub title: LocalizedValue,
    #[serde(default)]
    pub description: Option<LocalizedValue>,
    /// Normalized classification (see module docs).
    #[serde(default, alias = "category", alias = "categories", deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    /// Technologies used; searched but not used for category filtering.
    #[serde(default, alias = "technologies")]
    pub tech: Vec<String>,
    #[serde(default)]
    pub role: Option<LocalizedValue>,
    #[serde(default)]
    pub team: Option<u32>,
    #[serde(default)]
    pub year: Option<LocalizedValue>,
    #[serde(default)]
    pub highlights: Vec<LocalizedValue>,
    #[serde(default)]
    pub image: Option<String>,
    /// Source repository link.
    #[serde(default)]
    pub github: Option<String>,
    /// Live demo link.
    #[serde(default)]
    pub link: Option<String>,
}

/// Reference to an uploaded asset, as stored by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetRef {
    #[serde(default, rename = "_ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Cover image of a post.
///
/// Listing queries project the asset URL to the top level (`url`), single-post
/// queries keep the nested `asset`. Both shapes are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoverImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl CoverImage {
    /// Resolved image URL, if the document carries one.
    pub fn src(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.asset.as_ref().and_then(|a| a.url.as_deref()))
            .filter(|s| !s.is_empty())
    }
}

/// Per-language post body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedBody {
    #[serde(default)]
    pub vi: Option<DocumentTree>,
    #[serde(default)]
    pub en: Option<DocumentTree>,
}

impl LocalizedBody {
    /// Body for a language; a missing body is an empty document.
    pub fn get(&self, language: Language) -> &DocumentTree {
        static EMPTY: DocumentTree = DocumentTree { blocks: Vec::new() };
        let body = match language {
            Language::Vi => self.vi.as_ref(),
            Language::En => self.en.as_ref(),
        };
        body.unwrap_or(&EMPTY)
    }
}

/// A blog post document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_slug")]
    pub slug: String,
    pub title: LocalizedValue,
    #[serde(default)]
    pub excerpt: Option<LocalizedValue>,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default, alias = "body")]
    pub content: LocalizedBody,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub read_time: Option<u32>,
    /// Drafts never leave the content source.
    #[serde(default)]
    pub is_draft: bool,
}

/// Contact links shown in the profile header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contacts {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Avatar {
    pub src: String,
    #[serde(default)]
    pub alt: Option<LocalizedValue>,
}

/// One entry of the experience timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub position: LocalizedValue,
    pub company: LocalizedValue,
    #[serde(default)]
    pub period: Option<LocalizedValue>,
    #[serde(default)]
    pub description: Option<LocalizedValue>,
}

/// The site owner's profile (`profile.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: LocalizedValue,
    #[serde(default)]
    pub role: Option<LocalizedValue>,
    #[serde(default)]
    pub summary: Option<LocalizedValue>,
    #[serde(default)]
    pub avatar: Option<Avatar>,
    #[serde(default, alias = "contactLinks")]
    pub contacts: Contacts,
    #[serde(default)]
    pub experience: Vec<Experience>,
}
