//! UI string dictionaries and dotted-key lookup.
//!
//! `translations.json` holds one tree per language:
//!
//! ```json
//! {
//!   "vi": { "sections": { "blog": "Bài viết" }, "common": { "readTime": "phút đọc" } },
//!   "en": { "sections": { "blog": "Blog" },     "common": { "readTime": "min read" } }
//! }
//! ```
//!
//! Keys are dotted paths (`"sections.blog"`). Trees need not have the same
//! shape in both languages. A key that cannot be resolved is returned as-is,
//! so a missing string shows up on the page as `sections.blog` instead of
//! breaking the render. Values that are neither strings nor objects (numbers,
//! arrays, `null`) are kept but treated as absent.

use crate::types::Language;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Node of a translation tree: a leaf string or a nested tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Leaf(String),
    Tree(TranslationTree),
    /// Any other JSON value. Never resolves.
    Other(serde_json::Value),
}

pub type TranslationTree = BTreeMap<String, TranslationNode>;

impl TranslationNode {
    /// Empty leaves and non-string values count as absent.
    fn is_present(&self) -> bool {
        match self {
            TranslationNode::Leaf(s) => !s.is_empty(),
            TranslationNode::Tree(_) => true,
            TranslationNode::Other(_) => false,
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TranslationNode::Leaf(s) => Some(s),
            TranslationNode::Tree(_) | TranslationNode::Other(_) => None,
        }
    }
}

/// Translation trees for every supported language.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Translations {
    #[serde(default)]
    vi: TranslationTree,
    #[serde(default)]
    en: TranslationTree,
}

impl Translations {
    pub fn new(vi: TranslationTree, en: TranslationTree) -> Self {
        Self { vi, en }
    }

    pub fn tree(&self, language: Language) -> &TranslationTree {
        match language {
            Language::Vi => &self.vi,
            Language::En => &self.en,
        }
    }

    /// Walk `key` and return the node it names, leaf or subtree.
    ///
    /// Returns `None` for an empty key, a missing segment, an empty or
    /// non-string value on the path, or a path that continues below a leaf.
    pub fn lookup(&self, key: &str, language: Language) -> Option<&TranslationNode> {
        if key.is_empty() {
            return None;
        }
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.tree(language).get(first)?;
        for segment in segments {
            if !node.is_present() {
                return None;
            }
            node = match node {
                TranslationNode::Tree(children) => children.get(segment)?,
                TranslationNode::Leaf(_) | TranslationNode::Other(_) => return None,
            };
        }
        node.is_present().then_some(node)
    }

    /// Resolve `key` to its string, or return `key` itself.
    ///
    /// A key naming a subtree also returns the key: only leaves are text.
    pub fn translate<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        self.lookup(key, language)
            .and_then(TranslationNode::as_leaf)
            .unwrap_or(key)
    }

    /// Bind a language for repeated lookups while rendering a page.
    pub fn for_language(&self, language: Language) -> Translator<'_> {
        Translator {
            translations: self,
            language,
        }
    }

    /// Number of leaf strings in a language's tree.
    pub fn leaf_count(&self, language: Language) -> usize {
        fn count(tree: &TranslationTree) -> usize {
            tree.values()
                .map(|node| match node {
                    TranslationNode::Leaf(_) => 1,
                    TranslationNode::Tree(children) => count(children),
                    TranslationNode::Other(_) => 0,
                })
                .sum()
        }
        count(self.tree(language))
    }
}

/// Translation lookups for one language.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    translations: &'a Translations,
    language: Language,
}

impl<'a> Translator<'a> {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t(&self, key: &'a str) -> &'a str {
        self.translations.translate(key, self.language)
    }
}
