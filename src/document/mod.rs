//! Rich-text document model for post bodies.
//!
//! A post body is an ordered list of [`Block`]s. Text-bearing blocks hold
//! inline [`Span`]s, and spans nest: a run of text can sit inside any number of
//! strong/emphasis/code/link marks.
//!
//! Bodies arrive in one of two shapes and both are parsed into the same tree:
//!
//! - a JSON array of CMS blocks (see [`portable`]), the format stored by the
//!   headless CMS;
//! - a Markdown string (see [`markdown`]), for posts written by hand in the
//!   content directory.
//!
//! Parsing is lenient. Anything it does not understand becomes
//! [`Block::Unsupported`] or an image without an asset, and the renderer skips
//! those, so one odd block never takes the rest of the post down with it.

pub mod markdown;
pub mod portable;

use serde::{Deserialize, Deserializer};

/// Ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTree {
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of every text-bearing block, separated by spaces.
    ///
    /// Used to estimate reading time when a post does not set one.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            let mut push = |text: &str| {
                if !text.is_empty() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(text);
                }
            };
            match block {
                Block::Heading { spans, .. } | Block::Paragraph(spans) | Block::Quote(spans) => {
                    push(&spans_text(spans))
                }
                Block::List { items, .. } => {
                    for item in items {
                        push(&spans_text(item));
                    }
                }
                Block::Code { source, .. } => push(source),
                Block::Image { .. } | Block::Unsupported { .. } => {}
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Structural node of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Level is 1–6.
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    Quote(Vec<Span>),
    List { kind: ListKind, items: Vec<Vec<Span>> },
    /// An image needs either an asset reference or a URL to render.
    Image {
        asset_ref: Option<String>,
        url: Option<String>,
        alt: Option<String>,
    },
    Code {
        language: Option<String>,
        source: String,
    },
    /// A block type the parser did not recognize, kept for diagnostics.
    Unsupported { kind: String },
}

/// Inline node. Marks wrap their children.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    Strong(Vec<Span>),
    Emphasis(Vec<Span>),
    Code(Vec<Span>),
    Link { href: Option<String>, children: Vec<Span> },
}

impl Span {
    pub fn text(text: &str) -> Span {
        Span::Text(text.to_string())
    }
}

/// Concatenated text content of a span sequence, marks stripped.
pub fn spans_text(spans: &[Span]) -> String {
    fn walk(spans: &[Span], out: &mut String) {
        for span in spans {
            match span {
                Span::Text(text) => out.push_str(text),
                Span::Strong(children)
                | Span::Emphasis(children)
                | Span::Code(children)
                | Span::Link { children, .. } => walk(children, out),
            }
        }
    }
    let mut out = String::new();
    walk(spans, &mut out);
    out
}

impl<'de> Deserialize<'de> for DocumentTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawBody {
            Markdown(String),
            Blocks(Vec<serde_json::Value>),
        }

        Ok(match RawBody::deserialize(deserializer)? {
            RawBody::Markdown(source) => markdown::parse(&source),
            RawBody::Blocks(blocks) => portable::parse(&blocks),
        })
    }
}
