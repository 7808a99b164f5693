//! CMS block arrays → [`DocumentTree`].
//!
//! The CMS stores rich text as a flat JSON array of typed objects:
//!
//! ```json
//! [
//!   { "_type": "block", "style": "h2",
//!     "children": [{ "_type": "span", "text": "Setup", "marks": [] }] },
//!   { "_type": "block", "style": "normal", "markDefs": [{ "_key": "l1", "_type": "link", "href": "https://x" }],
//!     "children": [{ "_type": "span", "text": "docs", "marks": ["strong", "l1"] }] },
//!   { "_type": "block", "listItem": "bullet", "children": [...] },
//!   { "_type": "image", "asset": { "_ref": "image-abc-800x600-jpg" }, "alt": "..." },
//!   { "_type": "code", "language": "rust", "code": "fn main() {}" }
//! ]
//! ```
//!
//! List items are separate blocks carrying `listItem`; consecutive items of
//! the same kind are grouped into one [`Block::List`]. Nested list levels are
//! flattened into their enclosing list.
//!
//! Span marks are either decorator names (`strong`, `em`, `code`) or keys into
//! the block's `markDefs`. The first mark is the outermost; adjacent spans that
//! share their outer mark are grouped under a single wrapper.

use super::{Block, DocumentTree, ListKind, Span};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Mark {
    Strong,
    Emphasis,
    Code,
    Link(Option<String>),
}

/// A span's text with its resolved marks, outermost first.
struct Run {
    text: String,
    marks: Vec<Mark>,
}

/// Parse a CMS block array. Never fails; unknown entries become
/// [`Block::Unsupported`].
pub fn parse(values: &[Value]) -> DocumentTree {
    let mut blocks: Vec<Block> = Vec::new();

    for value in values {
        let kind = value.get("_type").and_then(Value::as_str);
        let block = match kind {
            Some("block") => {
                let spans = parse_children(value);
                if let Some(list_kind) = list_kind(value) {
                    push_list_item(&mut blocks, list_kind, spans);
                    continue;
                }
                text_block(value.get("style").and_then(Value::as_str), spans)
            }
            Some("image") => parse_image(value),
            Some("code") => Block::Code {
                language: str_field(value, "language"),
                source: value
                    .get("code")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            Some(other) => Block::Unsupported {
                kind: other.to_string(),
            },
            None => Block::Unsupported {
                kind: "untyped".to_string(),
            },
        };
        blocks.push(block);
    }

    DocumentTree::new(blocks)
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn list_kind(block: &Value) -> Option<ListKind> {
    match block.get("listItem").and_then(Value::as_str)? {
        "number" => Some(ListKind::Ordered),
        _ => Some(ListKind::Unordered),
    }
}

/// Append to the trailing list when it has the same kind, else open a new one.
fn push_list_item(blocks: &mut Vec<Block>, kind: ListKind, spans: Vec<Span>) {
    if let Some(Block::List {
        kind: last_kind,
        items,
    }) = blocks.last_mut()
    {
        if *last_kind == kind {
            items.push(spans);
            return;
        }
    }
    blocks.push(Block::List {
        kind,
        items: vec![spans],
    });
}

fn text_block(style: Option<&str>, spans: Vec<Span>) -> Block {
    match style.unwrap_or("normal") {
        "h1" => Block::Heading { level: 1, spans },
        "h2" => Block::Heading { level: 2, spans },
        "h3" => Block::Heading { level: 3, spans },
        "h4" => Block::Heading { level: 4, spans },
        "h5" => Block::Heading { level: 5, spans },
        "h6" => Block::Heading { level: 6, spans },
        "blockquote" => Block::Quote(spans),
        _ => Block::Paragraph(spans),
    }
}

fn parse_image(value: &Value) -> Block {
    let asset = value.get("asset");
    Block::Image {
        asset_ref: asset.and_then(|a| str_field(a, "_ref")),
        url: asset
            .and_then(|a| str_field(a, "url"))
            .or_else(|| str_field(value, "url")),
        alt: str_field(value, "alt"),
    }
}

fn parse_children(block: &Value) -> Vec<Span> {
    let mark_defs = block
        .get("markDefs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let runs: Vec<Run> = block
        .get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter(|child| child.get("_type").and_then(Value::as_str).unwrap_or("span") == "span")
        .filter_map(|child| {
            let text = child.get("text").and_then(Value::as_str)?;
            let marks = child
                .get("marks")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|name| resolve_mark(name, mark_defs))
                .collect();
            Some(Run {
                text: text.to_string(),
                marks,
            })
        })
        .collect();

    nest(&runs, 0)
}

/// Decorators by name; anything else is looked up in `markDefs` by `_key`.
/// Unknown marks are dropped and their text rendered unwrapped.
fn resolve_mark(name: &str, mark_defs: &[Value]) -> Option<Mark> {
    match name {
        "strong" => Some(Mark::Strong),
        "em" => Some(Mark::Emphasis),
        "code" => Some(Mark::Code),
        key => {
            let def = mark_defs
                .iter()
                .find(|d| d.get("_key").and_then(Value::as_str) == Some(key))?;
            match def.get("_type").and_then(Value::as_str) {
                Some("link") => Some(Mark::Link(str_field(def, "href"))),
                _ => None,
            }
        }
    }
}

/// Build the span tree for `runs`, looking at marks from `depth` onward.
fn nest(runs: &[Run], depth: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < runs.len() {
        let Some(outer) = runs[i].marks.get(depth) else {
            spans.push(Span::Text(runs[i].text.clone()));
            i += 1;
            continue;
        };
        let end = runs[i..]
            .iter()
            .position(|r| r.marks.get(depth) != Some(outer))
            .map_or(runs.len(), |offset| i + offset);
        let children = nest(&runs[i..end], depth + 1);
        spans.push(wrap(outer, children));
        i = end;
    }
    spans
}

fn wrap(mark: &Mark, children: Vec<Span>) -> Span {
    match mark {
        Mark::Strong => Span::Strong(children),
        Mark::Emphasis => Span::Emphasis(children),
        Mark::Code => Span::Code(children),
        Mark::Link(href) => Span::Link {
            href: href.clone(),
            children,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_json(value: Value) -> Vec<Block> {
        parse(value.as_array().unwrap()).blocks
    }

    fn span(text: &str, marks: &[&str]) -> Value {
        json!({ "_type": "span", "text": text, "marks": marks })
    }

    #[test]
    fn styles_map_to_blocks() {
        let blocks = parse_json(json!([
            { "_type": "block", "style": "h2", "children": [span("Title", &[])] },
            { "_type": "block", "style": "blockquote", "children": [span("Quoted", &[])] },
            { "_type": "block", "children": [span("Body", &[])] },
        ]));
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    spans: vec![Span::text("Title")]
                },
                Block::Quote(vec![Span::text("Quoted")]),
                Block::Paragraph(vec![Span::text("Body")]),
            ]
        );
    }

    #[test]
    fn decorators_nest_outermost_first() {
        let blocks = parse_json(json!([
            { "_type": "block", "children": [span("bold italic", &["strong", "em"])] }
        ]));
        assert_eq!(
            blocks[0],
            Block::Paragraph(vec![Span::Strong(vec![Span::Emphasis(vec![Span::text(
                "bold italic"
            )])])])
        );
    }

    #[test]
    fn adjacent_spans_share_outer_mark() {
        let blocks = parse_json(json!([
            { "_type": "block", "children": [
                span("a ", &["strong"]),
                span("b", &["strong", "em"]),
                span(" c", &[]),
            ] }
        ]));
        assert_eq!(
            blocks[0],
            Block::Paragraph(vec![
                Span::Strong(vec![
                    Span::text("a "),
                    Span::Emphasis(vec![Span::text("b")])
                ]),
                Span::text(" c"),
            ])
        );
    }

    #[test]
    fn link_mark_resolves_through_mark_defs() {
        let blocks = parse_json(json!([
            { "_type": "block",
              "markDefs": [{ "_key": "k1", "_type": "link", "href": "https://example.com" }],
              "children": [span("docs", &["k1"])] }
        ]));
        assert_eq!(
            blocks[0],
            Block::Paragraph(vec![Span::Link {
                href: Some("https://example.com".into()),
                children: vec![Span::text("docs")],
            }])
        );
    }

    #[test]
    fn unknown_mark_is_dropped() {
        let blocks = parse_json(json!([
            { "_type": "block", "children": [span("plain", &["missing-key", "underline"])] }
        ]));
        assert_eq!(blocks[0], Block::Paragraph(vec![Span::text("plain")]));
    }

    #[test]
    fn consecutive_list_items_are_grouped() {
        let blocks = parse_json(json!([
            { "_type": "block", "listItem": "bullet", "children": [span("one", &[])] },
            { "_type": "block", "listItem": "bullet", "children": [span("two", &[])] },
            { "_type": "block", "listItem": "number", "children": [span("first", &[])] },
            { "_type": "block", "children": [span("after", &[])] },
        ]));
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[0],
            Block::List {
                kind: ListKind::Unordered,
                items: vec![vec![Span::text("one")], vec![Span::text("two")]],
            }
        );
        assert!(matches!(&blocks[1], Block::List { kind: ListKind::Ordered, items } if items.len() == 1));
    }

    #[test]
    fn image_and_code_blocks() {
        let blocks = parse_json(json!([
            { "_type": "image", "asset": { "_ref": "image-abc-800x600-jpg" }, "alt": "Diagram" },
            { "_type": "image", "alt": "no asset" },
            { "_type": "code", "code": "fn main() {}" },
        ]));
        assert_eq!(
            blocks[0],
            Block::Image {
                asset_ref: Some("image-abc-800x600-jpg".into()),
                url: None,
                alt: Some("Diagram".into()),
            }
        );
        assert!(matches!(&blocks[1], Block::Image { asset_ref: None, url: None, .. }));
        assert_eq!(
            blocks[2],
            Block::Code {
                language: None,
                source: "fn main() {}".into()
            }
        );
    }

    #[test]
    fn unknown_types_are_kept_as_unsupported() {
        let blocks = parse_json(json!([
            { "_type": "youtube", "url": "https://youtu.be/x" },
            { "text": "no type" },
            "not an object",
        ]));
        assert_eq!(
            blocks[0],
            Block::Unsupported {
                kind: "youtube".into()
            }
        );
        assert!(matches!(&blocks[1], Block::Unsupported { .. }));
        assert!(matches!(&blocks[2], Block::Unsupported { .. }));
    }

    #[test]
    fn missing_children_give_empty_paragraph() {
        let blocks = parse_json(json!([{ "_type": "block" }]));
        assert_eq!(blocks, vec![Block::Paragraph(vec![])]);
    }
}
