//! Markdown → [`DocumentTree`].
//!
//! Hand-written posts can store a Markdown string per language instead of a
//! CMS block array. The string is run through `pulldown-cmark` and its event
//! stream is folded into the same block/span model, so the renderer does not
//! care where a post came from.
//!
//! Mapping:
//!
//! | Markdown | Block |
//! |----------|-------|
//! | `# ...` – `###### ...` | `Heading` |
//! | paragraph | `Paragraph` |
//! | paragraph inside `>` | `Quote` |
//! | `-`/`*` list, `1.` list | `List` (nested lists flattened) |
//! | fenced/indented code | `Code` (info string → language) |
//! | heading or code inside a list item | splits the list around the block |
//! | `![alt](url)` | `Image`, hoisted after its paragraph |
//!
//! Raw HTML is dropped.

use super::{Block, DocumentTree, ListKind, Span};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// Open inline wrapper while its children are being collected.
enum Frame {
    Strong,
    Emphasis,
    Link(Option<String>),
    /// Image alt text is collected as spans and flattened on close.
    Image(String),
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    /// Spans of the current text container (paragraph, heading or list item).
    spans: Vec<Span>,
    /// Open inline wrappers with the spans collected before each was opened.
    frames: Vec<(Frame, Vec<Span>)>,
    /// Images found in the current container, emitted after it.
    images: Vec<Block>,
    list: Option<(ListKind, Vec<Vec<Span>>)>,
    /// The open list continues one that was split by a block-level child.
    list_resumed: bool,
    list_depth: usize,
    in_item: bool,
    quote_depth: usize,
    code: Option<(Option<String>, String)>,
}

/// Parse Markdown. Never fails.
pub fn parse(source: &str) -> DocumentTree {
    let mut builder = Builder::default();
    for event in Parser::new(source) {
        builder.event(event);
    }
    builder.finish()
}

impl Builder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((_, code)) = self.code.as_mut() {
                    code.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(text) => self.spans.push(Span::Code(vec![Span::Text(text.into_string())])),
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.in_item {
                    self.spans.clear();
                }
            }
            Tag::Heading { .. } => {
                self.split_list();
                self.spans.clear();
            }
            Tag::BlockQuote(_) => self.quote_depth += 1,
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(String::from),
                    CodeBlockKind::Indented => None,
                };
                self.split_list();
                self.code = Some((language, String::new()));
            }
            Tag::List(start) => {
                if self.list_depth == 0 {
                    let kind = if start.is_some() {
                        ListKind::Ordered
                    } else {
                        ListKind::Unordered
                    };
                    self.list = Some((kind, Vec::new()));
                    self.list_resumed = false;
                } else {
                    // Text of the enclosing item goes out before the nested items.
                    self.flush_item();
                }
                self.list_depth += 1;
            }
            Tag::Item => {
                self.flush_item();
                self.in_item = true;
            }
            Tag::Strong => self.open(Frame::Strong),
            Tag::Emphasis => self.open(Frame::Emphasis),
            Tag::Link { dest_url, .. } => {
                let href = Some(dest_url.into_string()).filter(|s| !s.is_empty());
                self.open(Frame::Link(href));
            }
            Tag::Image { dest_url, .. } => self.open(Frame::Image(dest_url.into_string())),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.in_item {
                    self.push_text(" ");
                } else {
                    let spans = std::mem::take(&mut self.spans);
                    if has_content(&spans) {
                        let block = if self.quote_depth > 0 {
                            Block::Quote(trim_spans(spans))
                        } else {
                            Block::Paragraph(trim_spans(spans))
                        };
                        self.blocks.push(block);
                    }
                    self.flush_images();
                }
            }
            TagEnd::Heading(level) => {
                let spans = trim_spans(std::mem::take(&mut self.spans));
                self.blocks.push(Block::Heading {
                    level: level as u8,
                    spans,
                });
                self.flush_images();
            }
            TagEnd::BlockQuote(_) => self.quote_depth = self.quote_depth.saturating_sub(1),
            TagEnd::CodeBlock => {
                if let Some((language, source)) = self.code.take() {
                    self.blocks.push(Block::Code { language, source });
                }
            }
            TagEnd::Item => {
                self.flush_item();
                self.in_item = false;
            }
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.close_list();
                } else {
                    // Back in the enclosing item after a nested list.
                    self.in_item = true;
                }
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link | TagEnd::Image => self.close(),
            _ => {}
        }
    }

    /// Adjacent text events are merged into one span.
    fn push_text(&mut self, text: &str) {
        if let Some(Span::Text(last)) = self.spans.last_mut() {
            last.push_str(text);
        } else {
            self.spans.push(Span::Text(text.to_string()));
        }
    }

    fn open(&mut self, frame: Frame) {
        let outer = std::mem::take(&mut self.spans);
        self.frames.push((frame, outer));
    }

    fn close(&mut self) {
        let Some((frame, outer)) = self.frames.pop() else {
            return;
        };
        let children = std::mem::replace(&mut self.spans, outer);
        match frame {
            Frame::Strong => self.spans.push(Span::Strong(children)),
            Frame::Emphasis => self.spans.push(Span::Emphasis(children)),
            Frame::Link(href) => self.spans.push(Span::Link { href, children }),
            Frame::Image(url) => {
                let alt = super::spans_text(&children);
                self.images.push(Block::Image {
                    asset_ref: None,
                    url: Some(url).filter(|u| !u.is_empty()),
                    alt: Some(alt).filter(|a| !a.trim().is_empty()),
                });
            }
        }
    }

    /// Move the collected item text into the open list.
    fn flush_item(&mut self) {
        let spans = trim_spans(std::mem::take(&mut self.spans));
        if let Some((_, items)) = self.list.as_mut() {
            if has_content(&spans) {
                items.push(spans);
            }
        }
    }

    /// Emit the open list, dropping an empty continuation of a split list.
    fn close_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            if !items.is_empty() || !self.list_resumed {
                self.blocks.push(Block::List { kind, items });
            }
        }
        self.list_resumed = false;
        self.flush_images();
    }

    /// A block-level child of a list item ends the list so far; the items
    /// after it go into a new list of the same kind.
    fn split_list(&mut self) {
        if self.list_depth == 0 {
            return;
        }
        self.flush_item();
        let Some(kind) = self.list.as_ref().map(|(kind, _)| *kind) else {
            return;
        };
        // Nothing collected yet: the list stays open and follows the block.
        if self.list.as_ref().is_some_and(|(_, items)| items.is_empty()) {
            return;
        }
        self.close_list();
        self.list = Some((kind, Vec::new()));
        self.list_resumed = true;
    }

    fn flush_images(&mut self) {
        self.blocks.append(&mut self.images);
    }

    fn finish(mut self) -> DocumentTree {
        self.close_list();
        DocumentTree::new(self.blocks)
    }
}

fn has_content(spans: &[Span]) -> bool {
    !super::spans_text(spans).trim().is_empty()
}

/// Trim whitespace from the text at either end of a container.
fn trim_spans(mut spans: Vec<Span>) -> Vec<Span> {
    while matches!(spans.last(), Some(Span::Text(t)) if t.trim().is_empty()) {
        spans.pop();
    }
    while matches!(spans.first(), Some(Span::Text(t)) if t.trim().is_empty()) {
        spans.remove(0);
    }
    if let Some(Span::Text(t)) = spans.last_mut() {
        t.truncate(t.trim_end().len());
    }
    if let Some(Span::Text(t)) = spans.first_mut() {
        *t = t.trim_start().to_string();
    }
    spans
}
