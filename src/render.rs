//! Document tree → HTML.
//!
//! Every [`Block`] variant has one renderer, chosen by `match`. Renderers are
//! pure and return [`Markup`]; a block that cannot be shown (an unsupported
//! type, an image with nowhere to load it from) renders nothing and the rest
//! of the document is unaffected.
//!
//! ```text
//! Heading  → <h1>…<h6>            Code   → <pre class="code-block"><code class="language-…">
//! Paragraph→ <p>                  Image  → <figure><img><figcaption>?</figure>
//! Quote    → <blockquote>         List   → <ul>/<ol> of <li>
//! ```
//!
//! All text goes through maud interpolation and is escaped. Link targets
//! must pass [`is_safe_href`]; a link to any other scheme renders as its text.

use crate::config::{CmsConfig, RenderConfig};
use crate::document::{Block, DocumentTree, ListKind, Span};
use maud::{Markup, html};

/// Base URL of the CMS image CDN.
pub const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Settings the renderers read.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub render: &'a RenderConfig,
    pub cms: &'a CmsConfig,
}

/// Render a whole document inside a `div.prose` wrapper.
pub fn render_document(tree: &DocumentTree, ctx: RenderContext<'_>) -> Markup {
    html! {
        div.prose {
            @for block in &tree.blocks {
                @if let Some(markup) = render_block(block, ctx) {
                    (markup)
                }
            }
        }
    }
}

/// Render one block, or `None` when the block has no output.
pub fn render_block(block: &Block, ctx: RenderContext<'_>) -> Option<Markup> {
    match block {
        Block::Heading { level, spans } => Some(render_heading(*level, spans)),
        Block::Paragraph(spans) => Some(html! { p { (render_spans(spans)) } }),
        Block::Quote(spans) => Some(html! { blockquote { (render_spans(spans)) } }),
        Block::List { kind, items } => Some(render_list(*kind, items)),
        Block::Code { language, source } => {
            let language = language
                .as_deref()
                .unwrap_or(&ctx.render.default_code_language);
            Some(html! {
                pre.code-block {
                    code class={ "language-" (language) } { (source) }
                }
            })
        }
        Block::Image {
            asset_ref,
            url,
            alt,
        } => render_image(asset_ref.as_deref(), url.as_deref(), alt.as_deref(), ctx),
        Block::Unsupported { kind } => {
            tracing::debug!(kind = %kind, "skipping unsupported block");
            None
        }
    }
}

fn render_heading(level: u8, spans: &[Span]) -> Markup {
    let inner = render_spans(spans);
    match level {
        0 | 1 => html! { h1 { (inner) } },
        2 => html! { h2 { (inner) } },
        3 => html! { h3 { (inner) } },
        4 => html! { h4 { (inner) } },
        5 => html! { h5 { (inner) } },
        _ => html! { h6 { (inner) } },
    }
}

fn render_list(kind: ListKind, items: &[Vec<Span>]) -> Markup {
    let items = html! {
        @for item in items {
            li { (render_spans(item)) }
        }
    };
    match kind {
        ListKind::Ordered => html! { ol { (items) } },
        ListKind::Unordered => html! { ul { (items) } },
    }
}

fn render_image(
    asset_ref: Option<&str>,
    url: Option<&str>,
    alt: Option<&str>,
    ctx: RenderContext<'_>,
) -> Option<Markup> {
    let src = match url {
        Some(url) => url.to_string(),
        None => asset_url(asset_ref?, &ctx.cms.project_id, &ctx.cms.dataset)?,
    };
    let alt_text = alt.unwrap_or(&ctx.render.default_image_alt);
    Some(html! {
        figure.post-image {
            img src=(src) alt=(alt_text) loading="lazy";
            @if let Some(caption) = alt {
                figcaption { (caption) }
            }
        }
    })
}

/// Render a span sequence; marks nest recursively.
pub fn render_spans(spans: &[Span]) -> Markup {
    html! {
        @for span in spans {
            (render_span(span))
        }
    }
}

fn render_span(span: &Span) -> Markup {
    match span {
        Span::Text(text) => html! { (text) },
        Span::Strong(children) => html! { strong { (render_spans(children)) } },
        Span::Emphasis(children) => html! { em { (render_spans(children)) } },
        Span::Code(children) => html! { code { (render_spans(children)) } },
        Span::Link {
            href: Some(href),
            children,
        } => {
            if !is_safe_href(href) {
                tracing::debug!(href = %href, "dropping link with unsafe scheme");
                render_spans(children)
            } else if is_external(href) {
                html! {
                    a href=(href) target="_blank" rel="noopener noreferrer" { (render_spans(children)) }
                }
            } else {
                html! { a href=(href) { (render_spans(children)) } }
            }
        }
        Span::Link {
            href: None,
            children,
        } => render_spans(children),
    }
}

/// Absolute links to another origin open in a new tab.
pub fn is_external(href: &str) -> bool {
    let lower = href.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Link targets allowed in rendered output: `http`, `https` and `mailto`
/// URLs, protocol-relative URLs, and relative paths, queries or fragments.
///
/// Browsers ignore tabs and newlines inside a scheme, so those are removed
/// before the scheme is read.
pub fn is_safe_href(href: &str) -> bool {
    let cleaned: String = href
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    // A '/', '?' or '#' before the colon makes it part of a relative path.
    if scheme.is_empty() || scheme.contains(['/', '?', '#']) {
        return true;
    }
    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto"
    )
}

/// CDN URL for a CMS image reference.
///
/// `image-<id>-<W>x<H>-<ext>` becomes `<CDN_BASE>/<project>/<dataset>/<id>-<W>x<H>.<ext>`.
/// Returns `None` for malformed references or when no project is configured.
pub fn asset_url(reference: &str, project_id: &str, dataset: &str) -> Option<String> {
    if project_id.is_empty() {
        return None;
    }
    let rest = reference.strip_prefix("image-")?;
    let mut parts = rest.rsplitn(3, '-');
    let ext = parts.next().filter(|s| !s.is_empty())?;
    let dims = parts.next()?;
    let id = parts.next().filter(|s| !s.is_empty())?;
    let (w, h) = dims.split_once('x')?;
    if w.is_empty() || h.is_empty() || !w.bytes().chain(h.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{CDN_BASE}/{project_id}/{dataset}/{id}-{dims}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> (RenderConfig, CmsConfig) {
        (
            RenderConfig::default(),
            CmsConfig {
                project_id: "proj".to_string(),
                dataset: "production".to_string(),
            },
        )
    }

    fn render(blocks: Vec<Block>) -> String {
        let (render, cms) = configs();
        let ctx = RenderContext {
            render: &render,
            cms: &cms,
        };
        render_document(&DocumentTree::new(blocks), ctx).into_string()
    }

    #[test]
    fn paragraph_and_heading() {
        let html = render(vec![
            Block::Heading {
                level: 2,
                spans: vec![Span::text("Intro")],
            },
            Block::Paragraph(vec![Span::text("Hello")]),
        ]);
        assert_eq!(html, r#"<div class="prose"><h2>Intro</h2><p>Hello</p></div>"#);
    }

    #[test]
    fn heading_level_is_clamped() {
        let html = render(vec![
            Block::Heading {
                level: 0,
                spans: vec![],
            },
            Block::Heading {
                level: 9,
                spans: vec![],
            },
        ]);
        assert!(html.contains("<h1></h1>"));
        assert!(html.contains("<h6></h6>"));
    }

    #[test]
    fn unsupported_and_unresolvable_blocks_are_skipped() {
        let html = render(vec![
            Block::Paragraph(vec![Span::text("before")]),
            Block::Unsupported {
                kind: "youtube".into(),
            },
            Block::Image {
                asset_ref: None,
                url: None,
                alt: Some("lost".into()),
            },
            Block::Paragraph(vec![Span::text("after")]),
        ]);
        assert_eq!(
            html,
            r#"<div class="prose"><p>before</p><p>after</p></div>"#
        );
    }

    #[test]
    fn nested_marks_render_nested_elements() {
        let html = render(vec![Block::Paragraph(vec![Span::Strong(vec![
            Span::text("a "),
            Span::Emphasis(vec![Span::Code(vec![Span::text("b")])]),
        ])])]);
        assert!(html.contains("<strong>a <em><code>b</code></em></strong>"));
    }

    #[test]
    fn external_links_open_in_new_tab() {
        let link = |href: &str| {
            Block::Paragraph(vec![Span::Link {
                href: Some(href.into()),
                children: vec![Span::text("x")],
            }])
        };
        let html = render(vec![
            link("https://example.com"),
            link("//cdn.example.com/a"),
            link("/vi/blog/"),
        ]);
        assert!(html.contains(
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">x</a>"#
        ));
        assert!(html.contains(
            r#"<a href="//cdn.example.com/a" target="_blank" rel="noopener noreferrer">x</a>"#
        ));
        assert!(html.contains(r#"<a href="/vi/blog/">x</a>"#));
    }

    #[test]
    fn script_links_render_as_text() {
        let link = |href: &str| {
            Block::Paragraph(vec![Span::Link {
                href: Some(href.into()),
                children: vec![Span::text("click")],
            }])
        };
        for href in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            " java\tscript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "vbscript:msgbox",
        ] {
            let html = render(vec![link(href)]);
            assert!(!html.contains("<a"), "{href} rendered as a link: {html}");
            assert!(html.contains("<p>click</p>"));
        }
    }

    #[test]
    fn safe_href_schemes() {
        for href in [
            "https://example.com",
            "HTTP://example.com",
            "mailto:a@b.c",
            "//cdn.example.com/a",
            "/vi/blog/",
            "post/2",
            "#top",
            "?tag=rust",
            "./a:b",
            "",
        ] {
            assert!(is_safe_href(href), "{href}");
        }
        for href in ["javascript:alert(1)", "data:,x", "file:///etc/passwd", "tel:123"] {
            assert!(!is_safe_href(href), "{href}");
        }
    }

    #[test]
    fn link_without_href_renders_children() {
        let html = render(vec![Block::Paragraph(vec![Span::Link {
            href: None,
            children: vec![Span::text("plain")],
        }])]);
        assert!(html.contains("<p>plain</p>"));
    }

    #[test]
    fn code_block_language_defaults() {
        let html = render(vec![
            Block::Code {
                language: None,
                source: "let x = 1;".into(),
            },
            Block::Code {
                language: Some("rust".into()),
                source: "fn main() {}".into(),
            },
        ]);
        assert!(html.contains(r#"<code class="language-javascript">let x = 1;</code>"#));
        assert!(html.contains(r#"<code class="language-rust">fn main() {}</code>"#));
    }

    #[test]
    fn image_from_asset_reference() {
        let html = render(vec![Block::Image {
            asset_ref: Some("image-abc123-800x600-jpg".into()),
            url: None,
            alt: Some("Diagram".into()),
        }]);
        assert!(html.contains(
            r#"src="https://cdn.sanity.io/images/proj/production/abc123-800x600.jpg""#
        ));
        assert!(html.contains("<figcaption>Diagram</figcaption>"));
    }

    #[test]
    fn image_without_alt_uses_default_and_no_caption() {
        let html = render(vec![Block::Image {
            asset_ref: None,
            url: Some("/img/a.png".into()),
            alt: None,
        }]);
        assert!(html.contains(r#"alt="Blog image""#));
        assert!(!html.contains("figcaption"));
    }

    #[test]
    fn lists_render_items() {
        let html = render(vec![
            Block::List {
                kind: ListKind::Ordered,
                items: vec![vec![Span::text("one")], vec![]],
            },
            Block::List {
                kind: ListKind::Unordered,
                items: vec![vec![Span::text("dot")]],
            },
        ]);
        assert!(html.contains("<ol><li>one</li><li></li></ol>"));
        assert!(html.contains("<ul><li>dot</li></ul>"));
    }

    #[test]
    fn text_is_escaped() {
        let html = render(vec![Block::Code {
            language: None,
            source: "<script>alert(1)</script>".into(),
        }]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn asset_url_rejects_malformed_refs() {
        assert_eq!(asset_url("image-abc-800x600-jpg", "", "production"), None);
        assert_eq!(asset_url("file-abc-pdf", "p", "production"), None);
        assert_eq!(asset_url("image-abc-jpg", "p", "production"), None);
        assert_eq!(asset_url("image-abc-wide-jpg", "p", "production"), None);
        assert_eq!(
            asset_url("image-a-b-10x20-png", "p", "staging").as_deref(),
            Some("https://cdn.sanity.io/images/p/staging/a-b-10x20.png")
        );
    }

    #[test]
    fn external_detection_is_case_insensitive() {
        assert!(is_external("HTTPS://EXAMPLE.COM"));
        assert!(is_external("http://x"));
        assert!(!is_external("mailto:a@b.c"));
        assert!(!is_external("#top"));
    }
}
