//! # Folio
//!
//! A bilingual (Vietnamese / English) portfolio and blog site generator.
//! Content is a directory of JSON documents; the output is a static site with
//! one page tree per language.
//!
//! # Architecture
//!
//! ```text
//! content/ ──▶ source ──▶ snapshots ──▶ filter ──▶ generate ──▶ dist/
//!                │                                    │
//!          fetch boundary                   localize + translation
//!       (errors → not found)                render (document trees)
//! ```
//!
//! Everything above [`source`] works on owned, read-only snapshots. Pages
//! never see a raw source error: [`source::fetch`] logs it and reports the
//! content as not found.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Content access: the `ContentSource` trait, filesystem source, fetch boundary, stale-request gate |
//! | [`types`] | Content snapshots (`Project`, `BlogPost`, `Profile`) and the `Language` enum |
//! | [`localize`] | Resolving `{vi, en}` values for one language |
//! | [`translation`] | UI string trees and dotted-key lookup |
//! | [`filter`] | Tag and free-text filtering of listings |
//! | [`document`] | Rich-text document model, from portable-text blocks or markdown |
//! | [`render`] | Document tree → HTML, asset URL resolution |
//! | [`generate`] | Renders every page of the site using Maud |
//! | [`preference`] | Persisted language preference and the active-language context |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`slug`] | URL slugs for tags and titles |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Language Fallback
//!
//! A missing English title renders as empty on the English page, and a
//! missing UI string renders as its key. Falling back to the other language
//! would hide translation gaps; `folio check` lists them instead.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! checked at compile time and every interpolation is escaped, which matters
//! here: all text, including link targets inside documents, comes from
//! content files.
//!
//! ## Tags Are The Only Classification
//!
//! Older project files carry a single `category` string, sometimes
//! `"AI & Web"`. It is split into tags while deserializing, so filtering and
//! page generation only deal with tag lists.

pub mod config;
pub mod document;
pub mod filter;
pub mod generate;
pub mod localize;
pub mod output;
pub mod preference;
pub mod render;
pub mod slug;
pub mod source;
pub mod translation;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
