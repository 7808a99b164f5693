//! URL slugs for tags and titles.
//!
//! Tags become directory names under `blog/tags/`, and projects without an
//! explicit slug get one from their title:
//!
//! - `"Machine Learning"` → `machine-learning`
//! - `"AI & Web"` → `ai-web`
//! - `"Trí tuệ nhân tạo"` → `trí-tuệ-nhân-tạo`
//!
//! Letters and digits are kept in any script (lower-cased); every other run of
//! characters collapses to one dash.

/// Build a slug from arbitrary text. Empty when the text has no alphanumerics.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
