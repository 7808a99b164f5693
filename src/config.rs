//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged over it key by
//! key, so a config file only needs the values it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── translations.json
//! └── posts/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"
//! base_url = "/"               # Prefix of every generated link
//! default_language = "vi"      # Used when no preference has been stored
//!
//! [cms]
//! project_id = ""              # Needed to turn image asset refs into CDN URLs
//! dataset = "production"
//!
//! [render]
//! default_code_language = "javascript"
//! default_image_alt = "Blog image"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#171717"
//! text_muted = "#525252"
//! border = "#e5e5e5"
//! link = "#2563eb"
//! link_hover = "#1d4ed8"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#f5f5f5"
//! text_muted = "#a3a3a3"
//! border = "#262626"
//! link = "#60a5fa"
//! link_hover = "#93c5fd"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and URL layout.
    pub site: SiteSection,
    /// Headless CMS settings used to resolve image assets.
    pub cms: CmsConfig,
    /// Rich-text rendering defaults.
    pub render: RenderConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.site.base_url.starts_with('/') || !self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must start and end with '/'".into(),
            ));
        }
        if self.render.default_code_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "render.default_code_language must not be empty".into(),
            ));
        }
        if self.cms.dataset.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cms.dataset must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown in the page `<title>` and the header.
    pub title: String,
    /// Prefix of every generated link, e.g. `/` or `/portfolio/`.
    pub base_url: String,
    /// Language used when no preference has been stored.
    pub default_language: Language,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            base_url: "/".to_string(),
            default_language: Language::Vi,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    /// CMS project id. Empty disables CDN URL construction for image refs.
    pub project_id: String,
    pub dataset: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Highlighting hint for code blocks that do not name a language.
    pub default_code_language: String,
    /// Alt text for body images that have none.
    pub default_image_alt: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_code_language: "javascript".to_string(),
            default_image_alt: "Blog image".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, tags, captions and other secondary text.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#171717".to_string(),
            text_muted: "#525252".to_string(),
            border: "#e5e5e5".to_string(),
            link: "#2563eb".to_string(),
            link_hover: "#1d4ed8".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#f5f5f5".to_string(),
            text_muted: "#a3a3a3".to_string(),
            border: "#262626".to_string(),
            link: "#60a5fa".to_string(),
            link_hover: "#93c5fd".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Shown in the page title and the header.
title = "Portfolio"

# Prefix of every generated link. Must start and end with "/".
base_url = "/"

# Language used when no preference has been stored ("vi" or "en").
default_language = "vi"

# ---------------------------------------------------------------------------
# Headless CMS
# ---------------------------------------------------------------------------
[cms]
# Project id used to build CDN URLs for image blocks that only carry an
# asset reference. Leave empty if every image has an explicit URL.
project_id = ""
dataset = "production"

# ---------------------------------------------------------------------------
# Rich text rendering
# ---------------------------------------------------------------------------
[render]
# Highlighting hint for code blocks without a language.
default_code_language = "javascript"

# Alt text for body images that have none.
default_image_alt = "Blog image"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#171717"
text_muted = "#525252"    # Dates, tags, captions
border = "#e5e5e5"
link = "#2563eb"
link_hover = "#1d4ed8"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#f5f5f5"
text_muted = "#a3a3a3"
border = "#262626"
link = "#60a5fa"
link_hover = "#93c5fd"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}
