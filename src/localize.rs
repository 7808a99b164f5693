//! Localized value resolution.
//!
//! Content documents store user-visible text either as a plain string
//! (already resolved, shown as-is in every language) or as an object keyed by
//! language code:
//!
//! ```json
//! "role": "Software Engineer"
//! "role": { "vi": "Kỹ sư phần mềm", "en": "Software Engineer" }
//! ```
//!
//! Resolution never fails. A missing or empty translation is a display gap,
//! not an error, and resolves to the empty string. There is no fallback to the
//! other language: showing Vietnamese text on the English page would be a
//! silent mistranslation.

use crate::types::Language;
use serde::{Deserialize, Serialize};

/// Per-language text. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedString {
    pub fn new(vi: &str, en: &str) -> Self {
        Self {
            vi: Some(vi.to_string()),
            en: Some(en.to_string()),
        }
    }

    /// Text for `language`, or `""` when missing or empty.
    pub fn get(&self, language: Language) -> &str {
        let text = match language {
            Language::Vi => self.vi.as_deref(),
            Language::En => self.en.as_deref(),
        };
        text.unwrap_or_default()
    }

    /// First populated variant in site language order.
    ///
    /// Only for diagnostics and CLI inventories, never for page content.
    pub fn any(&self) -> &str {
        Language::ALL
            .iter()
            .map(|&l| self.get(l))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }
}

/// A value that is either already resolved or localized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedValue {
    Plain(String),
    Localized(LocalizedString),
}

impl LocalizedValue {
    /// Resolve for `language`.
    ///
    /// Plain values are returned unchanged; localized values return the
    /// matching variant, or `""` when that variant is missing or empty.
    pub fn resolve(&self, language: Language) -> &str {
        match self {
            LocalizedValue::Plain(text) => text,
            LocalizedValue::Localized(localized) => localized.get(language),
        }
    }

    /// See [`LocalizedString::any`].
    pub fn any(&self) -> &str {
        match self {
            LocalizedValue::Plain(text) => text,
            LocalizedValue::Localized(localized) => localized.any(),
        }
    }
}

impl From<LocalizedString> for LocalizedValue {
    fn from(value: LocalizedString) -> Self {
        LocalizedValue::Localized(value)
    }
}

impl From<&str> for LocalizedValue {
    fn from(value: &str) -> Self {
        LocalizedValue::Plain(value.to_string())
    }
}

/// Resolve an optional value. Absent values resolve to `""`.
pub fn resolve(value: Option<&LocalizedValue>, language: Language) -> &str {
    value.map(|v| v.resolve(language)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> LocalizedValue {
        LocalizedString::new("Dự án A", "Project A").into()
    }

    #[test]
    fn resolves_each_language() {
        assert_eq!(both().resolve(Language::Vi), "Dự án A");
        assert_eq!(both().resolve(Language::En), "Project A");
    }

    #[test]
    fn plain_value_is_returned_unchanged() {
        let v = LocalizedValue::from("Rust");
        assert_eq!(v.resolve(Language::Vi), "Rust");
        assert_eq!(v.resolve(Language::En), "Rust");
    }

    #[test]
    fn missing_variant_is_empty() {
        let v: LocalizedValue = LocalizedString {
            vi: Some("Chỉ tiếng Việt".into()),
            en: None,
        }
        .into();
        assert_eq!(v.resolve(Language::En), "");
        assert_eq!(v.resolve(Language::Vi), "Chỉ tiếng Việt");
    }

    #[test]
    fn empty_variant_is_empty() {
        let v: LocalizedValue = LocalizedString {
            vi: Some(String::new()),
            en: Some("Hello".into()),
        }
        .into();
        assert_eq!(v.resolve(Language::Vi), "");
    }

    #[test]
    fn absent_value_is_empty() {
        assert_eq!(resolve(None, Language::En), "");
        assert_eq!(resolve(Some(&both()), Language::En), "Project A");
    }

    #[test]
    fn every_language_resolves_without_panicking() {
        let values = [
            both(),
            LocalizedValue::from(""),
            LocalizedString::default().into(),
        ];
        for value in &values {
            for language in Language::ALL {
                let resolved = value.resolve(language);
                if let LocalizedValue::Localized(l) = value {
                    assert_eq!(resolved, l.get(language));
                }
            }
        }
    }

    #[test]
    fn deserializes_both_shapes() {
        let plain: LocalizedValue = serde_json::from_str(r#""Hanoi""#).unwrap();
        assert_eq!(plain, LocalizedValue::Plain("Hanoi".into()));

        let localized: LocalizedValue =
            serde_json::from_str(r#"{"vi": "Hà Nội", "en": "Hanoi"}"#).unwrap();
        assert_eq!(localized.resolve(Language::Vi), "Hà Nội");
    }

    #[test]
    fn any_picks_first_populated() {
        let v = LocalizedString {
            vi: None,
            en: Some("Only English".into()),
        };
        assert_eq!(v.any(), "Only English");
        assert_eq!(LocalizedString::default().any(), "");
    }
}
