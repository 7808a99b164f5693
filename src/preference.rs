//! Persisted user preferences and the active-language context.
//!
//! # Storage
//!
//! Preferences are a small versioned JSON file in the state directory
//! (`.folio/preferences.json` by default):
//!
//! ```json
//! { "version": 1, "values": { "language": "en" } }
//! ```
//!
//! A missing, unreadable or outdated file loads as empty. Values are plain
//! strings; the only key written today is [`LANGUAGE_KEY`].
//!
//! # Active language
//!
//! [`LanguageContext`] is the single owner of the active language. It reads
//! the stored preference once when created, writes it back on every
//! [`set_language`](LanguageContext::set_language), and calls its subscribers
//! when the value actually changes. Pages and the CLI read the language from
//! the context instead of keeping their own copy.

use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the preference file within the state directory.
const PREFERENCES_FILENAME: &str = "preferences.json";

/// Bump to discard preference files written in an older format.
const PREFERENCES_VERSION: u32 = 1;

/// Key holding the preferred display language (`vi` or `en`).
pub const LANGUAGE_KEY: &str = "language";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PreferenceFile {
    version: u32,
    values: BTreeMap<String, String>,
}

impl PreferenceFile {
    fn empty() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            values: BTreeMap::new(),
        }
    }
}

/// Key/value preferences persisted in the state directory.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(PREFERENCES_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PreferenceFile {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return PreferenceFile::empty(),
        };
        match serde_json::from_str::<PreferenceFile>(&content) {
            Ok(file) if file.version == PREFERENCES_VERSION => file,
            Ok(file) => {
                tracing::debug!(version = file.version, "ignoring outdated preference file");
                PreferenceFile::empty()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt preference file");
                PreferenceFile::empty()
            }
        }
    }

    fn save(&self, file: &PreferenceFile) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.load().values.remove(key)
    }

    /// Set one value, keeping the others.
    pub fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut file = self.load();
        file.values.insert(key.to_string(), value.to_string());
        self.save(&file)
    }

    /// Stored language, or `None` if absent or not a supported code.
    pub fn read_language(&self) -> Option<Language> {
        let stored = self.get(LANGUAGE_KEY)?;
        match stored.parse() {
            Ok(language) => Some(language),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored language");
                None
            }
        }
    }

    pub fn write_language(&self, language: Language) -> Result<(), PreferenceError> {
        self.set(LANGUAGE_KEY, language.code())
    }
}

type Subscriber = Box<dyn Fn(Language)>;

/// Owner of the active language.
pub struct LanguageContext {
    language: Language,
    store: PreferenceStore,
    subscribers: Vec<Subscriber>,
}

impl LanguageContext {
    /// Read the stored preference once, falling back to `default`.
    pub fn load(store: PreferenceStore, default: Language) -> Self {
        let language = store.read_language().unwrap_or(default);
        Self {
            language,
            store,
            subscribers: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Register a callback run after each change of language.
    pub fn subscribe(&mut self, subscriber: impl Fn(Language) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Persist `language` and make it active.
    ///
    /// The preference is written even when the value is unchanged; subscribers
    /// are only called on an actual change.
    pub fn set_language(&mut self, language: Language) -> Result<(), PreferenceError> {
        self.store.write_language(language)?;
        if language != self.language {
            self.language = language;
            for subscriber in &self.subscribers {
                subscriber(language);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LanguageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageContext")
            .field("language", &self.language)
            .field("store", &self.store)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
