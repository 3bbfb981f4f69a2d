// ── Localized string tables ──
//
// The card's strings ship as nested JSON documents, one per language,
// embedded at build time and flattened to dotted keys (`status.mowing`).
// Lookups fall back to English, then to `None`, leaving the caller to pick
// its own literal.

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

/// Key/value lookup used by the formatter and the presentation helpers.
pub trait Localize {
    /// The localized string for `key`, if any table carries it.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Like [`Localize::lookup`], with `fallback` when the key is missing.
    fn localize_or(&self, key: &str, fallback: &str) -> String {
        self.lookup(key).unwrap_or(fallback).to_owned()
    }
}

const FALLBACK_LANGUAGE: &str = "en";

static SOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("de", include_str!("../locales/de.json")),
    ("fr", include_str!("../locales/fr.json")),
];

/// A flattened string table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: IndexMap<String, String>,
}

impl StringTable {
    /// Flatten a nested JSON document. Non-string leaves are skipped.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_str(text)?;
        let mut entries = IndexMap::new();
        flatten("", &root, &mut entries);
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Localize for StringTable {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut IndexMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_owned(), s.clone());
        }
        _ => {}
    }
}

fn tables() -> &'static IndexMap<&'static str, StringTable> {
    static TABLES: OnceLock<IndexMap<&'static str, StringTable>> = OnceLock::new();
    TABLES.get_or_init(|| {
        SOURCES
            .iter()
            .map(|(language, text)| {
                let table = StringTable::from_json(text).unwrap_or_else(|e| {
                    warn!(language, error = %e, "embedded string table is malformed");
                    StringTable::default()
                });
                (*language, table)
            })
            .collect()
    })
}

/// Languages with an embedded string table.
pub fn available_languages() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|(language, _)| *language)
}

/// String lookup for one language, backed by the English table.
#[derive(Debug, Clone, Copy)]
pub struct Translations {
    language: &'static str,
    primary: &'static StringTable,
    fallback: &'static StringTable,
}

impl Translations {
    /// Tables for `tag`. Region subtags are ignored (`de-AT` uses `de`);
    /// languages without a table use English.
    pub fn new(tag: &str) -> Self {
        let tables = tables();
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (language, primary) = match tables.get_key_value(language.as_str()) {
            Some((key, table)) => (*key, table),
            None => {
                debug!(tag, "no string table for language, using English");
                Self::english_entry(tables)
            }
        };
        let (_, fallback) = Self::english_entry(tables);

        Self {
            language,
            primary,
            fallback,
        }
    }

    fn english_entry(
        tables: &'static IndexMap<&'static str, StringTable>,
    ) -> (&'static str, &'static StringTable) {
        static EMPTY: OnceLock<StringTable> = OnceLock::new();
        tables.get_key_value(FALLBACK_LANGUAGE).map_or_else(
            || (FALLBACK_LANGUAGE, EMPTY.get_or_init(StringTable::default)),
            |(k, v)| (*k, v),
        )
    }

    /// The language whose table answers first.
    pub fn language(&self) -> &'static str {
        self.language
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new(FALLBACK_LANGUAGE)
    }
}

impl Localize for Translations {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.primary.get(key).or_else(|| self.fallback.get(key))
    }
}
