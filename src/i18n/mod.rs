//! Internationalization (i18n) module.
//!
//! Translations are embedded at compile time and looked up by dotted key.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::permissions::Role;

/// Global translation store: LangCode -> Key -> Text
static TRANSLATIONS: OnceLock<HashMap<String, Value>> = OnceLock::new();

/// Language used when a key is missing in the requested one.
const FALLBACK: &str = "en";

fn store() -> &'static HashMap<String, Value> {
    TRANSLATIONS.get_or_init(|| {
        let mut map = HashMap::new();

        for (lang, raw) in [("en", include_str!("en.json")), ("ru", include_str!("ru.json"))] {
            if let Ok(val) = serde_json::from_str(raw) {
                map.insert(lang.to_string(), val);
            }
        }

        map
    })
}

/// Load translations eagerly so a broken file shows up at startup.
pub fn init() -> usize {
    store().len()
}

/// Get text for a key in a specific language.
/// Supports nested keys via dot notation, e.g., "access.error".
pub fn get_text(lang: &str, key: &str) -> String {
    let store = store();

    if let Some(text) = store.get(lang).and_then(|val| resolve_key(val, key)) {
        return text;
    }

    if lang != FALLBACK
        && let Some(text) = store.get(FALLBACK).and_then(|val| resolve_key(val, key))
    {
        return text;
    }

    // Key not found
    key.to_string()
}

/// Human-readable role name.
pub fn role_name(lang: &str, role: Role) -> String {
    get_text(lang, &format!("role.{}", role.as_str()))
}

fn resolve_key(val: &Value, key: &str) -> Option<String> {
    let mut current = val;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    current.as_str().map(|s| s.to_string())
}
