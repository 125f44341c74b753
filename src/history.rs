//! Search history log
//!
//! Persisted to LocalStorage, newest first, capped at `MAX_HISTORY`.
//! Independent of the ball simulation.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HISTORY;
use crate::platform::storage;

/// When a search happened. New entries store Unix milliseconds; entries
/// written by the old page hold an already formatted locale string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(f64),
    Text(String),
}

/// A single past search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub query: String,
    pub timestamp: Timestamp,
}

/// Past searches, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    pub entries: Vec<SearchEntry>,
}

impl SearchHistory {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "searchHistory";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record a search. Blank queries are ignored.
    ///
    /// A previous entry with the same query (ignoring case) is replaced, and
    /// the oldest entry is dropped once the cap is exceeded.
    pub fn add(&mut self, query: &str, timestamp: f64) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        let lowered = query.to_lowercase();
        self.entries.retain(|e| e.query.to_lowercase() != lowered);
        self.entries.insert(
            0,
            SearchEntry {
                query: query.to_string(),
                timestamp: Timestamp::Millis(timestamp),
            },
        );
        self.entries.truncate(MAX_HISTORY);
        true
    }

    /// Delete the entry at `index`; out-of-range indices are ignored
    pub fn remove(&mut self, index: usize) -> Option<SearchEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load history from LocalStorage
    pub fn load() -> Self {
        let history: Self = storage::load(Self::STORAGE_KEY).unwrap_or_default();
        log::info!("Loaded {} search history entries", history.len());
        history
    }

    /// Save history to LocalStorage. An empty history removes the key.
    pub fn save(&self) {
        if self.is_empty() {
            storage::remove(Self::STORAGE_KEY);
            log::info!("Search history cleared");
        } else if storage::save(Self::STORAGE_KEY, self) {
            log::info!("Search history saved ({} entries)", self.len());
        }
    }
}

/// Format a timestamp in the browser's locale. Text is shown as stored.
#[cfg(target_arch = "wasm32")]
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::Millis(ms) => {
            let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(*ms));
            date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED)
                .into()
        }
        Timestamp::Text(text) => text.clone(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::Millis(ms) => format!("{:.0}", ms),
        Timestamp::Text(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_newest_first() {
        let mut history = SearchHistory::new();
        assert!(history.add("rust", 1.0));
        assert!(history.add("  wasm  ", 2.0));
        assert_eq!(history.entries[0].query, "wasm");
        assert_eq!(history.entries[1].query, "rust");
    }

    #[test]
    fn test_add_blank_rejected() {
        let mut history = SearchHistory::new();
        assert!(!history.add("   ", 1.0));
        assert!(history.is_empty());
    }

    #[test]
    fn test_add_dedupes_case_insensitively() {
        let mut history = SearchHistory::new();
        history.add("Rust", 1.0);
        history.add("wgpu", 2.0);
        history.add("rUST", 3.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries[0].query, "rUST");
        assert_eq!(history.entries[0].timestamp, Timestamp::Millis(3.0));
        assert_eq!(history.entries[1].query, "wgpu");
    }

    #[test]
    fn test_add_caps_length() {
        let mut history = SearchHistory::new();
        for i in 0..(MAX_HISTORY + 5) {
            history.add(&format!("q{}", i), i as f64);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.entries[0].query, format!("q{}", MAX_HISTORY + 4));
        // Oldest five dropped
        assert!(history.entries.iter().all(|e| e.query != "q4"));
        assert_eq!(history.entries.last().map(|e| e.query.as_str()), Some("q5"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut history = SearchHistory::new();
        history.add("a", 1.0);
        history.add("b", 2.0);
        assert_eq!(history.remove(5), None);
        assert_eq!(history.remove(0).map(|e| e.query), Some("b".to_string()));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_json_is_plain_array() {
        let mut history = SearchHistory::new();
        history.add("rust", 5.0);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"query":"rust","timestamp":5.0}]"#);
        let back: SearchHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn test_reads_text_timestamps_from_old_page() {
        let json = r#"[{"query":"rust","timestamp":"10/19/2026, 9:00:00 AM"}]"#;
        let mut history: SearchHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(
            format_timestamp(&history.entries[0].timestamp),
            "10/19/2026, 9:00:00 AM"
        );

        // Mixed lists survive another add and a round trip
        history.add("wasm", 7.0);
        assert_eq!(format_timestamp(&history.entries[0].timestamp), "7");
        let again: SearchHistory =
            serde_json::from_str(&serde_json::to_string(&history).unwrap()).unwrap();
        assert_eq!(again, history);
        assert_eq!(
            again.entries[1].timestamp,
            Timestamp::Text("10/19/2026, 9:00:00 AM".to_string())
        );
    }
}
