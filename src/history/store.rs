use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DEFAULT_MAX_HISTORY_ITEMS;

use super::{HistoryEntry, HistoryError};

/// Newest-first list of past requests, persisted as a JSON array.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::in_memory(DEFAULT_MAX_HISTORY_ITEMS)
    }
}

impl HistoryStore {
    pub fn in_memory(limit: usize) -> Self {
        Self {
            path: None,
            entries: Vec::new(),
            limit,
        }
    }

    /// Reads `path`; a file that does not exist yet is an empty history.
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading history {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing history {}", path.display()))?
        } else {
            Vec::new()
        };

        let mut store = Self {
            path: Some(path.to_path_buf()),
            entries,
            limit,
        };
        store.trim();
        debug!(path = %path.display(), entries = store.entries.len(), "loaded history");
        Ok(store)
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating history directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json).with_context(|| format!("writing history {}", path.display()))?;
        debug!(path = %path.display(), entries = self.entries.len(), "saved history");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.trim();
    }

    /// Pinned entries survive; only the newest `limit` unpinned ones are kept.
    fn trim(&mut self) {
        let unpinned = self.entries.iter().filter(|entry| !entry.pinned).count();
        if unpinned <= self.limit {
            return;
        }
        let (pinned, unpinned): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|entry| entry.pinned);
        info!(dropped = unpinned.len() - self.limit, "trimming history");
        self.entries = pinned;
        self.entries.extend(unpinned.into_iter().take(self.limit));
    }

    /// Flips the pin and returns the new state.
    pub fn toggle_pin(&mut self, id: Uuid) -> Result<bool, HistoryError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        entry.pinned = !entry.pinned;
        Ok(entry.pinned)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<HistoryEntry, HistoryError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn clear_unpinned(&mut self) {
        self.entries.retain(|entry| entry.pinned);
    }

    /// Pinned entries first, each group in stored order.
    pub fn sorted(&self) -> Vec<&HistoryEntry> {
        let (mut pinned, unpinned): (Vec<_>, Vec<_>) =
            self.entries.iter().partition(|entry| entry.pinned);
        pinned.extend(unpinned);
        pinned
    }

    /// Looks an entry up by a prefix of its id; dashes are optional.
    pub fn find(&self, prefix: &str) -> Result<&HistoryEntry, HistoryError> {
        let needle = prefix.trim().replace('-', "").to_ascii_lowercase();
        if needle.is_empty() {
            return Err(HistoryError::NotFound(prefix.to_string()));
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|entry| entry.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry),
            (Some(_), Some(_)) => Err(HistoryError::Ambiguous(prefix.to_string())),
            (None, _) => Err(HistoryError::NotFound(prefix.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        options::RequestOptions,
        response::{ExecutionOutcome, Response},
    };
    use anyhow::Result;
    use chrono::Local;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::tempdir;

    fn entry(url: &str) -> HistoryEntry {
        let options = RequestOptions::builder().url(url).build();
        let response = Response {
            timestamp: Local::now(),
            command: format!("curl {url}"),
            status_code: Some(200),
            headers: String::new(),
            body: format!("body of {url}"),
            error_output: String::new(),
            duration: Duration::from_millis(5),
            success: true,
            outcome: ExecutionOutcome::Completed,
        };
        HistoryEntry::record(&options, &response)
    }

    fn urls(entries: &[HistoryEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.url.as_str()).collect()
    }

    #[test]
    fn newest_entries_come_first() {
        let mut store = HistoryStore::in_memory(10);
        store.add(entry("a"));
        store.add(entry("b"));
        assert_eq!(urls(store.entries()), vec!["b", "a"]);
    }

    #[test]
    fn limit_keeps_pinned_entries() -> Result<()> {
        let mut store = HistoryStore::in_memory(2);
        store.add(entry("old-pinned"));
        let pinned_id = store.entries()[0].id;
        store.toggle_pin(pinned_id)?;

        for url in ["u1", "u2", "u3"] {
            store.add(entry(url));
        }

        assert_eq!(urls(store.entries()), vec!["old-pinned", "u3", "u2"]);
        Ok(())
    }

    #[test]
    fn sorted_puts_pinned_first() -> Result<()> {
        let mut store = HistoryStore::in_memory(10);
        for url in ["a", "b", "c"] {
            store.add(entry(url));
        }
        let b = store.entries()[1].id;
        assert!(store.toggle_pin(b)?);

        let sorted: Vec<&str> = store.sorted().iter().map(|entry| entry.url.as_str()).collect();
        assert_eq!(sorted, vec!["b", "c", "a"]);

        assert!(!store.toggle_pin(b)?);
        Ok(())
    }

    #[test]
    fn clear_unpinned_and_delete() -> Result<()> {
        let mut store = HistoryStore::in_memory(10);
        for url in ["a", "b", "c"] {
            store.add(entry(url));
        }
        let c = store.entries()[0].id;
        let a = store.entries()[2].id;
        store.toggle_pin(a)?;

        let removed = store.delete(c)?;
        assert_eq!(removed.url, "c");
        assert!(matches!(store.delete(c), Err(HistoryError::NotFound(_))));

        store.clear_unpinned();
        assert_eq!(urls(store.entries()), vec!["a"]);

        store.clear();
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn find_by_prefix() {
        let mut store = HistoryStore::in_memory(10);
        let mut first = entry("first");
        first.id = Uuid::parse_str("aaaa1111-0000-4000-8000-000000000001").unwrap();
        let mut second = entry("second");
        second.id = Uuid::parse_str("aaaa2222-0000-4000-8000-000000000002").unwrap();
        store.add(first);
        store.add(second);

        assert_eq!(store.find("aaaa1").unwrap().url, "first");
        assert_eq!(store.find("AAAA-2222").unwrap().url, "second");
        assert!(matches!(store.find("aaaa"), Err(HistoryError::Ambiguous(_))));
        assert!(matches!(store.find("ffff"), Err(HistoryError::NotFound(_))));
        assert!(matches!(store.find(""), Err(HistoryError::NotFound(_))));
    }

    #[test]
    fn persists_between_loads() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("state").join("history.json");

        let mut store = HistoryStore::load(&path, 10)?;
        assert!(store.is_empty());
        store.add(entry("https://example.com"));
        store.save()?;

        let reloaded = HistoryStore::load(&path, 10)?;
        assert_eq!(reloaded.entries(), store.entries());
        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("history.json");
        fs::write(&path, "not json")?;
        let err = HistoryStore::load(&path, 10).unwrap_err();
        assert!(format!("{err:#}").contains("parsing history"));
        Ok(())
    }
}
