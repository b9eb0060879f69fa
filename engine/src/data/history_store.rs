// Persisted history of calculation results
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shared::models::CalculationResult;

use crate::error::EngineError;

/// Ordered, text-deduplicated log of past results.
///
/// Storage failures never reach the caller: they are logged and the
/// history is treated as empty (reads) or unchanged (writes).
pub trait HistoryStore {
    fn get(&self) -> Vec<CalculationResult>;

    /// Appends unless an entry with the same formatted text exists.
    /// Returns the history after the call.
    fn append(&mut self, result: CalculationResult) -> Vec<CalculationResult>;

    fn clear(&mut self);

    /// One line per entry: its formatted text.
    fn export_as_text(&self) -> Vec<String> {
        self.get().iter().map(CalculationResult::formatted).collect()
    }
}

/// Drops the oldest entries until `entries` fits in `limit`.
fn enforce_limit(entries: &mut Vec<CalculationResult>, limit: Option<usize>) {
    if let Some(limit) = limit {
        if entries.len() > limit {
            let excess = entries.len() - limit;
            entries.drain(..excess);
        }
    }
}

pub struct InMemoryHistoryStore {
    entries: VecDeque<CalculationResult>,
    seen: HashSet<String>,
    limit: Option<usize>,
}

impl InMemoryHistoryStore {
    pub fn new(limit: Option<usize>) -> Self {
        InMemoryHistoryStore {
            entries: VecDeque::new(),
            seen: HashSet::new(),
            limit,
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get(&self) -> Vec<CalculationResult> {
        self.entries.iter().cloned().collect()
    }

    fn append(&mut self, result: CalculationResult) -> Vec<CalculationResult> {
        let text = result.formatted();
        if self.seen.insert(text) {
            self.entries.push_back(result);
            if let Some(limit) = self.limit {
                while self.entries.len() > limit {
                    if let Some(evicted) = self.entries.pop_front() {
                        self.seen.remove(&evicted.formatted());
                    }
                }
            }
        }
        self.get()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
    }
}

/// History kept as a JSON array in a single file, re-read on every call.
pub struct JsonFileHistoryStore {
    path: PathBuf,
    limit: Option<usize>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>, limit: Option<usize>) -> Self {
        JsonFileHistoryStore {
            path: path.into(),
            limit,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<CalculationResult>, EngineError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            EngineError::HistoryError(format!("Corrupt history file '{}': {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &[CalculationResult]) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn get(&self) -> Vec<CalculationResult> {
        match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read history, treating it as empty");
                Vec::new()
            }
        }
    }

    fn append(&mut self, result: CalculationResult) -> Vec<CalculationResult> {
        let history = self.get();
        let text = result.formatted();
        if history.iter().any(|entry| entry.formatted() == text) {
            tracing::debug!(result = %text, "Result already in history, skipping");
            return history;
        }

        let mut updated = history.clone();
        updated.push(result);
        enforce_limit(&mut updated, self.limit);
        match self.save(&updated) {
            Ok(()) => updated,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to write history, keeping previous entries");
                history
            }
        }
    }

    fn clear(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(path = %self.path.display(), "History cleared"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to clear history");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{CalculationOutcome, CalculationRow, OperationType};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn create_result(text: &str) -> CalculationResult {
        CalculationResult {
            operation: OperationType::SumList,
            input: CalculationRow::new(text, ""),
            outcome: CalculationOutcome::Success { text: text.to_string() },
            parameters: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_in_memory_dedup_by_text() {
        let mut store = InMemoryHistoryStore::default();
        store.append(create_result("Sum: 1 + 2 = 3"));
        let history = store.append(create_result("Sum: 1 + 2 = 3"));
        assert_eq!(history.len(), 1);
        let history = store.append(create_result("Sum: 2 + 2 = 4"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_in_memory_limit_evicts_oldest() {
        let mut store = InMemoryHistoryStore::new(Some(2));
        store.append(create_result("a"));
        store.append(create_result("b"));
        store.append(create_result("c"));
        assert_eq!(store.export_as_text(), vec!["b".to_string(), "c".to_string()]);
        // An evicted entry may be recorded again.
        store.append(create_result("a"));
        assert_eq!(store.export_as_text(), vec!["c".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_in_memory_clear() {
        let mut store = InMemoryHistoryStore::default();
        store.append(create_result("a"));
        store.clear();
        assert!(store.get().is_empty());
        assert_eq!(store.append(create_result("a")).len(), 1);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonFileHistoryStore::new(&path, None);
        store.append(create_result("first"));
        store.append(create_result("second"));
        store.append(create_result("first"));

        let reopened = JsonFileHistoryStore::new(&path, None);
        assert_eq!(reopened.export_as_text(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_file_store_limit() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileHistoryStore::new(dir.path().join("nested").join("history.json"), Some(1));
        store.append(create_result("old"));
        let history = store.append(create_result("new"));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].formatted(), "new");
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("absent.json"), None);
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        file.flush().unwrap();
        let store = JsonFileHistoryStore::new(file.path(), None);
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_file_store_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut store = JsonFileHistoryStore::new(&path, None);
        store.append(create_result("a"));
        assert!(path.exists());
        store.clear();
        assert!(!path.exists());
        assert!(store.get().is_empty());
        // Clearing twice is harmless.
        store.clear();
    }
}
