//! Persisted sync state: the last fingerprint seen for each event id.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};
use crate::fingerprint::Fingerprint;

pub const DEFAULT_STATE_FILE: &str = "event_checksums.json";

/// Event id -> last recorded fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncState(BTreeMap<String, Fingerprint>);

impl SyncState {
    pub fn get(&self, event_id: &str) -> Option<&Fingerprint> {
        self.0.get(event_id)
    }

    pub fn insert(&mut self, event_id: impl Into<String>, fingerprint: Fingerprint) {
        self.0.insert(event_id.into(), fingerprint);
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.0.contains_key(event_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The file a [`SyncState`] lives in.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. A missing or undecodable file yields an empty
    /// state; it never fails the run.
    pub fn load(&self) -> SyncState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), %e, "no readable state file, starting empty");
                return SyncState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), %e, "state file is corrupt, starting empty");
                SyncState::default()
            }
        }
    }

    /// Replace the state file atomically (write a temp file, then rename).
    pub fn save(&self, state: &SyncState) -> SyncResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(state)
            .map_err(|e| SyncError::Serialization(e.to_string()))?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;

        tracing::debug!(path = %self.path.display(), entries = state.len(), "saved sync state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "\u{1}not json").unwrap();

        assert!(StateStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested").join("state.json"));

        let mut state = SyncState::default();
        state.insert("e1", Fingerprint::from("abc".to_string()));
        state.insert("e2", Fingerprint::from("def".to_string()));
        store.save(&state).unwrap();

        assert_eq!(store.load(), state);
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"e1\": \"abc\""), "unexpected layout: {}", raw);
    }
}
