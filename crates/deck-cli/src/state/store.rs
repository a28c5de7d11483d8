use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use deck_core::filter::CompletionMap;

use super::{COMPLETION_KEY, FILTERS_KEY, FilterSelection};

/// One JSON file per key inside a state directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read `key`, or its default when the file is missing or malformed.
    #[must_use]
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return T::default(),
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "unreadable client state; using defaults");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "corrupt client state; using defaults");
                T::default()
            }
        }
    }

    /// Write `key` through a temp file so a crash never leaves half a file.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }

    #[must_use]
    pub fn completion_overrides(&self) -> CompletionMap {
        self.load(COMPLETION_KEY)
    }

    pub fn save_completion_overrides(&self, overrides: &CompletionMap) -> anyhow::Result<()> {
        self.save(COMPLETION_KEY, overrides)
    }

    /// Drop the local override for `id` once storage is authoritative again.
    /// Returns whether one was present; nothing is written otherwise.
    pub fn forget_completion_override(&self, id: i64) -> anyhow::Result<bool> {
        let mut overrides = self.completion_overrides();
        if overrides.remove(id).is_none() {
            return Ok(false);
        }
        self.save_completion_overrides(&overrides)?;
        Ok(true)
    }

    #[must_use]
    pub fn filters(&self) -> FilterSelection {
        self.load(FILTERS_KEY)
    }

    pub fn save_filters(&self, selection: &FilterSelection) -> anyhow::Result<()> {
        self.save(FILTERS_KEY, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::filter::StatusFilter;
    use pretty_assertions::assert_eq;

    fn store() -> (tempfile::TempDir, StateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state"));
        (dir, store)
    }

    #[test]
    fn missing_files_read_as_defaults() {
        let (_dir, store) = store();
        assert!(store.completion_overrides().is_empty());
        assert_eq!(store.filters(), FilterSelection::default());
    }

    #[test]
    fn overrides_survive_a_round_trip() {
        let (_dir, store) = store();
        let mut overrides = CompletionMap::new();
        overrides.set(7, true);
        overrides.set(9, false);
        store.save_completion_overrides(&overrides).unwrap();

        let loaded = store.completion_overrides();
        assert_eq!(loaded, overrides);
        assert!(loaded.is_completed(7));
        assert!(!loaded.is_completed(9));
    }

    #[test]
    fn forgetting_an_override_keeps_the_others() {
        let (_dir, store) = store();
        let mut overrides = CompletionMap::new();
        overrides.set(7, true);
        overrides.set(9, false);
        store.save_completion_overrides(&overrides).unwrap();

        assert!(store.forget_completion_override(7).unwrap());
        assert!(!store.forget_completion_override(7).unwrap());

        let mut expected = CompletionMap::new();
        expected.set(9, false);
        assert_eq!(store.completion_overrides(), expected);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("filters.json"), "{ not json").unwrap();
        fs::write(store.dir().join("completion.json"), "[1, 2").unwrap();

        assert_eq!(store.filters(), FilterSelection::default());
        assert!(store.completion_overrides().is_empty());
    }

    #[test]
    fn filters_persist() {
        let (_dir, store) = store();
        let selection = FilterSelection::default()
            .with_flags(Some(StatusFilter::Active), None, None)
            .with_page(3);
        store.save_filters(&selection).unwrap();
        assert_eq!(store.filters(), selection);
        assert!(!store.dir().join("filters.json.tmp").exists());
    }
}
