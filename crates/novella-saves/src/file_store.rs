//! File-backed slot store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use novella_core::error::EngineError;
use novella_core::store::SlotStore;

/// A slot store persisted as one JSON document on disk.
///
/// The whole key-value map is read at open and rewritten on every `set`,
/// which keeps writes atomic at the granularity of a single action.
/// Sufficient for a store that only ever sees one synchronous transition
/// at a time.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, reading any existing contents. A
    /// missing file is an empty store; the file is created on first
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the file exists but cannot be
    /// read or is not a valid JSON string map.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                EngineError::Storage(format!("{} is not a valid store file: {e}", path.display()))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(EngineError::Storage(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        Ok(Self { path, entries })
    }

    /// The path this store persists to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::Storage(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| EngineError::Storage(format!("store serialization failed: {e}")))?;
        fs::write(&self.path, contents)
            .map_err(|e| EngineError::Storage(format!("cannot write {}: {e}", self.path.display())))
    }
}

impl SlotStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_treats_a_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();

        let store = JsonFileStore::open(dir.path().join("saves.json")).unwrap();

        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("slot/1", "payload").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();

        assert_eq!(reopened.get("slot/1").unwrap().as_deref(), Some("payload"));
    }

    #[test]
    fn test_open_rejects_a_file_that_is_not_a_string_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saves.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = JsonFileStore::open(&path);

        assert!(matches!(result, Err(EngineError::Storage(_))));
    }
}
