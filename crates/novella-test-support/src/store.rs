//! Test stores — mock `SlotStore` implementations for tests.

use std::collections::BTreeMap;

use novella_core::error::EngineError;
use novella_core::store::SlotStore;

/// A slot store that records every write while behaving like a normal
/// in-memory store, so tests can assert on the exact keys and values the
/// persistence adapter produced.
#[derive(Debug, Default)]
pub struct RecordingSlotStore {
    entries: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
}

impl RecordingSlotStore {
    /// Creates an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set` call in order, as `(key, value)` pairs.
    #[must_use]
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl SlotStore for RecordingSlotStore {
    fn get(&self, key: &str) -> Result<Option<String>, EngineError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.writes.push((key.to_owned(), value.to_owned()));
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A slot store that is always empty and discards writes. Useful for
/// slot-never-saved scenarios.
#[derive(Debug, Default)]
pub struct EmptySlotStore;

impl SlotStore for EmptySlotStore {
    fn get(&self, _key: &str) -> Result<Option<String>, EngineError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), EngineError> {
        Ok(())
    }
}

/// A slot store whose every operation fails with a storage error.
/// Useful for error-handling paths.
#[derive(Debug, Default)]
pub struct FailingSlotStore;

impl SlotStore for FailingSlotStore {
    fn get(&self, _key: &str) -> Result<Option<String>, EngineError> {
        Err(EngineError::Storage("store unavailable".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), EngineError> {
        Err(EngineError::Storage("store unavailable".into()))
    }
}
