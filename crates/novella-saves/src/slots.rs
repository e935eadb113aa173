//! The persistence adapter: named save slots over an opaque store.

use chrono::{DateTime, Utc};

use novella_core::clock::Clock;
use novella_core::error::EngineError;
use novella_core::store::SlotStore;
use novella_engine::{NarrativeState, Session};

/// Serializes and restores [`NarrativeState`] snapshots through named
/// slots of a [`SlotStore`].
///
/// Each slot maps to two store keys: the JSON-encoded snapshot and an
/// RFC 3339 timestamp of when it was written. Saving overwrites any
/// prior snapshot in the slot; there is no confirmation step and no
/// backup of the previous save.
#[derive(Debug)]
pub struct SaveSlots<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> SaveSlots<S> {
    /// Wraps a store as a slot collection.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn data_key(slot: &str) -> String {
        format!("slot/{slot}")
    }

    fn time_key(slot: &str) -> String {
        format!("slot/{slot}/time")
    }

    /// Writes `state` into `slot` along with the current timestamp, then
    /// re-reads and deserializes what was just written and returns that
    /// round-tripped snapshot. Adopting the returned snapshot instead of
    /// the in-memory original guarantees the session continues from
    /// exactly what a later load will see.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the store rejects a write or
    /// the snapshot cannot be encoded, and [`EngineError::CorruptSlot`]
    /// if the re-read data does not deserialize.
    pub fn save(
        &mut self,
        slot: &str,
        state: &NarrativeState,
        clock: &dyn Clock,
    ) -> Result<NarrativeState, EngineError> {
        let timestamp = clock.now().to_rfc3339();
        self.store.set(&Self::time_key(slot), &timestamp)?;
        let encoded = serde_json::to_string(state)
            .map_err(|e| EngineError::Storage(format!("snapshot encoding failed: {e}")))?;
        self.store.set(&Self::data_key(slot), &encoded)?;

        let stored = self
            .store
            .get(&Self::data_key(slot))?
            .ok_or_else(|| EngineError::Storage(format!("slot {slot:?} vanished after write")))?;
        let snapshot = decode(slot, &stored)?;
        tracing::info!(slot, frame = snapshot.current_frame_index, "session saved");
        Ok(snapshot)
    }

    /// Reads the snapshot stored in `slot`.
    ///
    /// The returned snapshot always has `save_menu_shown` forced to
    /// `false`; the load menu flag comes back exactly as serialized.
    /// Which menu a load should close is an open product decision, so
    /// only the save menu is forced for now.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SlotEmpty`] if nothing was ever saved into
    /// `slot` (the caller's state must stay untouched), and
    /// [`EngineError::CorruptSlot`] if the stored data does not
    /// deserialize.
    pub fn load(&self, slot: &str) -> Result<NarrativeState, EngineError> {
        let Some(stored) = self.store.get(&Self::data_key(slot))? else {
            return Err(EngineError::SlotEmpty {
                slot: slot.to_owned(),
            });
        };
        let mut snapshot = decode(slot, &stored)?;
        snapshot.overlays.save_menu_shown = false;
        tracing::info!(slot, frame = snapshot.current_frame_index, "session loaded");
        Ok(snapshot)
    }

    /// When `slot` was last written, or `None` for a slot never saved
    /// into. Feeds the save/load menu labels.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the store cannot be read and
    /// [`EngineError::CorruptSlot`] if the stored timestamp does not
    /// parse.
    pub fn timestamp(&self, slot: &str) -> Result<Option<DateTime<Utc>>, EngineError> {
        match self.store.get(&Self::time_key(slot))? {
            None => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(|e| EngineError::CorruptSlot {
                    slot: slot.to_owned(),
                    reason: format!("bad timestamp: {e}"),
                }),
        }
    }
}

fn decode(slot: &str, stored: &str) -> Result<NarrativeState, EngineError> {
    serde_json::from_str(stored).map_err(|e| EngineError::CorruptSlot {
        slot: slot.to_owned(),
        reason: e.to_string(),
    })
}

/// Saves `session` into `slot` and re-adopts the round-tripped snapshot,
/// giving the UI's one-call `save(slot_id)` action.
///
/// # Errors
///
/// Propagates any [`EngineError`] from [`SaveSlots::save`]; the session
/// keeps its current state on error.
pub fn save_session<S: SlotStore>(
    session: &mut Session,
    slots: &mut SaveSlots<S>,
    slot: &str,
    clock: &dyn Clock,
) -> Result<(), EngineError> {
    let snapshot = slots.save(slot, session.state(), clock)?;
    session.restore(snapshot);
    Ok(())
}

/// Replaces `session`'s state with the snapshot in `slot`, giving the
/// UI's one-call `load(slot_id)` action.
///
/// # Errors
///
/// Propagates any [`EngineError`] from [`SaveSlots::load`]; in
/// particular, on [`EngineError::SlotEmpty`] the session is left exactly
/// as it was.
pub fn load_session<S: SlotStore>(
    session: &mut Session,
    slots: &SaveSlots<S>,
    slot: &str,
) -> Result<(), EngineError> {
    let snapshot = slots.load(slot)?;
    session.restore(snapshot);
    Ok(())
}
