//! Novella — save-slot persistence.
//!
//! [`SaveSlots`] is the persistence adapter: it serializes a session's
//! [`novella_engine::NarrativeState`] into a named slot of an opaque
//! [`novella_core::store::SlotStore`] together with a timestamp, and
//! restores snapshots from it. Two store implementations ship here:
//! an in-memory map and a single-file JSON store.

pub mod file_store;
pub mod memory_store;
pub mod slots;

pub use file_store::JsonFileStore;
pub use memory_store::MemorySlotStore;
pub use slots::{SaveSlots, load_session, save_session};
