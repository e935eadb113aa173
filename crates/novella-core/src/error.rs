//! Engine error types.

use thiserror::Error;

/// Top-level error type for narrative engine operations.
///
/// Out-of-range frame navigation is deliberately absent: the engine clamps
/// indices into the script bounds and never surfaces that as an error.
/// Every variant is local to the single action that produced it; none is
/// fatal to the session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A save slot was loaded before anything was saved into it.
    #[error("save slot {slot:?} is empty")]
    SlotEmpty {
        /// The slot identifier that was requested.
        slot: String,
    },

    /// A choice named a branch the loaded script does not route.
    #[error("branch {branch:?} is not routed by the loaded script")]
    UnknownBranch {
        /// The rejected branch identifier.
        branch: String,
    },

    /// A save slot held data that could not be deserialized.
    #[error("save slot {slot:?} holds unreadable data: {reason}")]
    CorruptSlot {
        /// The slot identifier that was requested.
        slot: String,
        /// Why deserialization failed.
        reason: String,
    },

    /// The underlying key-value store failed.
    #[error("storage error: {0}")]
    Storage(String),
}
