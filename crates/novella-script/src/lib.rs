//! Novella — Script Store.
//!
//! The immutable side of the engine: an ordered sequence of [`Frame`]s,
//! an ordered sequence of [`ChoicePoint`]s, and the [`Routing`] table that
//! maps branches to their one-shot entry frames and names the index where
//! all detours rejoin the main route. Loaded once at startup, read-only
//! thereafter.

pub mod choice;
pub mod error;
pub mod frame;
pub mod script;

pub use choice::{BranchKey, ChoiceOption, ChoicePoint};
pub use error::ScriptError;
pub use frame::Frame;
pub use script::{Routing, Script};
