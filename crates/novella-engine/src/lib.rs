//! Novella — narrative session state and navigation engine.
//!
//! The mutable side of the engine: [`NarrativeState`] is the per-session
//! record of position, branch tallies, history, and overlay flags;
//! [`Session`] owns exactly one of them and applies every transition
//! (advancing, rewinding, branch routing on choices, overlay toggles)
//! against a shared read-only [`novella_script::Script`]. Rendering
//! layers observe transitions through [`StateObserver`]; nothing in this
//! crate draws, plays audio, or touches storage.

pub mod observer;
pub mod session;
pub mod state;

pub use observer::StateObserver;
pub use session::{BacklogEntry, Session};
pub use state::{ActiveChoice, FrameDisplay, NarrativeState, OverlayFlags};
