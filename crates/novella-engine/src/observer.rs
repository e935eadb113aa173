//! State-change notification contract.

use crate::state::NarrativeState;

/// Receives the new state after every session mutation.
///
/// This is the seam a rendering layer binds to: subscribe once, redraw on
/// each notification. Observers are called synchronously, after the
/// transition has been fully applied (history append included) and before
/// the session accepts another action.
pub trait StateObserver {
    /// Called with the state as it stands after a completed transition.
    fn state_changed(&mut self, state: &NarrativeState);
}
