//! The navigation engine: one session over one script.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use novella_core::error::EngineError;
use novella_script::{BranchKey, Script};

use crate::observer::StateObserver;
use crate::state::{ActiveChoice, FrameDisplay, NarrativeState};

/// One entry of the backlog view: the speaker and text of a visited
/// frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogEntry {
    /// Who spoke the line, if anyone.
    pub speaker: Option<String>,
    /// The line itself.
    pub text: String,
}

/// A running narrative session.
///
/// Owns the single mutable [`NarrativeState`] and applies every
/// transition against a shared, read-only [`Script`]. All operations are
/// synchronous: each one is fully applied, history append and observer
/// notification included, before it returns, so at most one
/// transition is ever in flight. Callers porting this to a threaded
/// environment must keep that invariant by serializing access to the
/// session.
pub struct Session {
    id: Uuid,
    script: Arc<Script>,
    state: NarrativeState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Creates a session at the title screen, positioned before frame 0.
    #[must_use]
    pub fn new(script: Arc<Script>) -> Self {
        let state = NarrativeState::for_script(&script);
        Self {
            id: Uuid::new_v4(),
            script,
            state,
            observers: Vec::new(),
        }
    }

    /// The session identifier, used in tracing output.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read access to the current state.
    #[must_use]
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// The script this session plays.
    #[must_use]
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Registers an observer to be notified after every transition.
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Leaves the title screen and starts playing: frame 0 becomes
    /// current and the first choice point is loaded.
    pub fn begin_story(&mut self) {
        tracing::info!(session_id = %self.id, "story started");
        self.state.overlays.title_screen_shown = false;
        self.state.overlays.story_active = true;
        self.apply_frame(0);
        self.state.current_choice_point_index = 0;
        self.state.active_choice = self.script.choice_point(0).map(ActiveChoice::from_point);
        self.notify();
    }

    /// Moves to `index`, clamped into the script bounds. Values past the
    /// end land on the last frame, negative values on frame 0; clamping
    /// is silent and never an error.
    pub fn set_frame(&mut self, index: i64) {
        let requested = if index < 0 {
            0
        } else {
            usize::try_from(index).unwrap_or(usize::MAX)
        };
        self.apply_frame(requested);
        self.notify();
    }

    /// Moves forward one frame, unless the current frame ends a branch
    /// detour (`resumes_main_route`), in which case the session jumps to
    /// the reconvergence index where all branches rejoin.
    pub fn advance(&mut self) {
        let current = self.state.current_frame_index;
        let resumes = self
            .script
            .frame(current)
            .is_some_and(|frame| frame.resumes_main_route);
        if resumes {
            self.apply_frame(self.script.routing().resume_index);
        } else {
            self.apply_frame(current + 1);
        }
        self.notify();
    }

    /// Moves back one frame, clamped at frame 0.
    pub fn rewind(&mut self) {
        self.apply_frame(self.state.current_frame_index.saturating_sub(1));
        self.notify();
    }

    /// Resolves the active choice in favor of `branch`.
    ///
    /// The branch's tally is incremented; the first time a branch is ever
    /// selected the session jumps to its routing entry frame, and later
    /// selections only count. The choice point index then advances
    /// and the next prompt becomes active, or `None` once the script's
    /// prompts are spent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownBranch`], without mutating anything,
    /// if the script does not route `branch`; this catches script/data
    /// mismatches instead of growing a stray counter.
    pub fn select_choice(&mut self, branch: BranchKey) -> Result<(), EngineError> {
        let Some(&entry_index) = self.script.routing().entries.get(&branch) else {
            return Err(EngineError::UnknownBranch {
                branch: branch.to_string(),
            });
        };
        let Some(tally) = self.state.branch_tally.get_mut(&branch) else {
            return Err(EngineError::UnknownBranch {
                branch: branch.to_string(),
            });
        };
        *tally += 1;
        let first_visit = self.state.visited_branches.insert(branch);
        tracing::debug!(session_id = %self.id, %branch, first_visit, "choice selected");
        if first_visit {
            self.apply_frame(entry_index);
        }
        self.state.current_choice_point_index += 1;
        self.state.active_choice = self
            .script
            .choice_point(self.state.current_choice_point_index)
            .map(ActiveChoice::from_point);
        self.notify();
        Ok(())
    }

    /// Toggles the button bar.
    pub fn toggle_menu(&mut self) {
        self.state.overlays.menu_shown = !self.state.overlays.menu_shown;
        self.notify();
    }

    /// Toggles the text box.
    pub fn toggle_text_box(&mut self) {
        self.state.overlays.text_box_shown = !self.state.overlays.text_box_shown;
        self.notify();
    }

    /// Toggles the backlog overlay, closing the save and load menus.
    pub fn toggle_backlog(&mut self) {
        let overlays = &mut self.state.overlays;
        overlays.save_menu_shown = false;
        overlays.load_menu_shown = false;
        overlays.backlog_shown = !overlays.backlog_shown;
        self.notify();
    }

    /// Toggles the save menu overlay, closing the load menu and backlog.
    pub fn toggle_save_menu(&mut self) {
        let overlays = &mut self.state.overlays;
        overlays.load_menu_shown = false;
        overlays.backlog_shown = false;
        overlays.save_menu_shown = !overlays.save_menu_shown;
        self.notify();
    }

    /// Toggles the load menu overlay, closing the save menu and backlog.
    pub fn toggle_load_menu(&mut self) {
        let overlays = &mut self.state.overlays;
        overlays.save_menu_shown = false;
        overlays.backlog_shown = false;
        overlays.load_menu_shown = !overlays.load_menu_shown;
        self.notify();
    }

    /// The speaker and text of every visited frame, most recent first.
    #[must_use]
    pub fn backlog(&self) -> Vec<BacklogEntry> {
        self.state
            .visited_history
            .iter()
            .rev()
            .filter_map(|&index| self.script.frame(index))
            .map(|frame| BacklogEntry {
                speaker: frame.speaker.clone(),
                text: frame.text.clone(),
            })
            .collect()
    }

    /// Wholesale-replaces the session state with a restored snapshot.
    ///
    /// Nothing is merged: the snapshot becomes the state, exactly as the
    /// persistence adapter produced it.
    pub fn restore(&mut self, state: NarrativeState) {
        tracing::info!(session_id = %self.id, frame = state.current_frame_index, "state restored");
        self.state = state;
        self.notify();
    }

    /// Clamps `requested` into bounds, records history on an actual
    /// position change, and copies the new frame's display fields.
    fn apply_frame(&mut self, requested: usize) {
        let next = requested.min(self.script.last_index());
        let previous = self.state.current_frame_index;
        if next != previous {
            self.state.visited_history.push(previous);
        }
        self.state.current_frame_index = next;
        self.state.display = FrameDisplay::copy_from(&self.script.frames()[next]);
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }
}
