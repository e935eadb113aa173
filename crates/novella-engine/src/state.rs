//! The narrative session state record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use novella_script::{BranchKey, ChoiceOption, ChoicePoint, Frame, Script};

/// UI visibility flags layered over the playing state.
///
/// `save_menu_shown`, `load_menu_shown`, and `backlog_shown` form a
/// mutually exclusive group: opening one closes the other two. The
/// remaining flags toggle independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayFlags {
    /// Whether the title screen is still up (session not started).
    pub title_screen_shown: bool,
    /// Whether frames are being played.
    pub story_active: bool,
    /// Whether the button bar is shown.
    pub menu_shown: bool,
    /// Whether the backlog overlay is open.
    pub backlog_shown: bool,
    /// Whether the text box is drawn over the scene.
    pub text_box_shown: bool,
    /// Whether the save menu overlay is open.
    pub save_menu_shown: bool,
    /// Whether the load menu overlay is open.
    pub load_menu_shown: bool,
}

impl Default for OverlayFlags {
    fn default() -> Self {
        Self {
            title_screen_shown: true,
            story_active: false,
            menu_shown: true,
            backlog_shown: false,
            text_box_shown: true,
            save_menu_shown: false,
            load_menu_shown: false,
        }
    }
}

/// Frame-dependent display fields, copied out of the current frame every
/// time the position changes so a renderer never has to index the script
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDisplay {
    /// The current dialogue or narration line.
    pub text: String,
    /// Who is speaking, if anyone.
    pub speaker: Option<String>,
    /// Background image reference.
    pub background: Option<String>,
    /// Background music reference.
    pub background_music: Option<String>,
    /// Character sprite reference.
    pub sprite: Option<String>,
    /// Voice clip reference.
    pub voice: Option<String>,
    /// Whether the choice menu is offered on this frame.
    pub has_choices: bool,
    /// Whether this frame starts a new scene.
    pub is_scene_change: bool,
}

impl FrameDisplay {
    pub(crate) fn copy_from(frame: &Frame) -> Self {
        Self {
            text: frame.text.clone(),
            speaker: frame.speaker.clone(),
            background: frame.background.clone(),
            background_music: frame.background_music.clone(),
            sprite: frame.sprite.clone(),
            voice: frame.voice.clone(),
            has_choices: frame.has_choices,
            is_scene_change: frame.is_scene_change,
        }
    }
}

/// The choice prompt currently offered to the player, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveChoice {
    /// The prompt shown above the options.
    pub question: String,
    /// The selectable options, in display order.
    pub options: Vec<ChoiceOption>,
}

impl ActiveChoice {
    pub(crate) fn from_point(point: &ChoicePoint) -> Self {
        Self {
            question: point.question.clone(),
            options: point.options.clone(),
        }
    }
}

/// The mutable state of one narrative session.
///
/// Serialized wholesale on save and wholesale-replaced on load; the
/// script itself is never part of a snapshot, so a snapshot's indices are
/// only meaningful against a script of the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeState {
    /// Position in the frame sequence, always within script bounds.
    pub current_frame_index: usize,
    /// How often each routed branch has been selected.
    pub branch_tally: BTreeMap<BranchKey, u32>,
    /// Branches whose one-shot entry jump has already fired.
    pub visited_branches: BTreeSet<BranchKey>,
    /// How many choices have been resolved; may equal the number of
    /// choice points once all prompts are spent.
    pub current_choice_point_index: usize,
    /// Every index held before a position change, in order.
    pub visited_history: Vec<usize>,
    /// UI visibility flags.
    pub overlays: OverlayFlags,
    /// Display fields of the current frame.
    pub display: FrameDisplay,
    /// The currently offered choice prompt, `None` once exhausted.
    pub active_choice: Option<ActiveChoice>,
}

impl NarrativeState {
    /// Builds the initial state for a session over `script`: position 0,
    /// a zero tally for every branch the script routes, empty history,
    /// default overlay flags, and no active choice yet.
    #[must_use]
    pub fn for_script(script: &Script) -> Self {
        let branch_tally = script
            .routing()
            .entries
            .keys()
            .map(|&branch| (branch, 0))
            .collect();
        Self {
            current_frame_index: 0,
            branch_tally,
            visited_branches: BTreeSet::new(),
            current_choice_point_index: 0,
            visited_history: Vec::new(),
            overlays: OverlayFlags::default(),
            display: FrameDisplay::default(),
            active_choice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novella_script::ScriptError;

    fn two_frame_script() -> Result<Script, ScriptError> {
        let source = r"
frames:
  - text: one
  - text: two
routing:
  entries:
    sprinter: 1
    alternate: 0
  resume_index: 0
";
        Script::from_yaml_str(source)
    }

    #[test]
    fn test_for_script_seeds_a_zero_tally_per_routed_branch() {
        let script = two_frame_script().unwrap();

        let state = NarrativeState::for_script(&script);

        assert_eq!(state.branch_tally.len(), 2);
        assert_eq!(state.branch_tally[&BranchKey::Sprinter], 0);
        assert_eq!(state.branch_tally[&BranchKey::Alternate], 0);
        assert!(!state.branch_tally.contains_key(&BranchKey::Third));
        assert!(state.visited_branches.is_empty());
    }

    #[test]
    fn test_default_overlays_match_session_start() {
        let overlays = OverlayFlags::default();

        assert!(overlays.title_screen_shown);
        assert!(!overlays.story_active);
        assert!(overlays.menu_shown);
        assert!(overlays.text_box_shown);
        assert!(!overlays.backlog_shown);
        assert!(!overlays.save_menu_shown);
        assert!(!overlays.load_menu_shown);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let script = two_frame_script().unwrap();
        let mut state = NarrativeState::for_script(&script);
        state.current_frame_index = 1;
        state.visited_history.push(0);
        state.branch_tally.insert(BranchKey::Sprinter, 2);
        state.visited_branches.insert(BranchKey::Sprinter);
        state.current_choice_point_index = 1;

        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: NarrativeState = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, state);
    }

    #[test]
    fn test_branch_tally_serializes_with_script_facing_names() {
        let script = two_frame_script().unwrap();
        let state = NarrativeState::for_script(&script);

        let encoded = serde_json::to_value(&state).unwrap();

        assert!(encoded["branch_tally"].get("sprinter").is_some());
        assert!(encoded["branch_tally"].get("Sprinter").is_none());
    }
}
