//! End-to-end playthrough of a branching script: title screen through
//! every detour and back onto the main route.

use std::sync::Arc;

use novella_engine::Session;
use novella_script::{BranchKey, Script};

const SCRIPT: &str = r"
frames:
  - text: A train yard, before sunrise.
    is_scene_change: true
  - text: Three ways out. Pick one.
    speaker: Mia
    has_choices: true
  - text: You vault the fence and run.
  - text: Your lungs burn. The yard is far behind.
    resumes_main_route: true
  - text: (sprinter filler)
  - text: (sprinter filler)
  - text: You follow the drainage canal east.
  - text: The canal spits you out past the checkpoint.
    resumes_main_route: true
  - text: You wait. And wait.
  - text: Eventually the guards simply leave.
    resumes_main_route: true
  - text: The city gate, at last.
    is_scene_change: true
  - text: Whatever you did, you ended up here.
choice_points:
  - question: Three ways out. Pick one.
    options:
      - label: Run for it
        branch: sprinter
      - label: The canal
        branch: alternate
      - label: Wait them out
        branch: third
  - question: Would you do it again?
    options:
      - label: Again, faster
        branch: sprinter
      - label: The canal, always
        branch: alternate
routing:
  entries:
    sprinter: 2
    alternate: 6
    third: 8
  resume_index: 10
";

#[test]
fn test_full_playthrough_reconverges_on_the_main_route() {
    let script = Arc::new(Script::from_yaml_str(SCRIPT).expect("script should load"));
    let mut session = Session::new(script);

    // Title screen -> playing.
    session.begin_story();
    assert!(session.state().overlays.story_active);

    // Walk to the choice and take the sprinter branch.
    session.advance();
    session.select_choice(BranchKey::Sprinter).unwrap();
    assert_eq!(session.state().current_frame_index, 2);

    // Play the detour out; its last frame funnels back to frame 10.
    session.advance();
    assert_eq!(session.state().current_frame_index, 3);
    session.advance();
    assert_eq!(session.state().current_frame_index, 10);
    assert!(session.state().display.is_scene_change);

    // Second prompt: picking the same branch again counts but stays put.
    session.select_choice(BranchKey::Sprinter).unwrap();
    assert_eq!(session.state().branch_tally[&BranchKey::Sprinter], 2);
    assert_eq!(session.state().current_frame_index, 10);
    assert!(session.state().active_choice.is_none());

    // Tail of the script; advancing past the end clamps.
    session.advance();
    session.advance();
    session.advance();
    assert_eq!(session.state().current_frame_index, 11);

    // The backlog replays every visited frame, newest first.
    let backlog = session.backlog();
    assert_eq!(backlog.first().map(|e| e.text.as_str()), Some("The city gate, at last."));
    assert_eq!(
        backlog.last().map(|e| e.text.as_str()),
        Some("A train yard, before sunrise.")
    );
    assert_eq!(backlog.len(), session.state().visited_history.len());
}

#[test]
fn test_untaken_branches_keep_their_one_shot_jump_available() {
    let script = Arc::new(Script::from_yaml_str(SCRIPT).expect("script should load"));
    let mut session = Session::new(script);
    session.begin_story();
    session.advance();

    session.select_choice(BranchKey::Third).unwrap();
    assert_eq!(session.state().current_frame_index, 8);

    // Alternate has never been selected, so its first selection still jumps.
    session.select_choice(BranchKey::Alternate).unwrap();
    assert_eq!(session.state().current_frame_index, 6);
    assert_eq!(session.state().branch_tally[&BranchKey::Third], 1);
    assert_eq!(session.state().branch_tally[&BranchKey::Alternate], 1);
    assert_eq!(session.state().branch_tally[&BranchKey::Sprinter], 0);
}
