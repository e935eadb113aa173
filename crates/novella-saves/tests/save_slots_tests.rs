//! Integration tests for save-slot persistence: a real session saved
//! into and restored from the various slot stores.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use novella_core::error::EngineError;
use novella_engine::Session;
use novella_saves::{JsonFileStore, MemorySlotStore, SaveSlots, load_session, save_session};
use novella_script::{BranchKey, Script};
use novella_test_support::{EmptySlotStore, FailingSlotStore, FixedClock, RecordingSlotStore};

const SCRIPT: &str = r"
frames:
  - text: An empty platform at dawn.
  - text: Which way do you go?
    speaker: Mia
    has_choices: true
  - text: You break into a sprint.
  - text: The long way around.
  - text: All paths meet here.
choice_points:
  - question: Which way do you go?
    options:
      - label: Sprint
        branch: sprinter
      - label: Long way
        branch: alternate
routing:
  entries:
    sprinter: 2
    alternate: 3
  resume_index: 4
";

fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
}

/// A session a few actions into the story, with history, a tally, and
/// the save menu open: the state a player actually saves from.
fn played_session() -> Session {
    let script = Arc::new(Script::from_yaml_str(SCRIPT).expect("script should load"));
    let mut session = Session::new(script);
    session.begin_story();
    session.advance();
    session.select_choice(BranchKey::Sprinter).unwrap();
    session.toggle_save_menu();
    session
}

#[test]
fn test_save_then_load_restores_the_session_exactly() {
    let mut session = played_session();
    let mut slots = SaveSlots::new(MemorySlotStore::new());
    let clock = fixed_clock();
    save_session(&mut session, &mut slots, "slot1", &clock).unwrap();
    let saved = session.state().clone();

    // Keep playing, then load the earlier save back.
    session.advance();
    session.advance();
    load_session(&mut session, &slots, "slot1").unwrap();

    let restored = session.state();
    assert_eq!(restored.current_frame_index, saved.current_frame_index);
    assert_eq!(restored.branch_tally, saved.branch_tally);
    assert_eq!(restored.visited_branches, saved.visited_branches);
    assert_eq!(restored.visited_history, saved.visited_history);
    assert_eq!(
        restored.current_choice_point_index,
        saved.current_choice_point_index
    );
    assert_eq!(restored.display, saved.display);
    assert_eq!(restored.active_choice, saved.active_choice);
}

#[test]
fn test_load_clears_the_save_menu_flag_regardless_of_saved_value() {
    let mut session = played_session();
    assert!(session.state().overlays.save_menu_shown);
    let mut slots = SaveSlots::new(MemorySlotStore::new());
    save_session(&mut session, &mut slots, "slot1", &fixed_clock()).unwrap();

    load_session(&mut session, &slots, "slot1").unwrap();

    let overlays = &session.state().overlays;
    assert!(!overlays.save_menu_shown);
    // Only the save menu is forced; the load menu comes back as saved.
    assert!(!overlays.load_menu_shown);
}

#[test]
fn test_loading_an_empty_slot_signals_slot_empty_and_mutates_nothing() {
    let mut session = played_session();
    let before = session.state().clone();
    let slots = SaveSlots::new(EmptySlotStore);

    let result = load_session(&mut session, &slots, "neverSaved");

    assert!(matches!(
        result,
        Err(EngineError::SlotEmpty { ref slot }) if slot == "neverSaved"
    ));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_save_adopts_the_round_tripped_snapshot() {
    let mut session = played_session();
    let mut slots = SaveSlots::new(MemorySlotStore::new());
    let before = session.state().clone();

    save_session(&mut session, &mut slots, "slot1", &fixed_clock()).unwrap();

    // The re-read snapshot must be indistinguishable from the state that
    // was saved, save menu included.
    assert_eq!(session.state(), &before);
}

#[test]
fn test_save_writes_a_timestamp_and_a_snapshot_per_slot() {
    let mut session = played_session();
    let mut slots = SaveSlots::new(RecordingSlotStore::new());

    save_session(&mut session, &mut slots, "2", &fixed_clock()).unwrap();

    let store = slots.store();
    let keys: Vec<&str> = store.writes().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["slot/2/time", "slot/2"]);
    assert!(store.writes()[0].1.starts_with("2026-01-15T10:00:00"));
}

#[test]
fn test_saving_into_an_occupied_slot_overwrites_it() {
    let mut session = played_session();
    let mut slots = SaveSlots::new(MemorySlotStore::new());
    save_session(&mut session, &mut slots, "slot1", &fixed_clock()).unwrap();
    let first = session.state().clone();

    session.advance();
    save_session(&mut session, &mut slots, "slot1", &fixed_clock()).unwrap();
    let loaded = slots.load("slot1").unwrap();

    assert_ne!(loaded.current_frame_index, first.current_frame_index);
    assert_eq!(loaded.current_frame_index, session.state().current_frame_index);
}

#[test]
fn test_timestamp_reports_when_a_slot_was_written() {
    let mut session = played_session();
    let mut slots = SaveSlots::new(MemorySlotStore::new());
    let clock = fixed_clock();

    assert_eq!(slots.timestamp("slot1").unwrap(), None);
    save_session(&mut session, &mut slots, "slot1", &clock).unwrap();

    assert_eq!(slots.timestamp("slot1").unwrap(), Some(clock.0));
}

#[test]
fn test_storage_failures_surface_as_storage_errors() {
    let mut session = played_session();
    let mut slots = SaveSlots::new(FailingSlotStore);

    let result = save_session(&mut session, &mut slots, "slot1", &fixed_clock());

    assert!(matches!(result, Err(EngineError::Storage(_))));
}

#[test]
fn test_corrupt_slot_data_is_reported_not_restored() {
    let mut session = played_session();
    let before = session.state().clone();
    let mut store = MemorySlotStore::new();
    novella_core::store::SlotStore::set(&mut store, "slot/slot1", "not json").unwrap();
    let slots = SaveSlots::new(store);

    let result = load_session(&mut session, &slots, "slot1");

    assert!(matches!(
        result,
        Err(EngineError::CorruptSlot { ref slot, .. }) if slot == "slot1"
    ));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_file_store_round_trips_a_save_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves.json");
    let mut session = played_session();
    let mut slots = SaveSlots::new(JsonFileStore::open(&path).unwrap());
    save_session(&mut session, &mut slots, "slot1", &fixed_clock()).unwrap();
    let saved = session.state().clone();

    // A later process opens the same file and loads the slot.
    let script = session.script().clone();
    let mut later = Session::new(Arc::new(script));
    let reopened = SaveSlots::new(JsonFileStore::open(&path).unwrap());
    load_session(&mut later, &reopened, "slot1").unwrap();

    let mut expected = saved;
    expected.overlays.save_menu_shown = false;
    assert_eq!(later.state(), &expected);
}
