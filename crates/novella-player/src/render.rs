//! Console renderer — the reference `StateObserver`.

use std::sync::Arc;

use novella_engine::{NarrativeState, StateObserver};
use novella_script::Script;

/// Prints the session state to stdout after every transition.
///
/// Holds its own handle to the script so the backlog overlay can resolve
/// history indices without reaching back into the session.
pub struct ConsoleRenderer {
    script: Arc<Script>,
    last_frame: Option<usize>,
}

impl ConsoleRenderer {
    #[must_use]
    pub fn new(script: Arc<Script>) -> Self {
        Self {
            script,
            last_frame: None,
        }
    }

    fn render_backlog(&self, state: &NarrativeState) {
        println!("―― backlog (newest first) ――");
        for &index in state.visited_history.iter().rev() {
            if let Some(frame) = self.script.frame(index) {
                match &frame.speaker {
                    Some(speaker) => println!("  {speaker}: {}", frame.text),
                    None => println!("  {}", frame.text),
                }
            }
        }
        println!("―― 'log' to close ――");
    }

    fn render_frame(&mut self, state: &NarrativeState) {
        if state.display.is_scene_change && self.last_frame != Some(state.current_frame_index) {
            println!();
            println!("――――――――――――――――――――");
            if let Some(background) = &state.display.background {
                println!("[scene: {background}]");
            }
            if let Some(music) = &state.display.background_music {
                println!("[music: {music}]");
            }
        }
        self.last_frame = Some(state.current_frame_index);
        if state.overlays.text_box_shown {
            match &state.display.speaker {
                Some(speaker) => println!("{speaker}: {}", state.display.text),
                None => println!("{}", state.display.text),
            }
        }
        if state.display.has_choices
            && let Some(choice) = &state.active_choice
        {
            println!("  ? {}", choice.question);
            for (i, option) in choice.options.iter().enumerate() {
                println!("  [{}] {}", i + 1, option.label);
            }
        }
    }
}

impl StateObserver for ConsoleRenderer {
    fn state_changed(&mut self, state: &NarrativeState) {
        if state.overlays.title_screen_shown {
            return;
        }
        if state.overlays.backlog_shown {
            self.render_backlog(state);
            return;
        }
        if state.overlays.save_menu_shown {
            println!("―― save menu: enter a slot number, 'saves' to close ――");
            return;
        }
        if state.overlays.load_menu_shown {
            println!("―― load menu: enter a slot number, 'loads' to close ――");
            return;
        }
        self.render_frame(state);
    }
}
