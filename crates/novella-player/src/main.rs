//! Novella terminal player.
//!
//! A minimal line-oriented front-end over the narrative engine: it loads
//! a YAML script, binds a console renderer to the session, and maps
//! typed commands onto the engine's action surface. Saves go through the
//! JSON file store.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use novella_core::clock::SystemClock;
use novella_engine::Session;
use novella_saves::{JsonFileStore, SaveSlots, load_session, save_session};
use novella_script::Script;

mod render;

use render::ConsoleRenderer;

/// Slots offered by the save/load menus.
const MENU_SLOTS: [&str; 3] = ["1", "2", "3"];

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber. Logs go to stderr so they never
    // interleave with the rendered story on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let script_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "crates/novella-player/scripts/demo.yaml".to_owned());
    let saves_path =
        std::env::var("NOVELLA_SAVES").unwrap_or_else(|_| "novella-saves.json".to_owned());

    let source = fs::read_to_string(&script_path)
        .map_err(|e| format!("cannot read script {script_path}: {e}"))?;
    let script = Arc::new(Script::from_yaml_str(&source)?);
    tracing::info!(script = %script_path, frames = script.frames().len(), "script loaded");

    let mut session = Session::new(Arc::clone(&script));
    session.subscribe(Box::new(ConsoleRenderer::new(script)));
    let mut slots = SaveSlots::new(JsonFileStore::open(&saves_path)?);
    let clock = SystemClock;

    println!("=== NOVELLA ===");
    println!("press enter to begin, 'help' for commands, 'quit' to leave");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        match input {
            "quit" | "q" => break,
            "help" => print_help(),
            _ => dispatch(input, &mut session, &mut slots, &clock),
        }
    }
    Ok(())
}

fn print_help() {
    println!("enter      advance (or begin, on the title screen)");
    println!("1..9       pick a choice / a save slot when a menu is open");
    println!("back       rewind one frame");
    println!("log        toggle the backlog");
    println!("saves      toggle the save menu");
    println!("loads      toggle the load menu");
    println!("menu       toggle the button bar");
    println!("text       toggle the text box");
    println!("quit       leave");
}

fn dispatch(
    input: &str,
    session: &mut Session,
    slots: &mut SaveSlots<JsonFileStore>,
    clock: &SystemClock,
) {
    if session.state().overlays.title_screen_shown {
        dispatch_title(input, session, slots);
        return;
    }
    if let Ok(number) = input.parse::<usize>() {
        dispatch_number(number, session, slots, clock);
        return;
    }
    match input {
        "" | "a" => session.advance(),
        "back" => session.rewind(),
        "log" => session.toggle_backlog(),
        "saves" => {
            session.toggle_save_menu();
            if session.state().overlays.save_menu_shown {
                print_slot_summary(slots);
            }
        }
        "loads" => {
            session.toggle_load_menu();
            if session.state().overlays.load_menu_shown {
                print_slot_summary(slots);
            }
        }
        "menu" => session.toggle_menu(),
        "text" => session.toggle_text_box(),
        _ => println!("unknown command, 'help' lists them"),
    }
}

/// The title screen only offers beginning the story and loading a save.
fn dispatch_title(input: &str, session: &mut Session, slots: &mut SaveSlots<JsonFileStore>) {
    match input {
        "" | "begin" => session.begin_story(),
        "loads" => {
            session.toggle_load_menu();
            if session.state().overlays.load_menu_shown {
                print_slot_summary(slots);
            }
        }
        _ => {
            if session.state().overlays.load_menu_shown
                && let Ok(number) = input.parse::<usize>()
            {
                match load_session(session, slots, &number.to_string()) {
                    Ok(()) => println!("(loaded slot {number})"),
                    Err(e) => println!("(load failed: {e})"),
                }
            } else {
                println!("(press enter to begin, 'loads' to load a save)");
            }
        }
    }
}

/// Numbers select a save slot while a save/load menu is open, and a
/// choice option otherwise.
fn dispatch_number(
    number: usize,
    session: &mut Session,
    slots: &mut SaveSlots<JsonFileStore>,
    clock: &SystemClock,
) {
    let overlays = &session.state().overlays;
    if overlays.save_menu_shown {
        match save_session(session, slots, &number.to_string(), clock) {
            Ok(()) => println!("(saved to slot {number})"),
            Err(e) => println!("(save failed: {e})"),
        }
        return;
    }
    if overlays.load_menu_shown {
        match load_session(session, slots, &number.to_string()) {
            Ok(()) => println!("(loaded slot {number})"),
            Err(e) => println!("(load failed: {e})"),
        }
        return;
    }
    let branch = session
        .state()
        .active_choice
        .as_ref()
        .filter(|_| session.state().display.has_choices)
        .and_then(|choice| choice.options.get(number.wrapping_sub(1)))
        .map(|option| option.branch);
    match branch {
        Some(branch) => {
            if let Err(e) = session.select_choice(branch) {
                println!("({e})");
            }
        }
        None => println!("(nothing to pick right now)"),
    }
}

fn print_slot_summary(slots: &SaveSlots<JsonFileStore>) {
    for slot in MENU_SLOTS {
        match slots.timestamp(slot) {
            Ok(Some(time)) => println!("  slot {slot}: {}", time.format("%Y-%m-%d %H:%M")),
            Ok(None) => println!("  slot {slot}: empty"),
            Err(e) => println!("  slot {slot}: unreadable ({e})"),
        }
    }
}
