pub mod runner;

pub use runner::SessionRunner;

use std::cell::RefCell;

use eightball_engine::{InputEvent, SessionConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls before `game_init` are logged and
/// return `None`.
fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("Session not initialized. Call game_init() first.");
                None
            }
        }
    })
}

fn install(runner: SessionRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Start a session with the default configuration.
#[wasm_bindgen]
pub fn game_init() {
    init_logging();
    match SessionRunner::new(SessionConfig::default()) {
        Ok(runner) => {
            install(runner);
            log::info!("eightball: initialized");
        }
        Err(err) => log::error!("eightball: {err}"),
    }
}

/// Start a session from a JSON config. Invalid JSON falls back to defaults.
#[wasm_bindgen]
pub fn game_init_with_config(json: &str) {
    init_logging();
    match SessionRunner::from_json_or_default(json) {
        Ok(runner) => {
            install(runner);
            log::info!("eightball: initialized from config");
        }
        Err(err) => log::error!("eightball: {err}"),
    }
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

/// The host window is closing.
#[wasm_bindgen]
pub fn game_quit() {
    with_runner(|r| r.push_input(InputEvent::Quit));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_ball_data_offset() -> u32 {
    with_runner(|r| r.ball_data_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_event_data_offset() -> u32 {
    with_runner(|r| r.event_data_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}
