//! Browser bindings.
//!
//! The runner lives in a `thread_local!`; each export borrows it for the
//! duration of one call. Errors come back to JS as thrown `Error` objects.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::{GlyphRunner, RunnerError};

thread_local! {
    static RUNNER: RefCell<GlyphRunner> = RefCell::new(GlyphRunner::new());
}

fn with_runner<R>(f: impl FnOnce(&mut GlyphRunner) -> R) -> R {
    RUNNER.with(|cell| f(&mut cell.borrow_mut()))
}

fn to_js(err: RunnerError) -> JsValue {
    log::warn!("{err}");
    js_sys::Error::new(&err.to_string()).into()
}

/// Install panic and log hooks, then generate the writing system for `seed`.
/// Returns the glyph count.
#[wasm_bindgen]
pub fn sigil_init(seed: &str) -> Result<u32, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let count = with_runner(|r| r.load_system(seed)).map_err(to_js)?;
    log::info!("sigil: initialized with seed {seed:?}");
    Ok(count as u32)
}

#[wasm_bindgen]
pub fn sigil_system_json() -> Result<String, JsValue> {
    with_runner(|r| r.system_json()).map_err(to_js)
}

#[wasm_bindgen]
pub fn sigil_report_json() -> Result<String, JsValue> {
    with_runner(|r| r.report_json()).map_err(to_js)
}

/// Render a full glyph. Returns the number of filled outlines.
#[wasm_bindgen]
pub fn sigil_render_glyph(glyph_id: u32, options_json: &str) -> Result<u32, JsValue> {
    sigil_render_glyph_animated(glyph_id, 1.0, options_json)
}

/// Render a glyph as written up to `progress` (0 to 1).
#[wasm_bindgen]
pub fn sigil_render_glyph_animated(
    glyph_id: u32,
    progress: f64,
    options_json: &str,
) -> Result<u32, JsValue> {
    with_runner(|r| r.render(glyph_id as usize, progress, options_json))
        .map(|n| n as u32)
        .map_err(to_js)
}

/// The last render as `{ commands: [{ outline, color }] }`.
#[wasm_bindgen]
pub fn sigil_draw_list_json() -> Result<String, JsValue> {
    with_runner(|r| r.draw_list_json()).map_err(to_js)
}

// ---- Vector accessors ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn sigil_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn sigil_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count())
}

// ---- Game session ----

#[wasm_bindgen]
pub fn sigil_start_game(seed: &str) -> Result<String, JsValue> {
    with_runner(|r| -> Result<String, RunnerError> {
        r.start_game(seed)?;
        r.session_json()
    })
    .map_err(to_js)
}

#[wasm_bindgen]
pub fn sigil_advance_to_test() -> Result<String, JsValue> {
    with_runner(|r| {
        r.advance_to_test();
        r.session_json()
    })
    .map_err(to_js)
}

/// Submit `{ meaning?, glyphId?, order? }` for the current challenge.
/// Returns `{ correct, roundComplete }`.
#[wasm_bindgen]
pub fn sigil_submit_answer(answer_json: &str) -> Result<String, JsValue> {
    with_runner(|r| -> Result<String, RunnerError> {
        let outcome = r.submit_answer(answer_json)?;
        Ok(serde_json::to_string(&outcome)?)
    })
    .map_err(to_js)
}

#[wasm_bindgen]
pub fn sigil_session_json() -> Result<String, JsValue> {
    with_runner(|r| r.session_json()).map_err(to_js)
}
