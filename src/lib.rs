//! Scroll-driven synchronization of a silent video with a companion audio
//! track, plus a small injected volume widget.
//!
//! The host page provides a `<video id="aboutVideo">` and, optionally, an
//! `<audio id="videoAudio">`. Once the module loads it wires everything on
//! its own:
//!
//! - scrolling the video into view rewinds and starts both elements;
//!   scrolling it out of view pauses them
//! - play/pause/seeked/ended on the video are mirrored onto the audio
//! - a periodic poll snaps the audio back when the positions drift apart
//! - a mute-toggle/volume-slider widget is injected next to the video
//!
//! Build for the browser:
//! ```bash
//! wasm-pack build --target web
//! ```
//!
//! Then load it on the page:
//! ```javascript
//! import init from './pkg/rti_video_sync.js';
//! await init();
//! ```

mod diagnostics;
pub mod sync;
pub mod viewport;
pub mod widget;

#[cfg(target_arch = "wasm32")]
pub mod controller;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point: runs when the wasm module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        diagnostics::log_sync_error("attach", "no document available");
        return;
    };

    match controller::SyncController::attach(&document) {
        Ok(()) => diagnostics::log_sync("attach", "video/audio synchronization wired"),
        Err(err) => diagnostics::log_sync_error("attach", &err),
    }
}
