//! Wires the video element, its companion audio element, and the page
//! together: media-event mirroring, scroll-driven start/stop, the periodic
//! drift poll, and the delayed widget injection.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlAudioElement, HtmlMediaElement, HtmlVideoElement};

use crate::diagnostics::{log_sync, log_sync_error};
use crate::sync::{self, AudioAction, MediaEvent, PlaybackSnapshot};
use crate::viewport::{self, VisibilityChange};
use crate::widget;

pub const VIDEO_ELEMENT_ID: &str = "aboutVideo";
pub const AUDIO_ELEMENT_ID: &str = "videoAudio";

/// Delay before the on-load visibility check, in milliseconds.
pub const STARTUP_CHECK_DELAY_MS: u32 = 1_000;

/// Delay before the widget is injected, giving the playback elements time
/// to initialize, in milliseconds.
pub const WIDGET_INJECT_DELAY_MS: u32 = 2_000;

/// Coordinates the video/audio pair for the lifetime of the page.
pub struct SyncController {
    video: HtmlVideoElement,
    audio: Option<HtmlAudioElement>,
    video_was_visible: Rc<Cell<bool>>,
}

impl SyncController {
    /// Look up the playback elements and wire every handler. Fails only when
    /// the video element is missing or not a video; a missing audio element
    /// degrades to video-only playback with no sync and no widget.
    pub fn attach(document: &Document) -> Result<(), String> {
        let video = document
            .get_element_by_id(VIDEO_ELEMENT_ID)
            .ok_or_else(|| format!("video element #{VIDEO_ELEMENT_ID} not found"))?
            .dyn_into::<HtmlVideoElement>()
            .map_err(|_| format!("#{VIDEO_ELEMENT_ID} is not a <video> element"))?;

        let audio = document
            .get_element_by_id(AUDIO_ELEMENT_ID)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if audio.is_none() {
            log_sync("attach", "no audio element, running video-only");
        }

        let controller = SyncController {
            video,
            audio,
            video_was_visible: Rc::new(Cell::new(false)),
        };
        controller.wire_event_mirroring();
        controller.wire_scroll_visibility()?;
        controller.spawn_initial_visibility_check();
        controller.spawn_drift_corrector();
        controller.spawn_widget_injection();
        Ok(())
    }

    /// Mirror the video's play/pause/seeked/ended events onto the audio.
    fn wire_event_mirroring(&self) {
        let Some(audio) = self.audio.clone() else {
            return;
        };
        audio.set_volume(widget::DEFAULT_VOLUME);

        for event in MediaEvent::ALL {
            let video = self.video.clone();
            let audio = audio.clone();
            let callback = Closure::wrap(Box::new(move || {
                let snapshot = PlaybackSnapshot {
                    video_time: video.current_time(),
                    video_loops: video.loop_(),
                    audio_paused: audio.paused(),
                };
                apply_audio_actions(&audio, &sync::mirror_event(event, &snapshot));
            }) as Box<dyn FnMut()>);
            let _ = self
                .video
                .add_event_listener_with_callback(event.dom_name(), callback.as_ref().unchecked_ref());
            callback.forget();
        }
    }

    /// Start/stop playback on scroll-driven visibility transitions.
    fn wire_scroll_visibility(&self) -> Result<(), String> {
        let window = web_sys::window().ok_or("no window available")?;
        let video = self.video.clone();
        let audio = self.audio.clone();
        let video_was_visible = self.video_was_visible.clone();

        let callback = Closure::wrap(Box::new(move || {
            let is_visible = viewport::is_element_in_viewport(&video);
            match viewport::visibility_change(video_was_visible.get(), is_visible) {
                VisibilityChange::Appeared => {
                    video_was_visible.set(true);
                    start_from_beginning(&video, audio.as_ref());
                }
                VisibilityChange::Disappeared => {
                    video_was_visible.set(false);
                    stop_playback(&video, audio.as_ref());
                }
                VisibilityChange::Unchanged => {}
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
            .map_err(|err| format!("failed to attach scroll listener: {err:?}"))?;
        callback.forget();
        Ok(())
    }

    /// One-shot visibility check shortly after load, for videos that are
    /// already in view before the first scroll.
    fn spawn_initial_visibility_check(&self) {
        let video = self.video.clone();
        let audio = self.audio.clone();
        let video_was_visible = self.video_was_visible.clone();
        spawn_local(async move {
            TimeoutFuture::new(STARTUP_CHECK_DELAY_MS).await;
            let is_visible = viewport::is_element_in_viewport(&video);
            log_sync(
                "startup",
                if is_visible {
                    "video visible on load"
                } else {
                    "video hidden on load"
                },
            );
            if is_visible {
                video_was_visible.set(true);
                start_from_beginning(&video, audio.as_ref());
            }
        });
    }

    /// Poll both positions and snap the audio back onto the video when they
    /// drift apart. Runs for the page's lifetime.
    fn spawn_drift_corrector(&self) {
        let Some(audio) = self.audio.clone() else {
            return;
        };
        let video = self.video.clone();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(sync::DRIFT_POLL_INTERVAL_MS).await;
                if video.paused() || audio.paused() {
                    continue;
                }
                let video_time = video.current_time();
                if sync::drift_exceeds_tolerance(video_time, audio.current_time()) {
                    log_sync("drift", "correcting audio position");
                    audio.set_current_time(video_time);
                }
            }
        });
    }

    /// Inject the volume widget once the playback elements have settled.
    fn spawn_widget_injection(&self) {
        let Some(audio) = self.audio.clone() else {
            return;
        };
        let video = self.video.clone();
        spawn_local(async move {
            TimeoutFuture::new(WIDGET_INJECT_DELAY_MS).await;
            if let Err(err) = widget::inject_volume_controls(&video, &audio) {
                log_sync_error("widget", &err);
            }
        });
    }
}

fn apply_audio_actions(audio: &HtmlAudioElement, actions: &[AudioAction]) {
    for action in actions {
        match *action {
            AudioAction::Seek(position) => audio.set_current_time(position),
            AudioAction::Pause => {
                let _ = audio.pause();
            }
            AudioAction::Play => {
                let media: HtmlMediaElement = audio.clone().into();
                spawn_local(async move {
                    if let Err(err) = request_play(&media).await {
                        log_sync_error("audio.play", &err);
                    }
                });
            }
        }
    }
}

/// Rewind both elements and start playback. The audio only starts once the
/// video's own play request has resolved successfully.
fn start_from_beginning(video: &HtmlVideoElement, audio: Option<&HtmlAudioElement>) {
    log_sync("visibility", "starting playback from the beginning");
    video.set_current_time(0.0);

    let video_media: HtmlMediaElement = video.clone().into();
    let audio = audio.cloned();
    spawn_local(async move {
        if let Err(err) = request_play(&video_media).await {
            log_sync_error("video.play", &err);
            return;
        }
        if let Some(audio) = audio {
            audio.set_current_time(0.0);
            let audio_media: HtmlMediaElement = audio.into();
            if let Err(err) = request_play(&audio_media).await {
                log_sync_error("audio.play", &err);
            }
        }
    });
}

/// Pause whichever of the two elements is currently playing.
fn stop_playback(video: &HtmlVideoElement, audio: Option<&HtmlAudioElement>) {
    log_sync("visibility", "stopping playback");
    if !video.paused() {
        let _ = video.pause();
    }
    if let Some(audio) = audio {
        if !audio.paused() {
            let _ = audio.pause();
        }
    }
}

/// Await the browser's deferred play request and surface the outcome.
async fn request_play(media: &HtmlMediaElement) -> Result<(), String> {
    let promise: js_sys::Promise = media
        .play()
        .map_err(|err| format!("play request rejected: {err:?}"))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| format!("play request failed: {err:?}"))
}
