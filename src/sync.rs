//! Event-mirroring policy: which audio-side actions follow from a video
//! playback event, plus the periodic drift check.

/// Maximum tolerated position difference between video and audio, in seconds.
pub const DRIFT_TOLERANCE_SECS: f64 = 0.3;

/// Period of the drift-correction poll, in milliseconds.
pub const DRIFT_POLL_INTERVAL_MS: u32 = 2_000;

/// Video playback events mirrored onto the companion audio element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Seeked,
    Ended,
}

impl MediaEvent {
    /// All events a listener must be registered for.
    pub const ALL: [MediaEvent; 4] = [
        MediaEvent::Play,
        MediaEvent::Pause,
        MediaEvent::Seeked,
        MediaEvent::Ended,
    ];

    /// The DOM event type this variant corresponds to.
    pub fn dom_name(&self) -> &'static str {
        match self {
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::Seeked => "seeked",
            MediaEvent::Ended => "ended",
        }
    }
}

/// Snapshot of both elements' state at the moment an event fired.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackSnapshot {
    pub video_time: f64,
    pub video_loops: bool,
    pub audio_paused: bool,
}

/// An imperative step to apply to the audio element, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioAction {
    Seek(f64),
    Play,
    Pause,
}

/// Map a video event to the audio-side actions that keep the pair in sync.
///
/// - `play` while the audio is paused: align the audio to the video's
///   position, then start it. A play event with the audio already running
///   needs nothing.
/// - `pause`: pause the audio if it is running.
/// - `seeked`: copy the video's position unconditionally.
/// - `ended` on a looping video: the video restarts itself, so only rewind
///   the audio. On a non-looping video, stop the audio and rewind it.
pub fn mirror_event(event: MediaEvent, snapshot: &PlaybackSnapshot) -> Vec<AudioAction> {
    match event {
        MediaEvent::Play => {
            if snapshot.audio_paused {
                vec![AudioAction::Seek(snapshot.video_time), AudioAction::Play]
            } else {
                Vec::new()
            }
        }
        MediaEvent::Pause => {
            if snapshot.audio_paused {
                Vec::new()
            } else {
                vec![AudioAction::Pause]
            }
        }
        MediaEvent::Seeked => vec![AudioAction::Seek(snapshot.video_time)],
        MediaEvent::Ended => {
            if snapshot.video_loops {
                vec![AudioAction::Seek(0.0)]
            } else {
                vec![AudioAction::Pause, AudioAction::Seek(0.0)]
            }
        }
    }
}

/// True when the positions have drifted apart beyond the tolerance.
pub fn drift_exceeds_tolerance(video_time: f64, audio_time: f64) -> bool {
    (video_time - audio_time).abs() > DRIFT_TOLERANCE_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(video_time: f64, video_loops: bool, audio_paused: bool) -> PlaybackSnapshot {
        PlaybackSnapshot {
            video_time,
            video_loops,
            audio_paused,
        }
    }

    #[test]
    fn play_with_paused_audio_aligns_then_starts() {
        let actions = mirror_event(MediaEvent::Play, &snapshot(12.5, false, true));
        assert_eq!(actions, vec![AudioAction::Seek(12.5), AudioAction::Play]);
    }

    #[test]
    fn play_with_running_audio_is_a_no_op() {
        let actions = mirror_event(MediaEvent::Play, &snapshot(12.5, false, false));
        assert!(actions.is_empty());
    }

    #[test]
    fn pause_stops_running_audio() {
        let actions = mirror_event(MediaEvent::Pause, &snapshot(3.0, false, false));
        assert_eq!(actions, vec![AudioAction::Pause]);
    }

    #[test]
    fn pause_with_paused_audio_is_a_no_op() {
        let actions = mirror_event(MediaEvent::Pause, &snapshot(3.0, false, true));
        assert!(actions.is_empty());
    }

    #[test]
    fn seeked_always_copies_position() {
        for paused in [true, false] {
            let actions = mirror_event(MediaEvent::Seeked, &snapshot(47.2, false, paused));
            assert_eq!(actions, vec![AudioAction::Seek(47.2)]);
        }
    }

    #[test]
    fn ended_on_looping_video_only_rewinds_audio() {
        let actions = mirror_event(MediaEvent::Ended, &snapshot(90.0, true, false));
        assert_eq!(actions, vec![AudioAction::Seek(0.0)]);
    }

    #[test]
    fn ended_on_non_looping_video_stops_and_rewinds_audio() {
        let actions = mirror_event(MediaEvent::Ended, &snapshot(90.0, false, false));
        assert_eq!(actions, vec![AudioAction::Pause, AudioAction::Seek(0.0)]);
    }

    #[test]
    fn drift_beyond_tolerance_triggers_correction() {
        assert!(drift_exceeds_tolerance(10.0, 9.6));
        assert!(drift_exceeds_tolerance(9.6, 10.0));
    }

    #[test]
    fn drift_within_tolerance_is_ignored() {
        assert!(!drift_exceeds_tolerance(10.0, 10.0));
        assert!(!drift_exceeds_tolerance(10.0, 9.8));
        // exactly at the threshold is still tolerated
        assert!(!drift_exceeds_tolerance(0.3, 0.0));
    }
}
