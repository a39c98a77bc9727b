//! Floating volume widget: mute toggle plus volume slider, injected next to
//! the video once the playback elements exist.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, Event, HtmlAudioElement, HtmlInputElement, HtmlVideoElement};

/// Class on the widget container, also the idempotency guard selector.
pub const CONTROLS_CLASS: &str = "rti-audio-controls";

/// Id on the singleton style block.
pub const CONTROLS_STYLE_ID: &str = "rti-audio-controls-style";

pub const TOGGLE_BUTTON_ID: &str = "toggleAudio";
pub const VOLUME_SLIDER_ID: &str = "volumeSlider";

/// Volume applied to the audio element and the slider at injection time.
pub const DEFAULT_VOLUME: f64 = 0.7;

/// Icon shown on the mute toggle, one of three volume bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

impl VolumeIcon {
    /// Band for a slider value: exactly zero is muted, below 0.5 is low,
    /// everything else is high.
    pub fn for_volume(volume: f64) -> Self {
        if volume == 0.0 {
            VolumeIcon::Muted
        } else if volume < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }

    /// Icon after flipping the mute toggle, regardless of slider position.
    pub fn for_muted(muted: bool) -> Self {
        if muted {
            VolumeIcon::Muted
        } else {
            VolumeIcon::High
        }
    }

    pub fn html(&self) -> &'static str {
        match self {
            VolumeIcon::Muted => r#"<i class="fas fa-volume-mute"></i>"#,
            VolumeIcon::Low => r#"<i class="fas fa-volume-down"></i>"#,
            VolumeIcon::High => r#"<i class="fas fa-volume-up"></i>"#,
        }
    }
}

/// Inner markup of the widget container.
pub const CONTROLS_MARKUP: &str = r#"
<button id="toggleAudio" class="rti-audio-toggle">
    <i class="fas fa-volume-up"></i>
</button>
<div class="rti-volume-slider-container">
    <input type="range" id="volumeSlider" min="0" max="1" step="0.1" value="0.7" class="rti-volume-slider">
</div>
"#;

/// Style rules for the widget, inserted into `<head>` exactly once.
pub const CONTROLS_STYLE: &str = r#"
.rti-audio-controls {
    position: absolute;
    bottom: 15px;
    right: 15px;
    display: flex;
    align-items: center;
    background-color: rgba(0, 0, 0, 0.6);
    padding: 8px 12px;
    border-radius: 30px;
    z-index: 10;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.3);
    transition: all 0.3s ease;
    pointer-events: auto;
}

.rti-audio-controls:hover {
    background-color: rgba(0, 0, 0, 0.8);
}

.rti-audio-toggle {
    background: none;
    border: none;
    color: #07ff01;
    cursor: pointer;
    font-size: 18px;
    padding: 5px;
    transition: all 0.2s ease;
    outline: none;
}

.rti-audio-toggle:hover {
    transform: scale(1.1);
    color: #00ff00;
}

.rti-volume-slider-container {
    position: relative;
    margin-left: 10px;
    width: 80px;
}

.rti-volume-slider {
    -webkit-appearance: none;
    width: 100%;
    height: 4px;
    border-radius: 2px;
    background: #444;
    outline: none;
    cursor: pointer;
}

.rti-volume-slider::-webkit-slider-thumb {
    -webkit-appearance: none;
    appearance: none;
    width: 14px;
    height: 14px;
    border-radius: 50%;
    background: #07ff01;
    cursor: pointer;
    transition: all 0.2s ease;
}

.rti-volume-slider::-webkit-slider-thumb:hover {
    background: #00ff00;
    transform: scale(1.2);
}

.rti-volume-slider::-moz-range-thumb {
    width: 14px;
    height: 14px;
    border-radius: 50%;
    background: #07ff01;
    cursor: pointer;
    border: none;
    transition: all 0.2s ease;
}

.rti-volume-slider::-moz-range-thumb:hover {
    background: #00ff00;
    transform: scale(1.2);
}
"#;

/// What the injector should append, decided from what the page already has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectionPlan {
    pub append_widget: bool,
    pub append_style: bool,
}

/// An existing widget means a prior injection completed; nothing is added.
/// Otherwise the widget is appended, and the style block too unless a
/// previous page lifetime already left one behind.
pub fn injection_plan(widget_exists: bool, style_exists: bool) -> InjectionPlan {
    if widget_exists {
        return InjectionPlan {
            append_widget: false,
            append_style: false,
        };
    }
    InjectionPlan {
        append_widget: true,
        append_style: !style_exists,
    }
}

/// Build the widget next to the video and wire its controls to the audio
/// element. Safe to call more than once: an existing widget short-circuits.
#[cfg(target_arch = "wasm32")]
pub fn inject_volume_controls(
    video: &HtmlVideoElement,
    audio: &HtmlAudioElement,
) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document available")?;

    let plan = injection_plan(
        document
            .query_selector(&format!(".{CONTROLS_CLASS}"))
            .map_err(|err| format!("widget guard query failed: {err:?}"))?
            .is_some(),
        document.get_element_by_id(CONTROLS_STYLE_ID).is_some(),
    );
    if !plan.append_widget {
        return Ok(());
    }

    let container = video
        .parent_element()
        .ok_or("video element has no parent container")?;

    let controls = document
        .create_element("div")
        .map_err(|err| format!("failed to create widget container: {err:?}"))?;
    controls.set_class_name(CONTROLS_CLASS);
    controls.set_inner_html(CONTROLS_MARKUP);
    container
        .append_child(&controls)
        .map_err(|err| format!("failed to append widget: {err:?}"))?;

    if plan.append_style {
        let style = document
            .create_element("style")
            .map_err(|err| format!("failed to create style block: {err:?}"))?;
        style.set_id(CONTROLS_STYLE_ID);
        style.set_text_content(Some(CONTROLS_STYLE));
        document
            .head()
            .ok_or("document has no head")?
            .append_child(&style)
            .map_err(|err| format!("failed to append style block: {err:?}"))?;
    }

    let toggle = document
        .get_element_by_id(TOGGLE_BUTTON_ID)
        .ok_or("mute toggle missing from widget markup")?;
    let slider = document
        .get_element_by_id(VOLUME_SLIDER_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .ok_or("volume slider missing from widget markup")?;

    audio.set_volume(DEFAULT_VOLUME);
    slider.set_value("0.7");

    // Widget clicks must never reach the video or page handlers underneath.
    let swallow = Closure::wrap(Box::new(move |event: Event| {
        event.stop_propagation();
    }) as Box<dyn FnMut(Event)>);
    controls
        .add_event_listener_with_callback("click", swallow.as_ref().unchecked_ref())
        .map_err(|err| format!("failed to wire widget container: {err:?}"))?;
    swallow.forget();

    wire_mute_toggle(&toggle, audio)?;
    wire_volume_slider(&slider, &toggle, audio)?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn wire_mute_toggle(toggle: &Element, audio: &HtmlAudioElement) -> Result<(), String> {
    let audio = audio.clone();
    let button = toggle.clone();
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        event.stop_propagation();
        let now_muted = !audio.muted();
        audio.set_muted(now_muted);
        button.set_inner_html(VolumeIcon::for_muted(now_muted).html());
    }) as Box<dyn FnMut(Event)>);
    toggle
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|err| format!("failed to wire mute toggle: {err:?}"))?;
    on_click.forget();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn wire_volume_slider(
    slider: &HtmlInputElement,
    toggle: &Element,
    audio: &HtmlAudioElement,
) -> Result<(), String> {
    let audio = audio.clone();
    let input = slider.clone();
    let button = toggle.clone();
    let on_input = Closure::wrap(Box::new(move |event: Event| {
        event.stop_propagation();
        let Ok(volume) = input.value().parse::<f64>() else {
            return;
        };
        audio.set_volume(volume);
        button.set_inner_html(VolumeIcon::for_volume(volume).html());
    }) as Box<dyn FnMut(Event)>);
    slider
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
        .map_err(|err| format!("failed to wire volume slider: {err:?}"))?;
    on_input.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_volume_shows_muted_icon() {
        assert_eq!(VolumeIcon::for_volume(0.0), VolumeIcon::Muted);
    }

    #[test]
    fn low_volume_shows_low_icon() {
        assert_eq!(VolumeIcon::for_volume(0.3), VolumeIcon::Low);
        assert_eq!(VolumeIcon::for_volume(0.1), VolumeIcon::Low);
    }

    #[test]
    fn high_volume_shows_high_icon() {
        assert_eq!(VolumeIcon::for_volume(0.8), VolumeIcon::High);
        // the 0.5 boundary belongs to the high band
        assert_eq!(VolumeIcon::for_volume(0.5), VolumeIcon::High);
    }

    #[test]
    fn mute_toggle_alternates_icons_from_unmuted() {
        let mut muted = false;
        let mut seen = Vec::new();
        for _ in 0..4 {
            muted = !muted;
            seen.push(VolumeIcon::for_muted(muted));
        }
        assert_eq!(
            seen,
            vec![
                VolumeIcon::Muted,
                VolumeIcon::High,
                VolumeIcon::Muted,
                VolumeIcon::High,
            ]
        );
    }

    #[test]
    fn repeated_injection_keeps_one_widget_and_one_style_block() {
        let mut widgets = 0;
        let mut style_blocks = 0;
        for _ in 0..2 {
            let plan = injection_plan(widgets > 0, style_blocks > 0);
            if plan.append_widget {
                widgets += 1;
            }
            if plan.append_style {
                style_blocks += 1;
            }
        }
        assert_eq!(widgets, 1);
        assert_eq!(style_blocks, 1);
    }

    #[test]
    fn existing_widget_suppresses_both_appends() {
        let plan = injection_plan(true, true);
        assert_eq!(
            plan,
            InjectionPlan {
                append_widget: false,
                append_style: false,
            }
        );
    }

    #[test]
    fn leftover_style_block_is_not_duplicated() {
        let plan = injection_plan(false, true);
        assert_eq!(
            plan,
            InjectionPlan {
                append_widget: true,
                append_style: false,
            }
        );
    }

    #[test]
    fn markup_carries_the_wired_control_ids() {
        assert!(CONTROLS_MARKUP.contains(&format!("id=\"{TOGGLE_BUTTON_ID}\"")));
        assert!(CONTROLS_MARKUP.contains(&format!("id=\"{VOLUME_SLIDER_ID}\"")));
        assert!(CONTROLS_MARKUP.contains("value=\"0.7\""));
    }

    #[test]
    fn style_rules_target_the_widget_class() {
        assert!(CONTROLS_STYLE.contains(&format!(".{CONTROLS_CLASS}")));
        assert!(CONTROLS_STYLE.contains(".rti-volume-slider"));
    }
}
