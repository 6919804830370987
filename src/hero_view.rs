use gloo::events::EventListener;
use web_sys::{Document, HtmlVideoElement};

use vitrine_core::HeroSurface;

use crate::dom;
use crate::playback;
use crate::runtime;

const FADE_IN_CLASS: &str = "is-fading-in";
const GESTURE_EVENTS: [&str; 3] = ["pointerdown", "touchstart", "click"];

/// The background video behind the navigation.
pub(crate) struct HeroView {
    video: HtmlVideoElement,
    document: Document,
    load_listeners: Vec<EventListener>,
    gesture_listeners: Vec<EventListener>,
}

impl HeroView {
    pub(crate) fn new(document: &Document) -> Self {
        let video: HtmlVideoElement = dom::required(document, "hero-video");
        video.set_muted(true);
        video.set_loop(true);
        let _ = video.set_attribute("playsinline", "");
        Self {
            video,
            document: document.clone(),
            load_listeners: Vec::new(),
            gesture_listeners: Vec::new(),
        }
    }
}

impl HeroSurface for HeroView {
    fn set_opacity(&mut self, opacity: f64) {
        dom::set_style(&self.video, "opacity", &opacity.to_string());
    }

    fn set_displayed(&mut self, displayed: bool) {
        dom::set_displayed(&self.video, displayed);
    }

    fn load_source(&mut self, src: &str, generation: u64) {
        self.load_listeners.clear();
        for event in ["loadeddata", "canplay"] {
            self.load_listeners
                .push(EventListener::new(&self.video, event, move |_| {
                    runtime::drive(move |machine, host| machine.on_hero_ready(generation, host));
                }));
        }
        self.load_listeners
            .push(EventListener::new(&self.video, "ended", move |_| {
                runtime::drive(move |machine, host| machine.on_hero_ended(generation, host));
            }));
        self.video.set_muted(true);
        self.video.set_loop(true);
        self.video.set_src(src);
        self.video.load();
    }

    fn has_current_data(&self) -> bool {
        // HAVE_CURRENT_DATA
        self.video.ready_state() >= 2
    }

    fn play(&mut self, generation: u64) {
        playback::play(&self.video, move |result| {
            runtime::drive(move |machine, host| {
                machine.on_hero_play_result(generation, result, host)
            });
        });
    }

    fn rewind(&mut self) {
        self.video.set_current_time(0.0);
    }

    fn pause_and_rewind(&mut self) {
        let _ = self.video.pause();
        self.video.set_current_time(0.0);
    }

    fn set_fade_in(&mut self, active: bool) {
        dom::set_class(&self.video, FADE_IN_CLASS, active);
    }

    fn arm_gesture_resume(&mut self) {
        self.gesture_listeners = GESTURE_EVENTS
            .iter()
            .map(|event| {
                EventListener::new(&self.document, *event, |_| {
                    runtime::drive(|machine, host| machine.on_hero_gesture(host));
                })
            })
            .collect();
    }

    fn disarm_gesture_resume(&mut self) {
        self.gesture_listeners.clear();
    }
}
