use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlVideoElement};

use vitrine_core::content::VideoTile;
use vitrine_core::{InlineSurface, MediaEvent, MediaState, ShellId, ShellVisuals};

use crate::dom;
use crate::playback;
use crate::runtime;

const MEDIA_EVENTS: [(&str, MediaEvent); 6] = [
    ("play", MediaEvent::Play),
    ("pause", MediaEvent::Pause),
    ("ended", MediaEvent::Ended),
    ("timeupdate", MediaEvent::TimeUpdate),
    ("loadedmetadata", MediaEvent::LoadedMetadata),
    ("volumechange", MediaEvent::VolumeChange),
];

/// Shells currently mounted in the modal, shared between the modal view
/// that builds them and the inline surface that drives them.
pub(crate) type Shells = Rc<RefCell<BTreeMap<ShellId, VideoShell>>>;

pub(crate) struct VideoShell {
    root: Element,
    video: HtmlVideoElement,
    overlay: HtmlElement,
    controls: HtmlElement,
    play_button: Element,
    seek: HtmlInputElement,
    mute_button: Element,
    _listeners: Vec<EventListener>,
}

impl VideoShell {
    pub(crate) fn build(document: &Document, id: ShellId, tile: &VideoTile) -> Self {
        let root = dom::create(document, "div", "video-shell");
        let video: HtmlVideoElement = dom::create_as(document, "video", "video-shell-media");
        video.set_muted(true);
        video.set_preload("metadata");
        video.set_poster(&tile.poster);
        video.set_src(&tile.src);
        let _ = video.set_attribute("playsinline", "");

        let overlay: HtmlElement = dom::create_as(document, "button", "video-play-overlay");
        let _ = overlay.set_attribute("type", "button");
        let _ = overlay.set_attribute("aria-label", "Play");

        let controls: HtmlElement = dom::create_as(document, "div", "video-controls");
        let play_button = dom::create(document, "button", "video-toggle");
        let _ = play_button.set_attribute("type", "button");
        let seek: HtmlInputElement = dom::create_as(document, "input", "video-seek");
        seek.set_type("range");
        seek.set_min("0");
        seek.set_max("100");
        seek.set_step("0.1");
        seek.set_value("0");
        let mute_button = dom::create(document, "button", "video-mute");
        let _ = mute_button.set_attribute("type", "button");
        let _ = controls.append_child(&play_button);
        let _ = controls.append_child(&seek);
        let _ = controls.append_child(&mute_button);

        let _ = root.append_child(&video);
        let _ = root.append_child(&overlay);
        let _ = root.append_child(&controls);

        let mut listeners = Vec::new();
        for (name, event) in MEDIA_EVENTS {
            listeners.push(EventListener::new(&video, name, move |_| {
                runtime::drive(move |machine, host| machine.on_inline_media_event(id, event, host));
            }));
        }
        // Paused shells open in the lightbox, growing out of the whole shell.
        for target in [video.unchecked_ref::<Element>(), overlay.unchecked_ref::<Element>()] {
            let shell_root = root.clone();
            listeners.push(EventListener::new(target, "click", move |event| {
                event.stop_propagation();
                let origin = Some(dom::client_rect(&shell_root));
                runtime::drive(move |machine, host| {
                    machine.click_inline(id, origin, host);
                });
            }));
        }
        listeners.push(EventListener::new(&play_button, "click", move |event| {
            event.stop_propagation();
            runtime::drive(move |machine, host| machine.toggle_inline(id, host));
        }));
        listeners.push(EventListener::new(&mute_button, "click", move |event| {
            event.stop_propagation();
            runtime::drive(move |machine, host| machine.toggle_inline_mute(id, host));
        }));
        listeners.push(EventListener::new(&seek, "input", move |event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let percent = input.value_as_number();
            runtime::drive(move |machine, host| machine.seek_inline(id, percent, host));
        }));

        Self {
            root,
            video,
            overlay,
            controls,
            play_button,
            seek,
            mute_button,
            _listeners: listeners,
        }
    }

    pub(crate) fn root(&self) -> &Element {
        &self.root
    }

    fn state(&self) -> MediaState {
        MediaState {
            paused: self.video.paused(),
            muted: self.video.muted(),
            current_time: self.video.current_time(),
            duration: self.video.duration(),
        }
    }

    fn render(&self, visuals: &ShellVisuals) {
        dom::set_class(&self.root, "is-playing", visuals.playing);
        dom::set_displayed(&self.overlay, visuals.show_play_overlay);
        dom::set_displayed(&self.controls, visuals.show_controls);
        dom::set_text(&self.play_button, visuals.play_label);
        let _ = self.play_button.set_attribute("aria-label", visuals.play_label);
        dom::set_text(&self.mute_button, visuals.mute_label);
        let _ = self.mute_button.set_attribute("aria-label", visuals.mute_label);
        self.seek.set_value(&format!("{:.1}", visuals.seek_percent));
    }
}

/// Inline video shells as seen by the media controller.
pub(crate) struct InlineView {
    shells: Shells,
}

impl InlineView {
    pub(crate) fn new(shells: Shells) -> Self {
        Self { shells }
    }

    fn with_shell<R>(&self, shell: ShellId, action: impl FnOnce(&VideoShell) -> R) -> Option<R> {
        self.shells.borrow().get(&shell).map(action)
    }
}

impl InlineSurface for InlineView {
    fn play(&mut self, shell: ShellId, attempt: u64) {
        self.with_shell(shell, |view| {
            playback::play(&view.video, move |result| {
                runtime::drive(move |machine, host| {
                    machine.on_inline_play_result(shell, attempt, result, host)
                });
            });
        });
    }

    fn pause(&mut self, shell: ShellId) {
        self.with_shell(shell, |view| {
            let _ = view.video.pause();
        });
    }

    fn pause_and_rewind(&mut self, shell: ShellId) {
        self.with_shell(shell, |view| {
            let _ = view.video.pause();
            view.video.set_current_time(0.0);
        });
    }

    fn set_current_time(&mut self, shell: ShellId, seconds: f64) {
        self.with_shell(shell, |view| view.video.set_current_time(seconds));
    }

    fn set_muted(&mut self, shell: ShellId, muted: bool) {
        self.with_shell(shell, |view| view.video.set_muted(muted));
    }

    fn media_state(&self, shell: ShellId) -> Option<MediaState> {
        self.with_shell(shell, VideoShell::state)
    }

    fn source(&self, shell: ShellId) -> Option<String> {
        self.with_shell(shell, |view| view.video.src())
    }

    fn render_shell(&mut self, shell: ShellId, visuals: &ShellVisuals) {
        self.with_shell(shell, |view| view.render(visuals));
    }
}
