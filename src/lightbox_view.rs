use gloo::events::EventListener;
use tracing::{debug, warn};
use web_sys::{Document, EventTarget, HtmlElement, HtmlImageElement, HtmlVideoElement};

use vitrine_core::lightbox::FrameFit;
use vitrine_core::{LightboxFrame, LightboxSurface, MediaKind, PlaybackError, Size};

use crate::dom;
use crate::playback;
use crate::runtime;

const VISIBLE_CLASS: &str = "is-visible";
const CLOSING_CLASS: &str = "is-closing";

pub(crate) struct LightboxView {
    overlay: HtmlElement,
    image: HtmlImageElement,
    video: HtmlVideoElement,
    _listeners: Vec<EventListener>,
}

impl LightboxView {
    pub(crate) fn new(document: &Document) -> Self {
        let overlay: HtmlElement = dom::required(document, "lightbox");
        let image: HtmlImageElement = dom::required(document, "lightbox-image");
        let video: HtmlVideoElement = dom::required(document, "lightbox-video");
        video.set_loop(true);
        let _ = video.set_attribute("playsinline", "");

        let mut listeners = Vec::new();
        let scrim = overlay.clone();
        listeners.push(EventListener::new(&overlay, "click", move |event| {
            if dom::targets(event, &scrim) {
                runtime::drive(|machine, host| {
                    machine.close_lightbox(host);
                });
            }
        }));
        if let Some(close) = overlay.query_selector(".lightbox-close").ok().flatten() {
            listeners.push(EventListener::new(&close, "click", |_| {
                runtime::drive(|machine, host| {
                    machine.close_lightbox(host);
                });
            }));
        }
        let readiness: [(&EventTarget, &'static str); 4] = [
            (&image, "load"),
            (&image, "error"),
            (&video, "loadedmetadata"),
            (&video, "error"),
        ];
        for (target, event) in readiness {
            listeners.push(EventListener::new(target, event, |_| {
                runtime::drive(|machine, host| machine.on_lightbox_media_ready(host));
            }));
        }

        let view = Self {
            overlay,
            image,
            video,
            _listeners: listeners,
        };
        view.hide_both();
        view
    }

    fn element(&self, kind: MediaKind) -> &HtmlElement {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
        }
    }

    fn hide_both(&self) {
        dom::set_displayed(&self.image, false);
        dom::set_displayed(&self.video, false);
    }
}

fn frame_style(frame: &LightboxFrame) -> String {
    match *frame {
        LightboxFrame::Anchored {
            center_x,
            center_y,
            width,
            height,
            opacity,
            fit,
            transition_ms,
        } => {
            let fit = match fit {
                FrameFit::Cover => "cover",
                FrameFit::Contain => "contain",
            };
            format!(
                "position: fixed; left: {}; top: {}; width: {}; height: {}; opacity: {}; \
                 object-fit: {fit}; transform: none; transition: {};",
                dom::fmt_px(center_x - width / 2.0),
                dom::fmt_px(center_y - height / 2.0),
                dom::fmt_px(width),
                dom::fmt_px(height),
                opacity,
                transition(transition_ms),
            )
        }
        LightboxFrame::Centered {
            width,
            height,
            opacity,
            scale,
            transition_ms,
        } => format!(
            "position: fixed; left: 50%; top: 50%; width: {}; height: {}; opacity: {}; \
             object-fit: contain; transform: translate(-50%, -50%) scale({scale}); transition: {};",
            dom::fmt_px(width),
            dom::fmt_px(height),
            opacity,
            transition(transition_ms),
        ),
    }
}

fn transition(ms: u32) -> String {
    if ms == 0 {
        "none".to_string()
    } else {
        format!(
            "left {ms}ms ease, top {ms}ms ease, width {ms}ms ease, height {ms}ms ease, \
             opacity {ms}ms ease, transform {ms}ms ease"
        )
    }
}

impl LightboxSurface for LightboxView {
    fn show_overlay(&mut self) {
        dom::set_class(&self.overlay, VISIBLE_CLASS, true);
    }

    fn hide_overlay(&mut self) {
        dom::set_class(&self.overlay, VISIBLE_CLASS, false);
    }

    fn set_closing(&mut self, closing: bool) {
        dom::set_class(&self.overlay, CLOSING_CLASS, closing);
    }

    fn show_media(&mut self, kind: MediaKind, src: &str) {
        match kind {
            MediaKind::Image => {
                dom::set_displayed(&self.video, false);
                self.image.set_src(src);
            }
            MediaKind::Video => {
                dom::set_displayed(&self.image, false);
                self.video.set_src(src);
                self.video.load();
            }
        }
        dom::set_displayed(self.element(kind), true);
    }

    fn hide_media(&mut self) {
        self.hide_both();
    }

    fn clear_source(&mut self) {
        let _ = self.image.remove_attribute("src");
        let _ = self.video.pause();
        let _ = self.video.remove_attribute("src");
        self.video.load();
    }

    fn intrinsic_size(&self, kind: MediaKind) -> Option<Size> {
        let (width, height) = match kind {
            MediaKind::Image if self.image.complete() => {
                (self.image.natural_width(), self.image.natural_height())
            }
            // HAVE_METADATA
            MediaKind::Video if self.video.ready_state() >= 1 => {
                (self.video.video_width(), self.video.video_height())
            }
            _ => return None,
        };
        if width == 0 || height == 0 {
            None
        } else {
            Some(Size::new(f64::from(width), f64::from(height)))
        }
    }

    fn viewport(&self) -> Size {
        dom::viewport()
    }

    fn apply_frame(&mut self, kind: MediaKind, frame: &LightboxFrame) {
        let _ = self.element(kind).set_attribute("style", &frame_style(frame));
    }

    fn clear_frame(&mut self) {
        let _ = self.image.remove_attribute("style");
        let _ = self.video.remove_attribute("style");
        self.hide_both();
    }

    fn play_video(&mut self) {
        playback::play(&self.video, |result| match result {
            Ok(()) => {}
            Err(PlaybackError::Aborted) => debug!("lightbox playback interrupted"),
            Err(err) => warn!(%err, "lightbox playback rejected"),
        });
    }

    fn pause_video(&mut self) {
        let _ = self.video.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_frame_positions_from_the_centre() {
        let style = frame_style(&LightboxFrame::Anchored {
            center_x: 200.0,
            center_y: 100.0,
            width: 80.0,
            height: 40.0,
            opacity: 1.0,
            fit: FrameFit::Cover,
            transition_ms: 0,
        });
        assert!(style.contains("left: 160.00px"));
        assert!(style.contains("top: 80.00px"));
        assert!(style.contains("object-fit: cover"));
        assert!(style.contains("transition: none"));
    }

    #[test]
    fn centered_frame_scales_about_the_middle() {
        let style = frame_style(&LightboxFrame::Centered {
            width: 900.0,
            height: 500.0,
            opacity: 0.0,
            scale: 0.9,
            transition_ms: 400,
        });
        assert!(style.contains("scale(0.9)"));
        assert!(style.contains("opacity 400ms ease"));
        assert!(style.contains("width: 900.00px"));
    }
}
