use std::cell::RefCell;

use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use vitrine_core::AccentCycle;

use crate::dom;

const ACCENT_PROPERTY: &str = "--accent-color";

struct AccentLoop {
    cycle: AccentCycle,
    started: bool,
    root: HtmlElement,
    frame: Option<AnimationFrame>,
}

thread_local! {
    static ACCENT: RefCell<Option<AccentLoop>> = RefCell::new(None);
}

/// Publishes the hue-cycling accent colour on the document root every
/// animation frame, independent of any interaction state.
pub(crate) fn start(document: &Document) {
    let Some(root) = document
        .document_element()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let cycle = AccentCycle::new(js_sys::Math::random() * 360.0);
    dom::set_style(&root, ACCENT_PROPERTY, &cycle.color_at(0.0));
    ACCENT.with(|slot| {
        *slot.borrow_mut() = Some(AccentLoop {
            cycle,
            started: false,
            root,
            frame: None,
        });
    });
    request_frame();
}

fn request_frame() {
    let handle = request_animation_frame(tick);
    ACCENT.with(|slot| {
        if let Some(state) = slot.borrow_mut().as_mut() {
            state.frame = Some(handle);
        }
    });
}

fn tick(timestamp: f64) {
    let running = ACCENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(state) = slot.as_mut() else {
            return false;
        };
        state.frame.take();
        if !state.started {
            state.started = true;
            state.cycle.start(timestamp);
        }
        dom::set_style(&state.root, ACCENT_PROPERTY, &state.cycle.color_at(timestamp));
        true
    });
    if running {
        request_frame();
    }
}
