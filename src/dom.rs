use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use vitrine_core::{Rect, Size};

pub(crate) fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("document available")
}

/// Looks up a page element the shell cannot run without.
pub(crate) fn required<T: JsCast>(document: &Document, id: &str) -> T {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .unwrap_or_else(|| panic!("#{id} exists with the expected element type"))
}

pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Element {
    let element = document
        .create_element(tag)
        .unwrap_or_else(|_| panic!("create {tag}"));
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element
}

pub(crate) fn create_as<T: JsCast>(document: &Document, tag: &str, class: &str) -> T {
    create(document, tag, class)
        .dyn_into::<T>()
        .unwrap_or_else(|_| panic!("{tag} element type"))
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub(crate) fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub(crate) fn set_displayed(element: &HtmlElement, displayed: bool) {
    if displayed {
        let _ = element.style().remove_property("display");
    } else {
        set_style(element, "display", "none");
    }
}

pub(crate) fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub(crate) fn viewport() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::new(0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Size::new(width, height)
}

/// Whether the element's computed style runs any transition at all.
pub(crate) fn has_transition(element: &Element) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return false;
    };
    let durations = style
        .get_property_value("transition-duration")
        .unwrap_or_default();
    durations
        .split(',')
        .filter_map(|value| value.trim().strip_suffix('s'))
        .any(|value| {
            let seconds = match value.strip_suffix('m') {
                Some(millis) => millis.parse::<f64>().map(|ms| ms / 1000.0),
                None => value.parse::<f64>(),
            };
            seconds.map(|seconds| seconds > 0.0).unwrap_or(false)
        })
}

/// True when the event was dispatched on `element` itself rather than
/// bubbling up from a descendant.
pub(crate) fn targets(event: &web_sys::Event, element: &Element) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|target| &target == element)
        .unwrap_or(false)
}

/// A `transitionend` for `property` fired by `element` itself.
pub(crate) fn transition_ended(event: &web_sys::Event, element: &Element, property: &str) -> bool {
    targets(event, element)
        && event
            .dyn_ref::<web_sys::TransitionEvent>()
            .map(|event| event.property_name() == property)
            .unwrap_or(false)
}

pub(crate) fn fmt_px(value: f64) -> String {
    format!("{:.2}px", value)
}
