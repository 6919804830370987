use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlMediaElement;

use vitrine_core::PlaybackError;

/// Reads the DOMException name off a rejected `play()` promise.
pub(crate) fn classify(err: &JsValue) -> PlaybackError {
    let field = |key: &str| {
        Reflect::get(err, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    };
    PlaybackError::from_exception_name(&field("name"), &field("message"))
}

/// Calls `play()` and reports the promise outcome once it settles.
pub(crate) fn play(
    media: &HtmlMediaElement,
    on_result: impl FnOnce(Result<(), PlaybackError>) + 'static,
) {
    match media.play() {
        Ok(promise) => spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| classify(&err));
            on_result(result);
        }),
        Err(err) => on_result(Err(classify(&err))),
    }
}
