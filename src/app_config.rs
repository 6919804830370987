use std::cell::RefCell;

use web_sys::UrlSearchParams;

use vitrine_core::DEFAULT_ASSET_BASE;

const DEFAULT_FEED_URL: &str = "projects.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AppConfig {
    pub(crate) feed_url: String,
    pub(crate) asset_base: String,
}

thread_local! {
    static CONFIG: RefCell<Option<AppConfig>> = RefCell::new(None);
}

pub(crate) fn config() -> AppConfig {
    CONFIG.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(load_config)
            .clone()
    })
}

fn load_config() -> AppConfig {
    let params = query_params();
    let feed_url = params
        .as_ref()
        .and_then(|params| query_value(params, "feed"))
        .unwrap_or_else(default_feed_url);
    let asset_base = params
        .as_ref()
        .and_then(|params| query_value(params, "assets"))
        .unwrap_or_else(default_asset_base);
    AppConfig {
        feed_url,
        asset_base,
    }
}

fn default_feed_url() -> String {
    build_time_value(
        option_env!("VITRINE_FEED_URL").or(option_env!("TRUNK_PUBLIC_VITRINE_FEED_URL")),
    )
    .unwrap_or_else(|| DEFAULT_FEED_URL.to_string())
}

fn default_asset_base() -> String {
    build_time_value(
        option_env!("VITRINE_ASSET_BASE").or(option_env!("TRUNK_PUBLIC_VITRINE_ASSET_BASE")),
    )
    .unwrap_or_else(|| DEFAULT_ASSET_BASE.to_string())
}

fn build_time_value(raw: Option<&'static str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn query_params() -> Option<UrlSearchParams> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()
}

fn query_value(params: &UrlSearchParams, key: &str) -> Option<String> {
    let value = params.get(key)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
