#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod accent;
mod app_config;
mod boot;
mod dom;
mod feed;
mod hero_view;
mod lightbox_view;
mod modal_view;
mod navigation;
mod page;
mod playback;
mod runtime;
mod scheduler;
mod video_shell;

fn main() {
    console_error_panic_hook::set_once();
    boot::start();
}
