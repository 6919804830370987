/// Durations, in milliseconds, for every deferred step the controllers
/// schedule. Stylesheet transitions are expected to match these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub hero_swap_delay_ms: u32,
    pub hero_fade_in_ms: u32,
    pub lightbox_open_ms: u32,
    pub lightbox_close_ms: u32,
    pub modal_close_fallback_ms: u32,
    /// Zero disables the animated hover-leave fade.
    pub hover_fade_fallback_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            hero_swap_delay_ms: 100,
            hero_fade_in_ms: 700,
            lightbox_open_ms: 500,
            lightbox_close_ms: 400,
            modal_close_fallback_ms: 800,
            hover_fade_fallback_ms: 600,
        }
    }
}
