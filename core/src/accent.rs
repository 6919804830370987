/// Milliseconds for one full trip around the hue wheel.
pub const HUE_CYCLE_MS: f64 = 60_000.0;

/// Hue-cycling source for the shared accent colour. Holds no time of its
/// own: callers pass the animation-frame timestamp in.
#[derive(Clone, Copy, Debug)]
pub struct AccentCycle {
    initial_hue: f64,
    started_at: Option<f64>,
}

impl AccentCycle {
    pub fn new(initial_hue: f64) -> Self {
        Self {
            initial_hue: initial_hue.rem_euclid(360.0),
            started_at: None,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
    }

    pub fn hue_at(&self, now_ms: f64) -> f64 {
        match self.started_at {
            None => self.initial_hue,
            Some(start) => {
                let elapsed = (now_ms - start).max(0.0);
                (self.initial_hue + elapsed / HUE_CYCLE_MS * 360.0).rem_euclid(360.0)
            }
        }
    }

    pub fn color_at(&self, now_ms: f64) -> String {
        color_from_hue(self.hue_at(now_ms))
    }
}

/// Fully saturated, full-value colour for `hue` degrees as `#rrggbb`.
pub fn color_from_hue(hue: f64) -> String {
    let hue = hue.rem_euclid(360.0);
    let chroma = 1.0;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let (r, g, b) = match hue {
        h if h < 60.0 => (chroma, x, 0.0),
        h if h < 120.0 => (x, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, x),
        h if h < 240.0 => (0.0, x, chroma),
        h if h < 300.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let channel = |value: f64| (value * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}
