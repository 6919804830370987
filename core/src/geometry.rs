pub const LIGHTBOX_VIEWPORT_RATIO: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn aspect(&self) -> Option<f64> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// Client-space box as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry snapshot of the element a lightbox was opened from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OriginRect {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for OriginRect {
    fn from(rect: Rect) -> Self {
        Self {
            center_x: rect.left + rect.width / 2.0,
            center_y: rect.top + rect.height / 2.0,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Largest box with the media's aspect ratio that fits in 90% of each
/// viewport axis. Media without usable dimensions gets the full 90% box.
pub fn fit_centered(viewport: Size, intrinsic: Size) -> Size {
    let max_width = viewport.width * LIGHTBOX_VIEWPORT_RATIO;
    let max_height = viewport.height * LIGHTBOX_VIEWPORT_RATIO;
    let Some(aspect) = intrinsic.aspect() else {
        return Size::new(max_width, max_height);
    };
    let mut width = max_width;
    let mut height = width / aspect;
    if height > max_height {
        height = max_height;
        width = height * aspect;
    }
    Size::new(width, height)
}
