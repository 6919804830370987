pub const COMPACT_BREAKPOINT_PX: u32 = 768;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridMode {
    Wide,
    Compact,
}

impl GridMode {
    pub fn for_viewport_width(width: f64) -> Self {
        if width <= COMPACT_BREAKPOINT_PX as f64 {
            GridMode::Compact
        } else {
            GridMode::Wide
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    spans: &'static [(usize, u32)],
}

impl GridLayout {
    const fn new(columns: u32, spans: &'static [(usize, u32)]) -> Self {
        Self { columns, spans }
    }

    /// Column span for the tile at `index`, when it differs from one.
    pub fn span_for(&self, index: usize) -> Option<u32> {
        self.spans
            .iter()
            .find(|(at, _)| *at == index)
            .map(|(_, span)| *span)
    }
}

const SINGLE: GridLayout = GridLayout::new(1, &[]);

pub fn image_grid_layout(count: usize, mode: GridMode) -> GridLayout {
    match (mode, count) {
        (GridMode::Compact, 2) | (GridMode::Compact, 4) => GridLayout::new(2, &[]),
        (GridMode::Compact, 3) => GridLayout::new(2, &[(2, 2)]),
        (GridMode::Compact, 5) => GridLayout::new(2, &[(4, 2)]),
        (GridMode::Wide, 2) | (GridMode::Wide, 4) => GridLayout::new(2, &[]),
        (GridMode::Wide, 3) => GridLayout::new(3, &[]),
        (GridMode::Wide, 5) => GridLayout::new(6, &[(0, 2), (1, 2), (2, 2), (3, 3), (4, 3)]),
        _ => SINGLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_tiles_split_three_then_two_on_wide() {
        let layout = image_grid_layout(5, GridMode::Wide);
        assert_eq!(layout.columns, 6);
        let spans: Vec<_> = (0..5).map(|i| layout.span_for(i)).collect();
        assert_eq!(spans, vec![Some(2), Some(2), Some(2), Some(3), Some(3)]);
    }

    #[test]
    fn compact_odd_counts_stretch_the_last_tile() {
        let three = image_grid_layout(3, GridMode::Compact);
        assert_eq!(three.columns, 2);
        assert_eq!(three.span_for(2), Some(2));
        assert_eq!(three.span_for(0), None);
        assert_eq!(image_grid_layout(5, GridMode::Compact).span_for(4), Some(2));
    }

    #[test]
    fn other_counts_use_one_column() {
        assert_eq!(image_grid_layout(1, GridMode::Wide).columns, 1);
        assert_eq!(image_grid_layout(7, GridMode::Compact).columns, 1);
    }

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(GridMode::for_viewport_width(768.0), GridMode::Compact);
        assert_eq!(GridMode::for_viewport_width(769.0), GridMode::Wide);
    }
}
