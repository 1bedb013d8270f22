//! Horizontal scroll state for one content row.
//!
//! The row is a strip of equally wide cards translated left by `offset`
//! pixels inside a fixed-width viewport. All mutations keep the offset in
//! `[0, max_offset]`.

/// Tunables shared by every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    /// Cards moved per arrow click.
    pub step_items: u32,
    /// Distance from a viewport edge that triggers a hover nudge.
    pub hover_margin: f32,
    /// Card width assumed when a row has no cards to measure.
    pub default_item_width: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            step_items: 4,
            hover_margin: 60.0,
            default_item_width: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRow {
    item_count: usize,
    item_width: f32,
    viewport_width: f32,
    offset: f32,
    max_offset: f32,
    settings: ScrollSettings,
    /// Card currently under the pointer, so a dwell nudges only once.
    hovered: Option<usize>,
}

impl ScrollRow {
    pub fn new(
        item_count: usize,
        item_width: Option<f32>,
        viewport_width: f32,
        settings: ScrollSettings,
    ) -> Self {
        let item_width = item_width
            .filter(|w| valid_width(*w) && *w > 0.0)
            .unwrap_or(settings.default_item_width);
        let mut row = Self {
            item_count,
            item_width,
            viewport_width: if valid_width(viewport_width) {
                viewport_width
            } else {
                0.0
            },
            offset: 0.0,
            max_offset: 0.0,
            settings,
            hovered: None,
        };
        row.max_offset = row.compute_max();
        row
    }

    fn compute_max(&self) -> f32 {
        self.item_count as f32 * self.item_width - self.viewport_width
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Upper offset bound. Negative when every card fits.
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    pub fn prev_visible(&self) -> bool {
        self.offset > 0.0
    }

    pub fn next_visible(&self) -> bool {
        !(self.offset >= self.max_offset || self.max_offset <= 0.0)
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.min(self.max_offset).max(0.0)
    }

    fn step(&self) -> f32 {
        self.item_width * self.settings.step_items as f32
    }

    pub fn click_next(&mut self) {
        self.offset = self.clamp(self.offset + self.step());
    }

    pub fn click_prev(&mut self) {
        self.offset = self.clamp(self.offset - self.step());
    }

    /// Pointer entered card `index`. Nudges one card width when the card
    /// sits within the hover margin of either viewport edge. Returns whether
    /// the offset moved.
    pub fn card_entered(&mut self, index: usize) -> bool {
        if index >= self.item_count || self.hovered == Some(index) {
            return false;
        }
        self.hovered = Some(index);

        let left = index as f32 * self.item_width - self.offset;
        let right = left + self.item_width;
        let margin = self.settings.hover_margin;
        let before = self.offset;

        if right > self.viewport_width - margin && self.offset < self.max_offset {
            self.offset = self.clamp(self.offset + self.item_width);
        } else if left < margin && self.offset > 0.0 {
            self.offset = self.clamp(self.offset - self.item_width);
        }
        self.offset != before
    }

    pub fn card_left(&mut self, index: usize) {
        if self.hovered == Some(index) {
            self.hovered = None;
        }
    }

    /// Viewport resized: recompute the bound and pull the offset back into it.
    /// Widths that are negative or not finite are ignored.
    pub fn resize(&mut self, viewport_width: f32) {
        if !valid_width(viewport_width) {
            tracing::debug!(viewport_width, "ignoring invalid viewport width");
            return;
        }
        self.viewport_width = viewport_width;
        self.max_offset = self.compute_max();
        self.offset = self.clamp(self.offset);
    }

    /// CSS-style horizontal translation for the card strip.
    pub fn translate_x(&self) -> f32 {
        -self.offset
    }
}

fn valid_width(width: f32) -> bool {
    width.is_finite() && width >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20 cards of 200px in a 1000px viewport: max offset 3000.
    fn row() -> ScrollRow {
        ScrollRow::new(20, Some(200.0), 1000.0, ScrollSettings::default())
    }

    fn assert_invariants(row: &ScrollRow) {
        assert!(row.offset() >= 0.0);
        assert!(row.offset() <= row.max_offset().max(0.0));
        assert_eq!(row.prev_visible(), row.offset() > 0.0);
    }

    #[test]
    fn test_initial_arrows() {
        let row = row();
        assert!(!row.prev_visible());
        assert!(row.next_visible());
        assert_eq!(row.max_offset(), 3000.0);
    }

    #[test]
    fn test_arrow_clicks_clamp() {
        let mut row = row();
        row.click_next();
        assert_eq!(row.offset(), 800.0);
        for _ in 0..10 {
            row.click_next();
        }
        assert_eq!(row.offset(), 3000.0);
        assert!(!row.next_visible());
        assert!(row.prev_visible());
        assert_eq!(row.translate_x(), -3000.0);

        for _ in 0..10 {
            row.click_prev();
        }
        assert_eq!(row.offset(), 0.0);
        assert!(!row.prev_visible());
    }

    #[test]
    fn test_short_row_has_no_arrows() {
        let mut row = ScrollRow::new(3, Some(200.0), 1000.0, ScrollSettings::default());
        assert!(row.max_offset() < 0.0);
        row.click_next();
        row.card_entered(2);
        assert_eq!(row.offset(), 0.0);
        assert!(!row.next_visible());
        assert!(!row.prev_visible());
    }

    #[test]
    fn test_empty_row_uses_default_width() {
        let row = ScrollRow::new(0, None, 1000.0, ScrollSettings::default());
        assert_eq!(row.item_width(), 200.0);
        assert!(!row.next_visible());
    }

    #[test]
    fn test_hover_near_right_edge_nudges_once_per_entry() {
        let mut row = row();
        // Card 4 spans 800..1000, inside the right margin.
        assert!(row.card_entered(4));
        assert_eq!(row.offset(), 200.0);
        // Dwelling on the same card does not nudge again.
        assert!(!row.card_entered(4));
        assert_eq!(row.offset(), 200.0);

        row.card_left(4);
        // Card 4 now spans 600..800: outside both margins.
        assert!(!row.card_entered(4));
        row.card_left(4);
        assert!(row.card_entered(5));
        assert_eq!(row.offset(), 400.0);
    }

    #[test]
    fn test_hover_near_left_edge_nudges_back() {
        let mut row = row();
        row.click_next();
        // Card 4 spans 0..200 after an 800px offset.
        assert!(row.card_entered(4));
        assert_eq!(row.offset(), 600.0);
    }

    #[test]
    fn test_hover_in_middle_is_ignored() {
        let mut row = row();
        assert!(!row.card_entered(2));
        assert_eq!(row.offset(), 0.0);
    }

    #[test]
    fn test_resize_clamps_offset() {
        let mut row = row();
        for _ in 0..4 {
            row.click_next();
        }
        assert_eq!(row.offset(), 3000.0);

        row.resize(1600.0);
        assert_eq!(row.max_offset(), 2400.0);
        assert_eq!(row.offset(), 2400.0);
        assert!(!row.next_visible());

        row.resize(5000.0);
        assert_eq!(row.offset(), 0.0);
        assert!(!row.next_visible());
        assert!(!row.prev_visible());

        row.resize(800.0);
        assert_eq!(row.offset(), 0.0);
        assert!(row.next_visible());
    }

    #[test]
    fn test_offset_stays_in_bounds_under_mixed_events() {
        let mut row = row();
        let widths = [1000.0, f32::NAN, 700.0, 4500.0, -50.0, 320.0, f32::INFINITY, 1200.0];
        for step in 0..200usize {
            match step % 7 {
                0 | 3 => row.click_next(),
                1 => row.click_prev(),
                2 => {
                    row.card_entered(step % 20);
                }
                4 => row.card_left(step % 20),
                5 => row.resize(widths[step % widths.len()]),
                _ => {
                    row.card_entered((step * 7) % 20);
                }
            }
            assert_invariants(&row);
        }
    }

    #[test]
    fn test_invalid_resize_is_ignored() {
        let mut row = row();
        for width in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -1.0] {
            row.resize(width);
            assert_eq!(row.max_offset(), 3000.0);
        }
        for _ in 0..50 {
            row.click_next();
            assert_invariants(&row);
        }
        assert_eq!(row.offset(), 3000.0);
        assert!(!row.next_visible());

        let nan_row = ScrollRow::new(20, Some(f32::NAN), f32::NAN, ScrollSettings::default());
        assert_eq!(nan_row.item_width(), 200.0);
        assert_eq!(nan_row.max_offset(), 4000.0);
    }
}
