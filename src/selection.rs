//! Cursor and list viewport over the sorted catalog.
//!
//! `page_height` is the row index of the last visible list row relative to the viewport
//! offset, so the list shows `page_height + 1` rows.

use std::ops::Range;

/// How far above the selection the viewport is placed when a catalog change leaves the
/// selection below the visible window.
const RECENTER_MARGIN: usize = 10;

/// Position that can be restored when a move has to be rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    index: usize,
    offset: usize,
    count: usize,
    page_height: usize,
}

impl SelectionController {
    pub fn new(count: usize, page_height: usize) -> Self {
        Self {
            index: 0,
            offset: 0,
            count,
            page_height,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn snapshot(&self) -> Selection {
        Selection {
            index: self.index,
            offset: self.offset,
        }
    }

    pub fn restore(&mut self, selection: Selection) {
        self.index = selection.index;
        self.offset = selection.offset;
    }

    /// Move by `delta` rows, clamped to the catalog.
    pub fn move_relative(&mut self, delta: isize) {
        if self.count == 0 {
            return;
        }
        let last = self.count - 1;
        self.index = self.index.saturating_add_signed(delta).min(last);
        self.adjust_viewport();
    }

    /// Jump to `index`, clamped to the catalog.
    pub fn move_absolute(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        self.index = index.min(self.count - 1);
        self.adjust_viewport();
    }

    pub fn move_to_last(&mut self) {
        self.move_absolute(self.count.saturating_sub(1));
    }

    /// Re-clamp after the catalog was rebuilt with `count` entries.
    pub fn on_catalog_changed(&mut self, count: usize) {
        self.count = count;
        if count == 0 {
            self.reset();
            return;
        }

        if self.index >= count {
            self.index = count - 1;
        }
        if self.index > self.offset + self.page_height {
            self.offset = self.index.saturating_sub(RECENTER_MARGIN);
        }
        self.adjust_viewport();
    }

    /// Visible list rows changed (terminal resize).
    pub fn set_page_height(&mut self, page_height: usize) {
        self.page_height = page_height;
        self.adjust_viewport();
    }

    /// Selection and viewport back to the top.
    pub fn reset(&mut self) {
        self.index = 0;
        self.offset = 0;
    }

    /// Catalog indices currently shown in the list pane.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.page_height + 1).min(self.count);
        self.offset.min(end)..end
    }

    fn adjust_viewport(&mut self) {
        if self.index < self.offset {
            self.offset -= self.offset - self.index;
        }
        if self.index > self.offset + self.page_height {
            self.offset += self.index - (self.offset + self.page_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn relative_moves_clamp() {
        let mut sel = SelectionController::new(5, 2);
        sel.move_relative(-1);
        assert_eq!(sel.index(), 0);
        sel.move_relative(3);
        assert_eq!(sel.index(), 3);
        sel.move_relative(100);
        assert_eq!(sel.index(), 4);
    }

    #[test]
    fn viewport_follows_selection_down_and_up() {
        let mut sel = SelectionController::new(20, 3);
        sel.move_absolute(3);
        assert_eq!(sel.offset(), 0);
        sel.move_absolute(4);
        assert_eq!(sel.offset(), 1);
        sel.move_absolute(10);
        assert_eq!(sel.offset(), 7);
        assert_eq!(sel.visible_range(), 7..11);

        sel.move_relative(-4);
        assert_eq!(sel.index(), 6);
        assert_eq!(sel.offset(), 6);
        sel.move_absolute(0);
        assert_eq!(sel.offset(), 0);
    }

    #[test]
    fn move_to_last_scrolls_to_end() {
        let mut sel = SelectionController::new(50, 4);
        sel.move_to_last();
        assert_eq!(sel.index(), 49);
        assert_eq!(sel.offset(), 45);
        assert_eq!(sel.visible_range(), 45..50);
    }

    #[test]
    fn shrinking_catalog_clamps_and_recenters() {
        let mut sel = SelectionController::new(100, 20);
        sel.move_absolute(80);
        assert_eq!(sel.offset(), 60);

        sel.on_catalog_changed(50);
        assert_eq!(sel.index(), 49);
        assert_eq!(sel.offset(), 49);

        let mut sel = SelectionController::new(100, 20);
        sel.move_absolute(30);
        sel.restore(Selection {
            index: 30,
            offset: 0,
        });
        sel.on_catalog_changed(25);
        assert_eq!(sel.index(), 24);
        assert_eq!(sel.offset(), 14);
    }

    #[test]
    fn selection_beyond_small_page_is_brought_into_view() {
        let mut sel = SelectionController::new(100, 3);
        sel.restore(Selection {
            index: 40,
            offset: 0,
        });
        sel.on_catalog_changed(100);
        // offset = index - 10 would still hide the row with only four rows visible.
        assert_eq!(sel.offset(), 37);
    }

    #[test]
    fn empty_catalog_resets() {
        let mut sel = SelectionController::new(10, 3);
        sel.move_absolute(9);
        sel.on_catalog_changed(0);
        assert_eq!(sel.snapshot(), Selection { index: 0, offset: 0 });
        sel.move_relative(1);
        assert_eq!(sel.index(), 0);
        assert_eq!(sel.visible_range(), 0..0);
    }

    #[test]
    fn resize_keeps_selection_visible() {
        let mut sel = SelectionController::new(30, 10);
        sel.move_absolute(10);
        assert_eq!(sel.offset(), 0);
        sel.set_page_height(4);
        assert_eq!(sel.offset(), 6);
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(
            count in 1usize..200,
            page_height in 0usize..30,
            moves in proptest::collection::vec((any::<bool>(), -50isize..50, 0usize..300), 0..60),
            new_count in 1usize..200,
        ) {
            let mut sel = SelectionController::new(count, page_height);
            for (absolute, delta, target) in moves {
                if absolute {
                    sel.move_absolute(target);
                } else {
                    sel.move_relative(delta);
                }
                prop_assert!(sel.index() < sel.count());
                prop_assert!(sel.visible_range().contains(&sel.index()));
            }
            sel.on_catalog_changed(new_count);
            prop_assert!(sel.index() < new_count);
            prop_assert!(sel.visible_range().contains(&sel.index()));
        }
    }
}
