//! Display helpers shared by frontends.
//!
//! The filter engine always produces the full match list; these helpers
//! decide how much of it a view shows at once.

use std::ops::Range;

// ---------------------------------------------------------------------------
// Row window
// ---------------------------------------------------------------------------

/// Rows shown by the table view.
pub const TABLE_MAX_ROWS: usize = 100;

/// Rows shown by the list view before "load more".
pub const LIST_INITIAL_ROWS: usize = 20;

/// Rows added per "load more" in the list view.
pub const LIST_ROWS_INCREMENT: usize = 10;

/// How many of the matching rows a view currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    initial: usize,
    increment: usize,
    limit: usize,
}

impl RowWindow {
    /// Fixed-size table window.
    pub fn table() -> Self {
        Self::new(TABLE_MAX_ROWS, 0)
    }

    /// Growable list window.
    pub fn list() -> Self {
        Self::new(LIST_INITIAL_ROWS, LIST_ROWS_INCREMENT)
    }

    pub fn new(initial: usize, increment: usize) -> Self {
        Self {
            initial,
            increment,
            limit: initial,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of rows shown out of `total`.
    pub fn visible(&self, total: usize) -> usize {
        self.limit.min(total)
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        0..self.visible(total)
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.range(rows.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.increment > 0 && total > self.limit
    }

    /// Grow the window by one increment. Returns whether anything changed.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.limit += self.increment;
        true
    }

    /// Back to the initial size (called whenever filters change).
    pub fn reset(&mut self) {
        self.limit = self.initial;
    }

    /// `"shown / total"`.
    pub fn label(&self, total: usize) -> String {
        format!("{} / {}", self.visible(total), total)
    }
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::table()
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// `"Name (NN%)"`, or just the name when no probability is known.
pub fn with_probability(name: &str, probability: Option<u32>) -> String {
    match probability {
        Some(p) => format!("{name} ({p}%)"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_window_caps_at_max_rows() {
        let w = RowWindow::table();
        assert_eq!(w.visible(30), 30);
        assert_eq!(w.visible(250), TABLE_MAX_ROWS);
        assert_eq!(w.label(250), "100 / 250");
        assert!(!w.has_more(250));
    }

    #[test]
    fn list_window_grows_and_resets() {
        let mut w = RowWindow::list();
        assert_eq!(w.label(45), "20 / 45");
        assert!(w.load_more(45));
        assert_eq!(w.visible(45), 30);
        assert!(w.load_more(45));
        assert!(w.load_more(45));
        assert_eq!(w.label(45), "45 / 45");
        assert!(!w.load_more(45));

        w.reset();
        assert_eq!(w.limit(), LIST_INITIAL_ROWS);
    }

    #[test]
    fn slice_never_overruns() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(RowWindow::list().slice(&rows), &[0, 1, 2, 3, 4]);
        assert_eq!(RowWindow::new(2, 0).slice(&rows), &[0, 1]);
        assert_eq!(RowWindow::table().label(0), "0 / 0");
    }

    #[test]
    fn probability_label() {
        assert_eq!(with_probability("Venom", Some(50)), "Venom (50%)");
        assert_eq!(with_probability("Potion", None), "Potion");
    }
}
