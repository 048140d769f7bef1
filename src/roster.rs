//! List virtualization for the user roster.
//!
//! A directory can hold thousands of entries; the grid only ever
//! materializes the rows that intersect the scroll viewport (plus overscan).
//! [`RosterGrid`] owns the search term, the scroll offset and the measured
//! container size, and derives the visible slice as a pure function of
//! those inputs on every call; there is no cached intermediate state.
//!
//! The grid never clamps `scroll_offset`. The presentation layer owns the
//! scrollbar and is expected to keep the offset inside
//! `[0, content_height - view_height]`; out-of-range offsets simply produce
//! an empty visible slice.

use ratatui::layout::Size;

use crate::config::GridConfig;
use crate::geometry::{RowRange, columns_per_row, visible_row_range};

/// Minimal shape the grid needs from a directory entry.
pub trait RosterEntry {
    type Id: Copy + Eq + Ord;

    fn entry_id(&self) -> Self::Id;
    fn display_name(&self) -> &str;
}

/// Why the grid rendered nothing, so the presentation layer can show the
/// right placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The directory itself is empty (ignoring the excluded self entry).
    NoEntries,
    /// Entries exist but none match the active search term.
    NoMatches,
}

#[derive(Debug, Clone)]
pub struct RosterGrid<T: RosterEntry> {
    search: String,
    scroll_offset: usize,
    container: Size,
    self_id: Option<T::Id>,
    config: GridConfig,
}

/// One recomputation of the visible slice plus everything the presentation
/// layer needs to lay it out: row geometry, the translation that keeps the
/// rendered block aligned with the scrollbar, and the truncation flag.
#[derive(Debug)]
pub struct GridWindow<'a, T> {
    /// Only the entries inside the visible row range are materialized.
    pub visible: Vec<&'a T>,
    pub rows: RowRange,
    pub total_rows: usize,
    pub columns: usize,
    pub row_height: u16,
    /// Length of the filtered (and possibly capped) collection.
    pub filtered_len: usize,
    /// True when the filtered collection was cut off at `max_items`.
    pub truncated: bool,
    search_active: bool,
}

impl<T: RosterEntry> RosterGrid<T> {
    pub fn new(config: GridConfig) -> Self {
        Self {
            search: String::new(),
            scroll_offset: 0,
            container: Size::new(0, 0),
            self_id: None,
            config: config.sanitized(),
        }
    }

    /// Entry excluded from every computation (the local user does not
    /// appear in their own roster).
    pub fn set_self_id(&mut self, id: Option<T::Id>) {
        self.self_id = id;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search term. Scroll position is deliberately preserved;
    /// if it now points past the shorter content the container clamps it,
    /// not the grid.
    pub fn set_search<S: Into<String>>(&mut self, term: S) {
        self.search = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// Record the measured viewport size. Columns and rows are derived per
    /// compute, so a resize takes effect on the very next call.
    pub fn resize(&mut self, container: Size) {
        self.container = container;
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Run the full pipeline: filter -> cap -> arrange -> window ->
    /// materialize. Synchronous and deterministic; called once per
    /// render/scroll/resize event.
    pub fn compute<'a>(&self, items: &'a [T]) -> GridWindow<'a, T> {
        let cfg = self.config;
        let needle = self.search.to_lowercase();
        let search_active = !needle.is_empty();

        let mut filtered: Vec<&'a T> = Vec::new();
        let mut truncated = false;
        for item in items {
            if self.self_id == Some(item.entry_id()) {
                continue;
            }
            if search_active && !item.display_name().to_lowercase().contains(&needle) {
                continue;
            }
            if filtered.len() == cfg.max_items {
                // At least one more match exists beyond the cap.
                truncated = true;
                break;
            }
            filtered.push(item);
        }

        let columns = columns_per_row(self.container.width, cfg.item_width, cfg.gap);
        let total_rows = filtered.len().div_ceil(columns);
        let rows = visible_row_range(
            self.scroll_offset,
            self.container.height,
            cfg.row_height,
            total_rows,
            cfg.overscan,
        );
        let lo = (rows.start * columns).min(filtered.len());
        let hi = (rows.end * columns).min(filtered.len());
        let visible = filtered[lo..hi].to_vec();

        GridWindow {
            visible,
            rows,
            total_rows,
            columns,
            row_height: cfg.row_height,
            filtered_len: filtered.len(),
            truncated,
            search_active,
        }
    }
}

impl<'a, T> GridWindow<'a, T> {
    /// Translation applied to the rendered block so the first materialized
    /// row lands at its true scroll position.
    pub fn render_offset_y(&self) -> usize {
        self.rows.render_offset_y(self.row_height)
    }

    /// Full logical content height, for scrollbar sizing and offset
    /// clamping in the presentation layer.
    pub fn content_height(&self) -> usize {
        self.total_rows * self.row_height as usize
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.filtered_len > 0 {
            None
        } else if self.search_active {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoEntries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct User {
        id: u32,
        name: String,
    }

    impl RosterEntry for User {
        type Id = u32;

        fn entry_id(&self) -> u32 {
            self.id
        }

        fn display_name(&self) -> &str {
            &self.name
        }
    }

    fn users(n: usize) -> Vec<User> {
        (0..n as u32)
            .map(|id| User {
                id,
                name: format!("user-{id:04}"),
            })
            .collect()
    }

    fn grid(config: GridConfig) -> RosterGrid<User> {
        RosterGrid::new(config)
    }

    #[test]
    fn windowing_scenario_1000_items() {
        // 3 columns of 140-cell rows in a 600-cell viewport, scrolled to
        // offset 1400: rows [10, 17), entries 30..51.
        let items = users(1000);
        let mut g = grid(GridConfig {
            row_height: 140,
            item_width: 100,
            gap: 10,
            overscan: 2,
            max_items: 2000,
        });
        g.resize(Size::new(320, 600)); // (320 + 10) / (100 + 10) = 3 columns
        g.set_scroll_offset(1400);

        let w = g.compute(&items);
        assert_eq!(w.columns, 3);
        assert_eq!(w.total_rows, 334);
        assert_eq!(w.rows, RowRange { start: 10, end: 17 });
        assert_eq!(w.render_offset_y(), 1400);
        assert_eq!(w.visible.len(), 21);
        assert_eq!(w.visible.first().map(|u| u.id), Some(30));
        assert_eq!(w.visible.last().map(|u| u.id), Some(50));
        assert!(!w.truncated);
        assert!(w.empty_state().is_none());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = vec![
            User { id: 1, name: "Alice".into() },
            User { id: 2, name: "Malcolm".into() },
            User { id: 3, name: "Bob".into() },
        ];
        let mut g = grid(GridConfig::default());
        g.resize(Size::new(80, 24));
        g.set_search("AL");
        let w = g.compute(&items);
        let ids: Vec<u32> = w.visible.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn self_entry_is_excluded() {
        let items = users(3);
        let mut g = grid(GridConfig::default());
        g.resize(Size::new(80, 24));
        g.set_self_id(Some(1));
        let w = g.compute(&items);
        let ids: Vec<u32> = w.visible.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn cap_truncates_and_reports() {
        let items = users(10);
        let mut g = grid(GridConfig {
            max_items: 4,
            ..GridConfig::default()
        });
        g.resize(Size::new(200, 50));
        let w = g.compute(&items);
        assert_eq!(w.filtered_len, 4);
        assert!(w.truncated);

        // Capping is idempotent: recomputing with the same inputs yields
        // the same filtered prefix.
        let w2 = g.compute(&items);
        assert_eq!(w2.filtered_len, 4);
        let a: Vec<u32> = w.visible.iter().map(|u| u.id).collect();
        let b: Vec<u32> = w2.visible.iter().map(|u| u.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn cap_exact_fit_is_not_truncation() {
        let items = users(4);
        let mut g = grid(GridConfig {
            max_items: 4,
            ..GridConfig::default()
        });
        g.resize(Size::new(200, 50));
        let w = g.compute(&items);
        assert_eq!(w.filtered_len, 4);
        assert!(!w.truncated);
    }

    #[test]
    fn empty_states_distinguish_no_entries_from_no_matches() {
        let mut g = grid(GridConfig::default());
        g.resize(Size::new(80, 24));

        let w = g.compute(&[]);
        assert_eq!(w.empty_state(), Some(EmptyState::NoEntries));

        let items = users(5);
        g.set_search("zzz");
        let w = g.compute(&items);
        assert_eq!(w.empty_state(), Some(EmptyState::NoMatches));

        g.clear_search();
        let w = g.compute(&items);
        assert!(w.empty_state().is_none());
    }

    #[test]
    fn clearing_search_preserves_scroll_offset() {
        let items = users(100);
        let mut g = grid(GridConfig {
            row_height: 2,
            item_width: 10,
            gap: 0,
            overscan: 0,
            max_items: 500,
        });
        g.resize(Size::new(10, 8)); // single column
        g.set_scroll_offset(40);
        g.set_search("user-000"); // matches 0000..0009 -> offset points past content
        let w = g.compute(&items);
        assert_eq!(g.scroll_offset(), 40);
        assert!(w.visible.is_empty());

        g.clear_search();
        let w = g.compute(&items);
        assert_eq!(g.scroll_offset(), 40);
        assert_eq!(w.rows.start, 20);
        assert!(!w.visible.is_empty());
    }

    #[test]
    fn resize_recomputes_columns_immediately() {
        let items = users(30);
        let mut g = grid(GridConfig {
            row_height: 4,
            item_width: 20,
            gap: 2,
            overscan: 0,
            max_items: 500,
        });
        g.resize(Size::new(20, 12));
        assert_eq!(g.compute(&items).columns, 1);
        g.resize(Size::new(64, 12)); // (64 + 2) / 22 = 3
        let w = g.compute(&items);
        assert_eq!(w.columns, 3);
        assert_eq!(w.total_rows, 10);
    }

    #[test]
    fn zero_size_container_still_yields_one_column() {
        let items = users(5);
        let g = grid(GridConfig::default());
        let w = g.compute(&items);
        assert_eq!(w.columns, 1);
        assert_eq!(w.total_rows, 5);
        // zero-height viewport materializes nothing past overscan rows
        assert!(w.visible.len() <= w.columns * (w.rows.len()));
    }
}
