//! Tuning knobs for the roster grid and the chat-window dock.
//!
//! There is deliberately no validation error path here: malformed geometry
//! (zero extents from an unmeasured container, hostile CLI input) is clamped
//! to safe minimums by `sanitized()`, which every consumer calls before
//! doing arithmetic. Degenerate input renders as an empty or single-column
//! state, never a panic.

use crate::constants::{
    DEFAULT_BOTTOM_PADDING, DEFAULT_GRID_GAP, DEFAULT_ITEM_WIDTH, DEFAULT_MAX_ITEMS,
    DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT, DEFAULT_SIDE_PADDING, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH,
};

/// Geometry configuration for [`crate::roster::RosterGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Height of one row in cells.
    pub row_height: u16,
    /// Width of one card in cells.
    pub item_width: u16,
    /// Horizontal gap between cards.
    pub gap: u16,
    /// Extra rows rendered beyond the strict visible range.
    pub overscan: usize,
    /// Hard cap on the filtered collection length.
    pub max_items: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            item_width: DEFAULT_ITEM_WIDTH,
            gap: DEFAULT_GRID_GAP,
            overscan: DEFAULT_OVERSCAN,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl GridConfig {
    /// Clamp every extent to a usable minimum. `gap` and `overscan` may be
    /// zero; `row_height`, `item_width` and `max_items` may not.
    pub fn sanitized(self) -> Self {
        Self {
            row_height: self.row_height.max(1),
            item_width: self.item_width.max(1),
            gap: self.gap,
            overscan: self.overscan,
            max_items: self.max_items.max(1),
        }
    }
}

/// Geometry configuration for [`crate::window::ChatDock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockConfig {
    /// Width of one floating chat window.
    pub window_width: u16,
    /// Height of one floating chat window.
    pub window_height: u16,
    /// Horizontal gap between stacked windows.
    pub gap: u16,
    /// Viewport inset reserved before slots are counted.
    pub side_padding: u16,
    /// Viewport inset kept below the window stack.
    pub bottom_padding: u16,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            gap: DEFAULT_GRID_GAP,
            side_padding: DEFAULT_SIDE_PADDING,
            bottom_padding: DEFAULT_BOTTOM_PADDING,
        }
    }
}

impl DockConfig {
    pub fn sanitized(self) -> Self {
        Self {
            window_width: self.window_width.max(1),
            window_height: self.window_height.max(1),
            gap: self.gap,
            side_padding: self.side_padding,
            bottom_padding: self.bottom_padding,
        }
    }
}
