//! Shared crate-wide defaults.
//!
//! All values are in terminal cells. They feed the `Default` impls in
//! [`crate::config`]; the demo binary can override each of them from the
//! command line.

/// Default height of one roster grid row (a user card plus its padding).
pub const DEFAULT_ROW_HEIGHT: u16 = 4;

/// Default width of one roster card. Together with [`DEFAULT_GRID_GAP`] this
/// determines how many columns fit in the measured container width.
pub const DEFAULT_ITEM_WIDTH: u16 = 24;

/// Default horizontal gap between roster cards and between docked chat
/// windows.
pub const DEFAULT_GRID_GAP: u16 = 2;

/// Extra rows rendered above/below the strict visible range.
///
/// Overscan masks the flicker of rows popping in at the viewport edge while
/// the user scrolls. Increasing it trades memory for smoothness; 0 is legal
/// and renders exactly the intersecting rows.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Hard ceiling on how many filtered roster entries are considered at all.
///
/// This is the memory-safety valve for unbounded directories: when the
/// filtered collection is longer it is truncated to the first
/// `DEFAULT_MAX_ITEMS` entries, and the truncation is surfaced to the
/// presentation layer so it can tell the user to narrow the search.
pub const DEFAULT_MAX_ITEMS: usize = 500;

/// Default width of one floating chat window.
pub const DEFAULT_WINDOW_WIDTH: u16 = 36;

/// Default height of one floating chat window.
pub const DEFAULT_WINDOW_HEIGHT: u16 = 12;

/// Horizontal viewport inset reserved before dock slots are counted, so the
/// leftmost chat window never hugs the screen edge.
pub const DEFAULT_SIDE_PADDING: u16 = 4;

/// Vertical viewport inset kept below docked windows (room for a status
/// line / overflow badge).
pub const DEFAULT_BOTTOM_PADDING: u16 = 1;
