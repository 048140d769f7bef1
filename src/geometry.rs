//! Pure scroll/row/column math shared by the roster grid and the dock.
//!
//! Everything in here is a total function of its arguments: no stored state,
//! no clamping of the caller's scroll offset. Callers pass whatever offset
//! they hold and get back the half-open row range that covers the viewport.

/// Half-open range of grid rows to materialize, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Vertical translation (in cells) that places row `start` at its true
    /// scroll position, so the rendered block lines up with the scrollbar.
    pub fn render_offset_y(&self, row_height: u16) -> usize {
        self.start * row_height.max(1) as usize
    }
}

/// Compute which rows intersect the viewport `[scroll_offset,
/// scroll_offset + container_height)`, padded by `overscan` extra rows.
///
/// Guarantees for all inputs: every row whose vertical extent intersects the
/// viewport lies within the returned range, and `end <= total_rows` (for
/// `total_rows == 0` the range degenerates to `[0, 0)`). A `row_height` of 0
/// is treated as 1 so the division below is always defined.
pub fn visible_row_range(
    scroll_offset: usize,
    container_height: u16,
    row_height: u16,
    total_rows: usize,
    overscan: usize,
) -> RowRange {
    let row_height = row_height.max(1) as usize;
    let start = (scroll_offset / row_height).min(total_rows);
    // The top row may be partially scrolled out; the cells it still occupies
    // push the viewport one row deeper, so count them before dividing.
    let scrolled_into_row = scroll_offset % row_height;
    let rows_in_view = (scrolled_into_row + container_height as usize).div_ceil(row_height);
    let end = start
        .saturating_add(rows_in_view)
        .saturating_add(overscan)
        .min(total_rows);
    RowRange { start, end }
}

/// How many grid columns fit in `container_width`, given a fixed item width
/// and inter-item gap. Never returns 0: a zero-width container still reports
/// a single conceptual column so downstream row math stays defined.
pub fn columns_per_row(container_width: u16, item_width: u16, gap: u16) -> usize {
    let item = item_width.max(1) as usize + gap as usize;
    let avail = container_width as usize + gap as usize;
    (avail / item).max(1)
}
