mod dock;

pub use dock::{ChatDock, DockSnapshot, VisibleWindow};

/// Top-left corner of a floating window, in screen cells. Positions are
/// always clamped into the viewport, so coordinates are unsigned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// One registered chat window. Entries live in the dock's registry in
/// insertion order (most-recently-opened last) with at most one entry per
/// id; `minimized` windows keep their slot in the order but never occupy a
/// visible dock slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry<Id> {
    pub id: Id,
    pub minimized: bool,
}
