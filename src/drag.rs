//! Pointer-drag tracking for one floating chat window.
//!
//! A [`DragController`] owns its window's on-screen position for the
//! window's whole lifetime: the dock hands it an initial stack position,
//! the user may drag it anywhere via the title-bar handle, and the dock may
//! reset it when the window's queue slot changes, but never mid-gesture.
//!
//! Terminal mouse events arrive for the whole screen, not just the handle,
//! so a button release outside the window bounds still ends the drag.

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};
use tracing::debug;

use crate::window::Position;

/// Clamp a candidate top-left corner so the whole window stays inside the
/// viewport. When the viewport is smaller than the window the extent
/// saturates to 0 and the window pins to the top-left corner.
pub fn clamp_position(x: i32, y: i32, viewport: Size, window: Size) -> Position {
    let max_x = viewport.width.saturating_sub(window.width) as i32;
    let max_y = viewport.height.saturating_sub(window.height) as i32;
    Position {
        x: x.clamp(0, max_x) as u16,
        y: y.clamp(0, max_y) as u16,
    }
}

#[derive(Debug, Clone)]
pub struct DragController {
    position: Position,
    size: Size,
    handle: Rect,
    /// Pointer offset from the window's top-left corner, captured on the
    /// pointer-down that started the gesture. `Some` means dragging.
    grip: Option<(i32, i32)>,
}

impl DragController {
    pub fn new(initial: Position, size: Size) -> Self {
        Self {
            position: initial,
            size,
            handle: Rect::default(),
            grip: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Register the current drag-handle region in screen coordinates. The
    /// caller supplies this explicitly each render; the controller never
    /// goes looking for it.
    pub fn set_handle(&mut self, handle: Rect) {
        self.handle = handle;
    }

    pub fn is_dragging(&self) -> bool {
        self.grip.is_some()
    }

    /// Externally supplied position (stack slot reshuffle after another
    /// window closed). Ignored while a drag is in flight so layout changes
    /// never fight the user's gesture.
    pub fn reset_position(&mut self, position: Position, viewport: Size) {
        if self.grip.is_some() {
            return;
        }
        self.position = clamp_position(position.x as i32, position.y as i32, viewport, self.size);
    }

    /// Feed one mouse event. Returns true when the event was consumed by
    /// the drag gesture (down on the handle, move while dragging, release).
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, viewport: Size) -> bool {
        let (col, row) = (mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(_) => {
                if !self.handle.contains(ratatui::layout::Position::new(
                    mouse.column,
                    mouse.row,
                )) {
                    return false;
                }
                self.grip = Some((col - self.position.x as i32, row - self.position.y as i32));
                debug!(x = self.position.x, y = self.position.y, "drag start");
                true
            }
            MouseEventKind::Drag(_) => {
                let Some((dx, dy)) = self.grip else {
                    return false;
                };
                self.position = clamp_position(col - dx, row - dy, viewport, self.size);
                true
            }
            MouseEventKind::Up(_) => {
                if self.grip.take().is_some() {
                    debug!(x = self.position.x, y = self.position.y, "drag end");
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }
}
