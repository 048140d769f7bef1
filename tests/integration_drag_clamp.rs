use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};

use chat_wm::config::DockConfig;
use chat_wm::drag::{DragController, clamp_position};
use chat_wm::window::{ChatDock, Position};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn down(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

fn drag(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

fn up(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

const VIEWPORT: Size = Size {
    width: 120,
    height: 40,
};

#[test]
fn full_gesture_keeps_window_inside_the_viewport() {
    let mut c = DragController::new(Position { x: 60, y: 20 }, Size::new(30, 10));
    c.set_handle(Rect::new(60, 20, 30, 1));

    assert!(c.handle_mouse(&down(65, 20), VIEWPORT));
    // pointer flies far outside the screen; the window stays clamped
    for (col, row) in [(200, 120), (0, 0), (119, 39), (5, 200)] {
        c.handle_mouse(&drag(col, row), VIEWPORT);
        let p = c.position();
        assert!(p.x <= 90, "x {} escaped", p.x);
        assert!(p.y <= 30, "y {} escaped", p.y);
    }
    // release far away from the handle still ends the gesture
    assert!(c.handle_mouse(&up(200, 120), VIEWPORT));
    assert!(!c.is_dragging());
}

#[test]
fn queue_reshuffle_rehomes_idle_windows_but_not_a_dragged_one() {
    let dock: ChatDock<char> = {
        let mut d = ChatDock::new(DockConfig {
            window_width: 30,
            window_height: 10,
            gap: 2,
            side_padding: 4,
            bottom_padding: 1,
        });
        d.open('a');
        d.open('b');
        d.open('c');
        d
    };
    let viewport = Size::new(120, 40);
    let snap = dock.visible_set(viewport.width);
    assert_eq!(snap.to_show.len(), 3);

    // window 'a' sits in the deepest slot and gets dragged by the user
    let a_slot = snap.to_show.iter().find(|w| w.id == 'a').unwrap();
    let home = dock.stack_position(a_slot.queue_index, viewport);
    let mut a = DragController::new(home, dock.window_size());
    a.set_handle(Rect::new(home.x, home.y, 30, 1));
    a.handle_mouse(&down(home.x + 2, home.y), viewport);
    a.handle_mouse(&drag(10, 5), viewport);
    let dragged_to = a.position();
    assert_ne!(dragged_to, home);

    // another window closes mid-drag; the reshuffle's reset is ignored
    let mut dock = dock;
    dock.close('b');
    let snap = dock.visible_set(viewport.width);
    let a_slot = snap.to_show.iter().find(|w| w.id == 'a').unwrap();
    let new_home = dock.stack_position(a_slot.queue_index, viewport);
    a.reset_position(new_home, viewport);
    assert_eq!(a.position(), dragged_to);

    // once released, the same reset applies
    a.handle_mouse(&up(10, 5), viewport);
    a.reset_position(new_home, viewport);
    assert_eq!(a.position(), new_home);
}

#[test]
fn closing_a_window_discards_its_position() {
    // position lives in the controller; the dock only knows the registry.
    // Reopening builds a fresh controller at the slot's stack position.
    let mut dock: ChatDock<char> = ChatDock::new(DockConfig {
        window_width: 30,
        window_height: 10,
        gap: 2,
        side_padding: 4,
        bottom_padding: 1,
    });
    let viewport = Size::new(120, 40);
    dock.open('a');
    let home = dock.stack_position(0, viewport);

    let mut c = DragController::new(home, dock.window_size());
    c.set_handle(Rect::new(home.x, home.y, 30, 1));
    c.handle_mouse(&down(home.x, home.y), viewport);
    c.handle_mouse(&drag(3, 3), viewport);
    c.handle_mouse(&up(3, 3), viewport);
    assert_ne!(c.position(), home);

    dock.close('a');
    drop(c);
    dock.open('a');
    let fresh = DragController::new(dock.stack_position(0, viewport), dock.window_size());
    assert_eq!(fresh.position(), home);
}

#[test]
fn clamp_extents_saturate_for_oversized_windows() {
    let window = Size::new(50, 20);
    let tiny = Size::new(30, 10);
    assert_eq!(
        clamp_position(25, 18, tiny, window),
        Position { x: 0, y: 0 }
    );
    assert_eq!(
        clamp_position(-5, -5, VIEWPORT, window),
        Position { x: 0, y: 0 }
    );
    assert_eq!(
        clamp_position(500, 500, VIEWPORT, window),
        Position { x: 70, y: 20 }
    );
}
