use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;

/// Terminal columns per grid cell; the renderer draws every cell two wide
const COLUMNS_PER_CELL: i32 = 2;

/// Drags shorter than this many grid cells are ignored
pub const MIN_SWIPE_CELLS: i32 = 2;

/// Turns a left-button drag into a direction, like a touch swipe
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event; returns a direction when a drag completes
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_col, start_row) = self.start.take()?;
                swipe_direction(
                    (i32::from(event.column) - i32::from(start_col)) / COLUMNS_PER_CELL,
                    i32::from(event.row) - i32::from(start_row),
                )
            }
            _ => None,
        }
    }
}

/// Direction of a drag measured in grid cells; the longer axis wins
fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() && dx.abs() >= MIN_SWIPE_CELLS {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else if dy.abs() >= MIN_SWIPE_CELLS {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn drag(from: (u16, u16), to: (u16, u16)) -> Option<Direction> {
        let mut tracker = SwipeTracker::new();
        assert_eq!(
            tracker.handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                from.0,
                from.1
            )),
            None
        );
        tracker.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1))
    }

    #[test]
    fn test_horizontal_swipes() {
        assert_eq!(drag((10, 10), (20, 11)), Some(Direction::Right));
        assert_eq!(drag((20, 10), (10, 9)), Some(Direction::Left));
    }

    #[test]
    fn test_vertical_swipes() {
        assert_eq!(drag((10, 10), (11, 15)), Some(Direction::Down));
        assert_eq!(drag((10, 10), (10, 4)), Some(Direction::Up));
    }

    #[test]
    fn test_columns_count_half() {
        // 6 columns is 3 cells; 4 rows is 4 cells, so vertical wins
        assert_eq!(drag((10, 10), (16, 14)), Some(Direction::Down));
    }

    #[test]
    fn test_short_drag_ignored() {
        assert_eq!(drag((10, 10), (11, 11)), None);
        assert_eq!(drag((10, 10), (10, 10)), None);
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = SwipeTracker::new();
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 30, 30);
        assert_eq!(tracker.handle_mouse_event(up), None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut tracker = SwipeTracker::new();
        tracker.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        let up = mouse(MouseEventKind::Up(MouseButton::Right), 0, 10);
        assert_eq!(tracker.handle_mouse_event(up), None);
    }
}
