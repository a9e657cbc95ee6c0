use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game to do
///
/// Commands are screen-agnostic; the play loop decides what each one means
/// on the menu, the level picker or the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Arrow keys / WASD: steer the snake or move a menu cursor
    Steer(Direction),
    TogglePause,
    Confirm,
    Restart,
    ToggleSound,
    LevelSelect,
    Back,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Command {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Command::Steer(Direction::Up),
            KeyCode::Down => Command::Steer(Direction::Down),
            KeyCode::Left => Command::Steer(Direction::Left),
            KeyCode::Right => Command::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Command::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Command::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Command::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
            KeyCode::Enter => Command::Confirm,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
            KeyCode::Char('m') | KeyCode::Char('M') => Command::ToggleSound,
            KeyCode::Char('l') | KeyCode::Char('L') => Command::LevelSelect,
            KeyCode::Esc => Command::Back,
            KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,

            _ => Command::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Command {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), Command::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Down), Command::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Left), Command::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Right), Command::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), Command::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Char('a')), Command::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), Command::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Char('d')), Command::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            Command::Steer(Direction::Up)
        );
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Command::TogglePause);
        assert_eq!(press(KeyCode::Char('p')), Command::TogglePause);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(press(KeyCode::Enter), Command::Confirm);
        assert_eq!(press(KeyCode::Esc), Command::Back);
        assert_eq!(press(KeyCode::Char('m')), Command::ToggleSound);
        assert_eq!(press(KeyCode::Char('l')), Command::LevelSelect);
        assert_eq!(press(KeyCode::Char('R')), Command::Restart);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), Command::Quit);
        assert_eq!(press(KeyCode::Char('Q')), Command::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), Command::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), Command::Quit);
    }
}
