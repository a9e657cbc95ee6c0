use std::collections::VecDeque;

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Direction applied on the most recent tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    ///
    /// The body trails behind the head, opposite to `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(dx * i, dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    ///
    /// Returns `None` for an empty body or one that repeats a cell.
    pub fn from_cells(cells: &[Position], direction: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        let body: VecDeque<Position> = cells.iter().copied().collect();
        let snake = Self { body, direction };
        snake.has_unique_cells().then_some(snake)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if position is covered by any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn has_unique_cells(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .all(|(i, cell)| !self.body.iter().skip(i + 1).any(|other| other == cell))
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Board set up, waiting for the player to start
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Collision(CollisionType),
    /// The snake covers every cell, there is nowhere left to put food
    BoardCleared,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake fills the grid
    pub food: Option<Position>,
    /// Validated turn request, applied on the next tick
    pub pending_direction: Option<Direction>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food: Some(food),
            pending_direction: None,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            phase: Phase::Idle,
            game_over_reason: None,
        }
    }

    /// Same as [`GameState::new`] but already running
    pub fn running(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            phase: Phase::Running,
            ..Self::new(snake, food, grid_width, grid_height)
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Every in-bounds cell the snake does not cover, row by row
    pub fn free_cells(&self) -> Vec<Position> {
        let (width, height) = (self.grid_width as i32, self.grid_height as i32);
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.snake.occupies(*pos))
            .collect()
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Request a turn for the next tick
    ///
    /// Rejected when the game is not running or when `direction` reverses the
    /// direction the snake last moved in. A later request before the next
    /// tick replaces an earlier one.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() || self.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Direction the snake will move on the next tick
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.snake.direction)
    }

    /// Running <-> Paused; returns true if the phase changed
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Running,
            Phase::Idle | Phase::GameOver => return false,
        }
        true
    }

    /// Back to the idle phase from anywhere
    pub fn return_to_menu(&mut self) {
        self.phase = Phase::Idle;
        self.pending_direction = None;
    }

    pub(crate) fn end(&mut self, reason: GameOverReason) {
        self.phase = Phase::GameOver;
        self.pending_direction = None;
        self.game_over_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        GameState::running(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(8, 8),
            10,
            10,
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let cells: Vec<Position> = snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_snake_zero_length_is_clamped() {
        let snake = Snake::new(Position::new(2, 2), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_snake_from_cells() {
        let cells = [Position::new(1, 1), Position::new(1, 2)];
        let snake = Snake::from_cells(&cells, Direction::Up).unwrap();
        assert_eq!(snake.head(), Position::new(1, 1));

        assert!(Snake::from_cells(&[], Direction::Up).is_none());
        let duplicated = [Position::new(1, 1), Position::new(1, 1)];
        assert!(Snake::from_cells(&duplicated, Direction::Up).is_none());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            20,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_free_cells_exclude_snake() {
        let state = running_state();
        let free = state.free_cells();
        assert_eq!(free.len(), 100 - 3);
        assert!(free.iter().all(|pos| !state.is_occupied_by_snake(*pos)));
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let mut state = running_state();
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.heading(), Direction::Right);
    }

    #[test]
    fn test_reverse_checked_against_applied_direction() {
        let mut state = running_state();
        assert!(state.set_direction(Direction::Up));
        // Still moving right until the next tick, so Left stays a reversal
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.heading(), Direction::Up);

        assert!(state.set_direction(Direction::Down));
        assert_eq!(state.heading(), Direction::Down);
    }

    #[test]
    fn test_direction_ignored_unless_running() {
        let mut state = running_state();
        state.phase = Phase::Paused;
        assert!(!state.set_direction(Direction::Up));
        state.phase = Phase::Idle;
        assert!(!state.set_direction(Direction::Up));
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = running_state();
        assert!(state.toggle_pause());
        assert_eq!(state.phase, Phase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, Phase::Running);

        state.phase = Phase::GameOver;
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_return_to_menu() {
        let mut state = running_state();
        state.set_direction(Direction::Up);
        state.return_to_menu();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.pending_direction, None);
    }
}
