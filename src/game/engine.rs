use super::{
    config::GameConfig,
    direction::Direction,
    level::Level,
    state::{CollisionType, GameOverReason, GameState, Phase, Position, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

/// Random draws tried before falling back to scanning the free cells
const MAX_RANDOM_FOOD_ATTEMPTS: usize = 64;

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running, nothing changed
    Skipped,
    /// The snake moved one cell
    Moved,
    /// The snake ate the food; carries the new score
    Ate { score: u32 },
    /// The snake crashed and the game is over
    Collided(CollisionType),
    /// The snake ate the last free cell and the game is over
    BoardCleared { score: u32 },
}

impl TickOutcome {
    pub fn ate_food(&self) -> bool {
        matches!(self, TickOutcome::Ate { .. } | TickOutcome::BoardCleared { .. })
    }

    /// Whether this tick ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TickOutcome::Collided(_) | TickOutcome::BoardCleared { .. }
        )
    }
}

/// The game engine that handles all game logic
///
/// The engine owns only configuration and randomness; all mutable game data
/// lives in the [`GameState`] passed to each call.
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, String> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    ///
    /// Fails if the config does not pass [`GameConfig::validate`].
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn set_level(&mut self, level: Level) {
        self.config.level = level;
    }

    /// Fresh board in the idle phase: new snake, new food, zero score
    pub fn reset(&mut self) -> GameState {
        let start_x = (self.config.grid_width / 4) as i32;
        let start_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(start_x, start_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(
            snake,
            Position::new(0, 0),
            self.config.grid_width,
            self.config.grid_height,
        );
        state.food = self.spawn_food(&state);
        state
    }

    /// Start a new game from the idle or game-over phase
    ///
    /// Returns false (and leaves the state alone) while a game is in progress.
    pub fn start(&mut self, state: &mut GameState) -> bool {
        match state.phase {
            Phase::Idle | Phase::GameOver => {
                *state = self.reset();
                state.phase = Phase::Running;
                true
            }
            Phase::Running | Phase::Paused => false,
        }
    }

    /// Advance the game by one tick
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::Skipped;
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.steps += 1;

        if let Some(collision) = Self::check_collision(state, new_head) {
            state.end(GameOverReason::Collision(collision));
            return TickOutcome::Collided(collision);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        state.score += self.config.score_per_food;
        state.food = self.spawn_food(state);

        if state.food.is_none() {
            state.end(GameOverReason::BoardCleared);
            return TickOutcome::BoardCleared { score: state.score };
        }

        TickOutcome::Ate { score: state.score }
    }

    /// Check if the new head position causes a collision
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it has not moved out of the way yet
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a cell the snake does not cover, or `None` if the grid is full
    fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        for _ in 0..MAX_RANDOM_FOOD_ATTEMPTS {
            let x = self.rng.gen_range(0..state.grid_width) as i32;
            let y = self.rng.gen_range(0..state.grid_height) as i32;
            let pos = Position::new(x, y);

            if !state.is_occupied_by_snake(pos) {
                return Some(pos);
            }
        }

        state.free_cells().choose(&mut self.rng).copied()
    }
}
