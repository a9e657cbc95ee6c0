use crate::game::{GameState, Level};
use crate::metrics::GameMetrics;

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    LevelSelect,
    /// Playfield; the game phase decides between play, pause and game over
    Game,
}

/// Entries of the main menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Levels,
    Sound,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::Levels,
        MenuItem::Sound,
        MenuItem::Quit,
    ];

    pub fn label(&self, sound_enabled: bool) -> &'static str {
        match self {
            MenuItem::Start => "START GAME",
            MenuItem::Levels => "LEVELS",
            MenuItem::Sound if sound_enabled => "SOUND: ON",
            MenuItem::Sound => "SOUND: OFF",
            MenuItem::Quit => "QUIT",
        }
    }
}

/// Everything the renderer reads to draw one frame
pub struct View<'a> {
    pub screen: Screen,
    pub state: &'a GameState,
    pub metrics: &'a GameMetrics,
    pub level: Level,
    pub sound_enabled: bool,
    /// Index into [`MenuItem::ALL`]
    pub menu_cursor: usize,
    /// The last finished game set a new high score
    pub new_record: bool,
}
