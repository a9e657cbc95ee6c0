use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Difficulty level; controls how often the snake advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Normal, Level::Hard];

    /// Time between two game ticks at this level
    pub fn tick_interval(&self) -> Duration {
        match self {
            Level::Easy => Duration::from_millis(150),
            Level::Normal => Duration::from_millis(100),
            Level::Hard => Duration::from_millis(60),
        }
    }

    /// Next level, wrapping from the hardest back to the easiest
    pub fn next(&self) -> Level {
        match self {
            Level::Easy => Level::Normal,
            Level::Normal => Level::Hard,
            Level::Hard => Level::Easy,
        }
    }

    /// Previous level, wrapping from the easiest to the hardest
    pub fn previous(&self) -> Level {
        match self {
            Level::Easy => Level::Hard,
            Level::Normal => Level::Easy,
            Level::Hard => Level::Normal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Easy => "EASY",
            Level::Normal => "NORMAL",
            Level::Hard => "HARD",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harder_levels_tick_faster() {
        assert!(Level::Easy.tick_interval() > Level::Normal.tick_interval());
        assert!(Level::Normal.tick_interval() > Level::Hard.tick_interval());
    }

    #[test]
    fn test_level_cycling() {
        for level in Level::ALL {
            assert_eq!(level.next().previous(), level);
        }
        assert_eq!(Level::Hard.next(), Level::Easy);
        assert_eq!(Level::Easy.previous(), Level::Hard);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&Level::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let level: Level = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(level, Level::Normal);
    }
}
