use std::time::{Duration, Instant};

/// Per-session statistics shown next to the playfield
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::with_high_score(0)
    }

    /// Start from a high score carried over from earlier sessions
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score,
            games_played: 0,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Refresh the elapsed play time; paused time does not count
    pub fn update(&mut self) {
        if self.paused_at.is_some() {
            return;
        }
        self.elapsed_time = self.start_time.elapsed().saturating_sub(self.paused_total);
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        self.update();
        self.paused_at.get_or_insert_with(Instant::now);
    }

    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    /// Count a finished game; returns true if it set a new high score
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.update();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            return true;
        }
        false
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
