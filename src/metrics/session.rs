use std::time::{Duration, Instant};

/// Stats across the rounds of one program run
pub struct SessionStats {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    round_running: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            round_running: true,
        }
    }

    /// Refresh the round clock. The clock stops at game over.
    pub fn update(&mut self) {
        if self.round_running {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.round_running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
