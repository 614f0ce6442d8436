use std::time::{Duration, Instant};

/// Per-session bookkeeping for interactive play
pub struct SessionMetrics {
    game_started: Instant,
    paused_for: Duration,
    paused_at: Option<Instant>,
    pub high_score: u32,
    pub games_played: u32,
    pub total_food: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            paused_for: Duration::ZERO,
            paused_at: None,
            high_score: 0,
            games_played: 0,
            total_food: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.paused_for = Duration::ZERO;
        self.paused_at = None;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.total_food += final_score;
        self.high_score = self.high_score.max(final_score);
    }

    /// Stop or resume the game clock
    pub fn set_paused(&mut self, paused: bool) {
        match (paused, self.paused_at) {
            (true, None) => self.paused_at = Some(Instant::now()),
            (false, Some(since)) => {
                self.paused_for += since.elapsed();
                self.paused_at = None;
            }
            _ => {}
        }
    }

    /// Time spent playing the current game, excluding pauses
    pub fn elapsed(&self) -> Duration {
        let paused = self.paused_for + self.paused_at.map_or(Duration::ZERO, |t| t.elapsed());
        self.game_started.elapsed().saturating_sub(paused)
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `mm:ss`, minutes are not wrapped into hours
pub fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_game_over(10);
        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.total_food, 30);
    }

    #[test]
    fn test_pause_stops_clock() {
        let mut metrics = SessionMetrics::new();
        metrics.set_paused(true);
        std::thread::sleep(Duration::from_millis(60));
        assert!(metrics.elapsed() < Duration::from_millis(50));

        metrics.set_paused(false);
        assert!(metrics.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = SessionMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        assert!(metrics.elapsed() >= Duration::from_millis(50));

        metrics.on_game_start();
        assert!(metrics.elapsed() < Duration::from_millis(50));
    }
}
