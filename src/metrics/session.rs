use std::time::{Duration, Instant};

use crate::game::SimulationStatus;

/// Counters kept across restarts in the interactive view
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub games_won: u32,
    pub best_eaten: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            games_won: 0,
            best_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, status: SimulationStatus, eaten: u32) {
        self.games_played += 1;
        if status == SimulationStatus::Won {
            self.games_won += 1;
        }
        self.best_eaten = self.best_eaten.max(eaten);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = SessionMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_over_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_game_over(SimulationStatus::Lost, 7);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.games_won, 0);
        assert_eq!(metrics.best_eaten, 7);

        metrics.on_game_over(SimulationStatus::Lost, 3);
        assert_eq!(metrics.best_eaten, 7);

        metrics.on_game_over(SimulationStatus::Won, 20);
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.games_won, 1);
        assert_eq!(metrics.best_eaten, 20);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = SessionMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
