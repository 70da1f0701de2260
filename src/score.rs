//! Scoring and level progression

use std::time::Duration;

/// Points per cleared line, multiplied by the level
pub const LINE_CLEAR_POINTS: u64 = 100;
/// Points per row travelled by a soft drop
pub const SOFT_DROP_POINTS: u64 = 1;
/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS: u64 = 2;
/// Score needed per level to advance (level N advances at N * 500)
pub const LEVEL_THRESHOLD: u64 = 500;

pub const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(1000);
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(50);
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(50);

/// Points for clearing `lines` lines at `level`
pub fn line_clear_points(lines: u32, level: u32) -> u64 {
    lines as u64 * LINE_CLEAR_POINTS * level as u64
}

/// Score, level and gravity speed for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starts at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Time between gravity ticks
    pub drop_interval: Duration,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            drop_interval: INITIAL_DROP_INTERVAL,
        }
    }

    /// Award points for a line clear, then advance at most one level if the
    /// score has reached the current level's threshold.
    /// Returns true if the level went up (and the drop interval changed).
    pub fn apply_line_clear(&mut self, lines: u32) -> bool {
        if lines == 0 {
            return false;
        }

        self.lines += lines;
        self.points += line_clear_points(lines, self.level);

        if self.points >= self.level as u64 * LEVEL_THRESHOLD {
            self.level += 1;
            self.drop_interval = self
                .drop_interval
                .saturating_sub(DROP_INTERVAL_STEP)
                .max(MIN_DROP_INTERVAL);
            return true;
        }
        false
    }

    /// Add score for soft drop (1 point per cell)
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.points += cells as u64 * SOFT_DROP_POINTS;
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * HARD_DROP_POINTS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(2, 1), 200);
        assert_eq!(line_clear_points(1, 3), 300);
        assert_eq!(line_clear_points(0, 7), 0);
    }

    #[test]
    fn test_double_at_level_one() {
        let mut score = Score::new();
        assert!(!score.apply_line_clear(2));
        assert_eq!(score.points, 200);
        assert_eq!(score.lines, 2);
        assert_eq!(score.level, 1);
    }

    #[test]
    fn test_single_at_level_three() {
        let mut score = Score::new();
        score.level = 3;
        score.points = 1200;
        score.apply_line_clear(1);
        assert_eq!(score.points, 1500);
    }

    #[test]
    fn test_level_progression() {
        let mut score = Score::new();
        assert_eq!(score.drop_interval, Duration::from_millis(1000));

        // 400 + 100 = 500 reaches the level 1 threshold
        score.add_hard_drop(200);
        assert!(score.apply_line_clear(1));
        assert_eq!(score.level, 2);
        assert_eq!(score.drop_interval, Duration::from_millis(950));

        // level 2 threshold is 1000
        assert!(!score.apply_line_clear(1));
        assert_eq!(score.points, 700);
        assert!(score.apply_line_clear(2));
        assert_eq!(score.points, 1100);
        assert_eq!(score.level, 3);
        assert_eq!(score.drop_interval, Duration::from_millis(900));
    }

    #[test]
    fn test_one_level_per_clear() {
        let mut score = Score::new();
        score.points = 5000;
        assert!(score.apply_line_clear(1));
        assert_eq!(score.level, 2);
    }

    #[test]
    fn test_drop_interval_floor() {
        let mut score = Score::new();
        for _ in 0..40 {
            score.points = score.level as u64 * LEVEL_THRESHOLD;
            assert!(score.apply_line_clear(1));
            assert!(score.drop_interval >= MIN_DROP_INTERVAL);
        }
        assert_eq!(score.level, 41);
        assert_eq!(score.drop_interval, MIN_DROP_INTERVAL);
    }

    #[test]
    fn test_drop_awards() {
        let mut score = Score::new();
        score.add_soft_drop(3);
        score.add_hard_drop(10);
        assert_eq!(score.points, 23);
        assert_eq!(score.level, 1);
    }
}
