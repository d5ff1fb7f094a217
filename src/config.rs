//! Tuning constants for both games.
//!
//! The defaults are the values the games ship with. The structs exist so the
//! shell can inject a seed and tests can shrink boards or speed things up.

use std::time::Duration;

/// Length of one frame of the shell loop (~60 FPS).
pub const FRAME: Duration = Duration::from_millis(16);

pub const TETRIS_WIDTH: usize = 10;
pub const TETRIS_HEIGHT: usize = 20;

pub const SNAKE_WIDTH: usize = 20;
pub const SNAKE_HEIGHT: usize = 20;

/// Terminal columns per grid cell. Rows are one line each.
pub const CELL_COLS: u16 = 2;

#[derive(Clone, Debug)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,
    /// Fall interval at level 1, in milliseconds.
    pub drop_ms: u64,
    pub drop_step_ms: u64,
    pub min_drop_ms: u64,
    pub soft_drop_factor: u64,
    pub points_per_row: u32,
    pub rows_per_level: u32,
    pub level_up_banner: Duration,
    pub line_flash: Duration,
    pub combo_rows: usize,
    pub combo_banner: Duration,
    /// Crossterm only reports key presses, so a held Down key shows up as
    /// auto-repeat presses. Soft drop stays on this long after the last one.
    pub soft_drop_hold: Duration,
    pub drop_trail: Duration,
    pub seed: Option<u64>,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: TETRIS_WIDTH,
            height: TETRIS_HEIGHT,
            drop_ms: 500,
            drop_step_ms: 70,
            min_drop_ms: 20,
            soft_drop_factor: 8,
            points_per_row: 100,
            rows_per_level: 10,
            level_up_banner: Duration::from_millis(1500),
            line_flash: Duration::from_millis(200),
            combo_rows: 4,
            combo_banner: Duration::from_millis(1000),
            soft_drop_hold: Duration::from_millis(150),
            drop_trail: Duration::from_millis(150),
            seed: None,
        }
    }
}

impl TetrisConfig {
    /// Fall interval for `level`, floored at `min_drop_ms`.
    pub fn fall_ms(&self, level: u32) -> u64 {
        let step = u64::from(level.saturating_sub(1)) * self.drop_step_ms;
        self.drop_ms.saturating_sub(step).max(self.min_drop_ms)
    }

    pub fn soft_fall_ms(&self, level: u32) -> u64 {
        (self.fall_ms(level) / self.soft_drop_factor.max(1)).max(self.min_drop_ms)
    }
}

#[derive(Clone, Debug)]
pub struct SnakeConfig {
    pub width: usize,
    pub height: usize,
    pub start_len: usize,
    /// Moves per second at level 1.
    pub base_speed: u32,
    pub speed_step: u32,
    pub food_per_level: u32,
    /// Ripple lifetime, counted in moves.
    pub ripple_moves: u32,
    pub seed: Option<u64>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: SNAKE_WIDTH,
            height: SNAKE_HEIGHT,
            start_len: 3,
            base_speed: 8,
            speed_step: 2,
            food_per_level: 5,
            ripple_moves: 15,
            seed: None,
        }
    }
}

impl SnakeConfig {
    pub fn speed(&self, level: u32) -> u32 {
        self.base_speed + level.saturating_sub(1) * self.speed_step
    }

    pub fn step_interval(&self, level: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed(level).max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_speed_decreases_and_floors() {
        let cfg = TetrisConfig::default();
        assert_eq!(cfg.fall_ms(1), 500);
        assert_eq!(cfg.fall_ms(2), 430);
        assert_eq!(cfg.fall_ms(7), 80);
        assert_eq!(cfg.fall_ms(8), 20);
        assert_eq!(cfg.fall_ms(50), 20);
    }

    #[test]
    fn soft_drop_is_an_eighth_of_normal_speed() {
        let cfg = TetrisConfig::default();
        assert_eq!(cfg.soft_fall_ms(1), 62);
        assert_eq!(cfg.soft_fall_ms(6), 20);
    }

    #[test]
    fn snake_speed_grows_two_per_level() {
        let cfg = SnakeConfig::default();
        assert_eq!(cfg.speed(1), 8);
        assert_eq!(cfg.speed(3), 12);
        assert_eq!(cfg.step_interval(1), Duration::from_millis(125));
    }
}
