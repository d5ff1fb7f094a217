pub mod menu;
pub mod snake;
pub mod tetris;

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub trait Game {
    /// Advance the simulation by `dt` of wall-clock time.
    fn update(&mut self, dt: Duration);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    /// Best score reached this session, including the round in progress.
    fn best_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
    /// Set when the player picked Quit on the game-over screen.
    fn quit_requested(&self) -> bool;
}
