use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

use crate::config::{SnakeConfig, TetrisConfig};
use crate::games::snake::SnakeGame;
use crate::games::tetris::Tetris;
use crate::games::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Tetris,
    Snake,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Tetris, Tab::Snake]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Tetris => " Tetris ",
            Tab::Snake => " Snake ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Tetris => 1,
            Tab::Snake => 2,
        }
    }

    /// The game behind home tile `idx`.
    pub fn from_game_index(idx: usize) -> Tab {
        match idx {
            0 => Tab::Tetris,
            1 => Tab::Snake,
            _ => Tab::Home,
        }
    }
}

pub const GAME_COUNT: usize = 2;

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub tetris: Tetris,
    pub snake: SnakeGame,
}

impl App {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            tetris: Tetris::with_config(TetrisConfig {
                seed,
                ..TetrisConfig::default()
            }),
            snake: SnakeGame::with_config(SnakeConfig {
                seed: seed.map(|s| s.wrapping_add(1)),
                ..SnakeConfig::default()
            }),
        }
    }

    pub fn best_scores(&self) -> [u32; GAME_COUNT] {
        [self.tetris.best_score(), self.snake.best_score()]
    }

    fn active_game(&mut self) -> Option<&mut dyn Game> {
        match self.current_tab {
            Tab::Home => None,
            Tab::Tetris => Some(&mut self.tetris),
            Tab::Snake => Some(&mut self.snake),
        }
    }

    pub fn open(&mut self, tab: Tab) {
        if tab != self.current_tab {
            info!("switching to {}", tab.title().trim());
        }
        self.current_tab = tab;
    }

    pub fn on_tick(&mut self, dt: Duration) {
        if let Some(game) = self.active_game() {
            game.update(dt);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.open(Tab::Home);
                    return;
                }
            }
            _ => {}
        }

        if matches!(self.current_tab, Tab::Home) && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('1') => self.open(Tab::Tetris),
                KeyCode::Char('2') => self.open(Tab::Snake),
                KeyCode::Right | KeyCode::Down => {
                    self.selected_game = (self.selected_game + 1) % GAME_COUNT;
                }
                KeyCode::Left | KeyCode::Up => {
                    self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT;
                }
                KeyCode::Enter => self.open(Tab::from_game_index(self.selected_game)),
                _ => {}
            }
            return;
        }

        if let Some(game) = self.active_game() {
            game.handle_input(key);
            if game.quit_requested() {
                self.should_quit = true;
            }
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.open(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.open(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
