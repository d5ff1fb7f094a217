pub mod body;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::SnakeConfig;
use crate::games::menu::{self, MenuChoice, Phase};
use crate::games::Game;
use crate::ui::grid::{self, blend, block_cell, centered, empty_cell, field_size, framed_lines, rgb, FIELD_BG};

use body::{spawn_food, Direction, Pos, Snake, StepOutcome};

const PANEL_WIDTH: u16 = 22;
const HEAD_RGB: (u8, u8, u8) = (102, 255, 178);
const TAIL_RGB: (u8, u8, u8) = (0, 153, 102);
const HEAD_LATE_RGB: (u8, u8, u8) = (255, 255, 102);
const TAIL_LATE_RGB: (u8, u8, u8) = (102, 255, 255);
const FOOD_RGB: (u8, u8, u8) = (255, 102, 102);
const RIPPLE_RGB: (u8, u8, u8) = (255, 180, 180);

/// Expanding ring left behind where food was eaten.
#[derive(Clone, Debug)]
struct Ripple {
    center: Pos,
    moves_left: u32,
}

pub struct SnakeGame {
    cfg: SnakeConfig,
    rng: StdRng,
    snake: Snake,
    food: Pos,
    score: u32,
    high_score: u32,
    eaten: u32,
    level: u32,
    step_timer: Duration,
    phase: Phase,
    paused: bool,
    quit: bool,
    board_full: bool,
    ripples: Vec<Ripple>,
}

impl SnakeGame {
    pub fn with_config(cfg: SnakeConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake = start_snake(&cfg);
        let food = spawn_food(&mut rng, &snake, cfg.width, cfg.height).unwrap_or((0, 0));
        Self {
            cfg,
            rng,
            snake,
            food,
            score: 0,
            high_score: 0,
            eaten: 0,
            level: 1,
            step_timer: Duration::ZERO,
            phase: Phase::Playing,
            paused: false,
            quit: false,
            board_full: false,
            ripples: Vec::new(),
        }
    }

    fn speed(&self) -> u32 {
        self.cfg.speed(self.level)
    }

    /// Advance the snake by one cell.
    fn advance(&mut self) {
        for ripple in &mut self.ripples {
            ripple.moves_left = ripple.moves_left.saturating_sub(1);
        }
        self.ripples.retain(|r| r.moves_left > 0);

        match self.snake.step(self.food, self.cfg.width, self.cfg.height) {
            StepOutcome::Moved => {}
            StepOutcome::Collided => self.game_over(),
            StepOutcome::Ate => self.eat(),
        }
    }

    fn eat(&mut self) {
        self.score += 1;
        self.eaten += 1;
        self.ripples.push(Ripple {
            center: self.food,
            moves_left: self.cfg.ripple_moves,
        });
        if self.eaten % self.cfg.food_per_level.max(1) == 0 {
            self.level += 1;
            info!("snake: level {} ({} moves/s)", self.level, self.speed());
        }

        match spawn_food(&mut self.rng, &self.snake, self.cfg.width, self.cfg.height) {
            Some(food) => {
                debug!("snake: food at {:?}", food);
                self.food = food;
            }
            None => {
                warn!("snake: no free cell left for food");
                self.board_full = true;
                self.game_over();
            }
        }
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        info!(
            "snake: game over, score {} level {} length {}",
            self.score,
            self.level,
            self.snake.len()
        );
    }

    fn steer(&mut self, dir: Direction) {
        if !self.snake.turn(dir) {
            debug!("snake: refused turn {:?}", dir);
        }
    }

    fn body_color(&self, index: usize) -> Color {
        let shift = ((self.level.saturating_sub(1)) as f32 * 0.1).min(1.0);
        let head = blend(HEAD_RGB, HEAD_LATE_RGB, shift);
        let tail = blend(TAIL_RGB, TAIL_LATE_RGB, shift);
        rgb(blend(head, tail, index as f32 / self.snake.len() as f32))
    }

    fn render_field(&self) -> Vec<Line<'static>> {
        let (w, h) = (self.cfg.width, self.cfg.height);
        let mut cells: Vec<Vec<grid::Glyph>> = vec![vec![empty_cell(); w]; h];
        let mut paint = |(col, row): Pos, glyph: grid::Glyph| {
            if col >= 0 && row >= 0 && (col as usize) < w && (row as usize) < h {
                cells[row as usize][col as usize] = glyph;
            }
        };

        for ripple in &self.ripples {
            let age = self.cfg.ripple_moves - ripple.moves_left;
            let radius = 1 + (age * 2 / self.cfg.ripple_moves.max(1)) as i32;
            let fade = ripple.moves_left as f32 / self.cfg.ripple_moves.max(1) as f32;
            let style = Style::default()
                .fg(rgb(blend((10, 10, 20), RIPPLE_RGB, fade)))
                .bg(FIELD_BG);
            let (cx, cy) = ripple.center;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs().max(dy.abs()) == radius {
                        paint((cx + dx, cy + dy), ("░░", style));
                    }
                }
            }
        }

        paint(self.food, block_cell(rgb(FOOD_RGB)));
        for (i, &segment) in self.snake.segments().enumerate() {
            let color = self.body_color(i);
            let glyph = if i == 0 {
                ("██", Style::default().fg(color).bg(FIELD_BG).add_modifier(Modifier::BOLD))
            } else {
                ("▓▓", Style::default().fg(color).bg(FIELD_BG))
            };
            paint(segment, glyph);
        }

        framed_lines(cells)
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        let label = Style::default().fg(Color::Rgb(140, 140, 160));
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(" Score  ", label), Span::styled(self.score.to_string(), value)]),
            Line::from(vec![Span::styled(" Level  ", label), Span::styled(self.level.to_string(), value)]),
            Line::from(vec![Span::styled(" Speed  ", label), Span::styled(format!("{}/s", self.speed()), value)]),
            Line::from(vec![Span::styled(" Length ", label), Span::styled(self.snake.len().to_string(), value)]),
            Line::from(vec![
                Span::styled(" Best   ", label),
                Span::styled(self.high_score.to_string(), Style::default().fg(Color::Cyan)),
            ]),
        ];
        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
                .style(Style::default().bg(Color::Rgb(40, 40, 40))),
        );
        frame.render_widget(panel, area);
    }
}

fn start_snake(cfg: &SnakeConfig) -> Snake {
    let head = ((cfg.width / 2) as i32, (cfg.height / 2) as i32);
    Snake::new(head, cfg.start_len, Direction::Up)
}

impl Game for SnakeGame {
    fn update(&mut self, dt: Duration) {
        if self.phase != Phase::Playing || self.paused {
            return;
        }
        self.step_timer += dt;
        let interval = self.cfg.step_interval(self.level);
        if self.step_timer >= interval {
            self.step_timer -= interval;
            self.advance();
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if self.phase == Phase::GameOver {
            match menu::menu_choice(&key, false) {
                Some(MenuChoice::Restart) => self.reset(),
                Some(MenuChoice::Quit) => self.quit = true,
                Some(MenuChoice::Continue) | None => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.paused = !self.paused,
            _ if self.paused => {}
            KeyCode::Up => self.steer(Direction::Up),
            KeyCode::Down => self.steer(Direction::Down),
            KeyCode::Left => self.steer(Direction::Left),
            KeyCode::Right => self.steer(Direction::Right),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(0, 153, 102)))
            .title(" 🐍 Snake ")
            .title_style(Style::default().fg(Color::Rgb(102, 255, 178)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let (field_w, field_h) = field_size(self.cfg.width, self.cfg.height);
        let cabinet = centered(chunks[0], field_w + PANEL_WIDTH, field_h);
        let cols = Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([Constraint::Length(field_w), Constraint::Length(PANEL_WIDTH)])
            .split(cabinet);

        frame.render_widget(Paragraph::new(self.render_field()), cols[0]);
        self.render_panel(frame, cols[1]);

        let help = if self.paused {
            Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            let key = Style::default().fg(Color::Rgb(80, 200, 255));
            let text = Style::default().fg(Color::DarkGray);
            Line::from(vec![
                Span::styled(" ↑↓←→", key),
                Span::styled(" Steer ", text),
                Span::styled("P", key),
                Span::styled(" Pause ", text),
                Span::styled("R", key),
                Span::styled(" Restart ", text),
                Span::styled("Esc", key),
                Span::styled(" Menu", text),
            ])
        };
        frame.render_widget(Paragraph::new(help), chunks[1]);

        if self.phase == Phase::GameOver {
            let mut stats = vec![
                ("Score", self.score.to_string()),
                ("Level", self.level.to_string()),
                ("Length", self.snake.len().to_string()),
            ];
            if self.board_full {
                stats.push(("Result", "Board filled!".to_string()));
            }
            menu::render_game_over(frame, chunks[0], &stats, false);
        }
    }

    fn reset(&mut self) {
        info!("snake: restart");
        self.snake = start_snake(&self.cfg);
        self.food = spawn_food(&mut self.rng, &self.snake, self.cfg.width, self.cfg.height).unwrap_or((0, 0));
        self.score = 0;
        self.eaten = 0;
        self.level = 1;
        self.step_timer = Duration::ZERO;
        self.phase = Phase::Playing;
        self.paused = false;
        self.quit = false;
        self.board_full = false;
        self.ripples.clear();
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn best_score(&self) -> u32 {
        self.high_score.max(self.score)
    }

    fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    const STEP: Duration = Duration::from_millis(125);

    fn game() -> SnakeGame {
        SnakeGame::with_config(SnakeConfig {
            seed: Some(11),
            ..SnakeConfig::default()
        })
    }

    fn press(g: &mut SnakeGame, code: KeyCode) {
        g.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn body(g: &SnakeGame) -> Vec<Pos> {
        g.snake.segments().copied().collect()
    }

    #[test]
    fn starts_in_the_middle_heading_up() {
        let g = game();
        assert_eq!(body(&g), vec![(10, 10), (10, 11), (10, 12)]);
        assert!(!g.snake.contains(g.food));
    }

    #[test]
    fn moves_once_per_interval() {
        let mut g = game();
        g.food = (0, 0);
        g.update(Duration::from_millis(100));
        assert_eq!(g.snake.head(), (10, 10));
        g.update(Duration::from_millis(25));
        assert_eq!(g.snake.head(), (10, 9));
        assert_eq!(g.snake.len(), 3);
    }

    #[test]
    fn eating_grows_and_moves_the_food() {
        let mut g = game();
        g.food = (10, 9);
        g.update(STEP);
        assert_eq!(g.snake.len(), 4);
        assert_eq!(g.get_score(), 1);
        assert_ne!(g.food, (10, 9));
        assert!(!g.snake.contains(g.food));
        assert_eq!(g.ripples.len(), 1);
    }

    #[test]
    fn five_food_raise_level_and_speed() {
        let mut g = game();
        for i in 0..5 {
            g.food = (10, 9 - i);
            g.update(STEP);
        }
        assert_eq!(g.get_score(), 5);
        assert_eq!(g.level, 2);
        assert_eq!(g.speed(), 10);
        assert_eq!(g.snake.len(), 8);
    }

    #[test]
    fn hitting_the_wall_ends_the_game() {
        let mut g = game();
        g.food = (0, 19);
        for _ in 0..10 {
            g.update(STEP);
        }
        assert!(!g.is_game_over());
        assert_eq!(g.snake.head(), (10, 0));
        g.update(STEP);
        assert!(g.is_game_over());

        g.update(STEP);
        assert_eq!(g.snake.head(), (10, 0));
    }

    #[test]
    fn direct_reverse_is_ignored() {
        let mut g = game();
        g.food = (0, 0);
        press(&mut g, KeyCode::Down);
        g.update(STEP);
        assert_eq!(g.snake.head(), (10, 9));
    }

    #[test]
    fn game_over_menu_has_no_continue() {
        let mut g = game();
        g.game_over();
        press(&mut g, KeyCode::Char('c'));
        assert!(g.is_game_over());
        press(&mut g, KeyCode::Char('r'));
        assert!(!g.is_game_over());
        assert_eq!(body(&g), vec![(10, 10), (10, 11), (10, 12)]);

        g.game_over();
        press(&mut g, KeyCode::Char('q'));
        assert!(g.quit_requested());
    }

    #[test]
    fn filling_the_field_ends_the_game() {
        let mut g = SnakeGame::with_config(SnakeConfig {
            width: 2,
            height: 2,
            start_len: 2,
            seed: Some(5),
            ..SnakeConfig::default()
        });
        // the default start position does not fit a 2x2 field
        g.snake = Snake::from_segments(&[(0, 1), (0, 0), (1, 0)], Direction::Up);
        g.food = (1, 1);
        press(&mut g, KeyCode::Right);
        g.update(STEP);
        assert!(g.is_game_over());
        assert!(g.board_full);
        assert_eq!(g.snake.len(), 4);
    }

    #[test]
    fn ripples_fade_after_their_lifetime() {
        let mut g = game();
        g.food = (10, 9);
        g.update(STEP);
        g.food = (0, 0);
        press(&mut g, KeyCode::Left);
        for _ in 0..8 {
            g.update(STEP);
        }
        assert_eq!(g.ripples.len(), 1);
        press(&mut g, KeyCode::Down);
        for _ in 0..7 {
            g.update(STEP);
        }
        assert!(g.ripples.is_empty());
    }

    #[test]
    fn body_gradient_runs_head_to_tail() {
        let g = game();
        assert_eq!(g.body_color(0), rgb(HEAD_RGB));
        assert_ne!(g.body_color(2), rgb(HEAD_RGB));
    }
}
