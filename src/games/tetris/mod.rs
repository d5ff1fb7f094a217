pub mod board;
pub mod piece;

use std::mem;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::TetrisConfig;
use crate::games::menu::{self, MenuChoice, Phase};
use crate::games::Game;
use crate::ui::grid::{self, block_cell, centered, empty_cell, field_size, framed_lines, FIELD_BG};

use board::Board;
use piece::{Kind, Piece};

const PANEL_WIDTH: u16 = 22;
const COMBO_GOLD: Color = Color::Rgb(255, 215, 0);

/// Rows that were just cleared, shown for a moment before play resumes.
struct LineFlash {
    rows: Vec<usize>,
    remaining: Duration,
    combo: bool,
}

/// Cells a hard-dropped piece passed through.
struct DropTrail {
    cells: Vec<(i32, i32)>,
    remaining: Duration,
}

pub struct Tetris {
    cfg: TetrisConfig,
    rng: StdRng,
    board: Board,
    current: Piece,
    next: Piece,
    score: u32,
    high_score: u32,
    lines: u32,
    start_level: u32,
    level: u32,
    fall_ms: u64,
    fall_timer: Duration,
    soft_drop: Duration,
    phase: Phase,
    paused: bool,
    quit: bool,
    level_banner: Duration,
    combo_banner: Duration,
    flash: Option<LineFlash>,
    trail: Option<DropTrail>,
}

impl Tetris {
    pub fn with_config(cfg: TetrisConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::new(cfg.width, cfg.height);
        let current = spawn_piece(&cfg, &mut rng);
        let next = spawn_piece(&cfg, &mut rng);
        let fall_ms = cfg.fall_ms(1);
        Self {
            cfg,
            rng,
            board,
            current,
            next,
            score: 0,
            high_score: 0,
            lines: 0,
            start_level: 1,
            level: 1,
            fall_ms,
            fall_timer: Duration::ZERO,
            soft_drop: Duration::ZERO,
            phase: Phase::Playing,
            paused: false,
            quit: false,
            level_banner: Duration::ZERO,
            combo_banner: Duration::ZERO,
            flash: None,
            trail: None,
        }
    }

    /// Start a new round at `level`. Score, lines and board always reset.
    fn start(&mut self, level: u32, fall_ms: u64) {
        self.board = Board::new(self.cfg.width, self.cfg.height);
        self.current = spawn_piece(&self.cfg, &mut self.rng);
        self.next = spawn_piece(&self.cfg, &mut self.rng);
        self.score = 0;
        self.lines = 0;
        self.start_level = level;
        self.level = level;
        self.fall_ms = fall_ms;
        self.fall_timer = Duration::ZERO;
        self.soft_drop = Duration::ZERO;
        self.phase = Phase::Playing;
        self.paused = false;
        self.level_banner = Duration::ZERO;
        self.combo_banner = Duration::ZERO;
        self.flash = None;
        self.trail = None;
    }

    /// Keep level and fall speed from the round that just ended.
    pub fn continue_game(&mut self) {
        info!("tetris: continuing at level {} ({} ms)", self.level, self.fall_ms);
        self.start(self.level, self.fall_ms);
    }

    /// Effects that hold the simulation still while they play.
    fn frozen(&self) -> bool {
        self.flash.is_some() || !self.combo_banner.is_zero()
    }

    fn fall_interval(&self) -> Duration {
        let ms = if self.soft_drop.is_zero() {
            self.fall_ms
        } else {
            self.cfg.soft_fall_ms(self.level)
        };
        Duration::from_millis(ms)
    }

    fn shift(&mut self, dx: i32) {
        self.current.col += dx;
        if !self.board.fits(&self.current) {
            self.current.col -= dx;
        }
    }

    fn rotate(&mut self) {
        self.current.rotate();
        if !self.board.fits(&self.current) {
            self.current.unrotate();
        }
    }

    /// Move the piece down one row, locking it if it cannot move.
    fn fall(&mut self) {
        self.current.row += 1;
        if !self.board.fits(&self.current) {
            self.current.row -= 1;
            self.lock_current();
        }
    }

    fn soft_drop(&mut self) {
        self.soft_drop = self.cfg.soft_drop_hold;
        self.fall_timer = Duration::ZERO;
        self.fall();
    }

    fn hard_drop(&mut self) {
        let distance = self.board.drop_distance(&self.current);
        let mut probe = self.current.clone();
        let mut cells = Vec::new();
        for _ in 0..distance {
            cells.extend(probe.cells().into_iter().filter(|&(_, row)| row >= 0));
            probe.row += 1;
        }
        self.current = probe;
        self.trail = Some(DropTrail {
            cells,
            remaining: self.cfg.drop_trail,
        });
        self.fall_timer = Duration::ZERO;
        self.lock_current();
    }

    fn lock_current(&mut self) {
        let stored = self.board.lock(&self.current);
        let incoming = spawn_piece(&self.cfg, &mut self.rng);
        let locked = mem::replace(&mut self.current, mem::replace(&mut self.next, incoming));
        debug!(
            "tetris: locked {:?} rotation {} at ({}, {})",
            locked.kind,
            locked.rotation(),
            locked.col,
            locked.row
        );

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            debug!("tetris: cleared rows {:?}", cleared);
            self.record_clear(cleared.len());
            self.flash = Some(LineFlash {
                combo: cleared.len() >= self.cfg.combo_rows,
                rows: cleared,
                remaining: self.cfg.line_flash,
            });
        }

        if !stored || self.board.top_row_occupied() {
            self.game_over();
        }
    }

    /// Score `rows` cleared rows. Returns true when the level went up.
    fn record_clear(&mut self, rows: usize) -> bool {
        let rows = rows as u32;
        self.score += rows * self.cfg.points_per_row * self.level;
        self.lines += rows;

        let reached = self.start_level + self.lines / self.cfg.rows_per_level.max(1);
        if reached <= self.level {
            return false;
        }
        self.level = reached;
        self.fall_ms = self.cfg.fall_ms(self.level);
        self.level_banner = self.cfg.level_up_banner;
        info!("tetris: level {} ({} ms per row)", self.level, self.fall_ms);
        true
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.flash = None;
        self.combo_banner = Duration::ZERO;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        info!(
            "tetris: game over, score {} level {} lines {}",
            self.score, self.level, self.lines
        );
    }

    fn advance_effects(&mut self, dt: Duration) {
        self.level_banner = self.level_banner.saturating_sub(dt);
        if let Some(trail) = &mut self.trail {
            trail.remaining = trail.remaining.saturating_sub(dt);
            if trail.remaining.is_zero() {
                self.trail = None;
            }
        }
    }

    fn render_board(&self) -> Vec<Line<'static>> {
        let mut cells: Vec<Vec<grid::Glyph>> = self
            .board
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or_else(empty_cell, block_cell))
                    .collect()
            })
            .collect();

        let width = self.board.width() as i32;
        let height = self.board.height() as i32;
        let mut paint = |col: i32, row: i32, glyph: grid::Glyph| {
            if (0..width).contains(&col) && (0..height).contains(&row) {
                cells[row as usize][col as usize] = glyph;
            }
        };

        if let Some(trail) = &self.trail {
            let style = Style::default().fg(Color::Rgb(200, 200, 220)).bg(FIELD_BG);
            for &(col, row) in &trail.cells {
                if self.board.get(col, row).is_none() {
                    paint(col, row, ("░░", style));
                }
            }
        }

        if self.phase == Phase::Playing {
            for (col, row) in self.current.cells() {
                paint(col, row, block_cell(self.current.color()));
            }
        }

        if let Some(flash) = &self.flash {
            let color = if flash.combo { COMBO_GOLD } else { Color::White };
            for &row in &flash.rows {
                for col in 0..width {
                    paint(col, row as i32, block_cell(color));
                }
            }
        }

        framed_lines(cells)
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        let label = Style::default().fg(Color::Rgb(140, 140, 160));
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(" Score  ", label), Span::styled(self.score.to_string(), value)]),
            Line::from(vec![Span::styled(" Level  ", label), Span::styled(self.level.to_string(), value)]),
            Line::from(vec![Span::styled(" Speed  ", label), Span::styled(format!("{} ms", self.fall_ms), value)]),
            Line::from(vec![Span::styled(" Lines  ", label), Span::styled(self.lines.to_string(), value)]),
            Line::from(vec![
                Span::styled(" Best   ", label),
                Span::styled(self.high_score.to_string(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(Span::styled(" Next:", label)),
            Line::from(""),
        ];

        let shape = self.next.shape();
        let mut preview = vec![vec![false; shape.width()]; shape.height()];
        for (c, r) in shape.cells() {
            preview[r as usize][c as usize] = true;
        }
        let color = self.next.color();
        for row in preview {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(row.into_iter().map(|filled| {
                if filled {
                    Span::styled("██", Style::default().fg(color))
                } else {
                    Span::raw("  ")
                }
            }));
            lines.push(Line::from(spans));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(60, 60, 80))),
        );
        frame.render_widget(panel, area);
    }

    fn render_banner(frame: &mut Frame, field: Rect, row: u16, text: &str, color: Color) {
        if row >= field.height {
            return;
        }
        let area = Rect::new(field.x, field.y + row, field.width, 1);
        let banner = Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color).bg(FIELD_BG).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(banner, area);
    }
}

fn spawn_piece(cfg: &TetrisConfig, rng: &mut StdRng) -> Piece {
    let kind = Kind::random(rng);
    Piece::new(kind, cfg.width as i32 / 2 - 2, 0)
}

impl Game for Tetris {
    fn update(&mut self, dt: Duration) {
        if self.phase != Phase::Playing || self.paused {
            return;
        }
        self.advance_effects(dt);

        if let Some(flash) = &mut self.flash {
            flash.remaining = flash.remaining.saturating_sub(dt);
            if flash.remaining.is_zero() {
                if flash.combo {
                    self.combo_banner = self.cfg.combo_banner;
                }
                self.flash = None;
            }
            return;
        }
        if !self.combo_banner.is_zero() {
            self.combo_banner = self.combo_banner.saturating_sub(dt);
            return;
        }

        self.soft_drop = self.soft_drop.saturating_sub(dt);
        self.fall_timer += dt;
        if self.fall_timer >= self.fall_interval() {
            self.fall_timer = Duration::ZERO;
            self.fall();
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if self.phase == Phase::GameOver {
            match menu::menu_choice(&key, true) {
                Some(MenuChoice::Restart) => self.reset(),
                Some(MenuChoice::Continue) => self.continue_game(),
                Some(MenuChoice::Quit) => self.quit = true,
                None => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.paused = !self.paused,
            _ if self.paused || self.frozen() => {}
            KeyCode::Left => self.shift(-1),
            KeyCode::Right => self.shift(1),
            KeyCode::Up => self.rotate(),
            KeyCode::Down => self.soft_drop(),
            KeyCode::Char(' ') => self.hard_drop(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(100, 149, 237)))
            .title(" 🧩 Tetris ")
            .title_style(Style::default().fg(Color::Rgb(135, 206, 250)).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let (field_w, field_h) = field_size(self.board.width(), self.board.height());
        let cabinet = centered(chunks[0], field_w + PANEL_WIDTH, field_h);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(field_w), Constraint::Length(PANEL_WIDTH)])
            .split(cabinet);

        frame.render_widget(Paragraph::new(self.render_board()), cols[0]);
        self.render_panel(frame, cols[1]);

        let playfield = Rect::new(
            cols[0].x + 1,
            cols[0].y + 1,
            cols[0].width.saturating_sub(2),
            cols[0].height.saturating_sub(2),
        );
        if !self.level_banner.is_zero() {
            Self::render_banner(frame, playfield, playfield.height / 4, "LEVEL UP!", Color::White);
        }
        if !self.combo_banner.is_zero() {
            Self::render_banner(frame, playfield, playfield.height / 2, "COMBO! Well done!", COMBO_GOLD);
        }

        let help = if self.paused {
            Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            let key = Style::default().fg(Color::Rgb(80, 200, 255));
            let text = Style::default().fg(Color::DarkGray);
            Line::from(vec![
                Span::styled(" ←→", key),
                Span::styled(" Move ", text),
                Span::styled("↑", key),
                Span::styled(" Rotate ", text),
                Span::styled("↓", key),
                Span::styled(" Soft drop ", text),
                Span::styled("Space", key),
                Span::styled(" Hard drop ", text),
                Span::styled("P", key),
                Span::styled(" Pause ", text),
                Span::styled("Esc", key),
                Span::styled(" Menu", text),
            ])
        };
        frame.render_widget(Paragraph::new(help), chunks[1]);

        if self.phase == Phase::GameOver {
            let stats = [
                ("Score", self.score.to_string()),
                ("Level", self.level.to_string()),
                ("Speed", format!("{} ms", self.fall_ms)),
            ];
            menu::render_game_over(frame, chunks[0], &stats, true);
        }
    }

    fn reset(&mut self) {
        info!("tetris: restart");
        let fall_ms = self.cfg.fall_ms(1);
        self.start(1, fall_ms);
        self.quit = false;
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

    const FRAME: Duration = Duration::from_millis(16);

    fn game() -> Tetris {
        Tetris::with_config(TetrisConfig {
            seed: Some(7),
            ..TetrisConfig::default()
        })
    }

    fn press(t: &mut Tetris, code: KeyCode) {
        t.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn fill_row_except(board: &mut Board, row: i32, hole: Option<i32>) {
        for col in 0..board.width() as i32 {
            if Some(col) != hole {
                board.set(col, row, Some(Color::Rgb(90, 90, 90)));
            }
        }
    }

    /// Run frames until the current flash and combo banner are gone.
    fn settle(t: &mut Tetris) {
        for _ in 0..200 {
            if !t.frozen() {
                return;
            }
            t.update(FRAME);
        }
    }

    #[test]
    fn pieces_spawn_at_top_center() {
        let t = game();
        assert_eq!(t.current.col, 3);
        assert_eq!(t.current.row, 0);
        assert_eq!(t.fall_ms, 500);
    }

    #[test]
    fn gravity_moves_one_row_per_interval() {
        let mut t = game();
        t.update(Duration::from_millis(499));
        assert_eq!(t.current.row, 0);
        t.update(Duration::from_millis(1));
        assert_eq!(t.current.row, 1);
    }

    #[test]
    fn blocked_moves_are_reverted() {
        let mut t = game();
        for _ in 0..20 {
            press(&mut t, KeyCode::Left);
        }
        let min_col = t.current.cells().iter().map(|c| c.0).min();
        assert_eq!(min_col, Some(0));
        let col = t.current.col;
        press(&mut t, KeyCode::Left);
        assert_eq!(t.current.col, col);
    }

    #[test]
    fn rotation_against_the_stack_is_reverted() {
        let mut t = game();
        t.current = Piece::new(Kind::I, 0, 18);
        fill_row_except(&mut t.board, 19, Some(9));
        press(&mut t, KeyCode::Up);
        assert_eq!(t.current.rotation(), 0);
    }

    #[test]
    fn hard_drop_locks_at_the_floor() {
        let mut t = game();
        t.current = Piece::new(Kind::O, 0, 0);
        press(&mut t, KeyCode::Char(' '));
        assert!(t.board.get(0, 19).is_some());
        assert!(t.board.get(1, 18).is_some());
        assert_eq!(t.current.row, 0);
        assert!(t.trail.is_some());
    }

    #[test]
    fn soft_drop_steps_and_speeds_up_gravity() {
        let mut t = game();
        press(&mut t, KeyCode::Down);
        assert_eq!(t.current.row, 1);
        assert_eq!(t.fall_interval(), Duration::from_millis(62));
        t.update(Duration::from_millis(200));
        assert_eq!(t.fall_interval(), Duration::from_millis(500));
    }

    #[test]
    fn filling_the_gap_in_the_bottom_row_scores_one_row() {
        let mut t = game();
        fill_row_except(&mut t.board, 19, Some(5));
        t.current = Piece::new(Kind::I, 5, 0);
        t.current.rotate();
        press(&mut t, KeyCode::Char(' '));

        assert_eq!(t.get_score(), 100);
        assert_eq!(t.lines, 1);
        // the vertical I left three cells above the cleared row
        assert!(t.board.get(5, 19).is_some());
        assert!(t.board.get(5, 17).is_some());
        assert!(t.board.get(4, 19).is_none());
        assert!(t.frozen());
        assert_eq!(t.phase, Phase::Playing);
    }

    #[test]
    fn simulation_waits_for_the_flash() {
        let mut t = game();
        t.record_clear(1);
        t.flash = Some(LineFlash {
            rows: vec![19],
            remaining: Duration::from_millis(200),
            combo: false,
        });
        let row = t.current.row;
        t.update(Duration::from_millis(150));
        press(&mut t, KeyCode::Down);
        assert_eq!(t.current.row, row);
        t.update(Duration::from_millis(60));
        assert!(!t.frozen());
    }

    #[test]
    fn four_rows_trigger_the_combo_banner() {
        let mut t = game();
        for row in 16..20 {
            fill_row_except(&mut t.board, row, Some(0));
        }
        t.current = Piece::new(Kind::I, 0, 0);
        t.current.rotate();
        press(&mut t, KeyCode::Char(' '));

        assert_eq!(t.lines, 4);
        assert_eq!(t.get_score(), 400);
        assert!(t.flash.as_ref().is_some_and(|f| f.combo));
        t.update(Duration::from_millis(200));
        assert!(!t.combo_banner.is_zero());
        settle(&mut t);
        assert!(t.board.rows().iter().flatten().all(Option::is_none));
    }

    #[test]
    fn ten_rows_raise_the_level_and_speed() {
        let mut t = game();
        for _ in 0..9 {
            assert!(!t.record_clear(1));
        }
        assert_eq!(t.level, 1);
        assert!(t.record_clear(1));
        assert_eq!(t.level, 2);
        assert_eq!(t.fall_ms, 430);
        assert!(!t.level_banner.is_zero());

        // scoring uses the new level
        t.record_clear(2);
        assert_eq!(t.get_score(), 1000 + 400);
    }

    #[test]
    fn stacking_into_the_top_row_ends_the_game() {
        let mut t = game();
        for row in 1..20 {
            t.board.set(0, row, Some(Color::Red));
        }
        t.current = Piece::new(Kind::O, 0, -1);
        t.lock_current();
        assert!(t.is_game_over());
        assert_eq!(t.best_score(), 0);
    }

    #[test]
    fn continue_keeps_level_and_speed_but_not_score() {
        let mut t = game();
        for _ in 0..3 {
            t.record_clear(4);
            t.record_clear(4);
            t.record_clear(2);
        }
        assert_eq!(t.level, 4);
        let score = t.get_score();
        t.game_over();

        press(&mut t, KeyCode::Char('c'));
        assert_eq!(t.phase, Phase::Playing);
        assert_eq!(t.level, 4);
        assert_eq!(t.fall_ms, 290);
        assert_eq!(t.get_score(), 0);
        assert_eq!(t.best_score(), score);
        assert!(t.board.rows().iter().flatten().all(Option::is_none));

        // ten more rows from here still advance exactly one level
        t.record_clear(4);
        t.record_clear(4);
        t.record_clear(2);
        assert_eq!(t.level, 5);
    }

    #[test]
    fn restart_and_quit_from_game_over() {
        let mut t = game();
        t.record_clear(4);
        t.record_clear(4);
        t.record_clear(2);
        t.game_over();
        press(&mut t, KeyCode::Char('r'));
        assert_eq!(t.level, 1);
        assert_eq!(t.fall_ms, 500);

        t.game_over();
        press(&mut t, KeyCode::Char('q'));
        assert!(t.quit_requested());
    }

    #[test]
    fn pause_stops_gravity() {
        let mut t = game();
        press(&mut t, KeyCode::Char('p'));
        t.update(Duration::from_secs(2));
        assert_eq!(t.current.row, 0);
        press(&mut t, KeyCode::Char('p'));
        t.update(Duration::from_millis(500));
        assert_eq!(t.current.row, 1);
    }

    #[test]
    fn same_seed_same_pieces() {
        let a = game();
        let b = game();
        assert_eq!(a.current.kind, b.current.kind);
        assert_eq!(a.next.kind, b.next.kind);
    }
}
