use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::ui::grid::centered;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Fresh game at level 1.
    Restart,
    /// New board and score, same level and speed.
    Continue,
    Quit,
}

/// Map a key pressed on the game-over screen to a menu choice.
pub fn menu_choice(key: &KeyEvent, allow_continue: bool) -> Option<MenuChoice> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(MenuChoice::Restart),
        KeyCode::Char('c') | KeyCode::Char('C') if allow_continue => Some(MenuChoice::Continue),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(MenuChoice::Quit),
        _ => None,
    }
}

pub fn render_game_over(
    frame: &mut Frame,
    area: Rect,
    stats: &[(&str, String)],
    allow_continue: bool,
) {
    let overlay_h = (stats.len() as u16 + 9).min(area.height);
    let overlay_area = centered(area, 34, overlay_h);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 80, 80)))
        .title(" 💀 GAME OVER ")
        .title_style(Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![Line::from("")];
    for (label, value) in stats {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", label), Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(value.clone(), Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
        ]));
    }
    lines.push(Line::from(""));

    let key_style = Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Rgb(140, 140, 140));
    lines.push(Line::from(vec![
        Span::styled("  R ", key_style),
        Span::styled("Restart", text_style),
    ]));
    if allow_continue {
        lines.push(Line::from(vec![
            Span::styled("  C ", key_style),
            Span::styled("Continue at this level", text_style),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("  Q ", key_style),
        Span::styled("Quit", text_style),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
