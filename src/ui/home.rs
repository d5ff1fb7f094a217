use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::GAME_COUNT;

const BANNER: &str = r#"
  ██████╗ ██████╗ ██╗██████╗  ██████╗ █████╗ ██████╗ ███████╗
 ██╔════╝ ██╔══██╗██║██╔══██╗██╔════╝██╔══██╗██╔══██╗██╔════╝
 ██║  ███╗██████╔╝██║██║  ██║██║     ███████║██║  ██║█████╗
 ██║   ██║██╔══██╗██║██║  ██║██║     ██╔══██║██║  ██║██╔══╝
 ╚██████╔╝██║  ██║██║██████╔╝╚██████╗██║  ██║██████╔╝███████╗
  ╚═════╝ ╚═╝  ╚═╝╚═╝╚═════╝  ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
    controls: &'static [(&'static str, &'static str)],
}

const GAME_TILES: [GameTile; GAME_COUNT] = [
    GameTile {
        key: "1",
        icon: "🧩",
        name: "Tetris",
        desc: "Stack falling pieces\nand clear full rows!",
        color: Color::Rgb(135, 206, 250),
        border_color: Color::Rgb(60, 90, 140),
        controls: &[
            ("← / →", "Move piece"),
            ("↑", "Rotate"),
            ("↓", "Soft drop"),
            ("Space", "Hard drop"),
            ("P / R", "Pause / Restart"),
            ("C", "Continue after game over"),
        ],
    },
    GameTile {
        key: "2",
        icon: "🐍",
        name: "Snake",
        desc: "Eat, grow, and don't\nbite yourself!",
        color: Color::Rgb(102, 255, 178),
        border_color: Color::Rgb(0, 110, 70),
        controls: &[
            ("↑ ↓ ← →", "Steer"),
            ("P", "Pause"),
            ("R", "Restart"),
        ],
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool, best: u32) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];

    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };
    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(desc_line, Style::default().fg(desc_color))));
    }

    lines.push(Line::from(""));
    let best_text = if best > 0 { format!("Best this session: {}", best) } else { "No score yet".to_string() };
    lines.push(Line::from(Span::styled(best_text, Style::default().fg(Color::Rgb(255, 160, 122)))));

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn control_lines(tile: &GameTile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", tile.icon, tile.name),
            Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (keys, action) in tile.controls {
        lines.push(Line::from(vec![
            Span::styled(format!("    {:<16}", keys), Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(*action, Style::default().fg(Color::Rgb(140, 140, 140))),
        ]));
    }
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, best: &[u32; GAME_COUNT]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Banner
            Constraint::Length(9),  // Tiles
            Constraint::Min(6),     // Controls
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(100, 149, 237)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let tile_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[1]);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, tile_cols[i], tile, selected_game == i, best[i]);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    let key_style = Style::default().fg(Color::Rgb(80, 200, 255));
    let text_style = Style::default().fg(Color::Rgb(140, 140, 140));
    let nav = [
        ("Tab / Shift+Tab", "Switch tabs"),
        ("1-2", "Launch game"),
        ("← →", "Select game"),
        ("Enter", "Play selected"),
        ("Esc", "Return to Home"),
        ("q / Ctrl+C", "Quit"),
    ];
    let mut nav_lines = vec![Line::from("")];
    nav_lines.extend(nav.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(format!("    {:<17}", keys), key_style),
            Span::styled(*action, text_style),
        ])
    }));
    let controls = Paragraph::new(nav_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_COUNT - 1)];
    let game_ctrl = Paragraph::new(control_lines(tile)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(tile.border_color))
            .title(format!(" 🎮 {} Controls ", tile.name))
            .title_style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("Scores are kept for this session only", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}
