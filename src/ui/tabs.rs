use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

const ACTIVE: Color = Color::Rgb(255, 220, 80);
const IDLE: Color = Color::Rgb(120, 120, 140);

fn tab_line(tab: Tab, app: &App) -> Line<'static> {
    let style = if tab == app.current_tab {
        Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(IDLE)
    };
    let mut spans = vec![Span::styled(tab.title().to_string(), style)];

    // Session best next to each game once it has one
    let best = match tab {
        Tab::Home => 0,
        Tab::Tetris => app.best_scores()[0],
        Tab::Snake => app.best_scores()[1],
    };
    if best > 0 {
        spans.push(Span::styled(
            format!("★{} ", best),
            Style::default().fg(Color::Rgb(255, 160, 122)),
        ));
    }
    Line::from(spans)
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|&t| tab_line(t, app)).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(100, 149, 237)))
                .title(" ▦ GridCade ")
                .title_style(Style::default().fg(Color::Rgb(144, 238, 144)).add_modifier(Modifier::BOLD)),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
