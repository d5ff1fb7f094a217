use ratatui::prelude::*;

use crate::config::CELL_COLS;

pub const FIELD_BG: Color = Color::Rgb(10, 10, 20);
pub const FRAME_FG: Color = Color::Rgb(180, 180, 180);

/// One rendered grid cell: a glyph pair plus its style.
pub type Glyph = (&'static str, Style);

pub fn empty_cell() -> Glyph {
    (" ·", Style::default().fg(Color::Rgb(40, 40, 55)).bg(FIELD_BG))
}

pub fn block_cell(color: Color) -> Glyph {
    ("██", Style::default().fg(color).bg(FIELD_BG))
}

/// Rect of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Terminal size of a framed grid of `cols` x `rows` cells.
pub fn field_size(cols: usize, rows: usize) -> (u16, u16) {
    (cols as u16 * CELL_COLS + 2, rows as u16 + 2)
}

/// Turn a cell grid into lines wrapped in a thin frame.
pub fn framed_lines(grid: Vec<Vec<Glyph>>) -> Vec<Line<'static>> {
    let frame_style = Style::default().fg(FRAME_FG).bg(FIELD_BG);
    let width = grid.first().map_or(0, Vec::len) * CELL_COLS as usize;

    let mut lines = Vec::with_capacity(grid.len() + 2);
    lines.push(Line::from(Span::styled(format!("┌{}┐", "─".repeat(width)), frame_style)));
    for row in grid {
        let mut spans = Vec::with_capacity(row.len() + 2);
        spans.push(Span::styled("│", frame_style));
        spans.extend(row.into_iter().map(|(text, style)| Span::styled(text, style)));
        spans.push(Span::styled("│", frame_style));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(format!("└{}┘", "─".repeat(width)), frame_style)));
    lines
}

/// Linear blend between two RGB colors, `t` in `0.0..=1.0`.
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(2, 3, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(5, 4, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.0), (0, 0, 0));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 1.0), (200, 100, 50));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }

    #[test]
    fn frame_wraps_every_row() {
        let lines = framed_lines(vec![vec![empty_cell(); 3]; 2]);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].width(), 8);
        assert_eq!(lines[1].width(), 8);
    }
}
