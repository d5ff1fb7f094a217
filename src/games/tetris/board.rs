use ratatui::style::Color;

use super::piece::Piece;

/// The locked stack. Row 0 is the top of the visible field.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Option<Color>>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: i32, row: i32) -> Option<Color> {
        if !self.in_bounds(col, row) {
            return None;
        }
        self.cells[row as usize][col as usize]
    }

    pub fn set(&mut self, col: i32, row: i32, color: Option<Color>) {
        if self.in_bounds(col, row) {
            self.cells[row as usize][col as usize] = color;
        }
    }

    pub fn rows(&self) -> &[Vec<Option<Color>>] {
        &self.cells
    }

    fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
    }

    /// True when every cell of `piece` is inside the side walls, above the
    /// floor, and not on a locked cell. Cells above row 0 are allowed.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().into_iter().all(|(col, row)| {
            if col < 0 || col as usize >= self.width || row >= self.height as i32 {
                return false;
            }
            row < 0 || self.cells[row as usize][col as usize].is_none()
        })
    }

    /// Commit `piece` into the stack. Returns false when part of the piece
    /// was still above the visible field and could not be stored.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let color = piece.color();
        let mut stored_all = true;
        for (col, row) in piece.cells() {
            if row < 0 {
                stored_all = false;
                continue;
            }
            self.set(col, row, Some(color));
        }
        stored_all
    }

    /// Remove every full row and drop the rows above it. Returns the indices
    /// the cleared rows had before compaction, top to bottom.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let full: Vec<usize> = (0..self.height)
            .filter(|&r| self.cells[r].iter().all(Option::is_some))
            .collect();
        if full.is_empty() {
            return full;
        }

        let mut write = self.height;
        for read in (0..self.height).rev() {
            if full.contains(&read) {
                continue;
            }
            write -= 1;
            if write != read {
                self.cells[write] = self.cells[read].clone();
            }
        }
        for row in &mut self.cells[..write] {
            row.fill(None);
        }
        full
    }

    /// Any locked cell in the top row means the stack has overflowed.
    pub fn top_row_occupied(&self) -> bool {
        self.cells
            .first()
            .is_some_and(|row| row.iter().any(Option::is_some))
    }

    /// Rows `piece` can still fall before it would collide.
    pub fn drop_distance(&self, piece: &Piece) -> i32 {
        let mut probe = piece.clone();
        let mut distance = 0;
        loop {
            probe.row += 1;
            if !self.fits(&probe) {
                return distance;
            }
            distance += 1;
        }
    }
}
