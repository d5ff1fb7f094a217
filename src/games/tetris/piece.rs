use rand::Rng;
use ratatui::style::Color;

/// Number of precomputed rotation states per piece.
pub const ROTATIONS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Kind {
    pub fn all() -> &'static [Kind] {
        use Kind::*;
        &[I, J, L, O, S, T, Z]
    }

    pub fn random(rng: &mut impl Rng) -> Kind {
        let all = Kind::all();
        all[rng.gen_range(0..all.len())]
    }

    /// Spawn orientation, row by row.
    fn pattern(self) -> &'static [&'static [u8]] {
        use Kind::*;
        match self {
            I => &[&[1, 1, 1, 1]],
            J => &[&[1, 0, 0], &[1, 1, 1]],
            L => &[&[0, 0, 1], &[1, 1, 1]],
            O => &[&[1, 1], &[1, 1]],
            S => &[&[0, 1, 1], &[1, 1, 0]],
            T => &[&[0, 1, 0], &[1, 1, 1]],
            Z => &[&[1, 1, 0], &[0, 1, 1]],
        }
    }

    pub fn color(self) -> Color {
        use Kind::*;
        match self {
            I => Color::Rgb(135, 206, 250),
            J => Color::Rgb(100, 149, 237),
            L => Color::Rgb(255, 182, 193),
            O => Color::Rgb(255, 239, 128),
            S => Color::Rgb(144, 238, 144),
            T => Color::Rgb(216, 191, 216),
            Z => Color::Rgb(255, 160, 122),
        }
    }
}

/// A rectangular occupancy matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    fn from_pattern(pattern: &[&[u8]]) -> Self {
        Self {
            rows: pattern
                .iter()
                .map(|row| row.iter().map(|&c| c != 0).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Quarter turn clockwise: new row `i` is old column `i` read bottom-up.
    pub fn rotated_cw(&self) -> Shape {
        let h = self.height();
        let rows = (0..self.width())
            .map(|c| (0..h).rev().map(|r| self.rows[r][c]).collect())
            .collect();
        Shape { rows }
    }

    /// Occupied `(col, row)` offsets relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(c, _)| (c as i32, r as i32))
        })
    }
}

#[derive(Clone, Debug)]
pub struct Piece {
    pub kind: Kind,
    pub col: i32,
    pub row: i32,
    rotation: usize,
    rotations: Vec<Shape>,
}

impl Piece {
    pub fn new(kind: Kind, col: i32, row: i32) -> Self {
        let mut rotations = Vec::with_capacity(ROTATIONS);
        let mut shape = Shape::from_pattern(kind.pattern());
        for _ in 0..ROTATIONS {
            let next = shape.rotated_cw();
            rotations.push(shape);
            shape = next;
        }
        Self {
            kind,
            col,
            row,
            rotation: 0,
            rotations,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn shape(&self) -> &Shape {
        &self.rotations[self.rotation % self.rotations.len()]
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.rotations.len();
    }

    pub fn unrotate(&mut self) {
        let n = self.rotations.len();
        self.rotation = (self.rotation + n - 1) % n;
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> Vec<(i32, i32)> {
        self.shape()
            .cells()
            .map(|(dc, dr)| (self.col + dc, self.row + dr))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_four_cells_in_every_rotation() {
        for &kind in Kind::all() {
            let mut piece = Piece::new(kind, 0, 0);
            for _ in 0..ROTATIONS {
                assert_eq!(piece.cells().len(), 4, "{kind:?}");
                piece.rotate();
            }
        }
    }

    #[test]
    fn i_piece_rotates_to_vertical() {
        let mut piece = Piece::new(Kind::I, 3, 0);
        assert_eq!(piece.cells(), vec![(3, 0), (4, 0), (5, 0), (6, 0)]);
        piece.rotate();
        assert_eq!(piece.shape().width(), 1);
        assert_eq!(piece.cells(), vec![(3, 0), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn j_piece_turns_clockwise() {
        let mut piece = Piece::new(Kind::J, 0, 0);
        piece.rotate();
        // X X
        // X .
        // X .
        assert_eq!(piece.cells(), vec![(0, 0), (1, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn rotation_wraps_modulo_state_count() {
        let mut piece = Piece::new(Kind::T, 0, 0);
        let spawn = piece.cells();
        for _ in 0..ROTATIONS {
            piece.rotate();
        }
        assert_eq!(piece.rotation(), 0);
        assert_eq!(piece.cells(), spawn);

        piece.unrotate();
        assert_eq!(piece.rotation(), ROTATIONS - 1);
    }
}
