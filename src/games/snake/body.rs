use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

/// Grid position as `(col, row)`.
pub type Pos = (i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Head landed on the food; the tail was kept.
    Ate,
    /// Head would leave the field or hit the body. Nothing moved.
    Collided,
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Pos>,
    /// Direction of the last step taken.
    heading: Direction,
    /// Direction the next step will take.
    pending: Direction,
}

impl Snake {
    /// A straight snake of `len` segments with the tail trailing behind `head`.
    pub fn new(head: Pos, len: usize, heading: Direction) -> Self {
        let (dx, dy) = heading.opposite().delta();
        let body = (0..len.max(1) as i32)
            .map(|i| (head.0 + dx * i, head.1 + dy * i))
            .collect();
        Self {
            body,
            heading,
            pending: heading,
        }
    }

    #[cfg(test)]
    pub fn from_segments(segments: &[Pos], heading: Direction) -> Self {
        Self {
            body: segments.iter().copied().collect(),
            heading,
            pending: heading,
        }
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Pos> {
        self.body.iter()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a direction for the next step. Turning back onto the neck is
    /// refused.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.heading.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    pub fn step(&mut self, food: Pos, width: usize, height: usize) -> StepOutcome {
        let (dx, dy) = self.pending.delta();
        let (col, row) = self.head();
        let next = (col + dx, row + dy);

        let inside = next.0 >= 0 && next.1 >= 0 && (next.0 as usize) < width && (next.1 as usize) < height;
        if !inside || self.contains(next) {
            return StepOutcome::Collided;
        }

        self.body.push_front(next);
        self.heading = self.pending;
        if next == food {
            StepOutcome::Ate
        } else {
            self.body.pop_back();
            StepOutcome::Moved
        }
    }
}

/// Pick a free cell uniformly at random, or `None` when the snake fills the
/// whole field.
pub fn spawn_food(rng: &mut impl Rng, snake: &Snake, width: usize, height: usize) -> Option<Pos> {
    let free: Vec<Pos> = (0..height as i32)
        .flat_map(|row| (0..width as i32).map(move |col| (col, row)))
        .filter(|&pos| !snake.contains(pos))
        .collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn start() -> Snake {
        Snake::new((10, 10), 3, Direction::Up)
    }

    #[test]
    fn starts_straight_behind_the_head() {
        let snake = start();
        let body: Vec<Pos> = snake.segments().copied().collect();
        assert_eq!(body, vec![(10, 10), (10, 11), (10, 12)]);
    }

    #[test]
    fn moving_keeps_length() {
        let mut snake = start();
        assert_eq!(snake.step((0, 0), 20, 20), StepOutcome::Moved);
        let body: Vec<Pos> = snake.segments().copied().collect();
        assert_eq!(body, vec![(10, 9), (10, 10), (10, 11)]);
    }

    #[test]
    fn eating_grows_by_one() {
        let mut snake = start();
        assert_eq!(snake.step((10, 9), 20, 20), StepOutcome::Ate);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), (10, 9));
    }

    #[test]
    fn reversing_is_refused() {
        let mut snake = start();
        assert!(!snake.turn(Direction::Down));
        assert!(snake.turn(Direction::Left));
        // reversal is judged against the last step, not the queued turn
        assert!(snake.turn(Direction::Right));
        snake.step((0, 0), 20, 20);
        assert!(!snake.turn(Direction::Left));
    }

    #[test]
    fn two_quick_turns_cannot_fold_back() {
        let mut snake = start();
        snake.turn(Direction::Left);
        // still heading up until the next step, so Down stays illegal
        assert!(!snake.turn(Direction::Down));
        assert_eq!(snake.step((0, 0), 20, 20), StepOutcome::Moved);
        assert_eq!(snake.head(), (9, 10));
    }

    #[test]
    fn wall_ends_the_move() {
        let mut snake = Snake::new((0, 5), 3, Direction::Left);
        assert_eq!(snake.step((9, 9), 20, 20), StepOutcome::Collided);
        assert_eq!(snake.head(), (0, 5));

        let mut snake = Snake::new((5, 19), 2, Direction::Down);
        assert_eq!(snake.step((9, 9), 20, 20), StepOutcome::Collided);
    }

    #[test]
    fn biting_the_body_ends_the_move() {
        // head at (1,1) moving down into (1,2)
        let segments = [(1, 1), (0, 1), (0, 2), (1, 2), (2, 2)];
        let mut snake = Snake::from_segments(&segments, Direction::Right);
        snake.turn(Direction::Down);
        assert_eq!(snake.step((9, 9), 20, 20), StepOutcome::Collided);
    }

    #[test]
    fn moving_into_the_tail_cell_collides() {
        let segments = [(1, 1), (1, 2), (0, 2), (0, 1)];
        let mut snake = Snake::from_segments(&segments, Direction::Up);
        snake.turn(Direction::Left);
        assert_eq!(snake.step((9, 9), 20, 20), StepOutcome::Collided);
    }

    #[test]
    fn food_avoids_the_body() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::new((1, 0), 2, Direction::Right);
        // 2x2 field, snake covers the top row
        for _ in 0..20 {
            let food = spawn_food(&mut rng, &snake, 2, 2);
            assert!(matches!(food, Some((_, 1))));
        }
    }

    #[test]
    fn no_food_when_the_field_is_full() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::from_segments(&[(0, 0), (1, 0), (1, 1), (0, 1)], Direction::Left);
        assert_eq!(spawn_food(&mut rng, &snake, 2, 2), None);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ])
    }

    proptest! {
        #[test]
        fn random_walks_keep_segments_unique_and_in_bounds(
            seed in any::<u64>(),
            turns in prop::collection::vec(direction(), 1..200),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut snake = Snake::new((5, 5), 3, Direction::Up);
            let mut food = spawn_food(&mut rng, &snake, 10, 10).unwrap();

            for dir in turns {
                snake.turn(dir);
                let len = snake.len();
                match snake.step(food, 10, 10) {
                    StepOutcome::Collided => break,
                    StepOutcome::Moved => prop_assert_eq!(snake.len(), len),
                    StepOutcome::Ate => {
                        prop_assert_eq!(snake.len(), len + 1);
                        match spawn_food(&mut rng, &snake, 10, 10) {
                            Some(pos) => {
                                prop_assert!(!snake.contains(pos));
                                food = pos;
                            }
                            None => break,
                        }
                    }
                }
                let mut seen: Vec<Pos> = snake.segments().copied().collect();
                prop_assert!(seen.iter().all(|&(c, r)| (0..10).contains(&c) && (0..10).contains(&r)));
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), snake.len());
            }
        }
    }
}
