use rand::Rng;

use crate::config::GridSize;
use crate::food::spawn_position;
use crate::input::Direction;
use crate::snake::Position;

const DRIFT_DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Distinct hazard cells; entering one ends the run.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Obstacles {
    cells: Vec<Position>,
}

impl Obstacles {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an obstacle set from explicit cells, dropping duplicates.
    #[must_use]
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        let mut obstacles = Self::empty();
        for cell in cells {
            if !obstacles.contains(cell) {
                obstacles.cells.push(cell);
            }
        }
        obstacles
    }

    /// Places up to `count` distinct obstacles away from `reserved`.
    ///
    /// Stops early when the board runs out of free cells.
    #[must_use]
    pub fn place<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        count: usize,
        reserved: Position,
    ) -> Self {
        let mut obstacles = Self::empty();

        for _ in 0..count {
            let Some(cell) =
                spawn_position(rng, bounds, |cell| cell == reserved || obstacles.contains(cell))
            else {
                break;
            };
            obstacles.cells.push(cell);
        }

        obstacles
    }

    /// Moves each obstacle by one wrapped cell with chance `probability`.
    ///
    /// A move is suppressed when the target is blocked or already holds an
    /// obstacle. Returns how many obstacles moved.
    pub fn drift<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        probability: f64,
        is_blocked: F,
    ) -> usize
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let probability = probability.clamp(0.0, 1.0);
        let mut moved = 0;

        for index in 0..self.cells.len() {
            if !rng.gen_bool(probability) {
                continue;
            }

            let direction = DRIFT_DIRECTIONS[rng.gen_range(0..DRIFT_DIRECTIONS.len())];
            let target = self.cells[index].step(direction, bounds);
            if is_blocked(target) || self.contains(target) {
                continue;
            }

            self.cells[index] = target;
            moved += 1;
        }

        moved
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}
