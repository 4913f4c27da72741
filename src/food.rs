use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Reward kinds that can sit on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Regular,
    Golden,
}

impl FoodKind {
    /// Score granted on capture. Only regular food is affected by double reward.
    #[must_use]
    pub fn points(self, double_reward: bool) -> u32 {
        match self {
            Self::Regular if double_reward => 2,
            Self::Regular => 1,
            Self::Golden => 5,
        }
    }
}

/// Picks a uniformly random cell for which `is_blocked` is false.
///
/// Samples from the explicit set of free cells so placement always
/// terminates; returns `None` when the board is full.
#[must_use]
pub fn spawn_position<R, F>(rng: &mut R, bounds: GridSize, is_blocked: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !is_blocked(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
