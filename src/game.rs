use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    Difficulty, GOLDEN_CAPTURE_FOOD_REFILLS, GOLDEN_SPAWN_IDLE_PROBABILITY,
    GOLDEN_SPAWN_ON_CAPTURE_PROBABILITY, GOLDEN_SPAWN_ON_RESET_PROBABILITY, GameSettings,
    GridSize,
};
use crate::event::{ActiveEvent, EventKind, roll_event};
use crate::food::{FoodKind, spawn_position};
use crate::input::Direction;
use crate::obstacle::Obstacles;
use crate::snake::{Position, Snake};

/// Lifecycle of one engine instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EngineStatus {
    /// Constructed, board not laid out yet.
    Idle,
    /// Board laid out, waiting for `start`.
    Ready,
    Running,
    /// Running, but ticks are ignored.
    Paused,
    /// A collision ended the run.
    Ended,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    ObstacleCollision,
    SelfCollision,
}

/// Reward collected during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Capture {
    Regular {
        points: u32,
    },
    Golden {
        points: u32,
        triggered: Option<EventKind>,
    },
}

/// Result of one call to [`GameEngine::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The engine was not running or was paused.
    Skipped,
    Continued { capture: Option<Capture> },
    GameOver {
        final_score: u32,
        reason: DeathReason,
    },
}

/// Complete simulation state for one game.
///
/// A scheduler calls [`tick`](Self::tick) at [`tick_interval`](Self::tick_interval);
/// input calls [`set_direction`](Self::set_direction) in between.
#[derive(Debug, Clone)]
pub struct GameEngine {
    pub snake: Snake,
    pub food: Option<Position>,
    pub golden_food: Option<Position>,
    pub obstacles: Obstacles,
    pub event: Option<ActiveEvent>,
    pub score: u32,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
    status: EngineStatus,
    settings: GameSettings,
    bounds: GridSize,
    rng: StdRng,
}

impl GameEngine {
    /// Creates an idle engine seeded from system entropy.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::from_rng(settings, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible sessions.
    #[must_use]
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::from_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn from_rng(settings: GameSettings, rng: StdRng) -> Self {
        let bounds = settings.grid_size();
        let (x, y) = bounds.center();

        Self {
            snake: Snake::new(Position { x, y }, Direction::Right),
            food: None,
            golden_food: None,
            obstacles: Obstacles::empty(),
            event: None,
            score: 0,
            tick_count: 0,
            death_reason: None,
            status: EngineStatus::Idle,
            settings,
            bounds,
            rng,
        }
    }

    /// Lays out a fresh board for `difficulty` and leaves the engine ready.
    pub fn reset(&mut self, difficulty: Difficulty, obstacles_enabled: bool) {
        self.settings.difficulty = difficulty;
        self.settings.obstacles_enabled = obstacles_enabled;
        self.bounds = self.settings.grid_size();

        let (x, y) = self.bounds.center();
        let start = Position { x, y };
        self.snake = Snake::new(start, Direction::Right);
        self.score = 0;
        self.tick_count = 0;
        self.event = None;
        self.death_reason = None;
        self.food = None;
        self.golden_food = None;
        self.obstacles = Obstacles::place(
            &mut self.rng,
            self.bounds,
            self.settings.obstacle_count(),
            start,
        );

        self.place_food();
        if self.rng.gen_bool(GOLDEN_SPAWN_ON_RESET_PROBABILITY) {
            self.place_golden_food();
        }

        self.status = EngineStatus::Ready;
        info!(
            "reset: difficulty={difficulty} grid={}x{} obstacles={}",
            self.bounds.width,
            self.bounds.height,
            self.obstacles.len()
        );
    }

    /// Resets with the current settings.
    pub fn restart(&mut self) {
        self.reset(self.settings.difficulty, self.settings.obstacles_enabled);
    }

    /// Starts the run. A finished or never-reset engine gets a fresh board first.
    pub fn start(&mut self) {
        match self.status {
            EngineStatus::Idle | EngineStatus::Ended => {
                self.restart();
                self.status = EngineStatus::Running;
            }
            EngineStatus::Ready => self.status = EngineStatus::Running,
            EngineStatus::Running | EngineStatus::Paused => {}
        }
    }

    /// Flips between running and paused; no effect in other states.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            EngineStatus::Running => EngineStatus::Paused,
            EngineStatus::Paused => EngineStatus::Running,
            other => other,
        };
    }

    /// Requests a heading for the next tick. Returns whether it was accepted.
    ///
    /// Ignored unless the engine is running (paused counts as running).
    /// Reversing the current direction is rejected.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }

        self.snake.set_direction(direction)
    }

    /// Same as [`set_direction`](Self::set_direction) for a raw `(dx, dy)`
    /// vector; anything but a unit axis vector is ignored.
    pub fn set_direction_delta(&mut self, dx: i32, dy: i32) -> bool {
        Direction::from_delta(dx, dy).is_some_and(|direction| self.set_direction(direction))
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != EngineStatus::Running {
            return TickOutcome::Skipped;
        }

        self.tick_count += 1;
        let head = self.snake.next_head_position(self.bounds);

        if self.settings.obstacles_enabled {
            self.drift_obstacles(head);
        }

        // Inserted before the collision check; a fatal step stays visible.
        self.snake.push_head(head);

        if self.obstacles.contains(head) {
            return self.end_run(DeathReason::ObstacleCollision);
        }
        if self.snake.head_overlaps_body() {
            return self.end_run(DeathReason::SelfCollision);
        }

        let capture = self.resolve_reward(head);
        self.advance_event();

        TickOutcome::Continued { capture }
    }

    /// Rolls the idle golden food spawn. Returns true when golden food appeared.
    pub fn maybe_spawn_idle_golden_food(&mut self) -> bool {
        if self.status == EngineStatus::Idle || self.golden_food.is_some() {
            return false;
        }
        if !self.rng.gen_bool(GOLDEN_SPAWN_IDLE_PROBABILITY) {
            return false;
        }

        self.place_golden_food();
        self.golden_food.is_some()
    }

    /// Replaces the running event. Golden rain drops golden food right away.
    pub fn activate_event(&mut self, event: ActiveEvent) {
        info!(
            "event: {} for {} ticks",
            event.kind.label(),
            event.remaining_ticks
        );
        self.event = Some(event);

        if event.kind == EventKind::GoldenRain && self.golden_food.is_none() {
            self.place_golden_food();
        }
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// True while a run is in progress, paused or not.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.status, EngineStatus::Running | EngineStatus::Paused)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == EngineStatus::Paused
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Direction the next tick will move in.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.heading()
    }

    /// Interval the scheduler should call [`tick`](Self::tick) at.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.settings.difficulty.tick_interval()
    }

    #[must_use]
    pub fn double_reward_active(&self) -> bool {
        self.event
            .is_some_and(|event| event.kind == EventKind::DoubleReward)
    }

    fn drift_obstacles(&mut self, head: Position) {
        let moved = self.obstacles.drift(
            &mut self.rng,
            self.bounds,
            self.settings.obstacle_drift_probability,
            |cell| {
                cell == head
                    || self.snake.occupies(cell)
                    || self.food == Some(cell)
                    || self.golden_food == Some(cell)
            },
        );

        if moved > 0 {
            debug!("{moved} obstacle(s) drifted");
        }
    }

    fn resolve_reward(&mut self, head: Position) -> Option<Capture> {
        if self.golden_food == Some(head) {
            let points = FoodKind::Golden.points(false);
            self.score += points;
            self.golden_food = None;

            // One food slot: each refill replaces the previous placement.
            for _ in 0..GOLDEN_CAPTURE_FOOD_REFILLS {
                self.place_food();
            }

            let triggered = self.roll_event();
            debug!("golden food captured, score={}", self.score);
            return Some(Capture::Golden { points, triggered });
        }

        if self.food == Some(head) {
            let points = FoodKind::Regular.points(self.double_reward_active());
            self.score += points;
            self.place_food();

            if self.rng.gen_bool(GOLDEN_SPAWN_ON_CAPTURE_PROBABILITY) && self.golden_food.is_none()
            {
                self.place_golden_food();
            }

            return Some(Capture::Regular { points });
        }

        self.snake.trim_tail();
        None
    }

    fn roll_event(&mut self) -> Option<EventKind> {
        let event = roll_event(&mut self.rng)?;
        self.activate_event(event);
        Some(event.kind)
    }

    fn advance_event(&mut self) {
        let expired = self.event.as_mut().is_some_and(ActiveEvent::tick);
        if expired {
            debug!("event finished");
            self.event = None;
        }
    }

    fn place_food(&mut self) {
        self.food = spawn_position(&mut self.rng, self.bounds, |cell| {
            self.snake.occupies(cell)
                || self.obstacles.contains(cell)
                || self.golden_food == Some(cell)
        });

        if self.food.is_none() {
            warn!("no free cell left for food");
        }
    }

    fn place_golden_food(&mut self) {
        self.golden_food = spawn_position(&mut self.rng, self.bounds, |cell| {
            self.snake.occupies(cell) || self.obstacles.contains(cell) || self.food == Some(cell)
        });
    }

    fn end_run(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = EngineStatus::Ended;
        self.death_reason = Some(reason);
        info!("game over: {reason:?}, score={}", self.score);

        TickOutcome::GameOver {
            final_score: self.score,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Difficulty, GameSettings, GridSize};
    use crate::event::{ActiveEvent, EventKind};
    use crate::input::Direction;
    use crate::obstacle::Obstacles;
    use crate::snake::{Position, Snake};

    use super::{Capture, DeathReason, EngineStatus, GameEngine, TickOutcome};

    fn calm_settings() -> GameSettings {
        GameSettings {
            obstacles_enabled: false,
            obstacle_drift_probability: 0.0,
            ..GameSettings::default()
        }
    }

    /// Running 20x20 engine with no obstacles and no golden food.
    fn running_engine(seed: u64) -> GameEngine {
        let mut engine = GameEngine::with_seed(calm_settings(), seed);
        engine.reset(Difficulty::Normal, false);
        engine.golden_food = None;
        engine.start();
        engine
    }

    #[test]
    fn reversal_is_checked_against_requested_heading() {
        let mut engine = running_engine(5);
        engine.snake = Snake::new(Position::new(10, 10), Direction::Right);

        assert!(engine.set_direction(Direction::Up));
        assert!(!engine.set_direction(Direction::Down));
        assert_eq!(engine.direction(), Direction::Up);

        assert!(engine.set_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Left);
    }

    #[test]
    fn new_engine_is_idle_and_ignores_ticks() {
        let mut engine = GameEngine::with_seed(calm_settings(), 1);

        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert!(!engine.set_direction(Direction::Up));
    }

    #[test]
    fn reset_lays_out_board_for_difficulty() {
        let settings = GameSettings {
            obstacle_drift_probability: 0.0,
            ..GameSettings::default()
        };
        let mut engine = GameEngine::with_seed(settings, 2);

        engine.reset(Difficulty::Insane, true);

        assert_eq!(engine.status(), EngineStatus::Ready);
        assert_eq!(
            engine.bounds(),
            GridSize {
                width: 33,
                height: 33
            }
        );
        let start = Position::new(16, 16);
        assert_eq!(engine.snake.head(), start);
        assert_eq!(engine.snake.len(), 1);
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.obstacles.len(), 10);
        assert!(!engine.obstacles.contains(start));
        assert_eq!(engine.score, 0);
        assert_eq!(engine.event, None);

        let food = engine.food.expect("reset places food");
        assert!(!engine.snake.occupies(food));
        assert!(!engine.obstacles.contains(food));
        assert_ne!(engine.golden_food, Some(food));
    }

    #[test]
    fn reset_without_obstacles_places_none() {
        let mut engine = GameEngine::with_seed(GameSettings::default(), 3);

        engine.reset(Difficulty::Hard, false);

        assert!(engine.obstacles.is_empty());
        assert_eq!(engine.bounds().width, 25);
    }

    #[test]
    fn golden_food_sometimes_present_after_reset() {
        let mut engine = GameEngine::with_seed(calm_settings(), 4);
        let mut with_golden = 0;

        for _ in 0..400 {
            engine.reset(Difficulty::Normal, false);
            if let Some(golden) = engine.golden_food {
                with_golden += 1;
                assert!(!engine.snake.occupies(golden));
                assert_ne!(engine.food, Some(golden));
            }
        }

        assert!(with_golden > 20 && with_golden < 120, "{with_golden}");
    }

    #[test]
    fn eating_food_grows_and_scores() {
        let mut engine = running_engine(5);
        engine.snake = Snake::new(Position::new(10, 10), Direction::Right);
        engine.food = Some(Position::new(11, 10));

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Continued {
                capture: Some(Capture::Regular { points: 1 })
            }
        );
        assert_eq!(
            engine.snake.segments().copied().collect::<Vec<_>>(),
            vec![Position::new(11, 10), Position::new(10, 10)]
        );
        assert_eq!(engine.score, 1);
        let food = engine.food.expect("food relocated");
        assert_ne!(food, Position::new(11, 10));
        assert_ne!(food, Position::new(10, 10));
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut engine = running_engine(6);
        engine.snake = Snake::from_segments(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
        );
        engine.food = Some(Position::new(0, 0));

        engine.tick();

        assert_eq!(
            engine.snake.segments().copied().collect::<Vec<_>>(),
            vec![Position::new(6, 5), Position::new(5, 5)]
        );
        assert_eq!(engine.score, 0);
    }

    #[test]
    fn head_wraps_across_edges() {
        let mut engine = running_engine(7);
        engine.snake = Snake::new(Position::new(19, 3), Direction::Right);
        engine.food = Some(Position::new(5, 5));

        engine.tick();
        assert_eq!(engine.snake.head(), Position::new(0, 3));

        engine.snake = Snake::new(Position::new(4, 0), Direction::Up);
        engine.tick();
        assert_eq!(engine.snake.head(), Position::new(4, 19));
    }

    #[test]
    fn obstacle_collision_ends_game_without_scoring() {
        let mut engine = running_engine(8);
        engine.snake = Snake::from_segments(
            vec![Position::new(3, 5), Position::new(4, 5), Position::new(5, 5)],
            Direction::Left,
        );
        engine.obstacles = Obstacles::from_cells([Position::new(2, 5)]);
        engine.score = 3;

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: 3,
                reason: DeathReason::ObstacleCollision
            }
        );
        assert_eq!(engine.status(), EngineStatus::Ended);
        assert_eq!(engine.score, 3);
        // The fatal step stays on the board.
        assert_eq!(engine.snake.head(), Position::new(2, 5));
        assert_eq!(engine.snake.len(), 4);
    }

    #[test]
    fn obstacle_beats_food_on_same_cell() {
        let mut engine = running_engine(9);
        engine.snake = Snake::new(Position::new(10, 10), Direction::Right);
        engine.food = Some(Position::new(11, 10));
        engine.obstacles = Obstacles::from_cells([Position::new(11, 10)]);

        let outcome = engine.tick();

        assert!(matches!(
            outcome,
            TickOutcome::GameOver {
                final_score: 0,
                reason: DeathReason::ObstacleCollision
            }
        ));
        assert_eq!(engine.score, 0);
    }

    #[test]
    fn self_collision_ends_game() {
        let mut engine = running_engine(10);
        engine.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Left,
        );
        engine.food = Some(Position::new(10, 10));
        assert!(engine.set_direction(Direction::Down));

        let outcome = engine.tick();

        assert!(matches!(
            outcome,
            TickOutcome::GameOver {
                reason: DeathReason::SelfCollision,
                ..
            }
        ));
        assert_eq!(engine.death_reason, Some(DeathReason::SelfCollision));
        assert_eq!(engine.tick(), TickOutcome::Skipped);
    }

    #[test]
    fn double_reward_pays_twice_then_expires() {
        let mut engine = running_engine(11);
        engine.snake = Snake::new(Position::new(10, 10), Direction::Right);
        engine.food = Some(Position::new(11, 10));
        engine.event = Some(ActiveEvent::new(EventKind::DoubleReward, 1));

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Continued {
                capture: Some(Capture::Regular { points: 2 })
            }
        );
        assert_eq!(engine.score, 2);
        assert_eq!(engine.event, None);
    }

    #[test]
    fn event_counts_down_once_per_tick() {
        let mut engine = running_engine(12);
        engine.food = Some(Position::new(0, 0));
        engine.event = Some(ActiveEvent::new(EventKind::GoldenRain, 3));

        engine.tick();
        assert_eq!(engine.event.map(|event| event.remaining_ticks), Some(2));
        engine.tick();
        engine.tick();
        assert_eq!(engine.event, None);
    }

    #[test]
    fn golden_capture_scores_five_and_grows() {
        let mut engine = running_engine(13);
        engine.snake = Snake::from_segments(
            vec![Position::new(10, 10), Position::new(9, 10)],
            Direction::Right,
        );
        engine.food = Some(Position::new(0, 0));
        engine.golden_food = Some(Position::new(11, 10));

        let outcome = engine.tick();

        assert!(matches!(
            outcome,
            TickOutcome::Continued {
                capture: Some(Capture::Golden { points: 5, .. })
            }
        ));
        assert_eq!(engine.score, 5);
        assert_eq!(engine.snake.len(), 3);
        let food = engine.food.expect("food placed after golden capture");
        assert!(!engine.snake.occupies(food));
        if let Some(golden) = engine.golden_food {
            assert_ne!(golden, food);
            assert!(!engine.snake.occupies(golden));
        }
    }

    #[test]
    fn golden_capture_ignores_double_reward() {
        let mut engine = running_engine(14);
        engine.snake = Snake::new(Position::new(10, 10), Direction::Right);
        engine.food = Some(Position::new(0, 0));
        engine.golden_food = Some(Position::new(11, 10));
        engine.event = Some(ActiveEvent::new(EventKind::DoubleReward, 10));

        engine.tick();

        assert_eq!(engine.score, 5);
    }

    #[test]
    fn golden_rain_drops_golden_food_immediately() {
        let mut engine = running_engine(15);
        engine.golden_food = None;

        engine.activate_event(ActiveEvent::new(EventKind::GoldenRain, 9));

        assert!(engine.golden_food.is_some());
        assert_eq!(
            engine.event.map(|event| event.kind),
            Some(EventKind::GoldenRain)
        );
    }

    #[test]
    fn new_event_overwrites_running_one() {
        let mut engine = running_engine(16);
        engine.event = Some(ActiveEvent::new(EventKind::DoubleReward, 20));

        engine.activate_event(ActiveEvent::new(EventKind::GoldenRain, 8));

        assert_eq!(engine.event, Some(ActiveEvent::new(EventKind::GoldenRain, 8)));
        assert!(!engine.double_reward_active());
    }

    #[test]
    fn paused_engine_skips_ticks_but_takes_direction() {
        let mut engine = running_engine(17);
        engine.snake = Snake::new(Position::new(10, 10), Direction::Right);
        engine.food = Some(Position::new(0, 0));

        engine.toggle_pause();
        assert!(engine.is_paused());
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert_eq!(engine.snake.head(), Position::new(10, 10));
        assert!(engine.set_direction(Direction::Down));

        engine.toggle_pause();
        engine.tick();
        assert_eq!(engine.snake.head(), Position::new(10, 11));
    }

    #[test]
    fn reverse_direction_is_rejected() {
        let mut engine = running_engine(18);

        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Right);
        assert!(!engine.set_direction_delta(-1, 0));
        assert!(!engine.set_direction_delta(1, 1));
        assert!(engine.set_direction_delta(0, 1));
        assert_eq!(engine.direction(), Direction::Down);
    }

    #[test]
    fn start_after_game_over_resets_board() {
        let mut engine = running_engine(19);
        engine.snake = Snake::new(Position::new(3, 3), Direction::Right);
        engine.obstacles = Obstacles::from_cells([Position::new(4, 3)]);
        engine.score = 7;
        engine.tick();
        assert_eq!(engine.status(), EngineStatus::Ended);

        engine.start();

        assert_eq!(engine.status(), EngineStatus::Running);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.snake.len(), 1);
        assert_eq!(engine.death_reason, None);
    }

    #[test]
    fn tick_interval_follows_difficulty() {
        let mut engine = GameEngine::with_seed(calm_settings(), 20);

        engine.reset(Difficulty::Easy, false);
        assert_eq!(engine.tick_interval().as_millis(), 160);

        engine.reset(Difficulty::Insane, false);
        assert_eq!(engine.tick_interval().as_millis(), 60);
    }

    #[test]
    fn idle_golden_spawn_respects_existing_golden_food() {
        let mut engine = running_engine(21);
        let golden = Position::new(1, 1);
        engine.golden_food = Some(golden);

        for _ in 0..500 {
            assert!(!engine.maybe_spawn_idle_golden_food());
        }
        assert_eq!(engine.golden_food, Some(golden));

        engine.golden_food = None;
        let spawned = (0..10_000).any(|_| engine.maybe_spawn_idle_golden_food());
        assert!(spawned);
    }

    #[test]
    fn golden_capture_starts_events_within_the_same_tick() {
        let mut saw_golden_rain = false;
        let mut saw_double_reward = false;

        for seed in 0..2_000 {
            let mut engine = running_engine(seed);
            engine.snake = Snake::new(Position::new(10, 10), Direction::Right);
            engine.food = Some(Position::new(0, 0));
            engine.golden_food = Some(Position::new(11, 10));

            let outcome = engine.tick();
            let TickOutcome::Continued {
                capture: Some(Capture::Golden { triggered, .. }),
            } = outcome
            else {
                panic!("seed {seed}: expected a golden capture, got {outcome:?}");
            };

            match triggered {
                Some(EventKind::GoldenRain) => {
                    let golden = engine.golden_food.expect("golden rain drops golden food");
                    assert!(!engine.snake.occupies(golden));
                    assert_ne!(engine.food, Some(golden));

                    let event = engine.event.expect("golden rain is active");
                    assert_eq!(event.kind, EventKind::GoldenRain);
                    assert!((7..=16).contains(&event.remaining_ticks));
                    saw_golden_rain = true;
                }
                Some(EventKind::DoubleReward) if !saw_double_reward => {
                    let event = engine.event.expect("double reward is active");
                    assert_eq!(event.kind, EventKind::DoubleReward);
                    assert!((11..=22).contains(&event.remaining_ticks));

                    engine.golden_food = None;
                    engine.food = Some(Position::new(12, 10));
                    let score_before = engine.score;

                    assert_eq!(
                        engine.tick(),
                        TickOutcome::Continued {
                            capture: Some(Capture::Regular { points: 2 })
                        }
                    );
                    assert_eq!(engine.score, score_before + 2);
                    saw_double_reward = true;
                }
                _ => {}
            }

            if saw_golden_rain && saw_double_reward {
                break;
            }
        }

        assert!(saw_golden_rain, "no seed triggered golden rain");
        assert!(saw_double_reward, "no seed triggered double reward");
    }

    #[test]
    fn invariants_hold_over_long_random_runs() {
        let settings = GameSettings {
            obstacle_drift_probability: 0.5,
            ..GameSettings::default()
        };
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        for seed in 0..20 {
            let mut engine = GameEngine::with_seed(settings, seed);
            engine.reset(Difficulty::Hard, true);
            engine.start();

            for step in 0..400_usize {
                let _ = engine.set_direction(directions[(step / 3 + seed as usize) % 4]);
                let before_len = engine.snake.len();
                let before_score = engine.score;

                let outcome = engine.tick();
                if matches!(outcome, TickOutcome::GameOver { .. }) {
                    assert_eq!(engine.score, before_score);
                    break;
                }

                let growth = engine.snake.len() - before_len;
                assert!(growth <= 1, "grew by {growth}");
                assert_eq!(growth == 1, engine.score > before_score);

                for cell in engine.food.iter().chain(engine.golden_food.iter()) {
                    assert!(!engine.snake.occupies(*cell));
                    assert!(!engine.obstacles.contains(*cell));
                }
                assert_ne!(
                    engine.food.zip(engine.golden_food).map(|(a, b)| a == b),
                    Some(true)
                );
            }
        }
    }
}
