use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the center cell (rounded toward the origin).
    #[must_use]
    pub fn center(self) -> (i32, i32) {
        (i32::from(self.width / 2), i32::from(self.height / 2))
    }
}

/// Difficulty tier selecting cadence, cell size and obstacle count.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    /// All tiers in selector order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Insane];

    /// Milliseconds between two movement ticks.
    #[must_use]
    pub fn tick_interval_ms(self) -> u64 {
        match self {
            Self::Easy => 160,
            Self::Normal => 110,
            Self::Hard => 85,
            Self::Insane => 60,
        }
    }

    /// Side length of one grid cell in board pixels.
    #[must_use]
    pub fn cell_size_px(self) -> u16 {
        match self {
            Self::Easy => 24,
            Self::Normal => 20,
            Self::Hard => 16,
            Self::Insane => 12,
        }
    }

    /// Number of obstacles placed on reset when obstacles are enabled.
    #[must_use]
    pub fn obstacle_count(self) -> usize {
        match self {
            Self::Easy => 2,
            Self::Normal => 4,
            Self::Hard => 6,
            Self::Insane => 10,
        }
    }

    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms())
    }

    /// Grid dimensions for a square board of `board_px` pixels.
    #[must_use]
    pub fn grid_size(self, board_px: u16) -> GridSize {
        let tiles = (board_px / self.cell_size_px()).max(1);
        GridSize {
            width: tiles,
            height: tiles,
        }
    }

    /// Maps the `1`..`4` selector keys onto tiers.
    #[must_use]
    pub fn from_selector(index: char) -> Option<Self> {
        match index {
            '1' => Some(Self::Easy),
            '2' => Some(Self::Normal),
            '3' => Some(Self::Hard),
            '4' => Some(Self::Insane),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Insane => "insane",
        };
        f.write_str(label)
    }
}

/// Everything a `reset()` derives the board from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    pub obstacles_enabled: bool,
    /// Side length of the square board in logical pixels.
    pub board_px: u16,
    /// Chance that one obstacle drifts by one cell during one tick.
    pub obstacle_drift_probability: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            obstacles_enabled: true,
            board_px: DEFAULT_BOARD_PX,
            obstacle_drift_probability: DEFAULT_OBSTACLE_DRIFT_PROBABILITY,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        self.difficulty.grid_size(self.board_px)
    }

    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        if self.obstacles_enabled {
            self.difficulty.obstacle_count()
        } else {
            0
        }
    }
}

/// Renderer colors.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub golden_food: Color,
    pub obstacle: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub event_badge: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Dark green board with gold rewards.
pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    golden_food: Color::LightYellow,
    obstacle: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Green,
    hud_text: Color::Gray,
    hud_accent: Color::LightGreen,
    event_badge: Color::LightYellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Side length of the square board in logical pixels.
pub const DEFAULT_BOARD_PX: u16 = 400;

/// Per-obstacle, per-tick drift chance (10% tick gate times 12% obstacle gate).
pub const DEFAULT_OBSTACLE_DRIFT_PROBABILITY: f64 = 0.012;

/// Chance that a reset starts with golden food on the board.
pub const GOLDEN_SPAWN_ON_RESET_PROBABILITY: f64 = 0.15;

/// Chance that a regular capture also spawns golden food.
pub const GOLDEN_SPAWN_ON_CAPTURE_PROBABILITY: f64 = 0.12;

/// Chance per idle period that golden food appears on its own
/// (3% period gate times the 15% golden spawn gate).
pub const GOLDEN_SPAWN_IDLE_PROBABILITY: f64 = 0.0045;

/// Period of the idle golden food roll.
pub const IDLE_GOLDEN_SPAWN_PERIOD: Duration = Duration::from_secs(2);

/// Regular food placements after a golden capture.
pub const GOLDEN_CAPTURE_FOOD_REFILLS: usize = 2;

/// Rolls below this activate double reward.
pub const DOUBLE_REWARD_THRESHOLD: f64 = 0.08;

/// Rolls below this (and not below the double threshold) activate golden rain.
pub const GOLDEN_RAIN_THRESHOLD: f64 = 0.14;

/// Frame pacing of the render loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Mouse drag, in grid cells, that a swipe must exceed.
pub const SWIPE_THRESHOLD_CELLS: f32 = 0.5;

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲ ";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼ ";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀ ";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶ ";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "● ";
pub const GLYPH_GOLDEN_FOOD: &str = "★ ";
pub const GLYPH_OBSTACLE: &str = "▒▒";

/// Terminal columns used to draw one grid cell.
pub const CELL_COLUMNS: u16 = 2;
