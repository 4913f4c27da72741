use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_COLUMNS, GLYPH_FOOD, GLYPH_GOLDEN_FOOD, GLYPH_OBSTACLE, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
    GLYPH_SNAKE_TAIL, GridSize, PALETTE,
};
use crate::game::{EngineStatus, GameEngine};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable engine state.
pub fn render(frame: &mut Frame<'_>, engine: &GameEngine, hud_info: HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, engine, hud_info);
    let board_area = board_rect(play_area, engine.bounds());

    let block = Block::bordered()
        .border_style(Style::new().fg(PALETTE.border_fg))
        .style(Style::new().bg(PALETTE.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_obstacles(frame, inner, engine);
    render_food(frame, inner, engine);
    render_snake(frame, inner, engine);

    match engine.status() {
        EngineStatus::Idle | EngineStatus::Ready => render_start_menu(
            frame,
            play_area,
            hud_info.best_score,
            engine.settings().difficulty,
        ),
        EngineStatus::Paused => render_pause_menu(frame, play_area),
        EngineStatus::Ended => render_game_over_menu(
            frame,
            play_area,
            engine.score,
            hud_info.run_start_best,
            engine.death_reason,
        ),
        EngineStatus::Running => {}
    }
}

/// Centers a bordered board of `bounds` cells inside `area`, clipped to fit.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, engine: &GameEngine) {
    let buffer = frame.buffer_mut();
    for obstacle in engine.obstacles.iter() {
        if let Some((x, y)) = logical_to_terminal(inner, engine.bounds(), *obstacle) {
            buffer.set_string(x, y, GLYPH_OBSTACLE, Style::new().fg(PALETTE.obstacle));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, engine: &GameEngine) {
    let buffer = frame.buffer_mut();

    if let Some((x, y)) = engine
        .food
        .and_then(|food| logical_to_terminal(inner, engine.bounds(), food))
    {
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(PALETTE.food));
    }

    if let Some((x, y)) = engine
        .golden_food
        .and_then(|golden| logical_to_terminal(inner, engine.bounds(), golden))
    {
        buffer.set_string(
            x,
            y,
            GLYPH_GOLDEN_FOOD,
            Style::new()
                .fg(PALETTE.golden_food)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, engine: &GameEngine) {
    let snake = &engine.snake;
    let segments: Vec<Position> = snake.segments().copied().collect();
    let last_index = segments.len().saturating_sub(1);
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when a fatal step overlaps the body.
    for (index, segment) in segments.iter().enumerate().skip(1).rev() {
        let Some((x, y)) = logical_to_terminal(inner, engine.bounds(), *segment) else {
            continue;
        };

        let (glyph, color) = if index == last_index {
            (GLYPH_SNAKE_TAIL, PALETTE.snake_tail)
        } else {
            (GLYPH_SNAKE_BODY, PALETTE.snake_body)
        };
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }

    if let Some((x, y)) = logical_to_terminal(inner, engine.bounds(), snake.head()) {
        buffer.set_string(
            x,
            y,
            head_glyph(snake.direction()),
            Style::new()
                .fg(PALETTE.snake_head)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
