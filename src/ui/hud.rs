use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;
use crate::event::ActiveEvent;
use crate::game::GameEngine;

/// Values the HUD shows that the engine does not own.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub best_score: u32,
    /// Best score as it stood when the current run started.
    pub run_start_best: u32,
}

/// Renders the two HUD rows and returns the play area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, engine: &GameEngine, info: HudInfo) -> Rect {
    let [play_area, score_row, status_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let score_left = format!(" Score {}", engine.score);
    let score_right = format!(
        "Best {}  Length {} ",
        info.best_score.max(engine.score),
        engine.snake.len()
    );
    frame.render_widget(
        Paragraph::new(spread_line(
            score_left,
            score_right,
            usize::from(score_row.width),
            Style::default()
                .fg(PALETTE.hud_accent)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(PALETTE.hud_text),
        )),
        score_row,
    );

    let bounds = engine.bounds();
    let settings = engine.settings();
    let status_left = format!(
        " {} {}x{}  obstacles {}",
        settings.difficulty,
        bounds.width,
        bounds.height,
        if settings.obstacles_enabled { "on" } else { "off" }
    );
    frame.render_widget(
        Paragraph::new(spread_line(
            status_left,
            format!("{} ", event_badge(engine.event)),
            usize::from(status_row.width),
            Style::default().fg(PALETTE.hud_text),
            Style::default().fg(PALETTE.event_badge),
        )),
        status_row,
    );

    play_area
}

/// Badge text for the active event.
#[must_use]
pub fn event_badge(event: Option<ActiveEvent>) -> String {
    match event {
        Some(event) => format!("{} ({})", event.kind.label(), event.remaining_ticks),
        None => "No Event".to_owned(),
    }
}

/// Left-aligns `left` and right-aligns `right` within `width` columns.
fn spread_line(
    left: String,
    right: String,
    width: usize,
    left_style: Style,
    right_style: Style,
) -> Line<'static> {
    let used = left.width() + right.width();
    let gap = width.saturating_sub(used).max(1);

    Line::from(vec![
        Span::styled(left, left_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, right_style),
    ])
}
