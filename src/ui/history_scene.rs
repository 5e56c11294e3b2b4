//! Leaderboard modal.

use super::game_common::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use serpent::history::{HistoryRecord, Leaderboard};
use serpent::snake::format_elapsed;

const MODAL_WIDTH: u16 = 50;

/// One formatted leaderboard row.
fn history_row(rank: usize, record: &HistoryRecord) -> String {
    format!(
        "#{:<2} {:>7}  {:>6}  {}",
        rank,
        record.score,
        format_elapsed(record.elapsed_seconds),
        record.timestamp
    )
}

/// Render the top games as a centered modal.
pub fn render_history_scene(frame: &mut Frame, area: Rect, board: &Leaderboard) {
    let rows = board.len().max(1) as u16;
    let modal = centered_rect(area, MODAL_WIDTH, rows + 6);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(" History ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:<3} {:>7}  {:>6}  {}", "", "Score", "Time", "Date"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if board.is_empty() {
        lines.push(Line::from(Span::styled(
            "No games yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, record) in board.records().iter().enumerate() {
        let color = if i == 0 { Color::Yellow } else { Color::White };
        lines.push(Line::from(Span::styled(
            history_row(i + 1, record),
            Style::default().fg(color),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[H] Close",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
