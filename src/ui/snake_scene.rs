//! Game screen rendering.
//!
//! Uses half-block pixel rendering: each cell maps to a colored pixel and
//! pairs of vertical pixels share one terminal row through `▀` (fg = top,
//! bg = bottom). One terminal column per cell keeps the field square.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
};
use serpent::core::{EventLog, LogLevel};
use serpent::snake::{format_elapsed, Lifecycle, Position, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const FOOD_COLOR: Color = Color::Rgb(255, 80, 40);
/// Food tint while a combo is running.
const COMBO_FOOD_COLOR: Color = Color::Rgb(255, 200, 40);
const TARGET_COLOR: Color = Color::Rgb(60, 60, 110);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

const INFO_PANEL_WIDTH: u16 = 26;

/// Render the game screen.
pub fn render_snake_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    log: &EventLog,
    best_score: Option<u64>,
) {
    let min_height = (snapshot.tile_count as u16).div_ceil(2) + 2;
    let layout = create_game_layout(
        frame,
        area,
        " Serpent ",
        Color::LightGreen,
        min_height,
        INFO_PANEL_WIDTH,
    );

    render_play_field(frame, layout.content, snapshot);

    match snapshot.lifecycle {
        Lifecycle::NotStarted => render_start_prompt(frame, layout.content),
        Lifecycle::Over => render_game_over_banner(
            frame,
            layout.content,
            Color::Red,
            "GAME OVER",
            &format!(
                "Score {} in {}",
                snapshot.score,
                format_elapsed(snapshot.elapsed_secs)
            ),
            "[Space] Play again",
        ),
        Lifecycle::Running => {}
    }

    render_status_bar_content(frame, layout.status_bar, snapshot);
    render_info_panel(frame, layout.info_panel, snapshot, log, best_score);
}

/// Interpolated color for body segment `index`.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Colored pixel per cell, indexed `[y][x]`. Later layers win: target, food, snake.
fn build_pixels(snapshot: &Snapshot) -> Vec<Vec<Option<Color>>> {
    let size = snapshot.tile_count.max(0) as usize;
    let mut pixels = vec![vec![None; size]; size];
    let mut paint = |pos: Position, color: Color| {
        let (x, y) = (pos.x as usize, pos.y as usize);
        if pos.x >= 0 && pos.y >= 0 && x < size && y < size {
            pixels[y][x] = Some(color);
        }
    };

    if let Some(target) = snapshot.autoplay_target {
        paint(target, TARGET_COLOR);
    }

    let food_color = if snapshot.combo_multiplier > 1 {
        COMBO_FOOD_COLOR
    } else {
        FOOD_COLOR
    };
    paint(snapshot.food, food_color);

    let snake_len = snapshot.snake.len();
    // Tail first so the head is painted last
    for (i, &seg) in snapshot.snake.iter().enumerate().rev() {
        let color = if i == 0 {
            HEAD_COLOR
        } else {
            body_color(i, snake_len)
        };
        paint(seg, color);
    }
    pixels
}

fn border_line(left: char, fill: usize, right: char) -> String {
    let mut s = String::with_capacity(fill + 2);
    s.push(left);
    s.extend(std::iter::repeat(BORDER_H).take(fill));
    s.push(right);
    s
}

fn render_play_field(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = build_pixels(snapshot);
    let size = pixels.len();
    let content_rows = size.div_ceil(2);
    let render_w = ((size + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;
    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let border = Style::default().fg(BORDER_COLOR);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            border_line(BORDER_TL, inner_w, BORDER_TR),
            border,
        ))),
        Rect::new(x_off, y_off, render_w, 1),
    );

    let empty_row: Vec<Option<Color>> = vec![None; size];
    for term_row in 0..content_rows {
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), border)];

        // Batch runs of cells that share a style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();
        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()).take(inner_w) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);
            if (fg != cur_fg || bg != cur_bg) && !cur_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut cur_text),
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            cur_fg = fg;
            cur_bg = bg;
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(cur_text, Style::default().fg(cur_fg).bg(cur_bg)));
        }
        spans.push(Span::styled(BORDER_V.to_string(), border));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                border_line(BORDER_BL, inner_w, BORDER_BR),
                border,
            ))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    match snapshot.lifecycle {
        Lifecycle::NotStarted => render_status_bar(
            frame,
            area,
            "Ready",
            Color::LightGreen,
            &[("[Arrows]", "Start"), ("[A]", "Autoplay"), ("[Q]", "Quit")],
        ),
        Lifecycle::Over => render_status_bar(
            frame,
            area,
            "The serpent bit itself",
            Color::Red,
            &[("[Space]", "Restart"), ("[H]", "History"), ("[Q]", "Quit")],
        ),
        Lifecycle::Running if snapshot.autoplay => render_status_bar(
            frame,
            area,
            "Autoplay",
            Color::Cyan,
            &[("[A]", "Take over"), ("[R]", "Restart"), ("[Q]", "Quit")],
        ),
        Lifecycle::Running => render_status_bar(
            frame,
            area,
            "Slither!",
            Color::Green,
            &[("[Arrows]", "Move"), ("[A]", "Autoplay"), ("[R]", "Restart")],
        ),
    }
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn log_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Gray,
        LogLevel::Highlight => Color::Yellow,
        LogLevel::Warning => Color::Red,
    }
}

fn autoplay_mode(snapshot: &Snapshot) -> (&'static str, Color) {
    match (snapshot.autoplay, snapshot.collision_avoidance) {
        (false, _) => ("Off", Color::DarkGray),
        (true, true) => ("Pathfind", Color::Cyan),
        (true, false) => ("Greedy", Color::Magenta),
    }
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    log: &EventLog,
    best_score: Option<u64>,
) {
    let inner = render_info_panel_frame(frame, area);

    let combo_active = snapshot.combo_multiplier > 1;
    let combo_style = if combo_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let (mode, mode_color) = autoplay_mode(snapshot);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            label("Score: "),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Best:  "),
            Span::styled(
                best_score.map_or_else(|| "-".to_string(), |s| s.to_string()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            label("Time:  "),
            Span::styled(
                format_elapsed(snapshot.elapsed_secs),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Combo: "),
            Span::styled(format!("x{}", snapshot.combo_multiplier), combo_style),
        ]),
    ];
    if combo_active {
        lines.push(Line::from(vec![
            label("Combo left: "),
            Span::styled(
                format!("{}s", snapshot.remaining_combo_secs),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }
    lines.push(Line::from(vec![
        label("Speed: "),
        Span::styled(snapshot.speed.to_string(), Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(vec![
        label("Length: "),
        Span::styled(
            snapshot.snake.len().to_string(),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(Line::from(vec![
        label("Autoplay: "),
        Span::styled(mode, Style::default().fg(mode_color)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{FULL_BLOCK} "), Style::default().fg(HEAD_COLOR)),
        label("Head  "),
        Span::styled(format!("{FULL_BLOCK} "), Style::default().fg(FOOD_COLOR)),
        label("Food"),
    ]));
    lines.push(Line::from(""));

    // Log tail fills whatever height is left
    let used = lines.len() as u16;
    let room = inner.height.saturating_sub(used) as usize;
    for entry in log.tail(room) {
        lines.push(Line::from(Span::styled(
            entry.message.clone(),
            Style::default().fg(log_color(entry.level)),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 5 || area.width < 26 {
        return;
    }

    let prompt = "[ Press an arrow key ]";
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;
    let y = area.y + area.height / 2;

    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, y, prompt.len() as u16, 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpent::core::GameConfig;
    use serpent::snake::GameSession;

    #[test]
    fn test_pixels_paint_head_and_food() {
        let mut session = GameSession::new(GameConfig::default());
        session.snake.push_back(Position::new(9, 10));
        let pixels = build_pixels(&session.snapshot());
        assert_eq!(pixels.len(), 20);
        assert_eq!(pixels[10][10], Some(HEAD_COLOR));
        assert_eq!(pixels[10][9], Some(body_color(1, 2)));
        assert_eq!(pixels[15][15], Some(FOOD_COLOR));
        assert_eq!(pixels[0][0], None);
    }

    #[test]
    fn test_combo_tints_food() {
        let mut session = GameSession::new(GameConfig::default());
        session.combo.multiplier = 4;
        let pixels = build_pixels(&session.snapshot());
        assert_eq!(pixels[15][15], Some(COMBO_FOOD_COLOR));
    }

    #[test]
    fn test_autoplay_mode_labels() {
        let mut session = GameSession::new(GameConfig::default());
        assert_eq!(autoplay_mode(&session.snapshot()).0, "Off");
        session.autoplay = true;
        session.collision_avoidance = true;
        assert_eq!(autoplay_mode(&session.snapshot()).0, "Pathfind");
        session.collision_avoidance = false;
        assert_eq!(autoplay_mode(&session.snapshot()).0, "Greedy");
    }

    #[test]
    fn test_border_line_width() {
        assert_eq!(border_line(BORDER_TL, 3, BORDER_TR), "┌───┐");
    }
}
