//! Terminal rendering.

pub mod game_common;
pub mod history_scene;
pub mod snake_scene;

use crate::input::GameOverlay;
use ratatui::Frame;
use serpent::core::EventLog;
use serpent::history::Leaderboard;
use serpent::snake::Snapshot;

/// Draw one frame: the game screen plus any open overlay.
pub fn draw_ui(
    frame: &mut Frame,
    snapshot: &Snapshot,
    log: &EventLog,
    board: &Leaderboard,
    overlay: GameOverlay,
) {
    let size = frame.size();
    let best = board.best().map(|r| r.score);
    snake_scene::render_snake_scene(frame, size, snapshot, log, best);

    if overlay == GameOverlay::History {
        history_scene::render_history_scene(frame, size, board);
    }
}
