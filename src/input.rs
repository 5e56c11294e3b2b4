//! Input handling for the game screen.
//!
//! Keys are first mapped to a [`UiAction`], then dispatched to the controller
//! or the overlay state. The mapping is pure so it can be tested without a
//! terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use serpent::core::GameController;
use serpent::snake::{Direction, InputCommand, SessionEvent};
use std::time::Instant;

/// What a key press means on the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Steer(Direction),
    ToggleAutoplay,
    Restart,
    ToggleHistory,
    Quit,
    None,
}

/// Modal overlay on top of the field. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverlay {
    None,
    History,
}

/// Result of handling a key.
pub enum InputResult {
    Continue,
    Quit,
    /// The session produced events the caller must look at (game over).
    Events(Vec<SessionEvent>),
}

/// Map a key to its action. Space restarts only once the game is over.
pub fn map_key(key: KeyEvent, game_over: bool) -> UiAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return UiAction::Quit;
    }
    match key.code {
        KeyCode::Up => UiAction::Steer(Direction::Up),
        KeyCode::Down => UiAction::Steer(Direction::Down),
        KeyCode::Left => UiAction::Steer(Direction::Left),
        KeyCode::Right => UiAction::Steer(Direction::Right),
        KeyCode::Char('a') | KeyCode::Char('A') => UiAction::ToggleAutoplay,
        KeyCode::Char('r') | KeyCode::Char('R') => UiAction::Restart,
        KeyCode::Char(' ') if game_over => UiAction::Restart,
        KeyCode::Char('h') | KeyCode::Char('H') => UiAction::ToggleHistory,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => UiAction::Quit,
        _ => UiAction::None,
    }
}

/// Dispatch a key press for the game screen.
pub fn handle_game_input<R: Rng>(
    key: KeyEvent,
    controller: &mut GameController<R>,
    overlay: &mut GameOverlay,
    now: Instant,
) -> InputResult {
    let action = map_key(key, controller.session().is_over());

    // History overlay swallows everything except its own toggles
    if *overlay == GameOverlay::History {
        if matches!(action, UiAction::ToggleHistory | UiAction::Quit) {
            *overlay = GameOverlay::None;
        }
        return InputResult::Continue;
    }

    let command = match action {
        UiAction::Steer(direction) => InputCommand::Steer(direction),
        UiAction::ToggleAutoplay => InputCommand::ToggleAutoplay,
        UiAction::Restart => InputCommand::Restart,
        UiAction::ToggleHistory => {
            *overlay = GameOverlay::History;
            return InputResult::Continue;
        }
        UiAction::Quit => return InputResult::Quit,
        UiAction::None => return InputResult::Continue,
    };
    InputResult::Events(controller.handle_input(command, now))
}
