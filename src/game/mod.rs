//! Core Connect Four game logic: board representation, player types, and the
//! game state machine with its authoritative move flow.

mod board;
mod player;
mod snapshot;
mod state;

pub use board::{Board, Cell, Direction, DropError, Position, WinningRun, COLS, CONNECT, ROWS};
pub use player::Player;
pub use snapshot::Snapshot;
pub use state::{GameState, GameStatus, MoveError, MoveOutcome};

#[cfg(test)]
pub(crate) use state::tests::{DRAW_SEQUENCE, RED_WINS_SEQUENCE};
