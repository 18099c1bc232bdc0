use serde::Serialize;

use super::{GameState, GameStatus};

/// Read-only copy of a game, shaped for the HTML page and `/api/state`.
///
/// Players are numbered 1 and 2; `winner` is 0 while nobody has won and the
/// last move is (-1, -1) when no piece has been placed since the last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid: Vec<Vec<&'static str>>,
    pub player: u8,
    pub winner: u8,
    pub status: &'static str,
    pub last_row: i32,
    pub last_col: i32,
}

impl Snapshot {
    pub fn from_state(state: &GameState) -> Self {
        let grid = state
            .board()
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.label()).collect())
            .collect();

        let (last_row, last_col) = state
            .last_move()
            .map_or((-1, -1), |pos| (pos.row as i32, pos.col as i32));

        let status = state.status();
        let winner = match status {
            GameStatus::Won(player) => player.number(),
            _ => 0,
        };

        Snapshot {
            grid,
            player: state.current_player().number(),
            winner,
            status: status.as_str(),
            last_row,
            last_col,
        }
    }

    pub fn is_drawn(&self) -> bool {
        self.status == GameStatus::Drawn.as_str()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}
