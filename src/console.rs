//! Line-based console game: print the board, read a column, repeat until
//! someone wins or the board fills up.

use std::io::{BufRead, Write};

use crate::error::ConsoleError;
use crate::game::{Board, GameState, GameStatus, COLS};
use crate::input::parse_column;

/// Render the board as text: `.` for empty, `X` for Red, `O` for Yellow, then
/// a line of column indices.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in board.rows() {
        for cell in row {
            let symbol = match cell.player() {
                Some(player) => player.symbol(),
                None => '.',
            };
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    for col in 0..COLS {
        out.push_str(&format!("{col} "));
    }
    out.push('\n');
    out
}

/// Play one game to the end, reading moves from `input`.
///
/// Rejected input (not a number, no such column, full column) prints a retry
/// message and asks the same player again. Returns the final status, which is
/// always terminal.
pub fn run<R: BufRead, W: Write>(
    state: &mut GameState,
    mut input: R,
    mut output: W,
) -> Result<GameStatus, ConsoleError> {
    let mut line = String::new();

    loop {
        write!(output, "{}", render_board(state.board()))?;
        let player = state.current_player();
        write!(
            output,
            "Player {} ({}), choose a column (0-{}): ",
            player.number(),
            player.symbol(),
            COLS - 1
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }

        let outcome = match parse_column(&line) {
            Ok(column) => state.play(column).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(outcome) => match outcome.status {
                GameStatus::InProgress => {}
                GameStatus::Won(winner) => {
                    write!(output, "{}", render_board(state.board()))?;
                    writeln!(output, "Player {} wins!", winner.number())?;
                    return Ok(outcome.status);
                }
                GameStatus::Drawn => {
                    write!(output, "{}", render_board(state.board()))?;
                    writeln!(output, "It's a draw!")?;
                    return Ok(outcome.status);
                }
            },
            Err(reason) => {
                log::debug!("rejected console move {:?}: {}", line.trim(), reason);
                writeln!(output, "Invalid column, try again.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player, DRAW_SEQUENCE, ROWS};

    fn script(moves: &[&str]) -> String {
        moves.iter().map(|m| format!("{m}\n")).collect()
    }

    fn play_script(moves: &[&str]) -> (GameState, Result<GameStatus, ConsoleError>, String) {
        let mut state = GameState::initial();
        let input = script(moves);
        let mut output = Vec::new();
        let result = run(&mut state, input.as_bytes(), &mut output);
        (state, result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_render_empty_board() {
        let text = render_board(&Board::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[0], ". . . . . . . ");
        assert_eq!(lines[ROWS], "0 1 2 3 4 5 6 ");
    }

    #[test]
    fn test_render_pieces() {
        let mut board = Board::new();
        board.drop_piece(0, Cell::Red).unwrap();
        board.drop_piece(0, Cell::Yellow).unwrap();
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "X . . . . . . ");
        assert_eq!(lines[4], "O . . . . . . ");
    }

    #[test]
    fn test_red_wins() {
        let (state, result, output) = play_script(&["0", "0", "1", "1", "2", "2", "3"]);
        assert_eq!(result.unwrap(), GameStatus::Won(Player::Red));
        assert_eq!(state.winner(), Some(Player::Red));
        assert!(output.contains("Player 1 (X), choose a column (0-6): "));
        assert!(output.contains("Player 2 (O), choose a column (0-6): "));
        assert!(output.ends_with("Player 1 wins!\n"));
    }

    #[test]
    fn test_invalid_input_keeps_turn() {
        let (state, result, output) =
            play_script(&["abc", "7", "-2", "", "0", "1", "0", "1", "0", "1", "0"]);
        assert_eq!(result.unwrap(), GameStatus::Won(Player::Red));
        assert_eq!(output.matches("Invalid column, try again.").count(), 4);
        // Red kept the first move despite the rejected attempts
        assert_eq!(state.board().get(5, 0), Cell::Red);
    }

    #[test]
    fn test_full_column_is_rejected() {
        let moves = ["2", "2", "2", "2", "2", "2", "2", "3", "4", "3", "4", "3", "4", "3"];
        let (state, result, output) = play_script(&moves);
        assert_eq!(output.matches("Invalid column, try again.").count(), 1);
        // After the rejected 7th drop Red is still to move and wins vertically in column 3
        assert_eq!(result.unwrap(), GameStatus::Won(Player::Red));
        assert_eq!(state.board().get(2, 3), Cell::Red);
    }

    #[test]
    fn test_draw() {
        let moves: Vec<String> = DRAW_SEQUENCE.iter().map(|c| c.to_string()).collect();
        let moves: Vec<&str> = moves.iter().map(String::as_str).collect();
        let (state, result, output) = play_script(&moves);
        assert_eq!(result.unwrap(), GameStatus::Drawn);
        assert!(state.is_full());
        assert!(output.ends_with("It's a draw!\n"));
    }

    #[test]
    fn test_input_closed() {
        let (_, result, _) = play_script(&["3", "4"]);
        assert!(matches!(result, Err(ConsoleError::InputClosed)));
    }
}
