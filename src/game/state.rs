use super::board::DropError;
use super::{Board, Player, Position, Snapshot};

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won(_) => "won",
            GameStatus::Drawn => "drawn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("game is over")]
    GameOver,
}

impl From<DropError> for MoveError {
    fn from(e: DropError) -> Self {
        match e {
            DropError::ColumnFull => MoveError::ColumnFull,
            DropError::InvalidColumn => MoveError::InvalidColumn,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Player who moved
    pub player: Player,
    /// Where the piece landed
    pub position: Position,
    /// Status after the move
    pub status: GameStatus,
}

/// A single game: board, side to move, winner and the last placed piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    winner: Option<Player>,
    last_move: Option<Position>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            winner: None,
            last_move: None,
        }
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::Red;
        self.winner = None;
        self.last_move = None;
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Most recently placed piece, `None` after a reset
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(player) => GameStatus::Won(player),
            None if self.board.is_full() => GameStatus::Drawn,
            None => GameStatus::InProgress,
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Drop `player`'s piece in `column` and record where it landed.
    ///
    /// Applies gravity only: it neither checks whose turn it is nor whether
    /// the game is already over. Use [`GameState::play`] for a full turn.
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Result<Position, MoveError> {
        let row = self.board.drop_piece(column, player.to_cell())?;
        let position = Position::new(row, column);
        self.last_move = Some(position);
        Ok(position)
    }

    /// Check if `player` has four in a row anywhere on the board
    pub fn check_victory(&self, player: Player) -> bool {
        self.board.check_victory(player)
    }

    /// Player owning the first four in a row found, see [`Board::winning_run`]
    pub fn check_win(&self) -> Option<Player> {
        self.board.check_win()
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Play a full turn for the current player.
    ///
    /// Rejected moves leave the state untouched. A winning move fixes the
    /// winner and keeps the mover as current player; any other landed move
    /// passes the turn.
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let position = self.drop_piece(column, player)?;

        let status = if self.check_victory(player) {
            self.winner = Some(player);
            GameStatus::Won(player)
        } else if self.is_full() {
            GameStatus::Drawn
        } else {
            self.switch_player();
            GameStatus::InProgress
        };

        Ok(MoveOutcome {
            player,
            position,
            status,
        })
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(self)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
