use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    /// Display label used by the HTML page and the JSON snapshot
    pub fn label(self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::Red => "red",
            Cell::Yellow => "yellow",
        }
    }
}

/// Grid coordinates. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Direction of a run of four cells, in the order runs are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
    /// Top-left to bottom-right, \
    DiagonalDown,
    /// Bottom-left to top-right, /
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Row and column step between consecutive cells of a run
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    /// Rows a run may start on
    fn start_rows(self) -> std::ops::Range<usize> {
        match self {
            Direction::Horizontal => 0..ROWS,
            Direction::Vertical | Direction::DiagonalDown => 0..ROWS - (CONNECT - 1),
            Direction::DiagonalUp => CONNECT - 1..ROWS,
        }
    }

    /// Columns a run may start on
    fn start_cols(self) -> std::ops::Range<usize> {
        match self {
            Direction::Vertical => 0..COLS,
            _ => 0..COLS - (CONNECT - 1),
        }
    }
}

/// Four aligned cells fully held by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningRun {
    pub player: Player,
    pub direction: Direction,
    pub cells: [Position; CONNECT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Rows of the grid, top first
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Overwrite a cell without applying gravity. Only for setting up positions in tests.
    #[cfg(test)]
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Build a board from text rows, top first: `X` Red, `O` Yellow, anything else empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; ROWS]) -> Self {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(COLS).enumerate() {
                board.cells[row][col] = match ch {
                    'X' => Cell::Red,
                    'O' => Cell::Yellow,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, DropError> {
        if col >= COLS {
            return Err(DropError::InvalidColumn);
        }

        // Find the lowest empty row in this column
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(DropError::ColumnFull)?;

        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    /// Check if `player` holds any run of four
    pub fn check_victory(&self, player: Player) -> bool {
        self.winning_runs().any(|run| run.player == player)
    }

    /// First run of four found, scanning horizontal, vertical, down-right then
    /// up-right runs. Each direction is scanned row-major from its first start
    /// row; up-right runs start from row 3. When both players hold a four (only
    /// possible by editing the board directly) this order decides who is
    /// reported.
    pub fn winning_run(&self) -> Option<WinningRun> {
        self.winning_runs().next()
    }

    /// Winner of the first run of four found, see [`Board::winning_run`]
    pub fn check_win(&self) -> Option<Player> {
        self.winning_run().map(|run| run.player)
    }

    fn winning_runs(&self) -> impl Iterator<Item = WinningRun> + '_ {
        Direction::ALL.into_iter().flat_map(move |direction| {
            direction.start_rows().flat_map(move |row| {
                direction
                    .start_cols()
                    .filter_map(move |col| self.run_at(row, col, direction))
            })
        })
    }

    /// The run starting at (row, col) going in `direction`, if one player owns
    /// all of it
    fn run_at(&self, row: usize, col: usize, direction: Direction) -> Option<WinningRun> {
        let (dr, dc) = direction.step();
        let mut cells = [Position::new(row, col); CONNECT];
        for (i, pos) in cells.iter_mut().enumerate() {
            let r = row.checked_add_signed(dr * i as isize)?;
            let c = col.checked_add_signed(dc * i as isize)?;
            *pos = Position::new(r, c);
        }

        let player = self.get(row, col).player()?;
        cells
            .iter()
            .all(|pos| self.get(pos.row, pos.col) == player.to_cell())
            .then_some(WinningRun {
                player,
                direction,
                cells,
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
