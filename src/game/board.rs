use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LENGTH: usize = 4;
/// Largest number of rows or columns a board may have.
pub const MAX_DIMENSION: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'X',
            Cell::Player2 => 'O',
        }
    }
}

/// Board shape. Defaults to the classic 6 rows, 7 columns, 4 in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
            win_length: WIN_LENGTH,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be >= 1".into()));
        }
        if self.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be >= 1".into()));
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.rows and board.cols must be <= {MAX_DIMENSION}"
            )));
        }
        if self.win_length < 2 {
            return Err(ConfigError::Validation(
                "board.win_length must be >= 2".into(),
            ));
        }
        // A run has to fit along at least one axis, otherwise nobody can win.
        if self.win_length > self.rows.max(self.cols) {
            return Err(ConfigError::Validation(
                "board.win_length must be <= max(board.rows, board.cols)".into(),
            ));
        }
        Ok(())
    }
}

/// Row-major grid of cells. Row 0 is the top, row `rows - 1` the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the classic shape
    pub fn new() -> Self {
        Self::empty(BoardConfig::default())
    }

    /// Create a new empty board with the given shape, rejecting shapes that
    /// fail [`BoardConfig::validate`]
    pub fn with_config(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// An empty board of the same shape
    pub fn cleared(&self) -> Self {
        Self::empty(self.config)
    }

    fn empty(config: BoardConfig) -> Self {
        Board {
            config,
            cells: vec![Cell::Empty; config.rows * config.cols],
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn win_length(&self) -> usize {
        self.config.win_length
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if `row` or `col` is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.rows() && col < self.cols(),
            "cell ({row}, {col}) is outside a {}x{} board",
            self.rows(),
            self.cols()
        );
        self.cells[row * self.cols() + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let cols = self.cols();
        self.cells[row * cols + col] = cell;
    }

    /// Number of chips stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        if col >= self.cols() {
            return 0;
        }
        (0..self.rows())
            .rev()
            .take_while(|&row| self.get(row, col) != Cell::Empty)
            .count()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols() {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Drop a piece in a column, returns the row where it landed.
    /// The board is untouched on error.
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, GameError> {
        if col >= self.cols() {
            return Err(GameError::InvalidColumn {
                column: col,
                columns: self.cols(),
            });
        }

        // Scan from the bottom row upward for the first empty slot
        let row = (0..self.rows())
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .ok_or(GameError::ColumnFull { column: col })?;

        self.set(row, col, cell);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols()).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a chip
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Number of non-empty cells
    pub fn count_chips(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Scan the whole board for `win_length` equal, non-empty cells in a line.
    ///
    /// Every horizontal, vertical and diagonal window is inspected, so the
    /// result does not depend on which chip was placed last.
    pub fn has_winning_run(&self) -> bool {
        self.check_rows()
            || self.check_cols()
            || self.check_diagonals_down()
            || self.check_diagonals_up()
    }

    /// Starting offsets of every window of `win_length` cells along an axis of `len`.
    fn window_starts(&self, len: usize) -> Range<usize> {
        0..(len + 1).saturating_sub(self.win_length())
    }

    /// Horizontal windows (left to right)
    fn check_rows(&self) -> bool {
        (0..self.rows()).any(|row| {
            self.window_starts(self.cols())
                .any(|col| self.is_run(row, col, 0, 1))
        })
    }

    /// Vertical windows (top to bottom)
    fn check_cols(&self) -> bool {
        (0..self.cols()).any(|col| {
            self.window_starts(self.rows())
                .any(|row| self.is_run(row, col, 1, 0))
        })
    }

    /// Diagonal windows from top-left to bottom-right (\)
    fn check_diagonals_down(&self) -> bool {
        self.window_starts(self.rows()).any(|row| {
            self.window_starts(self.cols())
                .any(|col| self.is_run(row, col, 1, 1))
        })
    }

    /// Diagonal windows from top-right to bottom-left (/)
    fn check_diagonals_up(&self) -> bool {
        let offset = self.win_length().saturating_sub(1);
        self.window_starts(self.rows()).any(|row| {
            self.window_starts(self.cols())
                .any(|start| self.is_run(row, start + offset, 1, -1))
        })
    }

    /// Whether the window starting at (row, col) and stepping by (dr, dc) is a
    /// run. The caller guarantees the whole window lies on the board.
    fn is_run(&self, row: usize, col: usize, dr: usize, dc: isize) -> bool {
        let first = self.get(row, col);
        if first == Cell::Empty {
            return false;
        }
        (1..self.win_length()).all(|k| {
            let r = row + dr * k;
            let c = col.wrapping_add_signed(dc * k as isize);
            self.get(r, c) == first
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders the grid top row first, followed by 1-based column labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        let labels: Vec<String> = (1..=self.cols()).map(|c| (c % 10).to_string()).collect();
        write!(f, "{}", labels.join(" "))
    }
}
