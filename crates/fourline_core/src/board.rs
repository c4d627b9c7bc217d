use log::trace;

use crate::{Cell, Mark, PlaceError, Position};

/// Edge length of the reference board.
pub const BOARD_SIZE: usize = 9;
/// Consecutive marks needed to win on the reference board.
pub const WIN_LENGTH: usize = 4;

/// The square playing grid.
///
/// Cells are stored row-major in a single owned buffer, so `Clone` yields a
/// fully independent copy; the search relies on that when it explores
/// hypothetical moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Cell>,
    last_move: Option<Position>,
}

impl Board {
    /// Creates an empty `size` x `size` board where `win_length` consecutive
    /// marks win.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < win_length <= size`; constructing a board with a
    /// bad geometry is a programming error, not a runtime condition.
    pub fn new(size: usize, win_length: usize) -> Self {
        assert!(
            win_length > 0 && win_length <= size,
            "win_length must be in 1..=size"
        );
        Self {
            size,
            win_length,
            cells: vec![Cell::Empty; size * size],
            last_move: None,
        }
    }

    /// The reference 9x9, four-in-a-row instance.
    pub fn standard() -> Self {
        Self::new(BOARD_SIZE, WIN_LENGTH)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Cell contents at `pos`. Out-of-range positions panic like any slice
    /// index; use [`Board::place`] for validated access.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.index(pos.row, pos.col)]
    }

    /// Places `mark` at `pos`.
    ///
    /// Fails without touching the board if the position is out of range or
    /// the cell is taken. On success the position is remembered as the last
    /// move so a renderer can highlight it.
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), PlaceError> {
        if pos.row >= self.size || pos.col >= self.size {
            return Err(PlaceError::InvalidCoordinate {
                row: pos.row,
                col: pos.col,
            });
        }
        let idx = self.index(pos.row, pos.col);
        if self.cells[idx] != Cell::Empty {
            return Err(PlaceError::OccupiedCell {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[idx] = Cell::Taken(mark);
        self.last_move = Some(pos);
        trace!("placed {} at ({}, {})", mark.as_char(), pos.row, pos.col);
        Ok(())
    }

    /// All empty cells, enumerated row-major. Move ordering sorts this with a
    /// stable sort, so the enumeration order doubles as the tie-break order.
    pub fn legal_moves(&self) -> Vec<Position> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Position::new(row, col)))
            .filter(|pos| self.get(*pos) == Cell::Empty)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Whether `mark` owns `win_length` consecutive cells along a row, a
    /// column, or either diagonal.
    ///
    /// Every window of exactly `win_length` cells is checked in all four
    /// orientations; a longer run simply matches several windows.
    pub fn has_win(&self, mark: Mark) -> bool {
        let target = Cell::Taken(mark);
        let n = self.size;
        let k = self.win_length;
        let at = |row: usize, col: usize| self.cells[self.index(row, col)];

        // Horizontal
        for row in 0..n {
            for col in 0..=(n - k) {
                if (0..k).all(|i| at(row, col + i) == target) {
                    return true;
                }
            }
        }

        // Vertical
        for row in 0..=(n - k) {
            for col in 0..n {
                if (0..k).all(|i| at(row + i, col) == target) {
                    return true;
                }
            }
        }

        // Diagonal, down-right
        for row in 0..=(n - k) {
            for col in 0..=(n - k) {
                if (0..k).all(|i| at(row + i, col + i) == target) {
                    return true;
                }
            }
        }

        // Diagonal, down-left
        for row in 0..=(n - k) {
            for col in (k - 1)..n {
                if (0..k).all(|i| at(row + i, col - i) == target) {
                    return true;
                }
            }
        }

        false
    }

    /// The most recently placed cell, if any. Presentation only; the search
    /// never reads this.
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }
}
