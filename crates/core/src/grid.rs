//! Grid module - the settled-cell occupancy matrix
//!
//! The grid is a 10x20 matrix where each cell is empty or holds the color of the
//! piece that locked there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Only the owner of the session writes cells, and only while locking a piece or
//! clearing rows.

use arrayvec::ArrayVec;

use crate::types::{Cell, ColorId, GRID_COLS, GRID_ROWS};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_COLS as usize) * (GRID_ROWS as usize);

const COLS: usize = GRID_COLS as usize;
const ROWS: usize = GRID_ROWS as usize;

/// The settled board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_COLS as i8 || y < 0 || y >= GRID_ROWS as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn cols(&self) -> u8 {
        GRID_COLS
    }

    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    /// Get cell at position (x, y)
    ///
    /// Returns `None` (the out-of-range sentinel) outside the grid.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Borrow one row of cells, empty outside the grid
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= ROWS {
            return &[];
        }
        let start = y * COLS;
        &self.cells[start..start + COLS]
    }

    /// Empty a single row in place
    pub fn clear_row(&mut self, y: usize) {
        if y >= ROWS {
            return;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].fill(None);
    }

    /// Move row `y` down by `n` rows, leaving the source row empty
    pub fn move_row_down(&mut self, y: usize, n: usize) {
        if n == 0 || y + n >= ROWS {
            return;
        }
        let src = y * COLS;
        let dst = (y + n) * COLS;
        self.cells.copy_within(src..src + COLS, dst);
        self.cells[src..src + COLS].fill(None);
    }

    /// Write a piece's cells with its color
    ///
    /// All four positions are checked before anything is written, so a lock is
    /// never partial. Returns false without touching the grid if any cell is out
    /// of range or already filled.
    pub fn lock_blocks(&mut self, blocks: &[(i8, i8); 4], color: ColorId) -> bool {
        let mut idxs = ArrayVec::<usize, 4>::new();
        for &(x, y) in blocks {
            match Self::index(x, y) {
                Some(idx) if self.cells[idx].is_none() => idxs.push(idx),
                _ => return false,
            }
        }
        for idx in idxs {
            self.cells[idx] = Some(color);
        }
        true
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export the grid as palette ids (0 = empty)
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * COLS + x].map_or(0, ColorId::as_u8);
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a 2D vector (converts to flat array)
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), ROWS);
        assert!(rows.iter().all(|row| row.len() == COLS));

        let mut flat = [None; GRID_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * COLS + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..ROWS).map(|y| self.row(y).to_vec()).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
