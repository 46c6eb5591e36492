// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use crate::engine::block_rule::Block;
use crate::engine::cells::Cell;
use crate::engine::constants::GRID_SIZE;
use crate::engine::error::PlaceError;
use crate::engine::shapes::ShapeKind;

/// Square `N x N` cell matrix, row-major: `cells[row][col]`.
///
/// The session uses [`BoardGrid`]; other sizes exist so invariants can be checked exhaustively on
/// small boards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Grid<const N: usize> {
    cells: [[Cell; N]; N],
}

pub type BoardGrid = Grid<GRID_SIZE>;

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Grid<N> {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
        }
    }

    pub fn from_cells(cells: [[Cell; N]; N]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Raw cell write. Placement and clearing go through [`Grid::place`] and the resolver.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    pub fn clear_all(&mut self) {
        self.cells = [[Cell::Empty; N]; N];
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.empty_count() == N * N
    }

    #[inline]
    pub fn row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| !cell.is_empty())
    }

    #[inline]
    pub fn col_full(&self, col: usize) -> bool {
        self.cells.iter().all(|row| !row[col].is_empty())
    }

    /// True iff every occupied offset of `shape` lands inside the grid on an Empty cell.
    ///
    /// Pure; the game-over scan calls this for every anchor of every pooled block.
    pub fn can_place(&self, shape: ShapeKind, row: i32, col: i32) -> bool {
        for (dr, dc) in shape.cells() {
            let r = row + dr;
            let c = col + dc;
            if r < 0 || r >= N as i32 || c < 0 || c >= N as i32 {
                return false;
            }
            if !self.cells[r as usize][c as usize].is_empty() {
                return false;
            }
        }
        true
    }

    /// Writes `block` at the anchor. Rejected placements leave the grid untouched.
    pub fn place(&mut self, block: &Block, row: i32, col: i32) -> Result<(), PlaceError> {
        if !self.can_place(block.shape, row, col) {
            return Err(PlaceError::InvalidPlacement { row, col });
        }
        let cell = block.cell();
        for (dr, dc) in block.shape.cells() {
            self.cells[(row + dr) as usize][(col + dc) as usize] = cell;
        }
        Ok(())
    }

    /// True iff `shape` fits at some anchor. Scans all `N * N` anchors.
    pub fn fits_anywhere(&self, shape: ShapeKind) -> bool {
        (0..N as i32).any(|r| (0..N as i32).any(|c| self.can_place(shape, r, c)))
    }

    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }
}
