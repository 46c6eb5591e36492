// engine/src/engine/clear.rs
#![forbid(unsafe_code)]

use crate::engine::cells::Cell;
use crate::engine::constants::{
    COMBO_BASE_HALVES, COMBO_MAX_HALVES, GAMECOIN_REWARD, GOLD_CREDITS, POINTS_PER_LINE,
};
use crate::engine::grid::Grid;

/// Totals for one resolver pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClearResult {
    pub credits_earned: u32,
    pub gamecoins_earned: u32,
    pub lines_cleared: u32,
}

impl ClearResult {
    #[inline]
    pub fn score_delta(&self) -> u64 {
        POINTS_PER_LINE * u64::from(self.lines_cleared)
    }

    #[inline]
    pub fn has_rewards(&self) -> bool {
        self.credits_earned > 0 || self.gamecoins_earned > 0
    }
}

#[inline]
fn tally(cell: Cell, out: &mut ClearResult) {
    match cell {
        Cell::Gold => out.credits_earned += GOLD_CREDITS,
        Cell::GameCoin => out.gamecoins_earned += GAMECOIN_REWARD,
        _ => {}
    }
}

/// Clears every full row and column.
///
/// Full lines are detected on the grid as it stands before any clearing, so a cell at the
/// crossing of a full row and a full column pays out once per line. Lines are cleared
/// all-or-nothing.
pub fn resolve_lines<const N: usize>(grid: &mut Grid<N>) -> ClearResult {
    let full_rows: Vec<usize> = (0..N).filter(|&r| grid.row_full(r)).collect();
    let full_cols: Vec<usize> = (0..N).filter(|&c| grid.col_full(c)).collect();

    let mut out = ClearResult::default();

    for &r in &full_rows {
        for c in 0..N {
            tally(grid.get(r, c), &mut out);
        }
        out.lines_cleared += 1;
    }
    for &c in &full_cols {
        for r in 0..N {
            tally(grid.get(r, c), &mut out);
        }
        out.lines_cleared += 1;
    }

    for &r in &full_rows {
        for c in 0..N {
            grid.set(r, c, Cell::Empty);
        }
    }
    for &c in &full_cols {
        for r in 0..N {
            grid.set(r, c, Cell::Empty);
        }
    }

    out
}

/// `floor(credits * min(3, 1 + 0.5 * combo))`, computed in integer halves.
pub fn apply_combo_multiplier(credits: u32, combo: u32) -> u32 {
    let halves = COMBO_BASE_HALVES.saturating_add(combo).min(COMBO_MAX_HALVES);
    ((u64::from(credits) * u64::from(halves)) / 2) as u32
}

/// Display value of the multiplier for a given combo count.
pub fn combo_multiplier(combo: u32) -> f64 {
    f64::from(COMBO_BASE_HALVES.saturating_add(combo).min(COMBO_MAX_HALVES)) / 2.0
}
