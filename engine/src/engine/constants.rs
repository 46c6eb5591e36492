// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Side length of the square play grid.
pub const GRID_SIZE: usize = 10;

/// Default number of blocks offered at once.
pub const DEFAULT_POOL_SIZE: usize = 3;

/// Largest accepted pool; refill deals the whole pool in one turn.
pub const MAX_POOL_SIZE: usize = 16;

/// Score awarded per cleared line (row or column), independent of cell tiers.
pub const POINTS_PER_LINE: u64 = 100;

/// Credits paid for every Gold cell in a cleared line.
pub const GOLD_CREDITS: u32 = 5;

/// Gamecoins paid for every GameCoin cell in a cleared line.
pub const GAMECOIN_REWARD: u32 = 1;

/**
 * Combo multiplier, expressed in halves so the credit payout stays in integer math:
 * `multiplier = min(3, 1 + 0.5 * combo)` == `min(6, 2 + combo) / 2`.
 */
pub const COMBO_BASE_HALVES: u32 = 2;
pub const COMBO_MAX_HALVES: u32 = 6;
