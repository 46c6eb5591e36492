// engine/src/engine/block_rule.rs
#![forbid(unsafe_code)]

use crate::engine::cells::{Cell, Color, Tier};
use crate::engine::random::RandomSource;
use crate::engine::shapes::ShapeKind;

/// A placeable piece: shape, reward tier, and (Normal only, when enabled) a display color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Block {
    pub shape: ShapeKind,
    pub tier: Tier,
    pub color: Option<Color>,
}

impl Block {
    pub fn new(shape: ShapeKind, tier: Tier) -> Self {
        Self {
            shape,
            tier,
            color: None,
        }
    }

    pub fn normal(shape: ShapeKind, color: Option<Color>) -> Self {
        Self {
            shape,
            tier: Tier::Normal,
            color,
        }
    }

    /// The value written into every cell this block covers.
    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::filled(self.tier, self.color)
    }
}

/// Tier thresholds for a single uniform draw `u`.
///
/// `u > game_coin_above` => GameCoin, else `u > gold_above` => Gold, else Normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierOdds {
    pub game_coin_above: f64,
    pub gold_above: f64,
}

impl TierOdds {
    pub const DEFAULT_GAME_COIN_ABOVE: f64 = 0.95;
    pub const DEFAULT_GOLD_ABOVE: f64 = 0.8;

    pub fn tier_for(&self, u: f64) -> Tier {
        if u > self.game_coin_above {
            Tier::GameCoin
        } else if u > self.gold_above {
            Tier::Gold
        } else {
            Tier::Normal
        }
    }
}

impl Default for TierOdds {
    fn default() -> Self {
        Self {
            game_coin_above: Self::DEFAULT_GAME_COIN_ABOVE,
            gold_above: Self::DEFAULT_GOLD_ABOVE,
        }
    }
}

/// Maps a unit draw onto an index in `0..len`.
#[inline]
fn pick_index(u: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    ((u * len as f64) as usize).min(len - 1)
}

/// Block stream: owns the random source and the draw rules.
///
/// Draw order per block is fixed: shape, tier, then color (only for Normal blocks with colors
/// enabled). Seeded sources therefore replay identical block sequences.
#[derive(Clone, Debug)]
pub struct BlockGenerator<R> {
    rng: R,
    odds: TierOdds,
    colors_enabled: bool,
}

impl<R: RandomSource> BlockGenerator<R> {
    pub fn new(rng: R, odds: TierOdds, colors_enabled: bool) -> Self {
        Self {
            rng,
            odds,
            colors_enabled,
        }
    }

    pub fn generate(&mut self) -> Block {
        let shapes = ShapeKind::all();
        let shape = shapes[pick_index(self.rng.next_unit(), shapes.len())];

        let tier = self.odds.tier_for(self.rng.next_unit());

        let color = if tier == Tier::Normal && self.colors_enabled {
            Some(Color::ALL[pick_index(self.rng.next_unit(), Color::ALL.len())])
        } else {
            None
        };

        Block { shape, tier, color }
    }
}
