// engine/src/engine/config.rs
#![forbid(unsafe_code)]

use crate::engine::block_rule::TierOdds;
use crate::engine::constants::{DEFAULT_POOL_SIZE, MAX_POOL_SIZE};
use crate::engine::error::ConfigError;

/// Session rules. The engine variants differ only in these flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Blocks offered at once; refilled to this size whenever the pool runs empty.
    pub pool_size: usize,
    /// Track consecutive clearing turns and scale credit payouts by the combo multiplier.
    pub combo_enabled: bool,
    /// Give Normal blocks a palette color.
    pub colors_enabled: bool,
    pub odds: TierOdds,
}

impl EngineConfig {
    /// No combo, no colors.
    pub fn plain() -> Self {
        Self {
            combo_enabled: false,
            colors_enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.pool_size > MAX_POOL_SIZE {
            return Err(ConfigError::PoolTooLarge {
                pool_size: self.pool_size,
                max: MAX_POOL_SIZE,
            });
        }
        for (name, value) in [
            ("game_coin_above", self.odds.game_coin_above),
            ("gold_above", self.odds.gold_above),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.odds.gold_above > self.odds.game_coin_above {
            return Err(ConfigError::ThresholdOrder {
                gold_above: self.odds.gold_above,
                game_coin_above: self.odds.game_coin_above,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            combo_enabled: true,
            colors_enabled: true,
            odds: TierOdds::default(),
        }
    }
}
