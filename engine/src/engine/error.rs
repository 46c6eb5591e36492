// engine/src/engine/error.rs
#![forbid(unsafe_code)]

/// Why a turn was rejected. Every variant leaves the session unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PlaceError {
    #[error("block does not fit at anchor ({row}, {col})")]
    InvalidPlacement { row: i32, col: i32 },
    #[error("game is over")]
    GameOver,
    #[error("no block at pool index {index} (pool holds {pool_len})")]
    UnknownBlockIndex { index: usize, pool_len: usize },
}

impl PlaceError {
    /// Stale pool indices are handled exactly like a bad anchor.
    pub fn is_invalid_placement(&self) -> bool {
        matches!(
            self,
            PlaceError::InvalidPlacement { .. } | PlaceError::UnknownBlockIndex { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("pool_size must be at least 1")]
    EmptyPool,
    #[error("pool_size {pool_size} exceeds the maximum of {max}")]
    PoolTooLarge { pool_size: usize, max: usize },
    #[error("tier threshold {name}={value} is outside [0, 1]")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("gold_above ({gold_above}) must not exceed game_coin_above ({game_coin_above})")]
    ThresholdOrder { gold_above: f64, game_coin_above: f64 },
}
