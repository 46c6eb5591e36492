// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod block_rule;
mod cells;
mod clear;
mod config;
mod constants;
mod error;
mod game;
mod grid;
mod random;
mod reward;
mod shapes;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use block_rule::{Block, BlockGenerator, TierOdds};
pub use cells::{Cell, Color, Tier};
pub use clear::{ClearResult, apply_combo_multiplier, combo_multiplier, resolve_lines};
pub use config::EngineConfig;
pub use constants::{
    DEFAULT_POOL_SIZE, GAMECOIN_REWARD, GOLD_CREDITS, GRID_SIZE, MAX_POOL_SIZE, POINTS_PER_LINE,
};
pub use error::{ConfigError, PlaceError};
pub use game::{Game, Move, PlacementResult, SimPlacement, TurnOutcome};
pub use grid::{BoardGrid, Grid};
pub use random::{RandomSource, ScriptedDraws};
pub use reward::{NoopCollector, RecordingCollector, RewardCollector, RewardEvent, Wallet};
pub use shapes::ShapeKind;
