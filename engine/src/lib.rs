// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

// Re-export the bits the CLI and tests reach for:
pub use engine::{
    Block, BoardGrid, Cell, ClearResult, Color, ConfigError, EngineConfig, GRID_SIZE, Game,
    Grid, Move, NoopCollector, PlaceError, RecordingCollector, RewardCollector, RewardEvent,
    ScriptedDraws, ShapeKind, Tier, TierOdds, TurnOutcome, Wallet,
};
pub use policy::{GreedyPolicy, Policy, RandomPolicy};
