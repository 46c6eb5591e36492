// engine/src/engine/game.rs
#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::block_rule::{Block, BlockGenerator};
use crate::engine::clear::{ClearResult, apply_combo_multiplier, combo_multiplier, resolve_lines};
use crate::engine::config::EngineConfig;
use crate::engine::constants::GRID_SIZE;
use crate::engine::error::{ConfigError, PlaceError};
use crate::engine::grid::BoardGrid;
use crate::engine::random::RandomSource;
use crate::engine::reward::{RewardCollector, RewardEvent};

/// A pool index plus the anchor (top-left) cell to place it at.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub index: usize,
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub fn new(index: usize, row: i32, col: i32) -> Self {
        Self { index, row, col }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SimPlacement {
    pub grid_after_place: BoardGrid,
    pub grid_after_clear: BoardGrid,
    /// Credits already scaled by the combo multiplier when combos are enabled.
    pub clear: ClearResult,
}

/// Result of the placement step alone (before refill and game-over evaluation).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlacementResult {
    pub block: Block,
    pub pool_len: usize,
    pub clear: ClearResult,
}

/// Everything one accepted turn did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TurnOutcome {
    pub block: Block,
    pub clear: ClearResult,
    pub score_delta: u64,
    /// Combo count after this turn (always 0 with combos disabled).
    pub combo: u32,
    /// The event handed to the collector, if the turn earned anything.
    pub reward: Option<RewardEvent>,
    pub refilled: bool,
    pub game_over: bool,
}

/// One player's session: grid, offered blocks, counters and the terminal flag.
///
/// `game_over` only ever flips false -> true; [`Game::new_game`] starts a fresh session.
#[derive(Clone, Debug)]
pub struct Game<R = StdRng> {
    pub grid: BoardGrid,
    pub pool: Vec<Block>,

    generator: BlockGenerator<R>,
    config: EngineConfig,

    pub score: u64,
    pub combo: u32,
    pub lines_cleared: u64,
    pub turns: u64,
    pub credits_earned: u64,
    pub gamecoins_earned: u64,
    pub game_over: bool,
}

impl Game<StdRng> {
    /// Default rules, seeded block stream.
    pub fn new(seed: u64) -> Self {
        Self::build(EngineConfig::default(), StdRng::seed_from_u64(seed))
    }

    pub fn with_config(seed: u64, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_source(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: EngineConfig, rng: R) -> Self {
        let mut g = Self {
            grid: BoardGrid::new(),
            pool: Vec::with_capacity(config.pool_size),
            generator: BlockGenerator::new(rng, config.odds, config.colors_enabled),
            config,
            score: 0,
            combo: 0,
            lines_cleared: 0,
            turns: 0,
            credits_earned: 0,
            gamecoins_earned: 0,
            game_over: false,
        };
        g.new_game();
        g
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resets every counter and the grid, then deals a full pool.
    ///
    /// The block stream continues; it is not reseeded.
    pub fn new_game(&mut self) {
        self.grid.clear_all();
        self.score = 0;
        self.combo = 0;
        self.lines_cleared = 0;
        self.turns = 0;
        self.credits_earned = 0;
        self.gamecoins_earned = 0;
        self.game_over = false;
        self.pool.clear();
        self.refill_pool();
    }

    pub fn refill_pool(&mut self) {
        while self.pool.len() < self.config.pool_size {
            let b = self.generator.generate();
            self.pool.push(b);
        }
    }

    // -------------------------------------------------------------------------
    // Game-over detection
    // -------------------------------------------------------------------------

    /// True iff some pooled block fits at some anchor.
    pub fn has_any_move(&self) -> bool {
        self.pool
            .iter()
            .any(|block| self.grid.fits_anywhere(block.shape))
    }

    /// Latches `game_over` when no pooled block fits anywhere. Returns the flag.
    pub fn evaluate_game_over(&mut self) -> bool {
        if !self.game_over && !self.has_any_move() {
            self.game_over = true;
        }
        self.game_over
    }

    pub fn combo_multiplier(&self) -> f64 {
        if self.config.combo_enabled {
            combo_multiplier(self.combo)
        } else {
            1.0
        }
    }

    // -------------------------------------------------------------------------
    // Move enumeration
    // -------------------------------------------------------------------------

    /// Every legal (pool index, anchor), ordered by index, then row, then column.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::new();
        if self.game_over {
            return out;
        }
        for (index, block) in self.pool.iter().enumerate() {
            for row in 0..GRID_SIZE as i32 {
                for col in 0..GRID_SIZE as i32 {
                    if self.grid.can_place(block.shape, row, col) {
                        out.push(Move { index, row, col });
                    }
                }
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Pure transition kernel
    // -------------------------------------------------------------------------

    /// Places `block` on a copy of `grid` and resolves clears.
    ///
    /// `combo` is the combo count before the turn, or `None` when combos are disabled.
    pub fn apply_block_to_grid(
        grid: &BoardGrid,
        block: &Block,
        row: i32,
        col: i32,
        combo: Option<u32>,
    ) -> Result<SimPlacement, PlaceError> {
        let mut placed = *grid;
        placed.place(block, row, col)?;

        let mut cleared = placed;
        let mut clear = resolve_lines(&mut cleared);
        if let Some(combo) = combo {
            clear.credits_earned = apply_combo_multiplier(clear.credits_earned, combo);
        }

        Ok(SimPlacement {
            grid_after_place: placed,
            grid_after_clear: cleared,
            clear,
        })
    }

    #[inline]
    fn combo_before(&self) -> Option<u32> {
        self.config.combo_enabled.then_some(self.combo)
    }

    fn checked_block(&self, index: usize) -> Result<Block, PlaceError> {
        if self.game_over {
            return Err(PlaceError::GameOver);
        }
        self.pool
            .get(index)
            .copied()
            .ok_or(PlaceError::UnknownBlockIndex {
                index,
                pool_len: self.pool.len(),
            })
    }

    /// What `mv` would do, without touching the session. `None` if the move is rejected.
    pub fn simulate(&self, mv: Move) -> Option<SimPlacement> {
        let block = self.checked_block(mv.index).ok()?;
        Self::apply_block_to_grid(&self.grid, &block, mv.row, mv.col, self.combo_before()).ok()
    }

    // -------------------------------------------------------------------------
    // Mutating turn
    // -------------------------------------------------------------------------

    /// Places pool block `index` at the anchor, consumes it, and resolves clears.
    ///
    /// Remaining pool indices shift down after a success. Does not refill the pool or
    /// re-evaluate game over; [`Game::on_placement`] runs the full turn.
    pub fn attempt_placement(
        &mut self,
        index: usize,
        row: i32,
        col: i32,
    ) -> Result<PlacementResult, PlaceError> {
        let block = self.checked_block(index)?;
        let sim = Self::apply_block_to_grid(&self.grid, &block, row, col, self.combo_before())?;

        self.grid = sim.grid_after_clear;
        self.pool.remove(index);

        if self.config.combo_enabled {
            self.combo = if sim.clear.lines_cleared > 0 {
                self.combo.saturating_add(1)
            } else {
                0
            };
        }

        self.score += sim.clear.score_delta();
        self.lines_cleared += u64::from(sim.clear.lines_cleared);
        self.credits_earned += u64::from(sim.clear.credits_earned);
        self.gamecoins_earned += u64::from(sim.clear.gamecoins_earned);
        self.turns += 1;

        Ok(PlacementResult {
            block,
            pool_len: self.pool.len(),
            clear: sim.clear,
        })
    }

    /// One full turn: placement, clear resolution, reward emission, refill, game-over check.
    ///
    /// The collector is called at most once, and only when the turn earned credits or
    /// gamecoins. Rejected turns change nothing and emit nothing.
    pub fn on_placement<C: RewardCollector + ?Sized>(
        &mut self,
        mv: Move,
        collector: &mut C,
    ) -> Result<TurnOutcome, PlaceError> {
        let placed = self.attempt_placement(mv.index, mv.row, mv.col)?;

        let reward = placed.clear.has_rewards().then_some(RewardEvent {
            credits: placed.clear.credits_earned,
            gamecoins: placed.clear.gamecoins_earned,
        });
        if let Some(event) = reward {
            collector.collect(event);
        }

        let refilled = self.pool.is_empty();
        if refilled {
            self.refill_pool();
        }
        let game_over = self.evaluate_game_over();

        Ok(TurnOutcome {
            block: placed.block,
            clear: placed.clear,
            score_delta: placed.clear.score_delta(),
            combo: self.combo,
            reward,
            refilled,
            game_over,
        })
    }

    pub fn render_ascii(&self) -> String {
        let border = format!("+{}+\n", "-".repeat(GRID_SIZE));
        let mut s = String::new();
        s.push_str(&border);
        for row in self.grid.render_rows() {
            s.push('|');
            s.push_str(&row);
            s.push_str("|\n");
        }
        s.push_str(&border);

        let pool: Vec<String> = self
            .pool
            .iter()
            .map(|b| format!("{}:{}", b.shape.glyph(), b.cell().glyph()))
            .collect();
        s.push_str(&format!(
            "pool=[{}] score={} combo={} (x{:.1}) lines={} turns={} credits={} gamecoins={} over={}\n",
            pool.join(" "),
            self.score,
            self.combo,
            self.combo_multiplier(),
            self.lines_cleared,
            self.turns,
            self.credits_earned,
            self.gamecoins_earned,
            self.game_over
        ));
        s
    }
}
