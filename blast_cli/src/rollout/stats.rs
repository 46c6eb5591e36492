// blast_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use block_blast_engine::{EngineConfig, GRID_SIZE, TurnOutcome, Wallet};

const BOARD_CELLS: f64 = (GRID_SIZE * GRID_SIZE) as f64;

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub episodes_finished: u64,
    pub ep_len: u64,
    pub episode_len_sum: u64,
    pub episode_len_max: u64,

    pub steps_done: u64,

    // board fill after each turn (occupied / total cells)
    pub sum_fill: f64,
    pub max_combo: u32,

    // turns that cleared at least one line
    pub clearing_turns: u64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            episodes_finished: 0,
            ep_len: 0,
            episode_len_sum: 0,
            episode_len_max: 0,
            steps_done: 0,
            sum_fill: 0.0,
            max_combo: 0,
            clearing_turns: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per accepted turn, with the board's empty-cell count after the turn.
    pub fn on_step(&mut self, out: &TurnOutcome, empty_cells: usize) {
        self.steps_done += 1;
        self.ep_len += 1;

        self.sum_fill += 1.0 - empty_cells as f64 / BOARD_CELLS;
        self.max_combo = self.max_combo.max(out.combo);

        if out.clear.lines_cleared > 0 {
            self.clearing_turns += 1;
        }
    }

    /// Call when an episode terminates (game_over), before starting a new game.
    pub fn on_episode_end(&mut self) {
        self.episodes_finished += 1;
        self.episode_len_sum += self.ep_len;
        self.episode_len_max = self.episode_len_max.max(self.ep_len);
        self.ep_len = 0;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    fn per_step(&self, total: f64) -> f64 {
        if self.steps_done > 0 {
            total / self.steps_done as f64
        } else {
            0.0
        }
    }

    pub fn steps_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.steps_done as f64 / dt
        } else {
            0.0
        }
    }

    pub fn avg_ep_len(&self) -> f64 {
        if self.episodes_finished > 0 {
            self.episode_len_sum as f64 / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_fill(&self) -> f64 {
        self.per_step(self.sum_fill)
    }

    pub fn clear_rate(&self) -> f64 {
        self.per_step(self.clearing_turns as f64)
    }

    pub fn lines_per_step(&self, live_total_lines: u64) -> f64 {
        self.per_step(live_total_lines as f64)
    }

    pub fn score_per_step(&self, live_total_score: u64) -> f64 {
        self.per_step(live_total_score as f64)
    }

    pub fn live_msg(&self, lps: f64, spscore: f64, wallet: &Wallet) -> String {
        format!(
            "tps={:.1} eps={} avg_ep={:.1} max_ep={} l/turn={:.3} score/turn={:.2} fill={:.3} maxCombo={} credits={} coins={}",
            self.steps_per_sec(),
            self.episodes_finished,
            self.avg_ep_len(),
            self.episode_len_max,
            lps,
            spscore,
            self.avg_fill(),
            self.max_combo,
            wallet.credits,
            wallet.gamecoins,
        )
    }

    pub fn final_report(
        &self,
        policy_name: &str,
        engine: &EngineConfig,
        total_lines: u64,
        total_score: u64,
        wallet: Wallet,
        last_game_over: bool,
    ) -> FinalReport {
        FinalReport {
            policy: policy_name.to_string(),
            combo_enabled: engine.combo_enabled,
            colors_enabled: engine.colors_enabled,
            pool_size: engine.pool_size,

            steps_done: self.steps_done,
            elapsed_s: self.elapsed_secs(),
            steps_per_s: self.steps_per_sec(),
            episodes_finished: self.episodes_finished,
            avg_ep_len: self.avg_ep_len(),
            max_ep_len: self.episode_len_max,
            lines_per_step: self.lines_per_step(total_lines),
            score_per_step: self.score_per_step(total_score),
            avg_fill: self.avg_fill(),
            max_combo: self.max_combo,
            total_score,
            total_lines,
            wallet,
            last_ep_len: self.ep_len,
            last_game_over,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub policy: String,
    pub combo_enabled: bool,
    pub colors_enabled: bool,
    pub pool_size: usize,

    pub steps_done: u64,
    pub elapsed_s: f64,
    pub steps_per_s: f64,

    pub episodes_finished: u64,
    pub avg_ep_len: f64,
    pub max_ep_len: u64,

    pub lines_per_step: f64,
    pub score_per_step: f64,

    pub avg_fill: f64,
    pub max_combo: u32,

    pub total_score: u64,
    pub total_lines: u64,
    pub wallet: Wallet,

    pub last_ep_len: u64,
    pub last_game_over: bool,
}
