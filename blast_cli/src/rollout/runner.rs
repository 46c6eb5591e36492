// blast_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use block_blast_engine::{EngineConfig, Game, Policy};

use super::rewards::RewardLog;
use super::sinks::{ReportRow, RolloutSink};
use super::stats::{FinalReport, RolloutStats};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 200;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Total placements to execute across episodes.
    pub steps: u64,
    /// Seeds the single block stream; episodes continue it rather than reseeding.
    pub base_seed: u64,
    pub engine: EngineConfig,

    /// Used only for the final report string.
    pub policy_name: String,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N turns (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    /// Echo every reward event as a JSON line.
    pub print_events: bool,

    // ---------------- rendering ----------------
    /// If Some(ms): render every turn; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    pub fn run(&mut self, policy: &mut dyn Policy) -> anyhow::Result<FinalReport> {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.steps);
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .context("invalid progress template")?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = RolloutStats::new();
        let mut rewards = RewardLog::new(cfg.print_events);

        let mut game = Game::with_config(cfg.base_seed, cfg.engine)
            .context("rejected engine configuration")?;

        // Totals across completed episodes (live totals include current episode too).
        let mut total_lines_finished: u64 = 0;
        let mut total_score_finished: u64 = 0;

        if cfg.render_ms.is_some() {
            print!("{}", game.render_ascii());
        }

        while stats.steps_done < cfg.steps {
            // ------------------------------------------------------------
            // Episode boundary: finalize counters, then reset.
            // ------------------------------------------------------------
            if game.game_over {
                stats.on_episode_end();

                total_lines_finished += game.lines_cleared;
                total_score_finished += game.score;

                game.new_game();

                if cfg.render_ms.is_some() {
                    println!(
                        "=== reset: episodes_finished={} avg_ep_len={:.2} max_ep_len={} ===",
                        stats.episodes_finished,
                        stats.avg_ep_len(),
                        stats.episode_len_max
                    );
                    print!("{}", game.render_ascii());
                }
                continue;
            }

            // ------------------------------------------------------------
            // One turn: policy picks a (block, anchor) pair.
            // ------------------------------------------------------------
            let mv = match policy.choose_move(&game) {
                Some(mv) => mv,
                None => {
                    if !game.evaluate_game_over() {
                        anyhow::bail!(
                            "policy {} passed with {} legal moves available",
                            cfg.policy_name,
                            game.legal_moves().len()
                        );
                    }
                    continue;
                }
            };

            let out = game
                .on_placement(mv, &mut rewards)
                .with_context(|| format!("policy {} chose {mv:?}", cfg.policy_name))?;

            stats.on_step(&out, game.grid.empty_count());

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            if let Some(ms) = cfg.render_ms {
                println!(
                    "turn={} block={:?} at ({},{}) lines={} combo={}",
                    stats.steps_done,
                    out.block.shape,
                    mv.row,
                    mv.col,
                    out.clear.lines_cleared,
                    out.combo
                );
                print!("{}", game.render_ascii());
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            }

            // ------------------------------------------------------------
            // Periodic table report (verbosity == 2 only).
            // ------------------------------------------------------------
            if cfg.verbosity == 2
                && cfg.report_every > 0
                && (stats.steps_done % cfg.report_every == 0)
            {
                let live_total_lines = total_lines_finished + game.lines_cleared;
                let live_total_score = total_score_finished + game.score;

                let row = ReportRow {
                    step: stats.steps_done,
                    steps_total: cfg.steps,
                    sps: stats.steps_per_sec(),

                    episodes_finished: stats.episodes_finished,
                    avg_ep_len: stats.avg_ep_len(),
                    max_ep_len: stats.episode_len_max,

                    lines_per_step: stats.lines_per_step(live_total_lines),
                    score_per_step: stats.score_per_step(live_total_score),
                    clear_rate: stats.clear_rate(),

                    avg_fill: stats.avg_fill(),
                    max_combo: stats.max_combo,

                    credits: rewards.wallet.credits,
                    gamecoins: rewards.wallet.gamecoins,
                };

                self.sink.on_report_row(&row, pb.as_ref());
            }

            if cfg.verbosity >= 1 && (stats.steps_done % LIVE_EVERY == 0) {
                let live_total_lines = total_lines_finished + game.lines_cleared;
                let live_total_score = total_score_finished + game.score;

                let lps = stats.lines_per_step(live_total_lines);
                let sps = stats.score_per_step(live_total_score);

                if let Some(ref pb) = pb {
                    pb.set_message(stats.live_msg(lps, sps, &rewards.wallet));
                }
            }
        }

        let total_lines = total_lines_finished + game.lines_cleared;
        let total_score = total_score_finished + game.score;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report(
            &cfg.policy_name,
            &cfg.engine,
            total_lines,
            total_score,
            rewards.wallet,
            game.game_over,
        ))
    }
}
