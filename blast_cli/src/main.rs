// blast_cli/src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use clap::Parser;

use block_blast_engine::{EngineConfig, GreedyPolicy, Policy, RandomPolicy, TierOdds};

use crate::rollout::{NoopSink, RolloutSink, Runner, RunnerConfig, TableSink};

#[derive(Parser, Debug)]
#[command(name = "blast_cli")]
struct Args {
    // ---------------- rollout sizing ----------------
    /// Total placements to execute across episodes.
    #[arg(long, default_value_t = 2000)]
    steps: u64,

    /// RNG seed for the block stream (and the random policy). If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Policy: random | greedy
    #[arg(long, default_value = "greedy")]
    policy: String,

    // ---------------- rules ----------------
    /// Blocks offered at once (1..=16).
    #[arg(long, default_value_t = 3)]
    pool_size: usize,

    /// Disable the combo multiplier (combo counter stays 0).
    #[arg(long)]
    no_combo: bool,

    /// Deal Normal blocks without a palette color.
    #[arg(long)]
    no_colors: bool,

    /// Tier draw above this value is Gold (unless it is also above --coin-above).
    #[arg(long, default_value_t = TierOdds::DEFAULT_GOLD_ABOVE)]
    gold_above: f64,

    /// Tier draw above this value is GameCoin.
    #[arg(long, default_value_t = TierOdds::DEFAULT_GAME_COIN_ABOVE)]
    coin_above: f64,

    // ---------------- visualization ----------------
    /**
     * Render board as ASCII every turn; value is sleep in ms (e.g. 30). Omit to disable rendering.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 30   (sleep 30ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N turns (only used with --verbosity 2).
    #[arg(long, default_value_t = 500)]
    report_every: u64,

    /// Print every reward-collection event as one JSON object per line.
    #[arg(long)]
    events: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let base_seed = args.seed.unwrap_or(12345);

    let engine = EngineConfig {
        pool_size: args.pool_size,
        combo_enabled: !args.no_combo,
        colors_enabled: !args.no_colors,
        odds: TierOdds {
            game_coin_above: args.coin_above,
            gold_above: args.gold_above,
        },
    };

    // Boxed so the CLI can switch implementations at runtime.
    let mut policy: Box<dyn Policy> = match args.policy.as_str() {
        "random" => Box::new(RandomPolicy::new(base_seed.wrapping_add(999))),
        "greedy" => Box::new(GreedyPolicy::new()),
        other => anyhow::bail!("unknown policy {other:?} (expected random | greedy)"),
    };

    // Rollout configuration (data only; no logic).
    let cfg = RunnerConfig {
        steps: args.steps,
        base_seed,
        engine,

        render_ms: args.render,

        verbosity: args.verbosity,
        report_every: args.report_every,
        print_events: args.events,

        policy_name: args.policy.clone(),
    };

    // Reporting sink:
    // - verbosity 2 => periodic table (unless report_every == 0)
    // - otherwise   => no-op
    let sink: Box<dyn RolloutSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(cfg, sink);
    let report = runner.run(&mut *policy)?;

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: policy={} combo={} colors={} pool={} turns_done={} elapsed={:.3}s turns/s={:.1} episodes_finished={} avg_ep_len={:.2} max_ep_len={} lines/turn={:.3} score/turn={:.2} avg_fill={:.3} max_combo={} total_score={} total_lines={} wallet_credits={} wallet_gamecoins={} collections={} (last_ep_len={} last_game_over={})",
        report.policy,
        report.combo_enabled,
        report.colors_enabled,
        report.pool_size,
        report.steps_done,
        report.elapsed_s,
        report.steps_per_s,
        report.episodes_finished,
        report.avg_ep_len,
        report.max_ep_len,
        report.lines_per_step,
        report.score_per_step,
        report.avg_fill,
        report.max_combo,
        report.total_score,
        report.total_lines,
        report.wallet.credits,
        report.wallet.gamecoins,
        report.wallet.collections,
        report.last_ep_len,
        report.last_game_over,
    );
    Ok(())
}
