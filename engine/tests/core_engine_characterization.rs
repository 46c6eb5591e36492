// engine/tests/core_engine_characterization.rs
#![forbid(unsafe_code)]

/**
 * Core engine characterization tests.
 *
 * Purpose:
 * - Lock in observable turn semantics: placement, clear resolution, reward emission,
 *   pool refill and game-over latching.
 * - Catch regressions in scoring, combo accounting and block generation.
 *
 * What is tested:
 * - End-to-end scenarios on the 10x10 board (no-clear turns, single-line gold clears).
 * - Reward arithmetic per cleared line, row/column crossing double count, combo multiplier.
 * - Rejected turns (bad anchor, stale index, after game over) are exact no-ops.
 * - Game over iff no pooled block fits anywhere.
 * - Block generator draw order, tier thresholds and color rules.
 * - Config validation and the reward payload wire shape.
 *
 * How the tests work:
 * - Boards and pools are set up directly through the public `grid` / `pool` fields.
 * - Where the refill matters, `ScriptedDraws` pins exactly which block is dealt next.
 */
use rand::SeedableRng;
use rand::rngs::StdRng;

use block_blast_engine::engine::{
    BlockGenerator, ConfigError, GRID_SIZE, MAX_POOL_SIZE, apply_combo_multiplier,
};
use block_blast_engine::{
    Block, BoardGrid, Cell, Color, EngineConfig, Game, Move, NoopCollector, PlaceError,
    RandomPolicy, Policy, RecordingCollector, RewardEvent, ScriptedDraws, ShapeKind, Tier,
    TierOdds, Wallet,
};

const N: i32 = GRID_SIZE as i32;

#[derive(Clone, Debug, PartialEq)]
struct GameSnapshot {
    grid: BoardGrid,
    pool: Vec<Block>,
    score: u64,
    combo: u32,
    lines_cleared: u64,
    turns: u64,
    credits_earned: u64,
    gamecoins_earned: u64,
    game_over: bool,
}

fn snapshot<R>(g: &Game<R>) -> GameSnapshot {
    GameSnapshot {
        grid: g.grid,
        pool: g.pool.clone(),
        score: g.score,
        combo: g.combo,
        lines_cleared: g.lines_cleared,
        turns: g.turns,
        credits_earned: g.credits_earned,
        gamecoins_earned: g.gamecoins_earned,
        game_over: g.game_over,
    }
}

fn single(tier: Tier) -> Block {
    Block::new(ShapeKind::Single, tier)
}

fn fill_row_except(grid: &mut BoardGrid, row: usize, skip: usize) {
    for c in 0..GRID_SIZE {
        if c != skip {
            grid.set(row, c, Cell::Normal(None));
        }
    }
}

/// Every cell filled except where `(row + col)` is even: no two empties touch horizontally
/// or vertically, and no line is full.
fn checkerboard() -> BoardGrid {
    let mut grid = BoardGrid::new();
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if (r + c) % 2 == 1 {
                grid.set(r, c, Cell::Normal(None));
            }
        }
    }
    grid
}

// -----------------------------------------------------------------------------
// End-to-end turns
// -----------------------------------------------------------------------------

#[test]
fn three_singles_along_row_zero_do_not_clear_and_refill_the_pool() {
    let mut g = Game::new(20260228);
    g.pool = vec![single(Tier::Normal); 3];
    let mut rewards = RecordingCollector::default();

    for col in 0..3 {
        let out = g.on_placement(Move::new(0, 0, col), &mut rewards).unwrap();
        assert_eq!(out.clear.lines_cleared, 0);
        assert_eq!(out.score_delta, 0);
        assert_eq!(out.refilled, col == 2);
        assert!(!out.game_over);
    }

    for col in 0..3 {
        assert_eq!(g.grid.get(0, col), Cell::Normal(None));
    }
    for col in 3..GRID_SIZE {
        assert_eq!(g.grid.get(0, col), Cell::Empty);
    }
    assert_eq!(g.score, 0);
    assert_eq!(g.turns, 3);
    assert_eq!(g.pool.len(), 3);
    assert!(rewards.events.is_empty());
}

#[test]
fn pool_is_not_refilled_while_blocks_remain() {
    let mut g = Game::new(1);
    g.pool = vec![single(Tier::Normal), single(Tier::Gold)];

    let placed = g.attempt_placement(0, 4, 4).unwrap();
    assert_eq!(placed.pool_len, 1);
    assert_eq!(placed.block, single(Tier::Normal));
    assert_eq!(g.pool, vec![single(Tier::Gold)]);
}

#[test]
fn completing_row_with_gold_single_clears_row_and_pays_five_credits() {
    let mut g = Game::new(7);
    fill_row_except(&mut g.grid, 3, 7);
    g.pool = vec![single(Tier::Gold)];
    let mut rewards = RecordingCollector::default();

    let out = g.on_placement(Move::new(0, 3, 7), &mut rewards).unwrap();

    assert_eq!(out.clear.lines_cleared, 1);
    assert_eq!(out.clear.credits_earned, 5);
    assert_eq!(out.clear.gamecoins_earned, 0);
    assert_eq!(out.score_delta, 100);
    for c in 0..GRID_SIZE {
        assert_eq!(g.grid.get(3, c), Cell::Empty);
    }
    assert_eq!(
        rewards.events,
        vec![RewardEvent {
            credits: 5,
            gamecoins: 0
        }]
    );
    assert_eq!(out.reward, rewards.events.first().copied());
    assert!(out.refilled);
}

#[test]
fn rewards_are_additive_per_cleared_line() {
    let mut g = Game::with_config(3, EngineConfig::plain()).unwrap();
    g.grid.set(4, 0, Cell::Gold);
    g.grid.set(4, 1, Cell::Gold);
    g.grid.set(4, 2, Cell::GameCoin);
    for c in 3..9 {
        g.grid.set(4, c, Cell::Normal(None));
    }
    g.pool = vec![single(Tier::Normal)];

    let out = g.on_placement(Move::new(0, 4, 9), &mut NoopCollector).unwrap();
    assert_eq!(out.clear.lines_cleared, 1);
    assert_eq!(out.clear.credits_earned, 10);
    assert_eq!(out.clear.gamecoins_earned, 1);
    assert_eq!(
        out.reward,
        Some(RewardEvent {
            credits: 10,
            gamecoins: 1
        })
    );
}

#[test]
fn crossing_row_and_column_pays_the_shared_cell_twice() {
    let mut g = Game::with_config(5, EngineConfig::plain()).unwrap();
    fill_row_except(&mut g.grid, 0, 0);
    for r in 1..GRID_SIZE {
        g.grid.set(r, 0, Cell::Normal(None));
    }
    g.pool = vec![single(Tier::Gold)];

    let out = g.on_placement(Move::new(0, 0, 0), &mut NoopCollector).unwrap();
    assert_eq!(out.clear.lines_cleared, 2);
    assert_eq!(out.clear.credits_earned, 10);
    assert_eq!(g.score, 200);
    assert!(g.grid.is_empty());
}

#[test]
fn score_grows_by_one_hundred_per_line_in_a_single_turn() {
    let mut g = Game::with_config(11, EngineConfig::plain()).unwrap();
    // Rows 2 and 3 miss only column 5; a vertical pair completes both.
    fill_row_except(&mut g.grid, 2, 5);
    fill_row_except(&mut g.grid, 3, 5);
    g.pool = vec![Block::new(ShapeKind::PairV, Tier::Normal)];

    let out = g.on_placement(Move::new(0, 2, 5), &mut NoopCollector).unwrap();
    assert_eq!(out.clear.lines_cleared, 2);
    assert_eq!(out.score_delta, 200);
    assert_eq!(g.score, 200);
    assert_eq!(g.lines_cleared, 2);
}

#[test]
fn zero_reward_turns_do_not_call_the_collector() {
    let mut g = Game::new(9);
    fill_row_except(&mut g.grid, 6, 0);
    g.pool = vec![single(Tier::Normal), single(Tier::Normal)];
    let mut wallet = Wallet::default();

    let out = g.on_placement(Move::new(0, 6, 0), &mut wallet).unwrap();
    assert_eq!(out.clear.lines_cleared, 1);
    assert_eq!(out.reward, None);
    assert_eq!(wallet.collections, 0);

    let out = g.on_placement(Move::new(0, 0, 0), &mut wallet).unwrap();
    assert_eq!(out.clear.lines_cleared, 0);
    assert_eq!(wallet, Wallet::default());
}

// -----------------------------------------------------------------------------
// Combo accounting
// -----------------------------------------------------------------------------

#[test]
fn combo_scales_credits_and_resets_on_a_quiet_turn() {
    let mut g = Game::new(42);
    fill_row_except(&mut g.grid, 0, 0);
    fill_row_except(&mut g.grid, 1, 0);
    g.pool = vec![
        single(Tier::Normal),
        single(Tier::Gold),
        single(Tier::Normal),
    ];
    let mut wallet = Wallet::default();

    let a = g.on_placement(Move::new(0, 0, 0), &mut wallet).unwrap();
    assert_eq!(a.clear.lines_cleared, 1);
    assert_eq!(a.combo, 1);
    assert_eq!(g.combo_multiplier(), 1.5);

    // 5 credits at x1.5, floored.
    let b = g.on_placement(Move::new(0, 1, 0), &mut wallet).unwrap();
    assert_eq!(b.clear.credits_earned, 7);
    assert_eq!(b.combo, 2);
    assert_eq!(g.combo_multiplier(), 2.0);

    let c = g.on_placement(Move::new(0, 5, 5), &mut wallet).unwrap();
    assert_eq!(c.clear.lines_cleared, 0);
    assert_eq!(c.combo, 0);
    assert_eq!(g.combo_multiplier(), 1.0);

    assert_eq!(wallet.credits, 7);
    assert_eq!(wallet.collections, 1);
    assert_eq!(g.credits_earned, 7);
}

#[test]
fn disabled_combo_pays_flat_credits_and_never_counts() {
    let mut g = Game::with_config(42, EngineConfig::plain()).unwrap();
    fill_row_except(&mut g.grid, 0, 0);
    fill_row_except(&mut g.grid, 1, 0);
    g.pool = vec![single(Tier::Normal), single(Tier::Gold)];

    let a = g.on_placement(Move::new(0, 0, 0), &mut NoopCollector).unwrap();
    assert_eq!(a.combo, 0);
    let b = g.on_placement(Move::new(0, 1, 0), &mut NoopCollector).unwrap();
    assert_eq!(b.clear.credits_earned, 5);
    assert_eq!(g.combo, 0);
    assert_eq!(g.combo_multiplier(), 1.0);
}

#[test]
fn combo_multiplier_caps_at_three() {
    assert_eq!(apply_combo_multiplier(5, 0), 5);
    assert_eq!(apply_combo_multiplier(5, 1), 7);
    assert_eq!(apply_combo_multiplier(5, 3), 12);
    assert_eq!(apply_combo_multiplier(5, 4), 15);
    assert_eq!(apply_combo_multiplier(5, 40), 15);
    assert_eq!(apply_combo_multiplier(0, 9), 0);
}

// -----------------------------------------------------------------------------
// Rejected turns
// -----------------------------------------------------------------------------

#[test]
fn invalid_anchor_is_a_noop() {
    let mut g = Game::new(4242);
    g.grid.set(2, 2, Cell::Gold);
    g.pool = vec![
        Block::new(ShapeKind::PairH, Tier::Normal),
        single(Tier::Normal),
    ];
    let before = snapshot(&g);
    let mut rewards = RecordingCollector::default();

    for (row, col) in [(2, 1), (2, 2), (-1, 0), (0, -1), (0, N - 1), (N, 0)] {
        let err = g
            .on_placement(Move::new(0, row, col), &mut rewards)
            .unwrap_err();
        assert_eq!(err, PlaceError::InvalidPlacement { row, col });
        assert!(err.is_invalid_placement());
        assert_eq!(snapshot(&g), before);
    }
    assert!(rewards.events.is_empty());
}

#[test]
fn stale_pool_index_is_rejected_like_a_bad_anchor() {
    let mut g = Game::new(5);
    let before = snapshot(&g);

    let err = g.attempt_placement(3, 0, 0).unwrap_err();
    assert_eq!(
        err,
        PlaceError::UnknownBlockIndex {
            index: 3,
            pool_len: 3
        }
    );
    assert!(err.is_invalid_placement());
    assert_eq!(snapshot(&g), before);
}

#[test]
fn grid_place_refuses_without_writing() {
    let mut grid = BoardGrid::new();
    grid.set(1, 1, Cell::GameCoin);
    let before = grid;

    let err = grid
        .place(&Block::new(ShapeKind::Square, Tier::Gold), 0, 0)
        .unwrap_err();
    assert_eq!(err, PlaceError::InvalidPlacement { row: 0, col: 0 });
    assert_eq!(grid, before);
}

// -----------------------------------------------------------------------------
// Game over
// -----------------------------------------------------------------------------

fn one_hole_board() -> BoardGrid {
    let mut grid = BoardGrid::new();
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if (r, c) != (5, 5) {
                grid.set(r, c, Cell::Normal(None));
            }
        }
    }
    grid
}

#[test]
fn single_empty_cell_is_game_over_for_a_pair() {
    let mut g = Game::new(1);
    g.grid = one_hole_board();
    g.pool = vec![Block::new(ShapeKind::PairH, Tier::Normal)];
    assert!(g.evaluate_game_over());
    assert!(g.legal_moves().is_empty());
}

#[test]
fn single_empty_cell_still_plays_for_a_single() {
    let mut g = Game::new(1);
    g.grid = one_hole_board();
    g.pool = vec![single(Tier::Normal)];
    assert!(!g.evaluate_game_over());
    assert_eq!(g.legal_moves(), vec![Move::new(0, 5, 5)]);
}

#[test]
fn refill_that_fits_nowhere_ends_the_game_and_latches() {
    // Plain rules, pool of one; every dealt block is a horizontal Normal pair.
    let cfg = EngineConfig {
        pool_size: 1,
        ..EngineConfig::plain()
    };
    let mut g = Game::with_source(cfg, ScriptedDraws::new(vec![0.2, 0.0])).unwrap();
    assert_eq!(g.pool, vec![Block::new(ShapeKind::PairH, Tier::Normal)]);

    g.grid = checkerboard();
    g.pool = vec![single(Tier::Normal)];

    let out = g.on_placement(Move::new(0, 0, 0), &mut NoopCollector).unwrap();
    assert!(out.refilled);
    assert!(out.game_over);
    assert!(g.game_over);
    assert_eq!(g.pool, vec![Block::new(ShapeKind::PairH, Tier::Normal)]);

    let before = snapshot(&g);
    let err = g
        .on_placement(Move::new(0, 0, 2), &mut NoopCollector)
        .unwrap_err();
    assert_eq!(err, PlaceError::GameOver);
    assert!(!err.is_invalid_placement());
    assert_eq!(snapshot(&g), before);

    // Latched even if the board would allow a move again.
    g.grid = BoardGrid::new();
    assert!(g.evaluate_game_over());
    assert!(g.legal_moves().is_empty());
}

#[test]
fn new_game_resets_session_but_continues_block_stream() {
    let mut g = Game::new(77);
    let mut p = RandomPolicy::new(77);
    for _ in 0..12 {
        let Some(mv) = p.choose_move(&g) else { break };
        g.on_placement(mv, &mut NoopCollector).unwrap();
    }
    g.game_over = true;

    g.new_game();
    assert!(g.grid.is_empty());
    assert_eq!(g.pool.len(), 3);
    assert_eq!(g.score, 0);
    assert_eq!(g.combo, 0);
    assert_eq!(g.turns, 0);
    assert_eq!(g.lines_cleared, 0);
    assert!(!g.game_over);
}

// -----------------------------------------------------------------------------
// Determinism and block generation
// -----------------------------------------------------------------------------

#[test]
fn deterministic_episode_for_same_seed() {
    let mut g1 = Game::new(20260228);
    let mut g2 = Game::new(20260228);
    let mut w1 = Wallet::default();
    let mut w2 = Wallet::default();

    for step in 0usize..200 {
        assert_eq!(snapshot(&g1), snapshot(&g2));
        let moves = g1.legal_moves();
        assert_eq!(moves, g2.legal_moves());
        if moves.is_empty() {
            break;
        }
        let mv = moves[(step * 31) % moves.len()];
        let o1 = g1.on_placement(mv, &mut w1).unwrap();
        let o2 = g2.on_placement(mv, &mut w2).unwrap();
        assert_eq!(o1, o2);
        if o1.game_over {
            break;
        }
    }
    assert_eq!(snapshot(&g1), snapshot(&g2));
    assert_eq!(w1, w2);
}

#[test]
fn tier_thresholds_are_strict() {
    let odds = TierOdds::default();
    assert_eq!(odds.tier_for(0.0), Tier::Normal);
    assert_eq!(odds.tier_for(0.8), Tier::Normal);
    assert_eq!(odds.tier_for(0.81), Tier::Gold);
    assert_eq!(odds.tier_for(0.95), Tier::Gold);
    assert_eq!(odds.tier_for(0.951), Tier::GameCoin);
}

#[test]
fn generator_draws_shape_then_tier_then_color() {
    let odds = TierOdds::default();

    let mut coin = BlockGenerator::new(ScriptedDraws::new(vec![0.0, 0.99]), odds, true);
    assert_eq!(coin.generate(), Block::new(ShapeKind::Single, Tier::GameCoin));

    let mut colored = BlockGenerator::new(ScriptedDraws::new(vec![0.99, 0.0, 0.5]), odds, true);
    assert_eq!(
        colored.generate(),
        Block::normal(ShapeKind::EllFlipped, Some(Color::Green))
    );
}

#[test]
fn color_draw_is_skipped_when_colors_are_disabled() {
    let odds = TierOdds::default();
    let script = vec![0.3, 0.1, 0.99, 0.0];

    let mut plain = BlockGenerator::new(ScriptedDraws::new(script.clone()), odds, false);
    assert_eq!(plain.generate(), Block::normal(ShapeKind::PairV, None));
    assert_eq!(plain.generate(), Block::normal(ShapeKind::EllFlipped, None));

    let mut colored = BlockGenerator::new(ScriptedDraws::new(script), odds, true);
    assert_eq!(
        colored.generate(),
        Block::normal(ShapeKind::PairV, Some(Color::Purple))
    );
    assert_eq!(
        colored.generate(),
        Block::normal(ShapeKind::Single, Some(Color::Red))
    );
}

#[test]
fn seeded_generators_replay_identical_streams() {
    let odds = TierOdds::default();
    let mut a = BlockGenerator::new(StdRng::seed_from_u64(9001), odds, true);
    let mut b = BlockGenerator::new(StdRng::seed_from_u64(9001), odds, true);
    for _ in 0..200 {
        assert_eq!(a.generate(), b.generate());
    }
}

#[test]
fn only_normal_blocks_carry_colors() {
    let odds = TierOdds::default();
    let mut colored = BlockGenerator::new(StdRng::seed_from_u64(5), odds, true);
    let mut plain = BlockGenerator::new(StdRng::seed_from_u64(5), odds, false);
    let mut seen = [false; 3];

    for _ in 0..2000 {
        let b = colored.generate();
        match b.tier {
            Tier::Normal => assert!(b.color.is_some()),
            Tier::Gold | Tier::GameCoin => assert!(b.color.is_none()),
        }
        seen[b.tier as usize] = true;
        assert!(plain.generate().color.is_none());
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn cell_codes_tiers_and_colors() {
    let cases = [
        (Cell::Empty, 0, None, None),
        (Cell::Normal(None), 1, Some(Tier::Normal), None),
        (
            Cell::Normal(Some(Color::Blue)),
            1,
            Some(Tier::Normal),
            Some(Color::Blue),
        ),
        (Cell::Gold, 2, Some(Tier::Gold), None),
        (Cell::GameCoin, 3, Some(Tier::GameCoin), None),
    ];
    for (cell, idx, tier, color) in cases {
        assert_eq!(cell.idx(), idx, "{cell:?}");
        assert_eq!(cell.tier(), tier, "{cell:?}");
        assert_eq!(cell.color(), color, "{cell:?}");
    }
    // Color survives only on Normal cells.
    assert_eq!(Cell::filled(Tier::Gold, Some(Color::Red)), Cell::Gold);
    assert_eq!(
        Block::normal(ShapeKind::Single, Some(Color::Red)).cell().color(),
        Some(Color::Red)
    );
}

#[test]
fn grid_from_cells_round_trips_the_matrix() {
    let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
    cells[0][9] = Cell::Gold;
    cells[9][0] = Cell::GameCoin;
    cells[4][4] = Cell::Normal(Some(Color::Yellow));

    let grid = BoardGrid::from_cells(cells);
    assert_eq!(grid.cells(), &cells);
    assert_eq!(grid.get(0, 9), Cell::Gold);
    assert_eq!(grid.empty_count(), GRID_SIZE * GRID_SIZE - 3);
    assert!(!grid.can_place(ShapeKind::Square, 3, 3));
}

#[test]
fn catalog_is_the_fixed_eight_shapes() {
    let areas: Vec<usize> = ShapeKind::all().iter().map(|s| s.area()).collect();
    assert_eq!(areas, vec![1, 2, 2, 4, 3, 3, 3, 3]);
    for &s in ShapeKind::all() {
        let mask = s.mask();
        assert!(mask.iter().all(|row| row.len() == s.cols()));
        assert!(s.rows() <= 3 && s.cols() <= 3);
    }
    for ell in [ShapeKind::Ell, ShapeKind::EllFlipped] {
        assert_eq!((ell.rows(), ell.cols(), ell.area()), (2, 2, 3));
    }
}

// -----------------------------------------------------------------------------
// Config and payload
// -----------------------------------------------------------------------------

#[test]
fn invalid_configs_are_rejected() {
    let empty = EngineConfig {
        pool_size: 0,
        ..EngineConfig::default()
    };
    assert_eq!(Game::with_config(1, empty).unwrap_err(), ConfigError::EmptyPool);

    for pool_size in [MAX_POOL_SIZE + 1, 1_000_000_000, usize::MAX] {
        let huge = EngineConfig {
            pool_size,
            ..EngineConfig::default()
        };
        assert_eq!(
            Game::with_config(1, huge).unwrap_err(),
            ConfigError::PoolTooLarge {
                pool_size,
                max: MAX_POOL_SIZE
            }
        );
    }
    let largest = EngineConfig {
        pool_size: MAX_POOL_SIZE,
        ..EngineConfig::default()
    };
    let g = Game::with_config(1, largest).unwrap();
    assert_eq!(g.pool.len(), MAX_POOL_SIZE);
    assert_eq!(g.config(), &largest);

    let mut out_of_range = EngineConfig::default();
    out_of_range.odds.gold_above = 1.5;
    assert!(matches!(
        out_of_range.validate(),
        Err(ConfigError::ThresholdOutOfRange {
            name: "gold_above",
            ..
        })
    ));

    let mut inverted = EngineConfig::default();
    inverted.odds.gold_above = 0.97;
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::ThresholdOrder { .. })
    ));

    assert!(EngineConfig::default().validate().is_ok());
    assert!(EngineConfig::plain().validate().is_ok());
}

#[test]
fn reward_payload_wire_shape() {
    let ev = RewardEvent {
        credits: 10,
        gamecoins: 1,
    };
    let json = serde_json::to_string(&ev).unwrap();
    assert_eq!(json, r#"{"credits":10,"gamecoins":1}"#);
    let back: RewardEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ev);
}
