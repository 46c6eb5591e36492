// engine/src/policy/greedy.rs
#![forbid(unsafe_code)]

use crate::engine::{ClearResult, Game, Move};

use super::base::Policy;

/// One-ply greedy search over every legal move.
///
/// Ranks by lines cleared, then credits, then gamecoins, then by how many empty cells the
/// resulting grid keeps. Ties go to the first move in `legal_moves()` order.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }

    fn rank(clear: &ClearResult, empty_after: usize) -> (u32, u32, u32, usize) {
        (
            clear.lines_cleared,
            clear.credits_earned,
            clear.gamecoins_earned,
            empty_after,
        )
    }
}

impl Policy for GreedyPolicy {
    fn choose_move(&mut self, g: &Game) -> Option<Move> {
        let mut best: Option<(Move, (u32, u32, u32, usize))> = None;
        for mv in g.legal_moves() {
            let Some(sim) = g.simulate(mv) else {
                continue;
            };
            let key = Self::rank(&sim.clear, sim.grid_after_clear.empty_count());
            match best {
                Some((_, best_key)) if best_key >= key => {}
                _ => best = Some((mv, key)),
            }
        }
        best.map(|(mv, _)| mv)
    }
}
