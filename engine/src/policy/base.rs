// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Game, Move};

/// Policy chooses a placement for the current state.
///
/// Returns a legal [`Move`], or `None` if no pooled block fits anywhere.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_move(&mut self, g: &Game) -> Option<Move>;
}
