// engine/src/engine/random.rs
#![forbid(unsafe_code)]

use rand::{Rng, RngCore};

/// Source of uniform draws in `[0, 1)` used for shape, tier and color selection.
///
/// Any `rand` generator is a source; seed a `StdRng` for reproducible games.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Replays an explicit list of draws, cycling when exhausted.
///
/// Lets tests pin exactly which block the generator produces next.
#[derive(Clone, Debug)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedDraws {
    /// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws
            .into()
            .into_iter()
            .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { draws, pos: 0 }
    }
}

impl RandomSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let u = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        u
    }
}
