//! Uniform random-move strategy.
//!
//! Picks any legal move with equal probability. Used to drive matches in
//! tests and as a smoke test for the rules engine.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Martin Random"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let legal_moves = game_state.available_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move() {
        let game = GameState::new_game();
        let mut engine = RandomEngine::with_seed(7);

        for _ in 0..20 {
            let out = engine.choose_move(&game).expect("engine should answer");
            let mv = out.best_move.expect("start position has moves");
            assert!(game.available_moves().contains(&mv));
            assert_eq!(out.info_lines, vec!["info string random_engine legal_moves 20"]);
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let game = GameState::new_game();
        let mut a = RandomEngine::with_seed(42);
        let mut b = RandomEngine::with_seed(42);

        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&game).expect("engine should answer").best_move,
                b.choose_move(&game).expect("engine should answer").best_move
            );
        }
    }

    #[test]
    fn no_move_when_game_is_over() {
        let game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        let out = RandomEngine::with_seed(1).choose_move(&game).expect("engine should answer");
        assert_eq!(out.best_move, None);
    }
}
