//! Player strategy contract.
//!
//! A strategy looks at a position and proposes one of its legal moves. It
//! must not mutate the position it is given; strategies that want to explore
//! play on their own clone (`GameState::from_game`).

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the position has no legal move.
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Called before the first move of a new game.
    fn new_game(&mut self) {}

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput>;
}
