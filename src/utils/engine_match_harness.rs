//! Engine-vs-engine game orchestration.
//!
//! Asks the engine for the side to move for a move, plays it, and repeats
//! until the position reports a result or the ply cap is reached.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

/// Match configuration.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Hard cap on plies played; the match stops unfinished once reached.
    pub max_plies: u16,
    /// Print the board and each engine's info lines as the game goes.
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 400,
            verbose: false,
        }
    }
}

/// Result of a single match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// `None` when the ply cap stopped the game first.
    pub result: Option<GameResult>,
    pub winner: Option<Color>,
    /// Full-move number of the final position.
    pub move_number: u16,
    pub moves_played: Vec<ChessMove>,
    pub final_fen: String,
}

impl MatchResult {
    pub fn moves_played_text(&self) -> String {
        self.moves_played
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Play a match from the standard starting position.
pub fn play_engine_match<'a>(
    engine_white: &'a mut dyn Engine,
    engine_black: &'a mut dyn Engine,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    play_engine_match_from_state(GameState::new_game(), engine_white, engine_black, config)
}

/// Play a match from a caller-provided position.
pub fn play_engine_match_from_state<'a>(
    mut game: GameState,
    engine_white: &'a mut dyn Engine,
    engine_black: &'a mut dyn Engine,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    engine_white.new_game();
    engine_black.new_game();

    let mut moves_played = Vec::<ChessMove>::new();

    while game.result().is_none() && moves_played.len() < usize::from(config.max_plies) {
        let engine = match game.color_to_move() {
            Color::Light => &mut *engine_white,
            Color::Dark => &mut *engine_black,
        };

        let out = engine.choose_move(&game)?;
        if config.verbose {
            for line in &out.info_lines {
                println!("[{}] {line}", engine.name());
            }
        }

        let chosen = out
            .best_move
            .ok_or_else(|| ChessErrors::IllegalMove(format!("{} returned no move", engine.name())))?;
        game.make_move(&chosen)?;
        moves_played.push(chosen);

        if config.verbose {
            println!("{game}\n");
        }
    }

    Ok(MatchResult {
        result: game.result(),
        winner: game.winner(),
        move_number: game.number_of_moves(),
        moves_played,
        final_fen: game.get_fen(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::EngineOutput;

    struct ScriptedEngine {
        moves: Vec<&'static str>,
        next: usize,
    }

    impl Engine for ScriptedEngine {
        fn name(&self) -> &str {
            "scripted"
        }

        fn choose_move(&mut self, game: &GameState) -> ChessResult<EngineOutput> {
            let text = self.moves[self.next];
            self.next += 1;
            Ok(EngineOutput {
                best_move: Some(game.find_move(text)?),
                info_lines: Vec::new(),
            })
        }
    }

    #[test]
    fn scripted_fools_mate_reports_the_winner() {
        let mut white = ScriptedEngine {
            moves: vec!["f2f3", "g2g4"],
            next: 0,
        };
        let mut black = ScriptedEngine {
            moves: vec!["e7e5", "d8h4"],
            next: 0,
        };

        let result = play_engine_match(&mut white, &mut black, &MatchConfig::default())
            .expect("match should complete");

        assert_eq!(result.result, Some(GameResult::Checkmate));
        assert_eq!(result.winner, Some(Color::Dark));
        assert_eq!(result.move_number, 3);
        assert_eq!(result.moves_played_text(), "f2f3 e7e5 g2g4 d8h4");
    }

    #[test]
    fn ply_cap_stops_an_unfinished_game() {
        let mut white = RandomEngine::with_seed(1);
        let mut black = RandomEngine::with_seed(2);
        let config = MatchConfig {
            max_plies: 6,
            verbose: false,
        };

        let result =
            play_engine_match(&mut white, &mut black, &config).expect("match should complete");

        assert_eq!(result.moves_played.len(), 6);
        assert_eq!(result.result, None);
        assert_eq!(result.winner, None);
        assert_eq!(result.move_number, 4);
    }

    #[test]
    fn random_games_finish_with_a_result_or_the_cap() {
        for seed in 0..4u64 {
            let mut white = RandomEngine::with_seed(seed);
            let mut black = RandomEngine::with_seed(seed + 100);
            let result = play_engine_match(&mut white, &mut black, &MatchConfig::default())
                .expect("match should complete");

            let replay_fen = {
                let mut game = GameState::new_game();
                for mv in &result.moves_played {
                    game.make_move(mv).expect("replayed move should be legal");
                }
                game.get_fen()
            };
            assert_eq!(replay_fen, result.final_fen);
            assert!(result.result.is_some() || result.moves_played.len() == 400);
        }
    }

    #[test]
    fn starting_position_can_be_supplied() {
        let game = GameState::from_fen("7k/8/5Q2/6K1/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let mut white = ScriptedEngine {
            moves: vec!["f6f7"],
            next: 0,
        };
        let mut black = RandomEngine::with_seed(3);

        let result =
            play_engine_match_from_state(game, &mut white, &mut black, &MatchConfig::default())
                .expect("match should complete");

        assert_eq!(result.result, Some(GameResult::Stalemate));
        assert_eq!(result.winner, None);
    }
}
