//! Plays two seeded random engines against each other.
//!
//! Run with:
//! `cargo run --release --bin random_match -- <white_seed> <black_seed>`
//! `cargo run --release --bin random_match -- 1 2 --verbose`

use martin_chess::chess_errors::ChessResult;
use martin_chess::engines::engine_random::RandomEngine;
use martin_chess::utils::engine_match_harness::{play_engine_match, MatchConfig};
use std::env;

fn main() -> ChessResult<()> {
    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let seeds: Vec<u64> = args.iter().filter_map(|a| a.parse().ok()).collect();

    let mut white = match seeds.first() {
        Some(seed) => RandomEngine::with_seed(*seed),
        None => RandomEngine::new(),
    };
    let mut black = match seeds.get(1) {
        Some(seed) => RandomEngine::with_seed(*seed),
        None => RandomEngine::new(),
    };

    let result = play_engine_match(
        &mut white,
        &mut black,
        &MatchConfig {
            verbose,
            ..MatchConfig::default()
        },
    )?;

    println!("moves: {}", result.moves_played_text());
    println!("final: {}", result.final_fen);
    match (result.result, result.winner) {
        (Some(outcome), Some(color)) => {
            println!("{outcome:?} after {} moves, {color:?} wins", result.move_number)
        }
        (Some(outcome), None) => println!("{outcome:?} after {} moves", result.move_number),
        (None, _) => println!("stopped after {} plies", result.moves_played.len()),
    }
    Ok(())
}
