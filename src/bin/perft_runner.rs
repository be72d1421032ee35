//! Perft divide runner.
//!
//! Run with:
//! `cargo run --release --bin perft_runner -- "<fen>" <depth> <threads>`
//!
//! All arguments are optional; the defaults are the starting position,
//! depth 5 and the machine's available parallelism.

use martin_chess::chess_errors::ChessResult;
use martin_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use martin_chess::game_state::game_state::GameState;
use martin_chess::move_generation::perft::{perft_divide, perft_multi_threaded, PerftConfig};
use std::env;
use std::time::Instant;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() -> ChessResult<()> {
    let args: Vec<String> = env::args().collect();
    let fen = args
        .get(1)
        .map(String::as_str)
        .unwrap_or(STARTING_POSITION_FEN);
    let depth: u8 = parse_arg(&args, 2, 5u8);
    let config = PerftConfig {
        threads: parse_arg(&args, 3, PerftConfig::default().threads),
    };

    let game = GameState::from_fen(fen)?;
    println!("{game}\n");
    println!(
        "perft depth={} threads={}",
        depth,
        config.normalized_threads()
    );

    let start = Instant::now();
    let divide = perft_divide(&game, depth)?;
    for (mv, nodes) in &divide {
        println!("{mv}: {nodes}");
    }
    let divide_ms = start.elapsed().as_millis();

    let start = Instant::now();
    let total = perft_multi_threaded(&game, depth, &config)?;
    let threaded_ms = start.elapsed().as_millis();

    println!();
    println!("moves: {}", divide.len());
    println!("nodes: {total}");
    println!("divide: {divide_ms} ms, threaded: {threaded_ms} ms");
    Ok(())
}
