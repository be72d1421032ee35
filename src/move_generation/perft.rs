//! Perft: exhaustive leaf counts of the legal move tree.
//!
//! Recursion runs move/undo on a private copy of the placement. Draw rules
//! are not applied, so counts match the published reference figures.

use std::num::NonZeroUsize;
use std::thread;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, revert_applied};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::fen_parser::parse_fen;

/// Leaf statistics collected by `perft_counts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Worker settings for `perft_multi_threaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerftConfig {
    pub threads: usize,
}

impl PerftConfig {
    #[inline]
    pub fn normalized_threads(&self) -> usize {
        self.threads.max(1)
    }
}

impl Default for PerftConfig {
    fn default() -> Self {
        Self {
            threads: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// Number of leaf positions `depth` plies below `game`.
pub fn perft(game: &GameState, depth: u8) -> ChessResult<u64> {
    let mut board = game.board().clone();
    let mut state = game.state().clone();
    count_nodes(&mut board, &mut state, depth)
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(game: &GameState, depth: u8) -> ChessResult<Vec<(ChessMove, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut board = game.board().clone();
    let mut state = game.state().clone();
    let moves = generate_legal_moves(&board, &mut state)?;

    moves
        .into_iter()
        .map(|mv| {
            let nodes = count_after(&mut board, &state, &mv, depth - 1)?;
            Ok((mv, nodes))
        })
        .collect()
}

/// Leaf count plus move-type statistics for the moves reaching each leaf.
///
/// Visits every leaf and regenerates moves there, so it is far slower
/// than `perft`.
pub fn perft_counts(game: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut board = game.board().clone();
    let mut state = game.state().clone();
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    collect_counts(&mut board, &mut state, depth, &mut total)?;
    Ok(total)
}

/// `perft` with the root moves spread across worker threads.
///
/// Each worker parses its own copy of the position from FEN and takes the
/// root moves whose index is congruent to its id modulo the worker count.
pub fn perft_multi_threaded(game: &GameState, depth: u8, config: &PerftConfig) -> ChessResult<u64> {
    if depth <= 1 {
        return perft(game, depth);
    }

    let fen = game.get_fen();
    let mut root_state = game.state().clone();
    let root_moves = generate_legal_moves(game.board(), &mut root_state)?;
    let workers = config.normalized_threads().min(root_moves.len()).max(1);

    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let fen = fen.clone();
        let assigned: Vec<ChessMove> = root_moves
            .iter()
            .enumerate()
            .filter(|(index, _)| index % workers == worker)
            .map(|(_, mv)| *mv)
            .collect();

        handles.push(thread::spawn(move || -> ChessResult<u64> {
            let (mut board, mut state) = parse_fen(&fen)?;
            generate_legal_moves(&board, &mut state)?;
            let mut nodes = 0;
            for mv in &assigned {
                nodes += count_after(&mut board, &state, mv, depth - 1)?;
            }
            Ok(nodes)
        }));
    }

    let mut total = 0;
    for handle in handles {
        total += handle.join().map_err(|_| ChessErrors::WorkerPanicked)??;
    }

    Ok(total)
}

fn count_nodes(board: &mut Board, state: &mut BoardState, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_legal_moves(board, state)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in &moves {
        nodes += count_after(board, state, mv, depth - 1)?;
    }
    Ok(nodes)
}

fn count_after(board: &mut Board, state: &BoardState, mv: &ChessMove, depth: u8) -> ChessResult<u64> {
    let (mut next, applied) = apply_move(board, state, mv)?;
    let nodes = count_nodes(board, &mut next, depth);
    revert_applied(board, mv, &applied);
    nodes
}

fn collect_counts(
    board: &mut Board,
    state: &mut BoardState,
    depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    let moves = generate_legal_moves(board, state)?;

    for mv in &moves {
        let (mut next, applied) = apply_move(board, state, mv)?;

        let outcome = if depth == 1 {
            record_leaf(board, &mut next, mv, applied.captured_square, counts)
        } else {
            collect_counts(board, &mut next, depth - 1, counts)
        };

        revert_applied(board, mv, &applied);
        outcome?;
    }

    Ok(())
}

fn record_leaf(
    board: &Board,
    next: &mut BoardState,
    mv: &ChessMove,
    captured_square: Option<u8>,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    let mut leaf = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if let Some(square) = captured_square {
        leaf.captures = 1;
        if square != mv.to {
            leaf.en_passant = 1;
        }
    }
    if mv.rook_move.is_some() {
        leaf.castles = 1;
    }
    if mv.promotion.is_some() {
        leaf.promotions = 1;
    }

    let replies = generate_legal_moves(board, next)?;
    if next.side(next.side_to_move).in_check {
        leaf.checks = 1;
        if replies.is_empty() {
            leaf.checkmates = 1;
        }
    }

    counts.merge(leaf);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const KIWIPETE_FEN: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4_FEN: &str =
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    const POSITION_6_FEN: &str =
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn assert_counts(fen: &str, expected: &[u64]) {
        let game = game(fen);
        for (depth, nodes) in expected.iter().enumerate() {
            let depth = depth as u8 + 1;
            assert_eq!(perft(&game, depth), Ok(*nodes), "{fen} at depth {depth}");
        }
    }

    #[test]
    fn depth_zero_is_a_single_node() {
        assert_eq!(perft(&game(STARTING_POSITION_FEN), 0), Ok(1));
        assert_eq!(perft_divide(&game(STARTING_POSITION_FEN), 0), Ok(Vec::new()));
    }

    #[test]
    fn starting_position_counts() {
        assert_counts(STARTING_POSITION_FEN, &[20, 400, 8_902, 197_281]);
    }

    #[test]
    fn kiwipete_counts() {
        assert_counts(KIWIPETE_FEN, &[48, 2_039, 97_862]);
    }

    #[test]
    fn position_3_counts() {
        assert_counts(POSITION_3_FEN, &[14, 191, 2_812, 43_238, 674_624]);
    }

    #[test]
    fn position_4_counts() {
        assert_counts(POSITION_4_FEN, &[6, 264, 9_467, 422_333]);
    }

    #[test]
    fn position_5_counts() {
        assert_counts(POSITION_5_FEN, &[44, 1_486, 62_379, 2_103_487]);
    }

    #[test]
    fn position_6_counts() {
        assert_counts(POSITION_6_FEN, &[46, 2_079, 89_890, 3_894_594]);
    }

    #[test]
    #[ignore = "slow in debug builds; run with --release"]
    fn starting_position_depth_5() {
        assert_eq!(perft(&game(STARTING_POSITION_FEN), 5), Ok(4_865_609));
    }

    #[test]
    #[ignore = "slow in debug builds; run with --release"]
    fn position_3_depth_6() {
        assert_eq!(perft(&game(POSITION_3_FEN), 6), Ok(11_030_083));
    }

    #[test]
    fn leaf_statistics_match_reference_tables() {
        assert_eq!(
            perft_counts(&game(STARTING_POSITION_FEN), 3),
            Ok(PerftCounts {
                nodes: 8_902,
                captures: 34,
                checks: 12,
                ..PerftCounts::default()
            })
        );
        assert_eq!(
            perft_counts(&game(KIWIPETE_FEN), 2),
            Ok(PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                checks: 3,
                ..PerftCounts::default()
            })
        );
        assert_eq!(
            perft_counts(&game(POSITION_3_FEN), 4),
            Ok(PerftCounts {
                nodes: 43_238,
                captures: 3_348,
                en_passant: 123,
                checks: 1_680,
                checkmates: 17,
                ..PerftCounts::default()
            })
        );
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = game(KIWIPETE_FEN);
        let divide = perft_divide(&game, 2).expect("divide should run");

        assert_eq!(divide.len(), 48);
        assert_eq!(divide.iter().map(|(_, nodes)| nodes).sum::<u64>(), 2_039);
        assert_eq!(
            divide.iter().map(|(mv, _)| *mv).collect::<Vec<_>>(),
            game.available_moves()
        );
    }

    #[test]
    fn threaded_perft_matches_single_thread() {
        let game = game(KIWIPETE_FEN);
        for threads in [0, 1, 3, 64] {
            let config = PerftConfig { threads };
            assert_eq!(perft_multi_threaded(&game, 3, &config), Ok(97_862));
        }
    }

    #[test]
    fn threaded_perft_leaves_the_position_untouched() {
        let game = game(POSITION_4_FEN);
        let before = game.get_fen();
        assert_eq!(
            perft_multi_threaded(&game, 2, &PerftConfig::default()),
            Ok(264)
        );
        assert_eq!(game.get_fen(), before);
    }

    #[test]
    fn checkmated_root_has_no_leaves() {
        let game = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(perft(&game, 1), Ok(0));
        assert_eq!(perft(&game, 3), Ok(0));
    }
}
