//! Terminal-result detection for the position reached after a move.
//!
//! Conditions are tested in a fixed order and the first that holds wins:
//! checkmate, stalemate, insufficient material, threefold repetition, then
//! the fifty-move rule.

use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{FIFTY_MOVE_RULE_HALF_MOVES, REPETITION_LIMIT};
use crate::game_state::chess_types::*;

/// Result and winner for a position whose legal moves and derived data are
/// already in `state`. `repetitions` counts occurrences of the position,
/// including this one.
pub fn detect_result(
    board: &Board,
    state: &BoardState,
    legal_move_count: usize,
    repetitions: u32,
) -> (Option<GameResult>, Option<Color>) {
    let mover = state.side_to_move;

    if legal_move_count == 0 {
        if state.side(mover).in_check {
            return (Some(GameResult::Checkmate), Some(mover.opposite()));
        }
        return (Some(GameResult::Stalemate), None);
    }

    if has_insufficient_material(board) {
        return (Some(GameResult::DrawInsufficientMaterial), None);
    }

    if repetitions >= REPETITION_LIMIT {
        return (Some(GameResult::DrawThreefoldRepetition), None);
    }

    if state.halfmove_clock >= FIFTY_MOVE_RULE_HALF_MOVES {
        return (Some(GameResult::DrawFiftyMoveRule), None);
    }

    (None, None)
}

/// King vs king, king and one minor piece vs king, or one bishop each on
/// the same square color.
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut others = board
        .occupied()
        .filter(|(_, piece)| piece.kind != PieceKind::King);

    let first = others.next();
    let second = others.next();
    if others.next().is_some() {
        return false;
    }

    match (first, second) {
        (None, _) => true,
        (Some((_, piece)), None) => matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight),
        (Some((sq_a, a)), Some((sq_b, b))) => {
            a.kind == PieceKind::Bishop
                && b.kind == PieceKind::Bishop
                && a.color != b.color
                && square_color(sq_a) == square_color(sq_b)
        }
    }
}

fn square_color(square: Square) -> Color {
    Board::square_color(rank_of(square), file_of(square))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::utils::fen_parser::parse_fen;

    fn result_of(fen: &str) -> (Option<GameResult>, Option<Color>) {
        let (board, mut state) = parse_fen(fen).expect("FEN should parse");
        let moves = generate_legal_moves(&board, &mut state).expect("generation should succeed");
        detect_result(&board, &state, moves.len(), 1)
    }

    #[test]
    fn back_rank_mate_is_checkmate_for_the_attacker() {
        assert_eq!(result_of("6k1/5ppp/8/8/8/8/8/R5K1 b - - 0 1").0, None);
        assert_eq!(
            result_of("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
            (Some(GameResult::Checkmate), Some(Color::Light))
        );
    }

    #[test]
    fn no_moves_without_check_is_stalemate() {
        assert_eq!(
            result_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"),
            (Some(GameResult::Stalemate), None)
        );
    }

    #[test]
    fn insufficient_material_cases() {
        let draw = |fen: &str| {
            let (board, _) = parse_fen(fen).expect("FEN should parse");
            has_insufficient_material(&board)
        };

        assert!(draw("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1"));
        // c1 and f8 are both dark squares.
        assert!(draw("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        assert!(!draw("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/8/1BB1K3 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
    }

    #[test]
    fn clocks_and_repetitions_draw_after_mate_checks() {
        let (board, mut state) =
            parse_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("FEN should parse");
        let moves = generate_legal_moves(&board, &mut state).expect("generation should succeed");
        assert_eq!(
            detect_result(&board, &state, moves.len(), 1),
            (Some(GameResult::DrawFiftyMoveRule), None)
        );
        assert_eq!(
            detect_result(&board, &state, moves.len(), 3),
            (Some(GameResult::DrawThreefoldRepetition), None)
        );
        assert_eq!(
            detect_result(&board, &state, moves.len(), 2).0,
            Some(GameResult::DrawFiftyMoveRule)
        );

        state.halfmove_clock = 99;
        assert_eq!(detect_result(&board, &state, moves.len(), 2), (None, None));
    }
}
