use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Single history record for `make_move` / `undo_last_move`.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub state: BoardState,
    pub mv: ChessMove,
    pub captured_piece: Option<Piece>,
    /// Differs from `mv.to` for en-passant captures.
    pub captured_square: Option<Square>,
    /// The piece as it stood on `mv.from`, before any promotion.
    pub moved_piece: Piece,

    pub prev_available_moves: Vec<ChessMove>,
    /// Repetition key of the position reached by `mv`.
    pub position_key: String,
}
