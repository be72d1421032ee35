//! Canonical chess-rule constants.
//!
//! Static literals used to initialize positions and to decide terminal
//! results: the standard starting position, home squares for castling, and
//! the draw thresholds.

use crate::game_state::chess_types::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// File the king starts on for both sides.
pub const KING_HOME_FILE: u8 = 4;
pub const QUEEN_SIDE_ROOK_FILE: u8 = 0;
pub const KING_SIDE_ROOK_FILE: u8 = 7;

/// Corner squares holding the rooks at the start of the game.
pub const LIGHT_QUEEN_SIDE_ROOK_HOME: Square = 0;
pub const LIGHT_KING_SIDE_ROOK_HOME: Square = 7;
pub const DARK_QUEEN_SIDE_ROOK_HOME: Square = 56;
pub const DARK_KING_SIDE_ROOK_HOME: Square = 63;

/// Half-move clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_RULE_HALF_MOVES: u16 = 100;

/// Occurrences of one position needed for a threefold-repetition draw.
pub const REPETITION_LIMIT: u32 = 3;
