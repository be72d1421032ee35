//! Move value: origin, destination, optional promotion, and the paired rook
//! relocation carried by castling moves.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    /// Rook `(from, to)` for castling.
    pub rook_move: Option<(Square, Square)>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            rook_move: None,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
            rook_move: None,
        }
    }

    #[inline]
    pub const fn castling(king_from: Square, king_to: Square, rook_from: Square, rook_to: Square) -> Self {
        Self {
            from: king_from,
            to: king_to,
            promotion: None,
            rook_move: Some((rook_from, rook_to)),
        }
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.rook_move.is_some()
    }

    /// Same from/to/promotion, ignoring the rook pair. Used to resolve move
    /// text against the legal list.
    #[inline]
    pub fn matches_text_of(&self, other: &ChessMove) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.from),
            square_to_algebraic(self.to)
        )?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.short_name())?;
        }
        Ok(())
    }
}
