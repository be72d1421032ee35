//! Piece placement: exactly one optional piece per square.

use crate::game_state::chess_types::*;

/// Mailbox placement indexed by square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn piece_at_rank_file(&self, rank: u8, file: u8) -> Option<Piece> {
        if rank > 7 || file > 7 {
            return None;
        }
        self.piece_at(rank * 8 + file)
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square as usize] = piece;
    }

    /// Removes and returns the occupant of `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square as usize].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Occupied squares in rank-major, file-minor order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(sq, piece)| piece.map(|p| (sq as Square, p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.occupied()
            .filter(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .count()
    }

    /// Color of the square itself; a1 is dark.
    #[inline]
    pub const fn square_color(rank: u8, file: u8) -> Color {
        if (rank + file) % 2 == 0 {
            Color::Dark
        } else {
            Color::Light
        }
    }
}
