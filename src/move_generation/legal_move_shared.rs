//! Shared ray walk and per-side scan state.
//!
//! Every piece except the pawn is generated by one routine: walk each
//! direction vector (once for knights and kings, to the board edge for
//! sliders) and classify the visited squares relative to the first occupied
//! one. The same walk feeds the attack map, the pinned-piece table, and the
//! blockable check paths of the opponent king.

use crate::game_state::board::Board;
use crate::game_state::board_state::{PinnedPieces, SideData};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;
use crate::moves::directions::{is_diagonal, is_horizontal, Direction};

/// Accumulates pseudo-legal moves and derived data for the pieces of one side.
pub struct SideScan<'a> {
    pub board: &'a Board,
    pub color: Color,
    pub en_passant_square: Option<Square>,
    pub moves: Vec<ChessMove>,
    pub data: SideData,
    /// Restrictions this side's rays impose on opponent pieces.
    pub pinned: PinnedPieces,
}

impl<'a> SideScan<'a> {
    pub fn new(board: &'a Board, color: Color, en_passant_square: Option<Square>) -> Self {
        Self {
            board,
            color,
            en_passant_square,
            moves: Vec::with_capacity(64),
            data: SideData::default(),
            pinned: PinnedPieces::default(),
        }
    }
}

/// Squares visited along one direction, with the positions (indices into
/// `squares`) of the pieces found there.
#[derive(Debug, Default)]
pub struct RayPath {
    squares: [Square; 7],
    len: usize,
    first_piece: Option<usize>,
    first_piece_is_ours: bool,
    opponent_king: Option<usize>,
    own_pieces: [usize; 7],
    own_count: usize,
    opponent_pieces: [usize; 7],
    opponent_count: usize,
}

impl RayPath {
    fn add_square(&mut self, square: Square, occupant: Option<Piece>, color: Color) {
        let idx = self.len;
        self.squares[idx] = square;
        self.len += 1;

        let Some(piece) = occupant else {
            return;
        };

        if piece.color == color {
            self.own_pieces[self.own_count] = idx;
            self.own_count += 1;
        } else if piece.kind == PieceKind::King {
            self.opponent_king = Some(idx);
        } else {
            self.opponent_pieces[self.opponent_count] = idx;
            self.opponent_count += 1;
        }

        if self.first_piece.is_none() {
            self.first_piece = Some(idx);
            self.first_piece_is_ours = piece.color == color;
        }
    }

    #[inline]
    pub fn squares(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn own_before(&self, idx: usize) -> usize {
        self.own_pieces[..self.own_count]
            .iter()
            .filter(|i| **i < idx)
            .count()
    }

    fn opponent_before(&self, idx: usize) -> usize {
        self.opponent_pieces[..self.opponent_count]
            .iter()
            .filter(|i| **i < idx)
            .count()
    }

    fn set_of(&self, range: std::ops::Range<usize>) -> SquareSet {
        self.squares[range]
            .iter()
            .fold(EMPTY_SET, |acc, sq| acc | square_bit(*sq))
    }
}

/// Walk from `(rank, file)` along `direction` until the board edge, or one
/// step when `one_step_only`.
pub fn walk_ray(
    board: &Board,
    from: Square,
    color: Color,
    direction: Direction,
    one_step_only: bool,
) -> RayPath {
    let mut path = RayPath::default();
    let rank = rank_of(from) as i8;
    let file = file_of(from) as i8;

    for step in 1..8i8 {
        let Some(square) = square_at(rank + direction.0 * step, file + direction.1 * step) else {
            break;
        };
        path.add_square(square, board.piece_at(square), color);
        if one_step_only {
            break;
        }
    }

    path
}

/// Moves, attacks, pins, and check paths for a knight, bishop, rook, queen,
/// or king on `from`.
pub fn generate_ray_moves(
    scan: &mut SideScan<'_>,
    from: Square,
    directions: &[Direction],
    one_step_only: bool,
) {
    for &direction in directions {
        let path = walk_ray(scan.board, from, scan.color, direction, one_step_only);
        if path.is_empty() {
            continue;
        }

        for (idx, &to) in path.squares().iter().enumerate() {
            match path.first_piece {
                Some(first) if idx == first => {
                    if path.first_piece_is_ours {
                        // Defended: the opponent king may not capture here.
                        scan.data.record_attack(from, to);
                    } else {
                        scan.moves.push(ChessMove::new(from, to));
                    }
                    break;
                }
                Some(first) if idx > first => break,
                _ => {
                    scan.moves.push(ChessMove::new(from, to));
                    scan.data.record_attack(from, to);
                }
            }
        }

        if let Some(king_idx) = path.opponent_king {
            record_king_ray(scan, from, direction, &path, king_idx);
        }
    }
}

fn record_king_ray(
    scan: &mut SideScan<'_>,
    from: Square,
    direction: Direction,
    path: &RayPath,
    king_idx: usize,
) {
    let own_before = path.own_before(king_idx);
    let opponent_before = path.opponent_before(king_idx);

    // A lone opponent piece between us and the king may only stay on the ray
    // or capture us.
    if own_before == 0 && opponent_before == 1 {
        let pinned_square = path.squares[path.opponent_pieces[0]];
        let allowed = path.set_of(0..king_idx) | square_bit(from);
        scan.pinned.restrict(pinned_square, allowed);
    }

    if own_before == 0 && opponent_before == 0 {
        // The king cannot step back along the ray it is checked on.
        for &square in &path.squares()[king_idx..] {
            scan.data.record_attack(from, square);
        }
        scan.data
            .paths_to_opponent_king
            .push(path.set_of(0..king_idx));
    }

    let Some(en_passant) = scan.en_passant_square else {
        return;
    };

    if own_before == 1 && opponent_before == 1 && is_horizontal(direction) {
        pin_horizontal_en_passant(scan, path, en_passant);
    }

    if own_before == 1 && opponent_before == 0 && is_diagonal(direction) {
        pin_diagonal_en_passant(scan, path, en_passant);
    }
}

/// Square of the pawn that just made `en_passant` capturable, if it belongs
/// to `color`.
fn en_passant_pawn_square(color: Color, en_passant: Square) -> Option<Square> {
    match (color, rank_of(en_passant)) {
        (Color::Light, 2) => Some(en_passant + 8),
        (Color::Dark, 5) => Some(en_passant - 8),
        _ => None,
    }
}

/// Our just-pushed pawn and one opponent pawn are the only pieces between us
/// and the king on a rank. Capturing en passant would clear both from the
/// rank at once, so the opponent pawn loses the en-passant destination.
fn pin_horizontal_en_passant(scan: &mut SideScan<'_>, path: &RayPath, en_passant: Square) {
    let own_square = path.squares[path.own_pieces[0]];
    let opponent_square = path.squares[path.opponent_pieces[0]];

    let (Some(own), Some(opponent)) = (
        scan.board.piece_at(own_square),
        scan.board.piece_at(opponent_square),
    ) else {
        return;
    };
    if own.kind != PieceKind::Pawn || opponent.kind != PieceKind::Pawn {
        return;
    }
    if en_passant_pawn_square(scan.color, en_passant) != Some(own_square) {
        return;
    }
    if file_of(own_square).abs_diff(file_of(opponent_square)) != 1 {
        return;
    }

    scan.pinned.restrict(opponent_square, !square_bit(en_passant));
}

/// Our just-pushed pawn is the only piece between us and the king on a
/// diagonal. The capturing pawn lands off that diagonal, so no opponent pawn
/// may take en passant.
fn pin_diagonal_en_passant(scan: &mut SideScan<'_>, path: &RayPath, en_passant: Square) {
    let own_square = path.squares[path.own_pieces[0]];
    if en_passant_pawn_square(scan.color, en_passant) != Some(own_square) {
        return;
    }
    if scan.board.piece_at(own_square).map(|p| p.kind) != Some(PieceKind::Pawn) {
        return;
    }

    let rank = rank_of(own_square) as i8;
    let file = file_of(own_square) as i8;
    for side in [-1i8, 1] {
        let Some(neighbour) = square_at(rank, file + side) else {
            continue;
        };
        if scan.board.piece_at(neighbour) == Some(Piece::new(PieceKind::Pawn, scan.color.opposite())) {
            scan.pinned.restrict(neighbour, !square_bit(en_passant));
        }
    }
}
