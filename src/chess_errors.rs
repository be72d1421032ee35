//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by parsing, move
//! application, undo, and the perft/match tooling. Variants fall into three
//! groups:
//! - malformed input (bad FEN, bad coordinates, bad move text), rejected
//!   before any state is built;
//! - illegal operations (a move outside the legal list, moving after the game
//!   ended, undoing with an empty history), rejected with the position left
//!   untouched;
//! - invariant violations (missing king, king capture, en-passant target that
//!   does not point at a pawn). These indicate a corrupted position and are
//!   not meant to be recovered from by normal callers.

use thiserror::Error;

use crate::game_state::chess_types::{Color, GameResult};

/// Unified error type for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// The FEN string does not follow the six-field grammar.
    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    /// A placement letter outside `pnbrqkPNBRQK`.
    #[error("invalid piece character '{0}'")]
    InvalidPieceChar(char),

    /// FEN initialization was attempted on a board that already holds pieces.
    #[error("board has already been initialized")]
    BoardAlreadyPopulated,

    /// A two-character coordinate could not be read.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraicString(String),

    /// Move text that is not `<from><to>[<promotion>]`.
    #[error("invalid long algebraic move: {0}")]
    InvalidLongAlgebraic(String),

    /// The move is not in the cached legal-move list.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The position already has a terminal result.
    #[error("game is already over: {0:?}")]
    GameAlreadyOver(GameResult),

    /// `undo_last_move` was called with an empty history.
    #[error("no moves to undo")]
    NothingToUndo,

    /// The side to move has no king on the board.
    #[error("no {0:?} king on the board")]
    MissingKing(Color),

    /// A move tried to take a king. Payload is the move text.
    #[error("can't capture king with move {0}")]
    KingCapture(String),

    /// The en-passant target does not correspond to a capturable pawn.
    #[error("en-passant capture of non-pawn with move {0}")]
    EnPassantNonPawn(String),

    /// A move started from an empty square.
    #[error("no piece on from-square {0}")]
    EmptyFromSquare(String),

    /// A perft worker thread panicked before returning its count.
    #[error("perft worker thread panicked")]
    WorkerPanicked,
}

pub type ChessResult<T> = Result<T, ChessErrors>;
