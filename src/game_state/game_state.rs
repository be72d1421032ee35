//! Playable position: placement, rule state, history, and legal-move cache.
//!
//! `GameState` is the object collaborators talk to. Every accepted move
//! pushes an `UndoState`, updates the repetition table, and regenerates the
//! legal moves and terminal result for the new side to move; undo pops the
//! history and restores the saved snapshot verbatim.

use std::collections::HashMap;
use std::fmt;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::result_detection::detect_result;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::square_set_to_algebraic;
use crate::utils::fen_generator::{generate_fen, generate_repetition_key};
use crate::utils::fen_parser::parse_fen;
use crate::utils::logging::log_info;
use crate::utils::long_algebraic::parse_long_algebraic;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug)]
pub struct GameState {
    board: Board,
    state: BoardState,
    history: Vec<UndoState>,
    /// Occurrences of each repetition key along the current line.
    repetitions: HashMap<String, u32>,
    available_moves: Vec<ChessMove>,

    logging: bool,
    validation_enabled: bool,
}

impl GameState {
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::from_fen_with_logging(fen, false)
    }

    /// Like `from_fen`, with diagnostic logging already switched on or off.
    pub fn from_fen_with_logging(fen: &str, logging: bool) -> ChessResult<Self> {
        log_info(logging, || format!("Initializing from {fen}"));

        let (board, state) = parse_fen(fen)?;
        let mut game = Self {
            board,
            state,
            history: Vec::new(),
            repetitions: HashMap::new(),
            available_moves: Vec::new(),
            logging,
            validation_enabled: true,
        };

        let key = game.repetition_key();
        game.repetitions.insert(key, 1);
        game.refresh(1)?;
        Ok(game)
    }

    /// Independent copy of `other`'s current position, built through FEN.
    /// History and repetition counts start afresh; the toggles carry over.
    pub fn from_game(other: &GameState) -> ChessResult<Self> {
        let mut game = Self::from_fen_with_logging(&other.get_fen(), other.logging)?;
        game.validation_enabled = other.validation_enabled;
        Ok(game)
    }

    /// Regenerate the legal-move cache and terminal result for the side to
    /// move. `repetitions` is the occurrence count of the current position.
    fn refresh(&mut self, repetitions: u32) -> ChessResult<()> {
        self.available_moves = generate_legal_moves(&self.board, &mut self.state)?;

        let (result, winner) = detect_result(
            &self.board,
            &self.state,
            self.available_moves.len(),
            repetitions,
        );
        self.state.result = result;
        self.state.winner = winner;

        if let Some(result) = result {
            log_info(self.logging, || match winner {
                Some(color) => format!("Game over: {result:?}, {color:?} wins"),
                None => format!("Game over: {result:?}"),
            });
        }

        Ok(())
    }

    /// Legal moves for the side to move, in generation order.
    #[inline]
    pub fn available_moves(&self) -> &[ChessMove] {
        &self.available_moves
    }

    /// Play `mv` for the side to move.
    ///
    /// Rejected without any change when the game is over, when validation is
    /// on and `mv` is not among `available_moves()`, or when the move would
    /// break a position invariant.
    pub fn make_move(&mut self, mv: &ChessMove) -> ChessResult<()> {
        if let Some(result) = self.state.result {
            return Err(ChessErrors::GameAlreadyOver(result));
        }
        if self.validation_enabled && !self.available_moves.contains(mv) {
            return Err(ChessErrors::IllegalMove(mv.to_string()));
        }

        let next_mover = self.state.side_to_move.opposite();
        if self.board.king_square(next_mover).is_none() {
            return Err(ChessErrors::MissingKing(next_mover));
        }

        log_info(self.logging, || {
            format!("Performing move {mv} in state: {}", self.get_fen())
        });

        let (next, applied) = apply_move(&mut self.board, &self.state, mv)?;
        let previous = std::mem::replace(&mut self.state, next);

        let position_key = self.repetition_key();
        let count = self.repetitions.entry(position_key.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        self.history.push(UndoState {
            state: previous,
            mv: *mv,
            captured_piece: applied.captured_piece,
            captured_square: applied.captured_square,
            moved_piece: applied.moved_piece,
            prev_available_moves: std::mem::take(&mut self.available_moves),
            position_key,
        });

        self.refresh(count)
    }

    /// Resolve move text such as `e2e4` or `e7e8q` and play it.
    pub fn make_move_text(&mut self, text: &str) -> ChessResult<ChessMove> {
        let mv = self.find_move(text)?;
        self.make_move(&mv)?;
        Ok(mv)
    }

    /// Take back the most recent move and return it.
    pub fn undo_last_move(&mut self) -> ChessResult<ChessMove> {
        let undo = self.history.pop().ok_or(ChessErrors::NothingToUndo)?;

        revert_move(&mut self.board, &undo);
        if let Some(count) = self.repetitions.get_mut(&undo.position_key) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&undo.position_key);
            }
        }

        let UndoState {
            state,
            mv,
            prev_available_moves,
            ..
        } = undo;
        self.state = state;
        self.available_moves = prev_available_moves;

        log_info(self.logging, || format!("Undid move {mv}, back to: {}", self.get_fen()));
        Ok(mv)
    }

    /// The legal move written as `text`, with its castling rook pair filled in.
    pub fn find_move(&self, text: &str) -> ChessResult<ChessMove> {
        let parsed = parse_long_algebraic(text)?;
        self.available_moves
            .iter()
            .find(|mv| mv.matches_text_of(&parsed))
            .copied()
            .ok_or_else(|| ChessErrors::IllegalMove(text.to_owned()))
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.state.result
    }

    /// `None` until the game ends in checkmate.
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner
    }

    #[inline]
    pub fn color_to_move(&self) -> Color {
        self.state.side_to_move
    }

    /// Full-move number.
    #[inline]
    pub fn number_of_moves(&self) -> u16 {
        self.state.fullmove_number
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.state.halfmove_clock
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.state.side(self.state.side_to_move).in_check
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn piece_at_rank_file(&self, rank: u8, file: u8) -> Option<Piece> {
        self.board.piece_at_rank_file(rank, file)
    }

    #[inline]
    pub fn square_color(&self, rank: u8, file: u8) -> Color {
        Board::square_color(rank, file)
    }

    pub fn set_logging(&mut self, enabled: bool) {
        self.logging = enabled;
    }

    /// Whether `make_move` checks moves against the legal list.
    pub fn validate_moves(&mut self, enabled: bool) {
        self.validation_enabled = enabled;
    }

    pub fn get_fen(&self) -> String {
        generate_fen(&self.board, &self.state)
    }

    pub fn repetition_key(&self) -> String {
        generate_repetition_key(&self.board, &self.state)
    }

    /// Occurrences of the current position along the played line.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.repetition_key())
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn history(&self) -> &[UndoState] {
        &self.history
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Squares attacked by each side, one line per side.
    pub fn attacked_squares_report(&self) -> String {
        [Color::Light, Color::Dark]
            .into_iter()
            .map(|color| {
                let attacked = self
                    .state
                    .side(color)
                    .attacked_squares()
                    .fold(EMPTY_SET, |acc, sq| acc | square_bit(sq));
                format!("{color:?} attacks: {}", square_set_to_algebraic(attacked))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}
