use log::debug;
use rand::Rng;

use crate::board::{Board, Side, Square};
use crate::error::{EngineError, EngineResult};
use crate::move_generator::{CaptureChain, MoveMap, has_any_legal_move, legal_moves};
use crate::search::{Difficulty, choose_move};

/// One game in progress: the board plus whose turn it is. This is the
/// surface a front end drives; it validates what the raw board mutators do
/// not.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Side,
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Side::Red,
        }
    }

    /// Starts from an arbitrary position with the given side to move.
    pub fn from_position(board: Board, turn: Side) -> Game {
        Game { board, turn }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Legal moves of the piece on the given cell. Empty for an empty cell
    /// or a piece that does not belong to the side to move.
    pub fn legal_moves(&self, row: u8, col: u8) -> EngineResult<MoveMap> {
        match self.board.piece_at(row, col)? {
            Some(piece) if piece.side == self.turn => Ok(legal_moves(&self.board, piece)),
            _ => Ok(MoveMap::new()),
        }
    }

    /// Plays a move for the side to move, removing any jumped pieces, and
    /// passes the turn. The board is untouched on error.
    pub fn play(&mut self, from: Square, to: Square) -> EngineResult<CaptureChain> {
        let moves = self.legal_moves(from.row, from.col)?;
        if self.board.piece_at(to.row, to.col)?.is_some() {
            return Err(EngineError::IllegalMove { from, to });
        }
        let Some(chain) = moves.get(&to) else {
            return Err(EngineError::IllegalMove { from, to });
        };
        let chain = chain.clone();

        self.board.apply_move(from, to);
        if !chain.is_empty() {
            self.board.remove_captured(&chain);
        }
        debug!("{} played {from} -> {to}, capturing {}", self.turn, chain.len());
        self.turn = self.turn.opponent();

        Ok(chain)
    }

    /// Lets the engine take the current turn. Returns false when the side
    /// to move has no legal move (the game is over; see `outcome`).
    pub fn ai_move<R: Rng>(&mut self, difficulty: Difficulty, rng: &mut R) -> bool {
        match choose_move(&self.board, self.turn, difficulty, rng) {
            Some(next) => {
                self.board = next;
                self.turn = self.turn.opponent();
                true
            }
            None => false,
        }
    }

    /// Terminal-state check: a side wins when its opponent is eliminated or
    /// is to move with no legal move at all.
    pub fn outcome(&self) -> Option<Side> {
        if let Some(winner) = self.board.winner() {
            return Some(winner);
        }
        if !has_any_legal_move(&self.board, self.turn) {
            return Some(self.turn.opponent());
        }
        None
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
