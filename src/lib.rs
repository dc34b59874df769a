//! Checkers engine: board state, legal-move enumeration with mandatory
//! multi-jump chains, win/stalemate detection, and a minimax opponent.

pub mod board;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod move_generator;
pub mod search;

pub use board::{BOARD_SIZE, Board, PIECES_PER_SIDE, Piece, Rank, Side, Square};
pub use error::{EngineError, EngineResult};
pub use game::Game;
pub use move_generator::{CaptureChain, MoveMap, has_any_legal_move, legal_moves};
pub use search::{Difficulty, choose_move, minimax, resulting_boards};
