use std::fmt::{self, Display};

use log::warn;

use crate::error::{EngineError, EngineResult};

pub const BOARD_SIZE: usize = 8;
pub const PIECES_PER_SIDE: u8 = 12;

/// Red sits on rows 5..8 and advances toward row 0; it moves first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    #[default]
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }

    /// Row where this side's men are crowned, the opponent's home row.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Red => 0,
            Side::Black => BOARD_SIZE as u8 - 1,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "Red"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    #[default]
    Man,
    King,
}

/// A piece's stored coordinates always match the grid cell holding it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub row: u8,
    pub col: u8,
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub fn square(&self) -> Square {
        Square::new(self.row, self.col)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    /// Bit in a 64-square occupancy mask, row-major from (0, 0).
    pub(crate) fn bit(self) -> u64 {
        1 << (self.row as u64 * BOARD_SIZE as u64 + self.col as u64)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub(crate) fn on_board(row: i8, col: i8) -> bool {
    (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col)
}

/// 8x8 grid plus cached per-side piece and king counts. The counts are kept
/// consistent with the grid by every mutation and only ever decrease
/// (promotion aside, no pieces are added after setup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    remaining: [u8; 2],
    kings: [u8; 2],
}

impl Board {
    /// Canonical starting layout: Black on the three top rows, Red on the
    /// three bottom rows, dark squares only.
    pub fn new() -> Board {
        let mut squares = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (row, row_squares) in squares.iter_mut().enumerate() {
            for (col, square) in row_squares.iter_mut().enumerate() {
                if (row + col) % 2 != 1 {
                    continue;
                }
                let side = if row < 3 {
                    Some(Side::Black)
                } else if row > 4 {
                    Some(Side::Red)
                } else {
                    None
                };
                *square = side.map(|side| Piece {
                    row: row as u8,
                    col: col as u8,
                    side,
                    rank: Rank::Man,
                });
            }
        }

        Board {
            squares,
            remaining: [PIECES_PER_SIDE, PIECES_PER_SIDE],
            kings: [0, 0],
        }
    }

    /// Builds a board from an 8-line text layout of `.`, `r`, `R`, `b`, `B`
    /// characters, one row per line from row 0 down. Counts are derived from
    /// the grid. Accepts only dark-square placement and at most a full set
    /// of pieces per side.
    pub fn from_layout(layout: &str) -> EngineResult<Board> {
        let rows: Vec<&str> = layout.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidLayout(format!(
                "expected {} rows but found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            remaining: [0, 0],
            kings: [0, 0],
        };

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE {
                return Err(EngineError::InvalidLayout(format!(
                    "row {} has {} squares, expected {}",
                    row,
                    line.chars().count(),
                    BOARD_SIZE
                )));
            }

            for (col, c) in line.chars().enumerate() {
                let (side, rank) = match c {
                    '.' => continue,
                    'r' => (Side::Red, Rank::Man),
                    'R' => (Side::Red, Rank::King),
                    'b' => (Side::Black, Rank::Man),
                    'B' => (Side::Black, Rank::King),
                    _ => {
                        return Err(EngineError::InvalidLayout(format!(
                            "unexpected character '{}' at row {} col {}",
                            c, row, col
                        )));
                    }
                };

                if (row + col) % 2 != 1 {
                    return Err(EngineError::InvalidLayout(format!(
                        "piece on light square at row {} col {}",
                        row, col
                    )));
                }

                board.squares[row][col] = Some(Piece {
                    row: row as u8,
                    col: col as u8,
                    side,
                    rank,
                });
                board.remaining[side.index()] += 1;
                if rank == Rank::King {
                    board.kings[side.index()] += 1;
                }
            }
        }

        for side in [Side::Red, Side::Black] {
            if board.remaining[side.index()] > PIECES_PER_SIDE {
                return Err(EngineError::InvalidLayout(format!(
                    "{} has {} pieces, more than the starting {}",
                    side,
                    board.remaining[side.index()],
                    PIECES_PER_SIDE
                )));
            }
        }

        Ok(board)
    }

    /// Unchecked cell read for code that has already validated coordinates.
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn piece_at(&self, row: u8, col: u8) -> EngineResult<Option<Piece>> {
        if !on_board(row as i8, col as i8) {
            return Err(EngineError::OutOfBounds { row, col });
        }
        Ok(self.squares[row as usize][col as usize])
    }

    /// Relocates a piece, crowning a man that reaches the opponent's home
    /// row. Legality is the move generator's responsibility; this assumes
    /// the destination was taken from its mapping and is empty.
    pub fn apply_move(&mut self, from: Square, to: Square) {
        debug_assert!(self.get(to).is_none(), "apply_move destination {to} is occupied");

        let mut piece = self.squares[from.row as usize][from.col as usize]
            .take()
            .expect("apply_move called with an empty source square");
        piece.row = to.row;
        piece.col = to.col;

        if piece.rank == Rank::Man && to.row == piece.side.promotion_row() {
            piece.rank = Rank::King;
            self.kings[piece.side.index()] += 1;
        }

        self.squares[to.row as usize][to.col as usize] = Some(piece);
    }

    /// Clears each captured piece's cell and updates the owner's counts.
    /// Removal order is irrelevant; the pieces are expected to still be on
    /// the board.
    pub fn remove_captured(&mut self, pieces: &[Piece]) {
        for piece in pieces {
            let removed = self.squares[piece.row as usize][piece.col as usize].take();
            if removed.is_none() {
                warn!("captured piece at {} was already gone", piece.square());
                continue;
            }

            self.remaining[piece.side.index()] -= 1;
            if piece.rank == Rank::King {
                self.kings[piece.side.index()] -= 1;
            }
        }
    }

    pub fn remaining(&self, side: Side) -> u8 {
        self.remaining[side.index()]
    }

    pub fn kings(&self, side: Side) -> u8 {
        self.kings[side.index()]
    }

    /// Opponent pieces this side has captured so far, one point each.
    pub fn captured_by(&self, side: Side) -> u8 {
        PIECES_PER_SIDE - self.remaining[side.opponent().index()]
    }

    pub fn is_eliminated(&self, side: Side) -> bool {
        self.remaining[side.index()] == 0
    }

    /// Winner by elimination only; immobility is the game layer's call.
    pub fn winner(&self) -> Option<Side> {
        if self.is_eliminated(Side::Red) {
            Some(Side::Black)
        } else if self.is_eliminated(Side::Black) {
            Some(Side::Red)
        } else {
            None
        }
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.squares
            .iter()
            .flatten()
            .flatten()
            .filter(move |piece| piece.side == side)
            .copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    /// Prints the grid in the same character set `from_layout` accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for square in row {
                let c = match square {
                    None => '.',
                    Some(piece) => match (piece.side, piece.rank) {
                        (Side::Red, Rank::Man) => 'r',
                        (Side::Red, Rank::King) => 'R',
                        (Side::Black, Rank::Man) => 'b',
                        (Side::Black, Rank::King) => 'B',
                    },
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
