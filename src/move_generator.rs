use std::collections::BTreeMap;

use tinyvec::TinyVec;

use crate::board::{Board, Piece, Rank, Side, Square, on_board};

/// Pieces jumped over in a single turn, in jump order. Inline storage covers
/// realistic chains; anything longer spills.
pub type CaptureChain = TinyVec<[Piece; 8]>;

/// Legal destinations for one piece, each tagged with its capture chain
/// (empty for a quiet move). Ordered so search expansion is deterministic.
pub type MoveMap = BTreeMap<Square, CaptureChain>;

const RED_FORWARD: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const BLACK_FORWARD: [(i8, i8); 2] = [(1, -1), (1, 1)];
const ALL_DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn directions(piece: &Piece) -> &'static [(i8, i8)] {
    match (piece.rank, piece.side) {
        (Rank::King, _) => &ALL_DIAGONALS,
        (Rank::Man, Side::Red) => &RED_FORWARD,
        (Rank::Man, Side::Black) => &BLACK_FORWARD,
    }
}

/// Enumerates all legal moves for one piece.
///
/// Quiet moves go to the adjacent empty diagonals; captures are found by a
/// recursive jump-chain search that may change direction mid-chain. If any
/// capture exists the quiet moves are discarded: capture priority applies
/// per piece, not across the side (the side-wide restriction lives in the
/// search layer instead).
pub fn legal_moves(board: &Board, piece: Piece) -> MoveMap {
    debug_assert_eq!(board.get(piece.square()), Some(piece), "piece is not on its square");

    let dirs = directions(&piece);
    let mut moves = MoveMap::new();

    for &(dr, dc) in dirs {
        let row = piece.row as i8 + dr;
        let col = piece.col as i8 + dc;
        if on_board(row, col) {
            let dest = Square::new(row as u8, col as u8);
            if board.get(dest).is_none() {
                moves.insert(dest, CaptureChain::default());
            }
        }
    }

    explore_jumps(
        board,
        piece.side,
        dirs,
        piece.square(),
        CaptureChain::default(),
        0,
        &mut moves,
    );

    if moves.values().any(|chain| !chain.is_empty()) {
        moves.retain(|_, chain| !chain.is_empty());
    }

    moves
}

/// Recursive jump-chain exploration. Each branch carries its own capture
/// sequence and visited mask of landing squares, so sibling branches never
/// see each other's state. Jumped pieces stay on the board during the
/// search; only landing on an already-used landing square is forbidden,
/// which also guarantees termination. A later branch reaching a destination
/// found earlier overwrites that entry.
fn explore_jumps(
    board: &Board,
    side: Side,
    dirs: &[(i8, i8)],
    from: Square,
    captured: CaptureChain,
    visited: u64,
    moves: &mut MoveMap,
) {
    for &(dr, dc) in dirs {
        let over_row = from.row as i8 + dr;
        let over_col = from.col as i8 + dc;
        let land_row = from.row as i8 + 2 * dr;
        let land_col = from.col as i8 + 2 * dc;
        if !on_board(over_row, over_col) || !on_board(land_row, land_col) {
            continue;
        }

        let landing = Square::new(land_row as u8, land_col as u8);
        if visited & landing.bit() != 0 || board.get(landing).is_some() {
            continue;
        }

        let Some(jumped) = board.get(Square::new(over_row as u8, over_col as u8)) else {
            continue;
        };
        if jumped.side == side {
            continue;
        }

        let mut chain = captured.clone();
        chain.push(jumped);
        moves.insert(landing, chain.clone());

        explore_jumps(board, side, dirs, landing, chain, visited | landing.bit(), moves);
    }
}

/// True when at least one of the side's pieces has a legal move. A side with
/// pieces but no move has lost by immobility.
pub fn has_any_legal_move(board: &Board, side: Side) -> bool {
    board.pieces(side).any(|piece| !legal_moves(board, piece).is_empty())
}
