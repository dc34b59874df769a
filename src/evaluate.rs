use crate::board::{Board, Side};
use crate::move_generator::legal_moves;

/// Extra weight of a king over a captured-man point.
pub const KING_VALUE: f32 = 1.6;
pub const MOBILITY_WEIGHT: f32 = 0.03;

impl Board {
    /// Material from one side's perspective: a point per opponent piece
    /// captured plus a king bonus for each of its own kings.
    pub fn material_score(&self, side: Side) -> f32 {
        self.captured_by(side) as f32 + KING_VALUE * self.kings(side) as f32
    }

    /// Total legal destinations over all of the side's pieces, captures and
    /// quiet moves alike.
    pub fn mobility(&self, side: Side) -> usize {
        self.pieces(side).map(|piece| legal_moves(self, piece).len()).sum()
    }

    /// Static favorability for the reference side; higher is better for it.
    /// Material is zero-sum between the sides, mobility is not.
    pub fn evaluate(&self, reference: Side) -> f32 {
        let opponent = reference.opponent();
        let material = self.material_score(reference) - self.material_score(opponent);
        let mobility = self.mobility(reference) as f32 - self.mobility(opponent) as f32;
        material + MOBILITY_WEIGHT * mobility
    }
}
