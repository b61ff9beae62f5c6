use cozy_chess::{Color, Square};

use crate::board::{mirror_square, Rules};
use crate::search::pst;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 99_999;
pub const DRAW_SCORE: i32 = 0;
// Search window sentinel, strictly outside every score `evaluate` can return.
pub const SCORE_INF: i32 = 1_000_000;

/// Constant evaluation data. One instance lives for the whole process and
/// every evaluator borrows it.
#[derive(Debug)]
pub struct EvalTables {
    pub mg_value: [i32; 6],
    pub eg_value: [i32; 6],
    pub phase_weight: [i32; 6],
    pub total_phase: i32,
    pub mg_pst: [[i32; 64]; 6],
    pub eg_pst: [[i32; 64]; 6],
}

pub static DEFAULT_TABLES: EvalTables = EvalTables {
    mg_value: pst::MG_VALUE,
    eg_value: pst::EG_VALUE,
    phase_weight: pst::PHASE_WEIGHT,
    total_phase: pst::TOTAL_PHASE,
    mg_pst: pst::MG_PST,
    eg_pst: pst::EG_PST,
};

/// Raw middlegame/endgame sums (White positive) and the clamped phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub mg: i32,
    pub eg: i32,
    pub phase: i32,
}

impl EvalBreakdown {
    /// Linear interpolation between the two sums; integer division truncates toward zero.
    pub fn blend(&self, total_phase: i32) -> i32 {
        (self.mg * self.phase + self.eg * (total_phase - self.phase)) / total_phase
    }
}

/// Material + piece-square evaluation interpolated by game phase.
/// Scores are from White's point of view.
#[derive(Clone, Copy, Debug)]
pub struct TaperedEval {
    tables: &'static EvalTables,
}

impl Default for TaperedEval {
    fn default() -> Self { Self { tables: &DEFAULT_TABLES } }
}

impl TaperedEval {
    pub fn new(tables: &'static EvalTables) -> Self { Self { tables } }

    pub fn tables(&self) -> &'static EvalTables { self.tables }

    pub fn evaluate<R: Rules + ?Sized>(&self, pos: &R) -> i32 {
        if pos.is_checkmate() {
            // The side to move is the one mated.
            return if pos.side_to_move() == Color::Black { MATE_SCORE } else { -MATE_SCORE };
        }
        if pos.is_stalemate() || pos.is_insufficient_material() { return DRAW_SCORE; }
        self.breakdown(pos).blend(self.tables.total_phase)
    }

    pub fn breakdown<R: Rules + ?Sized>(&self, pos: &R) -> EvalBreakdown {
        let t = self.tables;
        let mut out = EvalBreakdown::default();
        for sq in Square::ALL {
            let Some((piece, color)) = pos.piece_at(sq) else { continue };
            let p = piece as usize;
            out.phase += t.phase_weight[p];
            let (idx, sign) = match color {
                Color::White => (sq as usize, 1),
                Color::Black => (mirror_square(sq) as usize, -1),
            };
            out.mg += sign * (t.mg_value[p] + t.mg_pst[p][idx]);
            out.eg += sign * (t.eg_value[p] + t.eg_pst[p][idx]);
        }
        out.phase = out.phase.min(t.total_phase);
        out
    }

    /// Phase in `0..=total_phase`; `total_phase` is a full set of minor and major pieces.
    pub fn phase<R: Rules + ?Sized>(&self, pos: &R) -> i32 { self.breakdown(pos).phase }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;

    #[test]
    fn startpos_is_balanced_full_phase() {
        let pos = Position::startpos();
        let ev = TaperedEval::default();
        let b = ev.breakdown(&pos);
        assert_eq!(b.phase, 24);
        assert_eq!(b.mg, 0);
        assert_eq!(b.eg, 0);
        assert_eq!(ev.evaluate(&pos), 0);
    }

    #[test]
    fn pure_endgame_uses_eg_sum() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let ev = TaperedEval::default();
        assert_eq!(ev.breakdown(&pos), EvalBreakdown { mg: 132, eg: 174, phase: 0 });
        assert_eq!(ev.evaluate(&pos), 174);
    }

    #[test]
    fn blend_truncates_toward_zero() {
        let b = EvalBreakdown { mg: 439, eg: 425, phase: 1 };
        assert_eq!(b.blend(24), 425);
        let neg = EvalBreakdown { mg: -439, eg: -425, phase: 1 };
        assert_eq!(neg.blend(24), -425);
    }

    #[test]
    fn phase_is_clamped() {
        // Four extra queens push the raw phase past 24.
        let pos = Position::from_fen("qqqqk3/8/8/8/8/8/8/QQQQK3 w - - 0 1").unwrap();
        assert_eq!(TaperedEval::default().phase(&pos), 24);
    }
}
