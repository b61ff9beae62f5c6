use cozy_chess::{Color, Move};
use std::time::Instant;

use crate::board::Rules;
use crate::error::{BoardError, EngineError};
use crate::search::eval::{TaperedEval, SCORE_INF};

pub const DEFAULT_DEPTH: u32 = 3;

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Fixed-depth minimax with alpha-beta pruning. Moves are searched in the
/// order the rules collaborator produces them; White maximizes.
pub struct AlphaBeta<'e> {
    eval: &'e TaperedEval,
    pub(crate) nodes: u64,
    pub(crate) cutoffs: u64,
}

impl<'e> AlphaBeta<'e> {
    pub fn new(eval: &'e TaperedEval) -> Self { Self { eval, nodes: 0, cutoffs: 0 } }

    pub fn nodes(&self) -> u64 { self.nodes }
    pub fn cutoffs(&self) -> u64 { self.cutoffs }

    /// Score of `pos` searched `depth` plies deep inside the `(alpha, beta)` window.
    /// A cutoff returns the child score that caused it, so the value is only
    /// exact inside the window.
    /// The position is restored before returning, on errors too.
    pub fn search<R: Rules>(&mut self, pos: &mut R, depth: u32, mut alpha: i32, mut beta: i32) -> Result<i32, BoardError> {
        self.nodes += 1;
        if depth == 0 || pos.is_game_over() { return Ok(self.eval.evaluate(&*pos)); }

        let maximizing = pos.side_to_move() == Color::White;
        let moves = pos.legal_moves();
        if maximizing {
            let mut best = -SCORE_INF;
            for m in moves {
                let score = {
                    let mut child = pos.push_scoped(m)?;
                    self.search(&mut *child, depth - 1, alpha, beta)?
                };
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha { self.cutoffs += 1; break; }
            }
            Ok(best)
        } else {
            let mut best = SCORE_INF;
            for m in moves {
                let score = {
                    let mut child = pos.push_scoped(m)?;
                    self.search(&mut *child, depth - 1, alpha, beta)?
                };
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha { self.cutoffs += 1; break; }
            }
            Ok(best)
        }
    }
}

/// Root driver: searches every legal move and keeps the first one with the
/// best score for the side to move.
#[derive(Clone, Debug)]
pub struct MinimaxAgent {
    depth: u32,
    eval: TaperedEval,
}

impl Default for MinimaxAgent {
    fn default() -> Self { Self { depth: DEFAULT_DEPTH, eval: TaperedEval::default() } }
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Result<Self, EngineError> {
        Self::with_eval(depth, TaperedEval::default())
    }

    pub fn with_eval(depth: u32, eval: TaperedEval) -> Result<Self, EngineError> {
        if depth == 0 { return Err(EngineError::ZeroDepth); }
        Ok(Self { depth, eval })
    }

    pub fn depth(&self) -> u32 { self.depth }
    pub fn evaluator(&self) -> &TaperedEval { &self.eval }

    pub fn select_move<R: Rules>(&self, pos: &mut R) -> Result<Option<Move>, EngineError> {
        Ok(self.search_root(pos)?.best_move)
    }

    pub fn search_root<R: Rules>(&self, pos: &mut R) -> Result<SearchResult, EngineError> {
        let t0 = Instant::now();
        let moves = pos.legal_moves();
        if moves.is_empty() {
            log::debug!("no legal moves at root");
            return Ok(SearchResult { best_move: None, score: self.eval.evaluate(&*pos), nodes: 0, cutoffs: 0 });
        }

        let maximizing = pos.side_to_move() == Color::White;
        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_move: Option<Move> = None;
        let mut alpha = -SCORE_INF;
        let mut beta = SCORE_INF;
        let mut ab = AlphaBeta::new(&self.eval);

        for m in moves {
            let score = {
                let mut child = pos.push_scoped(m)?;
                ab.search(&mut *child, self.depth - 1, alpha, beta)?
            };
            log::debug!("root {m} -> {score}");
            // Strict comparison: on ties the earliest move stays.
            if maximizing {
                if score > best_score { best_score = score; best_move = Some(m); }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score { best_score = score; best_move = Some(m); }
                beta = beta.min(best_score);
            }
        }

        log::info!(
            "depth {} best {:?} score {} nodes {} cutoffs {} in {:?}",
            self.depth, best_move.map(|m| m.to_string()), best_score, ab.nodes, ab.cutoffs, t0.elapsed()
        );
        Ok(SearchResult { best_move, score: best_score, nodes: ab.nodes, cutoffs: ab.cutoffs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;

    #[test]
    fn zero_depth_rejected() {
        assert_eq!(MinimaxAgent::new(0).unwrap_err(), EngineError::ZeroDepth);
    }

    #[test]
    fn depth_zero_search_is_static_eval() {
        let mut pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
        let ev = TaperedEval::default();
        let mut ab = AlphaBeta::new(&ev);
        let s = ab.search(&mut pos, 0, -SCORE_INF, SCORE_INF).unwrap();
        assert_eq!(s, ev.evaluate(&pos));
        assert_eq!(ab.nodes(), 1);
    }

    #[test]
    fn no_legal_moves_yields_none() {
        // Fool's mate: White to move and mated.
        let mut pos = Position::from_moves(None, &["f2f3", "e7e5", "g2g4", "d8h4"].map(String::from)).unwrap();
        let agent = MinimaxAgent::new(2).unwrap();
        assert_eq!(agent.select_move(&mut pos).unwrap(), None);
        assert_eq!(pos.ply(), 4);
    }
}
