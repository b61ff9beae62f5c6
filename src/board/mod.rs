use std::ops::{Deref, DerefMut};

use cozy_chess::{Color, Move, Piece, Square};
use serde::Serialize;

use crate::error::BoardError;

pub mod cozy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub termination: Termination,
    pub winner: Option<Color>,
}

impl Outcome {
    pub fn result_str(&self) -> &'static str {
        match self.winner {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

/// Everything the search needs from a board: ordered legal moves, make/undo
/// with stack discipline, terminal detection and piece lookup.
pub trait Rules {
    /// Legal moves for the side to move. The order is significant: it drives
    /// pruning and tie-breaks at the root.
    fn legal_moves(&self) -> Vec<Move>;
    fn push(&mut self, mv: Move) -> Result<(), BoardError>;
    fn pop(&mut self) -> Result<Move, BoardError>;
    fn side_to_move(&self) -> Color;
    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)>;

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_seventyfive_moves(&self) -> bool;
    fn is_fivefold_repetition(&self) -> bool;

    fn outcome(&self) -> Option<Outcome> {
        let draw = |termination| Some(Outcome { termination, winner: None });
        if self.is_checkmate() {
            return Some(Outcome { termination: Termination::Checkmate, winner: Some(!self.side_to_move()) });
        }
        if self.is_insufficient_material() { return draw(Termination::InsufficientMaterial); }
        if self.is_stalemate() { return draw(Termination::Stalemate); }
        if self.is_seventyfive_moves() { return draw(Termination::SeventyFiveMoves); }
        if self.is_fivefold_repetition() { return draw(Termination::FivefoldRepetition); }
        None
    }

    fn is_game_over(&self) -> bool { self.outcome().is_some() }

    /// Plays `mv` and hands back a guard that undoes it when dropped, so an
    /// early return or a `?` in the caller cannot leave the move on the board.
    fn push_scoped(&mut self, mv: Move) -> Result<Played<'_, Self>, BoardError>
    where
        Self: Sized,
    {
        self.push(mv)?;
        Ok(Played { pos: self })
    }
}

/// A move applied through [`Rules::push_scoped`]. Derefs to the position
/// after the move; popped on drop.
pub struct Played<'a, R: Rules> {
    pos: &'a mut R,
}

impl<R: Rules> Deref for Played<'_, R> {
    type Target = R;
    fn deref(&self) -> &R { self.pos }
}

impl<R: Rules> DerefMut for Played<'_, R> {
    fn deref_mut(&mut self) -> &mut R { self.pos }
}

impl<R: Rules> Drop for Played<'_, R> {
    fn drop(&mut self) {
        if let Err(e) = self.pos.pop() {
            log::error!("scoped undo failed: {e}");
        }
    }
}

/// Flips a square about the board's horizontal midline (a1 <-> a8).
pub fn mirror_square(sq: Square) -> Square {
    Square::index(sq as usize ^ 56)
}
