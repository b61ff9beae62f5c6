use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Square};

use crate::board::Rules;
use crate::error::BoardError;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// cozy-chess board with an undo stack. The backend is copy-make, so each
/// push stores the previous board and pop restores it.
///
/// The backend caps its halfmove clock at 100, so the full count lives here
/// and is what the 75-move rule and `fen()` report.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    halfmove: u16,
    stack: Vec<(CozyBoard, Move, u16)>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), halfmove: 0, stack: Vec::with_capacity(128) }
    }

    /// Parses a FEN. The clock and move-number fields may be left off.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let bad = |reason: String| BoardError::Fen { fen: fen.to_string(), reason };
        let mut fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() == 4 { fields.extend(["0", "1"]); }
        let halfmove = match fields.get(4) {
            Some(f) => f.parse::<u16>().map_err(|_| bad(format!("bad halfmove clock `{f}`")))?,
            None => 0,
        };
        let clamped = halfmove.min(100).to_string();
        if let Some(f) = fields.get_mut(4) { *f = &clamped; }
        let board = CozyBoard::from_fen(&fields.join(" "), false).map_err(|e| bad(format!("{e:?}")))?;
        Ok(Self { board, halfmove, stack: Vec::with_capacity(128) })
    }

    /// Start from `fen` (or the initial position) and play `moves` in UCI notation.
    pub fn from_moves(fen: Option<&str>, moves: &[String]) -> Result<Self, BoardError> {
        let mut pos = match fen {
            Some(f) => Self::from_fen(f)?,
            None => Self::startpos(),
        };
        for m in moves { pos.push_uci(m)?; }
        Ok(pos)
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String {
        let clock = self.halfmove.to_string();
        let fen = self.board.to_string();
        let mut fields: Vec<&str> = fen.split(' ').collect();
        if let Some(f) = fields.get_mut(4) { *f = &clock; }
        fields.join(" ")
    }

    /// Plies since the last capture or pawn move, uncapped.
    pub fn halfmove_clock(&self) -> u16 { self.halfmove }

    /// Number of moves currently on the undo stack.
    pub fn ply(&self) -> usize { self.stack.len() }

    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|&(_, m, _)| m)
    }

    /// Parses a UCI move, accepting standard castling notation (`e1g1`) and
    /// translating it into the backend's king-takes-rook form.
    pub fn parse_uci(&self, s: &str) -> Result<Move, BoardError> {
        let mv: Move = s.parse().map_err(|_| BoardError::MoveParse(s.to_string()))?;
        if self.board.is_legal(mv) { return Ok(mv); }
        if let Some(castle) = self.castle_from_standard(mv) { return Ok(castle); }
        Err(BoardError::IllegalMove(s.to_string()))
    }

    pub fn push_uci(&mut self, s: &str) -> Result<Move, BoardError> {
        let mv = self.parse_uci(s)?;
        self.push(mv)?;
        Ok(mv)
    }

    /// UCI text for a move legal in this position, castling written the standard way.
    pub fn uci(&self, mv: Move) -> String {
        let stm = self.board.side_to_move();
        let castling = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.piece_on(mv.to) == Some(Piece::Rook)
            && self.board.color_on(mv.to) == Some(stm);
        if !castling { return format!("{mv}"); }
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
        format!("{}{}", mv.from, Square::new(file, mv.from.rank()))
    }

    fn castle_from_standard(&self, mv: Move) -> Option<Move> {
        if self.board.piece_on(mv.from) != Some(Piece::King) || mv.from.file() != File::E || mv.from.rank() != mv.to.rank() {
            return None;
        }
        let rook_file = match mv.to.file() {
            File::G => File::H,
            File::C => File::A,
            _ => return None,
        };
        let castle = Move { from: mv.from, to: Square::new(rook_file, mv.from.rank()), promotion: None };
        if self.board.is_legal(castle) { Some(castle) } else { None }
    }

    fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|ml| { if !ml.is_empty() { any = true; } any });
        any
    }

    fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn color_has_insufficient_material(&self, color: Color) -> bool {
        let b = &self.board;
        let ours = b.colors(color);
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !(ours & heavy).is_empty() { return false; }
        if !(ours & b.pieces(Piece::Knight)).is_empty() {
            // A lone knight cannot mate unless the opponent has blockers to help.
            let helpers = b.colors(!color) & !b.pieces(Piece::King) & !b.pieces(Piece::Queen);
            return ours.len() <= 2 && helpers.is_empty();
        }
        if !(ours & b.pieces(Piece::Bishop)).is_empty() {
            let (mut light, mut dark) = (false, false);
            for sq in b.pieces(Piece::Bishop) {
                if is_dark(sq) { dark = true; } else { light = true; }
            }
            return !(light && dark) && b.pieces(Piece::Pawn).is_empty() && b.pieces(Piece::Knight).is_empty();
        }
        true
    }
}

fn is_dark(sq: Square) -> bool {
    let i = sq as usize;
    (i / 8 + i % 8) % 2 == 0
}

impl Rules for Position {
    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { for m in ml { moves.push(m); } false });
        moves
    }

    fn push(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.board.is_legal(mv) {
            return Err(BoardError::IllegalMove(format!("{mv}")));
        }
        let stm = self.board.side_to_move();
        let resets = self.board.piece_on(mv.from) == Some(Piece::Pawn) || self.board.color_on(mv.to) == Some(!stm);
        let prev = self.board.clone();
        self.board.play(mv);
        self.stack.push((prev, mv, self.halfmove));
        self.halfmove = if resets { 0 } else { self.halfmove.saturating_add(1) };
        Ok(())
    }

    fn pop(&mut self) -> Result<Move, BoardError> {
        let (prev, mv, halfmove) = self.stack.pop().ok_or(BoardError::EmptyHistory)?;
        self.board = prev;
        self.halfmove = halfmove;
        Ok(mv)
    }

    fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board.piece_on(sq).zip(self.board.color_on(sq))
    }

    fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    fn is_stalemate(&self) -> bool { !self.in_check() && !self.has_legal_moves() }

    fn is_insufficient_material(&self) -> bool {
        self.color_has_insufficient_material(Color::White) && self.color_has_insufficient_material(Color::Black)
    }

    fn is_seventyfive_moves(&self) -> bool {
        self.halfmove >= 150 && self.has_legal_moves()
    }

    fn is_fivefold_repetition(&self) -> bool {
        let h = self.board.hash();
        let earlier = self.stack.iter().filter(|(b, _, _)| b.hash() == h).count();
        earlier + 1 >= 5
    }
}
