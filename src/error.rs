use thiserror::Error;

/// Faults raised by the rules collaborator. The search never retries on these;
/// they travel unchanged to whoever asked for a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("FEN error in `{fen}`: {reason}")]
    Fen { fen: String, reason: String },
    #[error("unparseable move `{0}`")]
    MoveParse(String),
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("no move to undo")]
    EmptyHistory,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("unknown agent `{0}` (expected random[:seed] or minimax[:depth])")]
    UnknownAgent(String),
    #[error(transparent)]
    Board(#[from] BoardError),
}
