// Fixed-depth minimax engine with alpha-beta pruning and tapered evaluation
pub mod error;
pub mod board;
pub mod search;
pub mod agent;
pub mod game;
pub mod perft;
pub mod uci;

pub use error::{BoardError, EngineError};
pub use board::{Rules, cozy::Position};
pub use search::eval::TaperedEval;
pub use search::alphabeta::{AlphaBeta, MinimaxAgent, SearchResult};
pub use agent::{Agent, AgentSpec, RandomAgent};
