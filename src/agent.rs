use std::fmt;
use std::str::FromStr;

use cozy_chess::Move;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Rules;
use crate::error::EngineError;
use crate::search::alphabeta::{MinimaxAgent, DEFAULT_DEPTH};

/// Uniform choice among the legal moves, reproducible for a given seed.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }

    pub fn from_entropy() -> Self { Self { rng: SmallRng::from_entropy() } }

    pub fn select_move<R: Rules>(&mut self, pos: &R) -> Option<Move> {
        let moves = pos.legal_moves();
        if moves.is_empty() { None } else { Some(moves[self.rng.gen_range(0..moves.len())]) }
    }
}

/// The interchangeable move-choosing strategies.
#[derive(Clone, Debug)]
pub enum Agent {
    Minimax(MinimaxAgent),
    Random(RandomAgent),
}

impl Agent {
    /// `Ok(None)` means the side to move has nothing legal to play.
    pub fn select_move<R: Rules>(&mut self, pos: &mut R) -> Result<Option<Move>, EngineError> {
        match self {
            Agent::Minimax(a) => a.select_move(pos),
            Agent::Random(a) => Ok(a.select_move(&*pos)),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Agent::Minimax(a) => format!("minimax(depth={})", a.depth()),
            Agent::Random(_) => "random".to_string(),
        }
    }
}

/// Textual agent description: `minimax`, `minimax:<depth>`, `random`, `random:<seed>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentSpec {
    Minimax { depth: u32 },
    Random { seed: Option<u64> },
}

impl AgentSpec {
    pub fn build(&self) -> Result<Agent, EngineError> {
        Ok(match *self {
            AgentSpec::Minimax { depth } => Agent::Minimax(MinimaxAgent::new(depth)?),
            AgentSpec::Random { seed: Some(s) } => Agent::Random(RandomAgent::new(s)),
            AgentSpec::Random { seed: None } => Agent::Random(RandomAgent::from_entropy()),
        })
    }
}

impl FromStr for AgentSpec {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EngineError::UnknownAgent(s.to_string());
        let (kind, arg) = match s.split_once(':') {
            Some((k, a)) => (k, Some(a)),
            None => (s, None),
        };
        match kind.trim().to_ascii_lowercase().as_str() {
            "minimax" => {
                let depth = match arg {
                    Some(a) => a.trim().parse::<u32>().map_err(|_| bad())?,
                    None => DEFAULT_DEPTH,
                };
                if depth == 0 { return Err(EngineError::ZeroDepth); }
                Ok(AgentSpec::Minimax { depth })
            }
            "random" => {
                let seed = arg.map(|a| a.trim().parse::<u64>().map_err(|_| bad())).transpose()?;
                Ok(AgentSpec::Random { seed })
            }
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentSpec::Minimax { depth } => write!(f, "minimax:{depth}"),
            AgentSpec::Random { seed: Some(s) } => write!(f, "random:{s}"),
            AgentSpec::Random { seed: None } => write!(f, "random"),
        }
    }
}
