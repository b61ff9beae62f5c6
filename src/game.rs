use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use cozy_chess::Color;
use serde::Serialize;

use crate::agent::Agent;
use crate::board::cozy::Position;
use crate::board::{Rules, Termination};
use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Termination(Termination),
    /// The side to move returned no move without the game being over.
    NoMove,
    PlyLimit,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub white: String,
    pub black: String,
    pub moves: Vec<String>,
    pub result: String, // "1-0", "0-1", "1/2-1/2" or "*"
    pub termination: GameEnd,
}

/// Plays `white` against `black` from `pos` until the game ends, an agent has
/// no move, or `max_plies` moves have been made. `pos` is left at the final position.
pub fn play_game(white: &mut Agent, black: &mut Agent, pos: &mut Position, max_plies: usize) -> Result<GameRecord, EngineError> {
    let mut record = GameRecord {
        start_fen: pos.fen(),
        white: white.name(),
        black: black.name(),
        moves: Vec::new(),
        result: "*".to_string(),
        termination: GameEnd::PlyLimit,
    };

    loop {
        if let Some(outcome) = pos.outcome() {
            log::info!("game over: {:?} ({})", outcome.termination, outcome.result_str());
            record.result = outcome.result_str().to_string();
            record.termination = GameEnd::Termination(outcome.termination);
            break;
        }
        if record.moves.len() >= max_plies {
            log::info!("ply limit {max_plies} reached");
            break;
        }

        let stm = pos.side_to_move();
        let agent = if stm == Color::White { &mut *white } else { &mut *black };
        let t0 = Instant::now();
        let Some(mv) = agent.select_move(pos)? else {
            log::warn!("{stm:?} ({}) returned no move", agent.name());
            record.termination = GameEnd::NoMove;
            break;
        };
        let uci = pos.uci(mv);
        pos.push(mv)?;
        log::info!("[{}] {stm:?} {} plays {uci} ({:.3}s)", record.moves.len() + 1, agent.name(), t0.elapsed().as_secs_f64());
        record.moves.push(uci);
    }
    Ok(record)
}

/// Appends records to `path` as JSON lines.
pub fn write_records(records: &[GameRecord], path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let f = File::options().create(true).append(true).open(path)?;
    let mut w = BufWriter::new(f);
    for r in records {
        serde_json::to_writer(&mut w, r)?;
        w.write_all(b"\n")?;
    }
    w.flush()
}
