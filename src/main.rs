use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taperchess::agent::AgentSpec;
use taperchess::board::cozy::Position;
use taperchess::game::{play_game, write_records};
use taperchess::uci::UciEngine;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fixed-depth minimax chess engine", long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play one game between two agents and print the moves
    Play {
        /// White agent: minimax[:depth] or random[:seed]
        #[arg(long, default_value = "minimax:3")]
        white: AgentSpec,
        /// Black agent: minimax[:depth] or random[:seed]
        #[arg(long, default_value = "random")]
        black: AgentSpec,
        /// Starting FEN position
        #[arg(long)]
        fen: Option<String>,
        /// Stop after this many plies
        #[arg(long, default_value_t = 400)]
        max_plies: usize,
        /// Append the game record as a JSON line to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Speak UCI on stdin/stdout
    Uci {
        /// Engine agent used for `go` without an explicit depth
        #[arg(long, default_value = "minimax:3")]
        agent: AgentSpec,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.cmd {
        Cmd::Play { white, black, fen, max_plies, out } => {
            let mut pos = match fen.as_deref() {
                Some(f) => Position::from_fen(f)?,
                None => Position::startpos(),
            };
            let mut w = white.build()?;
            let mut b = black.build()?;
            println!("White: {}  Black: {}", w.name(), b.name());
            let record = play_game(&mut w, &mut b, &mut pos, max_plies)?;
            println!("{}", record.moves.join(" "));
            println!("Result: {} ({:?})", record.result, record.termination);
            println!("Final: {}", pos.fen());
            if let Some(path) = out {
                write_records(std::slice::from_ref(&record), &path)
                    .with_context(|| format!("writing game record to {}", path.display()))?;
            }
        }
        Cmd::Uci { agent } => {
            let mut engine = UciEngine::new(agent.build()?);
            engine.run_loop()?;
        }
    }
    Ok(())
}
