use std::io::{self, BufRead, Write};

use crate::agent::Agent;
use crate::board::cozy::Position;
use crate::search::alphabeta::MinimaxAgent;

pub struct UciEngine {
    pos: Position,
    agent: Agent,
}

impl UciEngine {
    pub fn new(agent: Agent) -> Self { Self { pos: Position::startpos(), agent } }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name Taperchess ({})", self.agent.name())?;
        writeln!(out, "id author Taperchess Team")?;
        writeln!(out, "uciok")
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        let fen = match tokens.next() {
            Some("startpos") => None,
            // Everything up to `moves` is the FEN, whatever its field count.
            Some("fen") => Some(tokens.by_ref().take_while(|t| *t != "moves").collect::<Vec<_>>().join(" ")),
            _ => return,
        };
        let moves: Vec<String> = tokens.filter(|t| *t != "moves").map(str::to_string).collect();
        match Position::from_moves(fen.as_deref(), &moves) {
            Ok(p) => self.pos = p,
            Err(e) => log::warn!("ignoring position command: {e}"),
        }
    }

    fn cmd_go(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        // Only `go depth N` is understood; anything else uses the configured agent as is.
        let mut depth: Option<&str> = None;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" { depth = Some(tokens.next().unwrap_or("")); }
        }
        let fixed = depth.and_then(|d| match d.parse::<u32>().map(MinimaxAgent::new) {
            Ok(Ok(a)) => Some(a),
            Ok(Err(e)) => {
                log::warn!("go depth {d}: {e}; using {}", self.agent.name());
                None
            }
            Err(_) => {
                log::warn!("go depth `{d}` is not a depth; using {}", self.agent.name());
                None
            }
        });
        let chosen = match fixed {
            Some(a) => a.select_move(&mut self.pos),
            None => self.agent.select_move(&mut self.pos),
        };
        match chosen {
            Ok(Some(best)) => writeln!(out, "bestmove {}", self.pos.uci(best)),
            Ok(None) => writeln!(out, "bestmove 0000"),
            Err(e) => {
                log::error!("search failed: {e}");
                writeln!(out, "bestmove 0000")
            }
        }
    }

    /// Handles one command line; returns false on `quit`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        match line {
            "" => {}
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "quit" => return Ok(false),
            "go" => self.cmd_go("", out)?,
            _ => {
                if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); }
                else if let Some(rest) = line.strip_prefix("go ") { self.cmd_go(rest, out)?; }
                else { log::debug!("unknown command: {line}"); }
            }
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            if !self.handle(&line?, &mut stdout)? { break; }
        }
        Ok(())
    }
}
