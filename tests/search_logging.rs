use std::sync::{Mutex, MutexGuard, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use taperchess::agent::{Agent, RandomAgent};
use taperchess::board::cozy::Position;
use taperchess::search::alphabeta::MinimaxAgent;
use taperchess::uci::UciEngine;

struct Capture;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static SERIAL: Mutex<()> = Mutex::new(());
static LOGGER: Capture = Capture;
static INIT: Once = Once::new();

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool { true }
    fn log(&self, record: &Record) {
        if record.target().starts_with("taperchess") {
            RECORDS.lock().unwrap().push((record.level(), record.args().to_string()));
        }
    }
    fn flush(&self) {}
}

// Tests share one logger, so they run one at a time against a cleared buffer.
fn capture() -> MutexGuard<'static, ()> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    RECORDS.lock().unwrap().clear();
    guard
}

fn taken() -> Vec<(Level, String)> { std::mem::take(&mut *RECORDS.lock().unwrap()) }

#[test]
fn root_scores_at_debug_and_summary_at_info() {
    let _guard = capture();
    let mut pos = Position::startpos();
    MinimaxAgent::new(1).unwrap().search_root(&mut pos).unwrap();
    let records = taken();
    let root_lines = records.iter().filter(|(l, m)| *l == Level::Debug && m.starts_with("root ")).count();
    assert_eq!(root_lines, 20);
    let summaries: Vec<_> = records.iter().filter(|(l, _)| *l == Level::Info).collect();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].1.contains("score 50"), "{}", summaries[0].1);
}

#[test]
fn rejected_go_depth_is_warned() {
    let _guard = capture();
    let mut engine = UciEngine::new(Agent::Random(RandomAgent::new(3)));
    let mut out = Vec::new();
    engine.handle("go depth 0", &mut out).unwrap();
    engine.handle("go depth deep", &mut out).unwrap();
    engine.handle("go depth 2", &mut out).unwrap();
    let warnings: Vec<String> = taken().into_iter().filter(|(l, _)| *l == Level::Warn).map(|(_, m)| m).collect();
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings[0].contains("at least 1"));
    assert!(warnings[1].contains("deep"));
    assert_eq!(String::from_utf8(out).unwrap().lines().filter(|l| l.starts_with("bestmove ")).count(), 3);
}
