use taperchess::agent::{Agent, RandomAgent};
use taperchess::board::cozy::Position;
use taperchess::game::{play_game, write_records, GameEnd};

#[test]
fn random_games_are_reproducible_and_serialize() {
    let play = || {
        let mut w = Agent::Random(RandomAgent::new(11));
        let mut b = Agent::Random(RandomAgent::new(12));
        let mut pos = Position::startpos();
        play_game(&mut w, &mut b, &mut pos, 30).unwrap()
    };
    let g1 = play();
    let g2 = play();
    assert_eq!(g1.moves, g2.moves);

    let dir = std::env::temp_dir().join(format!("taperchess-records-{}", std::process::id()));
    let path = dir.join("games.jsonl");
    let _ = std::fs::remove_file(&path);
    write_records(&[g1.clone(), g2], &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["white"], "random");
    assert_eq!(lines[0]["moves"].as_array().unwrap().len(), g1.moves.len());
    assert!(lines[0].get("end").is_none());
    if g1.termination == GameEnd::PlyLimit {
        assert_eq!(lines[0]["termination"], "ply_limit");
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn minimax_mates_in_one_during_a_game() {
    let mut w = Agent::Minimax(taperchess::MinimaxAgent::new(2).unwrap());
    let mut b = Agent::Random(RandomAgent::new(5));
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let rec = play_game(&mut w, &mut b, &mut pos, 10).unwrap();
    assert_eq!(rec.moves, vec!["a1a8".to_string()]);
    assert_eq!(rec.result, "1-0");
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["termination"], serde_json::json!({ "termination": "Checkmate" }));
}
