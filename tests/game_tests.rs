use std::collections::VecDeque;

use broadside::{
    AttackResult, AutoPlayer, Board, BoardError, Difficulty, GameEngine, GameError,
    GameRecorder, GameStats, GameStatus, GameSummary, Headless, JsonLinesRecorder, Orientation,
    PlayerRecord, Renderer, Side, TargetInput, TargetPrompt, TurnReport,
};
use rand::{rngs::SmallRng, SeedableRng};

/// Prompt replaying a fixed list of answers, then resigning.
struct Scripted(VecDeque<TargetInput>);

impl Scripted {
    fn new(inputs: &[TargetInput]) -> Self {
        Self(inputs.iter().copied().collect())
    }
}

impl TargetPrompt for Scripted {
    fn select_target(&mut self, _view: &Board) -> TargetInput {
        self.0.pop_front().unwrap_or(TargetInput::Resign)
    }
}

/// Renderer counting what it is asked to show.
#[derive(Default)]
struct Counting {
    renders: usize,
    reports: usize,
    rejects: Vec<BoardError>,
}

impl Renderer for Counting {
    fn render(&mut self, _player: &Board, _computer: &Board) {
        self.renders += 1;
    }

    fn report(&mut self, _turn: &TurnReport) {
        self.reports += 1;
    }

    fn reject(&mut self, _target: (usize, usize), error: &BoardError) {
        self.rejects.push(error.clone());
    }
}

#[derive(Default)]
struct Collect(Vec<GameSummary>);

impl GameRecorder for Collect {
    fn record(&mut self, summary: &GameSummary) {
        self.0.push(*summary);
    }
}

fn small_game() -> GameEngine {
    let mut engine = GameEngine::new(Difficulty::Easy);
    engine
        .computer_board_mut()
        .place_ship(0, 0, 0, Orientation::Horizontal)
        .unwrap();
    engine
        .player_board_mut()
        .place_ship(0, 9, 8, Orientation::Horizontal)
        .unwrap();
    engine
}

#[test]
fn test_stats_record() {
    let mut stats = GameStats::default();
    for result in [
        AttackResult::Hit,
        AttackResult::Hit,
        AttackResult::Miss,
        AttackResult::Sunk,
    ] {
        stats.record(result);
    }
    assert_eq!(stats.turns, 4);
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hit_streak, 1);
    assert_eq!(stats.best_hit_streak, 2);
    assert!((stats.accuracy() - 0.75).abs() < f64::EPSILON);
    assert_eq!(GameStats::default().accuracy(), 0.0);
}

#[test]
fn test_new_engine() {
    let engine = GameEngine::new(Difficulty::Hard);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.turn(), Side::Player);
    assert_eq!(engine.difficulty(), Difficulty::Hard);
    assert!(engine.player_board().reveals_ships());
    assert!(!engine.computer_board().reveals_ships());
}

#[test]
fn test_rejected_attack_changes_nothing() {
    let mut engine = small_game();
    assert_eq!(engine.player_attack(3, 3), Ok(AttackResult::Miss));
    assert_eq!(engine.turn(), Side::Computer);
    let stats = *engine.stats();

    assert_eq!(engine.player_attack(3, 3), Err(BoardError::AlreadyAttacked));
    assert_eq!(engine.player_attack(10, 3), Err(BoardError::OutOfBounds));
    assert_eq!(*engine.stats(), stats);
    assert_eq!(engine.turn(), Side::Computer);
}

#[test]
fn test_player_turn_retries_until_valid() {
    let mut engine = small_game();
    engine.player_attack(5, 5).unwrap();

    let mut prompt = Scripted::new(&[
        TargetInput::Invalid,
        TargetInput::Coordinate(5, 5),
        TargetInput::Coordinate(0, 1),
    ]);
    let mut renderer = Counting::default();
    let report = engine.play_player_turn(&mut prompt, &mut renderer).unwrap();

    assert_eq!(
        report,
        TurnReport::Player {
            target: (0, 1),
            result: AttackResult::Hit
        }
    );
    assert_eq!(renderer.rejects, vec![BoardError::AlreadyAttacked]);
    assert_eq!(engine.stats().turns, 2);
}

#[test]
fn test_resign() {
    let mut engine = small_game();
    let mut prompt = Scripted::new(&[TargetInput::Resign]);
    let mut recorder = Collect::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let result = engine.run(&mut prompt, &mut Headless, &mut recorder, &mut rng);
    assert_eq!(result, Err(GameError::Resigned));
    assert!(recorder.0.is_empty());
    assert_eq!(engine.summary().status, GameStatus::InProgress);
}

#[test]
fn test_scripted_win() {
    let mut engine = small_game();
    let mut prompt = Scripted::new(&[
        TargetInput::Coordinate(0, 0),
        TargetInput::Coordinate(0, 1),
    ]);
    let mut renderer = Counting::default();
    let mut recorder = Collect::default();
    // the lone player ship needs two shots, so the opponent cannot win first
    let mut rng = SmallRng::seed_from_u64(2);
    let summary = engine
        .run(&mut prompt, &mut renderer, &mut recorder, &mut rng)
        .unwrap();

    assert_eq!(summary.status, GameStatus::Won);
    assert_eq!(summary.stats.turns, 2);
    assert_eq!(summary.stats.best_hit_streak, 2);
    assert_eq!(summary.opponent_shots, 1);
    assert_eq!(renderer.reports, 3);
    assert_eq!(renderer.renders, 4);
    assert_eq!(recorder.0, vec![summary]);
}

#[test]
fn test_full_games_terminate() {
    for difficulty in Difficulty::ALL {
        for seed in 0..10u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut engine = GameEngine::new(difficulty).with_seed(seed);
            engine.deploy_computer_fleet(&mut rng).unwrap();
            engine.player_board_mut().auto_place_fleet(&mut rng).unwrap();

            let mut player = AutoPlayer::new(Difficulty::Medium, SmallRng::seed_from_u64(seed + 1));
            let mut recorder = Collect::default();
            let summary = engine
                .run(&mut player, &mut Headless, &mut recorder, &mut rng)
                .unwrap();

            assert_ne!(summary.status, GameStatus::InProgress);
            assert_eq!(summary.seed, Some(seed));
            assert_eq!(summary.difficulty, difficulty);
            let stats = summary.stats;
            assert_eq!(stats.hits + stats.misses, stats.turns);
            match summary.status {
                GameStatus::Won => {
                    assert!(engine.computer_board().is_fleet_destroyed());
                    assert_eq!(stats.turns, summary.opponent_shots + 1);
                }
                GameStatus::Lost => {
                    assert!(engine.player_board().is_fleet_destroyed());
                    assert_eq!(stats.turns, summary.opponent_shots);
                }
                GameStatus::InProgress => unreachable!(),
            }
            assert_eq!(recorder.0.len(), 1);
        }
    }
}

#[test]
fn test_nightmare_beats_easy_on_average() {
    let mut shots = [0u32; 2];
    for (slot, difficulty) in [Difficulty::Easy, Difficulty::Nightmare].into_iter().enumerate() {
        for seed in 0..20u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut engine = GameEngine::new(difficulty);
            engine.player_board_mut().auto_place_fleet(&mut rng).unwrap();
            while !engine.player_board().is_fleet_destroyed() {
                engine.computer_attack(&mut rng).unwrap();
            }
            shots[slot] += engine.opponent_shots();
        }
    }
    assert!(shots[1] < shots[0], "nightmare {} vs easy {}", shots[1], shots[0]);
}

#[test]
fn test_json_lines_recorder() {
    let path = std::env::temp_dir().join(format!("broadside-record-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let mut engine = small_game().with_seed(99);
    engine.player_attack(0, 0).unwrap();
    let summary = engine.summary();

    let mut alice = JsonLinesRecorder::new(&path, "alice");
    let mut bob = JsonLinesRecorder::new(&path, "bob");
    assert!(alice.history("alice").unwrap().is_empty());

    alice.record(&summary);
    bob.record(&summary);
    alice.record(&summary);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    let parsed: PlayerRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed.player, "alice");
    assert_eq!(parsed.game, summary);
    let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(value["player"], "bob");
    assert_eq!(value["difficulty"], "easy");
    assert_eq!(value["seed"], 99);

    let games = alice.history("alice").unwrap();
    assert_eq!(games.len(), 2);
    assert!(games.iter().all(|g| g.player == "alice" && g.game == summary));
    assert_eq!(bob.history("bob").unwrap().len(), 1);
    assert!(bob.history("carol").unwrap().is_empty());

    let _ = std::fs::remove_file(&path);
}
