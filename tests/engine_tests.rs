//! Engine lifecycle integration tests: staged reveal, generation
//! invalidation across resets and level loads, progress events, and the
//! serialisable read models.

use std::cell::RefCell;
use std::rc::Rc;

use netpuzzle::core::{EngineConfig, GridPos, Level, LevelError, PieceId, Vec2};
use netpuzzle::engine::{Progress, PuzzleEngine, Snapshot};
use netpuzzle::rules::Status;
use netpuzzle::variants::{GearTrain, GridPuzzle, SquareTile};

fn first_light(id: u32) -> Level {
    let mut p = GridPuzzle::square(id, "first light", 3, 1);
    p.source(GridPos::new(0, 0), SquareTile::End.connectors());
    p.tile(GridPos::new(1, 0), SquareTile::Straight.connectors(), 1);
    p.target(GridPos::new(2, 0), SquareTile::End.connectors(), 2);
    p.reachability().unwrap()
}

fn staged(level: Level, delay: u32) -> PuzzleEngine {
    let config = EngineConfig::default().with_reveal_delay(delay);
    let mut engine = PuzzleEngine::load(level, config).unwrap();
    engine.start();
    engine
}

fn revealed(engine: &PuzzleEngine, id: u32) -> bool {
    engine.snapshot().piece(PieceId(id)).unwrap().revealed
}

// =============================================================================
// Staged reveal
// =============================================================================

#[test]
fn test_flow_reveals_node_by_node() {
    let mut engine = staged(first_light(1), 2);
    assert!(revealed(&engine, 0));

    engine.rotate(PieceId(1));
    assert_eq!(engine.status(), Status::Won, "the result is known at once");
    assert!(revealed(&engine, 0));
    assert!(!revealed(&engine, 1));

    engine.tick();
    engine.tick();
    assert!(revealed(&engine, 1));
    assert!(!revealed(&engine, 2));

    engine.tick();
    engine.tick();
    assert!(revealed(&engine, 2));
    assert!(engine.reveal().is_complete());
}

#[test]
fn test_without_delay_everything_shows_at_once() {
    let mut engine = PuzzleEngine::load(first_light(1), EngineConfig::default()).unwrap();
    engine.start();
    engine.rotate(PieceId(1));
    assert!((0..3).all(|i| revealed(&engine, i)));
}

#[test]
fn test_reset_drops_reveal_in_flight() {
    let mut engine = staged(first_light(1), 2);
    engine.rotate(PieceId(1));
    engine.tick();
    let before = engine.reveal().generation();

    engine.reset();
    assert!(engine.reveal().generation() > before);
    for _ in 0..10 {
        engine.tick();
    }
    assert!(revealed(&engine, 0));
    assert!(!revealed(&engine, 1), "steps queued before the reset are stale");
    assert!(!revealed(&engine, 2));
}

#[test]
fn test_next_level_is_not_touched_by_old_steps() {
    let mut engine = staged(first_light(1), 3);
    engine.rotate(PieceId(1));

    // Same layout, but the wire needs two turns now.
    let mut p = GridPuzzle::square(2, "second light", 3, 1);
    p.source(GridPos::new(0, 0), SquareTile::End.connectors());
    p.tile(GridPos::new(1, 0), SquareTile::Straight.connectors(), 3);
    p.target(GridPos::new(2, 0), SquareTile::End.connectors(), 2);
    engine.load_level(p.reachability().unwrap()).unwrap();

    assert_eq!(engine.level().id.0, 2);
    assert_eq!(engine.status(), Status::Playing);
    assert_eq!(engine.moves(), 0);
    for _ in 0..10 {
        engine.tick();
    }
    assert!(!revealed(&engine, 1));
    assert!(!revealed(&engine, 2));
}

#[test]
fn test_load_level_switches_variant() {
    let mut engine = PuzzleEngine::load(first_light(1), EngineConfig::default()).unwrap();
    engine.start();

    let mut train = GearTrain::new(3, "gears");
    let driver = train.driver(Vec2::new(0.0, 0.0), 12);
    let follower = train.meshed_with(driver, 12, 0.0);
    train.require_spin(follower, Some(-1.0));
    engine.load_level(train.build().unwrap()).unwrap();

    assert_eq!(engine.status(), Status::Won);
    assert!(!engine.rotate(PieceId(0)));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_invalid_level_is_rejected_at_load() {
    let mut level = first_light(1);
    level.sources = vec![PieceId(9)];
    assert!(matches!(
        PuzzleEngine::load(level, EngineConfig::default()),
        Err(LevelError::UnknownPiece(PieceId(9)))
    ));
}

#[test]
fn test_progress_events() {
    let seen: Rc<RefCell<Vec<Progress>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut engine = PuzzleEngine::load(first_light(4), EngineConfig::default()).unwrap();
    engine.subscribe(Box::new(move |p: &Progress| sink.borrow_mut().push(*p)));
    engine.start();
    engine.rotate(PieceId(0));
    engine.rotate(PieceId(1));
    engine.reset();

    let seen = seen.borrow();
    let statuses: Vec<Status> = seen.iter().map(|p| p.status).collect();
    assert_eq!(statuses, vec![Status::Playing, Status::Won, Status::Playing]);
    assert_eq!(seen[1].moves, 1);
    assert_eq!(seen[2].moves, 0);
    assert!(seen.iter().all(|p| p.level.0 == 4));
}

#[test]
fn test_progress_matches_engine() {
    let mut engine = PuzzleEngine::load(first_light(5), EngineConfig::default()).unwrap();
    assert_eq!(engine.progress().status, Status::Setup);
    engine.start();
    engine.rotate(PieceId(1));
    let progress = engine.progress();
    assert_eq!(progress.moves, 1);
    assert_eq!(progress.status, Status::Won);
}

// =============================================================================
// Read models
// =============================================================================

#[test]
fn test_snapshot_shows_effective_connectors() {
    let mut engine = PuzzleEngine::load(first_light(1), EngineConfig::default()).unwrap();
    engine.start();
    let wire = engine.snapshot().piece(PieceId(1)).cloned().unwrap();
    assert_eq!(wire.connectors, SquareTile::Straight.connectors().rotated(1));

    engine.rotate(PieceId(1));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.status, Status::Won);
    assert_eq!(snapshot.moves, 1);
    assert_eq!(snapshot.pieces.len(), 3);
    assert_eq!(snapshot.piece(PieceId(1)).unwrap().connectors, SquareTile::Straight.connectors());
    assert_eq!(snapshot.piece(PieceId(1)).unwrap().aligned, None);
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut engine = PuzzleEngine::load(first_light(1), EngineConfig::default()).unwrap();
    engine.start();
    let snapshot = engine.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"Playing\""));
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_level_loads_from_json() {
    let level = first_light(1);
    let json = serde_json::to_string(&level).unwrap();
    let back: Level = serde_json::from_str(&json).unwrap();
    assert_eq!(back, level);

    let mut engine = PuzzleEngine::load(back, EngineConfig::default()).unwrap();
    engine.start();
    assert!(engine.rotate(PieceId(1)));
    assert_eq!(engine.status(), Status::Won);
}
