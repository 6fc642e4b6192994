use platformer::level::{self, LevelData, LevelError, SpawnRect};
use platformer::world::World;

const GOOD_LEVEL: &str = r#"{
    "terrain":    [ { "x": 300, "y": 350, "w": 100, "h": 50 } ],
    "patrollers": [ { "x": 620, "y": 410, "w": 40, "h": 40 } ],
    "power_ups":  [ { "x": 580, "y": 200, "w": 25, "h": 25 } ],
    "walkers":    [ { "x": 420, "y": 410, "w": 40, "h": 40 },
                    { "x": 800, "y": 410, "w": 40, "h": 40 } ]
}"#;

// ── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn parse_valid_level() {
    let data = level::parse(GOOD_LEVEL).expect("valid level");
    assert_eq!(data.terrain.len(), 1);
    assert_eq!(data.patrollers.len(), 1);
    assert_eq!(data.power_ups.len(), 1);
    assert_eq!(data.walkers.len(), 2);
    assert_eq!(data.terrain[0], SpawnRect { x: 300, y: 350, w: 100, h: 50 });
}

#[test]
fn parse_accepts_empty_lists() {
    let data = level::parse(
        r#"{ "terrain": [], "patrollers": [], "power_ups": [], "walkers": [] }"#,
    )
    .expect("empty lists are a valid level");
    assert_eq!(data, LevelData::default());
}

#[test]
fn parse_rejects_missing_keys() {
    // No partial loads: every list must be present
    let err = level::parse(r#"{ "terrain": [], "patrollers": [], "power_ups": [] }"#)
        .expect_err("missing walkers key");
    assert!(matches!(err, LevelError::Parse(_)));
}

#[test]
fn parse_rejects_garbage() {
    assert!(matches!(
        level::parse("not a level"),
        Err(LevelError::Parse(_))
    ));
    assert!(matches!(
        level::parse(r#"{ "terrain": 7 }"#),
        Err(LevelError::Parse(_))
    ));
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn load_reports_unreadable_files() {
    let err = level::load("/no/such/dir/level.json").expect_err("missing file");
    assert!(matches!(err, LevelError::Io(_)));
}

#[test]
fn load_round_trips_through_a_file() {
    let path = std::env::temp_dir().join("platformer_level_roundtrip.json");
    std::fs::write(&path, GOOD_LEVEL).expect("write temp level");

    let data = level::load(&path).expect("load temp level");
    assert_eq!(data, level::parse(GOOD_LEVEL).unwrap());

    let _ = std::fs::remove_file(&path);
}

// ── Into the world ────────────────────────────────────────────────────────────

#[test]
fn parsed_level_populates_the_world() {
    let data = level::parse(GOOD_LEVEL).unwrap();
    let world = World::new(&data);
    // 28 strip tiles + 5 level entries + the player
    assert_eq!(world.entities().len(), 34);
}
