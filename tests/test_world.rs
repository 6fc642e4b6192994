use platformer::entities::{Entity, FrameId, Kind, Rect};
use platformer::level::{LevelData, SpawnRect};
use platformer::world::{Intent, World};

fn empty_level() -> LevelData {
    LevelData::default()
}

/// One floating platform at (100, 100)–(300, 150), handy for placing
/// enemies and pickups right next to the player spawn at (100, 50).
fn platform_level() -> LevelData {
    LevelData {
        terrain: vec![SpawnRect { x: 100, y: 100, w: 200, h: 50 }],
        ..LevelData::default()
    }
}

fn count_kind(world: &World, kind: Kind) -> usize {
    world.entities().iter().filter(|e| e.kind() == kind).count()
}

const MOVE_RIGHT: Intent = Intent {
    move_left: false,
    move_right: true,
    jump_held: false,
    fire_pressed: false,
};

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn empty_level_still_gets_the_ground_strip() {
    let world = World::new(&empty_level());
    // 28 strip tiles plus the player
    assert_eq!(world.entities().len(), 29);
    assert_eq!(count_kind(&world, Kind::Terrain), 28);

    // The strip starts 10 tiles left of the origin
    assert_eq!(world.entities()[0].rect(), Rect::new(-500.0, 450.0, 50.0, 50.0));
}

#[test]
fn player_spawns_last() {
    let world = World::new(&empty_level());
    assert_eq!(world.entities().last().unwrap().kind(), Kind::Player);
    let p = world.player();
    assert_eq!((p.x, p.y, p.w, p.h), (100.0, 50.0, 25.0, 50.0));
}

#[test]
fn level_entries_spawn_in_list_order() {
    let level = LevelData {
        terrain: vec![SpawnRect { x: 500, y: 300, w: 100, h: 50 }],
        patrollers: vec![SpawnRect { x: 700, y: 100, w: 40, h: 40 }],
        power_ups: vec![SpawnRect { x: 900, y: 100, w: 25, h: 25 }],
        walkers: vec![SpawnRect { x: 1100, y: 100, w: 40, h: 40 }],
    };
    let world = World::new(&level);
    assert_eq!(world.entities().len(), 33);

    // Strip tiles 0..28, then the level's entries, then the player
    assert_eq!(world.entities()[28].kind(), Kind::Terrain);
    assert_eq!(world.entities()[29].kind(), Kind::Patroller);
    assert_eq!(world.entities()[30].kind(), Kind::PowerUp);
    assert_eq!(world.entities()[31].kind(), Kind::Walker);
    assert_eq!(world.entities()[32].kind(), Kind::Player);
}

// ── Intent application ────────────────────────────────────────────────────────

#[test]
fn right_wins_when_both_directions_are_held() {
    let mut world = World::new(&empty_level());
    world.apply_intent(Intent {
        move_left: true,
        move_right: true,
        ..Intent::default()
    });
    assert_eq!(world.player().velocity_x, 5.5);
    assert!(world.player().moving);
}

#[test]
fn no_direction_stops_the_player() {
    let mut world = World::new(&empty_level());
    world.apply_intent(MOVE_RIGHT);
    world.apply_intent(Intent::default());
    assert_eq!(world.player().velocity_x, 0.0);
    assert!(!world.player().moving);
}

#[test]
fn jump_intent_starts_a_jump() {
    let mut world = World::new(&empty_level());
    world.apply_intent(Intent { jump_held: true, ..Intent::default() });
    assert_eq!(world.player().vert_velocity, -21.0);
    assert!(world.player().jumping);
}

#[test]
fn fire_intent_spawns_one_projectile_at_the_player() {
    let mut world = World::new(&empty_level());
    let before = world.entities().len();
    world.apply_intent(Intent { fire_pressed: true, ..Intent::default() });

    assert_eq!(world.entities().len(), before + 1);
    let shot = world.entities().last().unwrap();
    assert_eq!(shot.kind(), Kind::Projectile);
    assert_eq!(shot.rect(), Rect::new(100.0, 50.0, 15.0, 15.0));
}

// ── Removal ───────────────────────────────────────────────────────────────────

#[test]
fn out_of_range_removal_is_ignored() {
    let mut world = World::new(&empty_level());
    world.remove(9999);
    assert_eq!(world.entities().len(), 29);
}

#[test]
fn removal_keeps_the_player_reference_valid() {
    let mut world = World::new(&empty_level());
    world.remove(0); // drop a strip tile from under the player index
    assert_eq!(world.entities().len(), 28);
    assert_eq!(world.player().x, 100.0); // still resolves

    // The player itself is never removed
    world.remove(27);
    assert_eq!(world.entities().len(), 28);
    assert_eq!(count_kind(&world, Kind::Player), 1);
}

// ── End-to-end: falling onto the strip ────────────────────────────────────────

#[test]
fn player_settles_on_the_ground_strip() {
    let mut world = World::new(&empty_level());
    for _ in 0..20 {
        world.update();
    }
    // Standing on top of the 50 px tiles whose surface is at y=450
    assert_eq!(world.player().y, 400.0);
    assert_eq!(world.player().vert_velocity, 0.0);
    assert!(!world.player().jumping);
}

// ── End-to-end: projectile lifecycle ──────────────────────────────────────────

#[test]
fn projectile_is_culled_beyond_the_leash() {
    let mut world = World::new(&empty_level());
    world.spawn_projectile();

    // 15 px per tick from x=100; the leash breaks past player.x + 600
    for _ in 0..40 {
        world.update();
    }
    assert_eq!(count_kind(&world, Kind::Projectile), 1); // x = 700, still inside

    world.update();
    assert_eq!(count_kind(&world, Kind::Projectile), 0); // x = 715, culled
}

// ── End-to-end: walker on fire ────────────────────────────────────────────────

/// Platform with a walker two ticks of projectile flight from the spawn.
fn walker_ambush_level() -> LevelData {
    LevelData {
        terrain: vec![SpawnRect { x: 100, y: 100, w: 200, h: 50 }],
        walkers: vec![SpawnRect { x: 130, y: 60, w: 50, h: 50 }],
        ..LevelData::default()
    }
}

#[test]
fn projectile_ignites_walker_and_is_consumed() {
    let mut world = World::new(&walker_ambush_level());
    world.spawn_projectile();

    world.update(); // walker lands on the platform
    world.update(); // projectile reaches the walker

    let walker = world
        .entities()
        .iter()
        .find_map(|e| match e {
            Entity::Walker(w) => Some(w),
            _ => None,
        })
        .expect("walker still present");
    assert!(walker.on_fire);
    assert_eq!(walker.velocity_x, 0.0);
    assert_eq!(walker.fire_counter, 60);

    // The projectile never makes it to the next render list
    assert_eq!(count_kind(&world, Kind::Projectile), 0);
    assert!(world
        .render_list()
        .iter()
        .all(|item| item.frame != FrameId::Projectile));
}

#[test]
fn burned_out_walker_is_pruned_one_tick_early() {
    let mut world = World::new(&walker_ambush_level());
    world.spawn_projectile();
    world.update();
    world.update(); // ignition: countdown starts at 60

    for _ in 0..58 {
        world.update();
    }
    assert_eq!(count_kind(&world, Kind::Walker), 1); // countdown reads 2

    world.update();
    assert_eq!(count_kind(&world, Kind::Walker), 0); // reads 1: pruned
}

// ── End-to-end: patroller stun ────────────────────────────────────────────────

fn patroller_ambush_level() -> LevelData {
    LevelData {
        terrain: vec![SpawnRect { x: 100, y: 100, w: 200, h: 50 }],
        patrollers: vec![SpawnRect { x: 130, y: 60, w: 40, h: 40 }],
        ..LevelData::default()
    }
}

fn the_patroller(world: &World) -> &platformer::entities::Patroller {
    world
        .entities()
        .iter()
        .find_map(|e| match e {
            Entity::Patroller(p) => Some(p),
            _ => None,
        })
        .expect("patroller present")
}

#[test]
fn projectile_stuns_patroller_and_is_consumed() {
    let mut world = World::new(&patroller_ambush_level());
    world.spawn_projectile();

    world.update(); // patroller lands on the platform
    world.update(); // projectile hits

    assert!(the_patroller(&world).stunned);
    assert_eq!(the_patroller(&world).stun_counter, 180);
    assert_eq!(count_kind(&world, Kind::Projectile), 0);
}

#[test]
fn stunned_patroller_resumes_after_the_full_countdown() {
    let mut world = World::new(&patroller_ambush_level());
    world.spawn_projectile();
    world.update();
    world.update(); // stunned here

    for _ in 0..179 {
        world.update();
    }
    assert!(the_patroller(&world).stunned); // countdown reads 1

    world.update();
    let p = the_patroller(&world);
    assert!(!p.stunned);
    assert_eq!(p.velocity_x, -1.5); // resumes its pre-stun direction
}

#[test]
fn touching_the_player_knocks_the_patroller() {
    // No projectile this time: the patroller walks into the player
    let mut world = World::new(&patroller_ambush_level());

    for _ in 0..4 {
        world.update();
    }
    assert!(!the_patroller(&world).stunned); // one step short

    world.update();
    assert!(the_patroller(&world).stunned);
}

// ── End-to-end: power-up pickup ───────────────────────────────────────────────

#[test]
fn walking_into_a_power_up_toggles_the_player() {
    let level = LevelData {
        terrain: vec![SpawnRect { x: 100, y: 100, w: 200, h: 50 }],
        power_ups: vec![SpawnRect { x: 130, y: 50, w: 25, h: 25 }],
        ..LevelData::default()
    };
    let mut world = World::new(&level);

    for _ in 0..5 {
        world.apply_intent(MOVE_RIGHT);
        world.update();
    }

    assert!(world.player().shrunk);
    assert_eq!(world.player().h, 25.0);
    assert_eq!(world.player().y + world.player().h, 100.0); // bottom kept
    assert_eq!(count_kind(&world, Kind::PowerUp), 0);
}

// ── Render list ───────────────────────────────────────────────────────────────

#[test]
fn render_list_preserves_iteration_order() {
    let world = World::new(&empty_level());
    let list = world.render_list();

    assert_eq!(list.len(), world.entities().len());
    assert_eq!(list[0].frame, FrameId::Terrain);
    assert_eq!((list[0].x, list[0].y), (-500.0, 450.0));

    // The player is appended last, so it draws over everything
    let last = list.last().unwrap();
    assert_eq!(last.frame, FrameId::Player(0));
    assert!(!last.flip);
}
