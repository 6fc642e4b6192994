/// The world — owns the entity collection and drives the per-tick cycle:
/// physics, all-pairs collision dispatch, and pruning of dead entities.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::entities::{
    Entity, FrameId, Kind, Patroller, Player, PowerUp, Projectile, Terrain, Walker,
};
use crate::level::LevelData;

// ── World constants ───────────────────────────────────────────────────────────

/// The unconditional ground strip: 28 tiles of 50 px, starting 10 tiles
/// left of the origin, at the ground-row height.
const GROUND_STRIP_TILES: i32 = 28;
const GROUND_STRIP_OFFSET: i32 = -10;
const GROUND_TILE: f32 = 50.0;
const GROUND_STRIP_Y: f32 = 450.0;

/// Player spawn used at world construction.
const PLAYER_SPAWN: (f32, f32, f32, f32) = (100.0, 50.0, 25.0, 50.0);

/// Projectiles are culled once they get this far ahead of the player...
const PROJECTILE_RANGE_AHEAD: f32 = 600.0;
/// ...or this far behind.
const PROJECTILE_RANGE_BEHIND: f32 = 100.0;

// ── Intent vector ─────────────────────────────────────────────────────────────

/// Per-tick summary of player input, produced by the front end.  Right
/// wins when both directions are held; `fire_pressed` is edge-triggered
/// (one projectile per press, not per tick held).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_held: bool,
    pub fire_pressed: bool,
}

// ── Render list ───────────────────────────────────────────────────────────────

/// One entry of the per-tick render handoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub frame: FrameId,
    pub flip: bool,
}

// ── World ─────────────────────────────────────────────────────────────────────

pub struct World {
    entities: Vec<Entity>,
    /// Index of the player entity; kept valid across removals.
    player: usize,
}

impl World {
    /// Build a world from level data: the ground strip first, then the
    /// level's entries, then the player, so later entities draw over
    /// earlier ones.
    pub fn new(level: &LevelData) -> World {
        let mut entities: Vec<Entity> = Vec::new();

        for i in 0..GROUND_STRIP_TILES {
            let x = (i + GROUND_STRIP_OFFSET) as f32 * GROUND_TILE;
            entities.push(Entity::Terrain(Terrain::new(
                x,
                GROUND_STRIP_Y,
                GROUND_TILE,
                GROUND_TILE,
            )));
        }

        for r in &level.terrain {
            entities.push(Entity::Terrain(Terrain::new(
                r.x as f32, r.y as f32, r.w as f32, r.h as f32,
            )));
        }
        for r in &level.patrollers {
            entities.push(Entity::Patroller(Patroller::new(
                r.x as f32, r.y as f32, r.w as f32, r.h as f32,
            )));
        }
        for r in &level.power_ups {
            entities.push(Entity::PowerUp(PowerUp::new(
                r.x as f32, r.y as f32, r.w as f32, r.h as f32,
            )));
        }
        for r in &level.walkers {
            entities.push(Entity::Walker(Walker::new(
                r.x as f32, r.y as f32, r.w as f32, r.h as f32,
            )));
        }

        let (x, y, w, h) = PLAYER_SPAWN;
        let player = entities.len();
        entities.push(Entity::Player(Player::new(x, y, w, h)));

        info!("world populated with {} entities", entities.len());

        World { entities, player }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn player(&self) -> &Player {
        match &self.entities[self.player] {
            Entity::Player(p) => p,
            _ => unreachable!("player index always resolves to the player"),
        }
    }

    fn player_mut(&mut self) -> &mut Player {
        match &mut self.entities[self.player] {
            Entity::Player(p) => p,
            _ => unreachable!("player index always resolves to the player"),
        }
    }

    /// Apply one tick's input to the player.  Right takes precedence when
    /// both directions are held; no direction at all halts the player and
    /// rewinds its walk cycle.
    pub fn apply_intent(&mut self, intent: Intent) {
        if intent.move_right {
            self.player_mut().move_right();
        } else if intent.move_left {
            self.player_mut().move_left();
        } else {
            self.player_mut().stop();
        }
        if intent.jump_held {
            self.player_mut().jump();
        }
        if intent.fire_pressed {
            self.spawn_projectile();
        }
    }

    /// Fire a projectile from the player's current position.
    pub fn spawn_projectile(&mut self) {
        let player = self.player();
        let shot = Projectile::new(player.x, player.y);
        debug!("projectile spawned at ({}, {})", shot.x, shot.y);
        self.entities.push(Entity::Projectile(shot));
    }

    /// Bounds-checked removal; out-of-range indices are silently ignored.
    /// The player is never removed.
    pub fn remove(&mut self, index: usize) {
        if index < self.entities.len() && index != self.player {
            self.entities.remove(index);
            if index < self.player {
                self.player -= 1;
            }
        }
    }

    /// Advance the world one tick.
    pub fn update(&mut self) {
        // ── 1. Physics ───────────────────────────────────────────────────────
        // Exclusive access: nothing can be appended mid-pass, so every
        // entity present at tick start is updated exactly once.
        for entity in &mut self.entities {
            entity.update();
        }

        // ── 2. Collision ─────────────────────────────────────────────────────
        // Ordered all-pairs sweep.  Removals are deferred into a set so a
        // resolution can never shift indices out from under the loops; a
        // pair is skipped once either member is marked.
        let mut doomed: BTreeSet<usize> = BTreeSet::new();
        for i in 0..self.entities.len() {
            for s in 0..self.entities.len() {
                if i == s || doomed.contains(&i) || doomed.contains(&s) {
                    continue;
                }
                if self.entities[i].collides_with(&self.entities[s]) {
                    self.resolve(i, s, &mut doomed);
                }
            }
        }

        // ── 3. Prune ─────────────────────────────────────────────────────────
        let player_x = self.player().x;
        for (index, entity) in self.entities.iter().enumerate() {
            match entity {
                Entity::Projectile(shot) => {
                    if shot.x > player_x + PROJECTILE_RANGE_AHEAD
                        || shot.x < player_x - PROJECTILE_RANGE_BEHIND
                    {
                        doomed.insert(index);
                    }
                }
                Entity::Walker(walker) if walker.burned_out() => {
                    doomed.insert(index);
                }
                _ => {}
            }
        }

        self.apply_removals(&doomed);
    }

    /// Type-dispatched resolution for one overlapping ordered pair.
    /// Pairs with no table entry resolve to nothing.
    fn resolve(&mut self, i: usize, s: usize, doomed: &mut BTreeSet<usize>) {
        match (self.entities[i].kind(), self.entities[s].kind()) {
            (Kind::Player, Kind::Terrain) => {
                let block = self.entities[s].rect();
                if let Entity::Player(player) = &mut self.entities[i] {
                    player.collision(block);
                }
            }
            (Kind::Player, Kind::Patroller) => {
                if let Entity::Patroller(patroller) = &mut self.entities[s] {
                    patroller.knock();
                }
            }
            (Kind::Player, Kind::PowerUp) => {
                if let Entity::Player(player) = &mut self.entities[i] {
                    player.eat_power_up();
                }
                doomed.insert(s);
            }
            (Kind::PowerUp, Kind::Terrain) => {
                let block = self.entities[s].rect();
                if let Entity::PowerUp(power_up) = &mut self.entities[i] {
                    power_up.collision(block);
                }
            }
            (Kind::Walker, Kind::Terrain) => {
                let block = self.entities[s].rect();
                if let Entity::Walker(walker) = &mut self.entities[i] {
                    walker.collision(block);
                }
            }
            (Kind::Walker, Kind::Projectile) => {
                if let Entity::Walker(walker) = &mut self.entities[i] {
                    walker.catch_fire();
                }
                doomed.insert(s);
            }
            (Kind::Patroller, Kind::Terrain) => {
                let block = self.entities[s].rect();
                if let Entity::Patroller(patroller) = &mut self.entities[i] {
                    patroller.collision(block);
                }
            }
            (Kind::Patroller, Kind::Projectile) => {
                if let Entity::Patroller(patroller) = &mut self.entities[i] {
                    patroller.knock();
                }
                doomed.insert(s);
            }
            _ => {}
        }
    }

    /// Apply the removal set in one pass, highest index first, keeping the
    /// player index pointed at the player.
    fn apply_removals(&mut self, doomed: &BTreeSet<usize>) {
        for &index in doomed.iter().rev() {
            debug_assert!(index != self.player, "the dispatcher never marks the player");
            self.entities.remove(index);
        }
        self.player -= doomed.iter().filter(|&&index| index < self.player).count();
    }

    /// Render handoff: one item per live entity, in iteration order, so
    /// later entities draw over earlier ones.
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.entities
            .iter()
            .map(|entity| {
                let r = entity.rect();
                RenderItem {
                    x: r.x,
                    y: r.y,
                    w: r.w,
                    h: r.h,
                    frame: entity.frame(),
                    flip: entity.flip(),
                }
            })
            .collect()
    }
}
