/// Entity taxonomy — per-variant physics, collision response, animation.
///
/// Coordinates are pixels with a top-left origin, y increasing downward.
/// Every variant advances itself one tick in `update()`, mutating nothing
/// but itself.  Collision *response* lives here; collision *detection* and
/// dispatch are the world's job.

// ── Physics constants ─────────────────────────────────────────────────────────

/// Downward acceleration added to airborne actors each tick.
pub const GRAVITY: f32 = 2.2;

/// Screen-space line the player and power-ups land on when no terrain
/// catches them first.
pub const GROUND_Y: f32 = 500.0;

/// Right edge of the level; the player is clamped to [0, LEVEL_WIDTH - w].
pub const LEVEL_WIDTH: f32 = 2000.0;

pub const PLAYER_RUN_SPEED: f32 = 5.5;
pub const PLAYER_JUMP_VELOCITY: f32 = -21.0;
const PLAYER_FULL_HEIGHT: f32 = 50.0;
const PLAYER_HALF_HEIGHT: f32 = 25.0;
/// Ticks between player walk-cycle frames (5 frames total).
const PLAYER_FRAME_INTERVAL: u32 = 6;
const PLAYER_FRAME_COUNT: u8 = 5;

const POWER_UP_FALL_SPEED: f32 = 2.2;

pub const WALKER_SPEED: f32 = 1.5;
/// Burn countdown set by `catch_fire`; the walker is pruned when it reads 1.
pub const WALKER_BURN_TICKS: u32 = 60;

pub const PATROLLER_SPEED: f32 = 1.5;
pub const PATROLLER_STUN_TICKS: u32 = 180;
/// The patroller sheet has 11 frames: the walk cycle uses the first 8,
/// frame 10 is the stunned pose.
const PATROLLER_WALK_FRAMES: u8 = 8;
const PATROLLER_STUN_FRAME: u8 = 10;
const PATROLLER_FRAME_INTERVAL: u32 = 3;

pub const PROJECTILE_SPEED: f32 = 15.0;
const PROJECTILE_SIZE: f32 = 15.0;
const PROJECTILE_GRAVITY: f32 = 2.0;
/// Height at which a falling projectile picks up its bounce impulse.
const PROJECTILE_BOUNCE_Y: f32 = 400.0;
const PROJECTILE_BOUNCE_IMPULSE: f32 = -6.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box.  `overlaps` uses half-open interval semantics: boxes
/// that merely share an edge do not collide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }

    /// True iff the two boxes overlap with nonzero area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.w <= other.x
            || self.x >= other.x + other.w
            || self.y + self.h <= other.y
            || self.y >= other.y + other.h)
    }
}

// ── Visual frames ─────────────────────────────────────────────────────────────

/// Opaque visual-frame handle.  The simulation only produces these; the
/// renderer decides what each one looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameId {
    Terrain,
    PowerUp,
    Walker,
    WalkerBurning,
    /// Patroller sheet index 0..=10 (10 = stunned pose).
    Patroller(u8),
    /// Player walk-cycle index 0..=4.
    Player(u8),
    Projectile,
}

/// Which terrain face a walker ran into, seen during the collision phase
/// and consumed on the next physics phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Static level geometry.  No physics; updating it is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Terrain {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Terrain {
        Terrain { x, y, w, h }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vert_velocity: f32,
    pub velocity_x: f32,
    pub jumping: bool,
    pub moving: bool,
    /// Power-up toggle state: true while at half height.
    pub shrunk: bool,
    /// Ticks spent with the bottom edge above the ground line.
    pub airborne_ticks: u32,
    pub frame_counter: u32,
    pub frame_num: u8,
}

impl Player {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Player {
        Player {
            x,
            y,
            w,
            h,
            vert_velocity: 0.0,
            velocity_x: 0.0,
            jumping: false,
            moving: false,
            shrunk: false,
            airborne_ticks: 0,
            frame_counter: 0,
            frame_num: 0,
        }
    }

    pub fn move_right(&mut self) {
        self.velocity_x = PLAYER_RUN_SPEED;
        self.moving = true;
    }

    pub fn move_left(&mut self) {
        self.velocity_x = -PLAYER_RUN_SPEED;
        self.moving = true;
    }

    /// Halt horizontal motion and rewind the walk cycle.
    pub fn stop(&mut self) {
        self.velocity_x = 0.0;
        self.moving = false;
        self.frame_num = 0;
    }

    /// Start a jump.  Only acts when the jump flag is clear; the flag
    /// itself clears when the bottom edge returns to the ground line.
    pub fn jump(&mut self) {
        if !self.jumping {
            self.vert_velocity = PLAYER_JUMP_VELOCITY;
        }
        self.jumping = true;
    }

    /// Power-up pickup.  A strict toggle: the first pickup halves the
    /// height, the next restores it, preserving the bottom edge each way.
    pub fn eat_power_up(&mut self) {
        if !self.shrunk {
            self.y = self.y + self.h - PLAYER_HALF_HEIGHT;
            self.h = PLAYER_HALF_HEIGHT;
            self.shrunk = true;
        } else {
            self.y = self.y + self.h - PLAYER_FULL_HEIGHT;
            self.h = PLAYER_FULL_HEIGHT;
            self.shrunk = false;
        }
    }

    pub fn update(&mut self) {
        self.vert_velocity += GRAVITY;
        self.y += self.vert_velocity;
        self.x += self.velocity_x;
        self.x = self.x.clamp(0.0, LEVEL_WIDTH - self.w);

        if self.y + self.h < GROUND_Y {
            self.airborne_ticks += 1;
        } else {
            self.airborne_ticks = 0;
        }

        if self.moving {
            self.frame_counter += 1;
            if self.frame_counter >= PLAYER_FRAME_INTERVAL {
                self.frame_num = (self.frame_num + 1) % PLAYER_FRAME_COUNT;
                self.frame_counter = 0;
            }
        } else {
            self.frame_num = 0;
        }

        if self.y + self.h >= GROUND_Y {
            self.y = GROUND_Y - self.h;
            self.vert_velocity = 0.0;
            self.jumping = false;
            self.airborne_ticks = 0;
        }
    }

    /// Resolve an overlap with a terrain block.  Checks run top, bottom,
    /// right face, left face; the first match wins.
    pub fn collision(&mut self, block: Rect) {
        if self.y + self.h >= block.y && self.vert_velocity > 0.0 {
            // Landed on top of the block
            self.y = block.y - self.h;
            self.vert_velocity = 0.0;
            self.jumping = false;
        } else if self.y <= block.y + block.h && self.y > block.y && self.vert_velocity < 0.0 {
            // Head bump from below
            self.y = block.y + block.h;
            self.vert_velocity = 0.0;
        } else if self.x <= block.x + block.w && self.x + self.w > block.x + block.w {
            // Flush against the block's right face
            self.stop();
            self.x = block.x + block.w;
        } else if self.x + self.w >= block.x && self.x < block.x {
            // Flush against the block's left face
            self.stop();
            self.x = block.x - self.w;
        }
    }

    pub fn frame(&self) -> FrameId {
        FrameId::Player(self.frame_num)
    }
}

// ── Power-up ──────────────────────────────────────────────────────────────────

/// Collectible that drifts down at a fixed rate and goes inert once it
/// lands on terrain or reaches the ground line.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vert_velocity: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> PowerUp {
        PowerUp {
            x,
            y,
            w,
            h,
            vert_velocity: POWER_UP_FALL_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.y += self.vert_velocity;
        if self.y > GROUND_Y {
            self.y = GROUND_Y;
            self.vert_velocity = 0.0;
        }
    }

    /// Come to rest on top of a terrain block.
    pub fn collision(&mut self, block: Rect) {
        if self.y + self.h >= block.y {
            self.y = block.y - self.h;
            self.vert_velocity = 0.0;
        }
    }
}

// ── Walker ────────────────────────────────────────────────────────────────────

/// Ground enemy that marches in one direction, turning where it runs into
/// terrain.  A projectile hit sets it on fire; it burns for a fixed count
/// of ticks and is pruned one tick before the countdown would expire.
#[derive(Clone, Debug, PartialEq)]
pub struct Walker {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vert_velocity: f32,
    pub velocity_x: f32,
    pub on_fire: bool,
    pub fire_counter: u32,
    /// Latched on the first top collision with terrain; cancels gravity
    /// from then on.
    pub grounded: bool,
    /// Side contact seen this tick; the turn happens on the next update.
    pub side_contact: Option<Side>,
}

impl Walker {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Walker {
        Walker {
            x,
            y,
            w,
            h,
            vert_velocity: 0.0,
            velocity_x: WALKER_SPEED,
            on_fire: false,
            fire_counter: 0,
            grounded: false,
            side_contact: None,
        }
    }

    pub fn update(&mut self) {
        self.vert_velocity += GRAVITY;
        self.y += self.vert_velocity;
        if self.grounded {
            self.vert_velocity = 0.0;
            self.x += self.velocity_x;
        }
        if let Some(side) = self.side_contact.take() {
            self.velocity_x = match side {
                Side::Left => -self.velocity_x.abs(),
                Side::Right => self.velocity_x.abs(),
            };
            self.x += self.velocity_x;
            self.vert_velocity = 0.0;
        }
        if self.fire_counter > 0 {
            self.fire_counter -= 1;
        }
    }

    /// Resolve an overlap with a terrain block.  A top contact snaps the
    /// walker onto the surface; a side contact only records the face for
    /// the next tick's turn.
    pub fn collision(&mut self, block: Rect) {
        let on_top = self.y + self.h >= block.y && self.y < block.y;
        let left_face = self.x + self.w >= block.x && self.x < block.x;
        let right_face = self.x <= block.x + block.w && self.x + self.w > block.x + block.w;

        if on_top {
            self.y = block.y - self.h;
            self.vert_velocity = 0.0;
            self.grounded = true;
        } else if self.y + self.h > block.y && self.y < block.y + block.h {
            if left_face {
                self.side_contact = Some(Side::Left);
            } else if right_face {
                self.side_contact = Some(Side::Right);
            }
        }
    }

    /// Ignite.  No effect while already burning: the countdown is not
    /// refreshed.
    pub fn catch_fire(&mut self) {
        if !self.on_fire {
            self.on_fire = true;
            self.fire_counter = WALKER_BURN_TICKS;
            self.velocity_x = 0.0;
        }
    }

    /// Death predicate for the prune phase.
    pub fn burned_out(&self) -> bool {
        self.fire_counter == 1
    }

    pub fn frame(&self) -> FrameId {
        if self.on_fire {
            FrameId::WalkerBurning
        } else {
            FrameId::Walker
        }
    }
}

// ── Patroller ─────────────────────────────────────────────────────────────────

/// Ground enemy that patrols between walls, reversing (and mirroring its
/// sprite) on contact.  A hit stuns it in place for a fixed count of
/// ticks, after which it resumes in the direction its facing flag implies.
#[derive(Clone, Debug, PartialEq)]
pub struct Patroller {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vert_velocity: f32,
    pub velocity_x: f32,
    pub grounded: bool,
    /// Side contact seen this tick; the reversal happens on the next update.
    pub side_contact: bool,
    pub stunned: bool,
    pub stun_counter: u32,
    /// Facing flag: false = the spawn direction (leftward), true = mirrored.
    pub flip: bool,
    pub frame_counter: u32,
    pub frame_num: u8,
}

impl Patroller {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Patroller {
        Patroller {
            x,
            y,
            w,
            h,
            vert_velocity: 0.0,
            velocity_x: -PATROLLER_SPEED,
            grounded: false,
            side_contact: false,
            stunned: false,
            stun_counter: 0,
            flip: false,
            frame_counter: 0,
            frame_num: 0,
        }
    }

    /// Stun.  No effect while already stunned: the countdown is not reset.
    pub fn knock(&mut self) {
        if !self.stunned {
            self.stunned = true;
            self.stun_counter = PATROLLER_STUN_TICKS;
        }
    }

    pub fn update(&mut self) {
        self.vert_velocity += GRAVITY;
        self.y += self.vert_velocity;
        if self.grounded {
            self.vert_velocity = 0.0;
            self.x += self.velocity_x;
        }
        if self.side_contact {
            self.velocity_x = -self.velocity_x;
            self.x += self.velocity_x;
            self.vert_velocity = 0.0;
            self.side_contact = false;
            self.flip = !self.flip;
        }
        if self.stunned {
            self.stun_counter -= 1;
            self.velocity_x = 0.0;
            if self.stun_counter == 0 {
                self.stunned = false;
                self.frame_num = 0;
                self.velocity_x = if self.flip {
                    PATROLLER_SPEED
                } else {
                    -PATROLLER_SPEED
                };
                self.x += self.velocity_x;
            }
        }
        self.frame_counter += 1;
        if !self.stunned && self.frame_counter % PATROLLER_FRAME_INTERVAL == 0 {
            self.frame_num += 1;
            if self.frame_num >= PATROLLER_WALK_FRAMES {
                self.frame_num = 0;
            }
        }
    }

    /// Resolve an overlap with a terrain block.  Unlike the walker, a side
    /// contact also snaps the patroller flush against the face it hit.
    pub fn collision(&mut self, block: Rect) {
        let on_top = self.y + self.h >= block.y && self.y < block.y;
        let left_face = self.x + self.w >= block.x && self.x < block.x;
        let right_face = self.x <= block.x + block.w && self.x + self.w > block.x + block.w;

        if on_top {
            self.y = block.y - self.h;
            self.vert_velocity = 0.0;
            self.grounded = true;
        } else if self.y + self.h > block.y && self.y < block.y + block.h {
            if left_face {
                self.x = block.x - self.w;
                self.side_contact = true;
            } else if right_face {
                self.x = block.x + block.w;
                self.side_contact = true;
            }
        }
    }

    pub fn frame(&self) -> FrameId {
        if self.stunned {
            FrameId::Patroller(PATROLLER_STUN_FRAME)
        } else {
            FrameId::Patroller(self.frame_num)
        }
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

/// Player-fired shot: constant horizontal velocity plus a crude bounce off
/// an implicit ground height.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vert_velocity: f32,
    pub velocity_x: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32) -> Projectile {
        Projectile {
            x,
            y,
            w: PROJECTILE_SIZE,
            h: PROJECTILE_SIZE,
            vert_velocity: 2.2,
            velocity_x: PROJECTILE_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.x += self.velocity_x;
        self.y += self.vert_velocity;
        if self.y + self.h >= PROJECTILE_BOUNCE_Y {
            self.vert_velocity += PROJECTILE_BOUNCE_IMPULSE;
        }
        self.vert_velocity += PROJECTILE_GRAVITY;
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// Variant tag, consulted only by the world's collision dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Terrain,
    Player,
    PowerUp,
    Walker,
    Patroller,
    Projectile,
}

/// The closed set of things that can live in a world.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Terrain(Terrain),
    Player(Player),
    PowerUp(PowerUp),
    Walker(Walker),
    Patroller(Patroller),
    Projectile(Projectile),
}

impl Entity {
    pub fn kind(&self) -> Kind {
        match self {
            Entity::Terrain(_) => Kind::Terrain,
            Entity::Player(_) => Kind::Player,
            Entity::PowerUp(_) => Kind::PowerUp,
            Entity::Walker(_) => Kind::Walker,
            Entity::Patroller(_) => Kind::Patroller,
            Entity::Projectile(_) => Kind::Projectile,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Entity::Terrain(t) => Rect::new(t.x, t.y, t.w, t.h),
            Entity::Player(p) => Rect::new(p.x, p.y, p.w, p.h),
            Entity::PowerUp(p) => Rect::new(p.x, p.y, p.w, p.h),
            Entity::Walker(w) => Rect::new(w.x, w.y, w.w, w.h),
            Entity::Patroller(p) => Rect::new(p.x, p.y, p.w, p.h),
            Entity::Projectile(p) => Rect::new(p.x, p.y, p.w, p.h),
        }
    }

    /// Advance one tick of variant-specific physics and animation.
    pub fn update(&mut self) {
        match self {
            Entity::Terrain(_) => {}
            Entity::Player(p) => p.update(),
            Entity::PowerUp(p) => p.update(),
            Entity::Walker(w) => w.update(),
            Entity::Patroller(p) => p.update(),
            Entity::Projectile(p) => p.update(),
        }
    }

    /// True iff the two bounding boxes overlap with nonzero area.
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.rect().overlaps(&other.rect())
    }

    pub fn frame(&self) -> FrameId {
        match self {
            Entity::Terrain(_) => FrameId::Terrain,
            Entity::Player(p) => p.frame(),
            Entity::PowerUp(_) => FrameId::PowerUp,
            Entity::Walker(w) => w.frame(),
            Entity::Patroller(p) => p.frame(),
            Entity::Projectile(_) => FrameId::Projectile,
        }
    }

    /// Mirror the sprite horizontally when drawing.
    pub fn flip(&self) -> bool {
        match self {
            Entity::Patroller(p) => p.flip,
            _ => false,
        }
    }
}
