/// Pure game-logic functions.
///
/// Entity behaviour is implemented here as methods on the data types from
/// `entities`.  The world-level functions take an immutable reference to the
/// current `World` (and, where needed, an RNG handle) and return a brand-new
/// `World`.  Side effects are limited to the injected RNG and log lines.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Actor, Bullet, BulletOwner, Enemy, EntityId, Mimic, MimicType, Player, Rules, World,
    BULLET_SIZE, ENEMY_SIZE, PLAYER_SIZE,
};
use crate::geometry::{Heading, Rect, Vector2};
use crate::input::Controls;

// ── Mimic ────────────────────────────────────────────────────────────────────

impl Mimic {
    /// Linear integration: `pos += velocity * dt * max_speed`.
    pub fn update(&mut self, dt: f32) {
        self.old_pos = self.pos;
        self.pos.x += self.velocity.x * dt * self.max_speed;
        self.pos.y += self.velocity.y * dt * self.max_speed;
    }

    /// Keep the whole bounding box inside `bounds`.
    pub fn clamp_to(&mut self, bounds: Rect) {
        let min_x = bounds.x as f32;
        let min_y = bounds.y as f32;
        let max_x = (bounds.right() as f32 - self.size.x).max(min_x);
        let max_y = (bounds.bottom() as f32 - self.size.y).max(min_y);
        self.pos.x = self.pos.x.clamp(min_x, max_x);
        self.pos.y = self.pos.y.clamp(min_y, max_y);
    }

    /// Turn toward a world point.  Looking at our own center keeps the
    /// current angle.
    pub fn face(&mut self, point: Vector2) {
        let offset = point - self.center();
        if offset.length_squared() > 0.0 {
            self.angle = offset.angle_degrees();
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

impl Player {
    pub fn new(id: EntityId, pos: Vector2, max_speed: f32) -> Self {
        let mut mimic = Mimic::new(id, pos, PLAYER_SIZE, max_speed);
        mimic.active = true;
        Player { mimic }
    }

    /// Velocity from the held movement keys; diagonals are normalized.
    pub fn steer(&mut self, controls: &Controls) {
        let mut dir = Vector2::ZERO;
        if controls.up {
            dir.y -= 1.0;
        }
        if controls.down {
            dir.y += 1.0;
        }
        if controls.left {
            dir.x -= 1.0;
        }
        if controls.right {
            dir.x += 1.0;
        }
        self.mimic.velocity = dir.normalize_or_zero();
    }

    pub fn update(&mut self, dt: f32, bounds: Rect) {
        self.mimic.update(dt);
        self.mimic.clamp_to(bounds);
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

impl Enemy {
    /// A fresh enemy is idle until `toggle_active` is called.
    pub fn new(id: EntityId, pos: Vector2, max_speed: f32) -> Self {
        Enemy {
            mimic: Mimic::new(id, pos, ENEMY_SIZE, max_speed),
            target: None,
            last_known_target: None,
            shot_cooldown: 0.0,
        }
    }

    pub fn set_target(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub fn toggle_active(&mut self) {
        self.mimic.active = !self.mimic.active;
    }

    pub fn is_active(&self) -> bool {
        self.mimic.active
    }

    /// Walk toward the last known target position, halting once it is
    /// within a single step.
    fn steer(&mut self, dt: f32) {
        let Some(goal) = self.last_known_target else {
            self.mimic.velocity = Vector2::ZERO;
            return;
        };
        let offset = goal - self.mimic.center();
        if offset.length() <= dt * self.mimic.max_speed {
            self.mimic.velocity = Vector2::ZERO;
        } else {
            self.mimic.velocity = offset.normalize_or_zero();
            self.mimic.angle = offset.angle_degrees();
        }
    }

    /// One frame of enemy behaviour.  `target_center` is `None` when the
    /// target is gone.  Returns `true` while the cooldown is past the
    /// threshold; the caller resets it once a bullet is actually spawned.
    pub fn update(&mut self, target_center: Option<Vector2>, dt: f32, shot_threshold: f32) -> bool {
        if !self.mimic.active {
            self.mimic.old_pos = self.mimic.pos;
            return false;
        }
        if let Some(center) = target_center {
            self.last_known_target = Some(center);
        }
        self.steer(dt);
        self.mimic.update(dt);

        self.shot_cooldown += dt;
        self.shot_cooldown > shot_threshold
    }
}

// ── Bullet ───────────────────────────────────────────────────────────────────

impl Bullet {
    pub fn new(id: EntityId, pos: Vector2, owner: BulletOwner, max_speed: f32) -> Self {
        let mut mimic = Mimic::new(id, pos, BULLET_SIZE, max_speed);
        mimic.active = true;
        Bullet {
            mimic,
            owner,
            destination: pos,
            hit_counted: false,
        }
    }

    /// Fix the flight direction: unit velocity from the current position to
    /// `destination` and the matching facing angle.  A destination equal to
    /// the position leaves the bullet motionless.
    pub fn set_destination(&mut self, destination: Vector2) {
        self.destination = destination;
        let offset = destination - self.mimic.pos;
        self.mimic.velocity = offset.normalize_or_zero();
        if offset.length_squared() > 0.0 {
            self.mimic.angle = offset.angle_degrees();
        }
    }

    /// Whether the bullet's center has left `bounds` (the level, or the
    /// visible frame when given the camera rectangle).
    pub fn out_of_bounds(&self, bounds: Rect) -> bool {
        !bounds.contains_point(self.mimic.center())
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl Rules {
    pub fn from_config(config: &GameConfig) -> Self {
        Rules {
            player_speed: config.player_speed,
            enemy_speed: config.enemy_speed,
            bullet_speed: config.bullet_speed,
            shot_cooldown: config.shot_cooldown,
        }
    }
}

/// Build the initial world: just the player, at the configured start.
pub fn init_world(config: &GameConfig, bounds: Rect) -> World {
    let rules = Rules::from_config(config);
    let player_id = EntityId(0);
    let start = Vector2::new(config.player_start[0], config.player_start[1]);
    let player = Player::new(player_id, start, rules.player_speed);

    World {
        actors: vec![Actor::Player(player)],
        bullets: Vec::new(),
        player_id,
        bounds,
        rules,
        next_id: 1,
        frame: 0,
        kills: 0,
        hits_taken: 0,
    }
}

fn alloc_id(world: &mut World) -> EntityId {
    let id = EntityId(world.next_id);
    world.next_id += 1;
    id
}

fn push_enemy(world: &mut World, pos: Vector2) -> EntityId {
    let id = alloc_id(world);
    let mut enemy = Enemy::new(id, pos, world.rules.enemy_speed);
    enemy.set_target(world.player_id);
    enemy.toggle_active();
    world.actors.push(Actor::Enemy(enemy));
    debug!(id = id.0, x = pos.x, y = pos.y, "enemy spawned");
    id
}

/// Returns `false` for a degenerate shot (target on the muzzle).
fn push_bullet(world: &mut World, origin: Vector2, target: Vector2, owner: BulletOwner) -> bool {
    if (target - origin).length_squared() == 0.0 {
        return false;
    }
    let id = alloc_id(world);
    let mut bullet = Bullet::new(id, origin, owner, world.rules.bullet_speed);
    bullet.set_destination(target);
    world.bullets.push(bullet);
    true
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn steer_player(state: &World, controls: &Controls) -> World {
    let mut world = state.clone();
    if let Some(player) = world.player_mut() {
        player.steer(controls);
    }
    world
}

/// Face the player toward a world point (mouse motion).
pub fn aim_player(state: &World, point: Vector2) -> World {
    let mut world = state.clone();
    if let Some(player) = world.player_mut() {
        player.mimic.face(point);
    }
    world
}

/// Fire a player bullet from the player's center toward a world point.
pub fn player_shoot(state: &World, target: Vector2) -> World {
    let mut world = state.clone();
    let Some(origin) = world.player().map(|p| p.mimic.center()) else {
        return world;
    };
    if let Some(player) = world.player_mut() {
        player.mimic.face(target);
    }
    push_bullet(&mut world, origin, target, BulletOwner::Player);
    world
}

/// Spawn an active enemy at a world position, hunting the player.
pub fn spawn_enemy(state: &World, pos: Vector2) -> World {
    let mut world = state.clone();
    push_enemy(&mut world, pos);
    world
}

/// Spawn an enemy at a uniformly random spot inside the level.
pub fn spawn_random_enemy(state: &World, rng: &mut impl Rng) -> World {
    let b = state.bounds;
    let x = rng.gen_range(b.x..b.x + b.w.max(1));
    let y = rng.gen_range(b.y..b.y + b.h.max(1));
    spawn_enemy(state, Vector2::new(x as f32, y as f32))
}

/// Remove every actor except the player.  Bullets in flight are kept.
pub fn clear_mimics(state: &World) -> World {
    let mut world = state.clone();
    world.actors.retain(|a| a.kind() == MimicType::Player);
    debug!("mimics cleared");
    world
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by `dt` seconds.
///
/// Order: actors update in list order (player first, so enemies aim at the
/// player's new position), enemies whose cooldown ran out fire, then every
/// bullet moves and is resolved.  A player bullet resolves against at most
/// one target: the first enemy it overlaps in actor order.  An enemy bullet
/// only logs its hit on the player and is removed when it leaves the level.
pub fn tick(state: &World, dt: f32) -> World {
    let mut world = state.clone();
    let dt = dt.max(0.0);
    world.frame += 1;

    // ── 1. Actors ────────────────────────────────────────────────────────────
    let bounds = world.bounds;
    let threshold = world.rules.shot_cooldown;
    for i in 0..world.actors.len() {
        let target_center = match &world.actors[i] {
            Actor::Enemy(e) => e
                .target
                .and_then(|id| world.actor(id))
                .map(|a| a.mimic().center()),
            Actor::Player(_) => None,
        };

        let fired = match &mut world.actors[i] {
            Actor::Player(p) => {
                p.update(dt, bounds);
                false
            }
            Actor::Enemy(e) => e.update(target_center, dt, threshold),
        };

        if let (true, Some(aim)) = (fired, target_center) {
            let origin = world.actors[i].mimic().center();
            if push_bullet(&mut world, origin, aim, BulletOwner::Enemy) {
                if let Actor::Enemy(e) = &mut world.actors[i] {
                    e.shot_cooldown = 0.0;
                }
            }
        }
    }

    // ── 2. Bullets: move, collide, cull ──────────────────────────────────────
    let mut i = 0;
    while i < world.bullets.len() {
        world.bullets[i].mimic.update(dt);
        let rect = world.bullets[i].mimic.rect();

        let consumed = match world.bullets[i].owner {
            BulletOwner::Player => {
                let hit = world.actors.iter().position(|a| {
                    a.kind() == MimicType::Enemy && rect.has_intersection(&a.mimic().rect())
                });
                match hit {
                    Some(n) => {
                        let enemy = world.actors.remove(n);
                        world.kills += 1;
                        debug!(enemy = enemy.id().0, "enemy destroyed");
                        true
                    }
                    None => false,
                }
            }
            BulletOwner::Enemy => {
                let hit = world
                    .player()
                    .map_or(false, |p| rect.has_intersection(&p.mimic.rect()));
                if hit && !world.bullets[i].hit_counted {
                    world.bullets[i].hit_counted = true;
                    world.hits_taken += 1;
                    info!(hits = world.hits_taken, "HIT");
                }
                // enemy bullets fly on through the player
                false
            }
        };

        if consumed || world.bullets[i].out_of_bounds(world.bounds) {
            world.bullets.remove(i);
        } else {
            i += 1;
        }
    }

    world
}
