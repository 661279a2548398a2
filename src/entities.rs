/// All game entity types: plain data plus accessors.  Behaviour lives in
/// `compute`.

use crate::geometry::{Rect, Vector2};

// ── Sprite extents (world units) ─────────────────────────────────────────────

pub const PLAYER_SIZE: Vector2 = Vector2::new(32.0, 32.0);
pub const ENEMY_SIZE: Vector2 = Vector2::new(32.0, 32.0);
pub const BULLET_SIZE: Vector2 = Vector2::new(8.0, 16.0);

// ── Identity ─────────────────────────────────────────────────────────────────

/// Non-owning handle to an actor.  Resolve it through `World::actor` every
/// time; the actor may be gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MimicType {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}

// ── Mimic: shared movable/renderable state ───────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Mimic {
    pub id: EntityId,
    pub pos: Vector2,
    /// Position before the latest `update`.
    pub old_pos: Vector2,
    /// Direction of travel; unit length or zero.
    pub velocity: Vector2,
    /// Facing in degrees, `[0, 360)`, clockwise from +x.
    pub angle: f32,
    pub size: Vector2,
    pub max_speed: f32,
    pub active: bool,
}

impl Mimic {
    pub fn new(id: EntityId, pos: Vector2, size: Vector2, max_speed: f32) -> Self {
        Self {
            id,
            pos,
            old_pos: pos,
            velocity: Vector2::ZERO,
            angle: 0.0,
            size,
            max_speed,
            active: false,
        }
    }

    pub fn center(&self) -> Vector2 {
        self.pos + self.size * 0.5
    }

    /// Bounding box at the truncated integer position, as drawn.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            self.size.x as i32,
            self.size.y as i32,
        )
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub mimic: Mimic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub mimic: Mimic,
    pub target: Option<EntityId>,
    /// Where the target was last seen alive; the enemy walks here.
    pub last_known_target: Option<Vector2>,
    /// Seconds since the last shot.
    pub shot_cooldown: f32,
}

/// Anything in the actor list.  The player is always present and first.
#[derive(Clone, Debug, PartialEq)]
pub enum Actor {
    Player(Player),
    Enemy(Enemy),
}

impl Actor {
    pub fn mimic(&self) -> &Mimic {
        match self {
            Actor::Player(p) => &p.mimic,
            Actor::Enemy(e) => &e.mimic,
        }
    }

    pub fn mimic_mut(&mut self) -> &mut Mimic {
        match self {
            Actor::Player(p) => &mut p.mimic,
            Actor::Enemy(e) => &mut e.mimic,
        }
    }

    pub fn id(&self) -> EntityId {
        self.mimic().id
    }

    pub fn kind(&self) -> MimicType {
        match self {
            Actor::Player(_) => MimicType::Player,
            Actor::Enemy(_) => MimicType::Enemy,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub mimic: Mimic,
    pub owner: BulletOwner,
    pub destination: Vector2,
    /// Set once an enemy bullet has registered its hit on the player, so a
    /// bullet passing through is counted a single time.
    pub hit_counted: bool,
}

impl Bullet {
    pub fn kind(&self) -> MimicType {
        match self.owner {
            BulletOwner::Player => MimicType::PlayerBullet,
            BulletOwner::Enemy => MimicType::EnemyBullet,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Speeds and timings every spawned entity is built with.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub bullet_speed: f32,
    /// Seconds an enemy must wait before it fires again.
    pub shot_cooldown: f32,
}

/// The entire simulation state.  Cloneable so the pure update functions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub actors: Vec<Actor>,
    pub bullets: Vec<Bullet>,
    pub player_id: EntityId,
    /// Level rectangle; bullets leaving it are dropped.
    pub bounds: Rect,
    pub rules: Rules,
    pub next_id: u32,
    pub frame: u64,
    /// Enemies destroyed by player bullets.
    pub kills: u32,
    /// Enemy bullets that reached the player.
    pub hits_taken: u32,
}

impl World {
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player(&self) -> Option<&Player> {
        self.actors.iter().find_map(|a| match a {
            Actor::Player(p) => Some(p),
            Actor::Enemy(_) => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.actors.iter_mut().find_map(|a| match a {
            Actor::Player(p) => Some(p),
            Actor::Enemy(_) => None,
        })
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.actors.iter().filter_map(|a| match a {
            Actor::Enemy(e) => Some(e),
            Actor::Player(_) => None,
        })
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies().count()
    }
}
