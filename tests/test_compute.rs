use topdown_shooter::compute::*;
use topdown_shooter::config::GameConfig;
use topdown_shooter::entities::*;
use topdown_shooter::geometry::{Rect, Vector2};
use topdown_shooter::input::Controls;

use rand::rngs::StdRng;
use rand::SeedableRng;

const LEVEL: Rect = Rect::new(0, 0, 1536, 1024);

fn make_world() -> World {
    init_world(&GameConfig::default(), LEVEL)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn bullet_at(id: u32, pos: Vector2, toward: Vector2, owner: BulletOwner) -> Bullet {
    let mut b = Bullet::new(EntityId(id), pos, owner, 600.0);
    b.set_destination(toward);
    b
}

fn player_center(world: &World) -> Vector2 {
    world.player().unwrap().mimic.center()
}

// ── init_world ───────────────────────────────────────────────────────────────

#[test]
fn init_world_player_position() {
    let w = make_world();
    let p = w.player().unwrap();
    assert_eq!(p.mimic.pos, Vector2::new(550.0, 250.0));
    assert_eq!(p.mimic.old_pos, Vector2::new(550.0, 250.0));
    assert_eq!(p.mimic.id, w.player_id);
    assert!(p.mimic.active);
}

#[test]
fn init_world_empty_collections() {
    let w = make_world();
    assert_eq!(w.actors.len(), 1);
    assert!(w.bullets.is_empty());
    assert_eq!(w.kills, 0);
    assert_eq!(w.hits_taken, 0);
    assert_eq!(w.frame, 0);
    assert_eq!(w.bounds, LEVEL);
}

// ── Mimic::update ────────────────────────────────────────────────────────────

#[test]
fn mimic_update_is_pure_translation() {
    let mut m = Mimic::new(EntityId(7), Vector2::new(10.0, 20.0), ENEMY_SIZE, 100.0);
    m.velocity = Vector2::new(1.0, 0.0);
    m.update(0.5);
    assert_eq!(m.pos, Vector2::new(60.0, 20.0));
    assert_eq!(m.old_pos, Vector2::new(10.0, 20.0));
}

#[test]
fn mimic_update_zero_dt_keeps_position_and_records_old() {
    let mut m = Mimic::new(EntityId(7), Vector2::new(10.0, 20.0), ENEMY_SIZE, 100.0);
    m.velocity = Vector2::new(0.0, 1.0);
    m.update(0.25);
    m.update(0.0);
    assert_eq!(m.pos, Vector2::new(10.0, 45.0));
    assert_eq!(m.old_pos, m.pos);
}

#[test]
fn mimic_rect_truncates_position() {
    let m = Mimic::new(EntityId(1), Vector2::new(10.9, 20.2), BULLET_SIZE, 1.0);
    assert_eq!(m.rect(), Rect::new(10, 20, 8, 16));
}

// ── Bullet ───────────────────────────────────────────────────────────────────

#[test]
fn set_destination_unit_velocity_and_angle() {
    let b = bullet_at(1, Vector2::ZERO, Vector2::new(3.0, 4.0), BulletOwner::Player);
    assert!(approx(b.mimic.velocity.x, 0.6));
    assert!(approx(b.mimic.velocity.y, 0.8));
    assert!(approx(b.mimic.angle, 53.130));
    assert_eq!(b.destination, Vector2::new(3.0, 4.0));
}

#[test]
fn set_destination_angles_wrap_into_range() {
    let left = bullet_at(1, Vector2::ZERO, Vector2::new(-5.0, 0.0), BulletOwner::Player);
    assert!(approx(left.mimic.angle, 180.0));

    // Screen y grows downward, so "up" is 270 degrees clockwise from +x.
    let up = bullet_at(2, Vector2::ZERO, Vector2::new(0.0, -5.0), BulletOwner::Player);
    assert!(approx(up.mimic.angle, 270.0));

    let right = bullet_at(3, Vector2::ZERO, Vector2::new(5.0, 0.0), BulletOwner::Player);
    assert!(approx(right.mimic.angle, 0.0));
}

#[test]
fn set_destination_on_own_position_stays_still() {
    let b = bullet_at(1, Vector2::new(4.0, 4.0), Vector2::new(4.0, 4.0), BulletOwner::Enemy);
    assert_eq!(b.mimic.velocity, Vector2::ZERO);
}

#[test]
fn bullet_kind_follows_owner() {
    let p = bullet_at(1, Vector2::ZERO, Vector2::new(1.0, 0.0), BulletOwner::Player);
    let e = bullet_at(2, Vector2::ZERO, Vector2::new(1.0, 0.0), BulletOwner::Enemy);
    assert_eq!(p.kind(), MimicType::PlayerBullet);
    assert_eq!(e.kind(), MimicType::EnemyBullet);
}

#[test]
fn out_of_bounds_uses_center() {
    let bounds = Rect::new(0, 0, 100, 100);
    // center = pos + (4, 8)
    let inside = bullet_at(1, Vector2::new(-3.0, 50.0), Vector2::ZERO, BulletOwner::Player);
    let outside = bullet_at(2, Vector2::new(-5.0, 50.0), Vector2::ZERO, BulletOwner::Player);
    let below = bullet_at(3, Vector2::new(50.0, 93.0), Vector2::ZERO, BulletOwner::Player);
    assert!(!inside.out_of_bounds(bounds));
    assert!(outside.out_of_bounds(bounds));
    assert!(below.out_of_bounds(bounds));
}

// ── player input ─────────────────────────────────────────────────────────────

#[test]
fn steer_diagonal_is_normalized() {
    let w = make_world();
    let controls = Controls { up: true, right: true, ..Controls::default() };
    let w2 = steer_player(&w, &controls);
    let v = w2.player().unwrap().mimic.velocity;
    assert!(approx(v.length(), 1.0));
    assert!(v.x > 0.0 && v.y < 0.0);
}

#[test]
fn steer_opposite_keys_cancel() {
    let w = make_world();
    let controls = Controls { left: true, right: true, ..Controls::default() };
    let w2 = steer_player(&w, &controls);
    assert_eq!(w2.player().unwrap().mimic.velocity, Vector2::ZERO);
}

#[test]
fn player_is_clamped_to_level() {
    let w = steer_player(&make_world(), &Controls { left: true, up: true, ..Controls::default() });
    let w2 = tick(&w, 10.0);
    assert_eq!(w2.player().unwrap().mimic.pos, Vector2::ZERO);

    let w3 = steer_player(&w2, &Controls { right: true, down: true, ..Controls::default() });
    let w4 = tick(&w3, 100.0);
    assert_eq!(w4.player().unwrap().mimic.pos, Vector2::new(1504.0, 992.0));
}

#[test]
fn aim_player_faces_point() {
    let w = make_world();
    let c = player_center(&w);
    let w2 = aim_player(&w, c + Vector2::new(0.0, 50.0));
    assert!(approx(w2.player().unwrap().mimic.angle, 90.0));
}

#[test]
fn player_shoot_spawns_bullet_at_center() {
    let w = make_world();
    let c = player_center(&w);
    let w2 = player_shoot(&w, c + Vector2::new(100.0, 0.0));
    assert_eq!(w2.bullets.len(), 1);
    let b = &w2.bullets[0];
    assert_eq!(b.mimic.pos, c);
    assert_eq!(b.owner, BulletOwner::Player);
    assert!(approx(b.mimic.velocity.x, 1.0));
    assert_eq!(b.mimic.max_speed, w.rules.bullet_speed);
}

#[test]
fn player_shoot_at_own_center_is_ignored() {
    let w = make_world();
    let c = player_center(&w);
    let w2 = player_shoot(&w, c);
    assert!(w2.bullets.is_empty());
}

#[test]
fn shooting_does_not_mutate_original() {
    let w = make_world();
    let _w2 = player_shoot(&w, Vector2::new(0.0, 0.0));
    let _w3 = spawn_enemy(&w, Vector2::new(0.0, 0.0));
    assert!(w.bullets.is_empty());
    assert_eq!(w.actors.len(), 1);
}

// ── spawning & clearing ──────────────────────────────────────────────────────

#[test]
fn spawn_enemy_is_active_and_targets_player() {
    let w = spawn_enemy(&make_world(), Vector2::new(10.0, 20.0));
    let e = w.enemies().next().unwrap();
    assert!(e.is_active());
    assert_eq!(e.target, Some(w.player_id));
    assert_eq!(e.shot_cooldown, 0.0);
    assert_eq!(e.mimic.pos, Vector2::new(10.0, 20.0));
    assert_ne!(e.mimic.id, w.player_id);
}

#[test]
fn spawned_ids_are_unique() {
    let w = spawn_enemy(&make_world(), Vector2::new(10.0, 20.0));
    let w = spawn_enemy(&w, Vector2::new(10.0, 20.0));
    let ids: Vec<_> = w.actors.iter().map(|a| a.id()).collect();
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[1], ids[2]);
}

#[test]
fn spawn_random_enemy_lands_inside_level() {
    let mut rng = seeded_rng();
    let mut w = make_world();
    for _ in 0..50 {
        w = spawn_random_enemy(&w, &mut rng);
    }
    assert_eq!(w.enemy_count(), 50);
    for e in w.enemies() {
        assert!(LEVEL.contains_point(e.mimic.pos));
    }
}

#[test]
fn clear_mimics_keeps_player_and_bullets() {
    let w = spawn_enemy(&make_world(), Vector2::new(10.0, 20.0));
    let w = spawn_enemy(&w, Vector2::new(40.0, 20.0));
    let w = player_shoot(&w, Vector2::new(0.0, 0.0));
    let w2 = clear_mimics(&w);
    assert_eq!(w2.actors.len(), 1);
    assert_eq!(w2.actors[0].kind(), MimicType::Player);
    assert_eq!(w2.bullets.len(), 1);
}

// ── Enemy behaviour ──────────────────────────────────────────────────────────

#[test]
fn idle_enemy_does_nothing() {
    let mut e = Enemy::new(EntityId(3), Vector2::ZERO, 100.0);
    let fired = e.update(Some(Vector2::new(500.0, 0.0)), 5.0, 3.0);
    assert!(!fired);
    assert_eq!(e.shot_cooldown, 0.0);
    assert_eq!(e.mimic.pos, Vector2::ZERO);
}

#[test]
fn toggle_active_flips_state() {
    let mut e = Enemy::new(EntityId(3), Vector2::ZERO, 100.0);
    assert!(!e.is_active());
    e.toggle_active();
    assert!(e.is_active());
    e.toggle_active();
    assert!(!e.is_active());
}

#[test]
fn enemy_walks_to_last_known_target() {
    let mut e = Enemy::new(EntityId(3), Vector2::ZERO, 100.0);
    e.toggle_active();

    // center (16,16), target straight to the right
    e.update(Some(Vector2::new(116.0, 16.0)), 0.1, 3.0);
    assert!(approx(e.mimic.pos.x, 10.0));
    assert!(approx(e.mimic.pos.y, 0.0));

    // target gone: keep heading to where it was last seen
    e.update(None, 0.1, 3.0);
    assert!(approx(e.mimic.pos.x, 20.0));
    assert_eq!(e.last_known_target, Some(Vector2::new(116.0, 16.0)));
}

#[test]
fn enemy_stops_within_one_step_of_goal() {
    let mut e = Enemy::new(EntityId(3), Vector2::ZERO, 100.0);
    e.toggle_active();
    e.update(Some(Vector2::new(21.0, 16.0)), 0.1, 3.0);
    assert_eq!(e.mimic.velocity, Vector2::ZERO);
    assert_eq!(e.mimic.pos, Vector2::ZERO);
}

#[test]
fn enemy_cooldown_grows_then_resets_on_shot() {
    let mut w = make_world();
    w.rules.enemy_speed = 0.0;
    let mut w = spawn_enemy(&w, Vector2::new(100.0, 100.0));

    let mut last = 0.0;
    for _ in 0..6 {
        w = tick(&w, 0.5);
        let cd = w.enemies().next().unwrap().shot_cooldown;
        assert!(cd > last);
        last = cd;
    }
    assert_eq!(last, 3.0);
    assert!(w.bullets.is_empty());

    w = tick(&w, 0.5);
    assert_eq!(w.enemies().next().unwrap().shot_cooldown, 0.0);
    assert_eq!(w.bullets.len(), 1);
}

#[test]
fn enemy_bullet_aimed_at_player_center() {
    // Player at (550,250); enemy fires after more than 3 time units.
    let mut w = make_world();
    w.rules.enemy_speed = 0.0;
    let mut w = spawn_enemy(&w, Vector2::new(100.0, 100.0));
    for _ in 0..3 {
        w = tick(&w, 1.0);
    }
    assert!(w.bullets.is_empty());

    // a short last step keeps the new bullet well short of the player
    w = tick(&w, 0.1);
    assert_eq!(w.bullets.len(), 1);
    let b = &w.bullets[0];
    assert_eq!(b.owner, BulletOwner::Enemy);
    assert_eq!(b.destination, player_center(&w));
    let expected = (player_center(&w) - Vector2::new(116.0, 116.0)).normalize_or_zero();
    assert!(approx(b.mimic.velocity.x, expected.x));
    assert!(approx(b.mimic.velocity.y, expected.y));
}

#[test]
fn enemy_without_live_target_holds_fire() {
    let mut w = make_world();
    w.rules.enemy_speed = 0.0;
    let mut w = spawn_enemy(&w, Vector2::new(100.0, 100.0));
    if let Some(Actor::Enemy(e)) = w.actors.last_mut() {
        e.target = Some(EntityId(999));
    }
    for _ in 0..4 {
        w = tick(&w, 1.0);
    }
    assert!(w.bullets.is_empty());
    // no bullet left the barrel, so the cooldown keeps running
    assert_eq!(w.enemies().next().unwrap().shot_cooldown, 4.0);
}

#[test]
fn degenerate_enemy_shot_keeps_cooldown() {
    // enemy stacked exactly on the player: centers coincide, nothing to aim at
    let mut w = make_world();
    w.rules.enemy_speed = 0.0;
    let mut w = spawn_enemy(&w, Vector2::new(550.0, 250.0));
    for _ in 0..4 {
        w = tick(&w, 1.0);
    }
    assert!(w.bullets.is_empty());
    assert_eq!(w.enemies().next().unwrap().shot_cooldown, 4.0);
}

// ── tick: collisions & culling ───────────────────────────────────────────────

#[test]
fn bullet_leaving_level_is_removed_same_frame() {
    let mut w = make_world();
    w.bullets.push(bullet_at(50, Vector2::new(1520.0, 500.0), Vector2::new(2000.0, 500.0), BulletOwner::Player));
    let w2 = tick(&w, 0.1);
    assert!(w2.bullets.is_empty());
}

#[test]
fn bullet_in_flight_survives() {
    let mut w = make_world();
    w.bullets.push(bullet_at(50, Vector2::new(100.0, 900.0), Vector2::new(200.0, 900.0), BulletOwner::Player));
    let w2 = tick(&w, 0.01);
    assert_eq!(w2.bullets.len(), 1);
    assert!(approx(w2.bullets[0].mimic.pos.x, 106.0));
}

#[test]
fn player_bullet_removes_exactly_one_bullet_and_one_enemy() {
    let w = spawn_enemy(&make_world(), Vector2::new(700.0, 250.0));
    let mut w = spawn_enemy(&w, Vector2::new(1200.0, 900.0));
    w.bullets.push(bullet_at(50, Vector2::new(690.0, 260.0), Vector2::new(800.0, 260.0), BulletOwner::Player));
    w.bullets.push(bullet_at(51, Vector2::new(100.0, 900.0), Vector2::new(200.0, 900.0), BulletOwner::Player));

    let w2 = tick(&w, 0.02);
    assert_eq!(w2.enemy_count(), 1);
    assert_eq!(w2.bullets.len(), 1);
    assert_eq!(w2.bullets[0].mimic.id, EntityId(51));
    assert_eq!(w2.kills, 1);
}

#[test]
fn bullet_hits_at_most_one_enemy_per_frame() {
    let mut w = make_world();
    w.rules.enemy_speed = 0.0;
    let w = spawn_enemy(&w, Vector2::new(700.0, 250.0));
    let mut w = spawn_enemy(&w, Vector2::new(700.0, 250.0));
    let second = w.actors[2].id();
    w.bullets.push(bullet_at(50, Vector2::new(710.0, 260.0), Vector2::new(800.0, 260.0), BulletOwner::Player));

    let w2 = tick(&w, 0.0);
    assert_eq!(w2.enemy_count(), 1);
    assert_eq!(w2.enemies().next().unwrap().mimic.id, second);
    assert!(w2.bullets.is_empty());
}

#[test]
fn player_bullet_ignores_player() {
    let mut w = make_world();
    let c = player_center(&w);
    w.bullets.push(bullet_at(50, c, c + Vector2::new(1.0, 0.0), BulletOwner::Player));
    let w2 = tick(&w, 0.0);
    assert_eq!(w2.bullets.len(), 1);
    assert_eq!(w2.actors.len(), 1);
}

#[test]
fn enemy_bullet_hit_is_logged_and_bullet_survives() {
    let mut w = make_world();
    w.bullets.push(bullet_at(50, Vector2::new(560.0, 260.0), Vector2::new(600.0, 260.0), BulletOwner::Enemy));
    let w2 = tick(&w, 0.0);
    assert_eq!(w2.hits_taken, 1);
    assert_eq!(w2.bullets.len(), 1);
    assert!(w2.bullets[0].hit_counted);
    assert!(w2.player().is_some());
}

#[test]
fn enemy_bullet_counts_one_hit_while_overlapping() {
    let mut w = make_world();
    w.bullets.push(bullet_at(50, Vector2::new(560.0, 260.0), Vector2::new(600.0, 260.0), BulletOwner::Enemy));
    for _ in 0..3 {
        w = tick(&w, 0.0);
    }
    assert_eq!(w.hits_taken, 1);
    assert_eq!(w.bullets.len(), 1);
}

#[test]
fn enemy_bullet_ignores_enemies() {
    let mut w = make_world();
    w.rules.enemy_speed = 0.0;
    let mut w = spawn_enemy(&w, Vector2::new(100.0, 100.0));
    w.bullets.push(bullet_at(50, Vector2::new(110.0, 110.0), Vector2::new(200.0, 110.0), BulletOwner::Enemy));
    let w2 = tick(&w, 0.0);
    assert_eq!(w2.enemy_count(), 1);
    assert_eq!(w2.bullets.len(), 1);
}

#[test]
fn tick_advances_frame_and_keeps_original() {
    let w = spawn_enemy(&make_world(), Vector2::new(100.0, 100.0));
    let w2 = tick(&w, 0.5);
    assert_eq!(w2.frame, 1);
    assert_eq!(w.frame, 0);
    assert_eq!(w.enemies().next().unwrap().shot_cooldown, 0.0);
}

#[test]
fn negative_dt_is_treated_as_zero() {
    let w = steer_player(&make_world(), &Controls { right: true, ..Controls::default() });
    let w2 = tick(&w, -1.0);
    assert_eq!(w2.player().unwrap().mimic.pos, Vector2::new(550.0, 250.0));
}
