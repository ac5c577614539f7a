use space_war::controls::{Controls, Key, KeySet};
use space_war::entities::*;
use space_war::geometry::FIELD_HEIGHT;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_player() -> Player {
    // rect.x = 205, rect.y = 610
    Player::new(230.0, Tint::Green, Controls::PLAYER_ONE)
}

fn keys(down: &[Key]) -> KeySet {
    down.iter().copied().collect()
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_moves_by_velocity_each_update() {
    let mut b = Bullet::new(50.0, 300.0, -9.0, Tint::Green);
    b.update();
    b.update();
    assert_eq!(b.rect.y, 282.0);
}

#[test]
fn bullet_off_screen_iff_no_vertical_overlap_with_field() {
    let at = |y: f32| Bullet::new(0.0, y, 0.0, Tint::Yellow);
    assert!(at(-12.0).off_screen());
    assert!(!at(-11.5).off_screen());
    assert!(!at(0.0).off_screen());
    assert!(!at(FIELD_HEIGHT - 0.5).off_screen());
    assert!(at(FIELD_HEIGHT).off_screen());
    assert!(at(FIELD_HEIGHT + 40.0).off_screen());
}

// ── Player: construction & movement ───────────────────────────────────────────

#[test]
fn new_player_defaults() {
    let p = make_player();
    assert_eq!(p.rect.x, 205.0);
    assert_eq!(p.rect.y, 610.0);
    assert_eq!(p.health, 100);
    assert_eq!(p.max_health, 100);
    assert_eq!(p.lives, 3);
    assert!(p.is_alive());
}

#[test]
fn handle_input_moves_by_speed() {
    let mut p = make_player();
    p.handle_input(&keys(&[Key::Right]));
    assert_eq!(p.rect.x, 211.0);
    p.handle_input(&keys(&[Key::Left]));
    p.handle_input(&keys(&[Key::Left]));
    assert_eq!(p.rect.x, 199.0);
}

#[test]
fn handle_input_opposite_keys_cancel() {
    let mut p = make_player();
    p.handle_input(&keys(&[Key::Left, Key::Right]));
    assert_eq!(p.rect.x, 205.0);
}

#[test]
fn handle_input_ignores_other_players_keys() {
    let mut p = make_player();
    p.handle_input(&keys(&[Key::A, Key::W]));
    assert_eq!(p.rect.x, 205.0);
}

#[test]
fn handle_input_clamps_to_inset() {
    let mut p = make_player();
    p.rect.x = 12.0;
    p.handle_input(&keys(&[Key::Left]));
    assert_eq!(p.rect.x, 10.0);

    p.rect.x = 538.0;
    p.handle_input(&keys(&[Key::Right]));
    assert_eq!(p.rect.x, 540.0);
}

#[test]
fn inert_player_does_not_move() {
    let mut p = make_player();
    p.lives = 0;
    p.handle_input(&keys(&[Key::Right]));
    assert_eq!(p.rect.x, 205.0);
}

// ── Player: shooting ──────────────────────────────────────────────────────────

#[test]
fn shot_spawns_centred_upward_bullet() {
    let mut p = make_player();
    let mut bullets = Vec::new();
    let mut events = Vec::new();
    assert!(p.try_shoot(1000.0, &mut bullets, &mut events));
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].rect.x, 227.0);
    assert_eq!(bullets[0].rect.y, 598.0);
    assert_eq!(bullets[0].velocity, PLAYER_BULLET_SPEED);
    assert_eq!(bullets[0].tint, Tint::Green);
    assert_eq!(events, vec![GameEvent::Sound(SoundCue::Shoot)]);
}

#[test]
fn first_shot_is_not_gated_by_cooldown() {
    let mut p = make_player();
    assert!(p.try_shoot(0.0, &mut Vec::new(), &mut Vec::new()));
}

#[test]
fn cooldown_blocks_rapid_fire() {
    let mut p = make_player();
    let mut bullets = Vec::new();
    let mut events = Vec::new();
    assert!(p.try_shoot(1000.0, &mut bullets, &mut events));
    assert!(!p.try_shoot(1100.0, &mut bullets, &mut events));
    assert!(!p.try_shoot(1249.0, &mut bullets, &mut events));
    assert!(p.try_shoot(1250.0, &mut bullets, &mut events));
    assert_eq!(bullets.len(), 2);
    assert_eq!(events.len(), 2);
}

#[test]
fn inert_player_cannot_shoot() {
    let mut p = make_player();
    p.lives = 0;
    let mut bullets = Vec::new();
    let mut events = Vec::new();
    assert!(!p.try_shoot(1000.0, &mut bullets, &mut events));
    assert!(bullets.is_empty());
    assert!(events.is_empty());
}

// ── Player: damage ────────────────────────────────────────────────────────────

#[test]
fn damage_reduces_health() {
    let mut p = make_player();
    p.take_damage(25);
    assert_eq!(p.health, 75);
    assert_eq!(p.lives, 3);
}

#[test]
fn lethal_damage_with_lives_left_respawns() {
    // 0 health, 2 lives, one more hit.
    let mut p = make_player();
    p.health = 0;
    p.lives = 2;
    p.rect.x = 300.0;
    p.rect.y = 100.0;
    p.take_damage(25);
    assert_eq!(p.lives, 1);
    assert_eq!(p.health, 100);
    assert_eq!(p.rect.y, RESPAWN_Y);
    assert_eq!(p.rect.x, 300.0);
}

#[test]
fn respawn_clamps_horizontal_position() {
    let mut p = make_player();
    p.rect.x = 595.0;
    p.take_damage(100);
    assert_eq!(p.lives, 2);
    assert_eq!(p.rect.x, 540.0);
}

#[test]
fn last_life_lost_makes_player_inert() {
    let mut p = make_player();
    p.lives = 1;
    p.health = 10;
    p.take_damage(25);
    assert_eq!(p.lives, 0);
    assert_eq!(p.health, 0);
    assert!(!p.is_alive());
}

#[test]
fn inert_player_ignores_damage() {
    let mut p = make_player();
    p.health = 0;
    p.lives = 0;
    for _ in 0..10 {
        p.take_damage(25);
    }
    assert_eq!(p.lives, 0);
    assert_eq!(p.health, 0);
}

#[test]
fn health_stays_in_range_through_a_beating() {
    let mut p = make_player();
    for amount in [25, 100, 25, 25, 25, 25, 100, 25, 100, 100, 25] {
        p.take_damage(amount);
        assert!((0..=p.max_health).contains(&p.health));
    }
    assert_eq!(p.lives, 0);
}

#[test]
fn zero_max_health_does_not_fault() {
    let mut p = make_player();
    p.max_health = 0;
    p.health = 0;
    p.take_damage(25);
    assert_eq!(p.lives, 2);
    assert_eq!(p.health, 0);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_enters_above_the_field() {
    let e = Enemy::new(120.0, 3.0, 5000.0, &mut seeded_rng());
    assert_eq!(e.rect.x, 120.0);
    assert_eq!(e.rect.y, -ENEMY_SIZE);
    assert!(e.next_shot >= 5700.0 && e.next_shot <= 6400.0);
}

#[test]
fn enemy_descends_by_speed() {
    let mut e = Enemy::new(120.0, 3.0, 0.0, &mut seeded_rng());
    e.update();
    assert_eq!(e.rect.y, -47.0);
}

#[test]
fn enemy_ready_to_shoot_at_schedule() {
    let mut e = Enemy::new(120.0, 3.0, 0.0, &mut seeded_rng());
    e.next_shot = 1000.0;
    assert!(!e.ready_to_shoot(999.0));
    assert!(e.ready_to_shoot(1000.0));
    assert!(e.ready_to_shoot(1500.0));
}

#[test]
fn rescheduled_shot_within_jitter_window() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(120.0, 3.0, 0.0, &mut rng);
    for _ in 0..200 {
        e.schedule_next_shot(2000.0, &mut rng);
        assert!(e.next_shot >= 2900.0 && e.next_shot <= 3600.0);
    }
}

#[test]
fn enemy_exits_once_fully_below_field() {
    let mut e = Enemy::new(120.0, 3.0, 0.0, &mut seeded_rng());
    e.rect.y = 699.0;
    assert!(!e.exited_bottom());
    e.rect.y = FIELD_HEIGHT;
    assert!(e.exited_bottom());
}

#[test]
fn mode_player_count() {
    assert_eq!(Mode::Single.player_count(), 1);
    assert_eq!(Mode::Duo.player_count(), 2);
}
