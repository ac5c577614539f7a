//! The simulation engine.
//!
//! `Simulation` owns every entity collection and the score, and advances them
//! one frame at a time. All randomness comes from the engine's own RNG so a
//! seeded engine replays identically (tests rely on this).
//!
//! Every pass that can delete while iterating walks its collection back to
//! front and removes with `Vec::remove`, which keeps insertion order intact
//! for the tie-break rules below.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::controls::{Controls, Key, KeySet};
use crate::entities::{
    Bullet, Enemy, GameEvent, Mode, Player, SoundCue, Tint, BULLET_WIDTH, ENEMY_SIZE, FIELD_MARGIN,
};
use crate::geometry::{overlaps, random_int, FIELD_WIDTH};

pub const SCORE_PER_KILL: u32 = 10;
pub const BULLET_DAMAGE: i32 = 25;
/// Ramming costs a full health bar, i.e. one life.
pub const RAM_DAMAGE: i32 = 100;

const PLAYER_ONE_CENTER_X: f32 = FIELD_WIDTH / 2.0 - 70.0;
const PLAYER_TWO_CENTER_X: f32 = FIELD_WIDTH / 2.0 + 70.0;

// ── Difficulty curves ─────────────────────────────────────────────────────────

/// Seconds between enemy spawns after `elapsed` seconds of play.
pub fn spawn_interval(elapsed: f64) -> f64 {
    (1.1 - elapsed * 0.02).max(0.45)
}

/// Descent speed of an enemy spawned after `elapsed` seconds of play.
pub fn enemy_speed(elapsed: f64) -> f32 {
    (2.5 + elapsed * 0.05).min(6.5) as f32
}

/// Speed of an enemy bullet fired after `elapsed` seconds of play.
pub fn enemy_bullet_speed(elapsed: f64) -> f32 {
    (6.0 + elapsed * 0.02) as f32
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Simulation {
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub score: u32,
    /// Seconds accumulated towards the next spawn.
    pub spawn_timer: f64,
    /// Timestamp (ms) at which the current session started.
    pub session_start: f64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(rng: StdRng) -> Self {
        Self {
            players: Vec::new(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            score: 0,
            spawn_timer: 0.0,
            session_start: 0.0,
            rng,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Clear the field and seat fresh ships for `mode`. The RNG carries over.
    pub fn reset(&mut self, mode: Mode, now: f64) {
        self.players.clear();
        self.players
            .push(Player::new(PLAYER_ONE_CENTER_X, Tint::Green, Controls::PLAYER_ONE));
        if mode == Mode::Duo {
            self.players
                .push(Player::new(PLAYER_TWO_CENTER_X, Tint::Blue, Controls::PLAYER_TWO));
        }
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.score = 0;
        self.spawn_timer = 0.0;
        self.session_start = now;
    }

    /// Seconds of play since the session started.
    pub fn elapsed_secs(&self, now: f64) -> f64 {
        (now - self.session_start) / 1000.0
    }

    /// Advance every entity by one frame. `now` is in milliseconds, `dt` in
    /// seconds since the previous frame.
    pub fn step(&mut self, now: f64, dt: f64, keys: &KeySet, events: &mut Vec<GameEvent>) {
        let elapsed = self.elapsed_secs(now);

        self.move_players(keys);
        self.accumulate_spawns(now, dt, elapsed);
        self.update_enemies(now, elapsed);
        self.resolve_player_bullets(events);
        self.resolve_enemy_bullets();
        self.resolve_enemy_collisions();
    }

    pub fn move_players(&mut self, keys: &KeySet) {
        for player in &mut self.players {
            player.handle_input(keys);
        }
    }

    /// Let every living ship bound to `key` try to shoot. Returns whether any
    /// shot was fired.
    pub fn fire(&mut self, key: Key, now: f64, events: &mut Vec<GameEvent>) -> bool {
        let mut fired = false;
        for player in &mut self.players {
            if player.controls.shoot == key {
                fired |= player.try_shoot(now, &mut self.player_bullets, events);
            }
        }
        fired
    }

    pub fn accumulate_spawns(&mut self, now: f64, dt: f64, elapsed: f64) {
        let interval = spawn_interval(elapsed);
        self.spawn_timer += dt;
        while self.spawn_timer >= interval {
            self.spawn_timer -= interval;
            self.spawn_enemy(now, elapsed);
        }
    }

    pub fn spawn_enemy(&mut self, now: f64, elapsed: f64) {
        let max_x = (FIELD_WIDTH - ENEMY_SIZE - FIELD_MARGIN).max(FIELD_MARGIN);
        let x = random_int(&mut self.rng, FIELD_MARGIN as i64, max_x as i64) as f32;
        let speed = enemy_speed(elapsed);
        self.enemies.push(Enemy::new(x, speed, now, &mut self.rng));
        tracing::debug!(x, speed, "enemy spawned");
    }

    /// Move enemies, let the ready ones shoot, and drop those that left the
    /// bottom of the field.
    pub fn update_enemies(&mut self, now: f64, elapsed: f64) {
        for i in (0..self.enemies.len()).rev() {
            let enemy = &mut self.enemies[i];
            enemy.update();

            if enemy.ready_to_shoot(now) {
                self.enemy_bullets.push(Bullet::new(
                    enemy.rect.center_x() - BULLET_WIDTH / 2.0,
                    enemy.rect.bottom(),
                    enemy_bullet_speed(elapsed),
                    Tint::Yellow,
                ));
                enemy.schedule_next_shot(now, &mut self.rng);
            }

            if self.enemies[i].exited_bottom() {
                self.enemies.remove(i);
            }
        }
    }

    /// Move player bullets and resolve hits. Each bullet destroys at most one
    /// enemy, checked from the back of the enemy list to the front.
    pub fn resolve_player_bullets(&mut self, events: &mut Vec<GameEvent>) {
        for i in (0..self.player_bullets.len()).rev() {
            let bullet = &mut self.player_bullets[i];
            bullet.update();

            let hit = (0..self.enemies.len())
                .rev()
                .find(|&j| overlaps(&bullet.rect, &self.enemies[j].rect));
            if let Some(j) = hit {
                self.enemies.remove(j);
                self.score += SCORE_PER_KILL;
                events.push(GameEvent::Sound(SoundCue::Explosion));
                tracing::debug!(score = self.score, "enemy destroyed");
            }

            if hit.is_some() || self.player_bullets[i].off_screen() {
                self.player_bullets.remove(i);
            }
        }
    }

    /// Move enemy bullets and resolve hits against living ships, first ship in
    /// list order wins.
    pub fn resolve_enemy_bullets(&mut self) {
        for i in (0..self.enemy_bullets.len()).rev() {
            let bullet = &mut self.enemy_bullets[i];
            bullet.update();

            let target = self
                .players
                .iter_mut()
                .find(|p| p.is_alive() && overlaps(&bullet.rect, &p.rect));
            let hit = match target {
                Some(player) => {
                    player.take_damage(BULLET_DAMAGE);
                    true
                }
                None => false,
            };

            if hit || self.enemy_bullets[i].off_screen() {
                self.enemy_bullets.remove(i);
            }
        }
    }

    /// Enemies that ram a living ship cost it a life and are destroyed.
    pub fn resolve_enemy_collisions(&mut self) {
        for i in (0..self.enemies.len()).rev() {
            let enemy_rect = self.enemies[i].rect;
            let target = self
                .players
                .iter_mut()
                .find(|p| p.is_alive() && overlaps(&enemy_rect, &p.rect));
            if let Some(player) = target {
                player.take_damage(RAM_DAMAGE);
                self.enemies.remove(i);
                tracing::debug!("enemy rammed a player");
            }
        }
    }

    /// True once no ship has lives left.
    pub fn all_players_down(&self) -> bool {
        self.players.iter().all(|p| !p.is_alive())
    }
}
