//! Game entity types and their per-frame behavior.
//!
//! Entities never reference each other; the simulation owns every collection
//! and hands entities only what a single call needs.

use rand::Rng;

use crate::controls::{Controls, KeySet};
use crate::geometry::{clamp, random_int, Rect, FIELD_HEIGHT, FIELD_WIDTH};

pub const PLAYER_SIZE: f32 = 50.0;
pub const ENEMY_SIZE: f32 = 50.0;
/// Gap between the bottom of a freshly spawned ship and the field floor.
pub const PLAYER_Y_OFFSET: f32 = 40.0;
/// Horizontal inset a ship can never cross.
pub const FIELD_MARGIN: f32 = 10.0;
/// Row a ship returns to after losing a life.
pub const RESPAWN_Y: f32 = FIELD_HEIGHT - 70.0;

pub const PLAYER_SPEED: f32 = 6.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_LIVES: u32 = 3;
pub const SHOT_COOLDOWN_MS: f64 = 250.0;

pub const BULLET_WIDTH: f32 = 6.0;
pub const BULLET_HEIGHT: f32 = 12.0;
pub const PLAYER_BULLET_SPEED: f32 = -9.0;

/// Delay before a new enemy's first shot, in milliseconds.
pub const FIRST_SHOT_JITTER_MS: (i64, i64) = (700, 1400);
/// Delay between an enemy's subsequent shots, in milliseconds.
pub const NEXT_SHOT_JITTER_MS: (i64, i64) = (900, 1600);

// ── Shared enums ──────────────────────────────────────────────────────────────

/// Palette tag carried by ships and bullets; the display maps it to a
/// terminal colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Green,
    Blue,
    Red,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
}

/// Number of ships in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Single,
    Duo,
}

impl Mode {
    pub fn player_count(self) -> usize {
        match self {
            Mode::Single => 1,
            Mode::Duo => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Explosion,
}

/// Side effects the core asks the host to carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    /// A new best score was committed and should be persisted.
    HighScore(u32),
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Field units per frame; negative travels up.
    pub velocity: f32,
    pub tint: Tint,
}

impl Bullet {
    pub fn new(x: f32, y: f32, velocity: f32, tint: Tint) -> Self {
        Self {
            rect: Rect::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
            velocity,
            tint,
        }
    }

    /// One discrete step per frame; not scaled by delta time.
    pub fn update(&mut self) {
        self.rect.y += self.velocity;
    }

    pub fn off_screen(&self) -> bool {
        self.rect.outside_field_vertically()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub controls: Controls,
    pub tint: Tint,
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    pub cooldown_ms: f64,
    /// Timestamp of the last shot; `None` until the first one.
    pub last_shot: Option<f64>,
}

impl Player {
    /// A fresh ship centred on `center_x`, resting above the field floor.
    pub fn new(center_x: f32, tint: Tint, controls: Controls) -> Self {
        Self {
            rect: Rect::new(
                center_x - PLAYER_SIZE / 2.0,
                FIELD_HEIGHT - PLAYER_SIZE - PLAYER_Y_OFFSET,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
            speed: PLAYER_SPEED,
            controls,
            tint,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            lives: PLAYER_LIVES,
            cooldown_ms: SHOT_COOLDOWN_MS,
            last_shot: None,
        }
    }

    /// Alive ships take part in the simulation; a ship with no lives left is
    /// inert for the rest of the session.
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn handle_input(&mut self, keys: &KeySet) {
        if !self.is_alive() {
            return;
        }
        let mut dx = 0.0;
        if keys.is_down(self.controls.left) {
            dx -= self.speed;
        }
        if keys.is_down(self.controls.right) {
            dx += self.speed;
        }
        self.rect.x = clamp(self.rect.x + dx, FIELD_MARGIN, self.max_x());
    }

    /// Fire one bullet upward from the nose of the ship if the cooldown has
    /// elapsed. Returns whether a shot was fired.
    pub fn try_shoot(
        &mut self,
        now: f64,
        bullets: &mut Vec<Bullet>,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.is_alive() {
            return false;
        }
        if let Some(last) = self.last_shot {
            if now - last < self.cooldown_ms {
                return false;
            }
        }
        bullets.push(Bullet::new(
            self.rect.center_x() - BULLET_WIDTH / 2.0,
            self.rect.y - BULLET_HEIGHT,
            PLAYER_BULLET_SPEED,
            self.tint,
        ));
        self.last_shot = Some(now);
        events.push(GameEvent::Sound(SoundCue::Shoot));
        true
    }

    pub fn take_damage(&mut self, amount: i32) {
        if !self.is_alive() {
            return;
        }
        self.health -= amount;
        if self.health > 0 {
            return;
        }
        self.lives -= 1;
        if self.lives > 0 {
            self.health = self.max_health;
            self.rect.y = RESPAWN_Y;
            self.rect.x = clamp(self.rect.x, FIELD_MARGIN, self.max_x());
            tracing::debug!(lives = self.lives, "player respawned");
        } else {
            self.health = 0;
            tracing::debug!("player out of lives");
        }
    }

    fn max_x(&self) -> f32 {
        FIELD_WIDTH - self.rect.width - FIELD_MARGIN
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Field units per frame, downward.
    pub speed: f32,
    /// Timestamp at or after which the enemy fires again.
    pub next_shot: f64,
}

impl Enemy {
    /// A new enemy entering just above the top edge at column `x`.
    pub fn new(x: f32, speed: f32, now: f64, rng: &mut impl Rng) -> Self {
        let (lo, hi) = FIRST_SHOT_JITTER_MS;
        Self {
            rect: Rect::new(x, -ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE),
            speed,
            next_shot: now + random_int(rng, lo, hi) as f64,
        }
    }

    pub fn update(&mut self) {
        self.rect.y += self.speed;
    }

    pub fn ready_to_shoot(&self, now: f64) -> bool {
        now >= self.next_shot
    }

    pub fn schedule_next_shot(&mut self, now: f64, rng: &mut impl Rng) {
        let (lo, hi) = NEXT_SHOT_JITTER_MS;
        self.next_shot = now + random_int(rng, lo, hi) as f64;
    }

    /// True once the enemy has dropped entirely below the field.
    pub fn exited_bottom(&self) -> bool {
        self.rect.y >= FIELD_HEIGHT
    }
}
