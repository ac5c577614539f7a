//! Game-state controller: Menu → Playing → GameOver.
//!
//! `Game` gates which systems run, owns the high score, and makes sure the
//! high score is committed at most once per session.

use rand::rngs::StdRng;

use crate::compute::Simulation;
use crate::controls::{Key, KeySet};
use crate::entities::{Bullet, Enemy, GameEvent, GameState, Mode, Player};

/// Discrete triggers produced by the input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start(Mode),
    /// A shoot key went down; every ship bound to it tries to fire.
    Fire(Key),
    Restart,
}

/// Read-only view of one frame, handed to the presentation adapter.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub players: &'a [Player],
    pub enemies: &'a [Enemy],
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub score: u32,
    pub high_score: u32,
    /// The session that just ended beat the previous best.
    pub new_high_score: bool,
}

#[derive(Debug)]
pub struct Game {
    state: GameState,
    sim: Simulation,
    high_score: u32,
    last_mode: Mode,
    game_over_committed: bool,
    new_high_score: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(high_score: u32, rng: StdRng) -> Self {
        Self {
            state: GameState::Menu,
            sim: Simulation::new(rng),
            high_score,
            last_mode: Mode::Single,
            game_over_committed: false,
            new_high_score: false,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn last_mode(&self) -> Mode {
        self.last_mode
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    /// Begin a fresh session in `mode`, discarding whatever was on the field.
    pub fn start_game(&mut self, mode: Mode, now: f64) {
        self.sim.reset(mode, now);
        self.state = GameState::Playing;
        self.last_mode = mode;
        self.game_over_committed = false;
        self.new_high_score = false;
        tracing::info!(?mode, "session started");
    }

    /// Start over with the last selected mode. Ignored on the menu.
    pub fn restart(&mut self, now: f64) {
        if self.state == GameState::Menu {
            return;
        }
        self.start_game(self.last_mode, now);
    }

    /// Enter GameOver. The first call of a session commits the high score if
    /// it was beaten; later calls only keep the state.
    pub fn trigger_game_over(&mut self) {
        if self.state == GameState::Menu {
            return;
        }
        if !self.game_over_committed {
            let score = self.sim.score;
            if score > self.high_score {
                self.high_score = score;
                self.new_high_score = true;
                self.events.push(GameEvent::HighScore(score));
                tracing::info!(score, "new high score");
            }
            self.game_over_committed = true;
            tracing::info!(score, "game over");
        }
        self.state = GameState::GameOver;
    }

    pub fn handle_action(&mut self, action: Action, now: f64) {
        match (self.state, action) {
            (GameState::Menu, Action::Start(mode)) => self.start_game(mode, now),
            (GameState::Playing, Action::Fire(key)) => {
                self.sim.fire(key, now, &mut self.events);
            }
            (GameState::Playing | GameState::GameOver, Action::Restart) => self.restart(now),
            _ => {}
        }
    }

    /// Run one frame of simulation. Does nothing outside of Playing.
    pub fn advance(&mut self, now: f64, dt: f64, keys: &KeySet) {
        if self.state != GameState::Playing {
            return;
        }
        self.sim.step(now, dt, keys, &mut self.events);
        if self.sim.all_players_down() {
            self.trigger_game_over();
        }
    }

    /// Hand queued side effects to the caller.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            players: &self.sim.players,
            enemies: &self.sim.enemies,
            player_bullets: &self.sim.player_bullets,
            enemy_bullets: &self.sim.enemy_bullets,
            score: self.sim.score,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
        }
    }
}
