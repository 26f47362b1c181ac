//! Game session state
//!
//! Everything the loop controller owns for one play session lives here:
//! the fruit pool, score, countdown clock, and the seeded RNG that feeds
//! replacement fruits.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::fruit::{Fruit, FruitKind};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fruits falling, slicing scores
    Running,
    /// Time ran out; gameplay frozen until quit
    GameOver,
}

/// Something that happened during a tick that the shell may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fruit was cut this frame
    FruitSliced { kind: FruitKind },
    /// The countdown reached zero
    TimeUp { final_score: u64 },
}

/// Tunables fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub time_limit_secs: u32,
    pub pool_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: TIME_LIMIT_SECS,
            pool_size: POOL_SIZE,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub config: SessionConfig,
    /// Active fruits, always `config.pool_size` long between ticks
    pub pool: Vec<Fruit>,
    pub score: u64,
    pub phase: GamePhase,
    /// Time since the session started, as last reported by the clock
    pub elapsed: Duration,
    /// Number of ticks processed while running
    pub frame: u64,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tunables
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SessionConfig::default())
    }

    /// Create a new session: running, full pool, zero score, clock at zero
    pub fn with_config(seed: u64, config: SessionConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = (0..config.pool_size).map(|_| Fruit::spawn(&mut rng)).collect();

        Self {
            seed,
            rng,
            config,
            pool,
            score: 0,
            phase: GamePhase::Running,
            elapsed: Duration::ZERO,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Whole seconds left on the countdown, floored at zero
    pub fn remaining_secs(&self) -> u32 {
        u64::from(self.config.time_limit_secs).saturating_sub(self.elapsed.as_secs()) as u32
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Record the clock reading for this frame. Never moves backwards.
    pub fn update_clock(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.max(elapsed);
    }

    /// Rebuild the pool: keep unfinished fruits in order, then top up with
    /// fresh spawns so the pool is back to full size.
    pub fn replenish_pool(&mut self) {
        let mut next: Vec<Fruit> = std::mem::take(&mut self.pool)
            .into_iter()
            .filter(|fruit| !fruit.is_finished())
            .collect();

        while next.len() < self.config.pool_size {
            next.push(Fruit::spawn(&mut self.rng));
        }
        self.pool = next;
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
