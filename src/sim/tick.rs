//! Per-frame simulation step
//!
//! One call advances the session by exactly one rendered frame: move fruits,
//! resolve slices, rebuild the pool, then check the countdown.

use std::time::Duration;

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};

/// Input sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Pointer position in screen space
    pub pointer: Vec2,
    /// Primary button currently held
    pub pointer_down: bool,
    /// Monotonic time since the session started
    pub elapsed: Duration,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.frame += 1;

    // Rings armed on earlier frames have been shown once more
    for fruit in state.pool.iter_mut().filter(|f| f.cut) {
        fruit.tick_effect();
    }

    let mut sliced = Vec::new();
    for fruit in &mut state.pool {
        fruit.advance();

        if input.pointer_down && fruit.check_hit(input.pointer) && fruit.slice() {
            sliced.push(fruit.kind);
        }
    }

    for kind in sliced {
        state.score += 1;
        log::debug!("Sliced {:?} (score {})", kind, state.score);
        state.push_event(GameEvent::FruitSliced { kind });
    }

    state.replenish_pool();

    state.update_clock(input.elapsed);
    if state.remaining_secs() == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Time up! Final score: {}", state.score);
        state.push_event(GameEvent::TimeUp {
            final_score: state.score,
        });
    }
}
