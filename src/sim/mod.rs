//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - Clock readings come in through `FrameInput`, never read directly
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod fruit;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use fruit::{Fruit, FruitKind};
pub use state::{GameEvent, GamePhase, GameState, SessionConfig};
pub use tick::{FrameInput, tick};
