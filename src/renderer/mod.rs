//! Rendering module
//!
//! `scene` decides what to draw from game state; `pipeline` draws it with wgpu.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use font::Label;
pub use pipeline::{RenderError, RenderState};
pub use scene::{DrawCmd, Scene, TextureId};
