//! Frame description built from game state
//!
//! The scene is an ordered list of draw commands (painter's order). It holds
//! no GPU handles, so what gets drawn for a given state is testable without
//! a device.

use glam::Vec2;

use super::font::Label;
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Fruit, FruitKind, GameState};

/// Segments used to tessellate the slice ring
const RING_SEGMENTS: u32 = 48;

/// Score label position
const SCORE_POS: Vec2 = Vec2::new(10.0, 10.0);
/// Countdown label position
const TIME_POS: Vec2 = Vec2::new(10.0, 50.0);
/// Game-over banner position
const GAME_OVER_POS: Vec2 = Vec2::new(SCREEN_WIDTH as f32 / 2.0 - 150.0, SCREEN_HEIGHT as f32 / 2.0);

pub const GAME_OVER_TEXT: &str = "Game Over! Press ESC to Quit";

/// Which texture a batch samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Fruit(FruitKind),
    /// 1x1 white texel for solid-color geometry
    White,
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite {
        texture: TextureId,
        origin: Vec2,
        size: Vec2,
    },
    Ring {
        center: Vec2,
        radius: f32,
        thickness: f32,
        color: [f32; 4],
    },
    Text {
        label: Label,
        origin: Vec2,
    },
}

impl DrawCmd {
    pub fn texture(&self) -> TextureId {
        match self {
            DrawCmd::Sprite { texture, .. } => *texture,
            DrawCmd::Ring { .. } | DrawCmd::Text { .. } => TextureId::White,
        }
    }

    fn tessellate(&self) -> Vec<Vertex> {
        match self {
            DrawCmd::Sprite { origin, size, .. } => {
                shapes::textured_quad(*origin, *size, colors::WHITE)
            }
            DrawCmd::Ring {
                center,
                radius,
                thickness,
                color,
            } => shapes::ring(*center, radius - thickness, *radius, *color, RING_SEGMENTS),
            DrawCmd::Text { label, origin } => label.tessellate(*origin),
        }
    }
}

/// Run of vertices sharing one texture
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: TextureId,
    pub vertices: Vec<Vertex>,
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub commands: Vec<DrawCmd>,
}

/// Draw command for a single fruit.
///
/// Uncut fruit shows its sprite; a freshly cut fruit shows the slice ring;
/// a cut fruit whose ring has expired shows nothing.
pub fn fruit_command(fruit: &Fruit) -> Option<DrawCmd> {
    if !fruit.cut {
        Some(DrawCmd::Sprite {
            texture: TextureId::Fruit(fruit.kind),
            origin: fruit.pos.as_vec2(),
            size: Vec2::splat(FRUIT_SIZE as f32),
        })
    } else if fruit.effect_visible() {
        Some(DrawCmd::Ring {
            center: fruit.ring_center(),
            radius: SLICE_RING_RADIUS,
            thickness: SLICE_RING_THICKNESS,
            color: colors::RED,
        })
    } else {
        None
    }
}

impl Scene {
    /// Build the frame: background, fruits, HUD, then the banner if time is up
    pub fn build(state: &GameState) -> Self {
        let mut commands = Vec::with_capacity(state.pool.len() + 4);

        commands.push(DrawCmd::Sprite {
            texture: TextureId::Background,
            origin: Vec2::ZERO,
            size: Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32),
        });

        commands.extend(state.pool.iter().filter_map(fruit_command));

        commands.push(DrawCmd::Text {
            label: Label::new(format!("Score: {}", state.score), colors::BLACK),
            origin: SCORE_POS,
        });
        commands.push(DrawCmd::Text {
            label: Label::new(format!("Time: {}", state.remaining_secs()), colors::BLACK),
            origin: TIME_POS,
        });

        if state.is_game_over() {
            commands.push(DrawCmd::Text {
                label: Label::new(GAME_OVER_TEXT, colors::RED),
                origin: GAME_OVER_POS,
            });
        }

        Self { commands }
    }

    /// Tessellate into batches, merging neighbours that share a texture
    pub fn batches(&self) -> Vec<Batch> {
        let mut batches: Vec<Batch> = Vec::new();

        for cmd in &self.commands {
            let texture = cmd.texture();
            let vertices = cmd.tessellate();
            if vertices.is_empty() {
                continue;
            }
            match batches.last_mut() {
                Some(last) if last.texture == texture => last.vertices.extend(vertices),
                _ => batches.push(Batch { texture, vertices }),
            }
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameInput, tick};
    use glam::IVec2;
    use std::time::Duration;

    fn fruit(kind: FruitKind, cut: bool, countdown: u32) -> Fruit {
        Fruit {
            kind,
            pos: IVec2::new(200, 300),
            speed: 5,
            cut,
            effect_countdown: countdown,
        }
    }

    fn labels(scene: &Scene) -> Vec<String> {
        scene
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { label, .. } => Some(label.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_uncut_fruit_draws_sprite() {
        let cmd = fruit_command(&fruit(FruitKind::Banana, false, 0)).unwrap();
        assert_eq!(
            cmd,
            DrawCmd::Sprite {
                texture: TextureId::Fruit(FruitKind::Banana),
                origin: Vec2::new(200.0, 300.0),
                size: Vec2::splat(90.0),
            }
        );
    }

    #[test]
    fn test_cut_fruit_draws_ring() {
        let cmd = fruit_command(&fruit(FruitKind::Apple, true, 4)).unwrap();
        assert_eq!(
            cmd,
            DrawCmd::Ring {
                center: Vec2::new(240.0, 340.0),
                radius: 50.0,
                thickness: 5.0,
                color: colors::RED,
            }
        );
    }

    #[test]
    fn test_expired_cut_fruit_draws_nothing() {
        assert!(fruit_command(&fruit(FruitKind::Apple, true, 0)).is_none());
    }

    #[test]
    fn test_running_scene_layout() {
        let state = GameState::new(3);
        let scene = Scene::build(&state);

        assert_eq!(scene.commands[0].texture(), TextureId::Background);
        let sprites = scene
            .commands
            .iter()
            .filter(|c| matches!(c.texture(), TextureId::Fruit(_)))
            .count();
        assert_eq!(sprites, POOL_SIZE);
        assert_eq!(labels(&scene), vec!["Score: 0", "Time: 60"]);
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(3);
        tick(
            &mut state,
            &FrameInput {
                elapsed: Duration::from_secs(60),
                ..Default::default()
            },
        );
        let scene = Scene::build(&state);
        assert_eq!(
            labels(&scene),
            vec!["Score: 0", "Time: 0", "Game Over! Press ESC to Quit"]
        );
        assert!(matches!(
            scene.commands.last(),
            Some(DrawCmd::Text { origin, .. }) if *origin == Vec2::new(350.0, 400.0)
        ));
    }

    #[test]
    fn test_ring_shown_for_ten_frames() {
        let mut state = GameState::new(8);
        for (i, f) in state.pool.iter_mut().enumerate() {
            f.pos = IVec2::new(50 + 300 * i as i32, -50);
        }
        state.pool[0].pos = IVec2::new(400, 300);
        state.pool[0].speed = 5;

        let slice = FrameInput {
            pointer: Vec2::new(420.0, 320.0),
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &slice);

        let mut frames_with_ring = 0;
        for _ in 0..20 {
            let scene = Scene::build(&state);
            if scene.commands.iter().any(|c| matches!(c, DrawCmd::Ring { .. })) {
                frames_with_ring += 1;
            }
            tick(&mut state, &FrameInput::default());
        }
        assert_eq!(frames_with_ring, 10);
    }

    #[test]
    fn test_batches_merge_solid_geometry() {
        let scene = Scene {
            commands: vec![
                DrawCmd::Sprite {
                    texture: TextureId::Background,
                    origin: Vec2::ZERO,
                    size: Vec2::new(1000.0, 800.0),
                },
                DrawCmd::Ring {
                    center: Vec2::splat(100.0),
                    radius: 50.0,
                    thickness: 5.0,
                    color: colors::RED,
                },
                DrawCmd::Text {
                    label: Label::new("Score: 1", colors::BLACK),
                    origin: SCORE_POS,
                },
                DrawCmd::Text {
                    label: Label::new("   ", colors::BLACK),
                    origin: TIME_POS,
                },
            ],
        };

        let batches = scene.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].texture, TextureId::Background);
        assert_eq!(batches[0].vertices.len(), 6);
        assert_eq!(batches[1].texture, TextureId::White);
        assert!(batches[1].vertices.len() > RING_SEGMENTS as usize * 6);
    }
}
