//! Built-in 5x7 bitmap font
//!
//! Text is drawn as solid rectangles, one per horizontal run of lit pixels,
//! so labels need no font file and share the solid-color batch.

use glam::Vec2;

use super::shapes::push_rect;
use super::vertex::Vertex;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between glyphs
const GLYPH_SPACING: u32 = 1;
/// Pixels per font pixel; 3 gives roughly a 21px cap height
pub const DEFAULT_SCALE: f32 = 3.0;

/// Row bitmaps for a character, top row first, bit 4 is the leftmost column.
/// Lowercase letters use the uppercase shapes.
fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ' ' => [0; 7],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}

/// A line of text ready to be placed on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub color: [f32; 4],
    pub scale: f32,
}

impl Label {
    pub fn new(text: impl Into<String>, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            color,
            scale: DEFAULT_SCALE,
        }
    }

    /// Rendered size in screen units
    #[cfg(test)]
    fn size(&self) -> Vec2 {
        let chars = self.text.chars().count() as u32;
        if chars == 0 {
            return Vec2::ZERO;
        }
        let columns = chars * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING;
        Vec2::new(columns as f32, GLYPH_HEIGHT as f32) * self.scale
    }

    /// Emit solid-color triangles with the label's top-left at `origin`
    pub fn tessellate(&self, origin: Vec2) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        let advance = (GLYPH_WIDTH + GLYPH_SPACING) as f32 * self.scale;

        for (i, c) in self.text.chars().enumerate() {
            let glyph_origin = origin + Vec2::new(i as f32 * advance, 0.0);

            for (row, bits) in glyph(c).into_iter().enumerate() {
                let y = glyph_origin.y + row as f32 * self.scale;
                let mut col = 0;
                while col < GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        col += 1;
                        continue;
                    }
                    // Merge the run of lit pixels into one rectangle
                    let start = col;
                    while col < GLYPH_WIDTH && bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        col += 1;
                    }
                    push_rect(
                        &mut vertices,
                        Vec2::new(glyph_origin.x + start as f32 * self.scale, y),
                        Vec2::new((col - start) as f32 * self.scale, self.scale),
                        self.color,
                    );
                }
            }
        }

        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        let label = Label::new("Time: 60", [0.0; 4]);
        // 8 glyphs * 6 columns - 1 trailing gap
        assert_eq!(label.size(), Vec2::new(47.0 * 3.0, 21.0));
        assert_eq!(Label::new("", [0.0; 4]).size(), Vec2::ZERO);
    }

    #[test]
    fn test_space_emits_nothing() {
        assert!(Label::new("   ", [0.0; 4]).tessellate(Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_runs_are_merged() {
        // '-' is a single five-pixel run
        let verts = Label::new("-", [0.0; 4]).tessellate(Vec2::ZERO);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [0.0, 9.0]);
        assert_eq!(verts[5].position, [15.0, 12.0]);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        let lower = Label::new("score", [0.0; 4]).tessellate(Vec2::ZERO);
        let upper = Label::new("SCORE", [0.0; 4]).tessellate(Vec2::ZERO);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_glyphs_stay_in_bounds() {
        let label = Label::new("Game Over! Press ESC to Quit", [1.0, 0.0, 0.0, 1.0]);
        let size = label.size();
        let origin = Vec2::new(350.0, 400.0);
        for v in label.tessellate(origin) {
            assert!(v.position[0] >= origin.x && v.position[0] <= origin.x + size.x);
            assert!(v.position[1] >= origin.y && v.position[1] <= origin.y + size.y);
        }
    }
}
