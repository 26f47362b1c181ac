//! The falling fruit entity

use glam::{IVec2, Vec2};
use rand::Rng;

use super::collision::Rect;
use crate::consts::*;

/// Visual variant of a fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Orange, FruitKind::Banana];

    /// Asset file name for this variant's sprite
    pub fn file_name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple.png",
            FruitKind::Orange => "orange.png",
            FruitKind::Banana => "banana.png",
        }
    }

    /// Dense index into `ALL`, used for texture lookup
    pub fn index(&self) -> usize {
        match self {
            FruitKind::Apple => 0,
            FruitKind::Orange => 1,
            FruitKind::Banana => 2,
        }
    }
}

/// A fruit entity.
///
/// Falls straight down at a constant speed until it is cut. Once cut it is
/// frozen in place while the slice ring plays out.
#[derive(Debug, Clone, PartialEq)]
pub struct Fruit {
    pub kind: FruitKind,
    /// Top-left corner in screen space
    pub pos: IVec2,
    /// Fall speed in units per frame
    pub speed: i32,
    pub cut: bool,
    /// Frames left to show the slice ring (non-zero only while cut)
    pub effect_countdown: u32,
}

impl Fruit {
    /// Create a fresh fruit just above the top of the screen
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let kind = FruitKind::ALL[rng.random_range(0..FruitKind::ALL.len())];
        let x = rng.random_range(SPAWN_MARGIN..=SCREEN_WIDTH as i32 - SPAWN_MARGIN);
        let speed = rng.random_range(MIN_FALL_SPEED..=MAX_FALL_SPEED);

        Self {
            kind,
            pos: IVec2::new(x, SPAWN_Y),
            speed,
            cut: false,
            effect_countdown: 0,
        }
    }

    /// Move down by one frame's worth of fall. No-op once cut.
    pub fn advance(&mut self) {
        if !self.cut {
            self.pos.y += self.speed;
        }
    }

    /// Sprite bounds at the current position
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, FRUIT_SIZE, FRUIT_SIZE)
    }

    /// Check whether a pointer position is over this fruit
    pub fn check_hit(&self, pointer: Vec2) -> bool {
        self.bounds().contains_point(pointer)
    }

    /// Mark the fruit as cut and arm the slice ring.
    ///
    /// Returns false (and changes nothing) if it was already cut.
    pub fn slice(&mut self) -> bool {
        if self.cut {
            return false;
        }
        self.cut = true;
        self.effect_countdown = SLICE_EFFECT_FRAMES;
        true
    }

    /// Count down one shown frame of the slice ring
    pub fn tick_effect(&mut self) {
        if self.effect_countdown > 0 {
            self.effect_countdown -= 1;
        }
    }

    /// Whether the slice ring should be drawn this frame
    pub fn effect_visible(&self) -> bool {
        self.cut && self.effect_countdown > 0
    }

    /// Whether the fruit has dropped out of the bottom of the screen
    pub fn fell_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT as i32
    }

    /// Whether this fruit should leave the pool: it fell off uncut, or it was
    /// cut and its slice ring has finished.
    pub fn is_finished(&self) -> bool {
        if self.cut {
            self.effect_countdown == 0
        } else {
            self.fell_off_screen()
        }
    }

    /// Center of the slice ring
    pub fn ring_center(&self) -> Vec2 {
        self.pos.as_vec2() + Vec2::splat(SLICE_RING_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fruit_at(x: i32, y: i32) -> Fruit {
        Fruit {
            kind: FruitKind::Apple,
            pos: IVec2::new(x, y),
            speed: 7,
            cut: false,
            effect_countdown: 0,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let fruit = Fruit::spawn(&mut rng);
            assert!((50..=950).contains(&fruit.pos.x));
            assert_eq!(fruit.pos.y, -50);
            assert!((5..=10).contains(&fruit.speed));
            assert!(!fruit.cut);
            assert_eq!(fruit.effect_countdown, 0);
        }
    }

    #[test]
    fn test_spawn_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[Fruit::spawn(&mut rng).kind.index()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_advance_moves_down() {
        let mut fruit = fruit_at(100, 0);
        fruit.advance();
        fruit.advance();
        assert_eq!(fruit.pos, IVec2::new(100, 14));
    }

    #[test]
    fn test_cut_fruit_is_frozen() {
        let mut fruit = fruit_at(100, 300);
        assert!(fruit.slice());
        fruit.advance();
        assert_eq!(fruit.pos, IVec2::new(100, 300));
    }

    #[test]
    fn test_slice_only_once() {
        let mut fruit = fruit_at(100, 300);
        assert!(fruit.slice());
        assert_eq!(fruit.effect_countdown, SLICE_EFFECT_FRAMES);
        fruit.tick_effect();
        assert!(!fruit.slice());
        // Second slice doesn't re-arm the effect
        assert_eq!(fruit.effect_countdown, SLICE_EFFECT_FRAMES - 1);
    }

    #[test]
    fn test_check_hit() {
        let fruit = fruit_at(100, 300);
        assert!(fruit.check_hit(Vec2::new(100.0, 300.0)));
        assert!(fruit.check_hit(Vec2::new(145.0, 345.0)));
        assert!(!fruit.check_hit(Vec2::new(190.0, 345.0)));
        assert!(!fruit.check_hit(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_effect_runs_for_ten_frames() {
        let mut fruit = fruit_at(100, 300);
        fruit.slice();

        let mut shown = 0;
        while fruit.effect_visible() {
            shown += 1;
            fruit.tick_effect();
        }
        assert_eq!(shown, 10);
        assert!(fruit.is_finished());
    }

    #[test]
    fn test_finished_when_below_screen() {
        let mut fruit = fruit_at(100, 800);
        assert!(!fruit.is_finished());
        fruit.advance();
        assert!(fruit.is_finished());
    }

    #[test]
    fn test_ring_center() {
        let fruit = fruit_at(100, 300);
        assert_eq!(fruit.ring_center(), Vec2::new(140.0, 340.0));
    }
}
