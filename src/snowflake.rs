//! A single falling snowflake: randomized on reset, advanced once per frame.

use std::sync::Arc;

use log::trace;

use crate::core::Surface;
use crate::params::Params;
use crate::sprite::Sprite;
use crate::utils::render2d::WHITE;
use crate::utils::rng::Randomizer;

/// One simulated particle.
///
/// Size, velocity, opacity and entry point are re-rolled on every reset.
/// Velocity is derived from size (bigger flakes fall faster) and a fall angle
/// within `±angle_max` degrees of vertical.
#[derive(Clone, Debug)]
pub struct Snowflake {
    params: Arc<Params>,
    randomizer: Randomizer,

    size: u32,
    alpha: u8,
    // Opacity actually painted; can drop below zero once faded past the bottom.
    paint_alpha: i32,
    sprite: Option<Sprite>,

    speed_x: f64,
    speed_y: f64,
    position_x: f64,
    position_y: f64,

    should_recycle_falling: bool,
    stopped: bool,
}

impl Snowflake {
    /// Create a flake and give it its first random state.
    pub fn new(params: impl Into<Arc<Params>>, randomizer: Randomizer) -> Self {
        let mut flake = Self {
            params: params.into(),
            randomizer,
            size: 0,
            alpha: 255,
            paint_alpha: 255,
            sprite: None,
            speed_x: 0.0,
            speed_y: 0.0,
            position_x: 0.0,
            position_y: 0.0,
            should_recycle_falling: true,
            stopped: false,
        };
        flake.reset(None);
        flake
    }

    /// Reproducible flake for a given seed.
    pub fn with_seed(params: impl Into<Arc<Params>>, seed: u64) -> Self {
        Self::new(params, Randomizer::new(seed))
    }

    /// Re-roll every random attribute.
    ///
    /// With `position_y` set the flake enters at exactly that height. Without it
    /// the height is random within the parent, shifted above the top edge unless
    /// `already_falling` is set.
    pub fn reset(&mut self, position_y: Option<f64>) {
        let p = Arc::clone(&self.params);
        self.should_recycle_falling = true;

        let r = &mut self.randomizer;
        self.size = r.random_int(p.size_min as i32, p.size_max as i32, true) as u32;
        self.sprite = p.image.as_ref().map(|image| image.scaled(self.size));

        let range = p.size_max - p.size_min;
        let ratio = if range == 0 { 0.0 } else { (self.size - p.size_min) as f64 / range as f64 };
        let speed = ratio * (p.speed_max - p.speed_min) + p.speed_min;
        let degrees = self.randomizer.random_double(p.angle_max);
        let angle = (degrees * self.randomizer.random_signum() as f64).to_radians();
        self.speed_x = speed * angle.sin();
        self.speed_y = speed * angle.cos();

        let r = &mut self.randomizer;
        self.alpha = r.random_int(p.alpha_min as i32, p.alpha_max as i32, false) as u8;
        self.paint_alpha = self.alpha as i32;

        self.position_x = self.randomizer.random_double(p.parent_width as f64);
        self.position_y = match position_y {
            Some(y) => y,
            None => {
                let y = self.randomizer.random_double(p.parent_height as f64);
                if p.already_falling { y } else { y - p.parent_height as f64 - self.size as f64 }
            }
        };
    }

    /// Fresh random entry point.
    pub fn reset_fresh(&mut self) { self.reset(None) }

    /// Re-roll and enter at height `y`.
    pub fn reset_at(&mut self, y: f64) { self.reset(Some(y)) }

    /// Whether the owner should keep updating and drawing this flake.
    pub fn is_still_falling(&self) -> bool {
        self.should_recycle_falling
            || (self.position_y > 0.0 && self.position_y < self.params.parent_height as f64)
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        let height = self.params.parent_height as f64;
        self.position_x += self.speed_x;
        self.position_y += self.speed_y;
        if self.position_y > height {
            if self.should_recycle_falling {
                if self.stopped {
                    self.stopped = false;
                    trace!("stopped flake restarted");
                    self.reset_fresh();
                } else {
                    let y = -(self.size as f64);
                    self.reset_at(y);
                }
            } else {
                self.position_y = height + self.size as f64;
                if !self.stopped {
                    trace!("flake came to rest at x={:.1}", self.position_x);
                }
                self.stopped = true;
            }
        }
        if self.params.fading_enabled {
            self.paint_alpha = self.faded_alpha();
        }
    }

    fn faded_alpha(&self) -> i32 {
        let height = self.params.parent_height as f64;
        (self.alpha as f64 * ((height - self.position_y) / height)) as i32
    }

    /// Paint onto `surface` at the current position and opacity.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (x, y) = (self.position_x as f32, self.position_y as f32);
        let opacity = self.opacity();
        match &self.sprite {
            Some(sprite) => surface.draw_sprite(sprite, x, y, opacity),
            None => surface.fill_circle(x, y, self.size as f32, WHITE.with_alpha(opacity)),
        }
    }

    /// Painted opacity clamped to `0..=255`.
    pub fn opacity(&self) -> u8 { self.paint_alpha.clamp(0, 255) as u8 }

    /// Painted opacity before clamping.
    pub fn paint_alpha(&self) -> i32 { self.paint_alpha }
    /// Opacity rolled at the last reset.
    pub fn alpha(&self) -> u8 { self.alpha }
    pub fn size(&self) -> u32 { self.size }
    pub fn position(&self) -> (f64, f64) { (self.position_x, self.position_y) }
    pub fn speed(&self) -> (f64, f64) { (self.speed_x, self.speed_y) }
    pub fn sprite(&self) -> Option<&Sprite> { self.sprite.as_ref() }
    pub fn params(&self) -> &Params { &self.params }
    pub fn is_stopped(&self) -> bool { self.stopped }
    pub fn should_recycle_falling(&self) -> bool { self.should_recycle_falling }

    /// Enable or disable recycling at the bottom edge. Any reset re-enables it.
    pub fn set_should_recycle_falling(&mut self, recycle: bool) {
        self.should_recycle_falling = recycle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::render2d::Color;

    /// 100px tall surface, fixed 4px flakes falling straight down at 5px/frame.
    fn straight_params() -> Params {
        Params::builder(50, 100)
            .size(4, 4)
            .speed(5.0, 5.0)
            .angle_max(0.0)
            .alpha(200, 200)
            .already_falling(true)
            .build()
            .unwrap()
    }

    #[test]
    fn straight_fall_has_vertical_velocity() {
        let flake = Snowflake::with_seed(straight_params(), 1);
        assert_eq!(flake.size(), 4);
        assert_eq!(flake.speed(), (0.0, 5.0));
        assert_eq!(flake.alpha(), 200);
        assert!(flake.should_recycle_falling());
        assert!(!flake.is_stopped());
    }

    #[test]
    fn recycles_just_above_top_after_crossing_bottom() {
        let mut flake = Snowflake::with_seed(straight_params(), 2);
        for _ in 0..100 {
            let (_, before) = flake.position();
            flake.update();
            let (_, after) = flake.position();
            if before + 5.0 > 100.0 {
                assert_eq!(after, -4.0);
                assert!(!flake.is_stopped());
                return;
            }
            assert_eq!(after, before + 5.0);
        }
        panic!("flake never crossed the bottom edge");
    }

    #[test]
    fn non_recycling_flake_rests_below_bottom() {
        let mut flake = Snowflake::with_seed(straight_params(), 3);
        flake.set_should_recycle_falling(false);
        for _ in 0..100 {
            flake.update();
            if flake.is_stopped() { break; }
        }
        assert!(flake.is_stopped());
        for _ in 0..3 {
            flake.update();
            assert_eq!(flake.position().1, 104.0);
            assert!(flake.is_stopped());
            assert!(!flake.is_still_falling());
        }
    }

    #[test]
    fn stopped_flake_restarts_with_fresh_reset() {
        let mut flake = Snowflake::with_seed(straight_params(), 4);
        flake.set_should_recycle_falling(false);
        while !flake.is_stopped() { flake.update(); }

        flake.set_should_recycle_falling(true);
        flake.update();
        assert!(!flake.is_stopped());
        let (_, y) = flake.position();
        // already_falling: fresh reset lands inside the surface, not at -size
        assert!((0.0..100.0).contains(&y), "y = {y}");
    }

    #[test]
    fn every_reset_turns_recycling_back_on() {
        let mut flake = Snowflake::with_seed(straight_params(), 12);
        flake.set_should_recycle_falling(false);
        flake.reset_fresh();
        assert!(flake.should_recycle_falling());

        flake.set_should_recycle_falling(false);
        flake.reset_at(-4.0);
        assert!(flake.should_recycle_falling());
        assert_eq!(flake.position().1, -4.0);
    }

    #[test]
    fn still_falling_inside_surface_without_recycling() {
        let mut flake = Snowflake::with_seed(straight_params(), 5);
        flake.set_should_recycle_falling(false);
        flake.position_y = 50.0;
        assert!(flake.is_still_falling());
        flake.position_y = -1.0;
        assert!(!flake.is_still_falling());
        flake.position_y = 0.0;
        assert!(!flake.is_still_falling());
    }

    #[test]
    fn fading_scales_alpha_by_remaining_height() {
        let params = Params { fading_enabled: true, ..straight_params() };
        let mut flake = Snowflake::with_seed(params, 6);
        flake.position_y = 45.0;
        flake.update();
        assert_eq!(flake.position().1, 50.0);
        assert_eq!(flake.paint_alpha(), 100);
        assert_eq!(flake.opacity(), 100);
    }

    #[test]
    fn faded_alpha_goes_negative_but_opacity_clamps() {
        let params = Params { fading_enabled: true, ..straight_params() };
        let mut flake = Snowflake::with_seed(params, 7);
        flake.set_should_recycle_falling(false);
        while !flake.is_stopped() { flake.update(); }
        assert!(flake.paint_alpha() < 0);
        assert_eq!(flake.opacity(), 0);
    }

    #[test]
    fn without_fading_alpha_is_constant() {
        let mut flake = Snowflake::with_seed(straight_params(), 8);
        for _ in 0..10 {
            flake.update();
            assert_eq!(flake.paint_alpha(), 200);
        }
    }

    #[test]
    fn image_is_rescaled_on_reset() {
        let params = Params {
            image: Some(Sprite::filled(32, 16, [255, 255, 255, 255])),
            size_min: 3,
            size_max: 9,
            ..straight_params()
        };
        let mut flake = Snowflake::with_seed(params, 9);
        for _ in 0..20 {
            let sprite = flake.sprite().expect("sprite present");
            assert_eq!(sprite.width(), flake.size());
            assert_eq!(sprite.height(), flake.size());
            flake.reset_fresh();
        }
    }

    #[derive(Default)]
    struct Recorder {
        sprites: Vec<(u32, f32, f32, u8)>,
        circles: Vec<(f32, f32, f32, Color)>,
    }

    impl Surface for Recorder {
        fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32, opacity: u8) {
            self.sprites.push((sprite.width(), x, y, opacity));
        }
        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
            self.circles.push((cx, cy, radius, color));
        }
    }

    #[test]
    fn draws_circle_without_image() {
        let mut flake = Snowflake::with_seed(straight_params(), 10);
        flake.position_x = 12.0;
        flake.position_y = 34.0;
        let mut rec = Recorder::default();
        flake.draw(&mut rec);
        assert!(rec.sprites.is_empty());
        assert_eq!(rec.circles, vec![(12.0, 34.0, 4.0, Color(255, 255, 255, 200))]);
    }

    #[test]
    fn draws_sprite_with_image() {
        let params = Params { image: Some(Sprite::filled(8, 8, [255; 4])), ..straight_params() };
        let mut flake = Snowflake::with_seed(params, 11);
        flake.position_x = 1.5;
        flake.position_y = 2.5;
        let mut rec = Recorder::default();
        flake.draw(&mut rec);
        assert!(rec.circles.is_empty());
        assert_eq!(rec.sprites, vec![(4, 1.5, 2.5, 200)]);
    }
}
