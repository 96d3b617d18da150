// Copyright (c) 2026 rezky_nightky

use crate::geometry::Vec2;
use crate::paint::{DrawContext, Ellipse, Rgb};

pub const MAX_PUDDLE_SIZE: f32 = 4.0;
/// Radius lost per second.
pub const EVAPORATION_RATE: f32 = 0.10;
/// Seconds.
pub const MAX_LIFETIME: f32 = 10.0;
/// Ripples per second at most.
pub const RIPPLE_FREQUENCY: f32 = 0.5;
pub const RIPPLE_DURATION: f32 = 0.7;
pub const RIPPLE_SIZE_FACTOR: f32 = 1.2;

const MAX_ALPHA: f32 = 0.4;
const WIDTH_FACTOR: f32 = 1.5;
const HEIGHT_FACTOR: f32 = 0.7;
const RIPPLE_STROKE_WIDTH: f32 = 1.0;

/// One shallow pool of water. Shrinks as it ages and rings when fed.
#[derive(Clone, Debug, PartialEq)]
pub struct Puddle {
    pos: Vec2,
    current_size: f32,
    age: f32,
    time_since_last_ripple: f32,
    has_ripple: bool,
    ripple_progress: f32,
}

impl Puddle {
    pub fn new(pos: Vec2, initial_size: f32) -> Self {
        Self {
            pos,
            current_size: initial_size.clamp(0.0, MAX_PUDDLE_SIZE),
            age: 0.0,
            time_since_last_ripple: 0.0,
            has_ripple: false,
            ripple_progress: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn radius(&self) -> f32 {
        self.current_size
    }

    #[cfg(test)]
    pub fn age(&self) -> f32 {
        self.age
    }

    #[cfg(test)]
    pub fn has_ripple(&self) -> bool {
        self.has_ripple
    }

    #[cfg(test)]
    pub fn ripple_progress(&self) -> f32 {
        self.ripple_progress
    }

    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.current_size = (self.current_size - EVAPORATION_RATE * dt).max(0.0);

        if self.has_ripple {
            self.ripple_progress += dt / RIPPLE_DURATION;
            if self.ripple_progress >= 1.0 {
                self.has_ripple = false;
                self.ripple_progress = 0.0;
            }
        }

        self.time_since_last_ripple += dt;
    }

    pub fn add_water(&mut self, amount: f32) {
        self.current_size = (self.current_size + amount).min(MAX_PUDDLE_SIZE);

        // Rate limited so a steady stream of drops does not restart the ring every frame.
        if self.time_since_last_ripple > 1.0 / RIPPLE_FREQUENCY {
            self.has_ripple = true;
            self.ripple_progress = 0.0;
            self.time_since_last_ripple = 0.0;
        }
    }

    pub fn is_ready_for_removal(&self) -> bool {
        self.current_size <= 0.0 || self.age > MAX_LIFETIME
    }

    /// Draws the puddle as a flattened ellipse, plus its ripple ring if one is running.
    ///
    /// A paint that cannot be created only drops that element for this frame.
    pub fn draw<C: DrawContext>(&self, ctx: &mut C, base: Rgb) {
        if self.current_size <= 0.0 {
            return;
        }

        let alpha = (self.current_size / MAX_PUDDLE_SIZE * MAX_ALPHA).min(MAX_ALPHA);
        match ctx.create_paint(base.with_alpha(alpha)) {
            Ok(paint) => ctx.fill_ellipse(self.footprint(self.current_size), &paint),
            Err(e) => log::trace!("puddle at ({}, {}) skipped: {}", self.pos.x, self.pos.y, e),
        }

        if !self.has_ripple {
            return;
        }

        let ripple_size =
            self.current_size * RIPPLE_SIZE_FACTOR * (0.5 + self.ripple_progress * 0.5);
        let ripple_alpha = (MAX_ALPHA - self.ripple_progress * MAX_ALPHA).max(0.0);
        match ctx.create_paint(base.with_alpha(ripple_alpha)) {
            Ok(paint) => {
                ctx.stroke_ellipse(self.footprint(ripple_size), &paint, RIPPLE_STROKE_WIDTH)
            }
            Err(e) => log::trace!("ripple skipped: {}", e),
        }
    }

    fn footprint(&self, size: f32) -> Ellipse {
        Ellipse::new(self.pos, size * WIDTH_FACTOR, size * HEIGHT_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::paint::recording::{Command, RecordingContext};

    const BASE: Rgb = Rgb::new(0xAA, 0xAA, 0xAA);

    fn puddle() -> Puddle {
        Puddle::new(Vec2::new(10.0, 5.0), 3.0)
    }

    /// Ages the puddle past the ripple rate limit without changing its size.
    fn rippled() -> Puddle {
        let mut p = puddle();
        p.time_since_last_ripple = 2.5;
        p.add_water(0.0);
        assert!(p.has_ripple());
        p
    }

    #[test]
    fn update_ages_and_evaporates() {
        let mut p = puddle();
        p.update(2.0);
        assert!((p.age() - 2.0).abs() < 1e-6);
        assert!((p.radius() - 2.8).abs() < 1e-5);
    }

    #[test]
    fn evaporation_floors_at_zero() {
        let mut p = Puddle::new(Vec2::default(), 0.05);
        p.update(1.0);
        assert_eq!(p.radius(), 0.0);
        assert!(p.is_ready_for_removal());
    }

    #[test]
    fn add_water_is_capped_at_max_size() {
        let mut p = puddle();
        p.add_water(10.0);
        assert_eq!(p.radius(), MAX_PUDDLE_SIZE);
    }

    #[test]
    fn new_puddle_does_not_ripple_until_rate_limit_elapses() {
        let mut p = puddle();
        p.add_water(0.5);
        assert!(!p.has_ripple());

        p.update(2.0);
        p.add_water(0.1);
        assert!(!p.has_ripple(), "exactly 1/frequency is not enough");

        p.update(0.01);
        p.add_water(0.1);
        assert!(p.has_ripple());
        assert_eq!(p.ripple_progress(), 0.0);
    }

    #[test]
    fn water_added_while_rippling_grows_without_retriggering() {
        let mut p = rippled();
        p.update(0.35);
        let progress = p.ripple_progress();
        let size = p.radius();

        p.add_water(0.5);
        assert!((p.radius() - (size + 0.5)).abs() < 1e-6);
        assert_eq!(p.ripple_progress(), progress);
    }

    #[test]
    fn ripple_ends_after_duration() {
        let mut p = rippled();
        p.update(RIPPLE_DURATION * 0.5);
        assert!(p.has_ripple());
        assert!((p.ripple_progress() - 0.5).abs() < 1e-5);

        p.update(RIPPLE_DURATION * 0.6);
        assert!(!p.has_ripple());
        assert_eq!(p.ripple_progress(), 0.0);
    }

    #[test]
    fn removal_on_age_regardless_of_size() {
        let mut p = Puddle::new(Vec2::default(), MAX_PUDDLE_SIZE);
        for _ in 0..10 {
            p.update(1.0);
            p.add_water(MAX_PUDDLE_SIZE);
        }
        assert!(!p.is_ready_for_removal());
        p.update(0.01);
        assert!(p.radius() > 0.0);
        assert!(p.is_ready_for_removal());
    }

    #[test]
    fn draw_fills_flattened_ellipse_with_scaled_alpha() {
        let p = puddle();
        let mut ctx = RecordingContext::default();
        p.draw(&mut ctx, BASE);

        assert_eq!(ctx.commands.len(), 1);
        let Command::Fill(e, tint) = &ctx.commands[0] else {
            panic!("expected a fill");
        };
        assert_eq!(e.center, Vec2::new(10.0, 5.0));
        assert!((e.radius_x - 4.5).abs() < 1e-6);
        assert!((e.radius_y - 2.1).abs() < 1e-6);
        assert!((tint.alpha - 0.3).abs() < 1e-6);
        assert_eq!(tint.rgb, BASE);
        assert_eq!(ctx.live.get(), 0);
    }

    #[test]
    fn draw_adds_fading_ripple_ring() {
        let mut p = rippled();
        p.update(RIPPLE_DURATION * 0.5);
        let mut ctx = RecordingContext::default();
        p.draw(&mut ctx, BASE);

        assert_eq!(ctx.commands.len(), 2);
        let Command::Stroke(e, tint, width) = &ctx.commands[1] else {
            panic!("expected a stroke");
        };
        let ripple_size = p.radius() * RIPPLE_SIZE_FACTOR * 0.75;
        assert!((e.radius_x - ripple_size * 1.5).abs() < 1e-4);
        assert!((e.radius_y - ripple_size * 0.7).abs() < 1e-4);
        assert!((tint.alpha - 0.2).abs() < 1e-4);
        assert_eq!(*width, 1.0);
    }

    #[test]
    fn draw_is_noop_for_dry_puddle() {
        let p = Puddle::new(Vec2::default(), 0.0);
        let mut ctx = RecordingContext::default();
        p.draw(&mut ctx, BASE);
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn failed_paint_skips_drawing_and_leaks_nothing() {
        let p = rippled();
        let mut ctx = RecordingContext {
            fail_paints: true,
            ..Default::default()
        };
        p.draw(&mut ctx, BASE);
        assert!(ctx.commands.is_empty());
        assert_eq!(ctx.live.get(), 0);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Tick(f32),
        Water(f32),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0.0f32..3.0).prop_map(Step::Tick),
            (0.0f32..5.0).prop_map(Step::Water),
        ]
    }

    proptest! {
        #[test]
        fn size_and_ripple_stay_in_range(
            initial in 0.0f32..=MAX_PUDDLE_SIZE,
            steps in proptest::collection::vec(step(), 0..64),
        ) {
            let mut p = Puddle::new(Vec2::default(), initial);
            for s in steps {
                match s {
                    Step::Tick(dt) => p.update(dt),
                    Step::Water(w) => p.add_water(w),
                }
                prop_assert!((0.0..=MAX_PUDDLE_SIZE).contains(&p.radius()));
                if p.has_ripple() {
                    prop_assert!((0.0..1.0).contains(&p.ripple_progress()));
                }
            }
        }

        #[test]
        fn zero_tick_changes_nothing(
            initial in 0.0f32..=MAX_PUDDLE_SIZE,
            warmup in 0.0f32..5.0,
            repeats in 1usize..10,
        ) {
            let mut p = Puddle::new(Vec2::default(), initial);
            p.update(warmup);
            p.add_water(1.0);
            let before = p.clone();
            for _ in 0..repeats {
                p.update(0.0);
            }
            prop_assert_eq!(p, before);
        }

        #[test]
        fn size_never_grows_without_water(
            initial in 0.0f32..=MAX_PUDDLE_SIZE,
            ticks in proptest::collection::vec(0.0f32..2.0, 1..32),
        ) {
            let mut p = Puddle::new(Vec2::default(), initial);
            let mut last = p.radius();
            for dt in ticks {
                p.update(dt);
                prop_assert!(p.radius() <= last);
                last = p.radius();
            }
        }
    }
}
