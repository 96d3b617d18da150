// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;
use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    SeedableRng,
};

use crate::frame::Frame;
use crate::geometry::Vec2;
use crate::host::cell_of;
use crate::region::ACTIVE_BAND_HEIGHT;
use crate::runtime::GlyphSet;

/// Fall speed range in surface units per second.
const MIN_FALL_SPEED: f32 = 60.0;
const MAX_FALL_SPEED: f32 = 140.0;
/// Horizontal drift per unit of wind, in surface units per second.
const WIND_DRIFT: f32 = 4.0;

#[derive(Clone, Copy, Debug)]
struct Raindrop {
    pos: Vec2,
    speed: f32,
}

/// Falling rain. Each drop that reaches the floor becomes one drip event.
pub struct Drips {
    drops: Vec<Raindrop>,
    pub max_drops: usize,
    pub wind: f32,
    width: f32,
    height: f32,
    rng: StdRng,
    rand_chance: Uniform<f32>,
    rand_speed: Uniform<f32>,
}

impl Drips {
    pub fn new(max_drops: usize, wind: f32, seed: u64) -> Self {
        Self {
            drops: Vec::with_capacity(max_drops),
            max_drops,
            wind,
            width: 0.0,
            height: 0.0,
            rng: StdRng::seed_from_u64(seed),
            rand_chance: Uniform::new(0.0, 1.0).expect("valid range"),
            rand_speed: Uniform::new_inclusive(MIN_FALL_SPEED, MAX_FALL_SPEED)
                .expect("valid range"),
        }
    }

    /// Forgets all drops and adopts a new surface size in units.
    pub fn reset(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.drops.clear();
    }

    fn spawn(&mut self, stagger: bool) -> Raindrop {
        let x = self.rand_chance.sample(&mut self.rng) * self.width;
        // Fresh drops start above the surface; staggered ones fill the sky at startup.
        let y = if stagger {
            self.rand_chance.sample(&mut self.rng) * self.height
        } else {
            -self.rand_chance.sample(&mut self.rng) * self.height * 0.5
        };
        Raindrop {
            pos: Vec2::new(x, y),
            speed: self.rand_speed.sample(&mut self.rng),
        }
    }

    /// Advances every drop by `dt` seconds and appends landing points to `landed`.
    ///
    /// A drop lands when it crosses `floor_y`, somewhere inside the active band below it.
    /// Without a floor, drops fall off the bottom and are recycled.
    pub fn step(&mut self, dt: f32, floor_y: Option<f32>, landed: &mut Vec<Vec2>) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }

        let stagger = self.drops.is_empty();
        while self.drops.len() < self.max_drops {
            let d = self.spawn(stagger);
            self.drops.push(d);
        }
        self.drops.truncate(self.max_drops);

        let drift = self.wind * WIND_DRIFT * dt;
        for i in 0..self.drops.len() {
            let before = self.drops[i].pos.y;
            let d = &mut self.drops[i];
            d.pos.y += d.speed * dt;
            d.pos.x += drift;

            let landed_here = floor_y.is_some_and(|f| before < f && d.pos.y >= f);
            let gone = d.pos.y >= self.height || d.pos.x < 0.0 || d.pos.x >= self.width;

            if landed_here {
                let depth = self.rand_chance.sample(&mut self.rng) * ACTIVE_BAND_HEIGHT as f32;
                let floor = floor_y.unwrap_or(before);
                landed.push(Vec2::new(self.drops[i].pos.x, floor + depth));
            }
            if landed_here || gone {
                self.drops[i] = self.spawn(false);
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, glyphs: GlyphSet, color: Option<Color>) {
        let ch = glyphs.raindrop(self.wind);
        for d in &self.drops {
            if d.pos.y < 0.0 {
                continue;
            }
            let (col, row) = cell_of(d.pos);
            frame.put_glyph(col, row, ch, color);
        }
    }
}
