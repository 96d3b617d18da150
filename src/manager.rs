// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    SeedableRng,
};

use crate::geometry::Vec2;
use crate::paint::{DrawContext, Rgb};
use crate::puddle::Puddle;
use crate::region::{HostQuery, TaskbarRegion};

pub const MAX_PUDDLES: usize = 50;
pub const MERGE_DISTANCE: f32 = 15.0;
pub const INITIAL_SIZE: f32 = 3.0;
pub const ADD_WATER_AMOUNT: f32 = 1.0;
/// Horizontal spread applied to new puddles so a column of drops does not stack them.
pub const JITTER: f32 = 2.0;

/// Owns every puddle on one surface and decides where each drip goes.
pub struct PuddleManager {
    host: Box<dyn HostQuery>,
    region: Option<TaskbarRegion>,
    puddles: Vec<Puddle>,
    tint: Rgb,
    rng: StdRng,
    jitter: Uniform<f32>,
}

impl PuddleManager {
    pub fn new(host: Box<dyn HostQuery>, tint: Rgb, seed: u64) -> Self {
        let region = TaskbarRegion::resolve(host.as_ref());
        Self {
            host,
            region,
            puddles: Vec::with_capacity(MAX_PUDDLES),
            tint,
            rng: StdRng::seed_from_u64(seed),
            jitter: Uniform::new_inclusive(-JITTER, JITTER).expect("valid range"),
        }
    }

    pub fn puddles(&self) -> &[Puddle] {
        &self.puddles
    }

    pub fn region(&self) -> Option<&TaskbarRegion> {
        self.region.as_ref()
    }

    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    pub fn set_tint(&mut self, tint: Rgb) {
        self.tint = tint;
    }

    pub fn update(&mut self, dt: f32) {
        for p in &mut self.puddles {
            p.update(dt);
        }
        self.puddles.retain(|p| !p.is_ready_for_removal());
    }

    pub fn draw<C: DrawContext>(&self, ctx: &mut C) {
        for p in &self.puddles {
            p.draw(ctx, self.tint);
        }
    }

    /// Routes one landed drop: feed a nearby puddle, start a new one, or,
    /// when the surface is full, feed the smallest puddle instead.
    pub fn create_or_add_to_puddle(&mut self, pos: Vec2) {
        if !self.is_on_taskbar(pos) {
            return;
        }

        if let Some(p) = self.find_nearby_puddle(pos) {
            p.add_water(ADD_WATER_AMOUNT);
            return;
        }

        if self.puddles.len() < MAX_PUDDLES {
            let jittered = Vec2::new(pos.x + self.jitter.sample(&mut self.rng), pos.y);
            self.puddles.push(Puddle::new(jittered, INITIAL_SIZE));
            return;
        }

        if let Some(p) = self
            .puddles
            .iter_mut()
            .min_by(|a, b| a.radius().total_cmp(&b.radius()))
        {
            log::trace!(
                "puddle cap reached, feeding smallest at ({}, {})",
                p.position().x,
                p.position().y
            );
            p.add_water(ADD_WATER_AMOUNT);
        }
    }

    /// Drops every puddle and looks the taskbar up again.
    pub fn reset(&mut self) {
        log::debug!("resetting {} puddles", self.puddles.len());
        self.puddles.clear();
        self.region = TaskbarRegion::resolve(self.host.as_ref());
    }

    pub fn is_on_taskbar(&self, pos: Vec2) -> bool {
        self.region.is_some_and(|r| r.contains(pos))
    }

    /// First puddle in collection order within merge distance, not the nearest one.
    fn find_nearby_puddle(&mut self, pos: Vec2) -> Option<&mut Puddle> {
        self.puddles
            .iter_mut()
            .find(|p| p.position().distance(pos) < MERGE_DISTANCE)
    }
}
