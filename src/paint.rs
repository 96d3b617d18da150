// Copyright (c) 2026 rezky_nightky

//! The drawing capability the puddle simulation renders through.
//!
//! A [`DrawContext`] hands out paints for a tint and draws ellipses with them.
//! Paints are plain values owned by the caller, so whatever the backend needs
//! to release happens in their `Drop`, on every exit path of a draw call.

use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, alpha: f32) -> Tint {
        Tint { rgb: self, alpha }
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color: {} (expected: RRGGBB)", s));
        }
        let v = u32::from_str_radix(hex, 16).map_err(|e| e.to_string())?;
        Ok(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }
}

/// A base color with an opacity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub rgb: Rgb,
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    pub const fn new(center: Vec2, radius_x: f32, radius_y: f32) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PaintError {
    #[error("paint alpha {0} is outside [0, 1]")]
    InvalidAlpha(f32),
    #[error("paint alpha {0} is too faint to show")]
    Transparent(f32),
}

pub trait DrawContext {
    type Paint;

    fn create_paint(&mut self, tint: Tint) -> Result<Self::Paint, PaintError>;

    fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &Self::Paint);

    fn stroke_ellipse(&mut self, ellipse: Ellipse, paint: &Self::Paint, stroke_width: f32);
}

#[cfg(test)]
pub mod recording {
    //! Test double that records draw commands instead of rasterizing them.

    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Command {
        Fill(Ellipse, Tint),
        Stroke(Ellipse, Tint, f32),
    }

    pub struct RecordedPaint {
        tint: Tint,
        live: Rc<Cell<usize>>,
    }

    impl Drop for RecordedPaint {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[derive(Default)]
    pub struct RecordingContext {
        pub commands: Vec<Command>,
        pub fail_paints: bool,
        pub live: Rc<Cell<usize>>,
    }

    impl DrawContext for RecordingContext {
        type Paint = RecordedPaint;

        fn create_paint(&mut self, tint: Tint) -> Result<RecordedPaint, PaintError> {
            if self.fail_paints {
                return Err(PaintError::Transparent(tint.alpha));
            }
            self.live.set(self.live.get() + 1);
            Ok(RecordedPaint {
                tint,
                live: Rc::clone(&self.live),
            })
        }

        fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &RecordedPaint) {
            self.commands.push(Command::Fill(ellipse, paint.tint));
        }

        fn stroke_ellipse(&mut self, ellipse: Ellipse, paint: &RecordedPaint, stroke_width: f32) {
            self.commands
                .push(Command::Stroke(ellipse, paint.tint, stroke_width));
        }
    }
}
