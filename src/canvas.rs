// Copyright (c) 2026 rezky_nightky

use std::cell::Cell as Counter;
use std::rc::Rc;

use crossterm::style::Color;

use crate::frame::Frame;
use crate::geometry::Vec2;
use crate::host::{cell_center, cell_of, CELL_H, CELL_W};
use crate::paint::{DrawContext, Ellipse, PaintError, Rgb, Tint};
use crate::palette::{blend, to_color};
use crate::runtime::{ColorMode, GlyphSet};

/// Tints fainter than this would not change a single cell.
const MIN_VISIBLE_ALPHA: f32 = 0.01;

/// A resolved terminal color for one tint. Returned to the canvas count on drop.
pub struct Brush {
    fg: Option<Color>,
    alpha: f32,
    live: Rc<Counter<usize>>,
}

impl Drop for Brush {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Rasterizes ellipses in surface units onto a frame of terminal cells.
pub struct Canvas<'a> {
    frame: &'a mut Frame,
    mode: ColorMode,
    glyphs: GlyphSet,
    backdrop: Rgb,
    live: Rc<Counter<usize>>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut Frame, mode: ColorMode, glyphs: GlyphSet, backdrop: Rgb) -> Self {
        Self {
            frame,
            mode,
            glyphs,
            backdrop,
            live: Rc::new(Counter::new(0)),
        }
    }

    /// Brushes handed out and not yet dropped.
    pub fn live_brushes(&self) -> usize {
        self.live.get()
    }

    /// Cell range covering `[center - radius - pad, center + radius + pad]` on both axes.
    fn cell_bounds(e: &Ellipse, pad: f32) -> ((i32, i32), (i32, i32)) {
        let lo = cell_of(Vec2::new(
            e.center.x - e.radius_x - pad,
            e.center.y - e.radius_y - pad,
        ));
        let hi = cell_of(Vec2::new(
            e.center.x + e.radius_x + pad,
            e.center.y + e.radius_y + pad,
        ));
        (lo, hi)
    }
}

impl DrawContext for Canvas<'_> {
    type Paint = Brush;

    fn create_paint(&mut self, tint: Tint) -> Result<Brush, PaintError> {
        if !tint.alpha.is_finite() || !(0.0..=1.0).contains(&tint.alpha) {
            return Err(PaintError::InvalidAlpha(tint.alpha));
        }
        if tint.alpha <= MIN_VISIBLE_ALPHA {
            return Err(PaintError::Transparent(tint.alpha));
        }

        // Puddle alphas top out well below 1, so stretch them to stay readable on a terminal.
        let shown = blend(tint.rgb, self.backdrop, (tint.alpha * 2.5).min(1.0));
        self.live.set(self.live.get() + 1);
        Ok(Brush {
            fg: to_color(shown, self.mode),
            alpha: tint.alpha,
            live: Rc::clone(&self.live),
        })
    }

    fn fill_ellipse(&mut self, e: Ellipse, brush: &Brush) {
        let ch = self.glyphs.puddle(brush.alpha);
        let ((x0, y0), (x1, y1)) = Self::cell_bounds(&e, 0.0);
        let mut painted = false;

        if e.radius_x > 0.0 && e.radius_y > 0.0 {
            for row in y0..=y1 {
                for col in x0..=x1 {
                    let c = cell_center(col, row);
                    let dx = (c.x - e.center.x) / e.radius_x;
                    let dy = (c.y - e.center.y) / e.radius_y;
                    if dx * dx + dy * dy <= 1.0 {
                        self.frame.put_glyph(col, row, ch, brush.fg);
                        painted = true;
                    }
                }
            }
        }

        // Thin ellipses can miss every cell center; keep at least the cell under the center.
        if !painted {
            let (col, row) = cell_of(e.center);
            self.frame.put_glyph(col, row, ch, brush.fg);
        }
    }

    fn stroke_ellipse(&mut self, e: Ellipse, brush: &Brush, stroke_width: f32) {
        if e.radius_x <= 0.0 || e.radius_y <= 0.0 {
            return;
        }

        let ch = self.glyphs.ripple(brush.alpha);
        let tolerance = stroke_width * 0.5 + CELL_W.max(CELL_H) as f32 * 0.25;
        let ((x0, y0), (x1, y1)) = Self::cell_bounds(&e, tolerance);

        for row in y0..=y1 {
            for col in x0..=x1 {
                let c = cell_center(col, row);
                let (ox, oy) = (c.x - e.center.x, c.y - e.center.y);
                let len = (ox * ox + oy * oy).sqrt();
                let d = ((ox / e.radius_x).powi(2) + (oy / e.radius_y).powi(2)).sqrt();
                // Distance from the outline along the ray through the cell center.
                let off = if d > 0.0 {
                    len * (1.0 - 1.0 / d).abs()
                } else {
                    e.radius_x.min(e.radius_y)
                };
                if off <= tolerance {
                    self.frame.put_glyph(col, row, ch, brush.fg);
                }
            }
        }
    }
}
