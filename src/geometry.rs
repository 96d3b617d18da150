// Copyright (c) 2026 rezky_nightky

/// A point in the local coordinate space of the owning surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Integer rectangle with inclusive-left/top, exclusive-right/bottom screen semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Shifts the rectangle so that `(origin_left, origin_top)` becomes `(0, 0)`.
    pub fn normalized(self, origin_left: i32, origin_top: i32) -> Self {
        Self {
            left: self.left.saturating_sub(origin_left),
            top: self.top.saturating_sub(origin_top),
            right: self.right.saturating_sub(origin_left),
            bottom: self.bottom.saturating_sub(origin_top),
        }
    }
}
