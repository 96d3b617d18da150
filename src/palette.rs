// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::paint::Rgb;
use crate::runtime::ColorMode;

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const STRIP: Rgb = Rgb::new(32, 34, 40);
const STRIP_EDGE: Rgb = Rgb::new(70, 74, 84);

/// Terminal colors for everything that is not a puddle.
#[derive(Clone, Debug)]
pub struct Palette {
    pub bg: Option<Color>,
    pub strip_bg: Option<Color>,
    pub strip_edge: Option<Color>,
    pub drop: Option<Color>,
    /// What puddle tints are blended over.
    pub backdrop: Rgb,
}

fn dist2(a: Rgb, b: Rgb) -> i32 {
    let dr = (a.r as i32) - (b.r as i32);
    let dg = (a.g as i32) - (b.g as i32);
    let db = (a.b as i32) - (b.b as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(c: Rgb) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let level = |v: u8| ((v as u16 * 5) + 127) / 255;
    let (r6, g6, b6) = (level(c.r), level(c.g), level(c.b));
    let cube = Rgb::new(
        CUBE_LEVELS[r6 as usize],
        CUBE_LEVELS[g6 as usize],
        CUBE_LEVELS[b6 as usize],
    );
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);

    let avg = ((c.r as u16 + c.g as u16 + c.b as u16) / 3) as u8;
    let (gray_idx, gray) = if avg < 8 {
        (16, Rgb::new(0, 0, 0))
    } else if avg > 238 {
        (231, Rgb::new(255, 255, 255))
    } else {
        let step = (avg - 8) / 10;
        let v = 8 + 10 * step;
        (232 + step, Rgb::new(v, v, v))
    };

    if dist2(c, gray) < dist2(c, cube) {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(c: Rgb) -> Color {
    const TABLE: [(Color, Rgb); 16] = [
        (Color::Black, Rgb::new(0, 0, 0)),
        (Color::DarkGrey, Rgb::new(128, 128, 128)),
        (Color::Grey, Rgb::new(192, 192, 192)),
        (Color::White, Rgb::new(255, 255, 255)),
        (Color::DarkRed, Rgb::new(128, 0, 0)),
        (Color::Red, Rgb::new(255, 0, 0)),
        (Color::DarkGreen, Rgb::new(0, 128, 0)),
        (Color::Green, Rgb::new(0, 255, 0)),
        (Color::DarkBlue, Rgb::new(0, 0, 128)),
        (Color::Blue, Rgb::new(0, 0, 255)),
        (Color::DarkCyan, Rgb::new(0, 128, 128)),
        (Color::Cyan, Rgb::new(0, 255, 255)),
        (Color::DarkMagenta, Rgb::new(128, 0, 128)),
        (Color::Magenta, Rgb::new(255, 0, 255)),
        (Color::DarkYellow, Rgb::new(128, 128, 0)),
        (Color::Yellow, Rgb::new(255, 255, 0)),
    ];

    TABLE
        .iter()
        .min_by_key(|(_, rgb)| dist2(c, *rgb))
        .map(|(color, _)| *color)
        .unwrap_or(Color::White)
}

/// Maps an RGB value to what the terminal can show. `None` in mono mode.
pub fn to_color(c: Rgb, mode: ColorMode) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::TrueColor => Some(Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }),
        ColorMode::Color256 => Some(Color::AnsiValue(rgb_to_ansi256(c))),
        ColorMode::Color16 => Some(rgb_to_color16(c)),
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// `over` painted with opacity `alpha` on top of `under`.
pub fn blend(over: Rgb, under: Rgb, alpha: f32) -> Rgb {
    let t = alpha.clamp(0.0, 1.0);
    Rgb::new(
        lerp_u8(under.r, over.r, t),
        lerp_u8(under.g, over.g, t),
        lerp_u8(under.b, over.b, t),
    )
}

pub fn build_palette(tint: Rgb, mode: ColorMode) -> Palette {
    Palette {
        bg: to_color(BACKGROUND, mode),
        strip_bg: to_color(STRIP, mode),
        strip_edge: to_color(STRIP_EDGE, mode),
        drop: to_color(blend(tint, BACKGROUND, 0.8), mode),
        backdrop: STRIP,
    }
}
