// Copyright (c) 2025 rezk_nightky

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphSet {
    Unicode,
    Ascii,
}

impl GlyphSet {
    /// Fill glyph for a puddle cell, denser for deeper water.
    pub fn puddle(self, alpha: f32) -> char {
        match (self, alpha) {
            (GlyphSet::Unicode, a) if a >= 0.3 => '▓',
            (GlyphSet::Unicode, a) if a >= 0.2 => '▒',
            (GlyphSet::Unicode, _) => '░',
            (GlyphSet::Ascii, a) if a >= 0.3 => '=',
            (GlyphSet::Ascii, a) if a >= 0.2 => '~',
            (GlyphSet::Ascii, _) => '-',
        }
    }

    pub fn ripple(self, alpha: f32) -> char {
        match (self, alpha >= 0.2) {
            (GlyphSet::Unicode, true) => '○',
            (GlyphSet::Unicode, false) => '◦',
            (GlyphSet::Ascii, true) => 'o',
            (GlyphSet::Ascii, false) => '.',
        }
    }

    pub fn raindrop(self, wind: f32) -> char {
        if wind > 1.0 {
            '\\'
        } else if wind < -1.0 {
            '/'
        } else {
            '|'
        }
    }

    pub fn strip(self) -> char {
        match self {
            GlyphSet::Unicode => '▔',
            GlyphSet::Ascii => '_',
        }
    }
}
