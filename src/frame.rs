// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Cell;

/// The character grid a tick is rendered into before it is flushed to the terminal.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    blank: Cell,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let blank = Cell::blank_with_bg(bg);
        Self {
            width,
            height,
            cells: vec![blank; width as usize * height as usize],
            blank,
        }
    }

    pub fn clear_with_bg(&mut self, bg: Option<Color>) {
        self.blank = Cell::blank_with_bg(bg);
        self.cells.fill(self.blank);
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Like [`Frame::index`] but for signed coordinates that may fall off the grid.
    pub fn index_signed(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.index(x, y)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells.get(i).copied().unwrap_or(self.blank)
    }

    /// Writes a glyph, keeping whatever background the cell already has.
    pub fn put_glyph(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>) {
        if let Some(i) = self.index_signed(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    pub fn fill_row_bg(&mut self, y: u16, bg: Option<Color>) {
        for x in 0..self.width {
            if let Some(i) = self.index(x, y) {
                self.cells[i].bg = bg;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_with_bg_makes_cells_blank() {
        let mut f = Frame::new(2, 2, None);
        f.put_glyph(0, 0, 'x', None);
        assert_eq!(f.get(0, 0).unwrap().ch, 'x');
        f.clear_with_bg(Some(Color::Black));
        assert_eq!(f.get(0, 0).unwrap().ch, ' ');
        assert_eq!(f.get(1, 1).unwrap().bg, Some(Color::Black));
    }

    #[test]
    fn put_glyph_keeps_background_and_ignores_off_grid() {
        let mut f = Frame::new(3, 2, None);
        f.fill_row_bg(1, Some(Color::DarkGrey));
        f.put_glyph(1, 1, '~', Some(Color::White));
        f.put_glyph(-1, 0, '!', None);
        f.put_glyph(3, 0, '!', None);

        let c = f.get(1, 1).unwrap();
        assert_eq!((c.ch, c.fg, c.bg), ('~', Some(Color::White), Some(Color::DarkGrey)));
        assert!((0..3).all(|x| f.get(x, 0).unwrap().ch == ' '));
    }
}
