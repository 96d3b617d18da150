// Copyright (c) 2026 rezky_nightky

//! The terminal standing in for a desktop: the whole window is the surface and
//! a few rows along one edge play the taskbar.

use crossterm::terminal;

use crate::config::TaskbarPlacement;
use crate::geometry::{ScreenRect, Vec2};
use crate::region::{HostQuery, PRIMARY_STRIP_ID};

/// Surface units per terminal column.
pub const CELL_W: i32 = 2;
/// Surface units per terminal row.
pub const CELL_H: i32 = 8;

pub fn cell_of(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / CELL_W as f32).floor() as i32,
        (pos.y / CELL_H as f32).floor() as i32,
    )
}

pub fn cell_center(col: i32, row: i32) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * CELL_W as f32,
        (row as f32 + 0.5) * CELL_H as f32,
    )
}

#[derive(Clone, Copy, Debug)]
pub struct TerminalShell {
    placement: TaskbarPlacement,
    strip_rows: u16,
    fixed_size: Option<(u16, u16)>,
}

impl TerminalShell {
    pub fn new(placement: TaskbarPlacement, strip_rows: u16) -> Self {
        Self {
            placement,
            strip_rows,
            fixed_size: None,
        }
    }

    /// A shell that reports `cols` x `rows` instead of asking the terminal.
    #[cfg(test)]
    pub fn with_size(placement: TaskbarPlacement, strip_rows: u16, cols: u16, rows: u16) -> Self {
        Self {
            placement,
            strip_rows,
            fixed_size: Some((cols, rows)),
        }
    }

    fn size(&self) -> Option<(u16, u16)> {
        if let Some(s) = self.fixed_size {
            return Some(s);
        }
        match terminal::size() {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("terminal size unavailable: {}", e);
                None
            }
        }
    }

    /// First terminal row of the strip, if there is one.
    pub fn strip_top_row(&self, rows: u16) -> Option<u16> {
        let strip = self.strip_rows.min(rows);
        match self.placement {
            TaskbarPlacement::Bottom => Some(rows - strip),
            TaskbarPlacement::Top => Some(0),
            TaskbarPlacement::None => None,
        }
    }

    pub fn strip_rows(&self) -> u16 {
        self.strip_rows
    }
}

impl HostQuery for TerminalShell {
    fn surface_rect(&self) -> ScreenRect {
        let (cols, rows) = self.size().unwrap_or((0, 0));
        ScreenRect::new(0, 0, cols as i32 * CELL_W, rows as i32 * CELL_H)
    }

    fn find_element(&self, id: &str) -> Option<ScreenRect> {
        if id != PRIMARY_STRIP_ID {
            return None;
        }
        let (cols, rows) = self.size()?;
        let top = self.strip_top_row(rows)? as i32;
        let strip = self.strip_rows.min(rows) as i32;
        Some(ScreenRect::new(
            0,
            top * CELL_H,
            cols as i32 * CELL_W,
            (top + strip) * CELL_H,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{TaskbarRegion, SECONDARY_STRIP_ID};

    #[test]
    fn bottom_strip_covers_last_rows() {
        let shell = TerminalShell::with_size(TaskbarPlacement::Bottom, 2, 80, 24);
        assert_eq!(shell.surface_rect(), ScreenRect::new(0, 0, 160, 192));
        assert_eq!(
            shell.find_element(PRIMARY_STRIP_ID),
            Some(ScreenRect::new(0, 176, 160, 192))
        );
        assert_eq!(shell.find_element(SECONDARY_STRIP_ID), None);
    }

    #[test]
    fn bottom_strip_resolves_to_region() {
        let shell = TerminalShell::with_size(TaskbarPlacement::Bottom, 2, 80, 24);
        let region = TaskbarRegion::resolve(&shell).expect("bottom strip accepted");
        assert!(region.contains(cell_center(40, 22)));
        assert!(!region.contains(cell_center(40, 23)));
    }

    #[test]
    fn top_strip_is_rejected_on_tall_terminals() {
        let shell = TerminalShell::with_size(TaskbarPlacement::Top, 2, 80, 40);
        assert!(shell.find_element(PRIMARY_STRIP_ID).is_some());
        assert!(TaskbarRegion::resolve(&shell).is_none());
    }

    #[test]
    fn no_strip_when_disabled() {
        let shell = TerminalShell::with_size(TaskbarPlacement::None, 2, 80, 24);
        assert!(shell.find_element(PRIMARY_STRIP_ID).is_none());
    }

    #[test]
    fn cell_mapping_round_trips_centers() {
        assert_eq!(cell_of(cell_center(7, 3)), (7, 3));
        assert_eq!(cell_of(Vec2::new(-0.5, 0.0)), (-1, 0));
    }
}
