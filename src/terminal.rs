// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

/// Owns raw mode and the alternate screen for as long as it lives.
pub struct Terminal {
    stdout: Stdout,
    last: Option<Frame>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: None,
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Writes the cells that differ from the previously drawn frame.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let full = self
            .last
            .as_ref()
            .map(|l| l.width != frame.width || l.height != frame.height)
            .unwrap_or(true);
        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut cur_fg: Option<Option<Color>> = None;
        let mut cur_bg: Option<Option<Color>> = None;
        let mut cursor_at: Option<(u16, u16)> = None;

        for y in 0..frame.height {
            for x in 0..frame.width {
                let Some(idx) = frame.index(x, y) else {
                    continue;
                };
                let cell = frame.cell_at_index(idx);
                if !full && self.last.as_ref().map(|l| l.cell_at_index(idx)) == Some(cell) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    self.stdout.queue(cursor::MoveTo(x, y))?;
                }
                self.queue_colors(&cell, &mut cur_fg, &mut cur_bg)?;
                self.stdout.queue(Print(cell.ch))?;
                cursor_at = if x + 1 < frame.width {
                    Some((x + 1, y))
                } else {
                    None
                };
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;

        match self.last.as_mut() {
            Some(last) if !full => last.clone_from(frame),
            _ => self.last = Some(frame.clone()),
        }
        Ok(())
    }

    fn queue_colors(
        &mut self,
        cell: &Cell,
        cur_fg: &mut Option<Option<Color>>,
        cur_bg: &mut Option<Option<Color>>,
    ) -> Result<()> {
        if *cur_fg != Some(cell.fg) {
            self.stdout.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
            *cur_fg = Some(cell.fg);
        }
        if *cur_bg != Some(cell.bg) {
            self.stdout.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
            *cur_bg = Some(cell.bg);
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
