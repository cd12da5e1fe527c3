//! Crossterm renderer for the binary

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use super::{Frame, Renderer};
use crate::util::text::{char_col_to_visual_col, expand_tabs_for_display};

/// Rows below the text: status line and command line
const FOOTER_ROWS: usize = 2;

/// Prompt shown in front of the command line
const PROMPT: &str = "-> ";

/// Full-screen renderer on the alternate screen
pub struct TerminalRenderer {
    out: Stdout,
    /// First buffer line on screen
    top: usize,
    tab_stop: usize,
    active: bool,
}

impl TerminalRenderer {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn enter(tab_stop: usize) -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Clear(ClearType::All))?;
        Ok(Self {
            out,
            top: 0,
            tab_stop: tab_stop.max(1),
            active: true,
        })
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Scroll so that `line` is visible in a window of `height` rows
    fn scroll_to(&mut self, line: usize, height: usize) {
        if line < self.top {
            self.top = line;
        } else if line >= self.top + height {
            self.top = line + 1 - height;
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        let (width, rows) = terminal::size()?;
        let width = width as usize;
        let height = (rows as usize).saturating_sub(FOOTER_ROWS).max(1);
        self.scroll_to(frame.cursor.0, height);

        queue!(self.out, Hide)?;
        for row in 0..height {
            queue!(self.out, MoveTo(0, row as u16), Clear(ClearType::CurrentLine))?;
            let line = match frame.lines.get(self.top + row) {
                Some(line) => {
                    let chars: Vec<char> = line.chars().collect();
                    expand_tabs_for_display(&chars, self.tab_stop)
                }
                None => "~".to_string(),
            };
            let visible: String = line.chars().take(width).collect();
            queue!(self.out, Print(visible))?;
        }

        let status: String = frame.status_line().chars().take(width).collect();
        queue!(
            self.out,
            MoveTo(0, height as u16),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Reverse),
            Print(status),
            SetAttribute(Attribute::Reset),
            MoveTo(0, height as u16 + 1),
            Clear(ClearType::CurrentLine),
        )?;

        match &frame.command_line {
            Some(command) => {
                let prompt = format!("{PROMPT}{command}");
                let column = prompt.chars().count().min(width.saturating_sub(1));
                queue!(
                    self.out,
                    Print(prompt),
                    MoveTo(column as u16, height as u16 + 1)
                )?;
            }
            None => {
                let (line, column) = frame.cursor;
                let chars: Vec<char> = frame
                    .lines
                    .get(line)
                    .map(|l| l.chars().collect())
                    .unwrap_or_default();
                let visual = char_col_to_visual_col(&chars, column, self.tab_stop);
                let row = line.saturating_sub(self.top);
                queue!(
                    self.out,
                    MoveTo(visual.min(width.saturating_sub(1)) as u16, row as u16)
                )?;
            }
        }
        queue!(self.out, Show)?;
        self.out.flush()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
