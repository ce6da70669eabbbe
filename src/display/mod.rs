/// Rendering layer — all terminal I/O lives here.
///
/// The simulation hands over a list of cell-region commands each frame; the
/// surface paints exactly those cells and nothing else.  No game logic is
/// performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Bounds, CellColor, RenderCommand};

/// Consumer of one frame's render commands.
pub trait DisplaySurface {
    fn present(&mut self, commands: &[RenderCommand]) -> std::io::Result<()>;
}

// ── Colour palette ────────────────────────────────────────────────────────────

fn terminal_color(color: CellColor) -> Color {
    match color {
        CellColor::White => Color::White,
        CellColor::Red => Color::Red,
        CellColor::Cyan => Color::Cyan,
        CellColor::Magenta => Color::Magenta,
        CellColor::Green => Color::Green,
        CellColor::Yellow => Color::Yellow,
        CellColor::DarkGrey => Color::DarkGrey,
    }
}

// ── Terminal surface ──────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    bounds: Bounds,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, bounds: Bounds) -> Self {
        Self { out, bounds }
    }

    /// Blank the whole screen once before the first frame.
    pub fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn present(&mut self, commands: &[RenderCommand]) -> std::io::Result<()> {
        for command in commands {
            // Cells outside the grid are dropped.
            if command.x > self.bounds.max_x || command.y > self.bounds.max_y {
                continue;
            }
            let (Ok(x), Ok(y)) = (u16::try_from(command.x), u16::try_from(command.y)) else {
                continue;
            };
            self.out.queue(cursor::MoveTo(x, y))?;
            self.out
                .queue(style::SetForegroundColor(terminal_color(command.color)))?;
            self.out.queue(Print(&command.text))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
