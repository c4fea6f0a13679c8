//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! A frame is sent as runs of changed glyphs. Runs on one row separated by a
//! short unchanged gap are merged, so a flashing row or a falling piece goes
//! out as one stretch instead of many cursor jumps. The encoder tracks the
//! terminal pen (cursor, colors, intensity) and only emits what differs from
//! the glyph before.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};

/// Unchanged glyphs a run may swallow before it is split in two.
const MERGE_GAP: u16 = 4;

/// Horizontal stretch of glyphs to reprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Collect the runs of `next` that differ from `prev` into `runs`.
///
/// Without a previous frame of the same size every row is one full run.
pub fn collect_runs(prev: Option<&FrameBuffer>, next: &FrameBuffer, runs: &mut Vec<Run>) {
    runs.clear();
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    let Some(prev) = prev else {
        runs.extend((0..next.height()).map(|y| Run {
            x: 0,
            y,
            len: next.width(),
        }));
        return;
    };

    for y in 0..next.height() {
        let mut open: Option<Run> = None;
        for x in 0..next.width() {
            if prev.get(x, y) == next.get(x, y) {
                continue;
            }
            let extend = matches!(open, Some(run) if x - (run.x + run.len) <= MERGE_GAP);
            match open.as_mut() {
                Some(run) if extend => run.len = x + 1 - run.x,
                _ => runs.extend(open.replace(Run { x, y, len: 1 })),
            }
        }
        runs.extend(open);
    }
}

/// Terminal state as the encoder last left it.
#[derive(Debug, Default)]
struct Pen {
    at: Option<(u16, u16)>,
    style: Option<GlyphStyle>,
}

impl Pen {
    fn move_to(&mut self, out: &mut Vec<u8>, x: u16, y: u16) -> Result<()> {
        if self.at != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
            self.at = Some((x, y));
        }
        Ok(())
    }

    fn print(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        self.restyle(out, glyph.style)?;
        out.queue(Print(glyph.ch))?;
        if let Some((x, _)) = self.at.as_mut() {
            *x = x.saturating_add(1);
        }
        Ok(())
    }

    fn restyle(&mut self, out: &mut Vec<u8>, style: GlyphStyle) -> Result<()> {
        let last = self.style;
        if last.map(|s| s.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(term_color(style.fg)))?;
        }
        if last.map(|s| s.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(term_color(style.bg)))?;
        }
        // Bold and dim share one intensity slot; switch through normal.
        if last.map(|s| (s.bold, s.dim)) != Some((style.bold, style.dim)) {
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        self.style = Some(style);
        Ok(())
    }
}

/// Turns frames into terminal command bytes, reusing its run buffer.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    runs: Vec<Run>,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `next` against `prev` into `out`. Returns how many glyphs were written.
    ///
    /// Nothing at all is written when the frames are identical.
    pub fn encode(
        &mut self,
        prev: Option<&FrameBuffer>,
        next: &FrameBuffer,
        out: &mut Vec<u8>,
    ) -> Result<usize> {
        let full = prev.map_or(true, |p| p.width() != next.width() || p.height() != next.height());
        collect_runs(prev, next, &mut self.runs);
        if self.runs.is_empty() {
            return Ok(0);
        }

        if full {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
        }
        let mut pen = Pen::default();
        let mut written = 0;
        for run in &self.runs {
            pen.move_to(out, run.x, run.y)?;
            for x in run.x..run.x + run.len {
                pen.print(out, next.get(x, run.y).unwrap_or_default())?;
            }
            written += run.len as usize;
        }
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(written)
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Owns stdout, the previous frame and the byte buffer for one terminal session.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    encoder: FrameEncoder,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            encoder: FrameEncoder::new(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Flush `fb`, then swap it with the previous frame.
    ///
    /// After the call `fb` holds stale contents the caller is expected to
    /// overwrite with the next frame.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let prev = self
            .last
            .take()
            .filter(|p| p.width() == fb.width() && p.height() == fb.height());

        self.buf.clear();
        self.encoder.encode(prev.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let mut prev = prev.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    /// Ring the terminal bell.
    pub fn bell(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.push(0x07);
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}
