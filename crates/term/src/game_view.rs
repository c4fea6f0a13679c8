//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O, so every frame can be checked in tests.

use crate::core::{color, SessionSnapshot};
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{Cell, GameEvent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH: Rgb = Rgb::new(255, 255, 255);
const BLOCK: char = '█';
const CONTROLS: &str = "arrows move  up rotate  space drop  p pause  r restart  m mute  q quit";

/// Flip period of the PAUSED banner.
pub const PAUSE_BLINK_MS: u64 = 380;

/// Host-side state drawn next to the game; the session knows nothing of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostStatus {
    pub muted: bool,
    /// Blinking text is in its visible half.
    pub blink_on: bool,
}

impl Default for HostStatus {
    fn default() -> Self {
        Self {
            muted: false,
            blink_on: true,
        }
    }
}

impl HostStatus {
    /// Blink phase for a clock reading in milliseconds.
    pub fn blink_on_at(elapsed_ms: u64) -> bool {
        (elapsed_ms / PAUSE_BLINK_MS) % 2 == 0
    }

    /// Whether `event` gets the audible cue (cleared lines and game over, unless muted).
    pub fn rings_for(&self, event: GameEvent) -> bool {
        !self.muted && matches!(event, GameEvent::LinesCleared(_) | GameEvent::GameOver)
    }
}

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board origin inside the framebuffer (top-left corner of the border).
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the well, the pieces, the side panel and the overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a typical terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered well in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_host(snap, &HostStatus::default(), viewport, fb);
    }

    pub fn render_into_with_host(
        &self,
        snap: &SessionSnapshot,
        host: &HostStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));

        let (w, h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            w - 2,
            h - 2,
            ' ',
            GlyphStyle::plain(Rgb::new(80, 80, 90), WELL_BG),
        );
        draw_border(fb, frame, GlyphStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG));

        self.draw_grid(fb, frame, snap);

        if let Some(ghost) = snap.ghost {
            let style = GlyphStyle::plain(color(ghost.kind).into(), WELL_BG).dim();
            for (x, y) in ghost.cells() {
                self.draw_board_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(active) = snap.active {
            let style = GlyphStyle::plain(color(active.kind).into(), WELL_BG).bold();
            for (x, y) in active.cells() {
                self.draw_board_cell(fb, frame, x, y, BLOCK, style);
            }
        }

        self.draw_side_panel(fb, snap, host, viewport, frame);
        draw_footer(fb, viewport, frame);

        if snap.game_over() {
            draw_overlay(
                fb,
                frame,
                &[("GAME OVER", None), ("SCORE ", Some(snap.score)), ("r: restart", None)],
            );
        } else if snap.paused {
            let banner = if host.blink_on { "PAUSED" } else { "" };
            draw_overlay(fb, frame, &[(banner, None), ("p: resume", None)]);
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_host(
        &self,
        snap: &SessionSnapshot,
        host: &HostStatus,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_host(snap, host, viewport, &mut fb);
        fb
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, frame: Frame, snap: &SessionSnapshot) {
        let flash = GlyphStyle::plain(FLASH, WELL_BG).bold();
        let empty = GlyphStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();

        for (y, row) in snap.grid.rows().enumerate() {
            let pending = snap.is_pending_clear(y as u8);
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match *cell {
                    _ if pending => (BLOCK, flash),
                    Cell::Filled { color: stored, .. } => {
                        (BLOCK, GlyphStyle::plain(stored.into(), WELL_BG))
                    }
                    Cell::Empty => ('·', empty),
                };
                self.draw_board_cell(fb, frame, x as i8, y as i8, ch, style);
            }
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: GlyphStyle,
    ) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        host: &HostStatus,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        draw_preview(fb, panel_x, y, snap.next_kind);
        y = y.saturating_add(3);

        let mut x = panel_x;
        for kind in snap.upcoming.iter() {
            x = fb.put_str(x, y, kind.as_str(), value.dim()) + 1;
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SOUND", label);
        fb.put_str(panel_x, y + 1, if host.muted { "OFF" } else { "ON" }, value);
    }
}

/// Small two-row picture of a piece at rotation 0.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
    let style = GlyphStyle::plain(color(kind).into(), SCREEN_BG);
    let offsets = crate::core::shape_offsets(kind, 0);
    let min_y = offsets.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
    for (dx, dy) in offsets {
        let px = x + (dx as u16) * 2;
        let py = y + (dy - min_y) as u16;
        fb.fill_rect(px, py, 2, 1, BLOCK, style);
    }
}

/// One line of key hints under the well, when the viewport has room.
fn draw_footer(fb: &mut FrameBuffer, viewport: Viewport, f: Frame) {
    let y = f.y + f.h;
    if y >= viewport.height {
        return;
    }
    let width = CONTROLS.chars().count() as u16;
    let x = viewport.width.saturating_sub(width) / 2;
    fb.put_str(x, y, CONTROLS, GlyphStyle::default().dim());
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: GlyphStyle) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

/// Centered lines over the well; a line may end with a number.
fn draw_overlay(fb: &mut FrameBuffer, f: Frame, lines: &[(&str, Option<u32>)]) {
    let style = GlyphStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let top = f.y + f.h / 2 - (lines.len() as u16) / 2;

    for (i, &(text, number)) in lines.iter().enumerate() {
        let width = text.chars().count() as u16 + number.map_or(0, digit_count);
        let x = f.x + f.w.saturating_sub(width) / 2;
        let y = top + i as u16;
        let end = fb.put_str(x, y, text, style);
        if let Some(n) = number {
            fb.put_u32(end, y, n, style);
        }
    }
}

fn digit_count(n: u32) -> u16 {
    n.checked_ilog10().map_or(1, |d| d as u16 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivePiece, Session};
    use crate::fb::Glyph;
    use crate::types::Color;

    fn board_origin() -> (u16, u16) {
        // 22x22 viewport: the frame fills it exactly.
        (1, 1)
    }

    fn glyph_at_cell(fb: &FrameBuffer, x: u16, y: u16) -> Glyph {
        let (ox, oy) = board_origin();
        fb.get(ox + x * 2, oy + y).unwrap()
    }

    #[test]
    fn bell_follows_mute() {
        let mut host = HostStatus::default();
        assert!(host.rings_for(GameEvent::LinesCleared(2)));
        assert!(host.rings_for(GameEvent::GameOver));
        assert!(!host.rings_for(GameEvent::PieceLocked));

        host.muted = true;
        assert!(!host.rings_for(GameEvent::LinesCleared(4)));
        assert!(!host.rings_for(GameEvent::GameOver));
    }

    #[test]
    fn blink_flips_every_period() {
        assert!(HostStatus::blink_on_at(0));
        assert!(HostStatus::blink_on_at(PAUSE_BLINK_MS - 1));
        assert!(!HostStatus::blink_on_at(PAUSE_BLINK_MS));
        assert!(HostStatus::blink_on_at(PAUSE_BLINK_MS * 2));
    }

    #[test]
    fn digit_count_handles_zero_and_powers_of_ten() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u32::MAX), 10);
    }

    #[test]
    fn locked_cells_use_their_stored_color() {
        let mut snap = Session::new(1).snapshot();
        snap.active = None;
        snap.ghost = None;
        let stored = Color::new(1, 2, 3);
        snap.grid.set(
            0,
            19,
            Cell::Filled {
                kind: PieceKind::T,
                color: stored,
            },
        );

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        let g = glyph_at_cell(&fb, 0, 19);
        assert_eq!(g.ch, BLOCK);
        assert_eq!(g.style.fg, Rgb::new(1, 2, 3));
    }

    #[test]
    fn pending_rows_flash_white() {
        let mut snap = Session::new(1).snapshot();
        snap.active = None;
        snap.ghost = None;
        snap.pending_clear_rows.push(19);

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        for x in 0..BOARD_WIDTH as u16 {
            let g = glyph_at_cell(&fb, x, 19);
            assert_eq!(g.ch, BLOCK);
            assert_eq!(g.style.fg, FLASH);
        }
        assert_eq!(glyph_at_cell(&fb, 0, 18).ch, '·');
    }

    #[test]
    fn active_is_bold_and_ghost_is_dim() {
        let mut snap = Session::new(1).snapshot();
        let piece = ActivePiece::spawn(PieceKind::O);
        snap.active = Some(piece);
        snap.ghost = Some(ActivePiece::new(PieceKind::O, piece.x, 18, 0));

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        for (x, y) in piece.cells() {
            assert!(glyph_at_cell(&fb, x as u16, y as u16).style.bold);
        }
        for (x, y) in snap.ghost.unwrap().cells() {
            let g = glyph_at_cell(&fb, x as u16, y as u16);
            assert_eq!(g.ch, '░');
            assert!(g.style.dim);
        }
    }
}
